//! View types shared by the integration tests.

#![allow(dead_code)]

pub struct ViewModelOne;
pub struct ViewModelTwo;

/// A view bound to the view model `VM`.
pub trait ViewFor<VM>: Send + Sync {
    fn name(&self) -> &'static str;
}

impl<VM> std::fmt::Debug for dyn ViewFor<VM> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

pub type ViewForOne = Box<dyn ViewFor<ViewModelOne>>;
pub type ViewForTwo = Box<dyn ViewFor<ViewModelTwo>>;

pub struct ViewOne;

impl ViewFor<ViewModelOne> for ViewOne {
    fn name(&self) -> &'static str {
        "ViewOne"
    }
}

pub struct AlternateViewOne;

impl ViewFor<ViewModelOne> for AlternateViewOne {
    fn name(&self) -> &'static str {
        "AlternateViewOne"
    }
}

pub struct ViewTwo;

impl ViewFor<ViewModelTwo> for ViewTwo {
    fn name(&self) -> &'static str {
        "ViewTwo"
    }
}

pub fn view_one() -> ViewForOne {
    Box::new(ViewOne)
}

pub fn alternate_view_one() -> ViewForOne {
    Box::new(AlternateViewOne)
}

pub fn view_two() -> ViewForTwo {
    Box::new(ViewTwo)
}
