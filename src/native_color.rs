//! Toolkit-native color and brush types.

/// A UI toolkit color with 8-bit alpha, red, green and blue channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NativeColor {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl NativeColor {
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }
}

/// Paints an area with a single [`NativeColor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SolidColorBrush {
    color: NativeColor,
}

impl SolidColorBrush {
    pub const fn new(color: NativeColor) -> Self {
        Self { color }
    }

    pub const fn color(&self) -> NativeColor {
        self.color
    }
}

impl From<NativeColor> for SolidColorBrush {
    fn from(color: NativeColor) -> Self {
        Self::new(color)
    }
}
