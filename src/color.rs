//! Conversions between the portable [`Color`] and the toolkit's [`NativeColor`].
//!
//! Both types carry the same four channels, so the conversions copy them one to one and
//! never fail.
//!
//! ```rust
//! use locator_adapter::{Color, ColorExt, NativeColorExt};
//!
//! let teal = Color::from_argb(255, 0, 128, 128);
//! let brush = teal.to_native_brush();
//! assert_eq!(brush.color().from_native(), teal);
//! ```

use crate::{NativeColor, SolidColorBrush};

/// Portable ARGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self::from_argb(255, 0, 0, 0)
    }
}

impl Color {
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Opaque color.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_argb(255, r, g, b)
    }
}

pub trait ColorExt {
    fn to_native(self) -> NativeColor;

    fn to_native_brush(self) -> SolidColorBrush;
}

impl ColorExt for Color {
    fn to_native(self) -> NativeColor {
        NativeColor::from_argb(self.a, self.r, self.g, self.b)
    }

    fn to_native_brush(self) -> SolidColorBrush {
        SolidColorBrush::new(self.to_native())
    }
}

pub trait NativeColorExt {
    fn from_native(self) -> Color;
}

impl NativeColorExt for NativeColor {
    fn from_native(self) -> Color {
        Color::from_argb(self.a, self.r, self.g, self.b)
    }
}

impl From<Color> for NativeColor {
    fn from(color: Color) -> Self {
        color.to_native()
    }
}

impl From<NativeColor> for Color {
    fn from(color: NativeColor) -> Self {
        color.from_native()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_order_preserved() {
        let native = Color::from_argb(1, 2, 3, 4).to_native();
        assert_eq!((native.a, native.r, native.g, native.b), (1, 2, 3, 4));
    }

    #[test]
    fn test_brush_wraps_native_color() {
        let color = Color::from_rgb(10, 20, 30);
        assert_eq!(color.to_native_brush().color(), color.to_native());
        assert_eq!(SolidColorBrush::from(color.to_native()), color.to_native_brush());
    }

    #[test]
    fn test_from_impls() {
        let color = Color::from_argb(128, 255, 0, 64);
        let native: NativeColor = color.into();
        assert_eq!(Color::from(native), color);
    }

    #[test]
    fn test_default_is_opaque_black() {
        assert_eq!(Color::default(), Color::from_rgb(0, 0, 0));
        assert_eq!(NativeColor::default().a, 0);
    }
}
