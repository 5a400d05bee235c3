// vidbind/src/geom.rs
//
//! Geometry and color value types shared with the native layer.

/// A rectangle in pixels. Native rectangles are always integral.
pub type Rect = euclid::default::Rect<i32>;

/// A point in pixels.
pub type Point = euclid::default::Point2D<i32>;

/// A size in pixels.
pub type Size = euclid::default::Size2D<i32>;

/// Builds a rectangle from the `x, y, w, h` quadruple the native API uses.
#[inline]
pub fn rect(x: i32, y: i32, width: i32, height: i32) -> Rect {
    Rect::new(Point::new(x, y), Size::new(width, height))
}

/// The rectangle substituted for host entries that do not resolve to a rectangle.
#[inline]
pub fn zero_rect() -> Rect {
    rect(0, 0, 0, 0)
}

/// A red/green/blue color triple.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[inline]
    pub fn new(r: u8, g: u8, b: u8) -> Rgb {
        Rgb { r, g, b }
    }
}
