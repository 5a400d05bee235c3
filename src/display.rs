// vidbind/src/display.rs
//
//! Display modes.

use crate::geom::Size;
use crate::pixels::PixelFormatEnum;

/// A fixed combination of resolution, pixel format and refresh rate supported by a display.
///
/// Display modes are plain values copied out of the native layer when they are enumerated or
/// queried; nothing needs to be released. They can only be produced by `Video::display_modes()`
/// or `Window::display_mode()` and can only be applied wholesale with
/// `Window::set_display_mode()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayMode {
    pub(crate) format: PixelFormatEnum,
    pub(crate) width: i32,
    pub(crate) height: i32,
    pub(crate) refresh_rate: i32,
}

impl DisplayMode {
    /// Describes a mode. Backends use this to report the modes they enumerate.
    #[inline]
    pub fn new(format: PixelFormatEnum, width: i32, height: i32, refresh_rate: i32)
               -> DisplayMode {
        DisplayMode { format, width, height, refresh_rate }
    }

    #[inline]
    pub fn format(&self) -> PixelFormatEnum {
        self.format
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The refresh rate in hertz, or 0 if unspecified.
    #[inline]
    pub fn refresh_rate(&self) -> i32 {
        self.refresh_rate
    }
}
