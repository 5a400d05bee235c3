// vidbind/src/platform/headless/mod.rs
//
//! An in-process stand-in for the native video library.
//!
//! Surfaces are real pixel buffers, and blits, fills and BMP I/O behave like their native
//! counterparts. Windows are bookkeeping only: nothing is ever shown on screen. Every release of
//! a native handle is counted, which lets callers check that wrappers release exactly what they
//! own.

pub mod context;
pub mod device;
pub mod surface;
pub mod window;

pub use self::device::{Device, ReleaseStats};

use crate::info::Version;
use crate::pixels::PixelFormatEnum;

/// A display mode as the stand-in reports it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeadlessMode {
    pub format: PixelFormatEnum,
    pub width: i32,
    pub height: i32,
    pub refresh_rate: i32,
}

impl HeadlessMode {
    #[inline]
    pub fn new(format: PixelFormatEnum, width: i32, height: i32, refresh_rate: i32)
               -> HeadlessMode {
        HeadlessMode { format, width, height, refresh_rate }
    }
}

/// A simulated display. `None` entries are modes the native layer cannot describe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadlessDisplay {
    pub modes: Vec<Option<HeadlessMode>>,
}

/// Configures what the stand-in reports and permits.
#[derive(Clone, Debug)]
pub struct HeadlessConfig {
    /// The native version reported by `Backend::version()`.
    pub version: Version,
    /// Names of the compiled-in video drivers. The first one is the default.
    pub drivers: Vec<String>,
    pub displays: Vec<HeadlessDisplay>,
    /// Whether windows created together with a renderer actually receive one.
    pub renderer_available: bool,
    /// The largest pixel buffer, in bytes, that surface creation will allocate.
    pub allocation_limit: usize,
}

impl Default for HeadlessConfig {
    fn default() -> HeadlessConfig {
        HeadlessConfig {
            version: Version::new(2, 0, 22),
            drivers: vec!["headless".to_owned(), "dummy".to_owned()],
            displays: vec![HeadlessDisplay {
                modes: vec![
                    Some(HeadlessMode::new(PixelFormatEnum::RGB888, 1920, 1080, 60)),
                    Some(HeadlessMode::new(PixelFormatEnum::RGB888, 1280, 720, 60)),
                    Some(HeadlessMode::new(PixelFormatEnum::RGB565, 800, 600, 60)),
                ],
            }],
            renderer_available: true,
            allocation_limit: 256 * 1024 * 1024,
        }
    }
}

impl HeadlessConfig {
    pub fn with_version(mut self, version: Version) -> HeadlessConfig {
        self.version = version;
        self
    }

    pub fn with_drivers(mut self, drivers: &[&str]) -> HeadlessConfig {
        self.drivers = drivers.iter().map(|&driver| driver.to_owned()).collect();
        self
    }

    pub fn with_displays(mut self, displays: Vec<HeadlessDisplay>) -> HeadlessConfig {
        self.displays = displays;
        self
    }

    pub fn with_renderer_available(mut self, available: bool) -> HeadlessConfig {
        self.renderer_available = available;
        self
    }

    pub fn with_allocation_limit(mut self, bytes: usize) -> HeadlessConfig {
        self.allocation_limit = bytes;
        self
    }
}
