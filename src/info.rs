// vidbind/src/info.rs
//
//! Native library version information and the features gated on it.

use std::fmt::{self, Display, Formatter};

/// The version of the linked native library, as it reports itself at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    /// The major version (e.g. 2 in 2.0.5).
    pub major: u8,
    /// The minor version (e.g. 0 in 2.0.5).
    pub minor: u8,
    /// The patch level (e.g. 5 in 2.0.5).
    pub patch: u8,
}

impl Version {
    /// Creates a version structure with the given components.
    #[inline]
    pub const fn new(major: u8, minor: u8, patch: u8) -> Version {
        Version { major, minor, patch }
    }

    #[inline]
    pub fn at_least(self, major: u8, minor: u8, patch: u8) -> bool {
        self >= Version::new(major, minor, patch)
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Optional native features whose availability depends on the linked library's version.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    /// `Window::set_opacity`. Requires 2.0.5.
    WindowOpacity,
}

impl Capability {
    /// The first native version that provides this capability.
    pub fn minimum_version(self) -> Version {
        match self {
            Capability::WindowOpacity => Version::new(2, 0, 5),
        }
    }

    #[inline]
    pub fn is_supported_by(self, version: Version) -> bool {
        version >= self.minimum_version()
    }
}

/// The capabilities of one linked library, decided once from its reported version.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    window_opacity: bool,
}

impl Capabilities {
    pub fn detect(version: Version) -> Capabilities {
        Capabilities { window_opacity: Capability::WindowOpacity.is_supported_by(version) }
    }

    #[inline]
    pub fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::WindowOpacity => self.window_opacity,
        }
    }
}
