// vidbind/src/video.rs
//
//! The video subsystem facade: initialization, enumeration and screen-saver control.

use crate::backend::Backend;
use crate::context::GLAttr;
use crate::display::DisplayMode;
use crate::info::{Capabilities, Capability, Version};
use crate::platform;
use crate::value::Value;
use crate::window::Window;
use crate::Error;

use std::fmt::{self, Debug, Formatter};
use std::rc::Rc;
use std::thread::{self, ThreadId};

/// A handle to the native video subsystem.
///
/// Every binding object keeps a clone of this handle, so the backend outlives all of them.
/// Handles are reference-counted without atomics and are therefore confined to the thread that
/// created them; on top of that, every native call asserts that it is made on that thread, since
/// window and GL state in the native library is not thread-safe.
#[derive(Clone)]
pub struct Video {
    shared: Rc<Shared>,
}

struct Shared {
    backend: Rc<dyn Backend>,
    thread: ThreadId,
    version: Version,
    capabilities: Capabilities,
}

impl Debug for Video {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Video({}, {})", self.shared.backend.name(), self.shared.version)
    }
}

impl Video {
    /// Opens the default backend for this build.
    pub fn new() -> Result<Video, Error> {
        let device = platform::default::Device::new()?;
        Ok(Video::with_backend(Rc::new(device)))
    }

    /// Wraps an existing backend. The linked library's version is read once, here.
    pub fn with_backend(backend: Rc<dyn Backend>) -> Video {
        let version = backend.version();
        debug!("Opening video backend {} ({})", backend.name(), version);
        Video {
            shared: Rc::new(Shared {
                backend,
                thread: thread::current().id(),
                version,
                capabilities: Capabilities::detect(version),
            }),
        }
    }

    /// Returns the backend after checking thread affinity.
    pub(crate) fn native(&self) -> &dyn Backend {
        assert_eq!(thread::current().id(),
                   self.shared.thread,
                   "video objects must be used on the thread that created them");
        &*self.shared.backend
    }

    /// Reads the native last-error string into an error value.
    #[inline]
    pub fn native_error(&self) -> Error {
        Error::native(self.native())
    }

    #[inline]
    pub fn backend_name(&self) -> &'static str {
        self.shared.backend.name()
    }

    /// The version the linked native library reported when this handle was created.
    #[inline]
    pub fn version(&self) -> Version {
        self.shared.version
    }

    #[inline]
    pub fn supports(&self, capability: Capability) -> bool {
        self.shared.capabilities.supports(capability)
    }

    /// Initializes the video subsystem.
    ///
    /// `driver` may be nil or empty (use the default driver), a string, or any host value with a
    /// string conversion.
    pub fn init(&self, driver: &Value) -> Result<(), Error> {
        let name = match *driver {
            Value::Nil => None,
            ref other => match other.to_host_string() {
                Some(name) if name.is_empty() => None,
                Some(name) => Some(name),
                None => {
                    return Err(Error::type_error(
                        "supplied argument cannot be converted to string."))
                }
            },
        };
        self.native()
            .video_init(name.as_deref())
            .map_err(|_| self.native_error())
    }

    pub fn quit(&self) {
        self.native().video_quit()
    }

    pub fn screen_saver_enabled(&self) -> bool {
        self.native().is_screen_saver_enabled()
    }

    pub fn set_screen_saver_enabled(&self, enabled: bool) -> &Self {
        self.native().set_screen_saver_enabled(enabled);
        self
    }

    /// The names of all video drivers compiled into the native library.
    pub fn video_drivers(&self) -> Result<Vec<String>, Error> {
        let native = self.native();
        let count = native.num_video_drivers();
        if count < 0 {
            return Err(self.native_error());
        }
        Ok((0..count).filter_map(|index| native.video_driver(index)).collect())
    }

    /// The modes of a display. Modes the native layer cannot describe are skipped, so the
    /// result may be shorter than the reported mode count.
    pub fn display_modes(&self, display_index: i32) -> Result<Vec<DisplayMode>, Error> {
        let native = self.native();
        let count = native.num_display_modes(display_index);
        if count < 0 {
            return Err(self.native_error());
        }
        Ok((0..count).filter_map(|index| native.display_mode(display_index, index).ok()).collect())
    }

    /// The number of available displays.
    pub fn displays(&self) -> Result<i32, Error> {
        let count = self.native().num_video_displays();
        if count < 0 {
            return Err(self.native_error());
        }
        Ok(count)
    }

    /// The name of the initialized driver, or `None` if the subsystem isn't initialized.
    pub fn current_video_driver(&self) -> Option<String> {
        self.native().current_video_driver()
    }

    pub fn gl_attribute(&self, _: GLAttr) -> Result<i32, Error> {
        Err(Error::NotImplemented)
    }

    pub fn set_gl_attribute(&self, _: GLAttr, _: i32) -> Result<(), Error> {
        Err(Error::NotImplemented)
    }

    pub fn gl_extension_supported(&self, _: &str) -> Result<bool, Error> {
        Err(Error::NotImplemented)
    }

    pub fn gl_swap_interval(&self) -> Result<i32, Error> {
        Err(Error::NotImplemented)
    }

    pub fn set_gl_swap_interval(&self, _: i32) -> Result<(), Error> {
        Err(Error::NotImplemented)
    }

    pub fn gl_swap_window(&self, _: &Window) -> Result<(), Error> {
        Err(Error::NotImplemented)
    }
}
