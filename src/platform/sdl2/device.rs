// vidbind/src/platform/sdl2/device.rs
//
//! The SDL2 device and subsystem-level calls.

use crate::backend::{NativeFailure, NativeResult, SubsystemBackend};
use crate::display::DisplayMode;
use crate::info::Version;
use crate::pixels::PixelFormatEnum;
use crate::Error;
use super::{c_string, string_from_sdl};

use ::sdl2::sys;
use std::marker::PhantomData;
use std::ptr;
use std::sync::atomic::{AtomicBool, Ordering};

static DEVICE_OPEN: AtomicBool = AtomicBool::new(false);

/// A handle to the process-wide SDL2 video subsystem.
pub struct Device {
    phantom: PhantomData<*mut ()>,
}

impl Drop for Device {
    fn drop(&mut self) {
        DEVICE_OPEN.store(false, Ordering::SeqCst);
    }
}

impl Device {
    /// Opens the SDL2 backend. Fails if another `Device` is still open.
    pub fn new() -> Result<Device, Error> {
        if DEVICE_OPEN.swap(true, Ordering::SeqCst) {
            return Err(Error::runtime("an SDL2 video device is already open."));
        }
        Ok(Device { phantom: PhantomData })
    }
}

pub(crate) fn empty_display_mode() -> sys::SDL_DisplayMode {
    sys::SDL_DisplayMode { format: 0, w: 0, h: 0, refresh_rate: 0, driverdata: ptr::null_mut() }
}

pub(crate) fn display_mode_from_sdl(mode: &sys::SDL_DisplayMode) -> DisplayMode {
    DisplayMode::new(PixelFormatEnum(mode.format), mode.w, mode.h, mode.refresh_rate)
}

impl SubsystemBackend for Device {
    #[inline]
    fn name(&self) -> &'static str {
        "sdl2"
    }

    fn version(&self) -> Version {
        let mut version = sys::SDL_version { major: 0, minor: 0, patch: 0 };
        unsafe {
            sys::SDL_GetVersion(&mut version);
        }
        Version::new(version.major, version.minor, version.patch)
    }

    fn last_error(&self) -> String {
        unsafe { string_from_sdl(sys::SDL_GetError()).unwrap_or_default() }
    }

    fn video_init(&self, driver: Option<&str>) -> NativeResult<()> {
        let driver = match driver {
            Some(driver) => Some(c_string(driver).ok_or(NativeFailure)?),
            None => None,
        };
        let driver = driver.as_ref().map_or(ptr::null(), |driver| driver.as_ptr());
        unsafe {
            if sys::SDL_VideoInit(driver) != 0 {
                return Err(NativeFailure);
            }
        }
        Ok(())
    }

    fn video_quit(&self) {
        unsafe { sys::SDL_VideoQuit() }
    }

    fn is_screen_saver_enabled(&self) -> bool {
        unsafe { sys::SDL_IsScreenSaverEnabled() == sys::SDL_bool::SDL_TRUE }
    }

    fn set_screen_saver_enabled(&self, enabled: bool) {
        unsafe {
            if enabled {
                sys::SDL_EnableScreenSaver()
            } else {
                sys::SDL_DisableScreenSaver()
            }
        }
    }

    fn num_video_drivers(&self) -> i32 {
        unsafe { sys::SDL_GetNumVideoDrivers() }
    }

    fn video_driver(&self, index: i32) -> Option<String> {
        unsafe { string_from_sdl(sys::SDL_GetVideoDriver(index)) }
    }

    fn current_video_driver(&self) -> Option<String> {
        unsafe { string_from_sdl(sys::SDL_GetCurrentVideoDriver()) }
    }

    fn num_video_displays(&self) -> i32 {
        unsafe { sys::SDL_GetNumVideoDisplays() }
    }

    fn num_display_modes(&self, display_index: i32) -> i32 {
        unsafe { sys::SDL_GetNumDisplayModes(display_index) }
    }

    fn display_mode(&self, display_index: i32, mode_index: i32) -> NativeResult<DisplayMode> {
        let mut mode = empty_display_mode();
        unsafe {
            if sys::SDL_GetDisplayMode(display_index, mode_index, &mut mode) != 0 {
                return Err(NativeFailure);
            }
        }
        Ok(display_mode_from_sdl(&mode))
    }
}
