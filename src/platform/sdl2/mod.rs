// vidbind/src/platform/sdl2/mod.rs
//
//! The SDL2 video subsystem, reached through its C API.
//!
//! Native handles are the raw SDL pointers. SDL is process-global and not thread-safe, so only
//! one `Device` may be open at a time.

pub mod context;
pub mod device;
pub mod surface;
pub mod window;

pub use self::device::Device;

use crate::geom::{self, Rect};

use ::sdl2::sys;
use libc::c_char;
use std::ffi::{CStr, CString};

pub(crate) fn to_sdl_rect(rect: &Rect) -> sys::SDL_Rect {
    sys::SDL_Rect { x: rect.origin.x, y: rect.origin.y, w: rect.size.width, h: rect.size.height }
}

pub(crate) fn from_sdl_rect(rect: &sys::SDL_Rect) -> Rect {
    geom::rect(rect.x, rect.y, rect.w, rect.h)
}

pub(crate) unsafe fn string_from_sdl(string: *const c_char) -> Option<String> {
    if string.is_null() {
        return None;
    }
    Some(CStr::from_ptr(string).to_string_lossy().into_owned())
}

/// Overrides SDL's last-error string.
pub(crate) fn set_error(message: &str) {
    let message = CString::new(message.replace('\0', "")).unwrap_or_default();
    unsafe {
        sys::SDL_SetError(b"%s\0".as_ptr() as *const c_char, message.as_ptr());
    }
}

/// Converts to a C string, recording an error if `string` contains a NUL byte.
pub(crate) fn c_string(string: &str) -> Option<CString> {
    match CString::new(string) {
        Ok(string) => Some(string),
        Err(_) => {
            set_error("string contains an interior NUL byte");
            None
        }
    }
}
