// vidbind/src/lib.rs
//
//! Bindings of a native video subsystem for embedded scripting hosts.
//!
//! Windows, pixel surfaces, OpenGL contexts and display modes live in a manually-managed native
//! library, but the scripting host holds onto them with garbage-collected references. Each
//! binding object here wraps one native handle together with an ownership tag, so that the
//! handle is released exactly once when the owning wrapper goes away, and never by a wrapper that
//! merely aliases a handle owned elsewhere (such as a window's framebuffer surface).
//!
//! The native library itself is reached through the `Backend` traits. `platform::headless`
//! provides an in-process implementation that is always available; `platform::sdl2` talks to
//! SDL2 and is the default backend unless the `sdl2-default` feature is turned off.

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate log;

pub mod platform;

pub mod backend;
pub use crate::backend::{Backend, NativeContext, NativeRenderer, NativeSurface, NativeWindow};

pub mod error;
pub use crate::error::Error;

mod context;
pub use crate::context::{GLAttr, GLContext};

mod display;
pub use crate::display::DisplayMode;

pub mod geom;
pub use crate::geom::{Point, Rect, Rgb, Size};

mod info;
pub use crate::info::{Capabilities, Capability, Version};

mod pixels;
pub use crate::pixels::{BlendMode, ChannelMasks, PixelFormat, PixelFormatEnum};

mod renderer;
pub use crate::renderer::Renderer;

mod surface;
pub use crate::surface::Surface;

pub mod value;
pub use crate::value::Value;

mod video;
pub use crate::video::Video;

mod window;
pub use crate::window::{GammaRamp, Window, WindowFlags, WindowPos};

/// Whether a binding object is responsible for releasing its native handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ownership {
    /// The wrapper releases the handle when it is dropped or explicitly destroyed.
    Owned,
    /// The handle belongs to another component and the wrapper never releases it.
    ///
    /// Nothing tracks the owner: if the owner releases the handle first, the wrapper dangles.
    Referenced,
}

#[cfg(test)]
mod tests;
