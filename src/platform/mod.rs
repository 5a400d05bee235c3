// vidbind/src/platform/mod.rs
//
//! Native backends.

pub mod headless;
#[cfg(not(sdl2_default))]
pub use self::headless as default;

#[cfg(sdl2_backend)]
pub mod sdl2;
#[cfg(sdl2_default)]
pub use self::sdl2 as default;
