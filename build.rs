// vidbind/build.rs
//
//! The `vidbind` build script.

use cfg_aliases::cfg_aliases;

fn main() {
    // Setup aliases for #[cfg] checks
    cfg_aliases! {
        // Backends:
        // SDL2 is the default backend. Headless is always compiled and becomes
        // `platform::default` when `sdl2-default` is turned off.
        sdl2_backend: { feature = "sdl2" },
        sdl2_default: { all(sdl2_backend, feature = "sdl2-default") },
    }
}
