// vidbind/src/renderer.rs
//
//! A minimal wrapper around native 2D renderers.
//!
//! Rendering itself is out of scope here; windows only hand renderers out.

use crate::backend::NativeRenderer;
use crate::video::Video;
use crate::Ownership;

use std::fmt::{self, Debug, Formatter};

pub struct Renderer {
    video: Video,
    renderer: Option<NativeRenderer>,
    ownership: Ownership,
}

impl Debug for Renderer {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.renderer {
            Some(renderer) => write!(f, "Renderer({:x}, {:?})", renderer.0, self.ownership),
            None => write!(f, "Renderer(null)"),
        }
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        self.destroy()
    }
}

impl Renderer {
    pub(crate) fn wrap(video: &Video, renderer: NativeRenderer, ownership: Ownership) -> Renderer {
        Renderer { video: video.clone(), renderer: Some(renderer), ownership }
    }

    /// Wraps a native renderer that was obtained outside this crate.
    ///
    /// # Safety
    ///
    /// The handle must be a live renderer of `video`'s backend. If `ownership` is `Owned`, no
    /// other wrapper may own it.
    pub unsafe fn from_native_renderer(video: &Video,
                                       renderer: NativeRenderer,
                                       ownership: Ownership)
                                       -> Renderer {
        Renderer::wrap(video, renderer, ownership)
    }

    #[inline]
    pub fn native_renderer(&self) -> Option<NativeRenderer> {
        self.renderer
    }

    #[inline]
    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    /// Releases the renderer now if this wrapper owns it. Calling this again does nothing.
    pub fn destroy(&mut self) {
        if let Some(renderer) = self.renderer.take() {
            if self.ownership == Ownership::Owned {
                debug!("Destroying renderer {:x}", renderer.0);
                self.video.native().destroy_renderer(renderer);
            }
        }
    }
}
