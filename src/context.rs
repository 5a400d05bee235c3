// vidbind/src/context.rs
//
//! OpenGL contexts.

use crate::backend::NativeContext;
use crate::video::Video;
use crate::window::Window;
use crate::{Error, Ownership};

use std::fmt::{self, Debug, Formatter};

/// OpenGL context attributes, as used by `Video::gl_attribute()` and
/// `Video::set_gl_attribute()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum GLAttr {
    RedSize = 0,
    GreenSize = 1,
    BlueSize = 2,
    AlphaSize = 3,
    BufferSize = 4,
    DoubleBuffer = 5,
    DepthSize = 6,
    StencilSize = 7,
    AccumRedSize = 8,
    AccumGreenSize = 9,
    AccumBlueSize = 10,
    AccumAlphaSize = 11,
    Stereo = 12,
    MultisampleBuffers = 13,
    MultisampleSamples = 14,
    AcceleratedVisual = 15,
    RetainedBacking = 16,
    ContextMajorVersion = 17,
    ContextMinorVersion = 18,
    ContextEgl = 19,
    ContextFlags = 20,
    ContextProfileMask = 21,
    ShareWithCurrentContext = 22,
    FramebufferSrgbCapable = 23,
    ContextReleaseBehavior = 24,
    ContextResetNotification = 25,
    ContextNoError = 26,
}

/// An OpenGL rendering context.
///
/// Like `Window`, a context wrapper may be made empty and populated later with `create()`.
/// Contexts are released when the wrapper is dropped, or earlier with `delete()`.
pub struct GLContext {
    video: Video,
    context: Option<NativeContext>,
    ownership: Ownership,
}

impl Debug for GLContext {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.context {
            Some(context) => write!(f, "GLContext({:x}, {:?})", context.0, self.ownership),
            None => write!(f, "GLContext(null)"),
        }
    }
}

impl Drop for GLContext {
    #[inline]
    fn drop(&mut self) {
        self.delete()
    }
}

impl GLContext {
    /// Makes an unpopulated context wrapper.
    pub fn empty(video: &Video) -> GLContext {
        GLContext { video: video.clone(), context: None, ownership: Ownership::Owned }
    }

    /// Creates a context for `window`, or a window-less one if `None`.
    pub fn new(video: &Video, window: Option<&Window>) -> Result<GLContext, Error> {
        let mut context = GLContext::empty(video);
        context.create(window)?;
        Ok(context)
    }

    /// Wraps a native context that was obtained outside this crate.
    ///
    /// # Safety
    ///
    /// The handle must be a live context of `video`'s backend. If `ownership` is `Owned`, no
    /// other wrapper may own it; if `Referenced`, its owner must outlive the returned wrapper.
    pub unsafe fn from_native_context(video: &Video,
                                      context: NativeContext,
                                      ownership: Ownership)
                                      -> GLContext {
        GLContext { video: video.clone(), context: Some(context), ownership }
    }

    #[inline]
    pub fn native_context(&self) -> Option<NativeContext> {
        self.context
    }

    #[inline]
    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.context.is_none()
    }

    /// Creates a new native context, replacing (and releasing) any context this wrapper held.
    ///
    /// On failure the wrapper is left empty.
    pub fn create(&mut self, window: Option<&Window>) -> Result<&mut Self, Error> {
        self.delete();
        let native = self.video.native();
        let window = window.and_then(Window::native_window);
        match native.gl_create_context(window) {
            Some(context) => {
                self.context = Some(context);
                self.ownership = Ownership::Owned;
                Ok(self)
            }
            None => Err(Error::native(native)),
        }
    }

    /// Releases the native context now. Calling this again does nothing.
    pub fn delete(&mut self) {
        if let Some(context) = self.context.take() {
            if self.ownership == Ownership::Owned {
                debug!("Deleting GL context {:x}", context.0);
                self.video.native().gl_delete_context(context);
            }
        }
    }
}
