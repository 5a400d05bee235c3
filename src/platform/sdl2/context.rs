// vidbind/src/platform/sdl2/context.rs
//
//! SDL OpenGL contexts.

use crate::backend::{ContextBackend, NativeContext, NativeFailure, NativeResult, NativeWindow};
use super::device::Device;

use ::sdl2::sys;
use std::ptr;

impl ContextBackend for Device {
    fn gl_create_context(&self, window: Option<NativeWindow>) -> Option<NativeContext> {
        let window = window.map_or(ptr::null_mut(), |window| window.0 as *mut sys::SDL_Window);
        unsafe {
            let context = sys::SDL_GL_CreateContext(window);
            if context.is_null() { None } else { Some(NativeContext(context as usize)) }
        }
    }

    fn gl_delete_context(&self, context: NativeContext) {
        unsafe { sys::SDL_GL_DeleteContext(context.0 as sys::SDL_GLContext) }
    }

    fn gl_make_current(&self, window: NativeWindow, context: Option<NativeContext>)
                       -> NativeResult<()> {
        let context = context.map_or(ptr::null_mut(), |context| context.0 as sys::SDL_GLContext);
        unsafe {
            if sys::SDL_GL_MakeCurrent(window.0 as *mut sys::SDL_Window, context) != 0 {
                return Err(NativeFailure);
            }
        }
        Ok(())
    }
}
