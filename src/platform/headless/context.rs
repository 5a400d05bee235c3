// vidbind/src/platform/headless/context.rs
//
//! Simulated OpenGL contexts. No GL calls are ever made.

use crate::backend::{ContextBackend, NativeContext, NativeResult, NativeWindow};
use crate::window::WindowFlags;
use super::device::Device;

pub(crate) struct ContextData {
    window: Option<NativeWindow>,
}

impl Device {
    /// The context made current on a window, if any.
    pub fn current_context(&self) -> Option<(NativeWindow, NativeContext)> {
        self.state.borrow().current_context
    }

    /// The window a context was created for, or `None` for a window-less context.
    pub fn context_window(&self, context: NativeContext) -> Option<NativeWindow> {
        self.state.borrow().contexts.get(&context.0).and_then(|data| data.window)
    }

    fn is_opengl_window(&self, window: NativeWindow) -> Option<bool> {
        let state = self.state.borrow();
        let data = state.windows.get(&window.0)?;
        Some(data.flags.contains(WindowFlags::OPENGL))
    }
}

impl ContextBackend for Device {
    fn gl_create_context(&self, window: Option<NativeWindow>) -> Option<NativeContext> {
        if let Some(window) = window {
            match self.is_opengl_window(window) {
                Some(true) => {}
                Some(false) => {
                    self.set_error("The specified window isn't an OpenGL window");
                    return None;
                }
                None => {
                    self.set_error("Invalid window");
                    return None;
                }
            }
        }
        let mut state = self.state.borrow_mut();
        let handle = state.allocate_handle();
        state.contexts.insert(handle, ContextData { window });
        Some(NativeContext(handle))
    }

    fn gl_delete_context(&self, context: NativeContext) {
        let mut state = self.state.borrow_mut();
        if state.contexts.remove(&context.0).is_none() {
            warn!("Ignoring deletion of unknown GL context {:x}", context.0);
            return;
        }
        if matches!(state.current_context, Some((_, current)) if current == context) {
            state.current_context = None;
        }
        state.stats.contexts_deleted += 1;
    }

    fn gl_make_current(&self, window: NativeWindow, context: Option<NativeContext>)
                       -> NativeResult<()> {
        let context = match context {
            None => {
                self.state.borrow_mut().current_context = None;
                return Ok(());
            }
            Some(context) => context,
        };
        match self.is_opengl_window(window) {
            Some(true) => {}
            Some(false) => return self.fail("The specified window isn't an OpenGL window"),
            None => return self.fail("Invalid window"),
        }
        let mut state = self.state.borrow_mut();
        if !state.contexts.contains_key(&context.0) {
            return self.fail("Invalid context");
        }
        state.current_context = Some((window, context));
        Ok(())
    }
}
