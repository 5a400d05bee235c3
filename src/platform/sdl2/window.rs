// vidbind/src/platform/sdl2/window.rs
//
//! SDL windows and renderers.

use crate::backend::{NativeFailure, NativeRenderer, NativeResult, NativeSurface, NativeWindow};
use crate::backend::{WindowAction, WindowBackend};
use crate::display::DisplayMode;
use crate::geom::{Point, Rect, Size};
use crate::window::{GammaRamp, WindowFlags};
use super::device::{display_mode_from_sdl, empty_display_mode, Device};
use super::{c_string, string_from_sdl, to_sdl_rect};

use ::sdl2::sys;
use libc::c_int;
use std::ptr;

#[inline]
fn raw(window: NativeWindow) -> *mut sys::SDL_Window {
    window.0 as *mut sys::SDL_Window
}

#[inline]
fn check(result: c_int) -> NativeResult<()> {
    if result == 0 { Ok(()) } else { Err(NativeFailure) }
}

#[inline]
fn sdl_bool(value: bool) -> sys::SDL_bool {
    if value { sys::SDL_bool::SDL_TRUE } else { sys::SDL_bool::SDL_FALSE }
}

impl WindowBackend for Device {
    fn create_window(&self, title: &str, x: i32, y: i32, width: i32, height: i32, flags: u32)
                     -> Option<NativeWindow> {
        let title = c_string(title)?;
        unsafe {
            let window = sys::SDL_CreateWindow(title.as_ptr(), x, y, width, height, flags);
            if window.is_null() { None } else { Some(NativeWindow(window as usize)) }
        }
    }

    fn create_window_and_renderer(&self, width: i32, height: i32, flags: u32)
                                  -> NativeResult<(NativeWindow, Option<NativeRenderer>)> {
        let mut window: *mut sys::SDL_Window = ptr::null_mut();
        let mut renderer: *mut sys::SDL_Renderer = ptr::null_mut();
        unsafe {
            check(sys::SDL_CreateWindowAndRenderer(width,
                                                   height,
                                                   flags,
                                                   &mut window,
                                                   &mut renderer))?;
        }
        if window.is_null() {
            return Err(NativeFailure);
        }
        let renderer = if renderer.is_null() {
            None
        } else {
            Some(NativeRenderer(renderer as usize))
        };
        Ok((NativeWindow(window as usize), renderer))
    }

    fn destroy_window(&self, window: NativeWindow) {
        unsafe { sys::SDL_DestroyWindow(raw(window)) }
    }

    fn window_size(&self, window: NativeWindow) -> Size {
        let (mut width, mut height) = (0, 0);
        unsafe {
            sys::SDL_GetWindowSize(raw(window), &mut width, &mut height);
        }
        Size::new(width, height)
    }

    fn set_window_size(&self, window: NativeWindow, size: Size) {
        unsafe { sys::SDL_SetWindowSize(raw(window), size.width, size.height) }
    }

    fn window_position(&self, window: NativeWindow) -> Point {
        let (mut x, mut y) = (0, 0);
        unsafe {
            sys::SDL_GetWindowPosition(raw(window), &mut x, &mut y);
        }
        Point::new(x, y)
    }

    fn set_window_position(&self, window: NativeWindow, position: Point) {
        unsafe { sys::SDL_SetWindowPosition(raw(window), position.x, position.y) }
    }

    fn window_title(&self, window: NativeWindow) -> Option<String> {
        unsafe { string_from_sdl(sys::SDL_GetWindowTitle(raw(window))) }
    }

    fn set_window_title(&self, window: NativeWindow, title: &str) {
        if let Some(title) = c_string(title) {
            unsafe { sys::SDL_SetWindowTitle(raw(window), title.as_ptr()) }
        }
    }

    fn window_action(&self, window: NativeWindow, action: WindowAction) {
        let window = raw(window);
        unsafe {
            match action {
                WindowAction::Maximize => sys::SDL_MaximizeWindow(window),
                WindowAction::Minimize => sys::SDL_MinimizeWindow(window),
                WindowAction::Show => sys::SDL_ShowWindow(window),
                WindowAction::Hide => sys::SDL_HideWindow(window),
                WindowAction::Restore => sys::SDL_RestoreWindow(window),
                WindowAction::Raise => sys::SDL_RaiseWindow(window),
            }
        }
    }

    fn set_window_icon(&self, window: NativeWindow, icon: NativeSurface) {
        unsafe { sys::SDL_SetWindowIcon(raw(window), icon.0 as *mut sys::SDL_Surface) }
    }

    fn window_brightness(&self, window: NativeWindow) -> f32 {
        unsafe { sys::SDL_GetWindowBrightness(raw(window)) }
    }

    fn set_window_brightness(&self, window: NativeWindow, brightness: f32) -> NativeResult<()> {
        unsafe { check(sys::SDL_SetWindowBrightness(raw(window), brightness)) }
    }

    fn window_display_index(&self, window: NativeWindow) -> i32 {
        unsafe { sys::SDL_GetWindowDisplayIndex(raw(window)) }
    }

    fn window_display_mode(&self, window: NativeWindow) -> NativeResult<DisplayMode> {
        let mut mode = empty_display_mode();
        unsafe {
            check(sys::SDL_GetWindowDisplayMode(raw(window), &mut mode))?;
        }
        Ok(display_mode_from_sdl(&mode))
    }

    fn set_window_display_mode(&self, window: NativeWindow, mode: Option<&DisplayMode>)
                               -> NativeResult<()> {
        let mode = mode.map(|mode| {
            sys::SDL_DisplayMode {
                format: mode.format().0,
                w: mode.width(),
                h: mode.height(),
                refresh_rate: mode.refresh_rate(),
                driverdata: ptr::null_mut(),
            }
        });
        let mode = mode.as_ref().map_or(ptr::null(), |mode| mode as *const _);
        unsafe { check(sys::SDL_SetWindowDisplayMode(raw(window), mode)) }
    }

    fn window_flags(&self, window: NativeWindow) -> WindowFlags {
        unsafe { WindowFlags::from_bits_retain(sys::SDL_GetWindowFlags(raw(window))) }
    }

    fn window_gamma_ramp(&self, window: NativeWindow) -> NativeResult<GammaRamp> {
        let mut ramp = GammaRamp::identity();
        unsafe {
            check(sys::SDL_GetWindowGammaRamp(raw(window),
                                              ramp.red.as_mut_ptr(),
                                              ramp.green.as_mut_ptr(),
                                              ramp.blue.as_mut_ptr()))?;
        }
        Ok(ramp)
    }

    fn set_window_gamma_ramp(&self, window: NativeWindow, ramp: &GammaRamp) -> NativeResult<()> {
        unsafe {
            check(sys::SDL_SetWindowGammaRamp(raw(window),
                                              ramp.red.as_ptr(),
                                              ramp.green.as_ptr(),
                                              ramp.blue.as_ptr()))
        }
    }

    fn window_grab(&self, window: NativeWindow) -> bool {
        unsafe { sys::SDL_GetWindowGrab(raw(window)) == sys::SDL_bool::SDL_TRUE }
    }

    fn set_window_grab(&self, window: NativeWindow, grabbed: bool) {
        unsafe { sys::SDL_SetWindowGrab(raw(window), sdl_bool(grabbed)) }
    }

    fn window_id(&self, window: NativeWindow) -> u32 {
        unsafe { sys::SDL_GetWindowID(raw(window)) }
    }

    fn window_maximum_size(&self, window: NativeWindow) -> Size {
        let (mut width, mut height) = (0, 0);
        unsafe {
            sys::SDL_GetWindowMaximumSize(raw(window), &mut width, &mut height);
        }
        Size::new(width, height)
    }

    fn set_window_maximum_size(&self, window: NativeWindow, size: Size) {
        unsafe { sys::SDL_SetWindowMaximumSize(raw(window), size.width, size.height) }
    }

    fn window_minimum_size(&self, window: NativeWindow) -> Size {
        let (mut width, mut height) = (0, 0);
        unsafe {
            sys::SDL_GetWindowMinimumSize(raw(window), &mut width, &mut height);
        }
        Size::new(width, height)
    }

    fn set_window_minimum_size(&self, window: NativeWindow, size: Size) {
        unsafe { sys::SDL_SetWindowMinimumSize(raw(window), size.width, size.height) }
    }

    fn set_window_opacity(&self, window: NativeWindow, opacity: f32) -> NativeResult<()> {
        unsafe { check(sys::SDL_SetWindowOpacity(raw(window), opacity)) }
    }

    fn window_surface(&self, window: NativeWindow) -> Option<NativeSurface> {
        unsafe {
            let surface = sys::SDL_GetWindowSurface(raw(window));
            if surface.is_null() { None } else { Some(NativeSurface(surface as usize)) }
        }
    }

    fn update_window_surface(&self, window: NativeWindow) -> NativeResult<()> {
        unsafe { check(sys::SDL_UpdateWindowSurface(raw(window))) }
    }

    fn update_window_surface_rects(&self, window: NativeWindow, rects: &[Rect])
                                   -> NativeResult<()> {
        let rects: Vec<sys::SDL_Rect> = rects.iter().map(to_sdl_rect).collect();
        unsafe {
            check(sys::SDL_UpdateWindowSurfaceRects(raw(window),
                                                    rects.as_ptr(),
                                                    rects.len() as c_int))
        }
    }

    fn window_renderer(&self, window: NativeWindow) -> Option<NativeRenderer> {
        unsafe {
            let renderer = sys::SDL_GetRenderer(raw(window));
            if renderer.is_null() { None } else { Some(NativeRenderer(renderer as usize)) }
        }
    }

    fn destroy_renderer(&self, renderer: NativeRenderer) {
        unsafe { sys::SDL_DestroyRenderer(renderer.0 as *mut sys::SDL_Renderer) }
    }

    fn gl_swap_window(&self, window: NativeWindow) {
        unsafe { sys::SDL_GL_SwapWindow(raw(window)) }
    }
}
