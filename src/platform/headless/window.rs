// vidbind/src/platform/headless/window.rs
//
//! Simulated windows and renderers.

use crate::backend::{NativeFailure, NativeRenderer, NativeResult, NativeSurface, NativeWindow};
use crate::backend::{WindowAction, WindowBackend};
use crate::display::DisplayMode;
use crate::geom::{Point, Rect, Size};
use crate::pixels::PixelFormatEnum;
use crate::window::{GammaRamp, WindowFlags, WindowPos};
use super::device::{Device, State};
use super::surface::{self, SurfaceData};

pub(crate) struct WindowData {
    id: u32,
    title: String,
    position: Point,
    size: Size,
    minimum_size: Size,
    maximum_size: Size,
    pub(crate) flags: WindowFlags,
    brightness: f32,
    opacity: f32,
    gamma_ramp: Box<GammaRamp>,
    display_mode: Option<DisplayMode>,
    icon: Option<Size>,
    surface: Option<NativeSurface>,
    renderer: Option<NativeRenderer>,
    presented: u32,
    swaps: u32,
}

pub(crate) struct RendererData {
    window: Option<NativeWindow>,
}

fn resolve_position(raw: i32, extent: i32, desktop: i32) -> i32 {
    match WindowPos::from_raw(raw) {
        WindowPos::Centered => (desktop - extent) / 2,
        WindowPos::Undefined => 0,
        WindowPos::At(coordinate) => coordinate,
    }
}

/// Drops a window's framebuffer. Wrappers still referring to it become stale.
fn invalidate_surface(state: &mut State, window: NativeWindow) {
    if let Some(data) = state.windows.get_mut(&window.0) {
        if let Some(surface) = data.surface.take() {
            debug!("Invalidating framebuffer {:x} of window {:x}", surface.0, window.0);
            state.surfaces.remove(&surface.0);
        }
    }
}

impl Device {
    fn with_window<T, F>(&self, window: NativeWindow, f: F) -> NativeResult<T>
                         where F: FnOnce(&mut WindowData) -> T {
        match self.state.borrow_mut().windows.get_mut(&window.0) {
            Some(data) => Ok(f(data)),
            None => self.fail("Invalid window"),
        }
    }

    fn desktop_size(&self) -> Size {
        self.desktop_mode().map_or(Size::new(0, 0), |mode| Size::new(mode.width, mode.height))
    }

    /// The size of the icon last assigned to a window.
    pub fn window_icon_size(&self, window: NativeWindow) -> Option<Size> {
        self.state.borrow().windows.get(&window.0).and_then(|data| data.icon)
    }

    pub fn window_opacity(&self, window: NativeWindow) -> Option<f32> {
        self.state.borrow().windows.get(&window.0).map(|data| data.opacity)
    }

    /// How many times the window surface has been copied to the simulated screen.
    pub fn presented_frames(&self, window: NativeWindow) -> Option<u32> {
        self.state.borrow().windows.get(&window.0).map(|data| data.presented)
    }

    pub fn swap_count(&self, window: NativeWindow) -> Option<u32> {
        self.state.borrow().windows.get(&window.0).map(|data| data.swaps)
    }

    fn present(&self, window: NativeWindow) -> NativeResult<()> {
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        let data = match state.windows.get_mut(&window.0) {
            Some(data) => data,
            None => return self.fail("Invalid window"),
        };
        match data.surface {
            Some(surface) if state.surfaces.contains_key(&surface.0) => {
                data.presented += 1;
                Ok(())
            }
            _ => {
                self.fail("Window surface is invalid, please call SDL_GetWindowSurface() to get \
                           a new surface")
            }
        }
    }
}

impl WindowBackend for Device {
    fn create_window(&self, title: &str, x: i32, y: i32, width: i32, height: i32, flags: u32)
                     -> Option<NativeWindow> {
        if self.state.borrow().driver.is_none() {
            self.set_error("Video subsystem has not been initialized");
            return None;
        }
        let size = Size::new(width.max(1), height.max(1));
        let desktop = self.desktop_size();
        let position = Point::new(resolve_position(x, size.width, desktop.width),
                                  resolve_position(y, size.height, desktop.height));
        let mut flags = WindowFlags::from_bits_truncate(flags);
        if !flags.contains(WindowFlags::HIDDEN) {
            flags.insert(WindowFlags::SHOWN);
        }

        let mut state = self.state.borrow_mut();
        state.next_window_id += 1;
        let data = WindowData {
            id: state.next_window_id,
            title: title.to_owned(),
            position,
            size,
            minimum_size: Size::new(0, 0),
            maximum_size: Size::new(0, 0),
            flags,
            brightness: 1.0,
            opacity: 1.0,
            gamma_ramp: Box::new(GammaRamp::identity()),
            display_mode: None,
            icon: None,
            surface: None,
            renderer: None,
            presented: 0,
            swaps: 0,
        };
        let handle = state.allocate_handle();
        state.windows.insert(handle, data);
        Some(NativeWindow(handle))
    }

    fn create_window_and_renderer(&self, width: i32, height: i32, flags: u32)
                                  -> NativeResult<(NativeWindow, Option<NativeRenderer>)> {
        let window = match self.create_window("",
                                              WindowPos::Undefined.to_raw(),
                                              WindowPos::Undefined.to_raw(),
                                              width,
                                              height,
                                              flags) {
            Some(window) => window,
            None => return Err(NativeFailure),
        };
        if !self.config.renderer_available {
            return Ok((window, None));
        }
        let mut state = self.state.borrow_mut();
        let handle = state.allocate_handle();
        state.renderers.insert(handle, RendererData { window: Some(window) });
        if let Some(data) = state.windows.get_mut(&window.0) {
            data.renderer = Some(NativeRenderer(handle));
        }
        Ok((window, Some(NativeRenderer(handle))))
    }

    fn destroy_window(&self, window: NativeWindow) {
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        invalidate_surface(state, window);
        let data = match state.windows.remove(&window.0) {
            Some(data) => data,
            None => {
                warn!("Ignoring destruction of unknown window {:x}", window.0);
                return;
            }
        };
        if let Some(renderer) = data.renderer.and_then(|renderer| {
            state.renderers.get_mut(&renderer.0)
        }) {
            renderer.window = None;
        }
        if matches!(state.current_context, Some((current, _)) if current == window) {
            state.current_context = None;
        }
        state.stats.windows_destroyed += 1;
    }

    fn window_size(&self, window: NativeWindow) -> Size {
        self.with_window(window, |data| data.size).unwrap_or_else(|_| Size::new(0, 0))
    }

    fn set_window_size(&self, window: NativeWindow, size: Size) {
        let resized = self.with_window(window, |data| {
            let mut width = size.width.max(1).max(data.minimum_size.width);
            let mut height = size.height.max(1).max(data.minimum_size.height);
            if data.maximum_size.width > 0 {
                width = width.min(data.maximum_size.width);
            }
            if data.maximum_size.height > 0 {
                height = height.min(data.maximum_size.height);
            }
            let resized = data.size != Size::new(width, height);
            data.size = Size::new(width, height);
            resized
        });
        if resized == Ok(true) {
            invalidate_surface(&mut self.state.borrow_mut(), window);
        }
    }

    fn window_position(&self, window: NativeWindow) -> Point {
        self.with_window(window, |data| data.position).unwrap_or_else(|_| Point::new(0, 0))
    }

    fn set_window_position(&self, window: NativeWindow, position: Point) {
        let desktop = self.desktop_size();
        let _ = self.with_window(window, |data| {
            data.position = Point::new(resolve_position(position.x, data.size.width, desktop.width),
                                       resolve_position(position.y,
                                                        data.size.height,
                                                        desktop.height));
        });
    }

    fn window_title(&self, window: NativeWindow) -> Option<String> {
        self.with_window(window, |data| data.title.clone()).ok()
    }

    fn set_window_title(&self, window: NativeWindow, title: &str) {
        let _ = self.with_window(window, |data| data.title = title.to_owned());
    }

    fn window_action(&self, window: NativeWindow, action: WindowAction) {
        let _ = self.with_window(window, |data| {
            let flags = &mut data.flags;
            match action {
                WindowAction::Maximize => {
                    flags.remove(WindowFlags::MINIMIZED);
                    flags.insert(WindowFlags::MAXIMIZED);
                }
                WindowAction::Minimize => {
                    flags.remove(WindowFlags::MAXIMIZED);
                    flags.insert(WindowFlags::MINIMIZED);
                }
                WindowAction::Show => {
                    flags.remove(WindowFlags::HIDDEN);
                    flags.insert(WindowFlags::SHOWN);
                }
                WindowAction::Hide => {
                    flags.remove(WindowFlags::SHOWN);
                    flags.insert(WindowFlags::HIDDEN);
                }
                WindowAction::Restore => {
                    flags.remove(WindowFlags::MAXIMIZED | WindowFlags::MINIMIZED);
                }
                WindowAction::Raise => flags.insert(WindowFlags::INPUT_FOCUS),
            }
        });
    }

    fn set_window_icon(&self, window: NativeWindow, icon: NativeSurface) {
        let size = self.state.borrow().surfaces.get(&icon.0).map(|data| data.size);
        match size {
            Some(size) => {
                let _ = self.with_window(window, |data| data.icon = Some(size));
            }
            None => self.set_error("Invalid surface"),
        }
    }

    fn window_brightness(&self, window: NativeWindow) -> f32 {
        self.with_window(window, |data| data.brightness).unwrap_or(1.0)
    }

    fn set_window_brightness(&self, window: NativeWindow, brightness: f32) -> NativeResult<()> {
        if brightness.is_nan() || brightness < 0.0 {
            return self.fail("Parameter 'brightness' is invalid");
        }
        self.with_window(window, |data| data.brightness = brightness)
    }

    fn window_display_index(&self, window: NativeWindow) -> i32 {
        if self.with_window(window, |_| ()).is_err() {
            return -1;
        }
        if self.config.displays.is_empty() {
            self.set_error("No displays available");
            return -1;
        }
        0
    }

    fn window_display_mode(&self, window: NativeWindow) -> NativeResult<DisplayMode> {
        let (size, mode) = self.with_window(window, |data| (data.size, data.display_mode))?;
        if let Some(mode) = mode {
            return Ok(mode);
        }
        match self.desktop_mode() {
            Some(desktop) => {
                Ok(DisplayMode::new(desktop.format, size.width, size.height, desktop.refresh_rate))
            }
            None => self.fail("Couldn't find display mode match"),
        }
    }

    fn set_window_display_mode(&self, window: NativeWindow, mode: Option<&DisplayMode>)
                               -> NativeResult<()> {
        self.with_window(window, |data| data.display_mode = mode.copied())
    }

    fn window_flags(&self, window: NativeWindow) -> WindowFlags {
        self.with_window(window, |data| data.flags).unwrap_or_else(|_| WindowFlags::empty())
    }

    fn window_gamma_ramp(&self, window: NativeWindow) -> NativeResult<GammaRamp> {
        self.with_window(window, |data| (*data.gamma_ramp).clone())
    }

    fn set_window_gamma_ramp(&self, window: NativeWindow, ramp: &GammaRamp) -> NativeResult<()> {
        self.with_window(window, |data| *data.gamma_ramp = ramp.clone())
    }

    fn window_grab(&self, window: NativeWindow) -> bool {
        self.window_flags(window).contains(WindowFlags::INPUT_GRABBED)
    }

    fn set_window_grab(&self, window: NativeWindow, grabbed: bool) {
        let _ = self.with_window(window, |data| {
            data.flags.set(WindowFlags::INPUT_GRABBED, grabbed)
        });
    }

    fn window_id(&self, window: NativeWindow) -> u32 {
        self.with_window(window, |data| data.id).unwrap_or(0)
    }

    fn window_maximum_size(&self, window: NativeWindow) -> Size {
        self.with_window(window, |data| data.maximum_size).unwrap_or_else(|_| Size::new(0, 0))
    }

    fn set_window_maximum_size(&self, window: NativeWindow, size: Size) {
        if size.width <= 0 || size.height <= 0 {
            self.set_error("Parameter 'max_w' is invalid");
            return;
        }
        let _ = self.with_window(window, |data| data.maximum_size = size);
        let current = self.window_size(window);
        self.set_window_size(window, current);
    }

    fn window_minimum_size(&self, window: NativeWindow) -> Size {
        self.with_window(window, |data| data.minimum_size).unwrap_or_else(|_| Size::new(0, 0))
    }

    fn set_window_minimum_size(&self, window: NativeWindow, size: Size) {
        if size.width <= 0 || size.height <= 0 {
            self.set_error("Parameter 'min_w' is invalid");
            return;
        }
        let _ = self.with_window(window, |data| data.minimum_size = size);
        let current = self.window_size(window);
        self.set_window_size(window, current);
    }

    fn set_window_opacity(&self, window: NativeWindow, opacity: f32) -> NativeResult<()> {
        self.with_window(window, |data| data.opacity = opacity.max(0.0).min(1.0))
    }

    fn window_surface(&self, window: NativeWindow) -> Option<NativeSurface> {
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        let (size, existing) = match state.windows.get(&window.0) {
            Some(data) => (data.size, data.surface),
            None => {
                self.set_error("Invalid window");
                return None;
            }
        };
        if let Some(existing) = existing {
            if state.surfaces.contains_key(&existing.0) {
                return Some(existing);
            }
        }
        let mut data = SurfaceData::new(size, surface::format_from_enum(PixelFormatEnum::RGB888)?);
        data.window = Some(window);
        let handle = NativeSurface(state.allocate_handle());
        state.surfaces.insert(handle.0, data);
        if let Some(entry) = state.windows.get_mut(&window.0) {
            entry.surface = Some(handle);
        }
        Some(handle)
    }

    fn update_window_surface(&self, window: NativeWindow) -> NativeResult<()> {
        self.present(window)
    }

    fn update_window_surface_rects(&self, window: NativeWindow, _: &[Rect]) -> NativeResult<()> {
        self.present(window)
    }

    fn window_renderer(&self, window: NativeWindow) -> Option<NativeRenderer> {
        let renderer = self.with_window(window, |data| data.renderer).ok()?;
        if renderer.is_none() {
            self.set_error("Invalid renderer");
        }
        renderer
    }

    fn destroy_renderer(&self, renderer: NativeRenderer) {
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        let data = match state.renderers.remove(&renderer.0) {
            Some(data) => data,
            None => {
                warn!("Ignoring destruction of unknown renderer {:x}", renderer.0);
                return;
            }
        };
        if let Some(window) = data.window.and_then(|window| state.windows.get_mut(&window.0)) {
            window.renderer = None;
        }
        state.stats.renderers_destroyed += 1;
    }

    fn gl_swap_window(&self, window: NativeWindow) {
        let swapped = self.with_window(window, |data| {
            if data.flags.contains(WindowFlags::OPENGL) {
                data.swaps += 1;
                true
            } else {
                false
            }
        });
        if swapped == Ok(false) {
            self.set_error("The specified window isn't an OpenGL window");
        }
    }
}
