// vidbind/src/backend.rs
//
//! The abstract interface that all native backends conform to.
//!
//! These traits mirror the native library's C ABI closely: failures are reported as
//! `Err(NativeFailure)`, `None` or a negative count, and the diagnostic text is only available
//! afterwards through `SubsystemBackend::last_error()`. The binding objects turn that into
//! `Error` values; backends never build `Error`s themselves.

use crate::display::DisplayMode;
use crate::geom::{Point, Rect, Rgb, Size};
use crate::info::Version;
use crate::pixels::{BlendMode, ChannelMasks, PixelFormat};
use crate::window::{GammaRamp, WindowFlags};

use std::path::Path;

/// Marker returned by native calls that report failure through the last-error string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NativeFailure;

pub type NativeResult<T> = Result<T, NativeFailure>;

/// An opaque reference to a native pixel buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NativeSurface(pub usize);

/// An opaque reference to a native platform window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NativeWindow(pub usize);

/// An opaque reference to a native OpenGL context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NativeContext(pub usize);

/// An opaque reference to a native renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NativeRenderer(pub usize);

/// The window state changes the native library documents as non-failing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowAction {
    Maximize,
    Minimize,
    Show,
    Hide,
    Restore,
    Raise,
}

/// Subsystem lifecycle, enumeration and diagnostics.
pub trait SubsystemBackend {
    /// A short name for logging.
    fn name(&self) -> &'static str;

    /// The version the linked native library reports at runtime.
    fn version(&self) -> Version;

    /// The native library's last-error string.
    fn last_error(&self) -> String;

    fn video_init(&self, driver: Option<&str>) -> NativeResult<()>;
    fn video_quit(&self);

    fn is_screen_saver_enabled(&self) -> bool;
    fn set_screen_saver_enabled(&self, enabled: bool);

    /// The number of compiled-in video drivers, or a negative value on failure.
    fn num_video_drivers(&self) -> i32;
    fn video_driver(&self, index: i32) -> Option<String>;
    fn current_video_driver(&self) -> Option<String>;

    /// The number of displays, or a negative value on failure.
    fn num_video_displays(&self) -> i32;
    /// The number of modes of a display, or a negative value on failure.
    fn num_display_modes(&self, display_index: i32) -> i32;
    fn display_mode(&self, display_index: i32, mode_index: i32) -> NativeResult<DisplayMode>;
}

/// Pixel buffers.
pub trait SurfaceBackend {
    /// Returns `None` if the allocation failed.
    fn create_surface(&self, flags: u32, width: i32, height: i32, depth: i32, masks: ChannelMasks)
                      -> Option<NativeSurface>;
    fn load_bmp(&self, path: &Path) -> Option<NativeSurface>;
    fn save_bmp(&self, surface: NativeSurface, path: &Path) -> NativeResult<()>;
    fn free_surface(&self, surface: NativeSurface);

    /// Blits `src` onto `dst`. The native call writes the final clipped rectangle back into
    /// `dst_rect`.
    fn blit(&self,
            src: NativeSurface,
            src_rect: Option<&Rect>,
            dst: NativeSurface,
            dst_rect: Option<&mut Rect>)
            -> NativeResult<()>;
    fn blit_scaled(&self,
                   src: NativeSurface,
                   src_rect: Option<&Rect>,
                   dst: NativeSurface,
                   dst_rect: Option<&mut Rect>)
                   -> NativeResult<()>;

    fn fill_rect(&self, surface: NativeSurface, rect: Option<&Rect>, color: u32)
                 -> NativeResult<()>;
    fn fill_rects(&self, surface: NativeSurface, rects: &[Rect], color: u32) -> NativeResult<()>;

    fn clip_rect(&self, surface: NativeSurface) -> Rect;
    /// Returns false if the clip rectangle doesn't intersect the surface.
    fn set_clip_rect(&self, surface: NativeSurface, rect: Option<&Rect>) -> bool;

    fn color_key(&self, surface: NativeSurface) -> NativeResult<u32>;
    fn set_color_key(&self, surface: NativeSurface, enabled: bool, key: u32) -> NativeResult<()>;
    fn alpha_mod(&self, surface: NativeSurface) -> NativeResult<u8>;
    fn set_alpha_mod(&self, surface: NativeSurface, alpha: u8) -> NativeResult<()>;
    fn blend_mode(&self, surface: NativeSurface) -> NativeResult<BlendMode>;
    fn set_blend_mode(&self, surface: NativeSurface, mode: BlendMode) -> NativeResult<()>;
    fn color_mod(&self, surface: NativeSurface) -> NativeResult<Rgb>;
    fn set_color_mod(&self, surface: NativeSurface, color: Rgb) -> NativeResult<()>;
    fn set_rle(&self, surface: NativeSurface, enabled: bool) -> NativeResult<()>;

    fn lock_surface(&self, surface: NativeSurface) -> NativeResult<()>;
    fn unlock_surface(&self, surface: NativeSurface);

    fn surface_format(&self, surface: NativeSurface) -> NativeResult<PixelFormat>;
    fn map_rgb(&self, surface: NativeSurface, r: u8, g: u8, b: u8) -> u32;
    fn map_rgba(&self, surface: NativeSurface, r: u8, g: u8, b: u8, a: u8) -> u32;
}

/// Platform windows.
pub trait WindowBackend {
    fn create_window(&self, title: &str, x: i32, y: i32, width: i32, height: i32, flags: u32)
                     -> Option<NativeWindow>;
    /// Creates a window and a renderer together. The renderer may be absent even on success.
    fn create_window_and_renderer(&self, width: i32, height: i32, flags: u32)
                                  -> NativeResult<(NativeWindow, Option<NativeRenderer>)>;
    fn destroy_window(&self, window: NativeWindow);

    fn window_size(&self, window: NativeWindow) -> Size;
    fn set_window_size(&self, window: NativeWindow, size: Size);
    fn window_position(&self, window: NativeWindow) -> Point;
    fn set_window_position(&self, window: NativeWindow, position: Point);
    fn window_title(&self, window: NativeWindow) -> Option<String>;
    fn set_window_title(&self, window: NativeWindow, title: &str);
    fn window_action(&self, window: NativeWindow, action: WindowAction);
    fn set_window_icon(&self, window: NativeWindow, icon: NativeSurface);

    fn window_brightness(&self, window: NativeWindow) -> f32;
    fn set_window_brightness(&self, window: NativeWindow, brightness: f32) -> NativeResult<()>;
    /// The display index, or a negative value on failure.
    fn window_display_index(&self, window: NativeWindow) -> i32;
    fn window_display_mode(&self, window: NativeWindow) -> NativeResult<DisplayMode>;
    fn set_window_display_mode(&self, window: NativeWindow, mode: Option<&DisplayMode>)
                               -> NativeResult<()>;
    fn window_flags(&self, window: NativeWindow) -> WindowFlags;
    fn window_gamma_ramp(&self, window: NativeWindow) -> NativeResult<GammaRamp>;
    fn set_window_gamma_ramp(&self, window: NativeWindow, ramp: &GammaRamp) -> NativeResult<()>;
    fn window_grab(&self, window: NativeWindow) -> bool;
    fn set_window_grab(&self, window: NativeWindow, grabbed: bool);
    fn window_id(&self, window: NativeWindow) -> u32;
    fn window_maximum_size(&self, window: NativeWindow) -> Size;
    fn set_window_maximum_size(&self, window: NativeWindow, size: Size);
    fn window_minimum_size(&self, window: NativeWindow) -> Size;
    fn set_window_minimum_size(&self, window: NativeWindow, size: Size);
    fn set_window_opacity(&self, window: NativeWindow, opacity: f32) -> NativeResult<()>;

    /// The window's framebuffer surface. The window keeps ownership of it.
    fn window_surface(&self, window: NativeWindow) -> Option<NativeSurface>;
    fn update_window_surface(&self, window: NativeWindow) -> NativeResult<()>;
    fn update_window_surface_rects(&self, window: NativeWindow, rects: &[Rect])
                                   -> NativeResult<()>;

    fn window_renderer(&self, window: NativeWindow) -> Option<NativeRenderer>;
    fn destroy_renderer(&self, renderer: NativeRenderer);

    fn gl_swap_window(&self, window: NativeWindow);
}

/// OpenGL contexts.
pub trait ContextBackend {
    fn gl_create_context(&self, window: Option<NativeWindow>) -> Option<NativeContext>;
    fn gl_delete_context(&self, context: NativeContext);
    fn gl_make_current(&self, window: NativeWindow, context: Option<NativeContext>)
                       -> NativeResult<()>;
}

/// A complete native video backend.
pub trait Backend: SubsystemBackend + SurfaceBackend + WindowBackend + ContextBackend {}

impl<B> Backend for B where B: SubsystemBackend + SurfaceBackend + WindowBackend + ContextBackend {}
