// vidbind/src/window.rs
//
//! Platform windows.

use crate::backend::{NativeResult, NativeWindow, WindowAction};
use crate::context::GLContext;
use crate::display::DisplayMode;
use crate::geom::{Point, Size};
use crate::info::Capability;
use crate::renderer::Renderer;
use crate::surface::Surface;
use crate::value::{self, Value};
use crate::video::Video;
use crate::{Error, Ownership};

use std::fmt::{self, Debug, Formatter};

bitflags! {
    /// Window creation and state flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct WindowFlags: u32 {
        const FULLSCREEN         = 0x0000_0001;
        const OPENGL             = 0x0000_0002;
        const SHOWN              = 0x0000_0004;
        const HIDDEN             = 0x0000_0008;
        const BORDERLESS         = 0x0000_0010;
        const RESIZABLE          = 0x0000_0020;
        const MINIMIZED          = 0x0000_0040;
        const MAXIMIZED          = 0x0000_0080;
        const INPUT_GRABBED      = 0x0000_0100;
        const INPUT_FOCUS        = 0x0000_0200;
        const MOUSE_FOCUS        = 0x0000_0400;
        const FOREIGN            = 0x0000_0800;
        const FULLSCREEN_DESKTOP = 0x0000_1001;
    }
}

/// Special window coordinates understood by the native library.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowPos {
    /// Let the window manager decide.
    Undefined,
    /// Center the window on the primary display.
    Centered,
    /// An explicit coordinate.
    At(i32),
}

impl WindowPos {
    pub const UNDEFINED_MASK: i32 = 0x1fff_0000;
    pub const CENTERED_MASK: i32 = 0x2fff_0000;

    #[inline]
    pub fn to_raw(self) -> i32 {
        match self {
            WindowPos::Undefined => WindowPos::UNDEFINED_MASK,
            WindowPos::Centered => WindowPos::CENTERED_MASK,
            WindowPos::At(coordinate) => coordinate,
        }
    }

    pub fn from_raw(raw: i32) -> WindowPos {
        match raw & !0xffff {
            WindowPos::UNDEFINED_MASK => WindowPos::Undefined,
            WindowPos::CENTERED_MASK => WindowPos::Centered,
            _ => WindowPos::At(raw),
        }
    }
}

impl From<i32> for WindowPos {
    #[inline]
    fn from(raw: i32) -> WindowPos {
        WindowPos::from_raw(raw)
    }
}

/// The per-channel gamma translation tables of a window's display.
#[derive(Clone, PartialEq, Eq)]
pub struct GammaRamp {
    pub red: [u16; 256],
    pub green: [u16; 256],
    pub blue: [u16; 256],
}

impl GammaRamp {
    /// The ramp that maps every channel value to itself.
    pub fn identity() -> GammaRamp {
        let mut table = [0; 256];
        for (index, entry) in table.iter_mut().enumerate() {
            *entry = (index as u16) * 257;
        }
        GammaRamp { red: table, green: table, blue: table }
    }
}

impl Default for GammaRamp {
    fn default() -> GammaRamp {
        GammaRamp::identity()
    }
}

impl Debug for GammaRamp {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f,
               "GammaRamp(red: {}..{}, green: {}..{}, blue: {}..{})",
               self.red[0],
               self.red[255],
               self.green[0],
               self.green[255],
               self.blue[0],
               self.blue[255])
    }
}

/// A native platform window.
///
/// A window wrapper can exist before its native window does: `Window::empty()` makes an
/// unpopulated wrapper that `create()` later fills in. On an unpopulated (or destroyed) wrapper,
/// queries return `None` and mutators do nothing and return `None`. The one exception is `id()`,
/// which fails with `Error::Runtime`.
pub struct Window {
    video: Video,
    window: Option<NativeWindow>,
    ownership: Ownership,
}

impl Debug for Window {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.window {
            Some(window) => write!(f, "Window({:x}, {:?})", window.0, self.ownership),
            None => write!(f, "Window(null)"),
        }
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        self.destroy()
    }
}

impl Window {
    /// Makes an unpopulated window wrapper.
    pub fn empty(video: &Video) -> Window {
        Window { video: video.clone(), window: None, ownership: Ownership::Owned }
    }

    /// Creates a native window. `x` and `y` may be `WindowPos` raw values.
    pub fn new(video: &Video,
               title: &str,
               x: i32,
               y: i32,
               width: i32,
               height: i32,
               flags: WindowFlags)
               -> Result<Window, Error> {
        let mut window = Window::empty(video);
        window.create(title, x, y, width, height, flags)?;
        Ok(window)
    }

    /// Wraps a native window that was obtained outside this crate.
    ///
    /// # Safety
    ///
    /// The handle must be a live window of `video`'s backend. If `ownership` is `Owned`, no
    /// other wrapper may own it; if `Referenced`, its owner must outlive the returned wrapper.
    pub unsafe fn from_native_window(video: &Video, window: NativeWindow, ownership: Ownership)
                                     -> Window {
        Window { video: video.clone(), window: Some(window), ownership }
    }

    #[inline]
    pub fn native_window(&self) -> Option<NativeWindow> {
        self.window
    }

    #[inline]
    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    #[inline]
    pub fn is_created(&self) -> bool {
        self.window.is_some()
    }

    fn check(&self, result: NativeResult<()>) -> Result<Option<&Self>, Error> {
        match result {
            Ok(()) => Ok(Some(self)),
            Err(_) => Err(self.video.native_error()),
        }
    }

    /// Populates an empty wrapper with a new native window.
    pub fn create(&mut self,
                  title: &str,
                  x: i32,
                  y: i32,
                  width: i32,
                  height: i32,
                  flags: WindowFlags)
                  -> Result<&mut Self, Error> {
        if self.window.is_some() {
            return Err(Error::AlreadyCreated);
        }
        let native = self.video.native();
        match native.create_window(title, x, y, width, height, flags.bits()) {
            Some(window) => {
                self.window = Some(window);
                self.ownership = Ownership::Owned;
                Ok(self)
            }
            None => Err(Error::native(native)),
        }
    }

    /// Populates an empty wrapper with a new native window and creates a renderer for it.
    ///
    /// Returns `None` if the native call succeeded without producing a renderer.
    pub fn create_with_renderer(&mut self, width: i32, height: i32, flags: WindowFlags)
                                -> Result<Option<Renderer>, Error> {
        if self.window.is_some() {
            return Err(Error::AlreadyCreated);
        }
        let (window, renderer) = self.video
                                     .native()
                                     .create_window_and_renderer(width, height, flags.bits())
                                     .map_err(|_| self.video.native_error())?;
        self.window = Some(window);
        self.ownership = Ownership::Owned;
        Ok(renderer.map(|renderer| Renderer::wrap(&self.video, renderer, Ownership::Owned)))
    }

    /// Releases the native window now. Calling this again does nothing.
    pub fn destroy(&mut self) {
        if let Some(window) = self.window.take() {
            if self.ownership == Ownership::Owned {
                debug!("Destroying window {:x}", window.0);
                self.video.native().destroy_window(window);
            }
        }
    }

    pub fn width(&self) -> Option<i32> {
        self.size().map(|size| size.width)
    }

    pub fn height(&self) -> Option<i32> {
        self.size().map(|size| size.height)
    }

    pub fn size(&self) -> Option<Size> {
        let window = self.window?;
        Some(self.video.native().window_size(window))
    }

    /// Requests a new client size. The platform may clamp it.
    pub fn set_size(&self, width: i32, height: i32) -> Option<&Self> {
        let window = self.window?;
        self.video.native().set_window_size(window, Size::new(width, height));
        Some(self)
    }

    pub fn position(&self) -> Option<Point> {
        let window = self.window?;
        Some(self.video.native().window_position(window))
    }

    pub fn set_position(&self, position: Point) -> Option<&Self> {
        let window = self.window?;
        self.video.native().set_window_position(window, position);
        Some(self)
    }

    pub fn title(&self) -> Option<String> {
        let window = self.window?;
        self.video.native().window_title(window)
    }

    pub fn set_title(&self, title: &str) -> Option<&Self> {
        let window = self.window?;
        self.video.native().set_window_title(window, title);
        Some(self)
    }

    fn act(&self, action: WindowAction) -> Option<&Self> {
        let window = self.window?;
        self.video.native().window_action(window, action);
        Some(self)
    }

    pub fn maximize(&self) -> Option<&Self> {
        self.act(WindowAction::Maximize)
    }

    pub fn minimize(&self) -> Option<&Self> {
        self.act(WindowAction::Minimize)
    }

    pub fn show(&self) -> Option<&Self> {
        self.act(WindowAction::Show)
    }

    pub fn hide(&self) -> Option<&Self> {
        self.act(WindowAction::Hide)
    }

    pub fn restore(&self) -> Option<&Self> {
        self.act(WindowAction::Restore)
    }

    pub fn raise(&self) -> Option<&Self> {
        self.act(WindowAction::Raise)
    }

    /// Binds `context` to this window for rendering, or unbinds the current context if `None`.
    pub fn make_current(&self, context: Option<&GLContext>) -> Result<Option<&Self>, Error> {
        let window = match self.window {
            Some(window) => window,
            None => return Ok(None),
        };
        let context = match context {
            None => None,
            Some(context) => match context.native_context() {
                Some(context) => Some(context),
                None => return Err(Error::runtime("GL context has already been deleted.")),
            },
        };
        self.check(self.video.native().gl_make_current(window, context))
    }

    pub fn set_icon(&self, icon: &Surface) -> Result<Option<&Self>, Error> {
        let window = match self.window {
            Some(window) => window,
            None => return Ok(None),
        };
        let icon = icon.native_surface()
                       .ok_or_else(|| Error::runtime("surface has already been freed."))?;
        self.video.native().set_window_icon(window, icon);
        Ok(Some(self))
    }

    pub fn brightness(&self) -> Option<f32> {
        let window = self.window?;
        Some(self.video.native().window_brightness(window))
    }

    pub fn set_brightness(&self, brightness: f32) -> Result<Option<&Self>, Error> {
        match self.window {
            Some(window) => {
                self.check(self.video.native().set_window_brightness(window, brightness))
            }
            None => Ok(None),
        }
    }

    /// The index of the display containing the center of the window.
    pub fn display_index(&self) -> Result<Option<i32>, Error> {
        let window = match self.window {
            Some(window) => window,
            None => return Ok(None),
        };
        match self.video.native().window_display_index(window) {
            index if index < 0 => Err(self.video.native_error()),
            index => Ok(Some(index)),
        }
    }

    /// The mode used when this window is visible at fullscreen.
    pub fn display_mode(&self) -> Result<Option<DisplayMode>, Error> {
        match self.window {
            Some(window) => self.video
                                .native()
                                .window_display_mode(window)
                                .map(Some)
                                .map_err(|_| self.video.native_error()),
            None => Ok(None),
        }
    }

    /// Sets the fullscreen mode. `None` uses the window's dimensions and the desktop's format
    /// and refresh rate.
    pub fn set_display_mode(&self, mode: Option<&DisplayMode>) -> Result<Option<&Self>, Error> {
        match self.window {
            Some(window) => self.check(self.video.native().set_window_display_mode(window, mode)),
            None => Ok(None),
        }
    }

    pub fn flags(&self) -> Option<WindowFlags> {
        let window = self.window?;
        Some(self.video.native().window_flags(window))
    }

    pub fn gamma_ramp(&self) -> Result<Option<GammaRamp>, Error> {
        match self.window {
            Some(window) => self.video
                                .native()
                                .window_gamma_ramp(window)
                                .map(Some)
                                .map_err(|_| self.video.native_error()),
            None => Ok(None),
        }
    }

    pub fn set_gamma_ramp(&self, ramp: &GammaRamp) -> Result<Option<&Self>, Error> {
        match self.window {
            Some(window) => self.check(self.video.native().set_window_gamma_ramp(window, ramp)),
            None => Ok(None),
        }
    }

    /// Whether the window has grabbed input.
    pub fn grab(&self) -> Option<bool> {
        let window = self.window?;
        Some(self.video.native().window_grab(window))
    }

    pub fn set_grab(&self, grabbed: bool) -> Option<&Self> {
        let window = self.window?;
        self.video.native().set_window_grab(window, grabbed);
        Some(self)
    }

    /// The native numeric window ID.
    ///
    /// Unlike the other accessors, this fails on an unpopulated wrapper.
    pub fn id(&self) -> Result<u32, Error> {
        match self.window {
            Some(window) => Ok(self.video.native().window_id(window)),
            None => Err(Error::runtime("Couldn't find window")),
        }
    }

    pub fn maximum_size(&self) -> Option<Size> {
        let window = self.window?;
        Some(self.video.native().window_maximum_size(window))
    }

    pub fn set_maximum_size(&self, width: i32, height: i32) -> Option<&Self> {
        let window = self.window?;
        self.video.native().set_window_maximum_size(window, Size::new(width, height));
        Some(self)
    }

    pub fn minimum_size(&self) -> Option<Size> {
        let window = self.window?;
        Some(self.video.native().window_minimum_size(window))
    }

    pub fn set_minimum_size(&self, width: i32, height: i32) -> Option<&Self> {
        let window = self.window?;
        self.video.native().set_window_minimum_size(window, Size::new(width, height));
        Some(self)
    }

    /// The window's framebuffer surface.
    ///
    /// The window keeps ownership of the buffer: the returned wrapper is `Referenced` and is
    /// invalidated when the window is resized or destroyed.
    pub fn surface(&self) -> Result<Option<Surface>, Error> {
        let window = match self.window {
            Some(window) => window,
            None => return Ok(None),
        };
        match self.video.native().window_surface(window) {
            Some(surface) => Ok(Some(Surface::wrap(&self.video, surface, Ownership::Referenced))),
            None => Err(self.video.native_error()),
        }
    }

    /// Copies the window surface to the screen.
    pub fn update_surface(&self) -> Result<Option<&Self>, Error> {
        match self.window {
            Some(window) => self.check(self.video.native().update_window_surface(window)),
            None => Ok(None),
        }
    }

    /// Copies the given areas of the window surface to the screen.
    ///
    /// `rects` must be a host sequence. Elements that are not rectangles are treated as empty
    /// rectangles at the origin.
    pub fn update_surface_rects(&self, rects: &Value) -> Result<Option<&Self>, Error> {
        let items = rects.as_array().ok_or_else(|| {
            Error::type_error("given argument is unexpected type (expected Array).")
        })?;
        let window = match self.window {
            Some(window) => window,
            None => return Ok(None),
        };
        let rects = value::resolve_rects(items);
        self.check(self.video.native().update_window_surface_rects(window, &rects))
    }

    /// The renderer attached to this window. The window keeps ownership of it.
    pub fn renderer(&self) -> Result<Option<Renderer>, Error> {
        let window = match self.window {
            Some(window) => window,
            None => return Ok(None),
        };
        match self.video.native().window_renderer(window) {
            Some(renderer) => {
                Ok(Some(Renderer::wrap(&self.video, renderer, Ownership::Referenced)))
            }
            None => Err(self.video.native_error()),
        }
    }

    /// Presents the frame rendered with OpenGL.
    pub fn swap(&self) -> Option<&Self> {
        let window = self.window?;
        self.video.native().gl_swap_window(window);
        Some(self)
    }

    /// Sets the window opacity in `[0.0, 1.0]`.
    ///
    /// If the linked native library predates window opacity, this silently does nothing.
    pub fn set_opacity(&self, opacity: f32) -> Result<Option<&Self>, Error> {
        let window = match self.window {
            Some(window) => window,
            None => return Ok(None),
        };
        if !self.video.supports(Capability::WindowOpacity) {
            warn!("Window opacity needs native version {}, but {} is linked; ignoring",
                  Capability::WindowOpacity.minimum_version(),
                  self.video.version());
            return Ok(Some(self));
        }
        self.check(self.video.native().set_window_opacity(window, opacity))
    }
}
