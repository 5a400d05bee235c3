// vidbind/src/surface.rs
//
//! Pixel surfaces.

use crate::backend::{NativeFailure, NativeSurface};
use crate::geom::{Rect, Rgb};
use crate::pixels::{BlendMode, ChannelMasks, PixelFormat};
use crate::value::{self, Value};
use crate::video::Video;
use crate::{Error, Ownership};

use std::cell::OnceCell;
use std::fmt::{self, Debug, Formatter};
use std::fs;
use std::path::Path;

/// A native pixel buffer.
///
/// Surfaces created with `new()` or `load_bmp()` own their buffer and release it when dropped
/// or explicitly freed. Surfaces obtained from `Window::surface()` are `Referenced`: the window
/// keeps the buffer and the wrapper never releases it. Such a wrapper must not be used after its
/// window is destroyed or resized, since the native layer invalidates the buffer then.
pub struct Surface {
    video: Video,
    surface: Option<NativeSurface>,
    ownership: Ownership,
    format: OnceCell<PixelFormat>,
}

impl Debug for Surface {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.surface {
            Some(surface) => write!(f, "Surface({:x}, {:?})", surface.0, self.ownership),
            None => write!(f, "Surface(null)"),
        }
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        self.free()
    }
}

impl Surface {
    /// Allocates a new pixel buffer.
    ///
    /// All-zero `masks` let the native library choose a layout for `depth`.
    pub fn new(video: &Video,
               flags: u32,
               width: i32,
               height: i32,
               depth: i32,
               masks: ChannelMasks)
               -> Result<Surface, Error> {
        let native = video.native();
        match native.create_surface(flags, width, height, depth, masks) {
            Some(surface) => Ok(Surface::wrap(video, surface, Ownership::Owned)),
            None => Err(Error::allocation(native)),
        }
    }

    /// Loads a BMP file into a new surface.
    pub fn load_bmp<P>(video: &Video, path: P) -> Result<Surface, Error> where P: AsRef<Path> {
        let path = path.as_ref();
        if !fs::metadata(path)?.is_file() {
            return Err(Error::Io(format!("{} is not a regular file", path.display())));
        }
        let native = video.native();
        match native.load_bmp(path) {
            Some(surface) => Ok(Surface::wrap(video, surface, Ownership::Owned)),
            None => Err(Error::Format(native.last_error())),
        }
    }

    /// Wraps a native surface that was obtained outside this crate.
    ///
    /// # Safety
    ///
    /// The handle must be a live surface of `video`'s backend. If `ownership` is `Owned`, no
    /// other wrapper may own it; if `Referenced`, its owner must outlive the returned wrapper.
    pub unsafe fn from_native_surface(video: &Video,
                                      surface: NativeSurface,
                                      ownership: Ownership)
                                      -> Surface {
        Surface::wrap(video, surface, ownership)
    }

    pub(crate) fn wrap(video: &Video, surface: NativeSurface, ownership: Ownership) -> Surface {
        Surface { video: video.clone(), surface: Some(surface), ownership, format: OnceCell::new() }
    }

    #[inline]
    pub fn native_surface(&self) -> Option<NativeSurface> {
        self.surface
    }

    #[inline]
    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.surface.is_none()
    }

    fn handle(&self) -> Result<NativeSurface, Error> {
        self.surface.ok_or_else(|| Error::runtime("surface has already been freed."))
    }

    fn check(&self, result: Result<(), NativeFailure>) -> Result<&Self, Error> {
        match result {
            Ok(()) => Ok(self),
            Err(_) => Err(self.video.native_error()),
        }
    }

    /// Releases the pixel buffer now if this wrapper owns it. Calling this again, or on a
    /// referenced surface, does nothing.
    pub fn free(&mut self) {
        if self.ownership != Ownership::Owned {
            return;
        }
        if let Some(surface) = self.surface.take() {
            debug!("Freeing surface {:x}", surface.0);
            self.video.native().free_surface(surface);
        }
    }

    /// Writes this surface to a BMP file.
    pub fn save_bmp<P>(&self, path: P) -> Result<(), Error> where P: AsRef<Path> {
        let surface = self.handle()?;
        let native = self.video.native();
        native.save_bmp(surface, path.as_ref()).map_err(|_| Error::Io(native.last_error()))
    }

    /// Copies `src_rect` of this surface (or all of it) to `dst_rect` of `dst`.
    ///
    /// Unlike `blit_scaled()`, the destination rectangle is mandatory. It is copied before the
    /// native call, which writes the clipped rectangle back into its argument.
    pub fn blit(&self, src_rect: Option<&Rect>, dst: &Surface, dst_rect: Option<&Rect>)
                -> Result<&Self, Error> {
        let mut dst_rect =
            *dst_rect.ok_or_else(|| Error::argument("cannot set 3rd argument nil."))?;
        let (src, dst) = (self.handle()?, dst.handle()?);
        self.check(self.video.native().blit(src, src_rect, dst, Some(&mut dst_rect)))
    }

    /// Copies `src_rect` of this surface (or all of it) to `dst_rect` of `dst` (or all of it),
    /// scaling as needed.
    pub fn blit_scaled(&self, src_rect: Option<&Rect>, dst: &Surface, dst_rect: Option<&Rect>)
                       -> Result<&Self, Error> {
        let mut dst_rect = dst_rect.copied();
        let (src, dst) = (self.handle()?, dst.handle()?);
        self.check(self.video.native().blit_scaled(src, src_rect, dst, dst_rect.as_mut()))
    }

    pub fn convert_format(&self, _: &PixelFormat, _: u32) -> Result<Surface, Error> {
        Err(Error::NotImplemented)
    }

    /// The surface's pixel format.
    ///
    /// The description is fetched from the native layer on first access and then kept for the
    /// lifetime of this wrapper.
    pub fn pixel_format(&self) -> Result<&PixelFormat, Error> {
        let surface = self.handle()?;
        if let Some(format) = self.format.get() {
            return Ok(format);
        }
        let format = self.video
                         .native()
                         .surface_format(surface)
                         .map_err(|_| self.video.native_error())?;
        Ok(self.format.get_or_init(|| format))
    }

    /// Fills `rect`, or the whole surface if `None`, with a native pixel value.
    pub fn fill_rect(&self, color: u32, rect: Option<&Rect>) -> Result<&Self, Error> {
        let surface = self.handle()?;
        self.check(self.video.native().fill_rect(surface, rect, color))
    }

    /// Fills every rectangle in the host sequence `rects`.
    ///
    /// Elements that are not rectangles are filled as empty rectangles at the origin.
    pub fn fill_rects(&self, color: u32, rects: &Value) -> Result<&Self, Error> {
        let items = rects.as_array().ok_or_else(|| {
            Error::type_error("given 2nd argument is unexpected type (expected Array).")
        })?;
        let surface = self.handle()?;
        let rects = value::resolve_rects(items);
        self.check(self.video.native().fill_rects(surface, &rects, color))
    }

    pub fn clip_rect(&self) -> Result<Rect, Error> {
        Ok(self.video.native().clip_rect(self.handle()?))
    }

    /// Sets the clipping rectangle, or disables clipping if `None`.
    pub fn set_clip_rect(&self, rect: Option<&Rect>) -> Result<&Self, Error> {
        let surface = self.handle()?;
        if self.video.native().set_clip_rect(surface, rect) {
            Ok(self)
        } else {
            Err(self.video.native_error())
        }
    }

    pub fn color_key(&self) -> Result<u32, Error> {
        let surface = self.handle()?;
        self.video.native().color_key(surface).map_err(|_| self.video.native_error())
    }

    pub fn set_color_key(&self, enabled: bool, key: u32) -> Result<&Self, Error> {
        let surface = self.handle()?;
        self.check(self.video.native().set_color_key(surface, enabled, key))
    }

    pub fn alpha_mod(&self) -> Result<u8, Error> {
        let surface = self.handle()?;
        self.video.native().alpha_mod(surface).map_err(|_| self.video.native_error())
    }

    pub fn set_alpha_mod(&self, alpha: u8) -> Result<&Self, Error> {
        let surface = self.handle()?;
        self.check(self.video.native().set_alpha_mod(surface, alpha))
    }

    pub fn blend_mode(&self) -> Result<BlendMode, Error> {
        let surface = self.handle()?;
        self.video.native().blend_mode(surface).map_err(|_| self.video.native_error())
    }

    pub fn set_blend_mode(&self, mode: BlendMode) -> Result<&Self, Error> {
        let surface = self.handle()?;
        self.check(self.video.native().set_blend_mode(surface, mode))
    }

    pub fn color_mod(&self) -> Result<Rgb, Error> {
        let surface = self.handle()?;
        self.video.native().color_mod(surface).map_err(|_| self.video.native_error())
    }

    pub fn set_color_mod(&self, color: Rgb) -> Result<&Self, Error> {
        let surface = self.handle()?;
        self.check(self.video.native().set_color_mod(surface, color))
    }

    pub fn set_palette(&self, _: &Value) -> Result<&Self, Error> {
        Err(Error::NotImplemented)
    }

    pub fn set_rle(&self, enabled: bool) -> Result<&Self, Error> {
        let surface = self.handle()?;
        self.check(self.video.native().set_rle(surface, enabled))
    }

    /// Prepares the pixels for direct access.
    pub fn lock(&self) -> Result<&Self, Error> {
        let surface = self.handle()?;
        self.check(self.video.native().lock_surface(surface))
    }

    /// Ends direct pixel access. This never fails.
    pub fn unlock(&self) -> &Self {
        if let Some(surface) = self.surface {
            self.video.native().unlock_surface(surface);
        }
        self
    }

    /// Maps an opaque color to a pixel value in this surface's format.
    pub fn map_rgb(&self, r: u8, g: u8, b: u8) -> Result<u32, Error> {
        Ok(self.video.native().map_rgb(self.handle()?, r, g, b))
    }

    /// Maps a color with alpha to a pixel value in this surface's format.
    pub fn map_rgba(&self, r: u8, g: u8, b: u8, a: u8) -> Result<u32, Error> {
        Ok(self.video.native().map_rgba(self.handle()?, r, g, b, a))
    }
}
