// vidbind/src/platform/headless/surface.rs
//
//! Software pixel buffers.

use crate::backend::{NativeFailure, NativeResult, NativeSurface, NativeWindow, SurfaceBackend};
use crate::geom::{self, Rect, Rgb, Size};
use crate::pixels::{BlendMode, ChannelMasks, PixelFormat, PixelFormatEnum};
use super::device::Device;

use image::{ImageFormat, Rgb as RgbPixel, RgbImage, Rgba as RgbaPixel, RgbaImage};
use std::path::Path;

const FORMATS: [(PixelFormatEnum, u8, u8, ChannelMasks); 9] = [
    (PixelFormatEnum::RGB555, 15, 2, ChannelMasks::new(0x7c00, 0x03e0, 0x001f, 0)),
    (PixelFormatEnum::RGB565, 16, 2, ChannelMasks::new(0xf800, 0x07e0, 0x001f, 0)),
    (PixelFormatEnum::RGB24, 24, 3, ChannelMasks::new(0x0000ff, 0x00ff00, 0xff0000, 0)),
    (PixelFormatEnum::BGR24, 24, 3, ChannelMasks::new(0xff0000, 0x00ff00, 0x0000ff, 0)),
    (PixelFormatEnum::RGB888, 24, 4, ChannelMasks::new(0xff0000, 0x00ff00, 0x0000ff, 0)),
    (PixelFormatEnum::BGR888, 24, 4, ChannelMasks::new(0x0000ff, 0x00ff00, 0xff0000, 0)),
    (PixelFormatEnum::ARGB8888,
     32,
     4,
     ChannelMasks::new(0x00ff0000, 0x0000ff00, 0x000000ff, 0xff000000)),
    (PixelFormatEnum::RGBA8888,
     32,
     4,
     ChannelMasks::new(0xff000000, 0x00ff0000, 0x0000ff00, 0x000000ff)),
    (PixelFormatEnum::ABGR8888,
     32,
     4,
     ChannelMasks::new(0x000000ff, 0x0000ff00, 0x00ff0000, 0xff000000)),
];

/// Describes a packed format by its identifier.
pub(crate) fn format_from_enum(format: PixelFormatEnum) -> Option<PixelFormat> {
    FORMATS.iter().find(|entry| entry.0 == format).map(|&(format, bits, bytes, masks)| {
        PixelFormat { format, bits_per_pixel: bits, bytes_per_pixel: bytes, masks }
    })
}

/// Picks the format for a requested depth and channel layout. All-zero masks select the default
/// layout for the depth.
pub(crate) fn format_for(depth: i32, masks: ChannelMasks) -> Option<PixelFormat> {
    let format = if masks.is_zero() {
        match depth {
            15 => PixelFormatEnum::RGB555,
            16 => PixelFormatEnum::RGB565,
            24 => PixelFormatEnum::RGB24,
            32 => PixelFormatEnum::RGB888,
            _ => return None,
        }
    } else {
        let bytes_per_pixel = if depth == 24 { 3 } else { (depth + 7) / 8 };
        FORMATS.iter()
               .find(|entry| entry.3 == masks && entry.2 as i32 == bytes_per_pixel &&
                     (entry.1 as i32 == depth || (depth == 32 && entry.3.alpha == 0)))
               .map(|entry| entry.0)?
    };
    format_from_enum(format)
}

fn channel_shift(mask: u32) -> u32 {
    if mask == 0 { 0 } else { mask.trailing_zeros() }
}

fn channel_loss(mask: u32) -> u32 {
    8 - mask.count_ones().min(8)
}

fn pack(mask: u32, value: u8) -> u32 {
    ((value as u32) >> channel_loss(mask)) << channel_shift(mask) & mask
}

fn unpack(mask: u32, pixel: u32, empty: u8) -> u8 {
    let bits = mask.count_ones();
    if bits == 0 {
        return empty;
    }
    let max = (1u32 << bits.min(8)) - 1;
    let value = ((pixel & mask) >> channel_shift(mask)).min(max);
    ((value * 255 + max / 2) / max) as u8
}

/// Maps a color to a pixel value. Formats without an alpha channel ignore `a`.
pub(crate) fn map_rgba(format: &PixelFormat, r: u8, g: u8, b: u8, a: u8) -> u32 {
    let masks = &format.masks;
    pack(masks.red, r) | pack(masks.green, g) | pack(masks.blue, b) | pack(masks.alpha, a)
}

pub(crate) fn unmap_rgba(format: &PixelFormat, pixel: u32) -> [u8; 4] {
    let masks = &format.masks;
    [
        unpack(masks.red, pixel, 0),
        unpack(masks.green, pixel, 0),
        unpack(masks.blue, pixel, 0),
        unpack(masks.alpha, pixel, 255),
    ]
}

#[inline]
fn saturate(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Maps a destination coordinate to the nearest source coordinate.
fn scale(value: i32, to_origin: i32, to_extent: i32, from_origin: i32, from_extent: i32) -> i32 {
    let offset = (value as i64 - to_origin as i64) * from_extent as i64 / to_extent as i64;
    (from_origin as i64 + offset) as i32
}

/// Edges are computed in `i64`, so rectangles near the `i32` limits clip instead of overflowing.
fn intersect(a: &Rect, b: &Rect) -> Option<Rect> {
    let x0 = (a.origin.x as i64).max(b.origin.x as i64);
    let y0 = (a.origin.y as i64).max(b.origin.y as i64);
    let x1 = (a.origin.x as i64 + a.size.width as i64)
                 .min(b.origin.x as i64 + b.size.width as i64);
    let y1 = (a.origin.y as i64 + a.size.height as i64)
                 .min(b.origin.y as i64 + b.size.height as i64);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(geom::rect(x0 as i32, y0 as i32, (x1 - x0) as i32, (y1 - y0) as i32))
}

#[derive(Clone)]
pub(crate) struct SurfaceData {
    pub(crate) size: Size,
    pub(crate) format: PixelFormat,
    /// One entry per pixel, already truncated to the format's depth.
    pub(crate) pixels: Vec<u32>,
    pub(crate) clip: Rect,
    pub(crate) color_key: Option<u32>,
    pub(crate) alpha_mod: u8,
    pub(crate) blend_mode: BlendMode,
    pub(crate) color_mod: Rgb,
    pub(crate) rle: bool,
    pub(crate) locks: u32,
    /// The window whose framebuffer this is, if any.
    pub(crate) window: Option<NativeWindow>,
}

impl SurfaceData {
    pub(crate) fn new(size: Size, format: PixelFormat) -> SurfaceData {
        let blend_mode = if format.has_alpha() { BlendMode::Blend } else { BlendMode::None };
        SurfaceData {
            size,
            format,
            pixels: vec![0; size.width as usize * size.height as usize],
            clip: geom::rect(0, 0, size.width, size.height),
            color_key: None,
            alpha_mod: 255,
            blend_mode,
            color_mod: Rgb::new(255, 255, 255),
            rle: false,
            locks: 0,
            window: None,
        }
    }

    #[inline]
    fn bounds(&self) -> Rect {
        geom::rect(0, 0, self.size.width, self.size.height)
    }

    #[inline]
    fn pixel_mask(&self) -> u32 {
        match self.format.bytes_per_pixel {
            4 => !0,
            bytes => (1u32 << (bytes as u32 * 8)) - 1,
        }
    }

    #[inline]
    pub(crate) fn pixel(&self, x: i32, y: i32) -> u32 {
        self.pixels[(y * self.size.width + x) as usize]
    }

    #[inline]
    fn set_pixel(&mut self, x: i32, y: i32, pixel: u32) {
        let index = (y * self.size.width + x) as usize;
        self.pixels[index] = pixel & self.pixel_mask();
    }

    fn fill(&mut self, area: &Rect, color: u32) {
        for y in area.origin.y..(area.origin.y + area.size.height) {
            for x in area.origin.x..(area.origin.x + area.size.width) {
                self.set_pixel(x, y, color);
            }
        }
    }

    /// Converts one source pixel to `target`. Returns `None` for color-keyed pixels.
    ///
    /// Blend mode and color/alpha modulation are stored for their accessors but not applied.
    fn convert(&self, source: u32, target: &PixelFormat) -> Option<u32> {
        if self.color_key == Some(source) {
            return None;
        }
        let [r, g, b, a] = unmap_rgba(&self.format, source);
        Some(map_rgba(target, r, g, b, a))
    }
}

impl Device {
    pub(crate) fn insert_surface(&self, data: SurfaceData) -> NativeSurface {
        let mut state = self.state.borrow_mut();
        let handle = state.allocate_handle();
        state.surfaces.insert(handle, data);
        NativeSurface(handle)
    }

    fn with_surface<T, F>(&self, surface: NativeSurface, f: F) -> NativeResult<T>
                          where F: FnOnce(&mut SurfaceData) -> T {
        match self.state.borrow_mut().surfaces.get_mut(&surface.0) {
            Some(data) => Ok(f(data)),
            None => self.fail("Invalid surface"),
        }
    }

    /// Reads a copy of a surface, e.g. for inspecting pixels in tests.
    pub fn surface_pixels(&self, surface: NativeSurface) -> Option<Vec<u32>> {
        self.state.borrow().surfaces.get(&surface.0).map(|data| data.pixels.clone())
    }

    fn blit_checked(&self,
                    src: NativeSurface,
                    dst: NativeSurface,
                    f: &mut dyn FnMut(&SurfaceData, &mut SurfaceData) -> Rect)
                    -> NativeResult<Rect> {
        let mut state = self.state.borrow_mut();
        let source = match state.surfaces.get(&src.0) {
            Some(data) => data.clone(),
            None => return self.fail("Invalid surface"),
        };
        let target = match state.surfaces.get_mut(&dst.0) {
            Some(data) => data,
            None => return self.fail("Invalid surface"),
        };
        if source.locks > 0 || target.locks > 0 {
            return self.fail("Surfaces must not be locked during blit");
        }
        Ok(f(&source, target))
    }
}

impl SurfaceBackend for Device {
    fn create_surface(&self, _: u32, width: i32, height: i32, depth: i32, masks: ChannelMasks)
                      -> Option<NativeSurface> {
        if width < 0 {
            self.set_error("Parameter 'width' is invalid");
            return None;
        }
        if height < 0 {
            self.set_error("Parameter 'height' is invalid");
            return None;
        }
        let format = match format_for(depth, masks) {
            Some(format) => format,
            None => {
                self.set_error("Unknown pixel format");
                return None;
            }
        };
        let bytes = width as usize * height as usize * format.bytes_per_pixel as usize;
        if bytes > self.config.allocation_limit {
            self.set_error("Out of memory");
            return None;
        }
        Some(self.insert_surface(SurfaceData::new(Size::new(width, height), format)))
    }

    fn load_bmp(&self, path: &Path) -> Option<NativeSurface> {
        let decoded = image::io::Reader::open(path)
            .map_err(|error| error.to_string())
            .and_then(|reader| reader.with_guessed_format().map_err(|error| error.to_string()))
            .and_then(|reader| {
                match reader.format() {
                    Some(ImageFormat::Bmp) => reader.decode().map_err(|error| error.to_string()),
                    _ => Err("File is not a Windows BMP file".to_owned()),
                }
            });
        let image = match decoded {
            Ok(image) => image,
            Err(message) => {
                self.set_error(message);
                return None;
            }
        };
        let format = if image.color().has_alpha() {
            PixelFormatEnum::ARGB8888
        } else {
            PixelFormatEnum::RGB888
        };
        let format = format_from_enum(format)?;
        let rgba = image.to_rgba8();
        let size = Size::new(rgba.width() as i32, rgba.height() as i32);
        let mut data = SurfaceData::new(size, format);
        for (x, y, pixel) in rgba.enumerate_pixels() {
            let [r, g, b, a] = pixel.0;
            data.set_pixel(x as i32, y as i32, map_rgba(&format, r, g, b, a));
        }
        Some(self.insert_surface(data))
    }

    fn save_bmp(&self, surface: NativeSurface, path: &Path) -> NativeResult<()> {
        let result = self.with_surface(surface, |data| {
            let (width, height) = (data.size.width as u32, data.size.height as u32);
            let pixel = |x: u32, y: u32| unmap_rgba(&data.format, data.pixel(x as i32, y as i32));
            if data.format.has_alpha() {
                RgbaImage::from_fn(width, height, |x, y| RgbaPixel(pixel(x, y)))
                    .save_with_format(path, ImageFormat::Bmp)
            } else {
                RgbImage::from_fn(width, height, |x, y| {
                    let [r, g, b, _] = pixel(x, y);
                    RgbPixel([r, g, b])
                }).save_with_format(path, ImageFormat::Bmp)
            }
        })?;
        match result {
            Ok(()) => Ok(()),
            Err(error) => self.fail(format!("Couldn't write {}: {}", path.display(), error)),
        }
    }

    fn free_surface(&self, surface: NativeSurface) {
        let mut state = self.state.borrow_mut();
        match state.surfaces.get(&surface.0).map(|data| data.window.is_some()) {
            Some(false) => {
                state.surfaces.remove(&surface.0);
                state.stats.surfaces_freed += 1;
            }
            Some(true) => warn!("Ignoring free of window-owned surface {:x}", surface.0),
            None => warn!("Ignoring free of unknown surface {:x}", surface.0),
        }
    }

    fn blit(&self,
            src: NativeSurface,
            src_rect: Option<&Rect>,
            dst: NativeSurface,
            dst_rect: Option<&mut Rect>)
            -> NativeResult<()> {
        let origin = dst_rect.as_ref().map_or(geom::Point::zero(), |rect| rect.origin);
        let mut copy = |source: &SurfaceData, target: &mut SurfaceData| {
            let (mut sx, mut sy) = (0, 0);
            let (mut dx, mut dy) = (origin.x as i64, origin.y as i64);
            let (mut w, mut h) = (source.size.width as i64, source.size.height as i64);
            if let Some(rect) = src_rect {
                sx = rect.origin.x as i64;
                sy = rect.origin.y as i64;
                w = rect.size.width as i64;
                h = rect.size.height as i64;
                if sx < 0 {
                    w += sx;
                    dx -= sx;
                    sx = 0;
                }
                if sy < 0 {
                    h += sy;
                    dy -= sy;
                    sy = 0;
                }
                w = w.min(source.size.width as i64 - sx);
                h = h.min(source.size.height as i64 - sy);
            }

            let clip = target.clip;
            let (clip_x, clip_y) = (clip.origin.x as i64, clip.origin.y as i64);
            let overflow = clip_x - dx;
            if overflow > 0 {
                w -= overflow;
                dx += overflow;
                sx += overflow;
            }
            let overflow = dx + w - clip_x - clip.size.width as i64;
            if overflow > 0 {
                w -= overflow;
            }
            let overflow = clip_y - dy;
            if overflow > 0 {
                h -= overflow;
                dy += overflow;
                sy += overflow;
            }
            let overflow = dy + h - clip_y - clip.size.height as i64;
            if overflow > 0 {
                h -= overflow;
            }
            if w <= 0 || h <= 0 {
                return geom::rect(saturate(dx), saturate(dy), 0, 0);
            }

            // Everything now lies inside both surfaces.
            let (sx, sy, dx, dy) = (sx as i32, sy as i32, dx as i32, dy as i32);
            let (w, h) = (w as i32, h as i32);
            for row in 0..h {
                for column in 0..w {
                    let pixel = source.pixel(sx + column, sy + row);
                    if let Some(pixel) = source.convert(pixel, &target.format) {
                        target.set_pixel(dx + column, dy + row, pixel);
                    }
                }
            }
            geom::rect(dx, dy, w, h)
        };
        let result = self.blit_checked(src, dst, &mut copy)?;
        if let Some(dst_rect) = dst_rect {
            *dst_rect = result;
        }
        Ok(())
    }

    fn blit_scaled(&self,
                   src: NativeSurface,
                   src_rect: Option<&Rect>,
                   dst: NativeSurface,
                   dst_rect: Option<&mut Rect>)
                   -> NativeResult<()> {
        let requested = dst_rect.as_ref().map(|rect| **rect);
        let mut copy = |source: &SurfaceData, target: &mut SurfaceData| {
            let empty = geom::rect(0, 0, 0, 0);
            let from = match src_rect {
                Some(rect) => intersect(rect, &source.bounds()),
                None => Some(source.bounds()),
            };
            let to = requested.unwrap_or_else(|| target.bounds());
            let from = match from {
                Some(from) if to.size.width > 0 && to.size.height > 0 => from,
                _ => return empty,
            };
            let visible = match intersect(&to, &target.clip) {
                Some(visible) => visible,
                None => return empty,
            };
            for y in visible.origin.y..(visible.origin.y + visible.size.height) {
                let sy = scale(y, to.origin.y, to.size.height, from.origin.y, from.size.height);
                for x in visible.origin.x..(visible.origin.x + visible.size.width) {
                    let sx = scale(x, to.origin.x, to.size.width, from.origin.x, from.size.width);
                    if let Some(pixel) = source.convert(source.pixel(sx, sy), &target.format) {
                        target.set_pixel(x, y, pixel);
                    }
                }
            }
            visible
        };
        let result = self.blit_checked(src, dst, &mut copy)?;
        if let Some(dst_rect) = dst_rect {
            *dst_rect = result;
        }
        Ok(())
    }

    fn fill_rect(&self, surface: NativeSurface, rect: Option<&Rect>, color: u32)
                 -> NativeResult<()> {
        self.with_surface(surface, |data| {
            let area = match rect {
                Some(rect) => intersect(rect, &data.clip),
                None => Some(data.clip),
            };
            if let Some(area) = area {
                data.fill(&area, color);
            }
        })
    }

    fn fill_rects(&self, surface: NativeSurface, rects: &[Rect], color: u32) -> NativeResult<()> {
        self.with_surface(surface, |data| {
            for rect in rects {
                if let Some(area) = intersect(rect, &data.clip) {
                    data.fill(&area, color);
                }
            }
        })
    }

    fn clip_rect(&self, surface: NativeSurface) -> Rect {
        self.with_surface(surface, |data| data.clip).unwrap_or_else(|_| geom::zero_rect())
    }

    fn set_clip_rect(&self, surface: NativeSurface, rect: Option<&Rect>) -> bool {
        let clipped = self.with_surface(surface, |data| {
            let bounds = data.bounds();
            match rect {
                None => {
                    data.clip = bounds;
                    true
                }
                Some(rect) => match intersect(rect, &bounds) {
                    Some(clip) => {
                        data.clip = clip;
                        true
                    }
                    None => {
                        data.clip = geom::zero_rect();
                        false
                    }
                },
            }
        });
        match clipped {
            Ok(true) => true,
            Ok(false) => {
                self.set_error("Clip rectangle does not intersect the surface");
                false
            }
            Err(NativeFailure) => false,
        }
    }

    fn color_key(&self, surface: NativeSurface) -> NativeResult<u32> {
        match self.with_surface(surface, |data| data.color_key)? {
            Some(key) => Ok(key),
            None => self.fail("Surface doesn't have a colorkey"),
        }
    }

    fn set_color_key(&self, surface: NativeSurface, enabled: bool, key: u32) -> NativeResult<()> {
        self.with_surface(surface, |data| {
            data.color_key = if enabled { Some(key & data.pixel_mask()) } else { None };
        })
    }

    fn alpha_mod(&self, surface: NativeSurface) -> NativeResult<u8> {
        self.with_surface(surface, |data| data.alpha_mod)
    }

    fn set_alpha_mod(&self, surface: NativeSurface, alpha: u8) -> NativeResult<()> {
        self.with_surface(surface, |data| data.alpha_mod = alpha)
    }

    fn blend_mode(&self, surface: NativeSurface) -> NativeResult<BlendMode> {
        self.with_surface(surface, |data| data.blend_mode)
    }

    fn set_blend_mode(&self, surface: NativeSurface, mode: BlendMode) -> NativeResult<()> {
        self.with_surface(surface, |data| data.blend_mode = mode)
    }

    fn color_mod(&self, surface: NativeSurface) -> NativeResult<Rgb> {
        self.with_surface(surface, |data| data.color_mod)
    }

    fn set_color_mod(&self, surface: NativeSurface, color: Rgb) -> NativeResult<()> {
        self.with_surface(surface, |data| data.color_mod = color)
    }

    fn set_rle(&self, surface: NativeSurface, enabled: bool) -> NativeResult<()> {
        self.with_surface(surface, |data| data.rle = enabled)
    }

    fn lock_surface(&self, surface: NativeSurface) -> NativeResult<()> {
        self.with_surface(surface, |data| data.locks += 1)
    }

    fn unlock_surface(&self, surface: NativeSurface) {
        let _ = self.with_surface(surface, |data| data.locks = data.locks.saturating_sub(1));
    }

    fn surface_format(&self, surface: NativeSurface) -> NativeResult<PixelFormat> {
        self.with_surface(surface, |data| data.format)
    }

    fn map_rgb(&self, surface: NativeSurface, r: u8, g: u8, b: u8) -> u32 {
        self.with_surface(surface, |data| map_rgba(&data.format, r, g, b, 255)).unwrap_or(0)
    }

    fn map_rgba(&self, surface: NativeSurface, r: u8, g: u8, b: u8, a: u8) -> u32 {
        self.with_surface(surface, |data| map_rgba(&data.format, r, g, b, a)).unwrap_or(0)
    }
}
