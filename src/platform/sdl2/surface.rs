// vidbind/src/platform/sdl2/surface.rs
//
//! SDL surfaces.

use crate::backend::{NativeFailure, NativeResult, NativeSurface, SurfaceBackend};
use crate::geom::{Rect, Rgb};
use crate::pixels::{BlendMode, ChannelMasks, PixelFormat, PixelFormatEnum};
use super::device::Device;
use super::{c_string, from_sdl_rect, set_error, to_sdl_rect};

use ::sdl2::sys;
use libc::c_int;
use std::ffi::CString;
use std::path::Path;
use std::ptr;

#[inline]
fn raw(surface: NativeSurface) -> *mut sys::SDL_Surface {
    surface.0 as *mut sys::SDL_Surface
}

#[inline]
fn wrap(surface: *mut sys::SDL_Surface) -> Option<NativeSurface> {
    if surface.is_null() { None } else { Some(NativeSurface(surface as usize)) }
}

#[inline]
fn check(result: c_int) -> NativeResult<()> {
    if result == 0 { Ok(()) } else { Err(NativeFailure) }
}

#[inline]
fn rect_ptr(rect: &Option<sys::SDL_Rect>) -> *const sys::SDL_Rect {
    rect.as_ref().map_or(ptr::null(), |rect| rect as *const _)
}

#[inline]
fn rect_ptr_mut(rect: &mut Option<sys::SDL_Rect>) -> *mut sys::SDL_Rect {
    rect.as_mut().map_or(ptr::null_mut(), |rect| rect as *mut _)
}

fn path_string(path: &Path) -> Option<CString> {
    match path.to_str() {
        Some(path) => c_string(path),
        None => {
            set_error("path is not valid UTF-8");
            None
        }
    }
}

fn blend_mode_to_sdl(mode: BlendMode) -> sys::SDL_BlendMode {
    match mode {
        BlendMode::None => sys::SDL_BlendMode::SDL_BLENDMODE_NONE,
        BlendMode::Blend => sys::SDL_BlendMode::SDL_BLENDMODE_BLEND,
        BlendMode::Add => sys::SDL_BlendMode::SDL_BLENDMODE_ADD,
        BlendMode::Mod => sys::SDL_BlendMode::SDL_BLENDMODE_MOD,
    }
}

impl SurfaceBackend for Device {
    fn create_surface(&self, flags: u32, width: i32, height: i32, depth: i32, masks: ChannelMasks)
                      -> Option<NativeSurface> {
        unsafe {
            wrap(sys::SDL_CreateRGBSurface(flags,
                                           width,
                                           height,
                                           depth,
                                           masks.red,
                                           masks.green,
                                           masks.blue,
                                           masks.alpha))
        }
    }

    fn load_bmp(&self, path: &Path) -> Option<NativeSurface> {
        let path = path_string(path)?;
        unsafe {
            let stream = sys::SDL_RWFromFile(path.as_ptr(), b"rb\0".as_ptr() as *const _);
            if stream.is_null() {
                return None;
            }
            wrap(sys::SDL_LoadBMP_RW(stream, 1))
        }
    }

    fn save_bmp(&self, surface: NativeSurface, path: &Path) -> NativeResult<()> {
        let path = path_string(path).ok_or(NativeFailure)?;
        unsafe {
            let stream = sys::SDL_RWFromFile(path.as_ptr(), b"wb\0".as_ptr() as *const _);
            if stream.is_null() {
                return Err(NativeFailure);
            }
            check(sys::SDL_SaveBMP_RW(raw(surface), stream, 1))
        }
    }

    fn free_surface(&self, surface: NativeSurface) {
        unsafe { sys::SDL_FreeSurface(raw(surface)) }
    }

    fn blit(&self,
            src: NativeSurface,
            src_rect: Option<&Rect>,
            dst: NativeSurface,
            dst_rect: Option<&mut Rect>)
            -> NativeResult<()> {
        let src_rect = src_rect.map(to_sdl_rect);
        let mut sdl_dst_rect = dst_rect.as_ref().map(|rect| to_sdl_rect(rect));
        unsafe {
            check(sys::SDL_UpperBlit(raw(src),
                                     rect_ptr(&src_rect),
                                     raw(dst),
                                     rect_ptr_mut(&mut sdl_dst_rect)))?;
        }
        if let (Some(dst_rect), Some(result)) = (dst_rect, sdl_dst_rect) {
            *dst_rect = from_sdl_rect(&result);
        }
        Ok(())
    }

    fn blit_scaled(&self,
                   src: NativeSurface,
                   src_rect: Option<&Rect>,
                   dst: NativeSurface,
                   dst_rect: Option<&mut Rect>)
                   -> NativeResult<()> {
        let src_rect = src_rect.map(to_sdl_rect);
        let mut sdl_dst_rect = dst_rect.as_ref().map(|rect| to_sdl_rect(rect));
        unsafe {
            check(sys::SDL_UpperBlitScaled(raw(src),
                                           rect_ptr(&src_rect),
                                           raw(dst),
                                           rect_ptr_mut(&mut sdl_dst_rect)))?;
        }
        if let (Some(dst_rect), Some(result)) = (dst_rect, sdl_dst_rect) {
            *dst_rect = from_sdl_rect(&result);
        }
        Ok(())
    }

    fn fill_rect(&self, surface: NativeSurface, rect: Option<&Rect>, color: u32)
                 -> NativeResult<()> {
        let rect = rect.map(to_sdl_rect);
        unsafe {
            check(sys::SDL_FillRect(raw(surface), rect_ptr(&rect), color))
        }
    }

    fn fill_rects(&self, surface: NativeSurface, rects: &[Rect], color: u32) -> NativeResult<()> {
        let rects: Vec<sys::SDL_Rect> = rects.iter().map(to_sdl_rect).collect();
        unsafe {
            check(sys::SDL_FillRects(raw(surface), rects.as_ptr(), rects.len() as c_int, color))
        }
    }

    fn clip_rect(&self, surface: NativeSurface) -> Rect {
        let mut rect = sys::SDL_Rect { x: 0, y: 0, w: 0, h: 0 };
        unsafe {
            sys::SDL_GetClipRect(raw(surface), &mut rect);
        }
        from_sdl_rect(&rect)
    }

    fn set_clip_rect(&self, surface: NativeSurface, rect: Option<&Rect>) -> bool {
        let rect = rect.map(to_sdl_rect);
        unsafe {
            sys::SDL_SetClipRect(raw(surface), rect_ptr(&rect)) == sys::SDL_bool::SDL_TRUE
        }
    }

    fn color_key(&self, surface: NativeSurface) -> NativeResult<u32> {
        let mut key: u32 = 0;
        unsafe {
            check(sys::SDL_GetColorKey(raw(surface), &mut key))?;
        }
        Ok(key)
    }

    fn set_color_key(&self, surface: NativeSurface, enabled: bool, key: u32) -> NativeResult<()> {
        unsafe { check(sys::SDL_SetColorKey(raw(surface), enabled as c_int, key)) }
    }

    fn alpha_mod(&self, surface: NativeSurface) -> NativeResult<u8> {
        let mut alpha: u8 = 0;
        unsafe {
            check(sys::SDL_GetSurfaceAlphaMod(raw(surface), &mut alpha))?;
        }
        Ok(alpha)
    }

    fn set_alpha_mod(&self, surface: NativeSurface, alpha: u8) -> NativeResult<()> {
        unsafe { check(sys::SDL_SetSurfaceAlphaMod(raw(surface), alpha)) }
    }

    fn blend_mode(&self, surface: NativeSurface) -> NativeResult<BlendMode> {
        let mut mode = sys::SDL_BlendMode::SDL_BLENDMODE_NONE;
        unsafe {
            check(sys::SDL_GetSurfaceBlendMode(raw(surface), &mut mode))?;
        }
        match BlendMode::from_raw(mode as u32) {
            Some(mode) => Ok(mode),
            None => {
                set_error("unsupported blend mode");
                Err(NativeFailure)
            }
        }
    }

    fn set_blend_mode(&self, surface: NativeSurface, mode: BlendMode) -> NativeResult<()> {
        unsafe { check(sys::SDL_SetSurfaceBlendMode(raw(surface), blend_mode_to_sdl(mode))) }
    }

    fn color_mod(&self, surface: NativeSurface) -> NativeResult<Rgb> {
        let mut color = Rgb::default();
        unsafe {
            check(sys::SDL_GetSurfaceColorMod(raw(surface),
                                              &mut color.r,
                                              &mut color.g,
                                              &mut color.b))?;
        }
        Ok(color)
    }

    fn set_color_mod(&self, surface: NativeSurface, color: Rgb) -> NativeResult<()> {
        unsafe { check(sys::SDL_SetSurfaceColorMod(raw(surface), color.r, color.g, color.b)) }
    }

    fn set_rle(&self, surface: NativeSurface, enabled: bool) -> NativeResult<()> {
        unsafe { check(sys::SDL_SetSurfaceRLE(raw(surface), enabled as c_int)) }
    }

    fn lock_surface(&self, surface: NativeSurface) -> NativeResult<()> {
        unsafe { check(sys::SDL_LockSurface(raw(surface))) }
    }

    fn unlock_surface(&self, surface: NativeSurface) {
        unsafe { sys::SDL_UnlockSurface(raw(surface)) }
    }

    fn surface_format(&self, surface: NativeSurface) -> NativeResult<PixelFormat> {
        unsafe {
            let format = (*raw(surface)).format;
            if format.is_null() {
                set_error("surface has no pixel format");
                return Err(NativeFailure);
            }
            let format = &*format;
            Ok(PixelFormat {
                format: PixelFormatEnum(format.format),
                bits_per_pixel: format.BitsPerPixel,
                bytes_per_pixel: format.BytesPerPixel,
                masks: ChannelMasks::new(format.Rmask, format.Gmask, format.Bmask, format.Amask),
            })
        }
    }

    fn map_rgb(&self, surface: NativeSurface, r: u8, g: u8, b: u8) -> u32 {
        unsafe { sys::SDL_MapRGB((*raw(surface)).format, r, g, b) }
    }

    fn map_rgba(&self, surface: NativeSurface, r: u8, g: u8, b: u8, a: u8) -> u32 {
        unsafe { sys::SDL_MapRGBA((*raw(surface)).format, r, g, b, a) }
    }
}

