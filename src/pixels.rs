// vidbind/src/pixels.rs
//
//! Pixel format descriptions and blending modes.

use std::fmt::{self, Debug, Formatter};

/// A packed native pixel format identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelFormatEnum(pub u32);

impl PixelFormatEnum {
    pub const UNKNOWN: PixelFormatEnum = PixelFormatEnum(0);
    pub const INDEX8: PixelFormatEnum = PixelFormatEnum(0x1300_0801);
    pub const RGB555: PixelFormatEnum = PixelFormatEnum(0x1513_0f02);
    pub const RGB565: PixelFormatEnum = PixelFormatEnum(0x1515_1002);
    pub const RGB24: PixelFormatEnum = PixelFormatEnum(0x1710_1803);
    pub const BGR24: PixelFormatEnum = PixelFormatEnum(0x1740_1803);
    pub const RGB888: PixelFormatEnum = PixelFormatEnum(0x1616_1804);
    pub const BGR888: PixelFormatEnum = PixelFormatEnum(0x1656_1804);
    pub const ARGB8888: PixelFormatEnum = PixelFormatEnum(0x1636_2004);
    pub const RGBA8888: PixelFormatEnum = PixelFormatEnum(0x1646_2004);
    pub const ABGR8888: PixelFormatEnum = PixelFormatEnum(0x1676_2004);

    pub fn name(self) -> Option<&'static str> {
        Some(match self {
            PixelFormatEnum::UNKNOWN => "UNKNOWN",
            PixelFormatEnum::INDEX8 => "INDEX8",
            PixelFormatEnum::RGB555 => "RGB555",
            PixelFormatEnum::RGB565 => "RGB565",
            PixelFormatEnum::RGB24 => "RGB24",
            PixelFormatEnum::BGR24 => "BGR24",
            PixelFormatEnum::RGB888 => "RGB888",
            PixelFormatEnum::BGR888 => "BGR888",
            PixelFormatEnum::ARGB8888 => "ARGB8888",
            PixelFormatEnum::RGBA8888 => "RGBA8888",
            PixelFormatEnum::ABGR8888 => "ABGR8888",
            _ => return None,
        })
    }
}

impl Debug for PixelFormatEnum {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "PixelFormatEnum::{}", name),
            None => write!(f, "PixelFormatEnum({:#010x})", self.0),
        }
    }
}

/// The per-channel bit masks of a packed pixel.
///
/// All-zero masks ask the native library to pick a default layout for the requested depth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChannelMasks {
    pub red: u32,
    pub green: u32,
    pub blue: u32,
    pub alpha: u32,
}

impl ChannelMasks {
    #[inline]
    pub const fn new(red: u32, green: u32, blue: u32, alpha: u32) -> ChannelMasks {
        ChannelMasks { red, green, blue, alpha }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        *self == ChannelMasks::default()
    }
}

/// How color and alpha channels are packed into a surface's pixel storage.
///
/// This is a by-value copy of the native description, taken once per surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelFormat {
    pub format: PixelFormatEnum,
    pub bits_per_pixel: u8,
    pub bytes_per_pixel: u8,
    pub masks: ChannelMasks,
}

impl PixelFormat {
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.masks.alpha != 0
    }
}

/// The blend mode used for blit operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// No blending: `dstRGBA = srcRGBA`.
    None,
    /// Alpha blending: `dstRGB = srcRGB * srcA + dstRGB * (1 - srcA)`.
    Blend,
    /// Additive blending: `dstRGB = srcRGB * srcA + dstRGB`.
    Add,
    /// Color modulation: `dstRGB = srcRGB * dstRGB`.
    Mod,
}

impl BlendMode {
    /// The native enumerant.
    pub fn to_raw(self) -> u32 {
        match self {
            BlendMode::None => 0x0000_0000,
            BlendMode::Blend => 0x0000_0001,
            BlendMode::Add => 0x0000_0002,
            BlendMode::Mod => 0x0000_0004,
        }
    }

    pub fn from_raw(raw: u32) -> Option<BlendMode> {
        match raw {
            0x0000_0000 => Some(BlendMode::None),
            0x0000_0001 => Some(BlendMode::Blend),
            0x0000_0002 => Some(BlendMode::Add),
            0x0000_0004 => Some(BlendMode::Mod),
            _ => None,
        }
    }
}
