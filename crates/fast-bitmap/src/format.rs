//! Pixel layouts and their channel-offset tables.
//!
//! Every supported layout is a variant of [`PixelFormat`]. Each variant maps
//! to a static [`FormatInfo`] entry carrying its byte width and the byte
//! position of each color channel inside one pixel. Accessors look the entry
//! up once when a buffer is locked and never dispatch per pixel.

use std::fmt;

/// Index of the red channel in byte-array color representations.
pub const COLOR_INDEX_R: usize = 0;
/// Index of the green channel in byte-array color representations.
pub const COLOR_INDEX_G: usize = 1;
/// Index of the blue channel in byte-array color representations.
pub const COLOR_INDEX_B: usize = 2;
/// Index of the alpha channel in byte-array color representations.
pub const COLOR_INDEX_A: usize = 3;

/// Byte position of each channel inside a single pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelOffsets {
    pub r: usize,
    pub g: usize,
    pub b: usize,
    /// `None` for layouts without an alpha channel
    pub a: Option<usize>,
}

/// Static description of a pixel layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    pub bytes_per_pixel: usize,
    pub offsets: ChannelOffsets,
}

const RGB24: FormatInfo = FormatInfo {
    bytes_per_pixel: 3,
    offsets: ChannelOffsets {
        r: 0,
        g: 1,
        b: 2,
        a: None,
    },
};

const BGR24: FormatInfo = FormatInfo {
    bytes_per_pixel: 3,
    offsets: ChannelOffsets {
        r: 2,
        g: 1,
        b: 0,
        a: None,
    },
};

// Fourth byte is padding and is never read or written.
const BGRX32: FormatInfo = FormatInfo {
    bytes_per_pixel: 4,
    offsets: ChannelOffsets {
        r: 2,
        g: 1,
        b: 0,
        a: None,
    },
};

const RGBA32: FormatInfo = FormatInfo {
    bytes_per_pixel: 4,
    offsets: ChannelOffsets {
        r: 0,
        g: 1,
        b: 2,
        a: Some(3),
    },
};

const BGRA32: FormatInfo = FormatInfo {
    bytes_per_pixel: 4,
    offsets: ChannelOffsets {
        r: 2,
        g: 1,
        b: 0,
        a: Some(3),
    },
};

/// Supported in-memory pixel layouts.
///
/// The names list channels in memory order, lowest address first.
/// `Bgrx32` and `Bgra32` are the little-endian layouts commonly called
/// "32bpp RGB" and "32bpp ARGB" by desktop imaging APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 3 bytes per pixel, R G B, opaque
    Rgb24,
    /// 3 bytes per pixel, B G R, opaque
    Bgr24,
    /// 4 bytes per pixel, B G R X, opaque (X unused)
    Bgrx32,
    /// 4 bytes per pixel, R G B A, straight alpha
    Rgba32,
    /// 4 bytes per pixel, B G R A, straight alpha
    Bgra32,
}

impl PixelFormat {
    /// Static layout table entry for this format.
    #[inline]
    pub const fn info(self) -> &'static FormatInfo {
        match self {
            PixelFormat::Rgb24 => &RGB24,
            PixelFormat::Bgr24 => &BGR24,
            PixelFormat::Bgrx32 => &BGRX32,
            PixelFormat::Rgba32 => &RGBA32,
            PixelFormat::Bgra32 => &BGRA32,
        }
    }

    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        self.info().bytes_per_pixel
    }

    #[inline]
    pub const fn channel_offsets(self) -> ChannelOffsets {
        self.info().offsets
    }

    #[inline]
    pub const fn has_alpha(self) -> bool {
        self.info().offsets.a.is_some()
    }

    /// Smallest stride that holds one row of `width` pixels.
    #[inline]
    pub const fn min_stride(self, width: u32) -> usize {
        width as usize * self.bytes_per_pixel()
    }

    /// Row stride padded up to a 4-byte boundary.
    #[inline]
    pub const fn aligned_stride(self, width: u32) -> usize {
        (self.min_stride(width) + 3) & !3
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
