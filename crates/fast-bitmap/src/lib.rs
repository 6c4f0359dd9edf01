//! fast-bitmap: direct, stride-aware pixel access and Scale2x upscaling
//!
//! This crate is the pixel-level core used by shotfx. It has two parts:
//!
//! - **Pixel access**: [`Bitmap`] owns row-major pixel memory in one of the
//!   [`PixelFormat`] layouts. Locking a bitmap (or any foreign byte buffer)
//!   yields a [`PixelBuffer`] / [`PixelView`] that reads and writes single
//!   pixels by `(x, y)` with the format's channel-offset table.
//! - **Scale2x**: [`scale2x`] doubles an image while keeping diagonal edges
//!   sharp.
//!
//! # Quick Start
//!
//! ```
//! use fast_bitmap::{scale2x, Bitmap, Color, PixelFormat};
//!
//! let mut bitmap = Bitmap::new(2, 2, PixelFormat::Bgra32);
//! {
//!     let mut pixels = bitmap.lock(None).unwrap();
//!     pixels.set_color_at(0, 0, Color::RED).unwrap();
//! }
//!
//! let scaled = scale2x(&bitmap).unwrap();
//! assert_eq!(scaled.width(), 4);
//! assert_eq!(scaled.view(None).unwrap().get_color_at(0, 0).unwrap(), Color::RED);
//! ```
//!
//! # Addressing
//!
//! A pixel lives at `origin + x * bytes_per_pixel + y * stride`. `stride`
//! may exceed `width * bytes_per_pixel` when rows are padded, and `origin`
//! is non-zero when only a sub-rectangle is locked. Coordinates are always
//! bounds checked; an access outside the locked rectangle returns
//! [`BitmapError::OutOfBounds`] instead of touching memory.
//!
//! # Locking
//!
//! Locks are borrows. [`Bitmap::lock`] takes `&mut self`, so at most one
//! writer exists and no reader can overlap it; the lock ends when the
//! returned buffer is dropped, including on early returns and `?`
//! propagation.
//!
//! Formats without alpha report alpha 255 on every read and never write
//! alpha. Use [`Bitmap::lock_as`] to insist on a particular layout.

mod bitmap;
mod buffer;
mod color;
mod error;
mod format;
mod geometry;
mod scale2x;

#[cfg(test)]
mod domain_tests;

pub use bitmap::Bitmap;
pub use buffer::{PixelBuffer, PixelView};
pub use color::Color;
pub use error::{BitmapError, ParseColorError};
pub use format::{
    ChannelOffsets, FormatInfo, PixelFormat, COLOR_INDEX_A, COLOR_INDEX_B, COLOR_INDEX_G,
    COLOR_INDEX_R,
};
pub use geometry::Rect;
pub use scale2x::{expand_pixel, scale2x, scale2x_view};
