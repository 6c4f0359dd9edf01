//! Scale2x (AdvMAME2x) edge-preserving 2x magnification.
//!
//! Each source pixel `E` becomes a 2x2 block chosen from `E` and its four
//! direct neighbors:
//!
//! ```text
//!     A          E0 E1
//!   C E B  -->   E2 E3
//!     D
//! ```
//!
//! A corner takes a neighbor's color only when the two neighbors touching
//! that corner agree and the opposite pair disagrees, which extends diagonal
//! edges instead of producing the staircase of nearest-neighbor scaling.
//! Neighbors beyond the image border repeat the border pixel (edge clamp).
//!
//! Every source row writes exactly two output rows and reads nothing but
//! the source, so rows are processed independently (in parallel with the
//! `parallel` feature).

use crate::bitmap::Bitmap;
use crate::buffer::{PixelBuffer, PixelView};
use crate::color::Color;
use crate::error::BitmapError;
use crate::format::PixelFormat;

/// Compute the 2x2 output block for center `e` with neighbors
/// `a` (north), `b` (east), `c` (west) and `d` (south).
///
/// Returns `[top_left, top_right, bottom_left, bottom_right]`.
#[inline]
pub fn expand_pixel(e: Color, a: Color, b: Color, c: Color, d: Color) -> [Color; 4] {
    let e0 = if c == a && c != d && a != b { a } else { e };
    let e1 = if a == b && a != c && b != d { b } else { e };
    let e2 = if d == c && d != b && c != a { c } else { e };
    let e3 = if b == d && b != a && d != c { d } else { e };
    [e0, e1, e2, e3]
}

/// Magnify `source` to exactly twice its width and height.
///
/// The result uses the source's pixel format. Fails with
/// [`BitmapError::InvalidInput`] for an empty source.
///
/// ```
/// use fast_bitmap::{scale2x, Bitmap, Color, PixelFormat};
///
/// let source = Bitmap::filled(3, 2, PixelFormat::Rgb24, Color::WHITE);
/// let scaled = scale2x(&source).unwrap();
/// assert_eq!((scaled.width(), scaled.height()), (6, 4));
/// ```
pub fn scale2x(source: &Bitmap) -> Result<Bitmap, BitmapError> {
    scale2x_view(&source.view(None)?)
}

/// Magnify a locked (possibly partial) area into a new bitmap.
pub fn scale2x_view(source: &PixelView<'_>) -> Result<Bitmap, BitmapError> {
    let (width, height) = (source.width(), source.height());
    if width == 0 || height == 0 {
        return Err(BitmapError::InvalidInput(format!(
            "cannot scale a {}x{} image",
            width, height
        )));
    }
    let (out_width, out_height) = match (width.checked_mul(2), height.checked_mul(2)) {
        (Some(w), Some(h)) => (w, h),
        _ => {
            return Err(BitmapError::InvalidInput(format!(
                "{}x{} is too large to double",
                width, height
            )))
        }
    };

    let format = source.format();
    let mut target = Bitmap::new(out_width, out_height, format);
    let stride = target.stride();
    let band = stride * 2;
    let data = target.data_mut();

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        data.par_chunks_mut(band)
            .enumerate()
            .try_for_each(|(y, rows)| {
                scale_row(source, y as u32, rows, out_width, stride, format)
            })?;
    }
    #[cfg(not(feature = "parallel"))]
    {
        data.chunks_mut(band)
            .enumerate()
            .try_for_each(|(y, rows)| {
                scale_row(source, y as u32, rows, out_width, stride, format)
            })?;
    }

    Ok(target)
}

/// Expand source row `y` into the two output rows held by `rows`.
fn scale_row(
    source: &PixelView<'_>,
    y: u32,
    rows: &mut [u8],
    out_width: u32,
    stride: usize,
    format: PixelFormat,
) -> Result<(), BitmapError> {
    let mut out = PixelBuffer::from_raw(rows, out_width, 2, stride, format)?;

    let last_x = source.width() - 1;
    let up = y.saturating_sub(1);
    let down = (y + 1).min(source.height() - 1);

    for x in 0..source.width() {
        let e = source.get_color_at(x, y)?;
        let a = source.get_color_at(x, up)?;
        let b = source.get_color_at((x + 1).min(last_x), y)?;
        let c = source.get_color_at(x.saturating_sub(1), y)?;
        let d = source.get_color_at(x, down)?;

        let [e0, e1, e2, e3] = expand_pixel(e, a, b, c, d);
        let ox = x * 2;
        out.set_color_at(ox, 0, e0)?;
        out.set_color_at(ox + 1, 0, e1)?;
        out.set_color_at(ox, 1, e2)?;
        out.set_color_at(ox + 1, 1, e3)?;
    }
    Ok(())
}
