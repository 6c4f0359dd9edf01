//! Drawing layers and compositing them onto straight-alpha bitmaps.
//!
//! Text and fills are rendered onto a transparent premultiplied layer, then
//! blended source-over into the bitmap. Pixels the layer leaves transparent
//! are never rewritten, so the bitmap's own values survive untouched.

use crate::error::RenderError;
use fast_bitmap::{Bitmap, BitmapError, Color};
use tiny_skia::{Pixmap, PremultipliedColorU8};

/// A transparent layer matching `bitmap` in size.
pub fn new_layer(bitmap: &Bitmap) -> Result<Pixmap, RenderError> {
    Pixmap::new(bitmap.width(), bitmap.height()).ok_or(RenderError::PixmapAllocation)
}

/// Blend `layer` over `bitmap` in place. Both must have the same size.
pub fn composite_layer(bitmap: &mut Bitmap, layer: &Pixmap) -> Result<(), RenderError> {
    if (layer.width(), layer.height()) != (bitmap.width(), bitmap.height()) {
        return Err(BitmapError::InvalidInput(format!(
            "layer is {}x{}, bitmap is {}x{}",
            layer.width(),
            layer.height(),
            bitmap.width(),
            bitmap.height()
        ))
        .into());
    }

    let width = layer.width() as usize;
    let mut out = bitmap.lock(None)?;
    for (i, pixel) in layer.pixels().iter().enumerate() {
        if pixel.alpha() == 0 {
            continue;
        }
        let (x, y) = ((i % width) as u32, (i / width) as u32);
        let below = out.get_color_at(x, y)?;
        out.set_color_at(x, y, source_over(*pixel, below))?;
    }
    Ok(())
}

/// Premultiplied `top` over straight-alpha `below`, as straight alpha.
fn source_over(top: PremultipliedColorU8, below: Color) -> Color {
    if top.alpha() == 255 {
        return Color::from_rgb(top.red(), top.green(), top.blue());
    }

    let ta = f32::from(top.alpha()) / 255.0;
    let ba = f32::from(below.a) / 255.0;
    let keep = ba * (1.0 - ta);
    let alpha = ta + keep;
    if alpha <= 0.0 {
        return Color::TRANSPARENT;
    }

    let channel = |t: u8, b: u8| {
        let v = (f32::from(t) + f32::from(b) * keep) / alpha;
        v.round().clamp(0.0, 255.0) as u8
    };
    Color::from_argb(
        (alpha * 255.0).round().clamp(0.0, 255.0) as u8,
        channel(top.red(), below.r),
        channel(top.green(), below.g),
        channel(top.blue(), below.b),
    )
}
