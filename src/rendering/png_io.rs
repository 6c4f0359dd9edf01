//! PNG decoding into bitmaps and encoding back out.

use crate::error::RenderError;
use fast_bitmap::{Bitmap, PixelFormat};
use std::io::Cursor;

/// Decode a PNG of any bit depth and color type into an 8-bit RGB or RGBA
/// bitmap. Gray images are expanded to RGB.
pub fn decode_png(data: &[u8]) -> Result<Bitmap, RenderError> {
    let mut decoder = png::Decoder::new(Cursor::new(data));
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| RenderError::PngDecode(e.to_string()))?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| RenderError::PngDecode(e.to_string()))?;
    buf.truncate(info.buffer_size());

    let (width, height, line_size) = (info.width, info.height, info.line_size);
    let bitmap = match (info.color_type, info.bit_depth) {
        (png::ColorType::Rgb, png::BitDepth::Eight) => {
            Bitmap::from_raw(width, height, line_size, PixelFormat::Rgb24, buf)?
        }
        (png::ColorType::Rgba, png::BitDepth::Eight) => {
            Bitmap::from_raw(width, height, line_size, PixelFormat::Rgba32, buf)?
        }
        (png::ColorType::Grayscale, png::BitDepth::Eight) => {
            let rgb = buf.iter().flat_map(|&v| [v, v, v]).collect();
            Bitmap::from_raw(width, height, line_size * 3, PixelFormat::Rgb24, rgb)?
        }
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Eight) => {
            let rgba = buf
                .chunks_exact(2)
                .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
                .collect();
            Bitmap::from_raw(width, height, line_size * 2, PixelFormat::Rgba32, rgba)?
        }
        (color_type, bit_depth) => {
            return Err(RenderError::UnsupportedPng {
                color_type,
                bit_depth,
            })
        }
    };

    tracing::debug!(width, height, format = %bitmap.format(), "Decoded PNG");
    Ok(bitmap)
}

/// Encode as 8-bit RGBA when the bitmap carries alpha, RGB otherwise.
pub fn encode_png(bitmap: &Bitmap) -> Result<Vec<u8>, RenderError> {
    let (format, color_type) = if bitmap.format().has_alpha() {
        (PixelFormat::Rgba32, png::ColorType::Rgba)
    } else {
        (PixelFormat::Rgb24, png::ColorType::Rgb)
    };
    let bitmap = bitmap.convert(format)?;

    // PNG rows are tightly packed; drop the row padding.
    let row_bytes = format.min_stride(bitmap.width());
    let mut packed = Vec::with_capacity(row_bytes * bitmap.height() as usize);
    if row_bytes > 0 {
        for row in bitmap.data().chunks(bitmap.stride()).take(bitmap.height() as usize) {
            packed.extend_from_slice(&row[..row_bytes]);
        }
    }

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, bitmap.width(), bitmap.height());
        encoder.set_color(color_type);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(&packed)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Re-compress with oxipng (zopfli + adaptive filter selection). Returns the
/// input unchanged if optimization fails.
pub fn optimize_png(png_bytes: Vec<u8>) -> Vec<u8> {
    let options = oxipng::Options {
        strip: oxipng::StripChunks::Safe,
        optimize_alpha: false,
        ..Default::default()
    };
    match oxipng::optimize_from_memory(&png_bytes, &options) {
        Ok(optimized) => {
            tracing::debug!(
                before = png_bytes.len(),
                after = optimized.len(),
                "Optimized PNG"
            );
            optimized
        }
        Err(e) => {
            tracing::warn!(%e, "PNG optimization failed, keeping original");
            png_bytes
        }
    }
}
