//! Test fixtures: images, pipelines and a canvas that records draws.

use fast_bitmap::{Bitmap, Color, PixelFormat, Rect};
use shotfx::error::RenderError;
use shotfx::models::{AppConfig, StringFormat};
use shotfx::rendering::{encode_png, FontResolver, ResolvedFont, TextCanvas};
use shotfx::services::AnnotationPipeline;

/// A 3x3 image with a black diagonal on white, the classic Scale2x input.
pub fn diagonal_bitmap() -> Bitmap {
    let mut bitmap = Bitmap::filled(3, 3, PixelFormat::Rgb24, Color::WHITE);
    {
        let mut buffer = bitmap.lock(None).expect("lock diagonal");
        for i in 0..3 {
            buffer.set_color_at(i, i, Color::BLACK).expect("set pixel");
        }
    }
    bitmap
}

pub fn diagonal_png() -> Vec<u8> {
    encode_png(&diagonal_bitmap()).expect("encode diagonal")
}

/// Pipeline with an empty font database, so results do not depend on the
/// fonts installed on the test machine.
pub fn pipeline_without_fonts() -> AnnotationPipeline {
    AnnotationPipeline::with_resolver(
        FontResolver::with_fonts(Vec::new(), false),
        &AppConfig::default(),
    )
}

pub fn test_font() -> ResolvedFont {
    ResolvedFont {
        family: "Test Sans".to_string(),
        size: 12.0,
        bold: false,
        italic: false,
    }
}

/// One recorded `draw_string` call.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub text: String,
    pub color: Color,
    pub rect: Rect,
    pub format: StringFormat,
}

/// Canvas that keeps every call instead of painting.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub draws: Vec<DrawCall>,
    pub fills: Vec<(Rect, Color)>,
}

impl TextCanvas for RecordingCanvas {
    fn draw_string(
        &mut self,
        text: &str,
        _font: &ResolvedFont,
        color: Color,
        rect: Rect,
        format: &StringFormat,
    ) -> Result<(), RenderError> {
        self.draws.push(DrawCall {
            text: text.to_string(),
            color,
            rect,
            format: *format,
        });
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), RenderError> {
        self.fills.push((rect, color));
        Ok(())
    }
}
