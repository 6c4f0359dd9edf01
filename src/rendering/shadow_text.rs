//! Text with a soft drop shadow.
//!
//! The shadow is the text itself drawn [`SHADOW_STEPS`] times in gray, each
//! copy one pixel further down and right and fainter than the last. The
//! foreground is drawn last so it sits on top. Passes composite over each
//! other and must run in order.

use crate::error::RenderError;
use crate::models::StringFormat;
use crate::rendering::font::ResolvedFont;
use crate::rendering::text_canvas::TextCanvas;
use fast_bitmap::{Color, Rect};

pub const SHADOW_STEPS: i32 = 5;
pub const SHADOW_BASE_ALPHA: i32 = 100;
pub const SHADOW_GRAY: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    Shadow { step: i32 },
    Foreground,
}

/// One text draw: where and in which color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawPass {
    pub kind: PassKind,
    pub rect: Rect,
    pub color: Color,
}

/// Inset applied to the text rectangle for a border of `line_thickness`:
/// half the thickness, rounded up.
pub fn text_offset(line_thickness: i32) -> i32 {
    if line_thickness > 0 {
        line_thickness / 2 + line_thickness % 2
    } else {
        0
    }
}

/// The ordered draws for one text block: shadow passes (when requested)
/// followed by the foreground.
pub fn plan_passes(
    rect: Rect,
    line_thickness: i32,
    color: Color,
    draw_shadow: bool,
) -> Vec<DrawPass> {
    let inset = text_offset(line_thickness);
    let mut passes = Vec::with_capacity(SHADOW_STEPS as usize + 1);

    if draw_shadow {
        let decrement = SHADOW_BASE_ALPHA / SHADOW_STEPS;
        let mut alpha = SHADOW_BASE_ALPHA;
        for step in 1..=SHADOW_STEPS {
            let shadow_rect = rect
                .offset(step, step)
                .normalized()
                .inflate(-inset, -inset);
            passes.push(DrawPass {
                kind: PassKind::Shadow { step },
                rect: shadow_rect,
                color: Color::from_argb(alpha as u8, SHADOW_GRAY, SHADOW_GRAY, SHADOW_GRAY),
            });
            alpha -= decrement;
        }
    }

    passes.push(DrawPass {
        kind: PassKind::Foreground,
        rect: rect.inflate(-inset, -inset),
        color,
    });
    passes
}

/// Draw `text` into `rect` on `canvas`, with the drop shadow when
/// `draw_shadow` is set.
///
/// Empty text draws nothing and succeeds. Without a font nothing is drawn
/// and [`RenderError::FontUnavailable`] is returned, so callers decide
/// whether a missing font is fatal.
#[allow(clippy::too_many_arguments)]
pub fn draw_text<C: TextCanvas + ?Sized>(
    canvas: &mut C,
    rect: Rect,
    line_thickness: i32,
    color: Color,
    draw_shadow: bool,
    format: &StringFormat,
    text: &str,
    font: Option<&ResolvedFont>,
) -> Result<(), RenderError> {
    if text.is_empty() {
        return Ok(());
    }
    let font = font.ok_or(RenderError::FontUnavailable)?;

    for pass in plan_passes(rect, line_thickness, color, draw_shadow) {
        canvas.draw_string(text, font, pass.color, pass.rect, format)?;
    }
    Ok(())
}
