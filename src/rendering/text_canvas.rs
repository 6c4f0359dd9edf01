//! Drawing surfaces for text and the layout rules they share.
//!
//! [`PixmapCanvas`] lays text out itself (line breaking, alignment) and hands
//! each line to resvg as an SVG `<text>` element, so shaping, glyph lookup
//! and antialiasing come from the same stack as the rest of the rendering.

use crate::error::RenderError;
use crate::models::{StringAlignment, StringFormat};
use crate::rendering::font::ResolvedFont;
use fast_bitmap::{Color, Rect};
use resvg::usvg;
use std::sync::Arc;
use tiny_skia::{Paint, Pixmap, Transform};

/// Line advance as a multiple of the font size.
pub const LINE_SPACING: f32 = 1.2;

/// Distance from the top of a line box to its baseline, in font sizes.
const BASELINE_RATIO: f32 = 0.95;

/// A surface that supports alpha-blended text and rectangle fills.
pub trait TextCanvas {
    /// Draw `text` inside `rect`, wrapped to its width, aligned by `format`
    /// and clipped to the rectangle. `color.a` is the opacity.
    fn draw_string(
        &mut self,
        text: &str,
        font: &ResolvedFont,
        color: Color,
        rect: Rect,
        format: &StringFormat,
    ) -> Result<(), RenderError>;

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), RenderError>;
}

pub fn line_height(font: &ResolvedFont) -> f32 {
    font.size * LINE_SPACING
}

/// Measures and breaks text using the glyph outlines usvg produces.
#[derive(Clone)]
pub struct TextLayout {
    fontdb: Arc<fontdb::Database>,
}

impl TextLayout {
    pub fn new(fontdb: Arc<fontdb::Database>) -> Self {
        Self { fontdb }
    }

    fn options(&self) -> usvg::Options<'static> {
        usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        }
    }

    /// Ink width of a single line.
    pub fn measure_line(&self, line: &str, font: &ResolvedFont) -> Result<f32, RenderError> {
        if line.trim().is_empty() {
            return Ok(0.0);
        }
        let svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1">{}</svg>"#,
            text_element(line, 0.0, font.size, font, Color::BLACK, "start")
        );
        let tree = usvg::Tree::from_str(&svg, &self.options())
            .map_err(|e| RenderError::SvgParse(e.to_string()))?;
        if !tree.root().has_children() {
            return Ok(0.0);
        }
        Ok(tree.root().bounding_box().width())
    }

    /// Split `text` into lines: hard breaks at `\n`, then greedy word
    /// wrapping when `max_width` is given. A word wider than `max_width`
    /// gets a line of its own.
    pub fn wrap(
        &self,
        text: &str,
        font: &ResolvedFont,
        max_width: Option<f32>,
    ) -> Result<Vec<String>, RenderError> {
        let mut lines = Vec::new();
        for paragraph in text.split('\n').map(|p| p.trim_end_matches('\r')) {
            let Some(max_width) = max_width else {
                lines.push(paragraph.to_string());
                continue;
            };
            let mut current = String::new();
            for word in paragraph.split_whitespace() {
                if current.is_empty() {
                    current.push_str(word);
                    continue;
                }
                let candidate = format!("{} {}", current, word);
                if self.measure_line(&candidate, font)? <= max_width {
                    current = candidate;
                } else {
                    lines.push(std::mem::replace(&mut current, word.to_string()));
                }
            }
            lines.push(current);
        }
        Ok(lines)
    }

    /// Width and height of the laid out text.
    pub fn measure_string(
        &self,
        text: &str,
        font: &ResolvedFont,
        max_width: Option<f32>,
    ) -> Result<(f32, f32), RenderError> {
        let lines = self.wrap(text, font, max_width)?;
        let mut width = 0.0f32;
        for line in &lines {
            width = width.max(self.measure_line(line, font)?);
        }
        Ok((width, lines.len() as f32 * line_height(font)))
    }
}

/// A [`TextCanvas`] backed by a tiny-skia pixmap.
pub struct PixmapCanvas {
    pixmap: Pixmap,
    layout: TextLayout,
}

impl PixmapCanvas {
    pub fn new(pixmap: Pixmap, fontdb: Arc<fontdb::Database>) -> Self {
        Self {
            pixmap,
            layout: TextLayout::new(fontdb),
        }
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    pub fn layout(&self) -> &TextLayout {
        &self.layout
    }

    /// Rasterize an SVG fragment in pixmap coordinates over the current
    /// content.
    fn render_fragment(&mut self, body: &str) -> Result<(), RenderError> {
        let (width, height) = (self.pixmap.width(), self.pixmap.height());
        let svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">{body}</svg>"#,
            w = width,
            h = height,
            body = body
        );
        let tree = usvg::Tree::from_str(&svg, &self.layout.options())
            .map_err(|e| RenderError::SvgParse(e.to_string()))?;
        resvg::render(&tree, Transform::identity(), &mut self.pixmap.as_mut());
        Ok(())
    }
}

impl TextCanvas for PixmapCanvas {
    fn draw_string(
        &mut self,
        text: &str,
        font: &ResolvedFont,
        color: Color,
        rect: Rect,
        format: &StringFormat,
    ) -> Result<(), RenderError> {
        let rect = rect.normalized();
        if text.is_empty() || rect.is_empty() || color.is_transparent() {
            return Ok(());
        }

        let lines = self.layout.wrap(text, font, Some(rect.width as f32))?;
        let advance = line_height(font);
        let total = advance * lines.len() as f32;
        let top = match format.line_alignment {
            StringAlignment::Near => rect.y as f32,
            StringAlignment::Center => rect.y as f32 + (rect.height as f32 - total) / 2.0,
            StringAlignment::Far => rect.bottom() as f32 - total,
        };
        let (x, anchor) = match format.alignment {
            StringAlignment::Near => (rect.x as f32, "start"),
            StringAlignment::Center => (rect.x as f32 + rect.width as f32 / 2.0, "middle"),
            StringAlignment::Far => (rect.right() as f32, "end"),
        };

        let mut body = format!(
            r#"<defs><clipPath id="layout"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath></defs><g clip-path="url(#layout)">"#,
            rect.x, rect.y, rect.width, rect.height
        );
        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let baseline = top + i as f32 * advance + font.size * BASELINE_RATIO;
            body.push_str(&text_element(line, x, baseline, font, color, anchor));
        }
        body.push_str("</g>");

        tracing::debug!(
            lines = lines.len(),
            family = %font.family,
            size = font.size,
            alpha = color.a,
            "Drawing text"
        );
        self.render_fragment(&body)
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), RenderError> {
        let rect = rect.normalized();
        if color.is_transparent() {
            return Ok(());
        }
        let Some(area) = tiny_skia::Rect::from_xywh(
            rect.x as f32,
            rect.y as f32,
            rect.width as f32,
            rect.height as f32,
        ) else {
            return Ok(());
        };
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.anti_alias = false;
        self.pixmap
            .fill_rect(area, &paint, Transform::identity(), None);
        Ok(())
    }
}

fn text_element(
    line: &str,
    x: f32,
    y: f32,
    font: &ResolvedFont,
    color: Color,
    anchor: &str,
) -> String {
    format!(
        r#"<text x="{x}" y="{y}" font-family="'{family}'" font-size="{size}" font-weight="{weight}" font-style="{style}" fill="rgb({r},{g},{b})" fill-opacity="{opacity}" text-anchor="{anchor}" xml:space="preserve">{text}</text>"#,
        x = x,
        y = y,
        family = xml_escape(&font.family),
        size = font.size,
        weight = font.weight(),
        style = font.style(),
        r = color.r,
        g = color.g,
        b = color.b,
        opacity = color.a as f32 / 255.0,
        anchor = anchor,
        text = xml_escape(line),
    )
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
