use crate::effects::EffectKind;
use crate::error::RenderError;
use crate::models::text_style::{TextStyle, TextStyleOverrides};
use crate::rendering::{draw_text, ResolvedFont, TextCanvas};
use fast_bitmap::Rect;
use serde::Deserialize;
use std::path::Path;
use tiny_skia::Transform;

/// A block of text placed in a rectangle of the image.
#[derive(Debug, Clone, PartialEq)]
pub struct TextAnnotation {
    pub rect: Rect,
    pub text: String,
    pub style: TextStyle,
}

impl TextAnnotation {
    pub fn new(rect: Rect, text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            rect,
            text: text.into(),
            style,
        }
    }

    /// Move the annotation through `matrix`, scaling the font size by the
    /// ratio of the rectangle's area after and before the transform.
    pub fn transform(&mut self, matrix: &Transform) {
        let before = self.rect.normalized();
        let pixels_before = before.width as i64 * before.height as i64;

        let (left, top) = map_point(matrix, self.rect.x, self.rect.y);
        let (right, bottom) = map_point(matrix, self.rect.right(), self.rect.bottom());
        self.rect = Rect::new(
            left,
            top,
            right.saturating_sub(left),
            bottom.saturating_sub(top),
        );

        let after = self.rect.normalized();
        let pixels_after = after.width as i64 * after.height as i64;
        if pixels_before > 0 {
            let factor = pixels_after as f32 / pixels_before as f32;
            self.style.font_size *= factor;
        }
    }

    /// Resize the rectangle to hold measured text of `text_width` x
    /// `text_height` plus the border.
    pub fn fit_to_text(&mut self, text_width: u32, text_height: u32) {
        let thickness = self.style.line_thickness;
        let extent = |v: u32| i32::try_from(v).unwrap_or(i32::MAX).saturating_add(thickness);
        self.rect.width = extent(text_width);
        self.rect.height = extent(text_height);
    }

    /// Paint the background fill (if any) and the text.
    pub fn render<C: TextCanvas + ?Sized>(
        &self,
        canvas: &mut C,
        font: Option<&ResolvedFont>,
    ) -> Result<(), RenderError> {
        let rect = self.rect.normalized();
        if !self.style.fill_color.is_transparent() {
            canvas.fill_rect(rect, self.style.fill_color)?;
        }
        draw_text(
            canvas,
            rect,
            self.style.line_thickness,
            self.style.line_color,
            self.style.draws_shadow(),
            &self.style.string_format(),
            &self.text,
            font,
        )
    }
}

fn map_point(matrix: &Transform, x: i32, y: i32) -> (i32, i32) {
    let (x, y) = (x as f32, y as f32);
    let mx = matrix.sx * x + matrix.kx * y + matrix.tx;
    let my = matrix.ky * x + matrix.sy * y + matrix.ty;
    (mx.round() as i32, my.round() as i32)
}

/// One annotation entry of an [`AnnotationDocument`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnnotationSpec {
    pub text: String,
    /// `[x, y, width, height]` in source image pixels.
    pub rect: [i32; 4],
    /// Size the rectangle to the text before drawing.
    #[serde(default)]
    pub fit: bool,
    #[serde(flatten)]
    pub style: TextStyleOverrides,
}

impl AnnotationSpec {
    pub fn to_annotation(&self, defaults: &TextStyle) -> TextAnnotation {
        let [x, y, width, height] = self.rect;
        TextAnnotation::new(
            Rect::new(x, y, width, height),
            self.text.clone(),
            self.style.apply(defaults),
        )
    }
}

/// Effects and annotations to apply to one image, read from YAML:
///
/// ```yaml
/// effects: [scale2x]
/// annotations:
///   - text: "Click here"
///     rect: [10, 10, 120, 30]
///     line_color: "#0000FF"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnnotationDocument {
    #[serde(default)]
    pub effects: Vec<EffectKind>,
    #[serde(default)]
    pub annotations: Vec<AnnotationSpec>,
}

impl AnnotationDocument {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, RenderError> {
        serde_yaml::from_str(yaml).map_err(|e| RenderError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, RenderError> {
        let content = std::fs::read_to_string(path)?;
        let document = Self::from_yaml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            effects = document.effects.len(),
            annotations = document.annotations.len(),
            "Loaded annotation document"
        );
        Ok(document)
    }
}
