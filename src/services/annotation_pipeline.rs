use fast_bitmap::Bitmap;
use tiny_skia::Transform;

use crate::effects::Effect;
use crate::error::RenderError;
use crate::models::{AnnotationDocument, AppConfig, TextAnnotation, TextStyle};
use crate::rendering::{
    composite_layer, decode_png, encode_png, new_layer, optimize_png, FontResolver, PixmapCanvas,
    TextLayout,
};

/// Pipeline that orchestrates decode → effects → annotations → encode
pub struct AnnotationPipeline {
    fonts: FontResolver,
    defaults: TextStyle,
    optimize_png: bool,
}

impl AnnotationPipeline {
    /// Load fonts as configured and build the pipeline
    pub fn new(config: &AppConfig) -> Self {
        Self::with_resolver(FontResolver::from_config(config), config)
    }

    pub fn with_resolver(fonts: FontResolver, config: &AppConfig) -> Self {
        Self {
            fonts,
            defaults: config.text.clone(),
            optimize_png: config.optimize_png,
        }
    }

    pub fn fonts(&self) -> &FontResolver {
        &self.fonts
    }

    /// Default style for annotations that do not override it
    pub fn defaults(&self) -> &TextStyle {
        &self.defaults
    }

    /// Turn a document's entries into annotations in source image
    /// coordinates, sizing the ones marked `fit` to their text.
    pub fn prepare(&self, document: &AnnotationDocument) -> Result<Vec<TextAnnotation>, RenderError> {
        document
            .annotations
            .iter()
            .map(|spec| {
                let mut annotation = spec.to_annotation(&self.defaults);
                if spec.fit {
                    self.fit_to_text(&mut annotation)?;
                }
                Ok(annotation)
            })
            .collect()
    }

    /// Resize `annotation` to its unwrapped text extent.
    pub fn fit_to_text(&self, annotation: &mut TextAnnotation) -> Result<(), RenderError> {
        let font = self.fonts.resolve(&annotation.style.font_spec())?;
        let layout = TextLayout::new(self.fonts.database());
        let (width, height) = layout.measure_string(&annotation.text, &font, None)?;
        annotation.fit_to_text(width.ceil() as u32, height.ceil() as u32);
        tracing::debug!(rect = ?annotation.rect, "Fitted annotation to text");
        Ok(())
    }

    /// Apply `effects` in order, then draw `annotations` (given in source
    /// coordinates) on the result.
    pub fn process(
        &self,
        bitmap: Bitmap,
        effects: &[Box<dyn Effect>],
        annotations: &[TextAnnotation],
    ) -> Result<Bitmap, RenderError> {
        let mut transform = Transform::identity();
        let mut image = bitmap;
        for effect in effects {
            tracing::debug!(effect = effect.name(), "Applying effect");
            image = effect.apply(&image, Some(&mut transform))?;
        }

        if annotations.is_empty() {
            return Ok(image);
        }

        let mut canvas = PixmapCanvas::new(new_layer(&image)?, self.fonts.database());
        for annotation in annotations {
            let mut placed = annotation.clone();
            placed.transform(&transform);
            let font = if placed.text.is_empty() {
                None
            } else {
                Some(self.fonts.resolve(&placed.style.font_spec())?)
            };
            placed.render(&mut canvas, font.as_ref())?;
        }
        composite_layer(&mut image, canvas.pixmap())?;
        Ok(image)
    }

    /// Decode `png`, run the document, and encode the result
    pub fn render_png(
        &self,
        png: &[u8],
        document: &AnnotationDocument,
    ) -> Result<Vec<u8>, RenderError> {
        let source = decode_png(png)?;
        let effects: Vec<Box<dyn Effect>> = document.effects.iter().map(|k| k.build()).collect();
        let annotations = self.prepare(document)?;

        let result = self.process(source, &effects, &annotations)?;
        let encoded = encode_png(&result)?;

        tracing::info!(
            width = result.width(),
            height = result.height(),
            effects = effects.len(),
            annotations = annotations.len(),
            "Rendered image"
        );

        Ok(if self.optimize_png {
            optimize_png(encoded)
        } else {
            encoded
        })
    }
}
