//! Whole-image effects.
//!
//! An effect produces a new bitmap and keeps an optional transform in step
//! with what it did to the geometry, so anything positioned on the image
//! (annotations) can follow without knowing which effects ran.

use crate::error::RenderError;
use fast_bitmap::Bitmap;
use serde::Deserialize;
use tiny_skia::Transform;

pub trait Effect: Send + Sync {
    fn name(&self) -> &'static str;

    /// Produce the processed image. When `transform` is given it is updated
    /// to map source coordinates to result coordinates.
    fn apply(
        &self,
        source: &Bitmap,
        transform: Option<&mut Transform>,
    ) -> Result<Bitmap, RenderError>;

    /// Restore default settings.
    fn reset(&mut self) {}
}

/// Edge-preserving 2x magnification.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scale2xEffect;

impl Effect for Scale2xEffect {
    fn name(&self) -> &'static str {
        "scale2x"
    }

    fn apply(
        &self,
        source: &Bitmap,
        transform: Option<&mut Transform>,
    ) -> Result<Bitmap, RenderError> {
        let scaled = fast_bitmap::scale2x(source)?;
        if let Some(transform) = transform {
            *transform = transform.post_scale(2.0, 2.0);
        }
        tracing::debug!(
            width = scaled.width(),
            height = scaled.height(),
            "Applied scale2x"
        );
        Ok(scaled)
    }
}

/// Effect names accepted in annotation documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    Scale2x,
}

impl EffectKind {
    pub fn build(self) -> Box<dyn Effect> {
        match self {
            EffectKind::Scale2x => Box::new(Scale2xEffect),
        }
    }
}
