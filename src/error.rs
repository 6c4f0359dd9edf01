use fast_bitmap::{BitmapError, ParseColorError};
use thiserror::Error;

/// A font could be created neither with the requested family nor with the
/// generic sans-serif fallback. Carries the parameters that were asked for.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Font '{family}' (bold: {bold}, italic: {italic}, size: {size}) unavailable: {reason}")]
pub struct FontResolutionError {
    pub family: String,
    pub bold: bool,
    pub italic: bool,
    pub size: f32,
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Bitmap error: {0}")]
    Bitmap(#[from] BitmapError),

    #[error(transparent)]
    Font(#[from] FontResolutionError),

    #[error("No font available for text rendering")]
    FontUnavailable,

    #[error("SVG parse error: {0}")]
    SvgParse(String),

    #[error("Failed to allocate pixmap")]
    PixmapAllocation,

    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Unsupported PNG layout: {color_type:?} at {bit_depth:?}")]
    UnsupportedPng {
        color_type: png::ColorType,
        bit_depth: png::BitDepth,
    },

    #[error("Invalid color: {0}")]
    ParseColor(#[from] ParseColorError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use fast_bitmap::PixelFormat;

    #[test]
    fn test_font_resolution_error_carries_parameters() {
        let error = FontResolutionError {
            family: "Comic Mono".to_string(),
            bold: true,
            italic: false,
            size: 11.0,
            reason: "family not installed".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Font 'Comic Mono' (bold: true, italic: false, size: 11) unavailable: family not installed"
        );
    }

    #[test]
    fn test_render_error_font_is_transparent() {
        let error: RenderError = FontResolutionError {
            family: "x".to_string(),
            bold: false,
            italic: false,
            size: 9.5,
            reason: "r".to_string(),
        }
        .into();
        assert_eq!(
            error.to_string(),
            "Font 'x' (bold: false, italic: false, size: 9.5) unavailable: r"
        );
    }

    #[test]
    fn test_render_error_font_unavailable() {
        let error = RenderError::FontUnavailable;
        assert_eq!(error.to_string(), "No font available for text rendering");
    }

    #[test]
    fn test_render_error_from_bitmap_error() {
        let error: RenderError = BitmapError::UnsupportedFormat {
            expected: PixelFormat::Bgrx32,
            actual: PixelFormat::Bgra32,
        }
        .into();
        assert_eq!(
            error.to_string(),
            "Bitmap error: unsupported pixel format: expected Bgrx32, bitmap is Bgra32"
        );
    }

    #[test]
    fn test_render_error_svg_parse() {
        let error = RenderError::SvgParse("Invalid XML".to_string());
        assert_eq!(error.to_string(), "SVG parse error: Invalid XML");
    }

    #[test]
    fn test_render_error_pixmap_allocation() {
        let error = RenderError::PixmapAllocation;
        assert_eq!(error.to_string(), "Failed to allocate pixmap");
    }

    #[test]
    fn test_render_error_png() {
        let error = RenderError::PngEncode("Encoding failed".to_string());
        assert_eq!(error.to_string(), "PNG encode error: Encoding failed");

        let error = RenderError::UnsupportedPng {
            color_type: png::ColorType::Indexed,
            bit_depth: png::BitDepth::Four,
        };
        assert_eq!(error.to_string(), "Unsupported PNG layout: Indexed at Four");
    }

    #[test]
    fn test_render_error_config() {
        let error = RenderError::Config("missing field".to_string());
        assert_eq!(error.to_string(), "Config error: missing field");
    }
}
