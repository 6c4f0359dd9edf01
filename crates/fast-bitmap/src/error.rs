//! Error types for bitmap access and color parsing.

use std::fmt;
use std::num::ParseIntError;

use crate::format::PixelFormat;
use crate::geometry::Rect;

/// Error type for locking, addressing and filtering bitmaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitmapError {
    /// The bitmap's pixel layout does not match the requested accessor variant
    UnsupportedFormat {
        /// Format the caller asked for
        expected: PixelFormat,
        /// Format the bitmap actually has
        actual: PixelFormat,
    },
    /// Pixel coordinate outside the locked rectangle
    OutOfBounds {
        x: u32,
        y: u32,
        /// Width of the locked rectangle
        width: u32,
        /// Height of the locked rectangle
        height: u32,
    },
    /// Requested lock area does not fit inside the bitmap
    InvalidArea {
        area: Rect,
        width: u32,
        height: u32,
    },
    /// Stride or buffer length cannot hold the described image
    InvalidLayout(String),
    /// Input rejected by an operation (e.g. zero-sized source image)
    InvalidInput(String),
}

impl fmt::Display for BitmapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitmapError::UnsupportedFormat { expected, actual } => {
                write!(
                    f,
                    "unsupported pixel format: expected {}, bitmap is {}",
                    expected, actual
                )
            }
            BitmapError::OutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(
                    f,
                    "pixel ({}, {}) is outside the locked {}x{} area",
                    x, y, width, height
                )
            }
            BitmapError::InvalidArea {
                area,
                width,
                height,
            } => {
                write!(
                    f,
                    "area {}x{} at ({}, {}) does not fit a {}x{} bitmap",
                    area.width, area.height, area.x, area.y, width, height
                )
            }
            BitmapError::InvalidLayout(msg) => write!(f, "invalid bitmap layout: {}", msg),
            BitmapError::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
        }
    }
}

impl std::error::Error for BitmapError {}

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3, 6 or 8 characters after stripping '#')
    InvalidLength,
    /// Invalid hexadecimal character encountered
    InvalidHex(ParseIntError),
}

impl From<ParseIntError> for ParseColorError {
    fn from(err: ParseIntError) -> Self {
        ParseColorError::InvalidHex(err)
    }
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::InvalidLength => {
                write!(
                    f,
                    "invalid hex color length (expected 3, 6 or 8 characters)"
                )
            }
            ParseColorError::InvalidHex(err) => {
                write!(f, "invalid hex character: {}", err)
            }
        }
    }
}

impl std::error::Error for ParseColorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseColorError::InvalidHex(err) => Some(err),
            _ => None,
        }
    }
}
