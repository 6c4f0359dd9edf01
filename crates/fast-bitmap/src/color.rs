//! 8-bit ARGB color value.

use std::str::FromStr;

use crate::error::ParseColorError;
use crate::format::{COLOR_INDEX_A, COLOR_INDEX_B, COLOR_INDEX_G, COLOR_INDEX_R};

/// A straight (non-premultiplied) 8-bit color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const TRANSPARENT: Self = Self::from_argb(0, 0, 0, 0);
    pub const BLACK: Self = Self::from_rgb(0, 0, 0);
    pub const WHITE: Self = Self::from_rgb(255, 255, 255);
    pub const RED: Self = Self::from_rgb(255, 0, 0);

    #[inline]
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Opaque color from its red, green and blue channels.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_argb(255, r, g, b)
    }

    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    #[inline]
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Channels laid out by the `COLOR_INDEX_*` constants.
    #[inline]
    pub fn to_bytes(self) -> [u8; 4] {
        let mut bytes = [0u8; 4];
        bytes[COLOR_INDEX_R] = self.r;
        bytes[COLOR_INDEX_G] = self.g;
        bytes[COLOR_INDEX_B] = self.b;
        bytes[COLOR_INDEX_A] = self.a;
        bytes
    }

    #[inline]
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::from_argb(
            bytes[COLOR_INDEX_A],
            bytes[COLOR_INDEX_R],
            bytes[COLOR_INDEX_G],
            bytes[COLOR_INDEX_B],
        )
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Supports `#RGB`, `#RRGGBB` and `#AARRGGBB` (the hash is optional),
    /// case-insensitive, plus the keyword `transparent`.
    ///
    /// ```
    /// use fast_bitmap::Color;
    ///
    /// let red: Color = "#F00".parse().unwrap();
    /// assert_eq!(red, Color::RED);
    ///
    /// let faded: Color = "#80FF0000".parse().unwrap();
    /// assert_eq!(faded.a, 0x80);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("transparent") {
            return Ok(Self::TRANSPARENT);
        }
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                // Shorthand: expand each digit by multiplying by 17 (0xF -> 0xFF)
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::from_rgb(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::from_rgb(r, g, b))
            }
            8 => {
                let a = u8::from_str_radix(&s[0..2], 16)?;
                let r = u8::from_str_radix(&s[2..4], 16)?;
                let g = u8::from_str_radix(&s[4..6], 16)?;
                let b = u8::from_str_radix(&s[6..8], 16)?;
                Ok(Self::from_argb(a, r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}
