use fast_bitmap::Color;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

/// Placement of text along one axis of its layout rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StringAlignment {
    /// Left or top.
    #[serde(alias = "left", alias = "top")]
    Near,
    #[default]
    #[serde(alias = "middle")]
    Center,
    /// Right or bottom.
    #[serde(alias = "right", alias = "bottom")]
    Far,
}

impl FromStr for StringAlignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "near" | "left" | "top" => Ok(Self::Near),
            "center" | "middle" => Ok(Self::Center),
            "far" | "right" | "bottom" => Ok(Self::Far),
            other => Err(format!(
                "unknown alignment '{}' (expected near, center or far)",
                other
            )),
        }
    }
}

impl fmt::Display for StringAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Near => "near",
            Self::Center => "center",
            Self::Far => "far",
        };
        f.write_str(name)
    }
}

/// Horizontal (`alignment`) and vertical (`line_alignment`) text placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StringFormat {
    pub alignment: StringAlignment,
    pub line_alignment: StringAlignment,
}

impl StringFormat {
    pub fn new(alignment: StringAlignment, line_alignment: StringAlignment) -> Self {
        Self {
            alignment,
            line_alignment,
        }
    }
}

/// Requested typeface. Resolved against the font database by
/// [`FontResolver`](crate::rendering::FontResolver).
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
}

/// Appearance of a text annotation.
///
/// Field names double as the YAML keys of the `text` section in the config
/// file and of annotation overrides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub font_family: String,
    pub font_size: f32,
    pub bold: bool,
    pub italic: bool,
    /// Border thickness. Text is inset by half of it.
    pub line_thickness: i32,
    /// Text color.
    #[serde(deserialize_with = "deserialize_color")]
    pub line_color: Color,
    /// Background painted behind the text; transparent disables it.
    #[serde(deserialize_with = "deserialize_color")]
    pub fill_color: Color,
    pub shadow: bool,
    pub horizontal_alignment: StringAlignment,
    pub vertical_alignment: StringAlignment,
}

pub const GENERIC_SANS_SERIF: &str = "sans-serif";

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: GENERIC_SANS_SERIF.to_string(),
            font_size: 11.0,
            bold: false,
            italic: false,
            line_thickness: 2,
            line_color: Color::RED,
            fill_color: Color::TRANSPARENT,
            shadow: true,
            horizontal_alignment: StringAlignment::Center,
            vertical_alignment: StringAlignment::Center,
        }
    }
}

impl TextStyle {
    pub fn font_spec(&self) -> FontSpec {
        FontSpec {
            family: self.font_family.clone(),
            size: self.font_size,
            bold: self.bold,
            italic: self.italic,
        }
    }

    pub fn string_format(&self) -> StringFormat {
        StringFormat::new(self.horizontal_alignment, self.vertical_alignment)
    }

    /// The shadow only makes sense over the underlying image, so a filled
    /// background suppresses it.
    pub fn draws_shadow(&self) -> bool {
        self.shadow && self.fill_color.is_transparent()
    }
}

/// Per-annotation overrides on top of the configured [`TextStyle`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextStyleOverrides {
    pub font_family: Option<String>,
    pub font_size: Option<f32>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub line_thickness: Option<i32>,
    #[serde(deserialize_with = "deserialize_optional_color")]
    pub line_color: Option<Color>,
    #[serde(deserialize_with = "deserialize_optional_color")]
    pub fill_color: Option<Color>,
    pub shadow: Option<bool>,
    pub horizontal_alignment: Option<StringAlignment>,
    pub vertical_alignment: Option<StringAlignment>,
}

impl TextStyleOverrides {
    pub fn apply(&self, base: &TextStyle) -> TextStyle {
        TextStyle {
            font_family: self
                .font_family
                .clone()
                .unwrap_or_else(|| base.font_family.clone()),
            font_size: self.font_size.unwrap_or(base.font_size),
            bold: self.bold.unwrap_or(base.bold),
            italic: self.italic.unwrap_or(base.italic),
            line_thickness: self.line_thickness.unwrap_or(base.line_thickness),
            line_color: self.line_color.unwrap_or(base.line_color),
            fill_color: self.fill_color.unwrap_or(base.fill_color),
            shadow: self.shadow.unwrap_or(base.shadow),
            horizontal_alignment: self
                .horizontal_alignment
                .unwrap_or(base.horizontal_alignment),
            vertical_alignment: self.vertical_alignment.unwrap_or(base.vertical_alignment),
        }
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(serde::de::Error::custom)
}

fn deserialize_optional_color<'de, D>(deserializer: D) -> Result<Option<Color>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|s| s.parse().map_err(serde::de::Error::custom))
        .transpose()
}
