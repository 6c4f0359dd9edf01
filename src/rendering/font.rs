//! Font lookup with a generic sans-serif fallback.

use crate::error::FontResolutionError;
use crate::models::{AppConfig, FontSpec, GENERIC_SANS_SERIF};
use fontdb::{Family, FaceInfo, Style};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Families tried, in order, to back the generic `sans-serif` name when the
/// database default is not installed.
const SANS_SERIF_CANDIDATES: &[&str] = &[
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "Helvetica",
    "Arial",
];

const BOLD_WEIGHT: u16 = 600;

/// A concrete typeface: an installed family plus the style picked for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFont {
    pub family: String,
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
}

impl ResolvedFont {
    /// CSS font weight.
    pub fn weight(&self) -> u16 {
        if self.bold {
            700
        } else {
            400
        }
    }

    /// CSS font style.
    pub fn style(&self) -> &'static str {
        if self.italic {
            "italic"
        } else {
            "normal"
        }
    }
}

/// Which styles a family offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleAvailability {
    pub regular: bool,
    pub bold: bool,
    pub italic: bool,
}

/// Pick `(bold, italic)` for a request given what the family offers.
///
/// Requested styles are honoured when available. When neither applies the
/// regular face is used, or failing that bold, or failing that italic.
pub fn choose_style(bold: bool, italic: bool, available: StyleAvailability) -> (bool, bool) {
    let bold = bold && available.bold;
    let italic = italic && available.italic;
    if bold || italic || available.regular {
        (bold, italic)
    } else if available.bold {
        (true, false)
    } else if available.italic {
        (false, true)
    } else {
        (false, false)
    }
}

/// Resolves [`FontSpec`]s against a font database shared with the renderer.
#[derive(Clone)]
pub struct FontResolver {
    fontdb: Arc<fontdb::Database>,
}

impl FontResolver {
    pub fn new(mut fontdb: fontdb::Database) -> Self {
        let sans = fontdb.family_name(&Family::SansSerif).to_string();
        if !has_family(&fontdb, &sans) {
            let replacement = SANS_SERIF_CANDIDATES
                .iter()
                .map(|name| name.to_string())
                .find(|name| has_family(&fontdb, name))
                .or_else(|| family_names(&fontdb).into_iter().next());
            if let Some(name) = replacement {
                tracing::debug!(from = %sans, to = %name, "Remapped generic sans-serif family");
                fontdb.set_sans_serif_family(name);
            }
        }

        tracing::info!(
            font_count = fontdb.len(),
            "Loaded fonts for text rendering"
        );

        Self {
            fontdb: Arc::new(fontdb),
        }
    }

    /// Create a resolver with fonts loaded from the provided data
    pub fn with_fonts(fonts: Vec<(String, Vec<u8>)>, system_fonts: bool) -> Self {
        let mut fontdb = fontdb::Database::new();

        for (name, data) in fonts {
            fontdb.load_font_data(data);
            tracing::debug!(font = %name, "Loaded font");
        }
        if system_fonts {
            fontdb.load_system_fonts();
        }

        Self::new(fontdb)
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let mut fontdb = fontdb::Database::new();
        if let Some(dir) = &config.fonts_dir {
            if dir.is_dir() {
                fontdb.load_fonts_dir(dir);
                tracing::debug!(dir = %dir.display(), faces = fontdb.len(), "Loaded fonts directory");
            } else {
                tracing::warn!(dir = %dir.display(), "Fonts directory not found");
            }
        }
        if config.system_fonts {
            fontdb.load_system_fonts();
        }
        Self::new(fontdb)
    }

    /// Shared handle for the rasterizer.
    pub fn database(&self) -> Arc<fontdb::Database> {
        self.fontdb.clone()
    }

    pub fn face_count(&self) -> usize {
        self.fontdb.len()
    }

    /// Sorted, de-duplicated family names.
    pub fn families(&self) -> Vec<String> {
        family_names(&self.fontdb)
    }

    /// Create the requested font, falling back to generic sans-serif.
    ///
    /// On double failure the error names the originally requested family.
    pub fn resolve(&self, spec: &FontSpec) -> Result<ResolvedFont, FontResolutionError> {
        self.try_create(&spec.family, spec)
            .or_else(|reason| {
                tracing::warn!(family = %spec.family, %reason, "Font unavailable, trying sans-serif");
                self.try_create(GENERIC_SANS_SERIF, spec)
            })
            .map_err(|reason| FontResolutionError {
                family: spec.family.clone(),
                bold: spec.bold,
                italic: spec.italic,
                size: spec.size,
                reason,
            })
    }

    fn try_create(&self, family: &str, spec: &FontSpec) -> Result<ResolvedFont, String> {
        if !spec.size.is_finite() || spec.size <= 0.0 {
            return Err(format!("invalid font size {}", spec.size));
        }
        let name = self.concrete_family(family);
        let faces: Vec<&FaceInfo> = self
            .fontdb
            .faces()
            .filter(|face| face_has_family(face, name))
            .collect();
        if faces.is_empty() {
            return Err(format!("family '{}' is not installed", name));
        }

        let available = StyleAvailability {
            regular: faces
                .iter()
                .any(|f| f.weight.0 < BOLD_WEIGHT && f.style == Style::Normal),
            bold: faces.iter().any(|f| f.weight.0 >= BOLD_WEIGHT),
            italic: faces.iter().any(|f| f.style != Style::Normal),
        };
        let (bold, italic) = choose_style(spec.bold, spec.italic, available);

        // Report the family as the database spells it.
        let family = faces[0]
            .families
            .iter()
            .map(|(n, _)| n)
            .find(|n| n.eq_ignore_ascii_case(name))
            .cloned()
            .unwrap_or_else(|| name.to_string());

        Ok(ResolvedFont {
            family,
            size: spec.size,
            bold,
            italic,
        })
    }

    /// Map generic CSS family names to the database's configured family.
    fn concrete_family<'a>(&'a self, family: &'a str) -> &'a str {
        let generic: &'static Family<'static> = match family.trim().to_ascii_lowercase().as_str() {
            "sans-serif" => &Family::SansSerif,
            "serif" => &Family::Serif,
            "monospace" => &Family::Monospace,
            "cursive" => &Family::Cursive,
            "fantasy" => &Family::Fantasy,
            _ => return family.trim(),
        };
        self.fontdb.family_name(generic)
    }
}

impl std::fmt::Debug for FontResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontResolver")
            .field("faces", &self.fontdb.len())
            .finish()
    }
}

fn face_has_family(face: &FaceInfo, name: &str) -> bool {
    face.families
        .iter()
        .any(|(family, _)| family.eq_ignore_ascii_case(name))
}

fn has_family(fontdb: &fontdb::Database, name: &str) -> bool {
    fontdb.faces().any(|face| face_has_family(face, name))
}

fn family_names(fontdb: &fontdb::Database) -> Vec<String> {
    fontdb
        .faces()
        .filter_map(|f| f.families.first().map(|(name, _)| name.clone()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
