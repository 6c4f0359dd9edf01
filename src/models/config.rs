use crate::error::RenderError;
use crate::models::text_style::TextStyle;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming the config file when `--config` is not given.
pub const CONFIG_ENV: &str = "SHOTFX_CONFIG";

/// Application configuration loaded from a YAML file.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Default appearance of text annotations
    #[serde(default)]
    pub text: TextStyle,

    /// Directory with additional font files
    #[serde(default)]
    pub fonts_dir: Option<PathBuf>,

    /// Load the fonts installed on the system
    #[serde(default = "default_system_fonts")]
    pub system_fonts: bool,

    /// Re-compress written PNGs with oxipng
    #[serde(default)]
    pub optimize_png: bool,
}

fn default_system_fonts() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            text: TextStyle::default(),
            fonts_dir: None,
            system_fonts: default_system_fonts(),
            optimize_png: false,
        }
    }
}

impl AppConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, RenderError> {
        serde_yaml::from_str(yaml).map_err(|e| RenderError::Config(e.to_string()))
    }

    /// The explicit path if given, else the one named by `SHOTFX_CONFIG`.
    pub fn resolve_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
        explicit.or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
    }

    /// Load configuration from `path`, falling back to defaults when there
    /// is no file or it cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::debug!("No config file given, using defaults");
            return Self::default();
        };
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml_str(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        fonts_dir = ?config.fonts_dir,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StringAlignment;
    use fast_bitmap::Color;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.text, TextStyle::default());
        assert_eq!(config.fonts_dir, None);
        assert!(config.system_fonts);
        assert!(!config.optimize_png);
    }

    #[test]
    fn test_system_fonts_default_function() {
        assert!(default_system_fonts());
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r##"
text:
  font_family: serif
  font_size: 14.5
  shadow: false
  vertical_alignment: top
  fill_color: "#FFFFFF"
fonts_dir: /usr/share/fonts/custom
system_fonts: false
optimize_png: true
"##;

        let config = AppConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.text.font_family, "serif");
        assert_eq!(config.text.font_size, 14.5);
        assert!(!config.text.shadow);
        assert_eq!(config.text.vertical_alignment, StringAlignment::Near);
        assert_eq!(config.text.fill_color, Color::WHITE);
        assert_eq!(
            config.fonts_dir,
            Some(PathBuf::from("/usr/share/fonts/custom"))
        );
        assert!(!config.system_fonts);
        assert!(config.optimize_png);
    }

    #[test]
    fn test_deserialize_empty_mapping_gives_defaults() {
        let config = AppConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let err = AppConfig::from_yaml_str("text: [1, 2").unwrap_err();
        assert!(matches!(err, RenderError::Config(_)));
    }

    #[test]
    fn test_load_without_path_uses_defaults() {
        assert_eq!(AppConfig::load(None), AppConfig::default());
    }

    #[test]
    fn test_resolve_path_prefers_explicit() {
        let explicit = PathBuf::from("/tmp/explicit.yaml");
        assert_eq!(
            AppConfig::resolve_path(Some(explicit.clone())),
            Some(explicit)
        );
    }
}
