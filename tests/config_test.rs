//! Loading configuration and annotation documents from disk.

use fast_bitmap::{Color, Rect};
use pretty_assertions::assert_eq;
use shotfx::models::{AnnotationDocument, AppConfig, StringAlignment, TextStyle};
use std::io::Write;
use tempfile::NamedTempFile;

fn temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_config_file() {
    let file = temp_file(
        r##"
text:
  font_family: "DejaVu Sans"
  font_size: 16
  line_color: "#00FF00"
  vertical_alignment: top
optimize_png: true
system_fonts: false
"##,
    );

    let config = AppConfig::load(Some(file.path()));

    assert_eq!(config.text.font_family, "DejaVu Sans");
    assert_eq!(config.text.font_size, 16.0);
    assert_eq!(config.text.line_color, Color::from_rgb(0, 255, 0));
    assert_eq!(config.text.vertical_alignment, StringAlignment::Near);
    assert_eq!(config.text.line_thickness, 2);
    assert!(config.optimize_png);
    assert!(!config.system_fonts);
}

#[test]
fn test_broken_config_falls_back_to_defaults() {
    let file = temp_file("text: [not, a, mapping");
    assert_eq!(AppConfig::load(Some(file.path())), AppConfig::default());
}

#[test]
fn test_missing_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::load(Some(&dir.path().join("absent.yaml")));
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_document_inherits_config_defaults() {
    let config = AppConfig::from_yaml_str("text:\n  font_size: 20\n  shadow: false\n").unwrap();
    let file = temp_file(
        r#"
annotations:
  - text: "Save"
    rect: [5, 5, 60, 20]
    bold: true
"#,
    );

    let document = AnnotationDocument::load(file.path()).unwrap();
    let annotation = document.annotations[0].to_annotation(&config.text);

    assert_eq!(annotation.rect, Rect::new(5, 5, 60, 20));
    assert_eq!(
        annotation.style,
        TextStyle {
            font_size: 20.0,
            shadow: false,
            bold: true,
            ..TextStyle::default()
        }
    );
}

#[test]
fn test_missing_document_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = AnnotationDocument::load(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, shotfx::error::RenderError::Io(_)));
}
