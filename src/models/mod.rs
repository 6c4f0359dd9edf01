pub mod annotation;
pub mod config;
pub mod text_style;

pub use annotation::{AnnotationDocument, AnnotationSpec, TextAnnotation};
pub use config::{AppConfig, CONFIG_ENV};
pub use text_style::{
    FontSpec, StringAlignment, StringFormat, TextStyle, TextStyleOverrides, GENERIC_SANS_SERIF,
};
