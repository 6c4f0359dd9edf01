pub mod annotation_pipeline;

pub use annotation_pipeline::AnnotationPipeline;
