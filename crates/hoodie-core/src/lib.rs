//! Core model types shared by the geometry, model and state crates.

pub mod config;
pub mod metadata;
pub mod transform;
pub mod validate;
pub mod wireframe;

pub use config::{ConfigError, ViewerConfig};
pub use metadata::{ModelFormat, ModelId, ModelKind, ModelMetadata, GENERATED_SOURCE};
pub use transform::{Scale, Transform, TransformOptions};
pub use validate::{
    validate_file, FileDescriptor, FileInfo, UploadConstraints, UploadedFile, ValidationResult,
};
pub use wireframe::WireframeOptions;
