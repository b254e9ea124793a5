//! Model service: loading, generating and manipulating garment models.

pub mod error;
pub mod loader;
pub mod model;
pub mod object_url;
pub mod service;
pub mod wireframe;

pub use error::{LoaderError, ModelError};
pub use loader::{GltfLoader, MeshLoader};
pub use model::Model;
pub use object_url::{ObjectUrlStore, ScopedObjectUrl, OBJECT_URL_PREFIX};
pub use service::{apply_transform, normalize_model, set_wireframe, ModelService};
pub use wireframe::{create_wireframe_model, WIREFRAME_MODEL_NAME};
