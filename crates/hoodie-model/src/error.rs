use thiserror::Error;

/// Failures inside a [`crate::MeshLoader`].
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error(transparent)]
    Gltf(#[from] gltf::Error),
    #[error("object URL {0} is not registered")]
    UnknownObjectUrl(String),
    #[error("unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
    #[error("document contains no scene")]
    NoScene,
}

/// Errors surfaced to callers of the model service. Cheap to clone so the
/// state container can keep the last one around.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("Error loading model: {message}")]
    Load { url: String, message: String },
}

impl ModelError {
    pub fn load(url: &str, err: &LoaderError) -> Self {
        ModelError::Load {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}
