use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Source recorded for procedurally generated models.
pub const GENERATED_SOURCE: &str = "generated";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelId(Uuid);

impl ModelId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ModelId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Wireframe,
    Uploaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    Glb,
    Gltf,
}

impl ModelFormat {
    /// Infers the format from a `.glb` / `.gltf` suffix, ignoring case.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        if lower.ends_with(".glb") {
            Some(ModelFormat::Glb)
        } else if lower.ends_with(".gltf") {
            Some(ModelFormat::Gltf)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetadata {
    pub name: String,
    /// URL the model was loaded from, or [`GENERATED_SOURCE`].
    pub source: String,
    pub format: Option<ModelFormat>,
    pub file_size: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl ModelMetadata {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            source: source.into(),
            format: None,
            file_size: None,
            created_at: now,
            modified_at: now,
        }
    }

    pub fn generated(name: impl Into<String>) -> Self {
        Self::new(name, GENERATED_SOURCE)
    }

    /// Metadata for a model loaded from `url`: the name is the last path segment
    /// with any query string or fragment removed.
    pub fn from_url(url: &str) -> Self {
        let name = file_name_from_url(url);
        let mut meta = Self::new(name, url);
        meta.format = ModelFormat::from_file_name(name);
        meta
    }

    pub fn touch(&mut self) {
        self.modified_at = Utc::now();
    }
}

fn file_name_from_url(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/').next().unwrap_or(path)
}
