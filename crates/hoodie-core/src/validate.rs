//! Client-side upload validation.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_UPLOAD_SIZE: u64 = 50 * 1024 * 1024;

/// Anything that looks like a file picked by the user.
pub trait FileDescriptor {
    fn size(&self) -> u64;
    fn mime_type(&self) -> &str;
    fn file_name(&self) -> &str;
}

/// File attributes without contents, as reported by a browser `File`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub name: String,
    pub size: u64,
    #[serde(default)]
    pub mime_type: String,
}

impl FileDescriptor for FileInfo {
    fn size(&self) -> u64 {
        self.size
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }

    fn file_name(&self) -> &str {
        &self.name
    }
}

/// An upload together with its bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

impl FileDescriptor for UploadedFile {
    fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }

    fn file_name(&self) -> &str {
        &self.name
    }
}

/// Upload constraints. A `None` field is not checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadConstraints {
    #[serde(default)]
    pub max_size: Option<u64>,
    #[serde(default)]
    pub allowed_types: Option<Vec<String>>,
    /// Suffixes including the dot, matched case-insensitively.
    #[serde(default)]
    pub allowed_extensions: Option<Vec<String>>,
}

impl UploadConstraints {
    /// glTF types plus what browsers report for files they do not
    /// recognise (`""` or `application/octet-stream`).
    pub fn gltf_default() -> Self {
        Self {
            max_size: Some(DEFAULT_MAX_UPLOAD_SIZE),
            allowed_types: Some(vec![
                "model/gltf-binary".to_string(),
                "model/gltf+json".to_string(),
                "application/octet-stream".to_string(),
                String::new(),
            ]),
            allowed_extensions: Some(vec![".glb".to_string(), ".gltf".to_string()]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Checks every present constraint and reports each violation.
pub fn validate_file(file: &impl FileDescriptor, constraints: &UploadConstraints) -> ValidationResult {
    let mut errors = Vec::new();

    if let Some(max_size) = constraints.max_size {
        if file.size() > max_size {
            errors.push(format!(
                "File size exceeds maximum of {max_size} bytes (got {} bytes)",
                file.size()
            ));
        }
    }

    if let Some(types) = &constraints.allowed_types {
        if !types.iter().any(|t| t == file.mime_type()) {
            errors.push(format!(
                "File type \"{}\" is not allowed. Allowed types: {}",
                file.mime_type(),
                types.join(", ")
            ));
        }
    }

    if let Some(extensions) = &constraints.allowed_extensions {
        let name = file.file_name().to_ascii_lowercase();
        let matched = extensions
            .iter()
            .any(|ext| name.ends_with(&ext.to_ascii_lowercase()));
        if !matched {
            errors.push(format!(
                "File extension is not allowed for \"{}\". Allowed extensions: {}",
                file.file_name(),
                extensions.join(", ")
            ));
        }
    }

    ValidationResult {
        valid: errors.is_empty(),
        errors,
    }
}
