//! Viewer configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validate::UploadConstraints;

pub const DEFAULT_HISTORY_LIMIT: usize = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("history limit must be at least 1")]
    ZeroHistoryLimit,
    #[error("fit dimension must be positive, got {0}")]
    InvalidFitDimension(f32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewerConfig {
    pub upload: UploadConstraints,
    /// Oldest history entries are evicted past this many. `None` keeps everything.
    pub history_limit: Option<usize>,
    /// When set, freshly loaded models are centered and scaled down to this size.
    pub fit_max_dimension: Option<f32>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            upload: UploadConstraints::gltf_default(),
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
            fit_max_dimension: None,
        }
    }
}

impl ViewerConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ViewerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_limit == Some(0) {
            return Err(ConfigError::ZeroHistoryLimit);
        }
        if let Some(dim) = self.fit_max_dimension {
            if !(dim > 0.0) {
                return Err(ConfigError::InvalidFitDimension(dim));
            }
        }
        Ok(())
    }
}
