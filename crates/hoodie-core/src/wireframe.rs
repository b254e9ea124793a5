use serde::{Deserialize, Serialize};

/// Sizing inputs for the procedural hoodie. Any field missing from JSON takes its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WireframeOptions {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub sleeve_length: f32,
    pub hood_size: f32,
    pub shoulder_width: f32,
    /// `#RRGGBB` or `#RGB`.
    pub color: String,
    pub include_hood: bool,
    pub detachable_sleeves: bool,
}

impl Default for WireframeOptions {
    fn default() -> Self {
        Self {
            width: 50.0,
            height: 70.0,
            depth: 25.0,
            sleeve_length: 60.0,
            hood_size: 30.0,
            shoulder_width: 45.0,
            color: "#FFFFFF".to_string(),
            include_hood: true,
            detachable_sleeves: false,
        }
    }
}
