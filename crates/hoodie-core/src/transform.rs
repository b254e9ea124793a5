//! Local transforms and partial transform updates.

use serde::{Deserialize, Serialize};

/// Scale component of a [`TransformOptions`]: one factor for all axes or one per axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scale {
    Uniform(f32),
    PerAxis([f32; 3]),
}

impl Scale {
    pub fn to_array(self) -> [f32; 3] {
        match self {
            Scale::Uniform(s) => [s, s, s],
            Scale::PerAxis(v) => v,
        }
    }
}

impl From<f32> for Scale {
    fn from(s: f32) -> Self {
        Scale::Uniform(s)
    }
}

impl From<[f32; 3]> for Scale {
    fn from(v: [f32; 3]) -> Self {
        Scale::PerAxis(v)
    }
}

/// A partial transform. Only the fields that are present get applied.
///
/// Zero and negative scales are passed through as given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<[f32; 3]>,
    /// Euler angles in radians, XYZ order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<[f32; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<Scale>,
}

impl TransformOptions {
    /// Every field present: origin, no rotation, unit scale.
    pub fn identity() -> Self {
        Self {
            position: Some([0.0; 3]),
            rotation: Some([0.0; 3]),
            scale: Some(Scale::Uniform(1.0)),
        }
    }

    pub fn with_position(mut self, position: [f32; 3]) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_rotation(mut self, rotation: [f32; 3]) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn with_scale(mut self, scale: impl Into<Scale>) -> Self {
        self.scale = Some(scale.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_none() && self.rotation.is_none() && self.scale.is_none()
    }

    /// Field-by-field override: fields present in `partial` win.
    pub fn merge(&self, partial: &TransformOptions) -> TransformOptions {
        TransformOptions {
            position: partial.position.or(self.position),
            rotation: partial.rotation.or(self.rotation),
            scale: partial.scale.or(self.scale),
        }
    }
}

/// Fully resolved local transform of a scene node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        position: [0.0; 3],
        rotation: [0.0; 3],
        scale: [1.0; 3],
    };

    pub fn from_position(position: [f32; 3]) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn apply(&mut self, options: &TransformOptions) {
        if let Some(position) = options.position {
            self.position = position;
        }
        if let Some(rotation) = options.rotation {
            self.rotation = rotation;
        }
        if let Some(scale) = options.scale {
            self.scale = scale.to_array();
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}
