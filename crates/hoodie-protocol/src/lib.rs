//! UI <-> state container message protocol.

use hoodie_core::{ModelFormat, ModelId, ModelKind, TransformOptions, WireframeOptions};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    LoadModel {
        url: String,
    },
    CreateWireframe {
        #[serde(default)]
        options: WireframeOptions,
    },
    ApplyTransformation {
        transform: TransformOptions,
    },
    /// Sets the flag when `enabled` is given, flips it otherwise.
    ToggleWireframe {
        #[serde(default)]
        enabled: Option<bool>,
    },
    UndoTransformation,
    ResetModel,
    ClearModel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSummary {
    pub id: ModelId,
    pub kind: ModelKind,
    pub name: String,
    pub source: String,
    pub format: Option<ModelFormat>,
    pub file_size: Option<u64>,
    pub mesh_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    pub model: Option<ModelSummary>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub transformations: TransformOptions,
    pub is_wireframe: bool,
    pub history_len: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StateEvent {
    StateChanged { snapshot: StateSnapshot },
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoodie_core::Scale;

    #[test]
    fn action_roundtrip() {
        let msg = Action::ApplyTransformation {
            transform: TransformOptions::default()
                .with_rotation([0.0, 1.0, 0.0])
                .with_scale(2.0),
        };
        let json = serde_json::to_string(&msg).unwrap();
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(msg, back);
    }

    #[test]
    fn actions_parse_from_ui_json() {
        let toggle: Action = serde_json::from_str(r#"{"type":"ToggleWireframe"}"#).unwrap();
        assert_eq!(toggle, Action::ToggleWireframe { enabled: None });

        let create: Action =
            serde_json::from_str(r##"{"type":"CreateWireframe","options":{"color":"#00FF00"}}"##)
                .unwrap();
        let Action::CreateWireframe { options } = create else {
            panic!("expected CreateWireframe");
        };
        assert_eq!(options.color, "#00FF00");
        assert_eq!(options.width, WireframeOptions::default().width);

        let apply: Action = serde_json::from_str(
            r#"{"type":"ApplyTransformation","transform":{"scale":[1,2,3]}}"#,
        )
        .unwrap();
        assert_eq!(
            apply,
            Action::ApplyTransformation {
                transform: TransformOptions::default().with_scale(Scale::PerAxis([1.0, 2.0, 3.0])),
            }
        );
    }

    #[test]
    fn error_event_is_tagged() {
        let json = serde_json::to_string(&StateEvent::Error {
            message: "boom".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"Error","message":"boom"}"#);
    }
}
