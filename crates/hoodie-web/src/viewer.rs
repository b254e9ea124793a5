//! JSON-facing viewer: the state container, model service and upload
//! handling behind one handle the browser bindings can drive.

use hoodie_core::{
    validate_file, ConfigError, FileDescriptor, UploadedFile, ValidationResult, ViewerConfig,
};
use hoodie_model::{GltfLoader, ModelService};
use hoodie_protocol::{Action, StateEvent};
use hoodie_state::{dispatch, snapshot, ModelState};
use serde::Serialize;
use tracing::{debug, info};

/// Flattened world-space geometry for the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderMesh {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u32>,
    /// Index pairs for line rendering.
    pub edges: Vec<u32>,
    pub wireframe: bool,
}

pub struct Viewer {
    config: ViewerConfig,
    state: ModelState,
    service: ModelService<GltfLoader>,
}

impl Viewer {
    pub fn new(config: ViewerConfig) -> Self {
        info!(?config, "viewer created");
        Self {
            state: ModelState::from_config(&config),
            service: ModelService::new(GltfLoader::default()).with_fit(config.fit_max_dimension),
            config,
        }
    }

    pub fn from_json_config(json: Option<&str>) -> Result<Self, ConfigError> {
        let config = match json {
            Some(json) => ViewerConfig::from_json_str(json)?,
            None => ViewerConfig::default(),
        };
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn state(&self) -> &ModelState {
        &self.state
    }

    /// Handles one JSON-encoded [`Action`] and returns a JSON-encoded [`StateEvent`].
    pub fn process_message(&mut self, json: &str) -> String {
        let event = match serde_json::from_str::<Action>(json) {
            Ok(action) => {
                debug!(?action, "dispatching");
                dispatch(&mut self.state, &self.service, action)
            }
            Err(err) => StateEvent::Error {
                message: format!("failed to parse message: {err}"),
            },
        };
        to_json(&event)
    }

    pub fn validate_upload(&self, file: &impl FileDescriptor) -> ValidationResult {
        validate_file(file, &self.config.upload)
    }

    /// Validates and loads an upload. Invalid files never reach the loader.
    pub fn load_upload(&mut self, file: &UploadedFile) -> StateEvent {
        let validation = self.validate_upload(file);
        if !validation.valid {
            return StateEvent::Error {
                message: validation.errors.join("; "),
            };
        }
        match self.state.load_upload(&self.service, file) {
            Ok(()) => StateEvent::StateChanged {
                snapshot: snapshot(&self.state),
            },
            Err(err) => StateEvent::Error {
                message: err.to_string(),
            },
        }
    }

    /// Registers bytes under an object URL for a later `LoadModel` action.
    /// The caller revokes it once the load has finished.
    pub fn register_upload(&self, bytes: Vec<u8>) -> String {
        self.service.loader().object_urls().create(bytes)
    }

    pub fn revoke_upload(&self, url: &str) -> bool {
        self.service.loader().object_urls().revoke(url)
    }

    pub fn render_mesh(&self) -> Option<RenderMesh> {
        let model = self.state.current_model()?;
        let mesh = model.node.flatten();
        let edges = mesh.edges().into_iter().flatten().collect();
        Some(RenderMesh {
            positions: mesh.positions.into_iter().flatten().collect(),
            normals: mesh.normals.into_iter().flatten().collect(),
            indices: mesh.indices,
            edges,
            wireframe: self.state.is_wireframe(),
        })
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

pub(crate) fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        serde_json::json!({
            "type": "Error",
            "message": format!("serialization failed: {err}"),
        })
        .to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoodie_core::FileInfo;
    use hoodie_protocol::StateSnapshot;

    const TRIANGLE_GLTF: &str = r#"{
        "asset": { "version": "2.0" },
        "scenes": [ { "nodes": [0] } ],
        "nodes": [ { "name": "body", "mesh": 0 } ],
        "meshes": [ { "primitives": [ { "attributes": { "POSITION": 0 } } ] } ],
        "accessors": [ {
            "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
            "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0]
        } ],
        "bufferViews": [ { "buffer": 0, "byteLength": 36 } ],
        "buffers": [ {
            "byteLength": 36,
            "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAA"
        } ]
    }"#;

    fn parse(json: &str) -> StateEvent {
        serde_json::from_str(json).unwrap()
    }

    fn snapshot_of(event: StateEvent) -> StateSnapshot {
        match event {
            StateEvent::StateChanged { snapshot } => snapshot,
            StateEvent::Error { message } => panic!("unexpected error: {message}"),
        }
    }

    #[test]
    fn json_session_round_trip() {
        let mut viewer = Viewer::default();
        let snap = snapshot_of(parse(&viewer.process_message(
            r##"{"type":"CreateWireframe","options":{"width":50,"height":70,"color":"#FF0000"}}"##,
        )));
        assert_eq!(snap.model.unwrap().name, "Wireframe Hoodie");

        let snap = snapshot_of(parse(&viewer.process_message(
            r#"{"type":"ApplyTransformation","transform":{"rotation":[0,1.57,0]}}"#,
        )));
        assert_eq!(snap.transformations.rotation, Some([0.0, 1.57, 0.0]));
        assert_eq!(snap.history_len, 2);

        let snap = snapshot_of(parse(&viewer.process_message(r#"{"type":"ToggleWireframe"}"#)));
        assert!(!snap.is_wireframe);
    }

    #[test]
    fn malformed_message_is_an_error_event() {
        let mut viewer = Viewer::default();
        let StateEvent::Error { message } = parse(&viewer.process_message(r#"{"type":"Explode"}"#))
        else {
            panic!("expected error");
        };
        assert!(message.starts_with("failed to parse message"));
    }

    #[test]
    fn invalid_upload_is_rejected_before_loading() {
        let mut viewer = Viewer::default();
        let file = UploadedFile::new("shirt.obj", "text/plain", vec![0; 8]);
        let StateEvent::Error { message } = viewer.load_upload(&file) else {
            panic!("expected validation error");
        };
        assert!(message.contains("File type"));
        assert!(message.contains("File extension"));
        assert!(!viewer.state().is_loading());
        assert!(viewer.state().history().is_empty());
    }

    #[test]
    fn valid_upload_loads_and_renders() {
        let mut viewer = Viewer::default();
        let file = UploadedFile::new(
            "triangle.gltf",
            "model/gltf+json",
            TRIANGLE_GLTF.as_bytes().to_vec(),
        );
        let snap = snapshot_of(viewer.load_upload(&file));
        let model = snap.model.unwrap();
        assert_eq!(model.name, "triangle.gltf");
        assert_eq!(model.file_size, Some(TRIANGLE_GLTF.len() as u64));

        let mesh = viewer.render_mesh().unwrap();
        assert_eq!(mesh.positions.len(), 9);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(mesh.edges.len(), 6);
        assert!(!mesh.wireframe);
    }

    #[test]
    fn glb_without_declared_type_loads_by_default() {
        let mut viewer = Viewer::default();
        for mime in ["", "application/octet-stream"] {
            let file = UploadedFile::new("hoodie.glb", mime, TRIANGLE_GLTF.as_bytes().to_vec());
            assert!(viewer.validate_upload(&file).valid, "{mime:?}");
            let snap = snapshot_of(viewer.load_upload(&file));
            assert_eq!(snap.model.unwrap().name, "hoodie.glb");
        }
    }

    #[test]
    fn registered_url_loads_through_message() {
        let mut viewer = Viewer::default();
        let url = viewer.register_upload(TRIANGLE_GLTF.as_bytes().to_vec());
        let msg = serde_json::json!({ "type": "LoadModel", "url": url }).to_string();
        let snap = snapshot_of(parse(&viewer.process_message(&msg)));
        assert!(snap.model.is_some());
        assert!(viewer.revoke_upload(&url));
        assert!(!viewer.revoke_upload(&url));
    }

    #[test]
    fn validation_uses_configured_limits() {
        let viewer = Viewer::from_json_config(Some(r#"{"upload":{"maxSize":10}}"#)).unwrap();
        let result = viewer.validate_upload(&FileInfo {
            name: "x.glb".to_string(),
            size: 20,
            mime_type: String::new(),
        });
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("size exceeds maximum of 10 bytes"));
    }

    #[test]
    fn nothing_to_render_without_model() {
        assert!(Viewer::default().render_mesh().is_none());
    }
}
