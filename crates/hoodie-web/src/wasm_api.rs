//! `#[wasm_bindgen]` entry points over the installed [`Viewer`].

use hoodie_core::{FileInfo, UploadedFile};
use hoodie_protocol::StateEvent;
use wasm_bindgen::prelude::*;

use crate::session::{self, NOT_INITIALIZED};
use crate::viewer::{to_json, Viewer};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// Creates the viewer. `config_json` is an optional `ViewerConfig` document.
#[wasm_bindgen]
pub fn init(config_json: Option<String>) -> Result<(), JsValue> {
    let viewer = Viewer::from_json_config(config_json.as_deref())
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
    session::install(viewer);
    Ok(())
}

fn with_viewer<T>(f: impl FnOnce(&mut Viewer) -> T) -> Result<T, JsValue> {
    session::with_viewer(f).ok_or_else(|| JsValue::from_str(NOT_INITIALIZED))
}

/// Event-returning calls report a missing viewer as an `Error` event.
fn event_json(f: impl FnOnce(&mut Viewer) -> String) -> String {
    session::with_viewer(f).unwrap_or_else(|| {
        to_json(&StateEvent::Error {
            message: NOT_INITIALIZED.to_string(),
        })
    })
}

#[wasm_bindgen]
pub fn process_message(json: &str) -> String {
    event_json(|viewer| viewer.process_message(json))
}

/// Returns a JSON `ValidationResult` for a file the user picked.
#[wasm_bindgen]
pub fn validate_upload(name: String, mime_type: String, size: f64) -> Result<String, JsValue> {
    let info = FileInfo {
        name,
        size: size as u64,
        mime_type,
    };
    with_viewer(|viewer| to_json(&viewer.validate_upload(&info)))
}

#[wasm_bindgen]
pub fn load_upload(name: String, mime_type: String, bytes: Vec<u8>) -> String {
    let file = UploadedFile::new(name, mime_type, bytes);
    event_json(|viewer| to_json(&viewer.load_upload(&file)))
}

/// Registers upload bytes and returns their object URL.
#[wasm_bindgen]
pub fn register_upload(bytes: Vec<u8>) -> Result<String, JsValue> {
    with_viewer(|viewer| viewer.register_upload(bytes))
}

#[wasm_bindgen]
pub fn revoke_upload(url: &str) -> Result<bool, JsValue> {
    with_viewer(|viewer| viewer.revoke_upload(url))
}

/// Current geometry as JSON, or `null` when nothing is loaded.
#[wasm_bindgen]
pub fn render_mesh() -> Result<String, JsValue> {
    with_viewer(|viewer| to_json(&viewer.render_mesh()))
}
