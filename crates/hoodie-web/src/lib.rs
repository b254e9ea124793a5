mod session;
mod viewer;

pub use viewer::{RenderMesh, Viewer};

#[cfg(target_arch = "wasm32")]
mod wasm_api;
