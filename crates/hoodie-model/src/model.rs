use hoodie_core::{ModelId, ModelKind, ModelMetadata};
use hoodie_geom::SceneNode;
use tracing::debug;

/// A loaded or generated model. Owns its scene graph exclusively.
#[derive(Debug)]
pub struct Model {
    pub id: ModelId,
    pub kind: ModelKind,
    pub node: SceneNode,
    pub metadata: ModelMetadata,
}

impl Model {
    pub fn new(kind: ModelKind, node: SceneNode, metadata: ModelMetadata) -> Self {
        Self {
            id: ModelId::new(),
            kind,
            node,
            metadata,
        }
    }

    /// Releases the model and its geometry.
    pub fn dispose(self) {
        debug!(
            id = %self.id,
            name = %self.metadata.name,
            meshes = self.node.mesh_count(),
            "disposing model"
        );
    }
}
