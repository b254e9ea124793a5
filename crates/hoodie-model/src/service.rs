use hoodie_core::{
    FileDescriptor, ModelFormat, ModelKind, ModelMetadata, Transform, TransformOptions,
    UploadedFile,
};
use hoodie_geom::{center, scale_to_fit, MeshData, SceneNode, SceneVisitorMut};
use tracing::{debug, info, instrument, warn};

use crate::error::ModelError;
use crate::loader::{GltfLoader, MeshLoader};
use crate::model::Model;

/// Loads models through a [`MeshLoader`]. One attempt per call; retries are up to the caller.
#[derive(Debug, Clone, Default)]
pub struct ModelService<L = GltfLoader> {
    loader: L,
    fit_max_dimension: Option<f32>,
}

impl<L: MeshLoader> ModelService<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            fit_max_dimension: None,
        }
    }

    /// Scale freshly loaded models down to `max_dimension` and center them.
    pub fn with_fit(mut self, max_dimension: Option<f32>) -> Self {
        self.fit_max_dimension = max_dimension;
        self
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    #[instrument(skip(self))]
    pub fn load_model(&self, url: &str) -> Result<Model, ModelError> {
        let mut node = self.loader.load(url).map_err(|err| {
            warn!(%err, "model load failed");
            ModelError::load(url, &err)
        })?;

        normalize_model(&mut node);
        if let Some(max_dimension) = self.fit_max_dimension {
            scale_to_fit(&mut node, max_dimension);
            center(&mut node);
        }

        let metadata = ModelMetadata::from_url(url);
        info!(name = %metadata.name, meshes = node.mesh_count(), "model loaded");
        Ok(Model::new(ModelKind::Uploaded, node, metadata))
    }
}

impl ModelService<GltfLoader> {
    /// Loads an upload through a temporary object URL. The URL is revoked
    /// before returning, whether or not the load succeeded.
    pub fn load_upload(&self, file: &UploadedFile) -> Result<Model, ModelError> {
        let result = {
            let url = self.loader.object_urls().scoped(file.bytes.clone());
            self.load_model(url.as_str())
        };
        let mut model = result?;
        model.metadata.name = file.name.clone();
        model.metadata.format = ModelFormat::from_file_name(&file.name);
        model.metadata.file_size = Some(file.size());
        Ok(model)
    }
}

/// Applies the present fields of `options` to the node's local transform.
pub fn apply_transform(node: &mut SceneNode, options: &TransformOptions) {
    node.transform.apply(options);
    debug!(node = %node.name, transform = ?node.transform, "transform applied");
}

struct WireframeToggle(bool);

impl SceneVisitorMut for WireframeToggle {
    fn visit_mesh(&mut self, _name: &str, mesh: &mut MeshData) {
        for material in &mut mesh.materials {
            material.wireframe = self.0;
        }
    }
}

/// Sets the wireframe flag on every material in the subtree.
pub fn set_wireframe(node: &mut SceneNode, enabled: bool) {
    node.walk_mut(&mut WireframeToggle(enabled));
}

/// Resets position, rotation and scale to identity.
pub fn normalize_model(node: &mut SceneNode) {
    node.transform = Transform::IDENTITY;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoaderError;
    use crate::test_support::{init_tracing, TRIANGLE_GLTF};
    use hoodie_core::Scale;
    use hoodie_geom::{bounding_box, box_mesh, Color, Material, NodeKind};

    struct FixedLoader;

    impl MeshLoader for FixedLoader {
        fn load(&self, _url: &str) -> Result<SceneNode, LoaderError> {
            Ok(SceneNode::group("asset")
                .with_transform(Transform {
                    position: [3.0, 2.0, 1.0],
                    rotation: [0.1, 0.2, 0.3],
                    scale: [4.0; 3],
                })
                .with_child(SceneNode::mesh(
                    "shirt",
                    box_mesh(10.0, 6.0, 2.0),
                    Material::solid(Color::WHITE),
                )))
        }
    }

    struct FailingLoader;

    impl MeshLoader for FailingLoader {
        fn load(&self, url: &str) -> Result<SceneNode, LoaderError> {
            Err(LoaderError::UnsupportedScheme(url.to_string()))
        }
    }

    fn materials(node: &SceneNode) -> Vec<&Material> {
        let mut out = Vec::new();
        if let NodeKind::Mesh(mesh) = &node.kind {
            out.extend(mesh.materials.iter());
        }
        for child in &node.children {
            out.extend(materials(child));
        }
        out
    }

    #[test]
    fn load_normalizes_and_derives_metadata() {
        init_tracing();
        let service = ModelService::new(FixedLoader);
        let model = service.load_model("models/hoodie.gltf?token=abc").unwrap();
        assert_eq!(model.kind, ModelKind::Uploaded);
        assert!(model.node.transform.is_identity());
        assert_eq!(model.metadata.name, "hoodie.gltf");
        assert_eq!(model.metadata.format, Some(ModelFormat::Gltf));
        assert_eq!(model.metadata.source, "models/hoodie.gltf?token=abc");
    }

    #[test]
    fn load_with_fit_centers_and_shrinks() {
        let service = ModelService::new(FixedLoader).with_fit(Some(2.0));
        let model = service.load_model("a.glb").unwrap();
        let aabb = bounding_box(&model.node).unwrap();
        assert!((aabb.max_extent() - 2.0).abs() < 1e-4);
        assert!(aabb.center().length() < 1e-4);
    }

    #[test]
    fn load_failure_is_wrapped() {
        let err = ModelService::new(FailingLoader)
            .load_model("ftp://x/bad.glb")
            .unwrap_err();
        assert!(err.to_string().contains("Error loading model"));
        assert!(err.to_string().contains("unsupported URL scheme"));
    }

    #[test]
    fn bad_url_rejects_with_wrapped_message() {
        let err = ModelService::<GltfLoader>::default()
            .load_model("bad-url.glb")
            .unwrap_err();
        let ModelError::Load { url, .. } = &err;
        assert_eq!(url, "bad-url.glb");
        assert!(err.to_string().starts_with("Error loading model"));
    }

    #[test]
    fn upload_uses_file_name_and_releases_url() {
        let service = ModelService::<GltfLoader>::default();
        let file = UploadedFile::new(
            "My Hoodie.gltf",
            "model/gltf+json",
            TRIANGLE_GLTF.as_bytes().to_vec(),
        );
        let model = service.load_upload(&file).unwrap();
        assert_eq!(model.metadata.name, "My Hoodie.gltf");
        assert_eq!(model.metadata.file_size, Some(TRIANGLE_GLTF.len() as u64));
        assert_eq!(model.metadata.format, Some(ModelFormat::Gltf));
        assert!(model.node.find("body").is_some());
        assert!(service.loader().object_urls().is_empty());
    }

    #[test]
    fn failed_upload_still_releases_url() {
        let service = ModelService::<GltfLoader>::default();
        let file = UploadedFile::new("broken.glb", "model/gltf-binary", vec![0u8; 16]);
        assert!(service.load_upload(&file).is_err());
        assert!(service.loader().object_urls().is_empty());
    }

    #[test]
    fn apply_transform_round_trips_present_fields() {
        let mut node = SceneNode::group("n").with_transform(Transform::from_position([1.0, 1.0, 1.0]));
        let options = TransformOptions {
            position: None,
            rotation: Some([0.0, 1.5, 0.0]),
            scale: Some(Scale::PerAxis([1.0, 2.0, 3.0])),
        };
        apply_transform(&mut node, &options);
        assert_eq!(node.transform.position, [1.0, 1.0, 1.0]);
        assert_eq!(node.transform.rotation, [0.0, 1.5, 0.0]);
        assert_eq!(node.transform.scale, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn set_wireframe_reaches_nested_materials() {
        let mut node = FixedLoader.load("").unwrap();
        if let NodeKind::Mesh(mesh) = &mut node.children[0].kind {
            mesh.materials.push(Material::solid(Color::WHITE));
        }
        set_wireframe(&mut node, true);
        let all = materials(&node);
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|m| m.wireframe));
        set_wireframe(&mut node, true);
        assert!(materials(&node).iter().all(|m| m.wireframe));
        set_wireframe(&mut node, false);
        assert!(materials(&node).iter().all(|m| !m.wireframe));
    }

    #[test]
    fn normalize_resets_everything() {
        let mut node = FixedLoader.load("").unwrap();
        normalize_model(&mut node);
        assert_eq!(node.transform, Transform::IDENTITY);
    }
}
