//! Mesh loading. The glTF parser itself is the `gltf` crate; this module only
//! resolves URLs and converts the document into a [`SceneNode`] tree.

use std::path::Path;

use glam::{EulerRot, Quat};
use gltf::mesh::Mode;
use hoodie_core::Transform;
use hoodie_geom::{Color, Material, MeshData, NodeKind, SceneNode, TriMesh};
use tracing::{debug, instrument};

use crate::error::LoaderError;
use crate::object_url::{ObjectUrlStore, OBJECT_URL_PREFIX};

/// Parses the mesh behind a URL into a scene graph.
pub trait MeshLoader {
    fn load(&self, url: &str) -> Result<SceneNode, LoaderError>;
}

/// glTF / GLB loader. `blob:` URLs resolve through the object-URL store,
/// `file://` URLs and bare paths through the filesystem. External buffers of
/// a file load resolve relative to its directory; textures are ignored.
#[derive(Debug, Clone, Default)]
pub struct GltfLoader {
    urls: ObjectUrlStore,
}

impl GltfLoader {
    pub fn new(urls: ObjectUrlStore) -> Self {
        Self { urls }
    }

    pub fn object_urls(&self) -> &ObjectUrlStore {
        &self.urls
    }
}

impl MeshLoader for GltfLoader {
    #[instrument(skip(self))]
    fn load(&self, url: &str) -> Result<SceneNode, LoaderError> {
        // Images are never decoded; only geometry buffers are resolved.
        let (gltf, base) = if url.starts_with(OBJECT_URL_PREFIX) {
            let bytes = self
                .urls
                .resolve(url)
                .ok_or_else(|| LoaderError::UnknownObjectUrl(url.to_string()))?;
            (gltf::Gltf::from_slice(&bytes)?, None)
        } else {
            let path = local_path(url)?;
            (gltf::Gltf::open(path)?, path.parent())
        };
        let gltf::Gltf { document, blob } = gltf;
        let buffers = gltf::import_buffers(&document, base, blob)?;
        debug!(
            nodes = document.nodes().count(),
            meshes = document.meshes().count(),
            "parsed gltf"
        );
        build_scene(&document, &buffers)
    }
}

fn local_path(url: &str) -> Result<&Path, LoaderError> {
    if let Some(path) = url.strip_prefix("file://") {
        return Ok(Path::new(path));
    }
    match url.split_once("://") {
        Some(_) => Err(LoaderError::UnsupportedScheme(url.to_string())),
        None => Ok(Path::new(url)),
    }
}

fn build_scene(
    document: &gltf::Document,
    buffers: &[gltf::buffer::Data],
) -> Result<SceneNode, LoaderError> {
    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or(LoaderError::NoScene)?;
    let mut root = SceneNode::group(scene.name().unwrap_or("Scene"));
    for node in scene.nodes() {
        root.add_child(convert_node(&node, buffers));
    }
    Ok(root)
}

fn convert_node(node: &gltf::Node<'_>, buffers: &[gltf::buffer::Data]) -> SceneNode {
    let (translation, [x, y, z, w], scale) = node.transform().decomposed();
    let (rx, ry, rz) = Quat::from_xyzw(x, y, z, w).normalize().to_euler(EulerRot::XYZ);
    let transform = Transform {
        position: translation,
        rotation: [rx, ry, rz],
        scale,
    };
    let name = node
        .name()
        .map(str::to_string)
        .unwrap_or_else(|| format!("node{}", node.index()));

    let kind = match node.mesh() {
        Some(mesh) => NodeKind::Mesh(convert_mesh(&mesh, buffers)),
        None => NodeKind::Group,
    };
    SceneNode {
        name,
        transform,
        kind,
        children: node
            .children()
            .map(|child| convert_node(&child, buffers))
            .collect(),
    }
}

/// Triangle primitives are merged into one mesh with one material slot each.
fn convert_mesh(mesh: &gltf::Mesh<'_>, buffers: &[gltf::buffer::Data]) -> MeshData {
    let mut geometry = TriMesh::default();
    let mut materials = Vec::new();

    for primitive in mesh.primitives() {
        if primitive.mode() != Mode::Triangles {
            debug!(mode = ?primitive.mode(), "skipping non-triangle primitive");
            continue;
        }
        let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));
        let Some(positions) = reader.read_positions() else {
            continue;
        };
        let positions: Vec<[f32; 3]> = positions.collect();
        let normals = match reader.read_normals() {
            Some(normals) => normals.collect(),
            None => Vec::new(),
        };
        let normals = if normals.len() == positions.len() {
            normals
        } else {
            vec![[0.0, 1.0, 0.0]; positions.len()]
        };
        let indices = match reader.read_indices() {
            Some(indices) => indices.into_u32().collect(),
            None => (0..positions.len() as u32).collect(),
        };
        geometry.append(TriMesh {
            positions,
            normals,
            indices,
        });
        materials.push(convert_material(&primitive.material()));
    }

    if materials.is_empty() {
        materials.push(Material::default());
    }
    MeshData {
        geometry,
        materials,
    }
}

fn convert_material(material: &gltf::Material<'_>) -> Material {
    let [r, g, b, a] = material.pbr_metallic_roughness().base_color_factor();
    Material {
        name: material.name().map(str::to_string),
        color: Color([r, g, b]),
        opacity: a,
        wireframe: false,
    }
}
