//! Scene graph, meshes and bounds utilities.

pub mod bounds;
pub mod material;
pub mod primitives;
pub mod scene;

use std::collections::BTreeSet;

use glam::{Mat4, Vec3};
use thiserror::Error;

pub use bounds::{bounding_box, center, scale_to_fit};
pub use material::{Color, Material};
pub use primitives::{box_mesh, cylinder_mesh, make_box, make_cylinder, make_hemisphere};
pub use scene::{transform_mat, MeshData, NodeKind, SceneNode, SceneVisitor, SceneVisitorMut};

#[derive(Debug, Error)]
pub enum GeomError {
    #[error("modeling failed: {0}")]
    Modeling(String),
    #[error("invalid color: {0:?}")]
    InvalidColor(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

/// Axis-aligned box. Only produced from at least one point, so `min <= max` per axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Aabb {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl TriMesh {
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn append(&mut self, other: TriMesh) {
        let base = self.positions.len() as u32;
        self.positions.extend(other.positions);
        self.normals.extend(other.normals);
        self.indices
            .extend(other.indices.into_iter().map(|idx| idx + base));
    }

    pub fn append_transformed(&mut self, other: &TriMesh, transform: Mat4) {
        let base = self.positions.len() as u32;
        self.positions.extend(other.positions.iter().map(|p| {
            let p = Vec3::from_array(*p);
            let p = transform.transform_point3(p);
            p.to_array()
        }));
        self.normals.extend(other.normals.iter().map(|n| {
            let n = Vec3::from_array(*n);
            let n = transform.transform_vector3(n);
            if n.length_squared() > 1.0e-12 {
                n.normalize().to_array()
            } else {
                [0.0, 1.0, 0.0]
            }
        }));
        self.indices
            .extend(other.indices.iter().copied().map(|idx| idx + base));
    }

    /// Unique undirected triangle edges as index pairs, smaller index first.
    ///
    /// Vertices duplicated per face (flat shading) are not merged, so a seam
    /// between two faces shows up once per side.
    pub fn edges(&self) -> Vec<[u32; 2]> {
        let mut edges = BTreeSet::new();
        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                if a != b {
                    edges.insert([a.min(b), a.max(b)]);
                }
            }
        }
        edges.into_iter().collect()
    }
}

impl Aabb {
    pub fn from_point(p: Vec3) -> Self {
        Self {
            min: p.to_array(),
            max: p.to_array(),
        }
    }

    pub fn expand(&mut self, p: Vec3) {
        self.min = Vec3::from_array(self.min).min(p).to_array();
        self.max = Vec3::from_array(self.max).max(p).to_array();
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: Vec3::from_array(self.min)
                .min(Vec3::from_array(other.min))
                .to_array(),
            max: Vec3::from_array(self.max)
                .max(Vec3::from_array(other.max))
                .to_array(),
        }
    }

    pub fn center(&self) -> Vec3 {
        (Vec3::from_array(self.min) + Vec3::from_array(self.max)) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        Vec3::from_array(self.max) - Vec3::from_array(self.min)
    }

    pub fn max_extent(&self) -> f32 {
        self.size().max_element()
    }
}
