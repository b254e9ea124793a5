//! Scene graph with tagged group/mesh nodes.

use glam::{EulerRot, Mat4, Quat, Vec3};
use hoodie_core::Transform;

use crate::{Material, TriMesh};

#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub geometry: TriMesh,
    /// One entry per material slot; most meshes carry exactly one.
    pub materials: Vec<Material>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Group,
    Mesh(MeshData),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub name: String,
    pub transform: Transform,
    pub kind: NodeKind,
    pub children: Vec<SceneNode>,
}

/// Read-only traversal. `world` already includes the node's own transform.
pub trait SceneVisitor {
    fn visit_group(&mut self, _node: &SceneNode, _world: Mat4) {}

    fn visit_mesh(&mut self, node: &SceneNode, mesh: &MeshData, world: Mat4);
}

pub trait SceneVisitorMut {
    fn visit_group(&mut self, _name: &str) {}

    fn visit_mesh(&mut self, name: &str, mesh: &mut MeshData);
}

impl SceneNode {
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
            kind: NodeKind::Group,
            children: Vec::new(),
        }
    }

    pub fn mesh(name: impl Into<String>, geometry: TriMesh, material: Material) -> Self {
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
            kind: NodeKind::Mesh(MeshData {
                geometry,
                materials: vec![material],
            }),
            children: Vec::new(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn add_child(&mut self, child: SceneNode) {
        self.children.push(child);
    }

    pub fn is_mesh(&self) -> bool {
        matches!(self.kind, NodeKind::Mesh(_))
    }

    /// Depth-first search by name, starting with this node.
    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut SceneNode> {
        if self.name == name {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|child| child.find_mut(name))
    }

    pub fn local_matrix(&self) -> Mat4 {
        transform_mat(&self.transform)
    }

    /// Visits this node and its descendants, treating this node as a root.
    pub fn walk<V: SceneVisitor + ?Sized>(&self, visitor: &mut V) {
        self.walk_from(Mat4::IDENTITY, visitor);
    }

    fn walk_from<V: SceneVisitor + ?Sized>(&self, parent: Mat4, visitor: &mut V) {
        let world = parent * self.local_matrix();
        match &self.kind {
            NodeKind::Group => visitor.visit_group(self, world),
            NodeKind::Mesh(mesh) => visitor.visit_mesh(self, mesh, world),
        }
        for child in &self.children {
            child.walk_from(world, visitor);
        }
    }

    pub fn walk_mut<V: SceneVisitorMut + ?Sized>(&mut self, visitor: &mut V) {
        match &mut self.kind {
            NodeKind::Group => visitor.visit_group(&self.name),
            NodeKind::Mesh(mesh) => visitor.visit_mesh(&self.name, mesh),
        }
        for child in &mut self.children {
            child.walk_mut(visitor);
        }
    }

    pub fn mesh_count(&self) -> usize {
        let own = usize::from(self.is_mesh());
        own + self.children.iter().map(SceneNode::mesh_count).sum::<usize>()
    }

    /// All geometry in the subtree merged into one mesh in world space.
    pub fn flatten(&self) -> TriMesh {
        struct Flatten(TriMesh);

        impl SceneVisitor for Flatten {
            fn visit_mesh(&mut self, _node: &SceneNode, mesh: &MeshData, world: Mat4) {
                self.0.append_transformed(&mesh.geometry, world);
            }
        }

        let mut flatten = Flatten(TriMesh::default());
        self.walk(&mut flatten);
        flatten.0
    }
}

/// Scale, then XYZ Euler rotation, then translation.
pub fn transform_mat(transform: &Transform) -> Mat4 {
    let [rx, ry, rz] = transform.rotation;
    Mat4::from_scale_rotation_translation(
        Vec3::from_array(transform.scale),
        Quat::from_euler(EulerRot::XYZ, rx, ry, rz),
        Vec3::from_array(transform.position),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;
    use approx::assert_relative_eq;

    fn point_mesh(p: [f32; 3]) -> TriMesh {
        TriMesh {
            positions: vec![p, p, p],
            normals: vec![[0.0, 1.0, 0.0]; 3],
            indices: vec![0, 1, 2],
        }
    }

    fn tree() -> SceneNode {
        SceneNode::group("root")
            .with_transform(Transform::from_position([10.0, 0.0, 0.0]))
            .with_child(
                SceneNode::group("arm")
                    .with_transform(Transform::from_position([0.0, 5.0, 0.0]))
                    .with_child(SceneNode::mesh(
                        "hand",
                        point_mesh([1.0, 0.0, 0.0]),
                        Material::solid(Color::WHITE),
                    )),
            )
            .with_child(SceneNode::mesh(
                "torso",
                point_mesh([0.0, 0.0, 0.0]),
                Material::solid(Color::WHITE),
            ))
    }

    #[test]
    fn find_searches_depth_first() {
        let mut root = tree();
        assert_eq!(root.find("hand").map(|n| n.is_mesh()), Some(true));
        assert!(root.find("missing").is_none());
        root.find_mut("arm").unwrap().name = "leftArm".to_string();
        assert!(root.find("leftArm").is_some());
        assert_eq!(root.mesh_count(), 2);
    }

    #[test]
    fn flatten_applies_parent_transforms() {
        let mesh = tree().flatten();
        assert_eq!(mesh.vertex_count(), 6);
        assert_relative_eq!(mesh.positions[0][0], 11.0);
        assert_relative_eq!(mesh.positions[0][1], 5.0);
        assert_relative_eq!(mesh.positions[3][0], 10.0);
    }

    #[test]
    fn rotation_uses_xyz_euler_order() {
        let t = Transform {
            position: [0.0; 3],
            rotation: [0.0, 0.0, std::f32::consts::FRAC_PI_2],
            scale: [2.0; 3],
        };
        let p = transform_mat(&t).transform_point3(Vec3::X);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn walk_mut_reaches_every_mesh() {
        struct Count(usize);
        impl SceneVisitorMut for Count {
            fn visit_mesh(&mut self, _name: &str, mesh: &mut MeshData) {
                self.0 += mesh.materials.len();
            }
        }
        let mut root = tree();
        let mut count = Count(0);
        root.walk_mut(&mut count);
        assert_eq!(count.0, 2);
    }
}
