//! World-space bounds and fit helpers for scene subtrees.

use glam::{Mat4, Vec3};
use tracing::debug;

use crate::scene::{MeshData, SceneNode, SceneVisitor};
use crate::Aabb;

#[derive(Default)]
struct BoundsVisitor {
    aabb: Option<Aabb>,
}

impl SceneVisitor for BoundsVisitor {
    fn visit_mesh(&mut self, _node: &SceneNode, mesh: &MeshData, world: Mat4) {
        for p in &mesh.geometry.positions {
            let p = world.transform_point3(Vec3::from_array(*p));
            match self.aabb.as_mut() {
                Some(aabb) => aabb.expand(p),
                None => self.aabb = Some(Aabb::from_point(p)),
            }
        }
    }
}

/// Box around every mesh vertex in the subtree, including `node`'s own transform.
/// `None` when the subtree holds no geometry.
pub fn bounding_box(node: &SceneNode) -> Option<Aabb> {
    let mut visitor = BoundsVisitor::default();
    node.walk(&mut visitor);
    visitor.aabb
}

/// Moves `node` so the center of its bounds lands on the origin.
pub fn center(node: &mut SceneNode) {
    let Some(aabb) = bounding_box(node) else {
        debug!(node = %node.name, "nothing to center");
        return;
    };
    let position = Vec3::from_array(node.transform.position) - aabb.center();
    node.transform.position = position.to_array();
}

/// Shrinks `node` uniformly so its largest extent is at most `max_dimension`.
/// Never scales up.
pub fn scale_to_fit(node: &mut SceneNode, max_dimension: f32) {
    if !(max_dimension > 0.0) {
        return;
    }
    let Some(aabb) = bounding_box(node) else {
        return;
    };
    let largest = aabb.max_extent();
    if largest > max_dimension {
        let factor = max_dimension / largest;
        node.transform.scale = node.transform.scale.map(|s| s * factor);
        debug!(node = %node.name, factor, "scaled to fit");
    }
}
