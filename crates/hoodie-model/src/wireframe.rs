//! Procedural wireframe hoodie.

use std::f32::consts::FRAC_PI_2;

use hoodie_core::{ModelKind, ModelMetadata, Transform, WireframeOptions};
use hoodie_geom::{box_mesh, cylinder_mesh, make_hemisphere, Color, Material, SceneNode, TriMesh};
use tracing::{info, instrument, warn};

use crate::model::Model;

pub const WIREFRAME_MODEL_NAME: &str = "Wireframe Hoodie";

/// Smallest extent any generated part may have.
const MIN_DIMENSION: f32 = 0.01;
const SLEEVE_RADIUS_RATIO: f32 = 0.35;
const HOOD_MERIDIANS: usize = 24;
const HOOD_PARALLELS: usize = 8;

/// Builds the hoodie hierarchy: `body`, `leftSleeve`, `rightSleeve` and an optional `hood`.
/// Every material starts in wireframe mode.
#[instrument(skip(options), fields(width = options.width, height = options.height))]
pub fn create_wireframe_model(options: &WireframeOptions) -> Model {
    let material = Material::wireframe(Color::from_hex_or_white(&options.color));
    let width = options.width.max(MIN_DIMENSION);
    let height = options.height.max(MIN_DIMENSION);
    let depth = options.depth.max(MIN_DIMENSION);

    let mut root = SceneNode::group(WIREFRAME_MODEL_NAME);
    root.add_child(SceneNode::mesh("body", box_mesh(width, height, depth), material.clone()));

    let sleeve_length = options.sleeve_length.max(MIN_DIMENSION);
    let radius = (depth * SLEEVE_RADIUS_RATIO).max(MIN_DIMENSION);
    let reach = options.shoulder_width.max(0.0) / 2.0 + sleeve_length / 2.0;
    let y = height / 2.0 - radius;
    for (name, side) in [("leftSleeve", -1.0f32), ("rightSleeve", 1.0)] {
        let position = [side * reach, y, 0.0];
        root.add_child(sleeve(name, options.detachable_sleeves, sleeve_length, radius, side, position, &material));
    }

    if options.include_hood {
        let hood_radius = (options.hood_size / 2.0).max(MIN_DIMENSION);
        let hood = SceneNode::mesh(
            "hood",
            make_hemisphere(hood_radius, HOOD_MERIDIANS, HOOD_PARALLELS),
            material.clone(),
        )
        .with_transform(Transform::from_position([0.0, height / 2.0, -depth / 4.0]));
        root.add_child(hood);
    }

    info!(meshes = root.mesh_count(), "generated wireframe hoodie");
    Model::new(
        ModelKind::Wireframe,
        root,
        ModelMetadata::generated(WIREFRAME_MODEL_NAME),
    )
}

/// Detachable sleeves are separate cylinders; attached ones are boxes flush with the shoulder.
fn sleeve(
    name: &str,
    detachable: bool,
    length: f32,
    radius: f32,
    side: f32,
    position: [f32; 3],
    material: &Material,
) -> SceneNode {
    let attached = || {
        SceneNode::mesh(name, box_mesh(length, radius * 2.0, radius * 2.0), material.clone())
            .with_transform(Transform::from_position(position))
    };
    if !detachable {
        return attached();
    }
    match cylinder_mesh(radius, length) {
        Ok(mesh) => tube(name, mesh, side, position, material),
        Err(err) => {
            warn!(%err, sleeve = name, "cylinder sleeve failed, using box");
            attached()
        }
    }
}

fn tube(name: &str, mesh: TriMesh, side: f32, position: [f32; 3], material: &Material) -> SceneNode {
    SceneNode::mesh(name, mesh, material.clone()).with_transform(Transform {
        position,
        rotation: [0.0, 0.0, side * FRAC_PI_2],
        scale: [1.0; 3],
    })
}
