//! Primitive solids (B-rep through truck, tessellated) and procedural shells.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec3;
use tracing::{debug, instrument};
use truck_meshalgo::{filters::*, tessellation::*};
use truck_modeling::{builder, InnerSpace, Point3, Rad, Solid, Vector3};
use truck_polymesh::{PolygonMesh, StandardAttributes, StandardVertex, TOLERANCE};

use crate::{GeomError, TriMesh};

/// Chord tolerance relative to the largest dimension of the solid.
const TOLERANCE_RATIO: f64 = 0.005;

/// Box centered on the origin.
pub fn make_box(w: f64, h: f64, d: f64) -> Solid {
    let v = builder::vertex(Point3::new(-w / 2.0, -h / 2.0, -d / 2.0));
    let e = builder::tsweep(&v, Vector3::unit_x() * w);
    let f = builder::tsweep(&e, Vector3::unit_y() * h);
    builder::tsweep(&f, Vector3::unit_z() * d)
}

/// Cylinder along the Y axis, centered on the origin.
pub fn make_cylinder(r: f64, h: f64) -> Result<Solid, GeomError> {
    let vertex = builder::vertex(Point3::new(0.0, -h / 2.0, r));
    let circle = builder::rsweep(
        &vertex,
        Point3::new(0.0, 0.0, 0.0),
        Vector3::unit_y(),
        Rad(std::f64::consts::TAU),
    );
    let disk = builder::try_attach_plane(&[circle])
        .map_err(|err| GeomError::Modeling(format!("cylinder cap: {err}")))?;
    Ok(builder::tsweep(&disk, Vector3::new(0.0, h, 0.0)))
}

#[instrument]
pub fn box_mesh(w: f32, h: f32, d: f32) -> TriMesh {
    let tolerance = f64::from(w.max(h).max(d)) * TOLERANCE_RATIO;
    let mesh = tessellate_solid(
        &make_box(f64::from(w), f64::from(h), f64::from(d)),
        tolerance,
    );
    debug!(triangles = mesh.triangle_count(), "tessellated box");
    mesh
}

#[instrument]
pub fn cylinder_mesh(r: f32, h: f32) -> Result<TriMesh, GeomError> {
    let tolerance = f64::from(r.max(h)) * TOLERANCE_RATIO;
    let solid = make_cylinder(f64::from(r), f64::from(h))?;
    let mesh = tessellate_solid(&solid, tolerance);
    debug!(triangles = mesh.triangle_count(), "tessellated cylinder");
    Ok(mesh)
}

/// Upper half of a UV sphere, open at the equator, pole on +Y.
pub fn make_hemisphere(radius: f32, meridians: usize, parallels: usize) -> TriMesh {
    let meridians = meridians.max(3);
    let parallels = parallels.max(1);
    let mut mesh = TriMesh::default();

    mesh.positions.push([0.0, radius, 0.0]);
    mesh.normals.push([0.0, 1.0, 0.0]);
    for j in 1..=parallels {
        let phi = FRAC_PI_2 * j as f32 / parallels as f32;
        for i in 0..meridians {
            let theta = TAU * i as f32 / meridians as f32;
            let n = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            mesh.positions.push((n * radius).to_array());
            mesh.normals.push(n.to_array());
        }
    }

    let ring = |j: usize, i: usize| (1 + (j - 1) * meridians + i % meridians) as u32;
    for i in 0..meridians {
        mesh.indices.extend([0, ring(1, i + 1), ring(1, i)]);
    }
    for j in 1..parallels {
        for i in 0..meridians {
            let (a, b) = (ring(j, i), ring(j, i + 1));
            let (c, d) = (ring(j + 1, i), ring(j + 1, i + 1));
            mesh.indices.extend([a, d, c, a, b, d]);
        }
    }
    mesh
}

pub fn tessellate_solid(solid: &Solid, tolerance: f64) -> TriMesh {
    let mut poly = solid.triangulation(tolerance).to_polygon();
    poly.put_together_same_attrs(TOLERANCE * 10.0)
        .remove_degenerate_faces()
        .remove_unused_attrs();
    polygon_to_trimesh(&poly)
}

fn polygon_to_trimesh(poly: &PolygonMesh<StandardVertex, StandardAttributes>) -> TriMesh {
    let attrs = poly.attributes();
    let mut mesh = TriMesh::default();
    let mut index = 0u32;

    for tri in poly.faces().triangle_iter() {
        let p0 = attrs.positions[tri[0].pos];
        let p1 = attrs.positions[tri[1].pos];
        let p2 = attrs.positions[tri[2].pos];
        let fallback = face_normal(p0, p1, p2);

        for v in tri {
            let p = attrs.positions[v.pos];
            let n = v
                .nor
                .and_then(|idx| attrs.normals.get(idx))
                .map(vector_to_array)
                .unwrap_or(fallback);
            mesh.positions.push(point_to_array(p));
            mesh.normals.push(n);
            mesh.indices.push(index);
            index += 1;
        }
    }

    mesh
}

fn point_to_array(p: Point3) -> [f32; 3] {
    [p.x as f32, p.y as f32, p.z as f32]
}

fn vector_to_array(v: &Vector3) -> [f32; 3] {
    [v.x as f32, v.y as f32, v.z as f32]
}

fn face_normal(p0: Point3, p1: Point3, p2: Point3) -> [f32; 3] {
    let u = p1 - p0;
    let v = p2 - p0;
    let n = u.cross(v);
    if n.magnitude2() > 1.0e-12 {
        let n = n.normalize();
        [n.x as f32, n.y as f32, n.z as f32]
    } else {
        [0.0, 1.0, 0.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Aabb;
    use approx::assert_relative_eq;

    fn bounds(mesh: &TriMesh) -> Aabb {
        let mut points = mesh.positions.iter().map(|p| Vec3::from_array(*p));
        let mut aabb = Aabb::from_point(points.next().unwrap());
        points.for_each(|p| aabb.expand(p));
        aabb
    }

    #[test]
    fn box_mesh_is_centered() {
        let mesh = box_mesh(2.0, 4.0, 6.0);
        assert!(mesh.triangle_count() >= 12);
        let b = bounds(&mesh);
        assert_relative_eq!(b.min[0], -1.0, epsilon = 1e-4);
        assert_relative_eq!(b.max[1], 2.0, epsilon = 1e-4);
        assert_relative_eq!(b.max[2], 3.0, epsilon = 1e-4);
    }

    #[test]
    fn cylinder_runs_along_y() {
        let mesh = cylinder_mesh(1.0, 10.0).unwrap();
        let b = bounds(&mesh);
        assert_relative_eq!(b.min[1], -5.0, epsilon = 1e-4);
        assert_relative_eq!(b.max[1], 5.0, epsilon = 1e-4);
        assert!(b.max[0] <= 1.0 + 1e-3);
        assert!(b.max[0] > 0.9);
    }

    #[test]
    fn hemisphere_stays_on_upper_half() {
        let mesh = make_hemisphere(2.0, 16, 8);
        assert_eq!(mesh.vertex_count(), 1 + 16 * 8);
        assert_eq!(mesh.triangle_count(), 16 + 2 * 16 * 7);
        for p in &mesh.positions {
            assert!(p[1] >= -1e-5);
            assert_relative_eq!(Vec3::from_array(*p).length(), 2.0, epsilon = 1e-4);
        }
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
    }

    #[test]
    fn hemisphere_cap_faces_outward() {
        let mesh = make_hemisphere(1.0, 8, 2);
        let tri = &mesh.indices[0..3];
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from_array(mesh.positions[i as usize]));
        assert!((b - a).cross(c - a).y > 0.0);
    }
}
