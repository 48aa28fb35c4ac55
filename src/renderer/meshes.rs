//! Fixed mesh templates for the floating-entity family
//!
//! Each [`GeometryKind`](crate::sim::entity::GeometryKind) maps to one
//! precomputed unit-sized triangle mesh. Templates are built once and cached
//! in a [`MeshRegistry`]; entities hold a [`MeshHandle`] so the per-frame
//! loop never touches geometry.

use std::collections::HashMap;
use std::f32::consts::TAU;

use glam::Vec3;

use crate::sim::entity::GeometryKind;

/// Opaque handle into a [`MeshRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub usize);

/// An indexed triangle mesh in model space.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Resolves geometry kinds to mesh handles, building each template at most
/// once.
#[derive(Debug, Default)]
pub struct MeshRegistry {
    meshes: Vec<Mesh>,
    resolved: HashMap<GeometryKind, MeshHandle>,
}

impl MeshRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a geometry kind, building its template on first use.
    pub fn resolve(&mut self, kind: GeometryKind) -> MeshHandle {
        if let Some(&handle) = self.resolved.get(&kind) {
            return handle;
        }
        let mesh = match kind {
            GeometryKind::Icosahedron => icosahedron(),
            GeometryKind::Octahedron => octahedron(),
            GeometryKind::Dodecahedron => dodecahedron(),
            GeometryKind::Torus => torus(1.0, 0.4, 16, 32),
            GeometryKind::TorusKnot => torus_knot(0.8, 0.3, 100, 16, 2, 3),
            GeometryKind::Sphere => uv_sphere(1.0, 32, 32),
            GeometryKind::Ring => ring(0.98, 1.0, 64),
        };
        let handle = MeshHandle(self.meshes.len());
        self.meshes.push(mesh);
        self.resolved.insert(kind, handle);
        handle
    }

    pub fn mesh(&self, handle: MeshHandle) -> &Mesh {
        &self.meshes[handle.0]
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

/// Regular icosahedron, normalized to the unit sphere.
fn icosahedron() -> Mesh {
    let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let raw = [
        (-1.0, phi, 0.0),
        (1.0, phi, 0.0),
        (-1.0, -phi, 0.0),
        (1.0, -phi, 0.0),
        (0.0, -1.0, phi),
        (0.0, 1.0, phi),
        (0.0, -1.0, -phi),
        (0.0, 1.0, -phi),
        (phi, 0.0, -1.0),
        (phi, 0.0, 1.0),
        (-phi, 0.0, -1.0),
        (-phi, 0.0, 1.0),
    ];
    let positions: Vec<Vec3> = raw
        .iter()
        .map(|&(x, y, z)| Vec3::new(x, y, z).normalize())
        .collect();
    #[rustfmt::skip]
    let indices = vec![
        0, 11, 5,  0, 5, 1,  0, 1, 7,  0, 7, 10,  0, 10, 11,
        1, 5, 9,  5, 11, 4,  11, 10, 2,  10, 7, 6,  7, 1, 8,
        3, 9, 4,  3, 4, 2,  3, 2, 6,  3, 6, 8,  3, 8, 9,
        4, 9, 5,  2, 4, 11,  6, 2, 10,  8, 6, 7,  9, 8, 1,
    ];
    Mesh { positions, indices }
}

/// Regular octahedron with unit-length vertices.
fn octahedron() -> Mesh {
    let positions = vec![
        Vec3::X,
        Vec3::NEG_X,
        Vec3::Y,
        Vec3::NEG_Y,
        Vec3::Z,
        Vec3::NEG_Z,
    ];
    #[rustfmt::skip]
    let indices = vec![
        0, 2, 4,  2, 1, 4,  1, 3, 4,  3, 0, 4,
        2, 0, 5,  1, 2, 5,  3, 1, 5,  0, 3, 5,
    ];
    Mesh { positions, indices }
}

/// Regular dodecahedron built as the dual of the icosahedron: one vertex per
/// icosahedron face centroid, one pentagon per icosahedron vertex.
fn dodecahedron() -> Mesh {
    let ico = icosahedron();

    // Face centroids, pushed out to the unit sphere
    let positions: Vec<Vec3> = ico
        .indices
        .chunks_exact(3)
        .map(|tri| {
            let c = (ico.positions[tri[0] as usize]
                + ico.positions[tri[1] as usize]
                + ico.positions[tri[2] as usize])
                / 3.0;
            c.normalize()
        })
        .collect();

    let mut indices = Vec::with_capacity(12 * 3 * 3);
    for (vi, &vertex) in ico.positions.iter().enumerate() {
        // The five faces meeting at this icosahedron vertex form one pentagon
        let mut corners: Vec<u32> = ico
            .indices
            .chunks_exact(3)
            .enumerate()
            .filter(|(_, tri)| tri.contains(&(vi as u32)))
            .map(|(fi, _)| fi as u32)
            .collect();
        debug_assert_eq!(corners.len(), 5);

        // Order the pentagon corners by angle around the vertex direction
        let tangent = vertex.any_orthonormal_vector();
        let bitangent = vertex.cross(tangent);
        corners.sort_by(|&a, &b| {
            let angle = |i: u32| {
                let p = positions[i as usize];
                p.dot(bitangent).atan2(p.dot(tangent))
            };
            angle(a).partial_cmp(&angle(b)).unwrap_or(std::cmp::Ordering::Equal)
        });

        // Fan triangulation of the pentagon
        for k in 1..4 {
            indices.extend_from_slice(&[corners[0], corners[k], corners[k + 1]]);
        }
    }

    Mesh { positions, indices }
}

/// Latitude/longitude sphere.
fn uv_sphere(radius: f32, lat_segments: u32, lon_segments: u32) -> Mesh {
    let mut positions = Vec::new();
    for lat in 0..=lat_segments {
        let theta = lat as f32 / lat_segments as f32 * std::f32::consts::PI;
        for lon in 0..=lon_segments {
            let phi = lon as f32 / lon_segments as f32 * TAU;
            positions.push(Vec3::new(
                radius * theta.sin() * phi.cos(),
                radius * theta.cos(),
                radius * theta.sin() * phi.sin(),
            ));
        }
    }
    Mesh {
        indices: grid_indices(lat_segments, lon_segments),
        positions,
    }
}

/// Torus with main radius `radius` and tube radius `tube`.
fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Mesh {
    let mut positions = Vec::new();
    for j in 0..=radial_segments {
        let v = j as f32 / radial_segments as f32 * TAU;
        for i in 0..=tubular_segments {
            let u = i as f32 / tubular_segments as f32 * TAU;
            positions.push(Vec3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            ));
        }
    }
    Mesh {
        indices: grid_indices(radial_segments, tubular_segments),
        positions,
    }
}

/// (p, q) torus knot swept with a circular tube, following the usual
/// tangent/normal/binormal frame construction.
fn torus_knot(
    radius: f32,
    tube: f32,
    tubular_segments: u32,
    radial_segments: u32,
    p: u32,
    q: u32,
) -> Mesh {
    let curve = |u: f32| -> Vec3 {
        let qu_over_p = q as f32 / p as f32 * u;
        let cs = qu_over_p.cos();
        Vec3::new(
            radius * (2.0 + cs) * 0.5 * u.cos(),
            radius * (2.0 + cs) * 0.5 * u.sin(),
            radius * qu_over_p.sin() * 0.5,
        )
    };

    let mut positions = Vec::new();
    for i in 0..=tubular_segments {
        let u = i as f32 / tubular_segments as f32 * p as f32 * TAU;
        let p1 = curve(u);
        let p2 = curve(u + 0.01);

        let tangent = p2 - p1;
        let n = p2 + p1;
        let bitangent = tangent.cross(n).normalize();
        let normal = bitangent.cross(tangent).normalize();

        for j in 0..=radial_segments {
            let v = j as f32 / radial_segments as f32 * TAU;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();
            positions.push(p1 + cx * normal + cy * bitangent);
        }
    }
    Mesh {
        indices: grid_indices(tubular_segments, radial_segments),
        positions,
    }
}

/// Flat annulus in the XY plane.
fn ring(inner_radius: f32, outer_radius: f32, segments: u32) -> Mesh {
    let mut positions = Vec::with_capacity((segments as usize + 1) * 2);
    for i in 0..=segments {
        let theta = i as f32 / segments as f32 * TAU;
        let dir = Vec3::new(theta.cos(), theta.sin(), 0.0);
        positions.push(dir * inner_radius);
        positions.push(dir * outer_radius);
    }
    let mut indices = Vec::with_capacity(segments as usize * 6);
    for i in 0..segments {
        let a = i * 2;
        indices.extend_from_slice(&[a, a + 1, a + 2, a + 2, a + 1, a + 3]);
    }
    Mesh { positions, indices }
}

/// Quad indices for an (rows x cols) vertex grid laid out row-major with
/// cols + 1 vertices per row.
fn grid_indices(rows: u32, cols: u32) -> Vec<u32> {
    let stride = cols + 1;
    let mut indices = Vec::with_capacity((rows * cols * 6) as usize);
    for j in 0..rows {
        for i in 0..cols {
            let a = j * stride + i;
            let b = a + 1;
            let c = a + stride;
            let d = c + 1;
            indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_indices_in_bounds(mesh: &Mesh) {
        assert!(
            mesh.indices
                .iter()
                .all(|&i| (i as usize) < mesh.positions.len())
        );
        assert_eq!(mesh.indices.len() % 3, 0);
    }

    #[test]
    fn test_icosahedron_shape() {
        let m = icosahedron();
        assert_eq!(m.positions.len(), 12);
        assert_eq!(m.triangle_count(), 20);
        for p in &m.positions {
            assert!((p.length() - 1.0).abs() < 1e-5);
        }
        assert_indices_in_bounds(&m);
    }

    #[test]
    fn test_octahedron_shape() {
        let m = octahedron();
        assert_eq!(m.positions.len(), 6);
        assert_eq!(m.triangle_count(), 8);
        assert_indices_in_bounds(&m);
    }

    #[test]
    fn test_dodecahedron_shape() {
        let m = dodecahedron();
        assert_eq!(m.positions.len(), 20);
        // 12 pentagons fan-triangulated into 3 triangles each
        assert_eq!(m.triangle_count(), 36);
        for p in &m.positions {
            assert!((p.length() - 1.0).abs() < 1e-5);
        }
        assert_indices_in_bounds(&m);
    }

    #[test]
    fn test_torus_tube_radius() {
        let m = torus(1.0, 0.4, 16, 32);
        assert_indices_in_bounds(&m);
        for p in &m.positions {
            // Distance from the unit circle in the XY plane equals the tube radius
            let ring_dist = (p.truncate().length() - 1.0).hypot(p.z);
            assert!((ring_dist - 0.4).abs() < 1e-4);
        }
    }

    #[test]
    fn test_torus_knot_closed_and_bounded() {
        let m = torus_knot(0.8, 0.3, 100, 16, 2, 3);
        assert_indices_in_bounds(&m);
        assert_eq!(m.positions.len(), 101 * 17);
        for p in &m.positions {
            assert!(p.length() < 0.8 * 1.5 + 0.3 + 1e-3);
            assert!(p.is_finite());
        }
    }

    #[test]
    fn test_sphere_radius() {
        let m = uv_sphere(1.0, 32, 32);
        assert_indices_in_bounds(&m);
        for p in &m.positions {
            assert!((p.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_ring_flat() {
        let m = ring(0.98, 1.0, 64);
        assert_indices_in_bounds(&m);
        for p in &m.positions {
            assert_eq!(p.z, 0.0);
            let r = p.truncate().length();
            assert!((0.97..=1.01).contains(&r));
        }
    }

    #[test]
    fn test_registry_caches_templates() {
        let mut reg = MeshRegistry::new();
        let a = reg.resolve(GeometryKind::Torus);
        let b = reg.resolve(GeometryKind::Torus);
        let c = reg.resolve(GeometryKind::Sphere);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(reg.len(), 2);
        assert!(reg.mesh(a).triangle_count() > 0);
    }
}
