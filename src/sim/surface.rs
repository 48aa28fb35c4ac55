//! Liquid surface simulator
//!
//! A fixed planar grid whose vertices are displaced by overlapping wave
//! trains and colored by a four-octave noise blend, recomputed in full every
//! frame from (u, v, elapsed). There is no per-vertex persistent state, so
//! output for a given elapsed time is bit-reproducible.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::noise::{OCTAVE_WEIGHTS, SURFACE_OCTAVES};
use crate::consts::{SURFACE_OPACITY, SURFACE_TIME_SCALE};
use crate::renderer::vertex::SurfaceVertex;
use crate::{rgb_hex, smoothstep};

/// Surface grid and palette parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceParams {
    /// Grid quads along each axis (vertex count is quads + 1)
    pub quads_u: usize,
    pub quads_v: usize,
    /// Four base colors blended by the noise octaves, dark to bright
    pub colors: [[f32; 3]; 4],
    /// Uniform scale applied to the 2x2 base plane
    pub plane_scale: [f32; 2],
    /// Depth at which the surface sits behind the scene
    pub depth: f32,
}

impl Default for SurfaceParams {
    fn default() -> Self {
        Self {
            quads_u: 64,
            quads_v: 64,
            colors: [
                rgb_hex(0x0a0a20), // deep dark blue
                rgb_hex(0x1a1040), // purple-blue
                rgb_hex(0x3b2080), // bright purple
                rgb_hex(0x00a0ff), // cyan highlight
            ],
            plane_scale: [5.0, 5.0],
            depth: -1.0,
        }
    }
}

/// The animated liquid background surface.
#[derive(Debug, Clone)]
pub struct SurfaceSimulator {
    params: SurfaceParams,
    vertices: Vec<SurfaceVertex>,
    indices: Vec<u32>,
}

impl SurfaceSimulator {
    pub fn new(params: SurfaceParams) -> Self {
        let cols = params.quads_u + 1;
        let rows = params.quads_v + 1;

        // Triangle indices never change; build them once.
        let mut indices = Vec::with_capacity(params.quads_u * params.quads_v * 6);
        for j in 0..params.quads_v {
            for i in 0..params.quads_u {
                let a = (j * cols + i) as u32;
                let b = a + 1;
                let c = a + cols as u32;
                let d = c + 1;
                indices.extend_from_slice(&[a, c, b, b, c, d]);
            }
        }

        let mut sim = Self {
            params,
            vertices: vec![SurfaceVertex::default(); cols * rows],
            indices,
        };
        sim.update(0.0);
        sim
    }

    pub fn params(&self) -> &SurfaceParams {
        &self.params
    }

    /// Displaced, colored vertex buffer for the current frame.
    pub fn vertices(&self) -> &[SurfaceVertex] {
        &self.vertices
    }

    /// Constant triangle index buffer.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Recompute every vertex for the given elapsed time.
    ///
    /// Skips the frame (keeping the previous buffer) if the clock is
    /// non-finite.
    pub fn update(&mut self, elapsed: f32) {
        if !elapsed.is_finite() {
            log::warn!("surface: non-finite elapsed time, frame skipped");
            return;
        }
        let cols = self.params.quads_u + 1;
        let rows = self.params.quads_v + 1;
        for j in 0..rows {
            let v = j as f32 / self.params.quads_v as f32;
            for i in 0..cols {
                let u = i as f32 / self.params.quads_u as f32;
                let vertex = self.shade_vertex(u, v, elapsed);
                self.vertices[j * cols + i] = vertex;
            }
        }
    }

    fn shade_vertex(&self, u: f32, v: f32, elapsed: f32) -> SurfaceVertex {
        // Base plane spans [-1, 1] on both axes before scaling
        let px = (u * 2.0 - 1.0) * self.params.plane_scale[0];
        let py = (v * 2.0 - 1.0) * self.params.plane_scale[1];

        // Local (unscaled) plane coordinates drive the wave trains, matching
        // the 2x2 base plane the frequencies were tuned for.
        let lx = u * 2.0 - 1.0;
        let ly = v * 2.0 - 1.0;

        // Three wave trains at distinct frequency/phase-speed pairs
        let wave1 = (lx * 2.0 + elapsed * 0.8).sin() * 0.15;
        let wave2 = (ly * 3.0 + elapsed * 0.6).cos() * 0.12;
        let wave3 = ((lx + ly) * 1.5 + elapsed).sin() * 0.10;
        let pz = self.params.depth + wave1 + wave2 + wave3;

        // Color pipeline on a slowed shared clock
        let t = elapsed * SURFACE_TIME_SCALE;
        let n: [f32; 4] = std::array::from_fn(|k| SURFACE_OCTAVES[k].sample(u, v, t));
        let combined: f32 = n.iter().zip(OCTAVE_WEIGHTS).map(|(nk, w)| nk * w).sum();

        let [c1, c2, c3, c4] = self.params.colors.map(Vec3::from_array);
        let mut color = c1.lerp(c2, smoothstep(-0.6, 0.6, n[0]));
        color = color.lerp(c3, smoothstep(-0.3, 0.5, n[1]) * 0.6);
        color = color.lerp(c4, smoothstep(0.2, 0.8, n[2]) * 0.4);

        // Liquid sheen where the combined octaves crest
        let highlight = smoothstep(0.4, 0.9, combined);
        color += highlight * Vec3::new(0.3, 0.4, 0.5);

        // Caustic-like glow keyed to the second octave's magnitude
        let glow = smoothstep(0.3, 1.0, n[1].abs()).powi(2) * 0.5;
        color += glow * c3;

        // Small-amplitude ripple overlay, phase-shifted by the octaves
        let mut ripple = (u * 20.0 + t * 2.0 + n[0] * 5.0).sin() * 0.5 + 0.5;
        ripple *= (v * 15.0 + t * 1.5 + n[1] * 4.0).sin() * 0.5 + 0.5;
        color += ripple * 0.08 * c4;

        // Separable edge falloff so the surface fades out at its boundary
        let mut alpha = smoothstep(0.0, 0.25, v) * smoothstep(1.0, 0.75, v);
        alpha *= smoothstep(0.0, 0.15, u) * smoothstep(1.0, 0.85, u);
        alpha *= SURFACE_OPACITY;

        SurfaceVertex {
            position: [px, py, pz],
            color: [color.x, color.y, color.z, alpha],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_surface() -> SurfaceSimulator {
        SurfaceSimulator::new(SurfaceParams {
            quads_u: 8,
            quads_v: 8,
            ..SurfaceParams::default()
        })
    }

    #[test]
    fn test_buffer_sizes() {
        let s = small_surface();
        assert_eq!(s.vertices().len(), 9 * 9);
        assert_eq!(s.indices().len(), 8 * 8 * 6);
        assert!(s.indices().iter().all(|&i| (i as usize) < s.vertices().len()));
    }

    #[test]
    fn test_bit_reproducible_for_fixed_time() {
        let mut a = small_surface();
        let mut b = small_surface();
        a.update(12.75);
        b.update(12.75);
        for (va, vb) in a.vertices().iter().zip(b.vertices()) {
            assert_eq!(va.position[2].to_bits(), vb.position[2].to_bits());
            assert_eq!(va.color.map(f32::to_bits), vb.color.map(f32::to_bits));
        }
    }

    #[test]
    fn test_displacement_bounded() {
        let mut s = small_surface();
        for i in 0..50 {
            s.update(i as f32 * 3.3);
            for v in s.vertices() {
                let dz = v.position[2] - s.params().depth;
                // Three wave amplitudes sum to 0.37
                assert!(dz.abs() <= 0.37 + 1e-4);
            }
        }
    }

    #[test]
    fn test_edges_fade_to_transparent() {
        let mut s = small_surface();
        s.update(5.0);
        let cols = 9;
        // Entire boundary row/column has zero alpha (smoothstep at u or v = 0/1)
        for i in 0..cols {
            assert_eq!(s.vertices()[i].color[3], 0.0); // v = 0 row
            assert_eq!(s.vertices()[(cols - 1) * cols + i].color[3], 0.0); // v = 1 row
        }
        // Interior is visible
        let center = s.vertices()[4 * cols + 4];
        assert!(center.color[3] > 0.3);
        assert!(center.color[3] <= SURFACE_OPACITY + 1e-6);
    }

    #[test]
    fn test_non_finite_time_keeps_previous_frame() {
        let mut s = small_surface();
        s.update(3.0);
        let before: Vec<[f32; 3]> = s.vertices().iter().map(|v| v.position).collect();
        s.update(f32::NAN);
        let after: Vec<[f32; 3]> = s.vertices().iter().map(|v| v.position).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_colors_stay_renderable() {
        let mut s = small_surface();
        for i in 0..20 {
            s.update(i as f32 * 7.7);
            for v in s.vertices() {
                for c in v.color {
                    assert!(c.is_finite());
                    assert!(c >= 0.0);
                }
                // Additive sheen terms can push past 1.0 slightly but must
                // stay in a sane HDR-ish range for the host to tonemap.
                assert!(v.color[0] < 3.0 && v.color[1] < 3.0 && v.color[2] < 3.0);
            }
        }
    }
}
