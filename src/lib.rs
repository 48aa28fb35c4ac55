//! Liquid Scene - procedural animation core for a 3D presentation background
//!
//! Core modules:
//! - `sim`: Deterministic simulation (noise field, motion library, entities, surface)
//! - `renderer`: Host-facing vertex buffers and mesh templates
//! - `config`: Data-driven scene configuration and validation
//!
//! The crate computes per-frame transforms, colors and vertex buffers from a
//! single elapsed-time input; rendering and event delivery belong to the host.

pub mod config;
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, Density, SceneConfig};
pub use sim::{FrameLoop, Scene};

/// Animation tuning constants
pub mod consts {
    /// Maximum card tilt in degrees (either axis)
    pub const MAX_TILT_DEG: f32 = 10.0;

    /// Sphere scale factor targets for the hover state machine
    pub const HOVER_SCALE_IDLE: f32 = 1.0;
    pub const HOVER_SCALE_ACTIVE: f32 = 1.2;
    /// Per-frame convergence rate of the damped hover scale pursuit
    pub const HOVER_APPROACH_RATE: f32 = 0.1;

    /// Floating-shape spin coefficients (per axis, per unit speed)
    pub const SHAPE_SPIN_X: f32 = 0.2;
    pub const SHAPE_SPIN_Y: f32 = 0.3;
    /// Vertical bob amplitude for floating shapes (world units)
    pub const SHAPE_BOB_AMPLITUDE: f32 = 0.2;
    /// Roll jitter amplitude for floating shapes (radians)
    pub const SHAPE_JITTER_AMPLITUDE: f32 = 0.1;

    /// Droplet rise rate (world units per second before wrapping)
    pub const DROPLET_RISE_RATE: f32 = 0.3;
    /// Droplet rise span; vertical position wraps over exactly this distance
    pub const DROPLET_RISE_SPAN: f32 = 3.0;
    /// Droplet horizontal wobble amplitude
    pub const DROPLET_WOBBLE: f32 = 0.1;

    /// Orbit sphere spin rate and per-index angular offset
    pub const SPHERE_SPIN_RATE: f32 = 0.2;
    pub const SPHERE_INDEX_OFFSET: f32 = 0.5;

    /// Orbit ring base spin rate (scaled by the ring's signed rate)
    pub const RING_SPIN_RATE: f32 = 0.1;

    /// Global time dilation applied to the surface color pipeline
    pub const SURFACE_TIME_SCALE: f32 = 0.3;
    /// Opacity ceiling for the liquid surface
    pub const SURFACE_OPACITY: f32 = 0.85;
}

/// Smooth 0..1 ramp between two edges (clamped Hermite interpolation)
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Linear interpolation between a and b
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Expand a packed 0xRRGGBB color to [r, g, b] floats
#[inline]
pub const fn rgb_hex(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoothstep_edges() {
        assert_eq!(smoothstep(0.0, 1.0, -0.5), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 0.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 1.0), 1.0);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
        assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_smoothstep_monotone() {
        let mut prev = smoothstep(-0.6, 0.6, -0.7);
        for i in 0..100 {
            let x = -0.7 + i as f32 * 0.015;
            let v = smoothstep(-0.6, 0.6, x);
            assert!(v >= prev);
            prev = v;
        }
    }

    #[test]
    fn test_rgb_hex() {
        assert_eq!(rgb_hex(0xff0000), [1.0, 0.0, 0.0]);
        assert_eq!(rgb_hex(0x000000), [0.0, 0.0, 0.0]);
        let c = rgb_hex(0x00a0ff);
        assert!((c[1] - 160.0 / 255.0).abs() < 1e-6);
        assert_eq!(c[2], 1.0);
    }
}
