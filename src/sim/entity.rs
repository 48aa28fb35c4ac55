//! Floating-entity family and per-frame animator
//!
//! One polymorphic family covers every decorative element: distorted shapes,
//! glow particles, liquid blobs, rising droplets, orbit spheres and orbit
//! rings. Each entity's transform is recomputed from scratch every frame as a
//! pure function of elapsed time and its own immutable parameters - nothing
//! accumulates across frames except the orbit sphere's damped hover scale,
//! which is the one piece of event-driven state in the system.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::motion::{approach, cyclic_rise, drift3, oscillate, pulse};
use super::noise::noise3;
use crate::consts::*;
use crate::renderer::meshes::MeshHandle;

/// Fixed mesh template selector. Resolved to a [`MeshHandle`] once at scene
/// assembly; the per-frame loop never dispatches on geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GeometryKind {
    Icosahedron,
    Octahedron,
    Dodecahedron,
    Torus,
    TorusKnot,
    Sphere,
    Ring,
}

/// Behavior variant of a floating entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityKind {
    /// Tumbling geometric shape with bounded bob and organic scale wobble
    Shape { distort: f32 },
    /// Small glowing sphere whose scale pulses
    Particle,
    /// Emissive blob drifting around its anchor
    Blob,
    /// Rising droplet that wraps over a fixed vertical span
    Droplet { delay: f32 },
    /// Interactive orbiting sphere with a hover scale state machine
    OrbitSphere { index: u32 },
    /// Decorative ring with slow signed rotation
    OrbitRing { rate: f32 },
}

/// Resolved per-frame output for one entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler rotation in radians (x, y, z)
    pub rotation: Vec3,
    pub scale: Vec3,
    pub opacity: f32,
    /// Emissive intensity for the host material
    pub glow: f32,
}

impl Transform {
    fn at_rest(position: Vec3, scale: f32, opacity: f32, glow: f32) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
            scale: Vec3::splat(scale),
            opacity,
            glow,
        }
    }

    fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.rotation.is_finite()
            && self.scale.is_finite()
            && self.opacity.is_finite()
    }
}

/// A live animated entity.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    /// Anchor position, immutable after creation
    pub base_position: Vec3,
    pub color: [f32; 3],
    pub scale: f32,
    /// Time-dilation factor for this entity's motion
    pub speed: f32,
    /// Desynchronizes otherwise-identical entities
    pub phase_offset: f32,
    pub mesh: MeshHandle,
    /// Hover flag, orbit spheres only; written by pointer events
    hovered: bool,
    /// Damped pursuit of the hover scale target
    hover_scale: f32,
    /// Last good transform, retained when an update is skipped
    transform: Transform,
}

impl Entity {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u32,
        kind: EntityKind,
        base_position: Vec3,
        color: [f32; 3],
        scale: f32,
        speed: f32,
        phase_offset: f32,
        mesh: MeshHandle,
    ) -> Self {
        let opacity = match kind {
            EntityKind::Shape { .. } => 0.7,
            EntityKind::Particle => 0.8,
            EntityKind::Blob => 0.4,
            EntityKind::Droplet { .. } => 0.6,
            EntityKind::OrbitSphere { .. } => 0.9,
            EntityKind::OrbitRing { .. } => 0.2,
        };
        let glow = match kind {
            EntityKind::Blob => 0.6,
            EntityKind::Shape { .. } | EntityKind::OrbitSphere { .. } => 0.2,
            _ => 0.0,
        };
        Self {
            id,
            kind,
            base_position,
            color,
            scale,
            speed,
            phase_offset,
            mesh,
            hovered: false,
            hover_scale: HOVER_SCALE_IDLE,
            transform: Transform::at_rest(base_position, scale, opacity, glow),
        }
    }

    /// Last resolved transform (current frame's after `update`).
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn hovered(&self) -> bool {
        self.hovered
    }

    /// Flip the hover flag on a pointer enter/leave transition. The scale
    /// does not snap; it converges toward the new target on subsequent frames.
    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// Recompute the transform for the given elapsed time.
    ///
    /// A non-finite clock value (or a non-finite computed result) freezes the
    /// last good transform for this frame instead of propagating NaN.
    pub fn update(&mut self, elapsed: f32) {
        if !elapsed.is_finite() {
            log::warn!("entity {}: non-finite elapsed time, frame skipped", self.id);
            return;
        }
        let next = self.compute(elapsed);
        if next.is_finite() {
            self.transform = next;
        } else {
            log::warn!("entity {}: non-finite transform, frame skipped", self.id);
        }
    }

    fn compute(&mut self, t: f32) -> Transform {
        let mut out = self.transform;
        match self.kind {
            EntityKind::Shape { distort } => {
                out.rotation = Vec3::new(
                    t * SHAPE_SPIN_X * self.speed,
                    t * SHAPE_SPIN_Y * self.speed,
                    oscillate(t, 0.5 * self.speed, SHAPE_JITTER_AMPLITUDE, self.phase_offset),
                );
                let bob = oscillate(t, self.speed, SHAPE_BOB_AMPLITUDE, self.phase_offset);
                out.position = self.base_position + Vec3::new(0.0, bob, 0.0);
                // Organic wobble, amplitude capped by the distort amount
                let wobble = distort
                    * 0.1
                    * noise3(Vec3::new(
                        self.base_position.x,
                        self.base_position.y,
                        t * 0.5 * self.speed + self.phase_offset,
                    ));
                out.scale = Vec3::splat(self.scale * (1.0 + wobble));
            }
            EntityKind::Particle => {
                let p = pulse(t, 2.0, self.phase_offset);
                out.position = self.base_position;
                out.scale = Vec3::splat(self.scale * (0.8 + 0.4 * p));
            }
            EntityKind::Blob => {
                let ts = t * self.speed + self.phase_offset;
                out.position = self.base_position
                    + drift3(ts, Vec3::new(0.5, 0.4, 0.3), Vec3::new(0.3, 0.2, 0.1));
                out.scale = Vec3::splat(self.scale * (1.0 + ts.sin() * 0.1));
            }
            EntityKind::Droplet { delay } => {
                let ts = t + delay;
                let rise = cyclic_rise(ts, DROPLET_RISE_RATE, DROPLET_RISE_SPAN);
                let y = self.base_position.y + rise;
                out.position = Vec3::new(
                    self.base_position.x + oscillate(ts, 2.0, DROPLET_WOBBLE, 0.0),
                    y,
                    self.base_position.z,
                );
                out.scale = Vec3::splat(self.scale);
                // Fades away from the vertical center, never negative
                out.opacity = (0.6 - y.abs() * 0.3).max(0.0);
            }
            EntityKind::OrbitSphere { index } => {
                out.rotation = Vec3::new(
                    0.0,
                    t * SPHERE_SPIN_RATE + index as f32 * SPHERE_INDEX_OFFSET,
                    0.0,
                );
                let bob = oscillate(t, 1.5, 0.05, self.phase_offset);
                out.position = self.base_position + Vec3::new(0.0, bob, 0.0);
                let target = if self.hovered {
                    HOVER_SCALE_ACTIVE
                } else {
                    HOVER_SCALE_IDLE
                };
                self.hover_scale = approach(self.hover_scale, target, HOVER_APPROACH_RATE);
                out.scale = Vec3::splat(self.scale * self.hover_scale);
                out.glow = if self.hovered { 0.5 } else { 0.2 };
            }
            EntityKind::OrbitRing { rate } => {
                out.position = self.base_position;
                out.rotation = Vec3::new(std::f32::consts::FRAC_PI_2, 0.0, t * rate * RING_SPIN_RATE);
                out.scale = Vec3::splat(self.scale);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn shape(phase: f32) -> Entity {
        Entity::new(
            1,
            EntityKind::Shape { distort: 0.0 },
            Vec3::new(-3.0, 2.0, -2.0),
            [1.0, 0.0, 1.0],
            0.4,
            0.8,
            phase,
            MeshHandle(0),
        )
    }

    #[test]
    fn test_rest_state_at_t_zero() {
        let mut e = shape(0.0);
        e.update(0.0);
        let tr = e.transform();
        assert_eq!(tr.position, Vec3::new(-3.0, 2.0, -2.0));
        assert_eq!(tr.rotation, Vec3::ZERO);
        assert_eq!(tr.scale, Vec3::splat(0.4));

        let mut p = Entity::new(
            2,
            EntityKind::Particle,
            Vec3::ZERO,
            [1.0; 3],
            0.03,
            1.0,
            0.0,
            MeshHandle(0),
        );
        p.update(0.0);
        // pulse(0) = 0.5 -> 0.8 + 0.4 * 0.5 = 1.0
        assert!((p.transform().scale.x - 0.03).abs() < 1e-6);
        assert_eq!(p.transform().position, Vec3::ZERO);
    }

    #[test]
    fn test_determinism_bit_identical() {
        let mut a = shape(1.3);
        let mut b = shape(1.3);
        for &t in &[0.0, 1.5, 77.7, 4096.25] {
            a.update(t);
            b.update(t);
            assert_eq!(a.transform().position, b.transform().position);
            assert_eq!(
                a.transform().rotation.x.to_bits(),
                b.transform().rotation.x.to_bits()
            );
        }
    }

    #[test]
    fn test_phase_offset_desyncs_motion() {
        let mut a = shape(0.0);
        let mut b = shape(1.0);
        let mut diverged = 0;
        for i in 1..50 {
            let t = i as f32 * 0.61803; // avoids accidental phase alignment
            a.update(t);
            b.update(t);
            if (a.transform().position.y - b.transform().position.y).abs() > 1e-4 {
                diverged += 1;
            }
        }
        assert!(diverged >= 48, "entities moved in lockstep");
    }

    #[test]
    fn test_droplet_wrap_and_opacity_floor() {
        let mut d = Entity::new(
            3,
            EntityKind::Droplet { delay: 0.0 },
            Vec3::new(0.5, 0.0, -0.5),
            [0.4, 0.6, 1.0],
            0.03,
            1.0,
            0.0,
            MeshHandle(0),
        );
        let period = DROPLET_RISE_SPAN / DROPLET_RISE_RATE;
        d.update(1.0);
        let y1 = d.transform().position.y;
        d.update(1.0 + period);
        let y2 = d.transform().position.y;
        assert!((y1 - y2).abs() < 1e-3, "droplet rise not periodic");

        // Opacity floors at zero far from the vertical center
        let mut far = Entity::new(
            4,
            EntityKind::Droplet { delay: 0.0 },
            Vec3::new(0.0, 5.0, 0.0),
            [0.4, 0.6, 1.0],
            0.03,
            1.0,
            0.0,
            MeshHandle(0),
        );
        far.update(0.1);
        assert_eq!(far.transform().opacity, 0.0);
    }

    #[test]
    fn test_hover_scale_converges_without_overshoot() {
        let mut s = Entity::new(
            5,
            EntityKind::OrbitSphere { index: 2 },
            Vec3::new(2.0, 0.0, 0.0),
            [1.0; 3],
            0.4,
            1.0,
            0.0,
            MeshHandle(0),
        );
        s.set_hovered(true);
        let mut prev = s.transform().scale.x;
        let mut frames = 0;
        loop {
            s.update(frames as f32 / 60.0);
            let cur = s.transform().scale.x;
            assert!(cur >= prev - 1e-6, "scale regressed");
            assert!(cur <= 0.4 * HOVER_SCALE_ACTIVE + 1e-4, "overshoot");
            prev = cur;
            frames += 1;
            if (0.4 * HOVER_SCALE_ACTIVE - cur).abs() < 1e-3 {
                break;
            }
            assert!(frames < 300, "hover scale failed to converge");
        }
        // Toggle back and converge to idle
        s.set_hovered(false);
        for f in 0..300 {
            s.update(5.0 + f as f32 / 60.0);
        }
        assert!((s.transform().scale.x - 0.4).abs() < 1e-3);
    }

    #[test]
    fn test_orbit_spheres_never_angle_aligned() {
        let mk = |index| {
            Entity::new(
                10 + index,
                EntityKind::OrbitSphere { index },
                Vec3::X,
                [1.0; 3],
                0.4,
                1.0,
                0.0,
                MeshHandle(0),
            )
        };
        let mut a = mk(0);
        let mut b = mk(1);
        for i in 0..100 {
            let t = i as f32 * 0.13;
            a.update(t);
            b.update(t);
            let diff = (a.transform().rotation.y - b.transform().rotation.y).abs();
            assert!((diff - SPHERE_INDEX_OFFSET).abs() < 1e-5);
        }
    }

    #[test]
    fn test_non_finite_time_freezes_transform() {
        let mut e = shape(0.0);
        e.update(2.0);
        let before = *e.transform();
        e.update(f32::NAN);
        assert_eq!(*e.transform(), before);
        e.update(f32::INFINITY);
        assert_eq!(*e.transform(), before);
        // And recovers on the next good frame
        e.update(3.0);
        assert!(e.transform().is_finite());
    }

    proptest! {
        #[test]
        fn prop_shape_bob_bounded(t in 0.0f32..10_000.0, phase in 0.0f32..10.0) {
            let mut e = shape(phase);
            e.update(t);
            let dy = (e.transform().position.y - e.base_position.y).abs();
            prop_assert!(dy <= SHAPE_BOB_AMPLITUDE + 1e-4);
        }

        #[test]
        fn prop_blob_drift_bounded(t in 0.0f32..10_000.0) {
            let mut e = Entity::new(
                6,
                EntityKind::Blob,
                Vec3::new(-2.0, 1.0, 0.5),
                [1.0; 3],
                0.4,
                0.8,
                0.7,
                MeshHandle(0),
            );
            e.update(t);
            let d = e.transform().position - e.base_position;
            prop_assert!(d.x.abs() <= 0.3 + 1e-4);
            prop_assert!(d.y.abs() <= 0.2 + 1e-4);
            prop_assert!(d.z.abs() <= 0.1 + 1e-4);
        }

        #[test]
        fn prop_droplet_period_span(t in 0.0f32..1_000.0) {
            let rise = cyclic_rise(t, DROPLET_RISE_RATE, DROPLET_RISE_SPAN);
            prop_assert!(rise >= -DROPLET_RISE_SPAN / 2.0 - 1e-4);
            prop_assert!(rise < DROPLET_RISE_SPAN / 2.0 + 1e-4);
        }
    }
}
