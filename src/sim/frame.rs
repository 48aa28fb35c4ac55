//! Clock, scene assembly and the frame loop
//!
//! One update pass per display refresh: read the clock, push elapsed time
//! into the surface simulator and every entity, expose the results. Entities
//! never read each other's state, so the pass is order-independent.

use glam::Vec3;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::{Entity, EntityKind, GeometryKind, Transform};
use super::surface::SurfaceSimulator;
use crate::config::{ConfigError, SceneConfig};
use crate::consts::SPHERE_INDEX_OFFSET;
use crate::renderer::meshes::{MeshHandle, MeshRegistry};
use crate::renderer::vertex::SurfaceVertex;

/// Monotonic elapsed-time source. The only mutable global state in the core.
#[derive(Debug, Clone, Copy, Default)]
pub struct Clock {
    elapsed: f32,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed seconds since construction.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance by a frame delta. Negative or non-finite deltas are dropped so
    /// elapsed time never regresses or turns non-finite.
    pub fn advance(&mut self, dt: f32) {
        if dt.is_finite() && dt >= 0.0 {
            self.elapsed += dt;
        } else {
            log::warn!("clock: dropped invalid dt {dt}");
        }
    }
}

/// Camera description, opaque to the core, passed through to the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub fov: f32,
}

/// Assembled scene: surface, entities and their resolved mesh templates.
#[derive(Debug)]
pub struct Scene {
    camera: Camera,
    surface: Option<SurfaceSimulator>,
    entities: Vec<Entity>,
    registry: MeshRegistry,
}

impl Scene {
    /// Build a scene from a validated static configuration.
    ///
    /// All geometry is resolved to mesh handles here; assembly is the only
    /// place entities are created or configuration can be rejected.
    pub fn assemble(config: &SceneConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut registry = MeshRegistry::new();
        let mut entities = Vec::new();
        let mut next_id = 1u32;
        let mut push = |entities: &mut Vec<Entity>,
                        kind: EntityKind,
                        position: [f32; 3],
                        color: [f32; 3],
                        scale: f32,
                        speed: f32,
                        phase: f32,
                        mesh: MeshHandle| {
            let id = next_id;
            next_id += 1;
            entities.push(Entity::new(
                id,
                kind,
                Vec3::from_array(position),
                color,
                scale,
                speed,
                phase,
                mesh,
            ));
        };

        for (i, s) in config.shapes.iter().enumerate() {
            let mesh = registry.resolve(s.geometry);
            push(
                &mut entities,
                EntityKind::Shape { distort: s.distort },
                s.position,
                s.color,
                s.scale,
                s.speed,
                i as f32 * 1.3,
                mesh,
            );
        }

        for p in &config.particles {
            let mesh = registry.resolve(GeometryKind::Sphere);
            // Positional phase term keeps co-located particles out of lockstep
            push(
                &mut entities,
                EntityKind::Particle,
                p.position,
                p.color,
                p.size,
                1.0,
                p.position[0],
                mesh,
            );
        }

        for (i, b) in config.blobs.iter().enumerate() {
            let mesh = registry.resolve(GeometryKind::Sphere);
            push(
                &mut entities,
                EntityKind::Blob,
                b.position,
                b.color,
                b.scale,
                b.speed,
                i as f32 * 0.6,
                mesh,
            );
        }

        // Droplet field: assembly-time randomness only, reproducible per seed
        let mut rng = Pcg32::seed_from_u64(config.seed);
        for _ in 0..config.droplet_count {
            let position = [
                (rng.random::<f32>() - 0.5) * 4.0,
                (rng.random::<f32>() - 0.5) * 3.0,
                rng.random::<f32>() * -1.0,
            ];
            let delay = rng.random::<f32>() * 10.0;
            let mesh = registry.resolve(GeometryKind::Sphere);
            push(
                &mut entities,
                EntityKind::Droplet { delay },
                position,
                crate::rgb_hex(0x60a5fa),
                0.03,
                1.0,
                delay,
                mesh,
            );
        }

        if let Some(orbit) = &config.sphere_orbit {
            for i in 0..orbit.count {
                let angle = i as f32 / orbit.count as f32 * std::f32::consts::TAU;
                let position = [
                    angle.cos() * orbit.radius,
                    (rng.random::<f32>() - 0.5) * 0.5,
                    angle.sin() * orbit.radius,
                ];
                let mesh = registry.resolve(GeometryKind::Sphere);
                push(
                    &mut entities,
                    EntityKind::OrbitSphere { index: i as u32 },
                    position,
                    orbit.colors[i % orbit.colors.len()],
                    orbit.scale,
                    1.0,
                    i as f32 * SPHERE_INDEX_OFFSET,
                    mesh,
                );
            }
        }

        for r in &config.rings {
            let mesh = registry.resolve(GeometryKind::Ring);
            push(
                &mut entities,
                EntityKind::OrbitRing { rate: r.rate },
                [0.0; 3],
                r.color,
                r.radius,
                1.0,
                0.0,
                mesh,
            );
        }

        let surface = config.surface.clone().map(SurfaceSimulator::new);

        log::info!(
            "scene assembled: {} entities, surface: {}, {} mesh templates",
            entities.len(),
            surface.is_some(),
            registry.len(),
        );

        Ok(Self {
            camera: Camera {
                position: Vec3::from_array(config.camera.position),
                fov: config.camera.fov,
            },
            surface,
            entities,
            registry,
        })
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// One update pass: surface first, then every entity, all reading the
    /// same elapsed time and nothing else.
    pub fn update(&mut self, elapsed: f32) {
        if let Some(surface) = &mut self.surface {
            surface.update(elapsed);
        }
        for entity in &mut self.entities {
            entity.update(elapsed);
        }
    }

    /// Resolved output for every entity this frame.
    pub fn entity_transforms(&self) -> impl Iterator<Item = (u32, MeshHandle, [f32; 3], &Transform)> {
        self.entities
            .iter()
            .map(|e| (e.id, e.mesh, e.color, e.transform()))
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn registry(&self) -> &MeshRegistry {
        &self.registry
    }

    /// Displaced surface vertex buffer, if the scene has a surface.
    pub fn surface_vertices(&self) -> Option<&[SurfaceVertex]> {
        self.surface.as_ref().map(|s| s.vertices())
    }

    pub fn surface_indices(&self) -> Option<&[u32]> {
        self.surface.as_ref().map(|s| s.indices())
    }

    /// Pointer entered an interactive entity's hit area.
    pub fn pointer_enter(&mut self, id: u32) {
        self.set_hover(id, true);
    }

    /// Pointer left an interactive entity's hit area.
    pub fn pointer_leave(&mut self, id: u32) {
        self.set_hover(id, false);
    }

    fn set_hover(&mut self, id: u32, hovered: bool) {
        if let Some(entity) = self.entities.iter_mut().find(|e| e.id == id) {
            if matches!(entity.kind, EntityKind::OrbitSphere { .. }) {
                entity.set_hovered(hovered);
            }
        } else {
            log::warn!("pointer event for unknown entity {id}");
        }
    }
}

/// Drives one clock read plus one scene update per host refresh.
#[derive(Debug, Default)]
pub struct FrameLoop {
    clock: Clock,
    stopped: bool,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed(&self) -> f32 {
        self.clock.elapsed()
    }

    /// Advance the clock and run one update pass. Returns false once the
    /// loop has been stopped; the host should cancel its recurring callback.
    pub fn frame(&mut self, scene: &mut Scene, dt: f32) -> bool {
        if self.stopped {
            return false;
        }
        self.clock.advance(dt);
        scene.update(self.clock.elapsed());
        true
    }

    /// Tear-down: no further clock reads or updates happen after this.
    pub fn stop(&mut self) {
        self.stopped = true;
    }
}
