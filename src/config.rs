//! Scene configuration and validation
//!
//! The host supplies a static description of the scene - entity tables,
//! camera, surface palette - once at assembly time; nothing here is consulted
//! during the per-frame update. Invalid configuration is rejected up front
//! and never reaches the frame loop.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rgb_hex;
use crate::sim::entity::GeometryKind;
use crate::sim::surface::SurfaceParams;

/// Scene-assembly rejection reasons.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonPositiveScale { entity: String, value: f32 },
    NonPositiveSpeed { entity: String, value: f32 },
    DistortOutOfRange { entity: String, value: f32 },
    NonFinitePosition { entity: String },
    EmptySurfaceGrid,
    EmptyOrbit,
    Json(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositiveScale { entity, value } => {
                write!(f, "{entity}: scale must be > 0, got {value}")
            }
            ConfigError::NonPositiveSpeed { entity, value } => {
                write!(f, "{entity}: speed must be > 0, got {value}")
            }
            ConfigError::DistortOutOfRange { entity, value } => {
                write!(f, "{entity}: distort must be in [0, 1], got {value}")
            }
            ConfigError::NonFinitePosition { entity } => {
                write!(f, "{entity}: position must be finite")
            }
            ConfigError::EmptySurfaceGrid => write!(f, "surface grid must have at least one quad"),
            ConfigError::EmptyOrbit => write!(f, "sphere orbit needs at least one sphere"),
            ConfigError::Json(msg) => write!(f, "scene config parse error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Shape table density, mirroring the host page's two layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    #[default]
    Normal,
    High,
}

/// Opaque camera description, passed through to the host renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub fov: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 2.5],
            fov: 70.0,
        }
    }
}

/// A tumbling distorted shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeConfig {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub geometry: GeometryKind,
    pub scale: f32,
    pub speed: f32,
    #[serde(default)]
    pub distort: f32,
}

/// A glowing pulse particle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleConfig {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub size: f32,
}

/// A drifting liquid blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlobConfig {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub scale: f32,
    pub speed: f32,
}

/// The circular sphere orbit (one sphere per configured color slot).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SphereOrbitConfig {
    pub count: usize,
    pub radius: f32,
    pub scale: f32,
    pub colors: Vec<[f32; 3]>,
}

/// A decorative counter-rotating ring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RingConfig {
    pub radius: f32,
    pub color: [f32; 3],
    /// Signed spin rate; opposite signs make a ring pair counter-rotate
    pub rate: f32,
}

/// Complete static scene description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Seed for assembly-time randomness (droplet field, orbit jitter).
    /// Hosts are free to reseed; only the shape of the motion is normative.
    pub seed: u64,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub surface: Option<SurfaceParams>,
    #[serde(default)]
    pub shapes: Vec<ShapeConfig>,
    #[serde(default)]
    pub particles: Vec<ParticleConfig>,
    #[serde(default)]
    pub blobs: Vec<BlobConfig>,
    #[serde(default)]
    pub droplet_count: usize,
    #[serde(default)]
    pub sphere_orbit: Option<SphereOrbitConfig>,
    #[serde(default)]
    pub rings: Vec<RingConfig>,
}

impl SceneConfig {
    /// Parse a host-supplied JSON scene description.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every entity entry; called by `Scene::assemble` before any
    /// entity is created.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn check_position(entity: String, p: [f32; 3]) -> Result<(), ConfigError> {
            if p.iter().all(|c| c.is_finite()) {
                Ok(())
            } else {
                Err(ConfigError::NonFinitePosition { entity })
            }
        }

        if let Some(surface) = &self.surface
            && (surface.quads_u == 0 || surface.quads_v == 0)
        {
            return Err(ConfigError::EmptySurfaceGrid);
        }
        for (i, s) in self.shapes.iter().enumerate() {
            let name = format!("shape[{i}]");
            check_position(name.clone(), s.position)?;
            if !(s.scale > 0.0) {
                return Err(ConfigError::NonPositiveScale { entity: name, value: s.scale });
            }
            if !(s.speed > 0.0) {
                return Err(ConfigError::NonPositiveSpeed { entity: name, value: s.speed });
            }
            if !(0.0..=1.0).contains(&s.distort) {
                return Err(ConfigError::DistortOutOfRange { entity: name, value: s.distort });
            }
        }
        for (i, p) in self.particles.iter().enumerate() {
            let name = format!("particle[{i}]");
            check_position(name.clone(), p.position)?;
            if !(p.size > 0.0) {
                return Err(ConfigError::NonPositiveScale { entity: name, value: p.size });
            }
        }
        for (i, b) in self.blobs.iter().enumerate() {
            let name = format!("blob[{i}]");
            check_position(name.clone(), b.position)?;
            if !(b.scale > 0.0) {
                return Err(ConfigError::NonPositiveScale { entity: name, value: b.scale });
            }
            if !(b.speed > 0.0) {
                return Err(ConfigError::NonPositiveSpeed { entity: name, value: b.speed });
            }
        }
        if let Some(orbit) = &self.sphere_orbit {
            if orbit.count == 0 || orbit.colors.is_empty() {
                return Err(ConfigError::EmptyOrbit);
            }
            if !(orbit.scale > 0.0) {
                return Err(ConfigError::NonPositiveScale {
                    entity: "sphere orbit".into(),
                    value: orbit.scale,
                });
            }
        }
        for (i, r) in self.rings.iter().enumerate() {
            if !(r.radius > 0.0) {
                return Err(ConfigError::NonPositiveScale {
                    entity: format!("ring[{i}]"),
                    value: r.radius,
                });
            }
        }
        Ok(())
    }

    /// The hero liquid background: shader surface, five blobs, thirty rising
    /// droplets.
    pub fn liquid_background(seed: u64) -> Self {
        Self {
            seed,
            camera: CameraConfig::default(),
            surface: Some(SurfaceParams::default()),
            blobs: vec![
                BlobConfig { position: [-2.0, 1.0, 0.5], color: rgb_hex(0xa855f7), scale: 0.4, speed: 0.8 },
                BlobConfig { position: [2.0, -0.5, 0.3], color: rgb_hex(0x06b6d4), scale: 0.5, speed: 1.2 },
                BlobConfig { position: [-1.0, -1.0, 0.2], color: rgb_hex(0x3b82f6), scale: 0.35, speed: 1.0 },
                BlobConfig { position: [1.5, 1.5, 0.4], color: rgb_hex(0xec4899), scale: 0.3, speed: 0.9 },
                BlobConfig { position: [0.0, 0.5, 0.6], color: rgb_hex(0x8b5cf6), scale: 0.25, speed: 1.1 },
            ],
            droplet_count: 30,
            shapes: Vec::new(),
            particles: Vec::new(),
            sphere_orbit: None,
            rings: Vec::new(),
        }
    }

    /// Parallax layer of tumbling shapes and glow particles.
    pub fn floating_elements(density: Density, seed: u64) -> Self {
        let mut shapes = vec![
            ShapeConfig { position: [-3.0, 2.0, -2.0], color: rgb_hex(0xa855f7), geometry: GeometryKind::Icosahedron, scale: 0.4, speed: 0.8, distort: 0.3 },
            ShapeConfig { position: [3.0, -1.0, -3.0], color: rgb_hex(0x06b6d4), geometry: GeometryKind::Octahedron, scale: 0.5, speed: 1.0, distort: 0.3 },
            ShapeConfig { position: [-2.0, -2.0, -2.0], color: rgb_hex(0xec4899), geometry: GeometryKind::Dodecahedron, scale: 0.35, speed: 1.2, distort: 0.3 },
        ];
        if density == Density::High {
            shapes.extend([
                ShapeConfig { position: [2.0, 2.0, -4.0], color: rgb_hex(0x3b82f6), geometry: GeometryKind::Torus, scale: 0.3, speed: 0.6, distort: 0.3 },
                ShapeConfig { position: [0.0, 3.0, -3.0], color: rgb_hex(0x10b981), geometry: GeometryKind::Icosahedron, scale: 0.25, speed: 1.1, distort: 0.3 },
                ShapeConfig { position: [-4.0, 0.0, -3.0], color: rgb_hex(0xf59e0b), geometry: GeometryKind::Octahedron, scale: 0.4, speed: 0.9, distort: 0.3 },
            ]);
        }
        Self {
            seed,
            camera: CameraConfig { position: [0.0, 0.0, 5.0], fov: 60.0 },
            surface: None,
            shapes,
            particles: vec![
                ParticleConfig { position: [-1.0, 1.0, -1.0], color: rgb_hex(0xa855f7), size: 0.03 },
                ParticleConfig { position: [1.5, 0.5, -1.5], color: rgb_hex(0x06b6d4), size: 0.04 },
                ParticleConfig { position: [-0.5, -1.0, -1.0], color: rgb_hex(0xec4899), size: 0.025 },
                ParticleConfig { position: [2.0, 1.5, -2.0], color: rgb_hex(0x3b82f6), size: 0.035 },
                ParticleConfig { position: [-2.0, -0.5, -1.5], color: rgb_hex(0x10b981), size: 0.03 },
            ],
            blobs: Vec::new(),
            droplet_count: 0,
            sphere_orbit: None,
            rings: Vec::new(),
        }
    }

    /// Interactive sphere orbit with a counter-rotating ring pair.
    pub fn sphere_orbit(count: usize, seed: u64) -> Self {
        let radius = 2.0;
        Self {
            seed,
            camera: CameraConfig { position: [0.0, 2.0, 5.0], fov: 50.0 },
            surface: None,
            shapes: Vec::new(),
            particles: Vec::new(),
            blobs: Vec::new(),
            droplet_count: 0,
            sphere_orbit: Some(SphereOrbitConfig {
                count,
                radius,
                scale: 0.4,
                colors: vec![
                    rgb_hex(0xa855f7),
                    rgb_hex(0x06b6d4),
                    rgb_hex(0xec4899),
                    rgb_hex(0x3b82f6),
                    rgb_hex(0x10b981),
                    rgb_hex(0xf59e0b),
                ],
            }),
            rings: vec![
                RingConfig { radius, color: rgb_hex(0xa855f7), rate: 0.5 },
                RingConfig { radius: radius * 0.7, color: rgb_hex(0x06b6d4), rate: -0.3 },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        SceneConfig::liquid_background(7).validate().unwrap();
        SceneConfig::floating_elements(Density::Normal, 7).validate().unwrap();
        SceneConfig::floating_elements(Density::High, 7).validate().unwrap();
        SceneConfig::sphere_orbit(8, 7).validate().unwrap();
    }

    #[test]
    fn test_density_changes_shape_count() {
        assert_eq!(SceneConfig::floating_elements(Density::Normal, 0).shapes.len(), 3);
        assert_eq!(SceneConfig::floating_elements(Density::High, 0).shapes.len(), 6);
    }

    #[test]
    fn test_rejects_non_positive_scale() {
        let mut config = SceneConfig::floating_elements(Density::Normal, 0);
        config.shapes[1].scale = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveScale { .. })
        ));
    }

    #[test]
    fn test_rejects_distort_out_of_range() {
        let mut config = SceneConfig::floating_elements(Density::Normal, 0);
        config.shapes[0].distort = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DistortOutOfRange { .. })
        ));
    }

    #[test]
    fn test_rejects_non_finite_position() {
        let mut config = SceneConfig::liquid_background(0);
        config.blobs[0].position[1] = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinitePosition { .. })
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let config = SceneConfig::sphere_orbit(6, 42);
        let json = serde_json::to_string(&config).unwrap();
        let back = SceneConfig::from_json(&json).unwrap();
        assert_eq!(back.seed, 42);
        assert_eq!(back.sphere_orbit.unwrap().count, 6);
        assert_eq!(back.rings.len(), 2);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(
            SceneConfig::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_unknown_geometry_rejected_at_parse() {
        let json = r#"{
            "seed": 1,
            "shapes": [{
                "position": [0, 0, 0], "color": [1, 0, 0],
                "geometry": "hypercube", "scale": 1.0, "speed": 1.0
            }]
        }"#;
        assert!(matches!(SceneConfig::from_json(json), Err(ConfigError::Json(_))));
    }
}
