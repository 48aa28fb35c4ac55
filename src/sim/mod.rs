//! Deterministic simulation module
//!
//! All animation logic lives here. This module must be pure and deterministic:
//! - Every transform is a function of elapsed time and static parameters
//! - Fixed noise tables, seeded assembly-time RNG only
//! - No rendering or platform dependencies

pub mod entity;
pub mod frame;
pub mod motion;
pub mod noise;
pub mod surface;
pub mod tilt;

pub use entity::{Entity, EntityKind, GeometryKind, Transform};
pub use frame::{Camera, Clock, FrameLoop, Scene};
pub use motion::{approach, cyclic_rise, drift3, oscillate, pulse};
pub use noise::{noise3, OCTAVE_WEIGHTS, SURFACE_OCTAVES};
pub use surface::{SurfaceParams, SurfaceSimulator};
pub use tilt::{Rect, TiltState};
