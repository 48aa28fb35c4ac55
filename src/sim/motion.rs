//! Parametric motion library
//!
//! Small composable functions of elapsed time used by every animated entity.
//! All of them are pure: the same (time, parameters) pair always produces the
//! same value, and every periodic term is bounded by its amplitude so layered
//! motion can never random-walk away from an entity's anchor.

use glam::Vec3;

/// Bounded sine oscillation: `amplitude * sin(freq * t + phase)`.
#[inline]
pub fn oscillate(t: f32, freq: f32, amplitude: f32, phase: f32) -> f32 {
    amplitude * (freq * t + phase).sin()
}

/// Unit pulse in [0, 1]: `0.5 + 0.5 * sin(rate * t + phase)`.
#[inline]
pub fn pulse(t: f32, rate: f32, phase: f32) -> f32 {
    0.5 + 0.5 * (rate * t + phase).sin()
}

/// Cyclic rise: climbs linearly at `rate`, wrapping over `span` so the value
/// stays in `[-span/2, span/2)`. The wrap discontinuity is exactly `span`.
#[inline]
pub fn cyclic_rise(t: f32, rate: f32, span: f32) -> f32 {
    (t * rate).rem_euclid(span) - span / 2.0
}

/// Organic 3D drift around an anchor: independent sin/cos/sin terms per axis
/// at different frequencies, bounded componentwise by `amps`.
#[inline]
pub fn drift3(t: f32, freqs: Vec3, amps: Vec3) -> Vec3 {
    Vec3::new(
        (t * freqs.x).sin() * amps.x,
        (t * freqs.y).cos() * amps.y,
        (t * freqs.z).sin() * amps.z,
    )
}

/// One step of a damped pursuit toward `target`.
///
/// For `rate` in (0, 1] the value moves monotonically toward the target and
/// never overshoots; repeated application converges geometrically.
#[inline]
pub fn approach(current: f32, target: f32, rate: f32) -> f32 {
    current + (target - current) * rate
}
