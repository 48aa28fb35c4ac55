//! Procedural fallback for missing decorative textures
//!
//! A missing optional image asset is not an error: the host asks for a
//! generated radial gradient instead and the scene degrades visually.

/// Build a square RGBA radial-gradient texture, `inner` at the center fading
/// to `outer` (fully transparent) at the corners. Row-major, `size * size`
/// texels.
pub fn radial_gradient(size: usize, inner: [f32; 3], outer: [f32; 3]) -> Vec<[f32; 4]> {
    let mut texels = Vec::with_capacity(size * size);
    let half = (size.max(2) - 1) as f32 / 2.0;
    for y in 0..size {
        for x in 0..size {
            let dx = (x as f32 - half) / half;
            let dy = (y as f32 - half) / half;
            let t = (dx * dx + dy * dy).sqrt().min(1.0);
            let mix = |a: f32, b: f32| a + (b - a) * t;
            texels.push([
                mix(inner[0], outer[0]),
                mix(inner[1], outer[1]),
                mix(inner[2], outer[2]),
                1.0 - t,
            ]);
        }
    }
    texels
}
