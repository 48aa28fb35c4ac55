//! Lattice-gradient noise field
//!
//! Classic improved gradient noise over the integer lattice with fixed
//! permutation and gradient tables, so output is reproducible across runs
//! (and across ports) with no runtime random source. The field is exactly
//! zero at integer lattice points and stays within roughly [-1, 1]; the
//! surface color pipeline depends on its zero-crossings being evenly
//! distributed in sign and space.

use glam::Vec3;

/// Ken Perlin's reference permutation table.
const PERM: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209,
    76, 132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198,
    173, 186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212,
    207, 206, 59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44,
    154, 163, 70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79,
    113, 224, 232, 178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12,
    191, 179, 162, 241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157,
    184, 84, 204, 176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29,
    24, 72, 243, 141, 128, 195, 78, 66, 215, 61, 156, 180,
];

/// Gradient set: the 12 edge midpoints of a cube, statistically isotropic.
const GRAD3: [[f32; 3]; 12] = [
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [1.0, -1.0, 0.0],
    [-1.0, -1.0, 0.0],
    [1.0, 0.0, 1.0],
    [-1.0, 0.0, 1.0],
    [1.0, 0.0, -1.0],
    [-1.0, 0.0, -1.0],
    [0.0, 1.0, 1.0],
    [0.0, -1.0, 1.0],
    [0.0, 1.0, -1.0],
    [0.0, -1.0, -1.0],
];

#[inline]
fn perm(i: i32) -> i32 {
    PERM[(i & 255) as usize] as i32
}

/// Hash a lattice corner to a gradient index
#[inline]
fn grad_index(xi: i32, yi: i32, zi: i32) -> usize {
    (perm(xi + perm(yi + perm(zi))) % 12) as usize
}

#[inline]
fn grad_dot(gi: usize, x: f32, y: f32, z: f32) -> f32 {
    let g = GRAD3[gi];
    g[0] * x + g[1] * y + g[2] * z
}

/// Quintic fade curve: zero first and second derivative at t = 0 and t = 1
#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// Sample the gradient noise field at a 3D point.
///
/// Deterministic, continuous, zero at every integer lattice point, and
/// bounded to approximately [-1, 1].
pub fn noise3(p: Vec3) -> f32 {
    let xf = p.x.floor();
    let yf = p.y.floor();
    let zf = p.z.floor();
    let xi = xf as i32;
    let yi = yf as i32;
    let zi = zf as i32;

    // Position inside the lattice cell
    let x = p.x - xf;
    let y = p.y - yf;
    let z = p.z - zf;

    let u = fade(x);
    let v = fade(y);
    let w = fade(z);

    // Gradient contribution from each cell corner
    let n000 = grad_dot(grad_index(xi, yi, zi), x, y, z);
    let n100 = grad_dot(grad_index(xi + 1, yi, zi), x - 1.0, y, z);
    let n010 = grad_dot(grad_index(xi, yi + 1, zi), x, y - 1.0, z);
    let n110 = grad_dot(grad_index(xi + 1, yi + 1, zi), x - 1.0, y - 1.0, z);
    let n001 = grad_dot(grad_index(xi, yi, zi + 1), x, y, z - 1.0);
    let n101 = grad_dot(grad_index(xi + 1, yi, zi + 1), x - 1.0, y, z - 1.0);
    let n011 = grad_dot(grad_index(xi, yi + 1, zi + 1), x, y - 1.0, z - 1.0);
    let n111 = grad_dot(grad_index(xi + 1, yi + 1, zi + 1), x - 1.0, y - 1.0, z - 1.0);

    let nx00 = lerp(n000, n100, u);
    let nx10 = lerp(n010, n110, u);
    let nx01 = lerp(n001, n101, u);
    let nx11 = lerp(n011, n111, u);

    let nxy0 = lerp(nx00, nx10, v);
    let nxy1 = lerp(nx01, nx11, v);

    lerp(nxy0, nxy1, w)
}

/// One octave of the surface color stack: spatial frequency, uv offset and
/// time rate relative to the shared (already slowed) pipeline time.
#[derive(Debug, Clone, Copy)]
pub struct Octave {
    pub frequency: f32,
    pub offset: f32,
    pub time_rate: f32,
}

/// The four octaves sampled by the surface color pipeline, coarse to fine.
pub const SURFACE_OCTAVES: [Octave; 4] = [
    Octave { frequency: 2.0, offset: 0.0, time_rate: 0.5 },
    Octave { frequency: 4.0, offset: 50.0, time_rate: 0.8 },
    Octave { frequency: 6.0, offset: 100.0, time_rate: 1.2 },
    Octave { frequency: 8.0, offset: 150.0, time_rate: 1.5 },
];

/// Blend weights for the combined octave value. Sum to 1.0 and decay with
/// octave so fine detail never overwhelms the base wave shape.
pub const OCTAVE_WEIGHTS: [f32; 4] = [0.5, 0.3, 0.15, 0.05];

impl Octave {
    /// Sample this octave at surface coordinates (u, v) and pipeline time t.
    #[inline]
    pub fn sample(&self, u: f32, v: f32, t: f32) -> f32 {
        noise3(Vec3::new(
            u * self.frequency + self.offset,
            v * self.frequency + self.offset,
            t * self.time_rate,
        ))
    }
}
