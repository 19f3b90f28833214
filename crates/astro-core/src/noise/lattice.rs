//! 3D gradient lattice noise over a seeded permutation table.
//!
//! Improved-Perlin layout: quintic fade for C2 continuity, corner hashes
//! through the doubled table, and a 16-way gradient pick on the low four bits.
use ::noise::NoiseFn;

use super::permutation::PermutationTable;
use crate::seed::SeededRng;

#[derive(Debug, Clone)]
pub struct LatticeNoise {
    perm: PermutationTable,
}

impl LatticeNoise {
    pub fn new(perm: PermutationTable) -> Self {
        Self { perm }
    }

    /// Build a sampler whose table consumes the next 255 draws of `rng`.
    pub fn from_rng(rng: &mut SeededRng) -> Self {
        Self::new(PermutationTable::build(rng))
    }

    pub fn permutation(&self) -> &PermutationTable {
        &self.perm
    }

    /// Sample at `(x, y, z)`. Zero on every integer lattice point, in `[-1, 1]`.
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let (fx, fy, fz) = (x.floor(), y.floor(), z.floor());
        let xi = (fx as i64 & 255) as usize;
        let yi = (fy as i64 & 255) as usize;
        let zi = (fz as i64 & 255) as usize;
        let (x, y, z) = (x - fx, y - fy, z - fz);
        let (u, v, w) = (fade(x), fade(y), fade(z));

        let p = &self.perm;
        let a = p.get(xi) + yi;
        let aa = p.get(a) + zi;
        let ab = p.get(a + 1) + zi;
        let b = p.get(xi + 1) + yi;
        let ba = p.get(b) + zi;
        let bb = p.get(b + 1) + zi;

        let near = lerp(
            v,
            lerp(u, grad(p.get(aa), x, y, z), grad(p.get(ba), x - 1.0, y, z)),
            lerp(u, grad(p.get(ab), x, y - 1.0, z), grad(p.get(bb), x - 1.0, y - 1.0, z)),
        );
        let far = lerp(
            v,
            lerp(
                u,
                grad(p.get(aa + 1), x, y, z - 1.0),
                grad(p.get(ba + 1), x - 1.0, y, z - 1.0),
            ),
            lerp(
                u,
                grad(p.get(ab + 1), x, y - 1.0, z - 1.0),
                grad(p.get(bb + 1), x - 1.0, y - 1.0, z - 1.0),
            ),
        );
        lerp(w, near, far).clamp(-1.0, 1.0)
    }
}

impl NoiseFn<f64, 3> for LatticeNoise {
    fn get(&self, point: [f64; 3]) -> f64 {
        self.sample(point[0], point[1], point[2])
    }
}

#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// Dot product with one of twelve edge gradients (four repeated).
#[inline]
fn grad(hash: usize, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}
