//! Fractional Brownian motion over a 3D noise source.
//!
//! Octave `i` samples at frequency `lacunarity^i` with amplitude
//! `persistence^i`. The weighted sum is divided by the summed amplitudes and
//! shifted from `[-1, 1]` into `[0, 1]`.
use ::noise::NoiseFn;

use super::lattice::LatticeNoise;
use super::params::FbmParams;

pub struct Fbm<N = LatticeNoise> {
    pub params: FbmParams,
    noise: N,
}

impl<N: NoiseFn<f64, 3>> Fbm<N> {
    pub fn new(noise: N, params: FbmParams) -> Self {
        Self { params, noise }
    }

    pub fn source(&self) -> &N {
        &self.noise
    }

    /// Evaluate at `(x, y, z)` after applying `params.scale`.
    ///
    /// Returns a value in `[0, 1]`, or exactly `0.0` when `octaves == 0`.
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let FbmParams { octaves, persistence, lacunarity, scale } = self.params;
        let (x, y, z) = (x * scale, y * scale, z * scale);
        let mut total = 0.0f64;
        let mut max_amp = 0.0f64;
        let mut amp = 1.0f64;
        let mut freq = 1.0f64;
        for _ in 0..octaves {
            total += self.noise.get([x * freq, y * freq, z * freq]) * amp;
            max_amp += amp;
            amp *= persistence;
            freq *= lacunarity;
        }
        if max_amp <= 0.0 {
            return 0.0;
        }
        ((total / max_amp + 1.0) / 2.0).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeededRng;
    use approx::assert_relative_eq;

    fn fbm(seed: &str, params: FbmParams) -> Fbm {
        Fbm::new(LatticeNoise::from_rng(&mut SeededRng::new(seed)), params)
    }

    struct Constant(f64);

    impl NoiseFn<f64, 3> for Constant {
        fn get(&self, _point: [f64; 3]) -> f64 {
            self.0
        }
    }

    #[test]
    fn output_in_unit_interval() {
        let f = fbm("TEST-1", FbmParams::new(8, 0.5, 2.1, 1.3));
        for i in 0..2000 {
            let t = i as f64 * 0.0137;
            let v = f.sample(t.sin() * 1.6, t.cos() * 1.6, (t * 0.7).sin());
            assert!((0.0..=1.0).contains(&v), "fbm {v} out of range");
        }
    }

    #[test]
    fn zero_octaves_yields_zero() {
        let f = fbm("TEST-1", FbmParams::new(0, 0.5, 2.0, 1.0));
        assert_eq!(f.sample(0.4, 0.2, 0.9), 0.0);
    }

    #[test]
    fn normalises_constant_source() {
        // A constant c in [-1, 1] must map to (c + 1) / 2 for any octave count.
        for octaves in [1, 4, 7] {
            let f = Fbm::new(Constant(0.5), FbmParams::new(octaves, 0.5, 2.0, 1.0));
            assert_relative_eq!(f.sample(1.0, 2.0, 3.0), 0.75, epsilon = 1e-12);
        }
        let f = Fbm::new(Constant(-1.0), FbmParams::default());
        assert_relative_eq!(f.sample(0.0, 0.0, 0.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn scale_is_applied_before_octaves() {
        let base = fbm("scale", FbmParams::new(5, 0.5, 2.0, 1.0));
        let scaled = fbm("scale", FbmParams::new(5, 0.5, 2.0, 2.0));
        assert_eq!(scaled.sample(0.3, 0.4, 0.5), base.sample(0.6, 0.8, 1.0));
    }

    #[test]
    fn more_octaves_add_detail() {
        let coarse = fbm("detail", FbmParams::new(1, 0.5, 2.0, 1.0));
        let fine = fbm("detail", FbmParams::new(7, 0.5, 2.0, 1.0));
        let differing = (0..200)
            .filter(|&i| {
                let t = i as f64 * 0.05 + 0.01;
                (coarse.sample(t, 0.3, 0.1) - fine.sample(t, 0.3, 0.1)).abs() > 1e-6
            })
            .count();
        assert!(differing > 150);
    }
}
