//! Seeded noise: permutation table → lattice sampler → fBm accumulator.
pub mod fbm;
pub mod lattice;
pub mod params;
pub mod permutation;

pub use fbm::Fbm;
pub use lattice::LatticeNoise;
pub use params::FbmParams;
pub use permutation::PermutationTable;

use crate::seed::SeededRng;

/// Build an fBm over a fresh lattice sampler drawn from `rng`.
///
/// Successive calls on the same stream give independent tables, which is how
/// the height and moisture fields stay uncorrelated.
pub fn seeded_fbm(rng: &mut SeededRng, params: FbmParams) -> Fbm {
    Fbm::new(LatticeNoise::from_rng(rng), params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successive_tables_differ() {
        let mut rng = SeededRng::new("TEST-1");
        let a = seeded_fbm(&mut rng, FbmParams::default());
        let b = seeded_fbm(&mut rng, FbmParams::default());
        assert_ne!(a.source().permutation(), b.source().permutation());
    }

    #[test]
    fn matches_perlin_range_contract() {
        // The noise crate's own Perlin and ours obey the same trait and range.
        let theirs = Fbm::new(::noise::Perlin::new(7), FbmParams::new(5, 0.5, 2.0, 1.0));
        let ours = seeded_fbm(&mut SeededRng::new("7"), FbmParams::new(5, 0.5, 2.0, 1.0));
        for i in 0..500 {
            let t = i as f64 * 0.031;
            for v in [theirs.sample(t, 1.0 - t, 0.5), ours.sample(t, 1.0 - t, 0.5)] {
                assert!((0.0..=1.0).contains(&v));
            }
        }
    }
}
