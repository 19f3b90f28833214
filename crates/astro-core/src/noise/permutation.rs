//! Seeded 512-entry permutation table for the lattice sampler.

use crate::seed::SeededRng;

pub const TABLE_LEN: usize = 512;

/// A shuffle of `0..=255` stored twice, so corner hashes up to index 511 need
/// no wraparound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermutationTable {
    p: [u8; TABLE_LEN],
}

impl PermutationTable {
    /// Fisher–Yates shuffle driven by `rng`, from index 255 down to 1.
    pub fn build(rng: &mut SeededRng) -> Self {
        let mut values: [u8; 256] = std::array::from_fn(|i| i as u8);
        for i in (1..256usize).rev() {
            let r = rng.next_index(i + 1);
            values.swap(i, r);
        }
        let p = std::array::from_fn(|i| values[i % 256]);
        Self { p }
    }

    #[inline]
    pub fn get(&self, i: usize) -> usize {
        self.p[i] as usize
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upper_half_mirrors_lower_half() {
        let t = PermutationTable::build(&mut SeededRng::new("TEST-1"));
        for i in 0..256 {
            assert_eq!(t.get(i), t.get(i + 256), "mismatch at {i}");
        }
    }

    #[test]
    fn lower_half_is_a_permutation() {
        for seed in ["", "TEST-1", "QUANTUM-7", "CORE-FFFF"] {
            let t = PermutationTable::build(&mut SeededRng::new(seed));
            let mut seen = [false; 256];
            for &v in &t.as_slice()[..256] {
                assert!(!seen[v as usize], "seed {seed:?}: value {v} repeated");
                seen[v as usize] = true;
            }
            assert!(seen.iter().all(|&s| s));
        }
    }

    #[test]
    fn consumes_exactly_255_draws() {
        let mut a = SeededRng::new("draws");
        let _ = PermutationTable::build(&mut a);
        let mut b = SeededRng::new("draws");
        for _ in 0..255 {
            b.next_f64();
        }
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_is_not_identity() {
        let t = PermutationTable::build(&mut SeededRng::new("TEST-1"));
        let fixed = (0..256).filter(|&i| t.get(i) == i).count();
        assert!(fixed < 16, "{fixed} fixed points");
    }
}
