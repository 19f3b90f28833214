//! Deterministic string-seeded random streams.
//!
//! A planet is reproducible from its seed text alone. The seed is folded into a
//! 32-bit state with FNV-1a over its UTF-16 code units, then each draw advances
//! the state with an add/xor-shift mix. Separate named streams are derived from
//! the same seed so the terrain and hydrology passes never share draws.

use rand::{Rng, RngCore};

const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

/// Divisor that maps a `u32` state onto `[0, 1)`.
const U32_RANGE: f64 = 4_294_967_296.0;

/// Stream name used for river sampling and the planet designation.
pub const HYDROLOGY_STREAM: &str = "hydrology";

/// A seeded generator of uniform doubles in `[0, 1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    /// Build the primary stream for `seed`. Any string is valid, including `""`.
    pub fn new(seed: &str) -> Self {
        Self::from_hash(fnv1a(FNV_OFFSET_BASIS, seed))
    }

    /// Build an independent stream named `stream` for `seed`.
    ///
    /// The seed hash continues over a NUL separator and then the stream name.
    pub fn derive(seed: &str, stream: &str) -> Self {
        let h = fnv1a(FNV_OFFSET_BASIS, seed);
        let h = fnv1a(h, "\u{0}");
        Self::from_hash(fnv1a(h, stream))
    }

    fn from_hash(h: u32) -> Self {
        // Zero is a fixed point of the mix.
        let state = if h == 0 { FNV_OFFSET_BASIS } else { h };
        Self { state }
    }

    #[inline]
    fn advance(&mut self) -> u32 {
        let mut h = self.state;
        h = h.wrapping_add(h << 13);
        h ^= h >> 7;
        h = h.wrapping_add(h << 3);
        h ^= h >> 17;
        h = h.wrapping_add(h << 5);
        self.state = h;
        h
    }

    /// Next uniform double in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        self.advance() as f64 / U32_RANGE
    }

    /// Uniform index in `[0, bound)`; `bound` must be non-zero.
    #[inline]
    pub fn next_index(&mut self, bound: usize) -> usize {
        (self.next_f64() * bound as f64).floor() as usize
    }
}

fn fnv1a(mut h: u32, text: &str) -> u32 {
    for unit in text.encode_utf16() {
        h = (h ^ unit as u32).wrapping_mul(FNV_PRIME);
    }
    h
}

impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        self.advance()
    }

    fn next_u64(&mut self) -> u64 {
        let hi = self.advance() as u64;
        let lo = self.advance() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.advance().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// A fresh seed such as `CORE-1A2B`, drawn from the thread RNG.
pub fn random_seed_text(prefix: &str) -> String {
    let n: u32 = rand::thread_rng().gen_range(0..0x1_0000);
    format!("{prefix}-{n:X}")
}
