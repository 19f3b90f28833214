use serde::{Deserialize, Serialize};

/// Octave layout for one fBm field.
///
/// `scale` multiplies sample coordinates before the first octave, so the same
/// sampler can feed fields with different feature sizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FbmParams {
    pub octaves: u32,
    /// Per-octave amplitude multiplier.
    pub persistence: f64,
    /// Per-octave frequency multiplier.
    pub lacunarity: f64,
    pub scale: f64,
}

impl FbmParams {
    pub const fn new(octaves: u32, persistence: f64, lacunarity: f64, scale: f64) -> Self {
        Self { octaves, persistence, lacunarity, scale }
    }

    pub fn with_scale(self, scale: f64) -> Self {
        Self { scale, ..self }
    }
}

impl Default for FbmParams {
    fn default() -> Self {
        Self::new(6, 0.5, 2.0, 1.0)
    }
}
