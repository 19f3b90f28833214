//! Per-vertex height, moisture and latitude fields.
//!
//! Height and moisture come from two independent fBm fields over the vertex
//! position. Latitude is `|y| / radius` and is kept apart from the noise; only
//! the optional polar bias feeds it back into height.
#[cfg(feature = "threading")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::noise::Fbm;
use crate::sphere::Vec3;

/// Raise heights poleward of `threshold` by `(latitude − threshold) × gain`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarBias {
    pub threshold: f64,
    pub gain: f64,
}

impl PolarBias {
    pub fn apply(&self, height: f64, latitude: f64) -> f64 {
        if latitude > self.threshold {
            height + (latitude - self.threshold) * self.gain
        } else {
            height
        }
    }
}

/// Parallel per-vertex arrays, one entry per mesh vertex.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TerrainField {
    pub heights: Vec<f64>,
    pub moistures: Vec<f64>,
    pub latitudes: Vec<f64>,
}

impl TerrainField {
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Fraction of vertices at or above `sea_level`; 0 for an empty field.
    pub fn land_fraction(&self, sea_level: f64) -> f64 {
        if self.heights.is_empty() {
            return 0.0;
        }
        let land = self.heights.iter().filter(|&&h| h >= sea_level).count();
        land as f64 / self.heights.len() as f64
    }
}

/// Evaluate both fields at every position.
///
/// `height` and `moisture` carry their own scale and octave layout.
pub fn build_terrain_field(
    positions: &[Vec3],
    radius: f64,
    height: &Fbm,
    moisture: &Fbm,
    polar_bias: Option<PolarBias>,
) -> TerrainField {
    let eval = |p: &Vec3| -> (f64, f64, f64) {
        let latitude = if radius > 0.0 { (p.y / radius).abs() } else { 0.0 };
        let mut h = height.sample(p.x, p.y, p.z);
        if let Some(bias) = polar_bias {
            h = bias.apply(h, latitude);
        }
        let m = moisture.sample(p.x, p.y, p.z);
        (h, m, latitude)
    };

    #[cfg(feature = "threading")]
    let samples: Vec<(f64, f64, f64)> = positions.par_iter().map(eval).collect();
    #[cfg(not(feature = "threading"))]
    let samples: Vec<(f64, f64, f64)> = positions.iter().map(eval).collect();

    let mut field = TerrainField {
        heights: Vec::with_capacity(samples.len()),
        moistures: Vec::with_capacity(samples.len()),
        latitudes: Vec::with_capacity(samples.len()),
    };
    for (h, m, lat) in samples {
        field.heights.push(h);
        field.moistures.push(m);
        field.latitudes.push(lat);
    }
    field
}
