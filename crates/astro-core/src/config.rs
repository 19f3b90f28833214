//! Generation inputs: the per-request [`TerrainConfig`] and the engine-level
//! [`GenerationProfile`].
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::climate::BiomeRules;
use crate::hydraulic::RiverParams;
use crate::noise::FbmParams;
use crate::terrain::PolarBias;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("radius must be positive and finite, got {0}")]
    InvalidRadius(f64),
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },
    #[error("unknown generation profile `{0}` (expected `classic` or `polar`)")]
    UnknownProfile(String),
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// What the UI supplies for one planet.
///
/// Field names accept the camelCase spellings a browser form sends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub seed: String,
    pub radius: f64,
    /// Icosphere subdivision level; vertex count grows with `(detail + 1)²`.
    #[serde(alias = "resolution")]
    pub detail: u32,
    /// Multiplier on the outward displacement of land.
    pub roughness: f64,
    #[serde(alias = "seaLevel")]
    pub sea_level: f64,
    /// Coordinate scale of the height field.
    #[serde(alias = "noiseScale")]
    pub noise_scale: f64,
    #[serde(alias = "riverDensity", alias = "rivers")]
    pub river_density: u32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            seed: "QUANTUM-7".to_string(),
            radius: 1.6,
            detail: 96,
            roughness: 1.5,
            sea_level: 0.45,
            noise_scale: 1.2,
            river_density: 40,
        }
    }
}

impl TerrainConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the pipeline has no defined output for.
    ///
    /// `generate` does not call this; edges that accept user input do.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(ConfigError::InvalidRadius(self.radius));
        }
        for (field, value) in [
            ("sea_level", self.sea_level),
            ("roughness", self.roughness),
            ("noise_scale", self.noise_scale),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }
        Ok(())
    }
}

/// Every tunable that is not a per-request slider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationProfile {
    pub name: String,
    /// Height field layout; its `scale` is replaced by `TerrainConfig::noise_scale`.
    pub height: FbmParams,
    /// Moisture field layout, at a fixed coarse scale.
    pub moisture: FbmParams,
    /// Base factor of `(height − sea_level) × displacement_scale × roughness`.
    pub displacement_scale: f64,
    pub polar_bias: Option<PolarBias>,
    pub rivers: RiverParams,
    pub biomes: BiomeRules,
}

impl GenerationProfile {
    pub const CLASSIC: &'static str = "classic";
    pub const POLAR: &'static str = "polar";

    /// Balanced continents with smooth climate bands.
    pub fn classic() -> Self {
        Self {
            name: Self::CLASSIC.to_string(),
            height: FbmParams::new(7, 0.5, 2.0, 1.0),
            moisture: FbmParams::new(4, 0.5, 2.0, 0.7),
            displacement_scale: 0.6,
            polar_bias: None,
            rivers: RiverParams::default(),
            biomes: BiomeRules::default(),
        }
    }

    /// Rougher terrain with mountainous poles.
    pub fn polar() -> Self {
        Self {
            name: Self::POLAR.to_string(),
            height: FbmParams::new(8, 0.5, 2.1, 1.0),
            moisture: FbmParams::new(5, 0.5, 2.1, 0.8),
            displacement_scale: 0.5,
            polar_bias: Some(PolarBias { threshold: 0.85, gain: 0.6 }),
            rivers: RiverParams::polar(),
            biomes: BiomeRules::polar(),
        }
    }

    pub fn by_name(name: &str) -> Result<Self, ConfigError> {
        match name.to_ascii_lowercase().as_str() {
            Self::CLASSIC => Ok(Self::classic()),
            Self::POLAR => Ok(Self::polar()),
            _ => Err(ConfigError::UnknownProfile(name.to_string())),
        }
    }
}

impl Default for GenerationProfile {
    fn default() -> Self {
        Self::classic()
    }
}
