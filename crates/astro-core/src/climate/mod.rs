//! Surface climate: altitude/latitude temperature and biome classification.
//!
//! Temperature is not simulated. It is a linear cooling model over height and
//! latitude that feeds the climate matrix in [`biome`].

pub mod biome;
pub mod palette;

use serde::{Deserialize, Serialize};

pub use biome::{classify_biome, BiomeRules, MoistureBand};
pub use palette::Rgb;

/// Closed set of surface classes the classifier can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    River,
    DeepOcean,
    ShallowOcean,
    Glacier,
    Peak,
    Coast,
    Rainforest,
    SeasonalForest,
    Desert,
    TemperateForest,
    Shrubland,
    Grassland,
    Taiga,
    ColdSteppe,
    Tundra,
}

impl Biome {
    pub const ALL: [Biome; 15] = [
        Biome::River,
        Biome::DeepOcean,
        Biome::ShallowOcean,
        Biome::Glacier,
        Biome::Peak,
        Biome::Coast,
        Biome::Rainforest,
        Biome::SeasonalForest,
        Biome::Desert,
        Biome::TemperateForest,
        Biome::Shrubland,
        Biome::Grassland,
        Biome::Taiga,
        Biome::ColdSteppe,
        Biome::Tundra,
    ];

    pub fn is_ocean(self) -> bool {
        matches!(self, Biome::DeepOcean | Biome::ShallowOcean)
    }
}

/// `temperature = offset − (height × height_weight + latitude × latitude_weight)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureModel {
    pub offset: f64,
    pub height_weight: f64,
    pub latitude_weight: f64,
}

impl TemperatureModel {
    pub const fn new(offset: f64, height_weight: f64, latitude_weight: f64) -> Self {
        Self { offset, height_weight, latitude_weight }
    }

    /// Dimensionless temperature; higher is warmer.
    pub fn at(&self, height: f64, latitude: f64) -> f64 {
        self.offset - (height * self.height_weight + latitude * self.latitude_weight)
    }
}
