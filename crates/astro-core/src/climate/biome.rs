//! Rule-ordered biome classification.
//!
//! First match wins:
//!   river (on land) → ocean (deep / shallow) → glacier → peak → coast →
//!   Whittaker-style climate matrix (three temperature bands × three moisture
//!   classes).
use serde::{Deserialize, Serialize};

use super::{Biome, TemperatureModel};

/// Wet/dry moisture cut-offs for one temperature band.
///
/// `moisture > wet` picks the wet biome, `moisture > dry` the middle one,
/// anything else the dry one. Equal thresholds collapse the band to two biomes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoistureBand {
    pub wet: f64,
    pub dry: f64,
}

impl MoistureBand {
    pub const fn new(wet: f64, dry: f64) -> Self {
        Self { wet, dry }
    }

    fn pick(self, moisture: f64, [wet, mid, dry]: [Biome; 3]) -> Biome {
        if moisture > self.wet {
            wet
        } else if moisture > self.dry {
            mid
        } else {
            dry
        }
    }
}

/// Thresholds for every rule in the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiomeRules {
    /// Ocean deeper than `sea_level - deep_ocean_depth` is deep ocean.
    pub deep_ocean_depth: f64,
    /// Latitude above which land is always glaciated.
    pub glacial_latitude: f64,
    /// Land above this height *and* above `glacial_height_latitude` is glaciated.
    pub glacial_height: f64,
    pub glacial_height_latitude: f64,
    pub peak_height: f64,
    /// Width of the sand band above sea level.
    pub coast_band: f64,
    pub temperature: TemperatureModel,
    /// Temperature cut-offs for the hot and temperate bands; below is cold.
    pub hot_above: f64,
    pub temperate_above: f64,
    pub hot: MoistureBand,
    pub temperate: MoistureBand,
    pub cold: MoistureBand,
}

impl Default for BiomeRules {
    fn default() -> Self {
        Self {
            deep_ocean_depth: 0.15,
            glacial_latitude: 0.88,
            glacial_height: 0.85,
            glacial_height_latitude: 0.6,
            peak_height: 0.82,
            coast_band: 0.02,
            temperature: TemperatureModel::new(1.0, 0.4, 0.6),
            hot_above: 0.8,
            temperate_above: 0.5,
            hot: MoistureBand::new(0.6, 0.3),
            temperate: MoistureBand::new(0.5, 0.5),
            cold: MoistureBand::new(0.4, 0.4),
        }
    }
}

impl BiomeRules {
    /// Rules tuned for the polar-ridged profile: warmer baseline, stronger
    /// latitude cooling and a wider coast.
    pub fn polar() -> Self {
        Self {
            glacial_height: 0.88,
            glacial_height_latitude: 0.5,
            coast_band: 0.03,
            temperature: TemperatureModel::new(1.2, 0.3, 0.75),
            temperate_above: 0.45,
            hot: MoistureBand::new(0.65, 0.35),
            ..Self::default()
        }
    }
}

/// Classify one surface point.
///
/// Total over all finite inputs. A river flag on a point below sea level is
/// ignored; the hydrology pass never produces one.
pub fn classify_biome(
    height: f64,
    latitude: f64,
    moisture: f64,
    sea_level: f64,
    is_river: bool,
    rules: &BiomeRules,
) -> Biome {
    let is_land = height >= sea_level;

    if is_river && is_land {
        return Biome::River;
    }
    if !is_land {
        return if height < sea_level - rules.deep_ocean_depth {
            Biome::DeepOcean
        } else {
            Biome::ShallowOcean
        };
    }
    if latitude > rules.glacial_latitude
        || (height > rules.glacial_height && latitude > rules.glacial_height_latitude)
    {
        return Biome::Glacier;
    }
    if height > rules.peak_height {
        return Biome::Peak;
    }
    if height < sea_level + rules.coast_band {
        return Biome::Coast;
    }

    let temperature = rules.temperature.at(height, latitude);
    if temperature > rules.hot_above {
        rules.hot.pick(moisture, [Biome::Rainforest, Biome::SeasonalForest, Biome::Desert])
    } else if temperature > rules.temperate_above {
        rules.temperate.pick(moisture, [Biome::TemperateForest, Biome::Shrubland, Biome::Grassland])
    } else {
        rules.cold.pick(moisture, [Biome::Taiga, Biome::ColdSteppe, Biome::Tundra])
    }
}
