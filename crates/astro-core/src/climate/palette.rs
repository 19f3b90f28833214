//! Display colours per biome.
use serde::{Deserialize, Serialize};

use super::Biome;

/// sRGB colour with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    /// From a `0xRRGGBB` literal.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn to_u8(self) -> [u8; 3] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }
}

impl Biome {
    pub fn color(self) -> Rgb {
        let hex = match self {
            Biome::River => 0x38BDF8,
            Biome::DeepOcean => 0x081E36,
            Biome::ShallowOcean => 0x0EA5E9,
            Biome::Glacier => 0xF8FAFC,
            Biome::Peak => 0x64748B,
            Biome::Coast => 0xFDE047,
            Biome::Rainforest => 0x064E3B,
            Biome::SeasonalForest => 0x166534,
            Biome::Desert => 0xD97706,
            Biome::TemperateForest => 0x15803D,
            Biome::Shrubland => 0x65A30D,
            Biome::Grassland => 0x84CC16,
            Biome::Taiga => 0x3F6212,
            Biome::ColdSteppe => 0x71717A,
            Biome::Tundra => 0x94A3B8,
        };
        Rgb::from_hex(hex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_channels() {
        let c = Rgb::from_hex(0xFF8000);
        assert_eq!(c.to_u8(), [255, 128, 0]);
    }

    #[test]
    fn every_biome_has_a_distinct_colour() {
        let colours: Vec<[u8; 3]> = Biome::ALL.iter().map(|b| b.color().to_u8()).collect();
        for (i, a) in colours.iter().enumerate() {
            for b in &colours[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
