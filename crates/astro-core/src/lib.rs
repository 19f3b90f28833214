//! Procedural planet generation: seeded 3D lattice noise, stochastic river
//! tracing and rule-ordered biome colouring over a subdivided sphere.
//!
//! ```no_run
//! use astro_core::{PlanetGenerator, TerrainConfig};
//!
//! let planet = PlanetGenerator::new().generate(&TerrainConfig::default());
//! let summary = &planet.summary;
//! println!("{} rivers, {:.0}% land", summary.river_count, summary.land_fraction * 100.0);
//! ```
pub mod climate;
pub mod config;
pub mod generator;
pub mod hydraulic;
pub mod mesh;
pub mod noise;
pub mod publish;
pub mod seed;
pub mod sphere;
pub mod terrain;

pub use config::{ConfigError, GenerationProfile, TerrainConfig};
pub use generator::{PlanetGenerator, PlanetResult, PlanetSummary, VertexSample};
pub use mesh::PlanetMesh;
pub use publish::PlanetSlot;
pub use seed::{random_seed_text, SeededRng};
