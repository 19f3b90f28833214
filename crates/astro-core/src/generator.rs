//! Pipeline orchestrator: runs all generation stages in order.
//!
//! icosphere → terrain stream → height & moisture fBm → field →
//! hydrology stream → rivers → biome classifier → displaced mesh.

use serde::{Deserialize, Serialize};
use tracing::{debug, info_span};

use crate::config::{GenerationProfile, TerrainConfig};
use crate::hydraulic::{
    trace_rivers, AdjacencyDescent, Descent, DescentMode, IndexWindowDescent, RiverSet,
};
use crate::mesh::{deform_and_color, DeformParams, PlanetMesh};
use crate::noise::seeded_fbm;
use crate::seed::{SeededRng, HYDROLOGY_STREAM};
use crate::sphere::{Icosphere, Vec3};
use crate::terrain::{build_terrain_field, TerrainField};

/// Catalogue names shown next to the summary statistics.
pub const DESIGNATIONS: [&str; 5] = ["Borealis", "Zion", "Helios", "Terra", "Delta"];

/// Statistics a UI displays after generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetSummary {
    pub seed: String,
    pub profile: String,
    pub vertex_count: usize,
    pub river_count: usize,
    /// Share of vertices at or above sea level, in `[0, 1]`.
    pub land_fraction: f64,
    pub designation: String,
}

/// Derived values for one vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexSample {
    /// Undisplaced position on the base sphere.
    pub position: Vec3,
    pub height: f64,
    pub moisture: f64,
    pub latitude: f64,
    pub is_river: bool,
}

/// Full output of one generation pass.
#[derive(Debug, Clone)]
pub struct PlanetResult {
    pub config: TerrainConfig,
    pub base_positions: Vec<Vec3>,
    pub field: TerrainField,
    pub rivers: RiverSet,
    pub mesh: PlanetMesh,
    pub summary: PlanetSummary,
}

impl PlanetResult {
    pub fn sample(&self, vertex: usize) -> Option<VertexSample> {
        let position = *self.base_positions.get(vertex)?;
        Some(VertexSample {
            position,
            height: self.field.heights[vertex],
            moisture: self.field.moistures[vertex],
            latitude: self.field.latitudes[vertex],
            is_river: self.rivers.contains(vertex),
        })
    }

    pub fn samples(&self) -> impl Iterator<Item = VertexSample> + '_ {
        (0..self.base_positions.len()).filter_map(|i| self.sample(i))
    }
}

/// The main pipeline orchestrator. Holds no state between calls.
#[derive(Debug, Clone, Default)]
pub struct PlanetGenerator {
    profile: GenerationProfile,
}

impl PlanetGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(profile: GenerationProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &GenerationProfile {
        &self.profile
    }

    /// Run the full pipeline for `config`.
    ///
    /// Deterministic: the same config and profile give bit-identical fields,
    /// rivers and colours. Inputs are not validated; see
    /// [`TerrainConfig::validate`].
    pub fn generate(&self, config: &TerrainConfig) -> PlanetResult {
        let _span = info_span!("generate", seed = %config.seed, detail = config.detail).entered();
        let profile = &self.profile;

        // ── 1. Base sphere ──────────────────────────────────────────────────
        let sphere = Icosphere::new(config.radius, config.detail);
        debug!(vertices = sphere.vertex_count(), "icosphere built");

        // ── 2. Height & moisture fields (terrain stream) ────────────────────
        let mut terrain_rng = SeededRng::new(&config.seed);
        let height = seeded_fbm(&mut terrain_rng, profile.height.with_scale(config.noise_scale));
        let moisture = seeded_fbm(&mut terrain_rng, profile.moisture);
        let field = build_terrain_field(
            &sphere.vertices,
            config.radius,
            &height,
            &moisture,
            profile.polar_bias,
        );
        let land_fraction = field.land_fraction(config.sea_level);
        debug!(land_fraction, "terrain field evaluated");

        // ── 3. Hydrology (hydrology stream) ─────────────────────────────────
        let mut river_rng = SeededRng::derive(&config.seed, HYDROLOGY_STREAM);
        let descent: Box<dyn Descent> = match profile.rivers.mode {
            DescentMode::IndexWindow => Box::new(IndexWindowDescent {
                candidates: profile.rivers.candidates,
                window: profile.rivers.window.max(1),
            }),
            DescentMode::MeshAdjacency => Box::new(AdjacencyDescent::from_mesh(&sphere)),
        };
        let rivers = trace_rivers(
            &field.heights,
            config.sea_level,
            config.river_density,
            &mut river_rng,
            &profile.rivers,
            descent.as_ref(),
        );
        debug!(river_vertices = rivers.len(), sources = rivers.sources().len(), "rivers traced");
        let designation = DESIGNATIONS[river_rng.next_index(DESIGNATIONS.len())].to_string();

        // ── 4. Classify & deform ────────────────────────────────────────────
        let mesh = deform_and_color(
            &sphere,
            &field,
            &rivers,
            &DeformParams {
                sea_level: config.sea_level,
                displacement_scale: profile.displacement_scale,
                roughness: config.roughness,
                rules: &profile.biomes,
            },
        );

        let summary = PlanetSummary {
            seed: config.seed.clone(),
            profile: profile.name.clone(),
            vertex_count: sphere.vertex_count(),
            river_count: rivers.len(),
            land_fraction,
            designation,
        };

        PlanetResult {
            config: config.clone(),
            base_positions: sphere.vertices,
            field,
            rivers,
            mesh,
            summary,
        }
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
