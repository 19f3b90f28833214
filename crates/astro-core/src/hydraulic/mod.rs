//! River tracing: random restarts on high ground, bounded downhill walks, stop
//! at the sea.
//!
//! Two descent strategies share the same trial loop:
//! - [`DescentMode::IndexWindow`] samples candidates from a window of nearby
//!   vertex *indices*. Cheap, and the default.
//! - [`DescentMode::MeshAdjacency`] walks real mesh edges. Gives connected
//!   river courses but changes river shapes for a given seed.
pub mod descent;
pub mod rivers;

use serde::{Deserialize, Serialize};

pub use descent::{AdjacencyDescent, Descent, IndexWindowDescent};
pub use rivers::{trace_rivers, RiverSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescentMode {
    #[default]
    IndexWindow,
    MeshAdjacency,
}

/// Tunables of the river trial loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiverParams {
    /// Trials run per unit of river density.
    pub trials_per_density: u32,
    /// A trial only starts on vertices at least this far above sea level.
    pub source_margin: f64,
    pub max_steps: u32,
    /// Candidates drawn per step in index-window mode.
    pub candidates: u32,
    /// Index offsets are drawn from `0..window`.
    pub window: u32,
    pub mode: DescentMode,
}

impl Default for RiverParams {
    fn default() -> Self {
        Self {
            trials_per_density: 2,
            source_margin: 0.1,
            max_steps: 100,
            candidates: 12,
            window: 150,
            mode: DescentMode::IndexWindow,
        }
    }
}

impl RiverParams {
    /// One trial per density unit and shorter walks.
    pub fn polar() -> Self {
        Self { trials_per_density: 1, max_steps: 80, ..Self::default() }
    }
}
