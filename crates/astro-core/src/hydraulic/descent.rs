//! Next-step selection for a river walk.
use crate::seed::SeededRng;
use crate::sphere::Icosphere;

/// Chooses where a river flows from `current`.
pub trait Descent {
    /// Lowest candidate strictly below `current`, or `current` itself when no
    /// candidate improves on it.
    fn step(&self, current: usize, heights: &[f64], rng: &mut SeededRng) -> usize;
}

/// Stochastic steepest descent over an index neighbourhood.
///
/// Draws `candidates` indices `(current + ⌊rng·window⌋) mod n`. There is no
/// adjacency graph; nearby indices are a proxy for nearby vertices.
#[derive(Debug, Clone, Copy)]
pub struct IndexWindowDescent {
    pub candidates: u32,
    pub window: u32,
}

impl Descent for IndexWindowDescent {
    fn step(&self, current: usize, heights: &[f64], rng: &mut SeededRng) -> usize {
        let n = heights.len();
        let mut best = current;
        let mut min_h = heights[current];
        for _ in 0..self.candidates {
            let candidate = (current + rng.next_index(self.window as usize)) % n;
            if heights[candidate] < min_h {
                min_h = heights[candidate];
                best = candidate;
            }
        }
        best
    }
}

/// Deterministic steepest descent along mesh edges.
#[derive(Debug, Clone)]
pub struct AdjacencyDescent {
    neighbours: Vec<Vec<u32>>,
}

impl AdjacencyDescent {
    pub fn new(neighbours: Vec<Vec<u32>>) -> Self {
        Self { neighbours }
    }

    pub fn from_mesh(mesh: &Icosphere) -> Self {
        Self::new(mesh.adjacency())
    }
}

impl Descent for AdjacencyDescent {
    fn step(&self, current: usize, heights: &[f64], _rng: &mut SeededRng) -> usize {
        let mut best = current;
        let mut min_h = heights[current];
        for &n in &self.neighbours[current] {
            let n = n as usize;
            if heights[n] < min_h {
                min_h = heights[n];
                best = n;
            }
        }
        best
    }
}
