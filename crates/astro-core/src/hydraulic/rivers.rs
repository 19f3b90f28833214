//! Random-restart river tracing.
use super::descent::Descent;
use super::RiverParams;
use crate::seed::SeededRng;

/// Vertices marked as river course members, plus the trial sources that
/// actually started a river.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RiverSet {
    members: Vec<bool>,
    len: usize,
    sources: Vec<usize>,
}

impl RiverSet {
    pub fn empty(vertex_count: usize) -> Self {
        Self { members: vec![false; vertex_count], len: 0, sources: Vec::new() }
    }

    fn insert(&mut self, vertex: usize) {
        if !self.members[vertex] {
            self.members[vertex] = true;
            self.len += 1;
        }
    }

    #[inline]
    pub fn contains(&self, vertex: usize) -> bool {
        self.members.get(vertex).copied().unwrap_or(false)
    }

    /// Number of distinct river vertices.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Member indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.members.iter().enumerate().filter_map(|(i, &m)| m.then_some(i))
    }

    /// Starting vertex of every trial that was not skipped, in trial order.
    pub fn sources(&self) -> &[usize] {
        &self.sources
    }
}

/// Trace `density × trials_per_density` river trials over `heights`.
///
/// Each trial draws a uniform vertex and is skipped unless its height is at
/// least `sea_level + source_margin`. Otherwise it walks at most `max_steps`,
/// marking each visited vertex, and stops when `descent` finds nothing lower
/// or the next vertex lies below `sea_level`. No vertex below sea level is
/// ever marked.
pub fn trace_rivers<D: Descent + ?Sized>(
    heights: &[f64],
    sea_level: f64,
    density: u32,
    rng: &mut SeededRng,
    params: &RiverParams,
    descent: &D,
) -> RiverSet {
    let n = heights.len();
    let mut rivers = RiverSet::empty(n);
    if n == 0 || density == 0 {
        return rivers;
    }

    let trials = density as u64 * params.trials_per_density as u64;
    let source_floor = sea_level + params.source_margin;
    for _ in 0..trials {
        let mut current = rng.next_index(n);
        if heights[current] < source_floor {
            continue;
        }
        rivers.sources.push(current);

        for _ in 0..params.max_steps {
            rivers.insert(current);
            let next = descent.step(current, heights, rng);
            if next == current || heights[next] < sea_level {
                break;
            }
            current = next;
        }
    }
    rivers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hydraulic::descent::{AdjacencyDescent, IndexWindowDescent};

    fn window() -> IndexWindowDescent {
        IndexWindowDescent { candidates: 12, window: 150 }
    }

    /// Smooth pseudo-terrain in [0, 1] with plenty of land above 0.6.
    fn heights(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| {
                let t = i as f64;
                0.5 + 0.5 * (t * 0.013).sin() * (t * 0.0031).cos()
            })
            .collect()
    }

    fn trace(h: &[f64], sea_level: f64, density: u32, seed: &str) -> RiverSet {
        let params = RiverParams::default();
        trace_rivers(h, sea_level, density, &mut SeededRng::new(seed), &params, &window())
    }

    #[test]
    fn zero_density_is_empty() {
        let h = heights(1000);
        let r = trace(&h, 0.5, 0, "r");
        assert!(r.is_empty());
        assert!(r.sources().is_empty());
    }

    #[test]
    fn zero_vertices_is_empty() {
        let r = trace(&[], 0.5, 10, "r");
        assert!(r.is_empty());
    }

    #[test]
    fn sources_are_high_enough() {
        let h = heights(4000);
        let r = trace(&h, 0.5, 50, "src");
        assert!(!r.sources().is_empty());
        for &s in r.sources() {
            assert!(h[s] >= 0.6, "source {s} at height {}", h[s]);
            assert!(r.contains(s));
        }
    }

    #[test]
    fn no_member_below_sea_level() {
        let h = heights(4000);
        let r = trace(&h, 0.5, 80, "sea");
        for v in r.iter() {
            assert!(h[v] >= 0.5);
        }
        assert!(r.len() <= h.len());
    }

    #[test]
    fn all_ocean_produces_no_rivers() {
        let h = vec![0.2; 500];
        let r = trace(&h, 0.5, 100, "o");
        assert!(r.is_empty());
    }

    #[test]
    fn walks_respect_step_bound() {
        // Strictly decreasing ramp: every step finds a lower candidate.
        let h: Vec<f64> = (0..10_000).map(|i| 1.0 - i as f64 * 1e-5).collect();
        let params = RiverParams { max_steps: 5, trials_per_density: 1, ..RiverParams::default() };
        let r = trace_rivers(&h, 0.0, 1, &mut SeededRng::new("bound"), &params, &window());
        assert!(r.len() <= 5);
        assert!(!r.is_empty());
    }

    #[test]
    fn deterministic_for_same_stream() {
        let h = heights(3000);
        let a = trace(&h, 0.5, 20, "d");
        let b = trace(&h, 0.5, 20, "d");
        assert_eq!(a, b);
    }

    #[test]
    fn adjacency_descent_follows_chain_to_sea() {
        // Path graph 0-1-2-3-4 sloping to the sea at vertex 4.
        let neighbours = (0..5u32)
            .map(|i| {
                let mut v = Vec::new();
                if i > 0 {
                    v.push(i - 1);
                }
                if i < 4 {
                    v.push(i + 1);
                }
                v
            })
            .collect();
        let d = AdjacencyDescent::new(neighbours);
        let h = [0.9, 0.8, 0.7, 0.6, 0.1];
        let params = RiverParams { trials_per_density: 50, ..RiverParams::default() };
        let r = trace_rivers(&h, 0.5, 1, &mut SeededRng::new("chain"), &params, &d);
        assert!(!r.contains(4), "sea vertex must not be marked");
        for &s in r.sources() {
            for v in s..4 {
                assert!(r.contains(v), "vertex {v} downstream of {s} missing");
            }
        }
    }
}
