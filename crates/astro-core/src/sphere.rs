//! Sphere geometry: a small `Vec3` and the subdivided icosahedron every planet
//! is built on. All positions use f64.

use std::collections::HashMap;

/// A point or direction in 3D Cartesian coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction; the zero vector maps to itself.
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            return self;
        }
        self.scale(1.0 / len)
    }

    pub fn scale(self, s: f64) -> Self {
        Self { x: self.x * s, y: self.y * s, z: self.z * s }
    }

    pub fn add(self, other: Self) -> Self {
        Self { x: self.x + other.x, y: self.y + other.y, z: self.z + other.z }
    }

    pub fn sub(self, other: Self) -> Self {
        Self { x: self.x - other.x, y: self.y - other.y, z: self.z - other.z }
    }

    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }

    /// Latitude in degrees and longitude in degrees, with +y as the pole axis.
    pub fn to_latlon(self) -> (f64, f64) {
        let n = self.normalize();
        let lat = n.y.clamp(-1.0, 1.0).asin().to_degrees();
        let lon = n.x.atan2(n.z).to_degrees();
        (lat, lon)
    }

    pub fn to_f32(self) -> [f32; 3] {
        [self.x as f32, self.y as f32, self.z as f32]
    }
}

// ── Icosphere ────────────────────────────────────────────────────────────────

const PHI: f64 = 1.618_033_988_749_895;

const ICOSAHEDRON_VERTICES: [[f64; 3]; 12] = [
    [-1.0, PHI, 0.0],
    [1.0, PHI, 0.0],
    [-1.0, -PHI, 0.0],
    [1.0, -PHI, 0.0],
    [0.0, -1.0, PHI],
    [0.0, 1.0, PHI],
    [0.0, -1.0, -PHI],
    [0.0, 1.0, -PHI],
    [PHI, 0.0, -1.0],
    [PHI, 0.0, 1.0],
    [-PHI, 0.0, -1.0],
    [-PHI, 0.0, 1.0],
];

#[rustfmt::skip]
const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
    [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
    [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
    [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
];

/// Grid used to merge vertices shared by neighbouring faces.
const WELD_GRID: f64 = 1e9;

/// An indexed triangle mesh on a sphere of `radius`.
#[derive(Debug, Clone)]
pub struct Icosphere {
    pub radius: f64,
    pub detail: u32,
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<[u32; 3]>,
}

impl Icosphere {
    /// Subdivide each icosahedron face into `(detail + 1)²` triangles and
    /// project every vertex onto the sphere. Shared vertices are welded, so
    /// the result has `10 (detail + 1)² + 2` vertices.
    pub fn new(radius: f64, detail: u32) -> Self {
        let cols = detail as usize + 1;
        let corners: Vec<Vec3> = ICOSAHEDRON_VERTICES
            .iter()
            .map(|&[x, y, z]| Vec3::new(x, y, z).normalize())
            .collect();

        let mut vertices = Vec::with_capacity(10 * cols * cols + 2);
        let mut triangles = Vec::with_capacity(20 * cols * cols);
        let mut welded: HashMap<[i64; 3], u32> = HashMap::new();

        let mut weld = |p: Vec3, vertices: &mut Vec<Vec3>| -> u32 {
            let unit = p.normalize();
            let key = [
                (unit.x * WELD_GRID).round() as i64,
                (unit.y * WELD_GRID).round() as i64,
                (unit.z * WELD_GRID).round() as i64,
            ];
            *welded.entry(key).or_insert_with(|| {
                vertices.push(unit.scale(radius));
                (vertices.len() - 1) as u32
            })
        };

        for &[ia, ib, ic] in &ICOSAHEDRON_FACES {
            let (a, b, c) = (corners[ia], corners[ib], corners[ic]);

            // grid[i][j]: row i runs from edge a→c, column j across to edge b→c.
            let mut grid: Vec<Vec<u32>> = Vec::with_capacity(cols + 1);
            for i in 0..=cols {
                let t = i as f64 / cols as f64;
                let aj = a.lerp(c, t);
                let bj = b.lerp(c, t);
                let rows = cols - i;
                let row = (0..=rows)
                    .map(|j| {
                        let p = if rows == 0 { aj } else { aj.lerp(bj, j as f64 / rows as f64) };
                        weld(p, &mut vertices)
                    })
                    .collect();
                grid.push(row);
            }

            for i in 0..cols {
                for j in 0..(2 * (cols - i) - 1) {
                    let k = j / 2;
                    if j % 2 == 0 {
                        triangles.push([grid[i][k + 1], grid[i + 1][k], grid[i][k]]);
                    } else {
                        triangles.push([grid[i][k + 1], grid[i + 1][k + 1], grid[i + 1][k]]);
                    }
                }
            }
        }

        Self { radius, detail, vertices, triangles }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Sorted, deduplicated edge neighbours of every vertex.
    pub fn adjacency(&self) -> Vec<Vec<u32>> {
        let mut neighbours: Vec<Vec<u32>> = vec![Vec::with_capacity(6); self.vertices.len()];
        for &[a, b, c] in &self.triangles {
            for (u, v) in [(a, b), (b, c), (c, a)] {
                neighbours[u as usize].push(v);
                neighbours[v as usize].push(u);
            }
        }
        for list in &mut neighbours {
            list.sort_unstable();
            list.dedup();
        }
        neighbours
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn vertex_and_triangle_counts() {
        for detail in [0u32, 1, 3, 10] {
            let s = Icosphere::new(1.0, detail);
            let cols = detail as usize + 1;
            assert_eq!(s.vertex_count(), 10 * cols * cols + 2, "detail {detail}");
            assert_eq!(s.triangles.len(), 20 * cols * cols, "detail {detail}");
        }
    }

    #[test]
    fn vertices_lie_on_radius() {
        let s = Icosphere::new(1.6, 6);
        for v in &s.vertices {
            assert_relative_eq!(v.length(), 1.6, epsilon = 1e-12);
        }
    }

    #[test]
    fn euler_characteristic_is_two() {
        let s = Icosphere::new(1.0, 4);
        let edges: usize = s.adjacency().iter().map(Vec::len).sum::<usize>() / 2;
        let chi = s.vertex_count() as i64 - edges as i64 + s.triangles.len() as i64;
        assert_eq!(chi, 2);
    }

    #[test]
    fn adjacency_is_symmetric() {
        let s = Icosphere::new(1.0, 3);
        let adj = s.adjacency();
        for (v, list) in adj.iter().enumerate() {
            assert!((5..=6).contains(&list.len()), "vertex {v} has {} neighbours", list.len());
            for &n in list {
                assert!(adj[n as usize].contains(&(v as u32)));
            }
        }
    }

    #[test]
    fn triangles_wind_outward() {
        let s = Icosphere::new(1.0, 2);
        for &[a, b, c] in &s.triangles {
            let [pa, pb, pc] = [a, b, c].map(|i| s.vertices[i as usize]);
            let n = pb.sub(pa).cross(pc.sub(pa));
            let centroid = pa.add(pb).add(pc);
            assert!(n.dot(centroid) > 0.0);
        }
    }

    #[test]
    fn latlon_of_poles() {
        let (lat, _) = Vec3::new(0.0, 2.0, 0.0).to_latlon();
        assert_relative_eq!(lat, 90.0, epsilon = 1e-9);
        let (lat, lon) = Vec3::new(1.0, 0.0, 0.0).to_latlon();
        assert_relative_eq!(lat, 0.0, epsilon = 1e-9);
        assert_relative_eq!(lon, 90.0, epsilon = 1e-9);
    }
}
