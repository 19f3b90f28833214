//! Displaced, coloured planet mesh ready for a renderer.
use serde::{Deserialize, Serialize};

use crate::climate::{classify_biome, Biome, BiomeRules};
use crate::hydraulic::RiverSet;
use crate::sphere::{Icosphere, Vec3};
use crate::terrain::TerrainField;

/// GPU-friendly vertex buffers. All arrays are indexed by vertex.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanetMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 3]>,
    pub biomes: Vec<Biome>,
    pub indices: Vec<u32>,
}

impl PlanetMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Positions flattened to `[x0, y0, z0, x1, …]`.
    pub fn flat_positions(&self) -> Vec<f32> {
        self.positions.iter().flatten().copied().collect()
    }

    pub fn flat_normals(&self) -> Vec<f32> {
        self.normals.iter().flatten().copied().collect()
    }

    pub fn flat_colors(&self) -> Vec<f32> {
        self.colors.iter().flatten().copied().collect()
    }
}

/// Outward offset for a vertex of `height`; zero at or below sea level.
#[inline]
pub fn displacement(height: f64, sea_level: f64, displacement_scale: f64, roughness: f64) -> f64 {
    if height > sea_level {
        (height - sea_level) * displacement_scale * roughness
    } else {
        0.0
    }
}

/// Knobs that shape the mesh but not the fields.
#[derive(Debug, Clone, Copy)]
pub struct DeformParams<'a> {
    pub sea_level: f64,
    pub displacement_scale: f64,
    pub roughness: f64,
    pub rules: &'a BiomeRules,
}

/// Push land vertices outward along their normalised position, colour every
/// vertex by biome, and recompute smooth normals on the displaced surface.
pub fn deform_and_color(
    sphere: &Icosphere,
    field: &TerrainField,
    rivers: &RiverSet,
    params: &DeformParams<'_>,
) -> PlanetMesh {
    let n = sphere.vertex_count();
    let mut displaced = Vec::with_capacity(n);
    let mut biomes = Vec::with_capacity(n);

    for (i, &p) in sphere.vertices.iter().enumerate() {
        let h = field.heights[i];
        let offset = displacement(h, params.sea_level, params.displacement_scale, params.roughness);
        displaced.push(p.add(p.normalize().scale(offset)));
        biomes.push(classify_biome(
            h,
            field.latitudes[i],
            field.moistures[i],
            params.sea_level,
            rivers.contains(i),
            params.rules,
        ));
    }

    let normals = vertex_normals(&displaced, &sphere.triangles);

    PlanetMesh {
        positions: displaced.iter().map(|v| v.to_f32()).collect(),
        normals: normals.iter().map(|v| v.to_f32()).collect(),
        colors: biomes.iter().map(|b| b.color().to_array()).collect(),
        biomes,
        indices: sphere.triangles.iter().flatten().copied().collect(),
    }
}

/// Area-weighted vertex normals. Vertices on no triangle fall back to their
/// radial direction.
fn vertex_normals(positions: &[Vec3], triangles: &[[u32; 3]]) -> Vec<Vec3> {
    let mut acc = vec![Vec3::ZERO; positions.len()];
    for &[a, b, c] in triangles {
        let (a, b, c) = (a as usize, b as usize, c as usize);
        let face = positions[b].sub(positions[a]).cross(positions[c].sub(positions[a]));
        for v in [a, b, c] {
            acc[v] = acc[v].add(face);
        }
    }
    acc.iter()
        .zip(positions)
        .map(|(n, p)| if n.length() > 0.0 { n.normalize() } else { p.normalize() })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hydraulic::RiverSet;
    use approx::assert_relative_eq;

    fn field_for(sphere: &Icosphere, f: impl Fn(usize) -> f64) -> TerrainField {
        let n = sphere.vertex_count();
        TerrainField {
            heights: (0..n).map(&f).collect(),
            moistures: vec![0.5; n],
            latitudes: sphere.vertices.iter().map(|v| (v.y / sphere.radius).abs()).collect(),
        }
    }

    #[test]
    fn displacement_is_zero_at_or_below_sea() {
        assert_eq!(displacement(0.3, 0.5, 0.6, 1.5), 0.0);
        assert_eq!(displacement(0.5, 0.5, 0.6, 1.5), 0.0);
        assert_relative_eq!(displacement(0.7, 0.5, 0.6, 1.5), 0.18, epsilon = 1e-12);
    }

    #[test]
    fn ocean_stays_on_base_sphere() {
        let sphere = Icosphere::new(1.0, 3);
        let field = field_for(&sphere, |i| if i % 2 == 0 { 0.3 } else { 0.7 });
        let rules = BiomeRules::default();
        let params = DeformParams {
            sea_level: 0.5,
            displacement_scale: 0.6,
            roughness: 1.0,
            rules: &rules,
        };
        let rivers = RiverSet::empty(sphere.vertex_count());
        let mesh = deform_and_color(&sphere, &field, &rivers, &params);
        for (i, p) in mesh.positions.iter().enumerate() {
            let r = Vec3::new(p[0] as f64, p[1] as f64, p[2] as f64).length();
            if i % 2 == 0 {
                assert_relative_eq!(r, 1.0, epsilon = 1e-6);
                assert!(mesh.biomes[i].is_ocean());
            } else {
                assert_relative_eq!(r, 1.12, epsilon = 1e-6);
                assert!(!mesh.biomes[i].is_ocean());
            }
        }
    }

    #[test]
    fn buffers_have_matching_lengths() {
        let sphere = Icosphere::new(1.6, 2);
        let field = field_for(&sphere, |_| 0.6);
        let rules = BiomeRules::default();
        let params = DeformParams {
            sea_level: 0.45,
            displacement_scale: 0.6,
            roughness: 1.5,
            rules: &rules,
        };
        let rivers = RiverSet::empty(sphere.vertex_count());
        let mesh = deform_and_color(&sphere, &field, &rivers, &params);
        let n = sphere.vertex_count();
        assert_eq!(mesh.vertex_count(), n);
        assert_eq!(mesh.normals.len(), n);
        assert_eq!(mesh.colors.len(), n);
        assert_eq!(mesh.indices.len(), sphere.triangles.len() * 3);
        assert_eq!(mesh.flat_positions().len(), 3 * n);
    }

    #[test]
    fn uniform_sphere_normals_point_outward() {
        let sphere = Icosphere::new(1.0, 3);
        let field = field_for(&sphere, |_| 0.2);
        let rules = BiomeRules::default();
        let params = DeformParams {
            sea_level: 0.5,
            displacement_scale: 0.6,
            roughness: 1.0,
            rules: &rules,
        };
        let rivers = RiverSet::empty(sphere.vertex_count());
        let mesh = deform_and_color(&sphere, &field, &rivers, &params);
        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            let dot = p[0] * n[0] + p[1] * n[1] + p[2] * n[2];
            assert!(dot > 0.95, "normal not radial: dot={dot}");
        }
    }
}
