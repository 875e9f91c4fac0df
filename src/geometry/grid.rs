use bevy::asset::RenderAssetUsages;
use bevy::mesh::Indices;
use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;

use crate::math;

/// Row-major grid of points; row 0 is the tip edge, the last row the base.
///
/// Deformation only moves points: row/column counts and triangle
/// connectivity are fixed at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct PartGrid {
    columns: usize,
    rows: usize,
    positions: Vec<Vec3>,
}

impl PartGrid {
    /// Flat plane in the XY plane centered on the origin, facing +Z.
    ///
    /// `x_segments × y_segments` cells give
    /// `(x_segments + 1) × (y_segments + 1)` points.
    pub fn plane(width: f32, length: f32, x_segments: usize, y_segments: usize) -> Self {
        let columns = x_segments + 1;
        let rows = y_segments + 1;
        let cell_w = width / x_segments as f32;
        let cell_h = length / y_segments as f32;

        let positions = (0..rows)
            .flat_map(|iy| {
                let y = length / 2.0 - iy as f32 * cell_h;
                (0..columns).map(move |ix| Vec3::new(ix as f32 * cell_w - width / 2.0, y, 0.0))
            })
            .collect();

        Self {
            columns,
            rows,
            positions,
        }
    }

    /// Returns a grid with every point passed through `f`; topology is untouched.
    pub fn map_points(mut self, f: impl Fn(Vec3) -> Vec3) -> Self {
        for p in &mut self.positions {
            *p = f(*p);
        }
        self
    }

    /// Number of point rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of points per row.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Total point count.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// `true` when the grid holds no points.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// All points, row-major.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Point at (`row`, `col`). Panics when out of range.
    pub fn point(&self, row: usize, col: usize) -> Vec3 {
        self.positions[row * self.columns + col]
    }

    /// Two counter-clockwise triangles per cell.
    pub fn indices(&self) -> Vec<u32> {
        let cols = self.columns as u32;
        let mut indices = Vec::with_capacity((self.columns - 1) * (self.rows - 1) * 6);
        for iy in 0..(self.rows as u32 - 1) {
            for ix in 0..(cols - 1) {
                let a = ix + cols * iy;
                let b = ix + cols * (iy + 1);
                let c = (ix + 1) + cols * (iy + 1);
                let d = (ix + 1) + cols * iy;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }
        indices
    }

    /// Smooth vertex normals: area-weighted sum of adjacent face normals.
    pub fn normals(&self) -> Vec<Vec3> {
        let mut acc = vec![Vec3::ZERO; self.positions.len()];
        for tri in self.indices().chunks_exact(3) {
            let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let (v0, v1, v2) = (self.positions[i0], self.positions[i1], self.positions[i2]);
            let weighted = (v1 - v0).cross(v2 - v0);
            acc[i0] += weighted;
            acc[i1] += weighted;
            acc[i2] += weighted;
        }
        acc.into_iter()
            .enumerate()
            .map(|(i, n)| {
                let n = n.normalize_or_zero();
                if n == Vec3::ZERO {
                    self.fallback_normal(i)
                } else {
                    n
                }
            })
            .collect()
    }

    /// Normal of the first non-degenerate triangle touching point `i`, or +Z.
    fn fallback_normal(&self, i: usize) -> Vec3 {
        let row = i / self.columns;
        let col = i % self.columns;
        let down = if row + 1 < self.rows { row + 1 } else { row - 1 };
        let side = if col + 1 < self.columns { col + 1 } else { col - 1 };
        let n = math::compute_normal(
            self.point(row, col),
            self.point(down, col),
            self.point(row, side),
        );
        if n == Vec3::ZERO { Vec3::Z } else { n }
    }

    /// Texture coordinates: `u` across, `v` from base (0) to tip (1).
    pub fn uvs(&self) -> Vec<[f32; 2]> {
        let (cols, rows) = ((self.columns - 1) as f32, (self.rows - 1) as f32);
        (0..self.rows)
            .flat_map(|iy| (0..self.columns).map(move |ix| [ix as f32 / cols, 1.0 - iy as f32 / rows]))
            .collect()
    }

    /// Uploadable triangle mesh with positions, normals, UVs and indices.
    pub fn to_mesh(&self) -> Mesh {
        let positions: Vec<[f32; 3]> = self.positions.iter().map(|p| p.to_array()).collect();
        let normals: Vec<[f32; 3]> = self.normals().iter().map(|n| n.to_array()).collect();

        Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::RENDER_WORLD,
        )
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, self.uvs())
        .with_inserted_indices(Indices::U32(self.indices()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_point_counts() {
        let g = PartGrid::plane(1.0, 1.3, 12, 16);
        assert_eq!(g.columns(), 13);
        assert_eq!(g.rows(), 17);
        assert_eq!(g.len(), 13 * 17);
        assert!(!g.is_empty());
    }

    #[test]
    fn plane_extents_and_ordering() {
        let g = PartGrid::plane(2.0, 4.0, 2, 4);
        assert_eq!(g.point(0, 0), Vec3::new(-1.0, 2.0, 0.0));
        assert_eq!(g.point(4, 2), Vec3::new(1.0, -2.0, 0.0));
        assert_eq!(g.point(2, 1), Vec3::ZERO);
    }

    #[test]
    fn two_triangles_per_cell() {
        let g = PartGrid::plane(1.0, 1.0, 4, 10);
        let idx = g.indices();
        assert_eq!(idx.len(), 4 * 10 * 6);
        assert!(idx.iter().all(|&i| (i as usize) < g.len()));
    }

    #[test]
    fn flat_plane_normals_face_positive_z() {
        let g = PartGrid::plane(1.0, 1.0, 3, 3);
        for n in g.normals() {
            assert!((n - Vec3::Z).length() < 1e-6, "got {n:?}");
        }
    }

    #[test]
    fn collapsed_row_still_gets_unit_normals() {
        // Squash the bottom row onto one point, as a petal base does.
        let g = PartGrid::plane(1.0, 1.0, 2, 2).map_points(|p| {
            if p.y < -0.4 { Vec3::new(0.0, p.y, p.z) } else { p }
        });
        for n in g.normals() {
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn uvs_span_unit_square() {
        let g = PartGrid::plane(1.0, 1.0, 2, 2);
        let uvs = g.uvs();
        assert_eq!(uvs[0], [0.0, 1.0]);
        assert_eq!(uvs[uvs.len() - 1], [1.0, 0.0]);
    }

    #[test]
    fn mesh_carries_all_attributes() {
        let g = PartGrid::plane(1.0, 1.0, 2, 2);
        let mesh = g.to_mesh();
        assert_eq!(mesh.count_vertices(), g.len());
        assert!(mesh.attribute(Mesh::ATTRIBUTE_NORMAL).is_some());
        assert!(mesh.attribute(Mesh::ATTRIBUTE_UV_0).is_some());
        assert_eq!(mesh.indices().map(|i| i.len()), Some(2 * 2 * 6));
    }
}
