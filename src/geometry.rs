//! Procedural part geometry: flat grids deformed into petals, sepals and leaflets.
//!
//! A [`ShapeParams`] value fully determines the output [`PartGrid`]; the
//! [`PartMeshes`] resource memoizes both the grid and the uploaded mesh on
//! that identity so every petal of a layer shares one mesh asset.

mod cache;
pub mod deform;
mod grid;

pub use cache::{GridCache, PartMeshes, ShapeKey};
pub use grid::PartGrid;

use bevy::prelude::*;

/// Botanical part kinds produced by [`build_part`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect)]
pub enum PartKind {
    /// Cupped, tapered rose petal.
    Petal,
    /// Long thin sepal curving down from the receptacle.
    Sepal,
    /// One ovate, serrated leaflet of a compound leaf.
    Leaflet,
}

impl PartKind {
    /// Fixed `(x, y)` segment counts of the flat grid for this part.
    pub fn segments(self) -> (usize, usize) {
        match self {
            Self::Petal => (12, 16),
            Self::Sepal => (4, 10),
            Self::Leaflet => (6, 8),
        }
    }

    /// Default `(width, length)` of the flat grid.
    pub fn default_size(self) -> (f32, f32) {
        match self {
            Self::Petal => (1.0, 1.3),
            Self::Sepal => (0.15, 0.8),
            Self::Leaflet => (0.25, 0.45),
        }
    }
}

/// Immutable inputs of the shape generator; doubles as the cache key.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeParams {
    /// Which deformation to apply.
    pub part: PartKind,
    /// Flat grid extent across the short axis.
    pub width: f32,
    /// Flat grid extent along the long axis (base to tip).
    pub length: f32,
    /// Bloom layer, 0 (center) to 5 (outermost). Only petals read it.
    pub layer: u8,
}

impl ShapeParams {
    /// Default-sized petal for the given bloom layer.
    pub fn petal(layer: u8) -> Self {
        Self::sized(PartKind::Petal, layer)
    }

    /// Default-sized sepal.
    pub fn sepal() -> Self {
        Self::sized(PartKind::Sepal, 0)
    }

    /// Default-sized leaflet.
    pub fn leaflet() -> Self {
        Self::sized(PartKind::Leaflet, 0)
    }

    fn sized(part: PartKind, layer: u8) -> Self {
        let (width, length) = part.default_size();
        Self {
            part,
            width,
            length,
            layer,
        }
    }
}

/// Builds the flat grid for `params` and deforms it into the requested part.
///
/// Pure: identical parameters always yield an identical grid.
pub fn build_part(params: &ShapeParams) -> PartGrid {
    let (x_segments, y_segments) = params.part.segments();
    let half_width = params.width / 2.0;
    let half_length = params.length / 2.0;

    PartGrid::plane(params.width, params.length, x_segments, y_segments).map_points(|p| {
        let n_y = ((p.y + half_length) / params.length).clamp(0.0, 1.0);
        let n_x = p.x / half_width;
        let d = deform::displace(params.part, params.layer, n_x, n_y);
        Vec3::new(p.x * d.width_factor, p.y, d.z)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_params_build_identical_grids() {
        for params in [
            ShapeParams::petal(0),
            ShapeParams::petal(4),
            ShapeParams::sepal(),
            ShapeParams::leaflet(),
        ] {
            assert_eq!(build_part(&params), build_part(&params));
        }
    }

    #[test]
    fn deformation_preserves_topology() {
        for part in [PartKind::Petal, PartKind::Sepal, PartKind::Leaflet] {
            for layer in 0..=5 {
                let params = ShapeParams {
                    layer,
                    ..ShapeParams::sized(part, 0)
                };
                let (xs, ys) = part.segments();
                let flat = PartGrid::plane(params.width, params.length, xs, ys);
                let shaped = build_part(&params);
                assert_eq!(shaped.rows(), flat.rows());
                assert_eq!(shaped.columns(), flat.columns());
                assert_eq!(shaped.len(), flat.len());
                assert_eq!(shaped.indices(), flat.indices());
            }
        }
    }

    #[test]
    fn deformation_keeps_long_axis() {
        let params = ShapeParams::petal(3);
        let (xs, ys) = PartKind::Petal.segments();
        let flat = PartGrid::plane(params.width, params.length, xs, ys);
        let shaped = build_part(&params);
        for (a, b) in flat.positions().iter().zip(shaped.positions()) {
            assert_eq!(a.y, b.y);
        }
    }

    #[test]
    fn petal_base_collapses_to_midrib() {
        // nY = 0 → taper factor is 0, so the base row sits on x = 0.
        let grid = build_part(&ShapeParams::petal(2));
        let base_row = grid.rows() - 1;
        for col in 0..grid.columns() {
            assert!(grid.point(base_row, col).x.abs() < 1e-6);
        }
    }

    #[test]
    fn outer_petals_curl_their_tips_down() {
        let inner = build_part(&ShapeParams::petal(1));
        let outer = build_part(&ShapeParams::petal(5));
        let mid = inner.columns() / 2;
        // Row 0 is the tip; at the midrib only the curl differs.
        assert!(outer.point(0, mid).z < inner.point(0, mid).z);
    }

    #[test]
    fn sepal_curves_downward_toward_tip() {
        let grid = build_part(&ShapeParams::sepal());
        let tip = grid.point(0, 0).z;
        let base = grid.point(grid.rows() - 1, 0).z;
        assert!(tip < base);
        assert!((tip + 0.6).abs() < 1e-5);
    }

    #[test]
    fn segment_tables_are_fixed() {
        assert_eq!(PartKind::Petal.segments(), (12, 16));
        assert_eq!(PartKind::Sepal.segments(), (4, 10));
        assert_eq!(PartKind::Leaflet.segments(), (6, 8));
    }
}
