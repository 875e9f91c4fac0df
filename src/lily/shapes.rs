//! Flat lily outlines sampled from Bézier paths.
//!
//! Paths are authored in screen units (y down, 100 per world unit) and
//! converted on sampling, so the constants read like the drawings they came
//! from.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::Indices;
use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;

use crate::math;

/// Screen units per world unit.
pub const UNITS_PER_WORLD: f32 = 100.0;

/// Petal outline: right edge base→tip, then left edge tip→base.
pub const PETAL_CURVES: [[Vec2; 4]; 2] = [
    [
        Vec2::new(0.0, 0.0),
        Vec2::new(15.0, -40.0),
        Vec2::new(55.0, -90.0),
        Vec2::new(0.0, -160.0),
    ],
    [
        Vec2::new(0.0, -160.0),
        Vec2::new(-55.0, -90.0),
        Vec2::new(-15.0, -40.0),
        Vec2::new(0.0, 0.0),
    ],
];

/// Stem centre line, from the flower down.
pub const STEM_CURVE: [Vec2; 3] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(-10.0, 150.0),
    Vec2::new(-5.0, 300.0),
];

/// Stroke width of the stem (screen units).
pub const STEM_WIDTH: f32 = 8.0;

/// Five spots running up the centre of an inner petal (screen units).
pub fn spot_centers() -> [Vec2; 5] {
    std::array::from_fn(|j| Vec2::new((j as f32).sin() * 5.0, -40.0 - j as f32 * 10.0))
}

/// Spot radius (screen units).
pub const SPOT_RADIUS: f32 = 1.5;

/// Stamen filament length and anther radii (screen units).
pub const STAMEN_LENGTH: f32 = 60.0;
/// Anther half extents `(rx, ry)`.
pub const ANTHER_RADII: Vec2 = Vec2::new(4.0, 8.0);
/// Pistil radius (screen units).
pub const PISTIL_RADIUS: f32 = 5.0;

/// Gradient stops from petal tip (0) to base (1).
pub const PETAL_GRADIENT: [(f32, Color); 3] = [
    (0.0, Color::srgb_u8(0xff, 0xf0, 0xf5)),
    (0.3, Color::srgb_u8(0xff, 0xb7, 0xc5)),
    (1.0, Color::srgb_u8(0xff, 0x14, 0x93)),
];

/// Converts a screen-space point to world units.
pub fn to_world(p: Vec2) -> Vec2 {
    Vec2::new(p.x, -p.y) / UNITS_PER_WORLD
}

/// Closed petal outline in world units, `segments` samples per curve.
///
/// The shared endpoints (base and tip) appear once each.
pub fn petal_outline(segments: usize) -> Vec<Vec2> {
    let mut points = Vec::with_capacity(segments * 2);
    for [p0, p1, p2, p3] in PETAL_CURVES {
        for s in 0..segments {
            let t = s as f32 / segments as f32;
            points.push(to_world(math::cubic_bezier(p0, p1, p2, p3, t)));
        }
    }
    points
}

/// Leaf outline for `side` (+1 right, -1 left) in world units.
pub fn leaf_outline(side: f32, segments: usize) -> Vec<Vec2> {
    let start = Vec2::new(0.0, 150.0);
    let out = [
        start,
        Vec2::new(60.0 * side, 100.0),
        Vec2::new(100.0 * side, 180.0),
    ];
    let back = [out[2], Vec2::new(40.0 * side, 220.0), start];
    let mut points = Vec::with_capacity(segments * 2);
    for [p0, p1, p2] in [out, back] {
        for s in 0..segments {
            let t = s as f32 / segments as f32;
            points.push(to_world(math::quadratic_bezier(p0, p1, p2, t)));
        }
    }
    points
}

/// Stem centre line in world units, `segments + 1` points.
pub fn stem_points(segments: usize) -> Vec<Vec2> {
    let [p0, p1, p2] = STEM_CURVE;
    (0..=segments)
        .map(|s| to_world(math::quadratic_bezier(p0, p1, p2, s as f32 / segments as f32)))
        .collect()
}

/// Petal colour at `t` from tip (0) to base (1).
pub fn petal_gradient(t: f32) -> LinearRgba {
    let t = t.clamp(0.0, 1.0);
    let [(t0, c0), (t1, c1), (t2, c2)] = PETAL_GRADIENT;
    let (from, to, local) = if t <= t1 {
        (c0, c1, (t - t0) / (t1 - t0))
    } else {
        (c1, c2, (t - t1) / (t2 - t1))
    };
    from.to_linear().mix(&to.to_linear(), local)
}

/// Mean of the outline points; the fan centre.
pub fn centroid(outline: &[Vec2]) -> Vec2 {
    if outline.is_empty() {
        return Vec2::ZERO;
    }
    outline.iter().copied().sum::<Vec2>() / outline.len() as f32
}

/// Triangle fan around the outline centroid in the XY plane, facing +Z.
///
/// `color` receives each vertex position and returns its vertex colour.
pub fn fan_mesh(outline: &[Vec2], color: impl Fn(Vec2) -> LinearRgba) -> Mesh {
    let center = centroid(outline);
    let vertices: Vec<Vec2> = std::iter::once(center).chain(outline.iter().copied()).collect();

    let positions: Vec<[f32; 3]> = vertices.iter().map(|v| [v.x, v.y, 0.0]).collect();
    let normals = vec![[0.0, 0.0, 1.0]; vertices.len()];
    let colors: Vec<[f32; 4]> = vertices.iter().map(|v| color(*v).to_f32_array()).collect();

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors)
    .with_inserted_indices(Indices::U32(fan_indices(outline.len())))
}

/// Indices of a closed fan: vertex 0 is the centre, 1..=n the rim.
///
/// Triangles wind counter-clockwise for rims that run counter-clockwise.
pub fn fan_indices(rim: usize) -> Vec<u32> {
    let n = rim as u32;
    (0..n).flat_map(|i| [0, 1 + i, 1 + (i + 1) % n]).collect()
}

/// Petal mesh with the tip-to-base gradient baked into vertex colours.
pub fn petal_mesh(segments: usize) -> Mesh {
    let tip = to_world(PETAL_CURVES[0][3]).y;
    fan_mesh(&petal_outline(segments), |v| petal_gradient(1.0 - v.y / tip))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Signed area (positive when counter-clockwise).
    fn signed_area(points: &[Vec2]) -> f32 {
        let n = points.len();
        (0..n)
            .map(|i| points[i].perp_dot(points[(i + 1) % n]))
            .sum::<f32>()
            / 2.0
    }

    // ── outlines ────────────────────────────────────────────────────

    #[test]
    fn petal_runs_from_base_to_tip_and_back() {
        let outline = petal_outline(16);
        assert_eq!(outline.len(), 32);
        assert_eq!(outline[0], Vec2::ZERO);
        assert!((outline[16] - Vec2::new(0.0, 1.6)).length() < 1e-6);
        assert!(outline.iter().all(|p| p.y >= -1e-6 && p.y <= 1.6 + 1e-6));
    }

    #[test]
    fn petal_outline_is_mirror_symmetric() {
        let outline = petal_outline(16);
        for s in 1..16 {
            let right = outline[s];
            let left = outline[32 - s];
            assert!((right.x + left.x).abs() < 1e-5, "sample {s}");
            assert!((right.y - left.y).abs() < 1e-5, "sample {s}");
        }
    }

    #[test]
    fn outlines_wind_counter_clockwise() {
        assert!(signed_area(&petal_outline(16)) > 0.0);
        assert!(signed_area(&leaf_outline(-1.0, 12)) > 0.0);
    }

    #[test]
    fn leaves_mirror_each_other() {
        let right = leaf_outline(1.0, 12);
        let left = leaf_outline(-1.0, 12);
        for (r, l) in right.iter().zip(&left) {
            assert_eq!(r.x, -l.x);
            assert_eq!(r.y, l.y);
        }
        assert!(right.iter().all(|p| p.x >= 0.0));
    }

    #[test]
    fn stem_hangs_down_three_units() {
        let stem = stem_points(20);
        assert_eq!(stem.len(), 21);
        assert_eq!(stem[0], Vec2::ZERO);
        assert!((stem[20] - Vec2::new(-0.05, -3.0)).length() < 1e-6);
    }

    #[test]
    fn spots_climb_the_petal() {
        let spots = spot_centers();
        assert_eq!(spots[0], Vec2::new(0.0, -40.0));
        for pair in spots.windows(2) {
            assert!(pair[1].y < pair[0].y);
        }
    }

    // ── gradient ────────────────────────────────────────────────────

    #[test]
    fn gradient_hits_its_stops() {
        let tip = petal_gradient(0.0);
        let base = petal_gradient(1.0);
        let expect_tip = PETAL_GRADIENT[0].1.to_linear();
        let expect_base = PETAL_GRADIENT[2].1.to_linear();
        assert!((tip.red - expect_tip.red).abs() < 1e-6);
        assert!((base.blue - expect_base.blue).abs() < 1e-6);
        assert!((petal_gradient(0.3).green - PETAL_GRADIENT[1].1.to_linear().green).abs() < 1e-6);
    }

    #[test]
    fn gradient_darkens_toward_base() {
        let greens: Vec<f32> = (0..=10).map(|i| petal_gradient(i as f32 / 10.0).green).collect();
        for pair in greens.windows(2) {
            assert!(pair[1] <= pair[0] + 1e-6);
        }
    }

    // ── meshes ──────────────────────────────────────────────────────

    #[test]
    fn fan_closes_the_rim() {
        let idx = fan_indices(4);
        assert_eq!(idx, vec![0, 1, 2, 0, 2, 3, 0, 3, 4, 0, 4, 1]);
    }

    #[test]
    fn petal_mesh_has_colour_per_vertex() {
        let mesh = petal_mesh(8);
        assert_eq!(mesh.count_vertices(), 17);
        assert!(mesh.attribute(Mesh::ATTRIBUTE_COLOR).is_some());
        assert_eq!(mesh.indices().map(|i| i.len()), Some(16 * 3));
    }

    #[test]
    fn centroid_of_empty_outline_is_origin() {
        assert_eq!(centroid(&[]), Vec2::ZERO);
    }
}
