//! Golden-angle petal placement and the fixed rose configuration tables.
//!
//! Angles are computed in `f64` so consecutive instances differ by exactly
//! [`GOLDEN_ANGLE`]; placements are narrowed to `f32` only when converted to
//! a [`Transform`].

use std::f32::consts::TAU;

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::math::{self, GOLDEN_ANGLE};

/// Five-step crimson gradient, center darkest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect)]
pub enum PetalColor {
    /// Almost black-red deep center.
    Center,
    /// Dark crimson.
    Inner,
    /// Rich crimson.
    Mid,
    /// Brighter red.
    Outer,
    /// Vivid crimson edges.
    Outermost,
}

impl PetalColor {
    /// All tokens, center first.
    pub const ALL: [Self; 5] = [
        Self::Center,
        Self::Inner,
        Self::Mid,
        Self::Outer,
        Self::Outermost,
    ];

    /// sRGB color of the token.
    pub fn color(self) -> Color {
        match self {
            Self::Center => Color::srgb_u8(0x4A, 0x00, 0x10),
            Self::Inner => Color::srgb_u8(0x6B, 0x00, 0x15),
            Self::Mid => Color::srgb_u8(0x8B, 0x0A, 0x1A),
            Self::Outer => Color::srgb_u8(0xA0, 0x15, 0x25),
            Self::Outermost => Color::srgb_u8(0xB8, 0x20, 0x2E),
        }
    }
}

/// One ring of petals in the bloom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerDescriptor {
    /// Number of petals in the ring.
    pub count: u32,
    /// Angle added to every instance (radians).
    pub angle_offset: f64,
    /// Distance from the bloom axis.
    pub radius: f64,
    /// Height of the ring on the bloom axis.
    pub vertical_offset: f64,
    /// Outward tilt of the first petal (radians).
    pub pitch: f64,
    /// Extra tilt added per instance index.
    pub pitch_step: f64,
    /// Uniform petal scale.
    pub scale: f64,
    /// Material color token.
    pub color: PetalColor,
}

/// The six rings of the rose, tight center cone to most open.
pub const ROSE_LAYERS: [LayerDescriptor; 6] = [
    LayerDescriptor {
        count: 4,
        angle_offset: 0.0,
        radius: 0.02,
        vertical_offset: 0.55,
        pitch: 0.15,
        pitch_step: 0.02,
        scale: 0.25,
        color: PetalColor::Center,
    },
    LayerDescriptor {
        count: 5,
        angle_offset: 0.5,
        radius: 0.06,
        vertical_offset: 0.45,
        pitch: 0.35,
        pitch_step: 0.0,
        scale: 0.38,
        color: PetalColor::Center,
    },
    LayerDescriptor {
        count: 6,
        angle_offset: 1.2,
        radius: 0.12,
        vertical_offset: 0.32,
        pitch: 0.55,
        pitch_step: 0.0,
        scale: 0.5,
        color: PetalColor::Inner,
    },
    LayerDescriptor {
        count: 7,
        angle_offset: 2.0,
        radius: 0.22,
        vertical_offset: 0.18,
        pitch: 0.75,
        pitch_step: 0.0,
        scale: 0.65,
        color: PetalColor::Mid,
    },
    LayerDescriptor {
        count: 8,
        angle_offset: 3.0,
        radius: 0.38,
        vertical_offset: 0.02,
        pitch: 1.0,
        pitch_step: 0.0,
        scale: 0.8,
        color: PetalColor::Outer,
    },
    LayerDescriptor {
        count: 9,
        angle_offset: 4.2,
        radius: 0.55,
        vertical_offset: -0.12,
        pitch: 1.25,
        pitch_step: 0.0,
        scale: 0.95,
        color: PetalColor::Outermost,
    },
];

/// Position, orientation, scale and color of one petal instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Offset from the bloom center.
    pub position: DVec3,
    /// Euler angles `(pitch, yaw, roll)`, applied in XYZ order.
    pub rotation: DVec3,
    /// Uniform scale.
    pub scale: f64,
    /// Material color token.
    pub color: PetalColor,
    /// Ring index; drives petal shape and sway amount.
    pub layer: u8,
}

impl Placement {
    /// Spiral angle of the instance (its yaw).
    pub fn angle(&self) -> f64 {
        self.rotation.y
    }

    /// Euler angles narrowed to `f32`.
    pub fn euler(&self) -> Vec3 {
        self.rotation.as_vec3()
    }

    /// Engine transform for this placement.
    pub fn transform(&self) -> Transform {
        let r = self.euler();
        Transform::from_translation(self.position.as_vec3())
            .with_rotation(Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z))
            .with_scale(Vec3::splat(self.scale as f32))
    }
}

/// Places `desc.count` petals on a golden-angle spiral.
pub fn plan_layer(layer: u8, desc: &LayerDescriptor) -> Vec<Placement> {
    (0..desc.count)
        .map(|i| {
            let i = f64::from(i);
            let angle = i * GOLDEN_ANGLE + desc.angle_offset;
            Placement {
                position: DVec3::new(
                    angle.sin() * desc.radius,
                    desc.vertical_offset,
                    angle.cos() * desc.radius,
                ),
                rotation: DVec3::new(desc.pitch + i * desc.pitch_step, angle, 0.0),
                scale: desc.scale,
                color: desc.color,
                layer,
            }
        })
        .collect()
}

/// Placements for every ring, innermost first.
pub fn plan_bloom(layers: &[LayerDescriptor]) -> Vec<Placement> {
    layers
        .iter()
        .enumerate()
        .flat_map(|(i, desc)| plan_layer(i as u8, desc))
        .collect()
}

// ── Static attachments ──────────────────────────────────────────────

/// Fixed transform of a non-petal part.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attachment {
    /// Local offset.
    pub position: Vec3,
    /// Euler angles, XYZ order.
    pub rotation: Vec3,
    /// Uniform scale.
    pub scale: f32,
}

impl Attachment {
    const fn new(position: Vec3, rotation: Vec3, scale: f32) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Engine transform for this attachment.
    pub fn transform(&self) -> Transform {
        let r = self.rotation;
        Transform::from_translation(self.position)
            .with_rotation(Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z))
            .with_scale(Vec3::splat(self.scale))
    }
}

/// Number of sepals around the receptacle.
pub const SEPAL_COUNT: usize = 5;

/// Sepal `i`: tilted down and spread evenly around the stem.
pub fn sepal(i: usize) -> Attachment {
    let yaw = i as f32 / SEPAL_COUNT as f32 * TAU + 0.3;
    Attachment::new(Vec3::new(0.0, -0.3, 0.0), Vec3::new(1.4, yaw, 0.0), 1.0)
}

/// Control points of the stem curve, bloom end first.
pub const STEM_POINTS: [Vec3; 4] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(0.01, -2.0, 0.01),
    Vec3::new(-0.02, -4.0, -0.01),
    Vec3::new(0.01, -6.5, 0.01),
];

/// Stem tube radius.
pub const STEM_RADIUS: f32 = 0.055;

/// Number of straight segments approximating the stem curve.
pub const STEM_SEGMENTS: usize = 32;

/// Samples the stem curve into `STEM_SEGMENTS + 1` points.
pub fn stem_path() -> Vec<Vec3> {
    math::catmull_rom(&STEM_POINTS, STEM_SEGMENTS)
}

/// Thorns along the stem, alternating sides.
pub const THORNS: [Attachment; 6] = [
    Attachment::new(Vec3::new(-0.06, -1.2, 0.0), Vec3::new(0.0, 0.0, 0.7), 1.0),
    Attachment::new(Vec3::new(0.06, -2.0, 0.02), Vec3::new(0.0, 0.0, -0.7), 1.0),
    Attachment::new(Vec3::new(-0.05, -2.9, -0.02), Vec3::new(0.2, 0.0, 0.6), 1.0),
    Attachment::new(Vec3::new(0.05, -3.8, 0.0), Vec3::new(0.0, 0.0, -0.6), 1.0),
    Attachment::new(Vec3::new(-0.06, -4.7, 0.01), Vec3::new(-0.1, 0.0, 0.7), 1.0),
    Attachment::new(Vec3::new(0.06, -5.5, -0.01), Vec3::new(0.0, 0.0, -0.7), 1.0),
];

/// Compound leaves along the stem.
pub const LEAVES: [Attachment; 4] = [
    Attachment::new(Vec3::new(0.25, -1.5, 0.05), Vec3::new(0.3, 0.8, 0.2), 0.9),
    Attachment::new(Vec3::new(-0.28, -2.8, -0.05), Vec3::new(0.2, -0.9, -0.15), 1.0),
    Attachment::new(Vec3::new(0.22, -4.3, 0.08), Vec3::new(0.25, 0.7, 0.1), 0.85),
    Attachment::new(Vec3::new(-0.2, -5.6, -0.03), Vec3::new(0.2, -0.6, -0.1), 0.75),
];

/// The three leaflets of one compound leaf: center, left, right.
pub const LEAFLETS: [Attachment; 3] = [
    Attachment::new(Vec3::new(0.0, 0.2, 0.0), Vec3::ZERO, 1.0),
    Attachment::new(Vec3::new(-0.18, 0.0, 0.0), Vec3::new(0.0, 0.0, 0.3), 0.8),
    Attachment::new(Vec3::new(0.18, 0.0, 0.0), Vec3::new(0.0, 0.0, -0.3), 0.8),
];

#[cfg(test)]
mod tests {
    use std::f64::consts::{PI, TAU};

    use super::*;

    #[test]
    fn consecutive_petals_differ_by_golden_angle() {
        let golden = PI * (3.0 - 5f64.sqrt());
        for (layer, desc) in ROSE_LAYERS.iter().enumerate() {
            let placements = plan_layer(layer as u8, desc);
            for w in placements.windows(2) {
                let diff = (w[1].angle() - w[0].angle()).rem_euclid(TAU);
                assert!(
                    (diff - golden).abs() < 1e-9,
                    "layer {layer}: diff {diff} vs {golden}"
                );
            }
        }
    }

    #[test]
    fn center_layer_example_positions() {
        let p = plan_layer(0, &ROSE_LAYERS[0]);
        assert_eq!(p.len(), 4);
        assert!((p[0].position - DVec3::new(0.0, 0.55, 0.02)).length() < 1e-12);
        // sin(137.5°) · 0.02
        assert!((p[1].position.x - 0.013_51).abs() < 1e-4);
        assert!((p[1].position.x - GOLDEN_ANGLE.sin() * 0.02).abs() < 1e-12);
    }

    #[test]
    fn center_layer_pitch_steps_per_instance() {
        let p = plan_layer(0, &ROSE_LAYERS[0]);
        for (i, placement) in p.iter().enumerate() {
            assert!((placement.rotation.x - (0.15 + i as f64 * 0.02)).abs() < 1e-12);
        }
    }

    #[test]
    fn petals_face_radially_outward() {
        for placement in plan_bloom(&ROSE_LAYERS) {
            let expected = DVec3::new(placement.angle().sin(), 0.0, placement.angle().cos());
            let horizontal = DVec3::new(placement.position.x, 0.0, placement.position.z);
            assert!(horizontal.normalize().dot(expected) > 1.0 - 1e-9);
        }
    }

    #[test]
    fn layer_table_trends() {
        for w in ROSE_LAYERS.windows(2) {
            assert_eq!(w[1].count, w[0].count + 1);
            assert!(w[1].radius > w[0].radius);
            assert!(w[1].vertical_offset < w[0].vertical_offset);
            assert!(w[1].scale > w[0].scale);
            assert!(w[1].pitch > w[0].pitch);
        }
    }

    #[test]
    fn bloom_has_39_petals_tagged_by_layer() {
        let all = plan_bloom(&ROSE_LAYERS);
        assert_eq!(all.len(), 4 + 5 + 6 + 7 + 8 + 9);
        assert_eq!(all.iter().filter(|p| p.layer == 5).count(), 9);
        assert!(all.iter().all(|p| p.color == ROSE_LAYERS[p.layer as usize].color));
    }

    #[test]
    fn palette_brightens_outward() {
        let lum = |c: PetalColor| {
            let s = c.color().to_srgba();
            s.red + s.green + s.blue
        };
        for w in PetalColor::ALL.windows(2) {
            assert!(lum(w[1]) > lum(w[0]));
        }
    }

    #[test]
    fn transform_applies_uniform_scale() {
        let p = plan_layer(3, &ROSE_LAYERS[3])[2];
        let tf = p.transform();
        assert_eq!(tf.scale, Vec3::splat(0.65));
        assert!((tf.translation - p.position.as_vec3()).length() < 1e-6);
    }

    #[test]
    fn sepals_spread_evenly() {
        let yaws: Vec<f32> = (0..SEPAL_COUNT).map(|i| sepal(i).rotation.y).collect();
        for w in yaws.windows(2) {
            assert!((w[1] - w[0] - TAU as f32 / 5.0).abs() < 1e-5);
        }
        assert!((yaws[0] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn stem_runs_from_bloom_to_ground() {
        let path = stem_path();
        assert_eq!(path.len(), STEM_SEGMENTS + 1);
        assert!((path[0] - STEM_POINTS[0]).length() < 1e-5);
        assert!((path[STEM_SEGMENTS] - STEM_POINTS[3]).length() < 1e-5);
        for w in path.windows(2) {
            assert!(w[1].y < w[0].y);
        }
    }

    #[test]
    fn flanking_leaflets_mirror() {
        let [_, left, right] = LEAFLETS;
        assert_eq!(left.position.x, -right.position.x);
        assert_eq!(left.rotation.z, -right.rotation.z);
        assert_eq!(left.scale, 0.8);
    }
}
