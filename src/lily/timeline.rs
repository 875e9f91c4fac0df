//! Lily animation as pure functions of time since the view was entered.

use std::f32::consts::PI;

use bevy::prelude::*;

use super::LilyConfig;
use super::shapes::UNITS_PER_WORLD;
use crate::math;

/// Tilt of a closed petal around its own X axis (radians).
const CLOSED_TILT: f32 = PI / 3.0;

/// Scale of a closed petal.
const CLOSED_SCALE: f32 = 0.5;

/// Bloom pose of one petal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PetalPose {
    /// Uniform scale, `0.5` closed to `1.0` open.
    pub scale: f32,
    /// Backward tilt (radians), `π/3` closed to `0` open.
    pub tilt: f32,
    /// `0` closed to `1` open.
    pub opacity: f32,
}

/// Sway and bob of the whole flower.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IdleOffset {
    /// Roll around Z (radians).
    pub roll: f32,
    /// Vertical displacement (world units, up is positive).
    pub y: f32,
}

impl LilyConfig {
    /// Seconds since the lily started opening, `None` before that.
    pub fn bloom_elapsed(&self, t: f32) -> Option<f32> {
        let since = t - self.bloom_delay;
        (since >= 0.0).then_some(since)
    }

    /// Pose of the petal with opening order `order` at time `t`.
    ///
    /// Outer petals use orders `0, 1, 2`; inner petals `0.5, 1.5, 2.5`.
    pub fn petal_pose(&self, t: f32, order: f32) -> PetalPose {
        let progress = self.bloom_elapsed(t).map_or(0.0, |b| {
            ((b - order * self.petal_stagger) / self.petal_open_secs).clamp(0.0, 1.0)
        });
        let e = math::ease_out_cubic(progress);
        PetalPose {
            scale: CLOSED_SCALE + (1.0 - CLOSED_SCALE) * e,
            tilt: CLOSED_TILT * (1.0 - e),
            opacity: e,
        }
    }

    /// Stamen scale, `0` until they appear, then eased up to `1`.
    pub fn stamen_scale(&self, t: f32) -> f32 {
        self.bloom_elapsed(t).map_or(0.0, |b| {
            math::ease_in_out_sine((b - self.stamen_delay) / self.stamen_secs)
        })
    }

    /// Fraction of the stem drawn so far.
    pub fn stem_drawn(&self, t: f32) -> f32 {
        math::ease_in_out_sine(t / self.stem_secs)
    }

    /// Leaf unfold progress: `0` folded flat, `1` fully open.
    pub fn leaf_unfold(&self, t: f32) -> f32 {
        math::ease_in_out_sine((t - self.leaf_delay) / self.leaf_secs)
    }

    /// Breathing scale of outer petal `index`, `1.0` before its first breath.
    pub fn breath(&self, t: f32, index: usize) -> f32 {
        let since = t - index as f32 * self.breath_stagger;
        if since < 0.0 {
            return 1.0;
        }
        math::keyframe_loop(&[1.0, self.breath_scale, 1.0], since, self.breath_period)
    }

    /// Idle sway and bob at time `t`.
    pub fn idle(&self, t: f32) -> IdleOffset {
        IdleOffset {
            roll: math::keyframe_loop(&self.sway_keys, t, self.idle_period).to_radians(),
            y: -math::keyframe_loop(&self.bob_keys, t, self.idle_period) / UNITS_PER_WORLD,
        }
    }

    /// Tilt `(around X, around Y)` in radians for a pointer `offset` from
    /// the window centre in screen pixels (y down).
    ///
    /// Pointing right turns the flower's right side away; pointing up tips
    /// its top away. Offsets beyond the pointer range saturate.
    pub fn tilt_target(&self, offset: Vec2, max_degrees: f32) -> Vec2 {
        let r = self.pointer_range;
        Vec2::new(
            math::map_clamped(offset.y, -r, r, -max_degrees, max_degrees).to_radians(),
            math::map_clamped(offset.x, -r, r, -max_degrees, max_degrees).to_radians(),
        )
    }
}
