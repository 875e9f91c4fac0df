use bevy::prelude::*;

use super::{LilyConfig, SpringSettings};
use crate::math::{self, SpringState};

/// Whole flower: carries the base tilt plus idle sway and bob.
#[derive(Component, Reflect)]
pub struct LilyRoot {
    /// `Time::elapsed_secs` when the view was entered.
    pub entered_at: f32,
}

/// Depth layer inside the flower.
#[derive(Component, Reflect, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LilyLayer {
    /// Stem and leaves, furthest back.
    Stem,
    /// Three outer petals; tilt on their own heavier spring.
    OuterPetals,
    /// Three inner petals with spots.
    InnerPetals,
    /// Pistil and stamens, in front; repeat the base tilt.
    Stamens,
}

impl LilyLayer {
    /// Distance from the flower plane toward the viewer.
    pub fn depth(self) -> f32 {
        match self {
            Self::Stem => -0.5,
            Self::OuterPetals => 0.0,
            Self::InnerPetals => 0.3,
            Self::Stamens => 0.5,
        }
    }
}

/// Animated part of the lily.
#[derive(Component, Reflect, Clone, Copy, Debug, PartialEq)]
pub enum LilyPart {
    /// Petal with its fan angle (radians) and opening order.
    Petal {
        /// Rotation around the flower axis.
        angle: f32,
        /// Opening order; also selects the breathing offset of outer petals.
        order: f32,
        /// Outer petals breathe.
        outer: bool,
    },
    /// One stamen, scales in late.
    Stamen,
    /// One piece of the stem, shown once the drawing reaches `index / count`.
    StemSegment {
        /// Position along the stem.
        index: usize,
        /// Total pieces.
        count: usize,
    },
    /// Leaf, unfolds from edge-on.
    Leaf {
        /// `+1` right, `-1` left.
        side: f32,
    },
}

/// Pointer-following springs for the two tilt layers.
#[derive(Resource, Default, Debug)]
pub struct Parallax {
    base: [SpringState; 2],
    outer: [SpringState; 2],
}

impl Parallax {
    /// Current base tilt `(around X, around Y)`.
    pub fn base(&self) -> Vec2 {
        Vec2::new(self.base[0].value, self.base[1].value)
    }

    /// Current outer-petal tilt `(around X, around Y)`.
    pub fn outer(&self) -> Vec2 {
        Vec2::new(self.outer[0].value, self.outer[1].value)
    }

    /// Pulls both layers toward the tilt for pointer `offset` by `dt` seconds.
    pub fn follow(&mut self, cfg: &LilyConfig, offset: Vec2, dt: f32) {
        let base = cfg.tilt_target(offset, cfg.base_tilt_degrees);
        let outer = cfg.tilt_target(offset, cfg.outer_tilt_degrees);
        step_pair(&mut self.base, base, cfg.base_spring, dt);
        step_pair(&mut self.outer, outer, cfg.outer_spring, dt);
    }
}

fn step_pair(springs: &mut [SpringState; 2], target: Vec2, s: SpringSettings, dt: f32) {
    for (spring, goal) in springs.iter_mut().zip([target.x, target.y]) {
        *spring = math::step_spring(*spring, goal, s.stiffness, s.damping, dt);
    }
}

/// Material of a petal, faded in during the bloom.
#[derive(Component)]
pub struct PetalMaterial(pub Handle<StandardMaterial>);
