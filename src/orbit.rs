//! Orbiting camera for the rose view.
//!
//! Slowly auto-rotates around its target; left-drag orbits, scroll zooms.

use std::f32::consts::{PI, TAU};

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use crate::math;

/// Per-plugin configuration for the orbit camera.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct OrbitConfig {
    /// Auto-rotation speed; 1.0 is one turn per minute.
    pub auto_rotate_speed: f32,
    /// Orbit angle per dragged pixel (radians).
    pub drag_sensitivity: f32,
    /// Distance change per scroll line.
    pub zoom_step: f32,
    /// Closest allowed distance to the target.
    pub min_distance: f32,
    /// Farthest allowed distance from the target.
    pub max_distance: f32,
    /// Largest polar angle from the +Y pole (radians).
    pub max_polar: f32,
    /// Smallest polar angle, keeps the camera off the pole.
    pub polar_margin: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            auto_rotate_speed: 0.35,
            drag_sensitivity: 0.005,
            zoom_step: 0.3,
            min_distance: 1.5,
            max_distance: 12.0,
            max_polar: PI / 1.2,
            polar_margin: 0.05,
        }
    }
}

/// Spherical camera rig around `target`.
#[derive(Component, Clone, Copy, Debug, PartialEq, Reflect)]
pub struct OrbitCamera {
    /// Point the camera looks at.
    pub target: Vec3,
    /// Distance from the target.
    pub distance: f32,
    /// Angle around +Y, measured from +Z toward +X.
    pub azimuth: f32,
    /// Angle from the +Y pole.
    pub polar: f32,
}

impl OrbitCamera {
    /// Rig that starts at `position` looking at `target`.
    pub fn from_position(position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let distance = offset.length();
        Self {
            target,
            distance,
            azimuth: offset.x.atan2(offset.z),
            polar: (offset.y / distance).clamp(-1.0, 1.0).acos(),
        }
    }

    /// World position of the camera.
    pub fn translation(&self) -> Vec3 {
        let (sin_p, cos_p) = self.polar.sin_cos();
        let (sin_a, cos_a) = self.azimuth.sin_cos();
        self.target + self.distance * Vec3::new(sin_p * sin_a, cos_p, sin_p * cos_a)
    }

    /// Camera transform looking at the target.
    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.translation()).looking_at(self.target, Vec3::Y)
    }
}

/// Auto-rotation rate in radians per second for a given speed setting.
pub fn auto_rotate_rate(speed: f32) -> f32 {
    TAU / 60.0 * speed
}

/// Drives every [`OrbitCamera`] in the world.
pub struct OrbitPlugin(pub OrbitConfig);

impl Plugin for OrbitPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<OrbitConfig>()
            .register_type::<OrbitCamera>()
            .insert_resource(self.0.clone())
            .add_systems(Update, orbit);
    }
}

fn orbit(
    time: Res<Time>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: MessageReader<MouseMotion>,
    mut wheel: MessageReader<MouseWheel>,
    cfg: Res<OrbitConfig>,
    mut query: Query<(&mut OrbitCamera, &mut Transform)>,
) {
    let drag: Vec2 = motion.read().map(|ev| ev.delta).sum();
    let scroll: f32 = wheel
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y / 40.0,
        })
        .sum();

    for (mut rig, mut transform) in &mut query {
        rig.azimuth += auto_rotate_rate(cfg.auto_rotate_speed) * time.delta_secs();

        if buttons.pressed(MouseButton::Left) && drag != Vec2::ZERO {
            rig.azimuth -= drag.x * cfg.drag_sensitivity;
            let delta = math::clamp_polar(
                rig.polar,
                -drag.y * cfg.drag_sensitivity,
                cfg.polar_margin,
                cfg.max_polar,
            );
            rig.polar += delta;
        }

        if scroll != 0.0 {
            rig.distance =
                (rig.distance - scroll * cfg.zoom_step).clamp(cfg.min_distance, cfg.max_distance);
        }

        *transform = rig.transform();
    }
}
