//! Procedural long-stemmed rose.
//!
//! Six golden-angle rings of cupped petals over five sepals, a curved stem
//! with thorns and four compound leaves. Petals sway, the whole rose bobs,
//! and hovering it scales it up slightly.

mod entities;
pub mod layout;
pub mod motion;
mod systems;

pub use entities::{BloomHover, RoseRoot, SwayingPetal};
pub use motion::BobOffset;

use bevy::prelude::*;

use crate::AppView;
use crate::visuals::Caption;

/// Per-plugin configuration for the rose view.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct BloomConfig {
    /// Seed for per-petal sway phases.
    pub seed: u64,
    /// Idle animation amplitudes and speeds.
    pub motion: MotionSettings,
    /// Whole-rose scale while the pointer hovers it.
    pub hover_scale: f32,
    /// Initial camera position (the camera orbits the origin).
    pub camera_position: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Bloom post-processing intensity.
    pub bloom_intensity: f32,
    /// Background clear color.
    pub clear_color: Color,
    /// Lighting rig.
    pub lighting: LightingSettings,
    /// Title line under the rose.
    pub caption: Caption,
}

/// Idle animation parameters.
#[derive(Clone, Debug, Reflect)]
pub struct MotionSettings {
    /// Angular frequency of petal sway (rad/s).
    pub sway_speed: f32,
    /// Sway amplitude per layer index (radians).
    pub sway_per_layer: f32,
    /// Angular frequency of the vertical bob (rad/s).
    pub bob_speed: f32,
    /// Bob amplitude (world units).
    pub bob_height: f32,
    /// Angular frequency of the side-to-side rock (rad/s).
    pub rock_speed: f32,
    /// Rock amplitude (radians).
    pub rock_angle: f32,
    /// Rate of the slow float clock.
    pub float_speed: f32,
    /// Float tilt strength (radians, scaled down per axis).
    pub float_rotation: f32,
    /// Float hover strength (world units, divided by ten).
    pub float_height: f32,
}

/// Soft studio lighting around the rose.
#[derive(Clone, Debug, Reflect)]
pub struct LightingSettings {
    /// Ambient brightness.
    pub ambient_brightness: f32,
    /// Key light illuminance (lux).
    pub key_illuminance: f32,
    /// Fill light illuminance (lux).
    pub fill_illuminance: f32,
    /// Front point light intensity (lumens).
    pub rim_intensity: f32,
}

impl Default for BloomConfig {
    fn default() -> Self {
        Self {
            seed: 0x0e05_e0da,
            motion: MotionSettings {
                sway_speed: 0.3,
                sway_per_layer: 0.008,
                bob_speed: 0.35,
                bob_height: 0.06,
                rock_speed: 0.18,
                rock_angle: 0.015,
                float_speed: 1.2,
                float_rotation: 0.15,
                float_height: 0.25,
            },
            hover_scale: 1.04,
            camera_position: Vec3::new(0.0, 0.5, 4.5),
            fov_degrees: 50.0,
            bloom_intensity: 0.12,
            clear_color: Color::srgb_u8(0x1a, 0x15, 0x20),
            lighting: LightingSettings {
                ambient_brightness: 300.0,
                key_illuminance: 14_000.0,
                fill_illuminance: 3_500.0,
                rim_intensity: 400_000.0,
            },
            caption: Caption::new(
                "A Long-Stemmed Rose",
                16.0,
                Color::srgb_u8(0xe0, 0xb0, 0xb0).with_alpha(0.85),
                20.0,
            ),
        }
    }
}

/// Rose scene: spawns on entering [`AppView::Rose`], animates while shown.
pub struct BloomPlugin(pub BloomConfig);

impl Plugin for BloomPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<BloomConfig>()
            .register_type::<RoseRoot>()
            .register_type::<SwayingPetal>()
            .register_type::<entities::RosePart>()
            .insert_resource(self.0.clone())
            .init_resource::<BloomHover>()
            .add_systems(OnEnter(AppView::Rose), systems::spawn_rose)
            .add_systems(
                Update,
                (systems::sway_petals, systems::bob_rose).run_if(in_state(AppView::Rose)),
            );
    }
}
