//! Layered lily that tilts toward the pointer.
//!
//! Four depth layers (stem and leaves, outer petals, inner petals, stamens)
//! follow the pointer through damped springs of different stiffness, which
//! gives the parallax. Everything else (bloom, breathing, sway) is a pure
//! function of the time since the view was entered, see [`timeline`].

mod entities;
pub mod shapes;
mod systems;
pub mod timeline;

pub use entities::{LilyLayer, Parallax};

use bevy::prelude::*;

use crate::AppView;
use crate::visuals::Caption;

/// Spring constants for one parallax layer.
#[derive(Clone, Copy, Debug, Reflect)]
pub struct SpringSettings {
    /// Pull toward the target.
    pub stiffness: f32,
    /// Velocity damping.
    pub damping: f32,
}

/// Per-plugin configuration for the lily view.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct LilyConfig {
    /// Pointer offset from the window center (pixels) that maps to full tilt.
    pub pointer_range: f32,
    /// Full tilt of the base layers (degrees).
    pub base_tilt_degrees: f32,
    /// Full tilt of the outer petals (degrees).
    pub outer_tilt_degrees: f32,
    /// Spring driving the base layers and stamens.
    pub base_spring: SpringSettings,
    /// Heavier spring driving the outer petals.
    pub outer_spring: SpringSettings,
    /// Sway keyframes around Z (degrees), spread over `idle_period`.
    pub sway_keys: Vec<f32>,
    /// Bob keyframes (pixels, negative is up), spread over `idle_period`.
    pub bob_keys: Vec<f32>,
    /// Length of one sway/bob loop (seconds).
    pub idle_period: f32,
    /// Peak outline scale of a breathing outer petal.
    pub breath_scale: f32,
    /// Length of one breath (seconds).
    pub breath_period: f32,
    /// Breath offset between neighbouring outer petals (seconds).
    pub breath_stagger: f32,
    /// Time after entering the view before the lily opens (seconds).
    pub bloom_delay: f32,
    /// Petal opening delay per petal index (seconds).
    pub petal_stagger: f32,
    /// Duration of one petal opening (seconds).
    pub petal_open_secs: f32,
    /// Delay after opening before the stamens appear (seconds).
    pub stamen_delay: f32,
    /// Duration of the stamen scale-in (seconds).
    pub stamen_secs: f32,
    /// Duration of the stem drawing itself (seconds).
    pub stem_secs: f32,
    /// Delay before the leaves unfold (seconds).
    pub leaf_delay: f32,
    /// Duration of the leaf unfold (seconds).
    pub leaf_secs: f32,
    /// Camera distance from the flower.
    pub camera_distance: f32,
    /// Background clear color.
    pub clear_color: Color,
    /// Bloom post-processing intensity.
    pub bloom_intensity: f32,
    /// Title line under the flower.
    pub caption: Caption,
}

impl Default for LilyConfig {
    fn default() -> Self {
        Self {
            pointer_range: 300.0,
            base_tilt_degrees: 20.0,
            outer_tilt_degrees: 25.0,
            base_spring: SpringSettings {
                stiffness: 100.0,
                damping: 20.0,
            },
            outer_spring: SpringSettings {
                stiffness: 80.0,
                damping: 30.0,
            },
            sway_keys: vec![0.0, 2.0, 0.0, -2.0, 0.0],
            bob_keys: vec![0.0, -10.0, 0.0],
            idle_period: 6.0,
            breath_scale: 1.03,
            breath_period: 4.0,
            breath_stagger: 0.5,
            bloom_delay: 0.5,
            petal_stagger: 0.1,
            petal_open_secs: 3.0,
            stamen_delay: 2.0,
            stamen_secs: 1.0,
            stem_secs: 2.0,
            leaf_delay: 1.5,
            leaf_secs: 2.0,
            camera_distance: 6.5,
            clear_color: Color::srgb_u8(0x0f, 0x05, 0x08),
            bloom_intensity: 0.25,
            caption: Caption::new(
                "Living 3D Lily",
                14.0,
                Color::srgb_u8(0xff, 0xb7, 0xc5).with_alpha(0.7),
                30.0,
            )
            .uppercase(),
        }
    }
}

/// Lily view: spawns on entering [`AppView::Lily`].
pub struct LilyPlugin(pub LilyConfig);

impl Plugin for LilyPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<LilyConfig>()
            .register_type::<LilyLayer>()
            .register_type::<entities::LilyPart>()
            .insert_resource(self.0.clone())
            .init_resource::<Parallax>()
            .add_systems(OnEnter(AppView::Lily), systems::spawn_lily)
            .add_systems(
                Update,
                (
                    systems::follow_pointer,
                    systems::tilt_layers,
                    systems::idle_motion,
                    systems::animate_bloom,
                )
                    .chain()
                    .run_if(in_state(AppView::Lily)),
            );
    }
}
