//! Rose Day card: an envelope that opens on tap, releasing falling petals.
//!
//! The envelope is an explicit `Closed → Opening → Opened` machine
//! ([`Envelope`]); the scene only reads it to pose the flap, the card and
//! the petal particles.

mod entities;
mod systems;

pub use entities::{Envelope, EnvelopeState, FallingPetal};

use std::time::Duration;

use bevy::prelude::*;

use crate::AppView;
use crate::visuals::Caption;

/// Per-plugin configuration for the card view.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct CardConfig {
    /// Seed for falling-petal generation and drift noise.
    pub seed: u64,
    /// Time from the tap until the envelope counts as opened (milliseconds).
    pub open_delay_ms: u64,
    /// Falling-petal particle ranges.
    pub particles: ParticleSettings,
    /// Half width/height of the visible card plane (world units).
    pub view_half_extent: Vec2,
    /// Duration of the card sliding out once opened (seconds).
    pub card_slide_secs: f32,
    /// How far the card rises out of the envelope.
    pub card_rise: f32,
    /// Image shown on the card, relative to the asset folder.
    pub image_path: String,
    /// Background clear color.
    pub clear_color: Color,
    /// Bloom post-processing intensity.
    pub bloom_intensity: f32,
    /// Greeting shown above the card once it is revealed.
    pub heading: Caption,
    /// Signature shown below the card once it is revealed.
    pub signature: Caption,
}

/// Ranges for randomized falling petals.
#[derive(Clone, Debug, Reflect)]
pub struct ParticleSettings {
    /// Petals generated when the envelope opens.
    pub count: usize,
    /// Start delays are drawn from `[0, max_delay)` seconds.
    pub max_delay: f32,
    /// Shortest fall duration (seconds).
    pub min_duration: f32,
    /// Longest fall duration (seconds, exclusive).
    pub max_duration: f32,
    /// Smallest petal size (pixels).
    pub min_size: f32,
    /// Largest petal size (pixels, exclusive).
    pub max_size: f32,
    /// Horizontal drift amplitude (world units).
    pub drift: f32,
    /// Drift noise sampling rate (per second).
    pub drift_frequency: f64,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            seed: 0x0214,
            open_delay_ms: 800,
            particles: ParticleSettings {
                count: 30,
                max_delay: 5.0,
                min_duration: 5.0,
                max_duration: 10.0,
                min_size: 10.0,
                max_size: 30.0,
                drift: 0.4,
                drift_frequency: 0.3,
            },
            view_half_extent: Vec2::new(6.0, 4.0),
            card_slide_secs: 0.6,
            card_rise: 1.5,
            image_path: "rose-colored.png".into(),
            clear_color: Color::srgb_u8(0x2a, 0x08, 0x12),
            bloom_intensity: 0.2,
            heading: Caption::new("Happy Rose Day", 40.0, Color::srgb_u8(0xff, 0xd6, 0xe0), 48.0)
                .from_top(),
            signature: Caption::new(
                "❤️ With Love ❤️",
                22.0,
                Color::srgb_u8(0xff, 0x8f, 0xa8),
                48.0,
            ),
        }
    }
}

impl CardConfig {
    /// Opening delay as an exact [`Duration`].
    pub fn open_delay(&self) -> Duration {
        Duration::from_millis(self.open_delay_ms)
    }

    /// A fresh closed envelope using the configured delay.
    pub fn envelope(&self) -> Envelope {
        Envelope::new(self.open_delay())
    }
}

/// Card view: spawns on entering [`AppView::Card`].
pub struct CardPlugin(pub CardConfig);

impl Plugin for CardPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<CardConfig>()
            .register_type::<EnvelopeState>()
            .register_type::<entities::CardPiece>()
            .register_type::<entities::PetalParticle>()
            .register_type::<entities::CardCaption>()
            .insert_resource(self.0.clone())
            .add_systems(OnEnter(AppView::Card), systems::spawn_card)
            .add_systems(
                Update,
                (
                    systems::open_on_key,
                    systems::tick_envelope,
                    systems::spawn_particles,
                    systems::pose_envelope,
                    systems::animate_particles,
                    systems::reveal_captions,
                )
                    .chain()
                    .run_if(in_state(AppView::Card)),
            );
    }
}
