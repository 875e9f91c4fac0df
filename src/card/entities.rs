use std::f32::consts::TAU;
use std::time::Duration;

use bevy::prelude::*;
use noise::Perlin;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::ParticleSettings;

/// Lifecycle of the envelope.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
pub enum EnvelopeState {
    /// Sealed, waiting for a tap.
    #[default]
    Closed,
    /// Flap animating open, petals already falling.
    Opening,
    /// Card revealed. Terminal.
    Opened,
}

/// One randomized falling petal. Generated once, never re-rolled.
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct FallingPetal {
    /// Horizontal start position as a fraction of the view width, `[0, 1)`.
    pub left: f32,
    /// Seconds after opening before the petal first appears.
    pub delay: f32,
    /// Seconds for one fall from top to bottom.
    pub duration: f32,
    /// Petal size in pixels.
    pub size: f32,
}

impl FallingPetal {
    /// Draws a petal from the configured ranges.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, s: &ParticleSettings) -> Self {
        Self {
            left: rng.random_range(0.0..1.0),
            delay: rng.random_range(0.0..s.max_delay),
            duration: rng.random_range(s.min_duration..s.max_duration),
            size: rng.random_range(s.min_size..s.max_size),
        }
    }

    /// Fall progress in `[0, 1)` at `t` seconds after opening, looping
    /// forever. `None` while the start delay has not elapsed.
    pub fn progress(&self, t: f32) -> Option<f32> {
        let since = t - self.delay;
        (since >= 0.0).then(|| (since / self.duration).fract())
    }

    /// Position on a view plane of `half_extent` and spin angle at time `t`.
    ///
    /// The petal enters just above the top edge and leaves just below the
    /// bottom edge, turning once per fall.
    pub fn pose(&self, t: f32, half_extent: Vec2) -> Option<(Vec2, f32)> {
        let p = self.progress(t)?;
        let margin = self.world_size();
        let top = half_extent.y + margin;
        let x = (self.left * 2.0 - 1.0) * half_extent.x;
        Some((Vec2::new(x, top - p * 2.0 * top), p * TAU))
    }

    /// Size converted to world units (100 px per unit).
    pub fn world_size(&self) -> f32 {
        self.size / 100.0
    }
}

/// The envelope state machine plus the petals released when it opened.
#[derive(Resource, Debug)]
pub struct Envelope {
    state: EnvelopeState,
    open_delay: Duration,
    since_open: Duration,
    particles: Vec<FallingPetal>,
}

impl Envelope {
    /// A closed envelope that finishes opening `open_delay` after the tap.
    pub fn new(open_delay: Duration) -> Self {
        Self {
            state: EnvelopeState::Closed,
            open_delay,
            since_open: Duration::ZERO,
            particles: Vec::new(),
        }
    }

    /// Current state.
    pub fn state(&self) -> EnvelopeState {
        self.state
    }

    /// Petals released on opening; empty while closed.
    pub fn particles(&self) -> &[FallingPetal] {
        &self.particles
    }

    /// Time since the tap.
    pub fn since_open(&self) -> Duration {
        self.since_open
    }

    /// Handles a tap. Only a closed envelope reacts: it starts opening and
    /// generates its petals. Returns whether the state changed.
    pub fn open<R: Rng + ?Sized>(&mut self, rng: &mut R, settings: &ParticleSettings) -> bool {
        if self.state != EnvelopeState::Closed {
            return false;
        }
        self.state = EnvelopeState::Opening;
        self.since_open = Duration::ZERO;
        self.particles = (0..settings.count)
            .map(|_| FallingPetal::random(rng, settings))
            .collect();
        true
    }

    /// Advances time. Returns the new state if this tick crossed the open
    /// delay.
    pub fn tick(&mut self, delta: Duration) -> Option<EnvelopeState> {
        if self.state == EnvelopeState::Closed {
            return None;
        }
        self.since_open += delta;
        if self.state == EnvelopeState::Opening && self.since_open >= self.open_delay {
            self.state = EnvelopeState::Opened;
            return Some(self.state);
        }
        None
    }

    /// Flap opening progress in `[0, 1]`.
    pub fn flap_progress(&self) -> f32 {
        match self.state {
            EnvelopeState::Closed => 0.0,
            EnvelopeState::Opening => {
                (self.since_open.as_secs_f32() / self.open_delay.as_secs_f32()).min(1.0)
            }
            EnvelopeState::Opened => 1.0,
        }
    }

    /// Seconds since the envelope reached [`EnvelopeState::Opened`].
    pub fn since_opened(&self) -> Option<f32> {
        (self.state == EnvelopeState::Opened)
            .then(|| self.since_open.saturating_sub(self.open_delay).as_secs_f32())
    }
}

/// Scene pieces of the envelope.
#[derive(Component, Reflect, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardPiece {
    /// Envelope body; also the tap target.
    Body,
    /// Pivot at the top edge that the flap hangs from.
    FlapHinge,
    /// The rose card inside.
    Card,
}

/// Screen text that stays hidden until the card is revealed.
#[derive(Component, Reflect)]
pub struct CardCaption;

/// A spawned falling petal, indexing into [`Envelope::particles`].
#[derive(Component, Reflect)]
pub struct PetalParticle(pub usize);

/// Seeded randomness for petal generation.
#[derive(Resource)]
pub struct CardRng(pub StdRng);

impl CardRng {
    /// Generator seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

/// Perlin field sampled for the sideways drift of falling petals.
#[derive(Resource)]
pub struct DriftNoise(pub Perlin);

/// Mesh and material shared by every falling petal.
#[derive(Resource)]
pub struct PetalParticleAssets {
    /// Tiny petal mesh.
    pub mesh: Handle<Mesh>,
    /// Pink petal material.
    pub material: Handle<StandardMaterial>,
}
