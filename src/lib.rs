#![warn(missing_docs)]
//! Rose Day greeting: procedural rose, layered lily and an envelope card.
//!
//! The geometry core ([`geometry`], [`bloom::layout`]) is pure and
//! engine-independent apart from Bevy's math types; the view plugins assemble
//! it into scenes and drive the per-frame animation.

pub mod bloom;
pub mod card;
pub mod geometry;
pub mod lily;
pub mod math;
pub mod orbit;
pub mod visuals;

use bevy::prelude::*;

/// Which greeting is on screen. Number keys 1–3 switch between them.
#[derive(States, Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
#[cfg_attr(feature = "native", derive(clap::ValueEnum))]
pub enum AppView {
    /// Envelope card with falling petals.
    #[default]
    Card,
    /// Procedural long-stemmed rose.
    Rose,
    /// Layered lily with pointer parallax.
    Lily,
}

impl AppView {
    /// All views in key order.
    pub const ALL: [Self; 3] = [Self::Card, Self::Rose, Self::Lily];

    /// View selected by a number key, if any.
    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::Digit1 => Some(Self::Card),
            KeyCode::Digit2 => Some(Self::Rose),
            KeyCode::Digit3 => Some(Self::Lily),
            _ => None,
        }
    }
}

/// Marks the top-level entities of a view; they are despawned on leaving it.
#[derive(Component, Reflect)]
pub struct ViewRoot;

/// Bundles the three views, the orbit camera and the shared part meshes.
#[derive(Default)]
pub struct RoseDayPlugin {
    /// Rose scene settings.
    pub bloom: bloom::BloomConfig,
    /// Envelope card settings.
    pub card: card::CardConfig,
    /// Lily scene settings.
    pub lily: lily::LilyConfig,
    /// Orbit camera settings (rose view).
    pub orbit: orbit::OrbitConfig,
}

impl Plugin for RoseDayPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<AppView>()
            .register_type::<ViewRoot>()
            .init_resource::<geometry::PartMeshes>()
            .add_plugins(bloom::BloomPlugin(self.bloom.clone()))
            .add_plugins(card::CardPlugin(self.card.clone()))
            .add_plugins(lily::LilyPlugin(self.lily.clone()))
            .add_plugins(orbit::OrbitPlugin(self.orbit.clone()))
            .add_systems(Update, switch_view)
            .add_systems(Update, announce_view.run_if(state_changed::<AppView>));

        for view in AppView::ALL {
            app.add_systems(OnExit(view), despawn_view);
        }
    }
}

fn switch_view(
    keys: Res<ButtonInput<KeyCode>>,
    current: Res<State<AppView>>,
    mut next: ResMut<NextState<AppView>>,
) {
    let Some(view) = keys.get_just_pressed().find_map(|k| AppView::from_key(*k)) else {
        return;
    };
    if view != *current.get() {
        next.set(view);
    }
}

fn announce_view(current: Res<State<AppView>>) {
    info!("showing {:?}", current.get());
}

fn despawn_view(mut commands: Commands, roots: Query<Entity, With<ViewRoot>>) {
    for entity in &roots {
        commands.entity(entity).despawn();
    }
}
