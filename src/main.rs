//! Happy Rose Day: envelope card, procedural rose and layered lily.
//!
//! Keys: `1`/`2`/`3` switch views, `Space` opens the envelope, `Tab` toggles
//! the world inspector, `Esc` quits.

use bevy::app::AppExit;
use bevy::picking::mesh_picking::MeshPickingPlugin;
use bevy::prelude::*;
use bevy_inspector_egui::quick::WorldInspectorPlugin;
use rose_day::{AppView, RoseDayPlugin};

/// Whether the world inspector is shown.
#[derive(Resource, Default, Reflect)]
struct InspectorOpen(bool);

/// Command-line options.
#[cfg(feature = "native")]
#[derive(clap::Parser, Debug)]
#[command(version, about = "Happy Rose Day greeting")]
struct Cli {
    /// View shown at startup.
    #[arg(long, value_enum, default_value_t = AppView::Card)]
    view: AppView,
    /// Seed for petal phases and falling petals.
    #[arg(long)]
    seed: Option<u64>,
}

#[cfg(feature = "native")]
fn configure() -> (RoseDayPlugin, AppView) {
    use clap::Parser;
    let cli = Cli::parse();
    let mut plugin = RoseDayPlugin::default();
    if let Some(seed) = cli.seed {
        plugin.bloom.seed = seed;
        plugin.card.seed = seed;
    }
    (plugin, cli.view)
}

#[cfg(not(feature = "native"))]
fn configure() -> (RoseDayPlugin, AppView) {
    (RoseDayPlugin::default(), AppView::default())
}

fn main() {
    let (plugin, view) = configure();
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Happy Rose Day".into(),
            fit_canvas_to_parent: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(MeshPickingPlugin)
    .register_type::<InspectorOpen>()
    .init_resource::<InspectorOpen>()
    .insert_state(view)
    .add_plugins(plugin)
    .add_plugins(bevy_egui::EguiPlugin::default())
    .add_plugins(WorldInspectorPlugin::new().run_if(|open: Res<InspectorOpen>| open.0))
    .add_systems(Update, (exit_on_esc, toggle_inspector));

    #[cfg(feature = "native")]
    {
        use bevy::remote::{RemotePlugin, http::RemoteHttpPlugin};
        app.add_plugins(RemotePlugin::default())
            .add_plugins(RemoteHttpPlugin::default());
    }

    info!("starting in {view:?}");
    app.run();
}

fn toggle_inspector(keys: Res<ButtonInput<KeyCode>>, mut open: ResMut<InspectorOpen>) {
    if keys.just_pressed(KeyCode::Tab) {
        open.0 = !open.0;
        debug!("inspector {}", if open.0 { "shown" } else { "hidden" });
    }
}

fn exit_on_esc(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
