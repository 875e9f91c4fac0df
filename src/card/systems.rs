use std::f32::consts::PI;

use bevy::asset::RenderAssetUsages;
use bevy::mesh::Indices;
use bevy::picking::events::{Click, Pointer};
use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;
use noise::{NoiseFn, Perlin};

use super::CardConfig;
use super::entities::{
    CardCaption, CardPiece, CardRng, DriftNoise, Envelope, EnvelopeState, PetalParticle,
    PetalParticleAssets,
};
use crate::ViewRoot;
use crate::geometry::{PartMeshes, ShapeParams};
use crate::math;
use crate::visuals;

const ENVELOPE_SIZE: Vec3 = Vec3::new(3.2, 2.0, 0.08);
const CARD_SIZE: Vec2 = Vec2::new(2.8, 1.8);
const CARD_Z: f32 = -0.02;
const PETAL_Z: f32 = 1.0;

const ENVELOPE_RED: Color = Color::srgb(0.78, 0.10, 0.20);
const FLAP_RED: Color = Color::srgb(0.66, 0.07, 0.16);
const PETAL_PINK: Color = Color::srgb(1.0, 0.42, 0.55);

// ── Startup ─────────────────────────────────────────────────────────

/// Spawns camera, light, envelope, flap and the hidden card.
pub fn spawn_card(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut parts: ResMut<PartMeshes>,
    asset_server: Res<AssetServer>,
    cfg: Res<CardConfig>,
) {
    commands.insert_resource(cfg.envelope());
    commands.insert_resource(CardRng::new(cfg.seed));
    commands.insert_resource(DriftNoise(Perlin::new(cfg.seed as u32)));
    commands.insert_resource(ClearColor(cfg.clear_color));

    let camera_distance = cfg.view_half_extent.y / 22.5_f32.to_radians().tan();
    commands.spawn((
        visuals::view_camera(
            Transform::from_xyz(0.0, 0.0, camera_distance).looking_at(Vec3::ZERO, Vec3::Y),
            45.0,
            cfg.bloom_intensity,
        ),
        AmbientLight {
            brightness: 400.0,
            ..default()
        },
    ));
    commands.spawn((
        Name::new("CardLight"),
        ViewRoot,
        DirectionalLight {
            illuminance: 9000.0,
            ..default()
        },
        Transform::from_xyz(1.0, 2.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let envelope_mat = materials.add(StandardMaterial {
        base_color: ENVELOPE_RED,
        perceptual_roughness: 0.8,
        ..default()
    });
    commands
        .spawn((
            CardPiece::Body,
            ViewRoot,
            Name::new("Envelope"),
            Mesh3d(meshes.add(Cuboid::from_size(ENVELOPE_SIZE))),
            MeshMaterial3d(envelope_mat),
            Transform::default(),
        ))
        .observe(open_on_click);

    let hinge_y = ENVELOPE_SIZE.y / 2.0;
    let flap = commands
        .spawn((
            Name::new("Flap"),
            Mesh3d(meshes.add(flap_mesh(ENVELOPE_SIZE.x, ENVELOPE_SIZE.y * 0.55))),
            MeshMaterial3d(materials.add(visuals::foliage_material(FLAP_RED, 0.8))),
            Transform::default(),
        ))
        .observe(open_on_click)
        .id();
    commands
        .spawn((
            CardPiece::FlapHinge,
            ViewRoot,
            Name::new("FlapHinge"),
            Transform::from_xyz(0.0, hinge_y, ENVELOPE_SIZE.z / 2.0 + 0.005),
            Visibility::default(),
        ))
        .add_child(flap);

    let card_mat = materials.add(StandardMaterial {
        base_color_texture: Some(asset_server.load(cfg.image_path.clone())),
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    });
    commands.spawn((
        CardPiece::Card,
        ViewRoot,
        Name::new("Card"),
        Mesh3d(meshes.add(Rectangle::from_size(CARD_SIZE))),
        MeshMaterial3d(card_mat),
        Transform::from_xyz(0.0, 0.0, CARD_Z),
    ));

    for line in [&cfg.heading, &cfg.signature] {
        commands.spawn((visuals::caption(line), CardCaption, Visibility::Hidden));
    }

    commands.insert_resource(PetalParticleAssets {
        mesh: parts.mesh(&ShapeParams::petal(2), &mut meshes),
        material: materials.add(visuals::glowing_material(PETAL_PINK, 0.6, 0.15)),
    });

    info!("envelope ready, tap or press space to open");
}

/// Triangle hanging down from a hinge at the origin.
fn flap_mesh(width: f32, depth: f32) -> Mesh {
    let half = width / 2.0;
    let positions = vec![[-half, 0.0, 0.0], [half, 0.0, 0.0], [0.0, -depth, 0.0]];
    let normals = vec![[0.0, 0.0, 1.0]; 3];
    let uvs = vec![[0.0, 0.0], [1.0, 0.0], [0.5, 1.0]];
    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_indices(Indices::U32(vec![0, 2, 1]))
}

// ── Input ───────────────────────────────────────────────────────────

fn request_open(envelope: &mut Envelope, rng: &mut CardRng, cfg: &CardConfig) {
    if envelope.open(&mut rng.0, &cfg.particles) {
        info!(
            "envelope {:?}, {} petals released",
            envelope.state(),
            envelope.particles().len()
        );
    }
}

fn open_on_click(
    mut click: On<Pointer<Click>>,
    mut envelope: ResMut<Envelope>,
    mut rng: ResMut<CardRng>,
    cfg: Res<CardConfig>,
) {
    click.propagate(false);
    request_open(&mut envelope, &mut rng, &cfg);
}

/// Space or Enter opens the envelope too.
pub fn open_on_key(
    keys: Res<ButtonInput<KeyCode>>,
    mut envelope: ResMut<Envelope>,
    mut rng: ResMut<CardRng>,
    cfg: Res<CardConfig>,
) {
    if keys.any_just_pressed([KeyCode::Space, KeyCode::Enter]) {
        request_open(&mut envelope, &mut rng, &cfg);
    }
}

// ── Update ──────────────────────────────────────────────────────────

pub fn tick_envelope(time: Res<Time>, mut envelope: ResMut<Envelope>) {
    if let Some(state) = envelope.tick(time.delta()) {
        info!("envelope {state:?}");
    }
}

/// Spawns one entity per released petal, once.
pub fn spawn_particles(
    mut commands: Commands,
    envelope: Res<Envelope>,
    assets: Option<Res<PetalParticleAssets>>,
    spawned: Query<(), With<PetalParticle>>,
) {
    if envelope.particles().is_empty() || !spawned.is_empty() {
        return;
    }
    let Some(assets) = assets else {
        return;
    };
    for (i, petal) in envelope.particles().iter().enumerate() {
        commands.spawn((
            PetalParticle(i),
            ViewRoot,
            Name::new(format!("FallingPetal({i})")),
            Mesh3d(assets.mesh.clone()),
            MeshMaterial3d(assets.material.clone()),
            Transform::from_xyz(0.0, 0.0, PETAL_Z).with_scale(Vec3::splat(petal.world_size())),
            Visibility::Hidden,
        ));
    }
    debug!("spawned {} falling petals", envelope.particles().len());
}

/// Swings the flap up while opening and slides the card out once opened.
pub fn pose_envelope(
    envelope: Res<Envelope>,
    cfg: Res<CardConfig>,
    mut pieces: Query<(&CardPiece, &mut Transform)>,
) {
    let flap_angle = -PI * math::ease_out_cubic(envelope.flap_progress());
    let slide = envelope
        .since_opened()
        .map_or(0.0, |t| math::ease_out_cubic((t / cfg.card_slide_secs).min(1.0)));

    for (piece, mut transform) in &mut pieces {
        match piece {
            CardPiece::FlapHinge => transform.rotation = Quat::from_rotation_x(flap_angle),
            CardPiece::Card => transform.translation.y = slide * cfg.card_rise,
            CardPiece::Body => {}
        }
    }
}

/// Moves each petal along its looping fall with a Perlin sideways drift.
pub fn animate_particles(
    envelope: Res<Envelope>,
    noise: Option<Res<DriftNoise>>,
    cfg: Res<CardConfig>,
    mut petals: Query<(&PetalParticle, &mut Transform, &mut Visibility)>,
) {
    if envelope.state() == EnvelopeState::Closed {
        return;
    }
    let Some(noise) = noise else {
        return;
    };
    let t = envelope.since_open().as_secs_f32();
    for (particle, mut transform, mut visibility) in &mut petals {
        let Some(petal) = envelope.particles().get(particle.0) else {
            continue;
        };
        let Some((pos, spin)) = petal.pose(t, cfg.view_half_extent) else {
            *visibility = Visibility::Hidden;
            continue;
        };
        let sample = [
            f64::from(t) * cfg.particles.drift_frequency,
            particle.0 as f64 * 1.7,
        ];
        let drift = noise.0.get(sample) as f32 * cfg.particles.drift;
        transform.translation = Vec3::new(pos.x + drift, pos.y, PETAL_Z);
        transform.rotation = Quat::from_rotation_z(spin) * Quat::from_rotation_x(spin * 0.5);
        *visibility = Visibility::Visible;
    }
}

/// Shows the greeting once the envelope has opened.
pub fn reveal_captions(
    envelope: Res<Envelope>,
    mut captions: Query<&mut Visibility, With<CardCaption>>,
) {
    let shown = if envelope.state() == EnvelopeState::Opened {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for mut visibility in &mut captions {
        visibility.set_if_neq(shown);
    }
}
