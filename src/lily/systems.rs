use std::f32::consts::{FRAC_PI_2, TAU};

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::LilyConfig;
use super::entities::{LilyLayer, LilyPart, LilyRoot, Parallax, PetalMaterial};
use super::shapes;
use crate::ViewRoot;
use crate::math;
use crate::visuals;

const STEM_GREEN: Color = Color::srgb(0.180, 0.545, 0.341);
const SPOT_RED: Color = Color::srgba(0.545, 0.0, 0.0, 0.7);
const PISTIL_GREEN: Color = Color::srgb(0.196, 0.804, 0.196);
const FILAMENT: Color = Color::srgb(0.863, 0.941, 0.792);
const ANTHER_BROWN: Color = Color::srgb(0.545, 0.271, 0.075);

const PETAL_SEGMENTS: usize = 24;
const LEAF_SEGMENTS: usize = 16;
const STEM_PIECES: usize = 24;
const STAMEN_COUNT: usize = 6;

// ── Startup ─────────────────────────────────────────────────────────

/// Spawns camera, lights and the four lily layers.
pub fn spawn_lily(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut parallax: ResMut<Parallax>,
    time: Res<Time>,
    cfg: Res<LilyConfig>,
) {
    *parallax = Parallax::default();
    commands.insert_resource(ClearColor(cfg.clear_color));
    commands.spawn(visuals::caption(&cfg.caption));
    commands.spawn((
        visuals::view_camera(
            Transform::from_xyz(0.0, -0.3, cfg.camera_distance)
                .looking_at(Vec3::new(0.0, -0.3, 0.0), Vec3::Y),
            45.0,
            cfg.bloom_intensity,
        ),
        AmbientLight {
            brightness: 500.0,
            ..default()
        },
    ));
    commands.spawn((
        Name::new("LilyLight"),
        ViewRoot,
        PointLight {
            intensity: 600_000.0,
            color: Color::srgb_u8(0xff, 0xe4, 0xec),
            ..default()
        },
        Transform::from_xyz(1.5, 2.0, 4.0),
    ));

    let root = commands
        .spawn((
            LilyRoot {
                entered_at: time.elapsed_secs(),
            },
            ViewRoot,
            Name::new("Lily"),
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    let stem = spawn_stem_layer(&mut commands, &mut meshes, &mut materials);
    let petal_mesh = meshes.add(shapes::petal_mesh(PETAL_SEGMENTS));
    let outer = spawn_petal_layer(
        &mut commands,
        &mut materials,
        &petal_mesh,
        LilyLayer::OuterPetals,
        None,
    );
    let spot_mesh = meshes.add(Sphere::new(shapes::SPOT_RADIUS / shapes::UNITS_PER_WORLD));
    let spot_mat = materials.add(StandardMaterial {
        base_color: SPOT_RED,
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });
    let inner = spawn_petal_layer(
        &mut commands,
        &mut materials,
        &petal_mesh,
        LilyLayer::InnerPetals,
        Some((spot_mesh, spot_mat)),
    );
    let stamens = spawn_stamen_layer(&mut commands, &mut meshes, &mut materials);

    commands
        .entity(root)
        .add_children(&[stem, outer, inner, stamens]);
    debug!("lily spawned");
}

fn spawn_layer(commands: &mut Commands, layer: LilyLayer) -> Entity {
    commands
        .spawn((
            layer,
            Name::new(format!("{layer:?}")),
            Transform::from_xyz(0.0, 0.0, layer.depth()),
            Visibility::default(),
        ))
        .id()
}

fn petal_material(materials: &mut Assets<StandardMaterial>) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: Color::WHITE.with_alpha(0.0),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    })
}

/// Three petals 120° apart; the inner ring is offset by 60° and carries spots.
fn spawn_petal_layer(
    commands: &mut Commands,
    materials: &mut Assets<StandardMaterial>,
    mesh: &Handle<Mesh>,
    layer: LilyLayer,
    spots: Option<(Handle<Mesh>, Handle<StandardMaterial>)>,
) -> Entity {
    let group = spawn_layer(commands, layer);
    let outer = layer == LilyLayer::OuterPetals;
    let (offset, order_offset) = if outer { (0.0, 0.0) } else { (TAU / 6.0, 0.5) };

    for i in 0..3 {
        let angle = -(i as f32 * TAU / 3.0 + offset);
        let material = petal_material(materials);
        let petal = commands
            .spawn((
                LilyPart::Petal {
                    angle,
                    order: i as f32 + order_offset,
                    outer,
                },
                PetalMaterial(material.clone()),
                Name::new(format!("Petal({i})")),
                Mesh3d(mesh.clone()),
                MeshMaterial3d(material),
                Transform::from_rotation(Quat::from_rotation_z(angle)),
            ))
            .id();
        if let Some((spot_mesh, spot_mat)) = &spots {
            for center in shapes::spot_centers() {
                let spot = commands
                    .spawn((
                        Mesh3d(spot_mesh.clone()),
                        MeshMaterial3d(spot_mat.clone()),
                        Transform::from_translation(shapes::to_world(center).extend(0.01))
                            .with_scale(Vec3::new(1.0, 1.0, 0.2)),
                    ))
                    .id();
                commands.entity(petal).add_child(spot);
            }
        }
        commands.entity(group).add_child(petal);
    }
    group
}

/// Stem drawn as a chain of cylinders, plus two leaves.
fn spawn_stem_layer(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> Entity {
    let group = spawn_layer(commands, LilyLayer::Stem);
    let radius = shapes::STEM_WIDTH / 2.0 / shapes::UNITS_PER_WORLD;
    let tube = meshes.add(Cylinder::new(radius, 1.0));
    let green = materials.add(StandardMaterial {
        base_color: STEM_GREEN,
        perceptual_roughness: 0.7,
        ..default()
    });

    let points = shapes::stem_points(STEM_PIECES);
    for (index, pair) in points.windows(2).enumerate() {
        let seg = math::segment_between(pair[0].extend(0.0), pair[1].extend(0.0), Vec3::Y);
        let piece = commands
            .spawn((
                LilyPart::StemSegment {
                    index,
                    count: STEM_PIECES,
                },
                Mesh3d(tube.clone()),
                MeshMaterial3d(green.clone()),
                Transform::from_translation(seg.midpoint)
                    .with_rotation(seg.rotation)
                    .with_scale(Vec3::new(1.0, seg.length, 1.0)),
                Visibility::Hidden,
            ))
            .id();
        commands.entity(group).add_child(piece);
    }

    let leaf_mat = materials.add(StandardMaterial {
        base_color: STEM_GREEN.with_alpha(0.9),
        alpha_mode: AlphaMode::Blend,
        ..visuals::foliage_material(STEM_GREEN, 0.6)
    });
    for side in [1.0, -1.0] {
        let outline = shapes::leaf_outline(side, LEAF_SEGMENTS);
        let anchor = outline[0];
        let local: Vec<Vec2> = outline.iter().map(|p| *p - anchor).collect();
        let mesh = meshes.add(shapes::fan_mesh(&local, |_| LinearRgba::WHITE));
        let leaf = commands
            .spawn((
                LilyPart::Leaf { side },
                Name::new(if side > 0.0 { "LeafRight" } else { "LeafLeft" }),
                Mesh3d(mesh),
                MeshMaterial3d(leaf_mat.clone()),
                Transform::from_translation(anchor.extend(0.0)).with_scale(Vec3::ZERO),
            ))
            .id();
        commands.entity(group).add_child(leaf);
    }
    group
}

/// Pistil in the centre and six stamens radiating 60° apart.
fn spawn_stamen_layer(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> Entity {
    let group = spawn_layer(commands, LilyLayer::Stamens);
    let world = |units: f32| units / shapes::UNITS_PER_WORLD;

    let pistil = commands
        .spawn((
            Name::new("Pistil"),
            Mesh3d(meshes.add(Sphere::new(world(shapes::PISTIL_RADIUS)))),
            MeshMaterial3d(materials.add(visuals::glowing_material(PISTIL_GREEN, 0.5, 0.3))),
            Transform::default(),
        ))
        .id();
    commands.entity(group).add_child(pistil);

    let length = world(shapes::STAMEN_LENGTH);
    let filament = meshes.add(Cylinder::new(world(1.0), length));
    let filament_mat = materials.add(visuals::glowing_material(FILAMENT, 0.5, 0.2));
    let anther = meshes.add(Sphere::new(1.0));
    let anther_mat = materials.add(StandardMaterial {
        base_color: ANTHER_BROWN,
        perceptual_roughness: 0.6,
        ..default()
    });
    let radii = shapes::ANTHER_RADII / shapes::UNITS_PER_WORLD;

    for i in 0..STAMEN_COUNT {
        let angle = -(i as f32 * TAU / STAMEN_COUNT as f32);
        let stalk = commands
            .spawn((
                Mesh3d(filament.clone()),
                MeshMaterial3d(filament_mat.clone()),
                Transform::from_xyz(0.0, length / 2.0, 0.0),
            ))
            .id();
        let head = commands
            .spawn((
                Mesh3d(anther.clone()),
                MeshMaterial3d(anther_mat.clone()),
                Transform::from_xyz(0.0, world(65.0), 0.0)
                    .with_scale(Vec3::new(radii.x, radii.y, radii.x)),
            ))
            .id();
        let stamen = commands
            .spawn((
                LilyPart::Stamen,
                Name::new(format!("Stamen({i})")),
                Transform::from_rotation(Quat::from_rotation_z(angle)).with_scale(Vec3::ZERO),
                Visibility::default(),
            ))
            .id();
        commands.entity(stamen).add_children(&[stalk, head]);
        commands.entity(group).add_child(stamen);
    }
    group
}

// ── Update ──────────────────────────────────────────────────────────

/// Feeds the pointer (mouse or first touch) into the tilt springs.
///
/// Without a pointer the springs keep their last target.
pub fn follow_pointer(
    time: Res<Time>,
    cfg: Res<LilyConfig>,
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut parallax: ResMut<Parallax>,
    mut last_offset: Local<Vec2>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let pointer = touches
        .iter()
        .next()
        .map(|touch| touch.position())
        .or_else(|| window.cursor_position());
    if let Some(position) = pointer {
        *last_offset = position - window.size() / 2.0;
    }
    parallax.follow(&cfg, *last_offset, time.delta_secs());
}

/// Applies spring tilts to the outer-petal and stamen layers.
pub fn tilt_layers(parallax: Res<Parallax>, mut layers: Query<(&LilyLayer, &mut Transform)>) {
    for (layer, mut transform) in &mut layers {
        let tilt = match layer {
            LilyLayer::OuterPetals => parallax.outer(),
            LilyLayer::Stamens => parallax.base(),
            LilyLayer::Stem | LilyLayer::InnerPetals => continue,
        };
        transform.rotation = Quat::from_euler(EulerRot::XYZ, tilt.x, tilt.y, 0.0);
    }
}

/// Base tilt plus the looping sway and bob on the whole flower.
pub fn idle_motion(
    time: Res<Time>,
    cfg: Res<LilyConfig>,
    parallax: Res<Parallax>,
    mut roots: Query<(&LilyRoot, &mut Transform)>,
) {
    let tilt = parallax.base();
    for (root, mut transform) in &mut roots {
        let idle = cfg.idle(time.elapsed_secs() - root.entered_at);
        transform.translation.y = idle.y;
        transform.rotation = Quat::from_euler(EulerRot::XYZ, tilt.x, tilt.y, idle.roll);
    }
}

/// Opens petals, draws the stem, unfolds leaves and scales in stamens.
pub fn animate_bloom(
    time: Res<Time>,
    cfg: Res<LilyConfig>,
    roots: Query<&LilyRoot>,
    mut parts: Query<(&LilyPart, &mut Transform, &mut Visibility, Option<&PetalMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Ok(root) = roots.single() else {
        return;
    };
    let t = time.elapsed_secs() - root.entered_at;

    for (part, mut transform, mut visibility, material) in &mut parts {
        match *part {
            LilyPart::Petal { angle, order, outer } => {
                let pose = cfg.petal_pose(t, order);
                let breath = if outer { cfg.breath(t, order as usize) } else { 1.0 };
                transform.rotation = Quat::from_rotation_z(angle) * Quat::from_rotation_x(-pose.tilt);
                transform.scale = Vec3::splat(pose.scale * breath);
                if let Some(PetalMaterial(handle)) = material {
                    fade_to(&mut materials, handle, pose.opacity);
                }
            }
            LilyPart::Stamen => transform.scale = Vec3::splat(cfg.stamen_scale(t)),
            LilyPart::StemSegment { index, count } => {
                let shown = (index as f32) < cfg.stem_drawn(t) * count as f32;
                *visibility = if shown { Visibility::Inherited } else { Visibility::Hidden };
            }
            LilyPart::Leaf { side } => {
                let unfold = cfg.leaf_unfold(t);
                transform.scale = Vec3::splat(unfold);
                transform.rotation = Quat::from_rotation_y(side * FRAC_PI_2 * (1.0 - unfold));
            }
        }
    }
}

fn fade_to(materials: &mut Assets<StandardMaterial>, handle: &Handle<StandardMaterial>, alpha: f32) {
    let Some(current) = materials.get(handle).map(|m| m.base_color.alpha()) else {
        return;
    };
    if (current - alpha).abs() < 1e-4 {
        return;
    }
    if let Some(material) = materials.get_mut(handle) {
        material.base_color.set_alpha(alpha);
    }
}
