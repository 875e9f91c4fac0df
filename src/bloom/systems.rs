use std::f32::consts::TAU;

use bevy::picking::events::{Out, Over, Pointer};
use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::BloomConfig;
use super::entities::{BloomHover, RosePart, RoseRoot, SwayingPetal};
use super::layout::{self, PetalColor, ROSE_LAYERS};
use crate::ViewRoot;
use crate::geometry::{PartMeshes, ShapeParams};
use crate::math;
use crate::orbit::OrbitCamera;
use crate::visuals;

const SEPAL_GREEN: Color = Color::srgb(0.227, 0.373, 0.165);
const STEM_GREEN: Color = Color::srgb(0.239, 0.353, 0.169);
const THORN_BROWN: Color = Color::srgb(0.420, 0.267, 0.137);
const LEAF_GREEN: Color = Color::srgb(0.176, 0.290, 0.110);

/// Material handles shared by the parts of one rose.
struct RoseMaterials {
    petals: HashMap<PetalColor, Handle<StandardMaterial>>,
    sepal: Handle<StandardMaterial>,
    stem: Handle<StandardMaterial>,
    thorn: Handle<StandardMaterial>,
    leaf: Handle<StandardMaterial>,
}

impl RoseMaterials {
    fn new(materials: &mut Assets<StandardMaterial>) -> Self {
        let petals = PetalColor::ALL
            .into_iter()
            .map(|token| (token, materials.add(visuals::glowing_material(token.color(), 0.7, 0.02))))
            .collect();
        Self {
            petals,
            sepal: materials.add(visuals::foliage_material(SEPAL_GREEN, 0.6)),
            stem: materials.add(StandardMaterial {
                base_color: STEM_GREEN,
                perceptual_roughness: 0.65,
                ..default()
            }),
            thorn: materials.add(StandardMaterial {
                base_color: THORN_BROWN,
                perceptual_roughness: 0.5,
                ..default()
            }),
            leaf: materials.add(visuals::foliage_material(LEAF_GREEN, 0.6)),
        }
    }
}

// ── Startup ─────────────────────────────────────────────────────────

/// Spawns camera, lights and the full rose hierarchy.
pub fn spawn_rose(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut parts: ResMut<PartMeshes>,
    mut hover: ResMut<BloomHover>,
    cfg: Res<BloomConfig>,
) {
    hover.0 = false;
    commands.insert_resource(ClearColor(cfg.clear_color));
    spawn_camera_and_lights(&mut commands, &cfg);
    commands.spawn(visuals::caption(&cfg.caption));

    let mats = RoseMaterials::new(&mut materials);
    let mut rng = StdRng::seed_from_u64(cfg.seed);

    let root = commands
        .spawn((
            RoseRoot,
            ViewRoot,
            Name::new("Rose"),
            Transform::default(),
            Visibility::default(),
        ))
        .observe(hover_start)
        .observe(hover_end)
        .id();

    let bloom = spawn_group(&mut commands, "Bloom", Vec3::new(0.0, 0.3, 0.0));
    let placements = layout::plan_bloom(&ROSE_LAYERS);
    for (i, placement) in placements.iter().enumerate() {
        let mesh = parts.mesh(&ShapeParams::petal(placement.layer), &mut meshes);
        let petal = commands
            .spawn((
                SwayingPetal {
                    euler: placement.euler(),
                    phase: rng.random_range(0.0..TAU),
                    layer: placement.layer,
                },
                Name::new(format!("Petal({}:{i})", placement.layer)),
                Mesh3d(mesh),
                MeshMaterial3d(mats.petals[&placement.color].clone()),
                placement.transform(),
            ))
            .id();
        commands.entity(bloom).add_child(petal);
    }

    let sepals = spawn_group(&mut commands, "Sepals", Vec3::new(0.0, 0.05, 0.0));
    let sepal_mesh = parts.mesh(&ShapeParams::sepal(), &mut meshes);
    for i in 0..layout::SEPAL_COUNT {
        let sepal = commands
            .spawn((
                RosePart::Sepal,
                Name::new(format!("Sepal({i})")),
                Mesh3d(sepal_mesh.clone()),
                MeshMaterial3d(mats.sepal.clone()),
                layout::sepal(i).transform(),
            ))
            .id();
        commands.entity(sepals).add_child(sepal);
    }

    let stem = spawn_stem(&mut commands, &mut meshes, &mats);

    let leaflet_mesh = parts.mesh(&ShapeParams::leaflet(), &mut meshes);
    let leaves: Vec<Entity> = layout::LEAVES
        .iter()
        .enumerate()
        .map(|(i, leaf)| spawn_compound_leaf(&mut commands, &leaflet_mesh, &mats, i, leaf))
        .collect();

    commands.entity(root).add_children(&[bloom, sepals, stem]);
    commands.entity(root).add_children(&leaves);

    debug!(
        "rose spawned: {} petals, {} cached grids",
        placements.len(),
        parts.grids().len()
    );
}

fn spawn_camera_and_lights(commands: &mut Commands, cfg: &BloomConfig) {
    let rig = OrbitCamera::from_position(cfg.camera_position, Vec3::ZERO);
    commands.spawn((
        visuals::view_camera(rig.transform(), cfg.fov_degrees, cfg.bloom_intensity),
        rig,
        AmbientLight {
            color: Color::srgb_u8(0xff, 0xf5, 0xf5),
            brightness: cfg.lighting.ambient_brightness,
            ..default()
        },
    ));

    commands.spawn((
        Name::new("KeyLight"),
        ViewRoot,
        DirectionalLight {
            illuminance: cfg.lighting.key_illuminance,
            color: Color::srgb_u8(0xff, 0xf8, 0xf5),
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 3.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        Name::new("FillLight"),
        ViewRoot,
        DirectionalLight {
            illuminance: cfg.lighting.fill_illuminance,
            color: Color::srgb_u8(0xff, 0xd5, 0xd5),
            ..default()
        },
        Transform::from_xyz(-3.0, 4.0, -2.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        Name::new("RimLight"),
        ViewRoot,
        PointLight {
            intensity: cfg.lighting.rim_intensity,
            color: Color::srgb_u8(0xff, 0xb0, 0xb0),
            ..default()
        },
        Transform::from_xyz(0.0, 2.0, 3.0),
    ));
}

fn spawn_group(commands: &mut Commands, name: &'static str, offset: Vec3) -> Entity {
    commands
        .spawn((
            Name::new(name),
            Transform::from_translation(offset),
            Visibility::default(),
        ))
        .id()
}

/// Stem tube as a chain of cylinders along the sampled curve, plus thorns.
fn spawn_stem(commands: &mut Commands, meshes: &mut Assets<Mesh>, mats: &RoseMaterials) -> Entity {
    let group = spawn_group(commands, "Stem", Vec3::new(0.0, -0.15, 0.0));
    let unit_tube = meshes.add(Cylinder::new(layout::STEM_RADIUS, 1.0));

    let path = layout::stem_path();
    for (i, pair) in path.windows(2).enumerate() {
        let seg = math::segment_between(pair[0], pair[1], Vec3::Y);
        let piece = commands
            .spawn((
                RosePart::StemSegment,
                Name::new(format!("StemSegment({i})")),
                Mesh3d(unit_tube.clone()),
                MeshMaterial3d(mats.stem.clone()),
                Transform::from_translation(seg.midpoint)
                    .with_rotation(seg.rotation)
                    .with_scale(Vec3::new(1.0, seg.length, 1.0)),
            ))
            .id();
        commands.entity(group).add_child(piece);
    }

    let thorn_mesh = meshes.add(Cone {
        radius: 0.025,
        height: 0.12,
    });
    for (i, thorn) in layout::THORNS.iter().enumerate() {
        let entity = commands
            .spawn((
                RosePart::Thorn,
                Name::new(format!("Thorn({i})")),
                Mesh3d(thorn_mesh.clone()),
                MeshMaterial3d(mats.thorn.clone()),
                thorn.transform(),
            ))
            .id();
        commands.entity(group).add_child(entity);
    }
    group
}

fn spawn_compound_leaf(
    commands: &mut Commands,
    leaflet_mesh: &Handle<Mesh>,
    mats: &RoseMaterials,
    index: usize,
    leaf: &layout::Attachment,
) -> Entity {
    let group = commands
        .spawn((
            RosePart::CompoundLeaf,
            Name::new(format!("Leaf({index})")),
            leaf.transform(),
            Visibility::default(),
        ))
        .id();
    for leaflet in &layout::LEAFLETS {
        let child = commands
            .spawn((
                RosePart::Leaflet,
                Mesh3d(leaflet_mesh.clone()),
                MeshMaterial3d(mats.leaf.clone()),
                leaflet.transform(),
            ))
            .id();
        commands.entity(group).add_child(child);
    }
    group
}

// ── Update ──────────────────────────────────────────────────────────

/// Layers the time-based sway onto each petal's stored orientation.
pub fn sway_petals(
    time: Res<Time>,
    cfg: Res<BloomConfig>,
    mut petals: Query<(&SwayingPetal, &mut Transform)>,
) {
    let t = time.elapsed_secs();
    for (petal, mut transform) in &mut petals {
        let roll = cfg.motion.petal_roll(petal.euler.z, t, petal.phase, petal.layer);
        transform.rotation = Quat::from_euler(EulerRot::XYZ, petal.euler.x, petal.euler.y, roll);
    }
}

/// Bob, rock, float wobble and hover scale of the whole rose.
pub fn bob_rose(
    time: Res<Time>,
    cfg: Res<BloomConfig>,
    hover: Res<BloomHover>,
    mut roots: Query<&mut Transform, With<RoseRoot>>,
) {
    let offset = cfg.motion.bob(time.elapsed_secs());
    let scale = if hover.0 { cfg.hover_scale } else { 1.0 };
    for mut transform in &mut roots {
        transform.translation.y = offset.y;
        transform.rotation = offset.rotation();
        transform.scale = Vec3::splat(scale);
    }
}

fn hover_start(_over: On<Pointer<Over>>, mut hover: ResMut<BloomHover>) {
    hover.0 = true;
}

fn hover_end(_out: On<Pointer<Out>>, mut hover: ResMut<BloomHover>) {
    hover.0 = false;
}
