use bevy::prelude::*;

/// The whole rose: bobs, rocks and scales on hover.
#[derive(Component, Reflect)]
pub struct RoseRoot;

/// A petal with its spawn-time orientation; sway is layered on top each frame.
#[derive(Component, Reflect)]
pub struct SwayingPetal {
    /// Placement Euler angles `(pitch, yaw, roll)`.
    pub euler: Vec3,
    /// Random sway phase in `[0, 2π)`.
    pub phase: f32,
    /// Ring index, scales the sway.
    pub layer: u8,
}

/// Non-petal part of the rose, for the inspector.
#[derive(Component, Reflect, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RosePart {
    /// Green sepal under the bloom.
    Sepal,
    /// Straight piece of the stem tube.
    StemSegment,
    /// Cone thorn on the stem.
    Thorn,
    /// Group of three leaflets.
    CompoundLeaf,
    /// One leaflet mesh.
    Leaflet,
}

/// `true` while the pointer is over any part of the rose.
#[derive(Resource, Default)]
pub struct BloomHover(pub bool);
