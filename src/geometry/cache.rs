use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use super::{PartGrid, PartKind, ShapeParams, build_part};

/// Hashable identity of a [`ShapeParams`] value (floats compared bitwise).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShapeKey {
    part: PartKind,
    width_bits: u32,
    length_bits: u32,
    layer: u8,
}

impl From<&ShapeParams> for ShapeKey {
    fn from(p: &ShapeParams) -> Self {
        Self {
            part: p.part,
            width_bits: p.width.to_bits(),
            length_bits: p.length.to_bits(),
            layer: p.layer,
        }
    }
}

/// Grids memoized on their construction parameters.
///
/// Entries are never evicted: parameters do not change after construction.
#[derive(Default)]
pub struct GridCache {
    grids: HashMap<ShapeKey, PartGrid>,
    hits: u32,
    misses: u32,
}

impl GridCache {
    /// Returns the grid for `params`, building it on first request.
    pub fn get_or_build(&mut self, params: &ShapeParams) -> &PartGrid {
        let key = ShapeKey::from(params);
        if self.grids.contains_key(&key) {
            self.hits += 1;
        } else {
            self.misses += 1;
            debug!("building {:?} grid for layer {}", params.part, params.layer);
        }
        self.grids.entry(key).or_insert_with(|| build_part(params))
    }

    /// Number of distinct grids held.
    pub fn len(&self) -> usize {
        self.grids.len()
    }

    /// `true` when nothing has been built yet.
    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    /// Requests answered from the cache.
    pub fn hits(&self) -> u32 {
        self.hits
    }

    /// Requests that built a new grid.
    pub fn misses(&self) -> u32 {
        self.misses
    }
}

/// Shared part meshes, one asset per distinct [`ShapeParams`].
#[derive(Resource, Default)]
pub struct PartMeshes {
    grids: GridCache,
    meshes: HashMap<ShapeKey, Handle<Mesh>>,
}

impl PartMeshes {
    /// Mesh handle for `params`, uploading the grid on first use.
    pub fn mesh(&mut self, params: &ShapeParams, meshes: &mut Assets<Mesh>) -> Handle<Mesh> {
        let key = ShapeKey::from(params);
        let grid = self.grids.get_or_build(params);
        self.meshes
            .entry(key)
            .or_insert_with(|| meshes.add(grid.to_mesh()))
            .clone()
    }

    /// The underlying grid cache.
    pub fn grids(&self) -> &GridCache {
        &self.grids
    }
}
