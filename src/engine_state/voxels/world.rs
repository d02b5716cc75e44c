//! # World Module
//!
//! This module provides the `VoxelGrid`, the sparse block storage the render loop
//! traverses every frame.
//!
//! ## Architecture
//!
//! The grid is a hash map keyed directly by the voxel's integer coordinate. A
//! coordinate that is present is rendered; a coordinate that is absent is empty
//! space. Nothing is stored for air.
//!
//! ## Lifecycle
//!
//! A grid is filled once by the [`WorldGenerator`](super::generation::WorldGenerator)
//! and is read-only afterwards: the only mutating method is crate private and is
//! used during generation. Traversal order is unspecified.

use std::collections::HashMap;

use cgmath::Point3;

use super::block::block_type::Material;

/// Integer coordinate of a single voxel.
pub type VoxelCoord = Point3<i32>;

/// Sparse voxel storage keyed by coordinate.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_sandbox::engine_state::voxels::generation::WorldGenerator;
///
/// let world = WorldGenerator::new(4, 4, 2).generate_with(|_, _, _| 2).unwrap();
/// assert_eq!(world.len(), 32);
/// assert!(world.contains(Point3::new(0, 1, 0)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoxelGrid {
    voxels: HashMap<VoxelCoord, Material>,
}

impl VoxelGrid {
    /// Creates an empty grid.
    pub fn new() -> Self {
        VoxelGrid {
            voxels: HashMap::new(),
        }
    }

    /// Writes `material` at `position`, replacing whatever was there.
    ///
    /// # Returns
    ///
    /// The material previously stored at `position`, if any.
    pub(crate) fn set(&mut self, position: VoxelCoord, material: Material) -> Option<Material> {
        self.voxels.insert(position, material)
    }

    /// Returns the material at `position`, or `None` for empty space.
    pub fn get(&self, position: VoxelCoord) -> Option<Material> {
        self.voxels.get(&position).copied()
    }

    pub fn contains(&self, position: VoxelCoord) -> bool {
        self.voxels.contains_key(&position)
    }

    /// Number of occupied voxels. The render loop issues exactly this many draws.
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Iterates every occupied voxel in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (VoxelCoord, Material)> + '_ {
        self.voxels.iter().map(|(position, material)| (*position, *material))
    }

    /// Iterates the occupied y levels of the column at `(x, z)`, unordered.
    pub fn column(&self, x: i32, z: i32) -> impl Iterator<Item = i32> + '_ {
        self.voxels
            .keys()
            .filter(move |position| position.x == x && position.z == z)
            .map(|position| position.y)
    }
}
