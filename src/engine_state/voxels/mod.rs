//! # Voxels
//!
//! Voxel data for the sandbox.
//!
//! * **Block**: material tags, draw colors and biome bands
//! * **World**: the sparse [`world::VoxelGrid`] keyed by integer coordinate
//! * **Generation**: the height-function terrain pass and the structure pass
//!
//! ## Data Flow
//!
//! 1. `WorldGenerator` writes the grid once at startup
//! 2. The render loop reads every entry each frame and issues one cube draw per voxel
//!
//! Nothing mutates the grid after generation, so the loop needs no synchronization.

pub mod block;
pub mod generation;
pub mod world;
