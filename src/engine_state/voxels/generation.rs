//! # World Generation
//!
//! Fills a [`VoxelGrid`] in two passes:
//!
//! 1. **Terrain**: for every column `(x, z)` in `[0, width) x [0, depth)` a height
//!    function picks `h` in `[1, max_height]` and one voxel is written for every
//!    `y` in `[0, h)`. The column's material comes from the [`BiomeBands`].
//! 2. **Structures**: each [`Structure`] overwrites every coordinate in its
//!    footprint, regardless of what terrain put there. Later structures win over
//!    earlier ones.
//!
//! Generation runs in `O(width * depth * max_height)` and happens once, before
//! the first frame.

use cgmath::Point3;
use noise::{NoiseFn, Perlin};

use crate::{config::HeightProfile, config::WorldConfig, error::GenerationError};

use super::{
    block::{block_type::Material, BiomeBands},
    world::{VoxelCoord, VoxelGrid},
};

/// An axis-aligned box of a single material stamped over the terrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Structure {
    /// Inclusive lower corner.
    pub min: VoxelCoord,
    /// Exclusive upper corner.
    pub max: VoxelCoord,
    pub material: Material,
}

impl Structure {
    pub fn new(min: VoxelCoord, max: VoxelCoord, material: Material) -> Self {
        Self { min, max, material }
    }

    /// The wooden ark: an 8x3x6 hull floating above the plains band.
    pub fn ark() -> Self {
        Self::new(Point3::new(12, 5, 12), Point3::new(20, 8, 18), Material::Wood)
    }

    /// Whether `position` lies inside the footprint.
    pub fn contains(&self, position: VoxelCoord) -> bool {
        (self.min.x..self.max.x).contains(&position.x)
            && (self.min.y..self.max.y).contains(&position.y)
            && (self.min.z..self.max.z).contains(&position.z)
    }

    /// Every coordinate in the footprint.
    pub fn positions(&self) -> impl Iterator<Item = VoxelCoord> {
        let Structure { min, max, .. } = *self;
        (min.x..max.x).flat_map(move |x| {
            (min.y..max.y).flat_map(move |y| (min.z..max.z).map(move |z| Point3::new(x, y, z)))
        })
    }
}

/// Builds the voxel world.
///
/// # Examples
///
/// ```
/// use voxel_sandbox::config::HeightProfile;
/// use voxel_sandbox::engine_state::voxels::generation::WorldGenerator;
///
/// let world = WorldGenerator::new(8, 8, 3)
///     .with_seed(42)
///     .generate(HeightProfile::Uniform)
///     .unwrap();
/// assert!(world.len() >= 64);
/// ```
#[derive(Debug, Clone)]
pub struct WorldGenerator {
    width: i32,
    depth: i32,
    max_height: u32,
    bands: BiomeBands,
    structures: Vec<Structure>,
    seed: Option<u64>,
}

impl WorldGenerator {
    /// Creates a generator for a `width` x `depth` area with columns up to
    /// `max_height` tall, using the default biome bands and no structures.
    pub fn new(width: i32, depth: i32, max_height: u32) -> Self {
        Self {
            width,
            depth,
            max_height,
            bands: BiomeBands::default(),
            structures: Vec::new(),
            seed: None,
        }
    }

    /// Creates a generator from the `world` configuration section.
    pub fn from_config(config: &WorldConfig) -> Self {
        let mut generator = Self::new(config.width, config.depth, config.max_height);
        generator.seed = config.seed;
        if config.structures {
            generator.structures.push(Structure::ark());
        }
        generator
    }

    pub fn with_bands(mut self, bands: BiomeBands) -> Self {
        self.bands = bands;
        self
    }

    pub fn with_structure(mut self, structure: Structure) -> Self {
        self.structures.push(structure);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn max_height(&self) -> u32 {
        self.max_height
    }

    /// A fresh random source: seeded when a seed is configured, entropy otherwise.
    pub fn rng(&self) -> fastrand::Rng {
        match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }

    /// Generates a world using one of the built-in height profiles.
    pub fn generate(&self, profile: HeightProfile) -> Result<VoxelGrid, GenerationError> {
        let mut rng = self.rng();
        let max_height = self.max_height;
        match profile {
            HeightProfile::Uniform => {
                self.generate_with_rng(|_, _, rng| uniform_height(rng, max_height), &mut rng)
            }
            HeightProfile::Fixed { height } => self.generate_with_rng(|_, _, _| height, &mut rng),
            HeightProfile::Perlin { scale } => {
                let perlin = Perlin::new(rng.u32(..));
                self.generate_with_rng(
                    |x, z, _| perlin_height(&perlin, x, z, scale, max_height),
                    &mut rng,
                )
            }
        }
    }

    /// Generates a world using a custom height function and the generator's own
    /// random source.
    pub fn generate_with<F>(&self, height_fn: F) -> Result<VoxelGrid, GenerationError>
    where
        F: FnMut(i32, i32, &mut fastrand::Rng) -> u32,
    {
        let mut rng = self.rng();
        self.generate_with_rng(height_fn, &mut rng)
    }

    /// Runs the terrain pass and then the structure pass.
    ///
    /// # Arguments
    /// * `height_fn` - Column height for `(x, z)`; must return a value in `[1, max_height]`
    /// * `rng` - Random source handed to `height_fn`
    ///
    /// # Errors
    /// Fails before writing anything if the extent or max height is invalid, and
    /// aborts on the first column whose height is out of range.
    pub fn generate_with_rng<F>(
        &self,
        mut height_fn: F,
        rng: &mut fastrand::Rng,
    ) -> Result<VoxelGrid, GenerationError>
    where
        F: FnMut(i32, i32, &mut fastrand::Rng) -> u32,
    {
        if self.width <= 0 || self.depth <= 0 {
            return Err(GenerationError::InvalidExtent {
                width: self.width,
                depth: self.depth,
            });
        }
        if self.max_height == 0 {
            return Err(GenerationError::InvalidMaxHeight);
        }

        let mut world = VoxelGrid::new();

        for x in 0..self.width {
            for z in 0..self.depth {
                let height = height_fn(x, z, rng);
                if height == 0 || height > self.max_height {
                    return Err(GenerationError::ColumnHeightOutOfRange {
                        x,
                        z,
                        height,
                        max_height: self.max_height,
                    });
                }

                let material = self.bands.material_at(x, z);
                for y in 0..height as i32 {
                    world.set(Point3::new(x, y, z), material);
                }
            }
        }

        let terrain_voxels = world.len();

        for structure in &self.structures {
            for position in structure.positions() {
                world.set(position, structure.material);
            }
        }

        log::info!(
            "Generated {}x{} world: {} terrain voxels, {} total after {} structure(s)",
            self.width,
            self.depth,
            terrain_voxels,
            world.len(),
            self.structures.len()
        );

        Ok(world)
    }
}

/// `floor(random() * max_height) + 1`, uniform over `1..=max_height`.
pub fn uniform_height(rng: &mut fastrand::Rng, max_height: u32) -> u32 {
    (rng.f64() * max_height as f64).floor() as u32 + 1
}

/// Maps a 2D Perlin sample at `(x, z) * scale` into `1..=max_height`.
pub fn perlin_height(perlin: &Perlin, x: i32, z: i32, scale: f64, max_height: u32) -> u32 {
    let sample = perlin.get([x as f64 * scale, z as f64 * scale]);
    let t = ((sample + 1.0) * 0.5).clamp(0.0, 1.0);
    1 + (t * (max_height - 1) as f64).round() as u32
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn fixed_height_scenario_has_eight_voxels_per_column() {
        let world = WorldGenerator::new(4, 4, 3)
            .generate(HeightProfile::Fixed { height: 2 })
            .unwrap();

        assert_eq!(world.len(), 32);
        for x in 0..4 {
            for z in 0..4 {
                let ys: HashSet<i32> = world.column(x, z).collect();
                assert_eq!(ys, HashSet::from([0, 1]));
            }
        }
        assert!(world.iter().all(|(p, _)| p.y == 0 || p.y == 1));
    }

    #[test]
    fn tall_limit_with_short_columns_builds_only_what_is_placed() {
        let world = WorldGenerator::new(4, 4, 4_000_000_000)
            .generate(HeightProfile::Fixed { height: 1 })
            .unwrap();
        assert_eq!(world.len(), 16);
        assert!(world.iter().all(|(p, _)| p.y == 0));
    }

    #[test]
    fn rejects_non_positive_extent() {
        let err = WorldGenerator::new(0, 4, 3)
            .generate(HeightProfile::Uniform)
            .unwrap_err();
        assert_eq!(err, GenerationError::InvalidExtent { width: 0, depth: 4 });

        let err = WorldGenerator::new(4, -1, 3)
            .generate(HeightProfile::Uniform)
            .unwrap_err();
        assert_eq!(err, GenerationError::InvalidExtent { width: 4, depth: -1 });
    }

    #[test]
    fn rejects_zero_max_height() {
        let err = WorldGenerator::new(4, 4, 0)
            .generate(HeightProfile::Uniform)
            .unwrap_err();
        assert_eq!(err, GenerationError::InvalidMaxHeight);
    }

    #[test]
    fn rejects_out_of_range_column() {
        let err = WorldGenerator::new(2, 2, 3).generate_with(|_, _, _| 0).unwrap_err();
        assert!(matches!(
            err,
            GenerationError::ColumnHeightOutOfRange { height: 0, .. }
        ));

        let err = WorldGenerator::new(2, 2, 3).generate_with(|_, _, _| 4).unwrap_err();
        assert!(matches!(
            err,
            GenerationError::ColumnHeightOutOfRange { height: 4, max_height: 3, .. }
        ));
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let generator = WorldGenerator::new(16, 16, 4).with_seed(1234);
        let a = generator.generate(HeightProfile::Uniform).unwrap();
        let b = generator.generate(HeightProfile::Uniform).unwrap();
        assert_eq!(a, b);

        let generator = WorldGenerator::new(16, 16, 6).with_seed(99);
        let a = generator.generate(HeightProfile::Perlin { scale: 0.15 }).unwrap();
        let b = generator.generate(HeightProfile::Perlin { scale: 0.15 }).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn columns_take_their_band_material() {
        let world = WorldGenerator::new(32, 2, 1)
            .generate(HeightProfile::Fixed { height: 1 })
            .unwrap();
        assert_eq!(world.get(Point3::new(3, 0, 0)), Some(Material::Sand));
        assert_eq!(world.get(Point3::new(15, 0, 1)), Some(Material::Grass));
        assert_eq!(world.get(Point3::new(25, 0, 0)), Some(Material::Eden));
    }

    #[test]
    fn structure_overwrites_terrain_in_its_footprint() {
        let ark = Structure::ark();
        let world = WorldGenerator::new(32, 32, 8)
            .with_seed(5)
            .with_structure(ark)
            .generate_with(|_, _, _| 8)
            .unwrap();

        let mut footprint = 0;
        for position in ark.positions() {
            footprint += 1;
            assert_eq!(world.get(position), Some(Material::Wood), "at {position:?}");
        }
        assert_eq!(footprint, 8 * 3 * 6);
        // Footprint lies entirely inside the terrain, so nothing was added.
        assert_eq!(world.len(), 32 * 32 * 8);
        assert_eq!(world.get(Point3::new(12, 4, 12)), Some(Material::Grass));
    }

    #[test]
    fn later_structures_win() {
        let first = Structure::new(Point3::new(0, 0, 0), Point3::new(2, 2, 2), Material::Wood);
        let second = Structure::new(Point3::new(1, 1, 1), Point3::new(3, 3, 3), Material::Sand);
        let world = WorldGenerator::new(1, 1, 1)
            .with_bands(BiomeBands::uniform(Material::Grass))
            .with_structure(first)
            .with_structure(second)
            .generate(HeightProfile::Fixed { height: 1 })
            .unwrap();
        assert_eq!(world.get(Point3::new(0, 0, 0)), Some(Material::Wood));
        assert_eq!(world.get(Point3::new(1, 1, 1)), Some(Material::Sand));
        assert_eq!(world.get(Point3::new(2, 2, 2)), Some(Material::Sand));
    }

    #[test]
    fn from_config_adds_ark_when_enabled() {
        let mut config = WorldConfig::default();
        config.seed = Some(3);
        let world = WorldGenerator::from_config(&config)
            .generate(config.height)
            .unwrap();
        assert!(Structure::ark()
            .positions()
            .all(|p| world.get(p) == Some(Material::Wood)));

        config.structures = false;
        let world = WorldGenerator::from_config(&config)
            .generate(config.height)
            .unwrap();
        assert!(world.get(Point3::new(12, 7, 12)).is_none());
    }

    #[test]
    fn perlin_height_stays_in_range() {
        let perlin = Perlin::new(7);
        for x in -20..20 {
            for z in -20..20 {
                let h = perlin_height(&perlin, x, z, 0.13, 5);
                assert!((1..=5).contains(&h));
            }
        }
        // A single level collapses everything to height 1.
        assert_eq!(perlin_height(&perlin, 3, 4, 0.13, 1), 1);
    }
}
