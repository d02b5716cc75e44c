use std::collections::HashMap;

use cgmath::Point3;
use proptest::prelude::*;
use voxel_sandbox::config::HeightProfile;
use voxel_sandbox::engine_state::voxels::block::block_type::Material;
use voxel_sandbox::engine_state::voxels::generation::{Structure, WorldGenerator};
use voxel_sandbox::engine_state::voxels::world::VoxelGrid;
use voxel_sandbox::error::GenerationError;

fn extent() -> impl Strategy<Value = i32> {
    1i32..=24
}

fn max_height() -> impl Strategy<Value = u32> {
    1u32..=8
}

/// Column heights keyed by (x, z), checking each column is a solid run from y = 0.
fn column_heights(world: &VoxelGrid) -> HashMap<(i32, i32), i32> {
    let mut heights: HashMap<(i32, i32), Vec<i32>> = HashMap::new();
    for (p, _) in world.iter() {
        heights.entry((p.x, p.z)).or_default().push(p.y);
    }
    heights
        .into_iter()
        .map(|(column, mut ys)| {
            ys.sort_unstable();
            let expected: Vec<i32> = (0..ys.len() as i32).collect();
            assert_eq!(ys, expected, "column {:?} is not a solid run from y = 0", column);
            (column, ys.len() as i32)
        })
        .collect()
}

proptest! {
    // Every column is 1..=max_height voxels tall, filled exactly for y in [0, h)
    #[test]
    fn uniform_columns_stay_in_range(width in extent(), depth in extent(), max in max_height(), seed in any::<u64>()) {
        let world = WorldGenerator::new(width, depth, max)
            .with_seed(seed)
            .generate(HeightProfile::Uniform)
            .unwrap();

        let heights = column_heights(&world);
        prop_assert_eq!(heights.len(), (width * depth) as usize);
        for x in 0..width { for z in 0..depth {
            let h = heights[&(x, z)];
            prop_assert!(h >= 1 && h <= max as i32);
        }}
    }

    // Unseeded generation draws from fresh entropy and keeps the same bounds
    #[test]
    fn unseeded_columns_stay_in_range(width in extent(), depth in extent(), max in max_height()) {
        let world = WorldGenerator::new(width, depth, max)
            .generate(HeightProfile::Uniform)
            .unwrap();

        let heights = column_heights(&world);
        prop_assert_eq!(heights.len(), (width * depth) as usize);
        for h in heights.values() {
            prop_assert!(*h >= 1 && *h <= max as i32);
        }
    }

    // Perlin heights obey the same bounds
    #[test]
    fn perlin_columns_stay_in_range(width in extent(), depth in extent(), max in max_height(), seed in any::<u64>(), scale in 0.01f64..1.0) {
        let world = WorldGenerator::new(width, depth, max)
            .with_seed(seed)
            .generate(HeightProfile::Perlin { scale })
            .unwrap();

        let heights = column_heights(&world);
        prop_assert_eq!(heights.len(), (width * depth) as usize);
        prop_assert!(heights.values().all(|h| *h >= 1 && *h <= max as i32));
    }

    // Same seed, same world
    #[test]
    fn seeded_generation_is_reproducible(width in extent(), depth in extent(), max in max_height(), seed in any::<u64>()) {
        let generator = WorldGenerator::new(width, depth, max)
            .with_seed(seed)
            .with_structure(Structure::ark());
        let a = generator.generate(HeightProfile::Uniform).unwrap();
        let b = generator.generate(HeightProfile::Uniform).unwrap();
        prop_assert_eq!(a, b);
    }

    // Fixed height h gives exactly width * depth * h voxels
    #[test]
    fn fixed_height_counts(width in extent(), depth in extent(), max in max_height()) {
        let height = max;
        let world = WorldGenerator::new(width, depth, max)
            .generate(HeightProfile::Fixed { height })
            .unwrap();
        prop_assert_eq!(world.len(), (width * depth) as usize * height as usize);
    }

    // Heights outside [1, max_height] are rejected
    #[test]
    fn out_of_range_heights_fail(max in max_height(), over in 1u32..=4) {
        let generator = WorldGenerator::new(4, 4, max);
        prop_assert_eq!(
            generator.generate_with(|_, _, _| 0),
            Err(GenerationError::ColumnHeightOutOfRange { x: 0, z: 0, height: 0, max_height: max })
        );
        let err = generator.generate_with(|_, _, _| max + over).unwrap_err();
        let is_out_of_range = matches!(err, GenerationError::ColumnHeightOutOfRange { .. });
        prop_assert!(is_out_of_range);
    }

    // Structure voxels always win over terrain
    #[test]
    fn structures_overwrite_terrain(seed in any::<u64>()) {
        let world = WorldGenerator::new(32, 32, 8)
            .with_seed(seed)
            .with_structure(Structure::ark())
            .generate(HeightProfile::Uniform)
            .unwrap();
        for x in 12..20 { for y in 5..8 { for z in 12..18 {
            prop_assert_eq!(world.get(Point3::new(x, y, z)), Some(Material::Wood));
        }}}
    }
}

#[test]
fn invalid_extent_fails_fast() {
    assert_eq!(
        WorldGenerator::new(0, 8, 4).generate(HeightProfile::Uniform),
        Err(GenerationError::InvalidExtent { width: 0, depth: 8 })
    );
    assert_eq!(
        WorldGenerator::new(8, -1, 4).generate(HeightProfile::Uniform),
        Err(GenerationError::InvalidExtent { width: 8, depth: -1 })
    );
    assert_eq!(
        WorldGenerator::new(8, 8, 0).generate(HeightProfile::Uniform),
        Err(GenerationError::InvalidMaxHeight)
    );
}
