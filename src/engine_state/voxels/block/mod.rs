//! # Block Module
//!
//! Material tags for voxels and the spatial bands that pick a material for a
//! terrain column.

use block_type::Material;

pub mod block_type;

/// Draw color for each material, indexed by `Material as usize`.
pub static MATERIAL_COLORS: [[f32; 4]; 4] = [
    [0.86, 0.78, 0.52, 1.0], // SAND
    [0.30, 0.62, 0.24, 1.0], // GRASS
    [0.55, 0.85, 0.45, 1.0], // EDEN
    [0.52, 0.34, 0.17, 1.0], // WOOD
];

/// An ordered list of x-bands, each selecting a material for every column whose
/// x coordinate lies below the band's upper bound.
///
/// Bands are checked in declaration order and the first match wins, so an
/// unsorted list still resolves deterministically. Columns past every band get
/// the fallback material.
#[derive(Debug, Clone, PartialEq)]
pub struct BiomeBands {
    bands: Vec<(i32, Material)>,
    fallback: Material,
}

impl BiomeBands {
    /// Creates a band list from `(x_upper_exclusive, material)` pairs.
    pub fn new(bands: Vec<(i32, Material)>, fallback: Material) -> Self {
        Self { bands, fallback }
    }

    /// A single material everywhere.
    pub fn uniform(material: Material) -> Self {
        Self::new(Vec::new(), material)
    }

    /// Selects the material for the column at `(x, z)`.
    pub fn material_at(&self, x: i32, _z: i32) -> Material {
        self.bands
            .iter()
            .find(|(upper, _)| x < *upper)
            .map(|(_, material)| *material)
            .unwrap_or(self.fallback)
    }
}

impl Default for BiomeBands {
    /// Desert below x=10, plains below x=20, garden beyond.
    fn default() -> Self {
        Self::new(vec![(10, Material::Sand), (20, Material::Grass)], Material::Eden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bands_split_on_x() {
        let bands = BiomeBands::default();
        assert_eq!(bands.material_at(0, 0), Material::Sand);
        assert_eq!(bands.material_at(9, 31), Material::Sand);
        assert_eq!(bands.material_at(10, 0), Material::Grass);
        assert_eq!(bands.material_at(19, 5), Material::Grass);
        assert_eq!(bands.material_at(20, 0), Material::Eden);
        assert_eq!(bands.material_at(-3, 0), Material::Sand);
    }

    #[test]
    fn first_declared_band_wins_on_overlap() {
        let bands = BiomeBands::new(vec![(20, Material::Wood), (10, Material::Sand)], Material::Eden);
        assert_eq!(bands.material_at(5, 0), Material::Wood);
    }

    #[test]
    fn uniform_bands_use_fallback() {
        let bands = BiomeBands::uniform(Material::Grass);
        assert_eq!(bands.material_at(-100, 7), Material::Grass);
        assert_eq!(bands.material_at(100, 7), Material::Grass);
    }
}
