//! # Material Module
//!
//! This module defines the materials a voxel can be tagged with.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::MATERIAL_COLORS;

/// Enumerates every material a generated voxel can carry.
///
/// Absence of a voxel is represented by the absence of a grid entry, so there is
/// no air variant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    /// Desert band along the low-x edge of the world.
    Sand,

    /// Plains band in the middle of the world.
    Grass,

    /// The garden band covering the remainder of the world.
    Eden,

    /// Structure material; the ark is built from it.
    Wood,
}

impl Material {
    /// All materials, in declaration order.
    pub const ALL: [Material; 4] = [
        Material::Sand,
        Material::Grass,
        Material::Eden,
        Material::Wood,
    ];

    /// Solid RGBA color used for every cube of this material.
    pub fn color(self) -> [f32; 4] {
        MATERIAL_COLORS[self as usize]
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Material::Sand => "sand",
            Material::Grass => "grass",
            Material::Eden => "eden",
            Material::Wood => "wood",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_are_opaque_and_distinct() {
        for (i, a) in Material::ALL.iter().enumerate() {
            assert_eq!(a.color()[3], 1.0);
            for b in &Material::ALL[i + 1..] {
                assert_ne!(a.color(), b.color(), "{a} and {b} share a color");
            }
        }
    }
}
