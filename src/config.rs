//! # Configuration
//!
//! JSON configuration for the sandbox. Every section and field has a default, so
//! an empty object (or no file at all) yields the stock world: a 32x32 banded
//! terrain with the wooden ark structure, the player spawned above its centre.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SandboxConfig {
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub survival: SurvivalConfig,
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub window: WindowConfig,
}

/// Column height function used by the world generator.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HeightProfile {
    /// `floor(random() * max_height) + 1`
    #[default]
    Uniform,
    /// Every column has the same height.
    Fixed { height: u32 },
    /// Smooth hills sampled from 2D Perlin noise.
    Perlin { scale: f64 },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorldConfig {
    #[serde(default = "default_world_extent")]
    pub width: i32,
    #[serde(default = "default_world_extent")]
    pub depth: i32,
    #[serde(default = "default_max_height")]
    pub max_height: u32,
    /// Unseeded worlds differ on every run.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub height: HeightProfile,
    #[serde(default = "default_true")]
    pub structures: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerConfig {
    #[serde(default = "default_spawn")]
    pub spawn: [f32; 3],
    #[serde(default = "default_vital")]
    pub health: f32,
    #[serde(default = "default_vital")]
    pub hunger: f32,
}

/// Per-tick movement constants. All values are in world units per tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PhysicsConfig {
    #[serde(default = "default_move_step")]
    pub move_step: f32,
    #[serde(default = "default_gravity")]
    pub gravity: f32,
    #[serde(default = "default_floor")]
    pub floor: f32,
    #[serde(default = "default_jump_velocity")]
    pub jump_velocity: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SurvivalConfig {
    #[serde(default = "default_hunger_decay")]
    pub hunger_decay: f32,
    #[serde(default = "default_health_decay")]
    pub health_decay: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ClockConfig {
    #[serde(default = "default_clock_increment")]
    pub increment: f64,
    #[serde(default = "default_night_threshold")]
    pub night_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_fov")]
    pub fov_degrees: f32,
    #[serde(default = "default_znear")]
    pub znear: f32,
    #[serde(default = "default_zfar")]
    pub zfar: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: default_world_extent(),
            depth: default_world_extent(),
            max_height: default_max_height(),
            seed: None,
            height: HeightProfile::default(),
            structures: true,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn: default_spawn(),
            health: default_vital(),
            hunger: default_vital(),
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            move_step: default_move_step(),
            gravity: default_gravity(),
            floor: default_floor(),
            jump_velocity: default_jump_velocity(),
        }
    }
}

impl Default for SurvivalConfig {
    fn default() -> Self {
        Self {
            hunger_decay: default_hunger_decay(),
            health_decay: default_health_decay(),
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            increment: default_clock_increment(),
            night_threshold: default_night_threshold(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            fov_degrees: default_fov(),
            znear: default_znear(),
            zfar: default_zfar(),
        }
    }
}

// Default values
fn default_true() -> bool {
    true
}

fn default_world_extent() -> i32 {
    32
}

fn default_max_height() -> u32 {
    4
}

fn default_spawn() -> [f32; 3] {
    [16.0, 5.0, 16.0]
}

fn default_vital() -> f32 {
    100.0
}

fn default_move_step() -> f32 {
    0.1
}

fn default_gravity() -> f32 {
    0.01
}

fn default_floor() -> f32 {
    2.0
}

fn default_jump_velocity() -> f32 {
    0.2
}

fn default_hunger_decay() -> f32 {
    0.01
}

fn default_health_decay() -> f32 {
    0.05
}

fn default_clock_increment() -> f64 {
    0.01
}

fn default_night_threshold() -> f64 {
    0.3
}

fn default_title() -> String {
    "Voxel Sandbox".to_string()
}

fn default_fov() -> f32 {
    45.0
}

fn default_znear() -> f32 {
    0.1
}

fn default_zfar() -> f32 {
    1000.0
}

impl SandboxConfig {
    /// Load configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Loads `path` when given, otherwise returns the defaults.
    ///
    /// A path that is given but cannot be read or parsed is an error rather than
    /// a silent fallback.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                let config = Self::load(path)?;
                log::info!("Loaded configuration from {}", path.display());
                Ok(config)
            }
            None => {
                log::info!("No configuration file given, using defaults");
                Ok(Self::default())
            }
        }
    }
}
