//! # Player State
//!
//! The player's transform and vitals, advanced once per tick by
//! [`movement::apply_movement`] and [`survival::apply_survival`].
//!
//! ## Vitality
//!
//! Hunger drains every tick. Once it is exhausted health drains too. Both are
//! floored at zero and a player whose health reaches zero becomes
//! [`Vitality::Defeated`], a terminal state: decay stops and movement keys are
//! ignored, though gravity still applies.

use cgmath::Point3;

use crate::config::PlayerConfig;

pub mod movement;
pub mod survival;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vitality {
    Alive,
    Defeated,
}

/// Position, vertical velocity and vitals of the player (and the camera that follows it).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerState {
    pub position: Point3<f32>,
    /// Vertical velocity in world units per tick; positive is up.
    pub velocity: f32,
    pub health: f32,
    pub hunger: f32,
    pub vitality: Vitality,
}

impl PlayerState {
    /// A player spawned with no health starts out defeated.
    pub fn new(position: Point3<f32>, health: f32, hunger: f32) -> Self {
        let vitality = if health <= 0.0 {
            Vitality::Defeated
        } else {
            Vitality::Alive
        };
        Self {
            position,
            velocity: 0.0,
            health: health.max(0.0),
            hunger: hunger.max(0.0),
            vitality,
        }
    }

    pub fn from_config(config: &PlayerConfig) -> Self {
        let [x, y, z] = config.spawn;
        Self::new(Point3::new(x, y, z), config.health, config.hunger)
    }

    pub fn is_alive(&self) -> bool {
        self.vitality == Vitality::Alive
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::from_config(&PlayerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawning_with_health_is_alive() {
        let player = PlayerState::new(Point3::new(0.0, 2.0, 0.0), 0.5, 0.0);
        assert!(player.is_alive());
    }

    #[test]
    fn spawning_without_health_is_defeated() {
        let config = PlayerConfig {
            health: 0.0,
            ..PlayerConfig::default()
        };
        let player = PlayerState::from_config(&config);
        assert_eq!(player.vitality, Vitality::Defeated);

        let player = PlayerState::new(Point3::new(0.0, 2.0, 0.0), -5.0, -1.0);
        assert_eq!(player.vitality, Vitality::Defeated);
        assert_eq!(player.health, 0.0);
        assert_eq!(player.hunger, 0.0);
    }
}
