//! Hunger and health decay.

use crate::config::SurvivalConfig;

use super::{PlayerState, Vitality};

/// Applies one tick of decay.
///
/// Hunger drains by `hunger_decay` and stops at zero. While hunger is at zero,
/// health drains by `health_decay` every tick; at zero health the player is
/// defeated and nothing decays any more.
pub fn apply_survival(player: &mut PlayerState, survival: &SurvivalConfig) {
    if !player.is_alive() {
        return;
    }

    player.hunger = (player.hunger - survival.hunger_decay).max(0.0);

    if player.hunger <= 0.0 {
        player.health = (player.health - survival.health_decay).max(0.0);
        if player.health <= 0.0 {
            player.vitality = Vitality::Defeated;
            log::info!("Player defeated: starved at {:?}", player.position);
        }
    }
}
