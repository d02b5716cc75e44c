//! Per-tick values handed to the display glue.

use std::fmt;

use super::{frame_clock::TimeOfDay, player_state::PlayerState};

/// Health and hunger truncated to whole numbers plus the day/night label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudReadout {
    pub health: i32,
    pub hunger: i32,
    pub time_of_day: TimeOfDay,
    pub defeated: bool,
}

impl HudReadout {
    pub fn new(player: &PlayerState, time_of_day: TimeOfDay) -> Self {
        Self {
            health: player.health.floor() as i32,
            hunger: player.hunger.floor() as i32,
            time_of_day,
            defeated: !player.is_alive(),
        }
    }
}

impl fmt::Display for HudReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Health: {} | Hunger: {} | {}",
            self.health, self.hunger, self.time_of_day
        )?;
        if self.defeated {
            f.write_str(" | Defeated")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Point3;

    use super::*;
    use crate::engine_state::player_state::Vitality;

    #[test]
    fn values_are_floored() {
        let player = PlayerState::new(Point3::new(0.0, 2.0, 0.0), 99.99, 42.5);
        let hud = HudReadout::new(&player, TimeOfDay::Night);
        assert_eq!(hud.health, 99);
        assert_eq!(hud.hunger, 42);
        assert_eq!(hud.to_string(), "Health: 99 | Hunger: 42 | Night");
    }

    #[test]
    fn defeated_is_shown() {
        let mut player = PlayerState::new(Point3::new(0.0, 2.0, 0.0), 0.0, 0.0);
        player.vitality = Vitality::Defeated;
        let hud = HudReadout::new(&player, TimeOfDay::Day);
        assert_eq!(hud.to_string(), "Health: 0 | Hunger: 0 | Day | Defeated");
    }
}
