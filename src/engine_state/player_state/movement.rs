//! Per-tick movement and vertical physics.
//!
//! The update runs in a fixed order:
//!
//! 1. Horizontal steps for each held direction key. Axes are independent and
//!    never normalized, so holding two perpendicular keys moves `sqrt(2)` times
//!    faster than one. Opposite keys cancel.
//! 2. Gravity: velocity drops by `gravity`, then `y` advances by velocity.
//! 3. Floor clamp: below `floor` the player is put back on the floor plane and
//!    velocity is zeroed. The floor is flat; terrain voxels are not collided with.
//! 4. Jump: while the jump key is held velocity is *set* to `jump_velocity`
//!    every tick, so holding it levitates the player at
//!    `jump_velocity - gravity` units per tick instead of producing one arc.

use crate::{
    application_state::input_state::{HeldKeys, SandboxKey},
    config::PhysicsConfig,
};

use super::PlayerState;

/// Advances `player` by one tick of movement.
pub fn apply_movement(player: &mut PlayerState, keys: &HeldKeys, physics: &PhysicsConfig) {
    let steering = player.is_alive();

    if steering {
        let step = physics.move_step;
        if keys.is_held(SandboxKey::Forward) {
            player.position.z -= step;
        }
        if keys.is_held(SandboxKey::Back) {
            player.position.z += step;
        }
        if keys.is_held(SandboxKey::Left) {
            player.position.x -= step;
        }
        if keys.is_held(SandboxKey::Right) {
            player.position.x += step;
        }
    }

    player.velocity -= physics.gravity;
    player.position.y += player.velocity;

    if player.position.y < physics.floor {
        player.position.y = physics.floor;
        player.velocity = 0.0;
    }

    if steering && keys.is_held(SandboxKey::Jump) {
        player.velocity = physics.jump_velocity;
    }
}
