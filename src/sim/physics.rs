//! Player physics
//!
//! Explicit Euler: velocity first, then position. Clamps keep the square
//! between the ceiling and the ground line regardless of terrain.

use super::state::{PhysicsParams, Player};

/// Launch the player if resting. Returns whether the jump fired.
///
/// Airborne requests are dropped (no double jump, no buffering).
pub fn try_jump(player: &mut Player, params: &PhysicsParams) -> bool {
    if !player.resting {
        return false;
    }
    player.resting = false;
    player.vel.y = params.jump_velocity;
    true
}

/// Integrate gravity and apply the ground and ceiling clamps
pub fn integrate(player: &mut Player, params: &PhysicsParams, dt: f32) {
    player.vel.y += params.gravity * dt;
    player.pos.y += player.vel.y * dt;

    let baseline = params.resting_y();
    if player.pos.y > baseline {
        player.pos.y = baseline;
        player.vel.y = 0.0;
        player.resting = true;
    }

    if let Some(ceiling) = params.ceiling_y {
        if player.pos.y < ceiling {
            player.pos.y = ceiling;
            if player.vel.y < 0.0 {
                player.vel.y = 0.0;
            }
        }
    }
}

/// Horizontal target position for a walk intent (`direction` in -1..=1)
pub fn walk_target(player: &Player, params: &PhysicsParams, direction: f32, dt: f32) -> f32 {
    let x = player.pos.x + direction * params.walk_speed * dt;
    x.clamp(0.0, (params.field_width - player.size).max(0.0))
}
