//! Player motion rule
//!
//! Decides velocity and pose from the collaborator's ground signal and the
//! steering input. Integration stays with the physics collaborator.

use super::state::{Player, PlayerPose};
use crate::tuning::Tuning;
use crate::wrap_x;

/// Apply jump, pose and airborne steering for one frame.
///
/// Skipped for a frozen player or one not yet registered with physics.
pub fn apply_motion(player: &mut Player, left: bool, right: bool, tuning: &Tuning) {
    let Some(body) = player.body else {
        return;
    };
    if !player.active {
        return;
    }
    let touching_down = body.touching_down;

    if touching_down {
        player.vel.y = tuning.jump_velocity;
        player.pose = PlayerPose::Jump;
    } else if player.vel.y > 0.0 {
        player.pose = PlayerPose::Stand;
    }

    // No steering while grounded, or it drifts between bounces
    player.vel.x = if touching_down {
        0.0
    } else {
        match (left, right) {
            (true, false) => -tuning.horizontal_speed,
            (false, true) => tuning.horizontal_speed,
            _ => 0.0,
        }
    };
}

/// Wrap the player around the horizontal edges; returns true if it moved
pub fn wrap_player(player: &mut Player, game_width: f32) -> bool {
    let wrapped = wrap_x(player.pos.x, player.size.x * 0.5, game_width);
    if wrapped == player.pos.x {
        return false;
    }
    log::trace!("Player wrapped: x {} -> {}", player.pos.x, wrapped);
    player.pos.x = wrapped;
    if let Some(body) = player.body.as_mut() {
        body.update_from(player.pos, player.size);
    }
    true
}
