//! Headless arcade collaborator
//!
//! A tiny stand-in for the host engine's arcade physics so sessions can run
//! without a renderer: constant gravity, one-way platforms (solid from above
//! only) and player/pickup overlap reports. Pickups do not fall.

use super::state::{Contact, SessionState};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arcade {
    /// Downward acceleration (units/s²)
    pub gravity: f32,
}

impl Arcade {
    pub fn new(gravity: f32) -> Self {
        Self { gravity }
    }

    /// Integrate the player for one step, resolve landings and queue overlaps.
    ///
    /// Returns true if the player landed this step.
    pub fn step(&self, state: &mut SessionState, dt: f32) -> bool {
        let player = &mut state.player;
        if !player.active {
            return false;
        }
        let Some(body) = player.body.as_mut() else {
            return false;
        };

        let prev_y = player.pos.y;
        player.vel.y += self.gravity * dt;
        player.pos += player.vel * dt;
        body.touching_down = false;

        if player.vel.y >= 0.0 {
            let half = player.size * 0.5;
            for platform in state.platforms.iter() {
                if platform.body.is_none() {
                    continue;
                }
                let reach_x = half.x + platform.size.x * 0.5;
                let over = (player.pos.x - platform.pos.x).abs() < reach_x;
                // Solid only for a player that was above the platform's centre line
                let from_above = prev_y <= platform.pos.y;
                let feet = player.pos.y + half.y;
                if over && from_above && feet >= platform.top() {
                    player.pos.y = platform.top() - half.y;
                    player.vel.y = 0.0;
                    body.touching_down = true;
                    break;
                }
            }
        }

        body.update_from(player.pos, player.size);
        let landed = body.touching_down;
        let bounds = body.bounds;

        let overlaps: Vec<usize> = state
            .pickups
            .iter()
            .enumerate()
            .filter(|(_, pickup)| pickup.active)
            .filter(|(_, pickup)| pickup.body.is_some_and(|b| b.bounds.intersects(&bounds)))
            .map(|(index, _)| index)
            .collect();
        for pickup in overlaps {
            state.push_contact(Contact::PickupOverlap { pickup });
        }

        landed
    }
}

impl Default for Arcade {
    fn default() -> Self {
        Self::new(crate::consts::GRAVITY)
    }
}
