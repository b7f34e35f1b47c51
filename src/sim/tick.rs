//! Per-frame session tick
//!
//! Core game loop step: drains the contact queue, runs the motion rule,
//! recycles platforms and finally evaluates the session state machine.

use serde::{Deserialize, Serialize};

use super::motion::{apply_motion, wrap_player};
use super::pickup::{expire_stale_pickups, handle_collect};
use super::recycler::recycle_platforms;
use super::state::{Contact, Platform, SessionEvent, SessionPhase, SessionState};
use crate::consts::*;

/// The collaborator's camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// World y of the top of the viewport
    pub scroll_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            scroll_y: 0.0,
            width: GAME_WIDTH,
            height: GAME_HEIGHT,
        }
    }
}

impl Camera {
    /// Default-height camera over a viewport `width` wide
    pub fn with_width(width: f32) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    /// Centre the viewport vertically on `target_y`
    pub fn follow(&mut self, target_y: f32) {
        self.scroll_y = target_y - self.height * 0.5;
    }
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub camera: Camera,
}

/// Advance the session by one frame
pub fn tick(state: &mut SessionState, input: &TickInput, dt: f32) {
    if state.phase == SessionPhase::GameOver {
        // Late overlap reports no longer count
        state.take_contacts();
        return;
    }

    state.frame += 1;
    state.elapsed += dt;

    for contact in state.take_contacts() {
        match contact {
            Contact::PickupOverlap { pickup } => {
                handle_collect(state, pickup);
            }
        }
    }

    apply_motion(&mut state.player, input.left, input.right, &state.tuning);
    wrap_player(&mut state.player, input.camera.width);

    let scroll_y = input.camera.scroll_y;
    recycle_platforms(state, scroll_y);
    expire_stale_pickups(state, scroll_y);

    evaluate_session(state);
}

/// The platform with the largest y; ties keep the first one in pool order
pub fn lowest_platform(platforms: &[Platform]) -> Option<(usize, &Platform)> {
    platforms
        .iter()
        .enumerate()
        .fold(None, |lowest, (index, platform)| match lowest {
            Some((_, current)) if platform.pos.y <= current.pos.y => lowest,
            _ => Some((index, platform)),
        })
}

/// Run the Playing -> GameOver check and return the resulting phase
pub fn evaluate_session(state: &mut SessionState) -> SessionPhase {
    if state.phase == SessionPhase::GameOver || state.player.body.is_none() {
        return state.phase;
    }
    let Some((_, lowest)) = lowest_platform(state.platforms.as_slice()) else {
        return state.phase;
    };

    if state.player.pos.y > lowest.pos.y + state.tuning.fall_margin {
        state.phase = SessionPhase::GameOver;
        state.player.freeze();
        state.hud.message = Some(GAME_OVER_TEXT.to_string());
        log::info!(
            "Game over after {} frames: {} carrots, height {:.0}",
            state.frame,
            state.collected,
            state.height()
        );
        state.emit(SessionEvent::GameOver {
            collected: state.collected,
        });
    }
    state.phase
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::pickup::{Anchor, add_pickup_above};
    use crate::sim::state::PlayerPose;
    use glam::Vec2;

    fn fall_below_platforms(state: &mut SessionState) {
        let lowest_y = lowest_platform(state.platforms.as_slice())
            .map(|(_, p)| p.pos.y)
            .expect("platforms");
        state.player.pos.y = lowest_y + FALL_MARGIN + 1.0;
    }

    #[test]
    fn test_lowest_platform_tie_keeps_first() {
        let platforms = vec![
            Platform::new(Vec2::new(100.0, 50.0)),
            Platform::new(Vec2::new(200.0, 300.0)),
            Platform::new(Vec2::new(300.0, 300.0)),
            Platform::new(Vec2::new(400.0, -20.0)),
        ];
        let (index, lowest) = lowest_platform(&platforms).expect("non-empty");
        assert_eq!(index, 1);
        assert_eq!(lowest.pos.x, 200.0);
        assert!(lowest_platform(&[]).is_none());
    }

    #[test]
    fn test_tick_grounded_player_jumps() {
        let mut state = SessionState::new(12345);
        if let Some(body) = state.player.body.as_mut() {
            body.touching_down = true;
        }
        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.player.vel.y, JUMP_VELOCITY);
        assert_eq!(state.player.pose, PlayerPose::Jump);
        assert_eq!(state.phase, SessionPhase::Playing);
        assert_eq!(state.frame, 1);
    }

    #[test]
    fn test_fall_margin_boundary() {
        let mut state = SessionState::new(3);
        let lowest_y = lowest_platform(state.platforms.as_slice())
            .map(|(_, p)| p.pos.y)
            .expect("platforms");

        state.player.pos.y = lowest_y + FALL_MARGIN;
        assert_eq!(evaluate_session(&mut state), SessionPhase::Playing);

        state.player.pos.y = lowest_y + FALL_MARGIN + 0.5;
        assert_eq!(evaluate_session(&mut state), SessionPhase::GameOver);
    }

    #[test]
    fn test_game_over_fires_once() {
        let mut state = SessionState::new(12345);
        fall_below_platforms(&mut state);

        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert!(state.is_game_over());
        assert!(!state.player.active && !state.player.visible);
        assert_eq!(state.hud.message.as_deref(), Some(GAME_OVER_TEXT));

        let game_overs = |events: &[SessionEvent]| {
            events
                .iter()
                .filter(|e| matches!(e, SessionEvent::GameOver { .. }))
                .count()
        };
        assert_eq!(game_overs(&state.drain_events()), 1);

        let frame = state.frame;
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), FRAME_DT);
            assert_eq!(evaluate_session(&mut state), SessionPhase::GameOver);
        }
        assert_eq!(game_overs(&state.drain_events()), 0);
        assert_eq!(state.frame, frame);
    }

    #[test]
    fn test_count_frozen_after_game_over() {
        let mut state = SessionState::new(8);
        let anchor = Anchor {
            x: 240.0,
            y: 320.0,
            height: 38.0,
        };
        let first = add_pickup_above(&mut state, anchor).expect("spawn");
        let second = add_pickup_above(&mut state, anchor).expect("spawn");

        state.push_contact(Contact::PickupOverlap { pickup: first });
        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.collected, 1);

        fall_below_platforms(&mut state);
        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert!(state.is_game_over());

        state.push_contact(Contact::PickupOverlap { pickup: second });
        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.collected, 1);
        assert_eq!(state.pending_contacts(), 0);
    }

    #[test]
    fn test_duplicate_overlaps_in_one_frame_count_once() {
        let mut state = SessionState::new(8);
        let anchor = Anchor {
            x: 240.0,
            y: 320.0,
            height: 38.0,
        };
        let index = add_pickup_above(&mut state, anchor).expect("spawn");
        state.push_contact(Contact::PickupOverlap { pickup: index });
        state.push_contact(Contact::PickupOverlap { pickup: index });
        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.collected, 1);
        assert_eq!(state.hud.score_text, "1");
    }

    #[test]
    fn test_tick_wraps_player() {
        let mut state = SessionState::new(4);
        let half = state.player.size.x * 0.5;
        state.player.pos.x = GAME_WIDTH + half;
        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.player.pos.x, -half);
    }

    #[test]
    fn test_tick_recycles_with_camera() {
        let mut state = SessionState::new(4);
        // Keep the player near the top so the session stays alive
        state.player.pos.y = -500.0;
        let input = TickInput {
            camera: Camera {
                scroll_y: -820.0,
                ..Camera::default()
            },
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_DT);
        // Everything at or below y = -120 moved above the camera
        for platform in state.platforms.iter() {
            assert!(platform.pos.y < -120.0);
        }
        assert_eq!(state.platforms.len(), PLATFORM_COUNT);
        assert_eq!(state.phase, SessionPhase::Playing);
    }

    #[test]
    fn test_camera_follow_centres_target() {
        let mut camera = Camera::default();
        camera.follow(263.0);
        assert_eq!(camera.scroll_y, 263.0 - GAME_HEIGHT * 0.5);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = SessionState::new(99999);
        let mut state2 = SessionState::new(99999);
        let mut camera = Camera::default();

        for step in 0..50 {
            camera.scroll_y -= 40.0;
            let input = TickInput {
                left: step % 3 == 0,
                right: step % 5 == 0,
                camera,
            };
            // Stay above every platform so both sessions keep playing
            state1.player.pos.y = camera.scroll_y - 100.0;
            state2.player.pos.y = camera.scroll_y - 100.0;
            tick(&mut state1, &input, FRAME_DT);
            tick(&mut state2, &input, FRAME_DT);
        }

        assert_eq!(state1.frame, 50);
        assert_eq!(state1.frame, state2.frame);
        assert_eq!(state1.pickups.len(), state2.pickups.len());
        for (a, b) in state1.platforms.iter().zip(state2.platforms.iter()) {
            assert_eq!(a.pos, b.pos);
        }
    }
}
