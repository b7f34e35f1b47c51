//! Self-playing headless sessions
//!
//! Drives a [`SessionState`] with the arcade collaborator and a simple
//! autopilot. The native binary uses this to exercise the rules without a
//! renderer.

use serde::Serialize;

use crate::consts::FRAME_DT;
use crate::sim::{Arcade, Camera, SessionState, TickInput, tick};
use crate::tuning::Tuning;

/// Horizontal distance the autopilot treats as "lined up"
const STEER_DEADZONE: f32 = 6.0;

/// Outcome of a headless run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub frames: u64,
    /// Landings, each followed by a jump
    pub jumps: u32,
    pub collected: u32,
    /// Highest point reached above the spawn
    pub peak_height: f32,
    pub game_over: bool,
}

/// Pick left/right input that lines the player up with the platform it is
/// most likely to land on next.
///
/// Rising: the nearest platform above the feet. Falling: the nearest one below.
pub fn steer(state: &SessionState) -> (bool, bool) {
    let player = &state.player;
    let feet = player.pos.y + player.size.y * 0.5;
    let platforms = state.platforms.iter();

    let target = if player.vel.y < 0.0 {
        platforms
            .filter(|p| p.top() < feet)
            .max_by(|a, b| a.pos.y.partial_cmp(&b.pos.y).unwrap_or(std::cmp::Ordering::Equal))
    } else {
        platforms
            .filter(|p| p.top() >= feet - 1.0)
            .min_by(|a, b| a.pos.y.partial_cmp(&b.pos.y).unwrap_or(std::cmp::Ordering::Equal))
    };

    match target {
        Some(platform) => {
            let dx = platform.pos.x - player.pos.x;
            (dx < -STEER_DEADZONE, dx > STEER_DEADZONE)
        }
        None => (false, false),
    }
}

/// Camera over the session's tuned viewport, centred on the player
pub fn session_camera(state: &SessionState) -> Camera {
    let mut camera = Camera::with_width(state.tuning.game_width);
    camera.follow(state.player.pos.y);
    camera
}

/// Play one session until game over or `max_frames`
pub fn run(seed: u64, tuning: Tuning, max_frames: u64, autopilot: bool) -> RunSummary {
    let arcade = Arcade::new(tuning.gravity);
    let mut state = SessionState::with_tuning(seed, tuning);
    let mut camera = session_camera(&state);

    let mut jumps = 0;
    let mut peak_height: f32 = 0.0;

    while state.frame < max_frames && !state.is_game_over() {
        if arcade.step(&mut state, FRAME_DT) {
            jumps += 1;
        }
        camera.follow(state.player.pos.y);

        let (left, right) = if autopilot { steer(&state) } else { (false, false) };
        let input = TickInput {
            left,
            right,
            camera,
        };
        tick(&mut state, &input, FRAME_DT);
        peak_height = peak_height.max(state.height());

        for event in state.drain_events() {
            log::trace!("frame {}: {:?}", state.frame, event);
        }
    }

    RunSummary {
        seed,
        frames: state.frame,
        jumps,
        collected: state.collected,
        peak_height,
        game_over: state.is_game_over(),
    }
}
