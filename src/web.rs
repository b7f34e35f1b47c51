//! Browser host binding
//!
//! The JavaScript scene owns rendering, arcade physics, input and the camera.
//! Each frame it copies the player's physics state in, reports overlaps, calls
//! `tick`, then reads velocity, pose and events back out.

use wasm_bindgen::prelude::*;

use crate::highscores::HighScores;
use crate::sim::{Camera, Contact, SessionState, TickInput, tick};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }
    log::info!("Bunny Hop core loaded");
}

fn random_seed() -> u64 {
    (js_sys::Math::random() * u32::MAX as f64) as u64
}

/// One play session driven from JavaScript
#[wasm_bindgen]
pub struct WebSession {
    state: SessionState,
    scores: HighScores,
    recorded: bool,
}

#[wasm_bindgen]
impl WebSession {
    /// New session with a random seed and default tuning
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebSession {
        Self::from_state(SessionState::new(random_seed()))
    }

    /// New session with a fixed seed and optional JSON tuning overrides
    #[wasm_bindgen(js_name = withSeed)]
    pub fn with_seed(seed: u32, tuning_json: Option<String>) -> Result<WebSession, JsValue> {
        let tuning = match tuning_json {
            Some(json) => Tuning::from_json(&json).map_err(|e| {
                log::warn!("Rejected tuning: {}", e);
                JsValue::from_str(&e.to_string())
            })?,
            None => Tuning::default(),
        };
        Ok(Self::from_state(SessionState::with_tuning(seed as u64, tuning)))
    }

    /// Copy the engine's view of the player in before `tick`
    #[wasm_bindgen(js_name = syncPlayer)]
    pub fn sync_player(&mut self, x: f32, y: f32, vx: f32, vy: f32, touching_down: bool) {
        let player = &mut self.state.player;
        let Some(body) = player.body.as_mut() else {
            return;
        };
        player.pos.x = x;
        player.pos.y = y;
        player.vel.x = vx;
        player.vel.y = vy;
        body.touching_down = touching_down;
        body.update_from(player.pos, player.size);
    }

    /// Queue an overlap between the player and pickup `index`
    pub fn overlap(&mut self, index: usize) {
        self.state.push_contact(Contact::PickupOverlap { pickup: index });
    }

    pub fn tick(&mut self, left: bool, right: bool, scroll_y: f32, width: f32, height: f32, dt: f32) {
        let input = TickInput {
            left,
            right,
            camera: Camera {
                scroll_y,
                width,
                height,
            },
        };
        tick(&mut self.state, &input, dt);

        if self.state.is_game_over() && !self.recorded {
            self.recorded = true;
            let height = self.state.height() as u32;
            if let Some(rank) = self.scores.add_run(self.state.collected, height, js_sys::Date::now()) {
                log::info!("New high score, rank {}", rank);
                self.scores.save();
            }
        }
    }

    #[wasm_bindgen(getter, js_name = playerX)]
    pub fn player_x(&self) -> f32 {
        self.state.player.pos.x
    }

    #[wasm_bindgen(getter, js_name = velocityX)]
    pub fn velocity_x(&self) -> f32 {
        self.state.player.vel.x
    }

    #[wasm_bindgen(getter, js_name = velocityY)]
    pub fn velocity_y(&self) -> f32 {
        self.state.player.vel.y
    }

    /// Texture key for the player's current pose
    #[wasm_bindgen(getter)]
    pub fn texture(&self) -> String {
        self.state.player.pose.texture_key().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn collected(&self) -> u32 {
        self.state.collected
    }

    #[wasm_bindgen(getter, js_name = gameOver)]
    pub fn game_over(&self) -> bool {
        self.state.is_game_over()
    }

    #[wasm_bindgen(getter, js_name = bestCarrots)]
    pub fn best_carrots(&self) -> u32 {
        self.scores.best_carrots().unwrap_or(0)
    }

    /// Full session view as JSON
    pub fn snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state.snapshot()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Events since the last call, as a JSON array.
    ///
    /// Call once per frame; undrained events are capped and the oldest dropped.
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&mut self) -> Result<String, JsValue> {
        let events = self.state.drain_events();
        serde_json::to_string(&events).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl WebSession {
    fn from_state(state: SessionState) -> WebSession {
        WebSession {
            state,
            scores: HighScores::load(),
            recorded: false,
        }
    }
}

impl Default for WebSession {
    fn default() -> Self {
        Self::new()
    }
}
