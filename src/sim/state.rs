//! Session state and core entity types
//!
//! Everything one play attempt owns lives in [`SessionState`]: the player, both
//! pools, the score, the seeded RNG and the per-frame contact/event queues.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::pool::{Pool, Poolable};
use super::recycler;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Active gameplay
    Playing,
    /// Player fell below the lowest platform (terminal)
    GameOver,
}

/// Player sprite pose (visual only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerPose {
    #[default]
    Stand,
    Jump,
}

impl PlayerPose {
    /// Texture key the host renders for this pose
    pub fn texture_key(&self) -> &'static str {
        match self {
            PlayerPose::Stand => "bunny-stand",
            PlayerPose::Jump => "bunny-jump",
        }
    }
}

/// The bunny
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub pose: PlayerPose,
    pub active: bool,
    pub visible: bool,
    pub body: Option<Body>,
}

impl Player {
    pub fn spawn(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size: PLAYER_SIZE,
            pose: PlayerPose::Stand,
            active: true,
            visible: true,
            body: Some(Body::new(pos, PLAYER_SIZE)),
        }
    }

    /// Ground contact as last reported by the physics collaborator
    pub fn touching_down(&self) -> bool {
        self.body.is_some_and(|b| b.touching_down)
    }

    /// Stop all physics and input for the rest of the session
    pub fn freeze(&mut self) {
        self.active = false;
        self.visible = false;
        self.vel = Vec2::ZERO;
        self.body = None;
    }
}

/// A platform the player bounces on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub pos: Vec2,
    pub size: Vec2,
    pub body: Option<Body>,
}

impl Platform {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: PLATFORM_SIZE,
            body: Some(Body::new(pos, PLATFORM_SIZE)),
        }
    }

    /// Y of the walkable top edge
    pub fn top(&self) -> f32 {
        self.pos.y - self.size.y * 0.5
    }

    /// Sync the static body with the current transform
    pub fn refresh_body(&mut self) {
        if let Some(body) = self.body.as_mut() {
            body.update_from(self.pos, self.size);
        }
    }
}

impl Poolable for Platform {
    // Platforms are teleported, never killed
    fn is_active(&self) -> bool {
        true
    }

    fn kill_and_hide(&mut self) {}
}

/// A carrot pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub pos: Vec2,
    pub size: Vec2,
    pub active: bool,
    pub visible: bool,
    pub body: Option<Body>,
}

impl Pickup {
    /// A fresh, inactive pickup (activated by [`Pickup::revive`])
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: PICKUP_SIZE,
            active: false,
            visible: false,
            body: None,
        }
    }

    /// Activate at `pos` and register with physics
    pub fn revive(&mut self, pos: Vec2) {
        self.pos = pos;
        self.active = true;
        self.visible = true;
        self.body = Some(Body::new(pos, self.size));
    }

    pub fn disable_body(&mut self) {
        self.body = None;
    }
}

impl Poolable for Pickup {
    fn is_active(&self) -> bool {
        self.active
    }

    fn kill_and_hide(&mut self) {
        self.active = false;
        self.visible = false;
    }
}

/// Notifications from the physics collaborator, drained once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contact {
    /// The player's bounds overlap a pickup
    PickupOverlap { pickup: usize },
}

/// Notifications for the host's render/audio layers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    PlatformRecycled { index: usize, y: f32 },
    PickupSpawned { index: usize, pos: Vec2 },
    PickupCollected { index: usize, total: u32 },
    PickupExpired { index: usize },
    GameOver { collected: u32 },
}

/// Text the host draws on top of the scene
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub score_text: String,
    /// Terminal message, set once on game over
    pub message: Option<String>,
}

/// Serializable view of a session for hosts
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub frame: u64,
    pub phase: SessionPhase,
    pub collected: u32,
    pub player: &'a Player,
    pub platforms: &'a [Platform],
    pub pickups: &'a [Pickup],
    pub hud: &'a Hud,
}

/// Complete state of one play attempt
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: SessionPhase,
    /// Ticks processed while playing
    pub frame: u64,
    /// Seconds of play
    pub elapsed: f32,
    pub player: Player,
    pub platforms: Pool<Platform>,
    pub pickups: Pool<Pickup>,
    /// Carrots collected (monotonic)
    pub collected: u32,
    pub hud: Hud,
    pub(crate) rng: Pcg32,
    contacts: Vec<Contact>,
    /// Bounded by MAX_PENDING_EVENTS, oldest dropped first
    events: VecDeque<SessionEvent>,
}

impl SessionState {
    /// Create a new session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new session; invalid tuning falls back to the defaults
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("{}, using default tuning", e);
                Tuning::default()
            }
        };
        let mut rng = Pcg32::seed_from_u64(seed);
        let platforms = recycler::initial_platforms(&tuning, &mut rng);
        let player = Player::spawn(tuning.player_spawn);
        let pickups: Pool<Pickup> = Pool::with_capacity(tuning.pickup_pool_size);

        log::info!(
            "Session started (seed {}, {} platforms, pickup pool {})",
            seed,
            platforms.len(),
            pickups.capacity()
        );

        Self {
            seed,
            tuning,
            phase: SessionPhase::Playing,
            frame: 0,
            elapsed: 0.0,
            player,
            platforms,
            pickups,
            collected: 0,
            hud: Hud {
                score_text: "0".to_string(),
                message: None,
            },
            rng,
            contacts: Vec::new(),
            events: VecDeque::with_capacity(MAX_PENDING_EVENTS),
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }

    /// Queue a collaborator notification for the next tick
    pub fn push_contact(&mut self, contact: Contact) {
        self.contacts.push(contact);
    }

    pub fn pending_contacts(&self) -> usize {
        self.contacts.len()
    }

    pub(crate) fn take_contacts(&mut self) -> Vec<Contact> {
        std::mem::take(&mut self.contacts)
    }

    pub(crate) fn emit(&mut self, event: SessionEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            if let Some(dropped) = self.events.pop_front() {
                log::debug!("Event queue full, dropping {:?}", dropped);
            }
        }
        self.events.push_back(event);
    }

    /// Take all events produced since the last drain.
    ///
    /// Hosts that never drain only see the newest `MAX_PENDING_EVENTS`.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.events.drain(..).collect()
    }

    /// How far the player has climbed above the spawn point
    pub fn height(&self) -> f32 {
        (self.tuning.player_spawn.y - self.player.pos.y).max(0.0)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            frame: self.frame,
            phase: self.phase,
            collected: self.collected,
            player: &self.player,
            platforms: self.platforms.as_slice(),
            pickups: self.pickups.as_slice(),
            hud: &self.hud,
        }
    }
}
