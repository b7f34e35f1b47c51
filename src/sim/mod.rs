//! Gameplay rules
//!
//! All rules are free functions over an explicit [`SessionState`]:
//! - Seeded RNG only
//! - Stable iteration order (pool index)
//! - No rendering or engine dependencies; the engine reports contacts and
//!   ground state, the rules answer with velocities, poses and events

pub mod arcade;
pub mod body;
pub mod motion;
pub mod pickup;
pub mod pool;
pub mod recycler;
pub mod state;
pub mod tick;

pub use arcade::Arcade;
pub use body::{Aabb, Body};
pub use motion::{apply_motion, wrap_player};
pub use pickup::{Anchor, add_pickup_above, expire_stale_pickups, handle_collect};
pub use pool::{Pool, Poolable};
pub use recycler::{RecycleResult, initial_platforms, recycle_if_stale, recycle_platforms};
pub use state::{
    Contact, Hud, Pickup, Platform, Player, PlayerPose, SessionEvent, SessionPhase, SessionState,
    Snapshot,
};
pub use tick::{Camera, TickInput, evaluate_session, lowest_platform, tick};
