//! Platform recycling
//!
//! The platform pool never grows. Once a platform has scrolled far enough below
//! the camera it is teleported to a random gap above the camera top, and
//! sometimes gets a carrot placed on it.

use glam::Vec2;
use rand::Rng;

use super::pickup::{Anchor, add_pickup_above};
use super::pool::Pool;
use super::state::{Platform, SessionEvent, SessionState};
use crate::tuning::Tuning;

/// Outcome of checking one platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecycleResult {
    /// Still inside the tracked window (or not registered with physics)
    Kept,
    /// Moved above the camera; `pickup` is the spawned carrot's pool index
    Recycled { new_y: f32, pickup: Option<usize> },
}

/// Build the starting layout.
///
/// Platform 0 sits at the player spawn so the first bounce is guaranteed; the
/// rest climb by a fixed stride with a random x.
pub fn initial_platforms<R: Rng + ?Sized>(tuning: &Tuning, rng: &mut R) -> Pool<Platform> {
    let spawn = tuning.player_spawn;
    let mut pool = Pool::with_capacity(tuning.platform_count);

    for i in 0..tuning.platform_count {
        let x = if i == 0 {
            spawn.x
        } else {
            rng.random_range(tuning.platform_x_min..=tuning.platform_x_max) as f32
        };
        let y = spawn.y - tuning.platform_stride * i as f32;
        pool.get(|_| Platform::new(Vec2::new(x, y)));
    }

    pool
}

/// Whether a platform at `y` has left the tracked window
#[inline]
pub fn is_stale(y: f32, scroll_y: f32, margin: f32) -> bool {
    y >= scroll_y + margin
}

/// Distance above the camera top for a recycled platform
pub fn roll_gap<R: Rng + ?Sized>(tuning: &Tuning, rng: &mut R) -> f32 {
    rng.random_range(tuning.min_gap..=tuning.max_gap) as f32
}

/// Whether this recycle event gets a carrot
pub fn roll_pickup<R: Rng + ?Sized>(tuning: &Tuning, rng: &mut R) -> bool {
    rng.random_range(0..=tuning.pickup_roll_max) > tuning.pickup_roll_threshold
}

/// Recycle platform `index` if it is stale relative to `scroll_y`
pub fn recycle_if_stale(state: &mut SessionState, index: usize, scroll_y: f32) -> RecycleResult {
    let Some(platform) = state.platforms.member_mut(index) else {
        return RecycleResult::Kept;
    };
    if platform.body.is_none() || !is_stale(platform.pos.y, scroll_y, state.tuning.recycle_margin) {
        return RecycleResult::Kept;
    }

    let old_y = platform.pos.y;
    platform.pos.y = scroll_y - roll_gap(&state.tuning, &mut state.rng);
    platform.refresh_body();
    let new_y = platform.pos.y;
    let anchor = Anchor {
        x: platform.pos.x,
        y: new_y,
        height: platform.size.y,
    };

    log::debug!("Platform {} recycled: y {} -> {}", index, old_y, new_y);
    state.emit(SessionEvent::PlatformRecycled { index, y: new_y });

    let pickup = if roll_pickup(&state.tuning, &mut state.rng) {
        add_pickup_above(state, anchor)
    } else {
        None
    };

    RecycleResult::Recycled { new_y, pickup }
}

/// One pass over the pool; returns how many platforms moved.
///
/// Each platform is looked at once, and a recycled platform ends up above the
/// camera top so it cannot be stale again this frame.
pub fn recycle_platforms(state: &mut SessionState, scroll_y: f32) -> usize {
    (0..state.platforms.len())
        .filter(|&index| {
            matches!(
                recycle_if_stale(state, index, scroll_y),
                RecycleResult::Recycled { .. }
            )
        })
        .count()
}
