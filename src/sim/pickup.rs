//! Carrot spawning and collection

use glam::Vec2;

use super::pool::Poolable;
use super::state::{Pickup, SessionEvent, SessionPhase, SessionState};
use super::recycler::is_stale;

/// Where a pickup gets placed: the anchor's x, its y and display height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub x: f32,
    pub y: f32,
    pub height: f32,
}

/// Pickup position directly above an anchor
#[inline]
pub fn pickup_position(anchor: Anchor) -> Vec2 {
    Vec2::new(anchor.x, anchor.y - anchor.height)
}

/// Spawn a carrot above `anchor`, reusing a killed pool member when possible.
///
/// Returns the pool index, or `None` when every pickup is live.
pub fn add_pickup_above(state: &mut SessionState, anchor: Anchor) -> Option<usize> {
    let pos = pickup_position(anchor);
    let capacity = state.pickups.capacity();
    let Some((index, pickup)) = state.pickups.get(|_| Pickup::new(pos)) else {
        log::warn!("Pickup pool exhausted ({} live), skipping carrot at {:?}", capacity, pos);
        return None;
    };
    pickup.revive(pos);

    log::debug!("Carrot {} spawned at {:?}", index, pos);
    state.emit(SessionEvent::PickupSpawned { index, pos });
    Some(index)
}

/// React to the player overlapping pickup `index`.
///
/// Returns true if the carrot was collected. A killed pickup has no body, so
/// repeated overlap reports for it are ignored.
pub fn handle_collect(state: &mut SessionState, index: usize) -> bool {
    if state.phase == SessionPhase::GameOver || state.player.body.is_none() {
        return false;
    }
    let Some(pickup) = state.pickups.member_mut(index) else {
        return false;
    };
    if !pickup.is_active() || pickup.body.is_none() {
        return false;
    }

    pickup.kill_and_hide();
    pickup.disable_body();

    state.collected = state.collected.saturating_add(1);
    state.hud.score_text = state.collected.to_string();

    log::debug!("Carrot {} collected ({} total)", index, state.collected);
    state.emit(SessionEvent::PickupCollected {
        index,
        total: state.collected,
    });
    true
}

/// Return carrots that scrolled past the tracked window to the pool
pub fn expire_stale_pickups(state: &mut SessionState, scroll_y: f32) -> usize {
    let margin = state.tuning.recycle_margin;
    let mut expired = Vec::new();

    for (index, pickup) in state.pickups.iter_mut().enumerate() {
        if pickup.is_active() && is_stale(pickup.pos.y, scroll_y, margin) {
            pickup.kill_and_hide();
            pickup.disable_body();
            expired.push(index);
        }
    }

    for &index in &expired {
        log::debug!("Carrot {} scrolled away", index);
        state.emit(SessionEvent::PickupExpired { index });
    }
    expired.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::tuning::Tuning;

    fn anchor_at(x: f32, y: f32) -> Anchor {
        Anchor {
            x,
            y,
            height: PLATFORM_SIZE.y,
        }
    }

    #[test]
    fn test_spawn_above_anchor() {
        let mut state = SessionState::new(1);
        let index = add_pickup_above(&mut state, anchor_at(200.0, 100.0)).expect("pool has room");
        let pickup = state.pickups.member(index).expect("pickup");
        assert_eq!(pickup.pos, Vec2::new(200.0, 100.0 - PLATFORM_SIZE.y));
        assert!(pickup.active && pickup.visible);
        assert!(pickup.body.is_some());
        assert!(matches!(
            state.drain_events().as_slice(),
            [SessionEvent::PickupSpawned { index: 0, .. }]
        ));
    }

    #[test]
    fn test_pool_exhaustion_is_bounded() {
        let tuning = Tuning {
            pickup_pool_size: 2,
            ..Tuning::default()
        };
        let mut state = SessionState::with_tuning(1, tuning);
        assert_eq!(add_pickup_above(&mut state, anchor_at(100.0, 0.0)), Some(0));
        assert_eq!(add_pickup_above(&mut state, anchor_at(150.0, 0.0)), Some(1));
        assert_eq!(add_pickup_above(&mut state, anchor_at(200.0, 0.0)), None);
        assert_eq!(state.pickups.len(), 2);

        // Collecting frees a slot, which the next spawn reuses
        assert!(handle_collect(&mut state, 0));
        assert_eq!(add_pickup_above(&mut state, anchor_at(300.0, -50.0)), Some(0));
        let reused = state.pickups.member(0).expect("pickup 0");
        assert_eq!(reused.pos.x, 300.0);
        assert!(reused.active && reused.body.is_some());
    }

    #[test]
    fn test_collect_increments_once() {
        let mut state = SessionState::new(1);
        let index = add_pickup_above(&mut state, anchor_at(240.0, 320.0)).expect("spawn");

        assert!(handle_collect(&mut state, index));
        assert_eq!(state.collected, 1);
        assert_eq!(state.hud.score_text, "1");

        // Overlap reported again for the same, now dead, carrot
        assert!(!handle_collect(&mut state, index));
        assert_eq!(state.collected, 1);

        let pickup = state.pickups.member(index).expect("pickup");
        assert!(!pickup.active && !pickup.visible);
        assert!(pickup.body.is_none());
    }

    #[test]
    fn test_collect_unknown_index_is_ignored() {
        let mut state = SessionState::new(1);
        assert!(!handle_collect(&mut state, 42));
        assert_eq!(state.collected, 0);
    }

    #[test]
    fn test_collect_skipped_without_player_body() {
        let mut state = SessionState::new(1);
        let index = add_pickup_above(&mut state, anchor_at(240.0, 320.0)).expect("spawn");
        state.player.body = None;
        assert!(!handle_collect(&mut state, index));
        assert_eq!(state.collected, 0);
        assert!(state.pickups.member(index).is_some_and(|p| p.active));
    }

    #[test]
    fn test_stale_pickups_expire() {
        let mut state = SessionState::new(1);
        let low = add_pickup_above(&mut state, anchor_at(100.0, 900.0)).expect("spawn");
        let high = add_pickup_above(&mut state, anchor_at(100.0, 100.0)).expect("spawn");
        state.drain_events();

        assert_eq!(expire_stale_pickups(&mut state, 0.0), 1);
        assert!(!state.pickups.member(low).is_some_and(|p| p.active));
        assert!(state.pickups.member(high).is_some_and(|p| p.active));
        assert_eq!(state.drain_events(), vec![SessionEvent::PickupExpired { index: low }]);

        // Nothing left to expire
        assert_eq!(expire_stale_pickups(&mut state, 0.0), 0);
    }
}
