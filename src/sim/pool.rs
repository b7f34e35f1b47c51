//! Fixed-capacity entity pools
//!
//! Members are never destroyed: a killed member is flagged inactive and handed
//! out again by the next [`Pool::get`]. Peak memory is bounded by the capacity
//! no matter how long a session runs.

/// An entity that can live in a [`Pool`]
pub trait Poolable {
    fn is_active(&self) -> bool;
    /// Deactivate and hide the member so it can be reused
    fn kill_and_hide(&mut self);
}

/// Bounded pool with stable member indices
#[derive(Debug, Clone)]
pub struct Pool<T> {
    members: Vec<T>,
    capacity: usize,
}

impl<T: Poolable> Pool<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            members: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Hand out an inactive member, or create one while under capacity.
    ///
    /// Returns the member index and the member itself; `None` when every slot
    /// is live. A reused member is returned as-is, the caller resets it.
    pub fn get(&mut self, create: impl FnOnce(usize) -> T) -> Option<(usize, &mut T)> {
        if let Some(index) = self.members.iter().position(|m| !m.is_active()) {
            return Some((index, &mut self.members[index]));
        }
        if self.members.len() >= self.capacity {
            return None;
        }
        let index = self.members.len();
        self.members.push(create(index));
        Some((index, &mut self.members[index]))
    }

    /// Kill a member; returns false if it was already inactive or unknown
    pub fn kill_and_hide(&mut self, index: usize) -> bool {
        match self.members.get_mut(index) {
            Some(member) if member.is_active() => {
                member.kill_and_hide();
                true
            }
            _ => false,
        }
    }

    pub fn member(&self, index: usize) -> Option<&T> {
        self.members.get(index)
    }

    pub fn member_mut(&mut self, index: usize) -> Option<&mut T> {
        self.members.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.members.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.members.iter_mut()
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &T> {
        self.members.iter().filter(|m| m.is_active())
    }

    pub fn count_active(&self) -> usize {
        self.iter_active().count()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.members
    }

    /// Number of members allocated so far
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Slot {
        tag: usize,
        active: bool,
    }

    impl Poolable for Slot {
        fn is_active(&self) -> bool {
            self.active
        }

        fn kill_and_hide(&mut self) {
            self.active = false;
        }
    }

    fn spawn(tag: usize) -> Slot {
        Slot { tag, active: true }
    }

    #[test]
    fn test_get_allocates_until_capacity() {
        let mut pool = Pool::with_capacity(2);
        assert_eq!(pool.get(spawn).map(|(i, _)| i), Some(0));
        assert_eq!(pool.get(spawn).map(|(i, _)| i), Some(1));
        assert!(pool.get(spawn).is_none());
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.count_active(), 2);
    }

    #[test]
    fn test_killed_member_is_reused() {
        let mut pool = Pool::with_capacity(2);
        pool.get(spawn);
        pool.get(spawn);
        assert!(pool.kill_and_hide(0));
        assert!(!pool.kill_and_hide(0));
        assert_eq!(pool.count_active(), 1);

        let (index, slot) = pool.get(spawn).expect("slot 0 is free");
        assert_eq!(index, 0);
        // Reused member keeps its identity, caller reactivates it
        assert_eq!(slot.tag, 0);
        assert!(!slot.active);
        slot.active = true;
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.count_active(), 2);
    }

    #[test]
    fn test_zero_capacity_pool_never_hands_out() {
        let mut pool: Pool<Slot> = Pool::with_capacity(0);
        assert!(pool.get(spawn).is_none());
        assert!(pool.is_empty());
        assert!(!pool.kill_and_hide(3));
    }
}
