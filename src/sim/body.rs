//! Axis-aligned physics bodies
//!
//! The rules never integrate motion themselves; a body only mirrors what the
//! physics collaborator knows about an entity (its bounds and whether it rests
//! on something). An entity without a body is not registered with physics.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box of `size` centred on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap test (touching edges do not count)
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Physics body attached to an entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub bounds: Aabb,
    /// Set by the collaborator when the body rests on something below it
    pub touching_down: bool,
}

impl Body {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            bounds: Aabb::from_center(center, size),
            touching_down: false,
        }
    }

    /// Re-derive the bounds from the entity transform
    pub fn update_from(&mut self, center: Vec2, size: Vec2) {
        self.bounds = Aabb::from_center(center, size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::from_center(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::from_center(Vec2::new(8.0, 0.0), Vec2::new(10.0, 10.0));
        let c = Aabb::from_center(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        // Edges touching only
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_body_follows_transform() {
        let mut body = Body::new(Vec2::new(100.0, 100.0), Vec2::new(20.0, 10.0));
        body.update_from(Vec2::new(100.0, -50.0), Vec2::new(20.0, 10.0));
        assert_eq!(body.bounds.min, Vec2::new(90.0, -55.0));
        assert_eq!(body.bounds.max, Vec2::new(110.0, -45.0));
    }
}
