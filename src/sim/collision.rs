//! Axis-aligned rectangle overlap tests
//!
//! Everything in the playfield is a center + half-extent box. Overlap uses
//! strict inequalities on both axes, so boxes that merely touch edge-to-edge
//! do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box, stored as center and half-extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    /// Build from a center point and full width/height
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half: size * 0.5,
        }
    }

    pub fn top(&self) -> f32 {
        self.center.y - self.half.y
    }

    pub fn bottom(&self) -> f32 {
        self.center.y + self.half.y
    }
}

/// True iff the two boxes intersect on both axes (touching edges miss)
#[inline]
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    (a.center.x - b.center.x).abs() < a.half.x + b.half.x
        && (a.center.y - b.center.y).abs() < a.half.y + b.half.y
}
