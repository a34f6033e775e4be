//! Collision tests shared by every interaction
//!
//! Projectiles are circles, bricks and bosses are axis-aligned rectangles,
//! drop items are circles.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A circle in screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// An axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Closest point inside the rectangle to `p`
    pub fn clamp_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max())
    }
}

/// Circle vs rectangle overlap.
///
/// Clamps the circle center into the rectangle and compares squared
/// distances, so no square root is taken.
pub fn circle_rect_hit(circle: Circle, rect: Rect) -> bool {
    let closest = rect.clamp_point(circle.center);
    circle.center.distance_squared(closest) < circle.radius * circle.radius
}

/// Circle vs circle overlap (Euclidean distance vs summed radii)
pub fn circle_circle_hit(a: Circle, b: Circle) -> bool {
    a.center.distance(b.center) < a.radius + b.radius
}
