//! Brick Barrage - a vertically-scrolling brick shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, combat, bosses, upgrades)
//! - `platform`: Clock source and the browser bridge
//! - `settings`: Presentation preferences
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Shooter stays this far from either side wall
    pub const SHOOTER_MARGIN: f32 = 30.0;
    /// Shooter sits this far above the bottom edge
    pub const SHOOTER_OFFSET_Y: f32 = 50.0;

    /// Angle between neighbouring multishot projectiles (radians)
    pub const SHOT_SPREAD: f32 = 0.3;
    /// Horizontal shot speed scale (pixels/frame)
    pub const SHOT_SPEED_X: f32 = 5.0;
    /// Vertical shot speed (pixels/frame, upward)
    pub const SHOT_SPEED_Y: f32 = 15.0;

    /// Brick geometry
    pub const BRICK_MIN_WIDTH: f32 = 60.0;
    pub const BRICK_MAX_WIDTH: f32 = 120.0;
    pub const BRICK_HEIGHT: f32 = 40.0;
    pub const BRICK_SPAWN_Y: f32 = -50.0;

    /// Boss geometry
    pub const BOSS_WIDTH: f32 = 150.0;
    pub const BOSS_HEIGHT: f32 = 50.0;
    pub const BOSS_SPAWN_Y: f32 = 100.0;
    pub const BOSS_BASE_SPEED: f32 = 0.5;
    /// A boss appears on every level that is a multiple of this
    pub const BOSS_LEVEL_INTERVAL: u32 = 10;

    /// Chain lightning reach from the struck brick's center
    pub const CHAIN_RADIUS: f32 = 150.0;
    pub const CHAIN_DAMAGE_FACTOR: f32 = 0.8;
    /// Splash damage relative to player damage
    pub const SPLASH_DAMAGE_FACTOR: f32 = 0.5;

    /// Drop item physics
    pub const ITEM_RADIUS: f32 = 15.0;
    pub const ITEM_GRAVITY: f32 = 0.2;
    pub const ITEM_MAX_FALL_SPEED: f32 = 5.0;

    /// Slow-time buff scales brick descent to this fraction
    pub const SLOW_TIME_FACTOR: f32 = 0.3;
}

/// Velocity of a shot fired `angle` radians off vertical.
///
/// Angle 0 points straight up (negative y in screen space).
#[inline]
pub fn shot_velocity(angle: f32, speed_multiplier: f32) -> Vec2 {
    use consts::{SHOT_SPEED_X, SHOT_SPEED_Y};
    Vec2::new(angle.sin() * SHOT_SPEED_X, -SHOT_SPEED_Y * angle.cos()) * speed_multiplier
}

/// Floor a non-negative float score/exp value into an integer.
#[inline]
pub fn floor_u32(value: f32) -> u32 {
    value.max(0.0).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shot_velocity_straight_up() {
        let v = shot_velocity(0.0, 1.0);
        assert_eq!(v, Vec2::new(0.0, -15.0));
    }

    #[test]
    fn test_shot_velocity_scales_with_ball_speed() {
        let v = shot_velocity(0.3, 2.0);
        assert!((v.x - 0.3f32.sin() * 10.0).abs() < 1e-5);
        assert!((v.y + 30.0 * 0.3f32.cos()).abs() < 1e-4);
    }

    #[test]
    fn test_floor_u32_clamps_negative() {
        assert_eq!(floor_u32(15.9), 15);
        assert_eq!(floor_u32(-3.0), 0);
    }
}
