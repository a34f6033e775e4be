//! Data-driven game balance
//!
//! Every knob has a default matching the shipped balance; a JSON document may
//! override any subset of them.

use serde::{Deserialize, Serialize};

/// Balance values consumed by the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Spawner ===
    /// Starting interval between brick spawns (ms)
    pub brick_spawn_interval_ms: f64,
    /// Spawn interval never drops below this (ms)
    pub brick_spawn_interval_floor_ms: f64,
    /// Spawn interval reduction per level-up (ms)
    pub brick_spawn_interval_step_ms: f64,
    /// Starting brick fall speed (pixels/frame)
    pub brick_start_speed: f32,
    /// Fall speed gained per level-up
    pub brick_speed_step: f32,
    /// Maximum bricks alive at once
    pub max_bricks: usize,
    /// Chance that a new brick carries a collectible
    pub item_chance: f64,

    // === Combat ===
    /// Maximum projectiles alive at once
    pub max_projectiles: usize,
    /// Hits a drop item takes before it is collected
    pub item_hp: u32,
    /// Slow-time buff duration (ms)
    pub slow_time_duration_ms: f64,

    // === Skills ===
    /// Deflect shield recharge time (ms)
    pub deflect_cooldown_ms: f64,
    /// Shockwave reach from a destroyed brick
    pub shockwave_radius: f32,
    /// Distance bricks are shoved upward by a shockwave
    pub shockwave_push: f32,
    /// Extra projectile radius granted by whirlwind
    pub whirlwind_radius_bonus: f32,

    // === Stage clear ===
    /// Delay before upgrade cards are revealed (ms)
    pub card_reveal_delay_ms: f64,
    /// Delay after reveal before cards accept a pick (ms)
    pub card_unlock_delay_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            brick_spawn_interval_ms: 1200.0,
            brick_spawn_interval_floor_ms: 600.0,
            brick_spawn_interval_step_ms: 50.0,
            brick_start_speed: 1.2,
            brick_speed_step: 0.15,
            max_bricks: 50,
            item_chance: 0.15,

            max_projectiles: 100,
            item_hp: 2,
            slow_time_duration_ms: 5000.0,

            deflect_cooldown_ms: 15000.0,
            shockwave_radius: 120.0,
            shockwave_push: 30.0,
            whirlwind_radius_bonus: 3.0,

            card_reveal_delay_ms: 1000.0,
            card_unlock_delay_ms: 1000.0,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse a tuning document, keeping defaults if it is malformed
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Invalid tuning document ({e}), using defaults");
                Self::default()
            }
        }
    }
}
