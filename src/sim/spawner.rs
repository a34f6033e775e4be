//! Time-gated brick creation and boss creation
//!
//! Brick cadence compares wall-clock timestamps, so it does not drift with
//! frame rate. Difficulty (fall speed, interval) escalates on level-up.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::boss::{Boss, BossKind};
use super::entity::{Brick, ItemKind};
use crate::consts::*;
use crate::tuning::Tuning;

/// Spawn cadence and difficulty state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    /// Current minimum gap between brick spawns (ms)
    pub interval_ms: f64,
    /// Wall-clock time of the last spawn attempt
    pub last_spawn_ms: f64,
    /// Fall speed handed to new bricks
    pub brick_speed: f32,
}

impl Spawner {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            interval_ms: tuning.brick_spawn_interval_ms,
            last_spawn_ms: 0.0,
            brick_speed: tuning.brick_start_speed,
        }
    }

    /// Restart the cadence from `now_ms` (run start, card picked, boss entry)
    pub fn reset_timer(&mut self, now_ms: f64) {
        self.last_spawn_ms = now_ms;
    }

    /// Level-up difficulty bump
    pub fn escalate(&mut self, tuning: &Tuning) {
        self.brick_speed += tuning.brick_speed_step;
        self.interval_ms = (self.interval_ms - tuning.brick_spawn_interval_step_ms)
            .max(tuning.brick_spawn_interval_floor_ms);
    }

    /// Spawn a brick if the interval has elapsed.
    ///
    /// The timer restarts whenever the interval elapses, even if the spawn is
    /// declined (boss stage or population cap). Returns true if a brick was
    /// created.
    #[allow(clippy::too_many_arguments)]
    pub fn tick(
        &mut self,
        now_ms: f64,
        bricks: &mut Vec<Brick>,
        boss_stage: bool,
        level: u32,
        arena_width: f32,
        rng: &mut Pcg32,
        tuning: &Tuning,
    ) -> bool {
        if now_ms - self.last_spawn_ms < self.interval_ms {
            return false;
        }
        self.last_spawn_ms = now_ms;
        spawn_brick(bricks, boss_stage, level, self.brick_speed, arena_width, rng, tuning)
    }
}

/// Brick hit points for a level: `max(1, floor(level/2)) + random(0..=level)`
pub fn brick_hp(level: u32, rng: &mut Pcg32) -> f32 {
    let base = (level / 2).max(1);
    (base + rng.random_range(0..=level)) as f32
}

/// Append one brick unless the boss stage is active or the pool is full
pub fn spawn_brick(
    bricks: &mut Vec<Brick>,
    boss_stage: bool,
    level: u32,
    speed: f32,
    arena_width: f32,
    rng: &mut Pcg32,
    tuning: &Tuning,
) -> bool {
    if boss_stage || bricks.len() >= tuning.max_bricks {
        return false;
    }

    let width = BRICK_MIN_WIDTH + rng.random::<f32>() * (BRICK_MAX_WIDTH - BRICK_MIN_WIDTH);
    let x = rng.random::<f32>() * (arena_width - width).max(0.0);
    let hp = brick_hp(level, rng);
    let item = rng.random_bool(tuning.item_chance.clamp(0.0, 1.0)).then_some(ItemKind::SlowTime);

    bricks.push(Brick {
        pos: Vec2::new(x, BRICK_SPAWN_Y),
        size: Vec2::new(width, BRICK_HEIGHT),
        hp,
        max_hp: hp,
        speed,
        item,
    });
    true
}

/// Boss for `level`, if the level calls for one
pub fn boss_for_level(level: u32, arena_width: f32, now_ms: f64) -> Option<Boss> {
    BossKind::for_level(level).map(|kind| Boss::new(kind, level, arena_width, now_ms))
}
