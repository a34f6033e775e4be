//! Boss state machine
//!
//! A boss picks its kind once at creation and keeps it for life. Each kind
//! has its own per-frame behaviour; every kind descends at its speed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::entity::Rgb;
use crate::consts::*;

/// Boss kinds in spawn order. The order is part of the game's balance: the
/// kind for a boss level cycles through this list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossKind {
    Tank,
    Speed,
    Shield,
    Splitter,
    Regenerate,
}

impl BossKind {
    pub const ALL: [BossKind; 5] = [
        BossKind::Tank,
        BossKind::Speed,
        BossKind::Shield,
        BossKind::Splitter,
        BossKind::Regenerate,
    ];

    /// Index into [`BossKind::ALL`] for a boss level
    pub fn index_for_level(level: u32) -> usize {
        let n = Self::ALL.len() as f64;
        ((level as f64 / BOSS_LEVEL_INTERVAL as f64 - 1.0).rem_euclid(n)).floor() as usize
    }

    /// Kind for a level, `None` unless the level is a positive multiple of 10
    pub fn for_level(level: u32) -> Option<Self> {
        if level > 0 && level.is_multiple_of(BOSS_LEVEL_INTERVAL) {
            Some(Self::ALL[Self::index_for_level(level)])
        } else {
            None
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BossKind::Tank => "Tank Boss",
            BossKind::Speed => "Speed Boss",
            BossKind::Shield => "Shield Boss",
            BossKind::Splitter => "Splitter Boss",
            BossKind::Regenerate => "Regenerating Boss",
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            BossKind::Tank => 0x8b4513,
            BossKind::Speed => 0xff6347,
            BossKind::Shield => 0x4169e1,
            BossKind::Splitter => 0x9932cc,
            BossKind::Regenerate => 0x00ff00,
        }
    }

    pub fn hp_multiplier(self) -> f32 {
        match self {
            BossKind::Tank => 2.0,
            BossKind::Speed => 0.8,
            BossKind::Shield => 1.5,
            BossKind::Splitter => 1.2,
            BossKind::Regenerate => 1.3,
        }
    }

    pub fn speed_multiplier(self) -> f32 {
        match self {
            BossKind::Tank => 0.5,
            BossKind::Speed => 2.0,
            BossKind::Shield => 1.0,
            BossKind::Splitter => 1.0,
            BossKind::Regenerate => 0.7,
        }
    }
}

/// Kind-specific state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BossPattern {
    /// No special behaviour
    Tank,
    /// Sweeps sideways, bouncing off the margins
    Speed { direction: f32 },
    /// Damage drains the shield before the hull
    Shield { shield_hp: f32, max_shield_hp: f32 },
    /// Reserved for minion splitting; behaves like a tank
    Splitter,
    /// Heals `regen_rate` every second
    Regenerate { regen_rate: f32 },
}

/// Horizontal step of the speed pattern (pixels/frame)
const SWEEP_STEP: f32 = 3.0;
const REGEN_INTERVAL_MS: f64 = 1000.0;
const SHIELD_REGEN_INTERVAL_MS: f64 = 2000.0;
const SHIELD_REGEN_AMOUNT: f32 = 5.0;
const REGEN_RATE: f32 = 0.2;
/// Fraction of boss hp allotted to the shield
const SHIELD_FRACTION: f32 = 0.3;

/// How a hit landed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BossHit {
    /// The shield took everything
    Absorbed { shield_damage: f32 },
    /// Hull took `hull_damage` after the shield took its share
    Damaged { shield_damage: f32, hull_damage: f32 },
}

/// The single large pattern-driven enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub kind: BossKind,
    pub pattern: BossPattern,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub hp: f32,
    pub max_hp: f32,
    /// Descent per frame
    pub speed: f32,
    /// Wall-clock time of the last heal or shield recharge
    pub last_regen_ms: f64,
}

impl Boss {
    /// Build the boss for `level`, centred horizontally
    pub fn new(kind: BossKind, level: u32, arena_width: f32, now_ms: f64) -> Self {
        let base_hp = (50.0f32).max((level as f32 * 10.0).floor());
        let hp = (base_hp * kind.hp_multiplier()).floor();
        let pattern = match kind {
            BossKind::Tank => BossPattern::Tank,
            BossKind::Speed => BossPattern::Speed { direction: 1.0 },
            BossKind::Shield => {
                let shield = (hp * SHIELD_FRACTION).floor();
                BossPattern::Shield {
                    shield_hp: shield,
                    max_shield_hp: shield,
                }
            }
            BossKind::Splitter => BossPattern::Splitter,
            BossKind::Regenerate => BossPattern::Regenerate {
                regen_rate: REGEN_RATE,
            },
        };
        Self {
            kind,
            pattern,
            pos: Vec2::new((arena_width - BOSS_WIDTH) / 2.0, BOSS_SPAWN_Y),
            size: Vec2::new(BOSS_WIDTH, BOSS_HEIGHT),
            hp,
            max_hp: hp,
            speed: BOSS_BASE_SPEED * kind.speed_multiplier(),
            last_regen_ms: now_ms,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    pub fn shield_hp(&self) -> f32 {
        match self.pattern {
            BossPattern::Shield { shield_hp, .. } => shield_hp,
            _ => 0.0,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0.0
    }

    /// Advance one frame of pattern behaviour and descent
    pub fn update(&mut self, now_ms: f64, arena_width: f32) {
        match &mut self.pattern {
            BossPattern::Regenerate { regen_rate } => {
                if now_ms - self.last_regen_ms > REGEN_INTERVAL_MS {
                    self.hp = (self.hp + *regen_rate).min(self.max_hp);
                    self.last_regen_ms = now_ms;
                }
            }
            BossPattern::Speed { direction } => {
                self.pos.x += *direction * SWEEP_STEP;
                let right_limit = arena_width - self.size.x - SHOOTER_MARGIN;
                if self.pos.x <= SHOOTER_MARGIN || self.pos.x >= right_limit {
                    *direction = -*direction;
                }
            }
            BossPattern::Shield {
                shield_hp,
                max_shield_hp,
            } => {
                if now_ms - self.last_regen_ms > SHIELD_REGEN_INTERVAL_MS
                    && *shield_hp < *max_shield_hp
                {
                    *shield_hp = (*shield_hp + SHIELD_REGEN_AMOUNT).min(*max_shield_hp);
                    self.last_regen_ms = now_ms;
                }
            }
            BossPattern::Tank | BossPattern::Splitter => {}
        }

        self.pos.y += self.speed;
    }

    /// Apply `damage`, draining any shield first
    pub fn take_damage(&mut self, damage: f32) -> BossHit {
        let mut remaining = damage;
        let mut shield_damage = 0.0;
        if let BossPattern::Shield { shield_hp, .. } = &mut self.pattern
            && *shield_hp > 0.0
        {
            shield_damage = remaining.min(*shield_hp);
            *shield_hp = (*shield_hp - shield_damage).max(0.0);
            remaining -= shield_damage;
            if remaining <= 0.0 {
                return BossHit::Absorbed { shield_damage };
            }
        }

        self.hp -= remaining;
        BossHit::Damaged {
            shield_damage,
            hull_damage: remaining,
        }
    }
}
