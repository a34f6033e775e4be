//! Entity pools
//!
//! Flat collections of plain data. Behaviour lives in the subsystems that
//! mutate these; the presentation layer only reads them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::boss::Boss;
use super::collision::{Circle, Rect};

/// Packed 0xRRGGBB color for the renderer
pub type Rgb = u32;

/// Projectile flavour: changes size, speed and look
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BallType {
    #[default]
    Normal,
    Tennis,
    PingPong,
    Shuttlecock,
    Baseball,
    Billiard,
    Bowling,
}

impl BallType {
    pub const ALL: [BallType; 7] = [
        BallType::Normal,
        BallType::Tennis,
        BallType::PingPong,
        BallType::Shuttlecock,
        BallType::Baseball,
        BallType::Billiard,
        BallType::Bowling,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BallType::Normal => "Normal",
            BallType::Tennis => "Tennis",
            BallType::PingPong => "Ping Pong",
            BallType::Shuttlecock => "Shuttlecock",
            BallType::Baseball => "Baseball",
            BallType::Billiard => "Billiard",
            BallType::Bowling => "Bowling",
        }
    }

    pub fn radius(self) -> f32 {
        match self {
            BallType::Normal => 8.0,
            BallType::Tennis => 10.0,
            BallType::PingPong => 6.0,
            BallType::Shuttlecock => 7.0,
            BallType::Baseball => 9.0,
            BallType::Billiard => 11.0,
            BallType::Bowling => 14.0,
        }
    }

    /// Velocity multiplier applied at fire time
    pub fn speed(self) -> f32 {
        match self {
            BallType::Normal => 1.0,
            BallType::Tennis => 1.2,
            BallType::PingPong => 1.4,
            BallType::Shuttlecock => 0.8,
            BallType::Baseball => 1.1,
            BallType::Billiard => 0.9,
            BallType::Bowling => 0.7,
        }
    }

    /// Penetration flag carried by the ball data.
    ///
    /// Hit resolution never reads it: every projectile is consumed on first
    /// contact.
    pub fn penetration(self) -> bool {
        matches!(
            self,
            BallType::Tennis | BallType::Shuttlecock | BallType::Billiard | BallType::Bowling
        )
    }

    pub fn color(self) -> Rgb {
        match self {
            BallType::Normal => 0x4facfe,
            BallType::Tennis => 0x90ee90,
            BallType::PingPong => 0xffd700,
            BallType::Shuttlecock => 0xff69b4,
            BallType::Baseball => 0xff6347,
            BallType::Billiard => 0x000000,
            BallType::Bowling => 0x8b0000,
        }
    }

    /// Next type in the rotation (wraps)
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&t| t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

/// A player-fired shot
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    /// Pixels per frame
    pub vel: Vec2,
    pub radius: f32,
    pub damage: f32,
    pub ball_type: BallType,
    /// Cosmetic spin (radians), only advanced while whirlwind is owned
    pub rotation: f32,
}

impl Projectile {
    pub fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }
}

/// Collectible carried inside a brick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    SlowTime,
}

impl ItemKind {
    pub fn label(self) -> &'static str {
        match self {
            ItemKind::SlowTime => "SLOW TIME",
        }
    }
}

/// A descending obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub hp: f32,
    pub max_hp: f32,
    /// Fall speed (pixels/frame) fixed at spawn
    pub speed: f32,
    pub item: Option<ItemKind>,
}

impl Brick {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// Falling collectible released by a destroyed brick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropItem {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Hits required before collection
    pub hp: u32,
    pub kind: ItemKind,
}

impl DropItem {
    pub fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }
}

/// Cosmetic spark
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Rgb,
    /// Remaining lifetime in seconds
    pub life: f32,
}

/// Rising, fading label (damage numbers, score popups)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatingText {
    pub text: String,
    pub origin: Vec2,
    pub color: Rgb,
    pub font_size: f32,
    pub start_ms: f64,
    pub duration_ms: f64,
}

impl FloatingText {
    pub fn expired(&self, now_ms: f64) -> bool {
        now_ms - self.start_ms > self.duration_ms
    }
}

/// Every entity collection the frame loop touches
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityPools {
    pub projectiles: Vec<Projectile>,
    pub bricks: Vec<Brick>,
    pub boss: Option<Boss>,
    pub drop_items: Vec<DropItem>,
    pub particles: Vec<Particle>,
    pub floating_texts: Vec<FloatingText>,
}

impl EntityPools {
    pub fn clear(&mut self) {
        self.projectiles.clear();
        self.bricks.clear();
        self.boss = None;
        self.drop_items.clear();
        self.particles.clear();
        self.floating_texts.clear();
    }
}
