//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Caller-supplied wall-clock timestamps, no clock reads
//! - Stable iteration order (pool order)
//! - No rendering or platform dependencies

pub mod boss;
pub mod collision;
pub mod combat;
pub mod effects;
pub mod entity;
pub mod progression;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use boss::{Boss, BossKind, BossPattern};
pub use collision::{Circle, Rect, circle_circle_hit, circle_rect_hit};
pub use entity::{BallType, Brick, DropItem, EntityPools, ItemKind, Projectile};
pub use progression::{UpgradeCard, UpgradeId, UpgradeOffer, exp_to_level_up};
pub use snapshot::{FrameSnapshot, RunSnapshot};
pub use state::{GameEvent, GamePhase, GameState, PlayerStats};
pub use tick::{TickInput, tick};
