//! Simulation context
//!
//! One explicit struct owns every piece of run state. Subsystems borrow the
//! slices they need: entity pools, player stats, progression, spawner and
//! overlay timers are separate fields.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::boss::BossKind;
use super::effects::{self, VisualEffects};
use super::entity::{BallType, EntityPools, FloatingText, ItemKind, Rgb};
use super::progression::{Progression, UpgradeId, UpgradeOffer};
use super::spawner::Spawner;
use crate::consts::*;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    Start,
    /// Active gameplay
    Playing,
    /// Level-up upgrade choice pending
    StageClear,
    /// Run ended
    GameOver,
}

/// Player stats, mutated only by upgrade effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub damage: f32,
    /// Shots per second
    pub fire_rate: f32,
    pub multi_shot: u32,
    pub explosion_radius: f32,
    pub crit_chance: f32,
    pub crit_multiplier: f32,
    pub chain_lightning: bool,
    /// Brick fall speed multiplier (1.0 = no slow field)
    pub slow_field: f32,
    pub deflect_shield: bool,
    pub deflect_active: bool,
    /// Wall-clock time the shield recharges after a deflect
    pub deflect_ready_at_ms: f64,
    pub whirlwind: bool,
    pub shockwave: bool,
    pub ball_type: BallType,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            damage: 1.0,
            fire_rate: 1.0,
            multi_shot: 1,
            explosion_radius: 0.0,
            crit_chance: 0.0,
            crit_multiplier: 2.0,
            chain_lightning: false,
            slow_field: 1.0,
            deflect_shield: false,
            deflect_active: false,
            deflect_ready_at_ms: 0.0,
            whirlwind: false,
            shockwave: false,
            ball_type: BallType::Normal,
        }
    }
}

impl PlayerStats {
    /// Slow field never slows bricks below this fraction
    pub const SLOW_FIELD_FLOOR: f32 = 0.4;

    /// Minimum gap between volleys (ms)
    pub fn fire_interval_ms(&self) -> f64 {
        1000.0 / self.fire_rate as f64
    }

    /// Whether a one-time unlock is already owned
    pub fn has_unlock(&self, id: UpgradeId) -> bool {
        match id {
            UpgradeId::ChainLightning => self.chain_lightning,
            UpgradeId::DeflectShield => self.deflect_shield,
            UpgradeId::Whirlwind => self.whirlwind,
            UpgradeId::Shockwave => self.shockwave,
            _ => false,
        }
    }
}

/// Things that happened during a tick, drained by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    BrickDestroyed { pos: Vec2, item: Option<ItemKind> },
    ItemCollected { kind: ItemKind },
    BossSpawned { kind: BossKind, level: u32 },
    BossDefeated { kind: BossKind, score: u64 },
    LevelUp { level: u32 },
    UpgradeChosen { id: UpgradeId, synergy_bonus: f32 },
    ShieldDeflected,
    GameOver { score: u64, level: u32 },
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    /// Canvas bounds for the current frame
    pub width: f32,
    pub height: f32,
    /// Shooter center, written by the input layer
    pub shooter_x: f32,
    pub pools: EntityPools,
    pub stats: PlayerStats,
    pub progression: Progression,
    pub spawner: Spawner,
    pub fx: VisualEffects,
    pub score: u64,
    pub last_fire_ms: f64,
    pub slow_time_end_ms: f64,
    /// Pending stage-clear choice
    pub offer: Option<UpgradeOffer>,
    pub events: Vec<GameEvent>,
    pub tuning: Tuning,
    pub settings: Settings,
}

impl GameState {
    /// Create a run on the start screen with default tuning and settings
    pub fn new(seed: u64, width: f32, height: f32) -> Self {
        Self::with_config(seed, width, height, Tuning::default(), Settings::default())
    }

    pub fn with_config(
        seed: u64,
        width: f32,
        height: f32,
        tuning: Tuning,
        settings: Settings,
    ) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Start,
            width,
            height,
            shooter_x: width / 2.0,
            pools: EntityPools::default(),
            stats: PlayerStats::default(),
            progression: Progression::default(),
            spawner: Spawner::new(&tuning),
            fx: VisualEffects::default(),
            score: 0,
            last_fire_ms: 0.0,
            slow_time_end_ms: 0.0,
            offer: None,
            events: Vec::new(),
            tuning,
            settings,
        }
    }

    /// Leave the start screen
    pub fn start(&mut self, now_ms: f64) {
        if self.phase != GamePhase::Start {
            return;
        }
        self.phase = GamePhase::Playing;
        self.spawner.reset_timer(now_ms);
        log::info!("Run started (seed {})", self.seed);
    }

    /// Reset every run value and go straight back to playing
    pub fn restart(&mut self, now_ms: f64) {
        self.reset_run();
        self.phase = GamePhase::Playing;
        self.spawner.reset_timer(now_ms);
        log::info!("Run restarted");
    }

    fn reset_run(&mut self) {
        self.pools.clear();
        self.stats = PlayerStats::default();
        self.progression = Progression::default();
        self.spawner = Spawner::new(&self.tuning);
        self.fx = VisualEffects::default();
        self.score = 0;
        self.last_fire_ms = 0.0;
        self.slow_time_end_ms = 0.0;
        self.offer = None;
        self.events.clear();
        self.shooter_x = self.width / 2.0;
    }

    /// New canvas bounds from the resize collaborator
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.shooter_x = self.clamp_shooter(self.shooter_x);
    }

    /// Pointer-move input; ignored outside active play
    pub fn set_shooter_x(&mut self, x: f32) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.shooter_x = self.clamp_shooter(x);
    }

    fn clamp_shooter(&self, x: f32) -> f32 {
        let max = (self.width - SHOOTER_MARGIN).max(SHOOTER_MARGIN);
        x.clamp(SHOOTER_MARGIN, max)
    }

    pub fn shooter_pos(&self) -> Vec2 {
        Vec2::new(self.shooter_x, self.height - SHOOTER_OFFSET_Y)
    }

    /// Brick spawning is suspended while a boss is alive
    pub fn is_boss_stage(&self) -> bool {
        self.pools.boss.is_some()
    }

    pub fn slow_time_remaining_ms(&self, now_ms: f64) -> f64 {
        (self.slow_time_end_ms - now_ms).max(0.0)
    }

    /// Pick a stage-clear card.
    ///
    /// Returns the applied upgrade, or `None` (with a warning) if no offer is
    /// pending, the cards are not selectable yet, or the index is out of range.
    pub fn choose_upgrade(&mut self, index: usize, now_ms: f64) -> Option<UpgradeId> {
        if self.phase != GamePhase::StageClear {
            log::warn!("Upgrade pick ignored: no stage clear in progress");
            return None;
        }
        let offer = self.offer.as_ref()?;
        if !offer.selectable(now_ms) {
            log::warn!("Upgrade pick ignored: cards not selectable yet");
            return None;
        }
        let Some(card) = offer.cards.get(index) else {
            log::warn!("Upgrade pick ignored: card index {index} out of range");
            return None;
        };
        let (id, bonus) = (card.id, card.synergy_bonus);

        id.apply(&mut self.stats);
        self.progression.history.record(id);
        if bonus > 0.0 {
            self.fx
                .push_toast("SYNERGY", format!("+{:.0}%", bonus * 100.0), now_ms);
        }

        self.offer = None;
        self.phase = GamePhase::Playing;
        self.spawner.reset_timer(now_ms);
        self.events.push(GameEvent::UpgradeChosen {
            id,
            synergy_bonus: bonus,
        });
        log::debug!("Upgrade chosen: {:?} (synergy {:.2})", id, bonus);
        Some(id)
    }

    /// End the run
    pub fn game_over(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver {
            score: self.score,
            level: self.progression.level,
        });
        log::info!(
            "Game over: score {} at level {}",
            self.score,
            self.progression.level
        );
    }

    /// Take this frame's events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Spark burst respecting the particle cap
    pub(crate) fn burst(&mut self, pos: Vec2, color: Rgb, count: usize) {
        let cap = self.settings.max_particles();
        effects::burst(&mut self.pools.particles, &mut self.rng, pos, color, count, cap);
    }

    /// Floating label, skipped when floating text is turned off
    pub(crate) fn float_text(
        &mut self,
        text: impl Into<String>,
        origin: Vec2,
        color: Rgb,
        font_size: f32,
        duration_ms: f64,
        now_ms: f64,
    ) {
        if !self.settings.floating_text {
            return;
        }
        self.pools.floating_texts.push(FloatingText {
            text: text.into(),
            origin,
            color,
            font_size,
            start_ms: now_ms,
            duration_ms,
        });
    }
}
