//! Read-only views handed to the presentation layer
//!
//! [`FrameSnapshot`] borrows the pools for one frame and serializes straight
//! to JSON for the browser. [`RunSnapshot`] is an owned summary used for
//! end-of-run reporting and restart checks.

use glam::Vec2;
use serde::Serialize;

use super::boss::Boss;
use super::effects::Toast;
use super::entity::{Brick, DropItem, FloatingText, Particle, Projectile};
use super::progression::UpgradeCard;
use super::state::{GamePhase, GameState, PlayerStats};

/// HUD scalars
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub level: u32,
    pub exp_ratio: f32,
    pub damage: f32,
    pub fire_rate: f32,
}

/// Active buff indicators
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Buffs {
    pub slow_time_remaining_ms: f64,
    pub deflect_active: bool,
}

/// Overlay intensities after applying the player's settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Overlay {
    pub screen_flash: f32,
    pub shake_offset: Vec2,
    pub level_up_pulse: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct StageClearView<'a> {
    pub cards: &'a [UpgradeCard],
    pub revealed: bool,
    pub selectable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GameOverView {
    pub score: u64,
    pub level: u32,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot<'a> {
    pub phase: GamePhase,
    pub width: f32,
    pub height: f32,
    pub shooter: Vec2,
    pub projectiles: &'a [Projectile],
    pub bricks: &'a [Brick],
    pub boss: Option<&'a Boss>,
    pub drop_items: &'a [DropItem],
    pub particles: &'a [Particle],
    pub floating_texts: &'a [FloatingText],
    pub toasts: &'a [Toast],
    pub hud: Hud,
    pub buffs: Buffs,
    pub overlay: Overlay,
    pub stage_clear: Option<StageClearView<'a>>,
    pub game_over: Option<GameOverView>,
}

/// Owned run summary, comparable across runs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSnapshot {
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u64,
    pub level: u32,
    pub exp: u64,
    pub exp_to_level_up: u64,
    pub stats: PlayerStats,
    pub boss_stage: bool,
    pub brick_count: usize,
    pub projectile_count: usize,
    pub upgrades_taken: u32,
}

impl GameState {
    /// Borrowed view of this frame's state
    pub fn frame_snapshot(&self, now_ms: f64) -> FrameSnapshot<'_> {
        let overlay = Overlay {
            screen_flash: if self.settings.effective_screen_flash() {
                self.fx.screen_flash.max(0.0)
            } else {
                0.0
            },
            shake_offset: if self.settings.effective_screen_shake() {
                self.fx.background_offset
            } else {
                Vec2::ZERO
            },
            level_up_pulse: self.fx.level_up_pulse.max(0.0),
        };

        let stage_clear = match (&self.offer, self.phase) {
            (Some(offer), GamePhase::StageClear) => Some(StageClearView {
                cards: &offer.cards,
                revealed: offer.revealed(now_ms),
                selectable: offer.selectable(now_ms),
            }),
            _ => None,
        };

        let game_over = (self.phase == GamePhase::GameOver).then_some(GameOverView {
            score: self.score,
            level: self.progression.level,
        });

        FrameSnapshot {
            phase: self.phase,
            width: self.width,
            height: self.height,
            shooter: self.shooter_pos(),
            projectiles: &self.pools.projectiles,
            bricks: &self.pools.bricks,
            boss: self.pools.boss.as_ref(),
            drop_items: &self.pools.drop_items,
            particles: &self.pools.particles,
            floating_texts: &self.pools.floating_texts,
            toasts: &self.fx.toasts,
            hud: Hud {
                score: self.score,
                level: self.progression.level,
                exp_ratio: self.progression.exp_ratio(),
                damage: self.stats.damage,
                fire_rate: self.stats.fire_rate,
            },
            buffs: Buffs {
                slow_time_remaining_ms: self.slow_time_remaining_ms(now_ms),
                deflect_active: self.stats.deflect_active,
            },
            overlay,
            stage_clear,
            game_over,
        }
    }

    pub fn run_snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            seed: self.seed,
            phase: self.phase,
            score: self.score,
            level: self.progression.level,
            exp: self.progression.exp,
            exp_to_level_up: self.progression.exp_to_level_up,
            stats: self.stats.clone(),
            boss_stage: self.is_boss_stage(),
            brick_count: self.pools.bricks.len(),
            projectile_count: self.pools.projectiles.len(),
            upgrades_taken: self.progression.history.iter().map(|(_, n)| n).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::progression::award_exp;
    use crate::tuning::Tuning;

    #[test]
    fn test_restart_is_idempotent() {
        let mut state = GameState::new(7, 800.0, 600.0);
        state.restart(0.0);
        let first = state.run_snapshot();
        state.restart(0.0);
        let second = state.run_snapshot();
        assert_eq!(first, second);

        assert_eq!(second.phase, GamePhase::Playing);
        assert_eq!(second.score, 0);
        assert_eq!(second.level, 1);
        assert_eq!(second.exp, 0);
        assert_eq!(second.stats.damage, 1.0);
        assert_eq!(second.stats.fire_rate, 1.0);
        assert!(!second.stats.chain_lightning);
        assert!(!second.stats.deflect_shield);
        assert!(!second.stats.whirlwind);
        assert!(!second.stats.shockwave);
    }

    #[test]
    fn test_stage_clear_view_follows_schedule() {
        let mut state = GameState::new(7, 800.0, 600.0);
        state.restart(0.0);
        award_exp(&mut state, 100, 0.0);

        let view = state.frame_snapshot(500.0).stage_clear.unwrap();
        assert_eq!(view.cards.len(), 2);
        assert!(!view.revealed && !view.selectable);

        let view = state.frame_snapshot(1500.0).stage_clear.unwrap();
        assert!(view.revealed && !view.selectable);

        let view = state.frame_snapshot(2000.0).stage_clear.unwrap();
        assert!(view.selectable);
    }

    #[test]
    fn test_game_over_view() {
        let mut state = GameState::new(7, 800.0, 600.0);
        state.restart(0.0);
        assert!(state.frame_snapshot(0.0).game_over.is_none());
        state.score = 420;
        state.game_over();
        let view = state.frame_snapshot(0.0).game_over.unwrap();
        assert_eq!(view, GameOverView { score: 420, level: 1 });
    }

    #[test]
    fn test_overlay_respects_settings() {
        let settings = Settings {
            screen_flash: false,
            ..Settings::default()
        };
        let mut state = GameState::with_config(7, 800.0, 600.0, Tuning::default(), settings);
        state.restart(0.0);
        state.fx.trigger_crit();
        state.fx.background_offset = Vec2::new(3.0, -2.0);

        let overlay = state.frame_snapshot(0.0).overlay;
        assert_eq!(overlay.screen_flash, 0.0);
        assert_eq!(overlay.shake_offset, Vec2::new(3.0, -2.0));
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let mut state = GameState::new(7, 800.0, 600.0);
        state.restart(0.0);
        state.slow_time_end_ms = 3000.0;
        let json = serde_json::to_value(state.frame_snapshot(1000.0)).unwrap();
        assert_eq!(json["phase"], "Playing");
        assert_eq!(json["buffs"]["slow_time_remaining_ms"], 2000.0);
        assert_eq!(json["hud"]["level"], 1);
        assert!(json["boss"].is_null());
    }
}
