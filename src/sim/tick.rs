//! Frame driver
//!
//! Advances every subsystem once per animation frame in a fixed order.
//! Cadence timers (fire, spawn, buffs, boss regen) compare against the
//! caller's wall-clock timestamp; only particles age by the frame delta.

use super::combat;
use super::effects;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Presentation-layer requests for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer position (already in canvas pixels)
    pub shooter_x: Option<f32>,
    /// Leave the start screen
    pub start: bool,
    /// Reset the run and play again
    pub restart: bool,
    /// Stage-clear card picked by the player
    pub choose_card: Option<usize>,
}

/// Advance the game by one frame.
///
/// `state.events` holds only this frame's events afterwards; anything the
/// caller did not drain from the previous frame is discarded.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64, dt_ms: f32) {
    state.events.clear();

    if input.restart {
        state.restart(now_ms);
    } else if input.start {
        state.start(now_ms);
    }
    if let Some(x) = input.shooter_x {
        state.set_shooter_x(x);
    }
    if let Some(index) = input.choose_card {
        state.choose_upgrade(index, now_ms);
    }

    // Stage clear freezes the field; game over stops updates entirely
    if state.phase != GamePhase::Playing {
        return;
    }

    state.fx.update(&mut state.rng, now_ms);
    effects::expire_floating_texts(&mut state.pools.floating_texts, now_ms);

    combat::update_drop_items(state, now_ms);

    if now_ms - state.last_fire_ms >= state.stats.fire_interval_ms() {
        combat::fire(state);
        state.last_fire_ms = now_ms;
    }

    state.spawner.tick(
        now_ms,
        &mut state.pools.bricks,
        state.pools.boss.is_some(),
        state.progression.level,
        state.width,
        &mut state.rng,
        &state.tuning,
    );

    if update_boss(state, now_ms) {
        return;
    }

    recharge_deflect(state, now_ms);
    if descend_bricks(state, now_ms) {
        return;
    }

    combat::resolve_projectiles(state, now_ms);
    effects::update_particles(&mut state.pools.particles, dt_ms);
}

/// Pattern behaviour and descent. True if the boss reached the bottom.
fn update_boss(state: &mut GameState, now_ms: f64) -> bool {
    let Some(boss) = state.pools.boss.as_mut() else {
        return false;
    };
    boss.update(now_ms, state.width);
    if boss.pos.y > state.height {
        log::info!("{} reached the bottom", boss.kind.name());
        state.game_over();
        return true;
    }
    false
}

fn recharge_deflect(state: &mut GameState, now_ms: f64) {
    let stats = &mut state.stats;
    if stats.deflect_shield && !stats.deflect_active && now_ms >= stats.deflect_ready_at_ms {
        stats.deflect_active = true;
        log::debug!("Deflect shield recharged");
    }
}

/// Current brick descent multiplier from slow field and slow time
pub fn brick_speed_factor(state: &GameState, now_ms: f64) -> f32 {
    let slow_time = if now_ms < state.slow_time_end_ms {
        SLOW_TIME_FACTOR
    } else {
        1.0
    };
    state.stats.slow_field * slow_time
}

/// Move bricks down. A brick past the bottom is either deflected or ends the
/// run; returns true in the latter case.
fn descend_bricks(state: &mut GameState, now_ms: f64) -> bool {
    let factor = brick_speed_factor(state, now_ms);

    let mut i = 0;
    while i < state.pools.bricks.len() {
        let brick = &mut state.pools.bricks[i];
        brick.pos.y += brick.speed * factor;
        if brick.pos.y <= state.height {
            i += 1;
            continue;
        }

        if !state.stats.deflect_active {
            state.game_over();
            return true;
        }

        let brick = state.pools.bricks.remove(i);
        state.stats.deflect_active = false;
        state.stats.deflect_ready_at_ms = now_ms + state.tuning.deflect_cooldown_ms;
        state.fx.screen_flash = state.fx.screen_flash.max(0.2);
        state.fx.push_toast("SHIELD", "Deflected!", now_ms);
        state.burst(brick.center(), 0x00bfff, 20);
        state.events.push(GameEvent::ShieldDeflected);
        log::debug!("Deflect shield consumed");
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::boss::{Boss, BossKind};
    use crate::sim::entity::Brick;
    use glam::Vec2;

    const FRAME_MS: f32 = 16.0;

    fn brick(y: f32) -> Brick {
        Brick {
            pos: Vec2::new(100.0, y),
            size: Vec2::new(80.0, 40.0),
            hp: 3.0,
            max_hp: 3.0,
            speed: 2.0,
            item: None,
        }
    }

    /// Run `frames` idle frames starting at `start_ms`
    fn run(state: &mut GameState, start_ms: f64, frames: u32) -> f64 {
        let mut now = start_ms;
        for _ in 0..frames {
            now += FRAME_MS as f64;
            tick(state, &TickInput::default(), now, FRAME_MS);
        }
        now
    }

    #[test]
    fn test_tick_start_to_playing() {
        let mut state = GameState::new(12345, 800.0, 600.0);
        assert_eq!(state.phase, GamePhase::Start);

        // Tick without start - stays on the start screen, nothing spawns
        tick(&mut state, &TickInput::default(), 5000.0, FRAME_MS);
        assert_eq!(state.phase, GamePhase::Start);
        assert!(state.pools.projectiles.is_empty());

        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input, 5016.0, FRAME_MS);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.pools.projectiles.len(), 1);
    }

    #[test]
    fn test_fire_cadence_follows_wall_clock() {
        let mut state = GameState::new(1, 800.0, 600.0);
        state.restart(0.0);
        tick(&mut state, &TickInput::default(), 1000.0, FRAME_MS);
        assert_eq!(state.last_fire_ms, 1000.0);
        tick(&mut state, &TickInput::default(), 1999.0, FRAME_MS);
        assert_eq!(state.last_fire_ms, 1000.0);
        tick(&mut state, &TickInput::default(), 2000.0, FRAME_MS);
        assert_eq!(state.last_fire_ms, 2000.0);
    }

    #[test]
    fn test_brick_breach_ends_run() {
        let mut state = GameState::new(1, 800.0, 600.0);
        state.restart(0.0);
        state.pools.bricks.push(brick(599.0));
        tick(&mut state, &TickInput::default(), 16.0, FRAME_MS);
        assert_eq!(state.phase, GamePhase::GameOver);

        // Terminal: later frames change nothing
        let before = state.pools.bricks[0].pos.y;
        run(&mut state, 16.0, 10);
        assert_eq!(state.pools.bricks[0].pos.y, before);
    }

    #[test]
    fn test_deflect_shield_absorbs_one_breach() {
        let mut state = GameState::new(1, 800.0, 600.0);
        state.restart(0.0);
        state.stats.deflect_shield = true;
        state.stats.deflect_active = true;
        state.pools.bricks.push(brick(599.0));
        tick(&mut state, &TickInput::default(), 100.0, FRAME_MS);

        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.pools.bricks.is_empty());
        assert!(!state.stats.deflect_active);
        assert_eq!(state.stats.deflect_ready_at_ms, 15_100.0);
        assert!(state.events.contains(&GameEvent::ShieldDeflected));

        tick(&mut state, &TickInput::default(), 15_100.0, FRAME_MS);
        assert!(state.stats.deflect_active);
    }

    #[test]
    fn test_boss_breach_ends_run() {
        let mut state = GameState::new(1, 800.0, 600.0);
        state.restart(0.0);
        let mut boss = Boss::new(BossKind::Tank, 10, 800.0, 0.0);
        boss.pos.y = 600.0;
        state.pools.boss = Some(boss);
        tick(&mut state, &TickInput::default(), 16.0, FRAME_MS);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_slow_time_scales_descent() {
        let mut state = GameState::new(1, 800.0, 600.0);
        state.restart(0.0);
        state.slow_time_end_ms = 5000.0;
        assert!((brick_speed_factor(&state, 4999.0) - 0.3).abs() < 1e-6);
        assert_eq!(brick_speed_factor(&state, 5000.0), 1.0);

        state.stats.slow_field = 0.85;
        assert!((brick_speed_factor(&state, 0.0) - 0.255).abs() < 1e-6);
    }

    #[test]
    fn test_stage_clear_freezes_field() {
        let mut state = GameState::new(1, 800.0, 600.0);
        state.restart(0.0);
        state.pools.bricks.push(brick(100.0));
        crate::sim::progression::award_exp(&mut state, 100, 0.0);
        assert_eq!(state.phase, GamePhase::StageClear);

        run(&mut state, 0.0, 30);
        assert_eq!(state.pools.bricks[0].pos.y, 100.0);

        let pick = TickInput {
            choose_card: Some(1),
            ..Default::default()
        };
        tick(&mut state, &pick, 2500.0, FRAME_MS);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.pools.bricks[0].pos.y > 100.0);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999, 800.0, 600.0);
        let mut state2 = GameState::new(99999, 800.0, 600.0);

        let mut now = 0.0;
        for frame in 0..2000u32 {
            now += FRAME_MS as f64;
            let input = TickInput {
                start: frame == 0,
                shooter_x: Some(200.0 + (frame % 400) as f32),
                choose_card: Some(0),
                ..Default::default()
            };
            tick(&mut state1, &input, now, FRAME_MS);
            tick(&mut state2, &input, now, FRAME_MS);
        }

        assert_eq!(state1.run_snapshot(), state2.run_snapshot());
        assert_eq!(state1.pools.bricks.len(), state2.pools.bricks.len());
        assert_eq!(state1.pools.particles.len(), state2.pools.particles.len());
    }

    #[test]
    fn test_events_hold_only_latest_frame() {
        let mut state = GameState::new(1, 800.0, 600.0);
        state.restart(0.0);
        state.stats.deflect_shield = true;
        state.stats.deflect_active = true;
        state.pools.bricks.push(brick(599.0));
        tick(&mut state, &TickInput::default(), 100.0, FRAME_MS);
        assert_eq!(state.events, vec![GameEvent::ShieldDeflected]);

        // Never drained: the next frame starts from an empty queue
        run(&mut state, 100.0, 50);
        assert!(state.events.is_empty());
    }
}
