//! Combat resolver
//!
//! Fires volleys, moves projectiles, resolves hits against the boss, bricks
//! and drop items, and pays out rewards. Every projectile is consumed by its
//! first contact; the ball type's penetration flag is never consulted.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::boss::BossHit;
use super::collision::{circle_circle_hit, circle_rect_hit};
use super::entity::{Brick, DropItem, ItemKind, Projectile};
use super::progression;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::{floor_u32, shot_velocity};

/// Cosmetic spin per frame for whirlwind shots (radians)
const WHIRLWIND_SPIN: f32 = 0.3;
/// Background shake added by a shockwave
const SHOCKWAVE_SHAKE: f32 = 6.0;

mod palette {
    use crate::sim::entity::Rgb;

    pub const WHITE: Rgb = 0xffffff;
    pub const YELLOW: Rgb = 0xffff00;
    pub const GOLD: Rgb = 0xffd700;
    pub const RED: Rgb = 0xff4444;
    pub const BRICK_DEBRIS: Rgb = 0xff6b6b;
    pub const SHIELD: Rgb = 0x4169e1;
    pub const ITEM: Rgb = 0x00ff00;
    pub const LIGHTNING: Rgb = 0x7df9ff;
    pub const SLOW_TIME: Rgb = 0x00d4ff;
}

/// Score and experience for destroying a brick at `level`
pub fn brick_reward(level: u32) -> (u64, u32) {
    let level = level as f32;
    (
        floor_u32(10.0 * (1.0 + level * 0.5)) as u64,
        floor_u32(10.0 + level * 2.0),
    )
}

/// Score and experience for defeating a boss at `level`
pub fn boss_reward(level: u32) -> (u64, u32) {
    let level = level as f32;
    (
        floor_u32(500.0 * (1.0 + level * 0.5)) as u64,
        floor_u32(100.0 + level * 10.0),
    )
}

fn roll_crit(rng: &mut Pcg32, chance: f32) -> bool {
    chance > 0.0 && rng.random::<f32>() < chance
}

/// Spawn one volley of `multi_shot` projectiles fanned around vertical.
///
/// Shots beyond the projectile cap are dropped. Returns how many were fired.
pub fn fire(state: &mut GameState) -> usize {
    let count = state.stats.multi_shot;
    let ball = state.stats.ball_type;
    let damage = state.stats.damage.floor();
    let radius = if state.stats.whirlwind {
        ball.radius() + state.tuning.whirlwind_radius_bonus
    } else {
        ball.radius()
    };
    let origin = state.shooter_pos();
    let center = (count as f32 - 1.0) / 2.0;

    let mut fired = 0;
    for i in 0..count {
        if state.pools.projectiles.len() >= state.tuning.max_projectiles {
            break;
        }
        let angle = (i as f32 - center) * SHOT_SPREAD;
        state.pools.projectiles.push(Projectile {
            pos: origin,
            vel: shot_velocity(angle, ball.speed()),
            radius,
            damage,
            ball_type: ball,
            rotation: 0.0,
        });
        fired += 1;
    }
    fired
}

/// Move every projectile and resolve its first contact
pub fn resolve_projectiles(state: &mut GameState, now_ms: f64) {
    let (width, height) = (state.width, state.height);
    let spin = state.stats.whirlwind;

    let mut i = 0;
    while i < state.pools.projectiles.len() {
        // A level-up mid-frame pauses the rest of the volley
        if state.phase != GamePhase::Playing {
            break;
        }

        let shot = {
            let p = &mut state.pools.projectiles[i];
            p.pos += p.vel;
            if spin {
                p.rotation += WHIRLWIND_SPIN;
            }
            *p
        };

        if shot.pos.x < 0.0 || shot.pos.x > width || shot.pos.y < 0.0 || shot.pos.y > height {
            state.pools.projectiles.remove(i);
            continue;
        }

        let hits_boss = state
            .pools
            .boss
            .as_ref()
            .is_some_and(|boss| circle_rect_hit(shot.circle(), boss.rect()));
        if hits_boss {
            state.pools.projectiles.remove(i);
            strike_boss(state, &shot, now_ms);
            continue;
        }

        // Newest brick first
        let target = state
            .pools
            .bricks
            .iter()
            .rposition(|brick| circle_rect_hit(shot.circle(), brick.rect()));
        if let Some(j) = target {
            state.pools.projectiles.remove(i);
            strike_brick(state, j, &shot, now_ms);
            continue;
        }

        i += 1;
    }
}

fn crit_feedback(state: &mut GameState, at: Vec2, now_ms: f64) {
    state.fx.trigger_crit();
    state.burst(at, palette::YELLOW, 30);
    state.float_text("CRIT!", at - Vec2::new(0.0, 20.0), palette::YELLOW, 24.0, 1000.0, now_ms);
}

fn strike_boss(state: &mut GameState, shot: &Projectile, now_ms: f64) {
    let crit = roll_crit(&mut state.rng, state.stats.crit_chance);
    let damage = shot.damage.floor() * if crit { state.stats.crit_multiplier } else { 1.0 };

    if crit {
        crit_feedback(state, shot.pos, now_ms);
    } else {
        state.burst(shot.pos, palette::RED, 15);
    }

    let Some(boss) = state.pools.boss.as_mut() else {
        return;
    };
    let hit = boss.take_damage(damage);
    let dead = boss.is_dead();

    match hit {
        BossHit::Absorbed { .. } => {
            state.burst(shot.pos, palette::SHIELD, 8);
            return;
        }
        BossHit::Damaged {
            shield_damage,
            hull_damage,
        } => {
            if shield_damage > 0.0 {
                state.burst(shot.pos, palette::SHIELD, 10);
            }
            if hull_damage > 0.0 {
                state.float_text(
                    format!("-{}", hull_damage.ceil()),
                    shot.pos + Vec2::new(20.0, 0.0),
                    palette::RED,
                    18.0,
                    800.0,
                    now_ms,
                );
            }
        }
    }

    if dead {
        defeat_boss(state, now_ms);
    }
}

fn defeat_boss(state: &mut GameState, now_ms: f64) {
    let Some(boss) = state.pools.boss.take() else {
        return;
    };
    let (score, exp) = boss_reward(state.progression.level);
    state.score += score;

    let center = boss.center();
    state.float_text(
        format!("+{score}"),
        Vec2::new(center.x, boss.pos.y),
        palette::GOLD,
        24.0,
        1200.0,
        now_ms,
    );
    state.burst(center, palette::YELLOW, 50);
    state
        .fx
        .push_toast("VICTORY", format!("{} defeated!", boss.kind.name()), now_ms);
    state.events.push(GameEvent::BossDefeated {
        kind: boss.kind,
        score,
    });
    log::info!("{} defeated (+{score})", boss.kind.name());

    progression::award_exp(state, exp, now_ms);
}

fn strike_brick(state: &mut GameState, index: usize, shot: &Projectile, now_ms: f64) {
    let crit = roll_crit(&mut state.rng, state.stats.crit_chance);
    let damage = shot.damage * if crit { state.stats.crit_multiplier } else { 1.0 };

    let brick = &mut state.pools.bricks[index];
    brick.hp -= damage;
    let center = brick.center();
    let destroyed = brick.hp <= 0.0;

    state.burst(shot.pos, if crit { palette::YELLOW } else { palette::WHITE }, 10);

    if crit {
        crit_feedback(state, shot.pos, now_ms);
        if state.stats.chain_lightning {
            let chain_damage = state.stats.damage * CHAIN_DAMAGE_FACTOR;
            let struck = chain_lightning(&mut state.pools.bricks, index, center, chain_damage);
            if struck > 0 {
                state.burst(center, palette::LIGHTNING, 12);
                state.float_text("CHAIN", center, palette::LIGHTNING, 16.0, 600.0, now_ms);
            }
        }
    }

    if destroyed {
        let brick = state.pools.bricks.remove(index);
        destroy_brick(state, brick, now_ms);
    }
}

/// Reward, release any carried item, then apply splash and shockwave
fn destroy_brick(state: &mut GameState, brick: Brick, now_ms: f64) {
    let (score, exp) = brick_reward(state.progression.level);
    state.score += score;

    let center = brick.center();
    state.float_text(
        format!("+{score}"),
        Vec2::new(center.x, brick.pos.y),
        palette::GOLD,
        16.0,
        800.0,
        now_ms,
    );

    if let Some(kind) = brick.item {
        let drift = (state.rng.random::<f32>() - 0.5) * 2.0;
        state.pools.drop_items.push(DropItem {
            pos: center,
            vel: Vec2::new(drift, -2.0),
            radius: ITEM_RADIUS,
            hp: state.tuning.item_hp,
            kind,
        });
        state.burst(center, palette::ITEM, 15);
    }

    if state.stats.explosion_radius > 0.0 {
        splash(
            &mut state.pools.bricks,
            center,
            state.stats.explosion_radius,
            state.stats.damage * SPLASH_DAMAGE_FACTOR,
        );
    }

    if state.stats.shockwave {
        shockwave(
            &mut state.pools.bricks,
            center,
            state.tuning.shockwave_radius,
            state.tuning.shockwave_push,
        );
        state.fx.trigger_shockwave(SHOCKWAVE_SHAKE);
    }

    state.burst(center, palette::BRICK_DEBRIS, 20);
    state.events.push(GameEvent::BrickDestroyed {
        pos: center,
        item: brick.item,
    });

    progression::award_exp(state, exp, now_ms);
}

/// Damage every brick whose center lies within `radius` of `center`.
///
/// Bricks pushed to zero hp stay in the pool until a projectile resolves
/// against them.
pub fn splash(bricks: &mut [Brick], center: Vec2, radius: f32, damage: f32) -> usize {
    let mut hit = 0;
    for brick in bricks.iter_mut() {
        if brick.center().distance(center) <= radius {
            brick.hp -= damage;
            hit += 1;
        }
    }
    hit
}

/// Arc `damage` to every brick other than `source` within chain range
pub fn chain_lightning(bricks: &mut [Brick], source: usize, center: Vec2, damage: f32) -> usize {
    let mut struck = 0;
    for (i, brick) in bricks.iter_mut().enumerate() {
        if i != source && brick.center().distance(center) <= CHAIN_RADIUS {
            brick.hp -= damage;
            struck += 1;
        }
    }
    struck
}

/// Shove bricks near `center` back up the screen
pub fn shockwave(bricks: &mut [Brick], center: Vec2, radius: f32, push: f32) -> usize {
    let mut moved = 0;
    for brick in bricks.iter_mut() {
        if brick.center().distance(center) <= radius {
            brick.pos.y -= push;
            moved += 1;
        }
    }
    moved
}

/// Fall, take projectile hits, get collected or fall off the bottom
pub fn update_drop_items(state: &mut GameState, now_ms: f64) {
    let mut i = 0;
    while i < state.pools.drop_items.len() {
        let item = &mut state.pools.drop_items[i];
        item.pos += item.vel;
        item.vel.y = (item.vel.y + ITEM_GRAVITY).min(ITEM_MAX_FALL_SPEED);
        let circle = item.circle();

        let contact = state
            .pools
            .projectiles
            .iter()
            .position(|p| circle_circle_hit(p.circle(), circle));
        if let Some(j) = contact {
            state.pools.projectiles.remove(j);
            let item = &mut state.pools.drop_items[i];
            item.hp = item.hp.saturating_sub(1);
            let (pos, spent) = (item.pos, item.hp == 0);
            state.burst(pos, palette::YELLOW, 10);
            if spent {
                let item = state.pools.drop_items.remove(i);
                collect_item(state, item.kind, now_ms);
                continue;
            }
        }

        if state.pools.drop_items[i].pos.y > state.height {
            state.pools.drop_items.remove(i);
            continue;
        }
        i += 1;
    }
}

/// Apply a collected item's effect
pub fn collect_item(state: &mut GameState, kind: ItemKind, now_ms: f64) {
    match kind {
        ItemKind::SlowTime => {
            state.slow_time_end_ms = now_ms + state.tuning.slow_time_duration_ms;
            state.burst(state.shooter_pos(), palette::SLOW_TIME, 15);
        }
    }
    state.fx.push_toast("ITEM", kind.label(), now_ms);
    state.events.push(GameEvent::ItemCollected { kind });
    log::debug!("Collected {:?}", kind);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::boss::{Boss, BossKind, BossPattern};
    use crate::sim::entity::BallType;

    fn playing_state() -> GameState {
        let mut state = GameState::new(42, 800.0, 600.0);
        state.restart(0.0);
        state
    }

    fn brick_at(x: f32, y: f32, hp: f32) -> Brick {
        Brick {
            pos: Vec2::new(x, y),
            size: Vec2::new(80.0, 40.0),
            hp,
            max_hp: hp.max(10.0),
            speed: 1.2,
            item: None,
        }
    }

    /// A shot one frame below the brick's bottom edge, travelling up into it
    fn shot_into(brick: &Brick, damage: f32) -> Projectile {
        let c = brick.center();
        Projectile {
            pos: Vec2::new(c.x, brick.pos.y + brick.size.y + 10.0),
            vel: Vec2::new(0.0, -15.0),
            radius: 8.0,
            damage,
            ball_type: BallType::Normal,
            rotation: 0.0,
        }
    }

    #[test]
    fn test_rewards_scale_with_level() {
        assert_eq!(brick_reward(1), (15, 12));
        assert_eq!(brick_reward(3), (25, 16));
        assert_eq!(boss_reward(10), (3000, 200));
    }

    #[test]
    fn test_two_hits_destroy_brick() {
        let mut state = playing_state();
        let brick = Brick {
            max_hp: 10.0,
            ..brick_at(300.0, 200.0, 5.0)
        };
        state.pools.bricks.push(brick.clone());

        state.pools.projectiles.push(shot_into(&brick, 3.0));
        resolve_projectiles(&mut state, 0.0);
        assert_eq!(state.pools.bricks.len(), 1);
        assert_eq!(state.pools.bricks[0].hp, 2.0);
        assert!(state.pools.projectiles.is_empty());
        assert_eq!(state.score, 0);

        let brick = state.pools.bricks[0].clone();
        state.pools.projectiles.push(shot_into(&brick, 3.0));
        resolve_projectiles(&mut state, 16.0);
        assert!(state.pools.bricks.is_empty());
        let (score, exp) = brick_reward(1);
        assert_eq!(state.score, score);
        assert_eq!(state.progression.exp, exp as u64);
        assert!(
            state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::BrickDestroyed { .. }))
        );
    }

    #[test]
    fn test_projectile_consumed_even_if_penetrating() {
        let mut state = playing_state();
        let front = brick_at(300.0, 200.0, 100.0);
        let back = brick_at(300.0, 100.0, 100.0);
        state.pools.bricks.push(front.clone());
        state.pools.bricks.push(back);
        let mut shot = shot_into(&front, 1.0);
        shot.ball_type = BallType::Bowling;
        state.pools.projectiles.push(shot);

        for frame in 0..20 {
            resolve_projectiles(&mut state, frame as f64 * 16.0);
        }
        assert!(state.pools.projectiles.is_empty());
        assert_eq!(state.pools.bricks[0].hp, 99.0);
        assert_eq!(state.pools.bricks[1].hp, 100.0);
    }

    #[test]
    fn test_projectiles_culled_out_of_bounds() {
        let mut state = playing_state();
        state.pools.projectiles.push(Projectile {
            pos: Vec2::new(400.0, 5.0),
            vel: Vec2::new(0.0, -15.0),
            radius: 8.0,
            damage: 1.0,
            ball_type: BallType::Normal,
            rotation: 0.0,
        });
        resolve_projectiles(&mut state, 0.0);
        assert!(state.pools.projectiles.is_empty());
    }

    #[test]
    fn test_shield_boss_takes_remainder() {
        let mut state = playing_state();
        let mut boss = Boss::new(BossKind::Shield, 30, 800.0, 0.0);
        boss.pattern = BossPattern::Shield {
            shield_hp: 10.0,
            max_shield_hp: 135.0,
        };
        let hp = boss.hp;
        let c = boss.center();
        state.pools.boss = Some(boss);
        state.pools.projectiles.push(Projectile {
            pos: Vec2::new(c.x, 160.0),
            vel: Vec2::new(0.0, -15.0),
            radius: 8.0,
            damage: 15.0,
            ball_type: BallType::Normal,
            rotation: 0.0,
        });

        resolve_projectiles(&mut state, 0.0);
        let boss = state.pools.boss.as_ref().unwrap();
        assert_eq!(boss.shield_hp(), 0.0);
        assert_eq!(boss.hp, hp - 5.0);
        assert!(state.pools.projectiles.is_empty());
    }

    #[test]
    fn test_boss_defeat_pays_out_and_ends_stage() {
        let mut state = playing_state();
        let mut boss = Boss::new(BossKind::Tank, 10, 800.0, 0.0);
        boss.hp = 1.0;
        let c = boss.center();
        state.pools.boss = Some(boss);
        state.progression.level = 10;
        state.progression.exp_to_level_up = 10_000;
        state.pools.projectiles.push(Projectile {
            pos: Vec2::new(c.x, 160.0),
            vel: Vec2::new(0.0, -15.0),
            radius: 8.0,
            damage: 1.0,
            ball_type: BallType::Normal,
            rotation: 0.0,
        });

        resolve_projectiles(&mut state, 0.0);
        assert!(!state.is_boss_stage());
        assert_eq!(state.score, 3000);
        assert_eq!(state.progression.exp, 200);
        assert!(
            state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::BossDefeated { kind: BossKind::Tank, .. }))
        );
    }

    #[test]
    fn test_multishot_fans_symmetrically() {
        let mut state = playing_state();
        state.stats.multi_shot = 3;
        assert_eq!(fire(&mut state), 3);

        let angles: Vec<f32> = state
            .pools
            .projectiles
            .iter()
            .map(|p| (p.vel.x / SHOT_SPEED_X).asin())
            .collect();
        assert!((angles[0] + 0.3).abs() < 1e-5);
        assert!(angles[1].abs() < 1e-6);
        assert!((angles[2] - 0.3).abs() < 1e-5);
        assert!(state.pools.projectiles.iter().all(|p| p.vel.y < 0.0));
        assert_eq!(state.pools.projectiles[0].pos, state.shooter_pos());
    }

    #[test]
    fn test_fire_uses_ball_type() {
        let mut state = playing_state();
        state.stats.ball_type = BallType::PingPong;
        state.stats.damage = 3.7;
        fire(&mut state);
        let p = &state.pools.projectiles[0];
        assert_eq!(p.radius, 6.0);
        assert_eq!(p.damage, 3.0);
        assert!((p.vel.y + 15.0 * 1.4).abs() < 1e-4);
    }

    #[test]
    fn test_fire_respects_projectile_cap() {
        let mut state = playing_state();
        state.stats.multi_shot = 5;
        state.tuning.max_projectiles = 7;
        assert_eq!(fire(&mut state), 5);
        assert_eq!(fire(&mut state), 2);
        assert_eq!(fire(&mut state), 0);
        assert_eq!(state.pools.projectiles.len(), 7);
    }

    #[test]
    fn test_splash_does_not_cascade() {
        let mut state = playing_state();
        state.stats.explosion_radius = 200.0;
        state.stats.damage = 4.0;
        let target = brick_at(300.0, 200.0, 1.0);
        state.pools.bricks.push(target.clone());
        state.pools.bricks.push(brick_at(390.0, 200.0, 2.0));
        state.pools.projectiles.push(shot_into(&target, 4.0));

        resolve_projectiles(&mut state, 0.0);
        // Neighbour took 2 splash damage and sits at 0 hp, still present
        assert_eq!(state.pools.bricks.len(), 1);
        assert_eq!(state.pools.bricks[0].hp, 0.0);
    }

    #[test]
    fn test_chain_lightning_on_crit() {
        let mut state = playing_state();
        state.stats.crit_chance = 1.0;
        state.stats.chain_lightning = true;
        state.stats.damage = 5.0;
        let target = brick_at(300.0, 200.0, 100.0);
        state.pools.bricks.push(target.clone());
        state.pools.bricks.push(brick_at(400.0, 200.0, 100.0));
        state.pools.bricks.push(brick_at(700.0, 200.0, 100.0));
        state.pools.projectiles.push(shot_into(&target, 5.0));

        resolve_projectiles(&mut state, 0.0);
        assert_eq!(state.pools.bricks[0].hp, 90.0);
        assert_eq!(state.pools.bricks[1].hp, 96.0);
        assert_eq!(state.pools.bricks[2].hp, 100.0);
        assert!(state.fx.screen_flash > 0.0);
    }

    #[test]
    fn test_chain_lightning_fires_when_crit_kills_target() {
        let mut state = playing_state();
        state.stats.crit_chance = 1.0;
        state.stats.chain_lightning = true;
        state.stats.damage = 5.0;
        let target = brick_at(300.0, 200.0, 1.0);
        state.pools.bricks.push(target.clone());
        state.pools.bricks.push(brick_at(400.0, 200.0, 100.0));
        state.pools.projectiles.push(shot_into(&target, 5.0));

        resolve_projectiles(&mut state, 0.0);
        let hps: Vec<f32> = state.pools.bricks.iter().map(|b| b.hp).collect();
        assert_eq!(hps, vec![96.0]);
    }

    #[test]
    fn test_overlapping_shot_hits_newest_brick() {
        let mut state = playing_state();
        let older = brick_at(300.0, 200.0, 10.0);
        state.pools.bricks.push(older.clone());
        state.pools.bricks.push(brick_at(320.0, 200.0, 10.0));
        state.pools.projectiles.push(shot_into(&older, 1.0));

        resolve_projectiles(&mut state, 0.0);
        assert_eq!(state.pools.bricks[0].hp, 10.0);
        assert_eq!(state.pools.bricks[1].hp, 9.0);
    }

    #[test]
    fn test_kill_with_shockwave_shoves_neighbours() {
        let mut state = playing_state();
        state.stats.shockwave = true;
        let target = brick_at(300.0, 200.0, 1.0);
        state.pools.bricks.push(target.clone());
        state.pools.bricks.push(brick_at(400.0, 200.0, 10.0));
        state.pools.bricks.push(brick_at(700.0, 200.0, 10.0));
        state.pools.projectiles.push(shot_into(&target, 1.0));

        resolve_projectiles(&mut state, 0.0);
        assert_eq!(state.pools.bricks.len(), 2);
        assert_eq!(state.pools.bricks[0].pos.y, 170.0);
        assert_eq!(state.pools.bricks[1].pos.y, 200.0);
        assert_eq!(state.fx.background_shake, 6.0);
    }

    #[test]
    fn test_whirlwind_grows_and_spins_shots() {
        let mut state = playing_state();
        state.stats.whirlwind = true;
        fire(&mut state);
        assert_eq!(state.pools.projectiles[0].radius, 11.0);

        resolve_projectiles(&mut state, 0.0);
        resolve_projectiles(&mut state, 16.0);
        let p = &state.pools.projectiles[0];
        assert!((p.rotation - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_shots_do_not_spin_without_whirlwind() {
        let mut state = playing_state();
        fire(&mut state);
        assert_eq!(state.pools.projectiles[0].radius, 8.0);
        resolve_projectiles(&mut state, 0.0);
        assert_eq!(state.pools.projectiles[0].rotation, 0.0);
    }

    #[test]
    fn test_shockwave_pushes_neighbours() {
        let mut bricks = vec![brick_at(300.0, 200.0, 1.0), brick_at(600.0, 200.0, 1.0)];
        let moved = shockwave(&mut bricks, Vec2::new(340.0, 240.0), 120.0, 30.0);
        assert_eq!(moved, 1);
        assert_eq!(bricks[0].pos.y, 170.0);
        assert_eq!(bricks[1].pos.y, 200.0);
    }

    #[test]
    fn test_carried_item_drops_and_is_collected() {
        let mut state = playing_state();
        let brick = Brick {
            item: Some(ItemKind::SlowTime),
            ..brick_at(300.0, 200.0, 1.0)
        };
        state.pools.bricks.push(brick.clone());
        state.pools.projectiles.push(shot_into(&brick, 1.0));
        resolve_projectiles(&mut state, 0.0);
        assert_eq!(state.pools.drop_items.len(), 1);

        let hp = state.tuning.item_hp;
        for n in 0..hp {
            let pos = state.pools.drop_items[0].pos;
            state.pools.projectiles.push(Projectile {
                pos,
                vel: Vec2::ZERO,
                radius: 8.0,
                damage: 1.0,
                ball_type: BallType::Normal,
                rotation: 0.0,
            });
            update_drop_items(&mut state, 100.0 + n as f64);
        }
        assert!(state.pools.drop_items.is_empty());
        assert!(state.pools.projectiles.is_empty());
        assert_eq!(state.slow_time_end_ms, 100.0 + (hp - 1) as f64 + 5000.0);
    }

    #[test]
    fn test_drop_items_fall_off_bottom() {
        let mut state = playing_state();
        state.pools.drop_items.push(DropItem {
            pos: Vec2::new(100.0, 598.0),
            vel: Vec2::new(0.0, 5.0),
            radius: ITEM_RADIUS,
            hp: 2,
            kind: ItemKind::SlowTime,
        });
        update_drop_items(&mut state, 0.0);
        assert!(state.pools.drop_items.is_empty());
    }
}
