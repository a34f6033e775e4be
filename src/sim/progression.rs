//! Experience, level-ups and the upgrade draw
//!
//! Upgrades are a closed set. Each one has a fixed effect on [`PlayerStats`]
//! and a static table of synergy partners. Synergy never changes an effect's
//! magnitude: it only feeds the displayed bonus and the recommendation score.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawner;
use super::state::{GameEvent, GamePhase, GameState, PlayerStats};

/// Score bonus for an upgrade never picked before
const UNOWNED_SCORE: f32 = 2.0;
/// Score per prior pick of each synergy partner
const PARTNER_SCORE: f32 = 1.5;
/// Random cards per draw
const CARDS_PER_DRAW: usize = 2;

/// Experience needed to leave `level`: `floor(100 * 1.2^(level-1))`.
///
/// Strictly increasing up to level 219; from level 220 the value saturates at
/// `u64::MAX`.
pub fn exp_to_level_up(level: u32) -> u64 {
    let exponent = level.saturating_sub(1).min(i32::MAX as u32) as i32;
    (100.0 * 1.2f64.powi(exponent)).floor() as u64
}

/// Every upgrade a card can offer, in pool order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UpgradeId {
    Damage,
    FireRate,
    MultiShot,
    Explosion,
    CritChance,
    CritMultiplier,
    ChainLightning,
    SlowField,
    DeflectShield,
    Whirlwind,
    Shockwave,
    BallSwap,
}

impl UpgradeId {
    pub const ALL: [UpgradeId; 12] = [
        UpgradeId::Damage,
        UpgradeId::FireRate,
        UpgradeId::MultiShot,
        UpgradeId::Explosion,
        UpgradeId::CritChance,
        UpgradeId::CritMultiplier,
        UpgradeId::ChainLightning,
        UpgradeId::SlowField,
        UpgradeId::DeflectShield,
        UpgradeId::Whirlwind,
        UpgradeId::Shockwave,
        UpgradeId::BallSwap,
    ];

    pub fn title(self) -> &'static str {
        match self {
            UpgradeId::Damage => "Damage Up",
            UpgradeId::FireRate => "Fire Rate",
            UpgradeId::MultiShot => "Multi Shot",
            UpgradeId::Explosion => "Explosion Radius",
            UpgradeId::CritChance => "Critical",
            UpgradeId::CritMultiplier => "Critical Power",
            UpgradeId::ChainLightning => "Chain Lightning",
            UpgradeId::SlowField => "Slow Field",
            UpgradeId::DeflectShield => "Deflect Shield",
            UpgradeId::Whirlwind => "Whirlwind",
            UpgradeId::Shockwave => "Shockwave",
            UpgradeId::BallSwap => "Ball Swap",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            UpgradeId::Damage => "+2 damage",
            UpgradeId::FireRate => "+0.5 shots per second",
            UpgradeId::MultiShot => "+1 simultaneous shot",
            UpgradeId::Explosion => "+50 explosion radius",
            UpgradeId::CritChance => "+15% critical chance",
            UpgradeId::CritMultiplier => "+0.5x critical damage",
            UpgradeId::ChainLightning => "Crits arc to nearby bricks",
            UpgradeId::SlowField => "Bricks fall 15% slower",
            UpgradeId::DeflectShield => "Blocks one brick from breaching",
            UpgradeId::Whirlwind => "Spinning, wider shots",
            UpgradeId::Shockwave => "Kills shove nearby bricks back",
            UpgradeId::BallSwap => "Switch to the next ball type",
        }
    }

    /// Partners whose prior picks boost this upgrade, with per-pick bonus
    pub fn synergies(self) -> &'static [(UpgradeId, f32)] {
        use UpgradeId::*;
        match self {
            Damage => &[(CritChance, 0.05)],
            FireRate => &[(MultiShot, 0.15)],
            MultiShot => &[(Damage, 0.2), (Explosion, 0.1)],
            Explosion => &[(Damage, 0.15)],
            CritChance => &[(Damage, 0.1)],
            CritMultiplier => &[(CritChance, 0.2), (Damage, 0.05)],
            ChainLightning => &[(CritChance, 0.25)],
            SlowField => &[(Explosion, 0.1)],
            DeflectShield => &[(SlowField, 0.2)],
            Whirlwind => &[(MultiShot, 0.1), (FireRate, 0.1)],
            Shockwave => &[(Explosion, 0.2)],
            BallSwap => &[],
        }
    }

    /// One-time unlocks leave the pool once owned
    pub fn is_unlock(self) -> bool {
        matches!(
            self,
            UpgradeId::ChainLightning
                | UpgradeId::DeflectShield
                | UpgradeId::Whirlwind
                | UpgradeId::Shockwave
        )
    }

    /// Apply the fixed effect of this upgrade
    pub fn apply(self, stats: &mut PlayerStats) {
        match self {
            UpgradeId::Damage => stats.damage += 2.0,
            UpgradeId::FireRate => stats.fire_rate += 0.5,
            UpgradeId::MultiShot => stats.multi_shot += 1,
            UpgradeId::Explosion => stats.explosion_radius += 50.0,
            UpgradeId::CritChance => stats.crit_chance = (stats.crit_chance + 0.15).min(1.0),
            UpgradeId::CritMultiplier => stats.crit_multiplier += 0.5,
            UpgradeId::ChainLightning => stats.chain_lightning = true,
            UpgradeId::SlowField => {
                stats.slow_field = (stats.slow_field * 0.85).max(PlayerStats::SLOW_FIELD_FLOOR)
            }
            UpgradeId::DeflectShield => {
                stats.deflect_shield = true;
                stats.deflect_active = true;
            }
            UpgradeId::Whirlwind => stats.whirlwind = true,
            UpgradeId::Shockwave => stats.shockwave = true,
            UpgradeId::BallSwap => stats.ball_type = stats.ball_type.next(),
        }
    }
}

/// Times each upgrade has been chosen this run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeHistory {
    counts: BTreeMap<UpgradeId, u32>,
}

impl UpgradeHistory {
    pub fn count(&self, id: UpgradeId) -> u32 {
        self.counts.get(&id).copied().unwrap_or(0)
    }

    pub fn record(&mut self, id: UpgradeId) {
        *self.counts.entry(id).or_insert(0) += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (UpgradeId, u32)> + '_ {
        self.counts.iter().map(|(&id, &n)| (id, n))
    }
}

/// Displayed synergy: sum of partner bonus × partner picks
pub fn synergy_bonus(id: UpgradeId, history: &UpgradeHistory) -> f32 {
    id.synergies()
        .iter()
        .map(|&(partner, bonus)| bonus * history.count(partner) as f32)
        .sum()
}

/// Recommendation score: 1, +2 if never picked, +1.5 per pick of each partner
pub fn recommendation_score(id: UpgradeId, history: &UpgradeHistory) -> f32 {
    let mut score = 1.0;
    if history.count(id) == 0 {
        score += UNOWNED_SCORE;
    }
    for &(partner, _) in id.synergies() {
        score += history.count(partner) as f32 * PARTNER_SCORE;
    }
    score
}

/// Highest-scoring upgrade in `pool`; ties go to the earliest entry
pub fn recommend(pool: &[UpgradeId], history: &UpgradeHistory) -> Option<UpgradeId> {
    let mut best: Option<(UpgradeId, f32)> = None;
    for &id in pool {
        let score = recommendation_score(id, history);
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((id, score));
        }
    }
    best.map(|(id, _)| id)
}

/// Upgrades currently offerable for these stats, in pool order
pub fn available_pool(stats: &PlayerStats, history: &UpgradeHistory) -> Vec<UpgradeId> {
    UpgradeId::ALL
        .iter()
        .copied()
        .filter(|id| !(id.is_unlock() && (history.count(*id) > 0 || stats.has_unlock(*id))))
        .collect()
}

/// A card on the stage-clear screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpgradeCard {
    pub id: UpgradeId,
    pub title: &'static str,
    pub description: &'static str,
    /// Informational synergy bonus (0.15 = "+15%")
    pub synergy_bonus: f32,
    pub recommended: bool,
}

impl UpgradeCard {
    fn new(id: UpgradeId, history: &UpgradeHistory, recommended: Option<UpgradeId>) -> Self {
        Self {
            id,
            title: id.title(),
            description: id.description(),
            synergy_bonus: synergy_bonus(id, history),
            recommended: recommended == Some(id),
        }
    }
}

/// Pending stage-clear choice with its reveal/unlock schedule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpgradeOffer {
    pub cards: Vec<UpgradeCard>,
    /// When the cards appear
    pub reveal_at_ms: f64,
    /// When the cards accept a pick
    pub selectable_at_ms: f64,
}

impl UpgradeOffer {
    pub fn revealed(&self, now_ms: f64) -> bool {
        now_ms >= self.reveal_at_ms
    }

    pub fn selectable(&self, now_ms: f64) -> bool {
        now_ms >= self.selectable_at_ms
    }

    pub fn recommended(&self) -> Option<UpgradeId> {
        self.cards.iter().find(|c| c.recommended).map(|c| c.id)
    }
}

/// Draw two random cards; the recommended upgrade replaces the first one
/// unless it was already drawn.
pub fn draw_offer(
    stats: &PlayerStats,
    history: &UpgradeHistory,
    rng: &mut Pcg32,
    reveal_at_ms: f64,
    selectable_at_ms: f64,
) -> UpgradeOffer {
    let pool = available_pool(stats, history);
    let recommended = recommend(&pool, history);

    let mut shuffled = pool.clone();
    shuffled.shuffle(rng);
    let mut picks: Vec<UpgradeId> = shuffled.into_iter().take(CARDS_PER_DRAW).collect();

    if let Some(best) = recommended
        && !picks.contains(&best)
        && let Some(first) = picks.first_mut()
    {
        *first = best;
    }

    UpgradeOffer {
        cards: picks
            .into_iter()
            .map(|id| UpgradeCard::new(id, history, recommended))
            .collect(),
        reveal_at_ms,
        selectable_at_ms,
    }
}

/// Level, experience and the pick history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    pub level: u32,
    pub exp: u64,
    pub exp_to_level_up: u64,
    pub history: UpgradeHistory,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            level: 1,
            exp: 0,
            exp_to_level_up: exp_to_level_up(1),
            history: UpgradeHistory::default(),
        }
    }
}

impl Progression {
    /// Add experience; true if the threshold is now met
    pub fn gain_exp(&mut self, amount: u32) -> bool {
        self.exp = self.exp.saturating_add(amount as u64);
        self.exp >= self.exp_to_level_up
    }

    /// Advance one level, resetting experience. Returns the new level.
    pub fn level_up(&mut self) -> u32 {
        self.level += 1;
        self.exp = 0;
        self.exp_to_level_up = exp_to_level_up(self.level);
        self.level
    }

    /// Fill ratio of the experience bar
    pub fn exp_ratio(&self) -> f32 {
        if self.exp_to_level_up == 0 {
            return 1.0;
        }
        (self.exp as f32 / self.exp_to_level_up as f32).min(1.0)
    }
}

/// Credit experience and level up once if the threshold is met
pub fn award_exp(state: &mut GameState, amount: u32, now_ms: f64) {
    if state.progression.gain_exp(amount) {
        level_up(state, now_ms);
    }
}

/// Advance a level, then either bring in the boss or open the card choice.
///
/// A boss level that arrives while the previous boss is still alive falls
/// through to a regular stage clear.
pub fn level_up(state: &mut GameState, now_ms: f64) {
    let level = state.progression.level_up();
    state.fx.trigger_level_up();
    state.fx.push_toast("LEVEL UP", format!("Lv. {level}"), now_ms);
    state.spawner.escalate(&state.tuning);
    state.events.push(GameEvent::LevelUp { level });
    log::info!("Level up: {level}");

    if let Some(boss) = spawner::boss_for_level(level, state.width, now_ms) {
        if state.pools.boss.is_none() {
            state.fx.clear_toasts();
            state
                .fx
                .push_toast("BOSS", format!("{} approaches", boss.kind.name()), now_ms);
            state.events.push(GameEvent::BossSpawned {
                kind: boss.kind,
                level,
            });
            log::info!("{} spawned at level {level}", boss.kind.name());
            state.pools.boss = Some(boss);
            state.spawner.reset_timer(now_ms);
            return;
        }
        log::warn!("Boss for level {level} skipped: previous boss still alive");
    }

    let reveal_at = now_ms + state.tuning.card_reveal_delay_ms;
    let selectable_at = reveal_at + state.tuning.card_unlock_delay_ms;
    state.offer = Some(draw_offer(
        &state.stats,
        &state.progression.history,
        &mut state.rng,
        reveal_at,
        selectable_at,
    ));
    state.phase = GamePhase::StageClear;
}
