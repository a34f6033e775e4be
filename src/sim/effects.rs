//! Visual-effect timers
//!
//! Overlay state that decays every frame and never feeds back into gameplay.
//! Flash, shake and pulse decay by a fixed amount per frame (not scaled by
//! frame time); floating texts and toasts expire by wall-clock duration.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{FloatingText, Particle, Rgb};

pub const FLASH_DECAY: f32 = 0.05;
pub const SHAKE_DECAY: f32 = 0.5;
pub const PULSE_DECAY: f32 = 0.02;

/// Toast lifetime (ms)
pub const TOAST_DURATION_MS: f64 = 1500.0;
/// Toasts kept on screen at once
pub const MAX_TOASTS: usize = 3;

/// Short labelled banner (LEVEL UP, BOSS, item pickups)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toast {
    pub label: String,
    pub message: String,
    pub start_ms: f64,
    pub duration_ms: f64,
}

/// Time-decayed overlay state read by the renderer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisualEffects {
    /// Crit flash intensity (0-0.3)
    pub screen_flash: f32,
    /// Background shake amplitude in pixels
    pub background_shake: f32,
    /// Camera offset derived from the shake
    pub background_offset: Vec2,
    /// Level-up pulse (1 → 0)
    pub level_up_pulse: f32,
    pub toasts: Vec<Toast>,
}

impl VisualEffects {
    /// Per-frame decay plus toast expiry
    pub fn update(&mut self, rng: &mut Pcg32, now_ms: f64) {
        if self.screen_flash > 0.0 {
            self.screen_flash -= FLASH_DECAY;
        }

        if self.background_shake > 0.0 {
            self.background_shake -= SHAKE_DECAY;
            self.background_offset = Vec2::new(
                (rng.random::<f32>() - 0.5) * self.background_shake,
                (rng.random::<f32>() - 0.5) * self.background_shake,
            );
        } else {
            self.background_offset = Vec2::ZERO;
        }

        if self.level_up_pulse > 0.0 {
            self.level_up_pulse -= PULSE_DECAY;
        }

        self.toasts
            .retain(|toast| now_ms - toast.start_ms < toast.duration_ms);
    }

    pub fn trigger_crit(&mut self) {
        self.screen_flash = 0.3;
        self.background_shake = 10.0;
    }

    pub fn trigger_level_up(&mut self) {
        self.level_up_pulse = 1.0;
    }

    pub fn trigger_shockwave(&mut self, shake: f32) {
        self.background_shake = self.background_shake.max(shake);
    }

    /// Queue a toast, dropping the oldest beyond [`MAX_TOASTS`]
    pub fn push_toast(&mut self, label: impl Into<String>, message: impl Into<String>, now_ms: f64) {
        self.toasts.push(Toast {
            label: label.into(),
            message: message.into(),
            start_ms: now_ms,
            duration_ms: TOAST_DURATION_MS,
        });
        if self.toasts.len() > MAX_TOASTS {
            self.toasts.remove(0);
        }
    }

    pub fn clear_toasts(&mut self) {
        self.toasts.clear();
    }
}

/// Spray `count` sparks from `pos`, keeping at most `cap` alive
pub fn burst(
    particles: &mut Vec<Particle>,
    rng: &mut Pcg32,
    pos: Vec2,
    color: Rgb,
    count: usize,
    cap: usize,
) {
    if cap == 0 {
        return;
    }
    for _ in 0..count {
        if particles.len() >= cap {
            // Remove oldest particles to make room
            particles.remove(0);
        }
        let angle = rng.random::<f32>() * std::f32::consts::TAU;
        let speed = 2.0 + rng.random::<f32>() * 3.0;
        particles.push(Particle {
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            radius: 2.0 + rng.random::<f32>() * 3.0,
            color,
            life: 0.5 + rng.random::<f32>() * 0.5,
        });
    }
}

/// Move particles one frame and age them by the frame's elapsed time
pub fn update_particles(particles: &mut Vec<Particle>, dt_ms: f32) {
    for p in particles.iter_mut() {
        p.pos += p.vel;
        p.life -= dt_ms / 1000.0;
    }
    particles.retain(|p| p.life > 0.0);
}

pub fn expire_floating_texts(texts: &mut Vec<FloatingText>, now_ms: f64) {
    texts.retain(|t| !t.expired(now_ms));
}
