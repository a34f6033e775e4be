//! Brick Barrage entry point
//!
//! On the web the library's wasm bridge is the entry point and the page drives
//! the frame loop. Natively this runs a headless seeded autoplay session and
//! prints the run summary as JSON.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Brick Barrage (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(1);
    let max_frames = args.next().and_then(|s| s.parse().ok()).unwrap_or(60 * 60 * 10);

    let state = autoplay::run(seed, max_frames);
    match serde_json::to_string_pretty(&state.run_snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize run summary: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::init, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod autoplay {
    use brick_barrage::sim::{GamePhase, GameState, TickInput, tick};

    const FRAME_MS: f32 = 1000.0 / 60.0;
    const WIDTH: f32 = 800.0;
    const HEIGHT: f32 = 600.0;

    /// Play until game over or `max_frames`, on a simulated 60 Hz clock
    pub fn run(seed: u64, max_frames: u32) -> GameState {
        let mut state = GameState::new(seed, WIDTH, HEIGHT);
        let mut now = 0.0;

        for frame in 0..max_frames {
            now += FRAME_MS as f64;
            let input = TickInput {
                start: frame == 0,
                shooter_x: target_x(&state),
                choose_card: pick_card(&state, now),
                ..Default::default()
            };
            tick(&mut state, &input, now, FRAME_MS);

            for event in state.drain_events() {
                log::debug!("{:?}", event);
            }
            if state.phase == GamePhase::GameOver {
                log::info!("Autoplay finished after {frame} frames");
                break;
            }
        }
        state
    }

    /// Track the boss, otherwise the lowest brick
    fn target_x(state: &GameState) -> Option<f32> {
        if let Some(boss) = &state.pools.boss {
            return Some(boss.center().x);
        }
        state
            .pools
            .bricks
            .iter()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|b| b.center().x)
    }

    /// Recommended card (or the first) once the cards accept a pick
    fn pick_card(state: &GameState, now_ms: f64) -> Option<usize> {
        let offer = state.offer.as_ref()?;
        if !offer.selectable(now_ms) {
            return None;
        }
        Some(offer.cards.iter().position(|c| c.recommended).unwrap_or(0))
    }
}
