//! Browser bridge
//!
//! The presentation layer owns the canvas, the DOM and the animation-frame
//! loop. It drives a [`WasmGame`] each frame and draws from the JSON snapshot.

use wasm_bindgen::prelude::*;

use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, TickInput, tick};
use crate::tuning::Tuning;

/// Install the panic hook and route `log` to the browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Already initialised by an earlier module instance
        return;
    }
    log::info!("Brick Barrage starting...");
}

/// Game handle owned by the page
#[wasm_bindgen]
pub struct WasmGame {
    state: GameState,
    input: TickInput,
    last_frame_ms: f64,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a game on the start screen. `tuning_json` and `settings_json`
    /// may be empty for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, tuning_json: &str, settings_json: &str) -> WasmGame {
        let seed = js_sys::Date::now() as u64;
        let tuning = if tuning_json.is_empty() {
            Tuning::default()
        } else {
            Tuning::from_json_or_default(tuning_json)
        };
        let settings = if settings_json.is_empty() {
            Settings::default()
        } else {
            Settings::from_json(settings_json).unwrap_or_else(|e| {
                log::warn!("Invalid settings, using defaults: {e}");
                Settings::default()
            })
        };
        log::info!("Game initialized with seed: {}", seed);

        WasmGame {
            state: GameState::with_config(seed, width, height, tuning, settings),
            input: TickInput::default(),
            last_frame_ms: js_sys::Date::now(),
        }
    }

    pub fn start(&mut self) {
        self.input.start = true;
    }

    pub fn restart(&mut self) {
        self.input.restart = true;
    }

    /// Pointer move, in canvas pixels
    pub fn set_shooter_x(&mut self, x: f32) {
        self.input.shooter_x = Some(x);
    }

    pub fn choose_upgrade(&mut self, index: usize) {
        self.input.choose_card = Some(index);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    /// Advance one animation frame using the browser clock
    pub fn update(&mut self) {
        let now = js_sys::Date::now();
        let dt = (now - self.last_frame_ms).max(0.0) as f32;
        self.last_frame_ms = now;

        let input = std::mem::take(&mut self.input);
        tick(&mut self.state, &input, now, dt);
    }

    pub fn is_game_over(&self) -> bool {
        self.state.phase == GamePhase::GameOver
    }

    /// Frame snapshot as JSON
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state.frame_snapshot(js_sys::Date::now()))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Events since the last call, as a JSON array
    pub fn drain_events_json(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state.drain_events())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
