//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time fed into the simulation
//! - The JS-facing game handle (wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Milliseconds on a monotonic clock
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static EPOCH: OnceLock<Instant> = OnceLock::new();
    EPOCH.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

/// Milliseconds since the Unix epoch, from the browser
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}
