//! JS-facing handle for hosts that bring their own rendering.
//!
//! The only inbound operations are `start`, `reset`, `catch_cupid` and `tick`
//! (time delivery); everything else is read-only.

use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::game::{CupidId, Game};

#[wasm_bindgen]
pub struct CupidGame {
    inner: Game,
}

#[wasm_bindgen]
impl CupidGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> CupidGame {
        CupidGame { inner: Game::new(GameConfig::default()) }
    }

    pub fn start(&mut self) {
        self.inner.start();
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    pub fn catch_cupid(&mut self, id: CupidId) {
        self.inner.catch(id);
    }

    /// Deliver time, normally a `requestAnimationFrame` / `performance.now()`
    /// timestamp in milliseconds.
    pub fn tick(&mut self, now_ms: f64) {
        if let Some(ms) = host_millis(now_ms) {
            self.inner.advance_to(ms);
        }
    }

    pub fn score(&self) -> u32 {
        self.inner.score()
    }

    pub fn lives(&self) -> u32 {
        self.inner.lives()
    }

    pub fn max_lives(&self) -> u32 {
        self.inner.config().initial_lives
    }

    pub fn high_score(&self) -> u32 {
        self.inner.high_score()
    }

    pub fn is_new_record(&self) -> bool {
        self.inner.is_new_record()
    }

    pub fn phase(&self) -> String {
        self.inner.phase().as_str().to_string()
    }

    pub fn cupid_count(&self) -> usize {
        self.inner.cupids().len()
    }
}

#[cfg(feature = "serde_json")]
#[wasm_bindgen]
impl CupidGame {
    /// Build from a (possibly partial) JSON config, e.g. `{"initial_lives": 5}`.
    pub fn with_config(json: &str) -> Result<CupidGame, JsValue> {
        let config: GameConfig = serde_json::from_str(json)
            .map_err(|e| JsValue::from_str(&format!("invalid config: {e}")))?;
        Ok(CupidGame { inner: Game::new(config) })
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.inner.snapshot()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Default for CupidGame {
    fn default() -> Self {
        Self::new()
    }
}

/// Browser timestamps are fractional and may be NaN before the first frame.
pub(crate) fn host_millis(now_ms: f64) -> Option<u64> {
    if now_ms.is_finite() && now_ms >= 0.0 { Some(now_ms as u64) } else { None }
}
