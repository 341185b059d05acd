//! Cupid Catch core crate.
//!
//! A click-the-target reaction game: Cupids pop up on the field once a second
//! and fly off after two; catch one for points, miss three and the round is
//! over. The rules live in [`game`] as a host-driven state machine with no
//! browser dependencies. [`web`] is the default canvas front end and
//! [`bindings`] exposes the same machine to JS hosts that render on their own.

use wasm_bindgen::prelude::*;

pub mod bindings;
pub mod config;
pub mod game;
pub mod web;

pub use config::GameConfig;
pub use game::{Cupid, CupidId, Game, Phase, Snapshot};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    // Only fails if a logger is already installed, e.g. a second start.
    let _ = console_log::init_with_level(level);
}

// -----------------------------------------------------------------------------
// Unified entrypoint
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::start_game_mode()
}
