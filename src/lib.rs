//! Cat Catch core crate.
//!
//! Cats pop up one at a time on a 3x3 board; tap them before they duck away
//! to score, until the 30 second countdown runs out. Game rules live in
//! [`game`] and run on a virtual clock ([`scheduler`]) so they work (and are
//! tested) without a browser. [`dom`] binds them to the page.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod dom;
pub mod error;
pub mod game;
pub mod logger;
pub mod scheduler;

pub use config::GameConfig;
pub use error::UiError;
pub use game::{GameController, GameEvent, GameState, InputSource, SlotState};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // Only fails if a logger is already installed.
    let _ = logger::init();
}

// -----------------------------------------------------------------------------
// JS entrypoints
// -----------------------------------------------------------------------------

/// Wire the game to the page (building the board if the page has none).
#[wasm_bindgen]
pub fn mount_game() -> Result<(), JsValue> {
    dom::mount()?;
    Ok(())
}

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    dom::mount()?;
    dom::with_game(|g| g.start());
    Ok(())
}

#[wasm_bindgen]
pub fn reset_game() -> Result<(), JsValue> {
    dom::mount()?;
    dom::with_game(|g| g.reset());
    Ok(())
}

/// Current counters as JSON, e.g. `{"score":40,"time_left":12,"running":true}`.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn game_state_json() -> Result<String, JsValue> {
    let state = dom::with_game(|g| g.state())
        .ok_or_else(|| JsValue::from_str("game not mounted"))?;
    serde_json::to_string(&state).map_err(|e| JsValue::from_str(&e.to_string()))
}
