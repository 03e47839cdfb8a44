//! Love Maze core crate.
//!
//! A random maze is carved on every start and the player steers a small disc
//! from the top-left cell to the heart in the bottom-right cell with an
//! on-screen joystick. The model (`maze`, `geometry`, `input`, `motion`,
//! `session`) is plain Rust and runs natively under `cargo test`; `web` is the
//! thin canvas/DOM adapter driven from JS.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod logger;
pub mod maze;
pub mod motion;
pub mod render;
pub mod session;
mod web;

pub use config::{GameConfig, JoystickConfig};
pub use error::ConfigError;
pub use render::{FrameView, RenderSink};
pub use session::{GameSession, Goal, Layout, Round, WIN_MESSAGE};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
}

// -----------------------------------------------------------------------------
// JS entrypoints
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::launch(GameConfig::default())
}

/// Starts with a JSON config; missing fields keep their defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let config: GameConfig =
        serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    web::launch(config)
}

#[wasm_bindgen]
pub fn restart_game() {
    web::restart();
}

#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn maze_layout_json() -> Result<String, JsValue> {
    web::layout_json()
}
