//! Uzy core crate.
//!
//! A particle vignette for the browser: an ambient swarm links up on the menu,
//! scatters on start, and a single protagonist spark descends to follow the
//! cursor while its vitality drains and it talks to the player. The simulation
//! (`session` and below) is plain Rust and tested natively; `web` and `canvas`
//! bind it to the DOM.

use std::cell::Cell;

use wasm_bindgen::prelude::*;

pub mod canvas;
pub mod config;
pub mod dialogue;
pub mod emotion;
pub mod error;
pub mod field;
pub mod logging;
pub mod particle;
pub mod render;
pub mod script;
pub mod session;
pub mod timer;
pub mod vitality;
mod web;

pub use config::{ParticleConfig, SessionTiming};
pub use dialogue::{DialogueMachine, DialogueState, Typewriter};
pub use emotion::EmotionState;
pub use error::{Result, UzyError};
pub use render::{DrawOp, Recording, Rgba, Surface};
pub use script::{Choice, DIALOGUE_SEQUENCE, DialogueEntry};
pub use session::{Phase, Session};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

thread_local! {
    static LOG_LEVEL: Cell<tracing::Level> = const { Cell::new(tracing::Level::INFO) };
    static LOGGING: Cell<bool> = const { Cell::new(false) };
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn ensure_logging() {
    if LOGGING.replace(true) {
        return;
    }
    if let Err(err) = logging::init(LOG_LEVEL.get()) {
        // another subscriber got there first; keep using it
        web_sys::console::warn_1(&JsValue::from_str(&err.to_string()));
    }
}

// -----------------------------------------------------------------------------
// Exported entrypoints
// -----------------------------------------------------------------------------

/// Mount the canvas and overlays and start the frame loop. Restarts a running session.
#[wasm_bindgen]
pub fn start_session() -> std::result::Result<(), JsValue> {
    ensure_logging();
    web::mount(ParticleConfig::default())?;
    Ok(())
}

/// Same as pressing the start button. Returns whether the menu was left.
#[wasm_bindgen]
pub fn begin() -> std::result::Result<bool, JsValue> {
    Ok(web::begin()?)
}

#[wasm_bindgen]
pub fn select_choice(index: usize) -> std::result::Result<bool, JsValue> {
    Ok(web::select_choice(index)?)
}

/// Apply a JSON particle config (camelCase keys, missing keys default).
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn configure(json: &str) -> std::result::Result<(), JsValue> {
    let config = ParticleConfig::from_json(json)?;
    web::reconfigure(config)?;
    Ok(())
}

#[wasm_bindgen]
pub fn stop_session() -> std::result::Result<(), JsValue> {
    web::unmount()?;
    Ok(())
}

/// Set the console log level. Takes effect if called before the first `start_session`.
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> bool {
    match logging::parse_level(level) {
        Some(level) => {
            LOG_LEVEL.set(level);
            true
        }
        None => false,
    }
}
