//! Eating Simulator - a reflex arcade minigame
//!
//! Core modules:
//! - `sim`: Deterministic session simulation (spawning, swings, scoring, timers)
//! - `renderer`: Scene-to-shapes conversion plus the Canvas 2D backend
//! - `platform`: Browser/native platform abstraction (storage)
//! - `poll`: Trivia vote poll persisted in LocalStorage
//! - `tuning`: Data-driven game balance

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod platform;
pub mod poll;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use poll::{Verdict, VotePoll};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed animation step (60 Hz, the refresh rate target speeds are tuned for)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Maximum frame steps per display refresh to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Canvas dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Height of the grass strip at the bottom of the field
    pub const GRASS_HEIGHT: f32 = 50.0;
}
