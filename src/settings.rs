//! Player preferences
//!
//! Persisted separately from everything else in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::platform::storage;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Input ===
    /// `KeyboardEvent.code` of the swing key
    pub swing_key: String,

    // === Audio ===
    pub sound: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,

    // === Accessibility ===
    /// Reduced motion (no penalty / speed-up flashes)
    pub reduced_motion: bool,

    // === Debug ===
    /// Outline the strike zone
    pub show_strike_zone: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            swing_key: "Space".to_string(),
            sound: true,
            master_volume: 0.8,
            reduced_motion: false,
            show_strike_zone: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "eating_sim_settings";

    /// Volume actually applied to sounds
    pub fn effective_volume(&self) -> f32 {
        if self.sound {
            self.master_volume.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Whether full-screen flashes should be drawn
    pub fn flashes_enabled(&self) -> bool {
        !self.reduced_motion
    }

    pub fn is_swing_key(&self, code: &str) -> bool {
        self.swing_key == code
    }

    /// Bind the swing to another key. Escape cancels a rebind and is refused.
    pub fn rebind_swing(&mut self, code: &str) -> bool {
        if code.is_empty() || code == "Escape" {
            return false;
        }
        self.swing_key = code.to_string();
        true
    }

    /// Flip sound on/off, returning the new state
    pub fn toggle_sound(&mut self) -> bool {
        self.sound = !self.sound;
        self.sound
    }

    pub fn toggle_reduced_motion(&mut self) -> bool {
        self.reduced_motion = !self.reduced_motion;
        self.reduced_motion
    }

    pub fn toggle_strike_zone(&mut self) -> bool {
        self.show_strike_zone = !self.show_strike_zone;
        self.show_strike_zone
    }

    /// Load settings (defaults when absent or unreadable)
    pub fn load() -> Self {
        match storage::load_json::<Settings>(Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings from LocalStorage");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        if storage::save_json(Self::STORAGE_KEY, self) {
            log::info!("Settings saved");
        }
    }
}
