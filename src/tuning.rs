//! Data-driven game balance
//!
//! Every number the simulation depends on lives here so a whole ruleset can be
//! swapped (or partially overridden from JSON) without touching the sim code.

use serde::{Deserialize, Serialize};

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::platform::storage;

/// Target speed table (x decrement per frame)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedTable {
    /// Regular mode: [Normal, Fast, SuperFast]
    pub regular: [f32; 3],
    /// Impossible mode: [Normal, Fast, SuperFast]
    pub impossible: [f32; 3],
    /// Infinite mode speed at level 1
    pub infinite_base: f32,
    /// Infinite mode speed added per level
    pub infinite_step: f32,
    /// Batting practice (constant)
    pub batting: f32,
}

impl Default for SpeedTable {
    fn default() -> Self {
        Self {
            regular: [6.0, 10.0, 20.0],
            impossible: [20.0, 24.0, 30.0],
            infinite_base: 6.0,
            infinite_step: 2.0,
            batting: 5.0,
        }
    }
}

/// Anti-spam swing limiter parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpamGuard {
    pub window_ms: f64,
    /// Swings allowed inside one window before the penalty applies
    pub threshold: u32,
    pub penalty: i64,
    pub cooldown_ms: f64,
}

impl Default for SpamGuard {
    fn default() -> Self {
        Self {
            window_ms: 1000.0,
            threshold: 3,
            penalty: 50,
            cooldown_ms: 1000.0,
        }
    }
}

/// Striker placement and strike zone geometry (canvas pixels)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrikerLayout {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Zone starts this far inside the striker's right edge
    pub zone_inset: f32,
    /// Horizontal reach of the zone
    pub zone_reach: f32,
    /// Vertical padding above and below the striker body
    pub zone_pad: f32,
    /// Height at which targets travel
    pub lane_y: f32,
}

impl Default for StrikerLayout {
    fn default() -> Self {
        Self {
            x: 150.0,
            y: CANVAS_HEIGHT - 150.0,
            width: 30.0,
            height: 80.0,
            zone_inset: 10.0,
            zone_reach: 80.0,
            zone_pad: 20.0,
            lane_y: CANVAS_HEIGHT - 160.0,
        }
    }
}

/// Complete balance sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Far edge where targets spawn
    pub spawn_x: f32,
    /// Starting clock for timed modes
    pub session_secs: u32,
    pub fast_at_secs: u32,
    pub super_fast_at_secs: u32,
    pub clock_tick_ms: f64,
    pub spawn_delay_ms: f64,
    /// Extra hit checks after the immediate one, covering the swing animation
    pub hit_check_delays_ms: Vec<f64>,
    pub swing_step_deg: f32,
    pub batting_swing_step_deg: f32,
    pub swing_end_deg: f32,
    pub penalty_flash_ms: f64,
    pub speed_up_flash_ms: f64,
    /// Infinite mode: clock ticks per speed level
    pub speed_up_every_secs: u32,
    /// Infinite mode: misses that end the session
    pub miss_limit: u32,
    pub clock_bonus_secs: u32,
    pub golden_points: i64,
    pub food_points: i64,
    pub batting_points: i64,
    /// Timed modes only
    pub clock_chance: f64,
    pub golden_chance: f64,
    pub speeds: SpeedTable,
    pub spam: SpamGuard,
    pub striker: StrikerLayout,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spawn_x: CANVAS_WIDTH,
            session_secs: 60,
            fast_at_secs: 30,
            super_fast_at_secs: 10,
            clock_tick_ms: 1000.0,
            spawn_delay_ms: 1500.0,
            hit_check_delays_ms: vec![50.0, 100.0],
            swing_step_deg: 15.0,
            batting_swing_step_deg: 10.0,
            swing_end_deg: 90.0,
            penalty_flash_ms: 300.0,
            speed_up_flash_ms: 500.0,
            speed_up_every_secs: 30,
            miss_limit: 5,
            clock_bonus_secs: 10,
            golden_points: 50,
            food_points: 10,
            batting_points: 1,
            clock_chance: 0.15,
            golden_chance: 0.05,
            speeds: SpeedTable::default(),
            spam: SpamGuard::default(),
            striker: StrikerLayout::default(),
        }
    }
}

impl Tuning {
    /// LocalStorage key of the optional override
    pub const STORAGE_KEY: &'static str = "eating_sim_tuning";

    /// Defaults, or the stored override when one exists
    pub fn load() -> Self {
        Self::from_stored(storage::load_raw(Self::STORAGE_KEY).as_deref())
    }

    fn from_stored(raw: Option<&str>) -> Self {
        match raw {
            Some(json) => {
                log::info!("Applying tuning override from LocalStorage");
                Self::from_json_or_default(json)
            }
            None => Self::default(),
        }
    }

    /// Parse a (possibly partial) tuning override; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse an override, falling back to defaults on malformed input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Ignoring malformed tuning override: {}", e);
                Self::default()
            }
        }
    }
}
