//! Game modes, difficulty tiers and the speed lookup
//!
//! Tier and speed are pure functions of state plus [`Tuning`] data so they can
//! be tested without running a session.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Ruleset chosen on the start screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GameMode {
    /// 60 second clock, speeds up at 30s and 10s
    #[default]
    Regular,
    /// No clock; speed rises every 30s, five misses end the run
    Infinite,
    /// Regular rules with a much faster speed table
    Impossible,
    /// Untimed batting practice with a single baseball target
    Batting,
}

impl GameMode {
    pub fn name(&self) -> &'static str {
        match self {
            GameMode::Regular => "Regular",
            GameMode::Infinite => "Infinite",
            GameMode::Impossible => "Impossible",
            GameMode::Batting => "Batting Practice",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "regular" => Some(GameMode::Regular),
            "infinite" => Some(GameMode::Infinite),
            "impossible" => Some(GameMode::Impossible),
            "batting" | "baseball" => Some(GameMode::Batting),
            _ => None,
        }
    }

    pub fn all() -> &'static [GameMode] {
        &[
            GameMode::Regular,
            GameMode::Infinite,
            GameMode::Impossible,
            GameMode::Batting,
        ]
    }

    /// Modes with a countdown clock
    pub fn is_timed(&self) -> bool {
        matches!(self, GameMode::Regular | GameMode::Impossible)
    }

    /// Whether the anti-spam swing limiter applies
    pub fn spam_guarded(&self) -> bool {
        !matches!(self, GameMode::Batting)
    }
}

/// Difficulty tier for timed modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DifficultyTier {
    #[default]
    Normal,
    Fast,
    SuperFast,
}

impl DifficultyTier {
    fn index(self) -> usize {
        match self {
            DifficultyTier::Normal => 0,
            DifficultyTier::Fast => 1,
            DifficultyTier::SuperFast => 2,
        }
    }
}

/// Tier for a given remaining time (Fast at or below 30s, SuperFast at or below 10s)
pub fn tier_for_time(remaining_secs: u32, tuning: &Tuning) -> DifficultyTier {
    if remaining_secs <= tuning.super_fast_at_secs {
        DifficultyTier::SuperFast
    } else if remaining_secs <= tuning.fast_at_secs {
        DifficultyTier::Fast
    } else {
        DifficultyTier::Normal
    }
}

/// Target speed for a mode at the given tier / speed level
pub fn target_speed(mode: GameMode, tier: DifficultyTier, speed_level: u32, tuning: &Tuning) -> f32 {
    let table = &tuning.speeds;
    match mode {
        GameMode::Regular => table.regular[tier.index()],
        GameMode::Impossible => table.impossible[tier.index()],
        GameMode::Infinite => {
            table.infinite_base + table.infinite_step * speed_level.saturating_sub(1) as f32
        }
        GameMode::Batting => table.batting,
    }
}
