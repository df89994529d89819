//! Game state and core simulation types
//!
//! Everything the presentation layer needs to draw a frame lives here.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::mode::{DifficultyTier, GameMode};
use crate::tuning::{StrikerLayout, Tuning};

/// What a target looks like and how it scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FoodKind {
    #[default]
    Pizza,
    Burger,
    Donut,
    /// Adds time in timed modes
    Clock,
    /// Rare bonus item
    GoldenBurger,
    /// Batting practice target
    Baseball,
}

impl FoodKind {
    /// The uniformly chosen everyday foods
    pub const BASE: [FoodKind; 3] = [FoodKind::Pizza, FoodKind::Burger, FoodKind::Donut];

    /// Display radius, also used to size the drawn item
    pub fn radius(&self) -> f32 {
        match self {
            FoodKind::Pizza => 14.0,
            FoodKind::Burger => 16.0,
            FoodKind::Donut => 13.0,
            FoodKind::Clock => 15.0,
            FoodKind::GoldenBurger => 18.0,
            FoodKind::Baseball => 10.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FoodKind::Pizza => "pizza",
            FoodKind::Burger => "burger",
            FoodKind::Donut => "donut",
            FoodKind::Clock => "clock",
            FoodKind::GoldenBurger => "golden burger",
            FoodKind::Baseball => "baseball",
        }
    }
}

/// The single incoming item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    /// x is the distance to the player's side of the field
    pub pos: Vec2,
    pub kind: FoodKind,
    /// Pixels per frame
    pub speed: f32,
    pub active: bool,
}

impl Default for Target {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            kind: FoodKind::default(),
            speed: 0.0,
            active: false,
        }
    }
}

/// Axis-aligned rectangle, bounds inclusive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Striker {
    /// Body rectangle
    pub body: Rect,
    /// Region the target must be in for a swing to connect
    pub zone: Rect,
    pub swinging: bool,
    /// Degrees, 0 when idle
    pub swing_angle: f32,
}

impl Striker {
    pub fn from_layout(layout: &StrikerLayout) -> Self {
        let body = Rect::new(layout.x, layout.y, layout.width, layout.height);
        let zone = Rect::new(
            layout.x + layout.width - layout.zone_inset,
            layout.y - layout.zone_pad,
            layout.zone_reach,
            layout.height + layout.zone_pad * 2.0,
        );
        Self {
            body,
            zone,
            swinging: false,
            swing_angle: 0.0,
        }
    }

    /// Enter the swing animation; false if one is already running
    pub fn begin_swing(&mut self) -> bool {
        if self.swinging {
            return false;
        }
        self.swinging = true;
        self.swing_angle = 0.0;
        true
    }

    /// Step the swing animation by one frame
    pub fn advance_swing(&mut self, step_deg: f32, end_deg: f32) {
        if !self.swinging {
            return;
        }
        self.swing_angle += step_deg;
        if self.swing_angle >= end_deg {
            self.swinging = false;
            self.swing_angle = 0.0;
        }
    }
}

/// Remaining time as shown in the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeDisplay {
    Seconds(u32),
    Unbounded,
}

impl fmt::Display for TimeDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeDisplay::Seconds(s) => write!(f, "{}", s),
            TimeDisplay::Unbounded => write!(f, "∞"),
        }
    }
}

/// Values the HUD shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub score: i64,
    pub time: TimeDisplay,
}

/// Final result reported when a session ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub mode: GameMode,
    pub score: i64,
    pub misses: u32,
}

impl SessionSummary {
    pub fn mode_name(&self) -> &'static str {
        self.mode.name()
    }
}

/// Notifications for the presentation layer, drained after each update
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    SessionStarted(GameMode),
    /// Score or remaining time changed
    HudChanged(Hud),
    Spawned(FoodKind),
    /// Successful hit; play the eat sound
    Eat(FoodKind),
    Missed { misses: u32 },
    /// Spam penalty applied
    Penalty { amount: i64 },
    /// Infinite mode speed level increased
    SpeedUp { level: u32 },
    SessionEnded(SessionSummary),
    /// Player left through the exit button
    SessionQuit,
}

/// Complete per-session game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub mode: GameMode,
    pub active: bool,
    pub score: i64,
    /// None for untimed modes
    pub time_remaining: Option<u32>,
    pub tier: DifficultyTier,
    /// Infinite mode only, starts at 1
    pub speed_level: u32,
    /// Clock ticks seen this session
    pub elapsed_secs: u32,
    /// Infinite mode only
    pub miss_count: u32,
    pub target: Target,
    pub striker: Striker,
    /// Red overlay visible until this time (ms)
    pub penalty_flash_until: f64,
    /// Yellow overlay visible until this time (ms)
    pub speed_up_flash_until: f64,
}

impl GameState {
    /// Fresh, active state for a new session
    pub fn new(mode: GameMode, tuning: &Tuning) -> Self {
        Self {
            mode,
            active: true,
            score: 0,
            time_remaining: mode.is_timed().then_some(tuning.session_secs),
            tier: DifficultyTier::Normal,
            speed_level: 1,
            elapsed_secs: 0,
            miss_count: 0,
            target: Target::default(),
            striker: Striker::from_layout(&tuning.striker),
            penalty_flash_until: 0.0,
            speed_up_flash_until: 0.0,
        }
    }

    /// Placeholder state shown behind the start screen
    pub fn idle(tuning: &Tuning) -> Self {
        let mut state = Self::new(GameMode::default(), tuning);
        state.active = false;
        state
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score,
            time: match self.time_remaining {
                Some(s) => TimeDisplay::Seconds(s),
                None => TimeDisplay::Unbounded,
            },
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            mode: self.mode,
            score: self.score,
            misses: self.miss_count,
        }
    }

    /// Target currently inside the strike zone
    pub fn target_in_zone(&self) -> bool {
        self.target.active && self.striker.zone.contains(self.target.pos)
    }
}
