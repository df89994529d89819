//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time is passed in, never read from a clock
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod judge;
pub mod limiter;
pub mod mode;
pub mod schedule;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;

pub use judge::{Hit, HitEffect, check_hit, hit_effect};
pub use limiter::{LimiterVerdict, SwingLimiter};
pub use mode::{DifficultyTier, GameMode, target_speed, tier_for_time};
pub use schedule::{Scheduler, TimerKind};
pub use session::{Session, SwingOutcome};
pub use spawn::{roll_food_kind, spawn_target};
pub use state::{
    FoodKind, GameEvent, GameState, Hud, Rect, SessionSummary, Striker, Target, TimeDisplay,
};
pub use tick::{TickInput, tick};
