//! Session context
//!
//! Owns the game state, swing limiter, timer queue and RNG for one player.
//! Time is always passed in explicitly, so the same calls drive the browser
//! loop and the tests.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::judge::{self, Hit};
use super::limiter::{LimiterVerdict, SwingLimiter};
use super::mode::{GameMode, tier_for_time};
use super::schedule::{Scheduler, TimerKind};
use super::spawn;
use super::state::{GameEvent, GameState, Hud, SessionSummary};
use crate::tuning::Tuning;

/// What happened to a swing request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwingOutcome {
    /// No session running
    Inactive,
    /// Locked out by a spam penalty
    CoolingDown,
    /// Too many swings; points deducted
    Penalized,
    /// Accepted, but a swing is already in progress
    AlreadySwinging,
    /// New swing started; `hit` is the result of the immediate check
    Swung { hit: Option<Hit> },
}

pub struct Session {
    state: GameState,
    tuning: Tuning,
    limiter: SwingLimiter,
    scheduler: Scheduler,
    rng: Pcg32,
    /// Bumped whenever a session starts or ends; stamps every timer
    generation: u32,
    now_ms: f64,
    events: Vec<GameEvent>,
}

impl Session {
    /// Create an idle session (start screen)
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self {
            state: GameState::idle(&tuning),
            tuning,
            limiter: SwingLimiter::new(),
            scheduler: Scheduler::new(),
            rng: Pcg32::seed_from_u64(seed),
            generation: 0,
            now_ms: 0.0,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    pub fn hud(&self) -> Hud {
        self.state.hud()
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Begin a new session, replacing any running one
    pub fn start_session(&mut self, mode: GameMode, now_ms: f64) {
        if self.state.active {
            log::info!("Restarting while a {} session is running", self.state.mode.name());
        }
        self.teardown();
        self.now_ms = self.now_ms.max(now_ms);

        self.state = GameState::new(mode, &self.tuning);
        self.limiter = SwingLimiter::new();
        if mode != GameMode::Batting {
            self.scheduler.schedule(
                self.now_ms + self.tuning.clock_tick_ms,
                TimerKind::ClockTick,
                self.generation,
            );
        }

        log::info!("Session started: {}", mode.name());
        self.events.push(GameEvent::SessionStarted(mode));
        self.events.push(GameEvent::HudChanged(self.state.hud()));
        self.spawn_target();
    }

    /// Finish the session and report the result. None if nothing was running.
    pub fn end_session(&mut self) -> Option<SessionSummary> {
        if !self.state.active {
            return None;
        }
        self.state.active = false;
        self.teardown();

        let summary = self.state.summary();
        log::info!(
            "Game over ({}): final score {}",
            summary.mode_name(),
            summary.score
        );
        self.events.push(GameEvent::SessionEnded(summary.clone()));
        Some(summary)
    }

    /// Leave without a game-over report (exit button)
    pub fn quit(&mut self) -> bool {
        if !self.state.active {
            return false;
        }
        self.state.active = false;
        self.teardown();
        log::info!("Session quit");
        self.events.push(GameEvent::SessionQuit);
        true
    }

    /// Cancel the clock and invalidate every outstanding one-shot timer
    fn teardown(&mut self) {
        self.scheduler.cancel(TimerKind::ClockTick);
        self.generation = self.generation.wrapping_add(1);
    }

    /// Player pressed the swing key
    pub fn swing(&mut self, now_ms: f64) -> SwingOutcome {
        self.advance_to(now_ms);
        if !self.state.active {
            return SwingOutcome::Inactive;
        }

        if self.state.mode.spam_guarded() {
            match self.limiter.register(self.now_ms, &self.tuning.spam) {
                LimiterVerdict::CoolingDown => return SwingOutcome::CoolingDown,
                LimiterVerdict::Penalized => {
                    let penalty = self.tuning.spam.penalty;
                    self.state.score -= penalty;
                    self.state.penalty_flash_until = self.now_ms + self.tuning.penalty_flash_ms;
                    log::info!("Swing spam penalty: -{}", penalty);
                    self.events.push(GameEvent::Penalty { amount: penalty });
                    self.events.push(GameEvent::HudChanged(self.state.hud()));
                    return SwingOutcome::Penalized;
                }
                LimiterVerdict::Allowed => {}
            }
        }

        if !self.state.striker.begin_swing() {
            return SwingOutcome::AlreadySwinging;
        }

        let hit = self.check_hit();
        if self.state.mode != GameMode::Batting {
            for &delay in &self.tuning.hit_check_delays_ms {
                self.scheduler
                    .schedule(self.now_ms + delay, TimerKind::HitCheck, self.generation);
            }
        }
        SwingOutcome::Swung { hit }
    }

    /// Judge the active target against the strike zone
    pub fn check_hit(&mut self) -> Option<Hit> {
        if !self.state.active {
            return None;
        }
        let hit = judge::check_hit(&mut self.state, &self.tuning)?;
        log::debug!("Hit {} ({:?})", hit.kind.name(), hit.effect);
        self.events.push(GameEvent::Eat(hit.kind));
        self.events.push(GameEvent::HudChanged(self.state.hud()));
        self.schedule_next_spawn();
        Some(hit)
    }

    /// Bring in a new target now. False while inactive.
    pub fn spawn_target(&mut self) -> bool {
        let spawned = spawn::spawn_target(&mut self.state, &self.tuning, &mut self.rng);
        if spawned {
            self.events.push(GameEvent::Spawned(self.state.target.kind));
        }
        spawned
    }

    fn schedule_next_spawn(&mut self) {
        self.scheduler
            .schedule_spawn(self.now_ms + self.tuning.spawn_delay_ms, self.generation);
    }

    /// Fire every timer due at or before `now_ms`, in due order
    pub fn advance_to(&mut self, now_ms: f64) {
        while let Some(timer) = self.scheduler.pop_due(now_ms) {
            self.now_ms = self.now_ms.max(timer.due_ms);
            if timer.generation != self.generation || !self.state.active {
                log::debug!("Dropping stale {:?} timer", timer.kind);
                continue;
            }
            match timer.kind {
                TimerKind::ClockTick => self.on_clock_tick(timer.due_ms),
                TimerKind::Spawn => {
                    self.spawn_target();
                }
                TimerKind::HitCheck => {
                    self.check_hit();
                }
            }
        }
        self.now_ms = self.now_ms.max(now_ms);
    }

    fn on_clock_tick(&mut self, due_ms: f64) {
        self.state.elapsed_secs += 1;

        if let Some(remaining) = self.state.time_remaining.as_mut() {
            *remaining = remaining.saturating_sub(1);
            let remaining = *remaining;
            self.state.tier = tier_for_time(remaining, &self.tuning);
            self.events.push(GameEvent::HudChanged(self.state.hud()));
            if remaining == 0 {
                self.end_session();
                return;
            }
        } else if self.state.mode == GameMode::Infinite
            && self.state.elapsed_secs % self.tuning.speed_up_every_secs.max(1) == 0
        {
            self.state.speed_level += 1;
            self.state.speed_up_flash_until = due_ms + self.tuning.speed_up_flash_ms;
            log::info!("Speed up! Level {}", self.state.speed_level);
            self.events.push(GameEvent::SpeedUp {
                level: self.state.speed_level,
            });
        }

        self.scheduler.schedule(
            due_ms + self.tuning.clock_tick_ms,
            TimerKind::ClockTick,
            self.generation,
        );
    }

    /// Advance one animation frame: move the target, then the swing
    pub fn frame(&mut self) {
        if !self.state.active {
            return;
        }

        if judge::advance_target(&mut self.state) {
            self.on_target_missed();
            if !self.state.active {
                return;
            }
        }

        let step = if self.state.mode == GameMode::Batting {
            self.tuning.batting_swing_step_deg
        } else {
            self.tuning.swing_step_deg
        };
        self.state
            .striker
            .advance_swing(step, self.tuning.swing_end_deg);
    }

    fn on_target_missed(&mut self) {
        if self.state.mode == GameMode::Infinite {
            self.state.miss_count += 1;
            log::debug!("Missed food ({} total)", self.state.miss_count);
            self.events.push(GameEvent::Missed {
                misses: self.state.miss_count,
            });
            if self.state.miss_count >= self.tuning.miss_limit {
                self.end_session();
                return;
            }
        } else {
            self.events.push(GameEvent::Missed { misses: 0 });
        }
        self.schedule_next_spawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::mode::DifficultyTier;
    use crate::sim::state::FoodKind;
    use glam::Vec2;

    fn session() -> Session {
        Session::new(Tuning::default(), 42)
    }

    /// Park the current target inside the strike zone
    fn place_in_zone(s: &mut Session, kind: FoodKind) {
        s.state.target.pos = Vec2::new(200.0, s.tuning.striker.lane_y);
        s.state.target.kind = kind;
        s.state.target.active = true;
    }

    fn clock_ticks_pending(s: &Session) -> usize {
        let mut probe = s.scheduler.clone();
        let mut n = 0;
        while let Some(t) = probe.pop_due(f64::MAX) {
            if t.kind == TimerKind::ClockTick {
                n += 1;
            }
        }
        n
    }

    #[test]
    fn test_start_spawns_and_installs_clock() {
        let mut s = session();
        s.start_session(GameMode::Regular, 0.0);
        assert!(s.is_active());
        assert_eq!(s.state().score, 0);
        assert!(s.state().target.active);
        assert_eq!(s.state().target.speed, 6.0);
        assert_eq!(clock_ticks_pending(&s), 1);

        let events = s.drain_events();
        assert_eq!(events[0], GameEvent::SessionStarted(GameMode::Regular));
        assert!(matches!(events.last(), Some(GameEvent::Spawned(_))));
    }

    #[test]
    fn test_restart_does_not_duplicate_clock() {
        let mut s = session();
        s.start_session(GameMode::Regular, 0.0);
        s.advance_to(500.0);
        s.start_session(GameMode::Impossible, 500.0);
        assert_eq!(clock_ticks_pending(&s), 1);

        s.advance_to(1500.0);
        assert_eq!(s.state().time_remaining, Some(59));
        assert_eq!(s.state().mode, GameMode::Impossible);
    }

    #[test]
    fn test_hit_schedules_single_respawn() {
        let mut s = session();
        s.start_session(GameMode::Regular, 0.0);
        place_in_zone(&mut s, FoodKind::Burger);

        let outcome = s.swing(100.0);
        assert!(matches!(outcome, SwingOutcome::Swung { hit: Some(_) }));
        assert_eq!(s.state().score, 10);
        assert!(!s.state().target.active);

        // Follow-up hit checks find nothing to hit
        s.advance_to(250.0);
        assert_eq!(s.state().score, 10);

        s.advance_to(1599.0);
        assert!(!s.state().target.active);
        s.advance_to(1600.0);
        assert!(s.state().target.active);
        assert_eq!(s.state().target.pos.x, 800.0);
    }

    #[test]
    fn test_delayed_hit_check_catches_target() {
        let mut s = session();
        s.start_session(GameMode::Regular, 0.0);
        // Just outside the zone, moving 6px per frame
        s.state.target.pos = Vec2::new(256.0, s.tuning.striker.lane_y);
        s.state.target.kind = FoodKind::Donut;

        assert_eq!(s.swing(0.0), SwingOutcome::Swung { hit: None });
        s.frame();
        s.frame();
        s.frame();
        assert_eq!(s.state().target.pos.x, 238.0);
        s.advance_to(50.0);
        assert_eq!(s.state().score, 10);
        assert!(!s.state().target.active);
    }

    #[test]
    fn test_swing_while_swinging_does_not_recheck() {
        let mut s = session();
        s.start_session(GameMode::Regular, 0.0);
        assert!(matches!(s.swing(0.0), SwingOutcome::Swung { .. }));
        place_in_zone(&mut s, FoodKind::Pizza);
        assert_eq!(s.swing(10.0), SwingOutcome::AlreadySwinging);
        // The queued follow-up checks still fire
        s.advance_to(50.0);
        assert_eq!(s.state().score, 10);
    }

    #[test]
    fn test_swing_inactive() {
        let mut s = session();
        assert_eq!(s.swing(0.0), SwingOutcome::Inactive);
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn test_clock_hit_moves_tier_back() {
        let mut s = session();
        s.start_session(GameMode::Regular, 0.0);
        s.advance_to(52_000.0);
        assert_eq!(s.state().time_remaining, Some(8));
        assert_eq!(s.state().tier, DifficultyTier::SuperFast);

        place_in_zone(&mut s, FoodKind::Clock);
        s.swing(52_000.0);
        assert_eq!(s.state().time_remaining, Some(18));
        assert_eq!(s.state().tier, DifficultyTier::Fast);
        assert_eq!(s.hud().time.to_string(), "18");
    }

    #[test]
    fn test_timeout_ends_session_and_drops_timers() {
        let mut s = session();
        s.start_session(GameMode::Regular, 0.0);
        place_in_zone(&mut s, FoodKind::Pizza);
        s.swing(59_950.0);
        s.advance_to(60_000.0);
        assert!(!s.is_active());

        let events = s.drain_events();
        let summary = events.iter().find_map(|e| match e {
            GameEvent::SessionEnded(summary) => Some(summary.clone()),
            _ => None,
        });
        assert_eq!(
            summary,
            Some(SessionSummary {
                mode: GameMode::Regular,
                score: 10,
                misses: 0
            })
        );

        // Respawn and hit-check timers from the dead session do nothing
        s.advance_to(120_000.0);
        assert!(s.drain_events().is_empty());
        assert!(!s.state().target.active);
        assert_eq!(s.end_session(), None);
    }

    #[test]
    fn test_stale_spawn_does_not_leak_into_new_session() {
        let mut s = session();
        s.start_session(GameMode::Regular, 0.0);
        place_in_zone(&mut s, FoodKind::Pizza);
        s.swing(0.0);
        // Spawn pending at 1500; replace the session before it fires
        s.start_session(GameMode::Infinite, 1000.0);
        let first_target = s.state().target.clone();
        s.drain_events();

        s.advance_to(1600.0);
        assert!(
            !s.drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::Spawned(_)))
        );
        assert_eq!(s.state().target.pos, first_target.pos);
    }

    #[test]
    fn test_quit_reports_no_summary() {
        let mut s = session();
        s.start_session(GameMode::Infinite, 0.0);
        s.drain_events();
        assert!(s.quit());
        assert_eq!(s.drain_events(), vec![GameEvent::SessionQuit]);
        assert!(!s.quit());
        assert_eq!(clock_ticks_pending(&s), 0);
    }

    #[test]
    fn test_infinite_speed_level_every_30_ticks() {
        let mut s = session();
        s.start_session(GameMode::Infinite, 0.0);
        s.advance_to(29_999.0);
        assert_eq!(s.state().speed_level, 1);
        s.advance_to(30_000.0);
        assert_eq!(s.state().speed_level, 2);
        assert_eq!(s.state().speed_up_flash_until, 30_500.0);
        s.advance_to(89_999.0);
        assert_eq!(s.state().speed_level, 3);
        s.advance_to(90_000.0);
        assert_eq!(s.state().speed_level, 4);

        s.spawn_target();
        assert_eq!(s.state().target.speed, 12.0);
    }

    #[test]
    fn test_batting_rules() {
        let mut s = session();
        s.start_session(GameMode::Batting, 0.0);
        assert_eq!(s.state().target.kind, FoodKind::Baseball);
        assert_eq!(s.state().target.speed, 5.0);
        assert_eq!(s.hud().time.to_string(), "∞");
        assert_eq!(clock_ticks_pending(&s), 0);

        // No spam guard: many swings are never penalised
        for i in 0..10 {
            let outcome = s.swing(i as f64);
            assert_ne!(outcome, SwingOutcome::Penalized);
            for _ in 0..9 {
                s.frame();
            }
        }
        assert_eq!(s.state().score, 0);

        place_in_zone(&mut s, FoodKind::Baseball);
        s.swing(20.0);
        assert_eq!(s.state().score, 1);
    }

    #[test]
    fn test_swing_animation_follows_frames() {
        let mut s = session();
        s.start_session(GameMode::Regular, 0.0);
        s.swing(0.0);
        s.frame();
        assert_eq!(s.state().striker.swing_angle, 15.0);
        for _ in 0..5 {
            s.frame();
        }
        assert!(!s.state().striker.swinging);
    }
}
