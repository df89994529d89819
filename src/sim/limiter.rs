//! Anti-spam swing limiter
//!
//! A fixed window opens on the first swing. More than `threshold` swings inside
//! it costs points and locks the player out for a cooldown.

use crate::tuning::SpamGuard;

/// Result of offering one swing to the limiter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimiterVerdict {
    /// Swing may proceed
    Allowed,
    /// Threshold exceeded; apply the penalty, no swing
    Penalized,
    /// Inside the cooldown; nothing happens at all
    CoolingDown,
}

#[derive(Debug, Clone, Default)]
pub struct SwingLimiter {
    window_start: Option<f64>,
    count: u32,
    cooldown_until: f64,
}

impl SwingLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, now_ms: f64, guard: &SpamGuard) -> LimiterVerdict {
        if now_ms < self.cooldown_until {
            return LimiterVerdict::CoolingDown;
        }

        let expired = self
            .window_start
            .is_none_or(|start| now_ms - start > guard.window_ms);
        if expired {
            self.window_start = Some(now_ms);
            self.count = 0;
        }

        self.count += 1;
        if self.count > guard.threshold {
            self.cooldown_until = now_ms + guard.cooldown_ms;
            return LimiterVerdict::Penalized;
        }
        LimiterVerdict::Allowed
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fourth_swing_penalized() {
        let guard = SpamGuard::default();
        let mut limiter = SwingLimiter::new();
        assert_eq!(limiter.register(0.0, &guard), LimiterVerdict::Allowed);
        assert_eq!(limiter.register(50.0, &guard), LimiterVerdict::Allowed);
        assert_eq!(limiter.register(100.0, &guard), LimiterVerdict::Allowed);
        assert_eq!(limiter.register(150.0, &guard), LimiterVerdict::Penalized);
        assert_eq!(limiter.register(600.0, &guard), LimiterVerdict::CoolingDown);
        assert_eq!(limiter.register(1149.0, &guard), LimiterVerdict::CoolingDown);
        // Cooldown over and the old window has expired
        assert_eq!(limiter.register(1150.0, &guard), LimiterVerdict::Allowed);
    }

    #[test]
    fn test_window_resets_after_expiry() {
        let guard = SpamGuard::default();
        let mut limiter = SwingLimiter::new();
        for t in [0.0, 100.0, 200.0] {
            assert_eq!(limiter.register(t, &guard), LimiterVerdict::Allowed);
        }
        // Exactly window_ms later still belongs to the old window
        assert_eq!(limiter.register(1000.0, &guard), LimiterVerdict::Penalized);

        let mut limiter = SwingLimiter::new();
        for t in [0.0, 100.0, 200.0] {
            limiter.register(t, &guard);
        }
        assert_eq!(limiter.register(1001.0, &guard), LimiterVerdict::Allowed);
    }

    #[test]
    fn test_cooldown_swings_do_not_count() {
        let guard = SpamGuard::default();
        let mut limiter = SwingLimiter::new();
        for t in [0.0, 10.0, 20.0, 30.0] {
            limiter.register(t, &guard);
        }
        for t in [40.0, 500.0, 1000.0] {
            assert_eq!(limiter.register(t, &guard), LimiterVerdict::CoolingDown);
        }
        // Lockout runs from the fourth swing, not from the ignored ones
        assert_eq!(limiter.register(1030.0, &guard), LimiterVerdict::Allowed);
    }

    proptest! {
        #[test]
        fn prop_three_allowed_then_penalty(gaps in proptest::collection::vec(0.0f64..250.0, 4)) {
            // Four swings spread over at most 750ms always land in one window
            let guard = SpamGuard::default();
            let mut limiter = SwingLimiter::new();
            let mut t = 10_000.0;
            let mut verdicts = Vec::new();
            for gap in gaps {
                t += gap;
                verdicts.push(limiter.register(t, &guard));
            }
            prop_assert_eq!(
                verdicts,
                vec![
                    LimiterVerdict::Allowed,
                    LimiterVerdict::Allowed,
                    LimiterVerdict::Allowed,
                    LimiterVerdict::Penalized,
                ]
            );
        }
    }
}
