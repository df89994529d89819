//! Per-frame driver step
//!
//! One call per fixed animation step: fire due timers, apply input, then move
//! the world.

use super::session::{Session, SwingOutcome};

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Swing key pressed since the last frame
    pub swing: bool,
    /// Demo mode - swing automatically when the target is in reach
    pub autoplay: bool,
}

/// Advance the session by one animation frame at time `now_ms`
pub fn tick(session: &mut Session, input: &TickInput, now_ms: f64) -> Option<SwingOutcome> {
    session.advance_to(now_ms);

    let state = session.state();
    let auto_swing = input.autoplay && state.target_in_zone() && !state.striker.swinging;
    let outcome = (input.swing || auto_swing).then(|| session.swing(now_ms));

    session.frame();
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_MS;
    use crate::sim::{GameEvent, GameMode};
    use crate::tuning::Tuning;

    #[test]
    fn test_autoplay_scores_in_regular() {
        let mut session = Session::new(Tuning::default(), 12345);
        session.start_session(GameMode::Regular, 0.0);

        let input = TickInput {
            autoplay: true,
            ..Default::default()
        };
        let mut now = 0.0;
        while session.is_active() {
            now += FRAME_MS;
            tick(&mut session, &input, now);
        }

        // Every target is eaten, so the score is at least 10 per spawn minus clocks
        let events = session.drain_events();
        let eaten = events
            .iter()
            .filter(|e| matches!(e, GameEvent::Eat(_)))
            .count();
        assert!(eaten > 10, "eaten = {}", eaten);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::Penalty { .. })));
        assert!(session.state().score > 0);
    }

    #[test]
    fn test_determinism() {
        // Two sessions with same seed and inputs produce identical results
        let run = || {
            let mut session = Session::new(Tuning::default(), 99999);
            session.start_session(GameMode::Infinite, 0.0);
            let mut now = 0.0;
            for frame in 0..3000u32 {
                now += FRAME_MS;
                let input = TickInput {
                    swing: frame % 37 == 0,
                    autoplay: frame % 2 == 0,
                };
                tick(&mut session, &input, now);
            }
            session.drain_events()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_no_input_no_swing() {
        let mut session = Session::new(Tuning::default(), 1);
        session.start_session(GameMode::Regular, 0.0);
        assert_eq!(tick(&mut session, &TickInput::default(), FRAME_MS), None);
        assert!(!session.state().striker.swinging);
    }
}
