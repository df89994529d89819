//! Collision and scoring
//!
//! Pure state transitions; scheduling the follow-up spawn is the session's job.

use super::mode::{GameMode, tier_for_time};
use super::state::{FoodKind, GameState};
use crate::tuning::Tuning;

/// Effect of a connecting swing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitEffect {
    Points(i64),
    /// Seconds added to the clock
    Time(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub kind: FoodKind,
    pub effect: HitEffect,
}

/// Scoring rule for a consumed target
pub fn hit_effect(kind: FoodKind, mode: GameMode, tuning: &Tuning) -> HitEffect {
    match kind {
        FoodKind::Clock if mode.is_timed() => HitEffect::Time(tuning.clock_bonus_secs),
        FoodKind::GoldenBurger => HitEffect::Points(tuning.golden_points),
        FoodKind::Baseball => HitEffect::Points(tuning.batting_points),
        _ => HitEffect::Points(tuning.food_points),
    }
}

/// Check the active target against the strike zone and apply the hit
pub fn check_hit(state: &mut GameState, tuning: &Tuning) -> Option<Hit> {
    if !state.target_in_zone() {
        return None;
    }

    let kind = state.target.kind;
    let effect = hit_effect(kind, state.mode, tuning);
    match effect {
        HitEffect::Time(secs) => {
            if let Some(remaining) = state.time_remaining.as_mut() {
                *remaining += secs;
                // May move the tier backwards
                state.tier = tier_for_time(*remaining, tuning);
            }
        }
        HitEffect::Points(points) => state.score += points,
    }
    state.target.active = false;
    Some(Hit { kind, effect })
}

/// Move the target one frame. Returns true when it slipped past the player.
pub fn advance_target(state: &mut GameState) -> bool {
    let target = &mut state.target;
    if !target.active {
        return false;
    }
    target.pos.x -= target.speed;
    if target.pos.x < 0.0 {
        target.active = false;
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::mode::DifficultyTier;
    use crate::sim::state::Target;
    use glam::Vec2;
    use proptest::prelude::*;

    fn in_zone(kind: FoodKind) -> Target {
        Target {
            pos: Vec2::new(200.0, 440.0),
            kind,
            speed: 6.0,
            active: true,
        }
    }

    #[test]
    fn test_hit_scores_and_consumes() {
        let tuning = Tuning::default();
        let mut state = GameState::new(GameMode::Regular, &tuning);
        state.target = in_zone(FoodKind::Pizza);

        let hit = check_hit(&mut state, &tuning);
        assert_eq!(
            hit,
            Some(Hit {
                kind: FoodKind::Pizza,
                effect: HitEffect::Points(10)
            })
        );
        assert_eq!(state.score, 10);
        assert!(!state.target.active);
        // Consumed target cannot be hit twice
        assert!(check_hit(&mut state, &tuning).is_none());
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_miss_outside_zone() {
        let tuning = Tuning::default();
        let mut state = GameState::new(GameMode::Regular, &tuning);
        state.target = in_zone(FoodKind::GoldenBurger);
        state.target.pos.x = 251.0;
        assert!(check_hit(&mut state, &tuning).is_none());
        assert!(state.target.active);

        state.target.pos.x = 250.0;
        assert!(check_hit(&mut state, &tuning).is_some());
        assert_eq!(state.score, 50);
    }

    #[test]
    fn test_clock_hit_extends_time_and_resets_tier() {
        let tuning = Tuning::default();
        let mut state = GameState::new(GameMode::Impossible, &tuning);
        state.time_remaining = Some(5);
        state.tier = DifficultyTier::SuperFast;
        state.target = in_zone(FoodKind::Clock);

        check_hit(&mut state, &tuning);
        assert_eq!(state.time_remaining, Some(15));
        assert_eq!(state.tier, DifficultyTier::Fast);
        assert_eq!(state.score, 0);

        state.time_remaining = Some(25);
        state.target = in_zone(FoodKind::Clock);
        check_hit(&mut state, &tuning);
        assert_eq!(state.time_remaining, Some(35));
        assert_eq!(state.tier, DifficultyTier::Normal);
    }

    #[test]
    fn test_clock_time_uncapped() {
        let tuning = Tuning::default();
        let mut state = GameState::new(GameMode::Regular, &tuning);
        for _ in 0..3 {
            state.target = in_zone(FoodKind::Clock);
            check_hit(&mut state, &tuning);
        }
        assert_eq!(state.time_remaining, Some(90));
    }

    #[test]
    fn test_clock_in_untimed_mode_scores_points() {
        let tuning = Tuning::default();
        let mut state = GameState::new(GameMode::Infinite, &tuning);
        state.target = in_zone(FoodKind::Clock);
        check_hit(&mut state, &tuning);
        assert_eq!(state.score, 10);
        assert_eq!(state.time_remaining, None);
    }

    #[test]
    fn test_target_slips_past() {
        let tuning = Tuning::default();
        let mut state = GameState::new(GameMode::Regular, &tuning);
        state.target = Target {
            pos: Vec2::new(12.0, 440.0),
            kind: FoodKind::Donut,
            speed: 6.0,
            active: true,
        };
        assert!(!advance_target(&mut state));
        assert!(!advance_target(&mut state));
        assert_eq!(state.target.pos.x, 0.0);
        assert!(advance_target(&mut state));
        assert!(!state.target.active);
        assert!(!advance_target(&mut state));
    }

    proptest! {
        #[test]
        fn prop_score_is_linear_in_hits(golden in 0u32..40, normal in 0u32..40) {
            let tuning = Tuning::default();
            let mut state = GameState::new(GameMode::Regular, &tuning);
            for _ in 0..golden {
                state.target = in_zone(FoodKind::GoldenBurger);
                check_hit(&mut state, &tuning);
            }
            for i in 0..normal {
                state.target = in_zone(FoodKind::BASE[i as usize % 3]);
                check_hit(&mut state, &tuning);
            }
            prop_assert_eq!(state.score, 50 * golden as i64 + 10 * normal as i64);
        }
    }
}
