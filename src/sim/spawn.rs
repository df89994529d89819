//! Target spawning
//!
//! Weighted kind selection plus speed assignment from the speed table.

use glam::Vec2;
use rand::Rng;

use super::mode::{GameMode, target_speed};
use super::state::{FoodKind, GameState, Target};
use crate::tuning::Tuning;

/// Pick the next target kind for a mode
///
/// One roll decides the bonus items: timed modes give a Clock below
/// `clock_chance` and a GoldenBurger in the next `golden_chance`. Infinite has
/// no clocks. Everything else is a uniform pick among the base foods.
pub fn roll_food_kind<R: Rng + ?Sized>(mode: GameMode, tuning: &Tuning, rng: &mut R) -> FoodKind {
    if mode == GameMode::Batting {
        return FoodKind::Baseball;
    }

    let clock_chance = if mode.is_timed() { tuning.clock_chance } else { 0.0 };
    let roll: f64 = rng.random();
    if roll < clock_chance {
        FoodKind::Clock
    } else if roll < clock_chance + tuning.golden_chance {
        FoodKind::GoldenBurger
    } else {
        FoodKind::BASE[rng.random_range(0..FoodKind::BASE.len())]
    }
}

/// Put a fresh target at the far edge. Returns false while the session is inactive.
pub fn spawn_target<R: Rng + ?Sized>(state: &mut GameState, tuning: &Tuning, rng: &mut R) -> bool {
    if !state.active {
        return false;
    }

    let kind = roll_food_kind(state.mode, tuning, rng);
    state.target = Target {
        pos: Vec2::new(tuning.spawn_x, tuning.striker.lane_y),
        kind,
        speed: target_speed(state.mode, state.tier, state.speed_level, tuning),
        active: true,
    };
    log::debug!(
        "Spawned {} at speed {} ({:?})",
        kind.name(),
        state.target.speed,
        state.tier
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::mode::DifficultyTier;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashMap;

    fn histogram(mode: GameMode, n: usize) -> HashMap<FoodKind, usize> {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut counts = HashMap::new();
        for _ in 0..n {
            *counts.entry(roll_food_kind(mode, &tuning, &mut rng)).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn test_infinite_never_rolls_clock() {
        let counts = histogram(GameMode::Infinite, 20_000);
        assert!(!counts.contains_key(&FoodKind::Clock));
        let golden = counts.get(&FoodKind::GoldenBurger).copied().unwrap_or(0);
        // ~5%
        assert!((700..1300).contains(&golden), "golden = {}", golden);
    }

    #[test]
    fn test_timed_weights() {
        let counts = histogram(GameMode::Regular, 20_000);
        let clock = counts.get(&FoodKind::Clock).copied().unwrap_or(0);
        let golden = counts.get(&FoodKind::GoldenBurger).copied().unwrap_or(0);
        // ~15% and ~5%
        assert!((2600..3400).contains(&clock), "clock = {}", clock);
        assert!((700..1300).contains(&golden), "golden = {}", golden);
        for base in FoodKind::BASE {
            let n = counts.get(&base).copied().unwrap_or(0);
            assert!((4700..5900).contains(&n), "{:?} = {}", base, n);
        }
    }

    #[test]
    fn test_batting_only_baseballs() {
        let counts = histogram(GameMode::Batting, 500);
        assert_eq!(counts.get(&FoodKind::Baseball), Some(&500));
    }

    #[test]
    fn test_spawn_sets_position_and_speed() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut state = GameState::new(GameMode::Impossible, &tuning);
        state.tier = DifficultyTier::Fast;

        assert!(spawn_target(&mut state, &tuning, &mut rng));
        assert!(state.target.active);
        assert_eq!(state.target.pos, Vec2::new(800.0, 440.0));
        assert_eq!(state.target.speed, 24.0);
    }

    #[test]
    fn test_spawn_inactive_is_noop() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut state = GameState::idle(&tuning);
        assert!(!spawn_target(&mut state, &tuning, &mut rng));
        assert!(!state.target.active);
    }
}
