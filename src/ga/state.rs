//! Run state and the stagnation-adaptive parameter controller.
//!
//! [`RunState`] is threaded through [`GaRunner::step`](super::GaRunner::step)
//! by value. It holds the all-time best tour and the effective operator
//! probabilities, which start at the configured baseline, snap back to it on
//! every change of the generation best, and are redrawn from the configured
//! ranges once the generation best has been flat for
//! [`StagnationConfig::threshold`] generations.

use super::config::{GaConfig, MutationConfig, StagnationConfig};
use super::types::{BestTour, Tour};
use rand::Rng;

/// Outcome of feeding one generation best into the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagnationEvent {
    /// Generation best differs from the previous one; rates reset.
    Changed,
    /// Generation best unchanged; counter incremented.
    Stalled,
    /// Counter reached the threshold; rates redrawn, counter reset.
    Diversified,
}

/// Mutable state of a GA run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunState {
    /// All-time best tour, `None` until the first generation is evaluated.
    pub best: Option<BestTour>,
    /// Generation best seen by the controller last generation.
    pub previous_best_distance: Option<u64>,
    /// Generations since the generation best last changed.
    pub stagnation_counter: usize,
    /// Crossover probability currently in effect.
    pub crossover_probability: f64,
    /// Mutation probabilities currently in effect.
    pub mutation: MutationConfig,
}

impl RunState {
    /// Fresh state with effective probabilities at the configured baseline.
    pub fn new(config: &GaConfig) -> Self {
        Self {
            best: None,
            previous_best_distance: None,
            stagnation_counter: 0,
            crossover_probability: config.crossover_probability,
            mutation: config.mutation,
        }
    }

    /// All-time best distance, if any generation has been evaluated.
    pub fn best_distance(&self) -> Option<u64> {
        self.best.as_ref().map(|b| b.distance)
    }

    /// Offers a generation's best tour to the all-time tracker.
    ///
    /// The first offer is always accepted; later ones only if strictly
    /// shorter. Returns true if the tracked best changed.
    pub fn record_best(&mut self, path: &Tour, distance: u64) -> bool {
        match &self.best {
            Some(best) if distance >= best.distance => false,
            _ => {
                self.best = Some(BestTour {
                    path: path.clone(),
                    distance,
                });
                true
            }
        }
    }

    /// Feeds a generation best into the stagnation controller.
    pub fn observe_generation<R: Rng>(
        &mut self,
        generation_best: u64,
        config: &GaConfig,
        rng: &mut R,
    ) -> StagnationEvent {
        let mut event = if self.previous_best_distance == Some(generation_best) {
            self.stagnation_counter += 1;
            StagnationEvent::Stalled
        } else {
            self.stagnation_counter = 0;
            self.previous_best_distance = Some(generation_best);
            self.crossover_probability = config.crossover_probability;
            self.mutation = config.mutation;
            StagnationEvent::Changed
        };

        let threshold = config.stagnation.threshold;
        if threshold > 0 && self.stagnation_counter >= threshold {
            self.diversify(&config.stagnation, rng);
            self.stagnation_counter = 0;
            event = StagnationEvent::Diversified;
        }

        event
    }

    /// Redraws the effective probabilities from the configured ranges.
    fn diversify<R: Rng>(&mut self, stagnation: &StagnationConfig, rng: &mut R) {
        self.crossover_probability = draw(stagnation.crossover_range, rng);
        self.mutation.swap_probability = draw(stagnation.swap_range, rng);
        if self.mutation.inversion_probability.is_some() {
            self.mutation.inversion_probability = Some(draw(stagnation.inversion_range, rng));
        }
    }
}

/// Uniform draw from `[lo, hi]` clamped into `[0, 1]`.
///
/// A NaN lower bound reads as 0; a NaN or inverted upper bound collapses the
/// range onto `lo`.
fn draw<R: Rng>((lo, hi): (f64, f64), rng: &mut R) -> f64 {
    let lo = if lo.is_nan() { 0.0 } else { lo.clamp(0.0, 1.0) };
    let hi = if hi.is_nan() { lo } else { hi.clamp(0.0, 1.0) };
    if lo >= hi {
        return lo;
    }
    rng.random_range(lo..=hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn in_range(p: f64, (lo, hi): (f64, f64)) -> bool {
        p >= lo && p <= hi
    }

    #[test]
    fn test_new_state_uses_baseline() {
        let config = GaConfig::extended();
        let state = RunState::new(&config);
        assert!(state.best.is_none());
        assert_eq!(state.stagnation_counter, 0);
        assert_eq!(state.crossover_probability, config.crossover_probability);
        assert_eq!(state.mutation, config.mutation);
    }

    #[test]
    fn test_record_best_only_strict_improvement() {
        let config = GaConfig::simple();
        let mut state = RunState::new(&config);
        let a = Tour::new(vec![0, 1, 2]);
        let b = Tour::new(vec![2, 1, 0]);

        assert!(state.record_best(&a, 100));
        assert!(!state.record_best(&b, 100));
        assert_eq!(state.best.as_ref().unwrap().path, a);
        assert!(!state.record_best(&b, 120));
        assert!(state.record_best(&b, 90));
        assert_eq!(state.best_distance(), Some(90));
    }

    #[test]
    fn test_stall_increments_counter() {
        let config = GaConfig::simple();
        let mut state = RunState::new(&config);
        let mut rng = create_rng(1);

        assert_eq!(
            state.observe_generation(500, &config, &mut rng),
            StagnationEvent::Changed
        );
        assert_eq!(state.stagnation_counter, 0);
        for expected in 1..5 {
            assert_eq!(
                state.observe_generation(500, &config, &mut rng),
                StagnationEvent::Stalled
            );
            assert_eq!(state.stagnation_counter, expected);
        }
    }

    #[test]
    fn test_threshold_redraws_within_ranges_and_resets() {
        let config = GaConfig::extended();
        let mut rng = create_rng(2);
        let mut state = RunState::new(&config);
        state.previous_best_distance = Some(777);
        state.stagnation_counter = config.stagnation.threshold - 1;

        let event = state.observe_generation(777, &config, &mut rng);

        assert_eq!(event, StagnationEvent::Diversified);
        assert_eq!(state.stagnation_counter, 0);
        assert!(in_range(
            state.crossover_probability,
            config.stagnation.crossover_range
        ));
        assert!(in_range(
            state.mutation.swap_probability,
            config.stagnation.swap_range
        ));
        let inversion = state.mutation.inversion_probability.unwrap();
        assert!(in_range(inversion, config.stagnation.inversion_range));
    }

    #[test]
    fn test_single_mutation_stays_single_after_redraw() {
        let config = GaConfig::simple().with_stagnation_threshold(1);
        let mut rng = create_rng(3);
        let mut state = RunState::new(&config);
        state.observe_generation(10, &config, &mut rng);
        assert_eq!(
            state.observe_generation(10, &config, &mut rng),
            StagnationEvent::Diversified
        );
        assert!(state.mutation.inversion_probability.is_none());
        assert!(in_range(
            state.mutation.swap_probability,
            config.stagnation.swap_range
        ));
    }

    #[test]
    fn test_change_resets_to_baseline() {
        let config = GaConfig::simple().with_stagnation_threshold(2);
        let mut rng = create_rng(4);
        let mut state = RunState::new(&config);
        state.observe_generation(10, &config, &mut rng);
        state.observe_generation(10, &config, &mut rng);
        state.observe_generation(10, &config, &mut rng);
        assert_ne!(state.crossover_probability, config.crossover_probability);

        assert_eq!(
            state.observe_generation(9, &config, &mut rng),
            StagnationEvent::Changed
        );
        assert_eq!(state.crossover_probability, config.crossover_probability);
        assert_eq!(state.mutation, config.mutation);
        assert_eq!(state.previous_best_distance, Some(9));
    }

    #[test]
    fn test_zero_threshold_disables_redraw() {
        let config = GaConfig::simple().with_stagnation_threshold(0);
        let mut rng = create_rng(5);
        let mut state = RunState::new(&config);
        for _ in 0..20 {
            assert_ne!(
                state.observe_generation(10, &config, &mut rng),
                StagnationEvent::Diversified
            );
        }
        assert_eq!(state.stagnation_counter, 19);
    }

    #[test]
    fn test_degenerate_range_draws_lower_bound() {
        let mut rng = create_rng(6);
        assert_eq!(draw((0.3, 0.3), &mut rng), 0.3);
        assert_eq!(draw((0.8, 0.2), &mut rng), 0.8);
    }

    #[test]
    fn test_non_finite_range_bounds_do_not_panic() {
        let mut rng = create_rng(7);
        assert_eq!(draw((0.5, f64::NAN), &mut rng), 0.5);
        assert_eq!(draw((f64::NAN, f64::NAN), &mut rng), 0.0);
        for _ in 0..100 {
            let p = draw((f64::NEG_INFINITY, f64::INFINITY), &mut rng);
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn test_nan_swap_range_diversifies_without_panic() {
        let mut config = GaConfig::simple().with_stagnation_threshold(1);
        config.stagnation.swap_range = (0.5, f64::NAN);
        let mut rng = create_rng(8);
        let mut state = RunState::new(&config);
        state.observe_generation(10, &config, &mut rng);
        assert_eq!(
            state.observe_generation(10, &config, &mut rng),
            StagnationEvent::Diversified
        );
        assert_eq!(state.mutation.swap_probability, 0.5);
    }
}
