//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates one generation as
//! selection → crossover → mutation → succession → evaluation → bookkeeping,
//! and repeats it for the configured number of iterations or until the
//! [`CancellationToken`] is set.

use super::config::GaConfig;
use super::operators::{crossover_population, inversion_mutation, mutate_population, swap_mutation};
use super::selection::Tournament;
use super::state::{RunState, StagnationEvent};
use super::types::{find_best, BestTour, GenerationStats, ProgressObserver, Tour};
use crate::matrix::DistanceMatrix;
use crate::random::rng_from_seed;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Cooperative cancellation flag, checked once per generation boundary.
///
/// Clones share the same flag, so one clone can be handed to a signal
/// handler while the runner polls another.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates an unset token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the run to stop after the current generation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Returns true once [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// A population together with the run state that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    /// Index of the next iteration to run.
    pub iteration: usize,
    /// Current population.
    pub population: Vec<Tour>,
    /// Best tour, stagnation counter, effective probabilities.
    pub state: RunState,
}

/// Final result of a GA run, produced on completion and on interruption.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunReport {
    /// All-time best tour, `None` if no generation produced a tour.
    pub best: Option<BestTour>,

    /// Whether the run was stopped by the cancellation token.
    pub interrupted: bool,

    /// Index of the last completed iteration, if any.
    pub last_iteration: Option<usize>,

    /// Number of completed generations.
    pub generations: usize,

    /// All-time best distance after each completed generation.
    pub best_distance_history: Vec<u64>,
}

impl RunReport {
    /// Best distance, if any.
    pub fn best_distance(&self) -> Option<u64> {
        self.best.as_ref().map(|b| b.distance)
    }

    /// Best path, if any.
    pub fn best_path(&self) -> Option<&Tour> {
        self.best.as_ref().map(|b| &b.path)
    }
}

/// Executes the GA over a borrowed distance matrix.
///
/// # Usage
///
/// ```
/// use u_tsp::ga::{GaConfig, GaRunner, NoProgress};
/// use u_tsp::matrix::DistanceMatrix;
///
/// let matrix = DistanceMatrix::from_lower_triangular(vec![
///     vec![0],
///     vec![10, 0],
///     vec![15, 35, 0],
///     vec![20, 25, 30, 0],
/// ]).unwrap();
/// let config = GaConfig::simple().with_iterations(50).with_seed(42);
///
/// let report = GaRunner::new(&matrix, &config).run(&mut NoProgress);
/// assert_eq!(report.generations, 50);
/// assert!(report.best_path().unwrap().is_permutation());
/// ```
pub struct GaRunner<'a> {
    matrix: &'a DistanceMatrix,
    config: &'a GaConfig,
    tournament: Tournament,
}

impl<'a> GaRunner<'a> {
    /// Creates a runner. The configuration is not validated; degenerate
    /// values make the run do less work rather than fail.
    pub fn new(matrix: &'a DistanceMatrix, config: &'a GaConfig) -> Self {
        Self {
            matrix,
            config,
            tournament: Tournament::new(config.tournament_size),
        }
    }

    /// Seeds the initial generation with random tours.
    pub fn initial_generation<R: Rng>(&self, rng: &mut R) -> Generation {
        let population = (0..self.config.population_size)
            .map(|_| Tour::random(self.matrix.size(), rng))
            .collect();
        Generation {
            iteration: 0,
            population,
            state: RunState::new(self.config),
        }
    }

    /// Runs one generation.
    ///
    /// Consumes the current generation and returns the next one along with
    /// its progress observation.
    pub fn step<R: Rng>(
        &self,
        generation: Generation,
        rng: &mut R,
    ) -> (Generation, GenerationStats) {
        let Generation {
            iteration,
            population,
            mut state,
        } = generation;

        let old = if self.config.succession.needs_old_population() {
            population.clone()
        } else {
            Vec::new()
        };

        let selected = self.tournament.select_population(&population, self.matrix, rng);
        let mut offspring = crossover_population(selected, state.crossover_probability, rng);

        mutate_population(
            &mut offspring,
            state.mutation.swap_probability,
            swap_mutation,
            rng,
        );
        if let Some(p) = state.mutation.inversion_probability {
            mutate_population(&mut offspring, p, inversion_mutation, rng);
        }

        let population = self.config.succession.apply(old, offspring, self.matrix);

        let generation_best = find_best(&population, self.matrix);
        if let Some((idx, distance)) = generation_best {
            if state.record_best(&population[idx], distance) {
                debug!(iteration, distance, "new best tour");
            }
            if state.observe_generation(distance, self.config, rng)
                == StagnationEvent::Diversified
            {
                debug!(
                    iteration,
                    crossover = state.crossover_probability,
                    swap = state.mutation.swap_probability,
                    inversion = ?state.mutation.inversion_probability,
                    "stagnation: redrew operator probabilities"
                );
            }
        }

        let stats = GenerationStats {
            iteration,
            generation_best: generation_best.map(|(_, d)| d),
            best_distance: state.best_distance(),
            stagnation_counter: state.stagnation_counter,
        };
        trace!(
            iteration,
            generation_best = ?stats.generation_best,
            best = ?stats.best_distance,
            "generation complete"
        );

        (
            Generation {
                iteration: iteration + 1,
                population,
                state,
            },
            stats,
        )
    }

    /// Runs the configured number of iterations.
    pub fn run<O: ProgressObserver>(&self, observer: &mut O) -> RunReport {
        self.run_with_cancel(None, observer)
    }

    /// Runs with an optional cancellation token.
    ///
    /// If the token is set, the GA stops before starting the next
    /// generation and reports the best tour found so far. The final report
    /// is always passed to [`ProgressObserver::on_finish`].
    pub fn run_with_cancel<O: ProgressObserver>(
        &self,
        cancel: Option<&CancellationToken>,
        observer: &mut O,
    ) -> RunReport {
        let mut rng = rng_from_seed(self.config.seed);
        info!(
            nodes = self.matrix.size(),
            population = self.config.population_size,
            iterations = self.config.iterations,
            tournament = self.tournament.size(),
            "starting GA run"
        );

        let mut generation = self.initial_generation(&mut rng);
        let mut history = Vec::with_capacity(self.config.iterations);
        let mut interrupted = false;

        for _ in 0..self.config.iterations {
            if cancel.is_some_and(CancellationToken::is_cancelled) {
                interrupted = true;
                info!(iteration = generation.iteration, "run interrupted");
                break;
            }

            let (next, stats) = self.step(generation, &mut rng);
            generation = next;
            if let Some(d) = stats.best_distance {
                history.push(d);
            }
            observer.on_generation(&stats);
        }

        let report = RunReport {
            best: generation.state.best,
            interrupted,
            last_iteration: generation.iteration.checked_sub(1),
            generations: generation.iteration,
            best_distance_history: history,
        };
        info!(
            generations = report.generations,
            best = ?report.best_distance(),
            interrupted,
            "GA run finished"
        );
        observer.on_finish(&report);
        report
    }
}

// ============================================================================
// Tests
// ============================================================================
