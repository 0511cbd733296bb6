//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.
//! The two presets, [`GaConfig::simple`] and [`GaConfig::extended`], are the
//! two tunings the engine is usually run with: one mutation operator with a
//! long stagnation window, or two independently adapted mutation operators
//! with a short one.

use super::succession::Succession;
use crate::error::{TspError, TspResult};

/// Baseline mutation probabilities.
///
/// `inversion_probability: None` runs only the swap-segment-reverse
/// operator; `Some(p)` adds the inversion operator after it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MutationConfig {
    /// Per-tour probability of the swap-segment-reverse operator.
    pub swap_probability: f64,
    /// Per-tour probability of the inversion operator, if enabled.
    pub inversion_probability: Option<f64>,
}

impl MutationConfig {
    /// A single swap-segment-reverse operator.
    pub fn single(probability: f64) -> Self {
        Self {
            swap_probability: probability.clamp(0.0, 1.0),
            inversion_probability: None,
        }
    }

    /// Swap-segment-reverse followed by inversion.
    pub fn dual(swap: f64, inversion: f64) -> Self {
        Self {
            swap_probability: swap.clamp(0.0, 1.0),
            inversion_probability: Some(inversion.clamp(0.0, 1.0)),
        }
    }
}

/// How the controller diversifies parameters when progress stalls.
///
/// When the generation best has not changed for `threshold` consecutive
/// generations, the effective crossover probability is redrawn uniformly
/// from `crossover_range` and each enabled mutation probability from its
/// range.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StagnationConfig {
    /// Generations without change before redrawing. 0 disables redraws.
    pub threshold: usize,
    /// Inclusive range for the redrawn crossover probability.
    pub crossover_range: (f64, f64),
    /// Inclusive range for the redrawn swap-segment-reverse probability.
    pub swap_range: (f64, f64),
    /// Inclusive range for the redrawn inversion probability.
    pub inversion_range: (f64, f64),
}

impl Default for StagnationConfig {
    fn default() -> Self {
        Self {
            threshold: 1000,
            crossover_range: (0.2, 0.4),
            swap_range: (0.7, 0.99),
            inversion_range: (0.7, 0.99),
        }
    }
}

/// Configuration for the TSP genetic algorithm.
///
/// # Defaults
///
/// `Default` is the [`simple`](Self::simple) preset.
///
/// ```
/// use u_tsp::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 11);
/// assert_eq!(config.tournament_size, 70);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_tsp::ga::{GaConfig, Succession};
///
/// let config = GaConfig::extended()
///     .with_population_size(200)
///     .with_tournament_size(5)
///     .with_succession(Succession::Partial { ratio: 0.5 })
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of tours in the population.
    pub population_size: usize,

    /// Number of generations to run.
    pub iterations: usize,

    /// Tours drawn (with replacement) per tournament.
    ///
    /// May exceed `population_size`. Larger values converge faster.
    pub tournament_size: usize,

    /// Probability of recombining a parent pair with PMX (0.0–1.0).
    pub crossover_probability: f64,

    /// Baseline mutation probabilities.
    pub mutation: MutationConfig,

    /// How the next population is formed from the old and new ones.
    pub succession: Succession,

    /// Stagnation-adaptive parameter control.
    pub stagnation: StagnationConfig,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self::simple()
    }
}

impl GaConfig {
    /// One mutation operator, partial replacement, long stagnation window.
    ///
    /// - Population: 11, Tournament: 70, Iterations: 100 000
    /// - Crossover: 0.9, Mutation: 0.1 (swap-segment-reverse only)
    /// - Succession: 75% new / 25% old
    /// - Stagnation: 1000 generations; crossover ∈ [0.2, 0.4], mutation ∈ [0.7, 0.99]
    pub fn simple() -> Self {
        Self {
            population_size: 11,
            iterations: 100_000,
            tournament_size: 70,
            crossover_probability: 0.9,
            mutation: MutationConfig::single(0.1),
            succession: Succession::Partial { ratio: 0.75 },
            stagnation: StagnationConfig::default(),
            seed: None,
        }
    }

    /// Two mutation operators, full replacement, short stagnation window.
    ///
    /// - Mutation: swap 0.1, inversion 0.1
    /// - Succession: full replacement
    /// - Stagnation: 50 generations, same redraw ranges as [`simple`](Self::simple)
    pub fn extended() -> Self {
        Self {
            mutation: MutationConfig::dual(0.1, 0.1),
            succession: Succession::Full,
            stagnation: StagnationConfig {
                threshold: 50,
                ..StagnationConfig::default()
            },
            ..Self::simple()
        }
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of iterations.
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the crossover probability.
    pub fn with_crossover_probability(mut self, p: f64) -> Self {
        self.crossover_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the baseline mutation probabilities.
    pub fn with_mutation(mut self, mutation: MutationConfig) -> Self {
        self.mutation = mutation;
        self
    }

    /// Sets the succession policy.
    pub fn with_succession(mut self, succession: Succession) -> Self {
        self.succession = succession;
        self
    }

    /// Sets the stagnation controller parameters.
    pub fn with_stagnation(mut self, stagnation: StagnationConfig) -> Self {
        self.stagnation = stagnation;
        self
    }

    /// Sets only the stagnation threshold (0 disables redraws).
    pub fn with_stagnation_threshold(mut self, threshold: usize) -> Self {
        self.stagnation.threshold = threshold;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// The runner itself tolerates degenerate values (an empty population
    /// or zero iterations simply do no work); this check is for callers
    /// that want to reject them up front.
    pub fn validate(&self) -> TspResult<()> {
        if self.population_size == 0 {
            return Err(TspError::config("population_size must be at least 1"));
        }
        if self.iterations == 0 {
            return Err(TspError::config("iterations must be at least 1"));
        }
        if self.tournament_size == 0 {
            return Err(TspError::config("tournament_size must be at least 1"));
        }
        check_probability("crossover_probability", self.crossover_probability)?;
        check_probability("swap_probability", self.mutation.swap_probability)?;
        if let Some(p) = self.mutation.inversion_probability {
            check_probability("inversion_probability", p)?;
        }
        if let Succession::Partial { ratio } = self.succession {
            check_probability("succession ratio", ratio)?;
        }
        check_range("crossover_range", self.stagnation.crossover_range)?;
        check_range("swap_range", self.stagnation.swap_range)?;
        check_range("inversion_range", self.stagnation.inversion_range)?;
        Ok(())
    }
}

fn check_probability(name: &str, p: f64) -> TspResult<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(TspError::config(format!("{name} must be in [0, 1], got {p}")))
    }
}

fn check_range(name: &str, (lo, hi): (f64, f64)) -> TspResult<()> {
    check_probability(name, lo)?;
    check_probability(name, hi)?;
    if lo > hi {
        return Err(TspError::config(format!("{name} is empty: {lo} > {hi}")));
    }
    Ok(())
}
