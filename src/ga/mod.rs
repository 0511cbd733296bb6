//! Genetic algorithm for the symmetric TSP.
//!
//! One generation runs tournament selection, PMX crossover on adjacent
//! pairs, swap-segment-reverse and (optionally) inversion mutation, then
//! succession. A stagnation-adaptive controller raises exploration when the
//! generation best stops moving.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters and the `simple`/`extended` presets
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`RunState`]: Best tour, stagnation counter, effective probabilities
//! - [`RunReport`]: Final result, produced on completion and on interruption
//!
//! # Submodules
//!
//! - [`operators`]: PMX crossover and reverse-segment mutations
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Goldberg & Lingle (1985), "Alleles, Loci, and the Traveling Salesman Problem"

mod config;
pub mod operators;
mod runner;
mod selection;
mod state;
mod succession;
mod types;

pub use config::{GaConfig, MutationConfig, StagnationConfig};
pub use runner::{CancellationToken, GaRunner, Generation, RunReport};
pub use selection::Tournament;
pub use state::{RunState, StagnationEvent};
pub use succession::{n_best, Succession};
pub use types::{
    evaluate_population, find_best, BestTour, GenerationStats, NoProgress, ProgressObserver, Tour,
};
