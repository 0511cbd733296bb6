//! Genetic-algorithm optimizer for the symmetric Traveling Salesman Problem.
//!
//! - [`matrix`]: symmetric integer distance matrix, tour evaluation, and a
//!   loader for the lower-triangular text format
//! - [`ga`]: the evolutionary engine (tournament selection, PMX crossover,
//!   reverse-segment mutations, succession, stagnation-adaptive rates)
//!
//! # Example
//!
//! ```
//! use u_tsp::ga::{GaConfig, GaRunner, NoProgress};
//! use u_tsp::matrix::loading::parse_lower_triangular;
//!
//! let matrix = parse_lower_triangular("4\n0\n10 0\n15 35 0\n20 25 30 0\n").unwrap();
//! let config = GaConfig::extended()
//!     .with_population_size(20)
//!     .with_tournament_size(3)
//!     .with_iterations(200)
//!     .with_seed(7);
//!
//! let report = GaRunner::new(&matrix, &config).run(&mut NoProgress);
//! assert_eq!(report.best_distance(), Some(80));
//! ```

pub mod error;
pub mod ga;
pub mod matrix;
pub mod random;

pub use error::{TspError, TspResult};
