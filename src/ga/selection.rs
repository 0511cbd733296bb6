//! Tournament selection.
//!
//! Each output slot is filled with the shortest of `size` tours drawn
//! uniformly **with replacement** from the current population. The tournament
//! size may exceed the population size; larger tournaments raise selection
//! pressure (faster convergence, more risk of premature convergence).
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::types::{evaluate_population, Tour};
use crate::matrix::DistanceMatrix;
use rand::Rng;

/// Tournament selection with a fixed sample size.
///
/// # Examples
///
/// ```
/// use u_tsp::ga::Tournament;
/// use u_tsp::random::create_rng;
///
/// let mut rng = create_rng(1);
/// let fitness = [40, 10, 30];
/// let idx = Tournament::new(3).select_index(&fitness, &mut rng);
/// assert!(idx < fitness.len());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tournament {
    size: usize,
}

impl Tournament {
    /// Creates a tournament of `size` draws. A size of 0 behaves as 1.
    pub fn new(size: usize) -> Self {
        Self { size: size.max(1) }
    }

    /// Number of draws per tournament.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Runs one tournament over precomputed `fitness` values.
    ///
    /// The first drawn index with the minimum fitness wins.
    ///
    /// # Panics
    /// Panics if `fitness` is empty.
    ///
    /// # Complexity
    /// O(size)
    pub fn select_index<R: Rng>(&self, fitness: &[u64], rng: &mut R) -> usize {
        assert!(!fitness.is_empty(), "cannot select from empty population");
        let n = fitness.len();

        let mut best_idx = rng.random_range(0..n);
        for _ in 1..self.size {
            let idx = rng.random_range(0..n);
            if fitness[idx] < fitness[best_idx] {
                best_idx = idx;
            }
        }
        best_idx
    }

    /// Builds a new population of the same size by repeated tournaments.
    ///
    /// The input population is not modified; the result may contain
    /// several copies of the same parent. An empty population yields an
    /// empty result.
    pub fn select_population<R: Rng>(
        &self,
        population: &[Tour],
        matrix: &DistanceMatrix,
        rng: &mut R,
    ) -> Vec<Tour> {
        if population.is_empty() {
            return Vec::new();
        }
        let fitness = evaluate_population(population, matrix);
        (0..population.len())
            .map(|_| population[self.select_index(&fitness, rng)].clone())
            .collect()
    }
}
