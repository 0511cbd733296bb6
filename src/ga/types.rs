//! Core types shared by the GA operators and runner.
//!
//! A [`Tour`] carries no cached fitness: its length is always recomputed
//! from the [`DistanceMatrix`] so that no operator can leave a stale value
//! behind after reordering nodes.

use crate::matrix::DistanceMatrix;
use rand::seq::SliceRandom;
use rand::Rng;

/// A candidate solution: a cyclic visiting order over nodes `0..n`.
///
/// Every operator in this crate returns a full permutation of `0..n`.
///
/// # Examples
///
/// ```
/// use u_tsp::ga::Tour;
///
/// let tour = Tour::new(vec![2, 0, 1]);
/// assert_eq!(tour.nodes(), &[2, 0, 1]);
/// assert!(tour.is_permutation());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour {
    nodes: Vec<usize>,
}

impl Tour {
    /// Wraps a visiting order.
    pub fn new(nodes: Vec<usize>) -> Self {
        Self { nodes }
    }

    /// Uniformly shuffled permutation of `0..size`.
    pub fn random<R: Rng>(size: usize, rng: &mut R) -> Self {
        let mut nodes: Vec<usize> = (0..size).collect();
        nodes.shuffle(rng);
        Self { nodes }
    }

    /// Returns the visiting order.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Mutable access for in-place operators.
    pub fn nodes_mut(&mut self) -> &mut [usize] {
        &mut self.nodes
    }

    /// Consumes the tour and returns the visiting order.
    pub fn into_nodes(self) -> Vec<usize> {
        self.nodes
    }

    /// Number of nodes visited.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tour visits no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Closed tour length under `matrix`.
    pub fn distance(&self, matrix: &DistanceMatrix) -> u64 {
        matrix.tour_length(&self.nodes)
    }

    /// Returns true if the tour contains each of `0..len()` exactly once.
    pub fn is_permutation(&self) -> bool {
        let n = self.nodes.len();
        let mut seen = vec![false; n];
        for &v in &self.nodes {
            if v >= n || seen[v] {
                return false;
            }
            seen[v] = true;
        }
        true
    }
}

impl From<Vec<usize>> for Tour {
    fn from(nodes: Vec<usize>) -> Self {
        Self::new(nodes)
    }
}

/// Evaluates every tour of a population, in order.
pub fn evaluate_population(population: &[Tour], matrix: &DistanceMatrix) -> Vec<u64> {
    population.iter().map(|t| t.distance(matrix)).collect()
}

/// Index and length of the shortest tour (first one wins on ties).
///
/// Returns `None` for an empty population.
pub fn find_best(population: &[Tour], matrix: &DistanceMatrix) -> Option<(usize, u64)> {
    let mut best: Option<(usize, u64)> = None;
    for (i, tour) in population.iter().enumerate() {
        let d = tour.distance(matrix);
        match best {
            Some((_, bd)) if d >= bd => {}
            _ => best = Some((i, d)),
        }
    }
    best
}

/// A tour together with its length.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BestTour {
    /// The visiting order.
    pub path: Tour,
    /// Its closed tour length.
    pub distance: u64,
}

/// Progress observation emitted after every generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Zero-based iteration index.
    pub iteration: usize,
    /// Shortest tour length in this generation's population.
    pub generation_best: Option<u64>,
    /// All-time shortest tour length so far.
    pub best_distance: Option<u64>,
    /// Generations since the last change of the generation best.
    pub stagnation_counter: usize,
}

/// Receives progress events from [`GaRunner`](super::GaRunner).
///
/// Both methods default to no-ops.
pub trait ProgressObserver {
    /// Called after each completed generation.
    fn on_generation(&mut self, _stats: &GenerationStats) {}

    /// Called once with the final report, on completion or interruption.
    fn on_finish(&mut self, _report: &super::RunReport) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {}

impl<F: FnMut(&GenerationStats)> ProgressObserver for F {
    fn on_generation(&mut self, stats: &GenerationStats) {
        self(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn matrix() -> DistanceMatrix {
        DistanceMatrix::from_lower_triangular(vec![
            vec![0],
            vec![10, 0],
            vec![15, 35, 0],
            vec![20, 25, 30, 0],
        ])
        .unwrap()
    }

    #[test]
    fn test_random_tour_is_permutation() {
        let mut rng = create_rng(42);
        for size in [0, 1, 2, 7, 52] {
            let t = Tour::random(size, &mut rng);
            assert_eq!(t.len(), size);
            assert!(t.is_permutation(), "not a permutation: {t:?}");
        }
    }

    #[test]
    fn test_is_permutation_detects_defects() {
        assert!(!Tour::new(vec![0, 0, 2]).is_permutation());
        assert!(!Tour::new(vec![0, 1, 3]).is_permutation());
        assert!(Tour::new(vec![]).is_permutation());
    }

    #[test]
    fn test_find_best_first_wins_on_ties() {
        let m = matrix();
        let pop = vec![
            Tour::new(vec![0, 1, 2, 3]), // 95
            Tour::new(vec![0, 1, 3, 2]), // 80
            Tour::new(vec![2, 3, 1, 0]), // 80 (same cycle reversed)
        ];
        assert_eq!(find_best(&pop, &m), Some((1, 80)));
        assert_eq!(find_best(&[], &m), None);
    }

    #[test]
    fn test_evaluate_population() {
        let m = matrix();
        let pop = vec![Tour::new(vec![0, 1, 2, 3]), Tour::new(vec![0, 1, 3, 2])];
        assert_eq!(evaluate_population(&pop, &m), vec![95, 80]);
    }

    #[test]
    fn test_closure_observer() {
        let mut seen = Vec::new();
        {
            let mut obs = |s: &GenerationStats| seen.push(s.iteration);
            obs.on_generation(&GenerationStats {
                iteration: 3,
                generation_best: Some(1),
                best_distance: Some(1),
                stagnation_counter: 0,
            });
        }
        assert_eq!(seen, vec![3]);
    }
}
