//! Succession: forming the next population from the old and new ones.

use super::types::Tour;
use crate::matrix::DistanceMatrix;

/// Succession policy.
///
/// # Examples
///
/// ```
/// use u_tsp::ga::Succession;
///
/// // 75% of the next population comes from the offspring.
/// let s = Succession::Partial { ratio: 0.75 };
/// assert_eq!(s.offspring_count(11), 8);
/// assert_eq!(Succession::Full.offspring_count(11), 11);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Succession {
    /// Offspring replace the old population entirely.
    #[default]
    Full,

    /// Best `round(n * ratio)` offspring followed by the best remaining
    /// old tours.
    Partial {
        /// Share of the next population taken from the offspring (0.0–1.0).
        ratio: f64,
    },
}

impl Succession {
    /// Number of offspring kept for a population of size `n`.
    pub fn offspring_count(&self, n: usize) -> usize {
        match *self {
            Succession::Full => n,
            Succession::Partial { ratio } => {
                ((n as f64 * ratio.clamp(0.0, 1.0)).round() as usize).min(n)
            }
        }
    }

    /// Returns true if the old population must be kept for [`apply`](Self::apply).
    pub fn needs_old_population(&self) -> bool {
        matches!(self, Succession::Partial { .. })
    }

    /// Merges `old` and `new` into the next population.
    ///
    /// Result size equals `new.len()`. For [`Partial`](Succession::Partial)
    /// both inputs are expected to have the same size.
    pub fn apply(&self, old: Vec<Tour>, new: Vec<Tour>, matrix: &DistanceMatrix) -> Vec<Tour> {
        match self {
            Succession::Full => new,
            Succession::Partial { .. } => {
                let n = new.len();
                let from_new = self.offspring_count(n);
                let mut next = n_best(new, from_new, matrix);
                next.extend(n_best(old, n - from_new, matrix));
                next
            }
        }
    }
}

/// The `n` shortest tours, ascending by length, stable on ties.
///
/// Returns fewer than `n` tours if the population is smaller.
pub fn n_best(population: Vec<Tour>, n: usize, matrix: &DistanceMatrix) -> Vec<Tour> {
    let mut scored: Vec<(u64, Tour)> = population
        .into_iter()
        .map(|t| (t.distance(matrix), t))
        .collect();
    scored.sort_by_key(|(d, _)| *d);
    scored.into_iter().take(n).map(|(_, t)| t).collect()
}
