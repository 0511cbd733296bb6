//! Permutation crossover and mutation operators.
//!
//! All operators take and return full permutations; none of them can leave
//! a tour with duplicated or missing nodes.
//!
//! # Crossover
//!
//! - [`pmx_crossover`] (PMX): Goldberg & Lingle (1985), with explicit cut
//!   points; [`crossover_population`] applies it to adjacent pairs.
//!
//! # Mutation
//!
//! - [`swap_mutation`]: reverses a random window `[x1, x2)`
//! - [`inversion_mutation`]: the same window reversal, driven by its own
//!   probability so the two can be tuned and adapted independently
//!
//! # References
//!
//! - Goldberg & Lingle (1985), "Alleles, Loci, and the Traveling Salesman Problem"
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use super::types::Tour;
use rand::Rng;

// ============================================================================
// Crossover
// ============================================================================

/// Draws PMX cut points `(a, b)` with `0 <= a <= n-2` and `a < b <= n-1`.
///
/// Returns `None` for `n < 2`, where no segment exists.
pub fn random_cut_points<R: Rng>(n: usize, rng: &mut R) -> Option<(usize, usize)> {
    if n < 2 {
        return None;
    }
    let a = rng.random_range(0..=n - 2);
    let b = rng.random_range(a + 1..=n - 1);
    Some((a, b))
}

/// Partially Mapped Crossover on the segment `[a, b)`.
///
/// `child1` takes parent2's segment and `child2` takes parent1's. Outside
/// the segment each child starts from its own parent's node and follows
/// the segment mapping (donor node → own node at the same position) until
/// it reaches a node not in the donor segment.
///
/// # Panics
/// Panics if the parents differ in length or `a < b <= len` does not hold.
///
/// # Complexity
/// O(n) time, O(n) space
pub fn pmx_crossover(
    parent1: &[usize],
    parent2: &[usize],
    a: usize,
    b: usize,
) -> (Vec<usize>, Vec<usize>) {
    assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");
    assert!(a < b && b <= parent1.len(), "invalid segment [{a}, {b})");

    (
        pmx_child(parent1, parent2, a, b),
        pmx_child(parent2, parent1, a, b),
    )
}

/// One PMX child: `donor`'s segment, `own` elsewhere, repaired by mapping.
fn pmx_child(own: &[usize], donor: &[usize], a: usize, b: usize) -> Vec<usize> {
    let n = own.len();
    let mut mapping: Vec<Option<usize>> = vec![None; n];
    for i in a..b {
        mapping[donor[i]] = Some(own[i]);
    }

    let mut child = own.to_vec();
    child[a..b].copy_from_slice(&donor[a..b]);

    // Each hop lands on a distinct segment position, so the chase ends
    // within `b - a` steps.
    let max_hops = b - a;
    for i in (0..a).chain(b..n) {
        let mut node = own[i];
        let mut hops = 0;
        while let Some(next) = mapping[node] {
            node = next;
            hops += 1;
            debug_assert!(hops <= max_hops, "PMX mapping chase exceeded segment length");
        }
        child[i] = node;
    }

    child
}

/// Applies PMX to adjacent pairs `(0, 1), (2, 3), ...`.
///
/// Each pair is recombined with probability `probability` and otherwise
/// copied through unchanged. An odd trailing tour is appended unchanged.
/// Children keep their parents' positions.
pub fn crossover_population<R: Rng>(
    population: Vec<Tour>,
    probability: f64,
    rng: &mut R,
) -> Vec<Tour> {
    let mut next = Vec::with_capacity(population.len());
    let mut tours = population.into_iter();

    while let Some(parent1) = tours.next() {
        let Some(parent2) = tours.next() else {
            next.push(parent1);
            break;
        };

        if rng.random::<f64>() >= probability {
            next.push(parent1);
            next.push(parent2);
            continue;
        }

        match random_cut_points(parent1.len(), rng) {
            Some((a, b)) => {
                let (c1, c2) = pmx_crossover(parent1.nodes(), parent2.nodes(), a, b);
                next.push(Tour::new(c1));
                next.push(Tour::new(c2));
            }
            None => {
                next.push(parent1);
                next.push(parent2);
            }
        }
    }

    next
}

// ============================================================================
// Mutation
// ============================================================================

/// Draws a reversal window `(x1, x2)` with `0 <= x1 <= n-2` and `x1 <= x2 <= n-1`.
///
/// Returns `None` for `n < 2`.
pub fn random_window<R: Rng>(n: usize, rng: &mut R) -> Option<(usize, usize)> {
    if n < 2 {
        return None;
    }
    let x1 = rng.random_range(0..=n - 2);
    let x2 = rng.random_range(x1..=n - 1);
    Some((x1, x2))
}

/// Reverses `perm[x1..x2]` for a random window. `x1 == x2` leaves it as is.
///
/// Despite its name this is a segment reversal, not a pairwise exchange.
///
/// # Complexity
/// O(n) worst case
pub fn swap_mutation<R: Rng>(perm: &mut [usize], rng: &mut R) {
    if let Some((x1, x2)) = random_window(perm.len(), rng) {
        perm[x1..x2].reverse();
    }
}

/// Reverses `perm[x1..x2]` for a random window (2-opt move).
///
/// # Complexity
/// O(n) worst case
pub fn inversion_mutation<R: Rng>(perm: &mut [usize], rng: &mut R) {
    if let Some((x1, x2)) = random_window(perm.len(), rng) {
        perm[x1..x2].reverse();
    }
}

/// Applies `operator` to each tour independently with `probability`.
pub fn mutate_population<R: Rng>(
    population: &mut [Tour],
    probability: f64,
    operator: fn(&mut [usize], &mut R),
    rng: &mut R,
) {
    for tour in population.iter_mut() {
        if rng.random::<f64>() < probability {
            operator(tour.nodes_mut(), rng);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
