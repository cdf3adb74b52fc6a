//! Parent selection.
//!
//! # References
//!
//! - Miller & Goldberg (1995), "Genetic Algorithms, Tournament Selection,
//!   and the Effects of Noise"
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use rand::seq::index;
use rand::Rng;

use crate::error::{PlacementError, Result};
use crate::solution::Solution;

/// Tournament selection without replacement.
///
/// Draws `k` distinct individuals uniformly and returns the index of the one
/// with the lowest cached fitness. Ties go to the first drawn. `k` is
/// clamped to `[1, population.len()]`.
///
/// Higher `k` = stronger selection pressure:
/// - k=2: light pressure (good for diversity)
/// - k=3-5: moderate pressure (typical default)
/// - k>5: strong pressure (risk of premature convergence)
///
/// # Complexity
/// O(k) per selection
///
/// # Errors
/// [`PlacementError::EmptyPopulation`] if `population` is empty.
pub fn tournament<R: Rng>(population: &[Solution], k: usize, rng: &mut R) -> Result<usize> {
    let n = population.len();
    if n == 0 {
        return Err(PlacementError::EmptyPopulation);
    }
    let k = k.clamp(1, n);

    let mut contenders = index::sample(rng, n, k).into_iter();
    let mut best_idx = contenders.next().ok_or(PlacementError::EmptyPopulation)?;
    for idx in contenders {
        if population[idx].fitness() < population[best_idx].fitness() {
            best_idx = idx;
        }
    }
    Ok(best_idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cloudlet, Problem, Site};
    use crate::random::create_rng;

    /// Population of single-cloudlet solutions whose fitness is the cost of
    /// their assigned site.
    fn make_population(costs: &[f64]) -> Vec<Solution> {
        let n = costs.len();
        let problem = Problem::new(
            (0..n).map(|i| Site::new(i, 10.0)).collect(),
            vec![Cloudlet::new(0, 1.0)],
            vec![costs.to_vec()],
        )
        .unwrap();
        (0..n)
            .map(|s| {
                let mut sol = Solution::from_genes(&problem, vec![s]).unwrap();
                sol.evaluate(&problem).unwrap();
                sol
            })
            .collect()
    }

    #[test]
    fn test_full_tournament_always_picks_best() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = create_rng(42);
        // Without replacement, k = n sees every individual.
        for _ in 0..100 {
            assert_eq!(tournament(&pop, 4, &mut rng).unwrap(), 2);
        }
    }

    #[test]
    fn test_tournament_favors_best() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        let n = 10000;
        for _ in 0..n {
            counts[tournament(&pop, 2, &mut rng).unwrap()] += 1;
        }
        // Index 2 wins every tournament it enters: P = 1/2.
        assert!(counts[2] > 4000, "counts: {counts:?}");
        // Index 0 never wins.
        assert_eq!(counts[0], 0);
    }

    #[test]
    fn test_tournament_size_1_is_random() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        for _ in 0..10000 {
            counts[tournament(&pop, 1, &mut rng).unwrap()] += 1;
        }
        for &c in &counts {
            assert!(c > 1500, "expected uniform, got counts: {counts:?}");
        }
    }

    #[test]
    fn test_oversized_tournament_clamped() {
        let pop = make_population(&[3.0, 2.0]);
        let mut rng = create_rng(1);
        assert_eq!(tournament(&pop, 10, &mut rng).unwrap(), 1);
    }

    #[test]
    fn test_empty_population_is_error() {
        let pop: Vec<Solution> = vec![];
        let mut rng = create_rng(42);
        assert_eq!(
            tournament(&pop, 3, &mut rng),
            Err(PlacementError::EmptyPopulation)
        );
    }
}
