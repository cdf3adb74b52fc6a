//! Solution representation and evaluation.
//!
//! A [`Solution`] is an assignment vector (one site index per cloudlet)
//! that owns a lazily computed [`Evaluation`]. Any write to the vector goes
//! through [`Solution::assign`], which drops the cached evaluation, so a
//! stale fitness can never be observed.

mod evaluator;

pub use evaluator::{evaluate, is_feasible, site_loads, Evaluation};

use rand::Rng;

use crate::error::{PlacementError, Result};
use crate::model::Problem;

/// A candidate assignment of cloudlets to sites.
///
/// Clones are deep: every individual of a population owns its own vector.
///
/// A deserialized `Solution` is not checked against any problem; its first
/// [`evaluate`](Solution::evaluate) rejects a vector that does not fit with
/// [`PlacementError::Configuration`]. Use [`from_genes`](Solution::from_genes)
/// to validate up front.
///
/// # Examples
///
/// ```
/// use cloudlet_hga::model::{Cloudlet, Problem, Site};
/// use cloudlet_hga::solution::Solution;
///
/// let problem = Problem::new(
///     vec![Site::new(0, 10.0), Site::new(1, 10.0)],
///     vec![Cloudlet::new(0, 4.0)],
///     vec![vec![1.0, 2.0]],
/// )
/// .unwrap();
///
/// let mut s = Solution::from_genes(&problem, vec![1]).unwrap();
/// assert_eq!(s.evaluate(&problem).unwrap(), 2.0);
///
/// s.assign(0, 0);
/// assert!(!s.is_evaluated());
/// assert_eq!(s.evaluate(&problem).unwrap(), 1.0);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    genes: Vec<usize>,
    #[cfg_attr(feature = "serde", serde(skip))]
    evaluation: Option<Evaluation>,
}

impl Solution {
    /// Assigns every cloudlet to a uniformly random site.
    pub fn random<R: Rng>(problem: &Problem, rng: &mut R) -> Self {
        let n_sites = problem.num_sites();
        let genes = (0..problem.num_cloudlets())
            .map(|_| rng.random_range(0..n_sites))
            .collect();
        Self::unchecked(genes)
    }

    /// Wraps an explicit assignment vector.
    ///
    /// # Errors
    ///
    /// [`PlacementError::Configuration`] if the length differs from the
    /// number of cloudlets or any entry is not a valid site index.
    pub fn from_genes(problem: &Problem, genes: Vec<usize>) -> Result<Self> {
        if genes.len() != problem.num_cloudlets() {
            return Err(PlacementError::config(format!(
                "assignment has {} entries, expected {}",
                genes.len(),
                problem.num_cloudlets()
            )));
        }
        if let Some((c, &s)) = genes
            .iter()
            .enumerate()
            .find(|&(_, &s)| s >= problem.num_sites())
        {
            return Err(PlacementError::config(format!(
                "cloudlet {c} assigned to site {s}, but there are only {} sites",
                problem.num_sites()
            )));
        }
        Ok(Self::unchecked(genes))
    }

    pub(crate) fn unchecked(genes: Vec<usize>) -> Self {
        Self {
            genes,
            evaluation: None,
        }
    }

    /// The assignment vector.
    pub fn genes(&self) -> &[usize] {
        &self.genes
    }

    pub fn into_genes(self) -> Vec<usize> {
        self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Site currently hosting `cloudlet`.
    pub fn site_of(&self, cloudlet: usize) -> usize {
        self.genes[cloudlet]
    }

    /// Moves `cloudlet` to `site`, invalidating the cached evaluation if the
    /// assignment changed.
    ///
    /// # Panics
    /// Panics if `cloudlet` is out of range.
    pub fn assign(&mut self, cloudlet: usize, site: usize) {
        if self.genes[cloudlet] != site {
            self.genes[cloudlet] = site;
            self.evaluation = None;
        }
    }

    /// Returns the fitness, computing and caching it if needed.
    pub fn evaluate(&mut self, problem: &Problem) -> Result<f64> {
        if let Some(e) = &self.evaluation {
            return Ok(e.fitness);
        }
        let e = evaluate(&self.genes, problem)?;
        self.evaluation = Some(e);
        Ok(e.fitness)
    }

    /// Cached fitness, or `f64::INFINITY` when not yet evaluated.
    pub fn fitness(&self) -> f64 {
        self.evaluation.map_or(f64::INFINITY, |e| e.fitness)
    }

    pub fn evaluation(&self) -> Option<&Evaluation> {
        self.evaluation.as_ref()
    }

    pub fn is_evaluated(&self) -> bool {
        self.evaluation.is_some()
    }

    /// True iff no site's load exceeds its capacity.
    pub fn is_feasible(&self, problem: &Problem) -> bool {
        match &self.evaluation {
            Some(e) => e.is_feasible(),
            None => is_feasible(&self.genes, problem),
        }
    }

    /// Aggregate demand placed on each site.
    pub fn site_loads(&self, problem: &Problem) -> Vec<f64> {
        site_loads(&self.genes, problem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cloudlet, Site};
    use crate::random::create_rng;
    use proptest::prelude::*;

    fn problem(n_cloudlets: usize, n_sites: usize) -> Problem {
        let sites = (0..n_sites).map(|i| Site::new(i, 10.0)).collect();
        let cloudlets = (0..n_cloudlets).map(|i| Cloudlet::new(i, 3.0)).collect();
        let costs = (0..n_cloudlets)
            .map(|c| (0..n_sites).map(|s| ((c * 7 + s * 3) % 5) as f64).collect())
            .collect();
        Problem::new(sites, cloudlets, costs).unwrap()
    }

    #[test]
    fn test_random_within_range() {
        let p = problem(50, 4);
        let mut rng = create_rng(1);
        let s = Solution::random(&p, &mut rng);
        assert_eq!(s.len(), 50);
        assert!(s.genes().iter().all(|&g| g < 4));
        assert!(!s.is_evaluated());
        assert_eq!(s.fitness(), f64::INFINITY);
    }

    #[test]
    fn test_from_genes_validation() {
        let p = problem(3, 2);
        assert!(Solution::from_genes(&p, vec![0, 1]).is_err());
        assert!(Solution::from_genes(&p, vec![0, 1, 2]).is_err());
        assert!(Solution::from_genes(&p, vec![0, 1, 1]).is_ok());
    }

    #[test]
    fn test_unvalidated_genes_fail_evaluation() {
        // Same shape as a deserialized vector that never went through from_genes.
        let p = problem(3, 2);
        let mut s = Solution::unchecked(vec![0, 5, 1]);
        let err = s.evaluate(&p).unwrap_err();
        assert!(matches!(err, PlacementError::Configuration(_)));
        assert!(!s.is_evaluated());
    }

    #[test]
    fn test_cache_invalidated_on_assign() {
        let p = problem(3, 2);
        let mut s = Solution::from_genes(&p, vec![0, 0, 0]).unwrap();
        let f0 = s.evaluate(&p).unwrap();
        assert!(s.is_evaluated());
        assert_eq!(s.fitness(), f0);

        // Same site: cache survives.
        s.assign(1, 0);
        assert!(s.is_evaluated());

        s.assign(1, 1);
        assert!(!s.is_evaluated());
        let f1 = s.evaluate(&p).unwrap();
        assert_eq!(f1, evaluate(s.genes(), &p).unwrap().fitness);
    }

    #[test]
    fn test_clone_is_deep() {
        let p = problem(3, 2);
        let a = Solution::from_genes(&p, vec![0, 0, 0]).unwrap();
        let mut b = a.clone();
        b.assign(0, 1);
        assert_eq!(a.genes(), &[0, 0, 0]);
        assert_eq!(b.genes(), &[1, 0, 0]);
    }

    #[test]
    fn test_feasibility_and_loads() {
        let p = problem(4, 2);
        let s = Solution::from_genes(&p, vec![0, 0, 0, 1]).unwrap();
        assert!(s.is_feasible(&p));
        assert_eq!(s.site_loads(&p), vec![9.0, 3.0]);
        let s = Solution::from_genes(&p, vec![0, 0, 0, 0]).unwrap();
        assert!(!s.is_feasible(&p));
    }

    proptest! {
        #[test]
        fn prop_evaluate_deterministic(seed in any::<u64>()) {
            let p = problem(12, 3);
            let mut rng = create_rng(seed);
            let mut a = Solution::random(&p, &mut rng);
            let mut b = Solution::from_genes(&p, a.genes().to_vec()).unwrap();
            let fa = a.evaluate(&p).unwrap();
            let fb = b.evaluate(&p).unwrap();
            prop_assert_eq!(fa.to_bits(), fb.to_bits());
            prop_assert_eq!(fa.to_bits(), a.evaluate(&p).unwrap().to_bits());
        }
    }
}
