//! Crossover, mutation and repair operators on assignment vectors.
//!
//! Every operator is a function of its inputs and an explicit random source;
//! none keeps state between calls.
//!
//! # Crossover Operators
//!
//! - [`uniform_crossover`]: each gene from either parent with p = 0.5
//! - [`single_point_crossover`]: prefix from one parent, suffix from the other
//!
//! # Mutation Operators
//!
//! - [`mutate`]: per-gene reassignment to a different site
//! - [`reassign_gene`]: single-gene move, shared with the SA neighborhood
//!
//! # Repair
//!
//! - [`repair`]: greedy capacity repair
//!
//! # References
//!
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"
//! - Coello (2002), "Theoretical and numerical constraint-handling techniques
//!   used with evolutionary algorithms"

use rand::Rng;

use crate::model::Problem;
use crate::solution::Solution;

/// Crossover operator applied to a pair of parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Crossover {
    /// Each gene taken from either parent with independent probability 0.5.
    #[default]
    Uniform,
    /// Genes before a random cut point from one parent, the rest from the other.
    SinglePoint,
}

impl Crossover {
    /// Produces two complementary children.
    ///
    /// # Panics
    /// Panics if the parents have different lengths.
    pub fn apply<R: Rng>(
        &self,
        parent1: &Solution,
        parent2: &Solution,
        rng: &mut R,
    ) -> (Solution, Solution) {
        let (a, b) = match self {
            Crossover::Uniform => uniform_crossover(parent1.genes(), parent2.genes(), rng),
            Crossover::SinglePoint => {
                single_point_crossover(parent1.genes(), parent2.genes(), rng)
            }
        };
        (Solution::unchecked(a), Solution::unchecked(b))
    }
}

/// Uniform crossover.
///
/// Child 1 takes each gene from `parent1` or `parent2` with probability 0.5;
/// child 2 takes the gene child 1 did not.
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if parents have different lengths.
pub fn uniform_crossover<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");
    parent1
        .iter()
        .zip(parent2)
        .map(|(&a, &b)| if rng.random_bool(0.5) { (a, b) } else { (b, a) })
        .unzip()
}

/// Single-point crossover.
///
/// Cuts both parents at a random point in `1..n` and swaps the tails.
/// Vectors shorter than two genes are returned unchanged.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn single_point_crossover<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    if n < 2 {
        return (parent1.to_vec(), parent2.to_vec());
    }
    let point = rng.random_range(1..n);
    let mut c1 = parent1[..point].to_vec();
    c1.extend_from_slice(&parent2[point..]);
    let mut c2 = parent2[..point].to_vec();
    c2.extend_from_slice(&parent1[point..]);
    (c1, c2)
}

/// Moves `cloudlet` to a uniformly random site other than its current one.
///
/// No-op when there is only one site.
pub fn reassign_gene<R: Rng>(
    solution: &mut Solution,
    cloudlet: usize,
    num_sites: usize,
    rng: &mut R,
) {
    if num_sites < 2 {
        return;
    }
    let current = solution.site_of(cloudlet);
    let mut site = rng.random_range(0..num_sites - 1);
    if site >= current {
        site += 1;
    }
    solution.assign(cloudlet, site);
}

/// Per-gene mutation.
///
/// Each gene is, with independent probability `rate`, reassigned to a
/// different uniformly random site. Returns the number of genes changed.
///
/// `rate` must lie in `[0, 1]`.
pub fn mutate<R: Rng>(solution: &mut Solution, num_sites: usize, rate: f64, rng: &mut R) -> usize {
    if rate <= 0.0 || num_sites < 2 {
        return 0;
    }
    let mut changed = 0;
    for c in 0..solution.len() {
        if rng.random_bool(rate) {
            reassign_gene(solution, c, num_sites, rng);
            changed += 1;
        }
    }
    changed
}

/// Greedy capacity repair.
///
/// For each overflowing site, cloudlets are moved off it, largest demand
/// first, to the cheapest other site that still has room for them, until the
/// site fits or no such move exists. Cloudlets that cannot be moved stay put,
/// so the result may remain infeasible. Returns the number of moves.
pub fn repair(solution: &mut Solution, problem: &Problem) -> usize {
    let mut loads = solution.site_loads(problem);
    let mut moves = 0;

    for s in 0..problem.num_sites() {
        if loads[s] <= problem.capacity(s) {
            continue;
        }
        let mut tenants: Vec<usize> = (0..solution.len())
            .filter(|&c| solution.site_of(c) == s)
            .collect();
        tenants.sort_by(|&a, &b| problem.demand(b).total_cmp(&problem.demand(a)));

        for c in tenants {
            if loads[s] <= problem.capacity(s) {
                break;
            }
            let demand = problem.demand(c);
            let target = (0..problem.num_sites())
                .filter(|&t| t != s && loads[t] + demand <= problem.capacity(t))
                .min_by(|&a, &b| problem.cost(c, a).total_cmp(&problem.cost(c, b)));
            if let Some(t) = target {
                solution.assign(c, t);
                loads[s] -= demand;
                loads[t] += demand;
                moves += 1;
            }
        }
    }
    moves
}
