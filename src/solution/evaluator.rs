//! Fitness evaluation of assignment vectors.

use crate::error::{PlacementError, Result};
use crate::model::Problem;

/// Breakdown of a solution's fitness.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Evaluation {
    /// `sum(cost[c][site(c)] * weight(c))`.
    pub raw_cost: f64,
    /// `sum(max(0, load(s) - capacity(s)))` over all sites.
    pub overflow: f64,
    /// Variance of `load(s) / capacity(s)` over all sites.
    pub imbalance: f64,
    /// Operating cost of the sites hosting at least one cloudlet.
    pub operating_cost: f64,
    /// The scalar being minimized.
    pub fitness: f64,
}

impl Evaluation {
    pub fn is_feasible(&self) -> bool {
        self.overflow == 0.0
    }
}

/// Aggregate demand placed on each site.
pub fn site_loads(genes: &[usize], problem: &Problem) -> Vec<f64> {
    let mut loads = vec![0.0; problem.num_sites()];
    for (c, &s) in genes.iter().enumerate() {
        loads[s] += problem.demand(c);
    }
    loads
}

/// True iff no site's load exceeds its capacity.
pub fn is_feasible(genes: &[usize], problem: &Problem) -> bool {
    site_loads(genes, problem)
        .iter()
        .zip(problem.sites())
        .all(|(&load, site)| load <= site.capacity)
}

/// Scores an assignment vector against `problem`.
///
/// # Errors
///
/// [`PlacementError::Configuration`] when `genes` does not fit `problem`
/// (wrong length or a site index out of range), and
/// [`PlacementError::NumericAnomaly`] when any term is non-finite or the raw
/// cost is negative.
pub fn evaluate(genes: &[usize], problem: &Problem) -> Result<Evaluation> {
    let objective = problem.objective();
    let n_sites = problem.num_sites();
    if genes.len() != problem.num_cloudlets() {
        return Err(PlacementError::config(format!(
            "assignment has {} entries, expected {}",
            genes.len(),
            problem.num_cloudlets()
        )));
    }
    if let Some((c, &s)) = genes.iter().enumerate().find(|&(_, &s)| s >= n_sites) {
        return Err(PlacementError::config(format!(
            "cloudlet {c} assigned to site {s}, but there are only {n_sites} sites"
        )));
    }

    let mut loads = vec![0.0; n_sites];
    let mut used = vec![false; n_sites];
    let mut raw_cost = 0.0;
    for (c, &s) in genes.iter().enumerate() {
        loads[s] += problem.demand(c);
        used[s] = true;
        raw_cost += problem.cost(c, s) * problem.weight(c);
    }
    if !raw_cost.is_finite() || raw_cost < 0.0 {
        return Err(PlacementError::NumericAnomaly {
            context: "raw cost",
            value: raw_cost,
        });
    }

    let mut overflow = 0.0;
    let mut operating_cost = 0.0;
    for (s, site) in problem.sites().iter().enumerate() {
        if loads[s] > site.capacity {
            overflow += loads[s] - site.capacity;
        }
        if used[s] {
            operating_cost += site.operating_cost;
        }
    }

    let utils: Vec<f64> = loads
        .iter()
        .enumerate()
        .map(|(s, &l)| problem.utilization(s, l))
        .collect();
    let mean_util = utils.iter().sum::<f64>() / n_sites as f64;
    let imbalance = utils
        .iter()
        .map(|u| (u - mean_util) * (u - mean_util))
        .sum::<f64>()
        / n_sites as f64;

    let mut fitness = raw_cost
        + objective.balance_weight * imbalance
        + objective.operating_cost_weight * operating_cost;
    if overflow > 0.0 {
        fitness += objective.penalty_coefficient * overflow + problem.infeasibility_floor();
    }
    if !fitness.is_finite() {
        return Err(PlacementError::NumericAnomaly {
            context: "fitness",
            value: fitness,
        });
    }

    Ok(Evaluation {
        raw_cost,
        overflow,
        imbalance,
        operating_cost,
        fitness,
    })
}
