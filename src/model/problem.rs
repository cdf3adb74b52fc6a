//! Sites, cloudlets and the validated [`Problem`] instance.

use crate::error::{PlacementError, Result};

/// A point in the plane, used to derive latency from distance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A candidate hosting site.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Site {
    /// Caller-chosen identifier. Not required to match the site's index.
    pub id: usize,
    /// Maximum aggregate demand the site can host.
    pub capacity: f64,
    /// Fixed cost paid when at least one cloudlet is hosted here.
    pub operating_cost: f64,
    pub position: Position,
}

impl Site {
    pub fn new(id: usize, capacity: f64) -> Self {
        Self {
            id,
            capacity,
            operating_cost: 0.0,
            position: Position::default(),
        }
    }

    pub fn with_operating_cost(mut self, cost: f64) -> Self {
        self.operating_cost = cost;
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }
}

/// A workload unit that must be placed on exactly one site.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cloudlet {
    pub id: usize,
    /// Resource demand counted against the hosting site's capacity.
    pub demand: f64,
    /// Multiplier applied to this cloudlet's hosting cost.
    pub weight: f64,
    /// Where the workload originates; latency is measured from here.
    pub origin: Position,
}

impl Cloudlet {
    pub fn new(id: usize, demand: f64) -> Self {
        Self {
            id,
            demand,
            weight: 1.0,
            origin: Position::default(),
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_origin(mut self, origin: Position) -> Self {
        self.origin = origin;
        self
    }
}

/// Weights of the fitness terms.
///
/// Fitness of an assignment is
///
/// ```text
/// raw_cost
///   + balance_weight        * variance(load(s) / capacity(s))
///   + operating_cost_weight * sum(operating_cost(s) for used sites)
///   + penalty_coefficient   * sum(max(0, load(s) - capacity(s)))
///   + infeasibility_floor   (only when some site overflows)
/// ```
///
/// With the defaults, a feasible assignment's fitness is exactly its raw
/// weighted cost.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Objective {
    /// Cost per unit of capacity overflow. Must be positive.
    pub penalty_coefficient: f64,
    /// Weight of the utilization-variance term (0 disables it).
    pub balance_weight: f64,
    /// Weight of the fixed operating cost of used sites (0 disables it).
    pub operating_cost_weight: f64,
}

impl Default for Objective {
    fn default() -> Self {
        Self {
            penalty_coefficient: 1_000.0,
            balance_weight: 0.0,
            operating_cost_weight: 0.0,
        }
    }
}

impl Objective {
    pub fn with_penalty_coefficient(mut self, p: f64) -> Self {
        self.penalty_coefficient = p;
        self
    }

    pub fn with_balance_weight(mut self, w: f64) -> Self {
        self.balance_weight = w;
        self
    }

    pub fn with_operating_cost_weight(mut self, w: f64) -> Self {
        self.operating_cost_weight = w;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.penalty_coefficient.is_finite() || self.penalty_coefficient <= 0.0 {
            return Err(PlacementError::config(format!(
                "penalty_coefficient must be positive and finite, got {}",
                self.penalty_coefficient
            )));
        }
        if !self.balance_weight.is_finite() || self.balance_weight < 0.0 {
            return Err(PlacementError::config(format!(
                "balance_weight must be non-negative, got {}",
                self.balance_weight
            )));
        }
        if !self.operating_cost_weight.is_finite() || self.operating_cost_weight < 0.0 {
            return Err(PlacementError::config(format!(
                "operating_cost_weight must be non-negative, got {}",
                self.operating_cost_weight
            )));
        }
        Ok(())
    }
}

/// A validated, immutable placement instance.
///
/// # Examples
///
/// ```
/// use cloudlet_hga::model::{Cloudlet, Problem, Site};
///
/// let sites = vec![Site::new(0, 10.0), Site::new(1, 10.0)];
/// let cloudlets = vec![Cloudlet::new(0, 4.0), Cloudlet::new(1, 6.0)];
/// let costs = vec![vec![1.0, 2.0], vec![2.0, 1.0]];
///
/// let problem = Problem::new(sites, cloudlets, costs).unwrap();
/// assert_eq!(problem.num_sites(), 2);
/// assert_eq!(problem.cost(1, 1), 1.0);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Problem {
    sites: Vec<Site>,
    cloudlets: Vec<Cloudlet>,
    /// Row-major `cloudlet × site` cost matrix.
    costs: Vec<f64>,
    objective: Objective,
    infeasibility_floor: f64,
}

impl Problem {
    /// Builds a problem from an explicit `cloudlets × sites` cost matrix.
    ///
    /// # Errors
    ///
    /// [`PlacementError::Configuration`] if either list is empty, the matrix
    /// shape does not match, any value is negative or non-finite, or some
    /// cloudlet's demand exceeds every site's capacity.
    pub fn new(sites: Vec<Site>, cloudlets: Vec<Cloudlet>, costs: Vec<Vec<f64>>) -> Result<Self> {
        if costs.len() != cloudlets.len() {
            return Err(PlacementError::config(format!(
                "cost matrix has {} rows, expected one per cloudlet ({})",
                costs.len(),
                cloudlets.len()
            )));
        }
        let n_sites = sites.len();
        let mut flat = Vec::with_capacity(cloudlets.len() * n_sites);
        for (c, row) in costs.iter().enumerate() {
            if row.len() != n_sites {
                return Err(PlacementError::config(format!(
                    "cost row {c} has {} entries, expected {n_sites}",
                    row.len()
                )));
            }
            flat.extend_from_slice(row);
        }
        Self::build(sites, cloudlets, flat, Objective::default())
    }

    /// Builds a problem whose cost is the distance from each cloudlet's
    /// origin to each site's position.
    pub fn with_latency(sites: Vec<Site>, cloudlets: Vec<Cloudlet>) -> Result<Self> {
        let costs = cloudlets
            .iter()
            .flat_map(|c| sites.iter().map(move |s| c.origin.distance(&s.position)))
            .collect();
        Self::build(sites, cloudlets, costs, Objective::default())
    }

    /// Replaces the objective weights, revalidating them.
    pub fn with_objective(self, objective: Objective) -> Result<Self> {
        Self::build(self.sites, self.cloudlets, self.costs, objective)
    }

    fn build(
        sites: Vec<Site>,
        cloudlets: Vec<Cloudlet>,
        costs: Vec<f64>,
        objective: Objective,
    ) -> Result<Self> {
        if sites.is_empty() {
            return Err(PlacementError::config("problem has no sites"));
        }
        if cloudlets.is_empty() {
            return Err(PlacementError::config("problem has no cloudlets"));
        }
        objective.validate()?;

        for (i, s) in sites.iter().enumerate() {
            if !s.capacity.is_finite() || s.capacity <= 0.0 {
                return Err(PlacementError::config(format!(
                    "site {i} capacity must be positive and finite, got {}",
                    s.capacity
                )));
            }
            check_non_negative(s.operating_cost, || format!("site {i} operating_cost"))?;
        }

        let max_capacity = sites.iter().map(|s| s.capacity).fold(0.0, f64::max);
        for (i, c) in cloudlets.iter().enumerate() {
            check_non_negative(c.demand, || format!("cloudlet {i} demand"))?;
            check_non_negative(c.weight, || format!("cloudlet {i} weight"))?;
            if c.demand > max_capacity {
                return Err(PlacementError::config(format!(
                    "cloudlet {i} demand {} exceeds every site capacity (max {max_capacity})",
                    c.demand
                )));
            }
        }

        let n_sites = sites.len();
        for (k, &v) in costs.iter().enumerate() {
            check_non_negative(v, || format!("cost[{}][{}]", k / n_sites, k % n_sites))?;
        }

        let mut problem = Self {
            sites,
            cloudlets,
            costs,
            objective,
            infeasibility_floor: 0.0,
        };
        problem.infeasibility_floor = problem.feasible_fitness_bound() + 1.0;
        if !problem.infeasibility_floor.is_finite() {
            return Err(PlacementError::config(
                "cost magnitudes overflow the fitness range",
            ));
        }
        Ok(problem)
    }

    /// Upper bound on the fitness of any feasible assignment.
    ///
    /// Utilizations of a feasible assignment lie in `[0, 1]`, so their
    /// variance is at most 0.25.
    fn feasible_fitness_bound(&self) -> f64 {
        let raw: f64 = (0..self.num_cloudlets())
            .map(|c| {
                let worst = self.cost_row(c).iter().copied().fold(0.0, f64::max);
                worst * self.cloudlets[c].weight
            })
            .sum();
        let operating: f64 = self.sites.iter().map(|s| s.operating_cost).sum();
        raw + self.objective.balance_weight * 0.25
            + self.objective.operating_cost_weight * operating
    }

    pub fn num_sites(&self) -> usize {
        self.sites.len()
    }

    pub fn num_cloudlets(&self) -> usize {
        self.cloudlets.len()
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn cloudlets(&self) -> &[Cloudlet] {
        &self.cloudlets
    }

    pub fn capacity(&self, site: usize) -> f64 {
        self.sites[site].capacity
    }

    pub fn demand(&self, cloudlet: usize) -> f64 {
        self.cloudlets[cloudlet].demand
    }

    pub fn weight(&self, cloudlet: usize) -> f64 {
        self.cloudlets[cloudlet].weight
    }

    /// Unweighted cost of hosting `cloudlet` at `site`.
    pub fn cost(&self, cloudlet: usize, site: usize) -> f64 {
        self.costs[cloudlet * self.sites.len() + site]
    }

    /// Costs of `cloudlet` at every site, in site order.
    pub fn cost_row(&self, cloudlet: usize) -> &[f64] {
        let n = self.sites.len();
        &self.costs[cloudlet * n..(cloudlet + 1) * n]
    }

    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    /// Constant added to the fitness of every infeasible assignment.
    ///
    /// Strictly greater than the fitness of any feasible assignment, so
    /// infeasible solutions always rank last.
    pub fn infeasibility_floor(&self) -> f64 {
        self.infeasibility_floor
    }

    pub fn total_demand(&self) -> f64 {
        self.cloudlets.iter().map(|c| c.demand).sum()
    }

    pub fn total_capacity(&self) -> f64 {
        self.sites.iter().map(|s| s.capacity).sum()
    }

    /// Fraction of `site`'s capacity used by `load`. Above 1.0 means overflow.
    pub fn utilization(&self, site: usize, load: f64) -> f64 {
        load / self.sites[site].capacity
    }
}

fn check_non_negative(value: f64, what: impl FnOnce() -> String) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PlacementError::config(format!(
            "{} must be non-negative and finite, got {value}",
            what()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_sites(n: usize, cap: f64) -> Vec<Site> {
        (0..n).map(|i| Site::new(i, cap)).collect()
    }

    fn uniform_cloudlets(n: usize, demand: f64) -> Vec<Cloudlet> {
        (0..n).map(|i| Cloudlet::new(i, demand)).collect()
    }

    #[test]
    fn test_accessors() {
        let problem = Problem::new(
            uniform_sites(2, 10.0),
            uniform_cloudlets(3, 2.0),
            vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]],
        )
        .unwrap();

        assert_eq!(problem.num_sites(), 2);
        assert_eq!(problem.num_cloudlets(), 3);
        assert_eq!(problem.cost(2, 0), 5.0);
        assert_eq!(problem.cost_row(1), &[3.0, 4.0]);
        assert_eq!(problem.capacity(1), 10.0);
        assert_eq!(problem.demand(0), 2.0);
        assert!((problem.total_demand() - 6.0).abs() < 1e-12);
        assert!((problem.total_capacity() - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_structurally_infeasible_rejected() {
        let cloudlets = vec![Cloudlet::new(0, 2.0), Cloudlet::new(1, 11.0)];
        let err = Problem::new(
            uniform_sites(3, 10.0),
            cloudlets,
            vec![vec![1.0; 3], vec![1.0; 3]],
        )
        .unwrap_err();
        assert!(matches!(err, PlacementError::Configuration(_)));
        assert!(err.to_string().contains("cloudlet 1"));
    }

    #[test]
    fn test_empty_rejected() {
        assert!(Problem::new(vec![], uniform_cloudlets(1, 1.0), vec![vec![]]).is_err());
        assert!(Problem::new(uniform_sites(1, 1.0), vec![], vec![]).is_err());
    }

    #[test]
    fn test_bad_matrix_shape_rejected() {
        let r = Problem::new(
            uniform_sites(2, 10.0),
            uniform_cloudlets(2, 1.0),
            vec![vec![1.0, 1.0]],
        );
        assert!(r.is_err());

        let r = Problem::new(
            uniform_sites(2, 10.0),
            uniform_cloudlets(1, 1.0),
            vec![vec![1.0, 1.0, 1.0]],
        );
        assert!(r.is_err());
    }

    #[test]
    fn test_negative_or_nan_values_rejected() {
        let r = Problem::new(
            uniform_sites(2, 10.0),
            uniform_cloudlets(1, 1.0),
            vec![vec![1.0, f64::NAN]],
        );
        assert!(matches!(r, Err(PlacementError::Configuration(_))));

        let r = Problem::new(
            uniform_sites(2, 10.0),
            uniform_cloudlets(1, 1.0),
            vec![vec![-1.0, 1.0]],
        );
        assert!(r.is_err());

        let r = Problem::new(
            uniform_sites(2, 0.0),
            uniform_cloudlets(1, 0.0),
            vec![vec![1.0, 1.0]],
        );
        assert!(r.is_err(), "zero capacity must be rejected");
    }

    #[test]
    fn test_latency_matrix_from_positions() {
        let sites = vec![
            Site::new(0, 10.0).with_position(Position::new(0.0, 0.0)),
            Site::new(1, 10.0).with_position(Position::new(3.0, 4.0)),
        ];
        let cloudlets = vec![Cloudlet::new(0, 1.0).with_origin(Position::new(0.0, 0.0))];
        let problem = Problem::with_latency(sites, cloudlets).unwrap();
        assert!((problem.cost(0, 0) - 0.0).abs() < 1e-12);
        assert!((problem.cost(0, 1) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_objective_validation() {
        let problem = Problem::new(
            uniform_sites(1, 10.0),
            uniform_cloudlets(1, 1.0),
            vec![vec![1.0]],
        )
        .unwrap();
        let r = problem
            .clone()
            .with_objective(Objective::default().with_penalty_coefficient(0.0));
        assert!(r.is_err());
        let r = problem.with_objective(Objective::default().with_balance_weight(-1.0));
        assert!(r.is_err());
    }

    #[test]
    fn test_infeasibility_floor_bounds_feasible_fitness() {
        let cloudlets = vec![
            Cloudlet::new(0, 1.0).with_weight(2.0),
            Cloudlet::new(1, 1.0).with_weight(1.0),
        ];
        let problem = Problem::new(
            uniform_sites(2, 5.0),
            cloudlets,
            vec![vec![1.0, 3.0], vec![4.0, 2.0]],
        )
        .unwrap();
        // Worst feasible raw cost: 2*3 + 1*4 = 10.
        assert!(problem.infeasibility_floor() > 10.0);
    }

    #[test]
    fn test_utilization() {
        let problem = Problem::new(
            vec![Site::new(0, 8.0), Site::new(1, 4.0)],
            uniform_cloudlets(1, 1.0),
            vec![vec![1.0, 1.0]],
        )
        .unwrap();
        assert_eq!(problem.utilization(0, 2.0), 0.25);
        assert_eq!(problem.utilization(1, 6.0), 1.5);
        assert_eq!(problem.total_capacity(), 12.0);
    }
}
