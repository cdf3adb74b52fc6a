//! Seeded synthetic instances.
//!
//! Sites and cloudlets are scattered uniformly over a square area and the
//! cost matrix is the Euclidean distance between them. Used by benchmarks,
//! tests, and demo launchers that need a realistic instance without loading
//! one from disk.

use std::ops::RangeInclusive;

use rand::Rng;

use super::problem::{Cloudlet, Objective, Position, Problem, Site};
use crate::error::{PlacementError, Result};
use crate::random::{create_rng, SearchRng};

/// Builder for random, structurally feasible placement instances.
///
/// # Examples
///
/// ```
/// use cloudlet_hga::model::InstanceGenerator;
///
/// let problem = InstanceGenerator::new(100, 20).with_seed(7).generate().unwrap();
/// assert_eq!(problem.num_cloudlets(), 100);
/// assert_eq!(problem.num_sites(), 20);
/// ```
#[derive(Debug, Clone)]
pub struct InstanceGenerator {
    pub num_cloudlets: usize,
    pub num_sites: usize,
    /// Side length of the square area.
    pub area: f64,
    pub demand: RangeInclusive<f64>,
    pub weight: RangeInclusive<f64>,
    pub capacity: RangeInclusive<f64>,
    pub operating_cost: RangeInclusive<f64>,
    /// Total capacity is scaled up to at least `headroom × total demand`.
    pub headroom: f64,
    pub objective: Objective,
    pub seed: u64,
}

impl InstanceGenerator {
    pub fn new(num_cloudlets: usize, num_sites: usize) -> Self {
        Self {
            num_cloudlets,
            num_sites,
            area: 1000.0,
            demand: 0.1..=2.0,
            weight: 1.0..=1.0,
            capacity: 4.0..=16.0,
            operating_cost: 800.0..=1200.0,
            headroom: 1.25,
            objective: Objective::default(),
            seed: 42,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_area(mut self, area: f64) -> Self {
        self.area = area;
        self
    }

    pub fn with_demand(mut self, range: RangeInclusive<f64>) -> Self {
        self.demand = range;
        self
    }

    pub fn with_weight(mut self, range: RangeInclusive<f64>) -> Self {
        self.weight = range;
        self
    }

    pub fn with_capacity(mut self, range: RangeInclusive<f64>) -> Self {
        self.capacity = range;
        self
    }

    pub fn with_operating_cost(mut self, range: RangeInclusive<f64>) -> Self {
        self.operating_cost = range;
        self
    }

    pub fn with_headroom(mut self, headroom: f64) -> Self {
        self.headroom = headroom;
        self
    }

    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    /// Draws the instance.
    ///
    /// Every site is given at least the largest cloudlet demand, and
    /// capacities are scaled so the aggregate covers `headroom` times the
    /// aggregate demand.
    pub fn generate(&self) -> Result<Problem> {
        for (name, r) in [
            ("demand", &self.demand),
            ("weight", &self.weight),
            ("capacity", &self.capacity),
            ("operating_cost", &self.operating_cost),
        ] {
            if !(r.start().is_finite() && r.end().is_finite()) || r.start() > r.end() {
                return Err(PlacementError::config(format!(
                    "{name} range {r:?} is empty or non-finite"
                )));
            }
        }
        if !self.area.is_finite() || self.area <= 0.0 {
            return Err(PlacementError::config("area must be positive"));
        }
        if !self.headroom.is_finite() || self.headroom < 1.0 {
            return Err(PlacementError::config("headroom must be at least 1.0"));
        }

        let mut rng = create_rng(self.seed);
        let point = |rng: &mut SearchRng| {
            Position::new(
                rng.random_range(0.0..=self.area),
                rng.random_range(0.0..=self.area),
            )
        };

        let cloudlets: Vec<Cloudlet> = (0..self.num_cloudlets)
            .map(|i| {
                let origin = point(&mut rng);
                Cloudlet::new(i, rng.random_range(self.demand.clone()))
                    .with_weight(rng.random_range(self.weight.clone()))
                    .with_origin(origin)
            })
            .collect();

        let max_demand = cloudlets.iter().map(|c| c.demand).fold(0.0, f64::max);
        let mut sites: Vec<Site> = (0..self.num_sites)
            .map(|i| {
                let position = point(&mut rng);
                Site::new(i, rng.random_range(self.capacity.clone()).max(max_demand))
                    .with_operating_cost(rng.random_range(self.operating_cost.clone()))
                    .with_position(position)
            })
            .collect();

        let total_demand: f64 = cloudlets.iter().map(|c| c.demand).sum();
        let total_capacity: f64 = sites.iter().map(|s| s.capacity).sum();
        let needed = total_demand * self.headroom;
        if total_capacity > 0.0 && total_capacity < needed {
            let scale = needed / total_capacity;
            for s in &mut sites {
                s.capacity *= scale;
            }
        }

        Problem::with_latency(sites, cloudlets)?.with_objective(self.objective)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_sizes() {
        let p = InstanceGenerator::new(50, 10).generate().unwrap();
        assert_eq!(p.num_cloudlets(), 50);
        assert_eq!(p.num_sites(), 10);
    }

    #[test]
    fn test_generate_reproducible() {
        let a = InstanceGenerator::new(30, 5).with_seed(9).generate().unwrap();
        let b = InstanceGenerator::new(30, 5).with_seed(9).generate().unwrap();
        for c in 0..30 {
            assert_eq!(a.cost_row(c), b.cost_row(c));
            assert_eq!(a.demand(c), b.demand(c));
        }
    }

    #[test]
    fn test_generate_capacity_headroom() {
        let p = InstanceGenerator::new(200, 5)
            .with_capacity(1.0..=2.0)
            .with_demand(1.0..=3.0)
            .generate()
            .unwrap();
        assert!(p.total_capacity() >= p.total_demand() * 1.25 - 1e-9);
        let max_demand = p.cloudlets().iter().map(|c| c.demand).fold(0.0, f64::max);
        assert!(p.sites().iter().all(|s| s.capacity >= max_demand));
    }

    #[test]
    fn test_generate_rejects_bad_ranges() {
        let g = InstanceGenerator::new(5, 2).with_demand(3.0..=1.0);
        assert!(g.generate().is_err());
        assert!(InstanceGenerator::new(0, 2).generate().is_err());
        assert!(InstanceGenerator::new(5, 2).with_headroom(0.5).generate().is_err());
    }
}
