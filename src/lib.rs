//! Hybrid genetic algorithm for capacity-constrained cloudlet placement.
//!
//! Assigns every cloudlet to exactly one site so that the weighted placement
//! cost is minimized while site capacities are respected. Capacity overflow
//! is handled with a penalty that keeps every infeasible assignment strictly
//! worse than every feasible one.
//!
//! - **Model** ([`model`]): sites, cloudlets, cost matrix and objective
//!   weights, plus a seeded random instance generator.
//! - **Solution** ([`solution`]): assignment vectors with a cached,
//!   invalidate-on-write fitness and a full cost breakdown.
//! - **GA operators** ([`ga`]): tournament selection, uniform and
//!   single-point crossover, mutation and greedy repair.
//! - **SA refiner** ([`sa`]): short Metropolis walks that never return a
//!   worse solution than their input.
//! - **Engine** ([`hybrid`]): the generational loop with elitism, SA
//!   hybridization, stagnation and target stopping and cancellation.
//!
//! # Example
//!
//! ```
//! use cloudlet_hga::{HgaConfig, HgaRunner};
//! use cloudlet_hga::model::{Cloudlet, Problem, Site};
//!
//! let sites = vec![Site::new(0, 10.0), Site::new(1, 10.0)];
//! let cloudlets = (0..4).map(|i| Cloudlet::new(i, 5.0)).collect();
//! let costs = vec![vec![1.0, 2.0]; 4];
//! let problem = Problem::new(sites, cloudlets, costs).unwrap();
//!
//! let result = HgaRunner::run(&problem, &HgaConfig::demo()).unwrap();
//! assert!(result.feasible);
//! assert_eq!(result.best_fitness(), 6.0);
//! ```
//!
//! # Features
//!
//! - `parallel`: evaluate offspring and run SA calls on the rayon pool.
//!   Results are identical to sequential runs for the same seed.
//! - `serde`: derive `Serialize`/`Deserialize` for configs and results.
//!
//! # Logging
//!
//! The engine emits [`tracing`] events: run start and finish at `info`,
//! per-generation statistics at `debug`, per-call SA summaries at `trace`.
//! No subscriber is installed by this crate.

pub mod error;
pub mod ga;
pub mod hybrid;
pub mod model;
pub mod random;
pub mod sa;
pub mod solution;

pub use error::{PlacementError, Result};
pub use hybrid::{GenerationStats, HgaConfig, HgaRunner, RunResult, TerminationReason};
pub use model::{Cloudlet, Objective, Problem, Site};
pub use solution::{Evaluation, Solution};
