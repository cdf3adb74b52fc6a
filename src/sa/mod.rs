//! Simulated-annealing refiner.
//!
//! Local intensification for the hybrid GA: starting from one solution, it
//! walks single-gene moves, accepts worsening moves with a probability that
//! shrinks as the temperature falls, and returns the best point visited.
//! The result is never worse than the input.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast
//!   Computing Machines"
//! - Lundy & Mees (1986), "Convergence of an Annealing Algorithm"

mod config;
mod refiner;

pub use config::{CoolingSchedule, SaSchedule};
pub use refiner::{Refinement, SaRefiner};
