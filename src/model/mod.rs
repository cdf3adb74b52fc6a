//! Problem model.
//!
//! An immutable description of candidate sites, the cloudlets to place, and
//! the cost of hosting each cloudlet at each site. A [`Problem`] is validated
//! once at construction and then only read, so it can be shared by reference
//! across every solution and worker thread of a run.
//!
//! # Key Types
//!
//! - [`Site`]: A candidate host with finite capacity
//! - [`Cloudlet`]: A workload unit with demand and weight
//! - [`Objective`]: Weights of the fitness terms
//! - [`Problem`]: The validated instance
//! - [`InstanceGenerator`]: Seeded synthetic instances

mod instance;
mod problem;

pub use instance::InstanceGenerator;
pub use problem::{Cloudlet, Objective, Position, Problem, Site};
