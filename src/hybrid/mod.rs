//! Hybrid genetic algorithm with simulated-annealing refinement.
//!
//! Each generation runs tournament selection, crossover and mutation over
//! the population, then sends the best offspring (and optionally the
//! incumbent) through a short [`SaRefiner`](crate::sa::SaRefiner) call.
//! The top `elite_count` individuals survive unchanged, so the best fitness
//! never gets worse from one generation to the next.
//!
//! # Key Types
//!
//! - [`HgaConfig`]: population, operator and SA parameters, with presets
//! - [`HgaRunner`]: executes the loop
//! - [`RunResult`]: best assignment, its breakdown and per-generation history
//!
//! # References
//!
//! - Talbi (2002), "A Taxonomy of Hybrid Metaheuristics"
//! - Mahfoud & Goldberg (1995), "Parallel Recombinative Simulated Annealing"

mod config;
mod result;
mod runner;

pub use config::HgaConfig;
pub use result::{GenerationStats, RunResult, TerminationReason};
pub use runner::HgaRunner;
