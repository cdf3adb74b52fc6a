//! Genetic operators over cloudlet assignment vectors.
//!
//! The pieces the hybrid engine combines each generation:
//!
//! - [`tournament`]: parent selection by k-way tournament
//! - [`Crossover`]: uniform or single-point recombination
//! - [`mutate`]: per-gene reassignment to a different site
//! - [`repair`]: optional greedy capacity repair
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"

pub mod operators;
pub mod selection;

pub use operators::{mutate, reassign_gene, repair, Crossover};
pub use selection::tournament;
