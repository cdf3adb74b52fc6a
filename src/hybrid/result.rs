//! Run outcome and convergence statistics.

use crate::error::{PlacementError, Result};
use crate::model::Problem;
use crate::solution::{evaluate, Evaluation, Solution};

/// Why the evolutionary loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerminationReason {
    /// Ran `max_generations` generations.
    MaxGenerations,
    /// Best fitness did not improve for `stagnation_limit` generations.
    Stagnation,
    /// Best fitness reached `target_fitness`.
    TargetReached,
    /// The stop signal was raised; checked between generations.
    Cancelled,
}

/// Population statistics at the end of one generation.
///
/// Generation 0 is the evaluated initial population.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    pub generation: usize,
    pub best_fitness: f64,
    pub mean_fitness: f64,
    /// Individuals with no capacity overflow.
    pub feasible_count: usize,
    /// Raw weighted cost of the generation's best individual.
    pub best_raw_cost: f64,
    /// Capacity overflow of the generation's best individual.
    pub best_overflow: f64,
}

impl GenerationStats {
    /// Summarizes an evaluated population sorted best first.
    pub(crate) fn collect(
        generation: usize,
        population: &[Solution],
        problem: &Problem,
    ) -> Result<Self> {
        let best = population.first().ok_or(PlacementError::EmptyPopulation)?;
        let best_eval = evaluation_of(best, problem)?;
        let mean_fitness =
            population.iter().map(Solution::fitness).sum::<f64>() / population.len() as f64;
        let feasible_count = population
            .iter()
            .filter(|s| s.evaluation().is_some_and(Evaluation::is_feasible))
            .count();

        Ok(Self {
            generation,
            best_fitness: best_eval.fitness,
            mean_fitness,
            feasible_count,
            best_raw_cost: best_eval.raw_cost,
            best_overflow: best_eval.overflow,
        })
    }
}

fn evaluation_of(solution: &Solution, problem: &Problem) -> Result<Evaluation> {
    match solution.evaluation() {
        Some(e) => Ok(*e),
        None => evaluate(solution.genes(), problem),
    }
}

/// Result of a hybrid GA run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RunResult {
    /// The best individual found during the entire run.
    pub best: Solution,

    /// Fitness breakdown of `best`.
    pub evaluation: Evaluation,

    /// Whether `best` respects every site capacity.
    pub feasible: bool,

    /// Statistics per generation, starting with the initial population.
    pub history: Vec<GenerationStats>,

    /// Generations executed after initialization.
    pub generations: usize,

    pub termination: TerminationReason,
}

impl RunResult {
    pub(crate) fn new(
        best: Solution,
        history: Vec<GenerationStats>,
        generations: usize,
        termination: TerminationReason,
        problem: &Problem,
    ) -> Result<Self> {
        let evaluation = evaluation_of(&best, problem)?;
        Ok(Self {
            feasible: evaluation.is_feasible(),
            evaluation,
            best,
            history,
            generations,
            termination,
        })
    }

    /// Best fitness (same as `evaluation.fitness`).
    pub fn best_fitness(&self) -> f64 {
        self.evaluation.fitness
    }

    /// Site index per cloudlet.
    pub fn assignment(&self) -> &[usize] {
        self.best.genes()
    }

    /// Best fitness per generation, for convergence plots.
    pub fn best_fitness_history(&self) -> Vec<f64> {
        self.history.iter().map(|g| g.best_fitness).collect()
    }

    /// Mean fitness per generation, for convergence plots.
    pub fn mean_fitness_history(&self) -> Vec<f64> {
        self.history.iter().map(|g| g.mean_fitness).collect()
    }
}
