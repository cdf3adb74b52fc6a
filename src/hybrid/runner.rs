//! Hybrid GA evolutionary loop.
//!
//! [`HgaRunner`] orchestrates the complete process:
//! initialization → selection → crossover → mutation → evaluation →
//! SA refinement → election → repeat.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::config::HgaConfig;
use super::result::{GenerationStats, RunResult, TerminationReason};
use crate::error::{PlacementError, Result};
use crate::ga::operators::{mutate, repair};
use crate::ga::selection::tournament;
use crate::model::Problem;
use crate::random::{create_rng, split_seeds};
use crate::sa::{Refinement, SaRefiner, SaSchedule};
use crate::solution::Solution;

/// Executes the hybrid GA/SA search.
///
/// # Usage
///
/// ```
/// use cloudlet_hga::hybrid::{HgaConfig, HgaRunner};
/// use cloudlet_hga::model::InstanceGenerator;
///
/// let problem = InstanceGenerator::new(40, 8).generate().unwrap();
/// let config = HgaConfig::fast().with_seed(42);
/// let result = HgaRunner::run(&problem, &config).unwrap();
/// assert_eq!(result.assignment().len(), 40);
/// ```
pub struct HgaRunner;

impl HgaRunner {
    /// Runs the search to completion.
    ///
    /// # Errors
    /// [`PlacementError::Configuration`] for an invalid configuration (before
    /// any generation runs) and [`PlacementError::NumericAnomaly`] if an
    /// individual cannot be scored.
    pub fn run(problem: &Problem, config: &HgaConfig) -> Result<RunResult> {
        Self::run_with(problem, config, None, |_| {})
    }

    /// Runs with an optional stop signal.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the search stops
    /// before starting the next generation and returns the best solution
    /// found so far.
    pub fn run_with_cancel(
        problem: &Problem,
        config: &HgaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<RunResult> {
        Self::run_with(problem, config, cancel, |_| {})
    }

    /// Runs with a stop signal and a callback receiving each generation's
    /// statistics as soon as they are recorded.
    #[tracing::instrument(
        level = "info",
        name = "hga_run",
        skip_all,
        fields(seed = config.seed, cloudlets = problem.num_cloudlets(), sites = problem.num_sites())
    )]
    pub fn run_with<F>(
        problem: &Problem,
        config: &HgaConfig,
        cancel: Option<Arc<AtomicBool>>,
        mut on_generation: F,
    ) -> Result<RunResult>
    where
        F: FnMut(&GenerationStats),
    {
        config.validate()?;
        let schedule = config.sa_schedule();
        let n_sites = problem.num_sites();
        let mut rng = create_rng(config.seed);

        tracing::info!(
            population = config.population_size,
            max_generations = config.max_generations,
            "starting hybrid GA"
        );

        // 1. Initialize population
        let mut population: Vec<Solution> = (0..config.population_size)
            .map(|_| Solution::random(problem, &mut rng))
            .collect();
        if config.repair_infeasible {
            for ind in &mut population {
                repair(ind, problem);
            }
        }

        // 2. Evaluate initial population
        evaluate_population(problem, &mut population, config.parallel)?;
        sort_by_fitness(&mut population);

        // 3. Track best
        let mut best = population
            .first()
            .ok_or(PlacementError::EmptyPopulation)?
            .clone();
        let mut history = Vec::with_capacity(config.max_generations + 1);
        let initial = GenerationStats::collect(0, &population, problem)?;
        on_generation(&initial);
        history.push(initial);

        let mut stagnation_counter = 0usize;
        let mut generations = 0usize;
        let mut termination = if target_reached(config, best.fitness()) {
            TerminationReason::TargetReached
        } else {
            TerminationReason::MaxGenerations
        };

        // 4. Evolutionary loop
        while termination == TerminationReason::MaxGenerations
            && generations < config.max_generations
        {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    termination = TerminationReason::Cancelled;
                    break;
                }
            }
            generations += 1;

            // Selection, crossover, mutation
            let offspring_count = config.population_size - config.elite_count;
            let mut offspring: Vec<Solution> = Vec::with_capacity(offspring_count);
            while offspring.len() < offspring_count {
                let p1 = tournament(&population, config.tournament_size, &mut rng)?;
                let p2 = tournament(&population, config.tournament_size, &mut rng)?;

                let children = if rng.random_bool(config.crossover_rate) {
                    let (a, b) = config
                        .crossover
                        .apply(&population[p1], &population[p2], &mut rng);
                    vec![a, b]
                } else {
                    vec![population[p1].clone()]
                };

                for mut child in children {
                    if offspring.len() >= offspring_count {
                        break;
                    }
                    mutate(&mut child, n_sites, config.mutation_rate, &mut rng);
                    if config.repair_infeasible {
                        repair(&mut child, problem);
                    }
                    offspring.push(child);
                }
            }

            // Evaluation (clones of unchanged parents keep their cache)
            evaluate_population(problem, &mut offspring, config.parallel)?;

            // SA hybridization on the best offspring
            refine_top_offspring(problem, &mut offspring, &schedule, config, &mut rng)?;

            // SA on the incumbent; an improvement displaces the worst offspring,
            // or the incumbent itself when every slot is an elite
            if config.refine_incumbent && schedule.steps_per_call > 0 {
                let mut inc_rng = create_rng(rng.random());
                let incumbent_fitness = population[0].fitness();
                let out = SaRefiner::refine(&population[0], problem, &schedule, &mut inc_rng)?;
                if out.improved_on(incumbent_fitness) {
                    tracing::debug!(
                        generation = generations,
                        from = incumbent_fitness,
                        to = out.best.fitness(),
                        "incumbent improved by refinement"
                    );
                    match worst_index(&offspring) {
                        Some(worst) => offspring[worst] = out.best,
                        None => population[0] = out.best,
                    }
                }
            }

            // Election: elites unchanged plus offspring
            population.truncate(config.elite_count);
            population.extend(offspring);
            sort_by_fitness(&mut population);

            let stats = GenerationStats::collect(generations, &population, problem)?;
            if population[0].fitness() < best.fitness() {
                best = population[0].clone();
                stagnation_counter = 0;
            } else {
                stagnation_counter += 1;
            }

            tracing::debug!(
                generation = generations,
                best = stats.best_fitness,
                mean = stats.mean_fitness,
                feasible = stats.feasible_count,
                stagnation = stagnation_counter,
                "generation complete"
            );
            on_generation(&stats);
            history.push(stats);

            if target_reached(config, best.fitness()) {
                termination = TerminationReason::TargetReached;
            } else if stagnation_counter >= config.stagnation_limit {
                termination = TerminationReason::Stagnation;
            }
        }

        let result = RunResult::new(best, history, generations, termination, problem)?;
        tracing::info!(
            reason = ?result.termination,
            generations = result.generations,
            best = result.best_fitness(),
            feasible = result.feasible,
            "hybrid GA finished"
        );
        Ok(result)
    }
}

fn target_reached(config: &HgaConfig, fitness: f64) -> bool {
    config.target_fitness.is_some_and(|t| fitness <= t)
}

/// Evaluate every individual, reusing cached fitness where present.
fn evaluate_population(problem: &Problem, population: &mut [Solution], parallel: bool) -> Result<()> {
    #[cfg(feature = "parallel")]
    {
        if parallel {
            return population
                .par_iter_mut()
                .try_for_each(|ind| ind.evaluate(problem).map(|_| ()));
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    population
        .iter_mut()
        .try_for_each(|ind| ind.evaluate(problem).map(|_| ()))
}

/// Refines the best `sa_top_fraction` of `offspring` in place.
///
/// Each call gets its own generator seeded from `rng` before dispatch, so the
/// outcome does not depend on whether calls run in parallel.
fn refine_top_offspring<R: Rng>(
    problem: &Problem,
    offspring: &mut [Solution],
    schedule: &SaSchedule,
    config: &HgaConfig,
    rng: &mut R,
) -> Result<()> {
    let count = ((config.sa_top_fraction * offspring.len() as f64).ceil() as usize)
        .min(offspring.len());
    if count == 0 || schedule.steps_per_call == 0 {
        return Ok(());
    }

    let mut order: Vec<usize> = (0..offspring.len()).collect();
    order.sort_by(|&a, &b| offspring[a].fitness().total_cmp(&offspring[b].fitness()));
    let jobs: Vec<(usize, u64)> = order
        .into_iter()
        .take(count)
        .zip(split_seeds(rng, count))
        .collect();

    let refine = |&(idx, seed): &(usize, u64)| -> Result<(usize, Refinement)> {
        let mut task_rng = create_rng(seed);
        SaRefiner::refine(&offspring[idx], problem, schedule, &mut task_rng).map(|r| (idx, r))
    };

    #[cfg(feature = "parallel")]
    let results: Vec<(usize, Refinement)> = if config.parallel {
        jobs.par_iter().map(refine).collect::<Result<_>>()?
    } else {
        jobs.iter().map(refine).collect::<Result<_>>()?
    };
    #[cfg(not(feature = "parallel"))]
    let results: Vec<(usize, Refinement)> = jobs.iter().map(refine).collect::<Result<_>>()?;

    for (idx, out) in results {
        if out.improved_on(offspring[idx].fitness()) {
            offspring[idx] = out.best;
        }
    }
    Ok(())
}

/// Stable ascending sort by cached fitness (best first).
fn sort_by_fitness(population: &mut [Solution]) {
    population.sort_by(|a, b| a.fitness().total_cmp(&b.fitness()));
}

fn worst_index(population: &[Solution]) -> Option<usize> {
    population
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.fitness().total_cmp(&b.fitness()))
        .map(|(i, _)| i)
}

// ============================================================================
// Tests
// ============================================================================
