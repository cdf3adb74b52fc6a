//! SA refinement of a single solution.

use rand::Rng;

use super::config::SaSchedule;
use crate::error::Result;
use crate::ga::operators::reassign_gene;
use crate::model::Problem;
use crate::solution::Solution;

/// Outcome of one refinement call.
#[derive(Debug, Clone)]
pub struct Refinement {
    /// Best solution seen on the trajectory, evaluated. Never worse than the
    /// input.
    pub best: Solution,

    /// Neighbor evaluations performed.
    pub steps: usize,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of strictly improving moves.
    pub improving_moves: usize,

    /// Temperature after the last step.
    pub final_temperature: f64,
}

impl Refinement {
    /// True if refinement found a strictly better solution than `fitness`.
    pub fn improved_on(&self, fitness: f64) -> bool {
        self.best.fitness() < fitness
    }
}

/// Simulated-annealing local search around one solution.
///
/// The neighborhood is a single-gene move: one random cloudlet goes to a
/// different random site. Moves are accepted by the Metropolis criterion.
///
/// # Usage
///
/// ```
/// use cloudlet_hga::model::InstanceGenerator;
/// use cloudlet_hga::random::create_rng;
/// use cloudlet_hga::sa::{SaRefiner, SaSchedule};
/// use cloudlet_hga::solution::Solution;
///
/// let problem = InstanceGenerator::new(20, 4).generate().unwrap();
/// let mut rng = create_rng(1);
/// let mut start = Solution::random(&problem, &mut rng);
/// let before = start.evaluate(&problem).unwrap();
///
/// let out = SaRefiner::refine(&start, &problem, &SaSchedule::default(), &mut rng).unwrap();
/// assert!(out.best.fitness() <= before);
/// ```
pub struct SaRefiner;

impl SaRefiner {
    /// Runs `schedule.steps_per_call` SA steps starting from `solution`.
    ///
    /// The input does not need to be evaluated. The schedule is assumed
    /// valid (see [`SaSchedule::validate`]).
    pub fn refine<R: Rng>(
        solution: &Solution,
        problem: &Problem,
        schedule: &SaSchedule,
        rng: &mut R,
    ) -> Result<Refinement> {
        let mut current = solution.clone();
        let mut current_fitness = current.evaluate(problem)?;
        let mut best = current.clone();
        let mut best_fitness = current_fitness;

        let n_sites = problem.num_sites();
        let n_cloudlets = current.len();
        let mut temperature = schedule.initial_temperature;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut steps = 0usize;

        if n_sites < 2 || n_cloudlets == 0 {
            return Ok(Refinement {
                best,
                steps,
                accepted_moves,
                improving_moves,
                final_temperature: temperature,
            });
        }

        for step in 0..schedule.steps_per_call {
            let mut neighbor = current.clone();
            let c = rng.random_range(0..n_cloudlets);
            reassign_gene(&mut neighbor, c, n_sites, rng);
            let neighbor_fitness = neighbor.evaluate(problem)?;
            let delta = neighbor_fitness - current_fitness;

            // Metropolis acceptance criterion
            let accept = if delta <= 0.0 {
                if delta < 0.0 {
                    improving_moves += 1;
                }
                true
            } else if temperature > 0.0 {
                rng.random::<f64>() < (-delta / temperature).exp()
            } else {
                false
            };

            if accept {
                current = neighbor;
                current_fitness = neighbor_fitness;
                accepted_moves += 1;

                if current_fitness < best_fitness {
                    best = current.clone();
                    best_fitness = current_fitness;
                }
            }

            steps += 1;
            temperature = schedule.cool(temperature, step);
        }

        tracing::trace!(
            steps,
            accepted_moves,
            improving_moves,
            best_fitness,
            "sa refinement finished"
        );

        Ok(Refinement {
            best,
            steps,
            accepted_moves,
            improving_moves,
            final_temperature: temperature,
        })
    }
}
