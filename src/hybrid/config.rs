//! Hybrid GA configuration.
//!
//! [`HgaConfig`] holds all parameters that control the evolutionary loop and
//! its SA hybridization.

use crate::error::{PlacementError, Result};
use crate::ga::Crossover;
use crate::sa::{CoolingSchedule, SaSchedule};

/// Configuration for the hybrid GA/SA engine.
///
/// # Defaults
///
/// ```
/// use cloudlet_hga::hybrid::HgaConfig;
///
/// let config = HgaConfig::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.max_generations, 200);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use cloudlet_hga::hybrid::HgaConfig;
///
/// let config = HgaConfig::default()
///     .with_population_size(80)
///     .with_tournament_size(4)
///     .with_elite_count(4)
///     .with_sa_steps_per_call(50)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HgaConfig {
    /// Number of individuals in the population.
    pub population_size: usize,

    /// Maximum number of generations before termination.
    pub max_generations: usize,

    pub crossover: Crossover,

    /// Probability of recombining a selected pair (0.0–1.0).
    ///
    /// When crossover is not applied, the first parent is cloned.
    pub crossover_rate: f64,

    /// Per-gene probability of reassignment to a different site (0.0–1.0).
    pub mutation_rate: f64,

    /// Number of distinct contenders per tournament. At least 2.
    pub tournament_size: usize,

    /// Best individuals copied unchanged into the next generation.
    ///
    /// At least 1 and at most `population_size`. When equal, no offspring are
    /// bred and only incumbent refinement can move the search.
    pub elite_count: usize,

    /// Starting temperature of every SA refinement call.
    pub sa_initial_temperature: f64,

    /// Geometric cooling factor in (0, 1).
    pub sa_cooling_rate: f64,

    /// SA steps per refinement call. 0 disables refinement.
    pub sa_steps_per_call: usize,

    /// Fraction of each generation's offspring (best first) sent through SA.
    pub sa_top_fraction: f64,

    /// Also refine the incumbent best individual every generation.
    pub refine_incumbent: bool,

    /// Generations without improvement of the best fitness before stopping.
    pub stagnation_limit: usize,

    /// Stop as soon as the best fitness is at or below this value.
    pub target_fitness: Option<f64>,

    /// Apply greedy capacity repair to every new individual.
    pub repair_infeasible: bool,

    /// Evaluate and refine in parallel.
    ///
    /// Defaults to on only when the `parallel` feature is enabled; without
    /// the feature the flag has no effect. Results are identical either way
    /// for a given seed.
    pub parallel: bool,

    /// Random seed. Identical seed and configuration give identical runs.
    pub seed: u64,
}

impl Default for HgaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 200,
            crossover: Crossover::default(),
            crossover_rate: 0.8,
            mutation_rate: 0.05,
            tournament_size: 3,
            elite_count: 5,
            sa_initial_temperature: 1.0,
            sa_cooling_rate: 0.95,
            sa_steps_per_call: 20,
            sa_top_fraction: 0.1,
            refine_incumbent: true,
            stagnation_limit: 50,
            target_fitness: None,
            repair_infeasible: false,
            parallel: cfg!(feature = "parallel"),
            seed: 42,
        }
    }
}

impl HgaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the crossover rate, clamped to `[0, 1]`.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the per-gene mutation rate, clamped to `[0, 1]`.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    pub fn with_sa_initial_temperature(mut self, t: f64) -> Self {
        self.sa_initial_temperature = t;
        self
    }

    pub fn with_sa_cooling_rate(mut self, rate: f64) -> Self {
        self.sa_cooling_rate = rate;
        self
    }

    pub fn with_sa_steps_per_call(mut self, n: usize) -> Self {
        self.sa_steps_per_call = n;
        self
    }

    /// Sets the refined fraction of offspring, clamped to `[0, 1]`.
    pub fn with_sa_top_fraction(mut self, fraction: f64) -> Self {
        self.sa_top_fraction = fraction.clamp(0.0, 1.0);
        self
    }

    pub fn with_refine_incumbent(mut self, on: bool) -> Self {
        self.refine_incumbent = on;
        self
    }

    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    pub fn with_target_fitness(mut self, target: f64) -> Self {
        self.target_fitness = Some(target);
        self
    }

    pub fn with_repair(mut self, on: bool) -> Self {
        self.repair_infeasible = on;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Small, quick runs for interactive demos.
    ///
    /// - Population: 20, Generations: 30, Elites: 2
    pub fn demo() -> Self {
        Self {
            population_size: 20,
            max_generations: 30,
            elite_count: 2,
            stagnation_limit: 15,
            ..Self::default()
        }
    }

    /// Preset for fast optimization: small population, few generations.
    ///
    /// - Population: 30, Generations: 100, Stagnation limit: 20
    pub fn fast() -> Self {
        Self {
            population_size: 30,
            max_generations: 100,
            elite_count: 3,
            stagnation_limit: 20,
            sa_steps_per_call: 10,
            ..Self::default()
        }
    }

    /// Preset balancing solution quality and computation time.
    ///
    /// - Population: 50, Generations: 300, Stagnation limit: 50
    pub fn balanced() -> Self {
        Self {
            population_size: 50,
            max_generations: 300,
            elite_count: 5,
            stagnation_limit: 50,
            ..Self::default()
        }
    }

    /// Preset for quality optimization: large population, long SA calls.
    ///
    /// - Population: 100, Generations: 500, Stagnation limit: 80
    pub fn quality() -> Self {
        Self {
            population_size: 100,
            max_generations: 500,
            elite_count: 10,
            stagnation_limit: 80,
            sa_steps_per_call: 50,
            sa_top_fraction: 0.2,
            ..Self::default()
        }
    }

    /// Selects a preset by instance size.
    ///
    /// - `num_cloudlets < 50` → [`fast()`](Self::fast)
    /// - `50 ≤ num_cloudlets < 200` → [`balanced()`](Self::balanced)
    /// - `num_cloudlets ≥ 200` → [`quality()`](Self::quality)
    pub fn auto_select(num_cloudlets: usize) -> Self {
        if num_cloudlets < 50 {
            Self::fast()
        } else if num_cloudlets < 200 {
            Self::balanced()
        } else {
            Self::quality()
        }
    }

    /// The SA schedule used for each refinement call.
    pub fn sa_schedule(&self) -> SaSchedule {
        SaSchedule::default()
            .with_initial_temperature(self.sa_initial_temperature)
            .with_min_temperature(self.sa_initial_temperature * 1e-6)
            .with_cooling(CoolingSchedule::Geometric {
                alpha: self.sa_cooling_rate,
            })
            .with_steps_per_call(self.sa_steps_per_call)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`PlacementError::Configuration`] naming the first invalid parameter.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(PlacementError::config("population_size must be at least 1"));
        }
        if self.max_generations == 0 {
            return Err(PlacementError::config("max_generations must be at least 1"));
        }
        if self.elite_count == 0 {
            return Err(PlacementError::config("elite_count must be at least 1"));
        }
        if self.elite_count > self.population_size {
            return Err(PlacementError::config(format!(
                "elite_count ({}) must not exceed population_size ({})",
                self.elite_count, self.population_size
            )));
        }
        if self.tournament_size < 2 {
            return Err(PlacementError::config("tournament_size must be at least 2"));
        }
        for (name, v) in [
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
            ("sa_top_fraction", self.sa_top_fraction),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(PlacementError::config(format!(
                    "{name} must be in [0, 1], got {v}"
                )));
            }
        }
        if self.stagnation_limit == 0 {
            return Err(PlacementError::config("stagnation_limit must be at least 1"));
        }
        if let Some(t) = self.target_fitness {
            if !t.is_finite() {
                return Err(PlacementError::config("target_fitness must be finite"));
            }
        }
        self.sa_schedule().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HgaConfig::default();
        assert_eq!(config.population_size, 50);
        assert_eq!(config.max_generations, 200);
        assert_eq!(config.tournament_size, 3);
        assert_eq!(config.elite_count, 5);
        assert_eq!(config.crossover, Crossover::Uniform);
        assert!((config.crossover_rate - 0.8).abs() < 1e-10);
        assert!((config.mutation_rate - 0.05).abs() < 1e-10);
        assert!((config.sa_cooling_rate - 0.95).abs() < 1e-10);
        assert_eq!(config.stagnation_limit, 50);
        assert!(config.target_fitness.is_none());
        assert!(!config.repair_infeasible);
        assert_eq!(config.parallel, cfg!(feature = "parallel"));
        assert_eq!(config.seed, 42);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = HgaConfig::default()
            .with_population_size(30)
            .with_max_generations(50)
            .with_crossover(Crossover::SinglePoint)
            .with_crossover_rate(0.7)
            .with_mutation_rate(0.1)
            .with_tournament_size(5)
            .with_elite_count(2)
            .with_sa_initial_temperature(3.0)
            .with_sa_cooling_rate(0.9)
            .with_sa_steps_per_call(0)
            .with_sa_top_fraction(0.5)
            .with_refine_incumbent(false)
            .with_stagnation_limit(10)
            .with_target_fitness(5.0)
            .with_repair(true)
            .with_parallel(false)
            .with_seed(9);

        assert_eq!(config.population_size, 30);
        assert_eq!(config.max_generations, 50);
        assert_eq!(config.crossover, Crossover::SinglePoint);
        assert_eq!(config.tournament_size, 5);
        assert_eq!(config.elite_count, 2);
        assert_eq!(config.sa_steps_per_call, 0);
        assert!(!config.refine_incumbent);
        assert_eq!(config.target_fitness, Some(5.0));
        assert!(config.repair_infeasible);
        assert!(!config.parallel);
        assert_eq!(config.seed, 9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_clamp_rates() {
        let config = HgaConfig::default()
            .with_crossover_rate(-0.5)
            .with_mutation_rate(2.0)
            .with_sa_top_fraction(1.5);
        assert_eq!(config.crossover_rate, 0.0);
        assert_eq!(config.mutation_rate, 1.0);
        assert_eq!(config.sa_top_fraction, 1.0);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let bad = [
            HgaConfig::default().with_population_size(0),
            HgaConfig::default().with_max_generations(0),
            HgaConfig::default().with_elite_count(0),
            HgaConfig::default().with_population_size(5).with_elite_count(6),
            HgaConfig::default().with_tournament_size(1),
            HgaConfig::default().with_stagnation_limit(0),
            HgaConfig::default().with_sa_initial_temperature(0.0),
            HgaConfig::default().with_sa_cooling_rate(1.0),
            HgaConfig::default().with_sa_cooling_rate(0.0),
            HgaConfig::default().with_target_fitness(f64::NAN),
            HgaConfig {
                mutation_rate: 1.5,
                ..HgaConfig::default()
            },
        ];
        for config in bad {
            assert!(
                matches!(config.validate(), Err(PlacementError::Configuration(_))),
                "expected rejection: {config:?}"
            );
        }
    }

    #[test]
    fn test_elites_may_fill_population() {
        let config = HgaConfig::default()
            .with_population_size(1)
            .with_elite_count(1);
        assert!(config.validate().is_ok());
        let config = HgaConfig::default()
            .with_population_size(8)
            .with_elite_count(8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sa_schedule_mapping() {
        let schedule = HgaConfig::default()
            .with_sa_initial_temperature(4.0)
            .with_sa_cooling_rate(0.8)
            .with_sa_steps_per_call(12)
            .sa_schedule();
        assert_eq!(schedule.initial_temperature, 4.0);
        assert_eq!(schedule.cooling, CoolingSchedule::Geometric { alpha: 0.8 });
        assert_eq!(schedule.steps_per_call, 12);
        assert!(schedule.validate().is_ok());
    }

    #[test]
    fn test_presets_valid() {
        for config in [
            HgaConfig::demo(),
            HgaConfig::fast(),
            HgaConfig::balanced(),
            HgaConfig::quality(),
        ] {
            assert!(config.validate().is_ok(), "{config:?}");
        }
    }

    #[test]
    fn test_auto_select_boundaries() {
        assert_eq!(HgaConfig::auto_select(49), HgaConfig::fast());
        assert_eq!(HgaConfig::auto_select(50), HgaConfig::balanced());
        assert_eq!(HgaConfig::auto_select(199), HgaConfig::balanced());
        assert_eq!(HgaConfig::auto_select(200), HgaConfig::quality());
    }
}
