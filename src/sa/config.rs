//! SA schedule and cooling rules.

use crate::error::{PlacementError, Result};

/// Cooling schedule for temperature reduction.
///
/// # References
///
/// - Geometric: standard textbook approach
/// - Linear: fixed-duration cooling
/// - LundyMees: Lundy & Mees (1986), with convergence proof
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoolingSchedule {
    /// Geometric (exponential) cooling: `T_{k+1} = alpha * T_k`.
    ///
    /// Most widely used. Typical `alpha`: 0.90–0.99.
    Geometric {
        /// Cooling factor in (0, 1). Higher = slower cooling.
        alpha: f64,
    },

    /// Linear cooling from the initial to the minimum temperature over the
    /// steps of one refinement call.
    Linear,

    /// Lundy-Mees cooling: `T_{k+1} = T_k / (1 + beta * T_k)`.
    ///
    /// Cools fast at high T, slow at low T.
    LundyMees {
        /// Cooling parameter, positive.
        beta: f64,
    },
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        CoolingSchedule::Geometric { alpha: 0.95 }
    }
}

/// Parameters of one SA refinement call.
///
/// # Examples
///
/// ```
/// use cloudlet_hga::sa::{CoolingSchedule, SaSchedule};
///
/// let schedule = SaSchedule::default()
///     .with_initial_temperature(5.0)
///     .with_cooling(CoolingSchedule::Geometric { alpha: 0.9 })
///     .with_steps_per_call(50);
/// assert!(schedule.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaSchedule {
    /// Temperature at the first step. Higher values accept more uphill moves.
    pub initial_temperature: f64,

    /// Final temperature of [`CoolingSchedule::Linear`]; unused otherwise.
    pub min_temperature: f64,

    pub cooling: CoolingSchedule,

    /// Number of neighbor evaluations per call. 0 makes refinement a no-op.
    pub steps_per_call: usize,
}

impl Default for SaSchedule {
    fn default() -> Self {
        Self {
            initial_temperature: 10.0,
            min_temperature: 1e-3,
            cooling: CoolingSchedule::default(),
            steps_per_call: 20,
        }
    }
}

impl SaSchedule {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_steps_per_call(mut self, n: usize) -> Self {
        self.steps_per_call = n;
        self
    }

    /// Temperature after `step` (0-based) has been taken at `temperature`.
    pub(crate) fn cool(&self, temperature: f64, step: usize) -> f64 {
        match self.cooling {
            CoolingSchedule::Geometric { alpha } => temperature * alpha,
            CoolingSchedule::Linear => {
                if self.steps_per_call == 0 {
                    self.min_temperature
                } else {
                    let t = self.initial_temperature
                        - (step + 1) as f64 * (self.initial_temperature - self.min_temperature)
                            / self.steps_per_call as f64;
                    t.max(self.min_temperature)
                }
            }
            CoolingSchedule::LundyMees { beta } => temperature / (1.0 + beta * temperature),
        }
    }

    /// Validates the schedule.
    pub fn validate(&self) -> Result<()> {
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err(PlacementError::config(format!(
                "sa initial_temperature must be positive, got {}",
                self.initial_temperature
            )));
        }
        if !self.min_temperature.is_finite() || self.min_temperature <= 0.0 {
            return Err(PlacementError::config("sa min_temperature must be positive"));
        }
        if self.min_temperature >= self.initial_temperature {
            return Err(PlacementError::config(
                "sa min_temperature must be less than initial_temperature",
            ));
        }
        match self.cooling {
            CoolingSchedule::Geometric { alpha } => {
                if !(alpha > 0.0 && alpha < 1.0) {
                    return Err(PlacementError::config(format!(
                        "sa cooling rate must be in (0, 1), got {alpha}"
                    )));
                }
            }
            CoolingSchedule::LundyMees { beta } => {
                if !(beta.is_finite() && beta > 0.0) {
                    return Err(PlacementError::config(format!(
                        "lundy-mees beta must be positive, got {beta}"
                    )));
                }
            }
            CoolingSchedule::Linear => {}
        }
        Ok(())
    }
}
