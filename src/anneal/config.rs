//! Annealing configuration and inverse-temperature schedules.

use crate::error::{IsingError, Result};

/// Inverse-temperature (β) schedule, one value per sweep.
///
/// The direction is up to the caller. Conventional annealing cools, so β
/// increases from sweep to sweep; a decreasing schedule heats the system
/// instead.
///
/// # Examples
///
/// ```
/// use u_ising::anneal::BetaSchedule;
///
/// let betas = BetaSchedule::Linear { start: 0.5, end: 2.0, sweeps: 4 }.betas().unwrap();
/// assert_eq!(betas, vec![0.5, 1.0, 1.5, 2.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BetaSchedule {
    /// `sweeps` values evenly spaced from `start` to `end`, both included.
    Linear { start: f64, end: f64, sweeps: usize },

    /// `sweeps` values with a constant ratio from `start` to `end`.
    ///
    /// Spends more sweeps at the small-β end than [`BetaSchedule::Linear`].
    Geometric { start: f64, end: f64, sweeps: usize },

    /// Explicit values, used as given.
    Custom(Vec<f64>),
}

impl Default for BetaSchedule {
    fn default() -> Self {
        BetaSchedule::Linear {
            start: 0.1,
            end: 4.2,
            sweeps: 1000,
        }
    }
}

impl BetaSchedule {
    /// Number of sweeps this schedule describes.
    pub fn len(&self) -> usize {
        match self {
            BetaSchedule::Linear { sweeps, .. } | BetaSchedule::Geometric { sweeps, .. } => *sweeps,
            BetaSchedule::Custom(values) => values.len(),
        }
    }

    /// Whether the schedule describes no sweeps at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Expands the schedule into per-sweep β values.
    ///
    /// Fails with [`IsingError::InvalidSchedule`] for zero sweeps or any
    /// endpoint/value that is not strictly positive and finite.
    pub fn betas(&self) -> Result<Vec<f64>> {
        let betas = match *self {
            BetaSchedule::Linear { start, end, sweeps } => {
                check_endpoints(start, end, sweeps)?;
                spaced(sweeps, start, end, |k, last| {
                    start + (end - start) * k as f64 / last as f64
                })
            }
            BetaSchedule::Geometric { start, end, sweeps } => {
                check_endpoints(start, end, sweeps)?;
                let ratio = end / start;
                spaced(sweeps, start, end, |k, last| {
                    start * ratio.powf(k as f64 / last as f64)
                })
            }
            BetaSchedule::Custom(ref values) => values.clone(),
        };
        validate_schedule(&betas)?;
        Ok(betas)
    }

    /// Whether β never decreases over the schedule (i.e. it cools).
    pub fn is_ascending(&self) -> bool {
        match self {
            BetaSchedule::Linear { start, end, .. } | BetaSchedule::Geometric { start, end, .. } => {
                start <= end
            }
            BetaSchedule::Custom(values) => values.windows(2).all(|w| w[0] <= w[1]),
        }
    }

    /// The same values in reverse order.
    pub fn reversed(&self) -> Self {
        match *self {
            BetaSchedule::Linear { start, end, sweeps } => BetaSchedule::Linear {
                start: end,
                end: start,
                sweeps,
            },
            BetaSchedule::Geometric { start, end, sweeps } => BetaSchedule::Geometric {
                start: end,
                end: start,
                sweeps,
            },
            BetaSchedule::Custom(ref values) => {
                BetaSchedule::Custom(values.iter().rev().copied().collect())
            }
        }
    }
}

fn check_endpoints(start: f64, end: f64, sweeps: usize) -> Result<()> {
    if sweeps == 0 {
        return Err(IsingError::InvalidSchedule("sweeps must be positive".into()));
    }
    for (name, value) in [("start", start), ("end", end)] {
        if !(value.is_finite() && value > 0.0) {
            return Err(IsingError::InvalidSchedule(format!(
                "{name} must be positive and finite, got {value}"
            )));
        }
    }
    Ok(())
}

/// `sweeps` values with exact endpoints and `interior(k, sweeps - 1)` between.
fn spaced(sweeps: usize, start: f64, end: f64, interior: impl Fn(usize, usize) -> f64) -> Vec<f64> {
    if sweeps == 1 {
        return vec![start];
    }
    let last = sweeps - 1;
    (0..sweeps)
        .map(|k| match k {
            0 => start,
            k if k == last => end,
            k => interior(k, last),
        })
        .collect()
}

/// Checks a raw β sequence: non-empty, every value positive and finite.
pub fn validate_schedule(betas: &[f64]) -> Result<()> {
    if betas.is_empty() {
        return Err(IsingError::InvalidSchedule("schedule is empty".into()));
    }
    if let Some((sweep, beta)) = betas
        .iter()
        .enumerate()
        .find(|(_, b)| !(b.is_finite() && **b > 0.0))
    {
        return Err(IsingError::InvalidSchedule(format!(
            "beta at sweep {sweep} must be positive and finite, got {beta}"
        )));
    }
    Ok(())
}

/// Configuration for a single annealing run.
///
/// # Examples
///
/// ```
/// use u_ising::anneal::{AnnealConfig, BetaSchedule};
///
/// let config = AnnealConfig::default()
///     .with_schedule(BetaSchedule::Geometric { start: 0.01, end: 5.0, sweeps: 2000 })
///     .with_seed(7)
///     .with_energy_history(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealConfig {
    /// β per sweep.
    pub schedule: BetaSchedule,

    /// Random seed for reproducibility. `None` draws a fresh seed.
    pub seed: Option<u64>,

    /// Record the energy after every sweep.
    pub record_energy_history: bool,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            schedule: BetaSchedule::default(),
            seed: None,
            record_energy_history: false,
        }
    }
}

impl AnnealConfig {
    pub fn with_schedule(mut self, schedule: BetaSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_energy_history(mut self, record: bool) -> Self {
        self.record_energy_history = record;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        self.schedule.betas().map(|_| ())
    }
}
