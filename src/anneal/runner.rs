//! Clamped simulated-annealing sweep loop.

use super::config::{validate_schedule, AnnealConfig};
use super::plan::SweepPlan;
use crate::coloring::ColorClasses;
use crate::error::Result;
use crate::model::{
    Biases, Clamped, Couplings, IsingModel, Spin, SpinConfig, SpinId, SPIN_DOWN, SPIN_UP,
};
use crate::random::rng_from_option;
use rand::Rng;
use std::collections::BTreeSet;

/// Result of one annealing run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealResult {
    /// Final value of every spin.
    pub configuration: SpinConfig,

    /// Energy of `configuration`.
    pub energy: f64,

    /// Energy of the random starting configuration.
    pub initial_energy: f64,

    /// Number of sweeps performed (one per schedule entry).
    pub sweeps: usize,

    /// Number of accepted spin flips over the whole run.
    pub accepted_flips: usize,

    /// Energy after each sweep, when requested.
    pub energy_history: Vec<f64>,

    /// Seed the run's RNG was created from, when the annealer created it.
    pub seed: Option<u64>,
}

/// Single-spin-flip Metropolis annealer with clamped spins.
///
/// Built once per model and clamp set: construction validates the clamps
/// and colors the coupling graph. Each call to [`anneal`](Self::anneal)
/// then performs one independent run.
///
/// Every sweep visits the color classes in ascending label order. Within a
/// class, each unclamped spin `v` flips when `ln(r) < -β·ΔE(v)` for `r`
/// uniform in (0, 1], where `ΔE(v)` is the exact energy change of flipping
/// `v` given the latest values of its neighbors. Spins in one class share no
/// couplings, so evaluating the class as a batch is identical to visiting
/// its spins one by one.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use u_ising::anneal::{BetaSchedule, ClampedAnnealer};
/// use u_ising::model::IsingModel;
/// use u_ising::random::create_rng;
///
/// let h = BTreeMap::from([(0, 1.0), (1, 1.0), (2, 1.0)]);
/// let j = BTreeMap::from([((0, 1), 2.0), ((1, 2), -1.0)]);
/// let model = IsingModel::new(h, j).unwrap();
/// let clamped = BTreeMap::from([(0, -1)]);
///
/// let annealer = ClampedAnnealer::new(&model, &clamped).unwrap();
/// let betas = BetaSchedule::Linear { start: 0.1, end: 5.0, sweeps: 500 }.betas().unwrap();
/// let config = annealer.anneal(&betas, &mut create_rng(42)).unwrap();
///
/// assert_eq!(config[&0], -1);
/// assert_eq!(model.energy(&config).unwrap(), -2.0);
/// ```
///
/// # References
///
/// - Metropolis et al. (1953), "Equation of State Calculations by Fast
///   Computing Machines"
/// - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
#[derive(Debug, Clone)]
pub struct ClampedAnnealer {
    plan: SweepPlan,
}

impl ClampedAnnealer {
    /// Prepares an annealer for `model` with `clamped` spins held fixed.
    ///
    /// Fails with [`IsingError::InvalidModel`](crate::IsingError::InvalidModel)
    /// for clamped spins unknown to the model and
    /// [`IsingError::InvalidClamp`](crate::IsingError::InvalidClamp) for
    /// clamp values other than -1/+1.
    pub fn new(model: &IsingModel, clamped: &Clamped) -> Result<Self> {
        Ok(Self {
            plan: SweepPlan::new(model, clamped)?,
        })
    }

    /// Number of spins in the model.
    pub fn num_spins(&self) -> usize {
        self.plan.len()
    }

    /// Number of color classes visited per sweep.
    pub fn num_colors(&self) -> usize {
        self.plan.classes.len()
    }

    /// The color classes used to order updates, by spin id.
    pub fn color_classes(&self) -> ColorClasses {
        self.plan
            .classes
            .iter()
            .enumerate()
            .map(|(color, members)| {
                let ids: BTreeSet<SpinId> = members.iter().map(|&v| self.plan.ids[v]).collect();
                (color, ids)
            })
            .collect()
    }

    /// Runs one sweep per entry of `schedule` and returns the final configuration.
    ///
    /// Fails with [`IsingError::InvalidSchedule`](crate::IsingError::InvalidSchedule)
    /// if `schedule` is empty or holds a value that is not positive and finite.
    pub fn anneal<R: Rng>(&self, schedule: &[f64], rng: &mut R) -> Result<SpinConfig> {
        Ok(self.anneal_with_stats(schedule, false, rng)?.configuration)
    }

    /// Like [`anneal`](Self::anneal), also reporting run statistics.
    pub fn anneal_with_stats<R: Rng>(
        &self,
        schedule: &[f64],
        record_energy_history: bool,
        rng: &mut R,
    ) -> Result<AnnealResult> {
        validate_schedule(schedule)?;

        let plan = &self.plan;
        let n = plan.len();

        tracing::debug!(
            spins = n,
            clamped = plan.num_clamped(),
            colors = plan.classes.len(),
            sweeps = schedule.len(),
            "starting clamped anneal"
        );

        let mut spins: Vec<Spin> = plan
            .clamped
            .iter()
            .map(|fixed| match *fixed {
                Some(value) => value,
                None if rng.random_bool(0.5) => SPIN_UP,
                None => SPIN_DOWN,
            })
            .collect();

        let initial_energy = plan.energy(&spins);
        let mut energy = initial_energy;
        let mut accepted_flips = 0usize;
        let mut energy_history = Vec::with_capacity(if record_energy_history {
            schedule.len()
        } else {
            0
        });

        let mut bias_delta = vec![0.0; n];
        let mut coupling_delta: Vec<f64> = Vec::new();

        for (sweep, &beta) in schedule.iter().enumerate() {
            for (v, delta) in bias_delta.iter_mut().enumerate() {
                *delta = plan.bias_delta(&spins, v);
            }

            for class in &plan.classes {
                coupling_delta.clear();
                coupling_delta.extend(class.iter().map(|&v| plan.coupling_delta(&spins, v)));

                for (&v, &delta_j) in class.iter().zip(&coupling_delta) {
                    if plan.clamped[v].is_some() {
                        continue;
                    }
                    let delta = bias_delta[v] + delta_j;
                    // r in (0, 1]
                    let r = 1.0 - rng.random::<f64>();
                    if r.ln() < -beta * delta {
                        spins[v] = -spins[v];
                        energy += delta;
                        accepted_flips += 1;
                    }
                }
            }

            if record_energy_history {
                energy_history.push(energy);
            }
            tracing::trace!(sweep, beta, energy, "sweep complete");
        }

        let energy = plan.energy(&spins);

        tracing::debug!(
            energy,
            initial_energy,
            accepted_flips,
            "clamped anneal complete"
        );

        Ok(AnnealResult {
            configuration: plan.to_config(&spins),
            energy,
            initial_energy,
            sweeps: schedule.len(),
            accepted_flips,
            energy_history,
            seed: None,
        })
    }

    /// Runs with the schedule and seed from `config`.
    pub fn run(&self, config: &AnnealConfig) -> Result<AnnealResult> {
        let betas = config.schedule.betas()?;
        let (mut rng, seed) = rng_from_option(config.seed);
        let mut result = self.anneal_with_stats(&betas, config.record_energy_history, &mut rng)?;
        result.seed = Some(seed);
        Ok(result)
    }
}

/// One clamped annealing run straight from bias and coupling maps.
///
/// Validates everything before touching any spin: `h` must cover every
/// spin in `j` and `clamped`, clamp values must be -1/+1, and `schedule`
/// must be non-empty with positive values.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use u_ising::anneal::anneal;
/// use u_ising::random::create_rng;
///
/// let h = BTreeMap::from([(0, 0.0), (1, 0.0)]);
/// let j = BTreeMap::from([((0, 1), -1.0)]);
/// let clamped = BTreeMap::from([(0, 1)]);
/// let betas: Vec<f64> = (1..=200).map(|k| k as f64 * 0.02).collect();
///
/// let config = anneal(&h, &j, &clamped, &betas, &mut create_rng(3)).unwrap();
/// assert_eq!(config[&0], 1);
/// ```
pub fn anneal<R: Rng>(
    h: &Biases,
    j: &Couplings,
    clamped: &Clamped,
    schedule: &[f64],
    rng: &mut R,
) -> Result<SpinConfig> {
    let model = IsingModel::new(h.clone(), j.clone())?;
    ClampedAnnealer::new(&model, clamped)?.anneal(schedule, rng)
}
