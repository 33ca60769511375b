//! Exact Boltzmann distribution by enumeration.

use super::levels::{energy_levels, EnergyLevel};
use crate::error::{IsingError, Result};
use crate::model::{Clamped, IsingModel, Spin, SpinConfig, SpinId, SPIN_DOWN, SPIN_UP};
use std::collections::BTreeMap;

/// Largest number of free spins [`exact_distribution`] will enumerate.
pub const MAX_EXACT_SPINS: usize = 16;

/// Relative tolerance for treating two energies as the same level.
const LEVEL_TOLERANCE: f64 = 1e-9;

/// One assignment of the model and its Boltzmann weight.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExactState {
    pub configuration: SpinConfig,
    pub energy: f64,
    pub probability: f64,
}

/// Boltzmann distribution `p(s) = exp(-β·E(s)) / Z` over every assignment
/// of the free spins, with clamped spins held at their values.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExactDistribution {
    /// Inverse temperature the distribution was computed at.
    pub beta: f64,
    /// Every state, in enumeration order. State `i` sets free spin
    /// `free_spins[k]` up exactly when bit `k` of `i` is set.
    pub states: Vec<ExactState>,
    /// Unclamped spins in ascending id order.
    pub free_spins: Vec<SpinId>,
    /// `ln Z`, computed with the ground energy factored out so that large
    /// `β·|E|` does not overflow.
    pub log_partition: f64,
    /// Lowest energy over all states.
    pub ground_energy: f64,
    /// Number of states at the ground energy.
    pub ground_degeneracy: usize,
}

impl ExactDistribution {
    /// Partition function `Z`. May be infinite where `ln Z` is not.
    pub fn partition_function(&self) -> f64 {
        self.log_partition.exp()
    }

    /// Probability of `configuration`, or 0 if it is not a state of the
    /// distribution.
    pub fn probability(&self, configuration: &SpinConfig) -> f64 {
        match self.state_index(configuration) {
            Some(i) => self.states[i].probability,
            None => 0.0,
        }
    }

    /// Position of `configuration` in [`states`](Self::states).
    pub fn state_index(&self, configuration: &SpinConfig) -> Option<usize> {
        let mut index = 0usize;
        for (bit, id) in self.free_spins.iter().enumerate() {
            match configuration.get(id) {
                Some(&SPIN_UP) => index |= 1 << bit,
                Some(&SPIN_DOWN) => {}
                _ => return None,
            }
        }
        self.states
            .get(index)
            .filter(|s| &s.configuration == configuration)
            .map(|_| index)
    }

    /// Expected energy `Σ p(s)·E(s)`.
    pub fn mean_energy(&self) -> f64 {
        self.states.iter().map(|s| s.probability * s.energy).sum()
    }

    /// States at the ground energy.
    pub fn ground_states(&self) -> impl Iterator<Item = &ExactState> {
        let tolerance = level_tolerance(self.ground_energy);
        self.states
            .iter()
            .filter(move |s| s.energy - self.ground_energy <= tolerance)
    }

    /// Energy levels with their degeneracies, ascending.
    pub fn energy_levels(&self) -> Vec<EnergyLevel> {
        let energies: Vec<f64> = self.states.iter().map(|s| s.energy).collect();
        energy_levels(&energies, level_tolerance(self.ground_energy))
    }
}

fn level_tolerance(reference: f64) -> f64 {
    LEVEL_TOLERANCE * reference.abs().max(1.0)
}

/// Enumerates the Boltzmann distribution of `model` at inverse temperature
/// `beta`, with `clamped` spins fixed.
///
/// Free spins are enumerated in ascending id order, the lowest id varying
/// fastest. Fails with [`IsingError::InvalidSchedule`] for a `beta` that is
/// not positive and finite, with the errors of
/// [`IsingModel::validate_clamped`] for bad clamps, and with
/// [`IsingError::InvalidModel`] when more than [`MAX_EXACT_SPINS`] spins
/// are free.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use u_ising::analysis::exact_distribution;
/// use u_ising::model::IsingModel;
///
/// let h = BTreeMap::from([(0, 1.0), (1, 1.0), (2, 1.0)]);
/// let j = BTreeMap::from([((0, 1), 2.0), ((1, 2), -1.0)]);
/// let model = IsingModel::new(h, j).unwrap();
///
/// let dist = exact_distribution(&model, &BTreeMap::from([(0, -1)]), 1.0).unwrap();
/// assert_eq!(dist.states.len(), 4);
/// assert_eq!(dist.ground_energy, -2.0);
/// assert_eq!(dist.ground_degeneracy, 3);
/// ```
pub fn exact_distribution(
    model: &IsingModel,
    clamped: &Clamped,
    beta: f64,
) -> Result<ExactDistribution> {
    if !(beta.is_finite() && beta > 0.0) {
        return Err(IsingError::InvalidSchedule(format!(
            "beta must be positive and finite, got {beta}"
        )));
    }
    model.validate_clamped(clamped)?;

    let ids: Vec<SpinId> = model.spins().collect();
    let index: BTreeMap<SpinId, usize> = ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();
    let h: Vec<f64> = model.biases().values().copied().collect();
    let edges: Vec<(usize, usize, f64)> = model
        .couplings()
        .iter()
        .map(|(&(a, b), &w)| (index[&a], index[&b], w))
        .collect();

    let free: Vec<usize> = (0..ids.len())
        .filter(|&i| !clamped.contains_key(&ids[i]))
        .collect();
    if free.len() > MAX_EXACT_SPINS {
        return Err(IsingError::InvalidModel(format!(
            "{} free spins exceed the enumeration limit of {MAX_EXACT_SPINS}",
            free.len()
        )));
    }

    let mut spins: Vec<Spin> = ids
        .iter()
        .map(|id| clamped.get(id).copied().unwrap_or(SPIN_DOWN))
        .collect();

    let assign = |spins: &mut [Spin], mask: usize| {
        for (bit, &v) in free.iter().enumerate() {
            spins[v] = if (mask >> bit) & 1 == 1 { SPIN_UP } else { SPIN_DOWN };
        }
    };

    let num_states = 1usize << free.len();
    let mut energies: Vec<f64> = Vec::with_capacity(num_states);
    for mask in 0..num_states {
        assign(&mut spins, mask);
        let energy = h
            .iter()
            .zip(&spins)
            .map(|(&hv, &s)| hv * f64::from(s))
            .sum::<f64>()
            + edges
                .iter()
                .map(|&(a, b, w)| w * f64::from(spins[a]) * f64::from(spins[b]))
                .sum::<f64>();
        energies.push(energy);
    }

    let ground_energy = energies.iter().copied().fold(f64::INFINITY, f64::min);
    let shifted_sum: f64 = energies
        .iter()
        .map(|&e| (-beta * (e - ground_energy)).exp())
        .sum();
    let log_partition = -beta * ground_energy + shifted_sum.ln();

    let tolerance = level_tolerance(ground_energy);
    let ground_degeneracy = energies
        .iter()
        .filter(|&&e| e - ground_energy <= tolerance)
        .count();

    let mut states = Vec::with_capacity(num_states);
    for (mask, &energy) in energies.iter().enumerate() {
        assign(&mut spins, mask);
        states.push(ExactState {
            configuration: ids.iter().copied().zip(spins.iter().copied()).collect(),
            energy,
            probability: (-beta * (energy - ground_energy)).exp() / shifted_sum,
        });
    }

    tracing::debug!(
        free = free.len(),
        beta,
        ground_energy,
        ground_degeneracy,
        log_partition,
        "exact enumeration complete"
    );

    Ok(ExactDistribution {
        beta,
        states,
        free_spins: free.iter().map(|&v| ids[v]).collect(),
        log_partition,
        ground_energy,
        ground_degeneracy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anneal::{AnnealConfig, BetaSchedule};
    use crate::sampler::{Sampler, SamplerConfig};

    fn three_spin() -> IsingModel {
        let h = BTreeMap::from([(0, 1.0), (1, 1.0), (2, 1.0)]);
        let j = BTreeMap::from([((0, 1), 2.0), ((1, 2), -1.0)]);
        IsingModel::new(h, j).unwrap()
    }

    fn config(spins: [Spin; 3]) -> SpinConfig {
        spins.iter().enumerate().map(|(i, &s)| (i, s)).collect()
    }

    #[test]
    fn test_clamped_three_spin() {
        let dist = exact_distribution(&three_spin(), &BTreeMap::from([(0, -1)]), 1.0).unwrap();

        assert_eq!(dist.states.len(), 4);
        assert!(dist.states.iter().all(|s| s.configuration[&0] == -1));
        let total: f64 = dist.states.iter().map(|s| s.probability).sum();
        assert!((total - 1.0).abs() < 1e-12);

        let z = 3.0 * 2f64.exp() + (-2f64).exp();
        assert!((dist.partition_function() - z).abs() < 1e-9);
        assert!((dist.probability(&config([-1, -1, 1])) - (-2f64).exp() / z).abs() < 1e-12);
        assert_eq!(dist.probability(&config([1, 1, 1])), 0.0);

        assert_eq!(dist.ground_degeneracy, 3);
        let ground: Vec<_> = dist.ground_states().map(|s| s.configuration.clone()).collect();
        assert_eq!(
            ground,
            vec![config([-1, -1, -1]), config([-1, 1, -1]), config([-1, 1, 1])]
        );
    }

    #[test]
    fn test_state_index_follows_free_spin_bits() {
        let dist = exact_distribution(&three_spin(), &BTreeMap::from([(1, 1)]), 1.0).unwrap();
        assert_eq!(dist.free_spins, vec![0, 2]);

        for (i, state) in dist.states.iter().enumerate() {
            assert_eq!(dist.state_index(&state.configuration), Some(i));
            assert_eq!(state.configuration[&0] == 1, i & 1 == 1);
            assert_eq!(state.configuration[&2] == 1, i & 2 == 2);
        }
        // Wrong clamp value, missing spin.
        assert_eq!(dist.state_index(&config([1, -1, 1])), None);
        assert_eq!(dist.state_index(&BTreeMap::from([(0, 1), (2, 1)])), None);
    }

    #[test]
    fn test_unclamped_levels() {
        let dist = exact_distribution(&three_spin(), &Clamped::new(), 0.5).unwrap();
        assert_eq!(dist.states.len(), 8);
        let levels = dist.energy_levels();
        assert_eq!(levels.iter().map(|l| l.count).sum::<usize>(), 8);
        assert_eq!(levels[0].energy, dist.ground_energy);
        assert_eq!(levels[0].count, dist.ground_degeneracy);
    }

    #[test]
    fn test_high_beta_concentrates_on_ground_states() {
        let dist = exact_distribution(&three_spin(), &BTreeMap::from([(0, -1)]), 50.0).unwrap();
        let ground_mass: f64 = dist.ground_states().map(|s| s.probability).sum();
        assert!((ground_mass - 1.0).abs() < 1e-12);
        assert!((dist.mean_energy() - -2.0).abs() < 1e-9);
        assert!(dist.log_partition.is_finite());
    }

    #[test]
    fn test_invalid_inputs() {
        let model = three_spin();
        assert!(matches!(
            exact_distribution(&model, &Clamped::new(), 0.0),
            Err(IsingError::InvalidSchedule(_))
        ));
        assert!(matches!(
            exact_distribution(&model, &BTreeMap::from([(0, 2)]), 1.0),
            Err(IsingError::InvalidClamp { .. })
        ));

        let h = (0..=MAX_EXACT_SPINS).map(|i| (i, 0.0)).collect();
        let big = IsingModel::new(h, BTreeMap::new()).unwrap();
        assert!(matches!(
            exact_distribution(&big, &Clamped::new(), 1.0),
            Err(IsingError::InvalidModel(_))
        ));
    }

    #[test]
    fn test_constant_beta_sampling_matches_boltzmann() {
        let model = three_spin();
        let clamped = BTreeMap::from([(0, -1)]);
        let beta = 0.5;
        let dist = exact_distribution(&model, &clamped, beta).unwrap();

        let config = SamplerConfig::default().with_num_reads(2000).with_anneal(
            AnnealConfig::default()
                .with_schedule(BetaSchedule::Custom(vec![beta; 50]))
                .with_seed(31),
        );
        let samples = Sampler::sample(&model, &clamped, &config).unwrap();

        for state in &dist.states {
            let observed = samples.frequency(&state.configuration);
            assert!(
                (observed - state.probability).abs() < 0.05,
                "{:?}: observed {observed}, expected {}",
                state.configuration,
                state.probability
            );
        }
    }
}
