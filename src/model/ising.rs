//! Pairwise Ising model.

use super::types::{is_spin, Adjacency, Biases, Clamped, Couplings, SpinConfig, SpinId};
use crate::error::{IsingError, Result};
use std::collections::BTreeSet;

/// A pairwise Ising model with on-site biases `h` and couplings `J`.
///
/// Energy of a configuration `s`:
///
/// ```text
/// E(s) = Σ_v h(v)·s(v) + Σ_{(u,v)} J(u,v)·s(u)·s(v)
/// ```
///
/// Every spin of the model is a key of `h` (use `0.0` for spins with no
/// field). Each coupled pair is stored under exactly one orientation.
///
/// With the `serde` feature, `J` is written as a list of `(a, b, weight)`
/// triples so the model fits formats without tuple map keys, such as JSON.
/// Deserialization runs the same checks as [`IsingModel::new`].
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use u_ising::model::IsingModel;
///
/// let h = BTreeMap::from([(0, 1.0), (1, 1.0), (2, 1.0)]);
/// let j = BTreeMap::from([((0, 1), 2.0), ((1, 2), -1.0)]);
/// let model = IsingModel::new(h, j).unwrap();
///
/// let s = BTreeMap::from([(0, -1), (1, -1), (2, -1)]);
/// assert_eq!(model.energy(&s).unwrap(), -2.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "RawIsingModel", into = "RawIsingModel")
)]
pub struct IsingModel {
    h: Biases,
    j: Couplings,
}

/// Serialized form of [`IsingModel`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawIsingModel {
    h: Biases,
    j: Vec<(SpinId, SpinId, f64)>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawIsingModel> for IsingModel {
    type Error = IsingError;

    fn try_from(raw: RawIsingModel) -> Result<Self> {
        let mut j = Couplings::new();
        for (a, b, weight) in raw.j {
            if j.insert((a, b), weight).is_some() {
                return Err(IsingError::InvalidModel(format!(
                    "coupling ({a}, {b}) listed twice"
                )));
            }
        }
        Self::new(raw.h, j)
    }
}

#[cfg(feature = "serde")]
impl From<IsingModel> for RawIsingModel {
    fn from(model: IsingModel) -> Self {
        Self {
            h: model.h,
            j: model.j.into_iter().map(|((a, b), w)| (a, b, w)).collect(),
        }
    }
}

impl IsingModel {
    /// Builds a model after checking that `h` and `J` agree.
    ///
    /// Fails with [`IsingError::InvalidModel`] when a coupling references a
    /// spin missing from `h`, couples a spin to itself, is stored under both
    /// orientations, or when any weight is not finite.
    pub fn new(h: Biases, j: Couplings) -> Result<Self> {
        for (&id, &bias) in &h {
            if !bias.is_finite() {
                return Err(IsingError::InvalidModel(format!(
                    "bias of spin {id} is not finite: {bias}"
                )));
            }
        }

        for (&(a, b), &weight) in &j {
            if a == b {
                return Err(IsingError::InvalidModel(format!(
                    "self-coupling on spin {a}"
                )));
            }
            for id in [a, b] {
                if !h.contains_key(&id) {
                    return Err(IsingError::InvalidModel(format!(
                        "coupling ({a}, {b}) references spin {id} without a bias entry"
                    )));
                }
            }
            if !weight.is_finite() {
                return Err(IsingError::InvalidModel(format!(
                    "coupling ({a}, {b}) is not finite: {weight}"
                )));
            }
            // Only report the pair once, from its smaller-first orientation.
            if a < b && j.contains_key(&(b, a)) {
                return Err(IsingError::InvalidModel(format!(
                    "pair ({a}, {b}) stored under both orientations"
                )));
            }
        }

        Ok(Self { h, j })
    }

    /// Number of spins.
    pub fn num_spins(&self) -> usize {
        self.h.len()
    }

    /// Spin identifiers in ascending order.
    pub fn spins(&self) -> impl Iterator<Item = SpinId> + '_ {
        self.h.keys().copied()
    }

    /// Bias coefficient of `id`, if the spin exists.
    pub fn bias(&self, id: SpinId) -> Option<f64> {
        self.h.get(&id).copied()
    }

    /// Bias map.
    pub fn biases(&self) -> &Biases {
        &self.h
    }

    /// Coupling map, in the orientation it was supplied.
    pub fn couplings(&self) -> &Couplings {
        &self.j
    }

    /// Coupling between `a` and `b` regardless of stored orientation.
    pub fn coupling(&self, a: SpinId, b: SpinId) -> Option<f64> {
        self.j
            .get(&(a, b))
            .or_else(|| self.j.get(&(b, a)))
            .copied()
    }

    /// Symmetric adjacency of the coupling graph. Isolated spins map to an
    /// empty set.
    pub fn adjacency(&self) -> Adjacency {
        let mut adjacency: Adjacency = self.h.keys().map(|&id| (id, BTreeSet::new())).collect();
        for &(a, b) in self.j.keys() {
            adjacency.entry(a).or_default().insert(b);
            adjacency.entry(b).or_default().insert(a);
        }
        adjacency
    }

    /// Checks a clamp set against this model.
    ///
    /// Unknown spins yield [`IsingError::InvalidModel`]; values other than
    /// -1/+1 yield [`IsingError::InvalidClamp`].
    pub fn validate_clamped(&self, clamped: &Clamped) -> Result<()> {
        for (&spin, &value) in clamped {
            if !self.h.contains_key(&spin) {
                return Err(IsingError::InvalidModel(format!(
                    "clamped spin {spin} has no bias entry"
                )));
            }
            if !is_spin(value) {
                return Err(IsingError::InvalidClamp { spin, value });
            }
        }
        Ok(())
    }

    /// Energy of a full configuration.
    ///
    /// Fails with [`IsingError::InvalidModel`] when `config` misses a spin
    /// or holds a value other than -1/+1.
    pub fn energy(&self, config: &SpinConfig) -> Result<f64> {
        let value = |id: SpinId| -> Result<f64> {
            match config.get(&id) {
                Some(&s) if is_spin(s) => Ok(f64::from(s)),
                Some(&s) => Err(IsingError::InvalidModel(format!(
                    "spin {id} has value {s}, expected -1 or +1"
                ))),
                None => Err(IsingError::InvalidModel(format!(
                    "configuration is missing spin {id}"
                ))),
            }
        };

        let mut energy = 0.0;
        for (&id, &bias) in &self.h {
            energy += bias * value(id)?;
        }
        for (&(a, b), &weight) in &self.j {
            energy += weight * value(a)? * value(b)?;
        }
        Ok(energy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn three_spin() -> IsingModel {
        let h = BTreeMap::from([(0, 1.0), (1, 1.0), (2, 1.0)]);
        let j = BTreeMap::from([((0, 1), 2.0), ((1, 2), -1.0)]);
        IsingModel::new(h, j).unwrap()
    }

    #[test]
    fn test_three_spin_energies() {
        let model = three_spin();
        let cases = [
            ([-1, -1, -1], -2.0),
            ([-1, 1, -1], -2.0),
            ([-1, 1, 1], -2.0),
            ([-1, -1, 1], 2.0),
            ([1, 1, 1], 4.0),
        ];
        for (spins, expected) in cases {
            let config: SpinConfig = spins.iter().enumerate().map(|(i, &s)| (i, s)).collect();
            let energy = model.energy(&config).unwrap();
            assert!(
                (energy - expected).abs() < 1e-12,
                "{spins:?}: expected {expected}, got {energy}"
            );
        }
    }

    #[test]
    fn test_missing_bias_rejected() {
        let h = BTreeMap::from([(0, 0.0)]);
        let j = BTreeMap::from([((0, 1), 1.0)]);
        assert!(matches!(
            IsingModel::new(h, j),
            Err(IsingError::InvalidModel(_))
        ));
    }

    #[test]
    fn test_self_coupling_rejected() {
        let h = BTreeMap::from([(0, 0.0)]);
        let j = BTreeMap::from([((0, 0), 1.0)]);
        assert!(matches!(
            IsingModel::new(h, j),
            Err(IsingError::InvalidModel(_))
        ));
    }

    #[test]
    fn test_both_orientations_rejected() {
        let h = BTreeMap::from([(0, 0.0), (1, 0.0)]);
        let j = BTreeMap::from([((0, 1), 1.0), ((1, 0), 1.0)]);
        assert!(matches!(
            IsingModel::new(h, j),
            Err(IsingError::InvalidModel(_))
        ));
    }

    #[test]
    fn test_non_finite_weight_rejected() {
        let h = BTreeMap::from([(0, f64::NAN)]);
        assert!(IsingModel::new(h, BTreeMap::new()).is_err());
    }

    #[test]
    fn test_coupling_lookup_either_orientation() {
        let model = three_spin();
        assert_eq!(model.coupling(0, 1), Some(2.0));
        assert_eq!(model.coupling(1, 0), Some(2.0));
        assert_eq!(model.coupling(2, 1), Some(-1.0));
        assert_eq!(model.coupling(0, 2), None);
    }

    #[test]
    fn test_adjacency_symmetric() {
        let model = three_spin();
        let adjacency = model.adjacency();
        assert_eq!(adjacency[&0], BTreeSet::from([1]));
        assert_eq!(adjacency[&1], BTreeSet::from([0, 2]));
        assert_eq!(adjacency[&2], BTreeSet::from([1]));
    }

    #[test]
    fn test_isolated_spin_in_adjacency() {
        let h = BTreeMap::from([(0, 0.5), (7, -0.5)]);
        let model = IsingModel::new(h, BTreeMap::new()).unwrap();
        let adjacency = model.adjacency();
        assert_eq!(adjacency.len(), 2);
        assert!(adjacency[&7].is_empty());
    }

    #[test]
    fn test_validate_clamped() {
        let model = three_spin();
        assert!(model.validate_clamped(&BTreeMap::from([(0, -1)])).is_ok());
        assert_eq!(
            model.validate_clamped(&BTreeMap::from([(1, 0)])),
            Err(IsingError::InvalidClamp { spin: 1, value: 0 })
        );
        assert!(matches!(
            model.validate_clamped(&BTreeMap::from([(9, 1)])),
            Err(IsingError::InvalidModel(_))
        ));
    }

    #[test]
    fn test_energy_rejects_bad_config() {
        let model = three_spin();
        let missing = BTreeMap::from([(0, 1), (1, 1)]);
        assert!(model.energy(&missing).is_err());
        let bad_value = BTreeMap::from([(0, 1), (1, 2), (2, 1)]);
        assert!(model.energy(&bad_value).is_err());
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use crate::anneal::ClampedAnnealer;
    use std::collections::BTreeMap;

    #[test]
    fn test_json_round_trip() {
        let h = BTreeMap::from([(0, 1.0), (1, 1.0), (2, 1.0)]);
        let j = BTreeMap::from([((0, 1), 2.0), ((2, 1), -1.0)]);
        let model = IsingModel::new(h, j).unwrap();

        let text = serde_json::to_string(&model).unwrap();
        let back: IsingModel = serde_json::from_str(&text).unwrap();
        assert_eq!(back, model);
        assert_eq!(back.coupling(1, 2), Some(-1.0));
    }

    #[test]
    fn test_deserialize_rejects_unknown_coupled_spin() {
        let result = serde_json::from_str::<IsingModel>(r#"{"h":{"0":1.0},"j":[[0,5,1.0]]}"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("spin 5"), "{err}");
    }

    #[test]
    fn test_deserialize_rejects_self_coupling_and_duplicates() {
        let self_loop = r#"{"h":{"0":0.0},"j":[[0,0,1.0]]}"#;
        assert!(serde_json::from_str::<IsingModel>(self_loop).is_err());

        let twice = r#"{"h":{"0":0.0,"1":0.0},"j":[[0,1,1.0],[0,1,2.0]]}"#;
        assert!(serde_json::from_str::<IsingModel>(twice).is_err());

        let both = r#"{"h":{"0":0.0,"1":0.0},"j":[[0,1,1.0],[1,0,1.0]]}"#;
        assert!(serde_json::from_str::<IsingModel>(both).is_err());
    }

    #[test]
    fn test_deserialized_model_anneals() {
        let text = r#"{"h":{"0":1.0,"1":1.0,"2":1.0},"j":[[0,1,2.0],[1,2,-1.0]]}"#;
        let model: IsingModel = serde_json::from_str(text).unwrap();
        let annealer = ClampedAnnealer::new(&model, &BTreeMap::from([(0, -1)])).unwrap();
        assert_eq!(annealer.num_spins(), 3);
    }
}
