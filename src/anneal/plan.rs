//! Indexed form of a model used inside the sweep loop.

use crate::coloring::greedy_coloring;
use crate::error::Result;
use crate::model::{Clamped, IsingModel, Spin, SpinConfig, SpinId};
use std::collections::BTreeMap;

/// Model, clamps, and color classes translated to dense indices.
///
/// Index `i` refers to the `i`-th spin in ascending id order.
#[derive(Debug, Clone)]
pub(crate) struct SweepPlan {
    pub ids: Vec<SpinId>,
    pub h: Vec<f64>,
    /// Weighted neighbor lists; each coupling appears once in each endpoint's list.
    pub neighbors: Vec<Vec<(usize, f64)>>,
    /// Color classes in ascending label order, members in ascending id order.
    pub classes: Vec<Vec<usize>>,
    pub clamped: Vec<Option<Spin>>,
}

impl SweepPlan {
    pub fn new(model: &IsingModel, clamped: &Clamped) -> Result<Self> {
        model.validate_clamped(clamped)?;

        let ids: Vec<SpinId> = model.spins().collect();
        let index: BTreeMap<SpinId, usize> =
            ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();

        let h: Vec<f64> = model.biases().values().copied().collect();

        let mut neighbors = vec![Vec::new(); ids.len()];
        for (&(a, b), &weight) in model.couplings() {
            let (ia, ib) = (index[&a], index[&b]);
            neighbors[ia].push((ib, weight));
            neighbors[ib].push((ia, weight));
        }

        let classes: Vec<Vec<usize>> = greedy_coloring(&model.adjacency())?
            .into_values()
            .map(|members| members.into_iter().map(|id| index[&id]).collect::<Vec<_>>())
            .collect();

        let clamped: Vec<Option<Spin>> = ids.iter().map(|id| clamped.get(id).copied()).collect();

        Ok(Self {
            ids,
            h,
            neighbors,
            classes,
            clamped,
        })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn num_clamped(&self) -> usize {
        self.clamped.iter().filter(|c| c.is_some()).count()
    }

    /// `-2·s(v)·h(v)`: energy change of the bias term when `v` flips.
    #[inline]
    pub fn bias_delta(&self, spins: &[Spin], v: usize) -> f64 {
        -2.0 * f64::from(spins[v]) * self.h[v]
    }

    /// `-2·s(v)·Σ_u J(v,u)·s(u)`: energy change of the coupling terms when `v` flips.
    #[inline]
    pub fn coupling_delta(&self, spins: &[Spin], v: usize) -> f64 {
        let field: f64 = self.neighbors[v]
            .iter()
            .map(|&(u, weight)| weight * f64::from(spins[u]))
            .sum();
        -2.0 * f64::from(spins[v]) * field
    }

    pub fn energy(&self, spins: &[Spin]) -> f64 {
        let mut energy = 0.0;
        for (v, &s) in spins.iter().enumerate() {
            energy += self.h[v] * f64::from(s);
            for &(u, weight) in &self.neighbors[v] {
                // Each coupling is listed at both endpoints; count it once.
                if u > v {
                    energy += weight * f64::from(s) * f64::from(spins[u]);
                }
            }
        }
        energy
    }

    pub fn to_config(&self, spins: &[Spin]) -> SpinConfig {
        self.ids.iter().copied().zip(spins.iter().copied()).collect()
    }
}
