//! Spin identifiers, values, and the maps built from them.

use std::collections::{BTreeMap, BTreeSet};

/// Integer identifier of a spin.
pub type SpinId = usize;

/// Spin value. Valid values are [`SPIN_DOWN`] and [`SPIN_UP`].
pub type Spin = i8;

/// The `-1` spin value.
pub const SPIN_DOWN: Spin = -1;

/// The `+1` spin value.
pub const SPIN_UP: Spin = 1;

/// Value of every spin in a model. Ordered so iteration is deterministic.
pub type SpinConfig = BTreeMap<SpinId, Spin>;

/// Spins pinned to a fixed value for a whole run.
pub type Clamped = BTreeMap<SpinId, Spin>;

/// Bias coefficients `h`, one per spin.
pub type Biases = BTreeMap<SpinId, f64>;

/// Coupling coefficients `J`, keyed by an unordered pair stored in one orientation.
///
/// Tuple keys have no JSON representation; [`IsingModel`](super::IsingModel)
/// serializes its couplings as `(a, b, weight)` triples instead.
pub type Couplings = BTreeMap<(SpinId, SpinId), f64>;

/// Neighbor sets of the coupling graph. Must be symmetric.
pub type Adjacency = BTreeMap<SpinId, BTreeSet<SpinId>>;

/// Whether `value` is a legal spin value.
#[inline]
pub fn is_spin(value: Spin) -> bool {
    value == SPIN_DOWN || value == SPIN_UP
}
