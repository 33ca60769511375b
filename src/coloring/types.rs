//! Coloring output and options.

use crate::model::SpinId;
use std::collections::{BTreeMap, BTreeSet};

/// Partition of spins into independent sets, keyed by color label.
///
/// Labels start at 0 and are contiguous.
pub type ColorClasses = BTreeMap<usize, BTreeSet<SpinId>>;

/// Order in which the greedy coloring visits spins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColoringOrder {
    /// Ascending spin id.
    #[default]
    Ascending,

    /// Highest degree first, ties by ascending id (Welsh & Powell, 1967).
    ///
    /// Tends to use fewer colors on irregular graphs.
    LargestDegreeFirst,
}
