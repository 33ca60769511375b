//! Graph coloring of the coupling graph.
//!
//! Spins that share a color are never coupled, so the energy change of
//! flipping one of them does not depend on the others' new values. The
//! annealer uses this to update a whole color class against a fixed
//! snapshot of its neighbors.
//!
//! # References
//!
//! - Welsh & Powell (1967), "An upper bound for the chromatic number of a
//!   graph and its application to timetabling problems"

mod greedy;
mod types;

pub use greedy::{greedy_coloring, greedy_coloring_with, is_proper_coloring, validate_adjacency};
pub use types::{ColorClasses, ColoringOrder};
