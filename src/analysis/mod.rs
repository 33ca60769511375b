//! Exact and empirical energy statistics.
//!
//! For models small enough to enumerate, [`exact_distribution`] gives the
//! Boltzmann distribution, partition function, and ground-state degeneracy
//! that annealing reads can be checked against. [`energy_levels`] groups
//! sampled energies into a degeneracy histogram.

mod exact;
mod levels;

pub use exact::{exact_distribution, ExactDistribution, ExactState, MAX_EXACT_SPINS};
pub use levels::{energy_levels, EnergyLevel};
