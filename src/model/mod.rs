//! Pairwise Ising models (binary Markov random fields).
//!
//! Spins take values in {-1, +1}. A model carries on-site biases `h` and
//! pairwise couplings `J`; its energy is
//! `E(s) = Σ h(v)·s(v) + Σ J(u,v)·s(u)·s(v)`, and the associated Boltzmann
//! distribution is `p(s) ∝ exp(-β·E(s))`.
//!
//! # References
//!
//! - Ising (1925), "Beitrag zur Theorie des Ferromagnetismus"
//! - Koller & Friedman (2009), "Probabilistic Graphical Models", ch. 4

mod ising;
mod types;

pub use ising::IsingModel;
pub use types::{
    is_spin, Adjacency, Biases, Clamped, Couplings, Spin, SpinConfig, SpinId, SPIN_DOWN, SPIN_UP,
};
