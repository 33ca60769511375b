//! Clamped simulated annealing for Ising models.
//!
//! Approximates the maximum-a-posteriori configuration of an Ising model
//! whose evidence spins are clamped. Each sweep proposes a flip of every
//! free spin, color class by color class, and accepts it with Metropolis
//! probability `min(1, exp(-β·ΔE))` at that sweep's inverse temperature.
//!
//! The schedule direction is the caller's choice. β increasing over the
//! run (cooling) concentrates the final state on low-energy
//! configurations; β decreasing (heating) ends close to uniform sampling.

mod config;
mod plan;
mod runner;

pub use config::{validate_schedule, AnnealConfig, BetaSchedule};
pub use runner::{anneal, AnnealResult, ClampedAnnealer};
