//! Multi-read sampling.
//!
//! Repeats the clamped annealer many times from independent random starts
//! and merges the final configurations into a [`SampleSet`], the usual way
//! of estimating low-energy structure (ground states, degeneracy) of a
//! model from an annealing sampler.

mod config;
mod runner;
mod types;

pub use config::SamplerConfig;
pub use runner::Sampler;
pub use types::{SampleRecord, SampleSet};
