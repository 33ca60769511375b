//! Error types.

use crate::model::SpinId;
use thiserror::Error;

/// Errors raised while validating models, graphs, schedules, and configs.
///
/// Every variant is an input-validation failure. They are detected before
/// any spin is touched, so a run either fails up front or completes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IsingError {
    /// Adjacency is asymmetric, self-referential, or names unknown spins.
    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    /// Bias, coupling, and clamp mappings are inconsistent with each other.
    #[error("invalid model: {0}")]
    InvalidModel(String),

    /// Schedule is empty or holds a non-positive inverse temperature.
    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),

    /// A clamped spin was pinned to something other than -1 or +1.
    #[error("invalid clamp: spin {spin} pinned to {value}, expected -1 or +1")]
    InvalidClamp { spin: SpinId, value: i8 },

    /// Sampler or annealer configuration is unusable.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, IsingError>;
