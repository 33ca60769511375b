//! Clamped Ising-model annealing and Boltzmann sampling.
//!
//! Provides the pieces needed for MAP inference on pairwise Ising models
//! (binary Markov random fields) with observed, clamped spins:
//!
//! - **Model**: biases `h`, couplings `J`, and the energy
//!   `E(s) = Σ h·s + Σ J·s·s` over spins in {-1, +1}.
//! - **Coloring**: greedy partition of the coupling graph into independent
//!   sets, used to order spin updates.
//! - **Annealing**: single-spin-flip Metropolis sweeps over a caller-given
//!   inverse-temperature schedule, with clamped spins held fixed.
//! - **Sampling**: many independent annealing reads merged into a sample
//!   set, optionally in parallel.
//! - **Analysis**: exact Boltzmann enumeration for small models and energy
//!   level histograms.
//!
//! # Architecture
//!
//! All entry points take their inputs explicitly, including the random
//! number generator; there is no global state. Inputs are validated up
//! front and reported as [`IsingError`]; once a run starts it cannot fail.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use u_ising::anneal::{AnnealConfig, BetaSchedule, ClampedAnnealer};
//! use u_ising::model::IsingModel;
//!
//! let h = BTreeMap::from([(0, 1.0), (1, 1.0), (2, 1.0)]);
//! let j = BTreeMap::from([((0, 1), 2.0), ((1, 2), -1.0)]);
//! let model = IsingModel::new(h, j)?;
//!
//! let annealer = ClampedAnnealer::new(&model, &BTreeMap::from([(0, -1)]))?;
//! let config = AnnealConfig::default()
//!     .with_schedule(BetaSchedule::Linear { start: 0.1, end: 5.0, sweeps: 1000 })
//!     .with_seed(42);
//! let result = annealer.run(&config)?;
//!
//! assert_eq!(result.configuration[&0], -1);
//! assert_eq!(result.energy, -2.0);
//! # Ok::<(), u_ising::IsingError>(())
//! ```

pub mod analysis;
pub mod anneal;
pub mod coloring;
pub mod error;
pub mod model;
pub mod random;
pub mod sampler;

pub use error::{IsingError, Result};
