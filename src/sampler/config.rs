//! Sampler configuration.

use crate::anneal::AnnealConfig;
use crate::error::{IsingError, Result};

/// Configuration for drawing many independent annealing reads.
///
/// # Examples
///
/// ```
/// use u_ising::anneal::AnnealConfig;
/// use u_ising::sampler::SamplerConfig;
///
/// let config = SamplerConfig::default()
///     .with_num_reads(500)
///     .with_anneal(AnnealConfig::default().with_seed(42))
///     .with_parallel(true);
/// assert_eq!(config.num_reads, 500);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SamplerConfig {
    /// Number of independent runs.
    pub num_reads: usize,

    /// Schedule and base seed shared by every read. Read `i` is seeded
    /// with `seed + i`.
    pub anneal: AnnealConfig,

    /// Whether to run reads in parallel using rayon.
    ///
    /// Only takes effect with the `parallel` feature. Results are the same
    /// either way.
    pub parallel: bool,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            num_reads: 100,
            anneal: AnnealConfig::default(),
            parallel: false,
        }
    }
}

impl SamplerConfig {
    pub fn with_num_reads(mut self, n: usize) -> Self {
        self.num_reads = n;
        self
    }

    pub fn with_anneal(mut self, anneal: AnnealConfig) -> Self {
        self.anneal = anneal;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.num_reads == 0 {
            return Err(IsingError::InvalidConfig(
                "num_reads must be positive".into(),
            ));
        }
        self.anneal.validate()
    }
}
