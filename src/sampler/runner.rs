//! Repeated annealing reads.

use super::config::SamplerConfig;
use super::types::SampleSet;
use crate::anneal::ClampedAnnealer;
use crate::error::Result;
use crate::model::{Clamped, IsingModel, SpinConfig};
use crate::random::create_rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Draws independent annealing reads and tabulates them.
pub struct Sampler;

impl Sampler {
    /// Runs `config.num_reads` anneals of `model` with `clamped` held fixed.
    ///
    /// Read `i` uses its own RNG seeded with `base + i`, where `base` is the
    /// configured seed (or a fresh one), so the sample set does not depend
    /// on whether reads ran in parallel.
    pub fn sample(model: &IsingModel, clamped: &Clamped, config: &SamplerConfig) -> Result<SampleSet> {
        config.validate()?;

        let annealer = ClampedAnnealer::new(model, clamped)?;
        let betas = config.anneal.schedule.betas()?;
        let base_seed = config.anneal.seed.unwrap_or_else(rand::random);

        tracing::debug!(
            reads = config.num_reads,
            sweeps = betas.len(),
            base_seed,
            parallel = config.parallel,
            "sampling"
        );

        let read = |i: usize| -> Result<(SpinConfig, f64)> {
            let mut rng = create_rng(base_seed.wrapping_add(i as u64));
            let result = annealer.anneal_with_stats(&betas, false, &mut rng)?;
            Ok((result.configuration, result.energy))
        };

        #[cfg(feature = "parallel")]
        let reads: Vec<(SpinConfig, f64)> = if config.parallel {
            (0..config.num_reads)
                .into_par_iter()
                .map(read)
                .collect::<Result<Vec<_>>>()?
        } else {
            (0..config.num_reads).map(read).collect::<Result<Vec<_>>>()?
        };

        #[cfg(not(feature = "parallel"))]
        let reads: Vec<(SpinConfig, f64)> = (0..config.num_reads).map(read).collect::<Result<Vec<_>>>()?;

        let set = SampleSet::from_reads(reads);
        tracing::debug!(
            distinct = set.len(),
            lowest = ?set.lowest().map(|r| r.energy),
            "sampling complete"
        );
        Ok(set)
    }
}
