//! Aggregated sampling output.

use crate::model::SpinConfig;
use std::collections::BTreeMap;

/// A distinct configuration observed while sampling.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleRecord {
    pub configuration: SpinConfig,
    pub energy: f64,
    /// How many reads ended in this configuration.
    pub num_occurrences: usize,
}

/// Reads merged by configuration, lowest energy first.
///
/// Ties in energy are ordered by configuration, so the layout depends only
/// on the reads themselves.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleSet {
    records: Vec<SampleRecord>,
    total_reads: usize,
}

impl SampleSet {
    /// Merges `(configuration, energy)` reads.
    pub fn from_reads(reads: impl IntoIterator<Item = (SpinConfig, f64)>) -> Self {
        let mut merged: BTreeMap<SpinConfig, (f64, usize)> = BTreeMap::new();
        let mut total_reads = 0;
        for (configuration, energy) in reads {
            merged.entry(configuration).or_insert((energy, 0)).1 += 1;
            total_reads += 1;
        }

        let mut records: Vec<SampleRecord> = merged
            .into_iter()
            .map(|(configuration, (energy, num_occurrences))| SampleRecord {
                configuration,
                energy,
                num_occurrences,
            })
            .collect();
        // Stable: equal energies keep configuration order from the map.
        records.sort_by(|a, b| a.energy.total_cmp(&b.energy));

        Self {
            records,
            total_reads,
        }
    }

    /// The lowest-energy record.
    pub fn lowest(&self) -> Option<&SampleRecord> {
        self.records.first()
    }

    /// Distinct records, lowest energy first.
    pub fn iter(&self) -> impl Iterator<Item = &SampleRecord> {
        self.records.iter()
    }

    /// Number of distinct configurations.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of reads merged into this set.
    pub fn total_reads(&self) -> usize {
        self.total_reads
    }

    /// Energy of every read, repeated per occurrence, ascending.
    pub fn energies(&self) -> Vec<f64> {
        self.records
            .iter()
            .flat_map(|r| std::iter::repeat(r.energy).take(r.num_occurrences))
            .collect()
    }

    /// Fraction of reads that ended in `configuration`.
    pub fn frequency(&self, configuration: &SpinConfig) -> f64 {
        if self.total_reads == 0 {
            return 0.0;
        }
        self.records
            .iter()
            .find(|r| &r.configuration == configuration)
            .map_or(0.0, |r| r.num_occurrences as f64 / self.total_reads as f64)
    }
}
