//! Global and per-label feature statistics.
//!
//! A [`StatisticsTable`] is fitted once from the full reference dataset and
//! never mutated afterwards. It carries the z-score parameters for every
//! feature (the Normalizer) and, per crop label, the raw and normalized mean
//! vectors that hint generation compares against.
//!
//! # Example
//!
//! ```
//! use cosecha::dataset::{LabeledSample, ReferenceDataset};
//! use cosecha::features::FeatureVector;
//! use cosecha::stats::StatisticsTable;
//!
//! let dataset = ReferenceDataset::new(vec![
//!     LabeledSample::new(FeatureVector::new([90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.0]), "rice"),
//!     LabeledSample::new(FeatureVector::new([20.0, 67.0, 20.0, 26.0, 52.0, 6.0, 60.0]), "maize"),
//! ]).unwrap();
//!
//! let stats = StatisticsTable::fit(&dataset).unwrap();
//! assert_eq!(stats.label_stats("rice").unwrap().count, 1);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dataset::ReferenceDataset;
use crate::error::{CosechaError, Result};
use crate::features::{FeatureVector, FEATURE_COUNT};

/// Aggregate statistics for one crop label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelStats {
    /// Mean of the raw readings over this label's rows
    pub mean_raw: FeatureVector,
    /// The raw mean pushed through the global z-score
    pub mean_normalized: FeatureVector,
    /// Number of rows carrying this label
    pub count: usize,
}

/// Per-feature mean/stddev and per-label means, fitted once from a dataset.
///
/// The stored deviations are floored at 1.0, so a constant feature
/// contributes zero normalized deviation instead of dividing by zero. They
/// are normalization divisors, not true standard deviations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsTable {
    mean: [f32; FEATURE_COUNT],
    stddev: [f32; FEATURE_COUNT],
    per_label: BTreeMap<String, LabelStats>,
}

impl StatisticsTable {
    /// Fits global and per-label statistics over the full dataset.
    ///
    /// Three passes: arithmetic means, population standard deviations
    /// (floored at 1.0), then per-label sums and counts. Construction is
    /// all-or-nothing; a returned table is complete.
    ///
    /// # Errors
    ///
    /// Returns [`CosechaError::DataUnavailable`] for an empty dataset.
    pub fn fit(dataset: &ReferenceDataset) -> Result<Self> {
        if dataset.is_empty() {
            return Err(CosechaError::DataUnavailable {
                context: "cannot fit statistics on an empty dataset".to_string(),
            });
        }
        let n = dataset.len() as f32;

        let mut mean = [0.0f32; FEATURE_COUNT];
        for sample in dataset.samples() {
            for (m, v) in mean.iter_mut().zip(sample.features.as_slice()) {
                *m += v;
            }
        }
        for m in &mut mean {
            *m /= n;
        }

        let mut stddev = [0.0f32; FEATURE_COUNT];
        for sample in dataset.samples() {
            for (s, (v, m)) in stddev
                .iter_mut()
                .zip(sample.features.as_slice().iter().zip(mean.iter()))
            {
                let diff = v - m;
                *s += diff * diff;
            }
        }
        for s in &mut stddev {
            *s = (*s / n).sqrt().max(1.0);
        }

        let mut sums: BTreeMap<String, ([f32; FEATURE_COUNT], usize)> = BTreeMap::new();
        for sample in dataset.samples() {
            let (sum, count) = sums
                .entry(sample.label.clone())
                .or_insert(([0.0; FEATURE_COUNT], 0));
            for (s, v) in sum.iter_mut().zip(sample.features.as_slice()) {
                *s += v;
            }
            *count += 1;
        }

        let mut table = Self {
            mean,
            stddev,
            per_label: BTreeMap::new(),
        };
        for (label, (sum, count)) in sums {
            let mut raw = [0.0f32; FEATURE_COUNT];
            for (r, s) in raw.iter_mut().zip(sum.iter()) {
                *r = s / count as f32;
            }
            let mean_raw = FeatureVector::new(raw);
            let mean_normalized = table.normalize(&mean_raw);
            table.per_label.insert(
                label,
                LabelStats {
                    mean_raw,
                    mean_normalized,
                    count,
                },
            );
        }
        Ok(table)
    }

    /// Maps raw readings to z-scores: `(raw - mean) / stddev` per dimension.
    ///
    /// Pure and O(7); the floored deviations keep every output finite.
    #[must_use]
    pub fn normalize(&self, raw: &FeatureVector) -> FeatureVector {
        let mut out = [0.0f32; FEATURE_COUNT];
        for (o, ((v, m), s)) in out.iter_mut().zip(
            raw.as_slice()
                .iter()
                .zip(self.mean.iter())
                .zip(self.stddev.iter()),
        ) {
            *o = (v - m) / s;
        }
        FeatureVector::new(out)
    }

    /// Global per-feature means.
    #[must_use]
    pub fn mean(&self) -> &[f32; FEATURE_COUNT] {
        &self.mean
    }

    /// Global per-feature normalization divisors (floored at 1.0).
    #[must_use]
    pub fn stddev(&self) -> &[f32; FEATURE_COUNT] {
        &self.stddev
    }

    /// Statistics for one crop label, if it occurs in the dataset.
    #[must_use]
    pub fn label_stats(&self, label: &str) -> Option<&LabelStats> {
        self.per_label.get(label)
    }

    /// Number of distinct labels.
    #[must_use]
    pub fn label_count(&self) -> usize {
        self.per_label.len()
    }

    /// Per-label statistics in label order.
    pub fn labels(&self) -> impl Iterator<Item = (&str, &LabelStats)> {
        self.per_label.iter().map(|(k, v)| (k.as_str(), v))
    }
}
