//! K-nearest-neighbor voting over normalized reference rows.
//!
//! The fallback ranking engine: a lazy learner in the kNN tradition. Fitting
//! normalizes every dataset row exactly once; ranking scans all rows per
//! query (O(rows × 7)), which is fine for reference datasets of moderate
//! size. Substituting an indexed nearest-neighbor structure behind the same
//! `rank` signature is the intended path if the dataset ever grows large.

use crate::dataset::ReferenceDataset;
use crate::error::{CosechaError, Result};
use crate::features::FeatureVector;
use crate::stats::StatisticsTable;

/// Number of neighbors consulted per query, before clamping to dataset size.
pub const K_NEIGHBORS: usize = 7;

/// Maximum number of ranked candidates returned to the caller.
pub const TOP_CANDIDATES: usize = 4;

/// A dataset row with its normalization cached at fit time.
#[derive(Debug, Clone)]
struct NormalizedRow {
    normalized: FeatureVector,
    label: String,
}

/// Ranks candidate labels by k-nearest-neighbor vote share.
///
/// # Example
///
/// ```
/// use cosecha::dataset::{LabeledSample, ReferenceDataset};
/// use cosecha::features::FeatureVector;
/// use cosecha::neighbors::NeighborVoter;
/// use cosecha::stats::StatisticsTable;
///
/// let dataset = ReferenceDataset::new(vec![
///     LabeledSample::new(FeatureVector::new([90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.0]), "rice"),
///     LabeledSample::new(FeatureVector::new([20.0, 67.0, 20.0, 26.0, 52.0, 6.0, 60.0]), "maize"),
/// ]).unwrap();
/// let stats = StatisticsTable::fit(&dataset).unwrap();
/// let voter = NeighborVoter::fit(&dataset, &stats).unwrap();
///
/// let query = stats.normalize(&FeatureVector::new([88.0, 40.0, 40.0, 21.0, 80.0, 6.4, 200.0]));
/// let ranked = voter.rank(&query);
/// assert_eq!(ranked[0].0, "rice");
/// ```
#[derive(Debug, Clone)]
pub struct NeighborVoter {
    rows: Vec<NormalizedRow>,
    k: usize,
}

impl NeighborVoter {
    /// Fits the voter by normalizing and storing every dataset row.
    ///
    /// `k` is clamped to `min(K_NEIGHBORS, rows)` so small datasets stay
    /// valid.
    ///
    /// # Errors
    ///
    /// Returns [`CosechaError::DataUnavailable`] for an empty dataset.
    pub fn fit(dataset: &ReferenceDataset, stats: &StatisticsTable) -> Result<Self> {
        if dataset.is_empty() {
            return Err(CosechaError::DataUnavailable {
                context: "cannot fit neighbor voter on an empty dataset".to_string(),
            });
        }
        let rows: Vec<NormalizedRow> = dataset
            .samples()
            .iter()
            .map(|sample| NormalizedRow {
                normalized: stats.normalize(&sample.features),
                label: sample.label.clone(),
            })
            .collect();
        let k = K_NEIGHBORS.min(rows.len());
        Ok(Self { rows, k })
    }

    /// Effective neighbor count after clamping.
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of stored reference rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false: fitting rejects empty datasets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Ranks candidate labels for a normalized query vector.
    ///
    /// Euclidean distance to every stored row, ascending sort, tally of the
    /// k nearest labels. Labels rank by descending vote count; ties keep the
    /// order in which labels were first encountered among the neighbors.
    /// Score is `votes / k`. At most [`TOP_CANDIDATES`] entries are returned.
    #[must_use]
    pub fn rank(&self, query: &FeatureVector) -> Vec<(String, f32)> {
        let mut distances: Vec<(f32, &str)> = self
            .rows
            .iter()
            .map(|row| (query.distance(&row.normalized), row.label.as_str()))
            .collect();
        distances.sort_by(|a, b| {
            a.0.partial_cmp(&b.0)
                .expect("normalized distances are finite")
        });

        let mut tally: Vec<(&str, usize)> = Vec::new();
        for &(_, label) in &distances[..self.k] {
            match tally.iter_mut().find(|(l, _)| *l == label) {
                Some((_, votes)) => *votes += 1,
                None => tally.push((label, 1)),
            }
        }
        // Stable sort: first-seen order survives among tied vote counts.
        tally.sort_by(|a, b| b.1.cmp(&a.1));
        tally.truncate(TOP_CANDIDATES);

        tally
            .into_iter()
            .map(|(label, votes)| (label.to_string(), votes as f32 / self.k as f32))
            .collect()
    }
}
