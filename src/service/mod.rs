//! Recommendation orchestration.
//!
//! [`RecommendationService`] holds the constructed-once artifacts (fitted
//! statistics, neighbor voter, optional classifier adapter) and serves
//! requests against them. Nothing here mutates after wiring, so a host may
//! share one service across worker threads behind an `Arc` without locking.
//!
//! # Example
//!
//! ```
//! use cosecha::dataset::{LabeledSample, ReferenceDataset};
//! use cosecha::features::FeatureVector;
//! use cosecha::service::RecommendationService;
//!
//! let dataset = ReferenceDataset::new(vec![
//!     LabeledSample::new(FeatureVector::new([90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.0]), "rice"),
//!     LabeledSample::new(FeatureVector::new([20.0, 67.0, 20.0, 26.0, 52.0, 6.0, 60.0]), "maize"),
//! ]).unwrap();
//! let service = RecommendationService::new().with_reference(&dataset).unwrap();
//!
//! let request = serde_json::json!({
//!     "nitrogen": 88, "phosphorus": 40, "potassium": 40,
//!     "temperature": 21, "humidity": 80, "ph": 6.4, "rainfall": 200,
//! });
//! let result = service.recommend(request.as_object().unwrap()).unwrap();
//! assert_eq!(result.crop, "rice");
//! ```

use log::info;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::classifier::{ClassifierAdapter, ModelArtifact};
use crate::dataset::ReferenceDataset;
use crate::error::{CosechaError, Result};
use crate::features::{Feature, FeatureVector, FEATURE_COUNT};
use crate::hint;
use crate::neighbors::NeighborVoter;
use crate::stats::StatisticsTable;

/// Label reported when no candidate can be ranked.
pub const UNKNOWN_CROP: &str = "Unknown";

/// One ranked recommendation, ephemeral per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    /// Recommended crop label
    pub crop: String,
    /// Vote share or class probability, in [0, 1]
    pub score: f32,
    /// One-sentence explanation
    pub hint: String,
}

/// Result of one recommendation request.
///
/// Serializes to `{ "crop": …, "top_crops": [{ "crop", "score", "hint" }] }`
/// with at most four candidates in descending score order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// Top-ranked crop, or [`UNKNOWN_CROP`]
    pub crop: String,
    /// Ranked candidates, best first
    pub top_crops: Vec<RankedCandidate>,
}

/// Read-only snapshot of what the service is wired with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServiceStatus {
    /// Reference rows backing the fallback path (0 when absent)
    pub rows: usize,
    /// Distinct crop labels in the reference statistics
    pub labels: usize,
    /// Whether a pretrained classifier is configured
    pub classifier: bool,
}

/// Serves crop recommendations from whichever artifacts are configured.
///
/// Dispatch per request: a configured classifier wins; otherwise the fitted
/// statistics and neighbor voter serve the fallback path; with neither, the
/// request fails as [`CosechaError::ServiceUnavailable`].
#[derive(Debug, Default)]
pub struct RecommendationService {
    stats: Option<StatisticsTable>,
    voter: Option<NeighborVoter>,
    classifier: Option<ClassifierAdapter>,
}

impl RecommendationService {
    /// Creates an unwired service; combine with `with_reference` and/or
    /// `with_classifier`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fits statistics and the neighbor voter from a reference dataset.
    ///
    /// Enables the fallback path and hint generation. All derivation happens
    /// here, once; requests never recompute it.
    ///
    /// # Errors
    ///
    /// Returns [`CosechaError::DataUnavailable`] for an empty dataset.
    pub fn with_reference(mut self, dataset: &ReferenceDataset) -> Result<Self> {
        let stats = StatisticsTable::fit(dataset)?;
        let voter = NeighborVoter::fit(dataset, &stats)?;
        info!(
            "fallback engine fitted: {} rows, {} labels, k={}",
            voter.len(),
            stats.label_count(),
            voter.k()
        );
        self.stats = Some(stats);
        self.voter = Some(voter);
        Ok(self)
    }

    /// Wires a pretrained classifier, validating its declared feature names.
    ///
    /// # Errors
    ///
    /// Returns [`CosechaError::UnmappedFeature`] when the artifact expects a
    /// feature the alias table cannot resolve.
    pub fn with_classifier(mut self, artifact: ModelArtifact) -> Result<Self> {
        self.classifier = Some(ClassifierAdapter::new(artifact)?);
        info!("classifier adapter configured");
        Ok(self)
    }

    /// What the service is currently wired with.
    #[must_use]
    pub fn status(&self) -> ServiceStatus {
        ServiceStatus {
            rows: self.voter.as_ref().map_or(0, NeighborVoter::len),
            labels: self.stats.as_ref().map_or(0, StatisticsTable::label_count),
            classifier: self.classifier.is_some(),
        }
    }

    /// Recommends crops for a request of named numeric fields.
    ///
    /// All seven canonical fields must be present and parse as finite
    /// numbers (JSON numbers or numeric strings). Every returned candidate
    /// carries a hint; hints fall back to a generic sentence when no
    /// reference statistics are configured.
    ///
    /// # Errors
    ///
    /// [`CosechaError::InvalidInput`] for a missing or non-numeric field,
    /// [`CosechaError::ServiceUnavailable`] when neither a classifier nor a
    /// reference dataset is configured, plus any classifier invocation
    /// failure.
    pub fn recommend(&self, input: &Map<String, Value>) -> Result<Recommendation> {
        let raw = parse_inputs(input)?;

        let ranked = if let Some(adapter) = &self.classifier {
            adapter.rank(&raw)?
        } else if let (Some(stats), Some(voter)) = (&self.stats, &self.voter) {
            voter.rank(&stats.normalize(&raw))
        } else {
            return Err(CosechaError::ServiceUnavailable);
        };

        let top_crops: Vec<RankedCandidate> = ranked
            .into_iter()
            .map(|(crop, score)| {
                let hint = hint::generate(&crop, &raw, self.stats.as_ref());
                RankedCandidate { crop, score, hint }
            })
            .collect();

        let crop = top_crops
            .first()
            .map_or_else(|| UNKNOWN_CROP.to_string(), |c| c.crop.clone());
        Ok(Recommendation { crop, top_crops })
    }
}

/// Validates and orders the seven canonical fields from a named-field map.
fn parse_inputs(input: &Map<String, Value>) -> Result<FeatureVector> {
    let mut values = [0.0f32; FEATURE_COUNT];
    for feature in Feature::ALL {
        let name = feature.canonical_name();
        let value = input
            .get(name)
            .ok_or_else(|| CosechaError::missing_field(name))?;
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
        .ok_or_else(|| CosechaError::non_numeric_field(name))?;
        if !parsed.is_finite() {
            return Err(CosechaError::non_finite_field(name));
        }
        values[feature.index()] = parsed as f32;
    }
    Ok(FeatureVector::new(values))
}
