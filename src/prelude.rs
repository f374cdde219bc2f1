//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use cosecha::prelude::*;
//! ```

pub use crate::classifier::{Classifier, ClassifierAdapter, LabelDecoder, ModelArtifact};
pub use crate::dataset::{load_csv, LabeledSample, ReferenceDataset};
pub use crate::error::{CosechaError, Result};
pub use crate::features::{Feature, FeatureVector, FEATURE_COUNT};
pub use crate::neighbors::NeighborVoter;
pub use crate::service::{
    RankedCandidate, Recommendation, RecommendationService, ServiceStatus,
};
pub use crate::stats::{LabelStats, StatisticsTable};
