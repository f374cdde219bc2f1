//! Explanatory hints for ranked candidates.
//!
//! Each recommendation carries a one-sentence explanation naming the input
//! feature that sits closest (in normalized space) to the predicted crop's
//! historical average, with the crop's raw average for that feature.

use crate::features::{Feature, FeatureVector};
use crate::stats::StatisticsTable;

/// Fallback sentence when no statistics back the predicted label.
pub const GENERIC_HINT: &str = "Good overall match to your inputs.";

/// Builds the hint for one predicted label.
///
/// Returns [`GENERIC_HINT`] when statistics are absent or the label never
/// occurs in the reference dataset (a classifier may predict outside it).
/// Otherwise the query is normalized and the dimension with the smallest
/// absolute difference from the label's normalized mean is reported; ties go
/// to the first feature in canonical order.
#[must_use]
pub fn generate(label: &str, raw: &FeatureVector, stats: Option<&StatisticsTable>) -> String {
    let Some(stats) = stats else {
        return GENERIC_HINT.to_string();
    };
    let Some(label_stats) = stats.label_stats(label) else {
        return GENERIC_HINT.to_string();
    };

    let query = stats.normalize(raw);
    let mut best = Feature::ALL[0];
    let mut best_diff = f32::INFINITY;
    for feature in Feature::ALL {
        let diff = (query.get(feature) - label_stats.mean_normalized.get(feature)).abs();
        if diff < best_diff {
            best_diff = diff;
            best = feature;
        }
    }

    let average = best.format_value(label_stats.mean_raw.get(best));
    match best.unit() {
        "" => format!("{} close to crop avg ({average}).", best.label()),
        unit => format!("{} close to crop avg ({average} {unit}).", best.label()),
    }
}
