//! Canonical feature definitions and the fixed-order feature vector.
//!
//! Every reading the engine consumes travels in the same seven-slot order:
//! [N, P, K, temperature, humidity, pH, rainfall]. The [`Feature`] enum owns
//! the display metadata and the static alias table used to map classifier
//! feature names and CSV headers onto that order.
//!
//! # Example
//!
//! ```
//! use cosecha::features::{Feature, FeatureVector};
//!
//! let v = FeatureVector::new([90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.0]);
//! assert_eq!(v.get(Feature::Rainfall), 202.0);
//! assert_eq!(Feature::from_alias("pH_Value"), Some(Feature::Ph));
//! ```

use serde::{Deserialize, Serialize};

/// Number of soil/climate readings in every feature vector.
pub const FEATURE_COUNT: usize = 7;

/// The seven canonical input features, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    Nitrogen,
    Phosphorus,
    Potassium,
    Temperature,
    Humidity,
    Ph,
    Rainfall,
}

impl Feature {
    /// All features in canonical order.
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::Nitrogen,
        Feature::Phosphorus,
        Feature::Potassium,
        Feature::Temperature,
        Feature::Humidity,
        Feature::Ph,
        Feature::Rainfall,
    ];

    /// Position of this feature in the canonical order.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Human-readable display label for hints.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Feature::Nitrogen => "Nitrogen",
            Feature::Phosphorus => "Phosphorus",
            Feature::Potassium => "Potassium",
            Feature::Temperature => "Temperature",
            Feature::Humidity => "Humidity",
            Feature::Ph => "pH",
            Feature::Rainfall => "Rainfall",
        }
    }

    /// Unit suffix for hints; empty when the reading is unitless.
    #[must_use]
    pub fn unit(self) -> &'static str {
        match self {
            Feature::Temperature => "°C",
            Feature::Humidity => "%",
            Feature::Rainfall => "mm",
            _ => "",
        }
    }

    /// Canonical request field name for this feature.
    #[must_use]
    pub fn canonical_name(self) -> &'static str {
        match self {
            Feature::Nitrogen => "nitrogen",
            Feature::Phosphorus => "phosphorus",
            Feature::Potassium => "potassium",
            Feature::Temperature => "temperature",
            Feature::Humidity => "humidity",
            Feature::Ph => "ph",
            Feature::Rainfall => "rainfall",
        }
    }

    /// Resolves a feature name through the static alias table.
    ///
    /// Names are trimmed and matched case-insensitively, so classifier
    /// spellings like `"pH_Value"` or CSV headers like `"Temp"` resolve to
    /// the same slot as their canonical names. Returns `None` for names
    /// with no accepted spelling.
    #[must_use]
    pub fn from_alias(name: &str) -> Option<Feature> {
        match name.trim().to_ascii_lowercase().as_str() {
            "n" | "nitrogen" => Some(Feature::Nitrogen),
            "p" | "phosphorus" => Some(Feature::Phosphorus),
            "k" | "potassium" => Some(Feature::Potassium),
            "temperature" | "temp" => Some(Feature::Temperature),
            "humidity" => Some(Feature::Humidity),
            "ph" | "ph_value" => Some(Feature::Ph),
            "rainfall" | "rain" => Some(Feature::Rainfall),
            _ => None,
        }
    }

    /// Formats a raw value of this feature for display in a hint.
    ///
    /// Temperature, humidity, and pH keep one decimal place; the nutrient
    /// readings and rainfall round to the nearest integer.
    #[must_use]
    pub fn format_value(self, value: f32) -> String {
        match self {
            Feature::Temperature | Feature::Humidity | Feature::Ph => {
                format!("{value:.1}")
            }
            _ => format!("{}", value.round() as i64),
        }
    }
}

/// Fixed-order 7-tuple of numeric readings. Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector([f32; FEATURE_COUNT]);

impl FeatureVector {
    /// Wraps readings already in canonical order.
    #[must_use]
    pub const fn new(values: [f32; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    /// Reading for one feature.
    #[must_use]
    pub fn get(&self, feature: Feature) -> f32 {
        self.0[feature.index()]
    }

    /// All readings in canonical order.
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Euclidean distance to another vector across all seven dimensions.
    #[must_use]
    pub fn distance(&self, other: &FeatureVector) -> f32 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f32>()
            .sqrt()
    }
}

impl From<[f32; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f32; FEATURE_COUNT]) -> Self {
        Self(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_resolves_canonical_names() {
        for feature in Feature::ALL {
            assert_eq!(
                Feature::from_alias(feature.canonical_name()),
                Some(feature)
            );
        }
    }

    #[test]
    fn test_alias_resolves_short_and_cased_spellings() {
        assert_eq!(Feature::from_alias("N"), Some(Feature::Nitrogen));
        assert_eq!(Feature::from_alias("pH_Value"), Some(Feature::Ph));
        assert_eq!(Feature::from_alias("pH"), Some(Feature::Ph));
        assert_eq!(Feature::from_alias(" Temp "), Some(Feature::Temperature));
        assert_eq!(Feature::from_alias("Rain"), Some(Feature::Rainfall));
    }

    #[test]
    fn test_alias_rejects_unknown_names() {
        assert_eq!(Feature::from_alias("soil_moisture"), None);
        assert_eq!(Feature::from_alias(""), None);
        assert_eq!(Feature::from_alias("p h"), None);
    }

    #[test]
    fn test_indices_match_canonical_order() {
        for (i, feature) in Feature::ALL.iter().enumerate() {
            assert_eq!(feature.index(), i);
        }
    }

    #[test]
    fn test_format_value_one_decimal_for_climate() {
        assert_eq!(Feature::Temperature.format_value(20.84), "20.8");
        assert_eq!(Feature::Humidity.format_value(82.0), "82.0");
        // 6.55 has no exact f32 representation (6.5500002), so one-decimal
        // rendering rounds up.
        assert_eq!(Feature::Ph.format_value(6.55), "6.6");
        assert_eq!(Feature::Ph.format_value(6.54), "6.5");
    }

    #[test]
    fn test_format_value_integer_for_nutrients_and_rainfall() {
        assert_eq!(Feature::Nitrogen.format_value(90.4), "90");
        assert_eq!(Feature::Rainfall.format_value(202.6), "203");
    }

    #[test]
    fn test_units() {
        assert_eq!(Feature::Temperature.unit(), "°C");
        assert_eq!(Feature::Humidity.unit(), "%");
        assert_eq!(Feature::Rainfall.unit(), "mm");
        assert_eq!(Feature::Ph.unit(), "");
        assert_eq!(Feature::Nitrogen.unit(), "");
    }

    #[test]
    fn test_vector_get_and_slice() {
        let v = FeatureVector::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(v.get(Feature::Nitrogen), 1.0);
        assert_eq!(v.get(Feature::Rainfall), 7.0);
        assert_eq!(v.as_slice().len(), FEATURE_COUNT);
    }

    #[test]
    fn test_distance_zero_for_identical_vectors() {
        let v = FeatureVector::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(v.distance(&v), 0.0);
    }

    #[test]
    fn test_distance_single_dimension() {
        let a = FeatureVector::new([0.0; FEATURE_COUNT]);
        let b = FeatureVector::new([3.0, 0.0, 0.0, 0.0, 0.0, 0.0, 4.0]);
        assert!((a.distance(&b) - 5.0).abs() < 1e-6);
    }
}
