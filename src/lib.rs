//! Cosecha: crop recommendation engine in pure Rust.
//!
//! Given seven soil/climate readings (nitrogen, phosphorus, potassium,
//! temperature, humidity, pH, rainfall), cosecha recommends crops two ways:
//! through a pretrained classifier when one is configured, or through a
//! statistical k-nearest-neighbor fallback fitted from a reference dataset.
//! Every recommendation carries a score and a one-sentence hint naming the
//! input feature closest to the crop's historical average.
//!
//! # Quick Start
//!
//! ```
//! use cosecha::prelude::*;
//!
//! // Two reference rows are enough to fit the fallback engine.
//! let dataset = ReferenceDataset::new(vec![
//!     LabeledSample::new(FeatureVector::new([90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.0]), "rice"),
//!     LabeledSample::new(FeatureVector::new([20.0, 67.0, 20.0, 26.0, 52.0, 6.0, 60.0]), "maize"),
//! ]).unwrap();
//!
//! let service = RecommendationService::new().with_reference(&dataset).unwrap();
//!
//! let request = serde_json::json!({
//!     "nitrogen": 88, "phosphorus": 40, "potassium": 40,
//!     "temperature": 21, "humidity": 80, "ph": 6.4, "rainfall": 200,
//! });
//! let result = service.recommend(request.as_object().unwrap()).unwrap();
//!
//! assert_eq!(result.crop, "rice");
//! assert!(result.top_crops.len() <= 4);
//! ```
//!
//! # Modules
//!
//! - [`features`]: Canonical feature order, alias table, `FeatureVector`
//! - [`dataset`]: Reference dataset storage and CSV ingestion
//! - [`stats`]: Global and per-label statistics, z-score normalization
//! - [`neighbors`]: K-nearest-neighbor vote ranking
//! - [`hint`]: Explanatory hint generation
//! - [`classifier`]: Pretrained-classifier traits and input adaptation
//! - [`service`]: Request validation and orchestration
//! - [`error`]: Error types

pub mod classifier;
pub mod dataset;
pub mod error;
pub mod features;
pub mod hint;
pub mod neighbors;
pub mod prelude;
pub mod service;
pub mod stats;
