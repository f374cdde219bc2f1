//! Reference dataset storage and CSV ingestion.
//!
//! The engine's fallback path is fitted from an ordered collection of
//! labeled feature vectors. Hosts with already-parsed rows construct a
//! [`ReferenceDataset`] directly; [`load_csv`] covers the common case of a
//! tabular source with aliased headers, skipping malformed rows rather than
//! failing the whole load.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{debug, info};

use crate::error::{CosechaError, Result};
use crate::features::{Feature, FeatureVector, FEATURE_COUNT};

/// One labeled observation from the reference dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledSample {
    /// Soil/climate readings in canonical order
    pub features: FeatureVector,
    /// Crop label for these readings
    pub label: String,
}

impl LabeledSample {
    /// Pairs readings with their crop label.
    #[must_use]
    pub fn new(features: FeatureVector, label: impl Into<String>) -> Self {
        Self {
            features,
            label: label.into(),
        }
    }
}

/// Ordered, non-empty collection of labeled samples.
///
/// Built once at service start and treated as read-only for the process
/// lifetime. Row order is preserved: neighbor-vote tie-breaking depends on it.
#[derive(Debug, Clone)]
pub struct ReferenceDataset {
    samples: Vec<LabeledSample>,
}

impl ReferenceDataset {
    /// Wraps parsed samples.
    ///
    /// # Errors
    ///
    /// Returns [`CosechaError::DataUnavailable`] when `samples` is empty —
    /// an empty reference dataset is a deployment defect, not a request
    /// error, and must surface at startup.
    pub fn new(samples: Vec<LabeledSample>) -> Result<Self> {
        if samples.is_empty() {
            return Err(CosechaError::DataUnavailable {
                context: "dataset is empty".to_string(),
            });
        }
        Ok(Self { samples })
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false: the constructor rejects empty datasets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// All rows in source order.
    #[must_use]
    pub fn samples(&self) -> &[LabeledSample] {
        &self.samples
    }

    /// Number of distinct crop labels.
    #[must_use]
    pub fn label_count(&self) -> usize {
        self.samples
            .iter()
            .map(|s| s.label.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }
}

/// Loads a reference dataset from a CSV file.
///
/// # Errors
///
/// Fails on I/O errors, unreadable CSV structure, or when no row survives
/// parsing.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<ReferenceDataset> {
    let file = File::open(path.as_ref())?;
    from_reader(file)
}

/// Loads a reference dataset from any CSV reader.
///
/// The header row is matched against the feature alias table (label column:
/// `label` or `crop`, any casing). When every column resolves, values are
/// read by mapped index; otherwise the first seven columns are taken
/// positionally with the eighth as the label. Rows with fewer than eight
/// fields or unparseable numerics are skipped.
///
/// # Errors
///
/// Fails on unreadable CSV structure or when no row survives parsing.
pub fn from_reader<R: Read>(reader: R) -> Result<ReferenceDataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let column_map = resolve_columns(&headers);

    let mut samples = Vec::new();
    for (line, record) in csv_reader.records().enumerate() {
        let record = record?;
        if record.len() < FEATURE_COUNT + 1 {
            debug!("skipping row {line}: {} fields", record.len());
            continue;
        }
        match parse_record(&record, column_map.as_ref()) {
            Some(sample) => samples.push(sample),
            None => debug!("skipping row {line}: non-numeric feature value"),
        }
    }

    let dataset = ReferenceDataset::new(samples).map_err(|_| CosechaError::DataUnavailable {
        context: "CSV source has no parseable rows".to_string(),
    })?;
    info!(
        "loaded reference dataset: {} rows, {} labels",
        dataset.len(),
        dataset.label_count()
    );
    Ok(dataset)
}

/// Mapped column indices: one per canonical feature, plus the label column.
struct ColumnMap {
    feature_idx: [usize; FEATURE_COUNT],
    label_idx: usize,
}

/// Resolves the header row to column indices; `None` means a column is
/// missing and the loader falls back to positional order.
fn resolve_columns(headers: &csv::StringRecord) -> Option<ColumnMap> {
    let mut feature_idx = [usize::MAX; FEATURE_COUNT];
    let mut label_idx = None;

    for (i, header) in headers.iter().enumerate() {
        if let Some(feature) = Feature::from_alias(header) {
            let slot = &mut feature_idx[feature.index()];
            if *slot == usize::MAX {
                *slot = i;
            }
        } else if matches!(
            header.trim().to_ascii_lowercase().as_str(),
            "label" | "crop"
        ) && label_idx.is_none()
        {
            label_idx = Some(i);
        }
    }

    if feature_idx.contains(&usize::MAX) {
        return None;
    }
    Some(ColumnMap {
        feature_idx,
        label_idx: label_idx?,
    })
}

fn parse_record(record: &csv::StringRecord, columns: Option<&ColumnMap>) -> Option<LabeledSample> {
    let mut values = [0.0f32; FEATURE_COUNT];
    let label = match columns {
        Some(map) => {
            for (slot, &idx) in values.iter_mut().zip(map.feature_idx.iter()) {
                *slot = record.get(idx)?.trim().parse().ok()?;
            }
            record.get(map.label_idx)?
        }
        None => {
            for (slot, field) in values.iter_mut().zip(record.iter()) {
                *slot = field.trim().parse().ok()?;
            }
            record.get(FEATURE_COUNT)?
        }
    };
    Some(LabeledSample::new(
        FeatureVector::new(values),
        label.trim(),
    ))
}

#[cfg(test)]
mod tests;
