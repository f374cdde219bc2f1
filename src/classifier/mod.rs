//! Pretrained-classifier seam and input adaptation.
//!
//! Training happens elsewhere; this module only defines the trait the engine
//! calls through, the canonical artifact bundle a loader resolves a model
//! into, and the adapter that maps named inputs onto the feature order the
//! model expects.

use std::fmt;

use crate::error::{CosechaError, Result};
use crate::features::{Feature, FeatureVector};
use crate::neighbors::TOP_CANDIDATES;

/// A pretrained crop classifier.
///
/// `predict` returns the model's raw class token, which may be an encoded
/// identifier rather than a crop name; [`LabelDecoder`] maps tokens back to
/// human-readable labels. Models that can score every class implement
/// `predict_proba` and `classes` as an aligned pair.
pub trait Classifier {
    /// Predicts the raw class token for one ordered feature row.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying model invocation fails.
    fn predict(&self, row: &[f32]) -> Result<String>;

    /// Per-class probabilities aligned with [`Classifier::classes`], or
    /// `None` when the model cannot score classes.
    fn predict_proba(&self, _row: &[f32]) -> Option<Vec<f32>> {
        None
    }

    /// Raw class tokens, aligned with `predict_proba` output.
    fn classes(&self) -> Vec<String> {
        Vec::new()
    }

    /// Feature-name order the model was trained with, if recorded.
    fn feature_names(&self) -> Option<Vec<String>> {
        None
    }
}

/// Maps encoded class tokens back to human-readable crop labels.
pub trait LabelDecoder {
    /// Decodes one class token.
    fn decode(&self, token: &str) -> String;
}

/// Canonical resolved model bundle: classifier plus optional decoder and
/// recorded feature order.
///
/// Whatever shape a persisted artifact takes — bare model, or a bundle with
/// an encoder and column names — the loader resolves it into this one
/// structure before the engine sees it.
pub struct ModelArtifact {
    classifier: Box<dyn Classifier + Send + Sync>,
    decoder: Option<Box<dyn LabelDecoder + Send + Sync>>,
    feature_names: Option<Vec<String>>,
}

impl ModelArtifact {
    /// Wraps a bare classifier, picking up any feature order it declares.
    #[must_use]
    pub fn new(classifier: Box<dyn Classifier + Send + Sync>) -> Self {
        let feature_names = classifier.feature_names();
        Self {
            classifier,
            decoder: None,
            feature_names,
        }
    }

    /// Attaches a label decoder for models emitting encoded classes.
    #[must_use]
    pub fn with_decoder(mut self, decoder: Box<dyn LabelDecoder + Send + Sync>) -> Self {
        self.decoder = Some(decoder);
        self
    }

    /// Overrides the expected feature-name order.
    #[must_use]
    pub fn with_feature_names(mut self, names: Vec<String>) -> Self {
        self.feature_names = Some(names);
        self
    }
}

impl fmt::Debug for ModelArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelArtifact")
            .field("decoder", &self.decoder.is_some())
            .field("feature_names", &self.feature_names)
            .finish_non_exhaustive()
    }
}

/// Adapts named inputs to a pretrained classifier and normalizes its output
/// into ranked `(label, score)` candidates.
pub struct ClassifierAdapter {
    artifact: ModelArtifact,
    /// Canonical features in the model's expected column order.
    order: Vec<Feature>,
}

impl ClassifierAdapter {
    /// Validates the artifact's expected feature names against the alias
    /// table and fixes the column order.
    ///
    /// Validation happens here, at wiring time, so a model declaring an
    /// unmappable feature fails before any traffic is served. Artifacts
    /// without a declared order use the canonical seven-feature order.
    ///
    /// # Errors
    ///
    /// Returns [`CosechaError::UnmappedFeature`] naming the first expected
    /// feature that no alias resolves.
    pub fn new(artifact: ModelArtifact) -> Result<Self> {
        let order = match &artifact.feature_names {
            Some(names) => names
                .iter()
                .map(|name| {
                    Feature::from_alias(name).ok_or_else(|| CosechaError::UnmappedFeature {
                        feature: name.clone(),
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            None => Feature::ALL.to_vec(),
        };
        Ok(Self { artifact, order })
    }

    /// Readings reordered into the model's expected columns.
    fn build_row(&self, input: &FeatureVector) -> Vec<f32> {
        self.order.iter().map(|&f| input.get(f)).collect()
    }

    /// Ranks candidates from the wrapped classifier.
    ///
    /// With probability support: every class token is decoded, paired with
    /// its probability, sorted descending, and cut to [`TOP_CANDIDATES`].
    /// Without it — including models that advertise probabilities but
    /// declare no class tokens to pair them with — the single predicted
    /// label at score 1.0.
    ///
    /// # Errors
    ///
    /// Propagates classifier invocation failures.
    pub fn rank(&self, input: &FeatureVector) -> Result<Vec<(String, f32)>> {
        let row = self.build_row(input);

        if let Some(probabilities) = self.artifact.classifier.predict_proba(&row) {
            let classes = self.artifact.classifier.classes();
            if !classes.is_empty() {
                let mut ranked: Vec<(String, f32)> = classes
                    .iter()
                    .zip(probabilities)
                    .map(|(token, p)| (self.decode(token), p))
                    .collect();
                ranked.sort_by(|a, b| {
                    b.1.partial_cmp(&a.1)
                        .expect("class probabilities are finite")
                });
                ranked.truncate(TOP_CANDIDATES);
                return Ok(ranked);
            }
        }

        let predicted = self.artifact.classifier.predict(&row)?;
        Ok(vec![(self.decode(&predicted), 1.0)])
    }

    fn decode(&self, token: &str) -> String {
        match &self.artifact.decoder {
            Some(decoder) => decoder.decode(token),
            None => token.to_string(),
        }
    }
}

impl fmt::Debug for ClassifierAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifierAdapter")
            .field("artifact", &self.artifact)
            .field("order", &self.order)
            .finish()
    }
}

#[cfg(test)]
mod tests;
