use super::*;

/// Records the row it was invoked with; predicts a fixed label.
struct FixedClassifier {
    label: &'static str,
    feature_names: Option<Vec<String>>,
}

impl Classifier for FixedClassifier {
    fn predict(&self, _row: &[f32]) -> Result<String> {
        Ok(self.label.to_string())
    }

    fn feature_names(&self) -> Option<Vec<String>> {
        self.feature_names.clone()
    }
}

/// Scores three classes with fixed probabilities; tokens are encoded ids.
struct ProbabilisticClassifier;

impl Classifier for ProbabilisticClassifier {
    fn predict(&self, _row: &[f32]) -> Result<String> {
        Ok("1".to_string())
    }

    fn predict_proba(&self, _row: &[f32]) -> Option<Vec<f32>> {
        Some(vec![0.2, 0.7, 0.1])
    }

    fn classes(&self) -> Vec<String> {
        vec!["0".to_string(), "1".to_string(), "2".to_string()]
    }
}

struct IdDecoder;

impl LabelDecoder for IdDecoder {
    fn decode(&self, token: &str) -> String {
        match token {
            "0" => "rice".to_string(),
            "1" => "maize".to_string(),
            "2" => "chickpea".to_string(),
            other => other.to_string(),
        }
    }
}

fn input() -> FeatureVector {
    FeatureVector::new([90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.0])
}

#[test]
fn test_adapter_without_proba_returns_single_candidate() {
    let artifact = ModelArtifact::new(Box::new(FixedClassifier {
        label: "rice",
        feature_names: None,
    }));
    let adapter = ClassifierAdapter::new(artifact).expect("canonical order");

    let ranked = adapter.rank(&input()).expect("rank");
    assert_eq!(ranked, vec![("rice".to_string(), 1.0)]);
}

#[test]
fn test_adapter_ranks_probabilities_descending() {
    let artifact = ModelArtifact::new(Box::new(ProbabilisticClassifier));
    let adapter = ClassifierAdapter::new(artifact).expect("canonical order");

    let ranked = adapter.rank(&input()).expect("rank");
    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[0], ("1".to_string(), 0.7));
    assert_eq!(ranked[1], ("0".to_string(), 0.2));
    assert_eq!(ranked[2], ("2".to_string(), 0.1));
}

#[test]
fn test_adapter_decodes_class_tokens() {
    let artifact =
        ModelArtifact::new(Box::new(ProbabilisticClassifier)).with_decoder(Box::new(IdDecoder));
    let adapter = ClassifierAdapter::new(artifact).expect("canonical order");

    let ranked = adapter.rank(&input()).expect("rank");
    assert_eq!(ranked[0].0, "maize");
    assert_eq!(ranked[1].0, "rice");
}

#[test]
fn test_adapter_decodes_single_prediction() {
    let artifact = ModelArtifact::new(Box::new(FixedClassifier {
        label: "2",
        feature_names: None,
    }))
    .with_decoder(Box::new(IdDecoder));
    let adapter = ClassifierAdapter::new(artifact).expect("canonical order");

    let ranked = adapter.rank(&input()).expect("rank");
    assert_eq!(ranked, vec![("chickpea".to_string(), 1.0)]);
}

#[test]
fn test_adapter_falls_back_when_classes_are_empty() {
    // A model can advertise probabilities while declaring no class tokens;
    // ranking then uses the plain prediction instead of an empty list.
    struct Classless;
    impl Classifier for Classless {
        fn predict(&self, _row: &[f32]) -> Result<String> {
            Ok("1".to_string())
        }
        fn predict_proba(&self, _row: &[f32]) -> Option<Vec<f32>> {
            Some(Vec::new())
        }
    }

    let artifact = ModelArtifact::new(Box::new(Classless)).with_decoder(Box::new(IdDecoder));
    let adapter = ClassifierAdapter::new(artifact).expect("canonical order");

    let ranked = adapter.rank(&input()).expect("rank");
    assert_eq!(ranked, vec![("maize".to_string(), 1.0)]);
}

#[test]
fn test_adapter_truncates_to_top_four() {
    struct ManyClasses;
    impl Classifier for ManyClasses {
        fn predict(&self, _row: &[f32]) -> Result<String> {
            Ok("c0".to_string())
        }
        fn predict_proba(&self, _row: &[f32]) -> Option<Vec<f32>> {
            Some(vec![0.30, 0.25, 0.20, 0.15, 0.07, 0.03])
        }
        fn classes(&self) -> Vec<String> {
            (0..6).map(|i| format!("c{i}")).collect()
        }
    }

    let adapter = ClassifierAdapter::new(ModelArtifact::new(Box::new(ManyClasses)))
        .expect("canonical order");
    let ranked = adapter.rank(&input()).expect("rank");
    assert_eq!(ranked.len(), TOP_CANDIDATES);
    assert_eq!(ranked[0].0, "c0");
}

#[test]
fn test_feature_order_follows_declared_names() {
    // The model declares reversed columns using sklearn-style spellings;
    // the adapter must feed readings in that order.
    struct RowCheck;
    impl Classifier for RowCheck {
        fn predict(&self, row: &[f32]) -> Result<String> {
            assert_eq!(row, [202.0, 6.5, 82.0, 20.8, 43.0, 42.0, 90.0]);
            Ok("rice".to_string())
        }
        fn feature_names(&self) -> Option<Vec<String>> {
            Some(
                ["Rainfall", "pH_Value", "Humidity", "Temperature", "K", "P", "N"]
                    .iter()
                    .map(|s| (*s).to_string())
                    .collect(),
            )
        }
    }

    let adapter =
        ClassifierAdapter::new(ModelArtifact::new(Box::new(RowCheck))).expect("aliases resolve");
    let ranked = adapter.rank(&input()).expect("rank");
    assert_eq!(ranked[0].0, "rice");
}

#[test]
fn test_unmapped_feature_fails_at_construction() {
    let artifact = ModelArtifact::new(Box::new(FixedClassifier {
        label: "rice",
        feature_names: None,
    }))
    .with_feature_names(vec!["N".to_string(), "soil_moisture".to_string()]);

    let err = ClassifierAdapter::new(artifact).unwrap_err();
    match err {
        CosechaError::UnmappedFeature { feature } => assert_eq!(feature, "soil_moisture"),
        other => panic!("expected UnmappedFeature, got {other:?}"),
    }
}

#[test]
fn test_explicit_feature_names_override_classifier_declaration() {
    let artifact = ModelArtifact::new(Box::new(FixedClassifier {
        label: "rice",
        feature_names: Some(vec!["N".to_string()]),
    }))
    .with_feature_names(vec!["temp".to_string(), "rain".to_string()]);

    let adapter = ClassifierAdapter::new(artifact).expect("aliases resolve");
    assert_eq!(
        adapter.build_row(&input()),
        vec![20.8, 202.0]
    );
}
