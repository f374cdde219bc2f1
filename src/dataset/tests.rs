use super::*;
use std::io::Cursor;

fn sample(values: [f32; FEATURE_COUNT], label: &str) -> LabeledSample {
    LabeledSample::new(FeatureVector::new(values), label)
}

#[test]
fn test_new_rejects_empty() {
    let err = ReferenceDataset::new(Vec::new()).unwrap_err();
    assert!(matches!(err, CosechaError::DataUnavailable { .. }));
}

#[test]
fn test_new_preserves_row_order() {
    let rows = vec![
        sample([1.0; FEATURE_COUNT], "rice"),
        sample([2.0; FEATURE_COUNT], "maize"),
        sample([3.0; FEATURE_COUNT], "rice"),
    ];
    let dataset = ReferenceDataset::new(rows.clone()).expect("non-empty");
    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.samples(), &rows[..]);
    assert_eq!(dataset.label_count(), 2);
}

#[test]
fn test_from_reader_with_aliased_headers() {
    let csv = "\
Nitrogen,Phosphorus,Potassium,Temp,Humidity,pH_Value,Rain,Crop
90,42,43,20.8,82,6.5,202,rice
20,67,20,26,52,6.0,60,maize
";
    let dataset = from_reader(Cursor::new(csv)).expect("load");
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.samples()[0].label, "rice");
    assert_eq!(
        dataset.samples()[0].features,
        FeatureVector::new([90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.0])
    );
}

#[test]
fn test_from_reader_with_reordered_headers() {
    // Mapped mode must follow header names, not column position.
    let csv = "\
crop,rainfall,ph,humidity,temperature,k,p,n
rice,202,6.5,82,20.8,43,42,90
";
    let dataset = from_reader(Cursor::new(csv)).expect("load");
    assert_eq!(
        dataset.samples()[0].features,
        FeatureVector::new([90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.0])
    );
    assert_eq!(dataset.samples()[0].label, "rice");
}

#[test]
fn test_from_reader_positional_fallback() {
    // Unrecognizable headers: first seven columns are features, eighth is label.
    let csv = "\
a,b,c,d,e,f,g,h
90,42,43,20.8,82,6.5,202,rice
";
    let dataset = from_reader(Cursor::new(csv)).expect("load");
    assert_eq!(dataset.samples()[0].label, "rice");
    assert_eq!(
        dataset.samples()[0].features.get(Feature::Rainfall),
        202.0
    );
}

#[test]
fn test_from_reader_skips_short_and_non_numeric_rows() {
    let csv = "\
n,p,k,temperature,humidity,ph,rainfall,label
90,42,43,20.8,82,6.5,202,rice
1,2,3
20,sixty-seven,20,26,52,6.0,60,maize
20,67,20,26,52,6.0,60,maize
";
    let dataset = from_reader(Cursor::new(csv)).expect("load");
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.samples()[1].label, "maize");
}

#[test]
fn test_from_reader_all_rows_invalid() {
    let csv = "\
n,p,k,temperature,humidity,ph,rainfall,label
x,x,x,x,x,x,x,rice
";
    let err = from_reader(Cursor::new(csv)).unwrap_err();
    assert!(matches!(err, CosechaError::DataUnavailable { .. }));
}

#[test]
fn test_from_reader_trims_label_whitespace() {
    let csv = "\
n,p,k,temperature,humidity,ph,rainfall,label
90,42,43,20.8,82,6.5,202, rice
";
    let dataset = from_reader(Cursor::new(csv)).expect("load");
    assert_eq!(dataset.samples()[0].label, "rice");
}

#[test]
fn test_load_csv_from_file() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "n,p,k,temperature,humidity,ph,rainfall,label").expect("write");
    writeln!(file, "90,42,43,20.8,82,6.5,202,rice").expect("write");
    file.flush().expect("flush");

    let dataset = load_csv(file.path()).expect("load");
    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.samples()[0].label, "rice");
}

#[test]
fn test_load_csv_missing_file() {
    let err = load_csv("/nonexistent/crop_data.csv").unwrap_err();
    assert!(matches!(err, CosechaError::Io(_)));
}
