// File: crates/accrual-chart/tests/document.rs
// Purpose: Runs document parsing: scalar forms, run order, missing fields and I/O failures.

use accrual_chart::{ChartError, Document, Scalar};

#[test]
fn parses_numbers_and_numeric_strings() {
    let doc = Document::from_str(
        r#"{"initialRate": 2, "baseRunName": "A",
            "runs": {"A": [{"time": 0, "v": "100000000"}, {"time": 604800, "v": 2e8}]}}"#,
    )
    .expect("valid document");

    assert_eq!(doc.initial_rate.to_string(), "2");
    let run = doc.base_run().expect("baseline present");
    assert_eq!(run.samples.len(), 2);
    assert_eq!(run.samples[0].v, Scalar::Text("100000000".into()));
    assert_eq!(run.samples[0].v.to_f64(), Some(1e8));
    assert_eq!(run.samples[1].v.to_f64(), Some(2e8));
    assert_eq!(run.samples[1].time.as_number(), Some(604800.0));
}

#[test]
fn string_rate_is_kept_verbatim() {
    let doc = Document::from_str(r#"{"initialRate": "200%", "baseRunName": "x", "runs": {}}"#).unwrap();
    assert_eq!(doc.initial_rate.to_string(), "200%");
}

#[test]
fn run_order_follows_document() {
    let doc = Document::from_str(
        r#"{"initialRate": 1, "baseRunName": "m",
            "runs": {"z": [], "a": [], "m": [], "b": []}}"#,
    )
    .unwrap();
    assert_eq!(doc.runs.names().collect::<Vec<_>>(), vec!["z", "a", "m", "b"]);
}

#[test]
fn repeated_run_keeps_first_position_last_value() {
    let doc = Document::from_str(
        r#"{"initialRate": 1, "baseRunName": "a",
            "runs": {"a": [{"time": 0, "v": 1}], "b": [], "a": [{"time": 1, "v": 2}, {"time": 2, "v": 3}]}}"#,
    )
    .unwrap();
    assert_eq!(doc.runs.names().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(doc.runs.get("a").unwrap().samples.len(), 2);
}

#[test]
fn missing_runs_is_empty() {
    let doc = Document::from_str(r#"{"initialRate": 1, "baseRunName": "a"}"#).unwrap();
    assert!(doc.runs.is_empty());
    assert!(doc.base_run().is_none());
}

#[test]
fn missing_sample_field_is_format_error() {
    let err = Document::from_str(
        r#"{"initialRate": 1, "baseRunName": "a", "runs": {"a": [{"time": 0}]}}"#,
    )
    .unwrap_err();
    assert!(matches!(err, ChartError::Format(_)), "got {err:?}");
    assert!(err.to_string().contains("`v`"));
}

#[test]
fn malformed_json_is_format_error() {
    let err = Document::from_str("{ not json").unwrap_err();
    assert!(matches!(err, ChartError::Format(_)));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = Document::from_path(&path).unwrap_err();
    match err {
        ChartError::Io { path: p, source } => {
            assert_eq!(p, path);
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected Io, got {other:?}"),
    }
}

#[test]
fn serialization_preserves_order_and_forms() {
    let src = r#"{"initialRate":"200%","baseRunName":"b","runs":{"b":[{"time":0,"v":"9.5"}],"a":[{"time":20000,"v":3}]}}"#;
    let doc = Document::from_str(src).unwrap();
    assert_eq!(doc.to_json().unwrap(), src);
}
