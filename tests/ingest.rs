use std::path::PathBuf;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use doe_viewer::data::error::{IngestError, ParseError};
use doe_viewer::data::loader::{load_design_matrix, parse_numeric_series, parse_tabular};
use doe_viewer::data::model::{CellValue, Variable, VariableKind};
use doe_viewer::data::projection::{project, RenderMode};
use doe_viewer::data::request::{to_json_pretty, SpcRequest};
use doe_viewer::data::source::SourceFile;

fn fixture(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn same_csv_as_series_and_as_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir, "runs.csv", "Temp,Pressure\n100,5\n110,6\n");
    let src = SourceFile::read(&path).unwrap();

    let series = parse_numeric_series(&src).unwrap();
    assert_eq!(series.values(), &[100.0, 5.0, 110.0, 6.0]);

    let table = parse_tabular(&src).unwrap();
    assert_eq!(table.headers, vec!["Temp", "Pressure"]);
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[1]["Pressure"], CellValue::Number(6.0));
}

#[test]
fn text_upload_to_series() {
    let dir = tempfile::tempdir().unwrap();
    let src = SourceFile::read(&fixture(&dir, "s.txt", "10\n12\n, 14\n")).unwrap();
    assert_eq!(
        parse_numeric_series(&src).unwrap().into_vec(),
        vec![10.0, 12.0, 14.0]
    );
}

#[test]
fn unreadable_and_unusable_files_fail_differently() {
    let dir = tempfile::tempdir().unwrap();

    let missing = SourceFile::read(&dir.path().join("gone.txt")).unwrap_err();
    assert!(matches!(missing, IngestError::Io { .. }));
    assert!(!missing.is_parse());

    let src = SourceFile::read(&fixture(&dir, "words.txt", "no numbers here")).unwrap();
    let err = parse_numeric_series(&src).unwrap_err();
    assert!(err.is_parse());
    assert_eq!(err.to_string(), ParseError::NoNumbers.to_string());
}

#[test]
fn design_response_projects_onto_declared_variables() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(
        &dir,
        "design.json",
        r#"{
            "strategy": "lhc",
            "num_factors": 2,
            "num_runs": 3,
            "matrix": [
                {"Temperature": 210.0, "Pressure": 1.5},
                {"Temperature": 330.0, "Pressure": 4.0},
                {"Temperature": 470.0, "Pressure": 2.5}
            ]
        }"#,
    );
    let rows = load_design_matrix(&SourceFile::read(&path).unwrap()).unwrap();

    // Catalyst is categorical and absent from an LHC matrix.
    let variables = vec![
        Variable::with_levels("Catalyst", VariableKind::Categorical, &["A", "B"]),
        Variable::continuous("Temperature", 200.0, 500.0),
        Variable::continuous("Pressure", 1.0, 5.0),
    ];
    let p = project(&rows, &variables).unwrap();

    assert_eq!(p.mode, RenderMode::Scatter2d);
    assert_eq!(p.axis_name(0), Some("Temperature"));
    assert_eq!(p.axis_name(1), Some("Pressure"));
    assert_eq!(
        p.points_2d(),
        vec![[210.0, 1.5], [330.0, 4.0], [470.0, 2.5]]
    );
}

#[test]
fn table_rows_become_spc_body() {
    let dir = tempfile::tempdir().unwrap();
    let src = SourceFile::read(&fixture(&dir, "spc.csv", "Batch,Response\nA,9.5\nB,\n")).unwrap();
    let table = parse_tabular(&src).unwrap();

    let target = table.default_target().unwrap();
    let body = SpcRequest::from_table(&table, target, None).unwrap();
    let value: serde_json::Value = serde_json::from_str(&to_json_pretty(&body).unwrap()).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "data": [{"Batch": "A", "Response": 9.5}, {"Batch": "B"}],
            "target_variable": "Response"
        })
    );
}
