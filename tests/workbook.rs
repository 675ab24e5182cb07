use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use tempfile::TempDir;

use doe_viewer::data::loader::{parse_numeric_series, parse_tabular};
use doe_viewer::data::model::CellValue;
use doe_viewer::data::source::{FileKind, SourceFile};

/// Two sheets: the runs on the first, a decoy total on the second.
fn runs_workbook(dir: &TempDir) -> PathBuf {
    let mut workbook = Workbook::new();

    let runs = workbook.add_worksheet();
    runs.set_name("Runs").unwrap();
    runs.write_string(0, 0, "Temp").unwrap();
    runs.write_string(0, 1, "Pressure").unwrap();
    runs.write_number(1, 0, 100).unwrap();
    runs.write_number(1, 1, 5).unwrap();
    runs.write_number(2, 0, 110).unwrap();
    runs.write_string(2, 1, "6").unwrap();

    let totals = workbook.add_worksheet();
    totals.set_name("Totals").unwrap();
    totals.write_string(0, 0, "Sum").unwrap();
    totals.write_number(1, 0, 999).unwrap();

    let path = dir.path().join("runs.xlsx");
    workbook.save(&path).unwrap();
    path
}

#[test]
fn first_sheet_of_xlsx_as_series() {
    let dir = tempfile::tempdir().unwrap();
    let src = SourceFile::read(&runs_workbook(&dir)).unwrap();
    assert_eq!(src.kind(), FileKind::Workbook);

    let series = parse_numeric_series(&src).unwrap();
    assert_eq!(series.values(), &[100.0, 5.0, 110.0, 6.0]);
    assert!(!series.values().contains(&999.0));
}

#[test]
fn first_sheet_of_xlsx_as_table() {
    let dir = tempfile::tempdir().unwrap();
    let src = SourceFile::read(&runs_workbook(&dir)).unwrap();

    let table = parse_tabular(&src).unwrap();
    assert_eq!(table.headers, vec!["Temp", "Pressure"]);
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0]["Pressure"], CellValue::Number(5.0));
    assert_eq!(table.rows[1]["Temp"], CellValue::Number(110.0));
    // Text cells keep their type in the table even when they look numeric.
    assert_eq!(table.rows[1]["Pressure"], CellValue::Text("6".into()));
    assert!(table.rows.iter().all(|r| !r.contains_key("Sum")));
}

#[test]
fn date_cells_are_iso_text_and_not_numbers() {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let stamp = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");
    let noon = ExcelDateTime::from_ymd(2024, 5, 1)
        .unwrap()
        .and_hms(12, 0, 0)
        .unwrap();
    sheet.write_string(0, 0, "When").unwrap();
    sheet.write_string(0, 1, "Yield").unwrap();
    sheet.write_datetime_with_format(1, 0, &noon, &stamp).unwrap();
    sheet.write_number(1, 1, 3.5).unwrap();
    let src = SourceFile::new("dated.xlsx", workbook.save_to_buffer().unwrap());

    let table = parse_tabular(&src).unwrap();
    match &table.rows[0]["When"] {
        CellValue::Date(s) => assert!(s.starts_with("2024-05-01T12:00:00"), "{s}"),
        other => panic!("expected a date, got {other:?}"),
    }

    // The serial behind the date never leaks into the series.
    assert_eq!(parse_numeric_series(&src).unwrap().into_vec(), vec![3.5]);
}
