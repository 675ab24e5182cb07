use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use super::error::ParseError;
use super::model::{parse_finite, CellValue};
use super::source::{FileKind, SourceFile};

/// Header-less rows of the first sheet, as raw cells.
pub type RawRows = Vec<Vec<CellValue>>;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Decode the first sheet of `src` into raw rows.
///
/// Workbooks go through calamine; everything else is read as CSV.
pub fn read_first_sheet(src: &SourceFile) -> Result<RawRows, ParseError> {
    let rows = match src.kind() {
        FileKind::Workbook => workbook_rows(&src.bytes)?,
        FileKind::Csv | FileKind::Text | FileKind::Json => csv_rows(&src.bytes)?,
    };
    log::debug!("{}: decoded {} raw rows", src.name, rows.len());
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Workbook reader (.xlsx / .xls / .xlsb / .ods)
// ---------------------------------------------------------------------------

fn workbook_rows(bytes: &[u8]) -> Result<RawRows, ParseError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| ParseError::Workbook(e.to_string()))?;

    // First sheet by position; the rest are ignored.
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ParseError::NoSheet)?
        .map_err(|e| ParseError::Workbook(e.to_string()))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect())
}

fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Date(
            dt.as_datetime()
                .map(|d| format!("{}T{}", d.date(), d.time()))
                .unwrap_or_else(|| dt.as_f64().to_string()),
        ),
        Data::DateTimeIso(s) => CellValue::Date(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
        Data::Empty => CellValue::Empty,
    }
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// Every line is a row, including the first; ragged lines are allowed.
fn csv_rows(bytes: &[u8]) -> Result<RawRows, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for result in reader.byte_records() {
        let record = result.map_err(|e| ParseError::Csv(e.to_string()))?;
        rows.push(
            record
                .iter()
                .map(|field| guess_cell_type(&String::from_utf8_lossy(field)))
                .collect(),
        );
    }
    Ok(rows)
}

/// Type a CSV field the way a spreadsheet import would.
fn guess_cell_type(s: &str) -> CellValue {
    if s.is_empty() {
        return CellValue::Empty;
    }
    if let Some(v) = parse_finite(s) {
        return CellValue::Number(v);
    }
    if s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false") {
        return CellValue::Bool(s.eq_ignore_ascii_case("true"));
    }
    CellValue::Text(s.to_string())
}
