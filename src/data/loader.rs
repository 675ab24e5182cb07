use serde::Deserialize;

use super::error::{IngestError, ParseError};
use super::model::{parse_finite, CellValue, NumericSeries, Record, TabularDataset};
use super::request::DesignResponse;
use super::sheet::{read_first_sheet, RawRows};
use super::source::{FileKind, SourceFile};

// ---------------------------------------------------------------------------
// Single-series extraction
// ---------------------------------------------------------------------------

/// Extract every number in `src`, in file order.
///
/// Supported formats:
/// * `.txt` (and unknown extensions) – tokens split on newlines, tabs, commas
///   and spaces
/// * `.csv` / `.xlsx` / `.xls` / `.ods` – every cell of the first sheet,
///   row-major, header row included
///
/// Tokens and cells that are not finite numbers are skipped. Fails only when
/// nothing numeric is left.
pub fn parse_numeric_series(src: &SourceFile) -> Result<NumericSeries, IngestError> {
    let kind = src.kind();
    log::debug!("{}: extracting numbers as {kind:?}", src.name);

    let series = match kind {
        FileKind::Text | FileKind::Json => numbers_from_text(&decode_text(&src.bytes)),
        FileKind::Csv | FileKind::Workbook => numbers_from_rows(&read_first_sheet(src)?),
    };

    if series.is_empty() {
        return Err(ParseError::NoNumbers.into());
    }
    Ok(series)
}

/// Parse a pasted block of numbers with the same rules as a `.txt` upload.
pub fn parse_numeric_text(text: &str) -> Result<NumericSeries, ParseError> {
    let series = numbers_from_text(text);
    if series.is_empty() {
        return Err(ParseError::NoNumbers);
    }
    Ok(series)
}

fn decode_text(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.strip_prefix('\u{feff}').unwrap_or(&*text).to_string()
}

fn is_separator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\t' | ',' | ' ')
}

fn numbers_from_text(text: &str) -> NumericSeries {
    NumericSeries::from_values(text.split(is_separator).filter_map(parse_finite))
}

/// Row-major scan: row 0 left to right, then row 1, and so on.
pub fn numbers_from_rows(rows: &RawRows) -> NumericSeries {
    NumericSeries::from_values(rows.iter().flatten().filter_map(|cell| match cell {
        CellValue::Number(_) | CellValue::Text(_) => cell.as_number(),
        _ => None,
    }))
}

// ---------------------------------------------------------------------------
// Tabular extraction
// ---------------------------------------------------------------------------

/// Read the first sheet of `src` as a header row plus records.
pub fn parse_tabular(src: &SourceFile) -> Result<TabularDataset, IngestError> {
    let rows = read_first_sheet(src)?;
    let dataset = TabularDataset::from_rows(rows)?;
    log::debug!(
        "{}: {} columns, {} rows",
        src.name,
        dataset.headers.len(),
        dataset.len()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Design matrix
// ---------------------------------------------------------------------------

/// Accepted JSON layouts for a saved design matrix.
///
/// ```json
/// [ { "Temperature": 231.4, "Pressure": 2.1 }, ... ]
/// ```
/// or the backend's design response:
/// ```json
/// { "strategy": "lhc", "num_factors": 2, "num_runs": 10, "matrix": [ ... ] }
/// ```
#[derive(Deserialize)]
#[serde(untagged)]
enum MatrixJson {
    Rows(Vec<Record>),
    Response(DesignResponse),
}

/// Load the rows of a design matrix from JSON or from any table file.
pub fn load_design_matrix(src: &SourceFile) -> Result<Vec<Record>, IngestError> {
    if src.kind() != FileKind::Json {
        return Ok(parse_tabular(src)?.rows);
    }

    let parsed: MatrixJson = serde_json::from_slice(&src.bytes)
        .map_err(|e| ParseError::Json(e.to_string()))?;
    let rows = match parsed {
        MatrixJson::Rows(rows) => rows,
        MatrixJson::Response(resp) => {
            log::debug!(
                "{}: {} design, {} factors, {} runs",
                src.name,
                resp.strategy,
                resp.num_factors,
                resp.num_runs
            );
            resp.matrix
        }
    };
    Ok(rows)
}
