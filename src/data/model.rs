use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::ParseError;

// ---------------------------------------------------------------------------
// CellValue – a single raw spreadsheet cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell as it comes out of a sheet or a JSON row.
///
/// JSON form: number, string, bool, string (dates) and `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Bool(bool),
    Text(String),
    /// ISO-8601 rendering of a spreadsheet date cell.
    Date(String),
    Empty,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Text(s) | CellValue::Date(s) => write!(f, "{s}"),
            CellValue::Empty => Ok(()),
        }
    }
}

impl CellValue {
    /// Numeric reading of the cell: native numbers, or text that trims to a
    /// finite decimal. Booleans, dates and empties never count.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) if v.is_finite() => Some(*v),
            CellValue::Text(s) => parse_finite(s),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

/// Trim and parse a token as a finite `f64`.
pub fn parse_finite(token: &str) -> Option<f64> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// One row of a table: column name → value. Absent key means "no value".
pub type Record = BTreeMap<String, CellValue>;

// ---------------------------------------------------------------------------
// NumericSeries
// ---------------------------------------------------------------------------

/// Ordered samples in upload order. Every element is finite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<f64>", into = "Vec<f64>")]
pub struct NumericSeries(Vec<f64>);

impl From<Vec<f64>> for NumericSeries {
    fn from(values: Vec<f64>) -> Self {
        NumericSeries::from_values(values)
    }
}

impl From<NumericSeries> for Vec<f64> {
    fn from(series: NumericSeries) -> Self {
        series.0
    }
}

impl NumericSeries {
    /// Keep only the finite values, preserving order.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        NumericSeries(values.into_iter().filter(|v| v.is_finite()).collect())
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }
}

// ---------------------------------------------------------------------------
// TabularDataset
// ---------------------------------------------------------------------------

/// A parsed sheet: header row plus one [`Record`] per data row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabularDataset {
    /// Column names in sheet order. Uniqueness is not enforced.
    pub headers: Vec<String>,
    pub rows: Vec<Record>,
}

impl TabularDataset {
    /// Build from raw header-less rows: row 0 names the columns, every later
    /// row is zipped against it. Empty or missing trailing cells are left out
    /// of the record.
    pub fn from_rows(raw: Vec<Vec<CellValue>>) -> Result<Self, ParseError> {
        if raw.len() < 2 {
            return Err(ParseError::EmptyTable);
        }
        let mut raw = raw.into_iter();
        let headers: Vec<String> = raw
            .next()
            .unwrap_or_default()
            .iter()
            .map(|c| c.to_string())
            .collect();

        let rows = raw
            .map(|row| {
                headers
                    .iter()
                    .zip(row)
                    .filter(|(_, cell)| !cell.is_empty())
                    .map(|(h, cell)| (h.clone(), cell))
                    .collect::<Record>()
            })
            .collect();

        Ok(TabularDataset { headers, rows })
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column analysed by default: `Response` if present, else the last one.
    pub fn default_target(&self) -> Option<&str> {
        if self.headers.iter().any(|h| h == "Response") {
            return Some("Response");
        }
        self.headers.last().map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Variable – a declared experiment factor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    #[default]
    Continuous,
    Categorical,
    Discrete,
}

impl VariableKind {
    pub const ALL: [VariableKind; 3] = [
        VariableKind::Continuous,
        VariableKind::Categorical,
        VariableKind::Discrete,
    ];
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VariableKind::Continuous => "continuous",
            VariableKind::Categorical => "categorical",
            VariableKind::Discrete => "discrete",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: VariableKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default)]
    pub levels: Vec<String>,
    /// `#rrggbb` marker colour chosen in the editor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VariableError {
    #[error("variable name is required")]
    MissingName,
    #[error("{0}: continuous variables need min < max")]
    InvalidBounds(String),
    #[error("{0}: at least one level is required")]
    MissingLevels(String),
}

impl Variable {
    pub fn continuous(name: &str, min: f64, max: f64) -> Self {
        Variable {
            name: name.to_string(),
            kind: VariableKind::Continuous,
            min: Some(min),
            max: Some(max),
            levels: Vec::new(),
            color: None,
        }
    }

    pub fn with_levels(name: &str, kind: VariableKind, levels: &[&str]) -> Self {
        Variable {
            name: name.to_string(),
            kind,
            min: None,
            max: None,
            levels: levels.iter().map(|l| l.to_string()).collect(),
            color: None,
        }
    }

    /// Split a comma-separated level list as typed into the editor.
    pub fn levels_from_text(text: &str) -> Vec<String> {
        text.split(',')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn validate(&self) -> Result<(), VariableError> {
        if self.name.trim().is_empty() {
            return Err(VariableError::MissingName);
        }
        match self.kind {
            VariableKind::Continuous => match (self.min, self.max) {
                (Some(lo), Some(hi)) if lo < hi => Ok(()),
                _ => Err(VariableError::InvalidBounds(self.name.clone())),
            },
            VariableKind::Categorical | VariableKind::Discrete => {
                if self.levels.is_empty() {
                    Err(VariableError::MissingLevels(self.name.clone()))
                } else {
                    Ok(())
                }
            }
        }
    }
}
