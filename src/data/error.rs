use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// The file was read but held nothing usable.
///
/// Individual malformed cells or tokens never produce one of these; they are
/// dropped during extraction. Only the aggregate outcome can fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("no valid numbers found")]
    NoNumbers,

    #[error("file is empty or invalid format")]
    EmptyTable,

    #[error("file is empty or invalid format: workbook has no sheets")]
    NoSheet,

    #[error("invalid workbook: {0}")]
    Workbook(String),

    #[error("invalid CSV: {0}")]
    Csv(String),

    #[error("invalid design matrix JSON: {0}")]
    Json(String),
}

/// Everything that can go wrong turning a user file into data.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl IngestError {
    /// `true` when the bytes were available but unusable, `false` for
    /// read failures.
    pub fn is_parse(&self) -> bool {
        matches!(self, IngestError::Parse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_messages_match_user_facing_text() {
        assert_eq!(ParseError::NoNumbers.to_string(), "no valid numbers found");
        assert_eq!(
            ParseError::EmptyTable.to_string(),
            "file is empty or invalid format"
        );
    }

    #[test]
    fn io_and_parse_are_distinguishable() {
        let io = IngestError::Io {
            path: PathBuf::from("missing.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(!io.is_parse());
        assert!(io.to_string().contains("missing.csv"));

        let parse: IngestError = ParseError::NoNumbers.into();
        assert!(parse.is_parse());
        assert_eq!(parse.to_string(), "no valid numbers found");
    }
}
