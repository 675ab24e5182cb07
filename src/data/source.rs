use std::path::Path;

use super::error::IngestError;

/// How a file's bytes are decoded, chosen from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// `.txt`, no extension, or anything unrecognised.
    Text,
    Csv,
    /// Excel / OpenDocument workbook.
    Workbook,
    Json,
}

impl FileKind {
    pub fn from_name(name: &str) -> Self {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "csv" => FileKind::Csv,
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => FileKind::Workbook,
            "json" => FileKind::Json,
            _ => FileKind::Text,
        }
    }
}

/// An uploaded file: its name (for extension sniffing) and full contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        SourceFile {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read the whole file into memory.
    pub fn read(path: &Path) -> Result<Self, IngestError> {
        let bytes = std::fs::read(path).map_err(|source| IngestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(SourceFile { name, bytes })
    }

    pub fn kind(&self) -> FileKind {
        FileKind::from_name(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn sniffs_extension_case_insensitively() {
        assert_eq!(FileKind::from_name("data.TXT"), FileKind::Text);
        assert_eq!(FileKind::from_name("data.Csv"), FileKind::Csv);
        assert_eq!(FileKind::from_name("book.xlsx"), FileKind::Workbook);
        assert_eq!(FileKind::from_name("old.xls"), FileKind::Workbook);
        assert_eq!(FileKind::from_name("calc.ods"), FileKind::Workbook);
        assert_eq!(FileKind::from_name("design.json"), FileKind::Json);
    }

    #[test]
    fn unknown_or_missing_extension_is_text() {
        assert_eq!(FileKind::from_name("README"), FileKind::Text);
        assert_eq!(FileKind::from_name("values.dat"), FileKind::Text);
        assert_eq!(FileKind::from_name(""), FileKind::Text);
    }

    #[test]
    fn read_keeps_file_name_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.txt");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"1 2 3")
            .unwrap();

        let src = SourceFile::read(&path).unwrap();
        assert_eq!(src.name, "series.txt");
        assert_eq!(src.bytes, b"1 2 3");
        assert_eq!(src.kind(), FileKind::Text);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SourceFile::read(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, IngestError::Io { .. }));
    }
}
