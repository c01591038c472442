//! Error types for reading input, loading options, and writing XML.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading CSV input or writing the XML document.
#[derive(Debug, Error)]
pub enum ExportError {
    // === Input Errors ===
    /// Failed to open or parse the CSV source.
    #[error("failed to read CSV {path}: {source}")]
    CsvRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// CSV source has no header row.
    #[error("CSV file has no header row: {path}")]
    EmptyCsv { path: PathBuf },

    // === Output Errors ===
    /// Root or row element name is empty after sanitizing.
    #[error("invalid element name '{name}': nothing is left after removing invalid characters")]
    InvalidElementName { name: String },

    /// Column element name contains characters that cannot appear in a tag.
    #[error("column {column} cannot be written as element '{name}'; enable tag sanitizing")]
    InvalidColumnName { column: usize, name: String },

    /// Failed to create the output file.
    #[error("failed to create {path}: {source}")]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write an XML event.
    #[error("failed to write XML: {message}")]
    XmlWrite { message: String },
}

impl ExportError {
    pub(crate) fn xml(err: impl std::fmt::Display) -> Self {
        Self::XmlWrite {
            message: err.to_string(),
        }
    }
}

/// Errors raised while loading a preparation options file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Options file could not be read.
    #[error("failed to read options file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Options file is not valid JSON for the options schema.
    #[error("invalid options file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExportError::EmptyCsv {
            path: PathBuf::from("/data/input.csv"),
        };
        assert_eq!(err.to_string(), "CSV file has no header row: /data/input.csv");

        let err = ExportError::InvalidElementName {
            name: "<>".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid element name '<>': nothing is left after removing invalid characters"
        );

        let err = ExportError::InvalidColumnName {
            column: 3,
            name: "A B".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "column 3 cannot be written as element 'A B'; enable tag sanitizing"
        );
    }

    #[test]
    fn test_xml_error_keeps_message() {
        let err = ExportError::xml("disk full");
        assert!(matches!(err, ExportError::XmlWrite { ref message } if message == "disk full"));
    }
}
