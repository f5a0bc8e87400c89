use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// User-friendly error presentation for the command line.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorPresentation {
    pub title: String,
    pub message: String,
    pub action: Option<String>,
}

/// Crate-wide error type.
///
/// Every variant is terminal for the current run. Output files written
/// before the failure are left on disk.
#[derive(Debug, Error)]
pub enum SplitError {
    // ── Header ────────────────────────────────────────────────────────────────
    #[error("{column} is not a column in the file")]
    ColumnNotFound { column: String },

    // ── Source ────────────────────────────────────────────────────────────────
    #[error("Failed to open source file {}: {source}", path.display())]
    SourceOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Source file has no header row")]
    EmptySource,

    #[error("Failed to read CSV record: {0}")]
    SourceRead(#[from] csv::Error),

    // ── Destinations ──────────────────────────────────────────────────────────
    #[error("Failed to create output file {}: {source}", path.display())]
    DestinationOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write to output file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Configuration ─────────────────────────────────────────────────────────
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Generic fallback ──────────────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SplitError {
    /// Builds a `Write` error from a `csv` serialization failure.
    pub(crate) fn write(path: impl Into<PathBuf>, err: csv::Error) -> Self {
        SplitError::Write {
            path: path.into(),
            source: err.into(),
        }
    }

    /// Converts the error into a presentation suitable for terminal output.
    pub fn to_presentation(&self) -> ErrorPresentation {
        match self {
            SplitError::ColumnNotFound { column } => ErrorPresentation {
                title: "Unknown Column".into(),
                message: format!("{} is not a column in the file.", column),
                action: Some("Check the column names against the header row".into()),
            },

            SplitError::SourceOpen { path, source } => ErrorPresentation {
                title: "Cannot Open Source".into(),
                message: format!("Could not open {}: {}", path.display(), source),
                action: Some("Check the file path and permissions".into()),
            },

            SplitError::EmptySource => ErrorPresentation {
                title: "Empty Source".into(),
                message: "The source file is empty and has no header row.".into(),
                action: Some("Provide a file whose first row names the columns".into()),
            },

            SplitError::SourceRead(err) => ErrorPresentation {
                title: "Invalid CSV".into(),
                message: format!("The source file has a formatting problem: {}", err),
                action: Some("Check the separator and fix the CSV file".into()),
            },

            SplitError::DestinationOpen { path, source } => ErrorPresentation {
                title: "Cannot Create Output".into(),
                message: format!("Could not create {}: {}", path.display(), source),
                action: Some("Check the output directory and its permissions".into()),
            },

            SplitError::Write { path, source } => ErrorPresentation {
                title: "Write Failed".into(),
                message: format!("Could not write to {}: {}", path.display(), source),
                action: Some("Check free disk space and try again".into()),
            },

            SplitError::InvalidConfig(msg) => ErrorPresentation {
                title: "Invalid Arguments".into(),
                message: msg.clone(),
                action: Some("Run with --help to see the accepted options".into()),
            },

            SplitError::Internal(_) => ErrorPresentation {
                title: "Unexpected Error".into(),
                message: "Something went wrong. Please try again.".into(),
                action: None,
            },
        }
    }
}

impl Serialize for SplitError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_presentation().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    /// Returns a sample of every SplitError variant.
    fn all_variants() -> Vec<SplitError> {
        let csv_err = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader("a,b\n1\n".as_bytes())
            .records()
            .find_map(Result::err)
            .expect("ragged row should fail");

        vec![
            SplitError::ColumnNotFound { column: "region".into() },
            SplitError::SourceOpen {
                path: "missing.csv".into(),
                source: io::Error::new(io::ErrorKind::NotFound, "not found"),
            },
            SplitError::EmptySource,
            SplitError::SourceRead(csv_err),
            SplitError::DestinationOpen {
                path: "out/x.csv".into(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            },
            SplitError::Write {
                path: "out/x.csv".into(),
                source: io::Error::new(io::ErrorKind::Other, "disk full"),
            },
            SplitError::InvalidConfig("no columns".into()),
            SplitError::Internal("join failed".into()),
        ]
    }

    #[test]
    fn all_variants_have_nonempty_title_and_message() {
        for variant in all_variants() {
            let presentation = variant.to_presentation();
            assert!(
                !presentation.title.trim().is_empty(),
                "Empty title for {:?}",
                variant
            );
            assert!(
                !presentation.message.trim().is_empty(),
                "Empty message for {:?}",
                variant
            );
        }
    }

    #[test]
    fn column_not_found_names_the_column() {
        let err = SplitError::ColumnNotFound { column: "year".into() };
        assert_eq!(err.to_string(), "year is not a column in the file");
        assert!(err.to_presentation().message.contains("year"));
    }

    #[test]
    fn destination_errors_name_the_path() {
        let err = SplitError::DestinationOpen {
            path: "out/sales__regioneast.csv".into(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("sales__regioneast.csv"));
        assert!(err.to_presentation().message.contains("sales__regioneast.csv"));
    }

    #[test]
    fn internal_error_does_not_leak_details() {
        let presentation = SplitError::Internal("task panicked at foo.rs:12".into()).to_presentation();
        assert!(!presentation.message.contains("foo.rs"));
    }

    #[test]
    fn serialization_produces_valid_json_with_required_fields() {
        for variant in all_variants() {
            let json = serde_json::to_string(&variant)
                .unwrap_or_else(|_| panic!("Failed to serialize {:?}", variant));
            let parsed: serde_json::Value = serde_json::from_str(&json)
                .unwrap_or_else(|_| panic!("Failed to parse JSON for {:?}", variant));

            assert!(parsed.get("title").is_some(), "{:?} missing 'title'", variant);
            assert!(parsed.get("message").is_some(), "{:?} missing 'message'", variant);
            assert!(parsed.get("action").is_some(), "{:?} missing 'action'", variant);
        }
    }
}
