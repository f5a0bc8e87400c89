//! Run configuration for a split.
//!
//! A `SplitConfig` is built once by the caller and passed by value into the
//! split entry points. Nothing in the core reads process-wide state; the
//! caller decides the output directory.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::SplitError;
use crate::splitter::template::SUFFIX_MARKER;

/// Default field separator.
pub const DEFAULT_SEPARATOR: u8 = b',';

/// Configuration for splitting one source file.
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// Source CSV/TSV file.
    pub source: PathBuf,
    /// Field separator, shared by input and output.
    pub separator: u8,
    /// Split column names, in the order their values appear in file names.
    pub columns: Vec<String>,
    /// Whether the split columns are kept in output rows.
    pub preserve_columns: bool,
    /// Directory the derived template points into. Empty means relative
    /// paths.
    pub output_dir: PathBuf,
    /// Explicit output template containing `{suffix}`; derived from
    /// `source` and `output_dir` when unset.
    pub output_template: Option<String>,
}

impl SplitConfig {
    /// Creates a config whose outputs are named relative to the source stem,
    /// without a directory prefix.
    pub fn new(source: impl Into<PathBuf>, columns: Vec<String>) -> Self {
        Self {
            source: source.into(),
            separator: DEFAULT_SEPARATOR,
            columns,
            preserve_columns: false,
            output_dir: PathBuf::new(),
            output_template: None,
        }
    }

    /// Sets the field separator.
    pub fn separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    /// Sets whether split columns are preserved in output rows.
    pub fn preserve_columns(mut self, preserve: bool) -> Self {
        self.preserve_columns = preserve;
        self
    }

    /// Points the derived template at another directory.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Replaces the output template verbatim.
    pub fn output_template(mut self, template: impl Into<String>) -> Self {
        self.output_template = Some(template.into());
        self
    }

    /// The output template in effect.
    ///
    /// # Errors
    ///
    /// Returns `SplitError::InvalidConfig` if the template has to be derived
    /// and the source name or output directory is not valid UTF-8.
    pub fn template(&self) -> Result<String, SplitError> {
        match &self.output_template {
            Some(template) => Ok(template.clone()),
            None => default_template(&self.source, &self.output_dir),
        }
    }

    /// Checks the column selector and the output template.
    ///
    /// # Errors
    ///
    /// Returns `SplitError::InvalidConfig` if no column is given, a column
    /// name is empty, a name is repeated, or the template cannot be derived.
    pub fn validate(&self) -> Result<(), SplitError> {
        if self.columns.is_empty() {
            return Err(SplitError::InvalidConfig(
                "at least one split column is required".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(self.columns.len());
        for column in &self.columns {
            if column.is_empty() {
                return Err(SplitError::InvalidConfig(
                    "split column names must not be empty".to_string(),
                ));
            }
            if !seen.insert(column.as_str()) {
                return Err(SplitError::InvalidConfig(format!(
                    "split column {} is listed more than once",
                    column
                )));
            }
        }

        self.template().map(|_| ())
    }
}

/// Derives `<dir>/<stem>_{suffix}<.ext>` from the source path.
///
/// # Errors
///
/// Returns `SplitError::InvalidConfig` if any part is not valid UTF-8.
pub fn default_template(source: &Path, output_dir: &Path) -> Result<String, SplitError> {
    let not_utf8 = |path: &Path| {
        SplitError::InvalidConfig(format!("path {} is not valid UTF-8", path.display()))
    };

    let stem = match source.file_stem() {
        Some(stem) => stem.to_str().ok_or_else(|| not_utf8(source))?,
        None => "",
    };
    let extension = match source.extension() {
        Some(ext) => format!(".{}", ext.to_str().ok_or_else(|| not_utf8(source))?),
        None => String::new(),
    };

    let path = output_dir.join(format!("{}_{}{}", stem, SUFFIX_MARKER, extension));
    path.to_str()
        .map(str::to_string)
        .ok_or_else(|| not_utf8(output_dir))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let config = SplitConfig::new("sales.csv", columns(&["region"]));

        assert_eq!(config.separator, b',');
        assert!(!config.preserve_columns);
        assert_eq!(config.template().unwrap(), "sales_{suffix}.csv");
    }

    #[test]
    fn test_builder() {
        let config = SplitConfig::new("data/export.tsv", columns(&["region", "year"]))
            .separator(b'\t')
            .preserve_columns(true)
            .output_dir("/tmp/out");

        assert_eq!(config.separator, b'\t');
        assert!(config.preserve_columns);
        assert_eq!(
            PathBuf::from(config.template().unwrap()),
            PathBuf::from("/tmp/out").join("export_{suffix}.tsv")
        );
    }

    #[test]
    fn test_explicit_template_is_kept_verbatim() {
        let config = SplitConfig::new("sales.csv", columns(&["region"]))
            .output_dir("ignored")
            .output_template("shards/part{suffix}.txt");

        assert_eq!(config.template().unwrap(), "shards/part{suffix}.txt");
    }

    #[test]
    fn test_default_template_without_extension() {
        let template = default_template(Path::new("dump"), Path::new("out")).unwrap();
        assert_eq!(PathBuf::from(template), Path::new("out").join("dump_{suffix}"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_paths_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let bad = OsStr::from_bytes(b"sal\xFFes");

        let source = Path::new(bad).with_extension("csv");
        let config = SplitConfig::new(source, columns(&["region"]));
        assert!(matches!(config.template(), Err(SplitError::InvalidConfig(_))));
        assert!(matches!(config.validate(), Err(SplitError::InvalidConfig(_))));

        let config = SplitConfig::new("sales.csv", columns(&["region"])).output_dir(Path::new(bad));
        assert!(matches!(config.template(), Err(SplitError::InvalidConfig(_))));

        // An explicit template sidesteps derivation.
        let config = config.output_template("out/{suffix}.csv");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_accepts_distinct_columns() {
        let config = SplitConfig::new("sales.csv", columns(&["region", "year"]));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_selector() {
        let config = SplitConfig::new("sales.csv", vec![]);
        assert!(matches!(config.validate(), Err(SplitError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let config = SplitConfig::new("sales.csv", columns(&["region", ""]));
        assert!(matches!(config.validate(), Err(SplitError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let config = SplitConfig::new("sales.csv", columns(&["region", "year", "region"]));
        match config.validate() {
            Err(SplitError::InvalidConfig(msg)) => assert!(msg.contains("region")),
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }
}
