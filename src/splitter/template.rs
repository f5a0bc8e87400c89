//! Output file naming.
//!
//! Each record's split-column values become a suffix such as
//! `_regioneast_year2024`, which replaces the `{suffix}` marker of the
//! output template.

use std::path::PathBuf;

use csv::StringRecord;

/// Marker replaced by the per-group suffix.
pub const SUFFIX_MARKER: &str = "{suffix}";

/// Builds the suffix for a record.
///
/// For each split index, in selector order, appends `_` + column name +
/// value. Qualifying with the column name keeps different columns that share
/// a value from colliding.
pub fn record_suffix(header: &StringRecord, record: &StringRecord, split_indexes: &[usize]) -> String {
    let mut suffix = String::new();
    for &index in split_indexes {
        suffix.push('_');
        suffix.push_str(header.get(index).unwrap_or_default());
        suffix.push_str(record.get(index).unwrap_or_default());
    }
    suffix
}

/// Template with a single `{suffix}` marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTemplate {
    template: String,
}

impl OutputTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Whether the template carries the marker at all.
    ///
    /// Without it every record maps to the same path.
    pub fn has_marker(&self) -> bool {
        self.template.contains(SUFFIX_MARKER)
    }

    /// Substitutes the first marker occurrence with `suffix`.
    pub fn render(&self, suffix: &str) -> PathBuf {
        PathBuf::from(self.template.replacen(SUFFIX_MARKER, suffix, 1))
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }
}
