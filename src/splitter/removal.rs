//! Dropping split columns from header and data rows.

use csv::StringRecord;

/// Set of field positions to drop from every row.
///
/// Built once from the split indexes; the same mask is applied to the header
/// and to each data row so their shapes always agree.
#[derive(Debug, Clone, Default)]
pub struct ColumnMask {
    /// Ascending, deduplicated.
    removed: Vec<usize>,
}

impl ColumnMask {
    /// Mask removing the given indexes, in any order.
    pub fn removing(indexes: &[usize]) -> Self {
        let mut removed = indexes.to_vec();
        removed.sort_unstable();
        removed.dedup();
        Self { removed }
    }

    /// Mask that keeps every field.
    pub fn keep_all() -> Self {
        Self::default()
    }

    /// Mask for a run: empty when split columns are preserved.
    pub fn for_split(split_indexes: &[usize], preserve_columns: bool) -> Self {
        if preserve_columns {
            Self::keep_all()
        } else {
            Self::removing(split_indexes)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
    }

    /// Copies every field whose index is not masked, in original order.
    pub fn apply(&self, record: &StringRecord) -> StringRecord {
        if self.removed.is_empty() {
            return record.clone();
        }

        let mut kept = StringRecord::with_capacity(record.as_slice().len(), record.len());
        let mut removed = self.removed.iter().peekable();
        for (index, field) in record.iter().enumerate() {
            if removed.peek() == Some(&&index) {
                removed.next();
                continue;
            }
            kept.push_field(field);
        }
        kept
    }
}
