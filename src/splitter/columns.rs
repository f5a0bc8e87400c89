//! Header reading and split-column resolution.

use std::io::Read;

use csv::{Reader, StringRecord};

use crate::error::SplitError;

/// Reads the header row from `reader`.
///
/// Consumes exactly one record.
///
/// # Errors
///
/// Returns `SplitError::EmptySource` if the input has no rows, or
/// `SplitError::SourceRead` if the first row fails to parse.
pub fn read_header<R: Read>(reader: &mut Reader<R>) -> Result<StringRecord, SplitError> {
    let mut header = StringRecord::new();
    if !reader.read_record(&mut header)? {
        return Err(SplitError::EmptySource);
    }
    Ok(header)
}

/// Maps each requested column name to its index in `header`.
///
/// The result follows the order of `columns`, not the header order. When a
/// name appears more than once in the header the lowest index wins.
///
/// # Errors
///
/// Returns `SplitError::ColumnNotFound` for the first name with no match.
pub fn resolve_split_indexes(
    header: &StringRecord,
    columns: &[String],
) -> Result<Vec<usize>, SplitError> {
    columns
        .iter()
        .map(|column| {
            header
                .iter()
                .position(|name| name == column)
                .ok_or_else(|| SplitError::ColumnNotFound {
                    column: column.clone(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv::ReaderBuilder;

    fn header() -> StringRecord {
        StringRecord::from(vec!["id", "region", "year", "amount"])
    }

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolves_in_selector_order() {
        let indexes = resolve_split_indexes(&header(), &columns(&["year", "region"])).unwrap();
        assert_eq!(indexes, vec![2, 1]);
    }

    #[test]
    fn test_first_and_last_columns() {
        let indexes = resolve_split_indexes(&header(), &columns(&["id", "amount"])).unwrap();
        assert_eq!(indexes, vec![0, 3]);
    }

    #[test]
    fn test_duplicate_header_resolves_to_lowest_index() {
        let header = StringRecord::from(vec!["region", "id", "region"]);
        let indexes = resolve_split_indexes(&header, &columns(&["region"])).unwrap();
        assert_eq!(indexes, vec![0]);
    }

    #[test]
    fn test_match_is_exact() {
        let result = resolve_split_indexes(&header(), &columns(&["Region"]));
        assert!(matches!(
            result,
            Err(SplitError::ColumnNotFound { ref column }) if column == "Region"
        ));
    }

    #[test]
    fn test_missing_column_fails_whole_resolution() {
        let result = resolve_split_indexes(&header(), &columns(&["region", "country", "year"]));
        match result {
            Err(SplitError::ColumnNotFound { column }) => assert_eq!(column, "country"),
            other => panic!("Expected ColumnNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_read_header_consumes_one_row() {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .from_reader("id,region\n1,east\n".as_bytes());

        let header = read_header(&mut reader).unwrap();
        assert_eq!(header, StringRecord::from(vec!["id", "region"]));

        let mut next = StringRecord::new();
        assert!(reader.read_record(&mut next).unwrap());
        assert_eq!(next, StringRecord::from(vec!["1", "east"]));
    }

    #[test]
    fn test_read_header_of_empty_input() {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .from_reader("".as_bytes());

        assert!(matches!(read_header(&mut reader), Err(SplitError::EmptySource)));
    }
}
