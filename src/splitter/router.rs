//! Routing of data rows to per-group output files.
//!
//! Uses the `csv` crate so that quoted fields with embedded separators and
//! newlines survive the split. The scan is a single synchronous pass: the
//! header is resolved once, then every row is appended to the file named
//! after its split-column values.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;

use super::columns::{read_header, resolve_split_indexes};
use super::removal::ColumnMask;
use super::template::{record_suffix, OutputTemplate};
use super::writer_table::{ShardOutput, WriterTable};
use crate::config::SplitConfig;
use crate::error::SplitError;

/// Result of a completed split.
#[derive(Debug, Clone, Serialize)]
pub struct SplitSummary {
    /// Output files in order of first appearance.
    pub outputs: Vec<ShardOutput>,
    /// Total data rows routed (header excluded).
    pub total_rows: u64,
}

/// Splits `config.source` into one file per distinct split-column value.
///
/// The blocking scan runs on tokio's blocking pool.
///
/// # Errors
///
/// See [`split_file_blocking`]. Returns `SplitError::Internal` if the
/// blocking task cannot be joined.
pub async fn split_file(config: SplitConfig) -> Result<SplitSummary, SplitError> {
    tokio::task::spawn_blocking(move || split_file_blocking(&config))
        .await
        .map_err(|e| SplitError::Internal(format!("Task join error: {}", e)))?
}

/// Blocking implementation of [`split_file`].
///
/// # Errors
///
/// Returns `SplitError::SourceOpen` if the source cannot be opened, and any
/// error of [`split_reader`].
pub fn split_file_blocking(config: &SplitConfig) -> Result<SplitSummary, SplitError> {
    let file = open_source(&config.source)?;
    split_reader(BufReader::new(file), config)
}

fn open_source(path: &Path) -> Result<File, SplitError> {
    File::open(path).map_err(|e| SplitError::SourceOpen {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Splits the CSV data read from `source` according to `config`.
///
/// `config.source` is not consulted. Rows are written in input order; each
/// output file starts with the (possibly reduced) header. Files opened
/// before an error are flushed and closed but not removed.
///
/// # Errors
///
/// - `SplitError::InvalidConfig` if `config` fails [`SplitConfig::validate`]
/// - `SplitError::EmptySource` if there is no header row
/// - `SplitError::ColumnNotFound` if a split column is missing from the
///   header; no output file is created in that case
/// - `SplitError::SourceRead` if a row fails to parse
/// - `SplitError::DestinationOpen` / `SplitError::Write` on output failures
pub fn split_reader<R: Read>(source: R, config: &SplitConfig) -> Result<SplitSummary, SplitError> {
    config.validate()?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(false)
        .delimiter(config.separator)
        .from_reader(source);

    let header = read_header(&mut reader)?;
    let split_indexes = resolve_split_indexes(&header, &config.columns)?;

    let template = OutputTemplate::new(config.template()?);
    if !template.has_marker() {
        tracing::warn!(
            template = template.as_str(),
            "Output template has no {{suffix}} marker; all rows go to one file"
        );
    }

    let mask = ColumnMask::for_split(&split_indexes, config.preserve_columns);

    tracing::info!(
        columns = ?config.columns,
        split_indexes = ?split_indexes,
        preserve_columns = config.preserve_columns,
        "Starting CSV split"
    );

    let mut table = WriterTable::new(mask.apply(&header), config.separator);
    let mut record = StringRecord::new();
    let mut total_rows: u64 = 0;

    // Any early return drops `table`, which releases every open file.
    while reader.read_record(&mut record)? {
        let suffix = record_suffix(&header, &record, &split_indexes);
        let path = template.render(&suffix);

        table.write(&path, &suffix, &mask.apply(&record))?;
        total_rows += 1;
    }

    let outputs = table.close()?;

    tracing::info!(
        total_rows,
        file_count = outputs.len(),
        "CSV split complete"
    );

    Ok(SplitSummary { outputs, total_rows })
}
