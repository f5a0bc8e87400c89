//! Registry of open output files, keyed by destination path.
//!
//! Destinations are opened lazily, receive their header on creation and
//! stay open for the whole scan. The table owns every file it opens and
//! releases all of them exactly once, either through `close()` or on drop.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use csv::{StringRecord, Writer, WriterBuilder};
use serde::Serialize;

use crate::error::SplitError;

/// One output file produced by a split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShardOutput {
    /// Path of the written file.
    pub path: PathBuf,
    /// Suffix substituted into the template for this file.
    pub suffix: String,
    /// Data rows written (header excluded).
    pub rows: u64,
}

/// Open destination with its running state.
struct ShardWriter {
    writer: Writer<BufWriter<File>>,
    output: ShardOutput,
}

impl ShardWriter {
    /// Creates or truncates `path` and writes `header` as its first row.
    fn open(
        path: &Path,
        suffix: &str,
        header: &StringRecord,
        separator: u8,
    ) -> Result<Self, SplitError> {
        let file = File::create(path).map_err(|e| SplitError::DestinationOpen {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut writer = WriterBuilder::new()
            .delimiter(separator)
            .from_writer(BufWriter::new(file));

        writer
            .write_record(header)
            .map_err(|e| SplitError::write(path, e))?;

        Ok(Self {
            writer,
            output: ShardOutput {
                path: path.to_path_buf(),
                suffix: suffix.to_string(),
                rows: 0,
            },
        })
    }

    fn write(&mut self, record: &StringRecord) -> Result<(), SplitError> {
        self.writer
            .write_record(record)
            .map_err(|e| SplitError::write(&self.output.path, e))?;
        self.output.rows += 1;
        Ok(())
    }

    /// Flushes buffered rows and syncs the file to disk.
    fn finish(mut self) -> Result<ShardOutput, SplitError> {
        self.writer.flush().map_err(|e| SplitError::Write {
            path: self.output.path.clone(),
            source: e,
        })?;

        self.writer
            .get_ref()
            .get_ref()
            .sync_all()
            .map_err(|e| SplitError::Write {
                path: self.output.path.clone(),
                source: e,
            })?;

        Ok(self.output)
    }
}

/// Mapping from destination path to its open writer.
///
/// Grows monotonically during a scan. Every registered destination has
/// already received the header row.
pub struct WriterTable {
    header: StringRecord,
    separator: u8,
    slots: HashMap<PathBuf, usize>,
    // Kept in order of first appearance.
    shards: Vec<ShardWriter>,
}

impl WriterTable {
    /// Creates an empty table. `header` is written first to every destination.
    pub fn new(header: StringRecord, separator: u8) -> Self {
        Self {
            header,
            separator,
            slots: HashMap::new(),
            shards: Vec::new(),
        }
    }

    /// Number of open destinations.
    pub fn len(&self) -> usize {
        self.shards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.is_empty()
    }

    /// Appends `record` to `path`, opening the destination on first use.
    ///
    /// # Errors
    ///
    /// Returns `SplitError::DestinationOpen` if the file cannot be created,
    /// or `SplitError::Write` if the header or row cannot be written.
    pub fn write(
        &mut self,
        path: &Path,
        suffix: &str,
        record: &StringRecord,
    ) -> Result<(), SplitError> {
        let slot = match self.slots.get(path) {
            Some(&slot) => slot,
            None => {
                let shard = ShardWriter::open(path, suffix, &self.header, self.separator)?;
                tracing::debug!(path = %path.display(), suffix, "Opened output file");

                self.shards.push(shard);
                let slot = self.shards.len() - 1;
                self.slots.insert(path.to_path_buf(), slot);
                slot
            }
        };

        self.shards[slot].write(record)
    }

    /// Flushes and closes every destination, reporting each in order of
    /// first appearance.
    ///
    /// All destinations are released even if one of them fails; the first
    /// failure is returned.
    pub fn close(mut self) -> Result<Vec<ShardOutput>, SplitError> {
        let mut outputs = Vec::with_capacity(self.shards.len());
        let mut first_error = None;

        for shard in self.shards.drain(..) {
            match shard.finish() {
                Ok(output) => outputs.push(output),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to close output file");
                    first_error.get_or_insert(e);
                }
            }
        }
        self.slots.clear();

        match first_error {
            Some(e) => Err(e),
            None => Ok(outputs),
        }
    }
}

impl Drop for WriterTable {
    fn drop(&mut self) {
        // Reached with open shards only when a scan aborted.
        for shard in self.shards.drain(..) {
            let path = shard.output.path.clone();
            if let Err(e) = shard.finish() {
                tracing::warn!(path = %path.display(), error = %e, "Failed to release output file");
            }
        }
    }
}
