//! Column-based CSV splitting.
//!
//! Resolves split columns against the header row, then routes every data row
//! into the output file named after its split-column values. Output files are
//! opened lazily and held open until the scan ends.

pub mod columns;
pub mod removal;
pub mod router;
pub mod template;
pub mod writer_table;

pub use columns::{read_header, resolve_split_indexes};
pub use removal::ColumnMask;
pub use router::{split_file, split_file_blocking, split_reader, SplitSummary};
pub use template::{record_suffix, OutputTemplate, SUFFIX_MARKER};
pub use writer_table::{ShardOutput, WriterTable};
