//! Splits a delimited text file into one file per distinct value of one or
//! more columns.

pub mod cli;
pub mod config;
pub mod error;
pub mod splitter;

pub use config::SplitConfig;
pub use error::{ErrorPresentation, SplitError};
pub use splitter::{split_file, split_file_blocking, split_reader, ShardOutput, SplitSummary};
