//! Command-line arguments and output rendering for the `csv-splitter` binary.

use std::path::PathBuf;

use clap::Parser;

use crate::config::SplitConfig;
use crate::error::SplitError;
use crate::splitter::SplitSummary;

/// Splits a CSV file into small files for each unique column value.
#[derive(Parser, Debug)]
#[command(name = "csv-splitter", version, about, long_about = None)]
pub struct Args {
    /// Source CSV/TSV file.
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub file: PathBuf,

    /// Output directory to store output files [default: current directory].
    #[arg(short = 'd', long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Columns whose values are used to split the file. Multiple columns are
    /// joined with the same separator as the file.
    #[arg(short = 'c', long = "columns", value_name = "NAMES")]
    pub columns: String,

    /// Source CSV/TSV column separator. Only the first character is used;
    /// `\t` is accepted for tab.
    #[arg(short = 's', long = "separator", default_value = ",")]
    pub separator: String,

    /// Whether the split columns should be written to the output files.
    #[arg(long = "preserve-columns")]
    pub preserve_columns: bool,

    /// Output path template; `{suffix}` is replaced by the column values.
    /// Overrides --output-dir.
    #[arg(short = 't', long = "template", value_name = "TEMPLATE")]
    pub template: Option<String>,

    /// Print the result as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

impl Args {
    /// Turns the parsed arguments into a validated `SplitConfig`.
    ///
    /// Without `--output-dir`, outputs go to the current working directory.
    ///
    /// # Errors
    ///
    /// Returns `SplitError::InvalidConfig` for a bad separator, a missing
    /// output directory, or an invalid column list.
    pub fn into_config(self) -> Result<SplitConfig, SplitError> {
        let separator = parse_separator(&self.separator)?;

        let columns: Vec<String> = self
            .columns
            .split(char::from(separator))
            .map(str::to_string)
            .collect();

        let output_dir = match self.output_dir {
            Some(dir) => dir,
            None => std::env::current_dir().map_err(|e| {
                SplitError::InvalidConfig(format!("cannot determine working directory: {}", e))
            })?,
        };
        if !output_dir.is_dir() {
            return Err(SplitError::InvalidConfig(format!(
                "output directory {} does not exist",
                output_dir.display()
            )));
        }

        let mut config = SplitConfig::new(self.file, columns)
            .separator(separator)
            .preserve_columns(self.preserve_columns)
            .output_dir(output_dir);

        if let Some(template) = self.template {
            config = config.output_template(template);
        }

        config.validate()?;
        Ok(config)
    }
}

/// Parses the separator argument into a single ASCII byte.
pub fn parse_separator(raw: &str) -> Result<u8, SplitError> {
    if raw == "\\t" {
        return Ok(b'\t');
    }

    match raw.chars().next() {
        Some(c) if c.is_ascii() => Ok(c as u8),
        Some(c) => Err(SplitError::InvalidConfig(format!(
            "separator {:?} is not a single ASCII character",
            c
        ))),
        None => Err(SplitError::InvalidConfig(
            "separator must not be empty".to_string(),
        )),
    }
}

/// Human-readable run report.
pub fn render_summary(summary: &SplitSummary) -> String {
    let mut out = format!(
        "Wrote {} rows into {} files\n",
        summary.total_rows,
        summary.outputs.len()
    );
    for output in &summary.outputs {
        out.push_str(&format!("  {} ({} rows)\n", output.path.display(), output.rows));
    }
    out
}

/// Human-readable error report.
pub fn render_error(err: &SplitError) -> String {
    let presentation = err.to_presentation();
    match presentation.action {
        Some(action) => format!(
            "error: {}: {}\n  hint: {}\n",
            presentation.title, presentation.message, action
        ),
        None => format!("error: {}: {}\n", presentation.title, presentation.message),
    }
}
