use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use csv_splitter::cli::{render_error, render_summary, Args};
use csv_splitter::{split_file, SplitError, SplitSummary};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let json = args.json;

    match run(args).await {
        Ok(summary) => {
            if json {
                match serde_json::to_string_pretty(&summary) {
                    Ok(out) => println!("{}", out),
                    Err(e) => {
                        eprintln!("error: failed to encode summary: {}", e);
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                print!("{}", render_summary(&summary));
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::debug!(error = ?err, "Split failed");
            if json {
                if let Ok(out) = serde_json::to_string_pretty(&err) {
                    println!("{}", out);
                }
            } else {
                eprint!("{}", render_error(&err));
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<SplitSummary, SplitError> {
    let config = args.into_config()?;
    split_file(config).await
}
