//! # matmul-report
//!
//! Command-line charts for matrix multiplication benchmark results.
//!
//! ## Usage
//! The results table defaults to `performance_results.csv` in the working
//! directory, see `MATMUL_REPORT_DATA_PATH`.
//!
//! ```sh
//! matmul-report all
//! matmul-report line dense-dense
//! matmul-report bar 1000 --sparsity 0.01
//! matmul-report --headless analyze --path results/run-3.csv
//! ```
//!
//! Diagnostics go to stderr, filtered by `RUST_LOG` (default `warn`).

use std::path::PathBuf;

use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod command;

pub const LOG_TARGET: &str = "matmul-report";

#[derive(Debug, Parser)]
#[command(name = "matmul-report", bin_name = "matmul-report")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Results table loaded at start. Overrides MATMUL_REPORT_DATA_PATH.
    #[arg(long, global = true, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Log charts instead of opening them in a browser.
    #[arg(long, global = true)]
    pub headless: bool,

    #[command(subcommand)]
    pub command: command::Command,
}

pub fn setup_logger() -> tracing::subscriber::DefaultGuard {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
                .with_ansi(std::io::IsTerminal::is_terminal(&std::io::stderr()))
                .with_writer(std::io::stderr)
                .pretty()
                .with_file(false)
                .with_line_number(false),
        )
        .with(filter)
        .set_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    use command::Command;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_bar_without_sparsity() {
        let cli = Cli::parse_from(["matmul-report", "bar", "1000"]);
        match cli.command {
            Command::Bar(args) => {
                assert_eq!(args.matrix_size, 1000);
                assert_eq!(args.sparsity, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "matmul-report",
            "cache",
            "sparse-sparse",
            "--headless",
            "--data",
            "runs.csv",
        ]);
        assert!(cli.headless);
        assert_eq!(cli.data, Some(PathBuf::from("runs.csv")));
        assert!(matches!(cli.command, Command::Cache(args) if args.matrix_type == "sparse-sparse"));
    }

    #[test]
    fn reject_zero_matrix_size() {
        assert!(Cli::try_parse_from(["matmul-report", "bar", "0"]).is_err());
    }
}
