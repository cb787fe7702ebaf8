use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use matmul_report_config::ReportConfig;

use super::{empty_renderer, plot::log_rendered};

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Results table to read. Defaults to the configured table.
    #[arg(long, value_name = "PATH")]
    pub path: Option<PathBuf>,
}

pub fn handle_command(args: AnalyzeArgs, config: &ReportConfig) -> anyhow::Result<()> {
    let path = args.path.unwrap_or_else(|| config.data_path.clone());

    let analysis = empty_renderer(config)
        .analyze_performance(&path)
        .with_context(|| format!("failed to analyze {}", path.display()))?;
    log_rendered("analyze", &analysis.rendered);
    Ok(())
}
