use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use matmul_report::Rendered;
use matmul_report_config::ReportConfig;

use super::{empty_renderer, load_renderer};
use crate::LOG_TARGET;

#[derive(Debug, Args)]
pub struct SparsityArgs {
    /// Results table to read. Defaults to the configured table.
    #[arg(long, value_name = "PATH")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct LineArgs {
    /// Matrix type to chart, e.g. dense-dense.
    #[arg(value_name = "MATRIX_TYPE")]
    pub matrix_type: String,
}

#[derive(Debug, Args)]
pub struct BarArgs {
    /// Matrix dimension N.
    #[arg(value_name = "MATRIX_SIZE", value_parser = clap::value_parser!(u32).range(1..))]
    pub matrix_size: u32,

    /// Sparsity level in percent. Only dense-dense runs are compared when omitted.
    #[arg(long)]
    pub sparsity: Option<f64>,
}

#[derive(Debug, Args)]
pub struct CacheArgs {
    /// Matrix type to chart, e.g. sparse-sparse.
    #[arg(value_name = "MATRIX_TYPE")]
    pub matrix_type: String,
}

pub fn sparsity(args: SparsityArgs, config: &ReportConfig) -> anyhow::Result<()> {
    let path = args.path.unwrap_or_else(|| config.data_path.clone());

    let rendered = empty_renderer(config)
        .plot_sparsity_performance(&path)
        .with_context(|| format!("failed to plot {}", path.display()))?;
    log_rendered("sparsity", &rendered);
    Ok(())
}

pub fn line(args: LineArgs, config: &ReportConfig) -> anyhow::Result<()> {
    let rendered = load_renderer(config)?.plot_execution_time_line(&args.matrix_type)?;
    log_rendered("line", &rendered);
    Ok(())
}

pub fn bar(args: BarArgs, config: &ReportConfig) -> anyhow::Result<()> {
    let rendered =
        load_renderer(config)?.plot_bar_optimizations(args.matrix_size, args.sparsity)?;
    log_rendered("bar", &rendered);
    Ok(())
}

pub fn cache(args: CacheArgs, config: &ReportConfig) -> anyhow::Result<()> {
    let rendered = load_renderer(config)?.plot_cache_misses_vs_time(&args.matrix_type)?;
    log_rendered("cache", &rendered);
    Ok(())
}

pub(crate) fn log_rendered(operation: &str, rendered: &Rendered) {
    tracing::info!(
        target: LOG_TARGET,
        operation,
        charts = rendered.charts,
        notices = rendered.notices.len(),
        "done"
    );
}
