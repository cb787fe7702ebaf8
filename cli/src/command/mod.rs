use anyhow::Context;
use clap::Subcommand;
use matmul_report::{
    surface::{Browser, Headless},
    ChartSurface, Dataset, ReportRenderer,
};
use matmul_report_config::{Config, ReportConfig, SurfaceKind};

use crate::{Cli, LOG_TARGET};

pub mod all;
pub mod analyze;
pub mod plot;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Execution time against matrix size, one line per sparsity level.
    Sparsity(plot::SparsityArgs),
    /// Bar charts per matrix type, mean time summary and an overview chart.
    Analyze(analyze::AnalyzeArgs),
    /// Execution time against matrix size for one matrix type.
    Line(plot::LineArgs),
    /// Execution time by optimization at one matrix size.
    Bar(plot::BarArgs),
    /// Cache misses against execution time for one matrix type.
    Cache(plot::CacheArgs),
    /// Render the full report.
    All,
}

type Renderer = ReportRenderer<Box<dyn ChartSurface>>;

pub fn handle_command(cli: Cli) -> anyhow::Result<()> {
    let Cli {
        data,
        headless,
        command,
    } = cli;

    let mut config = ReportConfig::from_env().context("failed to read configuration")?;
    if let Some(data) = data {
        config.data_path = data;
    }
    if headless {
        config.surface = SurfaceKind::Headless;
    }
    tracing::debug!(
        target: LOG_TARGET,
        data = %config.data_path.display(),
        surface = %config.surface,
        "report configuration"
    );

    match command {
        Command::Sparsity(args) => plot::sparsity(args, &config),
        Command::Analyze(args) => analyze::handle_command(args, &config),
        Command::Line(args) => plot::line(args, &config),
        Command::Bar(args) => plot::bar(args, &config),
        Command::Cache(args) => plot::cache(args, &config),
        Command::All => all::handle_command(&config),
    }
}

fn surface(kind: SurfaceKind) -> Box<dyn ChartSurface> {
    match kind {
        SurfaceKind::Browser => Box::new(Browser),
        SurfaceKind::Headless => Box::new(Headless),
    }
}

/// Renderer over the configured results table.
fn load_renderer(config: &ReportConfig) -> anyhow::Result<Renderer> {
    let renderer = ReportRenderer::load(&config.data_path, surface(config.surface))
        .with_context(|| format!("failed to load {}", config.data_path.display()))?;
    Ok(renderer.with_log_ratio(config.log_ratio))
}

/// Renderer for operations that read their own table.
fn empty_renderer(config: &ReportConfig) -> Renderer {
    ReportRenderer::new(Dataset::default(), surface(config.surface)).with_log_ratio(config.log_ratio)
}
