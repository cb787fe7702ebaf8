use anyhow::Context;
use matmul_report::{renderer::DENSE_DENSE, Rendered};
use matmul_report_config::ReportConfig;

use super::{load_renderer, plot::log_rendered};

/// Size compared in the optimization bar charts.
const BAR_MATRIX_SIZE: u32 = 1000;
const BAR_SPARSITY: f64 = 0.01;
const SCATTER_MATRIX_TYPE: &str = "sparse-sparse";

/// Render every chart in report order, against the configured table.
pub fn handle_command(config: &ReportConfig) -> anyhow::Result<()> {
    let mut renderer = load_renderer(config)?;
    let path = &config.data_path;
    let mut rendered = Rendered::default();

    let mut record = |step: Rendered| rendered.merge(step);

    record(
        renderer
            .plot_sparsity_performance(path)
            .with_context(|| format!("failed to plot {}", path.display()))?,
    );
    record(
        renderer
            .analyze_performance(path)
            .with_context(|| format!("failed to analyze {}", path.display()))?
            .rendered,
    );
    record(renderer.plot_execution_time_line(DENSE_DENSE)?);
    record(renderer.plot_bar_optimizations(BAR_MATRIX_SIZE, Some(BAR_SPARSITY))?);
    record(renderer.plot_bar_optimizations(BAR_MATRIX_SIZE, None)?);
    record(renderer.plot_cache_misses_vs_time(SCATTER_MATRIX_TYPE)?);

    log_rendered("all", &rendered);
    Ok(())
}
