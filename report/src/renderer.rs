use std::path::Path;

use tracing::{debug, warn};

use crate::{
    chart::{self, Chart},
    error::{ReportError, Result},
    models::{Dataset, CACHE_MISSES},
    series::{cache_scatter, sparsity_series, time_lines, GroupedBars, OPTIMIZATION_ORDER},
    summary::MeanTimeSummary,
    surface::{Browser, ChartSurface},
    utils::{capitalize, fmt_sparsity, Tracker},
};

/// (matrix size, sparsity) pairs compared per matrix type by [`ReportRenderer::analyze_performance`].
pub const ANALYSIS_SCENARIOS: [(u32, f64); 2] = [(1000, 1.0), (10000, 0.1)];

/// Matrix type compared when no sparsity level is requested.
pub const DENSE_DENSE: &str = "dense-dense";

/// Default max/min ratio above which a chart switches to log scale.
pub const DEFAULT_LOG_RATIO: f64 = 10.0;

/// What a plot operation did: charts handed to the surface, and notices for
/// combinations that had no data.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Rendered {
    pub charts: usize,
    pub notices: Vec<String>,
}

impl Rendered {
    fn notice(&mut self, notice: String) {
        warn!("{notice}");
        self.notices.push(notice);
    }

    /// Fold the outcome of a later operation into this one.
    pub fn merge(&mut self, other: Rendered) {
        self.charts += other.charts;
        self.notices.extend(other.notices);
    }
}

/// Result of [`ReportRenderer::analyze_performance`].
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub rendered: Rendered,
    pub summary: MeanTimeSummary,
}

/// Answers charting requests against a loaded results table.
pub struct ReportRenderer<S = Browser> {
    data: Dataset,
    surface: S,
    log_ratio: f64,
}

impl<S: ChartSurface> ReportRenderer<S> {
    pub fn new(data: Dataset, surface: S) -> Self {
        Self {
            data,
            surface,
            log_ratio: DEFAULT_LOG_RATIO,
        }
    }

    /// Load the results table at `path` and render onto `surface`.
    pub fn load(path: impl AsRef<Path>, surface: S) -> Result<Self> {
        Ok(Self::new(Dataset::load(path)?, surface))
    }

    #[must_use]
    pub fn with_log_ratio(mut self, log_ratio: f64) -> Self {
        self.log_ratio = log_ratio;
        self
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn present(&mut self, chart: Chart, rendered: &mut Rendered) -> Result<()> {
        debug!(kind = %chart.kind, title = %chart.title, "presenting chart");
        self.surface.present(chart)?;
        rendered.charts += 1;
        Ok(())
    }

    /// Reload the table at `path` and plot execution time against matrix size,
    /// one line per sparsity level.
    pub fn plot_sparsity_performance(&mut self, path: impl AsRef<Path>) -> Result<Rendered> {
        let data = Dataset::load(path)?;

        let mut rendered = Rendered::default();
        let (series, notices) = sparsity_series(&data);
        for notice in notices {
            rendered.notice(notice);
        }

        self.present(chart::sparsity_performance(&series), &mut rendered)?;
        Ok(rendered)
    }

    /// Reload the table at `path`, chart each matrix type for every analysis
    /// scenario, print the mean time per (matrix type, optimization) and chart
    /// the whole table.
    pub fn analyze_performance(&mut self, path: impl AsRef<Path>) -> Result<Analysis> {
        let data = Dataset::load(path)?;
        let mut rendered = Rendered::default();

        for (matrix_size, sparsity) in ANALYSIS_SCENARIOS {
            rendered.merge(self.compare_matrix_types(&data, matrix_size, sparsity)?);
        }

        let summary = MeanTimeSummary::from_records(data.records());
        println!("\nAverage Time by Matrix Type and Optimization:");
        println!("{summary}");

        let all = data.select(|_| true);
        let bars = GroupedBars::by_matrix_type(&all, Some(&OPTIMIZATION_ORDER[..]));
        let chart = chart::optimization_bars(
            "Performance Comparison Across All Matrix Types and Optimizations",
            &bars,
            false,
        );
        self.present(chart, &mut rendered)?;

        Ok(Analysis { rendered, summary })
    }

    /// One bar chart per matrix type measured at `matrix_size` and `sparsity`.
    fn compare_matrix_types(
        &mut self,
        data: &Dataset,
        matrix_size: u32,
        sparsity: f64,
    ) -> Result<Rendered> {
        let mut rendered = Rendered::default();

        for matrix_type in data.matrix_types() {
            let subset = data.select(|r| {
                r.matrix_size == matrix_size && r.sparsity == sparsity && r.matrix_type == matrix_type
            });
            if subset.is_empty() {
                rendered.notice(format!(
                    "No data found for {matrix_type} with size {matrix_size} and sparsity {}%",
                    fmt_sparsity(sparsity)
                ));
                continue;
            }

            let title = format!(
                "{} - Size: {matrix_size}, Sparsity: {}%",
                capitalize(matrix_type),
                fmt_sparsity(sparsity)
            );
            let bars = GroupedBars::by_matrix_type(&subset, Some(&OPTIMIZATION_ORDER[..]));
            self.present(chart::optimization_bars(&title, &bars, false), &mut rendered)?;
        }

        Ok(rendered)
    }

    /// Plot mean execution time against matrix size for `matrix_type`, one line
    /// per optimization.
    pub fn plot_execution_time_line(&mut self, matrix_type: &str) -> Result<Rendered> {
        let mut rendered = Rendered::default();

        let subset = self.data.select(|r| r.matrix_type == matrix_type);
        if subset.is_empty() {
            rendered.notice(format!("No data available for matrix type: {matrix_type}"));
            return Ok(rendered);
        }

        let times: Tracker = subset.iter().map(|r| r.time_secs).collect();
        let log_time = times.spread_exceeds(self.log_ratio);
        let chart = chart::execution_time_lines(matrix_type, &time_lines(&subset), log_time);

        self.present(chart, &mut rendered)?;
        Ok(rendered)
    }

    /// Bar chart of execution time by optimization at `matrix_size`.
    ///
    /// Without a sparsity level only dense-dense rows are compared.
    pub fn plot_bar_optimizations(
        &mut self,
        matrix_size: u32,
        sparsity: Option<f64>,
    ) -> Result<Rendered> {
        let mut rendered = Rendered::default();

        let (subset, suffix) = match sparsity {
            Some(sparsity) => (
                self.data
                    .select(|r| r.matrix_size == matrix_size && r.sparsity == sparsity),
                format!("Sparsity={}", fmt_sparsity(sparsity)),
            ),
            None => (
                self.data
                    .select(|r| r.matrix_size == matrix_size && r.matrix_type == DENSE_DENSE),
                "Dense-Dense Only".to_string(),
            ),
        };

        if subset.is_empty() {
            let sparsity = sparsity.map_or_else(|| "None".to_string(), fmt_sparsity);
            rendered.notice(format!(
                "No data available for Matrix Size={matrix_size}, Sparsity={sparsity}"
            ));
            return Ok(rendered);
        }

        let title = format!("Optimization Comparison (Size={matrix_size}, {suffix})");
        let bars = GroupedBars::by_matrix_type(&subset, None);
        let chart = chart::optimization_bars(&title, &bars, true);

        self.present(chart, &mut rendered)?;
        Ok(rendered)
    }

    /// Scatter of cache misses against execution time for `matrix_type`.
    ///
    /// # Errors
    ///
    /// Fails with [`ReportError::MissingColumn`] when the table has no
    /// `CacheMisses` column.
    pub fn plot_cache_misses_vs_time(&mut self, matrix_type: &str) -> Result<Rendered> {
        if !self.data.has_cache_misses() {
            return Err(ReportError::MissingColumn {
                column: CACHE_MISSES,
            });
        }

        let mut rendered = Rendered::default();

        let subset = self.data.select(|r| r.matrix_type == matrix_type);
        if subset.is_empty() {
            rendered.notice(format!("No data available for matrix type: {matrix_type}"));
            return Ok(rendered);
        }

        let series = cache_scatter(&subset);
        if series.is_empty() {
            rendered.notice(format!(
                "No cache miss counts recorded for matrix type: {matrix_type}"
            ));
            return Ok(rendered);
        }

        let cache_misses: Tracker = series
            .iter()
            .flat_map(|s| s.points.iter())
            .map(|p| p.cache_misses as f64)
            .collect();
        let log_axes = cache_misses.spread_exceeds(self.log_ratio);
        let chart = chart::cache_misses_scatter(matrix_type, &series, log_axes);

        self.present(chart, &mut rendered)?;
        Ok(rendered)
    }
}
