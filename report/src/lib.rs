//! Charts for matrix multiplication benchmark results.
//!
//! A results table (`MatrixSize, Sparsity, MatrixType, Optimization, Time(s),
//! CacheMisses`) is loaded into a [`Dataset`], and a [`ReportRenderer`] turns
//! it into line, bar and scatter charts that are handed to a [`ChartSurface`].
//!
//! ```no_run
//! use matmul_report::{surface::Browser, ReportRenderer};
//!
//! let mut renderer = ReportRenderer::load("performance_results.csv", Browser)?;
//! renderer.plot_execution_time_line("dense-dense")?;
//! renderer.plot_bar_optimizations(1000, Some(0.01))?;
//! # Ok::<(), matmul_report::ReportError>(())
//! ```

pub mod chart;
pub mod error;
pub mod models;
pub mod renderer;
pub mod series;
pub mod summary;
pub mod surface;

mod utils;

pub use chart::{Chart, ChartKind};
pub use error::{ReportError, Result};
pub use models::{BenchmarkRecord, Dataset};
pub use renderer::{Analysis, ReportRenderer, Rendered};
pub use summary::{MeanTime, MeanTimeSummary};
pub use surface::ChartSurface;
