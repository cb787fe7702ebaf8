use plotly::{
    common::{DashType, Line, Marker, Mode},
    layout::{Axis, AxisType, BarMode, Legend},
    Bar, Layout, Plot, Scatter,
};

use crate::{
    series::{GroupedBars, LineSeries, ScatterSeries, SparsitySeries},
    utils::Tracker,
};

/// Marker diameters for the smallest and largest matrix size on a scatter chart.
const MARKER_SIZE_RANGE: (usize, usize) = (7, 14);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
    Scatter,
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartKind::Line => write!(f, "line"),
            ChartKind::Bar => write!(f, "bar"),
            ChartKind::Scatter => write!(f, "scatter"),
        }
    }
}

/// A finished chart, ready to be presented.
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    pub plot: Plot,
}

impl std::fmt::Debug for Chart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chart")
            .field("kind", &self.kind)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

fn grid_axis(title: &str) -> Axis {
    Axis::new().title(title).show_grid(true)
}

/// Execution time against matrix size, one dashed line per sparsity level.
pub fn sparsity_performance(series: &[SparsitySeries]) -> Chart {
    let title = "Matrix Multiplication Performance with Different Sizes and Sparsity Levels";
    let mut plot = Plot::new();

    for level in series {
        let (sizes, times): (Vec<u32>, Vec<f64>) = level.points.iter().copied().unzip();
        let trace = Scatter::new(sizes, times)
            .name(level.label().as_str())
            .mode(Mode::LinesMarkers)
            .line(Line::new().dash(DashType::Dash));
        plot.add_trace(trace);
    }

    plot.set_layout(
        Layout::new()
            .title(title)
            .x_axis(grid_axis("Matrix Size (N x N)"))
            .y_axis(grid_axis("Time (seconds)"))
            .legend(Legend::new().title("Sparsity")),
    );

    Chart {
        kind: ChartKind::Line,
        title: title.to_string(),
        plot,
    }
}

/// Mean execution time by optimization, one bar group per matrix type.
///
/// `tilt_labels` rotates the optimization labels for long category names.
pub fn optimization_bars(title: &str, bars: &GroupedBars, tilt_labels: bool) -> Chart {
    let mut plot = Plot::new();

    for group in &bars.groups {
        let trace = Bar::new(bars.categories.clone(), group.means.clone()).name(group.label.as_str());
        plot.add_trace(trace);
    }

    let mut x_axis = Axis::new().title("Optimization");
    if tilt_labels {
        x_axis = x_axis.tick_angle(-45.0);
    }

    plot.set_layout(
        Layout::new()
            .title(title)
            .bar_mode(BarMode::Group)
            .x_axis(x_axis)
            .y_axis(grid_axis("Time (seconds)")),
    );

    Chart {
        kind: ChartKind::Bar,
        title: title.to_string(),
        plot,
    }
}

/// Mean execution time against matrix size, one line per optimization.
pub fn execution_time_lines(matrix_type: &str, lines: &[LineSeries], log_time: bool) -> Chart {
    let title = format!("Matrix Multiplication Optimizations: {matrix_type}");
    let mut plot = Plot::new();

    for line in lines {
        let (sizes, times): (Vec<u32>, Vec<f64>) = line.points.iter().copied().unzip();
        let trace = Scatter::new(sizes, times)
            .name(line.label.as_str())
            .mode(Mode::LinesMarkers);
        plot.add_trace(trace);
    }

    let mut y_axis = grid_axis("Time (seconds)");
    if log_time {
        y_axis = y_axis.type_(AxisType::Log);
    }

    plot.set_layout(
        Layout::new()
            .title(title.as_str())
            .x_axis(grid_axis("Matrix Size"))
            .y_axis(y_axis)
            .legend(Legend::new().title("Optimization")),
    );

    Chart {
        kind: ChartKind::Line,
        title,
        plot,
    }
}

/// Cache misses against execution time, one trace per optimization, marker
/// size following matrix size.
pub fn cache_misses_scatter(matrix_type: &str, series: &[ScatterSeries], log_axes: bool) -> Chart {
    let title = format!("Cache Misses vs Time: {matrix_type}");
    let mut plot = Plot::new();

    let sizes: Tracker = series
        .iter()
        .flat_map(|s| s.points.iter())
        .map(|point| f64::from(point.matrix_size))
        .collect();

    for group in series {
        let cache_misses: Vec<u64> = group.points.iter().map(|p| p.cache_misses).collect();
        let times: Vec<f64> = group.points.iter().map(|p| p.time_secs).collect();
        let marker_sizes: Vec<usize> = group
            .points
            .iter()
            .map(|p| marker_size(f64::from(p.matrix_size), &sizes))
            .collect();

        let trace = Scatter::new(cache_misses, times)
            .name(group.label.as_str())
            .mode(Mode::Markers)
            .marker(Marker::new().size_array(marker_sizes));
        plot.add_trace(trace);
    }

    let (x_title, y_title) = if log_axes {
        ("Cache Misses (log scale)", "Time (seconds, log scale)")
    } else {
        ("Cache Misses", "Time (seconds)")
    };
    let mut x_axis = grid_axis(x_title);
    let mut y_axis = grid_axis(y_title);
    if log_axes {
        x_axis = x_axis.type_(AxisType::Log);
        y_axis = y_axis.type_(AxisType::Log);
    }

    plot.set_layout(
        Layout::new()
            .title(title.as_str())
            .x_axis(x_axis)
            .y_axis(y_axis)
            .legend(Legend::new().title("Optimization")),
    );

    Chart {
        kind: ChartKind::Scatter,
        title,
        plot,
    }
}

/// Linear map from the tracked size range onto [`MARKER_SIZE_RANGE`].
fn marker_size(matrix_size: f64, sizes: &Tracker) -> usize {
    let (smallest, largest) = MARKER_SIZE_RANGE;
    let span = sizes.max - sizes.min;
    if span <= 0.0 {
        return largest;
    }
    let scale = (matrix_size - sizes.min) / span;
    smallest + (scale * (largest - smallest) as f64).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::ScatterPoint;
    use serde_json::Value;

    fn to_json(chart: &Chart) -> Value {
        serde_json::from_str(&chart.plot.to_json()).unwrap()
    }

    #[test]
    fn one_trace_per_sparsity_level() {
        let series = vec![
            SparsitySeries {
                sparsity: 0.0,
                points: vec![(1000, 0.5), (2000, 3.0)],
            },
            SparsitySeries {
                sparsity: 1.0,
                points: vec![(1000, 0.1)],
            },
        ];

        let chart = sparsity_performance(&series);
        assert_eq!(chart.kind, ChartKind::Line);

        let json = to_json(&chart);
        let traces = json["data"].as_array().unwrap();
        assert_eq!(traces.len(), 2);
        assert_eq!(traces[0]["name"], "0.0% Sparsity");
        assert_eq!(traces[0]["x"], serde_json::json!([1000, 2000]));
        assert_eq!(traces[1]["y"], serde_json::json!([0.1]));
    }

    #[test]
    fn missing_bars_are_null() {
        let bars = GroupedBars {
            categories: vec!["Native".into(), "SIMD".into()],
            groups: vec![crate::series::BarGroup {
                label: "dense-dense".into(),
                means: vec![None, Some(0.5)],
            }],
        };

        let chart = optimization_bars("bars", &bars, true);
        let json = to_json(&chart);
        assert_eq!(json["data"][0]["y"], serde_json::json!([null, 0.5]));
        assert_eq!(json["layout"]["barmode"], "group");
    }

    #[test]
    fn log_time_axis() {
        let lines = vec![LineSeries {
            label: "Native".into(),
            points: vec![(100, 0.01), (1000, 1.0)],
        }];

        let linear = to_json(&execution_time_lines("dense-dense", &lines, false));
        assert!(linear["layout"]["yaxis"].get("type").is_none());

        let log = to_json(&execution_time_lines("dense-dense", &lines, true));
        assert_eq!(log["layout"]["yaxis"]["type"], "log");
    }

    #[test]
    fn scale_markers_by_size() {
        let sizes: Tracker = [100.0, 1100.0].into_iter().collect();
        assert_eq!(marker_size(100.0, &sizes), 7);
        assert_eq!(marker_size(1100.0, &sizes), 14);
        assert_eq!(marker_size(600.0, &sizes), 11);

        let single: Tracker = [500.0].into_iter().collect();
        assert_eq!(marker_size(500.0, &single), 14);
    }

    #[test]
    fn log_scatter_axes() {
        let series = vec![ScatterSeries {
            label: "Cache".into(),
            points: vec![
                ScatterPoint {
                    cache_misses: 10,
                    time_secs: 0.1,
                    matrix_size: 100,
                },
                ScatterPoint {
                    cache_misses: 10_000,
                    time_secs: 4.0,
                    matrix_size: 1000,
                },
            ],
        }];

        let chart = cache_misses_scatter("sparse-sparse", &series, true);
        assert_eq!(chart.title, "Cache Misses vs Time: sparse-sparse");

        let json = to_json(&chart);
        assert_eq!(json["layout"]["xaxis"]["type"], "log");
        assert_eq!(json["layout"]["yaxis"]["type"], "log");
        assert_eq!(json["data"][0]["marker"]["size"], serde_json::json!([7, 14]));
    }
}
