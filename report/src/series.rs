//! Chart-ready series derived from the results table.
//!
//! Everything here is pure: grouping, first-match lookup and averaging. The
//! notices produced for missing combinations are returned to the caller.

use std::collections::HashMap;

use crate::{
    models::{BenchmarkRecord, Dataset},
    utils::{fmt_sparsity, Tracker},
};

/// Canonical optimization order on bar chart axes.
pub const OPTIMIZATION_ORDER: [&str; 5] = ["Native", "Multi-threading", "SIMD", "Cache", "All"];

/// Distinct items in order of first appearance.
pub fn distinct<T: PartialEq>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut seen = Vec::new();
    for item in items {
        if !seen.contains(&item) {
            seen.push(item);
        }
    }
    seen
}

/// Execution times at one sparsity level, one point per matrix size.
#[derive(Debug, Clone, PartialEq)]
pub struct SparsitySeries {
    pub sparsity: f64,
    /// (matrix size, time in seconds), sizes ascending.
    pub points: Vec<(u32, f64)>,
}

impl SparsitySeries {
    pub fn label(&self) -> String {
        format!("{}% Sparsity", fmt_sparsity(self.sparsity))
    }
}

/// One series per sparsity level over every matrix size in the table.
///
/// Each point is the first row measured at that (size, sparsity); sizes
/// without a measurement are skipped and reported as a notice.
pub fn sparsity_series(data: &Dataset) -> (Vec<SparsitySeries>, Vec<String>) {
    let sizes = data.matrix_sizes();
    let mut notices = Vec::new();

    let series = data
        .sparsity_levels()
        .into_iter()
        .map(|sparsity| {
            let mut points = Vec::with_capacity(sizes.len());
            for &size in &sizes {
                match data.first_match(size, sparsity) {
                    Some(record) => points.push((size, record.time_secs)),
                    None => notices.push(format!(
                        "No data for Matrix Size={size}, Sparsity={}",
                        fmt_sparsity(sparsity)
                    )),
                }
            }
            SparsitySeries { sparsity, points }
        })
        .collect();

    (series, notices)
}

/// Mean execution time per category for one group of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct BarGroup {
    pub label: String,
    /// Aligned with [`GroupedBars::categories`]; `None` where the group has no rows.
    pub means: Vec<Option<f64>>,
}

/// Bars of mean execution time by optimization, one group per matrix type.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedBars {
    pub categories: Vec<String>,
    pub groups: Vec<BarGroup>,
}

impl GroupedBars {
    /// Group `records` by matrix type and average time per optimization.
    ///
    /// With an `order`, the categories are exactly that list and rows with any
    /// other optimization are left out. Without one, categories follow first
    /// appearance.
    pub fn by_matrix_type(records: &[&BenchmarkRecord], order: Option<&[&str]>) -> Self {
        let categories: Vec<String> = match order {
            Some(order) => order.iter().map(|s| s.to_string()).collect(),
            None => distinct(records.iter().map(|r| r.optimization.as_str()))
                .into_iter()
                .map(String::from)
                .collect(),
        };

        let mut trackers: HashMap<(&str, &str), Tracker> = HashMap::new();
        for record in records {
            trackers
                .entry((record.matrix_type.as_str(), record.optimization.as_str()))
                .or_default()
                .update(record.time_secs);
        }

        let groups = distinct(records.iter().map(|r| r.matrix_type.as_str()))
            .into_iter()
            .map(|matrix_type| BarGroup {
                label: matrix_type.to_string(),
                means: categories
                    .iter()
                    .map(|category| {
                        trackers
                            .get(&(matrix_type, category.as_str()))
                            .map(|tracker| tracker.avg)
                    })
                    .collect(),
            })
            .filter(|group| group.means.iter().any(Option::is_some))
            .collect();

        GroupedBars { categories, groups }
    }
}

/// Mean execution time by matrix size for one optimization.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub label: String,
    /// (matrix size, mean time in seconds), sizes ascending.
    pub points: Vec<(u32, f64)>,
}

/// One line per optimization, in order of first appearance.
pub fn time_lines(records: &[&BenchmarkRecord]) -> Vec<LineSeries> {
    distinct(records.iter().map(|r| r.optimization.as_str()))
        .into_iter()
        .map(|optimization| {
            let mut by_size: Vec<(u32, Tracker)> = Vec::new();
            for record in records.iter().filter(|r| r.optimization == optimization) {
                match by_size.iter_mut().find(|(size, _)| *size == record.matrix_size) {
                    Some((_, tracker)) => tracker.update(record.time_secs),
                    None => {
                        let tracker = [record.time_secs].into_iter().collect();
                        by_size.push((record.matrix_size, tracker));
                    }
                }
            }
            by_size.sort_unstable_by_key(|(size, _)| *size);

            LineSeries {
                label: optimization.to_string(),
                points: by_size
                    .into_iter()
                    .map(|(size, tracker)| (size, tracker.avg))
                    .collect(),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint {
    pub cache_misses: u64,
    pub time_secs: f64,
    pub matrix_size: u32,
}

/// Cache misses against execution time for one optimization.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub label: String,
    pub points: Vec<ScatterPoint>,
}

/// One scatter series per optimization. Rows without a cache miss count are left out.
pub fn cache_scatter(records: &[&BenchmarkRecord]) -> Vec<ScatterSeries> {
    let measured: Vec<&BenchmarkRecord> = records
        .iter()
        .copied()
        .filter(|r| r.cache_misses.is_some())
        .collect();

    distinct(measured.iter().map(|r| r.optimization.as_str()))
        .into_iter()
        .map(|optimization| ScatterSeries {
            label: optimization.to_string(),
            points: measured
                .iter()
                .filter(|r| r.optimization == optimization)
                .filter_map(|r| {
                    r.cache_misses.map(|cache_misses| ScatterPoint {
                        cache_misses,
                        time_secs: r.time_secs,
                        matrix_size: r.matrix_size,
                    })
                })
                .collect(),
        })
        .collect()
}
