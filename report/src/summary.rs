use std::{collections::BTreeMap, fmt};

use tabled::{settings::Style, Table, Tabled};

use crate::{models::BenchmarkRecord, utils::Tracker};

/// Mean execution time of one (matrix type, optimization) pair.
#[derive(Debug, Clone, PartialEq, Tabled)]
pub struct MeanTime {
    #[tabled(rename = "MatrixType")]
    pub matrix_type: String,
    #[tabled(rename = "Optimization")]
    pub optimization: String,
    #[tabled(rename = "Time(s)", display_with = "fmt_secs")]
    pub mean_secs: f64,
    #[tabled(skip)]
    pub runs: usize,
}

fn fmt_secs(secs: &f64) -> String {
    format!("{secs:.6}")
}

/// Mean execution time grouped by matrix type and optimization, sorted by key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeanTimeSummary {
    rows: Vec<MeanTime>,
}

impl MeanTimeSummary {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a BenchmarkRecord>) -> Self {
        let mut groups: BTreeMap<(&str, &str), Tracker> = BTreeMap::new();
        for record in records {
            groups
                .entry((record.matrix_type.as_str(), record.optimization.as_str()))
                .or_default()
                .update(record.time_secs);
        }

        let rows = groups
            .into_iter()
            .map(|((matrix_type, optimization), tracker)| MeanTime {
                matrix_type: matrix_type.to_string(),
                optimization: optimization.to_string(),
                mean_secs: tracker.avg,
                runs: tracker.ct,
            })
            .collect();

        Self { rows }
    }

    pub fn rows(&self) -> &[MeanTime] {
        &self.rows
    }

    pub fn mean(&self, matrix_type: &str, optimization: &str) -> Option<f64> {
        self.rows
            .iter()
            .find(|row| row.matrix_type == matrix_type && row.optimization == optimization)
            .map(|row| row.mean_secs)
    }
}

impl fmt::Display for MeanTimeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = Table::new(&self.rows);
        table.with(Style::markdown());
        write!(f, "{table}")
    }
}
