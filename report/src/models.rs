use std::{fs::File, io, path::Path};

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

use crate::error::{ReportError, Result};

pub const MATRIX_SIZE: &str = "MatrixSize";
pub const SPARSITY: &str = "Sparsity";
pub const MATRIX_TYPE: &str = "MatrixType";
pub const OPTIMIZATION: &str = "Optimization";
pub const TIME: &str = "Time(s)";
pub const CACHE_MISSES: &str = "CacheMisses";

/// A single measured run of a matrix multiplication benchmark.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkRecord {
    /// Dimension N of the N x N operands.
    pub matrix_size: u32,
    /// Percentage of zero entries, 0.0 for dense operands.
    pub sparsity: f64,
    pub matrix_type: String,
    pub optimization: String,
    /// Elapsed wall time in seconds.
    pub time_secs: f64,
    pub cache_misses: Option<u64>,
}

/// Positions of the known columns within a CSV header.
#[derive(Debug, Clone, Copy)]
struct Columns {
    matrix_size: usize,
    sparsity: usize,
    matrix_type: usize,
    optimization: usize,
    time: usize,
    cache_misses: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|header| header == name);
        let require = |column: &'static str| find(column).ok_or(ReportError::MissingColumn { column });

        Ok(Columns {
            matrix_size: require(MATRIX_SIZE)?,
            sparsity: require(SPARSITY)?,
            matrix_type: require(MATRIX_TYPE)?,
            optimization: require(OPTIMIZATION)?,
            time: require(TIME)?,
            cache_misses: find(CACHE_MISSES),
        })
    }
}

impl BenchmarkRecord {
    /// Parse and coerce a CSV record using the resolved column positions.
    fn from_csv_record(record: &StringRecord, columns: &Columns, row: usize) -> Result<Self> {
        let field = |index: usize| record.get(index).unwrap_or_default();
        let invalid = |column: &'static str, index: usize| ReportError::InvalidValue {
            row,
            column,
            value: field(index).to_string(),
        };

        let matrix_size = parse_matrix_size(field(columns.matrix_size))
            .ok_or_else(|| invalid(MATRIX_SIZE, columns.matrix_size))?;
        let time_secs =
            parse_time(field(columns.time)).ok_or_else(|| invalid(TIME, columns.time))?;

        let raw_sparsity = field(columns.sparsity);
        let sparsity = coerce_sparsity(raw_sparsity);
        if sparsity == 0.0 && !raw_sparsity.is_empty() && raw_sparsity.parse::<f64>() != Ok(0.0) {
            debug!(row, value = raw_sparsity, "sparsity defaulted to 0.0");
        }

        let cache_misses = columns.cache_misses.and_then(|index| {
            let raw = field(index);
            let parsed = parse_count(raw);
            if parsed.is_none() && !raw.is_empty() {
                debug!(row, value = raw, "ignoring unparseable cache miss count");
            }
            parsed
        });

        Ok(BenchmarkRecord {
            matrix_size,
            sparsity,
            matrix_type: field(columns.matrix_type).to_string(),
            optimization: field(columns.optimization).to_string(),
            time_secs,
            cache_misses,
        })
    }
}

/// Integer text, or float text truncated toward zero. Sizes must be positive.
fn parse_matrix_size(value: &str) -> Option<u32> {
    if let Ok(size) = value.parse::<u32>() {
        return (size > 0).then_some(size);
    }
    let size = value.parse::<f64>().ok()?.trunc();
    (size.is_finite() && size >= 1.0 && size <= f64::from(u32::MAX)).then_some(size as u32)
}

/// Anything that isn't a finite, positive number is a dense matrix.
fn coerce_sparsity(value: &str) -> f64 {
    match value.parse::<f64>() {
        Ok(sparsity) if sparsity.is_finite() && sparsity > 0.0 => sparsity,
        _ => 0.0,
    }
}

fn parse_time(value: &str) -> Option<f64> {
    let time = value.parse::<f64>().ok()?;
    (time.is_finite() && time >= 0.0).then_some(time)
}

fn parse_count(value: &str) -> Option<u64> {
    if let Ok(count) = value.parse::<u64>() {
        return Some(count);
    }
    let count = value.parse::<f64>().ok()?.trunc();
    (count.is_finite() && count >= 0.0 && count <= u64::MAX as f64).then_some(count as u64)
}

/// The benchmark results table, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<BenchmarkRecord>,
    has_cache_misses: bool,
}

impl Dataset {
    pub fn new(records: Vec<BenchmarkRecord>, has_cache_misses: bool) -> Self {
        Self {
            records,
            has_cache_misses,
        }
    }

    /// Load and coerce the results table at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::NotFound`] if the file is missing, and a parse
    /// error if a required column is absent or a cell can't be coerced.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ReportError::NotFound {
                path: path.to_path_buf(),
            },
            _ => ReportError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let dataset = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            rows = dataset.records().len(),
            "loaded benchmark results"
        );
        Ok(dataset)
    }

    /// Parse a results table from any CSV source.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
        let columns = Columns::from_headers(reader.headers()?)?;

        let mut records = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            // header occupies line 1.
            let row = record
                .position()
                .map_or(index + 2, |position| position.line() as usize);
            records.push(BenchmarkRecord::from_csv_record(&record, &columns, row)?);
        }

        Ok(Self::new(records, columns.cache_misses.is_some()))
    }

    pub fn records(&self) -> &[BenchmarkRecord] {
        &self.records
    }

    /// Whether the source table carried a `CacheMisses` column.
    pub fn has_cache_misses(&self) -> bool {
        self.has_cache_misses
    }

    /// Rows matching `predicate`, in file order.
    pub fn select<P>(&self, mut predicate: P) -> Vec<&BenchmarkRecord>
    where
        P: FnMut(&BenchmarkRecord) -> bool,
    {
        self.records.iter().filter(|&record| predicate(record)).collect()
    }

    /// Distinct matrix sizes, ascending.
    pub fn matrix_sizes(&self) -> Vec<u32> {
        let mut sizes: Vec<u32> = self.records.iter().map(|r| r.matrix_size).collect();
        sizes.sort_unstable();
        sizes.dedup();
        sizes
    }

    /// Distinct sparsity levels, ascending.
    pub fn sparsity_levels(&self) -> Vec<f64> {
        let mut levels: Vec<f64> = self.records.iter().map(|r| r.sparsity).collect();
        levels.sort_by(f64::total_cmp);
        levels.dedup();
        levels
    }

    /// Distinct matrix types in order of first appearance.
    pub fn matrix_types(&self) -> Vec<&str> {
        crate::series::distinct(self.records.iter().map(|r| r.matrix_type.as_str()))
    }

    /// First row, in file order, measured at `matrix_size` and `sparsity`.
    pub fn first_match(&self, matrix_size: u32, sparsity: f64) -> Option<&BenchmarkRecord> {
        self.records
            .iter()
            .find(|r| r.matrix_size == matrix_size && r.sparsity == sparsity)
    }
}
