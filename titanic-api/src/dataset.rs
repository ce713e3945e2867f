//! In-memory Titanic dataset store.
//!
//! The CSV is loaded once at startup and never mutated, so the store can be
//! shared behind an `Arc` by concurrent request handlers without locking.
//! All statistics are computed on demand from the raw columns; nothing is
//! cached.

use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;

use statrs::statistics::{Data, Distribution, Median};
use titanic_common::{Error, Result};

/// A single typed cell value.
///
/// Missing cells (empty CSV fields) are `Null` and are excluded from
/// value counts, distinct counts, and numeric aggregates.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
    Null,
}

impl Value {
    /// Convenience constructor for text values.
    pub fn text(s: &str) -> Self {
        Self::Text(s.to_string())
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Text(s) => write!(f, "{}", s),
            Self::Null => Ok(()),
        }
    }
}

/// Inferred column type.
///
/// A column is `Int`/`Float` when every non-missing cell parses as such;
/// anything else is `Text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Int,
    Float,
    Text,
}

impl ColumnType {
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int | Self::Float)
    }
}

/// A named, typed column of cell values.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub ty: ColumnType,
    pub values: Vec<Value>,
}

/// Per-column statistics, computed on demand.
///
/// `count` is the total row count including missing cells; `distinct` and
/// `top_values` exclude missing cells.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(untagged)]
pub enum ColumnStats {
    Numeric {
        count: usize,
        distinct: usize,
        missing: usize,
        mean: f64,
        median: f64,
        std_dev: f64,
        min: f64,
        max: f64,
    },
    Categorical {
        count: usize,
        distinct: usize,
        missing: usize,
        /// Up to 10 most frequent values with counts, ties broken by
        /// first-seen order in the source.
        top_values: Vec<(String, usize)>,
    },
}

/// The immutable in-memory dataset.
#[derive(Debug)]
pub struct Dataset {
    columns: Vec<Column>,
    rows: usize,
}

impl Dataset {
    /// Load the dataset from a CSV file.
    ///
    /// Fails with `Error::DataNotFound` when the file is absent and
    /// `Error::EmptyDataset` when it contains a header but no rows. Both
    /// are fatal at startup: the service refuses to serve without data.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::DataNotFound(path.to_path_buf()));
        }

        let file = File::open(path)?;
        let dataset = Self::from_reader(file)?;

        tracing::info!(
            rows = dataset.row_count(),
            columns = dataset.columns.len(),
            path = %path.display(),
            "Loaded Titanic dataset"
        );

        Ok(dataset)
    }

    /// Build the dataset from any CSV reader. Seam used by tests.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut raw_columns: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        for record in csv_reader.records() {
            let record = record?;
            for (i, cell) in record.iter().enumerate() {
                if i < raw_columns.len() {
                    raw_columns[i].push(cell.trim().to_string());
                }
            }
        }

        let rows = raw_columns.first().map_or(0, Vec::len);
        if rows == 0 {
            return Err(Error::EmptyDataset);
        }

        let columns = headers
            .into_iter()
            .zip(raw_columns)
            .map(|(name, raw)| build_column(name, &raw))
            .collect();

        Ok(Self { columns, rows })
    }

    /// Total number of rows, including rows with missing cells.
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// All column names in source order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Names of numeric columns (for `/info`).
    pub fn numeric_column_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.ty.is_numeric())
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Names of categorical columns (for `/info`).
    pub fn categorical_column_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| !c.ty.is_numeric())
            .map(|c| c.name.as_str())
            .collect()
    }

    fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| Error::UnknownColumn(name.to_string()))
    }

    /// Count of rows where `column == value`.
    pub fn count_of(&self, column: &str, value: &Value) -> Result<usize> {
        let column = self.column(column)?;
        Ok(column.values.iter().filter(|v| *v == value).count())
    }

    /// Percentage of rows where `column == value`, over the total row
    /// count. Returns 0.0 when the dataset has no rows (no division fault).
    pub fn percentage_of(&self, column: &str, value: &Value) -> Result<f64> {
        let count = self.count_of(column, value)?;
        if self.rows == 0 {
            return Ok(0.0);
        }
        Ok((count as f64 / self.rows as f64) * 100.0)
    }

    /// Frequency of each distinct non-missing value in the column,
    /// ordered by count descending with ties broken by first-seen order
    /// in the source.
    pub fn value_counts(&self, column: &str) -> Result<Vec<(Value, usize)>> {
        let column = self.column(column)?;

        // Linear grouping keeps first-seen order without requiring
        // Hash/Eq on float values.
        let mut counts: Vec<(Value, usize)> = Vec::new();
        for value in &column.values {
            if value.is_null() {
                continue;
            }
            match counts.iter_mut().find(|(v, _)| v == value) {
                Some((_, n)) => *n += 1,
                None => counts.push((value.clone(), 1)),
            }
        }

        // Stable sort preserves first-seen order for equal counts.
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(counts)
    }

    /// For each distinct non-missing value of `group` (in `value_counts`
    /// order), the percentage of rows within that group where
    /// `target == value`.
    pub fn percentage_within_groups(
        &self,
        group: &str,
        target: &str,
        value: &Value,
    ) -> Result<Vec<(Value, f64)>> {
        let group_col = self.column(group)?;
        let target_col = self.column(target)?;

        let mut rates = Vec::new();
        for (group_value, total) in self.value_counts(group)? {
            let hits = group_col
                .values
                .iter()
                .zip(&target_col.values)
                .filter(|(g, t)| **g == group_value && *t == value)
                .count();
            // value_counts never reports a zero total
            rates.push((group_value, (hits as f64 / total as f64) * 100.0));
        }

        Ok(rates)
    }

    /// All non-missing values of a numeric column as f64.
    pub fn numeric_values(&self, column: &str) -> Result<Vec<f64>> {
        let col = self.column(column)?;
        if !col.ty.is_numeric() {
            return Err(Error::NotNumeric(column.to_string()));
        }
        Ok(col.values.iter().filter_map(Value::as_f64).collect())
    }

    /// Arithmetic mean of a numeric column's non-missing values.
    ///
    /// Returns `f64::NAN` when the column has no non-missing values. The
    /// sentinel is deterministic and never panics; callers format it as
    /// "NaN" in answer text.
    pub fn average(&self, column: &str) -> Result<f64> {
        let values = self.numeric_values(column)?;
        if values.is_empty() {
            return Ok(f64::NAN);
        }
        Ok(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// Statistics for a single column, numeric or categorical branch.
    pub fn column_stats(&self, column: &str) -> Result<ColumnStats> {
        let col = self.column(column)?;
        let count = col.values.len();
        let missing = col.values.iter().filter(|v| v.is_null()).count();
        let distinct = self.value_counts(&col.name)?.len();

        if col.ty.is_numeric() {
            let values = self.numeric_values(&col.name)?;
            let (mean, median, std_dev, min, max) = if values.is_empty() {
                (f64::NAN, f64::NAN, f64::NAN, f64::NAN, f64::NAN)
            } else {
                let mean = values.iter().sum::<f64>() / values.len() as f64;
                let min = values.iter().copied().fold(f64::INFINITY, f64::min);
                let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                let data = Data::new(values);
                let median = data.median();
                let std_dev = data.std_dev().unwrap_or(f64::NAN);
                (mean, median, std_dev, min, max)
            };

            Ok(ColumnStats::Numeric {
                count,
                distinct,
                missing,
                mean,
                median,
                std_dev,
                min,
                max,
            })
        } else {
            let top_values = self
                .value_counts(&col.name)?
                .into_iter()
                .take(10)
                .map(|(v, n)| (v.to_string(), n))
                .collect();

            Ok(ColumnStats::Categorical {
                count,
                distinct,
                missing,
                top_values,
            })
        }
    }
}

/// Infer the column type from raw cells and convert them to typed values.
fn build_column(name: String, raw: &[String]) -> Column {
    let non_empty: Vec<&String> = raw.iter().filter(|s| !s.is_empty()).collect();

    // An all-missing column counts as numeric, so its mean is the NaN
    // sentinel rather than a type error.
    let ty = if non_empty.is_empty() {
        ColumnType::Float
    } else if non_empty.iter().all(|s| s.parse::<i64>().is_ok()) {
        ColumnType::Int
    } else if non_empty.iter().all(|s| s.parse::<f64>().is_ok()) {
        ColumnType::Float
    } else {
        ColumnType::Text
    };

    let values = raw
        .iter()
        .map(|s| {
            if s.is_empty() {
                return Value::Null;
            }
            match ty {
                ColumnType::Int => Value::Int(s.parse().unwrap_or_default()),
                ColumnType::Float => Value::Float(s.parse().unwrap_or_default()),
                ColumnType::Text => Value::Text(s.clone()),
            }
        })
        .collect();

    Column { name, ty, values }
}

// ============================================================================
// Tests
// ============================================================================
