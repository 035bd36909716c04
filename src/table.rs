//! Numeric tables of benchmark measurements
//!
//! A [`Table`] is a dense, row-major grid of `f64` values. Rows are benchmark
//! configurations (e.g. a heuristic variant), columns are successive
//! measurement points (e.g. the n-th formula that was model-checked).

/// A rectangular grid of measurements loaded from a single CSV file.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    rows: usize,
    columns: usize,
    values: Vec<f64>,
}

impl Table {
    /// Creates a table from a list of rows.
    ///
    /// Returns [`None`] if the rows do not all have the same length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Self> {
        let columns = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != columns) {
            return None;
        }

        let row_count = rows.len();
        Some(Self {
            rows: row_count,
            columns,
            values: rows.into_iter().flatten().collect(),
        })
    }

    /// Number of rows (configurations).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (measurement points).
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Returns `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    /// Returns the values of a single row.
    ///
    /// # Panics
    /// If `index >= self.rows()`.
    pub fn row(&self, index: usize) -> &[f64] {
        let start = index * self.columns;
        &self.values[start..start + self.columns]
    }

    /// Iterates over all rows in order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.rows).map(move |index| self.row(index))
    }

    /// Computes the running total along every row.
    ///
    /// Entry `(r, c)` of the result is the sum of entries `(r, 0..=c)` of `self`.
    /// The result has the same shape as the input.
    pub fn cumulative_sum(&self) -> Table {
        let mut values = Vec::with_capacity(self.values.len());
        for row in self.iter_rows() {
            let mut total = 0.0;
            values.extend(row.iter().map(|value| {
                total += value;
                total
            }));
        }

        Table {
            rows: self.rows,
            columns: self.columns,
            values,
        }
    }
}

/// Returns `count` evenly spaced samples over `[start, end]`, both ends inclusive.
///
/// A single sample yields `[start]`; zero samples yield an empty vector.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|index| {
                    // Pin the final sample so rounding never overshoots the range.
                    if index == count - 1 {
                        end
                    } else {
                        start + step * index as f64
                    }
                })
                .collect()
        }
    }
}
