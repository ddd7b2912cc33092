//! `DataFrame`: an ordered collection of uniquely-named, equal-length Series.
//!
//! Every constructor and mutator goes through `validate`, so the schema
//! invariants (equal lengths, unique names) hold at all times.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::schema::{DataType, Field, Schema};
use crate::series::Series;
use crate::types::Scalar;

#[derive(Debug, Clone, Default)]
pub struct DataFrame {
    columns: Vec<Series>,
}

impl DataFrame {
    /// Build a frame from Series, keyed by each Series' own name.
    pub fn new(columns: Vec<Series>) -> Result<Self> {
        validate(&columns)?;
        Ok(Self { columns })
    }

    /// Build a frame from `(name, Series)` pairs; the Series are renamed to
    /// their keys.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Series)>,
        S: Into<String>,
    {
        let columns = pairs
            .into_iter()
            .map(|(name, series)| series.with_name(name))
            .collect();
        Self::new(columns)
    }

    /// Build a frame from `(name, values, dtype_hint)` triples, running dtype
    /// inference on every column.
    pub fn from_scalars<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<Scalar>, Option<DataType>)>,
        S: Into<String>,
    {
        let columns = columns
            .into_iter()
            .map(|(name, values, hint)| Series::from_scalars(name, values, hint))
            .collect::<Result<Vec<_>>>()?;
        Self::new(columns)
    }

    /// Column names in order.
    pub fn columns(&self) -> Vec<&str> {
        self.columns.iter().map(|s| s.name()).collect()
    }

    pub fn get_columns(&self) -> &[Series] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<Series> {
        self.columns
    }

    pub fn schema(&self) -> Schema {
        Schema::new(
            self.columns
                .iter()
                .map(|s| Field::new(s.name(), s.dtype(), s.null_count() > 0))
                .collect(),
        )
    }

    pub fn height(&self) -> usize {
        self.columns.first().map_or(0, Series::len)
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// `(height, width)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.height(), self.width())
    }

    pub fn is_empty(&self) -> bool {
        self.height() == 0
    }

    pub fn find_idx_by_name(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|s| s.name() == name)
    }

    pub fn column(&self, name: &str) -> Result<&Series> {
        self.find_idx_by_name(name)
            .map(|idx| &self.columns[idx])
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    /// Column subset in the requested order; rows untouched.
    pub fn select_columns<S: AsRef<str>>(&self, names: &[S]) -> Result<DataFrame> {
        let columns = names
            .iter()
            .map(|name| self.column(name.as_ref()).cloned())
            .collect::<Result<Vec<_>>>()?;
        DataFrame::new(columns)
    }

    /// Swap the Series stored under `name` for `series`.
    ///
    /// The slot keeps its position but takes the new Series' own name; the
    /// old name is dropped from the schema.
    pub fn replace(&mut self, name: &str, series: Series) -> Result<&mut Self> {
        if series.len() != self.height() && !self.columns.is_empty() {
            return Err(Error::Schema(format!(
                "length mismatch: replacement '{}' has {} rows, frame has {}",
                series.name(),
                series.len(),
                self.height()
            )));
        }
        let idx = self
            .find_idx_by_name(name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))?;
        if let Some(other) = self.find_idx_by_name(series.name()) {
            if other != idx {
                return Err(Error::Schema(format!(
                    "duplicate column name '{}'",
                    series.name()
                )));
            }
        }
        self.columns[idx] = series;
        Ok(self)
    }

    /// Append `series`, or replace the column that already has its name.
    pub fn with_column(&mut self, series: Series) -> Result<&mut Self> {
        if !self.columns.is_empty() && series.len() != self.height() {
            return Err(Error::Schema(format!(
                "length mismatch: column '{}' has {} rows, frame has {}",
                series.name(),
                series.len(),
                self.height()
            )));
        }
        match self.find_idx_by_name(series.name()) {
            Some(idx) => self.columns[idx] = series,
            None => self.columns.push(series),
        }
        Ok(self)
    }

    /// Remove a column and return it.
    pub fn drop_in_place(&mut self, name: &str) -> Result<Series> {
        let idx = self
            .find_idx_by_name(name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))?;
        Ok(self.columns.remove(idx))
    }

    /// A copy of the frame without column `name`.
    pub fn drop(&self, name: &str) -> Result<DataFrame> {
        let mut out = self.clone();
        out.drop_in_place(name)?;
        Ok(out)
    }

    pub fn rename(&mut self, old: &str, new: &str) -> Result<&mut Self> {
        let idx = self
            .find_idx_by_name(old)
            .ok_or_else(|| Error::ColumnNotFound(old.to_string()))?;
        if self.find_idx_by_name(new).is_some_and(|other| other != idx) {
            return Err(Error::Schema(format!("duplicate column name '{}'", new)));
        }
        self.columns[idx].rename(new);
        Ok(self)
    }

    /// Apply a fallible per-column transform, keeping the schema order.
    pub fn try_apply_columns<F>(&self, f: F) -> Result<DataFrame>
    where
        F: Fn(&Series) -> Result<Series>,
    {
        let columns = self.columns.iter().map(f).collect::<Result<Vec<_>>>()?;
        DataFrame::new(columns)
    }

    /// Rows at `indices`, in that order; duplicates allowed.
    pub fn take(&self, indices: &[usize]) -> Result<DataFrame> {
        let height = self.height();
        if let Some(&bad) = indices.iter().find(|&&i| i >= height) {
            return Err(Error::Index {
                index: bad,
                len: height,
            });
        }
        self.try_apply_columns(|s| s.take(indices))
    }

    /// Rows where `mask` is true, in order.
    pub fn filter(&self, mask: &[bool]) -> Result<DataFrame> {
        if mask.len() != self.height() {
            return Err(Error::Schema(format!(
                "mask length mismatch: expected {}, got {}",
                self.height(),
                mask.len()
            )));
        }
        self.try_apply_columns(|s| s.filter(mask))
    }

    /// Rows `[offset, offset + length)` clipped to `[0, height]`. Never fails.
    pub fn slice(&self, offset: usize, length: usize) -> DataFrame {
        Self {
            columns: self.columns.iter().map(|s| s.slice(offset, length)).collect(),
        }
    }

    pub fn head(&self, n: usize) -> DataFrame {
        self.slice(0, n)
    }

    pub fn tail(&self, n: usize) -> DataFrame {
        let n = n.min(self.height());
        self.slice(self.height() - n, n)
    }

    /// Replace the column list wholesale, e.g. with a permuted copy.
    pub fn set_columns(&mut self, columns: Vec<Series>) -> Result<()> {
        validate(&columns)?;
        self.columns = columns;
        Ok(())
    }
}

fn validate(columns: &[Series]) -> Result<()> {
    if let Some(first) = columns.first() {
        if let Some(bad) = columns.iter().find(|s| s.len() != first.len()) {
            return Err(Error::Schema(format!(
                "length mismatch: column '{}' has {} rows, column '{}' has {}",
                first.name(),
                first.len(),
                bad.name(),
                bad.len()
            )));
        }
    }
    let mut seen = HashSet::with_capacity(columns.len());
    for s in columns {
        if !seen.insert(s.name()) {
            return Err(Error::Schema(format!("duplicate column name '{}'", s.name())));
        }
    }
    Ok(())
}
