//! Indexer: resolves the five selector shapes against a `DataFrame`.
//!
//! A selector is a tagged value built with `From` conversions, e.g.
//! `"a"`, `vec!["a", "b"]`, `vec![true, false, true]`, `vec![0usize, 2]` or
//! `(vec![0usize, 1], "b")`, and is resolved by one exhaustive match.

use tabula_core::error::{Error, Result};
use tabula_core::frame::DataFrame;
use tabula_core::series::Series;

/// Row half of a `(rows, columns)` selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowSelector {
    Mask(Vec<bool>),
    Positions(Vec<usize>),
}

/// Column half of a `(rows, columns)` selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSelector {
    Label(String),
    Labels(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// One column, returned as a Series.
    ByLabel(String),
    /// Column subset, row order unchanged.
    ByLabelList(Vec<String>),
    /// Rows where the mask is true; the mask must cover every row.
    ByMask(Vec<bool>),
    /// Rows at the given positions, in order, duplicates allowed.
    ByPositions(Vec<usize>),
    /// Row selector applied to the selected columns only. Always a frame.
    ByRowColPair(RowSelector, ColumnSelector),
}

/// Result of a selection: a single column or a frame.
#[derive(Debug, Clone)]
pub enum Selection {
    Series(Series),
    Frame(DataFrame),
}

impl Selection {
    pub fn into_series(self) -> Result<Series> {
        match self {
            Selection::Series(s) => Ok(s),
            Selection::Frame(df) => Err(Error::InvalidArgument(format!(
                "selection produced a frame of shape {:?}, not a series",
                df.shape()
            ))),
        }
    }

    pub fn into_frame(self) -> Result<DataFrame> {
        match self {
            Selection::Frame(df) => Ok(df),
            Selection::Series(s) => Err(Error::InvalidArgument(format!(
                "selection produced series '{}', not a frame",
                s.name()
            ))),
        }
    }

    /// `(height, width)`; a Series counts as one column.
    pub fn shape(&self) -> (usize, usize) {
        match self {
            Selection::Series(s) => (s.len(), 1),
            Selection::Frame(df) => df.shape(),
        }
    }
}

pub fn select(df: &DataFrame, selector: &Selector) -> Result<Selection> {
    let out = match selector {
        Selector::ByLabel(name) => Selection::Series(df.column(name)?.clone()),
        Selector::ByLabelList(names) => Selection::Frame(df.select_columns(names.as_slice())?),
        Selector::ByMask(mask) => Selection::Frame(select_rows(df, &RowSelector::Mask(mask.clone()))?),
        Selector::ByPositions(positions) => Selection::Frame(df.take(positions)?),
        Selector::ByRowColPair(rows, columns) => {
            let projected = match columns {
                ColumnSelector::Label(name) => df.select_columns(std::slice::from_ref(name))?,
                ColumnSelector::Labels(names) => df.select_columns(names.as_slice())?,
            };
            Selection::Frame(select_rows(&projected, rows)?)
        }
    };
    Ok(out)
}

fn select_rows(df: &DataFrame, rows: &RowSelector) -> Result<DataFrame> {
    match rows {
        RowSelector::Mask(mask) => df.filter(mask),
        RowSelector::Positions(positions) => df.take(positions),
    }
}

impl From<Vec<bool>> for RowSelector {
    fn from(mask: Vec<bool>) -> Self {
        RowSelector::Mask(mask)
    }
}

impl From<Vec<usize>> for RowSelector {
    fn from(positions: Vec<usize>) -> Self {
        RowSelector::Positions(positions)
    }
}

impl From<&str> for ColumnSelector {
    fn from(name: &str) -> Self {
        ColumnSelector::Label(name.to_string())
    }
}

impl From<String> for ColumnSelector {
    fn from(name: String) -> Self {
        ColumnSelector::Label(name)
    }
}

impl From<Vec<&str>> for ColumnSelector {
    fn from(names: Vec<&str>) -> Self {
        ColumnSelector::Labels(names.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for ColumnSelector {
    fn from(names: Vec<String>) -> Self {
        ColumnSelector::Labels(names)
    }
}

impl From<&str> for Selector {
    fn from(name: &str) -> Self {
        Selector::ByLabel(name.to_string())
    }
}

impl From<String> for Selector {
    fn from(name: String) -> Self {
        Selector::ByLabel(name)
    }
}

impl From<Vec<&str>> for Selector {
    fn from(names: Vec<&str>) -> Self {
        Selector::ByLabelList(names.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for Selector {
    fn from(names: Vec<String>) -> Self {
        Selector::ByLabelList(names)
    }
}

impl From<Vec<bool>> for Selector {
    fn from(mask: Vec<bool>) -> Self {
        Selector::ByMask(mask)
    }
}

impl From<Vec<usize>> for Selector {
    fn from(positions: Vec<usize>) -> Self {
        Selector::ByPositions(positions)
    }
}

impl<R, C> From<(R, C)> for Selector
where
    R: Into<RowSelector>,
    C: Into<ColumnSelector>,
{
    fn from((rows, columns): (R, C)) -> Self {
        Selector::ByRowColPair(rows.into(), columns.into())
    }
}
