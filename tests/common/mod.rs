//! Shared fixtures for the tabula test suite.
#![allow(dead_code)]

use tabula::prelude::*;

/// `a: i64, b: f64, c: str` with three rows.
pub fn mixed_frame() -> DataFrame {
    DataFrame::new(vec![
        Series::new("a", vec![1i64, 2, 3]),
        Series::new("b", vec![1.0f64, 2.0, 3.0]),
        Series::new("c", vec!["a", "b", "c"]),
    ])
    .unwrap()
}

/// Key column `a` with three groups, two numeric value columns.
pub fn groupby_frame() -> DataFrame {
    DataFrame::new(vec![
        Series::new("a", vec!["a", "b", "a", "b", "b", "c"]),
        Series::new("b", vec![1i64, 2, 3, 4, 5, 6]),
        Series::new("c", vec![6i64, 5, 4, 3, 2, 1]),
    ])
    .unwrap()
}

pub fn join_left() -> DataFrame {
    DataFrame::new(vec![
        Series::new("a", vec!["a", "b", "a", "z"]),
        Series::new("b", vec![1i64, 2, 3, 4]),
        Series::new("c", vec![6i64, 5, 4, 3]),
    ])
    .unwrap()
}

pub fn join_right() -> DataFrame {
    DataFrame::new(vec![
        Series::new("a", vec!["b", "c", "b", "a"]),
        Series::new("k", vec![0i64, 3, 9, 6]),
        Series::new("c", vec![1i64, 0, 2, 1]),
    ])
    .unwrap()
}

/// `n` rows of `a = b = 0..n`.
pub fn range_frame(n: i64) -> DataFrame {
    DataFrame::new(vec![
        Series::new("a", (0..n).collect::<Vec<i64>>()),
        Series::new("b", (0..n).collect::<Vec<i64>>()),
    ])
    .unwrap()
}
