//! Sorter tests: stability, in-place sorting, options

mod common;

use tabula::prelude::*;

#[test]
fn test_sort_in_place() {
    let mut df = DataFrame::new(vec![
        Series::new("a", vec![2i64, 1, 3]),
        Series::new("b", vec![1i64, 2, 3]),
    ])
    .unwrap();
    df.sort_in_place("a").unwrap();
    let expected = DataFrame::new(vec![
        Series::new("a", vec![1i64, 2, 3]),
        Series::new("b", vec![2i64, 1, 3]),
    ])
    .unwrap();
    assert!(df.frame_equal(&expected));
}

#[test]
fn test_sort_returns_new_frame() {
    let df = DataFrame::new(vec![
        Series::new("a", vec![2i64, 1, 3]),
        Series::new("b", vec!["x", "y", "z"]),
    ])
    .unwrap();
    let sorted = df.sort("a").unwrap();
    assert!(sorted
        .column("b")
        .unwrap()
        .series_equal(&Series::new("", vec!["y", "x", "z"])));
    // input untouched
    assert_eq!(df.column("a").unwrap().get(0).unwrap(), Scalar::I64(2));
}

#[test]
fn test_sort_is_stable() {
    let df = DataFrame::new(vec![
        Series::new("k", vec!["b", "a", "b", "a", "b"]),
        Series::new("pos", vec![0i64, 1, 2, 3, 4]),
    ])
    .unwrap();
    let sorted = df.sort("k").unwrap();
    assert!(sorted
        .column("pos")
        .unwrap()
        .series_equal(&Series::new("", vec![1i64, 3, 0, 2, 4])));

    // descending keeps ties in original order too
    let desc = df.sort_with(&["k"], SortOptions::descending()).unwrap();
    assert!(desc
        .column("pos")
        .unwrap()
        .series_equal(&Series::new("", vec![0i64, 2, 4, 1, 3])));
}

#[test]
fn test_sort_nulls_last() {
    let df = DataFrame::new(vec![Series::new("a", vec![Some(3.0f64), None, Some(-1.0)])]).unwrap();
    let sorted = df.sort("a").unwrap();
    assert!(sorted
        .column("a")
        .unwrap()
        .series_equal(&Series::new("", vec![Some(-1.0f64), Some(3.0), None])));

    let first = df
        .sort_with(&["a"], SortOptions { descending: false, nulls_last: false })
        .unwrap();
    assert!(first.column("a").unwrap().is_null_at(0));
}

#[test]
fn test_sort_multiple_keys() {
    let mut df = DataFrame::new(vec![
        Series::new("g", vec![1i64, 0, 1, 0]),
        Series::new("v", vec!["b", "z", "a", "y"]),
    ])
    .unwrap();
    df.sort_in_place_with(&["g", "v"], SortOptions::default()).unwrap();
    assert!(df
        .column("v")
        .unwrap()
        .series_equal(&Series::new("", vec!["y", "z", "a", "b"])));
}

#[test]
fn test_sort_errors() {
    let mut df = common::range_frame(3);
    assert!(matches!(df.sort("missing"), Err(Error::ColumnNotFound(_))));
    assert!(df.sort_with(&[] as &[&str], SortOptions::default()).is_err());
    assert!(df.sort_in_place("missing").is_err());
    assert!(df.frame_equal(&common::range_frame(3)));
}

#[test]
fn test_sort_options_from_json() {
    let opts = SortOptions::from_json(r#"{"descending": true}"#).unwrap();
    assert!(opts.descending);
    assert!(opts.nulls_last);
}
