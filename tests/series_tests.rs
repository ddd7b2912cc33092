//! Series construction, inference, reductions and kernels

use tabula::prelude::*;

#[test]
fn test_typed_construction() {
    let s = Series::new("a", vec![1i64, 2, 3]);
    assert_eq!(s.name(), "a");
    assert_eq!(s.dtype(), DataType::Int64);
    assert_eq!(s.len(), 3);
    assert_eq!(s.null_count(), 0);

    let s = Series::new("b", vec![Some("x"), None, Some("z")]);
    assert_eq!(s.dtype(), DataType::Utf8);
    assert_eq!(s.null_count(), 1);
    assert!(s.is_null_at(1));
    assert_eq!(s.get(1).unwrap(), Scalar::Null);
    assert_eq!(s.get(2).unwrap(), Scalar::Str("z".into()));
}

#[test]
fn test_inference_widening() {
    let s = Series::from_scalars("x", vec![Scalar::I64(1), Scalar::I64(2)], None).unwrap();
    assert_eq!(s.dtype(), DataType::Int64);

    // int then float widens to float
    let s = Series::from_scalars("x", vec![Scalar::I64(1), Scalar::F64(2.5)], None).unwrap();
    assert_eq!(s.dtype(), DataType::Float64);
    assert_eq!(s.get(0).unwrap(), Scalar::F64(1.0));

    // anything with a string widens to string
    let s = Series::from_scalars("x", vec![Scalar::I64(1), "y".into()], None).unwrap();
    assert_eq!(s.dtype(), DataType::Utf8);
    assert_eq!(s.get(0).unwrap(), Scalar::Str("1".into()));

    let s = Series::from_scalars("x", vec![Scalar::Bool(true), Scalar::Null], None).unwrap();
    assert_eq!(s.dtype(), DataType::Boolean);
    assert_eq!(s.null_count(), 1);

    // booleans mixed with numbers are not numeric
    let s = Series::from_scalars("x", vec![Scalar::Bool(true), Scalar::I64(1)], None).unwrap();
    assert_eq!(s.dtype(), DataType::Utf8);
}

#[test]
fn test_inference_needs_hint_for_all_null() {
    let err = Series::from_scalars("x", vec![Scalar::Null, Scalar::Null], None).unwrap_err();
    assert!(matches!(err, Error::Schema(_)));

    let err = Series::from_scalars("x", vec![], None).unwrap_err();
    assert!(matches!(err, Error::Schema(_)));

    let s = Series::from_scalars("x", vec![Scalar::Null, Scalar::Null], Some(DataType::Int64)).unwrap();
    assert_eq!(s.dtype(), DataType::Int64);
    assert_eq!(s.null_count(), 2);
}

#[test]
fn test_hint_overrides_inference() {
    let s = Series::from_scalars("x", vec![Scalar::I64(1), Scalar::I64(2)], Some(DataType::Float64)).unwrap();
    assert_eq!(s.dtype(), DataType::Float64);

    let err = Series::from_scalars("x", vec!["text".into()], Some(DataType::Int64)).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch(_)));
}

#[test]
fn test_get_out_of_range() {
    let s = Series::new("a", vec![1i64, 2, 3]);
    match s.get(3) {
        Err(Error::Index { index, len }) => {
            assert_eq!(index, 3);
            assert_eq!(len, 3);
        }
        other => panic!("expected index error, got {:?}", other),
    }
}

#[test]
fn test_reductions_skip_nulls() {
    let s = Series::new("a", vec![Some(1i64), Some(2), None]);
    assert_eq!(s.sum().unwrap(), Scalar::I64(3));
    assert_eq!(s.min().unwrap(), Scalar::I64(1));
    assert_eq!(s.max().unwrap(), Scalar::I64(2));
    assert_eq!(s.mean().unwrap(), 1.5);

    let f = Series::new("f", vec![0.5f64, 1.5, -2.0]);
    assert_eq!(f.sum().unwrap(), Scalar::F64(0.0));
    assert_eq!(f.min().unwrap(), Scalar::F64(-2.0));
    assert_eq!(f.max().unwrap(), Scalar::F64(1.5));
}

#[test]
fn test_empty_reductions() {
    let s = Series::full_null("a", DataType::Int64, 3);
    // sum is exempt and yields zero
    assert_eq!(s.sum().unwrap(), Scalar::I64(0));
    assert!(matches!(s.min(), Err(Error::EmptyReduction { op: "min" })));
    assert!(matches!(s.max(), Err(Error::EmptyReduction { op: "max" })));
    assert!(matches!(s.mean(), Err(Error::EmptyReduction { op: "mean" })));

    let empty = Series::new("f", Vec::<f64>::new());
    assert_eq!(empty.sum().unwrap(), Scalar::F64(0.0));
    assert!(empty.mean().is_err());
}

#[test]
fn test_integer_sum_overflow() {
    let s = Series::new("a", vec![i64::MAX, 1]);
    assert!(matches!(s.sum(), Err(Error::Overflow { op: "sum" })));
    // mean accumulates in f64 and stays defined
    assert_eq!(s.mean().unwrap(), 2f64.powi(62));

    let near = Series::new("a", vec![i64::MAX - 1, 1]);
    assert_eq!(near.sum().unwrap(), Scalar::I64(i64::MAX));
}

#[test]
fn test_reductions_by_dtype() {
    let b = Series::new("b", vec![true, false, true]);
    assert_eq!(b.sum().unwrap(), Scalar::I64(2));
    assert_eq!(b.max().unwrap(), Scalar::Bool(true));

    let s = Series::new("s", vec!["pear", "apple", "fig"]);
    assert_eq!(s.min().unwrap(), Scalar::Str("apple".into()));
    assert_eq!(s.max().unwrap(), Scalar::Str("pear".into()));
    assert!(matches!(s.sum(), Err(Error::TypeMismatch(_))));
    assert!(matches!(s.mean(), Err(Error::TypeMismatch(_))));
}

#[test]
fn test_is_null_series() {
    let s = Series::new("c", vec![Some(1i64), None, Some(3), None]);
    let mask = s.is_null();
    assert_eq!(mask.dtype(), DataType::Boolean);
    assert_eq!(mask.null_count(), 0);
    assert_eq!(mask.sum().unwrap(), Scalar::I64(2));
    assert!(mask.series_equal(&Series::new("", vec![false, true, false, true])));
}

#[test]
fn test_scalar_comparisons() {
    let s = Series::new("a", vec![Some(1i64), Some(2), None]);
    let gt = s.gt_scalar(1i64).unwrap();
    assert!(gt.series_equal(&Series::new("", vec![Some(false), Some(true), None])));
    assert_eq!(gt.to_mask().unwrap(), vec![false, true, false]);

    // ints compare numerically against floats
    let le = s.le_scalar(1.5f64).unwrap();
    assert_eq!(le.to_mask().unwrap(), vec![true, false, false]);

    let words = Series::new("w", vec!["x", "y"]);
    assert!(words.eq_scalar("y").unwrap().series_equal(&Series::new("", vec![false, true])));
    assert!(matches!(words.eq_scalar(1i64), Err(Error::TypeMismatch(_))));
}

#[test]
fn test_series_comparisons() {
    let a = Series::new("a", vec![1i64, 5, 3]);
    let b = Series::new("b", vec![2i64, 5, 1]);
    assert_eq!(a.equal(&b).unwrap().to_mask().unwrap(), vec![false, true, false]);
    assert_eq!(a.lt(&b).unwrap().to_mask().unwrap(), vec![true, false, false]);
    assert_eq!(a.gt_eq(&b).unwrap().to_mask().unwrap(), vec![false, true, true]);
    assert_eq!(
        a.compare(CmpOp::parse("!=").unwrap(), &b).unwrap().to_mask().unwrap(),
        vec![true, false, true]
    );

    let short = Series::new("s", vec![1i64]);
    assert!(matches!(a.equal(&short), Err(Error::Schema(_))));
    assert!(CmpOp::parse("=~").is_err());
}

#[test]
fn test_to_mask_requires_boolean() {
    let s = Series::new("a", vec![1i64]);
    assert!(matches!(s.to_mask(), Err(Error::TypeMismatch(_))));
}

#[test]
fn test_take_and_filter() {
    let s = Series::new("a", vec![Some(10i64), None, Some(30)]);

    let taken = s.take(&[2, 0, 0]).unwrap();
    assert!(taken.series_equal(&Series::new("", vec![30i64, 10, 10])));
    assert!(matches!(s.take(&[3]), Err(Error::Index { index: 3, len: 3 })));

    let padded = s.take_opt(&[Some(0), None, Some(1)]).unwrap();
    assert_eq!(padded.null_count(), 2);
    assert_eq!(padded.get(0).unwrap(), Scalar::I64(10));

    let filtered = s.filter(&[false, true, true]).unwrap();
    assert_eq!(filtered.len(), 2);
    assert!(filtered.is_null_at(0));
    assert!(s.filter(&[true]).is_err());
}

#[test]
fn test_slice_clips() {
    let s = Series::new("a", vec![1i64, 2, 3, 4]);
    assert_eq!(s.slice(1, 2).len(), 2);
    assert_eq!(s.slice(3, 10).len(), 1);
    assert_eq!(s.slice(10, 2).len(), 0);
    assert!(s.head(100).series_equal(&s));
    assert!(s.tail(2).series_equal(&Series::new("", vec![3i64, 4])));
}

#[test]
fn test_series_equal() {
    let a = Series::new("a", vec![1i64, 2, 3]);
    // the name is not part of equality
    assert!(a.series_equal(&Series::new("other", vec![1i64, 2, 3])));
    assert!(!a.series_equal(&Series::new("a", vec![1i64, 2, 4])));
    assert!(!a.series_equal(&Series::new("a", vec![1i64, 2])));
    assert!(!a.series_equal(&Series::new("a", vec![1.0f64, 2.0, 3.0])));
    assert!(!a.series_equal(&Series::new("a", vec![Some(1i64), Some(2), None])));

    // unsigned counts are a distinct dtype
    assert!(!Series::new("n", vec![1u32, 2]).series_equal(&Series::new("n", vec![1i64, 2])));

    let nan = Series::new("f", vec![f64::NAN, 1.0]);
    assert!(nan.series_equal(&nan.clone()));
}
