//! Error handling and context tests

use tabula::prelude::*;

#[test]
fn test_error_with_context() {
    let base_error = Error::ColumnNotFound("xyz".to_string());
    let contextual_error = base_error.with_context("while resolving join keys");

    match &contextual_error {
        Error::Context { context, .. } => {
            assert_eq!(context, "while resolving join keys");
        }
        _ => panic!("Expected Context variant"),
    }
    assert!(matches!(contextual_error.root(), Error::ColumnNotFound(name) if name == "xyz"));
    assert!(contextual_error.to_string().contains("xyz"));
}

#[test]
fn test_error_suggestions() {
    let missing = Error::ColumnNotFound("xyz".to_string());
    let suggestions = missing.suggestions();
    assert!(!suggestions.is_empty());
    assert!(suggestions.iter().any(|s| s.contains("column")));

    // suggestions see through context layers
    let wrapped = Error::Schema("length mismatch: 3 vs 4".into()).with_context("construct");
    assert!(wrapped.suggestions().iter().any(|s| s.contains("same length")));

    let index = Error::Index { index: 7, len: 3 };
    assert!(index.suggestions().iter().any(|s| s.contains("0..3")));
    assert!(Error::InvalidArgument("x".into()).suggestions().is_empty());
}

#[test]
fn test_error_messages() {
    assert_eq!(
        Error::EmptyReduction { op: "min" }.to_string(),
        "Empty reduction: min over zero non-null values"
    );
    assert_eq!(
        Error::Index { index: 5, len: 2 }.to_string(),
        "Index out of bounds: index 5 for length 2"
    );
}

#[test]
fn test_errors_surface_from_operations() {
    let df = DataFrame::new(vec![
        Series::new("a", vec![1i64, 2]),
        Series::new("b", vec!["x", "y"]),
    ])
    .unwrap();

    let err = df.select(vec![5usize]).unwrap_err();
    assert!(matches!(err, Error::Index { index: 5, len: 2 }));

    let err = Series::full_null("n", DataType::Float64, 2).mean().unwrap_err();
    assert!(matches!(err, Error::EmptyReduction { .. }));

    let err = df.join(&df, "a", "b", JoinType::Left).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch(_)));
}
