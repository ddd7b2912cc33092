//! Scalar values and the dtype inference scan.
//!
//! `Scalar` is the row-at-a-time view of a column value. Columns themselves
//! are stored as typed buffers (see `series.rs`); scalars are used at the
//! edges: construction, `Series::get`, and aggregate results.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::schema::DataType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    Null,
    Bool(bool),
    I64(i64),
    U32(u32),
    F64(f64),
    Str(String),
}

impl Scalar {
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// The dtype this value would occupy on its own; `None` for null.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Scalar::Null => None,
            Scalar::Bool(_) => Some(DataType::Boolean),
            Scalar::I64(_) => Some(DataType::Int64),
            Scalar::U32(_) => Some(DataType::UInt32),
            Scalar::F64(_) => Some(DataType::Float64),
            Scalar::Str(_) => Some(DataType::Utf8),
        }
    }

    /// Numeric view used for mixed int/float comparisons.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::I64(v) => Some(*v as f64),
            Scalar::U32(v) => Some(*v as f64),
            Scalar::F64(v) => Some(*v),
            _ => None,
        }
    }

    /// Compare two non-null scalars. Returns `None` when the pair is not
    /// comparable (e.g. a string against a number). Int and float compare
    /// numerically; floats use a total order so NaN sorts last.
    pub fn try_cmp(&self, other: &Scalar) -> Option<Ordering> {
        use Scalar::*;
        match (self, other) {
            (Bool(x), Bool(y)) => Some(x.cmp(y)),
            (I64(x), I64(y)) => Some(x.cmp(y)),
            (U32(x), U32(y)) => Some(x.cmp(y)),
            (Str(x), Str(y)) => Some(x.cmp(y)),
            (I64(x), U32(y)) => Some(x.cmp(&i64::from(*y))),
            (U32(x), I64(y)) => Some(i64::from(*x).cmp(y)),
            (Null, _) | (_, Null) => None,
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => Some(x.total_cmp(&y)),
                _ => None,
            },
        }
    }

    /// Coerce this value into `dtype`, following the widening rule used by
    /// inference (int → float → string). Null stays null.
    pub fn cast(&self, dtype: DataType) -> Result<Scalar> {
        let out = match (self, dtype) {
            (Scalar::Null, _) => Scalar::Null,
            (Scalar::Bool(b), DataType::Boolean) => Scalar::Bool(*b),
            (Scalar::I64(v), DataType::Int64) => Scalar::I64(*v),
            (Scalar::U32(v), DataType::Int64) => Scalar::I64(i64::from(*v)),
            (Scalar::U32(v), DataType::UInt32) => Scalar::U32(*v),
            (Scalar::I64(v), DataType::UInt32) => match u32::try_from(*v) {
                Ok(v) => Scalar::U32(v),
                Err(_) => {
                    return Err(Error::TypeMismatch(format!(
                        "value {} does not fit in {}",
                        v,
                        DataType::UInt32
                    )))
                }
            },
            (Scalar::I64(_) | Scalar::U32(_) | Scalar::F64(_), DataType::Float64) => {
                // as_f64 is Some for every numeric variant matched above.
                Scalar::F64(self.as_f64().unwrap_or(f64::NAN))
            }
            (value, DataType::Utf8) => Scalar::Str(value.to_string()),
            (value, dtype) => {
                return Err(Error::TypeMismatch(format!(
                    "cannot store {:?} in a {} column",
                    value, dtype
                )))
            }
        };
        Ok(out)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::I64(v) => write!(f, "{}", v),
            Scalar::U32(v) => write!(f, "{}", v),
            Scalar::F64(v) => write!(f, "{}", v),
            Scalar::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::I64(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::I64(i64::from(v))
    }
}

impl From<u32> for Scalar {
    fn from(v: u32) -> Self {
        Scalar::U32(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::F64(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Str(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Str(v)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Scalar::Null,
        }
    }
}

/// Single upfront scan deciding the dtype of a value sequence.
///
/// All-boolean input is `Boolean`. Otherwise the widest kind seen wins in the
/// order int → float → string; booleans mixed with anything else widen to
/// string. Returns `None` when no non-null value is present.
pub fn infer_dtype(values: &[Scalar]) -> Option<DataType> {
    let (mut bools, mut ints, mut floats, mut strs) = (false, false, false, false);
    for v in values {
        match v {
            Scalar::Null => {}
            Scalar::Bool(_) => bools = true,
            Scalar::I64(_) | Scalar::U32(_) => ints = true,
            Scalar::F64(_) => floats = true,
            Scalar::Str(_) => strs = true,
        }
    }

    if strs || (bools && (ints || floats)) {
        Some(DataType::Utf8)
    } else if bools {
        Some(DataType::Boolean)
    } else if floats {
        Some(DataType::Float64)
    } else if ints {
        Some(DataType::Int64)
    } else {
        None
    }
}
