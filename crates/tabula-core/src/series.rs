//! `Series`: a named, typed, fixed-length column.
//!
//! Values live in a typed buffer (`ColumnData`) next to a `NullBitmap`. Null
//! slots hold the dtype's default value, which no operation ever reads as
//! data. Both buffers sit behind `Arc`, so cloning a Series (or selecting it
//! into another DataFrame) shares the data; every kernel returns a new
//! Series instead of writing into an existing one.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::bitmap::NullBitmap;
use crate::error::{Error, Result};
use crate::schema::DataType;
use crate::types::{infer_dtype, Scalar};

/// Typed value buffer of a Series.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Boolean(Vec<bool>),
    Int64(Vec<i64>),
    Float64(Vec<f64>),
    Utf8(Vec<String>),
    UInt32(Vec<u32>),
}

/// Apply the same expression to whichever buffer variant is present and wrap
/// the result back into that variant.
macro_rules! map_data {
    ($data:expr, $v:ident => $body:expr) => {
        match $data {
            ColumnData::Boolean($v) => ColumnData::Boolean($body),
            ColumnData::Int64($v) => ColumnData::Int64($body),
            ColumnData::Float64($v) => ColumnData::Float64($body),
            ColumnData::Utf8($v) => ColumnData::Utf8($body),
            ColumnData::UInt32($v) => ColumnData::UInt32($body),
        }
    };
}

impl ColumnData {
    fn with_capacity(dtype: DataType, capacity: usize) -> Self {
        match dtype {
            DataType::Boolean => ColumnData::Boolean(Vec::with_capacity(capacity)),
            DataType::Int64 => ColumnData::Int64(Vec::with_capacity(capacity)),
            DataType::Float64 => ColumnData::Float64(Vec::with_capacity(capacity)),
            DataType::Utf8 => ColumnData::Utf8(Vec::with_capacity(capacity)),
            DataType::UInt32 => ColumnData::UInt32(Vec::with_capacity(capacity)),
        }
    }

    pub fn dtype(&self) -> DataType {
        match self {
            ColumnData::Boolean(_) => DataType::Boolean,
            ColumnData::Int64(_) => DataType::Int64,
            ColumnData::Float64(_) => DataType::Float64,
            ColumnData::Utf8(_) => DataType::Utf8,
            ColumnData::UInt32(_) => DataType::UInt32,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnData::Boolean(v) => v.len(),
            ColumnData::Int64(v) => v.len(),
            ColumnData::Float64(v) => v.len(),
            ColumnData::Utf8(v) => v.len(),
            ColumnData::UInt32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Push an already-cast scalar. `Scalar::Null` pushes the default value.
    fn push(&mut self, value: &Scalar) -> Result<()> {
        match (self, value) {
            (ColumnData::Boolean(v), Scalar::Bool(x)) => v.push(*x),
            (ColumnData::Int64(v), Scalar::I64(x)) => v.push(*x),
            (ColumnData::Float64(v), Scalar::F64(x)) => v.push(*x),
            (ColumnData::Utf8(v), Scalar::Str(x)) => v.push(x.clone()),
            (ColumnData::UInt32(v), Scalar::U32(x)) => v.push(*x),
            (data, Scalar::Null) => data.push_default(),
            (data, other) => {
                return Err(Error::TypeMismatch(format!(
                    "cannot push {:?} into a {} buffer",
                    other,
                    data.dtype()
                )))
            }
        }
        Ok(())
    }

    fn push_default(&mut self) {
        match self {
            ColumnData::Boolean(v) => v.push(false),
            ColumnData::Int64(v) => v.push(0),
            ColumnData::Float64(v) => v.push(0.0),
            ColumnData::Utf8(v) => v.push(String::new()),
            ColumnData::UInt32(v) => v.push(0),
        }
    }

    fn value(&self, idx: usize) -> Scalar {
        match self {
            ColumnData::Boolean(v) => Scalar::Bool(v[idx]),
            ColumnData::Int64(v) => Scalar::I64(v[idx]),
            ColumnData::Float64(v) => Scalar::F64(v[idx]),
            ColumnData::Utf8(v) => Scalar::Str(v[idx].clone()),
            ColumnData::UInt32(v) => Scalar::U32(v[idx]),
        }
    }

    /// Order two slots of the same buffer. Floats use a total order.
    pub fn cmp_slots(&self, a: usize, b: usize) -> Ordering {
        match self {
            ColumnData::Boolean(v) => v[a].cmp(&v[b]),
            ColumnData::Int64(v) => v[a].cmp(&v[b]),
            ColumnData::Float64(v) => v[a].total_cmp(&v[b]),
            ColumnData::Utf8(v) => v[a].cmp(&v[b]),
            ColumnData::UInt32(v) => v[a].cmp(&v[b]),
        }
    }

    /// `true` when slot `a` of `self` holds the same value as slot `b` of
    /// `other`. Buffers of different dtypes never match. NaN equals NaN.
    pub fn slot_eq(&self, a: usize, other: &ColumnData, b: usize) -> bool {
        match (self, other) {
            (ColumnData::Boolean(x), ColumnData::Boolean(y)) => x[a] == y[b],
            (ColumnData::Int64(x), ColumnData::Int64(y)) => x[a] == y[b],
            (ColumnData::Float64(x), ColumnData::Float64(y)) => {
                x[a] == y[b] || (x[a].is_nan() && y[b].is_nan())
            }
            (ColumnData::Utf8(x), ColumnData::Utf8(y)) => x[a] == y[b],
            (ColumnData::UInt32(x), ColumnData::UInt32(y)) => x[a] == y[b],
            _ => false,
        }
    }
}

/// Typed inputs accepted by [`Series::new`]. The dtype is fixed by the Rust
/// element type, so no inference scan is needed.
pub trait IntoColumnData {
    fn into_column_data(self) -> (ColumnData, NullBitmap);
}

macro_rules! impl_into_column_data {
    ($t:ty, $variant:ident, $conv:expr) => {
        impl IntoColumnData for Vec<$t> {
            fn into_column_data(self) -> (ColumnData, NullBitmap) {
                let nulls = NullBitmap::new_valid(self.len());
                let values = self.into_iter().map($conv).collect();
                (ColumnData::$variant(values), nulls)
            }
        }

        impl IntoColumnData for Vec<Option<$t>> {
            fn into_column_data(self) -> (ColumnData, NullBitmap) {
                let nulls = NullBitmap::from_nulls(self.iter().map(Option::is_none));
                let values = self
                    .into_iter()
                    .map(|v| v.map($conv).unwrap_or_default())
                    .collect();
                (ColumnData::$variant(values), nulls)
            }
        }
    };
}

impl_into_column_data!(bool, Boolean, |v: bool| v);
impl_into_column_data!(i64, Int64, |v: i64| v);
impl_into_column_data!(f64, Float64, |v: f64| v);
impl_into_column_data!(u32, UInt32, |v: u32| v);
impl_into_column_data!(String, Utf8, |v: String| v);
impl_into_column_data!(&str, Utf8, |v: &str| v.to_string());

/// Comparison operators for building boolean masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CmpOp {
    /// Parse a comparison operator from a string.
    pub fn parse(op: &str) -> Result<Self> {
        match op {
            "==" | "=" => Ok(CmpOp::Eq),
            "!=" | "<>" => Ok(CmpOp::Ne),
            "<" => Ok(CmpOp::Lt),
            "<=" => Ok(CmpOp::Le),
            ">" => Ok(CmpOp::Gt),
            ">=" => Ok(CmpOp::Ge),
            _ => Err(Error::InvalidArgument(format!(
                "unknown comparison operator: {}",
                op
            ))),
        }
    }

    fn holds(self, ord: Ordering) -> bool {
        match self {
            CmpOp::Eq => ord == Ordering::Equal,
            CmpOp::Ne => ord != Ordering::Equal,
            CmpOp::Lt => ord == Ordering::Less,
            CmpOp::Le => ord != Ordering::Greater,
            CmpOp::Gt => ord == Ordering::Greater,
            CmpOp::Ge => ord != Ordering::Less,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Series {
    name: String,
    data: Arc<ColumnData>,
    nulls: Arc<NullBitmap>,
}

impl Series {
    /// Build a Series from a typed vector, e.g. `Vec<i64>` or
    /// `Vec<Option<&str>>`.
    pub fn new(name: impl Into<String>, values: impl IntoColumnData) -> Self {
        let (data, nulls) = values.into_column_data();
        Self::from_parts(name, data, nulls)
    }

    pub(crate) fn from_parts(name: impl Into<String>, data: ColumnData, nulls: NullBitmap) -> Self {
        debug_assert_eq!(data.len(), nulls.len());
        Self {
            name: name.into(),
            data: Arc::new(data),
            nulls: Arc::new(nulls),
        }
    }

    /// Build a Series from loosely-typed scalars.
    ///
    /// The dtype is decided by a single scan (see [`infer_dtype`]) unless
    /// `dtype_hint` is given. All-null or empty input without a hint cannot be
    /// resolved and fails with `Error::Schema`.
    pub fn from_scalars(
        name: impl Into<String>,
        values: Vec<Scalar>,
        dtype_hint: Option<DataType>,
    ) -> Result<Self> {
        let name = name.into();
        let dtype = dtype_hint.or_else(|| infer_dtype(&values)).ok_or_else(|| {
            Error::Schema(format!(
                "cannot infer dtype of column '{}': no non-null values",
                name
            ))
        })?;

        let mut data = ColumnData::with_capacity(dtype, values.len());
        let mut nulls = NullBitmap::new_valid(0);
        for value in &values {
            let cast = value.cast(dtype)?;
            nulls.push(cast.is_null());
            data.push(&cast)?;
        }
        Ok(Self::from_parts(name, data, nulls))
    }

    /// A column of `len` nulls of the given dtype.
    pub fn full_null(name: impl Into<String>, dtype: DataType, len: usize) -> Self {
        let mut data = ColumnData::with_capacity(dtype, len);
        for _ in 0..len {
            data.push_default();
        }
        Self::from_parts(name, data, NullBitmap::new_null(len))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dtype(&self) -> DataType {
        self.data.dtype()
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn null_bitmap(&self) -> &NullBitmap {
        &self.nulls
    }

    /// Value at row `idx`; `Scalar::Null` for a missing value.
    pub fn get(&self, idx: usize) -> Result<Scalar> {
        if idx >= self.len() {
            return Err(Error::Index {
                index: idx,
                len: self.len(),
            });
        }
        Ok(self.value_unchecked(idx))
    }

    fn value_unchecked(&self, idx: usize) -> Scalar {
        if self.nulls.is_null(idx) {
            Scalar::Null
        } else {
            self.data.value(idx)
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Scalar> + '_ {
        (0..self.len()).map(|idx| self.value_unchecked(idx))
    }

    pub fn is_null_at(&self, idx: usize) -> bool {
        self.nulls.is_null(idx)
    }

    pub fn null_count(&self) -> usize {
        self.nulls.null_count()
    }

    /// Boolean Series marking missing rows.
    pub fn is_null(&self) -> Series {
        Series::new(self.name.clone(), self.nulls.iter().collect::<Vec<bool>>())
    }

    pub fn is_not_null(&self) -> Series {
        Series::new(
            self.name.clone(),
            self.nulls.iter().map(|n| !n).collect::<Vec<bool>>(),
        )
    }

    fn valid_rows(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len()).filter(|idx| !self.nulls.is_null(*idx))
    }

    /// Sum of the non-null values; `0` when there are none.
    ///
    /// Integers and booleans sum to `I64`, floats to `F64`. An integer total
    /// outside the `i64` range is an `Overflow` error.
    pub fn sum(&self) -> Result<Scalar> {
        let out = match self.data.as_ref() {
            ColumnData::Int64(v) => Scalar::I64(checked_sum(self.valid_rows().map(|i| v[i]))?),
            ColumnData::UInt32(v) => {
                Scalar::I64(checked_sum(self.valid_rows().map(|i| i64::from(v[i])))?)
            }
            ColumnData::Boolean(v) => {
                Scalar::I64(self.valid_rows().filter(|i| v[*i]).count() as i64)
            }
            ColumnData::Float64(v) => Scalar::F64(self.valid_rows().map(|i| v[i]).sum()),
            ColumnData::Utf8(_) => {
                return Err(Error::TypeMismatch(format!(
                    "sum is not defined for {} column '{}'",
                    DataType::Utf8,
                    self.name
                )))
            }
        };
        Ok(out)
    }

    pub fn min(&self) -> Result<Scalar> {
        self.extreme(Ordering::Less, "min")
    }

    pub fn max(&self) -> Result<Scalar> {
        self.extreme(Ordering::Greater, "max")
    }

    fn extreme(&self, keep: Ordering, op: &'static str) -> Result<Scalar> {
        let mut best: Option<usize> = None;
        for idx in self.valid_rows() {
            best = match best {
                Some(b) if self.data.cmp_slots(idx, b) != keep => Some(b),
                _ => Some(idx),
            };
        }
        best.map(|idx| self.data.value(idx))
            .ok_or(Error::EmptyReduction { op })
    }

    /// Arithmetic mean of the non-null values, always as a float.
    pub fn mean(&self) -> Result<f64> {
        if let ColumnData::Utf8(_) = self.data.as_ref() {
            return Err(Error::TypeMismatch(format!(
                "mean is not defined for {} column '{}'",
                DataType::Utf8,
                self.name
            )));
        }
        let count = self.len() - self.null_count();
        if count == 0 {
            return Err(Error::EmptyReduction { op: "mean" });
        }
        // Accumulate in f64 so integer columns cannot overflow.
        let total: f64 = match self.data.as_ref() {
            ColumnData::Int64(v) => self.valid_rows().map(|i| v[i] as f64).sum(),
            ColumnData::UInt32(v) => self.valid_rows().map(|i| f64::from(v[i])).sum(),
            ColumnData::Boolean(v) => self.valid_rows().filter(|i| v[*i]).count() as f64,
            ColumnData::Float64(v) => self.valid_rows().map(|i| v[i]).sum(),
            ColumnData::Utf8(_) => 0.0,
        };
        Ok(total / count as f64)
    }

    /// Compare row-wise against another Series of the same length.
    pub fn compare(&self, op: CmpOp, other: &Series) -> Result<Series> {
        if other.len() != self.len() {
            return Err(Error::Schema(format!(
                "length mismatch in comparison: {} vs {}",
                self.len(),
                other.len()
            )));
        }
        self.compare_by(op, |idx| other.value_unchecked(idx))
    }

    /// Compare every row against one scalar.
    pub fn compare_scalar(&self, op: CmpOp, value: impl Into<Scalar>) -> Result<Series> {
        let value = value.into();
        self.compare_by(op, |_| value.clone())
    }

    fn compare_by(&self, op: CmpOp, rhs: impl Fn(usize) -> Scalar) -> Result<Series> {
        let mut out = Vec::with_capacity(self.len());
        for idx in 0..self.len() {
            let (lhs, rhs) = (self.value_unchecked(idx), rhs(idx));
            if lhs.is_null() || rhs.is_null() {
                out.push(None);
                continue;
            }
            let ord = lhs.try_cmp(&rhs).ok_or_else(|| {
                Error::TypeMismatch(format!("cannot compare {:?} with {:?}", lhs, rhs))
            })?;
            out.push(Some(op.holds(ord)));
        }
        Ok(Series::new(self.name.clone(), out))
    }

    pub fn equal(&self, other: &Series) -> Result<Series> {
        self.compare(CmpOp::Eq, other)
    }

    pub fn not_equal(&self, other: &Series) -> Result<Series> {
        self.compare(CmpOp::Ne, other)
    }

    pub fn lt(&self, other: &Series) -> Result<Series> {
        self.compare(CmpOp::Lt, other)
    }

    pub fn lt_eq(&self, other: &Series) -> Result<Series> {
        self.compare(CmpOp::Le, other)
    }

    pub fn gt(&self, other: &Series) -> Result<Series> {
        self.compare(CmpOp::Gt, other)
    }

    pub fn gt_eq(&self, other: &Series) -> Result<Series> {
        self.compare(CmpOp::Ge, other)
    }

    pub fn eq_scalar(&self, value: impl Into<Scalar>) -> Result<Series> {
        self.compare_scalar(CmpOp::Eq, value)
    }

    pub fn neq_scalar(&self, value: impl Into<Scalar>) -> Result<Series> {
        self.compare_scalar(CmpOp::Ne, value)
    }

    pub fn lt_scalar(&self, value: impl Into<Scalar>) -> Result<Series> {
        self.compare_scalar(CmpOp::Lt, value)
    }

    pub fn le_scalar(&self, value: impl Into<Scalar>) -> Result<Series> {
        self.compare_scalar(CmpOp::Le, value)
    }

    pub fn gt_scalar(&self, value: impl Into<Scalar>) -> Result<Series> {
        self.compare_scalar(CmpOp::Gt, value)
    }

    pub fn ge_scalar(&self, value: impl Into<Scalar>) -> Result<Series> {
        self.compare_scalar(CmpOp::Ge, value)
    }

    /// Turn a boolean Series into a row mask; nulls do not select.
    pub fn to_mask(&self) -> Result<Vec<bool>> {
        match self.data.as_ref() {
            ColumnData::Boolean(v) => Ok(v
                .iter()
                .enumerate()
                .map(|(idx, b)| *b && !self.nulls.is_null(idx))
                .collect()),
            _ => Err(Error::TypeMismatch(format!(
                "mask column '{}' must be {}, got {}",
                self.name,
                DataType::Boolean,
                self.dtype()
            ))),
        }
    }

    /// Gather rows by position. Duplicates are allowed.
    pub fn take(&self, indices: &[usize]) -> Result<Series> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.len()) {
            return Err(Error::Index {
                index: bad,
                len: self.len(),
            });
        }
        let data = map_data!(self.data.as_ref(), v => indices.iter().map(|&i| v[i].clone()).collect());
        let nulls = NullBitmap::from_nulls(indices.iter().map(|&i| self.nulls.is_null(i)));
        Ok(Series::from_parts(self.name.clone(), data, nulls))
    }

    /// Gather rows by optional position; `None` produces a null row.
    pub fn take_opt(&self, indices: &[Option<usize>]) -> Result<Series> {
        if let Some(bad) = indices.iter().flatten().find(|&&i| i >= self.len()) {
            return Err(Error::Index {
                index: *bad,
                len: self.len(),
            });
        }
        let data = map_data!(self.data.as_ref(), v => indices
            .iter()
            .map(|slot| slot.map(|i| v[i].clone()).unwrap_or_default())
            .collect());
        let nulls = NullBitmap::from_nulls(
            indices
                .iter()
                .map(|slot| slot.map_or(true, |i| self.nulls.is_null(i))),
        );
        Ok(Series::from_parts(self.name.clone(), data, nulls))
    }

    /// Keep rows where `mask` is true.
    pub fn filter(&self, mask: &[bool]) -> Result<Series> {
        if mask.len() != self.len() {
            return Err(Error::Schema(format!(
                "mask length mismatch: expected {}, got {}",
                self.len(),
                mask.len()
            )));
        }
        let indices: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter_map(|(idx, keep)| keep.then_some(idx))
            .collect();
        self.take(&indices)
    }

    /// Rows `[offset, offset + length)` clipped to the Series bounds.
    pub fn slice(&self, offset: usize, length: usize) -> Series {
        let start = offset.min(self.len());
        let end = start.saturating_add(length).min(self.len());
        let data = map_data!(self.data.as_ref(), v => v[start..end].to_vec());
        let nulls = NullBitmap::from_nulls((start..end).map(|i| self.nulls.is_null(i)));
        Series::from_parts(self.name.clone(), data, nulls)
    }

    pub fn head(&self, n: usize) -> Series {
        self.slice(0, n)
    }

    pub fn tail(&self, n: usize) -> Series {
        let n = n.min(self.len());
        self.slice(self.len() - n, n)
    }
}

fn checked_sum(mut values: impl Iterator<Item = i64>) -> Result<i64> {
    values
        .try_fold(0_i64, |acc, v| acc.checked_add(v))
        .ok_or(Error::Overflow { op: "sum" })
}
