//! Grouped aggregation over one key column.
//!
//! Rows are partitioned by the distinct values of the key column. Partitions
//! are found by sorting the key (stable, ascending, nulls last) and cutting
//! the permutation into runs of equal keys, so groups come out in ascending
//! key order and each group lists its rows in original order. Each
//! partition is then reduced with the same `Series` reductions used for
//! whole columns.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use tabula_core::config::SortOptions;
use tabula_core::error::{Error, Result};
use tabula_core::frame::DataFrame;
use tabula_core::schema::{DataType, Field, Schema};
use tabula_core::series::Series;
use tabula_core::types::Scalar;

use crate::sort::arg_sort;
use crate::traits::Operator;

/// Aggregation applied to each partition of the value column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggFunc {
    Sum,
    Min,
    Max,
    Mean,
    /// Rows per partition, as `UInt32`.
    Count,
}

impl AggFunc {
    /// Parse from strings like "sum", "mean" or "count".
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sum" => Ok(AggFunc::Sum),
            "min" => Ok(AggFunc::Min),
            "max" => Ok(AggFunc::Max),
            "mean" | "avg" => Ok(AggFunc::Mean),
            "count" => Ok(AggFunc::Count),
            other => Err(Error::InvalidArgument(format!("unknown agg function: {}", other))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AggFunc::Sum => "sum",
            AggFunc::Min => "min",
            AggFunc::Max => "max",
            AggFunc::Mean => "mean",
            AggFunc::Count => "count",
        }
    }

    /// Result dtype when aggregating a column of `input` dtype.
    pub fn output_dtype(&self, input: DataType) -> Result<DataType> {
        match (self, input) {
            (AggFunc::Count, _) => Ok(DataType::UInt32),
            (AggFunc::Min | AggFunc::Max, dtype) => Ok(dtype),
            (AggFunc::Sum | AggFunc::Mean, DataType::Utf8) => Err(Error::TypeMismatch(format!(
                "{} is not defined for {} columns",
                self.as_str(),
                DataType::Utf8
            ))),
            (AggFunc::Sum, DataType::Float64) => Ok(DataType::Float64),
            (AggFunc::Sum, _) => Ok(DataType::Int64),
            (AggFunc::Mean, _) => Ok(DataType::Float64),
        }
    }

    /// Reduce one partition.
    pub fn evaluate(&self, part: &Series) -> Result<Scalar> {
        match self {
            AggFunc::Sum => part.sum(),
            AggFunc::Min => part.min(),
            AggFunc::Max => part.max(),
            AggFunc::Mean => part.mean().map(Scalar::F64),
            AggFunc::Count => u32::try_from(part.len())
                .map(Scalar::U32)
                .map_err(|_| Error::InvalidArgument(format!("group of {} rows overflows u32", part.len()))),
        }
    }
}

impl FromStr for AggFunc {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        AggFunc::parse(s)
    }
}

pub struct GroupBy {
    pub by: String,
    pub select: String,
    pub agg: AggFunc,
}

impl GroupBy {
    pub fn new(by: impl Into<String>, select: impl Into<String>, agg: AggFunc) -> Self {
        Self {
            by: by.into(),
            select: select.into(),
            agg,
        }
    }
}

impl Operator for GroupBy {
    fn name(&self) -> &'static str {
        "groupby"
    }

    fn plan(&self, input_schemas: &[Schema]) -> Result<Schema> {
        let input_schema = input_schemas
            .first()
            .ok_or_else(|| Error::InvalidArgument("groupby expects one input".into()))?;

        let key = input_schema
            .index_of(&self.by)
            .and_then(|idx| input_schema.field(idx))
            .ok_or_else(|| Error::ColumnNotFound(self.by.clone()))?;
        let value = input_schema
            .index_of(&self.select)
            .and_then(|idx| input_schema.field(idx))
            .ok_or_else(|| Error::ColumnNotFound(self.select.clone()))?;

        let agg_dtype = self.agg.output_dtype(value.data_type)?;
        Ok(Schema::new(vec![
            key.clone(),
            Field::new("", agg_dtype, self.agg != AggFunc::Count),
        ]))
    }

    fn execute(&self, inputs: &[&DataFrame]) -> Result<DataFrame> {
        let input = inputs
            .first()
            .ok_or_else(|| Error::InvalidArgument("missing input".into()))?;
        let schema = self.plan(&[input.schema()])?;
        let agg_dtype = schema.fields[1].data_type;

        let keys = input.column(&self.by)?;
        let values = input.column(&self.select)?;
        let groups = partition(keys);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            by = %self.by,
            select = %self.select,
            agg = self.agg.as_str(),
            rows = keys.len(),
            groups = groups.len(),
            "groupby"
        );

        let first_rows: Vec<usize> = groups.iter().map(|g| g[0]).collect();
        let key_col = keys.take(&first_rows)?;

        let mut results = Vec::with_capacity(groups.len());
        for rows in &groups {
            let part = values.take(rows)?;
            results.push(self.agg.evaluate(&part)?);
        }
        let agg_col = Series::from_scalars("", results, Some(agg_dtype))?;

        DataFrame::new(vec![key_col, agg_col])
    }
}

/// Row indices of every partition of `keys`, ordered by ascending key with
/// the null partition (if any) last. Never returns an empty partition.
pub fn partition(keys: &Series) -> Vec<Vec<usize>> {
    let perm = arg_sort(keys, SortOptions::default());
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for idx in perm {
        let same = groups
            .last()
            .map(|g| same_key(keys, g[0], idx))
            .unwrap_or(false);
        match groups.last_mut() {
            Some(group) if same => group.push(idx),
            _ => groups.push(vec![idx]),
        }
    }
    groups
}

fn same_key(keys: &Series, a: usize, b: usize) -> bool {
    match (keys.is_null_at(a), keys.is_null_at(b)) {
        (true, true) => true,
        (false, false) => keys.data().slot_eq(a, keys.data(), b),
        _ => false,
    }
}
