//! Hash join with build (right) and probe (left) phases.
//!
//! Output layout: every left column in order, then every right column except
//! the right key. A right column whose name is already taken gets the
//! configured suffix (`"_right"` by default), repeated until the name is
//! unique. Rows come out in probe order; callers that need a deterministic
//! order sort afterwards.

use std::collections::{HashMap, HashSet};

use tabula_core::config::{JoinOptions, JoinType};
use tabula_core::error::{Error, Result};
use tabula_core::frame::DataFrame;
use tabula_core::schema::{Field, Schema};
use tabula_core::series::{ColumnData, Series};
use tabula_core::types::Scalar;

use crate::traits::Operator;

#[derive(Default)]
pub struct HashJoin {
    pub left_on: String,
    pub right_on: String,
    pub options: JoinOptions,
}

impl HashJoin {
    pub fn new(left_on: impl Into<String>, right_on: impl Into<String>, options: JoinOptions) -> Self {
        Self {
            left_on: left_on.into(),
            right_on: right_on.into(),
            options,
        }
    }
}

/// Hashable view of one non-null key slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum JoinKey<'a> {
    Bool(bool),
    I64(i64),
    U32(u32),
    /// Canonicalized bits: `-0.0` folds onto `0.0`, every NaN onto one NaN.
    F64(u64),
    Str(&'a str),
}

fn join_key(series: &Series, idx: usize) -> Option<JoinKey<'_>> {
    if series.is_null_at(idx) {
        return None;
    }
    let key = match series.data() {
        ColumnData::Boolean(v) => JoinKey::Bool(v[idx]),
        ColumnData::Int64(v) => JoinKey::I64(v[idx]),
        ColumnData::UInt32(v) => JoinKey::U32(v[idx]),
        ColumnData::Float64(v) => {
            let x = v[idx];
            let x = if x == 0.0 {
                0.0
            } else if x.is_nan() {
                f64::NAN
            } else {
                x
            };
            JoinKey::F64(x.to_bits())
        }
        ColumnData::Utf8(v) => JoinKey::Str(v[idx].as_str()),
    };
    Some(key)
}

impl Operator for HashJoin {
    fn name(&self) -> &'static str {
        "join_hash"
    }

    fn plan(&self, input_schemas: &[Schema]) -> Result<Schema> {
        if input_schemas.len() != 2 {
            return Err(Error::InvalidArgument("hash join expects two inputs".into()));
        }
        self.options.validate()?;
        let left_schema = &input_schemas[0];
        let right_schema = &input_schemas[1];

        let left_key = left_schema
            .index_of(&self.left_on)
            .and_then(|idx| left_schema.field(idx))
            .ok_or_else(|| Error::ColumnNotFound(self.left_on.clone()))?;
        let right_key = right_schema
            .index_of(&self.right_on)
            .and_then(|idx| right_schema.field(idx))
            .ok_or_else(|| Error::ColumnNotFound(self.right_on.clone()))?;
        if left_key.data_type != right_key.data_type {
            return Err(Error::TypeMismatch(format!(
                "join keys '{}' ({}) and '{}' ({}) have different dtypes",
                left_key.name, left_key.data_type, right_key.name, right_key.data_type
            )));
        }

        let how = self.options.how;
        let mut fields: Vec<Field> = Vec::with_capacity(left_schema.len() + right_schema.len());

        // Left fields; outer joins null-pad them for right-only rows.
        for field in &left_schema.fields {
            let mut new_field = field.clone();
            if how == JoinType::Outer && field.name != self.left_on {
                new_field.nullable = true;
            }
            fields.push(new_field);
        }

        // Right fields minus the key (with suffix if name conflicts).
        for field in &right_schema.fields {
            if field.name == self.right_on {
                continue;
            }
            let mut new_field = field.clone();
            // The suffix is non-empty, so repeating it always ends.
            while fields.iter().any(|f| f.name == new_field.name) {
                new_field.name.push_str(&self.options.suffix);
            }
            if how != JoinType::Inner {
                new_field.nullable = true;
            }
            fields.push(new_field);
        }

        Ok(Schema::new(fields))
    }

    fn execute(&self, inputs: &[&DataFrame]) -> Result<DataFrame> {
        if inputs.len() != 2 {
            return Err(Error::InvalidArgument("hash join needs two inputs".into()));
        }
        let left = inputs[0];
        let right = inputs[1];
        let out_schema = self.plan(&[left.schema(), right.schema()])?;

        let left_key = left.column(&self.left_on)?;
        let right_key = right.column(&self.right_on)?;
        let how = self.options.how;

        // Build phase: hash table on right side
        let mut hash_table: HashMap<JoinKey<'_>, Vec<usize>> = HashMap::new();
        for row_idx in 0..right_key.len() {
            if let Some(key) = join_key(right_key, row_idx) {
                hash_table.entry(key).or_default().push(row_idx);
            }
        }

        // Probe phase: scan left side and emit matches
        let mut left_rows: Vec<Option<usize>> = Vec::with_capacity(left.height());
        let mut right_rows: Vec<Option<usize>> = Vec::with_capacity(left.height());
        for left_idx in 0..left_key.len() {
            match join_key(left_key, left_idx).and_then(|k| hash_table.get(&k)) {
                Some(matches) => {
                    // Outer joins pair a key with its first right row only.
                    let paired = if how == JoinType::Outer {
                        &matches[..1]
                    } else {
                        &matches[..]
                    };
                    for &right_idx in paired {
                        left_rows.push(Some(left_idx));
                        right_rows.push(Some(right_idx));
                    }
                }
                None if how != JoinType::Inner => {
                    left_rows.push(Some(left_idx));
                    right_rows.push(None);
                }
                None => {}
            }
        }

        // Right-only rows for outer joins: every right row the probe did not
        // pair. Each right row lands in exactly one output row.
        if how == JoinType::Outer {
            let left_keys: HashSet<JoinKey<'_>> =
                (0..left_key.len()).filter_map(|i| join_key(left_key, i)).collect();
            for right_idx in 0..right_key.len() {
                let paired = join_key(right_key, right_idx)
                    .filter(|key| left_keys.contains(key))
                    .and_then(|key| hash_table.get(&key))
                    .is_some_and(|rows| rows.first() == Some(&right_idx));
                if !paired {
                    left_rows.push(None);
                    right_rows.push(Some(right_idx));
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            how = ?how,
            left_on = %self.left_on,
            right_on = %self.right_on,
            left_rows = left.height(),
            right_rows = right.height(),
            output_rows = left_rows.len(),
            "hash join"
        );

        let mut output_cols = Vec::with_capacity(out_schema.len());

        // Left columns
        for col in left.get_columns() {
            if col.name() == self.left_on && how == JoinType::Outer {
                output_cols.push(coalesce_key(left_key, &left_rows, right_key, &right_rows)?);
            } else {
                output_cols.push(col.take_opt(&left_rows)?);
            }
        }

        // Right columns, named as planned
        let right_fields = out_schema.fields.iter().skip(left.width());
        let right_cols = right
            .get_columns()
            .iter()
            .filter(|c| c.name() != self.right_on);
        for (col, field) in right_cols.zip(right_fields) {
            output_cols.push(col.take_opt(&right_rows)?.with_name(field.name.clone()));
        }

        DataFrame::new(output_cols)
    }
}

/// Key column of an outer join: taken from whichever side produced the row.
fn coalesce_key(
    left_key: &Series,
    left_rows: &[Option<usize>],
    right_key: &Series,
    right_rows: &[Option<usize>],
) -> Result<Series> {
    let mut values = Vec::with_capacity(left_rows.len());
    for (l, r) in left_rows.iter().zip(right_rows) {
        let value = match (l, r) {
            (Some(l), _) => left_key.get(*l)?,
            (None, Some(r)) => right_key.get(*r)?,
            (None, None) => Scalar::Null,
        };
        values.push(value);
    }
    Series::from_scalars(left_key.name(), values, Some(left_key.dtype()))
}
