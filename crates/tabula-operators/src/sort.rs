//! Stable multi-key sort.
//!
//! The permutation is computed once over the key column(s) and then applied
//! to every column, so rows stay aligned. `slice::sort_by` is stable, which
//! keeps rows with equal keys in their original relative order.

use std::cmp::Ordering;

use tabula_core::config::SortOptions;
use tabula_core::error::{Error, Result};
use tabula_core::frame::DataFrame;
use tabula_core::schema::Schema;
use tabula_core::series::Series;

use crate::traits::Operator;

#[derive(Debug, Clone, Default)]
pub struct Sort {
    pub by: Vec<String>,
    pub options: SortOptions,
}

impl Sort {
    pub fn new<S: AsRef<str>>(by: &[S], options: SortOptions) -> Self {
        Self {
            by: by.iter().map(|s| s.as_ref().to_string()).collect(),
            options,
        }
    }
}

impl Operator for Sort {
    fn name(&self) -> &'static str {
        "sort"
    }

    fn plan(&self, input_schemas: &[Schema]) -> Result<Schema> {
        let schema = input_schemas
            .first()
            .ok_or_else(|| Error::InvalidArgument("sort expects one input".into()))?;
        if self.by.is_empty() {
            return Err(Error::InvalidArgument("sort requires at least one key column".into()));
        }
        for key in &self.by {
            if schema.index_of(key).is_none() {
                return Err(Error::ColumnNotFound(key.clone()));
            }
        }
        Ok(schema.clone())
    }

    fn execute(&self, inputs: &[&DataFrame]) -> Result<DataFrame> {
        let input = inputs
            .first()
            .ok_or_else(|| Error::InvalidArgument("missing input".into()))?;
        self.plan(&[input.schema()])?;

        let keys = self
            .by
            .iter()
            .map(|name| input.column(name))
            .collect::<Result<Vec<_>>>()?;
        let perm = arg_sort_multiple(&keys, input.height(), self.options);

        #[cfg(feature = "tracing")]
        tracing::trace!(keys = ?self.by, rows = perm.len(), descending = self.options.descending, "sort");

        input.take(&perm)
    }
}

/// Stable permutation ordering `series`.
pub fn arg_sort(series: &Series, options: SortOptions) -> Vec<usize> {
    arg_sort_multiple(&[series], series.len(), options)
}

/// Stable permutation ordering rows lexicographically by `keys`.
pub fn arg_sort_multiple(keys: &[&Series], len: usize, options: SortOptions) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..len).collect();
    perm.sort_by(|&a, &b| {
        keys.iter()
            .map(|key| compare_slots(key, a, b, options))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });
    perm
}

fn compare_slots(key: &Series, a: usize, b: usize, options: SortOptions) -> Ordering {
    let null_ord = if options.nulls_last {
        Ordering::Greater
    } else {
        Ordering::Less
    };
    match (key.is_null_at(a), key.is_null_at(b)) {
        (true, true) => Ordering::Equal,
        (true, false) => null_ord,
        (false, true) => null_ord.reverse(),
        (false, false) => {
            let ord = key.data().cmp_slots(a, b);
            if options.descending {
                ord.reverse()
            } else {
                ord
            }
        }
    }
}
