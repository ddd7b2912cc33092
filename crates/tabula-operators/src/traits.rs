//! Operator trait + the `FrameOps` extension binding operators onto
//! `DataFrame`.
//!
//! Every engine first derives its output schema through `plan(...)` and then
//! materializes the result in `execute(...)`. Both are synchronous and
//! deterministic for the same inputs.

use tabula_core::config::{JoinOptions, JoinType, SortOptions};
use tabula_core::error::Result;
use tabula_core::frame::DataFrame;
use tabula_core::schema::Schema;

use crate::groupby::{AggFunc, GroupBy};
use crate::join::hash::HashJoin;
use crate::select::{self, Selection, Selector};
use crate::sort::Sort;

/// Trait that all frame operators implement.
pub trait Operator {
    /// Human-readable operator name (stable).
    fn name(&self) -> &'static str;

    /// Given input schemas, return the output schema. Fails on unknown
    /// columns or irreconcilable dtypes before any row is touched.
    fn plan(&self, input_schemas: &[Schema]) -> Result<Schema>;

    /// Evaluate the operator. Unary operators read `inputs[0]`; joins read
    /// `inputs[0]` (left) and `inputs[1]` (right).
    fn execute(&self, inputs: &[&DataFrame]) -> Result<DataFrame>;
}

/// Selection, sorting, grouping and joining as methods on `DataFrame`.
pub trait FrameOps {
    /// Resolve any of the five selector shapes.
    fn select<S: Into<Selector>>(&self, selector: S) -> Result<Selection>;

    /// Stable ascending sort on one key column, returning a new frame.
    fn sort(&self, by: &str) -> Result<DataFrame>;

    fn sort_with(&self, by: &[&str], options: SortOptions) -> Result<DataFrame>;

    /// Stable ascending sort that permutes this frame's own columns.
    fn sort_in_place(&mut self, by: &str) -> Result<()>;

    fn sort_in_place_with(&mut self, by: &[&str], options: SortOptions) -> Result<()>;

    fn groupby(&self, by: &str, select: &str, agg: AggFunc) -> Result<DataFrame>;

    fn join(
        &self,
        other: &DataFrame,
        left_on: &str,
        right_on: &str,
        how: JoinType,
    ) -> Result<DataFrame>;

    fn join_with(
        &self,
        other: &DataFrame,
        left_on: &str,
        right_on: &str,
        options: &JoinOptions,
    ) -> Result<DataFrame>;
}

impl FrameOps for DataFrame {
    fn select<S: Into<Selector>>(&self, selector: S) -> Result<Selection> {
        select::select(self, &selector.into())
    }

    fn sort(&self, by: &str) -> Result<DataFrame> {
        self.sort_with(&[by], SortOptions::default())
    }

    fn sort_with(&self, by: &[&str], options: SortOptions) -> Result<DataFrame> {
        Sort::new(by, options).execute(&[self])
    }

    fn sort_in_place(&mut self, by: &str) -> Result<()> {
        self.sort_in_place_with(&[by], SortOptions::default())
    }

    fn sort_in_place_with(&mut self, by: &[&str], options: SortOptions) -> Result<()> {
        let sorted = Sort::new(by, options).execute(&[&*self])?;
        self.set_columns(sorted.into_columns())
    }

    fn groupby(&self, by: &str, select: &str, agg: AggFunc) -> Result<DataFrame> {
        GroupBy::new(by, select, agg).execute(&[self])
    }

    fn join(
        &self,
        other: &DataFrame,
        left_on: &str,
        right_on: &str,
        how: JoinType,
    ) -> Result<DataFrame> {
        self.join_with(other, left_on, right_on, &JoinOptions::new(how))
    }

    fn join_with(
        &self,
        other: &DataFrame,
        left_on: &str,
        right_on: &str,
        options: &JoinOptions,
    ) -> Result<DataFrame> {
        HashJoin::new(left_on, right_on, options.clone()).execute(&[self, other])
    }
}
