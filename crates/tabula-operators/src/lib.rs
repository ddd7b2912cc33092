#![forbid(unsafe_code)]
//! tabula-operators: engines over `tabula_core::frame::DataFrame`.
//!
//! - `select`: the Indexer, resolving the five selector shapes.
//! - `sort`: stable single/multi-key sort.
//! - `groupby`: partition + per-partition aggregation.
//! - `join`: hash join (inner/left/outer).
//!
//! `traits::FrameOps` exposes all of them as `DataFrame` methods.

pub mod groupby;
pub mod join;
pub mod select;
pub mod sort;
pub mod traits;

pub mod prelude {
    pub use crate::groupby::AggFunc;
    pub use crate::join::HashJoin;
    pub use crate::select::{ColumnSelector, RowSelector, Selection, Selector};
    pub use crate::sort::Sort;
    pub use crate::traits::{FrameOps, Operator};
}
