//! Convenience re-exports.

pub use crate::bitmap::NullBitmap;
pub use crate::config::{JoinOptions, JoinType, SortOptions};
pub use crate::error::{Error, Result};
pub use crate::frame::DataFrame;
pub use crate::schema::{DataType, Field, Schema};
pub use crate::series::{CmpOp, ColumnData, Series};
pub use crate::types::Scalar;
