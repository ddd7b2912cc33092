#![forbid(unsafe_code)]
//! tabula: a columnar in-memory dataframe engine.
//!
//! ```rust,no_run
//! use tabula::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let mut df = DataFrame::new(vec![
//!     Series::new("a", vec![2i64, 1, 3]),
//!     Series::new("b", vec!["x", "y", "z"]),
//! ])?;
//! df.sort_in_place("a")?;
//! let totals = df.groupby("b", "a", AggFunc::Sum)?;
//! # Ok(())
//! # }
//! ```

pub use tabula_core;
pub use tabula_operators;

pub mod prelude {
    pub use tabula_core::prelude::*;
    pub use tabula_operators::prelude::*;
}
