#![forbid(unsafe_code)]
//! tabula-core: the data model of the tabula dataframe engine.
//!
//! This crate contains the typed column (`Series`), the frame
//! (`DataFrame`), scalars, schemas, options and the error type. It performs
//! no I/O and spawns no threads.
//!
//! Crates that use this:
//! - tabula-operators: selection, sort, groupby and join engines over `DataFrame`.
//! - tabula: the facade crate re-exporting both.

pub mod bitmap;
pub mod config;
pub mod equal;
pub mod error;
pub mod frame;
pub mod prelude;
pub mod schema;
pub mod series;
pub mod types;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
