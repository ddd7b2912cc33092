//! Deep, deterministic equality for Series and DataFrames.
//!
//! Floats compare exactly, with NaN equal to NaN. Values sitting under a null
//! slot are not compared. Neither check ever fails.

use crate::frame::DataFrame;
use crate::series::Series;

impl Series {
    /// Same dtype, length, null bitmap and values. The name is ignored.
    pub fn series_equal(&self, other: &Series) -> bool {
        if self.dtype() != other.dtype() || self.len() != other.len() {
            return false;
        }
        if self.null_bitmap() != other.null_bitmap() {
            return false;
        }
        (0..self.len())
            .filter(|idx| !self.is_null_at(*idx))
            .all(|idx| self.data().slot_eq(idx, other.data(), idx))
    }
}

impl DataFrame {
    /// Same shape, same column names in the same order, and every column
    /// pair passes [`Series::series_equal`].
    pub fn frame_equal(&self, other: &DataFrame) -> bool {
        if self.shape() != other.shape() {
            return false;
        }
        self.get_columns()
            .iter()
            .zip(other.get_columns())
            .all(|(a, b)| a.name() == b.name() && a.series_equal(b))
    }
}
