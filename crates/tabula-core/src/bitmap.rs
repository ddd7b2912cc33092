//! Packed null bitmap. A set bit marks a missing value.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NullBitmap {
    words: Vec<u64>,
    len: usize,
}

impl NullBitmap {
    /// Bitmap of `len` rows with no nulls.
    pub fn new_valid(len: usize) -> Self {
        Self {
            words: vec![0_u64; len.div_ceil(64)],
            len,
        }
    }

    /// Bitmap of `len` rows that are all null.
    pub fn new_null(len: usize) -> Self {
        let mut words = vec![u64::MAX; len.div_ceil(64)];
        let remainder = len % 64;
        if remainder > 0 {
            if let Some(last) = words.last_mut() {
                *last = (1_u64 << remainder) - 1;
            }
        }
        Self { words, len }
    }

    pub fn from_nulls(nulls: impl IntoIterator<Item = bool>) -> Self {
        let mut bitmap = Self::new_valid(0);
        for is_null in nulls {
            bitmap.push(is_null);
        }
        bitmap
    }

    pub fn push(&mut self, is_null: bool) {
        if self.len % 64 == 0 {
            self.words.push(0);
        }
        if is_null {
            self.words[self.len / 64] |= 1_u64 << (self.len % 64);
        }
        self.len += 1;
    }

    /// `true` when row `idx` is missing. Out-of-range rows read as null.
    pub fn is_null(&self, idx: usize) -> bool {
        if idx >= self.len {
            return true;
        }
        (self.words[idx / 64] >> (idx % 64)) & 1 == 1
    }

    pub fn null_count(&self) -> usize {
        // Bits past `len` are never set, so whole words can be counted.
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(|idx| self.is_null(idx))
    }
}

impl PartialEq for NullBitmap {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.words == other.words
    }
}

impl Eq for NullBitmap {}
