//! Persistable reading-position snapshots.

use serde::{Deserialize, Serialize};

/// Where a reader left off. The absolute `offset` is exact for the text
/// the snapshot was taken against; `progress_percent` lets the position
/// survive edits that shrink the document underneath it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReadingPosition {
    pub offset: usize,
    pub progress_percent: f32,
}

impl ReadingPosition {
    pub const fn new(offset: usize, progress_percent: f32) -> Self {
        Self {
            offset,
            progress_percent,
        }
    }

    /// Maps the snapshot onto a document of `len` characters: the exact
    /// offset when still in range, otherwise the proportional offset.
    pub fn resolve(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        if self.offset < len {
            return self.offset;
        }
        let approx = (self.progress_percent / 100.0) * len as f32;
        (approx as usize).min(len - 1)
    }
}
