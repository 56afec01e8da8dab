//! Row accounting shared by the report parsers.

use serde::{Deserialize, Serialize};

/// How many raw rows a parser saw, kept, and discarded.
///
/// Malformed rows never abort a parse; they are only counted here so callers
/// can surface them for observability.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestStats {
    pub rows_read: usize,
    pub rows_accepted: usize,
    pub rows_rejected: usize,
}

impl IngestStats {
    pub fn accept(&mut self) {
        self.rows_read += 1;
        self.rows_accepted += 1;
    }

    pub fn reject(&mut self) {
        self.rows_read += 1;
        self.rows_rejected += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.rows_accepted == 0
    }
}
