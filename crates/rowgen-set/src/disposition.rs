//! What the runner does with each generated row.

use serde::{Deserialize, Serialize};

use rowgen_core::applicability::Applicability;
use rowgen_core::excluded::ExcludedIndices;
use rowgen_core::types::Tuple;
use rowgen_cursor::{CursorError, RowIter};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowDisposition {
    Run,
    /// The row index is in the set's excluded ranges.
    Excluded,
    /// The whole set is marked not applicable.
    NotApplicable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedRow {
    pub index: u64,
    pub row: Tuple,
    pub disposition: RowDisposition,
}

/// Iterator over rows tagged with their disposition. Not-applicable wins
/// over excluded.
pub struct RunnableRows {
    rows: RowIter,
    applicability: Applicability,
    excluded: ExcludedIndices,
    next_index: u64,
}

impl RunnableRows {
    pub(crate) fn new(
        rows: RowIter,
        applicability: Applicability,
        excluded: ExcludedIndices,
    ) -> Self {
        Self {
            rows,
            applicability,
            excluded,
            next_index: 0,
        }
    }

    fn disposition(&self, index: u64) -> RowDisposition {
        if !self.applicability.is_applicable() {
            RowDisposition::NotApplicable
        } else if self.excluded.is_excluded(index) {
            RowDisposition::Excluded
        } else {
            RowDisposition::Run
        }
    }
}

impl Iterator for RunnableRows {
    type Item = Result<GeneratedRow, CursorError>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = match self.rows.next()? {
            Ok(row) => row,
            Err(e) => return Some(Err(e)),
        };
        let index = self.next_index;
        self.next_index += 1;
        Some(Ok(GeneratedRow {
            index,
            disposition: self.disposition(index),
            row,
        }))
    }
}
