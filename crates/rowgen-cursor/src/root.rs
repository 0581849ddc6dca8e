//! Root driver: the one cursor in a tree that advances itself.
//!
//! Every other cursor is advanced by its parent's combination policy. The
//! root is advanced by the consumer pulling rows. The advance past a row is
//! deferred until the next row is demanded, so a fault raised while
//! advancing is reported for the row that needed it.

use rowgen_core::types::Tuple;

use crate::error::Result;
use crate::trace;
use crate::traits::Cursor;

pub struct RowIter {
    cursor: Box<dyn Cursor>,
    pending_shift: bool,
    emitted: u64,
    finished: bool,
}

impl RowIter {
    /// Takes ownership of a private cursor; pass a `copy()` of shared trees.
    pub fn new(cursor: Box<dyn Cursor>) -> Self {
        Self {
            cursor,
            pending_shift: false,
            emitted: 0,
            finished: false,
        }
    }

    /// Rows yielded so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}

impl Iterator for RowIter {
    type Item = Result<Tuple>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if self.pending_shift {
            self.pending_shift = false;
            if let Err(e) = self.cursor.shift() {
                return Some(Err(e));
            }
        }
        match self.cursor.has_next() {
            Err(e) => Some(Err(e)),
            Ok(false) => {
                self.finished = true;
                trace::iteration_finished(self.cursor.name(), self.emitted);
                None
            }
            Ok(true) => match self.cursor.current() {
                Ok(row) => {
                    self.pending_shift = true;
                    self.emitted += 1;
                    Some(Ok(row))
                }
                Err(e) => Some(Err(e)),
            },
        }
    }
}

impl std::iter::FusedIterator for RowIter {}
