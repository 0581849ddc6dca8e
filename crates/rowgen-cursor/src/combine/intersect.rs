//! Intersection: left rows that also occur (by full-row equality) in the
//! right operand.
//!
//! Each left row is tested on its own against a complete pass over the right
//! cursor, which is rolled back before every probe. Left order is preserved
//! and repeated equal left rows are each emitted. Nothing is materialized.
//!
//! Equality is `Value`'s derived `PartialEq`, so a row holding a float NaN
//! never matches anything, itself included.
//!
//! If the right operand faults during a probe, the left row being probed is
//! skipped and the fault is reported for it; the next pull probes the
//! following left row.

use rowgen_core::types::Tuple;

use crate::error::{CursorError, Result};
use crate::traits::Cursor;

pub struct IntersectCursor {
    left: Box<dyn Cursor>,
    right: Box<dyn Cursor>,
    /// Left is positioned on a row known to match (or exhausted).
    settled: bool,
}

impl IntersectCursor {
    pub fn new(left: Box<dyn Cursor>, right: Box<dyn Cursor>) -> Self {
        Self {
            left,
            right,
            settled: false,
        }
    }

    fn right_contains(&mut self, row: &Tuple) -> Result<bool> {
        self.right.rollback();
        while self.right.has_next()? {
            if self.right.current()? == *row {
                return Ok(true);
            }
            self.right.shift()?;
        }
        Ok(false)
    }

    /// Skip left rows with no match. Iterative: long runs of misses must not
    /// grow the stack.
    fn settle(&mut self) -> Result<()> {
        if self.settled {
            return Ok(());
        }
        while self.left.has_next()? {
            let row = self.left.current()?;
            match self.right_contains(&row) {
                Ok(true) => break,
                Ok(false) => self.left.shift()?,
                Err(e) => {
                    self.left.shift()?;
                    return Err(e);
                }
            }
        }
        self.settled = true;
        Ok(())
    }
}

impl Cursor for IntersectCursor {
    fn name(&self) -> &'static str {
        "intersect"
    }

    fn has_next(&mut self) -> Result<bool> {
        self.settle()?;
        self.left.has_next()
    }

    fn current(&mut self) -> Result<Tuple> {
        if !self.has_next()? {
            return Err(CursorError::Exhausted);
        }
        self.left.current()
    }

    fn shift(&mut self) -> Result<()> {
        if !self.has_next()? {
            return Ok(());
        }
        self.left.shift()?;
        self.settled = false;
        Ok(())
    }

    fn rollback(&mut self) {
        self.left.rollback();
        self.right.rollback();
        self.settled = false;
    }

    fn copy(&self) -> Box<dyn Cursor> {
        Box::new(Self::new(self.left.copy(), self.right.copy()))
    }

    fn children(&self) -> Vec<&dyn Cursor> {
        vec![self.left.as_ref(), self.right.as_ref()]
    }
}
