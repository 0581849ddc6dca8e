//! Aligned product ("pseudo multiply").
//!
//! Zips left and right positionally. The side that runs out first while the
//! other still has rows becomes the recycling side: it is rolled back every
//! time it runs dry, until the other side is exhausted. Equal lengths never
//! recycle. Combining 3 left rows with 7 right rows yields 7 rows whose left
//! component at row `i` is left row `i mod 3`.

use rowgen_core::types::Tuple;

use crate::error::{CursorError, Result};
use crate::traits::Cursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

pub struct AlignedProduct {
    left: Box<dyn Cursor>,
    right: Box<dyn Cursor>,
    /// Fixed once detected; kept across rollbacks since detection is
    /// deterministic for a given pair of children.
    recycling: Option<Side>,
    /// Both sides were stepped and recycling has not been settled yet. Left
    /// set when a child faults while settling, so the next pull retries.
    pending: bool,
}

impl AlignedProduct {
    pub fn new(left: Box<dyn Cursor>, right: Box<dyn Cursor>) -> Self {
        Self {
            left,
            right,
            recycling: None,
            pending: false,
        }
    }

    fn settle(&mut self) -> Result<()> {
        if !self.pending {
            return Ok(());
        }
        match self.recycling {
            None => {
                let left_more = self.left.has_next()?;
                let right_more = self.right.has_next()?;
                if !left_more && right_more {
                    self.recycling = Some(Side::Left);
                    self.left.rollback();
                } else if left_more && !right_more {
                    self.recycling = Some(Side::Right);
                    self.right.rollback();
                }
                // both dry: equal lengths, the node is exhausted.
            }
            // Once the leading side is dry the node is exhausted; the
            // recycling side is not asked again.
            Some(Side::Left) => {
                if self.right.has_next()? && !self.left.has_next()? {
                    self.left.rollback();
                }
            }
            Some(Side::Right) => {
                if self.left.has_next()? && !self.right.has_next()? {
                    self.right.rollback();
                }
            }
        }
        self.pending = false;
        Ok(())
    }
}

impl Cursor for AlignedProduct {
    fn name(&self) -> &'static str {
        "pseudo_multiply"
    }

    fn has_next(&mut self) -> Result<bool> {
        self.settle()?;
        Ok(self.left.has_next()? && self.right.has_next()?)
    }

    fn current(&mut self) -> Result<Tuple> {
        if !self.has_next()? {
            return Err(CursorError::Exhausted);
        }
        let l = self.left.current()?;
        let r = self.right.current()?;
        Ok(l.concat(&r))
    }

    fn shift(&mut self) -> Result<()> {
        if !self.has_next()? {
            return Ok(());
        }
        self.pending = true;
        // Step both sides even if one faults, so they stay in lockstep.
        let left = self.left.shift();
        let right = self.right.shift();
        left.and(right)?;
        self.settle()
    }

    fn rollback(&mut self) {
        self.left.rollback();
        self.right.rollback();
        self.pending = false;
    }

    fn copy(&self) -> Box<dyn Cursor> {
        Box::new(Self::new(self.left.copy(), self.right.copy()))
    }

    fn children(&self) -> Vec<&dyn Cursor> {
        vec![self.left.as_ref(), self.right.as_ref()]
    }
}
