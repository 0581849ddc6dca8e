//! Cartesian product ("multiply").
//!
//! Rows are `left ++ right`, right cycling fastest:
//! `(l0,r0) (l0,r1) .. (l0,rn) (l1,r0) ..`. If either side starts empty the
//! product is empty.
//!
//! Advancing is split in two: `shift` steps the right side and leaves a
//! pending carry, which the next `has_next` resolves (roll the right side
//! back and step the left one if the right side ran dry). A fault raised by
//! the right side while resolving leaves the carry pending, so the next pull
//! picks up where the fault interrupted instead of losing the left rows.

use rowgen_core::types::Tuple;

use crate::error::{CursorError, Result};
use crate::traits::Cursor;

pub struct FullProduct {
    left: Box<dyn Cursor>,
    right: Box<dyn Cursor>,
    carry: bool,
}

impl FullProduct {
    pub fn new(left: Box<dyn Cursor>, right: Box<dyn Cursor>) -> Self {
        Self {
            left,
            right,
            carry: false,
        }
    }

    fn resolve_carry(&mut self) -> Result<()> {
        if !self.carry {
            return Ok(());
        }
        if self.right.has_next()? {
            self.carry = false;
            return Ok(());
        }
        self.carry = false;
        self.right.rollback();
        self.left.shift()
    }
}

impl Cursor for FullProduct {
    fn name(&self) -> &'static str {
        "multiply"
    }

    fn has_next(&mut self) -> Result<bool> {
        self.resolve_carry()?;
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
        self.carry = true;
        self.right.shift()?;
        self.resolve_carry()
    }

    fn rollback(&mut self) {
        self.left.rollback();
        self.right.rollback();
        self.carry = false;
    }

    fn copy(&self) -> Box<dyn Cursor> {
        Box::new(Self::new(self.left.copy(), self.right.copy()))
    }

    fn children(&self) -> Vec<&dyn Cursor> {
        vec![self.left.as_ref(), self.right.as_ref()]
    }
}
