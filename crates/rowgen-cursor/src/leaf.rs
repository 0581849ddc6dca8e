//! Leaf cursor over a fixed, pre-built table of tuples.

use std::sync::Arc;

use rowgen_core::types::Tuple;

use crate::error::{CursorError, Result};
use crate::traits::Cursor;

/// Walks a shared table by index. Copies share the table, never the index.
#[derive(Debug, Clone)]
pub struct LeafCursor {
    rows: Arc<[Tuple]>,
    index: usize,
}

impl LeafCursor {
    pub fn new(rows: Vec<Tuple>) -> Self {
        Self::from_shared(rows.into())
    }

    pub fn from_shared(rows: Arc<[Tuple]>) -> Self {
        Self { rows, index: 0 }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &Arc<[Tuple]> {
        &self.rows
    }
}

impl Cursor for LeafCursor {
    fn name(&self) -> &'static str {
        "leaf"
    }

    fn describe(&self) -> String {
        format!("leaf [{} rows]", self.rows.len())
    }

    fn has_next(&mut self) -> Result<bool> {
        Ok(self.index < self.rows.len())
    }

    fn current(&mut self) -> Result<Tuple> {
        self.rows
            .get(self.index)
            .cloned()
            .ok_or(CursorError::Exhausted)
    }

    fn shift(&mut self) -> Result<()> {
        if self.index < self.rows.len() {
            self.index += 1;
        }
        Ok(())
    }

    fn rollback(&mut self) {
        self.index = 0;
    }

    fn copy(&self) -> Box<dyn Cursor> {
        Box::new(Self::from_shared(Arc::clone(&self.rows)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowgen_core::tuple;

    #[test]
    fn walks_rolls_back_and_copies_fresh() {
        let mut leaf = LeafCursor::new(vec![tuple!(1), tuple!(2)]);
        assert_eq!(leaf.current().expect("first"), tuple!(1));
        leaf.shift().expect("shift");

        let mut copy = leaf.copy();
        assert_eq!(copy.current().expect("copy starts over"), tuple!(1));

        leaf.shift().expect("shift");
        assert!(!leaf.has_next().expect("has_next"));
        assert!(matches!(leaf.current(), Err(CursorError::Exhausted)));
        leaf.shift().expect("shift past end is a no-op");

        leaf.rollback();
        assert_eq!(leaf.current().expect("after rollback"), tuple!(1));
    }

    #[test]
    fn empty_leaf_has_nothing() {
        let mut leaf = LeafCursor::empty();
        assert!(!leaf.has_next().expect("has_next"));
        leaf.shift().expect("no-op");
        assert!(!leaf.has_next().expect("has_next"));
    }
}
