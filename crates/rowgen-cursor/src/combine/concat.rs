//! Union ("unite"): every left row, then every right row.
//!
//! Row widths may differ between the two sides; the output then simply has
//! non-uniform arity.

use rowgen_core::types::Tuple;

use crate::error::Result;
use crate::traits::Cursor;

pub struct ConcatCursor {
    left: Box<dyn Cursor>,
    right: Box<dyn Cursor>,
    on_right: bool,
}

impl ConcatCursor {
    pub fn new(left: Box<dyn Cursor>, right: Box<dyn Cursor>) -> Self {
        Self {
            left,
            right,
            on_right: false,
        }
    }

    /// Switch to the right side once the left one is drained.
    fn active(&mut self) -> Result<&mut Box<dyn Cursor>> {
        if !self.on_right && !self.left.has_next()? {
            self.on_right = true;
        }
        Ok(if self.on_right {
            &mut self.right
        } else {
            &mut self.left
        })
    }
}

impl Cursor for ConcatCursor {
    fn name(&self) -> &'static str {
        "unite"
    }

    fn has_next(&mut self) -> Result<bool> {
        self.active()?.has_next()
    }

    fn current(&mut self) -> Result<Tuple> {
        self.active()?.current()
    }

    fn shift(&mut self) -> Result<()> {
        self.active()?.shift()
    }

    fn rollback(&mut self) {
        self.left.rollback();
        self.right.rollback();
        self.on_right = false;
    }

    fn copy(&self) -> Box<dyn Cursor> {
        Box::new(Self::new(self.left.copy(), self.right.copy()))
    }

    fn children(&self) -> Vec<&dyn Cursor> {
        vec![self.left.as_ref(), self.right.as_ref()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combine::full::FullProduct;
    use crate::combine::test_util::{collect, failing, ints, pull_all};

    #[test]
    fn left_rows_first() {
        let mut c = ConcatCursor::new(ints(&[1, 2]), ints(&[3, 4, 5]));
        assert_eq!(
            collect(&mut c),
            vec![vec![1], vec![2], vec![3], vec![4], vec![5]]
        );
    }

    #[test]
    fn mixed_widths_are_allowed() {
        let wide = Box::new(FullProduct::new(ints(&[1]), ints(&[2])));
        let mut c = ConcatCursor::new(ints(&[0]), wide);
        assert_eq!(collect(&mut c), vec![vec![0], vec![1, 2]]);
    }

    #[test]
    fn empty_sides_are_skipped() {
        let mut c = ConcatCursor::new(ints(&[]), ints(&[7]));
        assert_eq!(collect(&mut c), vec![vec![7]]);
        let mut c = ConcatCursor::new(ints(&[]), ints(&[]));
        assert!(collect(&mut c).is_empty());
    }

    #[test]
    fn faults_on_either_side_keep_the_rest() {
        let c = ConcatCursor::new(failing(&[1, 2, 3], 2), failing(&[7, 8], 7));
        assert_eq!(
            pull_all(Box::new(c)),
            vec![Ok(vec![1]), Err(()), Ok(vec![3]), Err(()), Ok(vec![8])]
        );
    }
}
