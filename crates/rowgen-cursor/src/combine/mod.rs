//! Binary combination policies.
//!
//! Every policy takes two child cursors and yields one. The four built-in
//! policies are closed under [`Policy`]; custom policies implement
//! [`Combinator`] directly and are accepted anywhere a `Policy` is.

pub mod aligned;
pub mod concat;
pub mod full;
pub mod intersect;

pub use aligned::AlignedProduct;
pub use concat::ConcatCursor;
pub use full::FullProduct;
pub use intersect::IntersectCursor;

use crate::traits::Cursor;

/// Builds a binary node from two (already copied) operand cursors.
pub trait Combinator: Send + Sync {
    /// Human-readable policy name (stable).
    fn name(&self) -> &'static str;

    fn combine(&self, left: Box<dyn Cursor>, right: Box<dyn Cursor>) -> Box<dyn Cursor>;
}

/// Built-in combination policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// Cartesian product; the right operand varies fastest.
    Full,
    /// Positional zip; the shorter operand recycles from its start.
    Aligned,
    /// All left rows, then all right rows.
    Concat,
    /// Left rows that also occur in the right operand.
    Intersect,
}

impl Combinator for Policy {
    fn name(&self) -> &'static str {
        match self {
            Policy::Full => "multiply",
            Policy::Aligned => "pseudo_multiply",
            Policy::Concat => "unite",
            Policy::Intersect => "intersect",
        }
    }

    fn combine(&self, left: Box<dyn Cursor>, right: Box<dyn Cursor>) -> Box<dyn Cursor> {
        match self {
            Policy::Full => Box::new(FullProduct::new(left, right)),
            Policy::Aligned => Box::new(AlignedProduct::new(left, right)),
            Policy::Concat => Box::new(ConcatCursor::new(left, right)),
            Policy::Intersect => Box::new(IntersectCursor::new(left, right)),
        }
    }
}
