#![forbid(unsafe_code)]
//! rowgen-cursor: the cursor algebra behind row generation.
//!
//! Design intent:
//! - Every node implements [`Cursor`]: a pull-based, restartable, copyable
//!   pointer into a finite tuple sequence.
//! - Leaves own nothing mutable but an index; tables are shared via `Arc`.
//! - Binary nodes are built through a [`Combinator`] so callers can plug in
//!   their own policies next to the built-in [`Policy`] variants.
//! - Nothing here evaluates eagerly except `materialize`/`reduce`, which are
//!   explicit about it.

pub mod combine;
pub mod error;
pub mod leaf;
pub mod materialize;
pub mod reduce;
pub mod root;
pub mod trace;
pub mod traits;
pub mod transform;

pub use combine::{
    AlignedProduct, Combinator, ConcatCursor, FullProduct, IntersectCursor, Policy,
};
pub use error::{BoxError, CursorError, Result};
pub use leaf::LeafCursor;
pub use materialize::{drain, MaterializedCursor};
pub use reduce::{reduce_rows, ReductionCursor};
pub use root::RowIter;
pub use traits::{explain, Cursor};
pub use transform::{Mapped, RowMapper, TransformCursor};
