#![forbid(unsafe_code)]
//! rowgen-set: the user-facing `ValueSet` algebra.
//!
//! A `ValueSet` is an immutable handle on a cursor prototype plus two pieces
//! of runner-facing metadata. Every operation builds a new set from copies of
//! its operands' cursors; nothing is ever mutated in place, and every
//! iteration runs over a private copy of the tree.

pub mod adapter;
pub mod disposition;
pub mod value_set;

pub use adapter::{IntoRow, IntoValueSet};
pub use disposition::{GeneratedRow, RowDisposition, RunnableRows};
pub use value_set::ValueSet;

pub use rowgen_cursor::{BoxError, Combinator, CursorError, Mapped, Policy, RowMapper};
