//! Cursor trait: the protocol every node of a generation tree implements.
//!
//! A cursor points at a *current* tuple or is exhausted. Consumers (or a
//! parent node's combination policy) drive it explicitly:
//!
//! ```text
//! while cursor.has_next()? {
//!     let row = cursor.current()?;
//!     cursor.shift()?;
//! }
//! ```
//!
//! Invariants:
//! - After `rollback()`, iterating again yields exactly the same sequence.
//! - `copy()` returns an independent cursor positioned at the start. It must
//!   not evaluate anything (no mapping calls, no draining).
//! - `shift()` on an exhausted cursor is a no-op.
//! - `has_next`/`current`/`shift` take `&mut self` because a cursor may need
//!   to look ahead (and may fault while doing so) to answer them.
//! - A fault never pins a cursor: after an error, the next call moves on
//!   past the row that faulted. An `Err` from `shift()` still counts as an
//!   advance, so callers must not shift again to retry.

use rowgen_core::types::Tuple;

use crate::error::Result;

pub trait Cursor: Send + Sync {
    /// Human-readable node name (stable), used by explain output and tracing.
    fn name(&self) -> &'static str;

    /// True iff a current tuple is available.
    fn has_next(&mut self) -> Result<bool>;

    /// The current tuple. Fails with `CursorError::Exhausted` when
    /// `has_next()` is false.
    fn current(&mut self) -> Result<Tuple>;

    /// Advance past the current tuple.
    fn shift(&mut self) -> Result<()>;

    /// Reset to the first tuple.
    fn rollback(&mut self);

    /// Independent clone positioned at the start, sharing only immutable data.
    fn copy(&self) -> Box<dyn Cursor>;

    /// One-line description for explain output; defaults to `name()`.
    fn describe(&self) -> String {
        self.name().to_string()
    }

    /// Direct child cursors, left to right.
    fn children(&self) -> Vec<&dyn Cursor> {
        Vec::new()
    }
}

impl<'a> std::fmt::Debug for dyn Cursor + 'a {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut t = f.debug_tuple(self.name());
        for child in self.children() {
            t.field(&child);
        }
        t.finish()
    }
}

/// Render a cursor tree as an indented outline, one node per line.
pub fn explain(cursor: &dyn Cursor) -> String {
    let mut out = String::new();
    explain_into(cursor, 0, &mut out);
    out
}

fn explain_into(cursor: &dyn Cursor, depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str(&cursor.describe());
    out.push('\n');
    for child in cursor.children() {
        explain_into(child, depth + 1, out);
    }
}
