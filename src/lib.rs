#![forbid(unsafe_code)]
//! rowgen: lazy combinatorial row generation for data-driven tests.
//!
//! Build `ValueSet`s from pools of parameter values, combine them with
//! `multiply`, `pseudo_multiply`, `unite`, `intersect` and `filter`, and hand
//! the resulting row stream (plus its not-applicable and excluded-row
//! markers) to a test runner.
//!
//! ```
//! use rowgen::prelude::*;
//!
//! let browsers = ValueSet::of(["chrome", "firefox"]);
//! let sizes = ValueSet::of([320i64, 768, 1280]);
//! let rows = browsers.multiply(&sizes).rows().unwrap();
//! assert_eq!(rows.len(), 6);
//! ```

pub use rowgen_core as core;
pub use rowgen_cursor as cursor;
pub use rowgen_set as set;

pub mod prelude {
    pub use rowgen_core::prelude::*;
    pub use rowgen_core::tuple;
    pub use rowgen_cursor::{
        BoxError, Combinator, Cursor, CursorError, Mapped, Policy, RowIter, RowMapper,
    };
    pub use rowgen_set::{
        GeneratedRow, IntoRow, IntoValueSet, RowDisposition, RunnableRows, ValueSet,
    };
}
