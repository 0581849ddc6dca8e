#![forbid(unsafe_code)]
//! rowgen-core: shared data model for the row generation engine.
//!
//! Everything here is plain data: values, tuples, the two runner-facing
//! markers (not-applicable status and excluded row ranges), configuration,
//! and stable hashing. Cursor logic lives in `rowgen-cursor`.

pub mod applicability;
pub mod config;
pub mod error;
pub mod excluded;
pub mod hash;
pub mod prelude;
pub mod types;

pub use error::{Error, Result};
