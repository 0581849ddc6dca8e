//! Convenient re-exports for downstream crates.

pub use crate::applicability::Applicability;
pub use crate::config::GeneratorConfig;
pub use crate::error::{Error, Result};
pub use crate::excluded::{ExcludedIndices, IndexRange};
pub use crate::hash::Hash256;
pub use crate::types::{Tuple, Value};
