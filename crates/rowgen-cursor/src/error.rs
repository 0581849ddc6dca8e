use rowgen_core::types::Tuple;
use thiserror::Error;

/// Error type user mapping functions return.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type local to rowgen-cursor.
pub type Result<T> = std::result::Result<T, CursorError>;

#[derive(Debug, Error)]
pub enum CursorError {
    #[error("cursor is exhausted: no current tuple")]
    Exhausted,

    #[error("wrong number of arguments: mapping expects {expected}, row has {actual}")]
    Arity { expected: usize, actual: usize },

    #[error("mapping function failed on row {row}: {source}")]
    Mapping {
        row: Tuple,
        #[source]
        source: BoxError,
    },

    #[error("materialization exceeded the limit of {limit} rows")]
    RowLimit { limit: usize },

    #[error(transparent)]
    Core(#[from] rowgen_core::Error),
}
