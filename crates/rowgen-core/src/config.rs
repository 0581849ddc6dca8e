//! Generator configuration that downstream crates can serialize/deserialize.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_MAX_MATERIALIZED_ROWS: usize = 1_000_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Hard cap on rows drained into memory by `create_cache`/`reduce_to`.
    /// Materializing more than this fails instead of exhausting memory.
    pub max_materialized_rows: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_materialized_rows: DEFAULT_MAX_MATERIALIZED_ROWS,
        }
    }
}

impl GeneratorConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `ROWGEN_MAX_MATERIALIZED_ROWS`: cap on materialized rows
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("ROWGEN_MAX_MATERIALIZED_ROWS") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.max_materialized_rows = v;
            }
        }

        cfg
    }

    pub fn with_max_materialized_rows(mut self, rows: usize) -> Self {
        self.max_materialized_rows = rows;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_materialized_rows == 0 {
            return Err(Error::Config(
                "max_materialized_rows must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
