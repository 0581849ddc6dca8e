//! Materialized cursor ("create cache").
//!
//! Drains an upstream cursor exactly once into a shared table and then walks
//! that table like a leaf. Any mapping functions embedded upstream run once,
//! during the drain, no matter how often the result is re-iterated or copied.

use std::sync::Arc;

use rowgen_core::config::GeneratorConfig;
use rowgen_core::types::Tuple;

use crate::error::{CursorError, Result};
use crate::leaf::LeafCursor;
use crate::trace;
use crate::traits::Cursor;

/// Pull every remaining row out of `cursor`, starting from its first row.
///
/// Fails with `CursorError::RowLimit` as soon as more than `limit` rows have
/// been produced.
pub fn drain(cursor: &mut dyn Cursor, limit: usize) -> Result<Vec<Tuple>> {
    cursor.rollback();
    let mut rows = Vec::new();
    while cursor.has_next()? {
        if rows.len() == limit {
            return Err(CursorError::RowLimit { limit });
        }
        rows.push(cursor.current()?);
        cursor.shift()?;
    }
    Ok(rows)
}

#[derive(Debug, Clone)]
pub struct MaterializedCursor {
    source: &'static str,
    table: LeafCursor,
}

impl MaterializedCursor {
    pub fn from_cursor(mut source: Box<dyn Cursor>, cfg: &GeneratorConfig) -> Result<Self> {
        let rows = drain(source.as_mut(), cfg.max_materialized_rows)?;
        trace::materialized(source.name(), rows.len());
        Ok(Self {
            source: source.name(),
            table: LeafCursor::new(rows),
        })
    }

    pub fn rows(&self) -> &Arc<[Tuple]> {
        self.table.rows()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Cursor for MaterializedCursor {
    fn name(&self) -> &'static str {
        "cache"
    }

    fn describe(&self) -> String {
        format!("cache [{} rows from {}]", self.table.len(), self.source)
    }

    fn has_next(&mut self) -> Result<bool> {
        self.table.has_next()
    }

    fn current(&mut self) -> Result<Tuple> {
        self.table.current()
    }

    fn shift(&mut self) -> Result<()> {
        self.table.shift()
    }

    fn rollback(&mut self) {
        self.table.rollback();
    }

    fn copy(&self) -> Box<dyn Cursor> {
        Box::new(Self {
            source: self.source,
            table: LeafCursor::from_shared(Arc::clone(self.table.rows())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combine::test_util::{collect, ints};
    use crate::combine::FullProduct;
    use crate::transform::{RowMapper, TransformCursor};
    use rowgen_core::types::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn drains_once_and_replays_without_mapping_again() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let mapper = RowMapper::infallible(move |row: &[Value]| {
            seen.fetch_add(1, Ordering::SeqCst);
            Tuple::from(row)
        });
        let upstream = Box::new(TransformCursor::new(
            Box::new(FullProduct::new(ints(&[1, 2]), ints(&[3, 4]))),
            mapper,
        ));

        let mut cache =
            MaterializedCursor::from_cursor(upstream, &GeneratorConfig::default()).expect("drain");
        assert_eq!(calls.load(Ordering::SeqCst), 4);

        let expected = vec![vec![1, 3], vec![1, 4], vec![2, 3], vec![2, 4]];
        assert_eq!(collect(&mut cache), expected);
        assert_eq!(collect(cache.copy().as_mut()), expected);
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn row_limit_is_enforced() {
        let cfg = GeneratorConfig::default().with_max_materialized_rows(3);
        let err = MaterializedCursor::from_cursor(ints(&[1, 2, 3, 4]), &cfg).expect_err("limit");
        assert!(matches!(err, CursorError::RowLimit { limit: 3 }));

        let exact = MaterializedCursor::from_cursor(ints(&[1, 2, 3]), &cfg).expect("fits");
        assert_eq!(exact.len(), 3);
    }
}
