//! Row transform ("filter"): maps each upstream row to zero, one, or many
//! downstream rows through a user function.
//!
//! The mapping function runs lazily, one upstream row at a time, only when
//! output is demanded. Building or copying a transform never calls it. When
//! a mapping drops rows, the advance loop pulls the next upstream row in a
//! plain loop, so arbitrarily long runs of dropped rows use constant stack.

use std::fmt;
use std::sync::Arc;

use rowgen_core::types::{Tuple, Value};

use crate::error::{BoxError, CursorError, Result};
use crate::trace;
use crate::traits::Cursor;

/// Output of a mapping function for one upstream row.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Mapped {
    /// Drop the upstream row.
    #[default]
    Nothing,
    /// Replace it with one row.
    One(Tuple),
    /// Expand it into several rows, in order.
    Many(Vec<Tuple>),
}

impl Mapped {
    pub fn into_rows(self) -> Vec<Tuple> {
        match self {
            Mapped::Nothing => Vec::new(),
            Mapped::One(row) => vec![row],
            Mapped::Many(rows) => rows,
        }
    }
}

impl From<()> for Mapped {
    fn from(_: ()) -> Self {
        Mapped::Nothing
    }
}

impl From<Tuple> for Mapped {
    fn from(row: Tuple) -> Self {
        Mapped::One(row)
    }
}

impl From<Vec<Tuple>> for Mapped {
    fn from(rows: Vec<Tuple>) -> Self {
        Mapped::Many(rows)
    }
}

impl From<Option<Tuple>> for Mapped {
    fn from(row: Option<Tuple>) -> Self {
        row.map(Mapped::One).unwrap_or(Mapped::Nothing)
    }
}

type MapFn = dyn Fn(&[Value]) -> std::result::Result<Mapped, BoxError> + Send + Sync;

/// A mapping function plus its declared arity.
///
/// With a declared arity, rows of any other width are rejected with
/// `CursorError::Arity` before the function runs. Varargs mappers accept
/// every row and may check `row.len()` themselves.
#[derive(Clone)]
pub struct RowMapper {
    f: Arc<MapFn>,
    arity: Option<usize>,
}

impl RowMapper {
    pub fn varargs<F, M>(f: F) -> Self
    where
        F: Fn(&[Value]) -> std::result::Result<M, BoxError> + Send + Sync + 'static,
        M: Into<Mapped>,
    {
        Self {
            f: Arc::new(move |row: &[Value]| f(row).map(Into::into)),
            arity: None,
        }
    }

    pub fn with_arity<F, M>(arity: usize, f: F) -> Self
    where
        F: Fn(&[Value]) -> std::result::Result<M, BoxError> + Send + Sync + 'static,
        M: Into<Mapped>,
    {
        Self {
            arity: Some(arity),
            ..Self::varargs(f)
        }
    }

    /// Varargs mapper that cannot fail.
    pub fn infallible<F, M>(f: F) -> Self
    where
        F: Fn(&[Value]) -> M + Send + Sync + 'static,
        M: Into<Mapped>,
    {
        Self::varargs(move |row: &[Value]| Ok::<_, BoxError>(f(row)))
    }

    /// Keep rows for which `keep` returns true, unchanged.
    pub fn predicate<F>(keep: F) -> Self
    where
        F: Fn(&[Value]) -> bool + Send + Sync + 'static,
    {
        Self::infallible(move |row: &[Value]| {
            if keep(row) {
                Mapped::One(Tuple::from(row))
            } else {
                Mapped::Nothing
            }
        })
    }

    pub fn arity(&self) -> Option<usize> {
        self.arity
    }

    pub fn apply(&self, row: &Tuple) -> Result<Mapped> {
        if let Some(expected) = self.arity {
            if expected != row.arity() {
                return Err(CursorError::Arity {
                    expected,
                    actual: row.arity(),
                });
            }
        }
        (self.f)(row.values()).map_err(|source| CursorError::Mapping {
            row: row.clone(),
            source,
        })
    }
}

impl fmt::Debug for RowMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowMapper")
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

pub struct TransformCursor {
    parent: Box<dyn Cursor>,
    mapper: RowMapper,
    /// Output rows produced by the last upstream row that mapped to anything.
    expansion: Vec<Tuple>,
    pos: usize,
    /// `expansion` is consumed (or never filled) and must be refilled before
    /// the next read. Stays set if a mapping fault interrupts the refill, so
    /// the next read resumes with the following upstream row.
    needs_fill: bool,
}

impl TransformCursor {
    pub fn new(parent: Box<dyn Cursor>, mapper: RowMapper) -> Self {
        Self {
            parent,
            mapper,
            expansion: Vec::new(),
            pos: 0,
            needs_fill: true,
        }
    }

    fn fill(&mut self) -> Result<()> {
        self.expansion.clear();
        self.pos = 0;
        let mut dropped = 0usize;
        while self.parent.has_next()? {
            let row = self.parent.current()?;
            // Step past the row before mapping it: a fault must not pin the
            // cursor on the offending row.
            self.parent.shift()?;
            let rows = self.mapper.apply(&row)?.into_rows();
            if !rows.is_empty() {
                self.expansion = rows;
                break;
            }
            dropped += 1;
        }
        trace::dropped_run(dropped);
        self.needs_fill = false;
        Ok(())
    }

    fn ensure_filled(&mut self) -> Result<()> {
        if self.needs_fill {
            self.fill()?;
        }
        Ok(())
    }
}

impl Cursor for TransformCursor {
    fn name(&self) -> &'static str {
        "filter"
    }

    fn describe(&self) -> String {
        match self.mapper.arity {
            Some(n) => format!("filter [arity {}]", n),
            None => "filter [varargs]".to_string(),
        }
    }

    fn has_next(&mut self) -> Result<bool> {
        self.ensure_filled()?;
        Ok(self.pos < self.expansion.len())
    }

    fn current(&mut self) -> Result<Tuple> {
        self.ensure_filled()?;
        self.expansion
            .get(self.pos)
            .cloned()
            .ok_or(CursorError::Exhausted)
    }

    fn shift(&mut self) -> Result<()> {
        self.ensure_filled()?;
        if self.pos < self.expansion.len() {
            self.pos += 1;
            if self.pos == self.expansion.len() {
                self.needs_fill = true;
            }
        }
        Ok(())
    }

    fn rollback(&mut self) {
        self.parent.rollback();
        self.expansion.clear();
        self.pos = 0;
        self.needs_fill = true;
    }

    fn copy(&self) -> Box<dyn Cursor> {
        Box::new(Self::new(self.parent.copy(), self.mapper.clone()))
    }

    fn children(&self) -> Vec<&dyn Cursor> {
        vec![self.parent.as_ref()]
    }
}
