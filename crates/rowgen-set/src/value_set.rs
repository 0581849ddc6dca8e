//! `ValueSet`: persistent algebra over cursor prototypes.

use std::sync::Arc;

use rowgen_core::applicability::Applicability;
use rowgen_core::config::GeneratorConfig;
use rowgen_core::excluded::ExcludedIndices;
use rowgen_core::hash::{Hash256, StreamHasher};
use rowgen_core::types::{Tuple, Value};
use rowgen_cursor::{
    explain, Combinator, Cursor, CursorError, LeafCursor, MaterializedCursor, Policy,
    ReductionCursor, RowIter, RowMapper, TransformCursor,
};

use crate::adapter::{IntoRow, IntoValueSet};
use crate::disposition::RunnableRows;

type Result<T> = std::result::Result<T, CursorError>;

/// An immutable data set of generated rows.
///
/// Cloning is cheap: the cursor prototype is shared and never driven
/// directly. Iteration always works on a fresh `copy()` of it, so the same
/// set can be iterated repeatedly, concurrently from several threads, or from
/// inside a mapping function of its own pipeline.
#[derive(Clone, Debug)]
pub struct ValueSet {
    proto: Arc<dyn Cursor>,
    applicability: Applicability,
    excluded: ExcludedIndices,
}

impl ValueSet {
    pub fn from_cursor(cursor: Box<dyn Cursor>) -> Self {
        Self {
            proto: Arc::from(cursor),
            applicability: Applicability::Applicable,
            excluded: ExcludedIndices::none(),
        }
    }

    pub fn from_rows(rows: Vec<Tuple>) -> Self {
        Self::from_cursor(Box::new(LeafCursor::new(rows)))
    }

    /// One-column set, one row per value.
    pub fn of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::from_rows(values.into_iter().map(Tuple::single).collect())
    }

    pub fn empty() -> Self {
        Self::from_rows(Vec::new())
    }

    /// Same metadata, different cursor.
    fn derive(&self, cursor: Box<dyn Cursor>) -> Self {
        Self {
            proto: Arc::from(cursor),
            applicability: self.applicability.clone(),
            excluded: ExcludedIndices::none(),
        }
    }

    // ----- iteration -----

    /// A private cursor positioned at the first row.
    pub fn cursor(&self) -> Box<dyn Cursor> {
        self.proto.copy()
    }

    pub fn iter(&self) -> RowIter {
        RowIter::new(self.cursor())
    }

    /// Collect every row; stops at the first fault.
    pub fn rows(&self) -> Result<Vec<Tuple>> {
        self.iter().collect()
    }

    pub fn count(&self) -> Result<usize> {
        let mut n = 0;
        for row in self.iter() {
            row?;
            n += 1;
        }
        Ok(n)
    }

    /// Stable hash over the exact row sequence; equal across runs for
    /// deterministic inputs.
    pub fn fingerprint(&self) -> Result<Hash256> {
        let mut hasher = StreamHasher::new();
        for row in self.iter() {
            hasher.update(&row?)?;
        }
        Ok(hasher.finish())
    }

    /// Rows paired with what the runner should do with each of them.
    pub fn runnable_rows(&self) -> RunnableRows {
        RunnableRows::new(
            self.iter(),
            self.applicability.clone(),
            self.excluded.clone(),
        )
    }

    pub fn explain(&self) -> String {
        explain(self.proto.as_ref())
    }

    // ----- algebra -----

    /// Generic binary entry point. The result is not applicable if either
    /// operand is (left reason first); excluded rows are not carried over.
    pub fn operate(&self, other: impl IntoValueSet, combinator: &dyn Combinator) -> ValueSet {
        let other = other.into_value_set();
        let cursor = combinator.combine(self.cursor(), other.cursor());
        Self {
            proto: Arc::from(cursor),
            applicability: self.applicability.combine(&other.applicability),
            excluded: ExcludedIndices::none(),
        }
    }

    /// Cartesian product; `other` varies fastest.
    pub fn multiply(&self, other: impl IntoValueSet) -> ValueSet {
        self.operate(other, &Policy::Full)
    }

    /// Positional zip where the shorter side recycles.
    pub fn pseudo_multiply(&self, other: impl IntoValueSet) -> ValueSet {
        self.operate(other, &Policy::Aligned)
    }

    /// Rows of `self` followed by rows of `other`.
    pub fn unite(&self, other: impl IntoValueSet) -> ValueSet {
        self.operate(other, &Policy::Concat)
    }

    /// Rows of `self` that also occur in `other`, in `self`'s order.
    pub fn intersect(&self, other: impl IntoValueSet) -> ValueSet {
        self.operate(other, &Policy::Intersect)
    }

    /// Lazily map each row to zero, one or many rows. `mapper` is not called
    /// until rows are pulled.
    pub fn filter(&self, mapper: RowMapper) -> ValueSet {
        self.derive(Box::new(TransformCursor::new(self.cursor(), mapper)))
    }

    /// Shorthand for `filter(RowMapper::predicate(keep))`.
    pub fn retain<F>(&self, keep: F) -> ValueSet
    where
        F: Fn(&[Value]) -> bool + Send + Sync + 'static,
    {
        self.filter(RowMapper::predicate(keep))
    }

    /// Drain this set once, now, and return a set that replays the rows.
    /// Row numbering is unchanged, so excluded rows are kept.
    pub fn create_cache(&self) -> Result<ValueSet> {
        self.create_cache_with(&GeneratorConfig::from_env())
    }

    pub fn create_cache_with(&self, cfg: &GeneratorConfig) -> Result<ValueSet> {
        let cache = MaterializedCursor::from_cursor(self.cursor(), cfg)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(rows = cache.len(), "created value set cache");
        Ok(Self {
            excluded: self.excluded.clone(),
            ..self.derive(Box::new(cache))
        })
    }

    /// Keep roughly `ratio` of the rows at evenly spaced positions.
    /// `ratio` must lie in `(0, 1)`; it is checked before any row is drained.
    pub fn reduce_to(&self, ratio: f64) -> Result<ValueSet> {
        self.reduce_to_with(ratio, &GeneratorConfig::from_env())
    }

    pub fn reduce_to_with(&self, ratio: f64, cfg: &GeneratorConfig) -> Result<ValueSet> {
        let reduced = ReductionCursor::from_cursor(self.cursor(), ratio, cfg)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(rows = reduced.len(), ratio, "reduced value set");
        Ok(self.derive(Box::new(reduced)))
    }

    // ----- runner metadata -----

    /// Mark the whole set as unusable; the runner skips the owning test.
    pub fn mark_not_applicable(&self, reason: Option<String>) -> ValueSet {
        Self {
            applicability: Applicability::not_applicable(reason),
            ..self.clone()
        }
    }

    /// Clear a not-applicable status inherited from an operand.
    pub fn mark_applicable(&self) -> ValueSet {
        Self {
            applicability: Applicability::Applicable,
            ..self.clone()
        }
    }

    /// Mark specific generated rows (by index) to be skipped. Adds to any
    /// rows already excluded.
    pub fn mark_excluded(&self, excluded: ExcludedIndices) -> ValueSet {
        Self {
            excluded: self.excluded.union(&excluded),
            ..self.clone()
        }
    }

    pub fn applicability(&self) -> &Applicability {
        &self.applicability
    }

    pub fn is_applicable(&self) -> bool {
        self.applicability.is_applicable()
    }

    pub fn not_applicable_reason(&self) -> Option<&str> {
        self.applicability.reason()
    }

    pub fn excluded(&self) -> &ExcludedIndices {
        &self.excluded
    }

    pub fn is_row_excluded(&self, index: u64) -> bool {
        self.excluded.is_excluded(index)
    }
}

impl Default for ValueSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl<R: IntoRow> FromIterator<R> for ValueSet {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        ValueSet::from_rows(iter.into_iter().map(IntoRow::into_row).collect())
    }
}

impl<'a> IntoIterator for &'a ValueSet {
    type Item = Result<Tuple>;
    type IntoIter = RowIter;

    fn into_iter(self) -> RowIter {
        self.iter()
    }
}
