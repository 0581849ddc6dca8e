//! Deterministic down-sampling ("reduce to").
//!
//! Given `n` rows and a survival ratio in `(0, 1)`, rows are removed at
//! evenly spaced positions:
//!
//! ```text
//! step    = n / (n - n * ratio)
//! current = 0       if ratio <= 1 - 1/n
//!           step    otherwise
//! while round(current) < remaining:
//!     remove row at round(current)   // index into the shrinking list
//!     current += step - 1
//! ```
//!
//! `round(current)` never decreases, so the shrinking-list index `k` maps to
//! original index `k + removed`, which lets us mark rows in one pass instead
//! of shifting the vector on every removal.

use rowgen_core::config::GeneratorConfig;
use rowgen_core::types::Tuple;
use rowgen_core::Error as CoreError;

use crate::error::Result;
use crate::leaf::LeafCursor;
use crate::materialize::drain;
use crate::trace;
use crate::traits::Cursor;

pub fn validate_ratio(ratio: f64) -> Result<()> {
    if ratio > 0.0 && ratio < 1.0 {
        Ok(())
    } else {
        Err(CoreError::Ratio(ratio).into())
    }
}

pub fn reduce_rows<T>(rows: Vec<T>, ratio: f64) -> Result<Vec<T>> {
    validate_ratio(ratio)?;
    let n = rows.len();
    if n == 0 {
        return Ok(rows);
    }

    let nf = n as f64;
    let step = nf / (nf - nf * ratio);
    let mut current = if ratio <= 1.0 - 1.0 / nf { 0.0 } else { step };
    let mut removed = 0usize;
    let mut dropped = vec![false; n];
    loop {
        let k = current.round() as usize;
        if k >= n - removed {
            break;
        }
        dropped[k + removed] = true;
        removed += 1;
        current += step - 1.0;
    }

    let kept: Vec<T> = rows
        .into_iter()
        .zip(dropped)
        .filter_map(|(row, gone)| (!gone).then_some(row))
        .collect();
    trace::reduced(n, kept.len(), ratio);
    Ok(kept)
}

#[derive(Debug, Clone)]
pub struct ReductionCursor {
    ratio: f64,
    source_rows: usize,
    table: LeafCursor,
}

impl ReductionCursor {
    /// Validates `ratio` before touching `source`, then drains and reduces.
    pub fn from_cursor(
        mut source: Box<dyn Cursor>,
        ratio: f64,
        cfg: &GeneratorConfig,
    ) -> Result<Self> {
        validate_ratio(ratio)?;
        let rows = drain(source.as_mut(), cfg.max_materialized_rows)?;
        let source_rows = rows.len();
        let kept = reduce_rows(rows, ratio)?;
        Ok(Self {
            ratio,
            source_rows,
            table: LeafCursor::new(kept),
        })
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Cursor for ReductionCursor {
    fn name(&self) -> &'static str {
        "reduce"
    }

    fn describe(&self) -> String {
        format!(
            "reduce [ratio {}, {} of {} rows]",
            self.ratio,
            self.table.len(),
            self.source_rows
        )
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
            ratio: self.ratio,
            source_rows: self.source_rows,
            table: LeafCursor::from_shared(std::sync::Arc::clone(self.table.rows())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CursorError;

    #[test]
    fn half_of_ten_keeps_even_positions() {
        let rows: Vec<i64> = (1..=10).collect();
        assert_eq!(reduce_rows(rows, 0.5).expect("reduce"), vec![2, 4, 6, 8, 10]);
    }

    #[test]
    fn matches_naive_removal() {
        fn naive(mut rows: Vec<usize>, ratio: f64) -> Vec<usize> {
            let n = rows.len() as f64;
            let step = n / (n - n * ratio);
            let mut current = if ratio <= 1.0 - 1.0 / n { 0.0 } else { step };
            while (current.round() as usize) < rows.len() {
                rows.remove(current.round() as usize);
                current += step - 1.0;
            }
            rows
        }
        for n in 1..40usize {
            for ratio in [0.05, 0.1, 0.25, 0.33, 0.5, 0.66, 0.75, 0.9, 0.99] {
                let rows: Vec<usize> = (0..n).collect();
                assert_eq!(
                    reduce_rows(rows.clone(), ratio).expect("reduce"),
                    naive(rows, ratio),
                    "n={n} ratio={ratio}"
                );
            }
        }
    }

    #[test]
    fn high_ratio_on_small_input_keeps_everything() {
        let rows: Vec<i64> = (0..10).collect();
        assert_eq!(reduce_rows(rows.clone(), 0.95).expect("reduce"), rows);
    }

    #[test]
    fn rejects_out_of_range_ratios() {
        for ratio in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            let err = reduce_rows(vec![1, 2, 3], ratio).expect_err("bad ratio");
            assert!(matches!(err, CursorError::Core(CoreError::Ratio(_))));
        }
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(reduce_rows(Vec::<i64>::new(), 0.5).expect("reduce").is_empty());
    }
}
