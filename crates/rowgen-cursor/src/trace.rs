//! Tracing hooks (feature: `tracing`).
//!
//! Each hook compiles to nothing unless the feature is enabled, so the
//! cursor hot path stays free of logging overhead by default.

#[cfg(feature = "tracing")]
pub fn materialized(source: &str, rows: usize) {
    tracing::trace!(%source, rows, "materialized cursor");
}

#[cfg(not(feature = "tracing"))]
pub fn materialized(_source: &str, _rows: usize) {}

#[cfg(feature = "tracing")]
pub fn reduced(before: usize, after: usize, ratio: f64) {
    tracing::trace!(before, after, ratio, "reduced rows");
}

#[cfg(not(feature = "tracing"))]
pub fn reduced(_before: usize, _after: usize, _ratio: f64) {}

#[cfg(feature = "tracing")]
pub fn dropped_run(dropped: usize) {
    if dropped > 0 {
        tracing::trace!(dropped, "transform dropped consecutive rows");
    }
}

#[cfg(not(feature = "tracing"))]
pub fn dropped_run(_dropped: usize) {}

#[cfg(feature = "tracing")]
pub fn iteration_finished(root: &str, rows: u64) {
    tracing::debug!(%root, rows, "iteration finished");
}

#[cfg(not(feature = "tracing"))]
pub fn iteration_finished(_root: &str, _rows: u64) {}
