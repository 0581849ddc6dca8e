//! Not-applicable and excluded-row metadata, plus shared-set iteration

use rowgen::prelude::*;
use std::sync::Arc;
use std::thread;

#[test]
fn test_not_applicable_propagates_through_operations() {
    let skipped = ValueSet::of([1i64, 2]).mark_not_applicable(Some("needs GPU".into()));
    let plain = ValueSet::of([10i64, 20]);

    for combined in [
        plain.multiply(&skipped),
        skipped.pseudo_multiply(&plain),
        plain.unite(&skipped),
        skipped.intersect(&plain),
        skipped.retain(|_| true),
    ] {
        assert!(!combined.is_applicable());
        assert_eq!(combined.not_applicable_reason(), Some("needs GPU"));
    }

    let cached = skipped.create_cache().unwrap();
    assert!(!cached.is_applicable());
    let reduced = skipped.reduce_to(0.5).unwrap();
    assert!(!reduced.is_applicable());
}

#[test]
fn test_left_reason_wins() {
    let a = ValueSet::of([1i64]).mark_not_applicable(Some("left".into()));
    let b = ValueSet::of([2i64]).mark_not_applicable(Some("right".into()));
    assert_eq!(a.multiply(&b).not_applicable_reason(), Some("left"));
    assert_eq!(b.multiply(&a).not_applicable_reason(), Some("right"));
}

#[test]
fn test_mark_applicable_overrides() {
    let set = ValueSet::of([1i64, 2])
        .mark_not_applicable(None)
        .multiply(ValueSet::of([3i64]));
    assert!(!set.is_applicable());
    assert_eq!(set.not_applicable_reason(), None);

    let restored = set.mark_applicable();
    assert!(restored.is_applicable());
    // The original is untouched.
    assert!(!set.is_applicable());
}

#[test]
fn test_not_applicable_does_not_change_rows() {
    let set = ValueSet::of(["x", "y"]);
    let marked = set.mark_not_applicable(Some("skip".into()));
    assert_eq!(marked.rows().unwrap(), set.rows().unwrap());
}

#[test]
fn test_excluded_rows_and_dispositions() {
    let set = ValueSet::of(0i64..6)
        .mark_excluded("1,3-4".parse::<ExcludedIndices>().unwrap());
    assert!(set.is_row_excluded(1));
    assert!(set.is_row_excluded(4));
    assert!(!set.is_row_excluded(5));

    let dispositions: Vec<RowDisposition> = set
        .runnable_rows()
        .map(|g| g.unwrap().disposition)
        .collect();
    assert_eq!(
        dispositions,
        vec![
            RowDisposition::Run,
            RowDisposition::Excluded,
            RowDisposition::Run,
            RowDisposition::Excluded,
            RowDisposition::Excluded,
            RowDisposition::Run,
        ]
    );
}

#[test]
fn test_mark_excluded_accumulates() {
    let set = ValueSet::of(0i64..10)
        .mark_excluded(ExcludedIndices::from_indices([2]).unwrap())
        .mark_excluded(ExcludedIndices::none().with_range(7, 8).unwrap());
    assert!(set.is_row_excluded(2));
    assert!(set.is_row_excluded(7));
    assert!(set.is_row_excluded(8));
    assert!(!set.is_row_excluded(3));
}

#[test]
fn test_excluded_rows_survive_cache_only() {
    let set = ValueSet::of(0i64..4).mark_excluded("0".parse().unwrap());
    assert!(set.create_cache().unwrap().is_row_excluded(0));
    assert!(!set.multiply(ValueSet::of([1i64])).is_row_excluded(0));
    assert!(!set.retain(|_| true).is_row_excluded(0));
}

#[test]
fn test_not_applicable_wins_over_excluded() {
    let set = ValueSet::of([1i64, 2])
        .mark_excluded("0".parse().unwrap())
        .mark_not_applicable(Some("off".into()));
    assert!(set
        .runnable_rows()
        .all(|g| g.unwrap().disposition == RowDisposition::NotApplicable));
}

#[test]
fn test_malformed_exclusions_fail_at_construction() {
    assert!("5-2".parse::<ExcludedIndices>().is_err());
    assert!("-1".parse::<ExcludedIndices>().is_err());
    assert!("a,b".parse::<ExcludedIndices>().is_err());
    assert!(ExcludedIndices::none().with_range(3, 1).is_err());
    assert!(ExcludedIndices::from_indices([-4]).is_err());
}

#[test]
fn test_concurrent_iteration_of_shared_set() {
    let set = Arc::new(
        ValueSet::of(0i64..50)
            .multiply(ValueSet::of(["a", "b", "c"]))
            .retain(|row| row[0].as_i64().map_or(false, |n| n % 2 == 0)),
    );
    let expected = set.fingerprint().unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let set = Arc::clone(&set);
            thread::spawn(move || set.fingerprint().unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
    assert_eq!(set.count().unwrap(), 75);
}

#[test]
fn test_interleaved_iterators_are_independent() {
    let set = ValueSet::of([1i64, 2, 3]);
    let mut a = set.iter();
    let mut b = set.iter();
    assert_eq!(a.next().unwrap().unwrap(), tuple!(1i64));
    assert_eq!(a.next().unwrap().unwrap(), tuple!(2i64));
    assert_eq!(b.next().unwrap().unwrap(), tuple!(1i64));
    assert_eq!(a.next().unwrap().unwrap(), tuple!(3i64));
    assert!(a.next().is_none());
    assert_eq!(b.next().unwrap().unwrap(), tuple!(2i64));
}

#[test]
fn test_generated_row_json_shape() {
    let set = ValueSet::of(["a", "b"]).mark_excluded("1".parse().unwrap());
    let lines: Vec<String> = set
        .runnable_rows()
        .map(|g| serde_json::to_string(&g.unwrap()).unwrap())
        .collect();
    assert_eq!(
        lines,
        vec![
            r#"{"index":0,"row":["a"],"disposition":"run"}"#,
            r#"{"index":1,"row":["b"],"disposition":"excluded"}"#,
        ]
    );
}
