//! Integration test: element construction, destruction, and panic safety.
//!
//! Every element the container creates must be dropped exactly once,
//! whether it leaves through erase, pop, clear, assignment, or the
//! container's own drop. A clone that panics part-way must leave the
//! container as it was and must not leak the clones already made.

use std::panic::{catch_unwind, AssertUnwindSafe};

use slotvec::SlotVec;
use slotvec_test_utils::{CloneBudget, FailingClone, Ledger, Tracked};

fn tracked(values: &[i32], ledger: &Ledger) -> SlotVec<Tracked<i32>> {
    let mut v = SlotVec::new();
    for &value in values {
        v.push_back(&Tracked::new(value, ledger));
    }
    v
}

fn values(v: &SlotVec<Tracked<i32>>) -> Vec<i32> {
    v.iter().map(|t| *t.value()).collect()
}

// ── Drop accounting ──────────────────────────────────────────────────

#[test]
fn growth_relocates_without_cloning() {
    let ledger = Ledger::new();
    let v = tracked(&[1, 2, 3, 4, 5, 6, 7, 8, 9], &ledger);
    // One clone per push_back; the temporaries are already dropped.
    assert_eq!(ledger.clones(), 9);
    assert_eq!(ledger.live(), 9);
    assert_eq!(v.capacity(), 16);
    drop(v);
    assert_eq!(ledger.live(), 0);
}

#[test]
fn removal_paths_drop_each_element_once() {
    let ledger = Ledger::new();
    let mut v = tracked(&[1, 2, 3, 4, 5, 6], &ledger);

    v.erase(0).unwrap();
    assert_eq!(ledger.live(), 5);
    v.pop_back().unwrap();
    assert_eq!(ledger.live(), 4);
    v.erase(1).unwrap();
    assert_eq!(values(&v), [2, 4, 5]);
    assert_eq!(ledger.live(), 3);

    v.clear();
    assert_eq!(ledger.live(), 0);
    assert_eq!(ledger.drops(), ledger.created() + ledger.clones());
}

#[test]
fn insert_shifts_without_extra_copies() {
    let ledger = Ledger::new();
    let mut v = tracked(&[1, 2, 3], &ledger);
    let before = ledger.clones();
    let probe = Tracked::new(9, &ledger);
    v.insert(0, &probe).unwrap();
    v.insert(2, &probe).unwrap();
    assert_eq!(ledger.clones(), before + 2);
    assert_eq!(values(&v), [9, 1, 9, 2, 3]);
    drop(probe);
    drop(v);
    assert_eq!(ledger.live(), 0);
}

#[test]
fn assignment_releases_previous_elements() {
    let ledger = Ledger::new();
    let mut dst = tracked(&[1, 2, 3, 4], &ledger);
    let src = tracked(&[7, 8], &ledger);
    let id = dst.id();

    dst.clone_from(&src);
    assert_eq!(values(&dst), [7, 8]);
    assert_eq!(dst.capacity(), 2);
    assert_eq!(dst.id(), id);
    assert_eq!(ledger.live(), 4);

    drop(dst);
    drop(src);
    assert_eq!(ledger.live(), 0);
}

#[test]
fn assigned_copy_is_independent_of_source() {
    let ledger = Ledger::new();
    let src = tracked(&[1, 2, 3], &ledger);
    let mut dst = tracked(&[9], &ledger);

    dst.clone_from(&src);
    dst.push_back(&Tracked::new(4, &ledger));
    *dst.at_mut(0).unwrap() = Tracked::new(10, &ledger);
    dst.erase(1).unwrap();

    assert_eq!(values(&dst), [10, 3, 4]);
    assert_eq!(values(&src), [1, 2, 3]);
    assert_eq!(ledger.live(), 6);

    drop(dst);
    assert_eq!(values(&src), [1, 2, 3]);
    drop(src);
    assert_eq!(ledger.live(), 0);
}

#[test]
fn self_assignment_through_clone_keeps_contents() {
    let ledger = Ledger::new();
    let mut v = tracked(&[1, 2, 3], &ledger);
    let snapshot = v.clone();
    v.clone_from(&snapshot);
    assert_eq!(values(&v), [1, 2, 3]);
    drop(snapshot);
    drop(v);
    assert_eq!(ledger.live(), 0);
}

#[test]
fn shrink_to_fit_preserves_elements() {
    let ledger = Ledger::new();
    let mut v = tracked(&[1, 2, 3, 4, 5], &ledger);
    v.pop_back().unwrap();
    let clones = ledger.clones();
    v.shrink_to_fit();
    assert_eq!(v.capacity(), 4);
    assert_eq!(ledger.clones(), clones);
    assert_eq!(values(&v), [1, 2, 3, 4]);
}

// ── Panic safety ─────────────────────────────────────────────────────

fn failing(values: &[i32], budget: &CloneBudget) -> SlotVec<FailingClone> {
    budget.set(values.len());
    let mut v = SlotVec::new();
    for &value in values {
        v.push_back(&FailingClone::new(value, budget));
    }
    v
}

fn failing_values(v: &SlotVec<FailingClone>) -> Vec<i32> {
    v.iter().map(|f| f.value).collect()
}

#[test]
fn panicking_push_back_leaves_container_unchanged() {
    let budget = CloneBudget::new(0);
    let mut v = failing(&[1, 2, 3, 4], &budget);
    assert_eq!(v.capacity(), 4);

    // The next push would grow; the clone fails before any reallocation.
    let result = catch_unwind(AssertUnwindSafe(|| {
        v.push_back(&FailingClone::new(5, &budget));
    }));
    assert!(result.is_err());
    assert_eq!(failing_values(&v), [1, 2, 3, 4]);
    assert_eq!(v.capacity(), 4);
}

#[test]
fn panicking_insert_leaves_container_unchanged() {
    let budget = CloneBudget::new(0);
    let mut v = failing(&[1, 2, 3], &budget);

    let result = catch_unwind(AssertUnwindSafe(|| {
        let _ = v.insert(1, &FailingClone::new(9, &budget));
    }));
    assert!(result.is_err());
    assert_eq!(failing_values(&v), [1, 2, 3]);
    assert_eq!(v.capacity(), 4);
}

#[test]
fn panicking_clone_drops_partial_copy() {
    let ledger = Ledger::new();
    let budget = CloneBudget::new(4);
    let mut v = SlotVec::new();
    for value in 0..4 {
        v.push_back(&Tracked::new(FailingClone::new(value, &budget), &ledger));
    }
    assert_eq!(ledger.live(), 4);

    budget.set(2);
    let result = catch_unwind(AssertUnwindSafe(|| v.clone()));
    assert!(result.is_err());
    // The two completed clones were dropped during unwinding.
    assert_eq!(ledger.live(), 4);
    assert_eq!(v.len(), 4);

    drop(v);
    assert_eq!(ledger.live(), 0);
}

#[test]
fn panicking_assignment_leaves_destination_empty() {
    let ledger = Ledger::new();
    let budget = CloneBudget::new(3);
    let mut src = SlotVec::new();
    for value in 0..3 {
        src.push_back(&Tracked::new(FailingClone::new(value, &budget), &ledger));
    }
    budget.set(1);
    let mut dst = SlotVec::new();
    dst.push_back(&Tracked::new(FailingClone::new(42, &budget), &ledger));

    let result = catch_unwind(AssertUnwindSafe(|| dst.clone_from(&src)));
    assert!(result.is_err());
    assert!(dst.is_empty());
    assert_eq!(ledger.live(), 3);

    drop(src);
    assert_eq!(ledger.live(), 0);
}
