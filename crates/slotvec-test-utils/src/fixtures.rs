//! Reusable element fixtures.
//!
//! - [`Tracked`]: wraps a value and reports every creation, clone, and drop
//!   to a [`Ledger`], so tests can assert that each element is dropped
//!   exactly once.
//! - [`FailingClone`]: clones succeed until a shared [`CloneBudget`] is
//!   spent, then panic. Used to check that a panicking copy leaves the
//!   container intact and leaks nothing.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct Counts {
    created: AtomicUsize,
    clones: AtomicUsize,
    drops: AtomicUsize,
}

/// Shared counters for a family of [`Tracked`] values.
///
/// Cloning a `Ledger` shares the counters.
#[derive(Clone, Default)]
pub struct Ledger {
    counts: Arc<Counts>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values created with [`Tracked::new`].
    pub fn created(&self) -> usize {
        self.counts.created.load(Ordering::SeqCst)
    }

    /// Successful clones.
    pub fn clones(&self) -> usize {
        self.counts.clones.load(Ordering::SeqCst)
    }

    /// Drops.
    pub fn drops(&self) -> usize {
        self.counts.drops.load(Ordering::SeqCst)
    }

    /// Values currently alive: created plus cloned minus dropped.
    pub fn live(&self) -> usize {
        self.created() + self.clones() - self.drops()
    }
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("created", &self.created())
            .field("clones", &self.clones())
            .field("drops", &self.drops())
            .finish()
    }
}

/// A value whose lifecycle is recorded in a [`Ledger`].
///
/// Equality and `Debug` look at the wrapped value only.
pub struct Tracked<T> {
    value: T,
    ledger: Ledger,
}

impl<T> Tracked<T> {
    pub fn new(value: T, ledger: &Ledger) -> Self {
        ledger.counts.created.fetch_add(1, Ordering::SeqCst);
        Self {
            value,
            ledger: ledger.clone(),
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }
}

impl<T: Clone> Clone for Tracked<T> {
    fn clone(&self) -> Self {
        // Clone the payload first: if it panics, nothing is recorded.
        let value = self.value.clone();
        self.ledger.counts.clones.fetch_add(1, Ordering::SeqCst);
        Self {
            value,
            ledger: self.ledger.clone(),
        }
    }
}

impl<T> Drop for Tracked<T> {
    fn drop(&mut self) {
        self.ledger.counts.drops.fetch_add(1, Ordering::SeqCst);
    }
}

impl<T: PartialEq> PartialEq for Tracked<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: fmt::Debug> fmt::Debug for Tracked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Tracked").field(&self.value).finish()
    }
}

/// Number of clones a family of [`FailingClone`] values may still make.
///
/// Cloning a `CloneBudget` shares the counter.
#[derive(Clone, Debug, Default)]
pub struct CloneBudget {
    remaining: Arc<AtomicUsize>,
}

impl CloneBudget {
    pub fn new(clones: usize) -> Self {
        Self {
            remaining: Arc::new(AtomicUsize::new(clones)),
        }
    }

    /// Reset the number of clones still allowed.
    pub fn set(&self, clones: usize) {
        self.remaining.store(clones, Ordering::SeqCst);
    }

    pub fn remaining(&self) -> usize {
        self.remaining.load(Ordering::SeqCst)
    }

    fn spend(&self) -> bool {
        self.remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

/// Panics on `clone` once its [`CloneBudget`] is exhausted.
///
/// Useful for testing copy-in paths: the container must clone the
/// caller's value before mutating anything, so a panic leaves it as it
/// was.
pub struct FailingClone {
    pub value: i32,
    budget: CloneBudget,
}

impl FailingClone {
    pub fn new(value: i32, budget: &CloneBudget) -> Self {
        Self {
            value,
            budget: budget.clone(),
        }
    }
}

impl Clone for FailingClone {
    fn clone(&self) -> Self {
        if !self.budget.spend() {
            panic!("clone budget exhausted cloning value {}", self.value);
        }
        Self {
            value: self.value,
            budget: self.budget.clone(),
        }
    }
}

impl PartialEq for FailingClone {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for FailingClone {}

impl fmt::Debug for FailingClone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FailingClone").field(&self.value).finish()
    }
}
