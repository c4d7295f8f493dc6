//! The [`SlotVec`] container.
//!
//! `SlotVec` is the public mutation surface over the storage manager. It
//! validates every caller-supplied index before touching storage, applies
//! the [`GrowthPolicy`] when the buffer is exhausted, and stamps cursors
//! with its [`ArrayId`].

use std::fmt;
use std::ops::{Index, IndexMut};
use std::slice;

use log::{debug, trace};
use slotvec_core::{ArrayId, SlotVecError};

use crate::config::GrowthPolicy;
use crate::cursor::{Cursor, CursorMut};
use crate::storage::Storage;

/// Contiguous, growable array with bounds-checked access and
/// origin-checked cursors.
///
/// Values are copied in: [`push_back`](SlotVec::push_back) and
/// [`insert`](SlotVec::insert) take `&T` and store a clone, which is made
/// before any mutation so a panicking `clone` leaves the container as it
/// was. Capacity grows by the container's [`GrowthPolicy`] (doubling from
/// one slot by default) and never shrinks unless
/// [`shrink_to_fit`](SlotVec::shrink_to_fit) is called.
///
/// ```
/// use slotvec::SlotVec;
///
/// let mut v = SlotVec::new();
/// v.push_back(&10);
/// v.push_back(&20);
/// v.insert(1, &15)?;
/// assert_eq!(v.as_slice(), &[10, 15, 20]);
/// assert_eq!((v.cend() - v.cbegin())?, 3);
/// # Ok::<(), slotvec::SlotVecError>(())
/// ```
pub struct SlotVec<T> {
    storage: Storage<T>,
    id: ArrayId,
    policy: GrowthPolicy,
}

impl<T> SlotVec<T> {
    /// Create an empty container. Nothing is allocated until the first
    /// element arrives.
    pub fn new() -> Self {
        Self::with_policy(GrowthPolicy::default())
    }

    /// Create an empty container that grows by `policy`.
    pub fn with_policy(policy: GrowthPolicy) -> Self {
        Self {
            storage: Storage::new(),
            id: ArrayId::next(),
            policy,
        }
    }

    /// Create an empty container with exactly `capacity` reserved slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: Storage::with_capacity(capacity),
            id: ArrayId::next(),
            policy: GrowthPolicy::default(),
        }
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Whether there are no live elements.
    pub fn is_empty(&self) -> bool {
        self.storage.len() == 0
    }

    /// Number of reserved slots.
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Identity token stamped on every cursor this container produces.
    pub fn id(&self) -> ArrayId {
        self.id
    }

    /// The growth policy in effect.
    pub fn policy(&self) -> GrowthPolicy {
        self.policy
    }

    /// The element at `index`.
    pub fn at(&self, index: usize) -> Result<&T, SlotVecError> {
        let len = self.len();
        self.storage
            .as_slice()
            .get(index)
            .ok_or(SlotVecError::OutOfBounds { index, len })
    }

    /// Mutable access to the element at `index`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, SlotVecError> {
        let len = self.len();
        self.storage
            .as_mut_slice()
            .get_mut(index)
            .ok_or(SlotVecError::OutOfBounds { index, len })
    }

    /// The first element.
    pub fn front(&self) -> Result<&T, SlotVecError> {
        self.storage
            .as_slice()
            .first()
            .ok_or(SlotVecError::EmptyContainer)
    }

    /// The last element.
    pub fn back(&self) -> Result<&T, SlotVecError> {
        self.storage
            .as_slice()
            .last()
            .ok_or(SlotVecError::EmptyContainer)
    }

    /// Mutable access to the first element.
    pub fn front_mut(&mut self) -> Result<&mut T, SlotVecError> {
        self.storage
            .as_mut_slice()
            .first_mut()
            .ok_or(SlotVecError::EmptyContainer)
    }

    /// Mutable access to the last element.
    pub fn back_mut(&mut self) -> Result<&mut T, SlotVecError> {
        self.storage
            .as_mut_slice()
            .last_mut()
            .ok_or(SlotVecError::EmptyContainer)
    }

    /// Drop every element. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.storage.clear();
    }

    /// Remove the element at `index`, shifting later elements left.
    ///
    /// Returns a cursor at `index`, which now designates the element that
    /// followed the removed one, or the end position if the last element
    /// was removed.
    ///
    /// To erase at a cursor, pass
    /// [`Position::offset`](crate::cursor::Position::offset) after the
    /// cursor's borrow ends; a cursor moved before slot 0 yields `None`.
    pub fn erase(&mut self, index: usize) -> Result<CursorMut<'_, T>, SlotVecError> {
        let len = self.len();
        if index >= len {
            return Err(SlotVecError::OutOfBounds { index, len });
        }
        drop(self.storage.remove(index));
        Ok(CursorMut::new(self.storage.as_mut_slice(), index, self.id))
    }

    /// Drop the last element.
    pub fn pop_back(&mut self) -> Result<(), SlotVecError> {
        self.storage
            .pop()
            .map(drop)
            .ok_or(SlotVecError::EmptyContainer)
    }

    /// Mutable cursor at slot 0.
    pub fn begin(&mut self) -> CursorMut<'_, T> {
        CursorMut::new(self.storage.as_mut_slice(), 0, self.id)
    }

    /// Mutable cursor at the one-past-end slot.
    pub fn end(&mut self) -> CursorMut<'_, T> {
        let len = self.len();
        CursorMut::new(self.storage.as_mut_slice(), len, self.id)
    }

    /// Read-only cursor at slot 0.
    pub fn cbegin(&self) -> Cursor<'_, T> {
        Cursor::new(self.storage.as_slice(), 0, self.id)
    }

    /// Read-only cursor at the one-past-end slot.
    pub fn cend(&self) -> Cursor<'_, T> {
        Cursor::new(self.storage.as_slice(), self.len(), self.id)
    }

    /// The live elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        self.storage.as_slice()
    }

    /// The live elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.storage.as_mut_slice()
    }

    /// Iterator over the live elements.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.storage.as_slice().iter()
    }

    /// Mutable iterator over the live elements.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.storage.as_mut_slice().iter_mut()
    }

    /// Make room for at least `additional` more elements, growing by the
    /// policy.
    pub fn reserve(&mut self, additional: usize) {
        let required = self.required(additional);
        if required > self.capacity() {
            let next = self.policy.next_capacity(self.capacity(), required);
            self.grow_to(next);
        }
    }

    /// Make room for exactly `additional` more elements.
    pub fn reserve_exact(&mut self, additional: usize) {
        let required = self.required(additional);
        if required > self.capacity() {
            self.grow_to(required);
        }
    }

    /// Release reserved slots beyond the live elements.
    pub fn shrink_to_fit(&mut self) {
        if self.capacity() > self.len() {
            debug!(
                "slotvec {}: shrinking capacity {} -> {}",
                self.id,
                self.capacity(),
                self.len()
            );
            self.storage.shrink_to_fit();
        }
    }

    fn required(&self, additional: usize) -> usize {
        self.len()
            .checked_add(additional)
            .unwrap_or_else(|| capacity_overflow())
    }

    fn grow_for_one(&mut self) {
        if self.storage.is_full() {
            let next = self.policy.next_capacity(self.capacity(), self.required(1));
            self.grow_to(next);
        }
    }

    fn grow_to(&mut self, new_capacity: usize) {
        trace!(
            "slotvec {}: growing capacity {} -> {} ({} live)",
            self.id,
            self.capacity(),
            new_capacity,
            self.len()
        );
        self.storage.grow_to(new_capacity);
    }
}

impl<T: Clone> SlotVec<T> {
    /// Append a clone of `value`.
    pub fn push_back(&mut self, value: &T) {
        let value = value.clone();
        self.grow_for_one();
        self.storage.push(value);
    }

    /// Insert a clone of `value` at `index`, shifting later elements
    /// right. `index == len()` appends.
    ///
    /// Returns a cursor at the inserted element. To insert at a cursor,
    /// pass [`Position::offset`](crate::cursor::Position::offset) as
    /// `index`.
    pub fn insert(&mut self, index: usize, value: &T) -> Result<CursorMut<'_, T>, SlotVecError> {
        let len = self.len();
        if index > len {
            return Err(SlotVecError::OutOfBounds { index, len });
        }
        let value = value.clone();
        self.grow_for_one();
        self.storage.insert(index, value);
        Ok(CursorMut::new(self.storage.as_mut_slice(), index, self.id))
    }
}

#[cold]
#[inline(never)]
fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}

impl<T> Default for SlotVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for SlotVec<T> {
    /// Deep copy with capacity pinned to the source's length and a fresh
    /// identity.
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone_exact(),
            id: ArrayId::next(),
            policy: self.policy,
        }
    }

    /// Copy-assignment: releases the current elements and buffer, then
    /// deep-copies `source`. The container keeps its own identity.
    fn clone_from(&mut self, source: &Self) {
        debug!(
            "slotvec {}: assigning {} elements from {}",
            self.id,
            source.len(),
            source.id
        );
        self.storage = Storage::new();
        self.storage = source.storage.clone_exact();
        self.policy = source.policy;
    }
}

impl<T: fmt::Debug> fmt::Debug for SlotVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for SlotVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for SlotVec<T> {}

impl<T> Index<usize> for SlotVec<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics with the [`SlotVecError::OutOfBounds`] message if
    /// `index >= len()`. Use [`SlotVec::at`] to get the error instead.
    fn index(&self, index: usize) -> &T {
        match self.at(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> IndexMut<usize> for SlotVec<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.at_mut(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> Extend<T> for SlotVec<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for value in iter {
            self.grow_for_one();
            self.storage.push(value);
        }
    }
}

impl<T> FromIterator<T> for SlotVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut v = Self::new();
        v.extend(iter);
        v
    }
}

impl<T: Clone> From<&[T]> for SlotVec<T> {
    fn from(values: &[T]) -> Self {
        values.iter().cloned().collect()
    }
}

impl<'a, T> IntoIterator for &'a SlotVec<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut SlotVec<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
