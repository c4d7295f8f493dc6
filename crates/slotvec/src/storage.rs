//! Storage manager: the live element region over a [`RawBuffer`].
//!
//! [`Storage`] owns one buffer and the count of live elements in it.
//! Slots `[0, len)` hold initialised values in index order; slots
//! `[len, capacity)` hold nothing. All element construction, destruction,
//! shifting, and migration between buffers happens here. The container in
//! `array.rs` decides *when* to grow and validates caller input; this type
//! only enforces the slot invariant.
//!
//! Migration between buffers is a bitwise relocation. A move in Rust
//! cannot fail, so growth never runs user code and either completes or
//! leaves the old buffer untouched.

#![allow(unsafe_code)]

use std::ptr;
use std::slice;

use crate::raw::RawBuffer;

/// A buffer plus the length of its live prefix.
pub(crate) struct Storage<T> {
    buf: RawBuffer<T>,
    len: usize,
}

impl<T> Storage<T> {
    /// Empty storage with no allocation.
    pub(crate) const fn new() -> Self {
        Self {
            buf: RawBuffer::new(),
            len: 0,
        }
    }

    /// Empty storage with exactly `capacity` reserved slots.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: RawBuffer::allocate(capacity),
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Whether every reserved slot is live.
    pub(crate) fn is_full(&self) -> bool {
        self.len == self.buf.capacity()
    }

    pub(crate) fn as_slice(&self) -> &[T] {
        // SAFETY: slots `[0, len)` are initialised and the pointer is
        // non-null and aligned even when nothing is allocated.
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`; `&mut self` guarantees uniqueness.
        unsafe { slice::from_raw_parts_mut(self.buf.as_mut_ptr(), self.len) }
    }

    /// Move the live region into a fresh buffer of exactly
    /// `new_capacity` slots, at least `len` and at least the current
    /// capacity, then release the old buffer.
    pub(crate) fn grow_to(&mut self, new_capacity: usize) {
        assert!(
            new_capacity >= self.buf.capacity(),
            "grow_to({new_capacity}) below current capacity {}",
            self.buf.capacity()
        );
        self.relocate(new_capacity);
    }

    /// Release every reserved slot beyond `len`.
    pub(crate) fn shrink_to_fit(&mut self) {
        if self.buf.capacity() > self.len {
            self.relocate(self.len);
        }
    }

    fn relocate(&mut self, new_capacity: usize) {
        debug_assert!(new_capacity >= self.len);
        let mut fresh = RawBuffer::allocate(new_capacity);
        // SAFETY: the old buffer holds `len` live values; the new one has
        // room for at least `len` and is a distinct allocation. After the
        // copy the old slots are treated as uninitialised: dropping the
        // old `RawBuffer` only frees memory.
        unsafe {
            ptr::copy_nonoverlapping(self.buf.as_ptr(), fresh.as_mut_ptr(), self.len);
        }
        self.buf = fresh;
    }

    /// Write `value` into slot `len`.
    ///
    /// # Panics
    ///
    /// Panics if no slot is free. Callers grow first.
    pub(crate) fn push(&mut self, value: T) {
        assert!(!self.is_full(), "push into full storage");
        // SAFETY: `len < capacity`, so slot `len` is inside the buffer and
        // holds no live value.
        unsafe {
            self.buf.as_mut_ptr().add(self.len).write(value);
        }
        self.len += 1;
    }

    /// Shift `[index, len)` one slot right and write `value` at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len` or no slot is free.
    pub(crate) fn insert(&mut self, index: usize, value: T) {
        assert!(index <= self.len, "insert index {index} past len {}", self.len);
        assert!(!self.is_full(), "insert into full storage");
        let base = self.buf.as_mut_ptr();
        // SAFETY: `len < capacity`, so slots `[index, len]` are in bounds.
        // The tail moves up by one (overlapping copy), leaving slot
        // `index` logically uninitialised before the write.
        unsafe {
            let at = base.add(index);
            ptr::copy(at, at.add(1), self.len - index);
            at.write(value);
        }
        self.len += 1;
    }

    /// Remove the value at `index`, shifting `(index, len)` one slot left.
    ///
    /// The removed value is returned rather than dropped so that its
    /// destructor runs after the region is consistent again.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub(crate) fn remove(&mut self, index: usize) -> T {
        assert!(index < self.len, "remove index {index} past len {}", self.len);
        let base = self.buf.as_mut_ptr();
        // SAFETY: `index < len`, so slot `index` is live. It is read out
        // before the tail moves down over it; slot `len - 1` is then a
        // bitwise duplicate that `len -= 1` retires.
        let value = unsafe {
            let at = base.add(index);
            let value = at.read();
            ptr::copy(at.add(1), at, self.len - index - 1);
            value
        };
        self.len -= 1;
        value
    }

    /// Take the last live value out of the region.
    pub(crate) fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: slot `len` (the old `len - 1`) was live and is now
        // outside the live prefix, so it is read exactly once.
        Some(unsafe { self.buf.as_ptr().add(self.len).read() })
    }

    /// Drop every live value; the buffer stays reserved.
    pub(crate) fn clear(&mut self) {
        let live: *mut [T] = self.as_mut_slice();
        // Shrink first so a panicking destructor cannot cause a double drop.
        self.len = 0;
        // SAFETY: `live` covers exactly the values that were live and are
        // no longer reachable through `self`.
        unsafe { ptr::drop_in_place(live) }
    }
}

impl<T: Clone> Storage<T> {
    /// Deep copy into a buffer sized exactly to `len`.
    ///
    /// Elements are cloned one at a time; if a clone panics the partial
    /// copy is dropped normally and `self` is untouched.
    pub(crate) fn clone_exact(&self) -> Self {
        let mut out = Self::with_capacity(self.len);
        for value in self.as_slice() {
            out.push(value.clone());
        }
        out
    }
}

impl<T> Drop for Storage<T> {
    fn drop(&mut self) {
        self.clear();
    }
}
