//! Random-access cursors over a container's live region.
//!
//! A cursor is a signed slot position plus the [`ArrayId`] of the
//! container that produced it. [`CursorMut`] grants write access to the
//! designated element; [`Cursor`] is read-only and `Copy`. A `CursorMut`
//! converts into a `Cursor`, never the reverse.
//!
//! Cursors borrow the region they walk, so the container cannot grow,
//! shrink, or reallocate while one is alive. Positions are indices rather
//! than raw pointers: arithmetic may move a cursor anywhere, and only
//! dereferencing checks that it designates a live element.
//!
//! Equality compares the designated slot address only, across both kinds,
//! without consulting the origin. Subtraction requires matching origins
//! and otherwise fails with [`SlotVecError::IncompatibleCursors`].

use std::cmp::Ordering;
use std::fmt;
use std::mem;
use std::ops::{Add, AddAssign, Deref, DerefMut, Sub, SubAssign};

use slotvec_core::{ArrayId, SlotVecError};

/// Common view of both cursor kinds.
pub trait Position<T> {
    /// The container this cursor was produced by.
    fn origin(&self) -> ArrayId;

    /// The designated slot as a signed index from the start of the buffer.
    fn index(&self) -> isize;

    /// The designated slot as an element index, or `None` if arithmetic
    /// moved the cursor before slot 0.
    ///
    /// This is the form [`SlotVec::insert`](crate::SlotVec::insert) and
    /// [`SlotVec::erase`](crate::SlotVec::erase) take. A position past the
    /// end is returned as is; those calls report it as
    /// [`SlotVecError::OutOfBounds`].
    fn offset(&self) -> Option<usize> {
        usize::try_from(self.index()).ok()
    }

    /// Address of the designated slot. Never dereferenced.
    fn slot_addr(&self) -> *const T;
}

fn same_slot<T>(a: &impl Position<T>, b: &impl Position<T>) -> bool {
    // Every slot of a zero-sized type shares one address.
    a.slot_addr() == b.slot_addr() && (mem::size_of::<T>() != 0 || a.index() == b.index())
}

fn distance<T>(a: &impl Position<T>, b: &impl Position<T>) -> Result<isize, SlotVecError> {
    if a.origin() != b.origin() {
        return Err(SlotVecError::IncompatibleCursors {
            left: a.origin(),
            right: b.origin(),
        });
    }
    Ok(a.index() - b.index())
}

fn compare<T>(a: &impl Position<T>, b: &impl Position<T>) -> Option<Ordering> {
    if a.origin() == b.origin() {
        Some(a.index().cmp(&b.index()))
    } else if same_slot(a, b) {
        Some(Ordering::Equal)
    } else {
        None
    }
}

fn resolve<T>(region: &[T], pos: isize) -> Option<&T> {
    usize::try_from(pos).ok().and_then(|i| region.get(i))
}

#[cold]
#[inline(never)]
fn dereference_outside_region(pos: isize, len: usize) -> ! {
    panic!("cursor at position {pos} dereferenced outside live region of length {len}");
}

/// Read-only cursor.
///
/// Produced by [`SlotVec::cbegin`](crate::SlotVec::cbegin) and
/// [`SlotVec::cend`](crate::SlotVec::cend), or by converting a
/// [`CursorMut`].
pub struct Cursor<'a, T> {
    region: &'a [T],
    pos: isize,
    origin: ArrayId,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(region: &'a [T], index: usize, origin: ArrayId) -> Self {
        Self {
            region,
            pos: index as isize,
            origin,
        }
    }

    /// The element at this position.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the end position or has been moved
    /// outside the live region.
    pub fn get(&self) -> &'a T {
        resolve(self.region, self.pos)
            .unwrap_or_else(|| dereference_outside_region(self.pos, self.region.len()))
    }

    /// The element at this position, or `None` outside the live region.
    pub fn try_get(&self) -> Option<&'a T> {
        resolve(self.region, self.pos)
    }

    /// Whether this cursor designates the one-past-end slot.
    pub fn is_end(&self) -> bool {
        self.pos == self.region.len() as isize
    }

    /// Advance by one slot.
    pub fn inc(&mut self) -> &mut Self {
        self.pos = self.pos.wrapping_add(1);
        self
    }

    /// Step back by one slot.
    pub fn dec(&mut self) -> &mut Self {
        self.pos = self.pos.wrapping_sub(1);
        self
    }

    /// Signed slot distance `self - other`.
    pub fn distance(&self, other: &impl Position<T>) -> Result<isize, SlotVecError> {
        distance(self, other)
    }
}

impl<T> Position<T> for Cursor<'_, T> {
    fn origin(&self) -> ArrayId {
        self.origin
    }

    fn index(&self) -> isize {
        self.pos
    }

    fn slot_addr(&self) -> *const T {
        self.region.as_ptr().wrapping_offset(self.pos)
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> Deref for Cursor<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.get()
    }
}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("origin", &self.origin)
            .field("index", &self.pos)
            .finish()
    }
}

impl<T> Add<isize> for Cursor<'_, T> {
    type Output = Self;

    fn add(mut self, n: isize) -> Self {
        self += n;
        self
    }
}

impl<T> Sub<isize> for Cursor<'_, T> {
    type Output = Self;

    fn sub(mut self, n: isize) -> Self {
        self -= n;
        self
    }
}

impl<T> AddAssign<isize> for Cursor<'_, T> {
    fn add_assign(&mut self, n: isize) {
        self.pos = self.pos.wrapping_add(n);
    }
}

impl<T> SubAssign<isize> for Cursor<'_, T> {
    fn sub_assign(&mut self, n: isize) {
        self.pos = self.pos.wrapping_sub(n);
    }
}

impl<'a, T> From<CursorMut<'a, T>> for Cursor<'a, T> {
    fn from(cursor: CursorMut<'a, T>) -> Self {
        Self {
            region: cursor.region,
            pos: cursor.pos,
            origin: cursor.origin,
        }
    }
}

/// Mutable cursor.
///
/// Produced by [`SlotVec::begin`](crate::SlotVec::begin),
/// [`SlotVec::end`](crate::SlotVec::end), and returned by
/// [`SlotVec::insert`](crate::SlotVec::insert) and
/// [`SlotVec::erase`](crate::SlotVec::erase). Holds the only mutable
/// borrow of the live region, so it is not `Copy`; use
/// [`as_cursor`](CursorMut::as_cursor) for a read-only copy.
pub struct CursorMut<'a, T> {
    region: &'a mut [T],
    pos: isize,
    origin: ArrayId,
}

impl<'a, T> CursorMut<'a, T> {
    pub(crate) fn new(region: &'a mut [T], index: usize, origin: ArrayId) -> Self {
        Self {
            region,
            pos: index as isize,
            origin,
        }
    }

    /// The element at this position.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the end position or has been moved
    /// outside the live region.
    pub fn get(&self) -> &T {
        resolve(&*self.region, self.pos)
            .unwrap_or_else(|| dereference_outside_region(self.pos, self.region.len()))
    }

    /// Mutable access to the element at this position.
    ///
    /// # Panics
    ///
    /// Same conditions as [`get`](CursorMut::get).
    pub fn get_mut(&mut self) -> &mut T {
        let len = self.region.len();
        match usize::try_from(self.pos).ok().filter(|&i| i < len) {
            Some(i) => &mut self.region[i],
            None => dereference_outside_region(self.pos, len),
        }
    }

    /// The element at this position, or `None` outside the live region.
    pub fn try_get(&self) -> Option<&T> {
        resolve(&*self.region, self.pos)
    }

    /// Whether this cursor designates the one-past-end slot.
    pub fn is_end(&self) -> bool {
        self.pos == self.region.len() as isize
    }

    /// Read-only cursor at the same position, borrowing this one.
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor {
            region: &*self.region,
            pos: self.pos,
            origin: self.origin,
        }
    }

    /// Advance by one slot.
    pub fn inc(&mut self) -> &mut Self {
        self.pos = self.pos.wrapping_add(1);
        self
    }

    /// Step back by one slot.
    pub fn dec(&mut self) -> &mut Self {
        self.pos = self.pos.wrapping_sub(1);
        self
    }

    /// Signed slot distance `self - other`.
    pub fn distance(&self, other: &impl Position<T>) -> Result<isize, SlotVecError> {
        distance(self, other)
    }
}

impl<T> Position<T> for CursorMut<'_, T> {
    fn origin(&self) -> ArrayId {
        self.origin
    }

    fn index(&self) -> isize {
        self.pos
    }

    fn slot_addr(&self) -> *const T {
        self.region.as_ptr().wrapping_offset(self.pos)
    }
}

impl<T> Deref for CursorMut<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.get()
    }
}

impl<T> DerefMut for CursorMut<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.get_mut()
    }
}

impl<T> fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("origin", &self.origin)
            .field("index", &self.pos)
            .finish()
    }
}

impl<T> Add<isize> for CursorMut<'_, T> {
    type Output = Self;

    fn add(mut self, n: isize) -> Self {
        self += n;
        self
    }
}

impl<T> Sub<isize> for CursorMut<'_, T> {
    type Output = Self;

    fn sub(mut self, n: isize) -> Self {
        self -= n;
        self
    }
}

impl<T> AddAssign<isize> for CursorMut<'_, T> {
    fn add_assign(&mut self, n: isize) {
        self.pos = self.pos.wrapping_add(n);
    }
}

impl<T> SubAssign<isize> for CursorMut<'_, T> {
    fn sub_assign(&mut self, n: isize) {
        self.pos = self.pos.wrapping_sub(n);
    }
}

/// Equality, ordering, and difference between every pair of cursor kinds.
macro_rules! impl_cursor_pair {
    ($lhs:ident, $rhs:ident) => {
        impl<'a, 'b, T> PartialEq<$rhs<'b, T>> for $lhs<'a, T> {
            fn eq(&self, other: &$rhs<'b, T>) -> bool {
                same_slot(self, other)
            }
        }

        impl<'a, 'b, T> PartialOrd<$rhs<'b, T>> for $lhs<'a, T> {
            fn partial_cmp(&self, other: &$rhs<'b, T>) -> Option<Ordering> {
                compare(self, other)
            }
        }

        impl<'a, 'b, 'r, T> Sub<&'r $rhs<'b, T>> for &$lhs<'a, T> {
            type Output = Result<isize, SlotVecError>;

            fn sub(self, other: &'r $rhs<'b, T>) -> Self::Output {
                distance(self, other)
            }
        }
    };
}

impl_cursor_pair!(Cursor, Cursor);
impl_cursor_pair!(Cursor, CursorMut);
impl_cursor_pair!(CursorMut, Cursor);
impl_cursor_pair!(CursorMut, CursorMut);

impl<T> Eq for Cursor<'_, T> {}
impl<T> Eq for CursorMut<'_, T> {}

impl<'a, 'b, T> Sub<Cursor<'b, T>> for Cursor<'a, T> {
    type Output = Result<isize, SlotVecError>;

    fn sub(self, other: Cursor<'b, T>) -> Self::Output {
        distance(&self, &other)
    }
}
