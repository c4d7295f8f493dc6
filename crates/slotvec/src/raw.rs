//! Untyped slot allocation.
//!
//! [`RawBuffer`] owns a block of `capacity` uninitialised slots obtained
//! from the global allocator. It never constructs or drops elements: the
//! storage manager in `storage.rs` tracks which slots are live. Dropping a
//! `RawBuffer` releases the allocation only.
//!
//! Zero-sized element types and zero capacity never touch the allocator;
//! both use a dangling, well-aligned pointer.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

/// Block of uninitialised slots for values of type `T`.
pub(crate) struct RawBuffer<T> {
    /// Start of the allocation. Dangling when nothing is allocated.
    ptr: NonNull<T>,
    /// Number of slots the allocation holds.
    capacity: usize,
    /// The buffer logically owns the `T`s placed into it.
    _owns: PhantomData<T>,
}

// SAFETY: `RawBuffer` is a uniquely owned allocation, like `Box<[T]>`.
// Sending it moves ownership of the slots and any `T`s in them.
unsafe impl<T: Send> Send for RawBuffer<T> {}

// SAFETY: shared access only hands out `*const T`; any `&T` built from it
// by the storage manager requires `T: Sync` to cross threads.
unsafe impl<T: Sync> Sync for RawBuffer<T> {}

impl<T> RawBuffer<T> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    /// An unallocated buffer with capacity 0.
    pub(crate) const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
            _owns: PhantomData,
        }
    }

    /// Allocate exactly `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics with "capacity overflow" if `capacity` slots exceed
    /// `isize::MAX` bytes. Allocator exhaustion goes through
    /// [`std::alloc::handle_alloc_error`].
    pub(crate) fn allocate(capacity: usize) -> Self {
        if capacity == 0 {
            return Self::new();
        }
        if Self::IS_ZST {
            return Self {
                ptr: NonNull::dangling(),
                capacity,
                _owns: PhantomData,
            };
        }

        let layout = Self::layout(capacity);
        // SAFETY: `layout` has non-zero size because `capacity > 0` and
        // `T` is not zero-sized.
        let raw = unsafe { alloc::alloc(layout) };
        let ptr = NonNull::new(raw.cast::<T>()).unwrap_or_else(|| alloc::handle_alloc_error(layout));
        Self {
            ptr,
            capacity,
            _owns: PhantomData,
        }
    }

    /// Number of slots in the allocation.
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Pointer to slot 0.
    pub(crate) fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Mutable pointer to slot 0.
    pub(crate) fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    fn layout(capacity: usize) -> Layout {
        Layout::array::<T>(capacity).unwrap_or_else(|_| capacity_overflow())
    }
}

impl<T> Drop for RawBuffer<T> {
    fn drop(&mut self) {
        if self.capacity == 0 || Self::IS_ZST {
            return;
        }
        // SAFETY: `ptr` came from `alloc::alloc` with exactly this layout
        // and has not been freed; `Drop` runs once.
        unsafe { alloc::dealloc(self.ptr.as_ptr().cast::<u8>(), Self::layout(self.capacity)) }
    }
}

#[cold]
#[inline(never)]
fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}
