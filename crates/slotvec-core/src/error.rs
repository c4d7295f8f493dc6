//! Error types for the slotvec container.
//!
//! [`SlotVecError`] covers the three contract violations a caller can
//! trigger through the container API. Every check that produces one runs
//! before any mutation, so an `Err` always leaves the container as it was.
//! [`PolicyError`] is kept separate: it only arises while building a
//! growth policy, never from a container operation.

use std::error::Error;
use std::fmt;

use crate::id::ArrayId;

/// Errors returned by container and cursor operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlotVecError {
    /// An index was outside the valid range for the operation.
    ///
    /// For access and `erase` the valid range is `0..len`; for `insert`
    /// it is `0..=len`.
    OutOfBounds {
        /// The index supplied by the caller.
        index: usize,
        /// The container length at the time of the call.
        len: usize,
    },
    /// `front`, `back`, or `pop_back` on a container with no elements.
    EmptyContainer,
    /// Two cursors produced by different containers were combined.
    IncompatibleCursors {
        /// Origin of the left-hand cursor.
        left: ArrayId,
        /// Origin of the right-hand cursor.
        right: ArrayId,
    },
}

impl fmt::Display for SlotVecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
            Self::EmptyContainer => write!(f, "container is empty"),
            Self::IncompatibleCursors { left, right } => {
                write!(
                    f,
                    "incompatible cursors: origin {left} does not match origin {right}"
                )
            }
        }
    }
}

impl Error for SlotVecError {}

/// Errors from validating a growth policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyError {
    /// The first allocation must reserve at least one slot.
    InvalidMinCapacity {
        /// The rejected minimum capacity.
        min_capacity: usize,
    },
    /// The growth factor must at least double the capacity.
    InvalidFactor {
        /// The rejected factor.
        factor: usize,
    },
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMinCapacity { min_capacity } => {
                write!(f, "min_capacity must be at least 1 (got {min_capacity})")
            }
            Self::InvalidFactor { factor } => {
                write!(f, "growth factor must be at least 2 (got {factor})")
            }
        }
    }
}

impl Error for PolicyError {}
