//! Contiguous growable array with manual storage management.
//!
//! [`SlotVec`] stores values of any type in one buffer that it allocates,
//! grows, and releases itself, with bounds-checked access, positional
//! insert/erase, and a pair of random-access cursors that know which
//! container produced them. This crate is the only one in the workspace
//! that contains `unsafe` code, and only `raw.rs` and `storage.rs` may
//! use it.
//!
//! # Architecture
//!
//! ```text
//! SlotVec (validation, growth policy, identity)
//! ├── Storage (live prefix [0, len), shifting, migration)
//! │   └── RawBuffer (capacity uninitialised slots)
//! ├── ArrayId (stamped on every cursor)
//! └── GrowthPolicy (max(min_capacity, factor * capacity))
//!
//! Cursor / CursorMut ── borrow the live region + carry ArrayId
//! ```
//!
//! # Errors
//!
//! Every fallible operation returns [`SlotVecError`]. Checks run before
//! any mutation, so an error never leaves a partial change behind.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod array;
pub mod config;
pub mod cursor;
mod raw;
mod storage;

// Public re-exports for the primary API surface.
pub use array::SlotVec;
pub use config::GrowthPolicy;
pub use cursor::{Cursor, CursorMut, Position};
pub use slotvec_core::{ArrayId, PolicyError, SlotVecError};
