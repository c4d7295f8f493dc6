//! Test fixtures for slotvec development.
//!
//! Element types that make the container's construction and destruction
//! discipline observable:
//!
//! - [`Tracked`] counts creations, clones, and drops on a shared [`Ledger`].
//! - [`FailingClone`] panics in `clone` once its [`CloneBudget`] runs out.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{CloneBudget, FailingClone, Ledger, Tracked};
