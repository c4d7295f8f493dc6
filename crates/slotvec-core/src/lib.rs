//! Core types for the slotvec container.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the container and its cursors: the error
//! taxonomy and the per-instance identity token carried by every cursor.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;

pub use error::{PolicyError, SlotVecError};
pub use id::ArrayId;
