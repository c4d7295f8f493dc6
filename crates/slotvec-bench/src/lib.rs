//! Benchmark workloads for the slotvec container.
//!
//! - [`filled`]: a container holding `0..n`, grown through the policy
//! - [`insert_positions`]: deterministic random insert/erase indices via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use slotvec::SlotVec;

/// Build a container holding `0..n` by repeated `push_back`.
pub fn filled(n: usize) -> SlotVec<u64> {
    let mut v = SlotVec::new();
    for i in 0..n as u64 {
        v.push_back(&i);
    }
    v
}

/// Generate `n` positional indices for a container that starts empty and
/// gains one element per insert.
///
/// The `i`-th index is in `0..=i`, so every index is valid for `insert`
/// when applied in order. The same seed always yields the same sequence.
pub fn insert_positions(n: usize, seed: u64) -> Vec<usize> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|i| (rng.next_u64() % (i as u64 + 1)) as usize)
        .collect()
}
