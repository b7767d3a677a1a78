//! Allocation Module
//!
//! The pool/volume data model and the bookkeeping that carves volumes out of
//! pools.
//!
//! ## Responsibilities
//! - Track each pool's remaining capacity
//! - Keep volume names unique across the whole driver instance
//! - Record every destroy request in an append-only ledger
//!
//! ## Invariant
//! For every pool, at every point between operations:
//! ```text
//! remaining_bytes + Σ size_bytes(live volumes in pool) == capacity_bytes
//! ```
//!
//! [`AllocationState`] is plain data with no locking; the engine owns it
//! behind a lock and is the only caller of its mutating methods.

mod state;

use serde::Serialize;

use crate::offer::OfferMap;

pub use state::AllocationState;

/// A named capacity bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    name: String,
    capacity_bytes: u64,
    remaining_bytes: u64,
    attributes: OfferMap,
}

impl Pool {
    /// A full pool
    pub fn new(name: impl Into<String>, capacity_bytes: u64, attributes: OfferMap) -> Self {
        Self {
            name: name.into(),
            capacity_bytes,
            remaining_bytes: capacity_bytes,
            attributes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Capacity the pool was configured with
    pub fn capacity_bytes(&self) -> u64 {
        self.capacity_bytes
    }

    pub fn remaining_bytes(&self) -> u64 {
        self.remaining_bytes
    }

    /// Bytes currently held by live volumes
    pub fn used_bytes(&self) -> u64 {
        self.capacity_bytes - self.remaining_bytes
    }

    pub fn attributes(&self) -> &OfferMap {
        &self.attributes
    }

    /// Take `size_bytes` from the pool (caller has checked it fits)
    fn reserve(&mut self, size_bytes: u64) {
        debug_assert!(size_bytes <= self.remaining_bytes);
        self.remaining_bytes -= size_bytes;
    }

    /// Give `size_bytes` back to the pool
    fn release(&mut self, size_bytes: u64) {
        self.remaining_bytes = (self.remaining_bytes + size_bytes).min(self.capacity_bytes);
    }
}

/// A named allocation bound to one pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    pub name: String,
    pub pool: String,
    pub size_bytes: u64,
}
