//! # vdriver
//!
//! An in-memory storage driver for exercising storage orchestrators without
//! real arrays:
//! - Named pools with finite capacity and typed attribute offers
//! - Volumes allocated from pools, with globally unique names
//! - Clones that take their pool and size from the source volume
//! - An append-only ledger of every destroy request
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Orchestrator / CLI                       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  DriverRegistry → Box<dyn StorageDriver>
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      FakeDriver                              │
//! │               (RwLock<AllocationState>)                      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┼─────────────┐
//!          ▼            ▼             ▼
//!   ┌────────────┐ ┌──────────┐ ┌──────────┐
//!   │   Pools    │ │ Volumes  │ │  Ledger  │
//!   │ (capacity) │ │ (names)  │ │ (append) │
//!   └────────────┘ └──────────┘ └──────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod offer;
pub mod allocation;
pub mod driver;
pub mod protocol;
pub mod engine;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{DriverError, ErrorKind, Result};
pub use config::{DriverConfig, PoolConfig, Protocol};
pub use driver::{DriverRegistry, StorageDriver, VolumeOptions, FAKE_DRIVER_NAME, POOL_OPTION};
pub use engine::FakeDriver;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of vdriver
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
