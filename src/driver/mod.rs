//! Driver Module
//!
//! The contract every storage backend implements, and the registry the
//! orchestrator uses to pick one by name.
//!
//! ## Responsibilities
//! - Define [`StorageDriver`], the full capability set of a backend
//! - Define the request types shared by all backends
//! - Map driver names to constructors ([`DriverRegistry`])

mod registry;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use registry::{DriverFactory, DriverRegistry};

/// Name the in-memory driver registers under
pub const FAKE_DRIVER_NAME: &str = "fake";

/// Option key naming the pool a volume is allocated from
pub const POOL_OPTION: &str = "pool";

/// Free-form per-request options (e.g. `pool`)
pub type VolumeOptions = HashMap<String, String>;

/// A point-in-time copy reported by a backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub name: String,
    pub created: String,
}

/// Capability set of a storage backend
///
/// All methods take `&self`; implementations synchronize internally so one
/// instance can serve concurrent callers.
pub trait StorageDriver: Send + Sync {
    /// Constant identifying the driver type
    fn name(&self) -> &'static str;

    /// Load configuration, discarding any prior state
    fn initialize(&self, config: &[u8]) -> Result<()>;

    /// Check the backend is usable after initialization
    fn validate(&self) -> Result<()>;

    fn create(&self, name: &str, size_bytes: u64, options: &VolumeOptions) -> Result<()>;

    fn create_clone(
        &self,
        name: &str,
        source: &str,
        snapshot: &str,
        options: &VolumeOptions,
    ) -> Result<()>;

    /// Remove a volume. Missing volumes are not an error.
    fn destroy(&self, name: &str) -> Result<()>;

    fn attach(&self, name: &str, mountpoint: &str, options: &VolumeOptions) -> Result<()>;

    fn detach(&self, name: &str, mountpoint: &str) -> Result<()>;

    fn snapshot_list(&self, name: &str) -> Result<Vec<Snapshot>>;

    /// Names of every live volume, in no particular order
    fn list(&self) -> Result<Vec<String>>;

    /// Existence probe
    fn get(&self, name: &str) -> Result<()>;
}
