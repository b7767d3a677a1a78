//! Engine Module
//!
//! The in-memory fake storage driver.
//!
//! ## Responsibilities
//! - Own the allocation state of one driver instance
//! - Serialize every mutation so operations are linearizable
//! - Log each successful allocation change
//! - Refuse capabilities this driver does not have

use parking_lot::RwLock;
use tracing::debug;

use crate::allocation::{AllocationState, Pool, Volume};
use crate::config::DriverConfig;
use crate::driver::{Snapshot, StorageDriver, VolumeOptions, FAKE_DRIVER_NAME};
use crate::error::{DriverError, Result};
use crate::protocol::{Command, Reply};

/// In-memory storage driver
///
/// ## Concurrency Model
///
/// - **Mutations** (initialize/create/clone/destroy): exclusive write lock for
///   the whole check-then-update, so capacity updates are never lost and two
///   creates of the same name cannot both succeed
/// - **Reads** (list/get/introspection): shared read lock, consistent with
///   the last completed mutation
///
/// Two drivers built from the same configuration never share state.
pub struct FakeDriver {
    state: RwLock<AllocationState>,
}

impl FakeDriver {
    /// Create an uninitialized driver with no pools
    pub fn new() -> Self {
        Self {
            state: RwLock::new(AllocationState::new()),
        }
    }

    /// Create a driver already initialized with `config`
    pub fn with_config(config: DriverConfig) -> Self {
        Self {
            state: RwLock::new(AllocationState::from_config(config)),
        }
    }

    /// Execute a command
    ///
    /// Routes commands to appropriate handlers
    pub fn execute(&self, command: Command) -> Result<Reply> {
        command.apply(self)
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Remaining bytes in a pool
    pub fn pool_remaining(&self, pool: &str) -> Option<u64> {
        self.state.read().pool(pool).map(Pool::remaining_bytes)
    }

    /// Configured capacity of a pool
    pub fn pool_capacity(&self, pool: &str) -> Option<u64> {
        self.state.read().pool(pool).map(Pool::capacity_bytes)
    }

    /// Snapshot of every pool, sorted by name
    pub fn pools(&self) -> Vec<Pool> {
        self.state.read().pools()
    }

    /// Full record of a live volume
    pub fn volume(&self, name: &str) -> Option<Volume> {
        self.state.read().volume(name).cloned()
    }

    /// Number of live volumes
    pub fn volume_count(&self) -> usize {
        self.state.read().volume_count()
    }

    /// Destroyed-volume ledger, in call order
    pub fn destroyed_volumes(&self) -> Vec<String> {
        self.state.read().destroyed().to_vec()
    }

    /// Whether destroy was ever called with `name` since initialization
    pub fn was_destroyed(&self, name: &str) -> bool {
        self.state.read().destroyed().iter().any(|n| n == name)
    }

    pub fn serial_numbers(&self) -> Vec<String> {
        self.state
            .read()
            .config()
            .map(|c| c.serial_numbers.clone())
            .unwrap_or_default()
    }

    /// Active configuration, if initialized
    pub fn config(&self) -> Option<DriverConfig> {
        self.state.read().config().cloned()
    }

    fn unsupported(operation: &'static str) -> DriverError {
        DriverError::CapabilityNotSupported {
            driver: FAKE_DRIVER_NAME,
            operation,
        }
    }
}

impl Default for FakeDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageDriver for FakeDriver {
    fn name(&self) -> &'static str {
        FAKE_DRIVER_NAME
    }

    /// Decode `config` and replace all state with a fresh instance of it
    ///
    /// Decoding happens before the lock is taken; on failure the current
    /// state is left as it was.
    fn initialize(&self, config: &[u8]) -> Result<()> {
        let config = DriverConfig::from_slice(config)?;
        let fresh = AllocationState::from_config(config);

        if let Some(active) = fresh.config() {
            match serde_json::to_string(active) {
                Ok(json) => debug!(config = %json, "FakeStorageDriverConfig"),
                Err(e) => debug!(error = %e, "could not render driver config"),
            }
        }

        *self.state.write() = fresh;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn create(&self, name: &str, size_bytes: u64, options: &VolumeOptions) -> Result<()> {
        let mut state = self.state.write();
        let volume = state.create(name, size_bytes, options)?;

        debug!(
            backend = state.instance_name(),
            name = %volume.name,
            pool = %volume.pool,
            size_bytes = volume.size_bytes,
            "Created fake volume."
        );
        Ok(())
    }

    /// Clone `source`; `snapshot` is only a label and `options` are ignored
    fn create_clone(
        &self,
        name: &str,
        source: &str,
        snapshot: &str,
        _options: &VolumeOptions,
    ) -> Result<()> {
        let mut state = self.state.write();
        let volume = state.create_clone(name, source)?;

        debug!(
            backend = state.instance_name(),
            name = %volume.name,
            source,
            snapshot,
            pool = %volume.pool,
            size_bytes = volume.size_bytes,
            "Cloned fake volume."
        );
        Ok(())
    }

    fn destroy(&self, name: &str) -> Result<()> {
        let mut state = self.state.write();

        if let Some(volume) = state.destroy(name)? {
            debug!(
                backend = state.instance_name(),
                name = %volume.name,
                pool = %volume.pool,
                size_bytes = volume.size_bytes,
                "Deleted fake volume."
            );
        }
        Ok(())
    }

    fn attach(&self, _name: &str, _mountpoint: &str, _options: &VolumeOptions) -> Result<()> {
        Err(Self::unsupported("attach"))
    }

    fn detach(&self, _name: &str, _mountpoint: &str) -> Result<()> {
        Err(Self::unsupported("detach"))
    }

    fn snapshot_list(&self, _name: &str) -> Result<Vec<Snapshot>> {
        Err(Self::unsupported("snapshot_list"))
    }

    fn list(&self) -> Result<Vec<String>> {
        Ok(self.state.read().list())
    }

    fn get(&self, name: &str) -> Result<()> {
        match self.state.read().volume(name) {
            Some(_) => Ok(()),
            None => Err(DriverError::VolumeNotFound {
                operation: "get",
                name: name.to_string(),
            }),
        }
    }
}
