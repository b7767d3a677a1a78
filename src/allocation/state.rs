//! Allocation state
//!
//! Pool registry, volume table and destroyed-volume ledger of one driver
//! instance. Every mutating method either applies completely or leaves the
//! state untouched.

use std::collections::HashMap;

use super::{Pool, Volume};
use crate::config::DriverConfig;
use crate::driver::{VolumeOptions, POOL_OPTION};
use crate::error::{DriverError, Result};

/// All mutable state of one driver instance
#[derive(Debug, Default)]
pub struct AllocationState {
    /// Active configuration; `None` until the first successful initialize
    config: Option<DriverConfig>,

    /// Pool registry, keyed by pool name
    pools: HashMap<String, Pool>,

    /// Live volumes, keyed by volume name
    volumes: HashMap<String, Volume>,

    /// Every name passed to destroy, in call order
    destroyed: Vec<String>,
}

impl AllocationState {
    /// An uninitialized state with no pools
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh state for a configuration: full pools, no volumes, empty ledger
    pub fn from_config(mut config: DriverConfig) -> Self {
        config.serial_numbers = config.derived_serial_numbers();

        let pools = config
            .pools
            .iter()
            .map(|(name, pool)| {
                (
                    name.clone(),
                    Pool::new(name.clone(), pool.size_bytes, pool.attributes.clone()),
                )
            })
            .collect();

        Self {
            config: Some(config),
            pools,
            volumes: HashMap::new(),
            destroyed: Vec::new(),
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Allocate a new volume from the pool named in `options`
    ///
    /// Checks, first failure wins:
    /// 1. `options` names a pool
    /// 2. the pool exists
    /// 3. `name` is not already a live volume
    /// 4. the pool has `size_bytes` remaining
    pub fn create(&mut self, name: &str, size_bytes: u64, options: &VolumeOptions) -> Result<Volume> {
        const OP: &str = "create";

        let pool_name = options
            .get(POOL_OPTION)
            .ok_or_else(|| DriverError::NoPoolSpecified {
                operation: OP,
                name: name.to_string(),
                option: POOL_OPTION,
            })?;

        let available = self
            .pools
            .get(pool_name)
            .ok_or_else(|| DriverError::PoolNotFound {
                operation: OP,
                pool: pool_name.clone(),
            })?
            .remaining_bytes();

        if self.volumes.contains_key(name) {
            return Err(DriverError::VolumeAlreadyExists {
                operation: OP,
                name: name.to_string(),
            });
        }

        if size_bytes > available {
            return Err(DriverError::InsufficientCapacity {
                operation: OP,
                name: name.to_string(),
                pool: pool_name.clone(),
                requested: size_bytes,
                available,
            });
        }

        Ok(self.allocate(name, pool_name.clone(), size_bytes))
    }

    /// Allocate a copy of `source` in the source's pool, at the source's size
    pub fn create_clone(&mut self, name: &str, source: &str) -> Result<Volume> {
        const OP: &str = "clone";

        let source_volume = self
            .volumes
            .get(source)
            .ok_or_else(|| DriverError::SourceNotFound {
                name: name.to_string(),
                source_name: source.to_string(),
            })?;

        if self.volumes.contains_key(name) {
            return Err(DriverError::VolumeAlreadyExists {
                operation: OP,
                name: name.to_string(),
            });
        }

        let pool_name = source_volume.pool.clone();
        let size_bytes = source_volume.size_bytes;

        let available = self
            .pools
            .get(&pool_name)
            .ok_or_else(|| DriverError::PoolNotFound {
                operation: OP,
                pool: pool_name.clone(),
            })?
            .remaining_bytes();

        if size_bytes > available {
            return Err(DriverError::InsufficientCapacity {
                operation: OP,
                name: name.to_string(),
                pool: pool_name,
                requested: size_bytes,
                available,
            });
        }

        Ok(self.allocate(name, pool_name, size_bytes))
    }

    /// Record the destroy request, then free the volume if it is live
    ///
    /// Returns the removed volume, or `None` when nothing was live under
    /// `name`. A volume whose pool is missing is kept and reported.
    pub fn destroy(&mut self, name: &str) -> Result<Option<Volume>> {
        self.destroyed.push(name.to_string());

        let Some(volume) = self.volumes.get(name) else {
            return Ok(None);
        };

        let pool = self
            .pools
            .get_mut(&volume.pool)
            .ok_or_else(|| DriverError::InconsistentPool {
                volume: volume.name.clone(),
                pool: volume.pool.clone(),
            })?;

        pool.release(volume.size_bytes);
        Ok(self.volumes.remove(name))
    }

    /// Insert the volume and charge its pool (all checks already passed)
    fn allocate(&mut self, name: &str, pool_name: String, size_bytes: u64) -> Volume {
        if let Some(pool) = self.pools.get_mut(&pool_name) {
            pool.reserve(size_bytes);
        }

        let volume = Volume {
            name: name.to_string(),
            pool: pool_name,
            size_bytes,
        };
        self.volumes.insert(volume.name.clone(), volume.clone());
        volume
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Names of all live volumes (unordered)
    pub fn list(&self) -> Vec<String> {
        self.volumes.keys().cloned().collect()
    }

    pub fn volume(&self, name: &str) -> Option<&Volume> {
        self.volumes.get(name)
    }

    pub fn volume_count(&self) -> usize {
        self.volumes.len()
    }

    pub fn pool(&self, name: &str) -> Option<&Pool> {
        self.pools.get(name)
    }

    /// All pools, sorted by name
    pub fn pools(&self) -> Vec<Pool> {
        let mut pools: Vec<Pool> = self.pools.values().cloned().collect();
        pools.sort_by(|a, b| a.name().cmp(b.name()));
        pools
    }

    /// Destroyed-volume ledger in call order
    pub fn destroyed(&self) -> &[String] {
        &self.destroyed
    }

    pub fn config(&self) -> Option<&DriverConfig> {
        self.config.as_ref()
    }

    /// Instance name of the active configuration, empty if uninitialized
    pub fn instance_name(&self) -> &str {
        self.config
            .as_ref()
            .map(|c| c.instance_name.as_str())
            .unwrap_or("")
    }
}
