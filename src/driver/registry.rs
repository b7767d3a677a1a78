//! Driver registry
//!
//! Built once at startup; maps a driver name to a factory producing fresh,
//! uninitialized instances.

use std::collections::BTreeMap;

use super::{StorageDriver, FAKE_DRIVER_NAME};
use crate::engine::FakeDriver;
use crate::error::{DriverError, Result};

/// Constructor for one driver type
pub type DriverFactory = Box<dyn Fn() -> Box<dyn StorageDriver> + Send + Sync>;

/// Table of available driver types
pub struct DriverRegistry {
    factories: BTreeMap<String, DriverFactory>,
}

impl DriverRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// A registry holding every driver this crate ships
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(
            FAKE_DRIVER_NAME,
            Box::new(|| Box::new(FakeDriver::new()) as Box<dyn StorageDriver>),
        );
        registry
    }

    /// Register (or replace) a driver type
    pub fn register(&mut self, name: impl Into<String>, factory: DriverFactory) {
        let name = name.into();
        tracing::debug!(driver = %name, "registered storage driver");
        self.factories.insert(name, factory);
    }

    /// Instantiate a driver by name
    pub fn create(&self, name: &str) -> Result<Box<dyn StorageDriver>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| DriverError::UnknownDriver(name.to_string()))?;
        Ok(factory())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered driver names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }
}

impl Default for DriverRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}
