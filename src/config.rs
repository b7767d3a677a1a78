//! Configuration for a vdriver instance
//!
//! The configuration arrives as JSON. Top-level fields decode directly with
//! serde; each pool's `attributes` object goes through
//! [`decode_offer_map`](crate::offer::decode_offer_map) so unrecognized or
//! malformed offers fail the whole load.
//!
//! ```json
//! {
//!   "version": 1,
//!   "storageDriverName": "fake",
//!   "protocol": "file",
//!   "instanceName": "fake-a",
//!   "pools": {
//!     "gold": { "sizeBytes": 1000, "attributes": { "media": { "offers": ["ssd"] } } }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::driver::FAKE_DRIVER_NAME;
use crate::error::{DriverError, Result};
use crate::offer::{decode_offer_map, Offer, OfferMap};

/// The only configuration version this driver understands
pub const CONFIG_VERSION: u32 = 1;

/// Storage protocol a backend serves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Protocol {
    #[serde(rename = "file")]
    File,

    #[serde(rename = "block")]
    Block,

    /// No preference
    #[default]
    #[serde(rename = "")]
    Any,
}

/// One configured pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolConfig {
    /// Offers advertised by the pool
    pub attributes: OfferMap,

    /// Configured capacity in bytes
    pub size_bytes: u64,
}

impl PoolConfig {
    pub fn new(size_bytes: u64) -> Self {
        Self {
            attributes: OfferMap::new(),
            size_bytes,
        }
    }

    /// Attach an offer
    pub fn with_attribute(mut self, name: impl Into<String>, offer: Offer) -> Self {
        self.attributes.insert(name.into(), offer);
        self
    }
}

/// Main configuration for one driver instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverConfig {
    // -------------------------------------------------------------------------
    // Common Driver Fields
    // -------------------------------------------------------------------------
    pub version: u32,

    pub storage_driver_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_prefix: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub serial_numbers: Vec<String>,

    pub debug: bool,

    // -------------------------------------------------------------------------
    // Backend Fields
    // -------------------------------------------------------------------------
    pub protocol: Protocol,

    /// Buckets a volume can be allocated from
    pub pools: BTreeMap<String, PoolConfig>,

    pub instance_name: String,
}

/// Wire form before attribute maps are decoded
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDriverConfig {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default)]
    storage_driver_name: Option<String>,
    #[serde(default)]
    storage_prefix: Option<String>,
    #[serde(default)]
    serial_numbers: Vec<String>,
    #[serde(default)]
    debug: bool,
    #[serde(default)]
    protocol: Protocol,
    #[serde(default)]
    pools: BTreeMap<String, RawPoolConfig>,
    #[serde(default)]
    instance_name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPoolConfig {
    #[serde(default)]
    attributes: Value,
    size_bytes: u64,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

impl DriverConfig {
    /// Create a new config builder
    pub fn builder() -> DriverConfigBuilder {
        DriverConfigBuilder::default()
    }

    /// Decode a configuration from raw JSON bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let raw: RawDriverConfig = serde_json::from_slice(bytes)?;
        Self::try_from(raw)
    }

    /// Decode a configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_slice(json.as_bytes())
    }

    /// Read and decode a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = fs::read(path.as_ref())?;
        Self::from_slice(&bytes)
    }

    /// Render as the JSON [`DriverConfig::from_json`] accepts
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serial numbers are derived from the instance name
    pub fn derived_serial_numbers(&self) -> Vec<String> {
        vec![format!("{}_SN", self.instance_name)]
    }

    /// Sum of every pool's configured capacity
    pub fn total_capacity(&self) -> u64 {
        self.pools.values().map(|p| p.size_bytes).sum()
    }
}

impl TryFrom<RawDriverConfig> for DriverConfig {
    type Error = DriverError;

    fn try_from(raw: RawDriverConfig) -> Result<Self> {
        if raw.version != CONFIG_VERSION {
            return Err(DriverError::Decode(format!(
                "unsupported config version {}, expected {}",
                raw.version, CONFIG_VERSION
            )));
        }

        let storage_driver_name = match raw.storage_driver_name {
            None => FAKE_DRIVER_NAME.to_string(),
            Some(name) if name == FAKE_DRIVER_NAME => name,
            Some(name) => {
                return Err(DriverError::Decode(format!(
                    "storageDriverName {} does not match driver {}",
                    name, FAKE_DRIVER_NAME
                )))
            }
        };

        let mut pools = BTreeMap::new();
        for (name, pool) in raw.pools {
            let attributes = decode_offer_map(&pool.attributes)?;
            pools.insert(
                name,
                PoolConfig {
                    attributes,
                    size_bytes: pool.size_bytes,
                },
            );
        }

        Ok(Self {
            version: raw.version,
            storage_driver_name,
            storage_prefix: raw.storage_prefix,
            serial_numbers: raw.serial_numbers,
            debug: raw.debug,
            protocol: raw.protocol,
            pools,
            instance_name: raw.instance_name,
        })
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            storage_driver_name: FAKE_DRIVER_NAME.to_string(),
            storage_prefix: None,
            serial_numbers: Vec::new(),
            debug: false,
            protocol: Protocol::Any,
            pools: BTreeMap::new(),
            instance_name: String::new(),
        }
    }
}

/// Builder for DriverConfig
#[derive(Default)]
pub struct DriverConfigBuilder {
    config: DriverConfig,
}

impl DriverConfigBuilder {
    /// Set the instance name (also seeds the serial numbers)
    pub fn instance_name(mut self, name: impl Into<String>) -> Self {
        self.config.instance_name = name.into();
        self
    }

    /// Set the storage protocol
    pub fn protocol(mut self, protocol: Protocol) -> Self {
        self.config.protocol = protocol;
        self
    }

    /// Set the storage prefix
    pub fn storage_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.storage_prefix = Some(prefix.into());
        self
    }

    /// Enable debug mode
    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Add a pool with no offers
    pub fn pool(self, name: impl Into<String>, size_bytes: u64) -> Self {
        self.pool_config(name, PoolConfig::new(size_bytes))
    }

    /// Add a fully specified pool
    pub fn pool_config(mut self, name: impl Into<String>, pool: PoolConfig) -> Self {
        self.config.pools.insert(name.into(), pool);
        self
    }

    pub fn build(self) -> DriverConfig {
        self.config
    }
}
