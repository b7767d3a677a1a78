//! Command definitions
//!
//! Represents driver requests, one per operation of [`StorageDriver`].

use serde::{Deserialize, Serialize};

use super::Reply;
use crate::driver::{StorageDriver, VolumeOptions};
use crate::error::Result;

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Command {
    /// Allocate a volume from the pool named in `options`
    Create {
        name: String,
        #[serde(rename = "sizeBytes")]
        size_bytes: u64,
        #[serde(default)]
        options: VolumeOptions,
    },

    /// Copy an existing volume
    Clone {
        name: String,
        source: String,
        #[serde(default)]
        snapshot: String,
        #[serde(default)]
        options: VolumeOptions,
    },

    /// Remove a volume
    Destroy { name: String },

    /// Existence probe
    Get { name: String },

    /// Names of all volumes
    List,

    Attach {
        name: String,
        mountpoint: String,
        #[serde(default)]
        options: VolumeOptions,
    },

    Detach { name: String, mountpoint: String },

    SnapshotList { name: String },
}

impl Command {
    /// Operation name, as used in logs and replies
    pub fn operation(&self) -> &'static str {
        match self {
            Command::Create { .. } => "create",
            Command::Clone { .. } => "clone",
            Command::Destroy { .. } => "destroy",
            Command::Get { .. } => "get",
            Command::List => "list",
            Command::Attach { .. } => "attach",
            Command::Detach { .. } => "detach",
            Command::SnapshotList { .. } => "snapshotList",
        }
    }

    /// Run this command against any driver
    pub fn apply(self, driver: &dyn StorageDriver) -> Result<Reply> {
        match self {
            Command::Create {
                name,
                size_bytes,
                options,
            } => driver.create(&name, size_bytes, &options).map(|_| Reply::Done),
            Command::Clone {
                name,
                source,
                snapshot,
                options,
            } => driver
                .create_clone(&name, &source, &snapshot, &options)
                .map(|_| Reply::Done),
            Command::Destroy { name } => driver.destroy(&name).map(|_| Reply::Done),
            Command::Get { name } => driver.get(&name).map(|_| Reply::Done),
            Command::List => driver.list().map(Reply::Volumes),
            Command::Attach {
                name,
                mountpoint,
                options,
            } => driver.attach(&name, &mountpoint, &options).map(|_| Reply::Done),
            Command::Detach { name, mountpoint } => {
                driver.detach(&name, &mountpoint).map(|_| Reply::Done)
            }
            Command::SnapshotList { name } => driver.snapshot_list(&name).map(Reply::Snapshots),
        }
    }
}
