//! Error types for vdriver
//!
//! Every operation reports a [`DriverError`] carrying the operation and the
//! subject it failed on. [`DriverError::kind`] folds the variants into the
//! coarse taxonomy callers branch on.

use std::fmt;

use thiserror::Error;

/// Result type alias using DriverError
pub type Result<T> = std::result::Result<T, DriverError>;

/// Unified error type for driver operations
#[derive(Debug, Error)]
pub enum DriverError {
    // -------------------------------------------------------------------------
    // Decode Errors
    // -------------------------------------------------------------------------
    #[error("Unable to decode driver configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid driver configuration: {0}")]
    Decode(String),

    #[error("Unrecognized storage attribute: {0}")]
    UnknownAttribute(String),

    #[error("Invalid offer for attribute {attribute}: {reason}")]
    InvalidOffer { attribute: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Request Errors
    // -------------------------------------------------------------------------
    #[error("{operation} {name}: no pool specified, expected '{option}' in options")]
    NoPoolSpecified {
        operation: &'static str,
        name: String,
        option: &'static str,
    },

    #[error("{operation}: could not find pool {pool}")]
    PoolNotFound { operation: &'static str, pool: String },

    #[error("{operation}: could not find volume {name}")]
    VolumeNotFound { operation: &'static str, name: String },

    #[error("clone {name}: source volume {source_name} not found")]
    SourceNotFound { name: String, source_name: String },

    #[error("{operation}: volume {name} already exists")]
    VolumeAlreadyExists { operation: &'static str, name: String },

    #[error(
        "{operation} {name}: requested {requested} bytes, \
         have {available} available in pool {pool}"
    )]
    InsufficientCapacity {
        operation: &'static str,
        name: String,
        pool: String,
        requested: u64,
        available: u64,
    },

    #[error("{driver} driver does not support {operation}")]
    CapabilityNotSupported {
        driver: &'static str,
        operation: &'static str,
    },

    #[error("volume {volume} references pool {pool}, which is not registered")]
    InconsistentPool { volume: String, pool: String },

    #[error("Unknown storage driver: {0}")]
    UnknownDriver(String),
}

/// Coarse error classes shared by every driver implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed configuration or attribute data
    Decode,
    /// A required input is missing
    Configuration,
    /// Referenced pool, volume or driver is absent
    NotFound,
    /// Name collision
    AlreadyExists,
    /// Not enough remaining bytes in the target pool
    Capacity,
    /// The operation is permanently unavailable on this driver
    CapabilityNotSupported,
    /// Driver state contradicts its own invariants
    InternalConsistency,
}

impl DriverError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            DriverError::Json(_)
            | DriverError::Decode(_)
            | DriverError::UnknownAttribute(_)
            | DriverError::InvalidOffer { .. } => ErrorKind::Decode,
            DriverError::Io(_) | DriverError::NoPoolSpecified { .. } => ErrorKind::Configuration,
            DriverError::PoolNotFound { .. }
            | DriverError::VolumeNotFound { .. }
            | DriverError::SourceNotFound { .. }
            | DriverError::UnknownDriver(_) => ErrorKind::NotFound,
            DriverError::VolumeAlreadyExists { .. } => ErrorKind::AlreadyExists,
            DriverError::InsufficientCapacity { .. } => ErrorKind::Capacity,
            DriverError::CapabilityNotSupported { .. } => ErrorKind::CapabilityNotSupported,
            DriverError::InconsistentPool { .. } => ErrorKind::InternalConsistency,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Decode => "decode",
            ErrorKind::Configuration => "configuration",
            ErrorKind::NotFound => "not_found",
            ErrorKind::AlreadyExists => "already_exists",
            ErrorKind::Capacity => "capacity",
            ErrorKind::CapabilityNotSupported => "capability_not_supported",
            ErrorKind::InternalConsistency => "internal_consistency",
        };
        f.write_str(s)
    }
}
