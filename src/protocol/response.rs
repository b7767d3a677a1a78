//! Response definitions
//!
//! [`Reply`] is what a successful command yields; [`Response`] is the record
//! written back for every command, success or not.

use serde::Serialize;

use crate::driver::Snapshot;
use crate::error::{DriverError, ErrorKind, Result};

/// Payload of a successful command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Completed with nothing to report
    Done,

    /// Volume names from `list`
    Volumes(Vec<String>),

    /// Snapshots from `snapshotList`
    Snapshots(Vec<Snapshot>),
}

/// Response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Ok,
    NotFound,
    Error,
}

/// A response record for one command
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    /// Operation the response belongs to
    pub op: &'static str,

    /// Status code
    pub status: Status,

    /// Error class, set for NOT_FOUND and ERROR
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Error message, set for NOT_FOUND and ERROR
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub volumes: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshots: Option<Vec<Snapshot>>,
}

impl Response {
    /// Create an OK response from a reply
    pub fn ok(op: &'static str, reply: Reply) -> Self {
        let mut response = Self {
            op,
            status: Status::Ok,
            kind: None,
            message: None,
            volumes: None,
            snapshots: None,
        };
        match reply {
            Reply::Done => {}
            Reply::Volumes(mut names) => {
                names.sort();
                response.volumes = Some(names);
            }
            Reply::Snapshots(snapshots) => response.snapshots = Some(snapshots),
        }
        response
    }

    /// Create a NOT_FOUND or ERROR response
    pub fn error(op: &'static str, err: &DriverError) -> Self {
        let status = match err.kind() {
            ErrorKind::NotFound => Status::NotFound,
            _ => Status::Error,
        };
        Self {
            op,
            status,
            kind: Some(err.kind().to_string()),
            message: Some(err.to_string()),
            volumes: None,
            snapshots: None,
        }
    }

    /// Build from the outcome of a command
    pub fn from_result(op: &'static str, result: &Result<Reply>) -> Self {
        match result {
            Ok(reply) => Self::ok(op, reply.clone()),
            Err(e) => Self::error(op, e),
        }
    }
}
