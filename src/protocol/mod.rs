//! Protocol Module
//!
//! Driver operations as data, so workloads can be scripted and replayed
//! against any [`StorageDriver`](crate::driver::StorageDriver).
//!
//! ## Script Format
//! One JSON object per line, tagged by `op`:
//! - `create`       - name, sizeBytes, options
//! - `clone`        - name, source, snapshot, options
//! - `destroy`      - name
//! - `get`          - name
//! - `list`         - (no fields)
//! - `attach`       - name, mountpoint, options
//! - `detach`       - name, mountpoint
//! - `snapshotList` - name
//!
//! ### Status Codes
//! - ok
//! - not_found
//! - error

mod command;
mod response;
mod codec;

pub use command::Command;
pub use response::{Reply, Response, Status};
pub use codec::{decode_command, decode_script, encode_command, encode_response};
