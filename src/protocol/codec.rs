//! Protocol codec
//!
//! Commands travel as JSON lines. Blank lines and lines starting with `#`
//! are skipped so scripts can carry comments.
//!
//! ```text
//! {"op":"create","name":"v1","sizeBytes":400,"options":{"pool":"gold"}}
//! {"op":"clone","name":"v1-clone","source":"v1","snapshot":"snap1"}
//! # comment
//! {"op":"destroy","name":"v1"}
//! {"op":"list"}
//! ```

use std::io::BufRead;

use super::{Command, Response};
use crate::error::{DriverError, Result};

/// Decode one script line
///
/// Returns `Ok(None)` for blank and comment lines.
pub fn decode_command(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(line)?))
}

/// Encode a command as a single JSON line (no trailing newline)
pub fn encode_command(command: &Command) -> Result<String> {
    Ok(serde_json::to_string(command)?)
}

/// Decode a whole script
///
/// Errors name the 1-based line number that failed.
pub fn decode_script<R: BufRead>(reader: R) -> Result<Vec<Command>> {
    let mut commands = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        match decode_command(&line) {
            Ok(Some(command)) => commands.push(command),
            Ok(None) => {}
            Err(e) => {
                return Err(DriverError::Decode(format!("line {}: {}", index + 1, e)));
            }
        }
    }
    Ok(commands)
}

/// Encode a response as a single JSON line (no trailing newline)
pub fn encode_response(response: &Response) -> Result<String> {
    Ok(serde_json::to_string(response)?)
}
