//! Command Tests
//!
//! Tests verify:
//! - Script decoding (comments, blank lines, bad lines)
//! - Command dispatch through FakeDriver::execute
//! - Response records for success and failure

use std::io::Cursor;

use vdriver::config::DriverConfig;
use vdriver::driver::{VolumeOptions, POOL_OPTION};
use vdriver::engine::FakeDriver;
use vdriver::error::ErrorKind;
use vdriver::protocol::{
    decode_command, decode_script, encode_command, encode_response, Command, Reply, Response,
    Status,
};

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_driver() -> FakeDriver {
    FakeDriver::with_config(
        DriverConfig::builder()
            .instance_name("commands")
            .pool("gold", 1000)
            .build(),
    )
}

// =============================================================================
// Decoding Tests
// =============================================================================

#[test]
fn test_decode_create() {
    let command = decode_command(
        r#"{"op":"create","name":"v1","sizeBytes":400,"options":{"pool":"gold"}}"#,
    )
    .unwrap()
    .unwrap();

    assert_eq!(
        command,
        Command::Create {
            name: "v1".into(),
            size_bytes: 400,
            options: VolumeOptions::from([(POOL_OPTION.to_string(), "gold".to_string())]),
        }
    );
    assert_eq!(command.operation(), "create");
}

#[test]
fn test_decode_defaults() {
    let command = decode_command(r#"{"op":"clone","name":"c","source":"v1"}"#)
        .unwrap()
        .unwrap();

    assert_eq!(
        command,
        Command::Clone {
            name: "c".into(),
            source: "v1".into(),
            snapshot: String::new(),
            options: VolumeOptions::new(),
        }
    );
}

#[test]
fn test_decode_skips_blank_and_comment_lines() {
    assert_eq!(decode_command("   ").unwrap(), None);
    assert_eq!(decode_command("# setup").unwrap(), None);
}

#[test]
fn test_encoded_command_decodes() {
    let command = Command::SnapshotList { name: "v1".into() };

    let line = encode_command(&command).unwrap();

    assert!(line.contains(r#""op":"snapshotList""#));
    assert_eq!(decode_command(&line).unwrap(), Some(command));
}

#[test]
fn test_decode_script() {
    let script = "\
# provision
{\"op\":\"create\",\"name\":\"v1\",\"sizeBytes\":10,\"options\":{\"pool\":\"gold\"}}

{\"op\":\"list\"}
{\"op\":\"destroy\",\"name\":\"v1\"}
";

    let commands = decode_script(Cursor::new(script)).unwrap();

    assert_eq!(commands.len(), 3);
    assert_eq!(commands[1], Command::List);
}

#[test]
fn test_decode_script_reports_line() {
    let script = "{\"op\":\"list\"}\n{\"op\":\"explode\"}\n";

    let err = decode_script(Cursor::new(script)).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Decode);
    assert!(err.to_string().contains("line 2"));
}

// =============================================================================
// Execution Tests
// =============================================================================

#[test]
fn test_execute_workload() {
    let driver = setup_driver();
    let gold = VolumeOptions::from([(POOL_OPTION.to_string(), "gold".to_string())]);

    let reply = driver
        .execute(Command::Create {
            name: "v1".into(),
            size_bytes: 400,
            options: gold,
        })
        .unwrap();
    assert_eq!(reply, Reply::Done);

    driver
        .execute(Command::Clone {
            name: "v2".into(),
            source: "v1".into(),
            snapshot: "s".into(),
            options: VolumeOptions::new(),
        })
        .unwrap();

    let Reply::Volumes(mut names) = driver.execute(Command::List).unwrap() else {
        panic!("list should return volumes");
    };
    names.sort();
    assert_eq!(names, vec!["v1".to_string(), "v2".to_string()]);

    driver.execute(Command::Destroy { name: "v1".into() }).unwrap();
    assert_eq!(driver.pool_remaining("gold"), Some(600));
}

#[test]
fn test_execute_unsupported() {
    let driver = setup_driver();

    let err = driver
        .execute(Command::Attach {
            name: "v1".into(),
            mountpoint: "/mnt".into(),
            options: VolumeOptions::new(),
        })
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::CapabilityNotSupported);
}

// =============================================================================
// Response Tests
// =============================================================================

#[test]
fn test_response_for_missing_volume() {
    let driver = setup_driver();

    let result = driver.execute(Command::Get { name: "ghost".into() });
    let response = Response::from_result("get", &result);

    assert_eq!(response.status, Status::NotFound);
    assert_eq!(response.kind.as_deref(), Some("not_found"));
    let line = encode_response(&response).unwrap();
    assert!(line.contains(r#""status":"not_found""#));
}

#[test]
fn test_response_lists_sorted_volumes() {
    let response = Response::ok("list", Reply::Volumes(vec!["b".into(), "a".into()]));

    assert_eq!(response.status, Status::Ok);
    assert_eq!(response.volumes, Some(vec!["a".to_string(), "b".to_string()]));
    assert!(response.message.is_none());
}
