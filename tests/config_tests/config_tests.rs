//! Configuration Tests
//!
//! Tests verify:
//! - Decoding of the full configuration document
//! - Builder output is accepted by the loader
//! - Loading from a file
//! - Rejection of malformed documents

use std::io::Write;

use tempfile::NamedTempFile;
use vdriver::config::{DriverConfig, PoolConfig, Protocol};
use vdriver::error::{DriverError, ErrorKind};
use vdriver::offer::{Offer, IOPS, MEDIA, SNAPSHOTS};

// =============================================================================
// Decode Tests
// =============================================================================

#[test]
fn test_decode_full_document() {
    let json = r#"{
        "version": 1,
        "storageDriverName": "fake",
        "storagePrefix": "trident_",
        "debug": true,
        "protocol": "block",
        "instanceName": "array-1",
        "pools": {
            "fast": {
                "sizeBytes": 2048,
                "attributes": {
                    "IOPS": {"min": 1000, "max": 10000},
                    "media": {"offers": ["ssd"]}
                }
            },
            "slow": {"sizeBytes": 4096}
        }
    }"#;

    let config = DriverConfig::from_json(json).unwrap();

    assert_eq!(config.protocol, Protocol::Block);
    assert_eq!(config.instance_name, "array-1");
    assert_eq!(config.storage_prefix.as_deref(), Some("trident_"));
    assert!(config.debug);
    assert_eq!(config.pools.len(), 2);
    assert_eq!(
        config.pools["fast"].attributes[IOPS],
        Offer::IntRange { min: 1000, max: 10000 }
    );
    assert!(config.pools["slow"].attributes.is_empty());
    assert_eq!(config.total_capacity(), 6144);
}

#[test]
fn test_protocol_values() {
    for (raw, expected) in [("file", Protocol::File), ("block", Protocol::Block), ("", Protocol::Any)] {
        let json = format!(r#"{{"protocol": "{}"}}"#, raw);
        assert_eq!(DriverConfig::from_json(&json).unwrap().protocol, expected);
    }
}

#[test]
fn test_reject_malformed_json() {
    let err = DriverConfig::from_json("{\"pools\": ").unwrap_err();
    assert!(matches!(err, DriverError::Json(_)));
    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[test]
fn test_reject_negative_size() {
    let err = DriverConfig::from_json(r#"{"pools": {"p": {"sizeBytes": -1}}}"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[test]
fn test_reject_missing_size() {
    let err = DriverConfig::from_json(r#"{"pools": {"p": {"attributes": {}}}}"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[test]
fn test_reject_unsupported_version() {
    let err = DriverConfig::from_json(r#"{"version": 2}"#).unwrap_err();
    assert!(err.to_string().contains("version 2"));
}

#[test]
fn test_reject_bad_attribute_in_any_pool() {
    let json = r#"{
        "pools": {
            "good": {"sizeBytes": 1, "attributes": {"snapshots": {"offer": true}}},
            "bad": {"sizeBytes": 1, "attributes": {"snapshots": {"offer": "yes"}}}
        }
    }"#;

    let err = DriverConfig::from_json(json).unwrap_err();

    assert!(matches!(err, DriverError::InvalidOffer { .. }));
}

// =============================================================================
// Builder Tests
// =============================================================================

#[test]
fn test_builder_output_is_loadable() {
    let config = DriverConfig::builder()
        .instance_name("built")
        .protocol(Protocol::File)
        .storage_prefix("pfx_")
        .pool_config(
            "gold",
            PoolConfig::new(1000)
                .with_attribute(SNAPSHOTS, Offer::Bool(true))
                .with_attribute(MEDIA, Offer::list(["hdd", "ssd"])),
        )
        .pool("silver", 10)
        .build();

    let decoded = DriverConfig::from_json(&config.to_json().unwrap()).unwrap();

    assert_eq!(decoded, config);
}

// =============================================================================
// File Tests
// =============================================================================

#[test]
fn test_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"instanceName": "from-disk", "pools": {{"p": {{"sizeBytes": 7}}}}}}"#
    )
    .unwrap();

    let config = DriverConfig::from_file(file.path()).unwrap();

    assert_eq!(config.instance_name, "from-disk");
    assert_eq!(config.pools["p"].size_bytes, 7);
}

#[test]
fn test_from_missing_file() {
    let dir = tempfile::tempdir().unwrap();

    let err = DriverConfig::from_file(dir.path().join("absent.json")).unwrap_err();

    assert!(matches!(err, DriverError::Io(_)));
}
