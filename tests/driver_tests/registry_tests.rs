//! Registry Tests
//!
//! Tests verify:
//! - The built-in table contains the fake driver
//! - Each create call yields an independent instance
//! - Custom registrations and unknown names

use vdriver::driver::{DriverRegistry, StorageDriver, VolumeOptions, POOL_OPTION};
use vdriver::error::{DriverError, ErrorKind};
use vdriver::{DriverConfig, FakeDriver};

fn config_json() -> String {
    DriverConfig::builder()
        .instance_name("registry")
        .pool("gold", 100)
        .build()
        .to_json()
        .unwrap()
}

#[test]
fn test_builtin_registry() {
    let registry = DriverRegistry::with_builtin();

    assert!(registry.contains("fake"));
    assert_eq!(registry.names(), vec!["fake"]);
}

#[test]
fn test_unknown_driver() {
    let registry = DriverRegistry::with_builtin();

    let err = registry.create("ontap-nas").err().unwrap();

    assert!(matches!(err, DriverError::UnknownDriver(ref name) if name == "ontap-nas"));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_instances_are_independent() {
    let registry = DriverRegistry::with_builtin();
    let first = registry.create("fake").unwrap();
    let second = registry.create("fake").unwrap();
    first.initialize(config_json().as_bytes()).unwrap();
    second.initialize(config_json().as_bytes()).unwrap();

    let gold = VolumeOptions::from([(POOL_OPTION.to_string(), "gold".to_string())]);
    first.create("v1", 100, &gold).unwrap();

    assert!(second.get("v1").is_err());
    second.create("v1", 100, &gold).unwrap();
}

#[test]
fn test_register_custom_name() {
    let mut registry = DriverRegistry::new();
    assert!(registry.names().is_empty());

    registry.register(
        "fake-preloaded",
        Box::new(|| {
            let driver = FakeDriver::new();
            driver
                .initialize(config_json().as_bytes())
                .expect("static config is valid");
            Box::new(driver) as Box<dyn StorageDriver>
        }),
    );

    let driver = registry.create("fake-preloaded").unwrap();
    assert_eq!(driver.name(), "fake");
    assert!(driver.list().unwrap().is_empty());
    assert_eq!(registry.names(), vec!["fake-preloaded"]);
}
