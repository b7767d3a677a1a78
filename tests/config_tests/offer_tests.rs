//! Offer Decoding Tests
//!
//! Tests verify:
//! - Every attribute name decodes with its declared kind
//! - Unknown names and mismatched shapes are rejected

use serde_json::json;
use vdriver::error::{DriverError, ErrorKind};
use vdriver::offer::{decode_offer_map, Offer, OfferKind};

#[test]
fn test_all_known_attributes() {
    let raw = json!({
        "snapshots": {"offer": true},
        "clones": {"offer": false},
        "encryption": {"offer": true},
        "IOPS": {"min": 0, "max": 0},
        "backendType": {"offer": "fake"},
        "media": {"offers": ["hdd"]},
        "provisioningType": {"offers": ["thin", "thick"]},
    });

    let offers = decode_offer_map(&raw).unwrap();

    assert_eq!(offers.len(), 7);
    for (name, offer) in &offers {
        assert_eq!(OfferKind::of(name), Some(offer.kind()));
    }
    assert_eq!(offers["clones"], Offer::Bool(false));
    assert_eq!(offers["provisioningType"], Offer::list(["thin", "thick"]));
}

#[test]
fn test_unknown_attribute() {
    let err = decode_offer_map(&json!({"color": {"offer": "blue"}})).unwrap_err();

    assert!(matches!(err, DriverError::UnknownAttribute(ref name) if name == "color"));
    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[test]
fn test_attribute_names_are_case_sensitive() {
    assert!(decode_offer_map(&json!({"iops": {"min": 1, "max": 2}})).is_err());
}

#[test]
fn test_inverted_range() {
    let err = decode_offer_map(&json!({"IOPS": {"min": 10, "max": 1}})).unwrap_err();
    assert!(err.to_string().contains("min 10 is greater than max 1"));
}

#[test]
fn test_empty_list() {
    let err = decode_offer_map(&json!({"media": {"offers": []}})).unwrap_err();
    assert!(matches!(err, DriverError::InvalidOffer { .. }));
}

#[test]
fn test_extra_fields_rejected() {
    let err = decode_offer_map(&json!({"clones": {"offer": true, "extra": 1}})).unwrap_err();
    assert!(matches!(err, DriverError::InvalidOffer { ref attribute, .. } if attribute == "clones"));
}

#[test]
fn test_wrong_value_type() {
    assert!(decode_offer_map(&json!({"backendType": {"offer": 3}})).is_err());
    assert!(decode_offer_map(&json!({"snapshots": true})).is_err());
}
