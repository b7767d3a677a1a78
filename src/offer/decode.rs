//! Attribute map decoding
//!
//! Each entry is decoded in two steps: look up the declared [`OfferKind`] of
//! the attribute name, then deserialize the body into the shape that kind
//! requires. Unknown names and mismatched shapes are hard failures.

use serde::Deserialize;
use serde_json::Value;

use super::{Offer, OfferKind, OfferMap};
use crate::error::{DriverError, Result};

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct BoolShape {
    offer: bool,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct StringShape {
    offer: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RangeShape {
    min: u64,
    max: u64,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ListShape {
    offers: Vec<String>,
}

/// Decode a pool's raw `attributes` object into typed offers
///
/// `null` or a missing map decodes to an empty [`OfferMap`].
pub fn decode_offer_map(raw: &Value) -> Result<OfferMap> {
    let entries = match raw {
        Value::Null => return Ok(OfferMap::new()),
        Value::Object(entries) => entries,
        other => {
            return Err(DriverError::Decode(format!(
                "attributes must be an object, got {}",
                json_type(other)
            )))
        }
    };

    let mut offers = OfferMap::new();
    for (name, body) in entries {
        let kind = OfferKind::of(name)
            .ok_or_else(|| DriverError::UnknownAttribute(name.clone()))?;
        offers.insert(name.clone(), decode_offer(name, kind, body)?);
    }
    Ok(offers)
}

fn decode_offer(attribute: &str, kind: OfferKind, body: &Value) -> Result<Offer> {
    let invalid = |reason: String| DriverError::InvalidOffer {
        attribute: attribute.to_string(),
        reason,
    };

    match kind {
        OfferKind::Bool => {
            let shape: BoolShape = shape_of(body).map_err(invalid)?;
            Ok(Offer::Bool(shape.offer))
        }
        OfferKind::String => {
            let shape: StringShape = shape_of(body).map_err(invalid)?;
            Ok(Offer::String(shape.offer))
        }
        OfferKind::IntRange => {
            let shape: RangeShape = shape_of(body).map_err(invalid)?;
            if shape.min > shape.max {
                return Err(invalid(format!(
                    "min {} is greater than max {}",
                    shape.min, shape.max
                )));
            }
            Ok(Offer::IntRange {
                min: shape.min,
                max: shape.max,
            })
        }
        OfferKind::List => {
            let shape: ListShape = shape_of(body).map_err(invalid)?;
            if shape.offers.is_empty() {
                return Err(invalid("list offer must name at least one value".into()));
            }
            Ok(Offer::List(shape.offers))
        }
    }
}

fn shape_of<T: for<'de> Deserialize<'de>>(body: &Value) -> std::result::Result<T, String> {
    T::deserialize(body).map_err(|e| e.to_string())
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
