//! Offer Module
//!
//! Typed capability descriptors attached to a storage pool.
//!
//! ## Responsibilities
//! - Model every offer kind as one variant of [`Offer`]
//! - Declare the kind of each known attribute name
//! - Decode raw JSON attribute maps by dispatching on the declared kind
//!
//! ## JSON Shapes
//! ```text
//! boolean        {"offer": true}
//! string         {"offer": "fake"}
//! numeric range  {"min": 100, "max": 5000}
//! list           {"offers": ["hdd", "ssd"]}
//! ```
//!
//! Matching offers against volume requests is done by the orchestrator, not
//! here; pools only carry them.

mod decode;

use std::collections::BTreeMap;

pub use decode::decode_offer_map;

/// Attribute name → offer, as attached to one pool
pub type OfferMap = BTreeMap<String, Offer>;

// =============================================================================
// Attribute Names
// =============================================================================

pub const SNAPSHOTS: &str = "snapshots";
pub const CLONES: &str = "clones";
pub const ENCRYPTION: &str = "encryption";
pub const IOPS: &str = "IOPS";
pub const BACKEND_TYPE: &str = "backendType";
pub const MEDIA: &str = "media";
pub const PROVISIONING_TYPE: &str = "provisioningType";

/// The kind an attribute is declared with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferKind {
    Bool,
    String,
    IntRange,
    List,
}

impl OfferKind {
    /// Look up the declared kind of an attribute name
    ///
    /// Returns `None` for names this driver does not recognize.
    pub fn of(attribute: &str) -> Option<Self> {
        match attribute {
            SNAPSHOTS | CLONES | ENCRYPTION => Some(OfferKind::Bool),
            IOPS => Some(OfferKind::IntRange),
            BACKEND_TYPE => Some(OfferKind::String),
            MEDIA | PROVISIONING_TYPE => Some(OfferKind::List),
            _ => None,
        }
    }
}

/// A capability a pool offers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Offer {
    /// Feature is or is not available
    Bool(bool),

    /// A single fixed value
    String(String),

    /// Inclusive numeric range
    IntRange { min: u64, max: u64 },

    /// Any of the listed values
    List(Vec<String>),
}

impl Offer {
    /// Convenience constructor for list offers
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Offer::List(values.into_iter().map(Into::into).collect())
    }

    pub fn kind(&self) -> OfferKind {
        match self {
            Offer::Bool(_) => OfferKind::Bool,
            Offer::String(_) => OfferKind::String,
            Offer::IntRange { .. } => OfferKind::IntRange,
            Offer::List(_) => OfferKind::List,
        }
    }

    /// Render in the same JSON shape [`decode_offer_map`] accepts
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Offer::Bool(b) => serde_json::json!({ "offer": b }),
            Offer::String(s) => serde_json::json!({ "offer": s }),
            Offer::IntRange { min, max } => serde_json::json!({ "min": min, "max": max }),
            Offer::List(values) => serde_json::json!({ "offers": values }),
        }
    }
}

impl serde::Serialize for Offer {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.to_json(), serializer)
    }
}
