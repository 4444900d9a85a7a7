use crate::error::SchemaError;
use derive_more::{AsRef, Display};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

///
/// Oid
///
/// Canonical identifier for an attribute type, in dotted-decimal form
/// (for example `2.5.4.3`). Human-readable aliases such as `cn` live in
/// the registry; every alias resolves to exactly one `Oid`.
///

#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Oid(String);

impl Oid {
    /// Parse a dotted-decimal OID, rejecting anything else.
    pub fn new(value: impl Into<String>) -> Result<Self, SchemaError> {
        let value = value.into();

        if is_dotted_decimal(&value) {
            Ok(Self(value))
        } else {
            Err(SchemaError::InvalidOid { value })
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Oid {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for Oid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Oid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Check the dotted-decimal shape: digit arcs separated by single dots,
/// at least two arcs, no leading/trailing dot.
pub(crate) fn is_dotted_decimal(value: &str) -> bool {
    let mut arcs = 0;

    for arc in value.split('.') {
        if arc.is_empty() || !arc.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        arcs += 1;
    }

    arcs >= 2
}
