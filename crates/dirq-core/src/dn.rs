use derive_more::Display;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use thiserror::Error as ThisError;

///
/// DnError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum DnError {
    #[error("malformed rdn '{rdn}': expected attribute=value")]
    MalformedRdn { rdn: String },
}

///
/// Dn
///
/// Normalized distinguished name. RDNs are stored leaf-first, with
/// attribute names and values lowercased and whitespace trimmed around
/// `=` and `,`, so equality and ancestry checks are plain string
/// operations on RDN boundaries.
///
/// The empty DN (root) is valid and is the ancestor of every other DN.
/// Escaped separators inside RDN values are out of scope here; filter
/// evaluation only ever sees normalized entry and base DNs.
///

#[derive(Clone, Debug, Default, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Dn(String);

impl Dn {
    #[must_use]
    pub const fn root() -> Self {
        Self(String::new())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// DN with the leaf RDN removed; `None` for the root and for
    /// single-RDN names (their parent is the root, see `is_child_of`).
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }

        match self.0.split_once(',') {
            Some((_, suffix)) => Some(Self(suffix.to_string())),
            None => Some(Self::root()),
        }
    }

    /// Proper-descendant check on RDN boundaries.
    #[must_use]
    pub fn is_descendant_of(&self, base: &Self) -> bool {
        if self == base || self.is_root() {
            return false;
        }

        if base.is_root() {
            return true;
        }

        self.0
            .strip_suffix(base.as_str())
            .is_some_and(|head| head.ends_with(','))
    }

    /// Immediate-child check: exactly one RDN below the base.
    #[must_use]
    pub fn is_child_of(&self, base: &Self) -> bool {
        self.parent().as_ref() == Some(base)
    }
}

impl FromStr for Dn {
    type Err = DnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Self::root());
        }

        let mut rdns = Vec::new();
        for rdn in trimmed.split(',') {
            let Some((attr, value)) = rdn.split_once('=') else {
                return Err(DnError::MalformedRdn {
                    rdn: rdn.trim().to_string(),
                });
            };

            let attr = attr.trim().to_lowercase();
            let value = value.trim().to_lowercase();
            if attr.is_empty() || value.is_empty() {
                return Err(DnError::MalformedRdn {
                    rdn: rdn.trim().to_string(),
                });
            }

            rdns.push(format!("{attr}={value}"));
        }

        Ok(Self(rdns.join(",")))
    }
}

impl Serialize for Dn {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Dn {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
