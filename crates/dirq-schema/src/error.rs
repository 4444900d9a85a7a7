use crate::{attribute::MatchUsage, oid::Oid};
use thiserror::Error as ThisError;

///
/// SchemaError
///
/// Failures raised by schema lookup and registry construction. Lookup
/// errors reflect a logical or configuration defect, never a transient
/// condition; callers do not retry.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SchemaError {
    #[error("unknown attribute: '{name}'")]
    UnknownAttribute { name: String },

    #[error("no attribute type registered for oid {oid}")]
    UnknownAttributeType { oid: Oid },

    #[error("attribute type {oid} has no usable matching rule for {usage} matching")]
    MissingMatchingRule { oid: Oid, usage: MatchUsage },

    #[error("duplicate attribute type oid: {oid}")]
    DuplicateOid { oid: Oid },

    #[error("attribute name '{name}' is already registered")]
    ConflictingAlias { name: String },

    #[error("invalid oid: '{value}'")]
    InvalidOid { value: String },
}
