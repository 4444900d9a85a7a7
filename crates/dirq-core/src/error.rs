use dirq_schema::error::SchemaError;
use thiserror::Error as ThisError;

///
/// EvalError
///
/// Failures of one leaf evaluation. Every variant reflects a logical or
/// schema defect, never a transient condition, so all are terminal for
/// the single leaf: no retry, no substituted truth value. Whether a leaf
/// error aborts a whole search is the composite evaluator's call.
///
/// Absent attributes are not errors; they deterministically evaluate to
/// `false`.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum EvalError {
    #[error("unknown attribute: '{name}'")]
    UnknownAttribute { name: String },

    #[error("schema inconsistency: {message}")]
    SchemaInconsistency { message: String },

    #[error("not implemented: {feature}")]
    NotImplemented { feature: &'static str },

    /// Defensive catch-all for malformed trees handed over by the
    /// composite evaluator; never produced by dispatch over the closed
    /// [`crate::filter::FilterNode`] enum.
    #[error("unsupported filter node: {kind}")]
    UnsupportedFilterNode { kind: String },
}

impl From<SchemaError> for EvalError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::UnknownAttribute { name } => Self::UnknownAttribute { name },
            other => Self::SchemaInconsistency {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dirq_schema::{attribute::MatchUsage, oid::Oid};

    #[test]
    fn unknown_attribute_maps_to_unknown_attribute() {
        let err: EvalError = SchemaError::UnknownAttribute {
            name: "doesNotExist".to_string(),
        }
        .into();
        assert_eq!(
            err,
            EvalError::UnknownAttribute {
                name: "doesNotExist".to_string()
            }
        );
    }

    #[test]
    fn other_schema_errors_map_to_schema_inconsistency() {
        let err: EvalError = SchemaError::MissingMatchingRule {
            oid: Oid::new("2.5.4.3").expect("valid oid"),
            usage: MatchUsage::Ordering,
        }
        .into();
        assert!(matches!(err, EvalError::SchemaInconsistency { .. }));
    }
}
