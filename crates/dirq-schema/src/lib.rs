//! Directory schema model for dirq: attribute-type identifiers, matching
//! rules (normalizer + comparator pairs), and the read-only registries the
//! evaluation engine resolves attribute descriptions through.
#![warn(unreachable_pub)]

pub mod attribute;
pub mod error;
pub mod matching;
pub mod oid;
pub mod registry;
pub mod value;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No registries, builders, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        attribute::{AttributeSyntax, AttributeType, MatchUsage},
        matching::MatchingRule,
        oid::Oid,
        value::AttrValue,
    };
}
