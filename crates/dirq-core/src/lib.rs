//! Evaluation engine for dirq: given one parsed search-filter leaf and one
//! candidate entry, decide match/no-match under schema-defined semantics.
//! Composite AND/OR/NOT logic belongs to the consumer; this crate owns the
//! leaf, substring, and scope evaluators plus the entry/filter vocabulary.
#![warn(unreachable_pub)]

pub mod dn;
pub mod entry;
pub mod error;
pub mod eval;
pub mod filter;
pub mod obs;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use dirq_schema as schema;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        dn::Dn,
        entry::Entry,
        eval::LeafEvaluator,
        filter::{FilterNode, SearchScope, SubstringPattern},
    };
    pub use dirq_schema::prelude::*;
}
