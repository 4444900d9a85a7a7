use crate::{dn::Dn, entry::Entry, filter::SearchScope};

///
/// ScopeEvaluator
///
/// Decides whether an entry sits inside a search scope relative to a
/// base DN. Pure DN computation; no schema access and no alias
/// dereferencing (alias handling is a protocol concern).
///

#[derive(Clone, Copy, Debug, Default)]
pub struct ScopeEvaluator;

impl ScopeEvaluator {
    /// Evaluate one scope assertion against one entry.
    #[must_use]
    pub fn evaluate(&self, base: &Dn, scope: SearchScope, entry: &Entry) -> bool {
        let dn = entry.dn();

        match scope {
            SearchScope::Object => dn == base,
            SearchScope::OneLevel => dn.is_child_of(base),
            SearchScope::Subtree => dn == base || dn.is_descendant_of(base),
        }
    }
}
