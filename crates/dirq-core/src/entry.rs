use crate::dn::Dn;
use dirq_schema::{oid::Oid, value::AttrValue};
use std::collections::BTreeMap;

///
/// Entry
///
/// One candidate directory record: a distinguished name plus raw
/// attribute values keyed by canonical OID. Values keep insertion order
/// for display purposes; matching treats them as an unordered multiset.
///
/// Entries are borrowed by the evaluator for the duration of one call
/// and never mutated by it.
///

#[derive(Clone, Debug, Default)]
pub struct Entry {
    dn: Dn,
    attributes: BTreeMap<Oid, Vec<AttrValue>>,
}

impl Entry {
    #[must_use]
    pub const fn new(dn: Dn) -> Self {
        Self {
            dn,
            attributes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub const fn dn(&self) -> &Dn {
        &self.dn
    }

    /// Values stored under an attribute type; an empty slice, never an
    /// error, when the attribute is absent.
    #[must_use]
    pub fn get(&self, oid: &Oid) -> &[AttrValue] {
        self.attributes.get(oid).map_or(&[], Vec::as_slice)
    }

    /// Whether the entry carries at least one value for the attribute.
    #[must_use]
    pub fn has(&self, oid: &Oid) -> bool {
        !self.get(oid).is_empty()
    }

    pub fn push(&mut self, oid: Oid, value: impl Into<AttrValue>) {
        self.attributes.entry(oid).or_default().push(value.into());
    }

    /// Fluent variant of [`Entry::push`] for construction sites.
    #[must_use]
    pub fn with(mut self, oid: Oid, value: impl Into<AttrValue>) -> Self {
        self.push(oid, value);
        self
    }

    #[must_use]
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }
}
