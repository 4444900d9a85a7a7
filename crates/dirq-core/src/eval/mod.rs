use crate::{
    entry::Entry,
    error::EvalError,
    filter::FilterNode,
    obs::{self, EqualityPath, ObsEvent},
};
use dirq_schema::{
    attribute::{AttributeType, MatchUsage},
    registry::SchemaRegistry,
    value::AttrValue,
};
use std::{cmp::Ordering, sync::Arc};

mod scope;
mod substring;

#[cfg(test)]
mod tests;

pub use scope::ScopeEvaluator;
pub use substring::SubstringEvaluator;

///
/// Bound
///
/// Direction of an ordering assertion. Kept as a closed enum so the two
/// specialized loops in `eval_ordering` cannot drift apart silently.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Bound {
    GreaterOrEqual,
    LessOrEqual,
}

///
/// LeafEvaluator
///
/// Evaluates one leaf filter condition against one candidate entry
/// under schema semantics. Stateless per call: safe for concurrent use
/// from multiple threads, given that the schema registry is read-only.
///

#[derive(Clone, Debug)]
pub struct LeafEvaluator {
    schema: Arc<SchemaRegistry>,
    substring: SubstringEvaluator,
    scope: ScopeEvaluator,
}

impl LeafEvaluator {
    #[must_use]
    pub fn new(schema: Arc<SchemaRegistry>) -> Self {
        Self {
            substring: SubstringEvaluator::new(Arc::clone(&schema)),
            scope: ScopeEvaluator,
            schema,
        }
    }

    #[must_use]
    pub const fn substring_evaluator(&self) -> &SubstringEvaluator {
        &self.substring
    }

    #[must_use]
    pub const fn scope_evaluator(&self) -> &ScopeEvaluator {
        &self.scope
    }

    /// Evaluate one leaf node against one entry.
    ///
    /// Pure apart from observation events: the result is a function of
    /// (node, entry, schema). Absent attributes yield `false`; unknown
    /// attributes and unusable matching rules are errors.
    pub fn evaluate(&self, node: &FilterNode, entry: &Entry) -> Result<bool, EvalError> {
        obs::record(ObsEvent::LeafEvaluated { kind: node.kind() });

        match node {
            FilterNode::Scope { base, scope } => Ok(self.scope.evaluate(base, *scope, entry)),

            FilterNode::Presence { attr } => self.eval_presence(attr, entry),

            // Approximate degrades to exact equality; no phonetic pass.
            FilterNode::Equality { attr, value } | FilterNode::Approximate { attr, value } => {
                self.eval_equality(attr, value, entry)
            }

            FilterNode::GreaterOrEqual { attr, value } => {
                self.eval_ordering(attr, value, entry, Bound::GreaterOrEqual)
            }
            FilterNode::LessOrEqual { attr, value } => {
                self.eval_ordering(attr, value, entry, Bound::LessOrEqual)
            }

            FilterNode::Substring { attr, pattern } => {
                self.substring.evaluate(attr, pattern, entry)
            }

            FilterNode::Extensible { .. } => Err(EvalError::NotImplemented {
                feature: "extensible matching",
            }),
        }
    }

    /// Presence: at least one value for the attribute type, without
    /// inspecting any value.
    fn eval_presence(&self, attr: &str, entry: &Entry) -> Result<bool, EvalError> {
        let oid = self.schema.resolve(attr)?;

        Ok(entry.has(&oid))
    }

    /// Equality, in priority order to keep normalization off the common
    /// path:
    ///
    /// 1. fast path A: some raw stored value equals the raw assertion
    ///    under syntax-aware value equality;
    /// 2. fast path B: some raw stored value equals the assertion
    ///    normalized once;
    /// 3. slow path: normalize every stored value and compare with the
    ///    equality rule's comparator.
    ///
    /// The three paths must never diverge on the final answer; the slow
    /// path is the semantic definition, the fast paths are shortcuts
    /// for already-canonical values.
    fn eval_equality(
        &self,
        attr: &str,
        assertion: &AttrValue,
        entry: &Entry,
    ) -> Result<bool, EvalError> {
        let (attr_type, values) = attribute_values(&self.schema, attr, entry)?;
        if values.is_empty() {
            return Ok(false);
        }

        if values.iter().any(|value| attr_type.value_eq(value, assertion)) {
            obs::record(ObsEvent::EqualityPath {
                path: EqualityPath::RawHit,
            });
            return Ok(true);
        }

        let rule = attr_type.matching_rule(MatchUsage::Equality)?;
        let normalized = rule.normalize(assertion);

        if values
            .iter()
            .any(|value| attr_type.value_eq(value, &normalized))
        {
            obs::record(ObsEvent::EqualityPath {
                path: EqualityPath::NormalizedHit,
            });
            return Ok(true);
        }

        for value in values {
            if rule.compare(&rule.normalize(value), &normalized) == Ordering::Equal {
                obs::record(ObsEvent::EqualityPath {
                    path: EqualityPath::ComparatorHit,
                });
                return Ok(true);
            }
        }

        obs::record(ObsEvent::EqualityPath {
            path: EqualityPath::Miss,
        });
        Ok(false)
    }

    /// Ordering (`>=` / `<=`): normalize the assertion once under the
    /// ordering rule, then scan values for the first one satisfying the
    /// bound. A value satisfies `>=` iff `compare(value, assertion)` is
    /// not `Less`, and symmetrically for `<=`.
    ///
    /// Two specialized loops, one per direction; both must behave
    /// exactly like a unified loop with a runtime branch.
    fn eval_ordering(
        &self,
        attr: &str,
        assertion: &AttrValue,
        entry: &Entry,
        bound: Bound,
    ) -> Result<bool, EvalError> {
        let (attr_type, values) = attribute_values(&self.schema, attr, entry)?;
        if values.is_empty() {
            return Ok(false);
        }

        let rule = attr_type.matching_rule(MatchUsage::Ordering)?;
        let assertion = rule.normalize(assertion);

        match bound {
            Bound::GreaterOrEqual => {
                for value in values {
                    if rule.compare(&rule.normalize(value), &assertion) != Ordering::Less {
                        return Ok(true);
                    }
                }
            }
            Bound::LessOrEqual => {
                for value in values {
                    if rule.compare(&rule.normalize(value), &assertion) != Ordering::Greater {
                        return Ok(true);
                    }
                }
            }
        }

        Ok(false)
    }
}

// Shared by the substring peer: resolve an attribute and its values,
// bailing out early when nothing is stored.
pub(crate) fn attribute_values<'a>(
    schema: &'a SchemaRegistry,
    attr: &str,
    entry: &'a Entry,
) -> Result<(&'a AttributeType, &'a [AttrValue]), EvalError> {
    let attr_type = schema.attribute(attr)?;
    let values = entry.get(&attr_type.oid);

    Ok((attr_type, values))
}
