use crate::{
    entry::Entry,
    error::EvalError,
    eval::attribute_values,
    filter::SubstringPattern,
};
use dirq_schema::{
    attribute::MatchUsage, matching::MatchingRule, registry::SchemaRegistry, value::AttrValue,
};
use std::sync::Arc;

///
/// SubstringEvaluator
///
/// Peer of the leaf evaluator for `initial*any*final` assertions.
/// Stored values and pattern components are normalized under the
/// attribute's substring rule, then matched by direct scanning: the
/// initial component anchors at the front, `any` components are found
/// left to right without overlap, and the final component anchors at
/// the end.
///

#[derive(Clone, Debug)]
pub struct SubstringEvaluator {
    schema: Arc<SchemaRegistry>,
}

impl SubstringEvaluator {
    #[must_use]
    pub const fn new(schema: Arc<SchemaRegistry>) -> Self {
        Self { schema }
    }

    /// Evaluate one substring assertion against one entry.
    pub fn evaluate(
        &self,
        attr: &str,
        pattern: &SubstringPattern,
        entry: &Entry,
    ) -> Result<bool, EvalError> {
        if pattern.is_empty() {
            // A componentless pattern cannot come out of a well-formed
            // filter; treat the tree as malformed rather than guess.
            return Err(EvalError::UnsupportedFilterNode {
                kind: "substring assertion with no components".to_string(),
            });
        }

        let (attr_type, values) = attribute_values(&self.schema, attr, entry)?;
        if values.is_empty() {
            return Ok(false);
        }

        let rule = attr_type.matching_rule(MatchUsage::Substring)?;
        let initial = pattern.initial.as_deref().map(|c| normalize_component(rule, c));
        let any: Vec<String> = pattern
            .any
            .iter()
            .map(|c| normalize_component(rule, c))
            .collect();
        let final_ = pattern.final_.as_deref().map(|c| normalize_component(rule, c));

        for value in values {
            // Substring assertions are defined over directory strings;
            // binary values never match.
            let AttrValue::Text(text) = rule.normalize(value) else {
                continue;
            };

            if matches_pattern(&text, initial.as_deref(), &any, final_.as_deref()) {
                return Ok(true);
            }
        }

        Ok(false)
    }
}

fn normalize_component(rule: &MatchingRule, component: &str) -> String {
    match rule.normalize(&AttrValue::text(component)) {
        AttrValue::Text(text) => text,
        // Text in, text out for every normalizer kind.
        AttrValue::Binary(_) => String::new(),
    }
}

fn matches_pattern(
    text: &str,
    initial: Option<&str>,
    any: &[String],
    final_: Option<&str>,
) -> bool {
    let mut rest = text;

    if let Some(prefix) = initial {
        let Some(stripped) = rest.strip_prefix(prefix) else {
            return false;
        };
        rest = stripped;
    }

    // Anchor the final component before scanning so a trailing `any`
    // segment cannot consume the bytes the suffix needs.
    if let Some(suffix) = final_ {
        let Some(stripped) = rest.strip_suffix(suffix) else {
            return false;
        };
        rest = stripped;
    }

    for segment in any {
        match rest.find(segment.as_str()) {
            Some(pos) => rest = &rest[pos + segment.len()..],
            None => return false,
        }
    }

    true
}
