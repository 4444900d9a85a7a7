use crate::{error::SchemaError, matching::MatchingRule, oid::Oid, value::AttrValue};
use std::fmt;

///
/// AttributeSyntax
///
/// Coarse syntax family of an attribute type. Directory strings compare
/// textually; everything else compares as opaque octets.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AttributeSyntax {
    Text,
    Binary,
}

///
/// MatchUsage
///
/// Which kind of match a caller is about to perform. Callers must
/// request the usage that matches their operation; rule fallback is
/// handled uniformly in [`AttributeType::matching_rule`].
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatchUsage {
    Equality,
    Ordering,
    Substring,
}

impl fmt::Display for MatchUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Equality => "equality",
            Self::Ordering => "ordering",
            Self::Substring => "substring",
        };
        write!(f, "{label}")
    }
}

///
/// AttributeType
///
/// Schema description of one attribute: identity, aliases, syntax, and
/// the matching rules applicable to it. Constructed at startup and
/// treated as immutable thereafter.
///

#[derive(Clone, Debug)]
pub struct AttributeType {
    pub oid: Oid,
    /// Human-readable aliases; the first entry is the primary name.
    pub names: Vec<String>,
    pub syntax: AttributeSyntax,
    pub single_valued: bool,
    pub equality: Option<MatchingRule>,
    pub ordering: Option<MatchingRule>,
    pub substring: Option<MatchingRule>,
}

impl AttributeType {
    #[must_use]
    pub fn new(oid: Oid, name: impl Into<String>, syntax: AttributeSyntax) -> Self {
        Self {
            oid,
            names: vec![name.into()],
            syntax,
            single_valued: false,
            equality: None,
            ordering: None,
            substring: None,
        }
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.names.push(alias.into());
        self
    }

    #[must_use]
    pub const fn single_valued(mut self) -> Self {
        self.single_valued = true;
        self
    }

    #[must_use]
    pub const fn with_equality(mut self, rule: MatchingRule) -> Self {
        self.equality = Some(rule);
        self
    }

    #[must_use]
    pub const fn with_ordering(mut self, rule: MatchingRule) -> Self {
        self.ordering = Some(rule);
        self
    }

    #[must_use]
    pub const fn with_substring(mut self, rule: MatchingRule) -> Self {
        self.substring = Some(rule);
        self
    }

    #[must_use]
    pub fn primary_name(&self) -> &str {
        self.names.first().map_or("", String::as_str)
    }

    /// Resolve the matching rule for one usage.
    ///
    /// Policy: the rule registered for the requested usage wins; an
    /// absent rule falls back to the equality rule. When equality is
    /// also absent the attribute type cannot serve the operation.
    pub fn matching_rule(&self, usage: MatchUsage) -> Result<&MatchingRule, SchemaError> {
        let requested = match usage {
            MatchUsage::Equality => self.equality.as_ref(),
            MatchUsage::Ordering => self.ordering.as_ref(),
            MatchUsage::Substring => self.substring.as_ref(),
        };

        requested.or(self.equality.as_ref()).ok_or_else(|| {
            SchemaError::MissingMatchingRule {
                oid: self.oid.clone(),
                usage,
            }
        })
    }

    /// Syntax-aware raw value equality.
    ///
    /// This is the fast-path comparison: text-syntax attributes compare
    /// the textual form (binary payloads via UTF-8 when possible),
    /// binary-syntax attributes compare the byte view. No normalization
    /// happens here.
    #[must_use]
    pub fn value_eq(&self, left: &AttrValue, right: &AttrValue) -> bool {
        match self.syntax {
            AttributeSyntax::Binary => left.as_bytes() == right.as_bytes(),
            AttributeSyntax::Text => match (left.as_text(), right.as_text()) {
                (Some(a), Some(b)) => a == b,
                // One side is an octet payload on a text-syntax type;
                // compare bytes so a UTF-8 payload can still hit.
                _ => left.as_bytes() == right.as_bytes(),
            },
        }
    }
}
