use crate::{dn::Dn, obs::LeafKind};
use dirq_schema::value::AttrValue;
use serde::{Deserialize, Serialize};

///
/// Filter AST
///
/// Pure representation of the leaf conditions of a parsed search
/// filter. This layer carries no schema knowledge; attribute names are
/// resolved at evaluation time. Nodes are immutable once constructed
/// and borrowed by the evaluator for one call.
///
/// Composite AND/OR/NOT nodes belong to the consumer's tree and are
/// intentionally absent here.
///

///
/// SearchScope
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum SearchScope {
    /// The base object itself.
    Object,
    /// Immediate children of the base, excluding the base.
    OneLevel,
    /// The base and all of its descendants.
    Subtree,
}

///
/// SubstringPattern
///
/// `initial*any*...*any*final` assertion. Any component may be absent,
/// but a pattern with no components matches nothing and is rejected by
/// the evaluator as malformed input upstream parsers never produce.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct SubstringPattern {
    pub initial: Option<String>,
    pub any: Vec<String>,
    pub final_: Option<String>,
}

impl SubstringPattern {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_initial(mut self, initial: impl Into<String>) -> Self {
        self.initial = Some(initial.into());
        self
    }

    #[must_use]
    pub fn with_any(mut self, any: impl Into<String>) -> Self {
        self.any.push(any.into());
        self
    }

    #[must_use]
    pub fn with_final(mut self, final_: impl Into<String>) -> Self {
        self.final_ = Some(final_.into());
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.initial.is_none() && self.any.is_empty() && self.final_.is_none()
    }
}

///
/// FilterNode
///
/// Closed set of leaf node kinds, matched exhaustively by the
/// evaluator: a new kind cannot be silently ignored.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum FilterNode {
    Presence {
        attr: String,
    },
    Equality {
        attr: String,
        value: AttrValue,
    },
    /// Approximate degrades to exact equality in this engine; no
    /// phonetic algorithm is applied.
    Approximate {
        attr: String,
        value: AttrValue,
    },
    GreaterOrEqual {
        attr: String,
        value: AttrValue,
    },
    LessOrEqual {
        attr: String,
        value: AttrValue,
    },
    Substring {
        attr: String,
        pattern: SubstringPattern,
    },
    /// Extensible matching rules are not supported; evaluation fails
    /// with `NotImplemented`.
    Extensible {
        attr: Option<String>,
        rule: Option<String>,
        value: AttrValue,
    },
    Scope {
        base: Dn,
        scope: SearchScope,
    },
}

impl FilterNode {
    #[must_use]
    pub fn present(attr: impl Into<String>) -> Self {
        Self::Presence { attr: attr.into() }
    }

    #[must_use]
    pub fn eq(attr: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        Self::Equality {
            attr: attr.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn approx(attr: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        Self::Approximate {
            attr: attr.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn ge(attr: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        Self::GreaterOrEqual {
            attr: attr.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn le(attr: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        Self::LessOrEqual {
            attr: attr.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn substring(attr: impl Into<String>, pattern: SubstringPattern) -> Self {
        Self::Substring {
            attr: attr.into(),
            pattern,
        }
    }

    #[must_use]
    pub const fn scope(base: Dn, scope: SearchScope) -> Self {
        Self::Scope { base, scope }
    }

    /// Node kind for dispatch-independent reporting.
    #[must_use]
    pub const fn kind(&self) -> LeafKind {
        match self {
            Self::Presence { .. } => LeafKind::Presence,
            Self::Equality { .. } => LeafKind::Equality,
            Self::Approximate { .. } => LeafKind::Approximate,
            Self::GreaterOrEqual { .. } => LeafKind::GreaterOrEqual,
            Self::LessOrEqual { .. } => LeafKind::LessOrEqual,
            Self::Substring { .. } => LeafKind::Substring,
            Self::Extensible { .. } => LeafKind::Extensible,
            Self::Scope { .. } => LeafKind::Scope,
        }
    }
}
