use crate::value::AttrValue;
use std::cmp::Ordering;

///
/// Matching rules
///
/// A matching rule bundles a normalizer with a comparator. Normalizers
/// map raw values to canonical forms; comparators define a total order
/// over those forms. Rules are a closed set: the evaluator dispatches on
/// enum variants, so adding a rule kind cannot be silently ignored.
///
/// CONTRACT: for every rule, `compare(normalize(a), normalize(b)) ==
/// Equal` iff `normalize(a) == normalize(b)`, and normalization is
/// idempotent.
///

///
/// NormalizerKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NormalizerKind {
    /// Canonical form is the raw form.
    Identity,
    /// Trim and collapse internal whitespace runs, preserve case.
    DeepTrim,
    /// Trim, collapse internal whitespace runs, lowercase.
    DeepTrimToLower,
    /// Strip spaces and leading zeros; `"0"` is canonical for all-zero.
    NumericString,
    /// Optional sign plus digits; strips leading zeros, folds `-0` to `0`.
    Integer,
}

impl NormalizerKind {
    /// Map a raw value to its canonical form.
    ///
    /// Text normalizers pass binary values through unchanged; whether a
    /// binary value can match at all is the comparator's concern.
    #[must_use]
    pub fn normalize(self, value: &AttrValue) -> AttrValue {
        let AttrValue::Text(text) = value else {
            return value.clone();
        };

        let normalized = match self {
            Self::Identity => return value.clone(),
            Self::DeepTrim => deep_trim(text),
            Self::DeepTrimToLower => deep_trim(text).to_lowercase(),
            Self::NumericString => numeric_canonical(text),
            Self::Integer => integer_canonical(text),
        };

        AttrValue::Text(normalized)
    }
}

///
/// ComparatorKind
///
/// Total order over canonical forms. Values of different variants are
/// ordered by a fixed variant rank so the order stays total even for
/// mixed text/binary multisets.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ComparatorKind {
    /// Byte-lexicographic, applied to the raw byte view.
    OctetOrdering,
    /// UTF-8 lexicographic over normalized text.
    StringOrdering,
    /// Magnitude order for canonical digit strings.
    NumericStringOrdering,
    /// Sign-aware magnitude order for canonical integer strings.
    IntegerOrdering,
}

impl ComparatorKind {
    /// Compare two canonical forms.
    #[must_use]
    pub fn compare(self, left: &AttrValue, right: &AttrValue) -> Ordering {
        match (left, right) {
            (AttrValue::Text(a), AttrValue::Text(b)) => match self {
                Self::OctetOrdering => a.as_bytes().cmp(b.as_bytes()),
                Self::StringOrdering => a.cmp(b),
                Self::NumericStringOrdering => numeric_cmp(a, b),
                Self::IntegerOrdering => integer_cmp(a, b),
            },
            (AttrValue::Binary(a), AttrValue::Binary(b)) => a.cmp(b),
            // Mixed variants fall back to the variant rank.
            (a, b) => variant_rank(a).cmp(&variant_rank(b)),
        }
    }
}

///
/// MatchingRule
///
/// Named (normalizer, comparator) pair. The names are the standard LDAP
/// matching-rule descriptors so schema definitions read like their
/// directory counterparts.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MatchingRule {
    pub name: &'static str,
    pub normalizer: NormalizerKind,
    pub comparator: ComparatorKind,
}

impl MatchingRule {
    pub const CASE_EXACT: Self = Self {
        name: "caseExactMatch",
        normalizer: NormalizerKind::DeepTrim,
        comparator: ComparatorKind::StringOrdering,
    };

    pub const CASE_IGNORE: Self = Self {
        name: "caseIgnoreMatch",
        normalizer: NormalizerKind::DeepTrimToLower,
        comparator: ComparatorKind::StringOrdering,
    };

    pub const CASE_IGNORE_ORDERING: Self = Self {
        name: "caseIgnoreOrderingMatch",
        normalizer: NormalizerKind::DeepTrimToLower,
        comparator: ComparatorKind::StringOrdering,
    };

    pub const CASE_IGNORE_SUBSTRINGS: Self = Self {
        name: "caseIgnoreSubstringsMatch",
        normalizer: NormalizerKind::DeepTrimToLower,
        comparator: ComparatorKind::StringOrdering,
    };

    pub const DISTINGUISHED_NAME: Self = Self {
        name: "distinguishedNameMatch",
        normalizer: NormalizerKind::DeepTrimToLower,
        comparator: ComparatorKind::StringOrdering,
    };

    pub const INTEGER: Self = Self {
        name: "integerMatch",
        normalizer: NormalizerKind::Integer,
        comparator: ComparatorKind::IntegerOrdering,
    };

    pub const INTEGER_ORDERING: Self = Self {
        name: "integerOrderingMatch",
        normalizer: NormalizerKind::Integer,
        comparator: ComparatorKind::IntegerOrdering,
    };

    pub const NUMERIC_STRING: Self = Self {
        name: "numericStringMatch",
        normalizer: NormalizerKind::NumericString,
        comparator: ComparatorKind::NumericStringOrdering,
    };

    pub const NUMERIC_STRING_ORDERING: Self = Self {
        name: "numericStringOrderingMatch",
        normalizer: NormalizerKind::NumericString,
        comparator: ComparatorKind::NumericStringOrdering,
    };

    pub const NUMERIC_STRING_SUBSTRINGS: Self = Self {
        name: "numericStringSubstringsMatch",
        normalizer: NormalizerKind::NumericString,
        comparator: ComparatorKind::NumericStringOrdering,
    };

    pub const OCTET_STRING: Self = Self {
        name: "octetStringMatch",
        normalizer: NormalizerKind::Identity,
        comparator: ComparatorKind::OctetOrdering,
    };

    /// Map a raw value to its canonical form under this rule.
    #[must_use]
    pub fn normalize(&self, value: &AttrValue) -> AttrValue {
        self.normalizer.normalize(value)
    }

    /// Compare two canonical forms under this rule.
    #[must_use]
    pub fn compare(&self, left: &AttrValue, right: &AttrValue) -> Ordering {
        self.comparator.compare(left, right)
    }
}

const fn variant_rank(value: &AttrValue) -> u8 {
    match value {
        AttrValue::Text(_) => 0,
        AttrValue::Binary(_) => 1,
    }
}

/// Trim the ends and collapse internal whitespace runs to one space.
fn deep_trim(input: &str) -> String {
    let mut out = String::with_capacity(input.len());

    for word in input.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }

    out
}

/// Canonical numeric string: spaces stripped, leading zeros removed.
/// Non-digit content survives space stripping untouched so malformed
/// values still normalize deterministically.
fn numeric_canonical(input: &str) -> String {
    let stripped: String = input.chars().filter(|c| *c != ' ').collect();

    if !stripped.is_empty() && stripped.bytes().all(|b| b.is_ascii_digit()) {
        return strip_leading_zeros(&stripped).to_string();
    }

    stripped
}

/// Canonical integer string: optional `-` sign plus canonical digits.
fn integer_canonical(input: &str) -> String {
    let trimmed = input.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return trimmed.to_string();
    }

    let canonical = strip_leading_zeros(digits);
    if negative && canonical != "0" {
        format!("-{canonical}")
    } else {
        canonical.to_string()
    }
}

fn strip_leading_zeros(digits: &str) -> &str {
    let stripped = digits.trim_start_matches('0');
    if stripped.is_empty() { "0" } else { stripped }
}

/// Magnitude order for canonical digit strings: shorter means smaller,
/// equal length falls back to lexical order. Malformed (non-digit)
/// content orders lexically; the order is only guaranteed total over
/// canonical digit strings.
fn numeric_cmp(left: &str, right: &str) -> Ordering {
    let both_digits = !left.is_empty()
        && !right.is_empty()
        && left.bytes().all(|b| b.is_ascii_digit())
        && right.bytes().all(|b| b.is_ascii_digit());

    if both_digits {
        left.len().cmp(&right.len()).then_with(|| left.cmp(right))
    } else {
        left.cmp(right)
    }
}

/// Sign-aware magnitude order for canonical integer strings.
fn integer_cmp(left: &str, right: &str) -> Ordering {
    let (left_neg, left_mag) = split_sign(left);
    let (right_neg, right_mag) = split_sign(right);

    match (left_neg, right_neg) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => numeric_cmp(left_mag, right_mag),
        (true, true) => numeric_cmp(right_mag, left_mag),
    }
}

fn split_sign(value: &str) -> (bool, &str) {
    match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value),
    }
}
