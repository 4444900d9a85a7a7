use crate::{
    dn::Dn,
    entry::Entry,
    error::EvalError,
    filter::{FilterNode, SearchScope, SubstringPattern},
    obs::{self, LeafKind},
    test_fixtures::{CN, EMPLOYEE_NUMBER, fixture_evaluator, oid, person_entry},
};
use dirq_schema::value::AttrValue;

fn base_dn() -> Dn {
    "ou=people,dc=example".parse().expect("valid dn")
}

#[test]
fn presence_true_when_any_value_exists() {
    let eval = fixture_evaluator();
    let entry = person_entry();

    assert_eq!(eval.evaluate(&FilterNode::present("cn"), &entry), Ok(true));
    // Aliases and name case are resolved through the registry.
    assert_eq!(
        eval.evaluate(&FilterNode::present("COMMONNAME"), &entry),
        Ok(true)
    );
}

#[test]
fn presence_false_when_attribute_absent() {
    let eval = fixture_evaluator();
    let entry = person_entry();

    assert_eq!(eval.evaluate(&FilterNode::present("sn"), &entry), Ok(false));
    assert_eq!(
        eval.evaluate(&FilterNode::present("cn"), &Entry::new(Dn::root())),
        Ok(false)
    );
}

#[test]
fn presence_unknown_attribute_is_an_error() {
    let eval = fixture_evaluator();

    assert_eq!(
        eval.evaluate(&FilterNode::present("doesNotExist"), &person_entry()),
        Err(EvalError::UnknownAttribute {
            name: "doesNotExist".to_string()
        })
    );
}

#[test]
fn equality_exact_raw_match_takes_fast_path_a() {
    obs::reset();
    let eval = fixture_evaluator();
    let entry = person_entry();

    assert_eq!(
        eval.evaluate(&FilterNode::eq("cn", "  Foo   Bar "), &entry),
        Ok(true)
    );

    let report = obs::report();
    assert_eq!(report.equality_raw_hits, 1);
    assert_eq!(report.equality_comparator_hits, 0);
}

#[test]
fn equality_prenormalized_stored_value_takes_fast_path_b() {
    obs::reset();
    let eval = fixture_evaluator();
    // Stored value is already canonical under caseIgnoreMatch.
    let entry = Entry::new(Dn::root()).with(oid(CN), "foo bar");

    assert_eq!(
        eval.evaluate(&FilterNode::eq("cn", "  FOO   BAR "), &entry),
        Ok(true)
    );

    let report = obs::report();
    assert_eq!(report.equality_raw_hits, 0);
    assert_eq!(report.equality_normalized_hits, 1);
    assert_eq!(report.equality_comparator_hits, 0);
}

#[test]
fn equality_unnormalized_forms_need_the_slow_path() {
    obs::reset();
    let eval = fixture_evaluator();
    let entry = person_entry();

    // Raw forms differ on both sides of the comparison.
    assert_eq!(
        eval.evaluate(&FilterNode::eq("cn", "foo bar"), &entry),
        Ok(true)
    );

    let report = obs::report();
    assert_eq!(report.equality_raw_hits, 0);
    assert_eq!(report.equality_normalized_hits, 0);
    assert_eq!(report.equality_comparator_hits, 1);
}

#[test]
fn equality_miss_is_false_not_an_error() {
    let eval = fixture_evaluator();

    assert_eq!(
        eval.evaluate(&FilterNode::eq("cn", "someone else"), &person_entry()),
        Ok(false)
    );
}

#[test]
fn equality_absent_attribute_is_false() {
    let eval = fixture_evaluator();

    assert_eq!(
        eval.evaluate(&FilterNode::eq("sn", "anything"), &person_entry()),
        Ok(false)
    );
}

#[test]
fn equality_multi_valued_matches_any_value() {
    let eval = fixture_evaluator();
    let entry = Entry::new(Dn::root())
        .with(oid(CN), "alpha")
        .with(oid(CN), "gamma");

    // First value does not match; the second does.
    assert_eq!(eval.evaluate(&FilterNode::eq("cn", "Gamma"), &entry), Ok(true));
    assert_eq!(eval.evaluate(&FilterNode::eq("cn", "beta"), &entry), Ok(false));
}

#[test]
fn approximate_degrades_to_equality() {
    let eval = fixture_evaluator();
    let entry = person_entry();

    assert_eq!(
        eval.evaluate(&FilterNode::approx("cn", "FOO BAR"), &entry),
        Ok(true)
    );
    assert_eq!(
        eval.evaluate(&FilterNode::approx("cn", "phoo baar"), &entry),
        Ok(false)
    );
}

#[test]
fn equality_binary_syntax_compares_bytes() {
    let eval = fixture_evaluator();
    let entry = person_entry();

    assert_eq!(
        eval.evaluate(
            &FilterNode::eq("userCertificate", vec![0x30, 0x82, 0x01, 0x0A]),
            &entry
        ),
        Ok(true)
    );
    assert_eq!(
        eval.evaluate(&FilterNode::eq("userCertificate", vec![0x30]), &entry),
        Ok(false)
    );
}

#[test]
fn equality_without_any_rule_still_hits_on_raw_identity() {
    let eval = fixture_evaluator();
    let entry = person_entry();

    // Fast path A needs no matching rule.
    assert_eq!(
        eval.evaluate(
            &FilterNode::eq("audio", vec![0x52, 0x49, 0x46, 0x46]),
            &entry
        ),
        Ok(true)
    );
}

#[test]
fn equality_without_any_rule_fails_once_normalization_is_needed() {
    let eval = fixture_evaluator();
    let entry = person_entry();

    assert!(matches!(
        eval.evaluate(&FilterNode::eq("audio", vec![0x00]), &entry),
        Err(EvalError::SchemaInconsistency { .. })
    ));
}

#[test]
fn ordering_monotonicity_for_greater_or_equal() {
    let eval = fixture_evaluator();
    let assertion = "10";

    for (stored, expected) in [("9", false), ("10", true), ("11", true)] {
        let entry = Entry::new(Dn::root()).with(oid(EMPLOYEE_NUMBER), stored);
        assert_eq!(
            eval.evaluate(&FilterNode::ge("employeeNumber", assertion), &entry),
            Ok(expected),
            "employeeNumber={stored} >= {assertion}",
        );
    }
}

#[test]
fn ordering_monotonicity_for_less_or_equal() {
    let eval = fixture_evaluator();
    let assertion = "10";

    for (stored, expected) in [("9", true), ("10", true), ("11", false)] {
        let entry = Entry::new(Dn::root()).with(oid(EMPLOYEE_NUMBER), stored);
        assert_eq!(
            eval.evaluate(&FilterNode::le("employeeNumber", assertion), &entry),
            Ok(expected),
            "employeeNumber={stored} <= {assertion}",
        );
    }
}

// DECISION D1: ordering predicates resolve the ordering rule, not the
// equality rule. employeeNumber orders numerically even though its
// equality rule is caseExactMatch; the lexical order would invert this.
#[test]
fn ordering_resolves_distinct_ordering_rule_over_equality() {
    let eval = fixture_evaluator();
    let entry = person_entry(); // employeeNumber = "7"

    assert_eq!(
        eval.evaluate(&FilterNode::le("employeeNumber", "10"), &entry),
        Ok(true),
        "numeric comparison; lexical would say \"7\" > \"10\"",
    );
    assert_eq!(
        eval.evaluate(&FilterNode::ge("employeeNumber", "10"), &entry),
        Ok(false)
    );
}

// DECISION D1, fallback leg: with no ordering rule the equality rule
// governs, per the uniform fallback policy.
#[test]
fn ordering_falls_back_to_equality_rule_when_ordering_is_absent() {
    let eval = fixture_evaluator();
    let entry = person_entry(); // roomNumber = "0042", numericStringMatch only

    assert_eq!(
        eval.evaluate(&FilterNode::ge("roomNumber", "40"), &entry),
        Ok(true)
    );
    assert_eq!(
        eval.evaluate(&FilterNode::le("roomNumber", "41"), &entry),
        Ok(false)
    );
}

#[test]
fn ordering_with_multiple_values_matches_any() {
    let eval = fixture_evaluator();
    let entry = Entry::new(Dn::root())
        .with(oid(CN), "alpha")
        .with(oid(CN), "delta");

    // caseIgnoreMatch fallback orders lexically over normalized text.
    assert_eq!(eval.evaluate(&FilterNode::ge("cn", "charlie"), &entry), Ok(true));
    assert_eq!(eval.evaluate(&FilterNode::ge("cn", "echo"), &entry), Ok(false));
}

#[test]
fn ordering_absent_attribute_is_false() {
    let eval = fixture_evaluator();

    assert_eq!(
        eval.evaluate(&FilterNode::ge("sn", "a"), &person_entry()),
        Ok(false)
    );
}

#[test]
fn ordering_without_any_rule_is_a_schema_inconsistency() {
    let eval = fixture_evaluator();

    assert!(matches!(
        eval.evaluate(&FilterNode::ge("audio", vec![0x00]), &person_entry()),
        Err(EvalError::SchemaInconsistency { .. })
    ));
}

#[test]
fn substring_dispatches_to_the_peer_evaluator() {
    let eval = fixture_evaluator();
    let pattern = SubstringPattern::new().with_initial("foo").with_final("bar");

    assert_eq!(
        eval.evaluate(&FilterNode::substring("cn", pattern), &person_entry()),
        Ok(true)
    );
}

#[test]
fn scope_dispatches_to_the_peer_evaluator() {
    let eval = fixture_evaluator();
    let entry = person_entry(); // cn=foo bar,ou=people,dc=example

    assert_eq!(
        eval.evaluate(
            &FilterNode::scope(base_dn(), SearchScope::Subtree),
            &entry
        ),
        Ok(true)
    );
    assert_eq!(
        eval.evaluate(
            &FilterNode::scope(base_dn(), SearchScope::Object),
            &entry
        ),
        Ok(false)
    );
}

#[test]
fn extensible_matching_is_not_implemented() {
    let eval = fixture_evaluator();
    let node = FilterNode::Extensible {
        attr: Some("cn".to_string()),
        rule: Some("caseExactMatch".to_string()),
        value: AttrValue::text("foo"),
    };

    assert_eq!(
        eval.evaluate(&node, &person_entry()),
        Err(EvalError::NotImplemented {
            feature: "extensible matching"
        })
    );
}

#[test]
fn every_evaluation_is_counted_by_kind() {
    obs::reset();
    let eval = fixture_evaluator();
    let entry = person_entry();

    let _ = eval.evaluate(&FilterNode::present("cn"), &entry);
    let _ = eval.evaluate(&FilterNode::eq("cn", "foo bar"), &entry);
    let _ = eval.evaluate(&FilterNode::ge("employeeNumber", "1"), &entry);

    let report = obs::report();
    assert_eq!(report.leaves(LeafKind::Presence), 1);
    assert_eq!(report.leaves(LeafKind::Equality), 1);
    assert_eq!(report.leaves(LeafKind::GreaterOrEqual), 1);
    assert_eq!(report.leaves_total(), 3);
}
