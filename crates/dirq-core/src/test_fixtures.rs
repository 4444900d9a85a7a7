use crate::{entry::Entry, eval::LeafEvaluator};
use dirq_schema::{
    attribute::{AttributeSyntax, AttributeType},
    matching::MatchingRule,
    oid::Oid,
    registry::{SchemaRegistry, SchemaRegistryBuilder},
};
use std::sync::Arc;

///
/// Test fixtures
///
/// Synthetic schema and entries exercising every rule-resolution case:
/// distinct ordering rules, equality-only fallback, binary syntax, and
/// a pathological rule-less attribute type.
///

pub(crate) const CN: &str = "2.5.4.3";
pub(crate) const SN: &str = "2.5.4.4";
pub(crate) const USER_CERTIFICATE: &str = "2.5.4.36";
pub(crate) const EMPLOYEE_NUMBER: &str = "2.16.840.1.113730.3.1.3";
pub(crate) const ROOM_NUMBER: &str = "0.9.2342.19200300.100.1.6";
pub(crate) const AUDIO: &str = "0.9.2342.19200300.100.1.55";

pub(crate) fn oid(value: &str) -> Oid {
    Oid::new(value).expect("fixture oid is well-formed")
}

fn register(builder: SchemaRegistryBuilder, attr: AttributeType) -> SchemaRegistryBuilder {
    builder.register(attr).expect("fixture schema is consistent")
}

pub(crate) fn fixture_schema() -> Arc<SchemaRegistry> {
    let mut builder = SchemaRegistry::builder();

    builder = register(
        builder,
        AttributeType::new(oid(CN), "cn", AttributeSyntax::Text)
            .with_alias("commonName")
            .with_equality(MatchingRule::CASE_IGNORE)
            .with_substring(MatchingRule::CASE_IGNORE_SUBSTRINGS),
    );
    builder = register(
        builder,
        AttributeType::new(oid(SN), "sn", AttributeSyntax::Text)
            .with_equality(MatchingRule::CASE_IGNORE),
    );
    builder = register(
        builder,
        AttributeType::new(oid(EMPLOYEE_NUMBER), "employeeNumber", AttributeSyntax::Text)
            .single_valued()
            .with_equality(MatchingRule::CASE_EXACT)
            .with_ordering(MatchingRule::NUMERIC_STRING_ORDERING),
    );
    // Equality-only: ordering and substring requests fall back.
    builder = register(
        builder,
        AttributeType::new(oid(ROOM_NUMBER), "roomNumber", AttributeSyntax::Text)
            .with_equality(MatchingRule::NUMERIC_STRING),
    );
    builder = register(
        builder,
        AttributeType::new(oid(USER_CERTIFICATE), "userCertificate", AttributeSyntax::Binary)
            .with_equality(MatchingRule::OCTET_STRING),
    );
    // No rules at all: any rule request is a schema inconsistency.
    builder = register(
        builder,
        AttributeType::new(oid(AUDIO), "audio", AttributeSyntax::Binary),
    );

    Arc::new(builder.build())
}

pub(crate) fn person_entry() -> Entry {
    Entry::new("cn=foo bar,ou=people,dc=example".parse().expect("valid dn"))
        .with(oid(CN), "  Foo   Bar ")
        .with(oid(EMPLOYEE_NUMBER), "7")
        .with(oid(ROOM_NUMBER), "0042")
        .with(oid(USER_CERTIFICATE), vec![0x30, 0x82, 0x01, 0x0A])
        .with(oid(AUDIO), vec![0x52, 0x49, 0x46, 0x46])
}

pub(crate) fn fixture_evaluator() -> LeafEvaluator {
    LeafEvaluator::new(fixture_schema())
}
