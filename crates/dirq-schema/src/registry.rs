use crate::{
    attribute::{AttributeSyntax, AttributeType},
    error::SchemaError,
    matching::MatchingRule,
    oid::{Oid, is_dotted_decimal},
};
use std::collections::BTreeMap;

///
/// SchemaRegistry
///
/// Read-only mapping from attribute names/aliases to OIDs and from OIDs
/// to attribute-type descriptions. Built once at startup and shared as
/// an `Arc` handle; evaluation never mutates it, so concurrent reads
/// need no synchronization.
///

#[derive(Clone, Debug, Default)]
pub struct SchemaRegistry {
    by_oid: BTreeMap<Oid, AttributeType>,
    /// Keys are lowercased aliases; attribute names are case-insensitive.
    by_name: BTreeMap<String, Oid>,
}

impl SchemaRegistry {
    #[must_use]
    pub fn builder() -> SchemaRegistryBuilder {
        SchemaRegistryBuilder::default()
    }

    /// Resolve an attribute name, alias, or literal OID to its
    /// canonical identifier.
    pub fn resolve(&self, name_or_oid: &str) -> Result<Oid, SchemaError> {
        let trimmed = name_or_oid.trim();

        if is_dotted_decimal(trimmed) {
            let oid = Oid::new(trimmed)?;
            if self.by_oid.contains_key(&oid) {
                return Ok(oid);
            }
            return Err(SchemaError::UnknownAttribute {
                name: trimmed.to_string(),
            });
        }

        self.by_name
            .get(&trimmed.to_lowercase())
            .cloned()
            .ok_or_else(|| SchemaError::UnknownAttribute {
                name: trimmed.to_string(),
            })
    }

    /// Look up the attribute type registered under a canonical OID.
    pub fn lookup(&self, oid: &Oid) -> Result<&AttributeType, SchemaError> {
        self.by_oid
            .get(oid)
            .ok_or_else(|| SchemaError::UnknownAttributeType { oid: oid.clone() })
    }

    /// Resolve a name and look up its attribute type in one step.
    pub fn attribute(&self, name_or_oid: &str) -> Result<&AttributeType, SchemaError> {
        let oid = self.resolve(name_or_oid)?;
        self.lookup(&oid)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_oid.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_oid.is_empty()
    }

    // Infallible insert for known-consistent built-in definitions.
    fn insert_unchecked(&mut self, attribute: AttributeType) {
        for name in &attribute.names {
            self.by_name
                .insert(name.to_lowercase(), attribute.oid.clone());
        }
        self.by_oid.insert(attribute.oid.clone(), attribute);
    }
}

///
/// SchemaRegistryBuilder
///
/// Construction-time surface for registries. Duplicate OIDs and
/// conflicting aliases are rejected here so lookups never have to
/// disambiguate.
///

#[derive(Debug, Default)]
pub struct SchemaRegistryBuilder {
    registry: SchemaRegistry,
}

impl SchemaRegistryBuilder {
    pub fn register(mut self, attribute: AttributeType) -> Result<Self, SchemaError> {
        if self.registry.by_oid.contains_key(&attribute.oid) {
            return Err(SchemaError::DuplicateOid {
                oid: attribute.oid.clone(),
            });
        }

        for name in &attribute.names {
            if self.registry.by_name.contains_key(&name.to_lowercase()) {
                return Err(SchemaError::ConflictingAlias { name: name.clone() });
            }
        }

        self.registry.insert_unchecked(attribute);
        Ok(self)
    }

    #[must_use]
    pub fn build(self) -> SchemaRegistry {
        self.registry
    }
}

/// Core attribute set with standard OIDs and matching rules, mirroring
/// the bootstrap schema a directory server loads before user schemas.
#[must_use]
pub fn bootstrap() -> SchemaRegistry {
    let mut registry = SchemaRegistry::default();

    let definitions = [
        AttributeType::new(oid("2.5.4.0"), "objectClass", AttributeSyntax::Text)
            .with_equality(MatchingRule::CASE_IGNORE),
        AttributeType::new(oid("2.5.4.3"), "cn", AttributeSyntax::Text)
            .with_alias("commonName")
            .with_equality(MatchingRule::CASE_IGNORE)
            .with_substring(MatchingRule::CASE_IGNORE_SUBSTRINGS),
        AttributeType::new(oid("2.5.4.4"), "sn", AttributeSyntax::Text)
            .with_alias("surname")
            .with_equality(MatchingRule::CASE_IGNORE)
            .with_substring(MatchingRule::CASE_IGNORE_SUBSTRINGS),
        AttributeType::new(oid("2.5.4.11"), "ou", AttributeSyntax::Text)
            .with_alias("organizationalUnitName")
            .with_equality(MatchingRule::CASE_IGNORE)
            .with_substring(MatchingRule::CASE_IGNORE_SUBSTRINGS),
        AttributeType::new(oid("2.5.4.13"), "description", AttributeSyntax::Text)
            .with_equality(MatchingRule::CASE_IGNORE)
            .with_substring(MatchingRule::CASE_IGNORE_SUBSTRINGS),
        AttributeType::new(oid("2.5.4.20"), "telephoneNumber", AttributeSyntax::Text)
            .with_equality(MatchingRule::NUMERIC_STRING)
            .with_substring(MatchingRule::NUMERIC_STRING_SUBSTRINGS),
        AttributeType::new(oid("2.5.4.34"), "seeAlso", AttributeSyntax::Text)
            .with_equality(MatchingRule::DISTINGUISHED_NAME),
        AttributeType::new(oid("2.5.4.35"), "userPassword", AttributeSyntax::Binary)
            .with_equality(MatchingRule::OCTET_STRING),
        AttributeType::new(oid("2.5.4.36"), "userCertificate", AttributeSyntax::Binary)
            .with_equality(MatchingRule::OCTET_STRING),
        AttributeType::new(
            oid("0.9.2342.19200300.100.1.1"),
            "uid",
            AttributeSyntax::Text,
        )
        .with_alias("userid")
        .with_equality(MatchingRule::CASE_IGNORE)
        .with_substring(MatchingRule::CASE_IGNORE_SUBSTRINGS),
        AttributeType::new(
            oid("0.9.2342.19200300.100.1.3"),
            "mail",
            AttributeSyntax::Text,
        )
        .with_alias("rfc822Mailbox")
        .with_equality(MatchingRule::CASE_IGNORE)
        .with_substring(MatchingRule::CASE_IGNORE_SUBSTRINGS),
        AttributeType::new(
            oid("2.16.840.1.113730.3.1.3"),
            "employeeNumber",
            AttributeSyntax::Text,
        )
        .single_valued()
        .with_equality(MatchingRule::CASE_EXACT)
        .with_ordering(MatchingRule::NUMERIC_STRING_ORDERING)
        .with_substring(MatchingRule::CASE_IGNORE_SUBSTRINGS),
    ];

    for definition in definitions {
        registry.insert_unchecked(definition);
    }

    registry
}

// Bootstrap OIDs are literals; a malformed one is a programming error
// caught by the registry tests, not a runtime condition.
fn oid(value: &str) -> Oid {
    Oid::new(value).unwrap_or_else(|_| unreachable!("bootstrap oid '{value}' must be well-formed"))
}
