//! # JSON-LD Context Dialect
//!
//! The schema is a JSON-LD document whose `@context` array defines one entry
//! per credential type. Inside the type's nested `@context`:
//!
//! - `"field": {"@id": "...", "@type": "serialization:..."}` declares a
//!   serialization directive for `field`;
//! - `id`, `type`, `@version`, `@protected` populate basic attributes;
//! - `iden3_serialization` carries the merklized slot attribute;
//! - every other string entry is a vocabulary prefix.
//!
//! ```json
//! {"@context": [{
//!   "KYCAgeCredential": {
//!     "@id": "https://example.org/kyc#KYCAgeCredential",
//!     "@context": {
//!       "@version": 1.1, "@protected": true, "id": "@id", "type": "@type",
//!       "kyc-vocab": "https://example.org/kyc-vocab.md#",
//!       "birthday": {"@id": "kyc-vocab:birthday", "@type": "serialization:IndexDataSlotA"}
//!     }
//!   }
//! }]}
//! ```

use std::collections::BTreeMap;

use claimslot_core::CodecError;
use serde_json::{Map, Value};

use crate::dialect::SchemaDialect;
use crate::directive::{DirectiveMap, SerializationDirective};
use crate::merklized::SERIALIZATION_ATTR_KEY;

/// What the caller needs from the type definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonLdReading {
    /// Resolve field directives; unrecognized `@type`s are errors.
    Directives,
    /// Only the basic attributes and the serialization attribute. Field
    /// `@type`s are datatypes (e.g. `xsd:integer`) and are not inspected.
    SerializationAttribute,
}

/// Parsed credential type from a JSON-LD context schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonLdSchema {
    /// The credential type name that was looked up.
    pub type_name: String,
    /// The type's `@id` IRI.
    pub type_iri: Option<String>,
    /// Value of the `id` alias.
    pub id: Option<String>,
    /// Value of the `type` alias.
    pub type_alias: Option<String>,
    /// `@version`, rendered as a string.
    pub version: Option<String>,
    /// `@protected`.
    pub protected: bool,
    /// Field directives (empty under [`JsonLdReading::SerializationAttribute`]).
    pub fields: DirectiveMap,
    /// Vocabulary prefixes; informational only.
    pub vocab: BTreeMap<String, String>,
    /// The `iden3_serialization` attribute, if present.
    pub serialization_attr: Option<String>,
}

impl JsonLdSchema {
    /// Locate `claim_type` in `document` and parse its definition.
    ///
    /// # Errors
    ///
    /// - [`CodecError::SchemaParse`] if `@context` or the type entry has the
    ///   wrong shape.
    /// - [`CodecError::SchemaTypeNotFound`] if no context entry defines
    ///   `claim_type`.
    /// - [`CodecError::UnsupportedFieldType`] for an unrecognized
    ///   serialization `@type` under [`JsonLdReading::Directives`].
    pub fn parse(
        document: &Value,
        claim_type: &str,
        reading: JsonLdReading,
    ) -> Result<Self, CodecError> {
        let dialect = SchemaDialect::JsonLdContext;
        let entries: Vec<&Map<String, Value>> = match document.get("@context") {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_object).collect(),
            Some(Value::Object(obj)) => vec![obj],
            Some(_) => {
                return Err(CodecError::schema_parse(
                    dialect,
                    "@context is neither an array nor an object",
                ))
            }
            None => return Err(CodecError::schema_parse(dialect, "missing @context")),
        };

        let definition = entries
            .iter()
            .find_map(|entry| entry.get(claim_type))
            .ok_or_else(|| CodecError::SchemaTypeNotFound {
                claim_type: claim_type.to_string(),
            })?;

        let definition = definition.as_object().ok_or_else(|| {
            CodecError::schema_parse(
                dialect,
                format!("definition of '{claim_type}' is not an object"),
            )
        })?;

        let nested = definition
            .get("@context")
            .and_then(Value::as_object)
            .ok_or_else(|| {
                CodecError::schema_parse(
                    dialect,
                    format!("definition of '{claim_type}' has no nested @context object"),
                )
            })?;

        let mut schema = JsonLdSchema {
            type_name: claim_type.to_string(),
            type_iri: definition
                .get("@id")
                .and_then(Value::as_str)
                .map(str::to_string),
            ..Default::default()
        };

        for (key, value) in nested {
            match (key.as_str(), value) {
                ("@version", v) => schema.version = scalar_to_string(v),
                ("@protected", Value::Bool(b)) => schema.protected = *b,
                ("@protected", Value::String(s)) => schema.protected = s == "true",
                ("id", Value::String(s)) => schema.id = Some(s.clone()),
                ("type", Value::String(s)) => schema.type_alias = Some(s.clone()),
                (SERIALIZATION_ATTR_KEY, Value::String(s)) => {
                    schema.serialization_attr = Some(s.clone())
                }
                (_, Value::String(s)) => {
                    schema.vocab.insert(key.clone(), s.clone());
                }
                (_, Value::Object(term)) if reading == JsonLdReading::Directives => {
                    if let Some(directive) = field_directive(key, term)? {
                        schema.fields.insert(key.clone(), directive);
                    }
                }
                _ => {}
            }
        }

        tracing::debug!(
            claim_type,
            fields = schema.fields.len(),
            vocab = schema.vocab.len(),
            has_serialization_attr = schema.serialization_attr.is_some(),
            "parsed JSON-LD credential type"
        );

        Ok(schema)
    }
}

/// Directive for a term definition, or `None` if the term is not a field
/// (no `@id`/`@type` pair).
fn field_directive(
    field: &str,
    term: &Map<String, Value>,
) -> Result<Option<SerializationDirective>, CodecError> {
    let (Some(_), Some(type_value)) = (term.get("@id"), term.get("@type")) else {
        return Ok(None);
    };
    let type_id = type_value.as_str().ok_or_else(|| {
        CodecError::unsupported(field, format!("@type is not a string: {type_value}"))
    })?;
    SerializationDirective::from_type_id(type_id)
        .map(Some)
        .ok_or_else(|| {
            CodecError::unsupported(field, format!("unrecognized serialization type '{type_id}'"))
        })
}

fn scalar_to_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
