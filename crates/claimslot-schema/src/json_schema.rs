//! # Plain JSON Schema Dialects
//!
//! Two generations of plain JSON Schema carry slot information:
//!
//! - **Legacy**: `properties.index.default` and `properties.value.default`
//!   are ordered lists of field names. Every index-list field is a generic
//!   index field and every value-list field a generic value field. Both lists
//!   are required.
//!
//! - **Metadata-annotated**: `$metadata.serialization` names at most one
//!   payload field per slot (`indexDataSlotA`, `indexDataSlotB`,
//!   `valueDataSlotA`, `valueDataSlotB`), next to `$metadata.type`,
//!   `$metadata.version` and `$metadata.uris`. No metadata block means no
//!   slots are used.
//!
//! The serialization block is read entry by entry so that a slot key repeated
//! in the raw document is reported instead of silently keeping the last one.

use std::collections::BTreeSet;
use std::fmt;

use claimslot_core::{CodecError, SlotLabel};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dialect::SchemaDialect;
use crate::directive::{DirectiveMap, SerializationDirective, SlotBindings};

/// Legacy schema: two ordered default-field lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyJsonSchema {
    /// Fields of `properties.index.default`, in document order.
    pub index_fields: Vec<String>,
    /// Fields of `properties.value.default`, in document order.
    pub value_fields: Vec<String>,
}

impl LegacyJsonSchema {
    /// Read the default-field lists from a parsed schema document.
    ///
    /// # Errors
    ///
    /// - [`CodecError::SerializationInfoMissing`] if either list is absent.
    /// - [`CodecError::SchemaParse`] if a list is not an array of strings or a
    ///   field name appears more than once across both lists.
    pub fn parse(document: &Value) -> Result<Self, CodecError> {
        let index_fields = default_list(document, "index")?;
        let value_fields = default_list(document, "value")?;

        let mut seen = BTreeSet::new();
        for field in index_fields.iter().chain(value_fields.iter()) {
            if !seen.insert(field.as_str()) {
                return Err(CodecError::schema_parse(
                    SchemaDialect::LegacyJsonSchema,
                    format!("field '{field}' listed more than once"),
                ));
            }
        }

        Ok(Self {
            index_fields,
            value_fields,
        })
    }

    /// The lists as generic directives.
    pub fn directives(&self) -> DirectiveMap {
        let mut map = DirectiveMap::new();
        for f in &self.index_fields {
            map.insert(f.clone(), SerializationDirective::Index);
        }
        for f in &self.value_fields {
            map.insert(f.clone(), SerializationDirective::Value);
        }
        map
    }
}

fn default_list(document: &Value, list: &str) -> Result<Vec<String>, CodecError> {
    let dialect = SchemaDialect::LegacyJsonSchema;
    let items = document
        .get("properties")
        .and_then(|p| p.get(list))
        .and_then(|l| l.get("default"))
        .ok_or_else(|| CodecError::SerializationInfoMissing {
            dialect: dialect.to_string(),
            detail: format!("properties.{list}.default is absent"),
        })?;

    let items = items.as_array().ok_or_else(|| {
        CodecError::schema_parse(dialect, format!("properties.{list}.default is not an array"))
    })?;

    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                CodecError::schema_parse(
                    dialect,
                    format!("properties.{list}.default contains non-string {item}"),
                )
            })
        })
        .collect()
}

/// `$metadata.uris` of an annotated schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaUris {
    /// JSON-LD context describing the credential type.
    #[serde(default)]
    pub json_ld_context: Option<String>,
    /// Location of this JSON Schema.
    #[serde(default)]
    pub json_schema: Option<String>,
}

/// Metadata-annotated schema: four named slots plus descriptive metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotatedJsonSchema {
    /// `$metadata.type`.
    pub type_name: Option<String>,
    /// `$metadata.version`, rendered as a string.
    pub version: Option<String>,
    /// `$metadata.uris`.
    pub uris: SchemaUris,
    /// Slot → payload field bindings.
    pub bindings: SlotBindings,
}

#[derive(Deserialize)]
struct AnnotatedDocument {
    #[serde(rename = "$metadata", default)]
    metadata: Option<MetadataBlock>,
}

#[derive(Deserialize)]
struct MetadataBlock {
    #[serde(rename = "type", default)]
    type_name: Option<String>,
    #[serde(default)]
    version: Option<Value>,
    #[serde(default)]
    uris: SchemaUris,
    #[serde(default)]
    serialization: Option<SerializationEntries>,
}

/// The serialization object as raw entries, duplicates preserved.
struct SerializationEntries(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for SerializationEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = SerializationEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a $metadata.serialization object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    entries.push((key, value));
                }
                Ok(SerializationEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

impl AnnotatedJsonSchema {
    /// Parse the `$metadata` block from raw schema bytes.
    ///
    /// When `$metadata.type` is present and `claim_type` is non-empty, they
    /// must match.
    ///
    /// # Errors
    ///
    /// - [`CodecError::SchemaParse`] for malformed JSON, an unknown
    ///   serialization key, or a non-string binding.
    /// - [`CodecError::DuplicateSlotAssignment`] if a slot key is bound twice.
    /// - [`CodecError::SchemaTypeNotFound`] if `$metadata.type` names another
    ///   credential type.
    pub fn from_slice(bytes: &[u8], claim_type: &str) -> Result<Self, CodecError> {
        let dialect = SchemaDialect::AnnotatedJsonSchema;
        let doc: AnnotatedDocument = serde_json::from_slice(bytes)
            .map_err(|e| CodecError::schema_parse(dialect, e.to_string()))?;

        let Some(meta) = doc.metadata else {
            tracing::debug!("schema has no $metadata block; no slots bound");
            return Ok(Self::default());
        };

        if let Some(declared) = meta.type_name.as_deref() {
            if !claim_type.is_empty() && !declared.is_empty() && declared != claim_type {
                return Err(CodecError::SchemaTypeNotFound {
                    claim_type: claim_type.to_string(),
                });
            }
        }

        let mut bindings = SlotBindings::default();
        for (key, value) in meta.serialization.map(|s| s.0).unwrap_or_default() {
            let label = SlotLabel::ALL
                .into_iter()
                .find(|l| l.metadata_key() == key)
                .ok_or_else(|| {
                    CodecError::schema_parse(
                        dialect,
                        format!("unknown $metadata.serialization key '{key}'"),
                    )
                })?;
            match value {
                Value::String(field) if field.is_empty() => {}
                Value::String(field) => bindings.bind(label, field)?,
                Value::Null => {}
                other => {
                    return Err(CodecError::schema_parse(
                        dialect,
                        format!("$metadata.serialization.{key} is not a string: {other}"),
                    ))
                }
            }
        }

        Ok(Self {
            type_name: meta.type_name,
            version: meta.version.and_then(|v| match v {
                Value::String(s) => Some(s),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            }),
            uris: meta.uris,
            bindings,
        })
    }
}
