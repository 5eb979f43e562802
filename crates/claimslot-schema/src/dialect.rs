//! # Dialect Sniffing and Schema Metadata
//!
//! A schema document is classified once, by a dedicated sniff step, into a
//! [`SchemaDialect`]; the matching parser then produces a [`SchemaMetadata`]
//! variant carrying only what that dialect defines. Nothing downstream probes
//! the raw JSON for keys.
//!
//! ## Sniffing rules
//!
//! - A top-level `@context` means the JSON-LD context dialect.
//! - Otherwise the document is plain JSON Schema, read as the caller asks:
//!   legacy (two default-field lists), annotated (`$metadata` block), or
//!   automatically (annotated if `$metadata` is present, legacy otherwise).

use std::fmt;

use claimslot_core::{CodecError, SlotLabel};
use serde::Serialize;
use serde_json::Value;

use crate::directive::{DirectiveMap, SerializationDirective, SlotBindings};
use crate::json_schema::{AnnotatedJsonSchema, LegacyJsonSchema};
use crate::jsonld::{JsonLdReading, JsonLdSchema};
use crate::loader::DocumentFormat;

/// The schema dialects the resolver understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaDialect {
    /// JSON-LD `@context` with per-field serialization types.
    JsonLdContext,
    /// Plain JSON Schema with `index.default` / `value.default` lists.
    LegacyJsonSchema,
    /// Plain JSON Schema with a `$metadata.serialization` block.
    AnnotatedJsonSchema,
}

impl fmt::Display for SchemaDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SchemaDialect::JsonLdContext => "json-ld-context",
            SchemaDialect::LegacyJsonSchema => "legacy-json-schema",
            SchemaDialect::AnnotatedJsonSchema => "annotated-json-schema",
        })
    }
}

/// How a document without `@context` is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlainJsonReading {
    /// Always the legacy default-field lists.
    Legacy,
    /// Always the `$metadata` block.
    Annotated,
    /// Annotated if `$metadata` is present, legacy otherwise.
    #[default]
    Auto,
}

impl SchemaDialect {
    /// Classify a parsed schema document.
    pub fn sniff(document: &Value, plain: PlainJsonReading) -> Self {
        if document.get("@context").is_some() {
            return SchemaDialect::JsonLdContext;
        }
        match plain {
            PlainJsonReading::Legacy => SchemaDialect::LegacyJsonSchema,
            PlainJsonReading::Annotated => SchemaDialect::AnnotatedJsonSchema,
            PlainJsonReading::Auto if document.get("$metadata").is_some() => {
                SchemaDialect::AnnotatedJsonSchema
            }
            PlainJsonReading::Auto => SchemaDialect::LegacyJsonSchema,
        }
    }

    /// Whether this dialect is compatible with a loader's format hint.
    pub fn matches_format(self, format: DocumentFormat) -> bool {
        match format {
            DocumentFormat::Unknown => true,
            DocumentFormat::JsonLd => self == SchemaDialect::JsonLdContext,
            DocumentFormat::JsonSchema => self != SchemaDialect::JsonLdContext,
        }
    }
}

/// Dialect-specific parsed form of one schema document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaMetadata {
    /// JSON-LD context dialect.
    JsonLd(JsonLdSchema),
    /// Legacy plain JSON Schema.
    Legacy(LegacyJsonSchema),
    /// Metadata-annotated plain JSON Schema.
    Annotated(AnnotatedJsonSchema),
}

/// Options for [`SchemaMetadata::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reading for documents without `@context`.
    pub plain: PlainJsonReading,
    /// What to extract from a JSON-LD type definition.
    pub json_ld: JsonLdReading,
    /// Format hint from the document loader.
    pub format: DocumentFormat,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            plain: PlainJsonReading::Auto,
            json_ld: JsonLdReading::Directives,
            format: DocumentFormat::Unknown,
        }
    }
}

impl SchemaMetadata {
    /// Sniff and parse raw schema bytes for `claim_type`.
    ///
    /// # Errors
    ///
    /// [`CodecError::SchemaParse`] if the bytes are not JSON or contradict the
    /// format hint; otherwise whatever the dialect parser reports.
    pub fn parse(bytes: &[u8], claim_type: &str, options: ParseOptions) -> Result<Self, CodecError> {
        let document: Value = serde_json::from_slice(bytes)
            .map_err(|e| CodecError::schema_parse("json", e.to_string()))?;
        if !document.is_object() {
            return Err(CodecError::schema_parse("json", "schema is not a JSON object"));
        }

        let dialect = SchemaDialect::sniff(&document, options.plain);
        if !dialect.matches_format(options.format) {
            return Err(CodecError::schema_parse(
                dialect,
                format!("document does not match loader format hint {:?}", options.format),
            ));
        }
        tracing::debug!(%dialect, claim_type, "sniffed schema dialect");

        match dialect {
            SchemaDialect::JsonLdContext => {
                JsonLdSchema::parse(&document, claim_type, options.json_ld).map(Self::JsonLd)
            }
            SchemaDialect::LegacyJsonSchema => LegacyJsonSchema::parse(&document).map(Self::Legacy),
            SchemaDialect::AnnotatedJsonSchema => {
                AnnotatedJsonSchema::from_slice(bytes, claim_type).map(Self::Annotated)
            }
        }
    }

    /// The dialect this metadata was parsed from.
    pub fn dialect(&self) -> SchemaDialect {
        match self {
            SchemaMetadata::JsonLd(_) => SchemaDialect::JsonLdContext,
            SchemaMetadata::Legacy(_) => SchemaDialect::LegacyJsonSchema,
            SchemaMetadata::Annotated(_) => SchemaDialect::AnnotatedJsonSchema,
        }
    }

    /// Field directives, for the dialects that declare them per field.
    ///
    /// Annotated schemas bind slots by name and are expressed as explicit
    /// directives.
    pub fn directives(&self) -> DirectiveMap {
        match self {
            SchemaMetadata::JsonLd(s) => s.fields.clone(),
            SchemaMetadata::Legacy(s) => s.directives(),
            SchemaMetadata::Annotated(s) => {
                let mut map = DirectiveMap::new();
                for (label, field) in s.bindings.iter() {
                    if map.get(field).is_none() {
                        map.insert(field, explicit_directive(label));
                    }
                }
                map
            }
        }
    }

    /// Explicit slot bindings.
    ///
    /// # Errors
    ///
    /// [`CodecError::DuplicateSlotAssignment`] if two JSON-LD fields claim
    /// the same slot.
    pub fn explicit_bindings(&self) -> Result<SlotBindings, CodecError> {
        match self {
            SchemaMetadata::JsonLd(s) => s.fields.explicit_bindings(),
            SchemaMetadata::Legacy(_) => Ok(SlotBindings::default()),
            SchemaMetadata::Annotated(s) => Ok(s.bindings.clone()),
        }
    }
}

fn explicit_directive(label: SlotLabel) -> SerializationDirective {
    match label {
        SlotLabel::IndexA => SerializationDirective::IndexSlotA,
        SlotLabel::IndexB => SerializationDirective::IndexSlotB,
        SlotLabel::ValueA => SerializationDirective::ValueSlotA,
        SlotLabel::ValueB => SerializationDirective::ValueSlotB,
    }
}
