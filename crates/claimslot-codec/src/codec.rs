//! # Codec Entry Points
//!
//! [`Codec`] ties schema resolution to slot assembly. Each call parses the
//! schema and payload afresh, packs, and returns owned buffers; nothing is
//! cached between calls and a `Codec` can be shared across threads freely.
//!
//! The free functions [`pack`] and [`slot_index_of`] use the default
//! configuration.

use std::fmt;

use claimslot_core::{ClaimSlots, CodecError};
use claimslot_schema::{
    DocumentFormat, JsonLdReading, LoadedDocument, ParseOptions, PlainJsonReading, SchemaMetadata,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::CodecConfig;
use crate::merklize::{self, Merklizer};
use crate::payload::Payload;
use crate::{explicit, sequential, slot_index};

/// Packing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Generic directives packed back to back, slot A then slot B.
    ///
    /// Plain JSON schemas are read as the legacy default-field lists.
    SequentialFill,
    /// One explicitly bound field per slot.
    ///
    /// Plain JSON schemas are read as the `$metadata.serialization` block.
    OneFieldPerSlot,
}

impl Strategy {
    fn plain_reading(self) -> PlainJsonReading {
        match self {
            Strategy::SequentialFill => PlainJsonReading::Legacy,
            Strategy::OneFieldPerSlot => PlainJsonReading::Annotated,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::SequentialFill => "sequential-fill",
            Strategy::OneFieldPerSlot => "one-field-per-slot",
        })
    }
}

/// The claim slot codec.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    /// A codec with the given configuration.
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Pack `payload` into claim slots as directed by `schema`.
    ///
    /// # Errors
    ///
    /// Any [`CodecError`]; the call has no partial result.
    pub fn pack(
        &self,
        payload: &[u8],
        schema: &[u8],
        strategy: Strategy,
        claim_type: &str,
    ) -> Result<ClaimSlots, CodecError> {
        self.pack_with_format(payload, schema, DocumentFormat::Unknown, strategy, claim_type)
    }

    /// Like [`Self::pack`], honouring the loader's format hint.
    pub fn pack_loaded(
        &self,
        payload: &[u8],
        schema: &LoadedDocument,
        strategy: Strategy,
        claim_type: &str,
    ) -> Result<ClaimSlots, CodecError> {
        self.pack_with_format(payload, &schema.bytes, schema.format, strategy, claim_type)
    }

    fn pack_with_format(
        &self,
        payload: &[u8],
        schema: &[u8],
        format: DocumentFormat,
        strategy: Strategy,
        claim_type: &str,
    ) -> Result<ClaimSlots, CodecError> {
        let options = ParseOptions {
            plain: strategy.plain_reading(),
            json_ld: JsonLdReading::Directives,
            format,
        };
        let metadata = SchemaMetadata::parse(schema, claim_type, options)?;
        let payload = Payload::parse(payload)?;
        tracing::debug!(
            %strategy,
            dialect = %metadata.dialect(),
            positional = payload.is_positional(),
            "packing claim slots"
        );

        match strategy {
            Strategy::SequentialFill => sequential::pack(&metadata, &payload, &self.config),
            Strategy::OneFieldPerSlot => explicit::pack(&metadata, &payload),
        }
    }

    /// Pack a merklized credential: slots are bound to document paths by the
    /// schema's serialization attribute and resolved through `merklizer`.
    ///
    /// # Errors
    ///
    /// - [`CodecError::SchemaParse`] if `schema` is not a JSON-LD context.
    /// - [`CodecError::MalformedSerializationAttribute`] for a bad attribute.
    /// - [`CodecError::PayloadParse`] if `document` is not a JSON object.
    /// - [`CodecError::Merklization`] or [`CodecError::FieldNotInRange`] from
    ///   path resolution.
    pub fn pack_merklized(
        &self,
        document: &[u8],
        schema: &[u8],
        claim_type: &str,
        merklizer: &dyn Merklizer,
    ) -> Result<ClaimSlots, CodecError> {
        let options = ParseOptions {
            json_ld: JsonLdReading::SerializationAttribute,
            ..ParseOptions::default()
        };
        let metadata = SchemaMetadata::parse(schema, claim_type, options)?;
        let SchemaMetadata::JsonLd(ld) = &metadata else {
            return Err(CodecError::schema_parse(
                metadata.dialect(),
                "merklized packing requires a JSON-LD context schema",
            ));
        };
        let paths = merklize::slot_paths(ld.serialization_attr.as_deref())?;

        let document: Value = serde_json::from_slice(document)
            .map_err(|e| CodecError::PayloadParse(e.to_string()))?;
        if !document.is_object() {
            return Err(CodecError::PayloadParse(
                "credential document is not a JSON object".into(),
            ));
        }
        tracing::debug!(claim_type, bound = paths.iter().count(), "packing merklized claim slots");

        merklize::pack(&paths, &document, merklizer)
    }

    /// Canonical claim position (2, 3, 6 or 7) of `field`.
    ///
    /// # Errors
    ///
    /// - [`CodecError::FieldNotInSchema`] if the schema does not declare
    ///   `field`.
    /// - [`CodecError::TooManyFieldsForSlotModel`] if `field` is generic and a
    ///   list has more than two generic fields.
    /// - Any schema parsing error.
    pub fn slot_index_of(&self, field: &str, schema: &[u8], claim_type: &str) -> Result<u8, CodecError> {
        self.slot_index_with_format(field, schema, DocumentFormat::Unknown, claim_type)
    }

    /// Like [`Self::slot_index_of`], honouring the loader's format hint.
    pub fn slot_index_of_loaded(
        &self,
        field: &str,
        schema: &LoadedDocument,
        claim_type: &str,
    ) -> Result<u8, CodecError> {
        self.slot_index_with_format(field, &schema.bytes, schema.format, claim_type)
    }

    fn slot_index_with_format(
        &self,
        field: &str,
        schema: &[u8],
        format: DocumentFormat,
        claim_type: &str,
    ) -> Result<u8, CodecError> {
        let options = ParseOptions {
            format,
            ..ParseOptions::default()
        };
        let metadata = SchemaMetadata::parse(schema, claim_type, options)?;
        let order = self.config.sort_order_for(metadata.dialect());
        let position = slot_index::resolve(field, &metadata, order)?;
        tracing::debug!(field, position, "resolved slot index");
        Ok(position)
    }
}

/// [`Codec::pack`] with the default configuration.
pub fn pack(
    payload: &[u8],
    schema: &[u8],
    strategy: Strategy,
    claim_type: &str,
) -> Result<ClaimSlots, CodecError> {
    Codec::default().pack(payload, schema, strategy, claim_type)
}

/// [`Codec::slot_index_of`] with the default configuration.
pub fn slot_index_of(field: &str, schema: &[u8], claim_type: &str) -> Result<u8, CodecError> {
    Codec::default().slot_index_of(field, schema, claim_type)
}
