//! # Error Types — Codec Error Taxonomy
//!
//! Defines [`CodecError`], the single error type surfaced by packing and
//! slot-index lookups. All errors use `thiserror` for derive-based `Display`
//! and `Error` implementations.
//!
//! ## Design
//!
//! - Every failure aborts the whole call. There are no partial results.
//! - Errors carry the field name, slot label, or dialect needed to diagnose
//!   the failure without re-parsing the inputs.
//! - Errors are deterministic: the same inputs reproduce the same error, so
//!   callers must not retry.

use thiserror::Error;

use crate::slots::{SlotLabel, SlotList};

/// Top-level error type for the claim slot codec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Schema bytes are malformed for the dialect being read.
    #[error("schema parse error ({dialect}): {reason}")]
    SchemaParse {
        /// Dialect the parser was reading.
        dialect: String,
        /// What was wrong with the document.
        reason: String,
    },

    /// The requested credential type is not defined in the schema.
    #[error("credential type '{claim_type}' not found in schema")]
    SchemaTypeNotFound {
        /// The requested credential type.
        claim_type: String,
    },

    /// The schema lacks the serialization metadata the dialect requires.
    #[error("serialization info missing ({dialect}): {detail}")]
    SerializationInfoMissing {
        /// Dialect the parser was reading.
        dialect: String,
        /// Which block or list is absent.
        detail: String,
    },

    /// A payload value or schema type cannot be mapped to a field element.
    #[error("unsupported field type for '{field}': {reason}")]
    UnsupportedFieldType {
        /// Offending field name.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// Sequential packing exhausted both slots of a list.
    #[error("{list} slots overflow: field '{field}' fits in neither slot A nor slot B")]
    SlotsOverflow {
        /// The list (index or value) being packed.
        list: SlotList,
        /// First field that could not be placed.
        field: String,
    },

    /// Two fields claim the same explicit slot.
    #[error("duplicate assignment of slot {slot}: '{first}' and '{second}'")]
    DuplicateSlotAssignment {
        /// The contested slot.
        slot: SlotLabel,
        /// Field (or path) that claimed the slot first.
        first: String,
        /// Field (or path) that claimed it again.
        second: String,
    },

    /// An explicitly bound value is not below the field modulus.
    #[error("value of '{field}' for slot {slot} is not in the scalar field")]
    FieldNotInRange {
        /// Field name or document path.
        field: String,
        /// Slot the value was bound to.
        slot: SlotLabel,
    },

    /// Positional payload input is missing a position.
    #[error("position not found in {list} list: {detail}")]
    PositionNotFound {
        /// The list whose positions were being reconstructed.
        list: SlotList,
        /// Missing position or offending field.
        detail: String,
    },

    /// A field was looked up that the schema does not declare.
    #[error("field '{field}' not found in schema")]
    FieldNotInSchema {
        /// The requested field name.
        field: String,
    },

    /// A field the schema binds is absent from the payload.
    #[error("field '{field}' not found in payload")]
    FieldNotInPayload {
        /// The missing field name.
        field: String,
    },

    /// Generic directives cannot be mapped to the fixed two-slot model.
    #[error("{list} list has {count} fields; slot index resolution supports at most 2")]
    TooManyFieldsForSlotModel {
        /// The list that is too long.
        list: SlotList,
        /// Number of fields in the list.
        count: usize,
    },

    /// The merklized serialization attribute could not be parsed.
    #[error("malformed serialization attribute '{attribute}': {reason}")]
    MalformedSerializationAttribute {
        /// The attribute as found in the schema.
        attribute: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Payload bytes are not a JSON object.
    #[error("payload parse error: {0}")]
    PayloadParse(String),

    /// The external merklizer could not resolve a document path.
    #[error("merklization failed for path '{path}': {reason}")]
    Merklization {
        /// The document path being resolved.
        path: String,
        /// Error reported by the merklizer.
        reason: String,
    },
}

impl CodecError {
    /// Shorthand for [`CodecError::SchemaParse`].
    pub fn schema_parse(dialect: impl ToString, reason: impl Into<String>) -> Self {
        Self::SchemaParse {
            dialect: dialect.to_string(),
            reason: reason.into(),
        }
    }

    /// Shorthand for [`CodecError::UnsupportedFieldType`].
    pub fn unsupported(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedFieldType {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for [`CodecError::MalformedSerializationAttribute`].
    pub fn malformed_attribute(attribute: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedSerializationAttribute {
            attribute: attribute.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_field_type_names_the_field() {
        let err = CodecError::unsupported("birthday", "booleans are not field elements");
        let msg = format!("{err}");
        assert!(msg.contains("birthday"));
        assert!(msg.contains("booleans"));
    }

    #[test]
    fn slots_overflow_display() {
        let err = CodecError::SlotsOverflow {
            list: SlotList::Index,
            field: "f15".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "index slots overflow: field 'f15' fits in neither slot A nor slot B"
        );
    }

    #[test]
    fn duplicate_slot_display_names_both_claimants() {
        let err = CodecError::DuplicateSlotAssignment {
            slot: SlotLabel::IndexA,
            first: "price".to_string(),
            second: "weight".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("indexDataSlotA"));
        assert!(msg.contains("price"));
        assert!(msg.contains("weight"));
    }

    #[test]
    fn schema_parse_carries_dialect() {
        let err = CodecError::schema_parse("json-ld-context", "@context is not an array");
        assert!(format!("{err}").starts_with("schema parse error (json-ld-context)"));
    }

    #[test]
    fn too_many_fields_display() {
        let err = CodecError::TooManyFieldsForSlotModel {
            list: SlotList::Value,
            count: 3,
        };
        assert!(format!("{err}").contains("value list has 3 fields"));
    }

    #[test]
    fn errors_compare_by_value() {
        let a = CodecError::FieldNotInSchema { field: "x".into() };
        let b = CodecError::FieldNotInSchema { field: "x".into() };
        assert_eq!(a, b);
    }
}
