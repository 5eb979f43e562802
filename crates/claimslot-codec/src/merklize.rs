//! # Path-Based Slot Assembly — Merklized Credentials
//!
//! For merklized credentials, slot values are not read from flat payload
//! JSON. The schema's `iden3:v1:` attribute binds each slot to a document
//! path, and an external [`Merklizer`] resolves the path to a field element.
//! The codec only invokes the resolution and writes the returned integer,
//! little-endian, into the slot.
//!
//! ## Security Invariant
//!
//! The merklizer promises results below `q`. The promise is checked anyway:
//! a returned value `>= q` is [`CodecError::FieldNotInRange`] and never
//! reaches a slot.

use claimslot_core::{minimal_le_bytes, ClaimSlots, CodecError, SlotBuffer};
use claimslot_schema::{parse_serialization_attr, DocumentPath, SlotPaths};
use num_bigint::BigUint;
use serde_json::Value;

use crate::explicit::slot_offset;

/// Resolves a document path to a canonical field element.
///
/// Implementations wrap a JSON-LD canonicalization and Merkle-tree engine,
/// which is outside the codec. Resolution must be deterministic for a given
/// document and path.
pub trait Merklizer {
    /// Resolve `path` in `document` to its field element.
    ///
    /// The error string is surfaced as [`CodecError::Merklization`].
    fn resolve_path(&self, document: &Value, path: &DocumentPath) -> Result<BigUint, String>;
}

/// Parse `attribute` (absent means no slots) into slot paths.
pub(crate) fn slot_paths(attribute: Option<&str>) -> Result<SlotPaths, CodecError> {
    match attribute {
        Some(attr) => parse_serialization_attr(attr),
        None => Ok(SlotPaths::default()),
    }
}

/// Resolve every bound path and assemble the slots.
pub(crate) fn pack(
    paths: &SlotPaths,
    document: &Value,
    merklizer: &dyn Merklizer,
) -> Result<ClaimSlots, CodecError> {
    let mut slots: [SlotBuffer; 4] = Default::default();
    for (label, path) in paths.iter() {
        let element = merklizer
            .resolve_path(document, &path)
            .map_err(|reason| CodecError::Merklization {
                path: path.to_string(),
                reason,
            })?;
        let buffer = SlotBuffer::from_field_bytes(minimal_le_bytes(&element)).ok_or_else(|| {
            CodecError::FieldNotInRange {
                field: path.to_string(),
                slot: label,
            }
        })?;
        tracing::debug!(slot = %label, %path, bytes = buffer.len(), "resolved merklized slot");
        slots[slot_offset(label)] = buffer;
    }

    let [index_a, index_b, value_a, value_b] = slots;
    Ok(ClaimSlots::new(index_a, index_b, value_a, value_b))
}
