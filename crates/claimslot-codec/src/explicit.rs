//! # One-Field-Per-Slot Strategy
//!
//! Each slot holds exactly the one field explicitly bound to it, either by a
//! JSON-LD `serialization:*DataSlot*` directive or by the
//! `$metadata.serialization` block. Unbound slots stay empty.

use claimslot_core::{to_field_bytes, ClaimSlots, CodecError, FieldValue, SlotBuffer, SlotLabel};
use claimslot_schema::SchemaMetadata;

use crate::config::number_encoding_for;
use crate::payload::Payload;

/// Pack the explicit bindings of `metadata`.
pub(crate) fn pack(metadata: &SchemaMetadata, payload: &Payload) -> Result<ClaimSlots, CodecError> {
    let dialect = metadata.dialect();
    let bindings = metadata.explicit_bindings()?;
    let directives = metadata.directives();
    let generic = directives.iter().filter(|(_, d)| d.is_generic()).count();
    if generic > 0 {
        tracing::warn!(%dialect, generic, "generic directives are ignored by one-field-per-slot");
    }

    let encoding = number_encoding_for(dialect);
    let mut slots: [SlotBuffer; 4] = Default::default();
    for (label, field) in bindings.iter() {
        let value = FieldValue::from_json(field, payload.require(field)?, encoding)?;
        let buffer = SlotBuffer::from_field_bytes(to_field_bytes(&value)).ok_or_else(|| {
            CodecError::FieldNotInRange {
                field: field.to_string(),
                slot: label,
            }
        })?;
        tracing::debug!(slot = %label, field, bytes = buffer.len(), "bound field to slot");
        slots[slot_offset(label)] = buffer;
    }

    let [index_a, index_b, value_a, value_b] = slots;
    Ok(ClaimSlots::new(index_a, index_b, value_a, value_b))
}

/// Offset of `label` in [`SlotLabel::ALL`].
pub(crate) fn slot_offset(label: SlotLabel) -> usize {
    match label {
        SlotLabel::IndexA => 0,
        SlotLabel::IndexB => 1,
        SlotLabel::ValueA => 2,
        SlotLabel::ValueB => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimslot_schema::ParseOptions;
    use claimslot_schema::PlainJsonReading;
    use serde_json::json;

    fn annotated(serialization: serde_json::Value) -> SchemaMetadata {
        let doc = json!({"$metadata": {"serialization": serialization}});
        let options = ParseOptions {
            plain: PlainJsonReading::Annotated,
            ..ParseOptions::default()
        };
        SchemaMetadata::parse(doc.to_string().as_bytes(), "", options).unwrap()
    }

    fn payload(v: serde_json::Value) -> Payload {
        Payload::parse(v.to_string().as_bytes()).unwrap()
    }

    #[test]
    fn each_bound_field_fills_its_slot() {
        let m = annotated(json!({"indexDataSlotA": "price", "valueDataSlotB": "weight"}));
        let slots = pack(&m, &payload(json!({"price": 500, "weight": "70", "extra": 1}))).unwrap();
        assert_eq!(slots.index_a().as_bytes(), &[0xf4, 0x01]);
        assert!(slots.index_b().is_empty());
        assert!(slots.value_a().is_empty());
        assert_eq!(slots.value_b().as_bytes(), &[70]);
    }

    #[test]
    fn value_slots_are_filled_independently() {
        let m = annotated(json!({"valueDataSlotA": "height", "valueDataSlotB": "weight"}));
        let slots = pack(&m, &payload(json!({"height": 180, "weight": 70}))).unwrap();
        assert_eq!(slots.value_a().as_bytes(), &[180]);
        assert_eq!(slots.value_b().as_bytes(), &[70]);
    }

    #[test]
    fn value_at_modulus_is_not_in_range() {
        let q = claimslot_core::FIELD_MODULUS_DECIMAL;
        let m = annotated(json!({"indexDataSlotB": "id"}));
        let err = pack(&m, &payload(json!({ "id": q }))).unwrap_err();
        assert_eq!(
            err,
            CodecError::FieldNotInRange {
                field: "id".into(),
                slot: SlotLabel::IndexB
            }
        );
    }

    #[test]
    fn bound_field_missing_from_payload() {
        let m = annotated(json!({"indexDataSlotA": "price", "indexDataSlotB": "weight"}));
        let err = pack(&m, &payload(json!({"price": 1}))).unwrap_err();
        assert_eq!(
            err,
            CodecError::FieldNotInPayload {
                field: "weight".into()
            }
        );
    }

    #[test]
    fn empty_metadata_yields_empty_slots() {
        let doc = br#"{"$metadata": {"type": "T"}}"#;
        let m = SchemaMetadata::parse(doc, "T", ParseOptions::default()).unwrap();
        assert!(pack(&m, &payload(json!({"a": 1}))).unwrap().is_empty());
    }

    #[test]
    fn offsets_follow_label_order() {
        for (i, label) in SlotLabel::ALL.into_iter().enumerate() {
            assert_eq!(slot_offset(label), i);
        }
    }
}
