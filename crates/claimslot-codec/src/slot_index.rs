//! # Slot Index Resolver
//!
//! Answers "which of the eight claim positions holds this field" without
//! assembling the claim. Used by proof-path tooling that needs a field's
//! position before any payload exists.
//!
//! - Explicit directives map to a fixed position: index A → 2, index B → 3,
//!   value A → 6, value B → 7.
//! - Generic directives map to `rank + 2` (index) or `rank + 6` (value),
//!   where `rank` is the field's place in the same sorted list the
//!   Sequential-Fill strategy uses. That only holds while each list fits the
//!   two-slot model, so a list with more than two generic fields is
//!   [`CodecError::TooManyFieldsForSlotModel`].
//! - A generic rank that lands on an explicitly bound slot would give two
//!   fields the same position, each true under a different strategy. Such a
//!   schema is [`CodecError::DuplicateSlotAssignment`] for every field query.

use claimslot_core::{CodecError, SlotList};
use claimslot_schema::{DirectiveMap, SchemaMetadata, SlotBindings};

use crate::config::SortOrder;

/// Maximum generic fields per list for which ranks are meaningful.
const SLOTS_PER_LIST: usize = 2;

/// Canonical claim position of `field`.
pub(crate) fn resolve(
    field: &str,
    metadata: &SchemaMetadata,
    order: SortOrder,
) -> Result<u8, CodecError> {
    let directives = metadata.directives();
    let directive = directives
        .get(field)
        .ok_or_else(|| CodecError::FieldNotInSchema {
            field: field.to_string(),
        })?;

    // Reject schemas with contested slots before answering.
    let bindings = metadata.explicit_bindings()?;
    check_rank_collisions(&directives, &bindings, order)?;

    if let Some(label) = directive.explicit_slot() {
        let label = bindings.slot_of(field).unwrap_or(label);
        return Ok(label.position());
    }

    check_slot_model(&directives)?;

    let list = directive.list();
    let fields = ranked(&directives, list, order);
    let rank = fields
        .iter()
        .position(|f| f == field)
        .ok_or_else(|| CodecError::FieldNotInSchema {
            field: field.to_string(),
        })?;

    // rank < SLOTS_PER_LIST after the model check.
    Ok(list.base_position() + rank as u8)
}

fn ranked(directives: &DirectiveMap, list: SlotList, order: SortOrder) -> Vec<String> {
    let mut fields = directives.generic_fields(list);
    order.apply(&mut fields);
    fields
}

fn check_rank_collisions(
    directives: &DirectiveMap,
    bindings: &SlotBindings,
    order: SortOrder,
) -> Result<(), CodecError> {
    for list in [SlotList::Index, SlotList::Value] {
        let fields = ranked(directives, list, order);
        for (label, generic) in list.labels().into_iter().zip(fields) {
            if let Some(explicit) = bindings.get(label) {
                return Err(CodecError::DuplicateSlotAssignment {
                    slot: label,
                    first: explicit.to_string(),
                    second: generic,
                });
            }
        }
    }
    Ok(())
}

fn check_slot_model(directives: &DirectiveMap) -> Result<(), CodecError> {
    for list in [SlotList::Index, SlotList::Value] {
        let count = directives.generic_fields(list).len();
        if count > SLOTS_PER_LIST {
            return Err(CodecError::TooManyFieldsForSlotModel { list, count });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimslot_schema::ParseOptions;
    use serde_json::json;

    fn legacy(index: &[&str], value: &[&str]) -> SchemaMetadata {
        let doc = json!({"properties": {
            "index": {"default": index},
            "value": {"default": value}
        }});
        SchemaMetadata::parse(doc.to_string().as_bytes(), "", ParseOptions::default()).unwrap()
    }

    const ASC: SortOrder = SortOrder::Ascending;

    #[test]
    fn generic_fields_use_sorted_rank() {
        let m = legacy(&["zeta", "alpha"], &["value"]);
        assert_eq!(resolve("alpha", &m, ASC).unwrap(), 2);
        assert_eq!(resolve("zeta", &m, ASC).unwrap(), 3);
        assert_eq!(resolve("value", &m, ASC).unwrap(), 6);
    }

    #[test]
    fn descending_order_flips_rank() {
        let m = legacy(&["zeta", "alpha"], &[]);
        assert_eq!(resolve("zeta", &m, SortOrder::Descending).unwrap(), 2);
        assert_eq!(resolve("alpha", &m, SortOrder::Descending).unwrap(), 3);
    }

    #[test]
    fn unknown_field() {
        let m = legacy(&["a"], &[]);
        assert_eq!(
            resolve("b", &m, ASC).unwrap_err(),
            CodecError::FieldNotInSchema { field: "b".into() }
        );
    }

    #[test]
    fn too_many_generic_fields() {
        let m = legacy(&["a"], &["x", "y", "z"]);
        assert_eq!(
            resolve("a", &m, ASC).unwrap_err(),
            CodecError::TooManyFieldsForSlotModel {
                list: SlotList::Value,
                count: 3
            }
        );
    }

    fn json_ld(fields: serde_json::Value) -> SchemaMetadata {
        let doc = json!({"@context": [{"T": {"@id": "t:T", "@context": fields}}]});
        SchemaMetadata::parse(doc.to_string().as_bytes(), "T", ParseOptions::default()).unwrap()
    }

    #[test]
    fn generic_rank_on_explicit_slot_is_rejected() {
        let m = json_ld(json!({
            "a": {"@id": "t:a", "@type": "serialization:Index"},
            "b": {"@id": "t:b", "@type": "serialization:IndexDataSlotA"}
        }));
        let expected = CodecError::DuplicateSlotAssignment {
            slot: claimslot_core::SlotLabel::IndexA,
            first: "b".into(),
            second: "a".into(),
        };
        assert_eq!(resolve("a", &m, ASC).unwrap_err(), expected);
        assert_eq!(resolve("b", &m, ASC).unwrap_err(), expected);
    }

    #[test]
    fn generic_and_explicit_on_distinct_slots_resolve() {
        let m = json_ld(json!({
            "a": {"@id": "t:a", "@type": "serialization:Index"},
            "b": {"@id": "t:b", "@type": "serialization:IndexDataSlotB"}
        }));
        assert_eq!(resolve("a", &m, ASC).unwrap(), 2);
        assert_eq!(resolve("b", &m, ASC).unwrap(), 3);
    }

    #[test]
    fn explicit_positions_are_fixed() {
        let doc = br#"{"$metadata": {"serialization": {
            "indexDataSlotA": "a", "indexDataSlotB": "b",
            "valueDataSlotA": "c", "valueDataSlotB": "d"
        }}}"#;
        let m = SchemaMetadata::parse(doc, "", ParseOptions::default()).unwrap();
        let got: Vec<u8> = ["a", "b", "c", "d"]
            .iter()
            .map(|f| resolve(f, &m, ASC).unwrap())
            .collect();
        assert_eq!(got, vec![2, 3, 6, 7]);
    }
}
