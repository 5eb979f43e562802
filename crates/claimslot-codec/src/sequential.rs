//! # Sequential-Fill Strategy
//!
//! Generic `Index` and `Value` fields are packed back to back, in list order,
//! into slot A of their list. The first field whose bytes would push slot A
//! to or past `q` moves the list permanently to slot B; a field that does not
//! fit in slot B either is [`CodecError::SlotsOverflow`].
//!
//! ## Invariant
//!
//! Slot A followed by slot B is exactly the concatenation of the list's field
//! bytes in packing order. No field is split across slots and no field is
//! dropped.

use claimslot_core::{
    to_field_bytes, ClaimSlots, CodecError, FieldValue, NumberEncoding, SlotBuffer, SlotList,
};
use claimslot_schema::SchemaMetadata;

use crate::config::{number_encoding_for, CodecConfig};
use crate::payload::Payload;

/// Pack the generic directives of `metadata`.
pub(crate) fn pack(
    metadata: &SchemaMetadata,
    payload: &Payload,
    config: &CodecConfig,
) -> Result<ClaimSlots, CodecError> {
    let dialect = metadata.dialect();
    let directives = metadata.directives();
    if directives.has_explicit() {
        tracing::warn!(
            %dialect,
            "explicit slot directives are ignored by sequential fill"
        );
    }

    let order = config.sort_order_for(dialect);
    let encoding = number_encoding_for(dialect);

    let fill = |list: SlotList| {
        let mut fields = directives.generic_fields(list);
        order.apply(&mut fields);
        let fields = payload.arrange(list, fields)?;
        fill_list(list, &fields, payload, encoding)
    };
    let (index_a, index_b) = fill(SlotList::Index)?;
    let (value_a, value_b) = fill(SlotList::Value)?;
    Ok(ClaimSlots::new(index_a, index_b, value_a, value_b))
}

/// Fill slot A then slot B of one list with the fields in `order`.
pub(crate) fn fill_list(
    list: SlotList,
    order: &[String],
    payload: &Payload,
    encoding: NumberEncoding,
) -> Result<(SlotBuffer, SlotBuffer), CodecError> {
    let mut slot_a = SlotBuffer::empty();
    let mut slot_b = SlotBuffer::empty();
    let mut on_b = false;

    for field in order {
        let value = FieldValue::from_json(field, payload.require(field)?, encoding)?;
        let bytes = to_field_bytes(&value);

        if !on_b {
            if slot_a.try_append(&bytes) {
                continue;
            }
            on_b = true;
            tracing::debug!(%list, field = %field, used = slot_a.len(), "slot A full, continuing in slot B");
        }
        if !slot_b.try_append(&bytes) {
            return Err(CodecError::SlotsOverflow {
                list,
                field: field.clone(),
            });
        }
    }

    Ok((slot_a, slot_b))
}
