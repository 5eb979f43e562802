//! # Claim Slots
//!
//! The codec output is four little-endian byte buffers: two index slots and
//! two value slots. The external claim container embeds them into a fixed
//! 8 × 32-byte claim at positions 2, 3 (index) and 6, 7 (value).
//!
//! ## Invariants
//!
//! - A [`SlotBuffer`] is never longer than [`SLOT_WIDTH`] and its little-endian
//!   value is always below the field modulus. Its only mutators go through
//!   [`fits_in_field`] / [`is_within_field`].
//! - [`ClaimSlots`] is built once per packing call and exposes no mutation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::field::{fits_in_field, is_within_field, SLOT_WIDTH};

/// Number of 32-byte slots in the physical claim.
pub const CLAIM_SLOT_COUNT: usize = 8;

/// Which list of a claim a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotList {
    /// Index slots (hashed into the claim's index hash).
    Index,
    /// Value slots (hashed into the claim's value hash).
    Value,
}

impl SlotList {
    /// The A and B labels of this list.
    pub fn labels(self) -> [SlotLabel; 2] {
        match self {
            SlotList::Index => [SlotLabel::IndexA, SlotLabel::IndexB],
            SlotList::Value => [SlotLabel::ValueA, SlotLabel::ValueB],
        }
    }

    /// Claim position of slot A in this list; slot B follows it.
    pub fn base_position(self) -> u8 {
        match self {
            SlotList::Index => 2,
            SlotList::Value => 6,
        }
    }
}

impl fmt::Display for SlotList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotList::Index => f.write_str("index"),
            SlotList::Value => f.write_str("value"),
        }
    }
}

/// One of the four codec-owned slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SlotLabel {
    /// First index slot, claim position 2.
    #[serde(rename = "indexDataSlotA")]
    IndexA,
    /// Second index slot, claim position 3.
    #[serde(rename = "indexDataSlotB")]
    IndexB,
    /// First value slot, claim position 6.
    #[serde(rename = "valueDataSlotA")]
    ValueA,
    /// Second value slot, claim position 7.
    #[serde(rename = "valueDataSlotB")]
    ValueB,
}

impl SlotLabel {
    /// All labels in claim-position order.
    pub const ALL: [SlotLabel; 4] = [
        SlotLabel::IndexA,
        SlotLabel::IndexB,
        SlotLabel::ValueA,
        SlotLabel::ValueB,
    ];

    /// Canonical position of this slot in the 8-slot claim.
    pub fn position(self) -> u8 {
        match self {
            SlotLabel::IndexA => 2,
            SlotLabel::IndexB => 3,
            SlotLabel::ValueA => 6,
            SlotLabel::ValueB => 7,
        }
    }

    /// The list this slot belongs to.
    pub fn list(self) -> SlotList {
        match self {
            SlotLabel::IndexA | SlotLabel::IndexB => SlotList::Index,
            SlotLabel::ValueA | SlotLabel::ValueB => SlotList::Value,
        }
    }

    /// The `$metadata.serialization` key naming this slot.
    pub fn metadata_key(self) -> &'static str {
        match self {
            SlotLabel::IndexA => "indexDataSlotA",
            SlotLabel::IndexB => "indexDataSlotB",
            SlotLabel::ValueA => "valueDataSlotA",
            SlotLabel::ValueB => "valueDataSlotB",
        }
    }
}

impl fmt::Display for SlotLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.metadata_key())
    }
}

/// Little-endian slot contents, guaranteed to be a field element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SlotBuffer(Vec<u8>);

impl SlotBuffer {
    /// An empty (unused) slot.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Wrap `bytes` if they are a field element that fits in one slot.
    pub fn from_field_bytes(bytes: Vec<u8>) -> Option<Self> {
        is_within_field(&bytes).then_some(Self(bytes))
    }

    /// Append `bytes` if the result still fits; returns whether it did.
    pub fn try_append(&mut self, bytes: &[u8]) -> bool {
        if fits_in_field(&self.0, bytes) {
            self.0.extend_from_slice(bytes);
            true
        } else {
            false
        }
    }

    /// The raw little-endian bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of bytes used.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing was written to the slot.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The slot zero-padded to the physical claim width.
    pub fn to_padded(&self) -> [u8; SLOT_WIDTH] {
        let mut out = [0u8; SLOT_WIDTH];
        out[..self.0.len()].copy_from_slice(&self.0);
        out
    }

    /// Render the used bytes as lowercase hex.
    pub fn to_hex(&self) -> String {
        to_hex(&self.0)
    }
}

impl AsRef<[u8]> for SlotBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// The four slots produced by one packing call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimSlots {
    index_a: SlotBuffer,
    index_b: SlotBuffer,
    value_a: SlotBuffer,
    value_b: SlotBuffer,
}

impl ClaimSlots {
    /// Assemble the output from four validated buffers.
    pub fn new(
        index_a: SlotBuffer,
        index_b: SlotBuffer,
        value_a: SlotBuffer,
        value_b: SlotBuffer,
    ) -> Self {
        Self {
            index_a,
            index_b,
            value_a,
            value_b,
        }
    }

    /// First index slot.
    pub fn index_a(&self) -> &SlotBuffer {
        &self.index_a
    }

    /// Second index slot.
    pub fn index_b(&self) -> &SlotBuffer {
        &self.index_b
    }

    /// First value slot.
    pub fn value_a(&self) -> &SlotBuffer {
        &self.value_a
    }

    /// Second value slot.
    pub fn value_b(&self) -> &SlotBuffer {
        &self.value_b
    }

    /// Slot by label.
    pub fn slot(&self, label: SlotLabel) -> &SlotBuffer {
        match label {
            SlotLabel::IndexA => &self.index_a,
            SlotLabel::IndexB => &self.index_b,
            SlotLabel::ValueA => &self.value_a,
            SlotLabel::ValueB => &self.value_b,
        }
    }

    /// Returns true if no slot was written.
    pub fn is_empty(&self) -> bool {
        SlotLabel::ALL.iter().all(|l| self.slot(*l).is_empty())
    }
}

/// The codec's view of the physical claim: 8 zero-padded 32-byte slots.
///
/// Positions 0, 1, 4 and 5 belong to the claim container (schema hash,
/// subject, revocation nonce, expiration) and are left zero here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimLayout([[u8; SLOT_WIDTH]; CLAIM_SLOT_COUNT]);

impl ClaimLayout {
    /// Embed the codec slots at their canonical positions.
    pub fn from_slots(slots: &ClaimSlots) -> Self {
        let mut layout = [[0u8; SLOT_WIDTH]; CLAIM_SLOT_COUNT];
        for label in SlotLabel::ALL {
            layout[usize::from(label.position())] = slots.slot(label).to_padded();
        }
        Self(layout)
    }

    /// The 32 bytes at `position`, or `None` past the end of the claim.
    pub fn slot(&self, position: u8) -> Option<&[u8; SLOT_WIDTH]> {
        self.0.get(usize::from(position))
    }

    /// All eight slots in order.
    pub fn slots(&self) -> &[[u8; SLOT_WIDTH]; CLAIM_SLOT_COUNT] {
        &self.0
    }
}

/// Lowercase hex of a byte string.
pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_append_refuses_overflow_and_leaves_buffer_unchanged() {
        let mut slot = SlotBuffer::empty();
        assert!(slot.try_append(&[0xff; 28]));
        assert!(!slot.try_append(&[0xff; 4]));
        assert_eq!(slot.len(), 28);
    }

    #[test]
    fn from_field_bytes_rejects_out_of_field() {
        assert!(SlotBuffer::from_field_bytes(vec![0xff; 32]).is_none());
        assert!(SlotBuffer::from_field_bytes(vec![0x01, 0x02]).is_some());
    }

    #[test]
    fn padded_keeps_little_endian_prefix() {
        let slot = SlotBuffer::from_field_bytes(vec![0xcc, 0x07]).unwrap();
        let padded = slot.to_padded();
        assert_eq!(&padded[..2], &[0xcc, 0x07]);
        assert!(padded[2..].iter().all(|b| *b == 0));
    }

    #[test]
    fn labels_map_to_canonical_positions() {
        let positions: Vec<u8> = SlotLabel::ALL.iter().map(|l| l.position()).collect();
        assert_eq!(positions, vec![2, 3, 6, 7]);
        assert_eq!(SlotList::Index.labels()[1], SlotLabel::IndexB);
        assert_eq!(SlotLabel::ValueB.list(), SlotList::Value);
    }

    #[test]
    fn layout_places_slots_and_zeroes_the_rest() {
        let slots = ClaimSlots::new(
            SlotBuffer::from_field_bytes(vec![1]).unwrap(),
            SlotBuffer::empty(),
            SlotBuffer::from_field_bytes(vec![2, 3]).unwrap(),
            SlotBuffer::from_field_bytes(vec![4]).unwrap(),
        );
        let layout = ClaimLayout::from_slots(&slots);
        assert_eq!(layout.slot(2).unwrap()[0], 1);
        assert_eq!(layout.slot(3).unwrap(), &[0u8; 32]);
        assert_eq!(&layout.slot(6).unwrap()[..2], &[2, 3]);
        assert_eq!(layout.slot(7).unwrap()[0], 4);
        for reserved in [0u8, 1, 4, 5] {
            assert_eq!(layout.slot(reserved).unwrap(), &[0u8; 32]);
        }
        assert!(layout.slot(8).is_none());
    }

    #[test]
    fn slot_label_serializes_as_metadata_key() {
        let json = serde_json::to_string(&SlotLabel::ValueA).unwrap();
        assert_eq!(json, "\"valueDataSlotA\"");
    }

    #[test]
    fn hex_rendering() {
        let slot = SlotBuffer::from_field_bytes(vec![0x18, 0x00, 0x0a]).unwrap();
        assert_eq!(slot.to_hex(), "18000a");
    }

    #[test]
    fn default_claim_slots_are_empty() {
        assert!(ClaimSlots::default().is_empty());
    }
}
