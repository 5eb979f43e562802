//! # Serialization Directives
//!
//! The dialect-independent answer to "where does this payload field go".
//! Generic directives ([`SerializationDirective::Index`],
//! [`SerializationDirective::Value`]) leave the position to the sort order of
//! the Sequential-Fill strategy. Explicit directives pin the field to one of
//! the four slots, and at most one field may claim each slot.

use std::collections::BTreeMap;
use std::fmt;

use claimslot_core::{CodecError, SlotLabel, SlotList};
use serde::{Deserialize, Serialize};

/// Directive attached to one schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SerializationDirective {
    /// Generic index field, placed by sort order.
    Index,
    /// Generic value field, placed by sort order.
    Value,
    /// Bound to index slot A.
    IndexSlotA,
    /// Bound to index slot B.
    IndexSlotB,
    /// Bound to value slot A.
    ValueSlotA,
    /// Bound to value slot B.
    ValueSlotB,
}

impl SerializationDirective {
    /// Map a JSON-LD `@type` identifier to a directive.
    ///
    /// Returns `None` for anything outside the six recognized identifiers.
    pub fn from_type_id(type_id: &str) -> Option<Self> {
        match type_id {
            "serialization:Index" => Some(Self::Index),
            "serialization:Value" => Some(Self::Value),
            "serialization:IndexDataSlotA" => Some(Self::IndexSlotA),
            "serialization:IndexDataSlotB" => Some(Self::IndexSlotB),
            "serialization:ValueDataSlotA" => Some(Self::ValueSlotA),
            "serialization:ValueDataSlotB" => Some(Self::ValueSlotB),
            _ => None,
        }
    }

    /// The JSON-LD `@type` identifier for this directive.
    pub fn type_id(self) -> &'static str {
        match self {
            Self::Index => "serialization:Index",
            Self::Value => "serialization:Value",
            Self::IndexSlotA => "serialization:IndexDataSlotA",
            Self::IndexSlotB => "serialization:IndexDataSlotB",
            Self::ValueSlotA => "serialization:ValueDataSlotA",
            Self::ValueSlotB => "serialization:ValueDataSlotB",
        }
    }

    /// The explicit slot, if this directive names one.
    pub fn explicit_slot(self) -> Option<SlotLabel> {
        match self {
            Self::Index | Self::Value => None,
            Self::IndexSlotA => Some(SlotLabel::IndexA),
            Self::IndexSlotB => Some(SlotLabel::IndexB),
            Self::ValueSlotA => Some(SlotLabel::ValueA),
            Self::ValueSlotB => Some(SlotLabel::ValueB),
        }
    }

    /// The list this directive places its field in.
    pub fn list(self) -> SlotList {
        match self {
            Self::Index | Self::IndexSlotA | Self::IndexSlotB => SlotList::Index,
            Self::Value | Self::ValueSlotA | Self::ValueSlotB => SlotList::Value,
        }
    }

    /// Returns true for [`Self::Index`] and [`Self::Value`].
    pub fn is_generic(self) -> bool {
        self.explicit_slot().is_none()
    }
}

impl fmt::Display for SerializationDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_id())
    }
}

/// Field name → directive, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveMap {
    fields: BTreeMap<String, SerializationDirective>,
}

impl DirectiveMap {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a directive for `field`, replacing any previous one.
    pub fn insert(&mut self, field: impl Into<String>, directive: SerializationDirective) {
        self.fields.insert(field.into(), directive);
    }

    /// Directive for `field`, if declared.
    pub fn get(&self, field: &str) -> Option<SerializationDirective> {
        self.fields.get(field).copied()
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field is declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate `(field, directive)` in ascending field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, SerializationDirective)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Fields carrying the generic directive of `list`, ascending.
    pub fn generic_fields(&self, list: SlotList) -> Vec<String> {
        self.iter()
            .filter(|(_, d)| d.is_generic() && d.list() == list)
            .map(|(k, _)| k.to_string())
            .collect()
    }

    /// Returns true if any field has an explicit slot directive.
    pub fn has_explicit(&self) -> bool {
        self.fields.values().any(|d| !d.is_generic())
    }

    /// Collect explicit directives into slot bindings.
    ///
    /// # Errors
    ///
    /// [`CodecError::DuplicateSlotAssignment`] if two fields claim the same
    /// slot. Fields are visited in ascending order, so `first` is the
    /// lexicographically smaller name.
    pub fn explicit_bindings(&self) -> Result<SlotBindings, CodecError> {
        let mut bindings = SlotBindings::default();
        for (field, directive) in self.iter() {
            if let Some(label) = directive.explicit_slot() {
                bindings.bind(label, field)?;
            }
        }
        Ok(bindings)
    }
}

/// At most one binding (field name or document path) per slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SlotBindings {
    index_a: Option<String>,
    index_b: Option<String>,
    value_a: Option<String>,
    value_b: Option<String>,
}

impl SlotBindings {
    /// Bind `label` to `target`.
    ///
    /// # Errors
    ///
    /// [`CodecError::DuplicateSlotAssignment`] if `label` is already bound.
    pub fn bind(&mut self, label: SlotLabel, target: impl Into<String>) -> Result<(), CodecError> {
        let target = target.into();
        let entry = self.entry_mut(label);
        if let Some(first) = entry.as_ref() {
            return Err(CodecError::DuplicateSlotAssignment {
                slot: label,
                first: first.clone(),
                second: target,
            });
        }
        *entry = Some(target);
        Ok(())
    }

    /// The binding of `label`, if any.
    pub fn get(&self, label: SlotLabel) -> Option<&str> {
        match label {
            SlotLabel::IndexA => self.index_a.as_deref(),
            SlotLabel::IndexB => self.index_b.as_deref(),
            SlotLabel::ValueA => self.value_a.as_deref(),
            SlotLabel::ValueB => self.value_b.as_deref(),
        }
    }

    /// Bound slots in claim-position order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotLabel, &str)> {
        SlotLabel::ALL
            .into_iter()
            .filter_map(move |label| self.get(label).map(|t| (label, t)))
    }

    /// First slot, in claim-position order, bound to `target`.
    pub fn slot_of(&self, target: &str) -> Option<SlotLabel> {
        self.iter().find(|(_, t)| *t == target).map(|(l, _)| l)
    }

    /// Returns true if no slot is bound.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    fn entry_mut(&mut self, label: SlotLabel) -> &mut Option<String> {
        match label {
            SlotLabel::IndexA => &mut self.index_a,
            SlotLabel::IndexB => &mut self.index_b,
            SlotLabel::ValueA => &mut self.value_a,
            SlotLabel::ValueB => &mut self.value_b,
        }
    }
}
