//! # Payload Modes
//!
//! A payload is a JSON object keyed by field name, in one of two shapes:
//!
//! - **flat**: `{"birthdayDay": 24, "birthdayMonth": 4}`;
//! - **positional**: `{"birthdayDay": {"position": 0, "data": 24}, ...}`,
//!   where `position` fixes the field's rank inside its list and overrides
//!   the configured sort order.
//!
//! The mode is detected, not declared: a non-empty object whose every value
//! is an object with a `data` key is positional, anything else is flat.

use std::collections::BTreeMap;

use claimslot_core::{CodecError, SlotList};
use serde_json::{Map, Value};

/// One entry of a positional payload.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Positioned {
    position: Option<u64>,
    data: Value,
}

/// A parsed payload.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Payload {
    Flat(Map<String, Value>),
    Positional(BTreeMap<String, Positioned>),
}

impl Payload {
    /// Parse payload bytes and detect the mode.
    pub(crate) fn parse(bytes: &[u8]) -> Result<Self, CodecError> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| CodecError::PayloadParse(e.to_string()))?;
        match value {
            Value::Object(map) => Ok(Self::from_map(map)),
            other => Err(CodecError::PayloadParse(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }

    fn from_map(map: Map<String, Value>) -> Self {
        let positional = !map.is_empty()
            && map
                .values()
                .all(|v| v.as_object().is_some_and(|o| o.contains_key("data")));
        if !positional {
            return Payload::Flat(map);
        }

        let entries = map
            .into_iter()
            .map(|(field, v)| {
                let position = v.get("position").and_then(Value::as_u64);
                let data = v.get("data").cloned().unwrap_or(Value::Null);
                (field, Positioned { position, data })
            })
            .collect();
        Payload::Positional(entries)
    }

    /// Returns true for positional payloads.
    pub(crate) fn is_positional(&self) -> bool {
        matches!(self, Payload::Positional(_))
    }

    /// The value of `field` (the `data` member in positional mode).
    pub(crate) fn value_of(&self, field: &str) -> Option<&Value> {
        match self {
            Payload::Flat(map) => map.get(field),
            Payload::Positional(entries) => entries.get(field).map(|p| &p.data),
        }
    }

    /// Like [`Self::value_of`], but absence is an error.
    pub(crate) fn require(&self, field: &str) -> Result<&Value, CodecError> {
        self.value_of(field)
            .ok_or_else(|| CodecError::FieldNotInPayload {
                field: field.to_string(),
            })
    }

    /// Final packing order for the fields of `list`.
    ///
    /// Flat payloads keep `sorted` as given. Positional payloads order the
    /// same fields by their `position`, which must cover `0..n` exactly.
    pub(crate) fn arrange(&self, list: SlotList, sorted: Vec<String>) -> Result<Vec<String>, CodecError> {
        let Payload::Positional(entries) = self else {
            return Ok(sorted);
        };

        let n = sorted.len();
        let mut placed: Vec<Option<String>> = vec![None; n];
        for field in sorted {
            let entry = entries.get(&field).ok_or_else(|| CodecError::FieldNotInPayload {
                field: field.clone(),
            })?;
            let position = entry.position.ok_or_else(|| CodecError::PositionNotFound {
                list,
                detail: format!("field '{field}' has no non-negative integer position"),
            })?;
            let slot = usize::try_from(position)
                .ok()
                .filter(|p| *p < n)
                .ok_or_else(|| CodecError::PositionNotFound {
                    list,
                    detail: format!("position {position} of '{field}' is outside 0..{n}"),
                })?;
            if let Some(existing) = &placed[slot] {
                return Err(CodecError::PositionNotFound {
                    list,
                    detail: format!(
                        "position {slot} claimed by both '{existing}' and '{field}'"
                    ),
                });
            }
            placed[slot] = Some(field);
        }

        placed
            .into_iter()
            .enumerate()
            .map(|(i, f)| {
                f.ok_or_else(|| CodecError::PositionNotFound {
                    list,
                    detail: format!("position {i} not found"),
                })
            })
            .collect()
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
