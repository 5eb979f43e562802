//! # claimslot-core — Foundational Types for the Claim Slot Codec
//!
//! This crate is the leaf of the codec workspace. It defines the values that
//! flow between schema resolution, slot assembly, and the external claim
//! container.
//!
//! ## Key Design Principles
//!
//! 1. **Closed payload values.** [`FieldValue`] is the only slot input. JSON is
//!    narrowed to it at the boundary; booleans, objects, arrays, negative and
//!    fractional numbers never reach the assembler.
//!
//! 2. **One overflow gate.** [`fits_in_field`] and [`is_within_field`] are the
//!    only paths into a [`SlotBuffer`]. A slot whose little-endian value is
//!    `>= q` cannot be constructed.
//!
//! 3. **Immutable modulus.** The BN254 scalar-field modulus is a lazily
//!    initialized constant; no process-wide mutable state exists.
//!
//! 4. **Structured errors.** [`CodecError`] names the field, slot, list, or
//!    dialect involved in every failure.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `claimslot-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod field;
pub mod slots;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use error::CodecError;
pub use field::{
    field_modulus, fits_in_field, is_within_field, minimal_le_bytes, to_field_bytes,
    FIELD_MODULUS_DECIMAL, SLOT_WIDTH,
};
pub use slots::{
    to_hex, ClaimLayout, ClaimSlots, SlotBuffer, SlotLabel, SlotList, CLAIM_SLOT_COUNT,
};
pub use value::{FieldValue, NumberEncoding};
