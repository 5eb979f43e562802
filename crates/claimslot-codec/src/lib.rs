//! # claimslot-codec — Claim Slot Assembly
//!
//! Packs credential payloads into the four slots of a zero-knowledge identity
//! claim (`index_a`, `index_b`, `value_a`, `value_b`) and answers which claim
//! position a field occupies.
//!
//! ## Strategies
//!
//! - [`Strategy::SequentialFill`] — generic `Index`/`Value` fields, sorted
//!   (or positioned by the payload), packed back to back into slot A until it
//!   would reach `q`, then into slot B.
//! - [`Strategy::OneFieldPerSlot`] — each slot holds exactly the field the
//!   schema binds to it.
//! - [`Codec::pack_merklized`] — slots bound to document paths, values
//!   resolved through a caller-supplied [`Merklizer`].
//!
//! ## Security Invariant
//!
//! Every returned slot reads, little-endian, as an integer strictly below the
//! BN254 scalar-field modulus. All failures abort the call; there is no
//! partial output.
//!
//! ## Crate Policy
//!
//! - Pure and synchronous: no I/O, no shared mutable state.
//! - Schema retrieval and merklization are boundary traits implemented by
//!   callers.

pub mod codec;
pub mod config;
mod explicit;
pub mod merklize;
mod payload;
mod sequential;
mod slot_index;

// Re-export primary types for ergonomic imports.
pub use codec::{pack, slot_index_of, Codec, Strategy};
pub use config::{number_encoding_for, CodecConfig, SortOrder};
pub use merklize::Merklizer;
