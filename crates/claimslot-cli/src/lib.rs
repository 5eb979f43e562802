//! # claimslot-cli — Command-Line Front End for the Claim Slot Codec
//!
//! Provides the `claimslot` binary over schema and payload files on disk.
//!
//! ## Subcommands
//!
//! - `claimslot pack` — pack a payload into the four claim slots.
//! - `claimslot slot-index` — print the claim position of one field.
//!
//! ```bash
//! claimslot pack --schema schemas/kyc-v2.json --payload subject.json
//! claimslot slot-index --schema schemas/kyc-v4.jsonld --type KYCAgeCredential birthday
//! claimslot --config claimslot.yaml -vv pack --schema legacy.json --payload subject.json
//! ```
//!
//! Schemas are resolved by [`loader::FsDocumentLoader`]; the codec
//! configuration comes from [`config::load_config`].

pub mod config;
pub mod loader;
pub mod pack;
pub mod slot_index;
