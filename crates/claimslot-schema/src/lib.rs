//! # claimslot-schema — Schema Metadata Resolution
//!
//! Normalizes heterogeneous credential schemas into serialization directives:
//! which slot, if any, each payload field belongs to.
//!
//! ## Dialects
//!
//! - [`jsonld`] — JSON-LD `@context` with `serialization:*` field types.
//! - [`json_schema`] — legacy `index`/`value` default lists, and the
//!   `$metadata.serialization` block of newer schemas.
//! - [`merklized`] — the `iden3:v1:` attribute binding slots to document
//!   paths for merklized credentials.
//!
//! [`SchemaMetadata::parse`] sniffs the dialect and dispatches; the result is
//! an immutable value discarded after one packing call. No cache lives here;
//! caching belongs to the [`DocumentLoader`] implementation.
//!
//! ## Crate Policy
//!
//! - Depends only on `claimslot-core` internally.
//! - Every schema defect is a [`CodecError`](claimslot_core::CodecError)
//!   naming the dialect and the offending key.

pub mod dialect;
pub mod directive;
pub mod json_schema;
pub mod jsonld;
pub mod loader;
pub mod merklized;

pub use dialect::{ParseOptions, PlainJsonReading, SchemaDialect, SchemaMetadata};
pub use directive::{DirectiveMap, SerializationDirective, SlotBindings};
pub use json_schema::{AnnotatedJsonSchema, LegacyJsonSchema, SchemaUris};
pub use jsonld::{JsonLdReading, JsonLdSchema};
pub use loader::{DocumentFormat, DocumentLoader, LoadedDocument, LoaderError};
pub use merklized::{
    parse_serialization_attr, DocumentPath, SlotPaths, SERIALIZATION_ATTR_KEY,
    SERIALIZATION_ATTR_PREFIX,
};
