//! # Codec Configuration
//!
//! The only tunable behaviour of the codec is the field order used by the
//! Sequential-Fill strategy and by generic slot-index resolution. Two orders
//! exist historically. Ascending byte-wise order is the current one for both
//! dialects; descending order is kept only to reproduce claims packed by older
//! issuers and is logged as deprecated whenever it is used.
//!
//! The config is plain serde data, loaded by the CLI from YAML:
//!
//! ```yaml
//! json_ld_sort_order: ascending
//! legacy_sort_order: descending
//! ```

use claimslot_core::NumberEncoding;
use claimslot_schema::SchemaDialect;
use serde::{Deserialize, Serialize};

/// Order of field names within the index and value lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Byte-wise ascending.
    #[default]
    Ascending,
    /// Byte-wise descending. Deprecated; compatibility with old claims only.
    Descending,
}

impl SortOrder {
    /// Sort `fields` in place.
    pub fn apply(self, fields: &mut [String]) {
        match self {
            SortOrder::Ascending => fields.sort_unstable(),
            SortOrder::Descending => fields.sort_unstable_by(|a, b| b.cmp(a)),
        }
    }
}

/// Codec configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Sort order for JSON-LD context schemas.
    pub json_ld_sort_order: SortOrder,
    /// Sort order for legacy plain JSON schemas.
    pub legacy_sort_order: SortOrder,
}

impl CodecConfig {
    /// Sort order in force for `dialect`.
    pub fn sort_order_for(&self, dialect: SchemaDialect) -> SortOrder {
        let order = match dialect {
            SchemaDialect::LegacyJsonSchema => self.legacy_sort_order,
            SchemaDialect::JsonLdContext | SchemaDialect::AnnotatedJsonSchema => {
                self.json_ld_sort_order
            }
        };
        if order == SortOrder::Descending {
            tracing::warn!(%dialect, "descending field order is deprecated");
        }
        order
    }
}

/// How JSON numbers in the payload are narrowed for `dialect`.
///
/// The legacy dialect reads numbers as fixed-width 32-bit values; every other
/// dialect uses the minimal little-endian encoding.
pub fn number_encoding_for(dialect: SchemaDialect) -> NumberEncoding {
    match dialect {
        SchemaDialect::LegacyJsonSchema => NumberEncoding::LegacyUint32,
        SchemaDialect::JsonLdContext | SchemaDialect::AnnotatedJsonSchema => {
            NumberEncoding::Minimal
        }
    }
}
