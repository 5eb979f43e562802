//! # Document Loader Boundary
//!
//! Schema retrieval (HTTP, IPFS, local files, caches) lives outside the
//! codec. The codec only needs resolved bytes plus an optional format hint,
//! and requires that the bytes for one identifier do not change during a
//! packing call.

use thiserror::Error;

/// Format hint reported by a loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    /// A JSON-LD context document.
    JsonLd,
    /// A plain JSON Schema document.
    JsonSchema,
    /// The loader cannot tell; the codec sniffs the content.
    #[default]
    Unknown,
}

impl DocumentFormat {
    /// Guess the format from a file name or URL suffix.
    pub fn from_identifier(identifier: &str) -> Self {
        let lower = identifier.to_ascii_lowercase();
        if lower.ends_with(".jsonld") || lower.ends_with(".json-ld") {
            DocumentFormat::JsonLd
        } else if lower.ends_with(".json") {
            DocumentFormat::JsonSchema
        } else {
            DocumentFormat::Unknown
        }
    }
}

/// A loaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDocument {
    /// Raw document bytes.
    pub bytes: Vec<u8>,
    /// Format hint.
    pub format: DocumentFormat,
}

/// Error from a document loader.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// No document exists for the identifier.
    #[error("document not found: {0}")]
    NotFound(String),

    /// The identifier is not one this loader can resolve.
    #[error("unsupported identifier '{identifier}': {reason}")]
    UnsupportedIdentifier {
        /// The identifier as given.
        identifier: String,
        /// Why the loader refused it.
        reason: String,
    },

    /// I/O error while reading the document.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Resolves document identifiers to bytes.
pub trait DocumentLoader: Send + Sync {
    /// Load the document named by `identifier`.
    fn load(&self, identifier: &str) -> Result<LoadedDocument, LoaderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_identifier() {
        assert_eq!(
            DocumentFormat::from_identifier("kyc-v3.json-ld"),
            DocumentFormat::JsonLd
        );
        assert_eq!(
            DocumentFormat::from_identifier("schemas/KYC.JSONLD"),
            DocumentFormat::JsonLd
        );
        assert_eq!(
            DocumentFormat::from_identifier("kyc-v3.json"),
            DocumentFormat::JsonSchema
        );
        assert_eq!(
            DocumentFormat::from_identifier("ipfs://QmHash"),
            DocumentFormat::Unknown
        );
    }

    #[test]
    fn loader_error_display() {
        let err = LoaderError::UnsupportedIdentifier {
            identifier: "ipfs://x".into(),
            reason: "no IPFS gateway configured".into(),
        };
        assert!(format!("{err}").contains("no IPFS gateway"));
    }
}
