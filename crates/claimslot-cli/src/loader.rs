//! # Filesystem Document Loader
//!
//! Resolves schema identifiers to files on disk. Relative identifiers are
//! resolved against a base directory, `file://` identifiers are accepted, and
//! any other URL scheme is refused. The format hint comes from the file
//! extension.

use std::path::{Path, PathBuf};

use claimslot_schema::{DocumentFormat, DocumentLoader, LoadedDocument, LoaderError};

/// Loads schema documents from the local filesystem.
#[derive(Debug, Clone)]
pub struct FsDocumentLoader {
    base_dir: PathBuf,
}

impl FsDocumentLoader {
    /// A loader resolving relative identifiers against `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Map an identifier to a filesystem path.
    fn resolve(&self, identifier: &str) -> Result<PathBuf, LoaderError> {
        let raw = match identifier.split_once("://") {
            Some(("file", rest)) => rest,
            Some((scheme, _)) => {
                return Err(LoaderError::UnsupportedIdentifier {
                    identifier: identifier.to_string(),
                    reason: format!("scheme '{scheme}' requires a network loader"),
                })
            }
            None => identifier,
        };
        let path = Path::new(raw);
        Ok(if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        })
    }
}

impl DocumentLoader for FsDocumentLoader {
    fn load(&self, identifier: &str) -> Result<LoadedDocument, LoaderError> {
        let path = self.resolve(identifier)?;
        if !path.is_file() {
            return Err(LoaderError::NotFound(path.display().to_string()));
        }
        let bytes = std::fs::read(&path)?;
        let format = DocumentFormat::from_identifier(identifier);
        tracing::debug!(path = %path.display(), ?format, size = bytes.len(), "loaded schema document");
        Ok(LoadedDocument { bytes, format })
    }
}
