//! # Configuration File
//!
//! The codec configuration is read from a YAML file named by `--config` or
//! the `CLAIMSLOT_CONFIG` environment variable. No file means defaults.

use std::path::Path;

use anyhow::{Context, Result};
use claimslot_codec::CodecConfig;

/// Load the codec configuration from `path`, or the defaults if `None`.
pub fn load_config(path: Option<&Path>) -> Result<CodecConfig> {
    let Some(path) = path else {
        return Ok(CodecConfig::default());
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    if text.trim().is_empty() {
        return Ok(CodecConfig::default());
    }

    let config: CodecConfig = serde_yaml::from_str(&text)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        json_ld_sort_order = ?config.json_ld_sort_order,
        legacy_sort_order = ?config.legacy_sort_order,
        "loaded codec configuration"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimslot_codec::SortOrder;

    #[test]
    fn no_path_gives_defaults() {
        assert_eq!(load_config(None).unwrap(), CodecConfig::default());
    }

    #[test]
    fn reads_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("claimslot.yaml");
        std::fs::write(&path, "legacy_sort_order: descending\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.legacy_sort_order, SortOrder::Descending);
        assert_eq!(config.json_ld_sort_order, SortOrder::Ascending);
    }

    #[test]
    fn empty_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.yaml");
        std::fs::write(&path, "\n").unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), CodecConfig::default());
    }

    #[test]
    fn unknown_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "sort_order: ascending\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse config file"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_config(Some(Path::new("/nonexistent/claimslot.yaml"))).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
