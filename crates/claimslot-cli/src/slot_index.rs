//! # Slot-Index Subcommand
//!
//! Prints the canonical claim position (2, 3, 6 or 7) of one schema field.

use anyhow::{Context, Result};
use clap::Args;

use claimslot_codec::Codec;
use claimslot_schema::DocumentLoader;

/// Arguments for the `claimslot slot-index` subcommand.
#[derive(Args, Debug)]
pub struct SlotIndexArgs {
    /// Schema identifier: a path or a `file://` URL.
    #[arg(long, value_name = "SCHEMA")]
    pub schema: String,

    /// Credential type to look up in the schema.
    #[arg(long = "type", value_name = "TYPE", default_value = "")]
    pub claim_type: String,

    /// Field name.
    #[arg(value_name = "FIELD")]
    pub field: String,
}

/// Execute the slot-index subcommand.
pub fn run_slot_index(args: &SlotIndexArgs, codec: &Codec, loader: &dyn DocumentLoader) -> Result<u8> {
    let position = resolve(args, codec, loader)?;
    println!("{position}");
    Ok(0)
}

fn resolve(args: &SlotIndexArgs, codec: &Codec, loader: &dyn DocumentLoader) -> Result<u8> {
    let schema = loader
        .load(&args.schema)
        .with_context(|| format!("failed to load schema: {}", args.schema))?;
    codec
        .slot_index_of_loaded(&args.field, &schema, &args.claim_type)
        .with_context(|| format!("failed to resolve slot index of '{}'", args.field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::FsDocumentLoader;
    use claimslot_core::CodecError;

    fn args(schema: &str, field: &str, claim_type: &str) -> SlotIndexArgs {
        SlotIndexArgs {
            schema: schema.into(),
            claim_type: claim_type.into(),
            field: field.into(),
        }
    }

    #[test]
    fn resolves_json_ld_explicit_slot() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("kyc.jsonld"),
            r#"{"@context": [{"KYC": {"@id": "k:KYC", "@context": {
                "documentType": {"@id": "k:documentType", "@type": "serialization:ValueDataSlotB"}
            }}}]}"#,
        )
        .unwrap();

        let loader = FsDocumentLoader::new(dir.path());
        let position = resolve(&args("kyc.jsonld", "documentType", "KYC"), &Codec::default(), &loader)
            .unwrap();
        assert_eq!(position, 7);
    }

    #[test]
    fn json_ld_content_under_json_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("kyc.json"), r#"{"@context": []}"#).unwrap();

        let loader = FsDocumentLoader::new(dir.path());
        let err = resolve(&args("kyc.json", "x", "KYC"), &Codec::default(), &loader).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CodecError>(),
            Some(CodecError::SchemaParse { .. })
        ));
    }

    #[test]
    fn unknown_field() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("s.json"),
            r#"{"properties": {"index": {"default": ["a"]}, "value": {"default": []}}}"#,
        )
        .unwrap();

        let loader = FsDocumentLoader::new(dir.path());
        let err = run_slot_index(&args("s.json", "b", ""), &Codec::default(), &loader).unwrap_err();
        assert!(format!("{err:#}").contains("field 'b' not found in schema"));
    }
}
