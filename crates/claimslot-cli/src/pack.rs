//! # Pack Subcommand
//!
//! Packs a payload file into claim slots and prints them as JSON, one
//! lowercase little-endian hex string per slot:
//!
//! ```bash
//! claimslot pack --schema kyc-v2.json --payload subject.json
//! claimslot pack --schema kyc-v4.jsonld --type KYCAgeCredential \
//!     --strategy one-field-per-slot --payload subject.json --layout
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;

use claimslot_codec::{Codec, Strategy};
use claimslot_core::{to_hex, ClaimLayout, ClaimSlots};
use claimslot_schema::DocumentLoader;

/// Arguments for the `claimslot pack` subcommand.
#[derive(Args, Debug)]
pub struct PackArgs {
    /// Schema identifier: a path (relative to the working directory) or a
    /// `file://` URL.
    #[arg(long, value_name = "SCHEMA")]
    pub schema: String,

    /// Path to the credential payload JSON.
    #[arg(long, value_name = "FILE")]
    pub payload: PathBuf,

    /// Credential type to look up in the schema.
    #[arg(long = "type", value_name = "TYPE", default_value = "")]
    pub claim_type: String,

    /// Packing strategy.
    #[arg(long, value_enum, default_value_t = StrategyArg::SequentialFill)]
    pub strategy: StrategyArg,

    /// Also print the eight zero-padded 32-byte claim slots.
    #[arg(long)]
    pub layout: bool,
}

/// Command-line spelling of [`Strategy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Pack generic fields back to back.
    SequentialFill,
    /// One explicitly bound field per slot.
    OneFieldPerSlot,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::SequentialFill => Strategy::SequentialFill,
            StrategyArg::OneFieldPerSlot => Strategy::OneFieldPerSlot,
        }
    }
}

/// JSON output of `claimslot pack`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PackOutput {
    pub index_a: String,
    pub index_b: String,
    pub value_a: String,
    pub value_b: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Vec<String>>,
}

impl PackOutput {
    fn new(slots: &ClaimSlots, with_layout: bool) -> Self {
        let layout = with_layout.then(|| {
            ClaimLayout::from_slots(slots)
                .slots()
                .iter()
                .map(|s| to_hex(s))
                .collect()
        });
        Self {
            index_a: slots.index_a().to_hex(),
            index_b: slots.index_b().to_hex(),
            value_a: slots.value_a().to_hex(),
            value_b: slots.value_b().to_hex(),
            layout,
        }
    }
}

/// Execute the pack subcommand.
///
/// Returns exit code 0 on success; codec failures are errors.
pub fn run_pack(args: &PackArgs, codec: &Codec, loader: &dyn DocumentLoader) -> Result<u8> {
    let output = pack_to_output(args, codec, loader)?;
    let rendered = serde_json::to_string_pretty(&output).context("failed to render output")?;
    println!("{rendered}");
    Ok(0)
}

fn pack_to_output(args: &PackArgs, codec: &Codec, loader: &dyn DocumentLoader) -> Result<PackOutput> {
    let schema = loader
        .load(&args.schema)
        .with_context(|| format!("failed to load schema: {}", args.schema))?;
    let payload = std::fs::read(&args.payload)
        .with_context(|| format!("failed to read payload: {}", args.payload.display()))?;

    let strategy = Strategy::from(args.strategy);
    let slots = codec
        .pack_loaded(&payload, &schema, strategy, &args.claim_type)
        .with_context(|| format!("failed to pack {} with {strategy}", args.payload.display()))?;

    tracing::info!(
        %strategy,
        index_a = slots.index_a().len(),
        index_b = slots.index_b().len(),
        value_a = slots.value_a().len(),
        value_b = slots.value_b().len(),
        "packed claim slots"
    );
    Ok(PackOutput::new(&slots, args.layout))
}
