//! # claimslot CLI entry point
//!
//! Parses command-line arguments, installs the tracing subscriber, loads the
//! codec configuration, and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use claimslot_cli::config::load_config;
use claimslot_cli::loader::FsDocumentLoader;
use claimslot_cli::pack::{run_pack, PackArgs};
use claimslot_cli::slot_index::{run_slot_index, SlotIndexArgs};
use claimslot_codec::Codec;

/// Claim slot codec
///
/// Packs credential payloads into the index and value slots of a
/// zero-knowledge identity claim, and resolves the claim position of schema
/// fields.
#[derive(Parser, Debug)]
#[command(name = "claimslot", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML codec configuration file.
    #[arg(long, global = true, env = "CLAIMSLOT_CONFIG")]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pack a payload into claim slots.
    Pack(PackArgs),

    /// Print the claim position of a schema field.
    SlotIndex(SlotIndexArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // Logs go to stderr; stdout carries the command output.
    if cli.log_json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "claimslot CLI starting");

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(2);
        }
    };
    let codec = Codec::new(config);

    let base_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let loader = FsDocumentLoader::new(base_dir);

    let result = match cli.command {
        Commands::Pack(args) => run_pack(&args, &codec, &loader),
        Commands::SlotIndex(args) => run_slot_index(&args, &codec, &loader),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
