//! contentcore: dynamic content document tool
//!
//! Decodes content documents against a catalog of content types and
//! prints them back in canonical form.
//!
//! Usage:
//!   contentcore --catalog catalog.toml normalize item.json
//!   contentcore --catalog catalog.toml --portal 0 template 1

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use contentcore_cli::{Catalog, inspect, list_types, normalize, template};
use contentcore_types::{ContentTypeId, PortalId};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "contentcore")]
#[command(about = "Decode, normalize and inspect dynamic content documents")]
struct Args {
    /// Path to the content type catalog (TOML)
    #[arg(short, long)]
    catalog: PathBuf,

    /// Portal whose content types are visible (-1 for host only)
    #[arg(short, long, default_value = "-1", allow_negative_numbers = true)]
    portal: PortalId,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a document and print it re-encoded
    Normalize {
        /// Document file; reads stdin when omitted
        file: Option<PathBuf>,
    },
    /// Decode a document and print one line per field
    Inspect {
        /// Document file; reads stdin when omitted
        file: Option<PathBuf>,
    },
    /// Print an empty document for a content type
    Template {
        content_type_id: ContentTypeId,
    },
    /// List the content types visible to the portal
    Types,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::WARN };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let registry = Catalog::load(&args.catalog)
        .with_context(|| format!("failed to load catalog {}", args.catalog.display()))?
        .into_registry()
        .context("invalid catalog")?;
    debug!(content_types = registry.len(), portal_id = %args.portal, "Catalog ready");

    let output = match args.command {
        Command::Normalize { file } => {
            normalize(Arc::new(registry), args.portal, &read_input(file.as_deref())?)?
        }
        Command::Inspect { file } => {
            inspect(Arc::new(registry), args.portal, &read_input(file.as_deref())?)?
        }
        Command::Template { content_type_id } => template(&registry, args.portal, content_type_id)?,
        Command::Types => list_types(&registry, args.portal)?,
    };

    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}
