//! # molvox CLI
//!
//! Command-line front end for the molvox parsers. The CLI plays the role of
//! the external loader: it reads the file bytes, builds a
//! [`ByteSource`], and hands it to a parser resolved from the format
//! registry.
//!
//! ## Usage
//!
//! ```bash
//! # Summarize a structure file (format guessed from the extension)
//! molvox info structure.pdb
//!
//! # Parse a gzipped binary grid, forcing the format tag
//! molvox info grid.bin.gz --format dxbin
//!
//! # List registered format tags
//! molvox formats
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;

use molvox::formats::Parser as _;
use molvox::formats::{FormatRegistry, ParsedRecord, ParserParams};
use molvox::streamer::ByteSource;

/// molvox - Molecular Structure and Volumetric Grid Parser
#[derive(Parser)]
#[command(name = "molvox")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a file and print a summary of the resulting record
    Info {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Format tag; guessed from the file extension when omitted
        #[arg(short, long)]
        format: Option<String>,

        /// Emit the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the registered format tags
    Formats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Info { file, format, json } => run_info(file, format, json),
        Commands::Formats => {
            for tag in FormatRegistry::with_builtin_formats().tags() {
                println!("{tag}");
            }
            Ok(())
        }
    }
}

/// Per-record summary printed by `molvox info`.
#[derive(Serialize)]
struct RecordSummary {
    format: String,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    atoms: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    extents: Option<[usize; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    samples: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text_bytes: Option<usize>,
}

fn run_info(file: PathBuf, format: Option<String>, json: bool) -> Result<()> {
    let tag = match format {
        Some(tag) => tag,
        None => guess_format_tag(&file)
            .with_context(|| format!("cannot guess a format tag for {}", file.display()))?,
    };

    let bytes =
        std::fs::read(&file).with_context(|| format!("failed to read {}", file.display()))?;
    info!("read {} bytes from {}", bytes.len(), file.display());

    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let source = ByteSource::from_bytes(name, bytes).with_path(file.display().to_string());

    let registry = FormatRegistry::with_builtin_formats();
    let parser = registry.create(&tag, source, &ParserParams::default())?;
    let record = parser.parse()?;

    let summary = summarize(&tag, &record);
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn summarize(tag: &str, record: &ParsedRecord) -> RecordSummary {
    let mut summary = RecordSummary {
        format: tag.to_string(),
        name: String::new(),
        atoms: None,
        extents: None,
        samples: None,
        text_bytes: None,
    };
    match record {
        ParsedRecord::Text(text) => {
            summary.name = text.name.clone();
            summary.text_bytes = Some(text.data.len());
        }
        ParsedRecord::Structure(structure) => {
            summary.name = structure.name.clone();
            summary.atoms = Some(structure.atoms.len());
        }
        ParsedRecord::Volume(volume) => {
            summary.name = volume.name.clone();
            summary.extents = Some([volume.header.nx, volume.header.ny, volume.header.nz]);
            summary.samples = Some(volume.data.len());
        }
    }
    summary
}

fn print_summary(summary: &RecordSummary) {
    println!("Format: {}", summary.format);
    println!("Name:   {}", summary.name);
    if let Some(atoms) = summary.atoms {
        println!("Atoms:  {atoms}");
    }
    if let Some([nx, ny, nz]) = summary.extents {
        println!("Grid:   {nx} x {ny} x {nz}");
    }
    if let Some(samples) = summary.samples {
        println!("Samples: {samples}");
    }
    if let Some(bytes) = summary.text_bytes {
        println!("Text:   {bytes} bytes");
    }
}

/// Guess a format tag from the file extension, looking through a trailing
/// `.gz` (decompression is handled by the streamer, not here).
fn guess_format_tag(path: &Path) -> Result<String> {
    let mut name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    if let Some(stripped) = name.strip_suffix(".gz") {
        name = stripped.to_string();
    }
    match name.rsplit_once('.').map(|(_, ext)| ext) {
        Some(ext @ ("pdb" | "pqr" | "pdbqt" | "dx" | "dxbin" | "txt")) => {
            Ok(if ext == "txt" { "text".to_string() } else { ext.to_string() })
        }
        _ => bail!("unrecognized extension; pass --format explicitly"),
    }
}
