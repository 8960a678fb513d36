//! Offline helper that runs the risk formatter over raw model output.
//!
//! Useful for checking how a saved completion would be rendered by `/api/analyze` without
//! calling the provider. Reads a file (or stdin when no path is given) and prints the JSON
//! entries.
use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use clearclause::risks::format_risks;

#[derive(Parser)]
#[command(
    name = "format-risks",
    about = "Parse a raw `Term: Explanation` risk listing into JSON entries"
)]
struct Cli {
    /// File holding the raw model reply; stdin is read when omitted.
    input: Option<PathBuf>,
    /// Emit compact JSON instead of pretty-printed output.
    #[arg(long)]
    compact: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let raw = match &cli.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read risk listing at {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read risk listing from stdin")?;
            buffer
        }
    };

    let entries = format_risks(&raw);
    let rendered = if cli.compact {
        serde_json::to_string(&entries)
    } else {
        serde_json::to_string_pretty(&entries)
    }
    .context("failed to serialize risk entries")?;
    println!("{rendered}");
    Ok(())
}
