//! CLI binary for the PDF image extractor.
//!
//! Takes no arguments: sweeps the current working directory for `*.pdf`
//! files and writes each document's colour-inverted images into a folder
//! named after it. Per-image progress comes from the library's tracing
//! output; this shim only prints the per-document result lines.

use anyhow::{Context, Result};
use imgsift::{extract_directory, ExtractConfig};
use std::io;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cwd = std::env::current_dir().context("Failed to resolve the current directory")?;

    let config = ExtractConfig::default();
    let results = extract_directory(&cwd, &config)
        .await
        .context("Extraction failed")?;

    if results.is_empty() {
        println!("No PDF files found in the current directory");
        return Ok(());
    }

    let mut total = 0;
    for result in &results {
        let name = result
            .pdf
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| result.pdf.display().to_string());

        match &result.error {
            None => {
                total += result.images;
                println!(
                    "{} {}  {} images extracted",
                    green("✓"),
                    bold(&name),
                    result.images
                );
            }
            Some(e) => {
                println!("{} {}  {}", red("✗"), bold(&name), red(&e.to_string()));
            }
        }
    }

    let failed = results.iter().filter(|r| r.error.is_some()).count();
    if failed == 0 {
        eprintln!(
            "{} {} images extracted from {} PDFs",
            green("✔"),
            bold(&total.to_string()),
            results.len()
        );
    } else {
        eprintln!(
            "{} {} images extracted  ({}/{} PDFs failed)",
            cyan("⚠"),
            bold(&total.to_string()),
            failed,
            results.len()
        );
    }

    Ok(())
}
