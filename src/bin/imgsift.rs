//! CLI binary for the meaningful-image classifier.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ClassifyConfig`, drives a progress bar, and prints the summary.

use anyhow::{Context, Result};
use clap::Parser;
use imgsift::{sort_folder, ClassifyConfig, Progress, SortProgress, SortSummary};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar anchored at the bottom, one glyph
/// line per classified file printed above it.
struct CliSortProgress {
    bar: ProgressBar,
    errors: AtomicUsize,
}

impl CliSortProgress {
    /// Create a callback whose progress-bar length is set by `on_start`
    /// once the folder has been enumerated.
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_start

        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Listing images…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            errors: AtomicUsize::new(0),
        })
    }

    /// Switch to the full progress-bar style once we know `total`.
    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} images  ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Classifying");
    }
}

impl SortProgress for CliSortProgress {
    fn on_start(&self, total_files: usize) {
        self.activate_bar(total_files);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Classifying {total_files} images…"))
        ));
    }

    fn on_file_start(&self, name: &str) {
        self.bar.set_message(name.to_string());
    }

    fn on_file_classified(&self, name: &str, meaningful: bool) {
        if meaningful {
            self.bar
                .println(format!("  {} {}  {}", green("✓"), name, dim("meaningful")));
        } else {
            self.bar
                .println(format!("  {} {}  {}", dim("✗"), name, dim("discarded")));
        }
        self.bar.inc(1);
    }

    fn on_file_error(&self, name: &str, error: &str) {
        self.errors.fetch_add(1, Ordering::SeqCst);

        // Truncate very long error messages to keep output tidy.
        let msg = if error.len() > 80 {
            format!("{}\u{2026}", &error[..79])
        } else {
            error.to_string()
        };

        self.bar
            .println(format!("  {} {}  {}", red("✗"), name, red(&msg)));
        self.bar.inc(1);
    }

    fn on_complete(&self, summary: &SortSummary) {
        self.bar.finish_and_clear();

        let errors = self.errors.load(Ordering::SeqCst);
        if errors == 0 {
            eprintln!(
                "{} {} of {} images kept",
                green("✔"),
                bold(&summary.meaningful.to_string()),
                summary.processed,
            );
        } else {
            eprintln!(
                "{} {} of {} images kept  ({} errored)",
                cyan("⚠"),
                bold(&summary.meaningful.to_string()),
                summary.processed,
                red(&errors.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Sort a folder; meaningful images land in imagenes_significativas/
  imgsift ./fotos

  # Custom output folder
  imgsift ./fotos -o significant

  # Explicit credential (otherwise read from SAMBANOVA_API_KEY)
  imgsift --api-key sk-… ./fotos

CLASSIFICATION:
  Each image is sent to the vision model with a fixed prompt that demands a
  one-word SI/NO answer. Only an exact "SI" keeps the image; any other
  answer — or any API failure — discards it. Files whose extension is not
  one of jpg/jpeg/png/bmp/gif are never read.

ENVIRONMENT VARIABLES:
  SAMBANOVA_API_KEY   Credential for the vision endpoint
"#;

/// Sort images by semantic content using a vision LLM.
#[derive(Parser, Debug)]
#[command(
    name = "imgsift",
    version,
    about = "Sort images by semantic content using a vision LLM",
    long_about = "Classify every image in a folder with a vision language model and copy the \
ones containing meaningful content (objects, people, landscapes) into an output folder. \
Abstract or purely geometric images are left behind.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Folder containing the images to classify.
    input_folder: PathBuf,

    /// Folder that meaningful images are copied into.
    #[arg(short, long, default_value = imgsift::DEFAULT_OUTPUT_DIR)]
    output_folder: PathBuf,

    /// Credential for the vision endpoint.
    #[arg(long, env = "SAMBANOVA_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Vision model identifier.
    #[arg(long, default_value = imgsift::DEFAULT_MODEL)]
    model: String,

    /// Base URL of the OpenAI-compatible endpoint.
    #[arg(long, default_value = imgsift::DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-image API call timeout in seconds.
    #[arg(long, default_value_t = 60)]
    api_timeout: u64,

    /// Disable the progress bar.
    #[arg(long)]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors and the final summary.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active;
    // the bar's glyph lines carry the same per-file information.
    let show_progress = !cli.quiet && !cli.no_progress;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let progress: Option<Progress> = if show_progress {
        Some(CliSortProgress::new_dynamic() as Progress)
    } else {
        None
    };

    let mut builder = ClassifyConfig::builder()
        .output_dir(&cli.output_folder)
        .api_key(cli.api_key.clone().unwrap_or_default())
        .model(&cli.model)
        .base_url(&cli.base_url)
        .api_timeout_secs(cli.api_timeout);

    if let Some(cb) = progress {
        builder = builder.progress(cb);
    }

    let config = builder.build().context("Invalid configuration")?;

    // ── Run ──────────────────────────────────────────────────────────────
    let summary = sort_folder(&cli.input_folder, &config)
        .await
        .context("Classification failed")?;

    println!("\nProcessing summary:");
    println!("  processed:  {}", summary.processed);
    println!("  meaningful: {}", summary.meaningful);
    println!("  discarded:  {}", summary.discarded());

    Ok(())
}
