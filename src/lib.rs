//! # imgsift
//!
//! Two small batch utilities for image triage, as a library with thin CLIs:
//!
//! * **Sort images by semantic content.** Every image in a folder is sent to
//!   a vision language model with a fixed one-question prompt; images the
//!   model affirms contain meaningful content (objects, people, landscapes)
//!   are copied into an output folder, abstract/geometric ones are left
//!   behind. See [`sort_folder`].
//!
//! * **Extract and invert PDF images.** Every embedded raster image of a PDF
//!   is pulled out, colour-inverted (alpha preserved), and written into a
//!   folder named after the document with deterministic
//!   `imagen_pagina{page}_{index}.{ext}` filenames. See [`extract_document`]
//!   and [`extract_directory`].
//!
//! ## Pipeline Overview
//!
//! ```text
//! Classifier (imgsift):          Extractor (pdf-images):
//!  folder                          cwd
//!   ├─ 1. Scan    allow-listed      ├─ 1. Scan    *.pdf, shallow
//!   │            extensions         ├─ 2. Extract embedded images (pdfium,
//!   ├─ 2. Encode  bytes → base64    │             spawn_blocking)
//!   ├─ 3. Ask     one chat call,    ├─ 3. Invert  RGB complement, alpha
//!   │            "SI" or "NO"       │             untouched
//!   └─ 4. Copy    meaningful only   └─ 4. Write   imagen_pagina{p}_{i}.{ext}
//! ```
//!
//! Both pipelines are strictly sequential, one file at a time, and both
//! isolate per-item failures: a bad file is logged and skipped, never fatal.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use imgsift::{sort_folder, ClassifyConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClassifyConfig::builder()
//!         .api_key(std::env::var("SAMBANOVA_API_KEY")?)
//!         .build()?;
//!     let summary = sort_folder("./fotos", &config).await?;
//!     println!(
//!         "{} processed, {} meaningful, {} discarded",
//!         summary.processed,
//!         summary.meaningful,
//!         summary.discarded()
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `imgsift` and `pdf-images` binaries (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! imgsift = { version = "0.1", default-features = false }
//! ```
//!
//! ## Test doubles
//!
//! The two external engines sit behind single-capability traits —
//! [`MeaningModel`] for the remote vision model and [`EmbeddedImageSource`]
//! for the PDF backend — and both configs accept injected implementations,
//! so the full decision logic runs in tests with no network and no PDF
//! fixtures.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod classify;
pub mod config;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod progress;
pub mod prompts;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use classify::{sort_folder, SortSummary};
pub use config::{
    ClassifyConfig, ClassifyConfigBuilder, ExtractConfig, ExtractConfigBuilder, DEFAULT_BASE_URL,
    DEFAULT_MODEL, DEFAULT_OUTPUT_DIR,
};
pub use error::{ItemError, SiftError};
pub use extract::{extract_directory, extract_document, DocumentResult};
pub use pipeline::pdf::{EmbeddedImage, EmbeddedImageSource, EmbeddedKind, PdfiumSource};
pub use pipeline::vision::{is_affirmative, is_meaningful, MeaningModel, VisionEndpoint};
pub use progress::{Progress, SortProgress};
