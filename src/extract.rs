//! PDF image extraction: the extractor pipeline's entry points.
//!
//! [`extract_document`] handles one PDF: pull its embedded images, invert
//! their colours, and write them into a folder named after the document.
//! [`extract_directory`] sweeps every `*.pdf` in one directory, handling each
//! document independently — a document that fails to open is recorded and
//! the sweep moves on, mirroring the classifier's partial-failure contract.

use crate::config::ExtractConfig;
use crate::error::SiftError;
use crate::pipeline::pdf::{EmbeddedImage, EmbeddedImageSource, PdfiumSource};
use crate::pipeline::{invert, scan, write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Outcome of one document inside a directory sweep.
///
/// Partial success is data, not an abort: a failed document carries its
/// error here while the rest of the sweep continues.
#[derive(Debug)]
pub struct DocumentResult {
    /// Source PDF path.
    pub pdf: PathBuf,
    /// Number of images written for this document.
    pub images: usize,
    /// Set when the document as a whole failed (could not be opened).
    pub error: Option<SiftError>,
}

/// Extract, invert, and save every embedded image of one PDF.
///
/// Returns the number of images written. Per-image decode or write failures
/// are logged and skipped; only a document that cannot be opened (or an
/// output folder that cannot be created) fails the call.
pub async fn extract_document(
    pdf_path: impl AsRef<Path>,
    config: &ExtractConfig,
) -> Result<usize, SiftError> {
    let pdf_path = pdf_path.as_ref();
    let source = resolve_source(config);

    // pdfium is not async-safe; extraction runs on the blocking pool.
    let path = pdf_path.to_path_buf();
    let images = tokio::task::spawn_blocking(move || source.document_images(&path))
        .await
        .map_err(|e| SiftError::Internal(format!("extraction task panicked: {e}")))??;

    let out_dir = write::document_output_dir(pdf_path, config.output_root.as_deref())?;

    let mut written = 0;
    for EmbeddedImage {
        page,
        index,
        image,
        kind,
    } in images
    {
        let inverted = invert::invert_colors(image);
        match write::save_image(&out_dir, page, index, kind, &inverted, config.quality()) {
            Ok(saved) => {
                info!("Saved image: {}", saved.display());
                written += 1;
            }
            Err(e) => {
                warn!("Error writing page {page} image {index}: {e}");
            }
        }
    }

    Ok(written)
}

/// Extract images from every `*.pdf` directly inside `dir`.
///
/// Documents are processed independently and in enumeration order; the
/// returned rows preserve that order and record per-document counts and
/// failures.
pub async fn extract_directory(
    dir: impl AsRef<Path>,
    config: &ExtractConfig,
) -> Result<Vec<DocumentResult>, SiftError> {
    let dir = dir.as_ref();
    let pdfs = scan::pdf_files(dir)?;

    if pdfs.is_empty() {
        info!("No PDF files found in {}", dir.display());
        return Ok(Vec::new());
    }

    let mut results = Vec::with_capacity(pdfs.len());

    for pdf in pdfs {
        info!("Processing: {}", pdf.display());
        match extract_document(&pdf, config).await {
            Ok(images) => {
                info!("Extracted {} images from {}", images, pdf.display());
                results.push(DocumentResult {
                    pdf,
                    images,
                    error: None,
                });
            }
            Err(e) => {
                warn!("Error processing {}: {e}", pdf.display());
                results.push(DocumentResult {
                    pdf,
                    images: 0,
                    error: Some(e),
                });
            }
        }
    }

    Ok(results)
}

/// Injected source wins; otherwise use the real pdfium engine.
fn resolve_source(config: &ExtractConfig) -> Arc<dyn EmbeddedImageSource> {
    config
        .source
        .clone()
        .unwrap_or_else(|| Arc::new(PdfiumSource))
}
