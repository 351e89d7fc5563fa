//! Meaningful-image sorting: the classification pipeline's entry point.
//!
//! One pass over one folder: enumerate allow-listed images, encode each,
//! ask the vision model for its verdict, and copy the meaningful ones into
//! the output folder. Strictly sequential — one file is fully handled before
//! the next starts, and the only suspension point is the model call itself.
//!
//! Per-file failures are logged and skipped; only a bad batch setup (missing
//! input folder, no credential) aborts the run.

use crate::config::ClassifyConfig;
use crate::error::{ItemError, SiftError};
use crate::pipeline::vision::MeaningModel;
use crate::pipeline::{encode, scan, vision};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Counters accumulated across one sorting run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SortSummary {
    /// Files picked up by the allow-list and attempted.
    pub processed: usize,
    /// Files the model affirmed and the pipeline copied.
    pub meaningful: usize,
}

impl SortSummary {
    /// Files attempted but not copied — negative verdicts and per-file
    /// failures alike.
    pub fn discarded(&self) -> usize {
        self.processed - self.meaningful
    }
}

/// Sort every allow-listed image in `input_dir` by semantic content.
///
/// Meaningful images are copied (same filename) into the configured output
/// folder, which is created if missing. Returns the final counters.
///
/// # Errors
/// Fatal only for batch setup: an invalid input folder, an output folder
/// that cannot be created, or an endpoint that cannot be constructed.
/// A fully failing model never aborts the run — every verdict just comes
/// back "not meaningful".
pub async fn sort_folder(
    input_dir: impl AsRef<Path>,
    config: &ClassifyConfig,
) -> Result<SortSummary, SiftError> {
    let input_dir = input_dir.as_ref();
    let start = Instant::now();
    info!("Sorting images in {}", input_dir.display());

    // ── Step 1: Enumerate (validates the input folder) ───────────────────
    let files = scan::image_files(input_dir)?;

    // ── Step 2: Resolve the model ────────────────────────────────────────
    let model = resolve_model(config)?;

    // ── Step 3: Ensure the output folder exists ──────────────────────────
    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .map_err(|source| SiftError::OutputDirFailed {
            path: config.output_dir.clone(),
            source,
        })?;

    if let Some(ref progress) = config.progress {
        progress.on_start(files.len());
    }

    // ── Step 4: Encode → classify → copy, one file at a time ─────────────
    let mut summary = SortSummary::default();

    for path in &files {
        let name = display_name(path);
        if let Some(ref progress) = config.progress {
            progress.on_file_start(&name);
        }
        summary.processed += 1;

        match sort_one(path, model.as_ref(), config).await {
            Ok(meaningful) => {
                if meaningful {
                    summary.meaningful += 1;
                    info!("Meaningful image: {name}");
                } else {
                    info!("Discarded (no meaningful content): {name}");
                }
                if let Some(ref progress) = config.progress {
                    progress.on_file_classified(&name, meaningful);
                }
            }
            Err(e) => {
                warn!("Error processing {name}: {e}");
                if let Some(ref progress) = config.progress {
                    progress.on_file_error(&name, &e.to_string());
                }
            }
        }
    }

    info!(
        "Sorted {}: {} processed, {} meaningful, {} discarded in {:?}",
        input_dir.display(),
        summary.processed,
        summary.meaningful,
        summary.discarded(),
        start.elapsed()
    );

    if let Some(ref progress) = config.progress {
        progress.on_complete(&summary);
    }

    Ok(summary)
}

/// Handle one file: encode, classify, conditionally copy.
///
/// Returns whether the file was copied. A model failure is not an error
/// here — [`vision::is_meaningful`] already degraded it to `false`.
async fn sort_one(
    path: &Path,
    model: &dyn MeaningModel,
    config: &ClassifyConfig,
) -> Result<bool, ItemError> {
    let image_base64 = encode::encode_image(path)?;

    if !vision::is_meaningful(model, &image_base64).await {
        return Ok(false);
    }

    let target = config.output_dir.join(path.file_name().unwrap_or_default());
    tokio::fs::copy(path, &target)
        .await
        .map_err(|source| ItemError::CopyFailed {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(true)
}

/// Injected classifier wins; otherwise build the real endpoint client.
fn resolve_model(config: &ClassifyConfig) -> Result<Arc<dyn MeaningModel>, SiftError> {
    if let Some(ref model) = config.classifier {
        return Ok(Arc::clone(model));
    }
    Ok(Arc::new(vision::VisionEndpoint::from_config(config)?))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discarded_is_the_difference() {
        let summary = SortSummary {
            processed: 5,
            meaningful: 2,
        };
        assert_eq!(summary.discarded(), 3);
        assert_eq!(SortSummary::default().discarded(), 0);
    }
}
