//! Image writing: per-document folders and deterministic filenames.
//!
//! Every extracted image lands in a folder named after its source PDF's file
//! stem, as `imagen_pagina{page}_{index}.{ext}` with both indices 1-based.
//! The name is a pure function of (page, index, kind), so reruns overwrite
//! rather than accumulate.

use crate::error::{ItemError, SiftError};
use crate::pipeline::pdf::EmbeddedKind;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolve (and create) the output folder for one document.
///
/// Named after the PDF's file stem; placed under `output_root` when given,
/// otherwise next to the source PDF. Creation is idempotent — images from
/// the same document reuse the folder.
pub fn document_output_dir(
    pdf_path: &Path,
    output_root: Option<&Path>,
) -> Result<PathBuf, SiftError> {
    let stem = pdf_path
        .file_stem()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| SiftError::NoFileStem {
            path: pdf_path.to_path_buf(),
        })?;

    let dir = match output_root {
        Some(root) => root.join(stem),
        None => match pdf_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.join(stem),
            _ => PathBuf::from(stem),
        },
    };

    std::fs::create_dir_all(&dir).map_err(|source| SiftError::OutputDirFailed {
        path: dir.clone(),
        source,
    })?;

    Ok(dir)
}

/// Deterministic output filename for one embedded image.
pub fn image_filename(page: usize, index: usize, kind: EmbeddedKind) -> String {
    format!("imagen_pagina{page}_{index}.{}", kind.extension())
}

/// Encode one transformed image into `dir` and return the written path.
///
/// JPEG output honours `quality`; PNG is lossless and has no quality knob.
/// pdfium hands back RGBA buffers even for JPEG-sourced images, and JPEG
/// carries no alpha, so the JPEG path drops the alpha plane before encoding.
pub fn save_image(
    dir: &Path,
    page: usize,
    index: usize,
    kind: EmbeddedKind,
    image: &DynamicImage,
    quality: u8,
) -> Result<PathBuf, ItemError> {
    let path = dir.join(image_filename(page, index, kind));

    match kind {
        EmbeddedKind::Jpeg => {
            let file = File::create(&path).map_err(|e| ItemError::SaveFailed {
                path: path.clone(),
                detail: e.to_string(),
            })?;
            let mut writer = BufWriter::new(file);
            let encoder = JpegEncoder::new_with_quality(&mut writer, quality);
            image
                .to_rgb8()
                .write_with_encoder(encoder)
                .map_err(|e| ItemError::SaveFailed {
                    path: path.clone(),
                    detail: e.to_string(),
                })?;
        }
        EmbeddedKind::Png => {
            image
                .save_with_format(&path, ImageFormat::Png)
                .map_err(|e| ItemError::SaveFailed {
                    path: path.clone(),
                    detail: e.to_string(),
                })?;
        }
    }

    debug!("Saved {}", path.display());
    Ok(path)
}
