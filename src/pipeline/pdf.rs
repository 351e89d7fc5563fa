//! Embedded-image extraction: pull raster images out of PDF pages.
//!
//! The PDF engine hides behind [`EmbeddedImageSource`] so the rest of the
//! pipeline (inversion, naming, writing) can be exercised against synthetic
//! images without any PDF fixture. The production implementation is
//! [`PdfiumSource`], which binds pdfium per call; pdfium is not async-safe,
//! so callers hop through `tokio::task::spawn_blocking` (see
//! [`crate::extract`]).

use crate::error::SiftError;
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::{debug, warn};

/// How an image is encoded inside the PDF stream, and therefore which
/// extension and encoder its output file gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddedKind {
    /// DCTDecode stream — written back out as JPEG.
    Jpeg,
    /// Any other filter chain (FlateDecode etc.) — written as PNG.
    Png,
}

impl EmbeddedKind {
    /// File extension used in the output filename.
    pub fn extension(&self) -> &'static str {
        match self {
            EmbeddedKind::Jpeg => "jpg",
            EmbeddedKind::Png => "png",
        }
    }
}

/// One embedded raster image pulled out of a document page.
///
/// `page` and `index` are both 1-based; `index` counts image objects in
/// page order, and a skipped (undecodable) image still consumes its slot so
/// surviving filenames keep their positions.
pub struct EmbeddedImage {
    pub page: usize,
    pub index: usize,
    pub image: DynamicImage,
    pub kind: EmbeddedKind,
}

/// A backend that can enumerate the embedded raster images of a document.
pub trait EmbeddedImageSource: Send + Sync {
    /// All decodable embedded images of `pdf_path`, in document order.
    ///
    /// Implementations skip images that fail to decode (logging them) and
    /// fail the whole call only when the document itself cannot be opened.
    fn document_images(&self, pdf_path: &Path) -> Result<Vec<EmbeddedImage>, SiftError>;
}

/// Production [`EmbeddedImageSource`] backed by pdfium.
#[derive(Debug, Default)]
pub struct PdfiumSource;

impl EmbeddedImageSource for PdfiumSource {
    fn document_images(&self, pdf_path: &Path) -> Result<Vec<EmbeddedImage>, SiftError> {
        let pdfium = Pdfium::default();

        let document =
            pdfium
                .load_pdf_from_file(pdf_path, None)
                .map_err(|e| SiftError::PdfOpenFailed {
                    path: pdf_path.to_path_buf(),
                    detail: format!("{e:?}"),
                })?;

        let mut images = Vec::new();

        for (page_idx, page) in document.pages().iter().enumerate() {
            let page_num = page_idx + 1;
            let mut index_on_page = 0;

            for object in page.objects().iter() {
                let Some(image_object) = object.as_image_object() else {
                    continue;
                };
                index_on_page += 1;

                let filter_names: Vec<String> = image_object
                    .filters()
                    .iter()
                    .map(|filter| filter.name().to_string())
                    .collect();
                let kind = kind_from_filters(&filter_names);

                // The raw (unprocessed) bitmap is the embedded image as
                // stored, before pdfium applies page transforms.
                match image_object.get_raw_image() {
                    Ok(image) => {
                        debug!(
                            "Page {} image {}: {}x{} px, filters {:?}",
                            page_num,
                            index_on_page,
                            image.width(),
                            image.height(),
                            filter_names
                        );
                        images.push(EmbeddedImage {
                            page: page_num,
                            index: index_on_page,
                            image,
                            kind,
                        });
                    }
                    Err(e) => {
                        let err = crate::error::ItemError::DecodeFailed {
                            page: page_num,
                            index: index_on_page,
                            detail: format!("{e:?}"),
                        };
                        warn!("Skipping embedded image: {err}");
                    }
                }
            }
        }

        debug!(
            "Extracted {} embedded images from {}",
            images.len(),
            pdf_path.display()
        );
        Ok(images)
    }
}

/// Map a PDF filter chain to the output encoding.
///
/// DCTDecode streams are JPEG data; everything else (FlateDecode, RunLength,
/// CCITT, …) has no directly reusable container and goes out as PNG.
fn kind_from_filters(filter_names: &[String]) -> EmbeddedKind {
    if filter_names.iter().any(|name| name == "DCTDecode") {
        EmbeddedKind::Jpeg
    } else {
        EmbeddedKind::Png
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dct_streams_stay_jpeg() {
        let filters = vec!["DCTDecode".to_string()];
        assert_eq!(kind_from_filters(&filters), EmbeddedKind::Jpeg);
        assert_eq!(kind_from_filters(&filters).extension(), "jpg");
    }

    #[test]
    fn flate_and_unknown_streams_become_png() {
        assert_eq!(
            kind_from_filters(&["FlateDecode".to_string()]),
            EmbeddedKind::Png
        );
        assert_eq!(kind_from_filters(&[]), EmbeddedKind::Png);
    }

    #[test]
    fn dct_anywhere_in_the_chain_wins() {
        let filters = vec!["FlateDecode".to_string(), "DCTDecode".to_string()];
        assert_eq!(kind_from_filters(&filters), EmbeddedKind::Jpeg);
    }
}
