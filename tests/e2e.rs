//! End-to-end tests for both pipelines, run entirely against test doubles:
//! a canned [`MeaningModel`] instead of the remote API and a synthetic
//! [`EmbeddedImageSource`] instead of pdfium. No network, no PDF fixtures.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, Rgba, RgbaImage};
use imgsift::{
    extract_directory, extract_document, sort_folder, ClassifyConfig, EmbeddedImage,
    EmbeddedImageSource, EmbeddedKind, ExtractConfig, ItemError, MeaningModel, SiftError,
};
use std::path::Path;
use std::sync::Arc;

// ── Test doubles ─────────────────────────────────────────────────────────────

/// Answers "SI" when the decoded image bytes contain the needle, "NO"
/// otherwise — deterministic and content-addressed, like the real model
/// is supposed to behave.
struct NeedleModel {
    needle: &'static [u8],
}

#[async_trait]
impl MeaningModel for NeedleModel {
    async fn verdict(&self, image_base64: &str) -> Result<String, ItemError> {
        let bytes = STANDARD
            .decode(image_base64)
            .expect("pipeline sends valid base64");
        let hit = bytes.windows(self.needle.len()).any(|w| w == self.needle);
        Ok(if hit { "SI".into() } else { "NO".into() })
    }
}

/// Every call fails, as if the endpoint were unreachable.
struct FailingModel;

#[async_trait]
impl MeaningModel for FailingModel {
    async fn verdict(&self, _image_base64: &str) -> Result<String, ItemError> {
        Err(ItemError::ModelCall {
            reason: "connection refused".into(),
        })
    }
}

/// Yields a fixed set of synthetic embedded images for any document.
struct FixedSource {
    layout: Vec<(usize, usize, EmbeddedKind)>,
}

impl EmbeddedImageSource for FixedSource {
    fn document_images(&self, _pdf_path: &Path) -> Result<Vec<EmbeddedImage>, SiftError> {
        Ok(self
            .layout
            .iter()
            .map(|&(page, index, kind)| EmbeddedImage {
                page,
                index,
                kind,
                image: DynamicImage::ImageRgba8(RgbaImage::from_pixel(
                    6,
                    6,
                    Rgba([10, 20, 30, 255]),
                )),
            })
            .collect())
    }
}

/// Fails documents whose filename contains "bad", succeeds otherwise.
struct SelectiveSource;

impl EmbeddedImageSource for SelectiveSource {
    fn document_images(&self, pdf_path: &Path) -> Result<Vec<EmbeddedImage>, SiftError> {
        if pdf_path.to_string_lossy().contains("bad") {
            return Err(SiftError::PdfOpenFailed {
                path: pdf_path.to_path_buf(),
                detail: "corrupt xref table".into(),
            });
        }
        FixedSource {
            layout: vec![(1, 1, EmbeddedKind::Png)],
        }
        .document_images(pdf_path)
    }
}

// ── Pipeline A: classification ───────────────────────────────────────────────

#[tokio::test]
async fn sorts_meaningful_images_and_ignores_other_extensions() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let output_dir = output.path().join("imagenes_significativas");

    std::fs::write(input.path().join("photo.jpg"), b"PHOTO bytes").unwrap();
    std::fs::write(input.path().join("pattern.png"), b"plain stripes").unwrap();
    std::fs::write(input.path().join("doc.txt"), b"PHOTO but not an image").unwrap();

    let config = ClassifyConfig::builder()
        .classifier(Arc::new(NeedleModel { needle: b"PHOTO" }))
        .output_dir(&output_dir)
        .build()
        .unwrap();

    let summary = sort_folder(input.path(), &config).await.unwrap();

    assert_eq!(summary.processed, 2, "doc.txt must never be read");
    assert_eq!(summary.meaningful, 1);
    assert_eq!(summary.discarded(), 1);

    let mut copied: Vec<String> = std::fs::read_dir(&output_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    copied.sort();
    assert_eq!(copied, vec!["photo.jpg"]);

    // The copy is byte-identical to the source.
    assert_eq!(
        std::fs::read(output_dir.join("photo.jpg")).unwrap(),
        b"PHOTO bytes"
    );
}

#[tokio::test]
async fn model_failures_discard_but_never_abort() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let output_dir = output.path().join("kept");

    std::fs::write(input.path().join("a.jpg"), b"a").unwrap();
    std::fs::write(input.path().join("b.png"), b"b").unwrap();

    let config = ClassifyConfig::builder()
        .classifier(Arc::new(FailingModel))
        .output_dir(&output_dir)
        .build()
        .unwrap();

    let summary = sort_folder(input.path(), &config).await.unwrap();

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.meaningful, 0);
    assert_eq!(std::fs::read_dir(&output_dir).unwrap().count(), 0);
}

#[tokio::test]
async fn missing_input_folder_is_fatal() {
    let config = ClassifyConfig::builder()
        .classifier(Arc::new(FailingModel))
        .build()
        .unwrap();

    let err = sort_folder("/definitely/not/here", &config).await.unwrap_err();
    assert!(matches!(err, SiftError::InputDirNotFound { .. }));
}

// ── Pipeline B: extraction ───────────────────────────────────────────────────

#[tokio::test]
async fn extracts_one_file_per_embedded_image_with_deterministic_names() {
    let root = tempfile::tempdir().unwrap();

    let config = ExtractConfig::builder()
        .source(Arc::new(FixedSource {
            layout: vec![
                (1, 1, EmbeddedKind::Png),
                (2, 1, EmbeddedKind::Png),
                (2, 2, EmbeddedKind::Jpeg),
            ],
        }))
        .output_root(root.path())
        .build();

    let count = extract_document("informe.pdf", &config).await.unwrap();
    assert_eq!(count, 3);

    let doc_dir = root.path().join("informe");
    let mut written: Vec<String> = std::fs::read_dir(&doc_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    written.sort();
    assert_eq!(
        written,
        vec![
            "imagen_pagina1_1.png",
            "imagen_pagina2_1.png",
            "imagen_pagina2_2.jpg",
        ]
    );

    // The written pixels are the inverted source, alpha untouched.
    let png = image::open(doc_dir.join("imagen_pagina1_1.png")).unwrap();
    assert_eq!(png.to_rgba8().get_pixel(0, 0).0, [245, 235, 225, 255]);
}

#[tokio::test]
async fn directory_sweep_isolates_failing_documents() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("good.pdf"), b"%PDF-1.4").unwrap();
    std::fs::write(dir.path().join("bad.pdf"), b"%PDF-1.4").unwrap();
    std::fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();

    let config = ExtractConfig::builder()
        .source(Arc::new(SelectiveSource))
        .output_root(dir.path())
        .build();

    let results = extract_directory(dir.path(), &config).await.unwrap();
    assert_eq!(results.len(), 2, "only *.pdf files are swept");

    let good = results
        .iter()
        .find(|r| r.pdf.file_name().unwrap() == "good.pdf")
        .unwrap();
    assert!(good.error.is_none());
    assert_eq!(good.images, 1);

    let bad = results
        .iter()
        .find(|r| r.pdf.file_name().unwrap() == "bad.pdf")
        .unwrap();
    assert!(matches!(bad.error, Some(SiftError::PdfOpenFailed { .. })));
    assert_eq!(bad.images, 0);
}

#[tokio::test]
async fn empty_directory_sweep_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let results = extract_directory(dir.path(), &ExtractConfig::default())
        .await
        .unwrap();
    assert!(results.is_empty());
}
