//! Pipeline stages for both utilities.
//!
//! Each submodule implements exactly one transformation step. Keeping stages
//! separate makes each independently testable and lets us swap backends (the
//! vision endpoint, the PDF engine) without touching other stages.
//!
//! ## Data Flow
//!
//! ```text
//! Classifier:  scan ──▶ encode ──▶ vision ──▶ copy
//!              (dir)    (base64)   (SI/NO)    (output folder)
//!
//! Extractor:   scan ──▶ pdf ──▶ invert ──▶ write
//!              (*.pdf)  (pdfium) (per-pixel) (per-document folder)
//! ```
//!
//! 1. [`scan`]   — enumerate candidate files, allow-list by extension
//! 2. [`encode`] — read file bytes and base64-wrap them for the API body
//! 3. [`vision`] — the single network stage: one chat request per image
//! 4. [`pdf`]    — pull embedded raster images out of a document; runs in
//!    `spawn_blocking` because pdfium is not async-safe
//! 5. [`invert`] — alpha-preserving colour inversion
//! 6. [`write`]  — deterministic per-document filenames on disk

pub mod encode;
pub mod invert;
pub mod pdf;
pub mod scan;
pub mod vision;
pub mod write;
