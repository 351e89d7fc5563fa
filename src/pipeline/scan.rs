//! File enumeration: list candidate images and PDFs in a single directory.
//!
//! Both enumerations are shallow (no recursion) and preserve whatever order
//! the underlying directory listing yields; no sort is imposed. Extension
//! matching is case-insensitive, so `photo.JPG` and `photo.jpg` are treated
//! alike.

use crate::error::SiftError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extensions accepted by the classification pipeline.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif"];

/// True if the path carries one of the allow-listed image extensions.
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// List allow-listed image files directly inside `dir`.
///
/// Validates that `dir` exists and is a directory; those are the only fatal
/// conditions. Entries without a matching extension are silently ignored and
/// never opened.
pub fn image_files(dir: &Path) -> Result<Vec<PathBuf>, SiftError> {
    list_files(dir, is_image_file)
}

/// List `*.pdf` files directly inside `dir`.
pub fn pdf_files(dir: &Path) -> Result<Vec<PathBuf>, SiftError> {
    list_files(dir, |path| {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false)
    })
}

fn list_files(dir: &Path, keep: impl Fn(&Path) -> bool) -> Result<Vec<PathBuf>, SiftError> {
    if !dir.exists() {
        return Err(SiftError::InputDirNotFound {
            path: dir.to_path_buf(),
        });
    }
    if !dir.is_dir() {
        return Err(SiftError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|source| SiftError::ListDirFailed {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| SiftError::ListDirFailed {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && keep(&path) {
            files.push(path);
        }
    }

    debug!("Enumerated {} matching files in {}", files.len(), dir.display());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn extension_allow_list_is_case_insensitive() {
        assert!(is_image_file(Path::new("a.jpg")));
        assert!(is_image_file(Path::new("a.JPEG")));
        assert!(is_image_file(Path::new("a.Png")));
        assert!(is_image_file(Path::new("a.bmp")));
        assert!(is_image_file(Path::new("a.GIF")));
        assert!(!is_image_file(Path::new("a.txt")));
        assert!(!is_image_file(Path::new("a.pdf")));
        assert!(!is_image_file(Path::new("jpg"))); // no extension at all
    }

    #[test]
    fn image_files_skips_other_extensions_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("photo.jpg"), b"x").unwrap();
        fs::write(dir.path().join("doc.txt"), b"x").unwrap();
        fs::create_dir(dir.path().join("nested.png")).unwrap();

        let files = image_files(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name().unwrap(), "photo.jpg");
    }

    #[test]
    fn pdf_files_is_shallow() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.pdf"), b"x").unwrap();
        fs::write(dir.path().join("b.PDF"), b"x").unwrap();
        fs::write(dir.path().join("c.txt"), b"x").unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("nested.pdf"), b"x").unwrap();

        let mut names: Vec<_> = pdf_files(dir.path())
            .unwrap()
            .into_iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["a.pdf", "b.PDF"]);
    }

    #[test]
    fn missing_dir_is_fatal() {
        let err = image_files(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, SiftError::InputDirNotFound { .. }));
    }

    #[test]
    fn file_as_dir_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, b"x").unwrap();
        let err = image_files(&file).unwrap_err();
        assert!(matches!(err, SiftError::NotADirectory { .. }));
    }
}
