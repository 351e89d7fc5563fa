//! Image encoding: file bytes → base64 ready for the API request body.
//!
//! The bytes are forwarded exactly as read — no size or format validation
//! happens here. A file that is not actually an image still encodes cleanly
//! and is left for the remote model to reject with a "NO".

use crate::error::ItemError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::Path;
use tracing::debug;

/// Read a file and base64-encode its raw bytes.
pub fn encode_image(path: &Path) -> Result<String, ItemError> {
    let bytes = std::fs::read(path).map_err(|source| ItemError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    let b64 = STANDARD.encode(&bytes);
    debug!("Encoded {} → {} bytes base64", path.display(), b64.len());

    Ok(b64)
}

/// Wrap a base64 payload as the inline data URL the chat API expects.
///
/// The mime type is always `image/jpeg`, whatever the source format; the
/// endpoint only uses it as a hint and decodes the actual bytes.
pub fn to_data_url(image_base64: &str) -> String {
    format!("data:image/jpeg;base64,{image_base64}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_round_trips_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("img.png");
        std::fs::write(&path, b"not really a png").unwrap();

        let b64 = encode_image(&path).expect("encode should succeed");
        let decoded = STANDARD.decode(&b64).expect("valid base64");
        assert_eq!(decoded, b"not really a png");
    }

    #[test]
    fn missing_file_is_an_item_error() {
        let err = encode_image(Path::new("/no/such/image.jpg")).unwrap_err();
        assert!(matches!(err, ItemError::ReadFailed { .. }));
    }

    #[test]
    fn data_url_shape() {
        assert_eq!(to_data_url("QUJD"), "data:image/jpeg;base64,QUJD");
    }
}
