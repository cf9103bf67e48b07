//! QR artifact handle: a transient, on-disk reference to the fetched image.
//!
//! The backend rasterizes the QR code; this client only receives the bytes.
//! While the modal is open the bytes live in a named temp file so the user
//! can save a copy. The file is removed exactly once when the modal is
//! dismissed, no matter which dismissal path fires; `Drop` is the backstop.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Transient handle to one fetched QR image.
#[derive(Debug)]
pub struct QrArtifact {
    pub lot_id: String,
    pub content_type: String,
    pub byte_len: usize,
    file: Option<NamedTempFile>,
}

impl QrArtifact {
    /// Write the fetched bytes to a temp file and take ownership of it.
    pub fn new(lot_id: &str, content_type: &str, bytes: &[u8]) -> io::Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("tracechain-qr-")
            .suffix(".png")
            .tempfile()?;
        file.write_all(bytes)?;
        file.flush()?;

        Ok(Self {
            lot_id: lot_id.to_string(),
            content_type: content_type.to_string(),
            byte_len: bytes.len(),
            file: Some(file),
        })
    }

    /// Path of the backing file while the reference is live.
    pub fn path(&self) -> Option<&Path> {
        self.file.as_ref().map(|f| f.path())
    }

    /// Save a persistent copy next to the current working directory. Only
    /// valid while the reference is live.
    pub fn save_copy(&self) -> io::Result<PathBuf> {
        let Some(file) = &self.file else {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "artifact already released",
            ));
        };
        let dest = PathBuf::from(format!("qr-{}.png", self.lot_id));
        std::fs::copy(file.path(), &dest)?;
        Ok(dest)
    }

    /// Release the backing file. Idempotent: the first call removes the
    /// file and returns true, later calls are no-ops.
    pub fn release(&mut self) -> bool {
        match self.file.take() {
            Some(file) => {
                if let Err(e) = file.close() {
                    tracing::warn!(error = %e, "failed to remove QR temp file");
                }
                true
            }
            None => false,
        }
    }

    pub fn is_released(&self) -> bool {
        self.file.is_none()
    }
}

impl Drop for QrArtifact {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_STUB: &[u8] = b"\x89PNG\r\n\x1a\nstub";

    #[test]
    fn release_happens_exactly_once() {
        let mut artifact = QrArtifact::new("LOT-001", "image/png", PNG_STUB).unwrap();
        let path = artifact.path().unwrap().to_path_buf();
        assert!(path.exists());

        assert!(artifact.release());
        assert!(!path.exists());
        assert!(artifact.is_released());

        // Every further dismissal path is a no-op.
        assert!(!artifact.release());
        assert!(!artifact.release());
    }

    #[test]
    fn drop_is_a_backstop_for_missed_release() {
        let path = {
            let artifact = QrArtifact::new("LOT-002", "image/png", PNG_STUB).unwrap();
            artifact.path().unwrap().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn save_copy_fails_after_release() {
        let mut artifact = QrArtifact::new("LOT-003", "image/png", PNG_STUB).unwrap();
        artifact.release();
        assert!(artifact.save_copy().is_err());
    }

    #[test]
    fn records_metadata_from_the_response() {
        let artifact = QrArtifact::new("LOT-004", "image/png", PNG_STUB).unwrap();
        assert_eq!(artifact.lot_id, "LOT-004");
        assert_eq!(artifact.content_type, "image/png");
        assert_eq!(artifact.byte_len, PNG_STUB.len());
    }
}
