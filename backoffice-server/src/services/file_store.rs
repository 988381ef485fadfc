//! Upload File Store
//!
//! Handles image uploads (product photos, recharge screenshots, payment QR
//! codes). Incoming bytes are validated as a real image and re-encoded to
//! JPEG before hitting disk; deletion is best-effort and never fails the
//! calling handler.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::utils::AppError;

/// Maximum upload size (5MB)
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// JPEG quality for stored images (85% keeps files small without visible loss)
const JPEG_QUALITY: u8 = 85;

/// Upload categories, one subdirectory each
#[derive(Debug, Clone, Copy)]
pub enum UploadKind {
    Products,
    Recharges,
    Qr,
}

impl UploadKind {
    pub fn dir(&self) -> &'static str {
        match self {
            UploadKind::Products => "products",
            UploadKind::Recharges => "recharges",
            UploadKind::Qr => "qr",
        }
    }
}

/// File store rooted at `<work_dir>/uploads`
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Uploads root (served statically under `/uploads`)
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the upload directory layout
    pub fn ensure_layout(&self) -> std::io::Result<()> {
        for kind in [UploadKind::Products, UploadKind::Recharges, UploadKind::Qr] {
            std::fs::create_dir_all(self.root.join(kind.dir()))?;
        }
        Ok(())
    }

    /// Validate, re-encode and persist an uploaded image.
    ///
    /// Returns the public path (`/uploads/<dir>/<uuid>.jpg`) that gets
    /// stored on the owning record. The write is synchronous; the file is
    /// durable before the handler returns.
    pub fn save_image(&self, kind: UploadKind, data: &[u8]) -> Result<String, AppError> {
        if data.len() > MAX_FILE_SIZE {
            return Err(AppError::validation(format!(
                "File too large. Maximum size is {}MB",
                MAX_FILE_SIZE / 1024 / 1024
            )));
        }

        let img = image::load_from_memory(data)
            .map_err(|e| AppError::validation(format!("Invalid image: {}", e)))?;

        // Re-encode as JPEG with fixed quality
        let mut buffer = Vec::new();
        {
            let mut cursor = Cursor::new(&mut buffer);
            let rgb_img = img.to_rgb8();
            let encoder =
                image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
            rgb_img
                .write_with_encoder(encoder)
                .map_err(|e| AppError::internal(format!("Failed to encode image: {}", e)))?;
        }

        let filename = format!("{}.jpg", Uuid::new_v4());
        let target = self.root.join(kind.dir()).join(&filename);
        std::fs::write(&target, &buffer)
            .map_err(|e| AppError::internal(format!("Failed to store upload: {}", e)))?;

        Ok(format!("/uploads/{}/{}", kind.dir(), filename))
    }

    /// Best-effort deletion of a stored file by its public path.
    ///
    /// Logs on failure, never returns an error to the caller.
    pub fn delete(&self, public_path: &str) {
        let Some(rel) = public_path.strip_prefix("/uploads/") else {
            tracing::warn!(path = %public_path, "Refusing to delete file outside uploads root");
            return;
        };
        let full = self.root.join(rel);
        match std::fs::remove_file(&full) {
            Ok(()) => tracing::debug!(path = %full.display(), "Deleted uploaded file"),
            Err(e) => {
                tracing::warn!(path = %full.display(), error = %e, "Failed to delete uploaded file")
            }
        }
    }
}
