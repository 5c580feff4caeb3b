//! Local-disk staging for uploaded files
//!
//! Files are written under the configured uploads directory as
//! `{sanitized_base}_{unix_millis}-{random}{ext}` so concurrent requests never
//! collide. Size limits are enforced while streaming, not after buffering.

use axum::body::Bytes;
use chrono::Utc;
use futures::{pin_mut, Stream, StreamExt};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::core::config::UploadConfig;
use crate::core::error::{AppError, Result};

/// Allowed MIME types (exact values; any `image/*` is accepted as well)
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "text/plain",
    "text/csv",
];

/// Check if a MIME type may be attached to a contact submission
pub fn is_mime_type_allowed(mime_type: &str) -> bool {
    mime_type.starts_with("image/")
        || ALLOWED_MIME_TYPES
            .iter()
            .any(|allowed| mime_type.starts_with(allowed))
}

/// A file written to disk but not yet referenced by an attachment row
#[derive(Debug, Clone)]
pub struct StagedFile {
    pub file_name: String,
    pub original_name: String,
    pub mime_type: String,
    pub size: i64,
    pub path: String,
}

/// Uploads directory on the local filesystem
pub struct LocalDiskStorage {
    dir: PathBuf,
    max_file_size: usize,
}

impl LocalDiskStorage {
    /// Create the storage, making sure the uploads directory exists
    pub async fn new(config: UploadConfig) -> Result<Self> {
        fs::create_dir_all(&config.dir).await.map_err(|e| {
            AppError::Internal(format!(
                "Failed to create uploads directory {}: {}",
                config.dir.display(),
                e
            ))
        })?;

        info!(
            "Local upload storage initialized at {} (max {} bytes per file)",
            config.dir.display(),
            config.max_file_size
        );

        Ok(Self {
            dir: config.dir,
            max_file_size: config.max_file_size,
        })
    }

    /// Write a file from a stream of chunks.
    ///
    /// Exceeding the per-file limit aborts the write, removes the partial file
    /// and returns `PayloadTooLarge`. A stream error is returned as is after
    /// the partial file is removed.
    pub async fn stage<S, E>(
        &self,
        original_name: &str,
        mime_type: &str,
        stream: S,
    ) -> Result<StagedFile>
    where
        S: Stream<Item = std::result::Result<Bytes, E>>,
        E: Into<AppError>,
    {
        let file_name = generate_file_name(original_name);
        let path = self.dir.join(&file_name);

        let mut file = fs::File::create(&path).await.map_err(|e| {
            AppError::Internal(format!("Failed to create {}: {}", path.display(), e))
        })?;

        pin_mut!(stream);
        let mut size: usize = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    drop(file);
                    self.remove(&path).await;
                    return Err(e.into());
                }
            };

            size += chunk.len();
            if size > self.max_file_size {
                drop(file);
                self.remove(&path).await;
                return Err(AppError::PayloadTooLarge(format!(
                    "File too large. Maximum size is {}MB per file.",
                    self.max_file_size / 1024 / 1024
                )));
            }

            if let Err(e) = file.write_all(&chunk).await {
                drop(file);
                self.remove(&path).await;
                return Err(AppError::Internal(format!(
                    "Failed to write {}: {}",
                    path.display(),
                    e
                )));
            }
        }

        if let Err(e) = file.flush().await {
            drop(file);
            self.remove(&path).await;
            return Err(AppError::Internal(format!(
                "Failed to flush {}: {}",
                path.display(),
                e
            )));
        }

        debug!("Staged upload {} ({} bytes)", file_name, size);

        Ok(StagedFile {
            file_name,
            original_name: original_name.to_string(),
            mime_type: mime_type.to_string(),
            size: size as i64,
            path: path.to_string_lossy().to_string(),
        })
    }

    /// Best-effort delete of a stored file
    pub async fn remove(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        if let Err(e) = fs::remove_file(path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to remove uploaded file {}: {}", path.display(), e);
            }
        }
    }

    /// Best-effort delete of every staged file of a request
    pub async fn remove_all(&self, files: &[StagedFile]) {
        for file in files {
            self.remove(&file.path).await;
        }
    }
}

/// Build the on-disk name for an uploaded file
pub fn generate_file_name(original_name: &str) -> String {
    // Only the final component; clients sometimes send full paths
    let original = Path::new(original_name)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let original = Path::new(&original);

    let base: String = original
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();

    let ext = original
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| format!(".{}", e))
        .unwrap_or_default();

    format!(
        "{}_{}-{}{}",
        base,
        Utc::now().timestamp_millis(),
        rand::random_range(0..1_000_000_000u32),
        ext
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use uuid::Uuid;

    async fn storage(max_file_size: usize) -> LocalDiskStorage {
        LocalDiskStorage::new(UploadConfig {
            dir: std::env::temp_dir().join(format!("uploads-{}", Uuid::new_v4())),
            max_file_size,
            max_files: 5,
        })
        .await
        .unwrap()
    }

    fn chunks(parts: Vec<&'static [u8]>) -> impl Stream<Item = Result<Bytes>> {
        stream::iter(parts.into_iter().map(|p| Ok(Bytes::from_static(p))))
    }

    #[test]
    fn test_mime_type_allow_list() {
        assert!(is_mime_type_allowed("image/png"));
        assert!(is_mime_type_allowed("image/svg+xml"));
        assert!(is_mime_type_allowed("application/pdf"));
        assert!(is_mime_type_allowed("text/plain"));
        assert!(is_mime_type_allowed("text/plain; charset=utf-8"));
        assert!(!is_mime_type_allowed("application/zip"));
        assert!(!is_mime_type_allowed("text/html"));
        assert!(!is_mime_type_allowed("application/x-msdownload"));
    }

    #[test]
    fn test_generated_name_is_sanitized() {
        let name = generate_file_name("My Report (final).pdf");
        assert!(name.starts_with("My_Report__final__"));
        assert!(name.ends_with(".pdf"));

        let name = generate_file_name("../../etc/passwd");
        assert!(name.starts_with("passwd_"));
        assert!(!name.contains('/'));
    }

    #[test]
    fn test_generated_names_differ() {
        assert_ne!(
            generate_file_name("brief.txt"),
            generate_file_name("brief.txt")
        );
    }

    #[tokio::test]
    async fn test_stage_writes_file() {
        let storage = storage(1024).await;
        let staged = storage
            .stage("notes.txt", "text/plain", chunks(vec![b"hello ", b"world"]))
            .await
            .unwrap();

        assert_eq!(staged.size, 11);
        assert_eq!(staged.original_name, "notes.txt");
        assert_eq!(std::fs::read(&staged.path).unwrap(), b"hello world");

        storage.remove_all(&[staged.clone()]).await;
        assert!(!Path::new(&staged.path).exists());
    }

    #[tokio::test]
    async fn test_stage_rejects_oversized_file_and_cleans_up() {
        let storage = storage(4).await;
        let result = storage
            .stage("big.txt", "text/plain", chunks(vec![b"abc", b"def"]))
            .await;

        assert!(matches!(result, Err(AppError::PayloadTooLarge(_))));
        let leftovers = std::fs::read_dir(&storage.dir).unwrap().count();
        assert_eq!(leftovers, 0);
    }

    #[tokio::test]
    async fn test_stage_stream_error_is_passed_through() {
        let storage = storage(1024).await;
        let broken = stream::iter(vec![
            Ok(Bytes::from_static(b"abc")),
            Err(AppError::BadRequest("connection reset".to_string())),
        ]);

        let result = storage.stage("a.txt", "text/plain", broken).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert_eq!(std::fs::read_dir(&storage.dir).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_body_limit_hit_mid_file_stays_payload_too_large() {
        let storage = storage(1024).await;
        let truncated = stream::iter(vec![
            Ok(Bytes::from_static(b"abc")),
            Err(AppError::PayloadTooLarge("Request body too large".to_string())),
        ]);

        let result = storage.stage("a.txt", "text/plain", truncated).await;
        assert_eq!(
            result.unwrap_err().status_code(),
            axum::http::StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(std::fs::read_dir(&storage.dir).unwrap().count(), 0);
    }
}
