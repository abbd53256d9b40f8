//! Video resources lent to the decoder.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{MediaError, MediaResult};

/// Handle to a decodable video byte stream.
///
/// The handle is read-only and cheap to clone; several decode cursors may be
/// opened on it at once. A resource built with [`VideoResource::from_bytes`]
/// owns a temporary spool file that is deleted when the last clone is dropped.
#[derive(Debug, Clone)]
pub struct VideoResource {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    path: PathBuf,
    file_name: String,
    size: u64,
    mime_type: String,
    /// Keeps the spool file alive for blob-backed resources
    _spool: Option<NamedTempFile>,
}

impl VideoResource {
    /// Lend an existing video file.
    pub async fn from_path(path: impl AsRef<Path>) -> MediaResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(MediaError::FileNotFound(path.to_path_buf()));
        }

        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(MediaError::invalid_video(format!(
                "{} is not a regular file",
                path.display()
            )));
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Self {
            inner: Arc::new(Inner {
                path: path.to_path_buf(),
                mime_type: mime_type_for(&file_name)
                    .unwrap_or("application/octet-stream")
                    .to_string(),
                file_name,
                size: metadata.len(),
                _spool: None,
            }),
        })
    }

    /// Spool an uploaded blob to a temporary file.
    ///
    /// `file_name` is the name the blob was uploaded under; its extension
    /// must identify a video container.
    pub async fn from_bytes(bytes: &[u8], file_name: &str) -> MediaResult<Self> {
        let mime_type = mime_type_for(file_name)
            .ok_or_else(|| MediaError::UnsupportedFormat(file_name.to_string()))?;

        if bytes.is_empty() {
            return Err(MediaError::invalid_video("Uploaded video is empty"));
        }

        let suffix = Path::new(file_name)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        let spool = tempfile::Builder::new()
            .prefix("litterscan-")
            .suffix(&suffix)
            .tempfile()?;
        tokio::fs::write(spool.path(), bytes).await?;

        debug!(
            "Spooled {} ({} bytes) to {}",
            file_name,
            bytes.len(),
            spool.path().display()
        );

        Ok(Self {
            inner: Arc::new(Inner {
                path: spool.path().to_path_buf(),
                file_name: file_name.to_string(),
                size: bytes.len() as u64,
                mime_type: mime_type.to_string(),
                _spool: Some(spool),
            }),
        })
    }

    /// Path the decoder reads from.
    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Original file name.
    pub fn file_name(&self) -> &str {
        &self.inner.file_name
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.inner.size
    }

    /// MIME type inferred from the file name.
    pub fn mime_type(&self) -> &str {
        &self.inner.mime_type
    }

    /// Size in megabytes, as shown next to the selected file.
    pub fn size_mb(&self) -> f64 {
        self.inner.size as f64 / (1024.0 * 1024.0)
    }
}

/// Infer a video MIME type from a file name.
pub fn mime_type_for(file_name: &str) -> Option<&'static str> {
    let ext = Path::new(file_name)
        .extension()?
        .to_string_lossy()
        .to_ascii_lowercase();

    let mime = match ext.as_str() {
        "mp4" => "video/mp4",
        "m4v" => "video/x-m4v",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        "mpeg" | "mpg" => "video/mpeg",
        "ts" => "video/mp2t",
        "3gp" => "video/3gpp",
        "ogv" => "video/ogg",
        "wmv" => "video/x-ms-wmv",
        "flv" => "video/x-flv",
        _ => return None,
    };
    Some(mime)
}
