use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use image::ImageFormat;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::StorageConfig;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Image data is empty")]
    EmptyData,

    #[error("Failed to decode image: {0}")]
    DecodeFailed(String),

    #[error("Failed to encode image as PNG: {0}")]
    EncodeFailed(String),

    #[error("Failed to write image: {0}")]
    Io(#[from] std::io::Error),
}

const FILE_PREFIX: &str = "generated_";

/// Persists generated images, one uniquely named file per request.
#[derive(Debug, Clone)]
pub struct ImageStore {
    output_dir: PathBuf,
    persist: bool,
    /// Oldest files beyond this count are pruned after each save; 0 keeps all.
    max_files: usize,
}

impl ImageStore {
    pub fn new(output_dir: impl Into<PathBuf>, persist: bool, max_files: usize) -> Self {
        Self {
            output_dir: output_dir.into(),
            persist,
            max_files,
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.output_dir, config.persist, config.max_files)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn persists(&self) -> bool {
        self.persist
    }

    pub fn ensure_dir(&self) -> std::io::Result<()> {
        if self.persist {
            std::fs::create_dir_all(&self.output_dir)?;
        }
        Ok(())
    }

    /// Write PNG bytes under a fresh request-scoped name.
    ///
    /// Returns `None` when persistence is disabled.
    pub async fn save(&self, png: &[u8]) -> Result<Option<PathBuf>, StorageError> {
        if !self.persist {
            return Ok(None);
        }

        tokio::fs::create_dir_all(&self.output_dir).await?;
        // Timestamp first so names sort oldest to newest
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let path = self
            .output_dir
            .join(format!("{}{:020}_{}.png", FILE_PREFIX, nanos, Uuid::new_v4()));
        tokio::fs::write(&path, png).await?;
        debug!("Saved generated image to {}", path.display());

        self.prune().await?;
        Ok(Some(path))
    }

    /// Delete the oldest stored images until at most `max_files` remain.
    async fn prune(&self) -> Result<(), StorageError> {
        if self.max_files == 0 {
            return Ok(());
        }

        let mut stored = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.output_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with(FILE_PREFIX) && name.ends_with(".png") {
                stored.push(name);
            }
        }

        if stored.len() <= self.max_files {
            return Ok(());
        }
        stored.sort();
        let excess = stored.len() - self.max_files;
        for name in &stored[..excess] {
            match tokio::fs::remove_file(self.output_dir.join(name)).await {
                Ok(()) => debug!("Pruned stored image {}", name),
                // A concurrent request may have pruned it already
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => warn!("Failed to prune stored image {}: {}", name, e),
            }
        }
        Ok(())
    }
}

/// Make sure `bytes` is a decodable image and return it as PNG.
///
/// PNG input is returned unchanged; other formats are re-encoded.
pub fn normalize_to_png(bytes: &[u8]) -> Result<Vec<u8>, StorageError> {
    if bytes.is_empty() {
        return Err(StorageError::EmptyData);
    }

    let format = image::guess_format(bytes).map_err(|e| StorageError::DecodeFailed(e.to_string()))?;
    let img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| StorageError::DecodeFailed(e.to_string()))?;

    if format == ImageFormat::Png {
        return Ok(bytes.to_vec());
    }

    debug!("Re-encoding {:?} image as PNG", format);
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .map_err(|e| StorageError::EncodeFailed(e.to_string()))?;
    Ok(out.into_inner())
}
