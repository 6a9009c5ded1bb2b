//! Filesystem-based media storage implementation.

use crate::{MediaMetadata, MediaReference, MediaStorage};
use factreel_error::{FactreelResult, StorageError, StorageErrorKind};
use std::path::{Component, Path, PathBuf};

/// Filesystem storage backend rooted at one directory.
///
/// # Example Structure
///
/// ```text
/// ./output/
/// ├── output_video_20261017_093102.mp4
/// └── runs/
///     └── 20261017_093015-1a2b3c4d/
///         ├── image_1.png
///         ├── image_2.png
///         ├── image_3.png
///         └── narration.mp3
/// ```
///
/// Writes go to a temp file first and are renamed into place.
#[derive(Debug, Clone)]
pub struct FileSystemStorage {
    base_path: PathBuf,
}

impl FileSystemStorage {
    /// Create a new filesystem storage backend.
    ///
    /// Creates the base directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created or accessed.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> FactreelResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Created filesystem storage");
        Ok(Self { base_path })
    }

    /// Storage scoped to one pipeline run: `{root}/runs/{run_id}`.
    ///
    /// # Errors
    ///
    /// Returns error if `run_id` is not a plain directory name or the
    /// directory cannot be created.
    pub fn for_run(root: impl AsRef<Path>, run_id: &str) -> FactreelResult<Self> {
        check_file_name(run_id)?;
        Self::new(root.as_ref().join("runs").join(run_id))
    }

    /// Root directory of this storage.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Remove the storage directory and everything in it.
    #[tracing::instrument(skip(self), fields(path = %self.base_path.display()))]
    pub async fn purge(&self) -> FactreelResult<()> {
        tokio::fs::remove_dir_all(&self.base_path)
            .await
            .map_err(|e| {
                StorageError::new(StorageErrorKind::Removal(format!(
                    "{}: {}",
                    self.base_path.display(),
                    e
                )))
            })?;
        tracing::info!("Removed run directory");
        Ok(())
    }
}

/// Rejects names that would escape the storage directory.
fn check_file_name(name: &str) -> FactreelResult<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(StorageError::new(StorageErrorKind::InvalidPath(name.to_string())).into()),
    }
}

#[async_trait::async_trait]
impl MediaStorage for FileSystemStorage {
    #[tracing::instrument(skip(self, data, metadata), fields(size = data.len(), media_type = %metadata.media_type, filename = %metadata.filename))]
    async fn store(
        &self,
        data: &[u8],
        metadata: &MediaMetadata,
    ) -> FactreelResult<MediaReference> {
        check_file_name(&metadata.filename)?;
        let path = self.base_path.join(&metadata.filename);

        // Write to temp file first, then rename for atomicity
        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, data).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::info!(
            path = %path.display(),
            size = data.len(),
            "Stored media file"
        );

        Ok(MediaReference {
            storage_path: path,
            size_bytes: data.len() as u64,
        })
    }
}
