//! Media storage for pipeline runs.
//!
//! Every pipeline run writes its intermediate assets (images, narration) into
//! its own directory, `{root}/runs/{run_id}`, so two runs started at the same
//! time never overwrite each other's files. Only the final video is written
//! outside the run directory.
//!
//! # Example
//!
//! ```rust
//! use factreel_storage::{FileSystemStorage, MediaMetadata, MediaStorage, MediaType};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let run_id = factreel_storage::new_run_id();
//! let storage = FileSystemStorage::for_run("/tmp/factreel", &run_id)?;
//! let metadata = MediaMetadata::new(MediaType::Image, "image_1.png");
//!
//! let data = vec![0u8; 1024]; // PNG data
//! let reference = storage.store(&data, &metadata).await?;
//! assert!(reference.storage_path.ends_with("image_1.png"));
//! # Ok(())
//! # }
//! ```

use chrono::Local;
use factreel_error::FactreelResult;
use std::path::PathBuf;
use uuid::Uuid;

mod filesystem;

pub use factreel_error::{StorageError, StorageErrorKind};
pub use filesystem::FileSystemStorage;

/// Trait for media storage backends.
#[async_trait::async_trait]
pub trait MediaStorage: Send + Sync {
    /// Store media under the filename given in `metadata`.
    ///
    /// Writing the same filename twice replaces the earlier content.
    async fn store(&self, data: &[u8], metadata: &MediaMetadata)
    -> FactreelResult<MediaReference>;
}

/// Metadata about media being stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaMetadata {
    /// Type of media (image, audio)
    pub media_type: MediaType,
    /// File name inside the run directory
    pub filename: String,
}

impl MediaMetadata {
    /// Describe a file to store.
    pub fn new(media_type: MediaType, filename: impl Into<String>) -> Self {
        Self {
            media_type,
            filename: filename.into(),
        }
    }
}

/// Reference to stored media.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaReference {
    /// Location on disk
    pub storage_path: PathBuf,
    /// Size of the media in bytes
    pub size_bytes: u64,
}

/// Type of media content.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum MediaType {
    /// Image content (PNG, JPEG, WebP, etc.)
    Image,
    /// Audio content (MP3, WAV, etc.)
    Audio,
}

/// Generate an identifier for a new pipeline run.
///
/// The identifier starts with a sortable local timestamp followed by a short
/// random suffix, e.g. `20261017_093015-1a2b3c4d`.
pub fn new_run_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", Local::now().format("%Y%m%d_%H%M%S"), &suffix[..8])
}
