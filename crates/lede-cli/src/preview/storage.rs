//! Preview storage for persisting preview mode between runs.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use lede_core::{ContentRef, RepoUrl};

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

/// Stored preview state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredPreview {
    /// Preview ref to read documents from.
    pub content_ref: ContentRef,
    /// Source the ref belongs to.
    pub source: RepoUrl,
    pub entered_at: DateTime<Utc>,
}

impl StoredPreview {
    pub fn new(content_ref: ContentRef, source: RepoUrl) -> Self {
        Self {
            content_ref,
            source,
            entered_at: Utc::now(),
        }
    }

    /// The ref to use when reading from `source`, if this preview applies.
    pub fn ref_for(&self, source: &RepoUrl) -> Option<&ContentRef> {
        (&self.source == source).then_some(&self.content_ref)
    }
}

/// Get the preview file path.
fn preview_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "lede").context("Could not determine data directory")?;

    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join("preview.json"))
}

/// Write `contents` to `path` through a file only the owner can read.
///
/// The file is created private and renamed into place, so the previous
/// version is replaced rather than rewritten.
fn write_private(path: &Path, contents: &str) -> Result<()> {
    let temp_path = path.with_extension("tmp");
    match fs::remove_file(&temp_path) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e).context("Failed to remove stale preview file"),
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options
        .open(&temp_path)
        .context("Failed to create preview file")?;
    file.write_all(contents.as_bytes())
        .context("Failed to write preview file")?;
    file.sync_all()?;

    fs::rename(&temp_path, path).context("Failed to replace preview file")?;
    Ok(())
}

/// Save the preview state to disk.
///
/// Preview refs grant access to unpublished content.
pub fn save_preview(preview: &StoredPreview) -> Result<()> {
    let path = preview_path()?;
    let json = serde_json::to_string_pretty(preview)?;

    write_private(&path, &json)?;

    debug!(path = %path.display(), "Saved preview");
    Ok(())
}

/// Load the preview state from disk.
pub fn load_preview() -> Result<Option<StoredPreview>> {
    let path = preview_path()?;

    if !path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(&path).context("Failed to read preview file")?;
    let preview = serde_json::from_str(&json).context("Invalid preview file")?;

    Ok(Some(preview))
}

/// Clear the stored preview. Returns false if none was stored.
pub fn clear_preview() -> Result<bool> {
    let path = preview_path()?;

    if !path.exists() {
        return Ok(false);
    }

    fs::remove_file(&path).context("Failed to remove preview file")?;
    Ok(true)
}
