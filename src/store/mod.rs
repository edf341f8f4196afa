//! File-backed post storage module
//!
//! Persists one pretty-printed JSON document per post under the posts
//! directory, named `<id>.json`. The id is the creation time in milliseconds
//! since the Unix epoch, rendered as a decimal string.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// A single blog post as stored on disk.
///
/// The id is the backing file's name stem and is not part of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    pub author: String,
    pub content: String,
}

/// Failures surfaced by the store, mapped to HTTP statuses by the handlers.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The post file does not exist, is unreadable, or the id is not a
    /// plain filename.
    #[error("post not found")]
    NotFound,
    /// The posts directory cannot be enumerated.
    #[error("posts directory unavailable: {0}")]
    Unavailable(#[source] std::io::Error),
    /// Writing or removing a post file failed.
    #[error("post write failed: {0}")]
    Write(#[source] std::io::Error),
    /// A stored document did not parse as a post.
    #[error("stored post is malformed: {0}")]
    Malformed(#[source] serde_json::Error),
}

/// File-backed store rooted at a single flat directory.
#[derive(Debug, Clone)]
pub struct PostStore {
    dir: PathBuf,
}

impl PostStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create the posts directory if it does not exist yet.
    ///
    /// Called once at startup; a directory that disappears afterwards
    /// surfaces as `Unavailable` on the next operation.
    pub fn ensure_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)
    }

    /// List the ids of all stored posts, sorted for deterministic output.
    pub async fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut entries = fs::read_dir(&self.dir)
            .await
            .map_err(StoreError::Unavailable)?;

        let mut ids = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(StoreError::Unavailable)?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(stem.to_string());
            }
        }

        ids.sort();
        Ok(ids)
    }

    /// Read and parse the post stored under `id`.
    pub async fn get(&self, id: &str) -> Result<Post, StoreError> {
        let path = self.post_path(id)?;
        let data = fs::read(&path).await.map_err(|_| StoreError::NotFound)?;
        serde_json::from_slice(&data).map_err(StoreError::Malformed)
    }

    /// Persist a new post and return its generated id.
    ///
    /// Two creations within the same millisecond share an id and the later
    /// write wins; the filesystem provides no further coordination.
    pub async fn create(&self, post: &Post) -> Result<String, StoreError> {
        let id = Utc::now().timestamp_millis().to_string();
        let document = serde_json::to_vec_pretty(post).map_err(StoreError::Malformed)?;
        fs::write(self.dir.join(format!("{id}.json")), document)
            .await
            .map_err(StoreError::Write)?;
        Ok(id)
    }

    /// Remove the post stored under `id`.
    ///
    /// Removing an id that is already absent is an error, like any other
    /// filesystem failure.
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let path = self.post_path(id)?;
        fs::remove_file(&path).await.map_err(StoreError::Write)
    }

    /// Resolve the backing file for an id.
    ///
    /// Ids arrive from request query strings, so anything that is not a
    /// plain filename component is rejected before it can address a file
    /// outside the posts directory.
    fn post_path(&self, id: &str) -> Result<PathBuf, StoreError> {
        if id.is_empty()
            || id.contains(['/', '\\'])
            || id.contains("..")
            || Path::new(id).is_absolute()
        {
            return Err(StoreError::NotFound);
        }
        Ok(self.dir.join(format!("{id}.json")))
    }
}
