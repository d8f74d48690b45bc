//! Two-tier image store: an in-memory byte cache keyed by photo URL, backed
//! by files on disk keyed by Flickr id. The network tier on top of these
//! lives in `ops::photos`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::Result;

/// Subdirectory of the data dir holding downloaded photo files.
const PHOTO_DIR: &str = "photos";

pub struct ImageStore {
    dir: PathBuf,
    // Bare key-value cache, no eviction. A handful of thumbnail-sized
    // entries at a time in practice.
    memory: Mutex<HashMap<String, Arc<Vec<u8>>>>,
}

impl ImageStore {
    /// Create the store rooted at `<data_dir>/photos`, creating the
    /// directory if needed.
    pub fn new(data_dir: &Path) -> Result<Self> {
        let dir = data_dir.join(PHOTO_DIR);
        fs::create_dir_all(&dir)?;
        Ok(ImageStore {
            dir,
            memory: Mutex::new(HashMap::new()),
        })
    }

    /// In-memory lookup by photo URL.
    pub fn cached(&self, url: &str) -> Option<Arc<Vec<u8>>> {
        self.memory
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(url)
            .cloned()
    }

    pub fn insert(&self, url: &str, bytes: Arc<Vec<u8>>) {
        self.memory
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(url.to_string(), bytes);
    }

    pub fn evict(&self, url: &str) {
        self.memory
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(url);
    }

    /// Path of the on-disk copy for a Flickr id.
    pub fn disk_path(&self, flickr_id: &str) -> PathBuf {
        self.dir.join(flickr_id)
    }

    /// Read the cached file for a Flickr id, if one exists. A file missing
    /// at read time is a miss, not an error; a concurrent purge may remove
    /// it at any point.
    pub fn read_from_disk(&self, flickr_id: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.disk_path(flickr_id)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write raw image bytes for a Flickr id.
    pub fn write_to_disk(&self, flickr_id: &str, bytes: &[u8]) -> Result<()> {
        fs::write(self.disk_path(flickr_id), bytes)?;
        Ok(())
    }

    /// Purge both tiers for one photo. Missing files are fine; the photo may
    /// never have been resolved.
    pub fn remove_artifacts(&self, url: &str, flickr_id: &str) {
        self.evict(url);
        let path = self.disk_path(flickr_id);
        if let Err(e) = fs::remove_file(&path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!("failed to remove cached photo {}: {}", path.display(), e);
            }
        }
    }
}
