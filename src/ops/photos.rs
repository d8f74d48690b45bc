//! Photo resolution: turning a stored photo record into image bytes.

use std::sync::Arc;

use crate::db::models::Photo;
use crate::db::repository;
use crate::error::{Error, Result};
use crate::state::AppState;

/// Resolve a photo's image bytes through the lookup chain:
/// memory cache (by URL) -> disk file (by Flickr id) -> network download.
///
/// A network fetch must decode as an image, then populates the disk file and
/// the memory cache. Cache and disk hits return as-is, and concurrent
/// resolutions of the same photo are not deduplicated.
pub async fn resolve_photo(state: &AppState, photo: &Photo) -> Result<Arc<Vec<u8>>> {
    if let Some(bytes) = state.images.cached(&photo.url) {
        log::debug!("photo {} loaded from memory cache", photo.flickr_id);
        return Ok(bytes);
    }

    if let Some(bytes) = state.images.read_from_disk(&photo.flickr_id)? {
        log::debug!("photo {} loaded from disk", photo.flickr_id);
        return Ok(Arc::new(bytes));
    }

    let bytes = state.flickr.download(&photo.url).await?;

    // Reject bodies that are not an image (error pages, truncated files).
    image::load_from_memory(&bytes)?;

    state.images.write_to_disk(&photo.flickr_id, &bytes)?;
    let bytes = Arc::new(bytes);
    state.images.insert(&photo.url, Arc::clone(&bytes));

    log::debug!("photo {} downloaded from server", photo.flickr_id);
    Ok(bytes)
}

/// Resolve a photo by its record id.
pub async fn resolve_photo_by_id(state: &AppState, photo_id: &str) -> Result<Arc<Vec<u8>>> {
    let photo = {
        let mut conn = state.db.get()?;
        repository::get_photo_by_id(&mut conn, photo_id)?
            .ok_or_else(|| Error::NotFound("photo", photo_id.to_string()))?
    };
    resolve_photo(state, &photo).await
}

/// Delete one photo: cached artifacts first, then the row. Returns false if
/// no such photo existed.
pub fn delete_photo(state: &AppState, photo_id: &str) -> Result<bool> {
    let mut conn = state.db.get()?;

    let photo = match repository::get_photo_by_id(&mut conn, photo_id)? {
        Some(p) => p,
        None => return Ok(false),
    };

    state.images.remove_artifacts(&photo.url, &photo.flickr_id);
    let deleted = repository::delete_photo(&mut conn, photo_id)?;
    Ok(deleted > 0)
}
