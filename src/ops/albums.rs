//! Album operations: fetching and replacing the set of photos for a pin.

use crate::db::models::{NewPhoto, Photo, Pin};
use crate::db::repository;
use crate::error::{Error, Result};
use crate::flickr::BoundingBox;
use crate::state::AppState;

/// Photos for a pin. If the pin has none stored, run a Flickr search and
/// populate the album first.
pub async fn get_album(state: &AppState, pin_id: &str) -> Result<Vec<Photo>> {
    let pin = {
        let mut conn = state.db.get()?;
        repository::get_pin_by_id(&mut conn, pin_id)?
            .ok_or_else(|| Error::NotFound("pin", pin_id.to_string()))?
    };

    let existing = {
        let mut conn = state.db.get()?;
        repository::get_photos_by_pin(&mut conn, pin_id)?
    };
    if !existing.is_empty() {
        return Ok(existing);
    }

    refresh_album(state, &pin).await
}

/// Search Flickr around the pin at its stored page cursor, persist the
/// returned metadata, and advance the cursor. An empty result page is not
/// an error; the album simply stays empty until the next refresh.
pub async fn refresh_album(state: &AppState, pin: &Pin) -> Result<Vec<Photo>> {
    let bbox = BoundingBox::around(pin.latitude, pin.longitude)?;
    let page = state.flickr.search(&bbox, pin.flickr_page).await?;

    let mut conn = state.db.get()?;
    let mut photos = Vec::with_capacity(page.photos.len());
    for summary in page.photos {
        let new_photo = NewPhoto {
            id: uuid::Uuid::new_v4().to_string(),
            pin_id: pin.id.clone(),
            flickr_id: summary.flickr_id,
            url: summary.url,
            title: summary.title,
        };
        photos.push(repository::create_photo(&mut conn, &new_photo)?);
    }

    repository::set_pin_flickr_page(&mut conn, &pin.id, page.next_page)?;
    log::info!(
        "album for pin {} now has {} photos (next search on page {})",
        pin.id,
        photos.len(),
        page.next_page
    );

    Ok(photos)
}

/// The "New Collection" path: delete the pin's photos and their cached
/// artifacts, then fetch the next page of results.
pub async fn new_collection(state: &AppState, pin_id: &str) -> Result<Vec<Photo>> {
    let pin = {
        let mut conn = state.db.get()?;
        repository::get_pin_by_id(&mut conn, pin_id)?
            .ok_or_else(|| Error::NotFound("pin", pin_id.to_string()))?
    };

    {
        let mut conn = state.db.get()?;
        let old = repository::get_photos_by_pin(&mut conn, pin_id)?;
        for photo in &old {
            state.images.remove_artifacts(&photo.url, &photo.flickr_id);
        }
        repository::delete_photos_for_pin(&mut conn, pin_id)?;
        log::info!("cleared {} photos from pin {}", old.len(), pin_id);
    }

    refresh_album(state, &pin).await
}
