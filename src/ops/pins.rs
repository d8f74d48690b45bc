//! Pin operations: dropping, listing, and deleting map pins.

use crate::db::models::{NewPin, Pin};
use crate::db::repository;
use crate::error::{Error, Result};
use crate::flickr;
use crate::state::AppState;

/// Drop a new pin at a coordinate. The Flickr page cursor starts at 1.
pub fn drop_pin(state: &AppState, latitude: f64, longitude: f64) -> Result<Pin> {
    if !flickr::valid_latitude(latitude) || !flickr::valid_longitude(longitude) {
        return Err(Error::InvalidCoordinate {
            latitude,
            longitude,
        });
    }

    let mut conn = state.db.get()?;
    let new_pin = NewPin {
        id: uuid::Uuid::new_v4().to_string(),
        latitude,
        longitude,
        flickr_page: 1,
    };

    let pin = repository::create_pin(&mut conn, &new_pin)?;
    log::info!("dropped pin {} at ({}, {})", pin.id, latitude, longitude);
    Ok(pin)
}

pub fn get_pins(state: &AppState) -> Result<Vec<Pin>> {
    let mut conn = state.db.get()?;
    Ok(repository::get_pins(&mut conn)?)
}

pub fn get_pin(state: &AppState, pin_id: &str) -> Result<Option<Pin>> {
    let mut conn = state.db.get()?;
    Ok(repository::get_pin_by_id(&mut conn, pin_id)?)
}

/// First pin at exactly the given coordinate, if any. Used by edit-mode
/// deletion, which removes one pin per tap even when pins overlap.
pub fn find_pin_at(state: &AppState, latitude: f64, longitude: f64) -> Result<Option<Pin>> {
    let mut conn = state.db.get()?;
    Ok(repository::find_pin_at(&mut conn, latitude, longitude)?)
}

/// Delete a pin, its photo rows, and every photo's cached artifacts.
/// Returns false if no such pin existed.
pub fn delete_pin(state: &AppState, pin_id: &str) -> Result<bool> {
    let mut conn = state.db.get()?;

    // Purge cached bytes before the rows disappear.
    let photos = repository::get_photos_by_pin(&mut conn, pin_id)?;
    for photo in &photos {
        state.images.remove_artifacts(&photo.url, &photo.flickr_id);
    }

    let deleted = repository::delete_pin(&mut conn, pin_id)?;
    if deleted > 0 {
        log::info!("deleted pin {} and {} photos", pin_id, photos.len());
    }
    Ok(deleted > 0)
}
