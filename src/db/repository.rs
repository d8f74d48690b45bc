//! Repository functions for database CRUD operations

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use super::models::*;
use super::schema::*;

/// Fixed key for the single persisted viewport row.
pub const MAP_REGION_ID: &str = "viewport";

// ============================================================================
// Pin Repository
// ============================================================================

pub fn get_pins(conn: &mut SqliteConnection) -> QueryResult<Vec<Pin>> {
    pins::table.order(pins::created_at.desc()).load(conn)
}

pub fn get_pin_by_id(conn: &mut SqliteConnection, pin_id: &str) -> QueryResult<Option<Pin>> {
    pins::table
        .filter(pins::id.eq(pin_id))
        .first(conn)
        .optional()
}

/// First pin at exactly the given coordinate. More than one pin may share a
/// coordinate; deleting one per lookup is the intended behavior.
pub fn find_pin_at(
    conn: &mut SqliteConnection,
    latitude: f64,
    longitude: f64,
) -> QueryResult<Option<Pin>> {
    pins::table
        .filter(pins::latitude.eq(latitude))
        .filter(pins::longitude.eq(longitude))
        .order(pins::created_at.asc())
        .first(conn)
        .optional()
}

pub fn create_pin(conn: &mut SqliteConnection, new_pin: &NewPin) -> QueryResult<Pin> {
    diesel::insert_into(pins::table)
        .values(new_pin)
        .execute(conn)?;

    pins::table.filter(pins::id.eq(&new_pin.id)).first(conn)
}

/// Advance (or reset) the Flickr page cursor for a pin.
pub fn set_pin_flickr_page(
    conn: &mut SqliteConnection,
    pin_id: &str,
    page: i32,
) -> QueryResult<usize> {
    diesel::update(pins::table.filter(pins::id.eq(pin_id)))
        .set(pins::flickr_page.eq(page))
        .execute(conn)
}

pub fn delete_pin(conn: &mut SqliteConnection, pin_id: &str) -> QueryResult<usize> {
    // The schema cascades, but delete the photo rows explicitly as well
    diesel::delete(photos::table.filter(photos::pin_id.eq(pin_id))).execute(conn)?;
    diesel::delete(pins::table.filter(pins::id.eq(pin_id))).execute(conn)
}

// ============================================================================
// Photo Repository
// ============================================================================

pub fn get_photos_by_pin(conn: &mut SqliteConnection, pin_id: &str) -> QueryResult<Vec<Photo>> {
    photos::table
        .filter(photos::pin_id.eq(pin_id))
        .order(photos::created_at.desc())
        .load(conn)
}

pub fn get_photo_by_id(conn: &mut SqliteConnection, photo_id: &str) -> QueryResult<Option<Photo>> {
    photos::table
        .filter(photos::id.eq(photo_id))
        .first(conn)
        .optional()
}

pub fn create_photo(conn: &mut SqliteConnection, new_photo: &NewPhoto) -> QueryResult<Photo> {
    diesel::insert_into(photos::table)
        .values(new_photo)
        .execute(conn)?;

    photos::table
        .filter(photos::id.eq(&new_photo.id))
        .first(conn)
}

pub fn delete_photo(conn: &mut SqliteConnection, photo_id: &str) -> QueryResult<usize> {
    diesel::delete(photos::table.filter(photos::id.eq(photo_id))).execute(conn)
}

pub fn delete_photos_for_pin(conn: &mut SqliteConnection, pin_id: &str) -> QueryResult<usize> {
    diesel::delete(photos::table.filter(photos::pin_id.eq(pin_id))).execute(conn)
}

// ============================================================================
// MapRegion Repository
// ============================================================================

pub fn get_map_region(conn: &mut SqliteConnection) -> QueryResult<Option<MapRegion>> {
    map_regions::table
        .filter(map_regions::id.eq(MAP_REGION_ID))
        .first(conn)
        .optional()
}

pub fn save_map_region(
    conn: &mut SqliteConnection,
    region: &NewMapRegion,
) -> QueryResult<MapRegion> {
    diesel::insert_into(map_regions::table)
        .values(region)
        .on_conflict(map_regions::id)
        .do_update()
        .set((
            map_regions::latitude.eq(region.latitude),
            map_regions::longitude.eq(region.longitude),
            map_regions::span_latitude.eq(region.span_latitude),
            map_regions::span_longitude.eq(region.span_longitude),
            map_regions::updated_at.eq(diesel::dsl::now),
        ))
        .execute(conn)?;

    map_regions::table
        .filter(map_regions::id.eq(&region.id))
        .first(conn)
}
