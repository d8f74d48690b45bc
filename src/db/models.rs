//! Database models for VirtualTourist
//!
//! These structs map to the database tables defined in schema.rs

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::schema::*;

// ============================================================================
// Pin
// ============================================================================

/// A user-placed map location. Owns a page of Flickr photos and the cursor
/// for fetching the next page.
#[derive(Debug, Clone, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = pins)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Pin {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Flickr search page to request next time this pin refreshes its album.
    pub flickr_page: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Insertable, Serialize, Deserialize)]
#[diesel(table_name = pins)]
pub struct NewPin {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub flickr_page: i32,
}

// ============================================================================
// Photo
// ============================================================================

/// Metadata for one Flickr photo attached to a pin. The image bytes are never
/// stored in the database; they live in the image store and are resolved
/// lazily (see `ops::photos::resolve_photo`).
#[derive(Debug, Clone, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = photos)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Photo {
    pub id: String,
    pub pin_id: String,
    /// Flickr's own id, used as the cache filename on disk.
    pub flickr_id: String,
    pub url: String,
    pub title: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Insertable, Serialize, Deserialize)]
#[diesel(table_name = photos)]
pub struct NewPhoto {
    pub id: String,
    pub pin_id: String,
    pub flickr_id: String,
    pub url: String,
    pub title: String,
}

// ============================================================================
// MapRegion
// ============================================================================

/// Last-viewed map viewport. A singleton row, upserted on every pan/zoom.
#[derive(Debug, Clone, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = map_regions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MapRegion {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub span_latitude: f64,
    pub span_longitude: f64,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Insertable, Serialize, Deserialize)]
#[diesel(table_name = map_regions)]
pub struct NewMapRegion {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub span_latitude: f64,
    pub span_longitude: f64,
}
