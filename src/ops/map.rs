//! Persisted map viewport: the last-viewed center and span.

use serde::{Deserialize, Serialize};

use crate::db::models::{MapRegion, NewMapRegion};
use crate::db::repository::{self, MAP_REGION_ID};
use crate::error::Result;
use crate::state::AppState;

/// A map viewport: center coordinate plus the visible span in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub latitude: f64,
    pub longitude: f64,
    pub span_latitude: f64,
    pub span_longitude: f64,
}

/// Persist the viewport. There is a single region row per store; saving
/// again overwrites it.
pub fn save_map_region(state: &AppState, viewport: Viewport) -> Result<MapRegion> {
    let mut conn = state.db.get()?;
    let region = NewMapRegion {
        id: MAP_REGION_ID.to_string(),
        latitude: viewport.latitude,
        longitude: viewport.longitude,
        span_latitude: viewport.span_latitude,
        span_longitude: viewport.span_longitude,
    };
    Ok(repository::save_map_region(&mut conn, &region)?)
}

/// Last persisted viewport, if the map has ever been moved.
pub fn load_map_region(state: &AppState) -> Result<Option<MapRegion>> {
    let mut conn = state.db.get()?;
    Ok(repository::get_map_region(&mut conn)?)
}
