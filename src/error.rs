//! Error types for the VirtualTourist core.

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// All the ways a pin, album, or photo operation can fail.
#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("failed to run database migrations: {0}")]
    Migration(String),

    #[error("flickr request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("could not parse flickr response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected flickr response: {0}")]
    FlickrResponse(String),

    #[error("image download failed for {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("cannot decode image data: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("{0} not found: {1}")]
    NotFound(&'static str, String),

    #[error("invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
