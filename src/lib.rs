//! VirtualTourist core - travel photo log
//!
//! Drop pins on a map, collect a page of Flickr photos for each one, and keep
//! everything in a local SQLite store. Image bytes are resolved lazily
//! through a memory cache, an on-disk cache, and finally the network.

pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod flickr;
pub mod ops;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;

/// Initialize logging. Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
