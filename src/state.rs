//! Application state management

use crate::cache::ImageStore;
use crate::config::Config;
use crate::db::{self, DbPool};
use crate::error::Result;
use crate::flickr::FlickrClient;

/// Everything the operation modules need: the database pool, the Flickr
/// client, and the image store. The original app reached all three through
/// singletons; here they are one explicit context object.
pub struct AppState {
    pub db: DbPool,
    pub flickr: FlickrClient,
    pub images: ImageStore,
}

impl AppState {
    /// Open (or create) the store under `config.data_dir`, run migrations,
    /// and set up the Flickr client.
    pub fn new(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.data_dir)?;

        let db_path = db::database_path(&config.data_dir);
        let db = db::init_database(&db_path)?;
        log::info!("database ready at {}", db_path.display());

        Ok(AppState {
            db,
            flickr: FlickrClient::with_base_url(&config.api_key, &config.base_url),
            images: ImageStore::new(&config.data_dir)?,
        })
    }
}
