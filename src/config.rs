//! Runtime configuration: where data lives and how to reach Flickr.

use std::path::PathBuf;

use crate::flickr;

/// API key the original app shipped with. Override with `FLICKR_API_KEY`.
const DEFAULT_API_KEY: &str = "fd2dca183606947b2f6c7ef036ae4e32";

/// Settings for a [`crate::AppState`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the SQLite store and the photo cache.
    pub data_dir: PathBuf,
    /// Flickr API key sent with every search request.
    pub api_key: String,
    /// Flickr REST endpoint. Only tests point this anywhere else.
    pub base_url: String,
}

impl Config {
    /// Configuration rooted at an explicit data directory.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Config {
            data_dir: data_dir.into(),
            api_key: api_key_from_env(),
            base_url: flickr::BASE_URL.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::with_data_dir(default_data_dir())
    }
}

/// `$XDG_DATA_HOME/virtual-tourist` or the usual fallbacks.
pub fn default_data_dir() -> PathBuf {
    let data_dir = dirs::data_dir().unwrap_or_else(|| {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".local/share")
    });
    data_dir.join("virtual-tourist")
}

fn api_key_from_env() -> String {
    std::env::var("FLICKR_API_KEY").unwrap_or_else(|_| DEFAULT_API_KEY.to_string())
}
