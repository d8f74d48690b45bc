//! Flickr photo search client.
//!
//! Wraps the `flickr.photos.search` REST call: builds the geographic bounding
//! box for a pin, requests one page of results, and computes the page cursor
//! for the next refresh. Only photo metadata comes back from a search; image
//! bytes are fetched separately through [`FlickrClient::download`].

use serde::Deserialize;

use crate::error::{Error, Result};

pub const BASE_URL: &str = "https://api.flickr.com/services/rest/";

const METHOD_NAME: &str = "flickr.photos.search";
const EXTRAS: &str = "url_m";
const SAFE_SEARCH: &str = "1";
const DATA_FORMAT: &str = "json";
const NO_JSON_CALLBACK: &str = "1";

/// The maximum number of photos to keep from one page of results.
pub const MAX_PHOTOS_PER_PAGE: usize = 15;

/// Flickr only serves up to 4000 results (100 per page, 40 usable pages).
pub const PAGE_LIMIT: i32 = 40;

pub const LAT_MIN: f64 = -90.0;
pub const LAT_MAX: f64 = 90.0;
pub const LON_MIN: f64 = -180.0;
pub const LON_MAX: f64 = 180.0;

const BOUNDING_BOX_HALF_WIDTH: f64 = 0.5;
const BOUNDING_BOX_HALF_HEIGHT: f64 = 0.5;

/// A lat/lon rectangle passed to the search API to filter results
/// geographically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Box centered on a coordinate, half a degree in each direction, clamped
    /// to valid latitude/longitude ranges.
    pub fn around(latitude: f64, longitude: f64) -> Result<Self> {
        if !valid_latitude(latitude) || !valid_longitude(longitude) {
            return Err(Error::InvalidCoordinate {
                latitude,
                longitude,
            });
        }

        Ok(BoundingBox {
            min_lon: (longitude - BOUNDING_BOX_HALF_WIDTH).max(LON_MIN),
            min_lat: (latitude - BOUNDING_BOX_HALF_HEIGHT).max(LAT_MIN),
            max_lon: (longitude + BOUNDING_BOX_HALF_WIDTH).min(LON_MAX),
            max_lat: (latitude + BOUNDING_BOX_HALF_HEIGHT).min(LAT_MAX),
        })
    }

    /// Query-parameter form: `min_lon,min_lat,max_lon,max_lat`.
    pub fn to_query(&self) -> String {
        format!(
            "{},{},{},{}",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }
}

pub fn valid_latitude(latitude: f64) -> bool {
    (LAT_MIN..=LAT_MAX).contains(&latitude)
}

pub fn valid_longitude(longitude: f64) -> bool {
    (LON_MIN..=LON_MAX).contains(&longitude)
}

/// Cursor for the page after `page`, wrapping to 1 once the usable page
/// range (`min(total_pages, 40)`) is exhausted.
pub fn next_page(page: i32, total_pages: i32) -> i32 {
    let page_limit = total_pages.min(PAGE_LIMIT).max(1);
    if page + 1 > page_limit {
        1
    } else {
        page + 1
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct SearchResponse {
    photos: Option<PhotoPage>,
    #[serde(default)]
    stat: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PhotoPage {
    pages: i32,
    /// Flickr sends this as a string. Garbage parses as zero.
    total: String,
    #[serde(default)]
    photo: Vec<PhotoEntry>,
}

#[derive(Debug, Deserialize)]
struct PhotoEntry {
    id: String,
    #[serde(default)]
    title: String,
    /// Medium-size image URL. Absent for photos without a generated size.
    url_m: Option<String>,
}

// ============================================================================
// Client
// ============================================================================

/// One photo's worth of search-result metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoSummary {
    pub flickr_id: String,
    pub title: String,
    pub url: String,
}

/// A page of search results plus the cursor to use on the next search.
#[derive(Debug, Clone)]
pub struct SearchPage {
    pub photos: Vec<PhotoSummary>,
    pub next_page: i32,
    pub total: i64,
}

#[derive(Debug, Clone)]
pub struct FlickrClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl FlickrClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        FlickrClient::with_base_url(api_key, BASE_URL)
    }

    /// Client pointed at a non-default endpoint (used by the tests).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        FlickrClient {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// Search for photos inside `bbox`, requesting the given result page.
    ///
    /// The requested page is clamped to `[1, 40]`. At most
    /// [`MAX_PHOTOS_PER_PAGE`] entries are returned; entries without a
    /// `url_m` are skipped. An empty result set is not an error.
    pub async fn search(&self, bbox: &BoundingBox, page: i32) -> Result<SearchPage> {
        let page = page.clamp(1, PAGE_LIMIT);
        let bbox_param = bbox.to_query();
        let page_param = page.to_string();

        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("method", METHOD_NAME),
                ("api_key", self.api_key.as_str()),
                ("bbox", bbox_param.as_str()),
                ("safe_search", SAFE_SEARCH),
                ("extras", EXTRAS),
                ("format", DATA_FORMAT),
                ("nojsoncallback", NO_JSON_CALLBACK),
                ("page", page_param.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body)?;

        let photo_page = match parsed.photos {
            Some(p) => p,
            None => {
                let detail = match (parsed.stat, parsed.message) {
                    (Some(stat), Some(message)) => format!("stat={}: {}", stat, message),
                    _ => "missing 'photos' in search response".to_string(),
                };
                return Err(Error::FlickrResponse(detail));
            }
        };

        let total: i64 = photo_page.total.parse().unwrap_or(0);
        let next = next_page(page, photo_page.pages);

        let photos = photo_page
            .photo
            .into_iter()
            .filter_map(|entry| {
                entry.url_m.map(|url| PhotoSummary {
                    flickr_id: entry.id,
                    title: entry.title,
                    url,
                })
            })
            .take(MAX_PHOTOS_PER_PAGE)
            .collect::<Vec<_>>();

        log::info!(
            "flickr search page {} returned {} of {} photos (next page {})",
            page,
            photos.len(),
            total,
            next
        );

        Ok(SearchPage {
            photos,
            next_page: next,
            total,
        })
    }

    /// Download raw image bytes from a photo URL, retrying once on failure.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>> {
        match self.fetch_bytes(url).await {
            Ok(bytes) => Ok(bytes),
            Err(first) => {
                log::warn!("image download failed for {}, retrying once: {}", url, first);
                self.fetch_bytes(url).await.map_err(|source| Error::Download {
                    url: url.to_string(),
                    source,
                })
            }
        }
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, reqwest::Error> {
        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}
