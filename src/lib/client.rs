use super::geojson::FeatureCollection;
use log::{debug, info};
use reqwest::header::ACCEPT;
use std::error::Error;
use std::time::{Duration, Instant};

pub const ALERTS_URL: &str = "https://api.weather.gov/alerts/active";
const ALERTS_PARAMS: [(&str, &str); 2] = [("event", "Flash Flood Warning"), ("status", "actual")];
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);
/// Alerts rarely change faster than this; repeated refreshes within the
/// window reuse the previous response.
pub const CACHE_TTL: Duration = Duration::from_secs(120);

struct Cache {
    ttl: Duration,
    entry: Option<(Instant, FeatureCollection)>,
}

impl Cache {
    fn new(ttl: Duration) -> Self {
        Cache { ttl, entry: None }
    }

    fn get(&self) -> Option<&FeatureCollection> {
        let (stored_at, collection) = self.entry.as_ref()?;
        if stored_at.elapsed() < self.ttl {
            Some(collection)
        } else {
            None
        }
    }

    fn put(&mut self, collection: FeatureCollection) {
        self.entry = Some((Instant::now(), collection));
    }
}

/// Blocking client for the NWS alerts API, one fetch per refresh cycle.
pub struct AlertsClient {
    http: reqwest::blocking::Client,
    url: String,
    cache: Cache,
}

impl AlertsClient {
    pub fn new(user_agent: &str) -> Result<Self, Box<dyn Error>> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(FETCH_TIMEOUT)
            .build()?;
        Ok(AlertsClient {
            http,
            url: ALERTS_URL.to_string(),
            cache: Cache::new(CACHE_TTL),
        })
    }

    /// Active Flash Flood Warnings as a GeoJSON feature collection,
    /// served from the cache when it is still fresh.
    pub fn active_warnings(&mut self) -> Result<FeatureCollection, Box<dyn Error>> {
        if let Some(cached) = self.cache.get() {
            debug!("serving active warnings from cache");
            return Ok(cached.clone());
        }
        let collection: FeatureCollection = self
            .http
            .get(&self.url)
            .query(&ALERTS_PARAMS)
            .header(ACCEPT, "application/geo+json")
            .send()?
            .error_for_status()?
            .json()?;
        info!("fetched {} active warnings", collection.features.len());
        self.cache.put(collection.clone());
        Ok(collection)
    }
}
