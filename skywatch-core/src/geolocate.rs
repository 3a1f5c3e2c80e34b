use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;
use std::time::Duration;
use tracing::debug;

use crate::GeoError;

const DEFAULT_BASE_URL: &str = "http://ip-api.com";
const POSITION_TIMEOUT: Duration = Duration::from_secs(10);

/// A resolved current position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

/// Request-current-position capability of the host environment.
///
/// `available` mirrors the capability probe a browser does before asking for
/// a position; an unavailable geolocator is never asked for one.
#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    fn available(&self) -> bool {
        true
    }

    async fn current_position(&self) -> Result<Position, GeoError>;
}

/// Geolocator that resolves an approximate position from the machine's
/// public IP address.
#[derive(Debug, Clone)]
pub struct IpApiGeolocator {
    base_url: String,
    http: Client,
}

impl IpApiGeolocator {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            http: Client::new(),
        }
    }
}

impl Default for IpApiGeolocator {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    lat: f64,
    #[serde(default)]
    lon: f64,
}

#[async_trait]
impl Geolocator for IpApiGeolocator {
    async fn current_position(&self) -> Result<Position, GeoError> {
        let url = format!("{}/json", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("fields", "status,lat,lon")])
            .timeout(POSITION_TIMEOUT)
            .send()
            .await
            .map_err(|err| {
                debug!(%err, "position request failed");
                if err.is_timeout() {
                    GeoError::Timeout
                } else if err.is_connect() {
                    GeoError::PositionUnavailable
                } else {
                    GeoError::Unknown
                }
            })?;

        let status = res.status();
        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(GeoError::PermissionDenied);
        }
        if !status.is_success() {
            debug!(%status, "position request rejected");
            return Err(GeoError::Unknown);
        }

        let parsed: IpApiResponse = res.json().await.map_err(|_| GeoError::Unknown)?;
        if parsed.status != "success" {
            return Err(GeoError::PositionUnavailable);
        }

        Ok(Position {
            latitude: parsed.lat,
            longitude: parsed.lon,
        })
    }
}
