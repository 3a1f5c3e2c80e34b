use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{LocationQuery, LookupError, WeatherReading};

use super::WeatherProvider;
use async_trait::async_trait;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Client for the OpenWeatherMap current-weather endpoint.
///
/// Units are fixed to metric; the base URL is overridable so tests can point
/// the client at a mock server.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    /// Issue the single current-weather request and classify the outcome.
    ///
    /// `city_lookup` decides whether a 404 means "city not found"; on the
    /// coordinates path a 404 falls into the generic upstream bucket.
    async fn get_current(
        &self,
        params: &[(&str, String)],
        city_lookup: bool,
    ) -> Result<WeatherReading, LookupError> {
        let url = format!("{}/weather", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(params)
            .query(&[
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            debug!(%status, city_lookup, "current-weather request rejected");
            return Err(match status.as_u16() {
                404 if city_lookup => LookupError::CityNotFound,
                401 => LookupError::InvalidApiKey,
                _ => LookupError::Upstream { status },
            });
        }

        let body = res.text().await?;
        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;

        debug!(city = %parsed.name, "decoded current-weather response");
        Ok(parsed.into_reading())
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn fetch_reading(&self, query: &LocationQuery) -> Result<WeatherReading, LookupError> {
        match query {
            LocationQuery::City(name) => {
                self.get_current(&[("q", name.clone())], true).await
            }
            LocationQuery::Coordinates { latitude, longitude } => {
                let params = [
                    ("lat", latitude.to_string()),
                    ("lon", longitude.to_string()),
                ];
                self.get_current(&params, false).await
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    #[serde(default)]
    visibility: f64,
    timezone: i64,
}

impl OwCurrentResponse {
    fn into_reading(self) -> WeatherReading {
        let (description, icon) = self
            .weather
            .into_iter()
            .next()
            .map(|w| (w.description, w.icon))
            .unwrap_or_else(|| ("Unknown".to_string(), "01d".to_string()));

        WeatherReading {
            city: self.name,
            country: self.sys.country,
            temperature_c: self.main.temp,
            feels_like_c: self.main.feels_like,
            description,
            icon,
            humidity_pct: self.main.humidity,
            wind_speed_mps: self.wind.speed,
            pressure_hpa: self.main.pressure,
            visibility_m: self.visibility,
            sunrise: self.sys.sunrise,
            sunset: self.sys.sunset,
            timezone_offset: self.timezone,
        }
    }
}
