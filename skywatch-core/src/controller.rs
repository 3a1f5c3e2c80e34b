//! The fetch-and-render state machine.
//!
//! One lookup at a time flows Idle/Displaying/Error -> Loading -> Displaying
//! or Error. Guards (empty input, missing API key, missing geolocation
//! capability) short-circuit to Error before any network I/O. Overlapping
//! invocations are independent; the last one to complete owns the state slot.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::debug;

use crate::{
    Config, Geolocator, IpApiGeolocator, LocationQuery, LookupError, OpenWeatherClient, UiState,
    WeatherProvider, WeatherReading,
};

pub const EMPTY_CITY_MESSAGE: &str = "Please enter a city name";
pub const GEOLOCATION_UNSUPPORTED_MESSAGE: &str =
    "Geolocation is not supported by your browser";
pub const MISSING_KEY_MESSAGE: &str =
    "No OpenWeatherMap API key configured. Run `skywatch configure` to set one.";

/// How long an error banner stays up before clearing itself.
const ERROR_DISMISS_AFTER: Duration = Duration::from_secs(5);

/// Drives the UI-state slot from location queries.
///
/// Cloning is cheap; clones share the same state slot, so a lookup started on
/// one clone is observed by subscribers of any other.
#[derive(Debug, Clone)]
pub struct Controller {
    provider: Option<Arc<dyn WeatherProvider>>,
    geolocator: Arc<dyn Geolocator>,
    state: watch::Sender<UiState>,
}

impl Controller {
    /// Build the production controller. A missing or placeholder API key
    /// leaves the provider unset, which makes every entry point short-circuit
    /// to the configuration error without network I/O.
    pub fn from_config(config: &Config) -> Self {
        let provider = config
            .api_key()
            .map(|key| Arc::new(OpenWeatherClient::new(key.to_owned())) as Arc<dyn WeatherProvider>);

        Self::with_parts(provider, Arc::new(IpApiGeolocator::new()))
    }

    pub fn with_parts(
        provider: Option<Arc<dyn WeatherProvider>>,
        geolocator: Arc<dyn Geolocator>,
    ) -> Self {
        let (state, _) = watch::channel(UiState::Idle);
        Self {
            provider,
            geolocator,
            state,
        }
    }

    /// Watch the state slot; the receiver sees every committed transition.
    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> UiState {
        self.state.borrow().clone()
    }

    /// Look up weather for a city name typed by the user.
    pub async fn search_by_city(&self, input: &str) {
        let city = input.trim();
        if city.is_empty() {
            self.show_error(EMPTY_CITY_MESSAGE);
            return;
        }

        let Some(provider) = self.provider.clone() else {
            self.show_error(MISSING_KEY_MESSAGE);
            return;
        };

        self.set(UiState::Loading);
        let query = LocationQuery::City(city.to_owned());
        self.finish(provider.fetch_reading(&query).await);
    }

    /// Look up weather for the host's current position.
    pub async fn search_by_current_location(&self) {
        let Some(provider) = self.provider.clone() else {
            self.show_error(MISSING_KEY_MESSAGE);
            return;
        };

        if !self.geolocator.available() {
            self.show_error(GEOLOCATION_UNSUPPORTED_MESSAGE);
            return;
        }

        self.set(UiState::Loading);
        match self.geolocator.current_position().await {
            Ok(position) => {
                let query = LocationQuery::Coordinates {
                    latitude: position.latitude,
                    longitude: position.longitude,
                };
                self.finish(provider.fetch_reading(&query).await);
            }
            Err(err) => {
                debug!(%err, "geolocation failed");
                self.show_error(err.to_string());
            }
        }
    }

    fn finish(&self, result: Result<WeatherReading, LookupError>) {
        match result {
            Ok(reading) => self.set(UiState::Displaying(reading)),
            Err(err) => {
                debug!(%err, "lookup failed");
                self.show_error(err.to_string());
            }
        }
    }

    fn show_error(&self, message: impl Into<String>) {
        self.set(UiState::Error(message.into()));
    }

    fn set(&self, next: UiState) {
        let dismiss = matches!(next, UiState::Error(_));
        self.state.send_replace(next);

        if dismiss {
            self.spawn_dismiss();
        }
    }

    /// Each error gets its own uncancelled timer. A firing timer only ever
    /// clears an Error; any other state has superseded the banner already.
    fn spawn_dismiss(&self) {
        let state = self.state.clone();
        tokio::spawn(async move {
            tokio::time::sleep(ERROR_DISMISS_AFTER).await;
            state.send_if_modified(|current| {
                if matches!(current, UiState::Error(_)) {
                    *current = UiState::Idle;
                    true
                } else {
                    false
                }
            });
        });
    }
}
