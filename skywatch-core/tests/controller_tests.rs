//! State-machine tests for the lookup controller, driven by injected fakes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use skywatch_core::controller::{
    EMPTY_CITY_MESSAGE, GEOLOCATION_UNSUPPORTED_MESSAGE, MISSING_KEY_MESSAGE,
};
use skywatch_core::{
    Controller, GeoError, Geolocator, LocationQuery, LookupError, Position, UiState,
    WeatherProvider, WeatherReading,
};
use tokio::sync::Notify;

fn sample_reading() -> WeatherReading {
    WeatherReading {
        city: "London".into(),
        country: "GB".into(),
        temperature_c: 17.6,
        feels_like_c: 16.4,
        description: "broken clouds".into(),
        icon: "04d".into(),
        humidity_pct: 57,
        wind_speed_mps: 3.6,
        pressure_hpa: 1012,
        visibility_m: 10000.0,
        sunrise: 1_599_973_320,
        sunset: 1_600_011_600,
        timezone_offset: 0,
    }
}

#[derive(Debug, Clone, Copy)]
enum Outcome {
    Reading,
    NotFound,
}

/// Provider fake that counts requests, records the last query, and can hold a
/// response back until the test releases it.
#[derive(Debug)]
struct FakeProvider {
    calls: AtomicUsize,
    last_query: Mutex<Option<LocationQuery>>,
    outcome: Outcome,
    gate: Option<Arc<Notify>>,
}

impl FakeProvider {
    fn succeeding() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
            outcome: Outcome::Reading,
            gate: None,
        }
    }

    fn failing() -> Self {
        Self {
            outcome: Outcome::NotFound,
            ..Self::succeeding()
        }
    }

    fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::succeeding()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_query(&self) -> Option<LocationQuery> {
        self.last_query.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherProvider for FakeProvider {
    async fn fetch_reading(&self, query: &LocationQuery) -> Result<WeatherReading, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.clone());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        match self.outcome {
            Outcome::Reading => Ok(sample_reading()),
            Outcome::NotFound => Err(LookupError::CityNotFound),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct FakeGeolocator {
    available: bool,
    result: Result<Position, GeoError>,
}

impl FakeGeolocator {
    fn at(latitude: f64, longitude: f64) -> Self {
        Self {
            available: true,
            result: Ok(Position {
                latitude,
                longitude,
            }),
        }
    }

    fn failing(err: GeoError) -> Self {
        Self {
            available: true,
            result: Err(err),
        }
    }

    fn unsupported() -> Self {
        Self {
            available: false,
            result: Err(GeoError::Unknown),
        }
    }
}

#[async_trait]
impl Geolocator for FakeGeolocator {
    fn available(&self) -> bool {
        self.available
    }

    async fn current_position(&self) -> Result<Position, GeoError> {
        self.result
    }
}

fn controller_with(provider: Arc<FakeProvider>, geolocator: FakeGeolocator) -> Controller {
    Controller::with_parts(Some(provider), Arc::new(geolocator))
}

#[tokio::test]
async fn empty_city_never_issues_a_request() {
    let provider = Arc::new(FakeProvider::succeeding());
    let controller = controller_with(provider.clone(), FakeGeolocator::at(0.0, 0.0));

    controller.search_by_city("   ").await;

    assert_eq!(controller.state(), UiState::Error(EMPTY_CITY_MESSAGE.into()));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn missing_key_short_circuits_both_entry_points() {
    let controller =
        Controller::with_parts(None, Arc::new(FakeGeolocator::at(51.5, -0.1)));

    controller.search_by_city("London").await;
    assert_eq!(controller.state(), UiState::Error(MISSING_KEY_MESSAGE.into()));

    controller.search_by_current_location().await;
    assert_eq!(controller.state(), UiState::Error(MISSING_KEY_MESSAGE.into()));
}

#[tokio::test]
async fn city_search_passes_through_loading_then_displays() {
    let gate = Arc::new(Notify::new());
    let provider = Arc::new(FakeProvider::gated(gate.clone()));
    let controller = controller_with(provider.clone(), FakeGeolocator::at(0.0, 0.0));

    let mut states = controller.subscribe();
    let task = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.search_by_city("  London  ").await })
    };

    // The controller must reach Loading (controls disabled) before the fetch
    // resolves.
    states
        .wait_for(|state| matches!(state, UiState::Loading))
        .await
        .expect("controller should enter Loading");
    assert!(!controller.state().controls_enabled());

    gate.notify_one();
    task.await.expect("lookup task should not panic");

    let state = controller.state();
    assert_eq!(state, UiState::Displaying(sample_reading()));
    assert!(state.controls_enabled());
    assert_eq!(provider.calls(), 1);
    assert_eq!(
        provider.last_query(),
        Some(LocationQuery::City("London".into()))
    );
}

#[tokio::test]
async fn failed_lookup_lands_in_error_with_mapped_message() {
    let provider = Arc::new(FakeProvider::failing());
    let controller = controller_with(provider.clone(), FakeGeolocator::at(0.0, 0.0));

    controller.search_by_city("Lundon").await;

    assert_eq!(
        controller.state(),
        UiState::Error("City not found. Please check the spelling and try again.".into())
    );
    assert!(controller.state().controls_enabled());
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn unsupported_geolocation_reports_without_fetching() {
    let provider = Arc::new(FakeProvider::succeeding());
    let controller = controller_with(provider.clone(), FakeGeolocator::unsupported());

    controller.search_by_current_location().await;

    assert_eq!(
        controller.state(),
        UiState::Error(GEOLOCATION_UNSUPPORTED_MESSAGE.into())
    );
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn geolocation_failure_maps_to_its_message_and_clears_loading() {
    let provider = Arc::new(FakeProvider::succeeding());
    let controller = controller_with(
        provider.clone(),
        FakeGeolocator::failing(GeoError::PermissionDenied),
    );

    controller.search_by_current_location().await;

    assert_eq!(
        controller.state(),
        UiState::Error("Location access denied. Please allow location access and try again.".into())
    );
    assert!(controller.state().controls_enabled());
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn geolocation_success_fetches_by_coordinates() {
    let provider = Arc::new(FakeProvider::succeeding());
    let controller = controller_with(provider.clone(), FakeGeolocator::at(51.5074, -0.1278));

    controller.search_by_current_location().await;

    assert!(matches!(controller.state(), UiState::Displaying(_)));
    assert_eq!(provider.calls(), 1);
    assert_eq!(
        provider.last_query(),
        Some(LocationQuery::Coordinates {
            latitude: 51.5074,
            longitude: -0.1278,
        })
    );
}

#[tokio::test(start_paused = true)]
async fn error_banner_dismisses_itself_after_five_seconds() {
    let provider = Arc::new(FakeProvider::succeeding());
    let controller = controller_with(provider, FakeGeolocator::at(0.0, 0.0));

    controller.search_by_city("").await;
    assert!(matches!(controller.state(), UiState::Error(_)));

    // Just before the deadline the banner is still up.
    tokio::time::sleep(Duration::from_millis(4_900)).await;
    assert!(matches!(controller.state(), UiState::Error(_)));

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(controller.state(), UiState::Idle);
}

#[tokio::test(start_paused = true)]
async fn stale_dismiss_timer_never_clears_a_displayed_reading() {
    let provider = Arc::new(FakeProvider::succeeding());
    let controller = controller_with(provider, FakeGeolocator::at(0.0, 0.0));

    controller.search_by_city("").await;
    assert!(matches!(controller.state(), UiState::Error(_)));

    // A successful lookup supersedes the banner before its timer fires.
    tokio::time::sleep(Duration::from_secs(1)).await;
    controller.search_by_city("London").await;
    assert!(matches!(controller.state(), UiState::Displaying(_)));

    tokio::time::sleep(Duration::from_secs(6)).await;
    assert!(matches!(controller.state(), UiState::Displaying(_)));
}
