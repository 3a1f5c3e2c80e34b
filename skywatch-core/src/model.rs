use serde::{Deserialize, Serialize};

/// Input discriminator for a weather lookup: either a place name typed by the
/// user or a coordinate pair resolved from the host's location.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    City(String),
    Coordinates { latitude: f64, longitude: f64 },
}

/// Decoded current-weather payload used to populate the display.
///
/// Held only for the current render cycle; a new lookup replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub city: String,
    pub country: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub description: String,
    pub icon: String,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub pressure_hpa: u32,
    pub visibility_m: f64,
    /// Sunrise/sunset as epoch seconds UTC.
    pub sunrise: i64,
    pub sunset: i64,
    /// Offset of the location's timezone from UTC, in seconds.
    pub timezone_offset: i64,
}

/// The single source of truth for which panel is visible and whether the
/// trigger controls accept input.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum UiState {
    /// Initial state, welcome panel shown.
    #[default]
    Idle,
    Loading,
    Displaying(WeatherReading),
    Error(String),
}

impl UiState {
    /// The search and current-location triggers are disabled only while a
    /// lookup is in flight.
    pub fn controls_enabled(&self) -> bool {
        !matches!(self, UiState::Loading)
    }
}
