//! Pure projection of a [`WeatherReading`] into display strings.
//!
//! No I/O happens here; the presentation surface decides where the strings
//! end up.

use chrono::DateTime;

use crate::WeatherReading;

/// Fully formatted reading, one field per display region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherCard {
    /// "London, GB"
    pub place: String,
    /// "18°C", rounded to the nearest integer.
    pub temperature: String,
    pub feels_like: String,
    pub description: String,
    pub icon_url: String,
    pub humidity: String,
    pub wind: String,
    pub pressure: String,
    pub visibility: String,
    /// Location-local wall clock, "HH:MM".
    pub sunrise: String,
    pub sunset: String,
}

/// Project a reading into its card. Source units are metric throughout.
pub fn render(reading: &WeatherReading) -> WeatherCard {
    WeatherCard {
        place: format!("{}, {}", reading.city, reading.country),
        temperature: format!("{}°C", reading.temperature_c.round() as i64),
        feels_like: format!("{}°C", reading.feels_like_c.round() as i64),
        description: reading.description.clone(),
        icon_url: icon_url(&reading.icon),
        humidity: format!("{}%", reading.humidity_pct),
        wind: format!("{} m/s", reading.wind_speed_mps),
        pressure: format!("{} hPa", reading.pressure_hpa),
        visibility: format!("{:.1} km", reading.visibility_m / 1000.0),
        sunrise: local_hhmm(reading.sunrise, reading.timezone_offset),
        sunset: local_hhmm(reading.sunset, reading.timezone_offset),
    }
}

/// Icon asset for an OpenWeatherMap condition icon code.
pub fn icon_url(icon: &str) -> String {
    format!("https://openweathermap.org/img/wn/{icon}@2x.png")
}

/// The location's local time: add its UTC offset to the epoch timestamp and
/// read the result as UTC wall clock, zero-padded to two digits each.
pub fn local_hhmm(epoch_secs: i64, timezone_offset_secs: i64) -> String {
    DateTime::from_timestamp(epoch_secs + timezone_offset_secs, 0)
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}
