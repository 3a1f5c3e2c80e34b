use crate::{LocationQuery, LookupError, WeatherReading};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// The fetch seam of the lookup pipeline.
///
/// One call, one outbound request, one result; resolution and classification
/// of failures happens behind this trait so the controller can be driven by a
/// fake in tests.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_reading(&self, query: &LocationQuery) -> Result<WeatherReading, LookupError>;
}
