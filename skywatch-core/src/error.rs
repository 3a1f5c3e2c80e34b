use thiserror::Error;

/// Failures of a single weather lookup.
///
/// Every variant is terminal for the request (nothing is retried) and maps to
/// exactly one banner message shown to the user.
#[derive(Debug, Error)]
pub enum LookupError {
    /// HTTP 404 on a city lookup. Coordinate lookups never produce this; a
    /// 404 there falls into [`LookupError::Upstream`].
    #[error("City not found. Please check the spelling and try again.")]
    CityNotFound,

    /// HTTP 401 from the weather endpoint.
    #[error("Invalid API key. Please check your OpenWeatherMap API key.")]
    InvalidApiKey,

    /// Any other non-success HTTP status.
    #[error("Failed to fetch weather data. Please try again later.")]
    Upstream { status: reqwest::StatusCode },

    /// Transport-level failure; the underlying message is surfaced as-is.
    #[error(transparent)]
    Network(#[from] reqwest::Error),

    /// The response body did not decode into a weather reading.
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
}

/// The four failure kinds a current-position request can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeoError {
    #[error("Location access denied. Please allow location access and try again.")]
    PermissionDenied,
    #[error("Location information is unavailable.")]
    PositionUnavailable,
    #[error("Location request timed out.")]
    Timeout,
    #[error("An unknown error occurred while getting your location.")]
    Unknown,
}
