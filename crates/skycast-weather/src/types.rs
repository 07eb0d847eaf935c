use serde::{Deserialize, Serialize};

/// One day of forecast data, owned by its parent [`WeatherSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Display label for the day (e.g. "Day 1" or a formatted date)
    pub date: String,
    pub condition: String,
    pub max_temp_c: i32,
    pub min_temp_c: i32,
    pub humidity_pct: u8,
    pub wind_speed_kmh: i32,
}

/// An immutable bundle of current conditions and forecast for one
/// location at one point in time.
///
/// A snapshot is created fresh per successful fetch and superseded, never
/// mutated, on refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location_name: String,
    pub condition: String,
    pub temperature_c: i32,
    pub humidity_pct: u8,
    pub wind_speed_kmh: i32,
    pub wind_direction: String,
    pub pressure_hpa: i32,
    pub visibility_km: i32,
    pub forecast: Vec<ForecastDay>,
}

/// Location provider errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum LocationError {
    /// Detection ran but produced no usable result (includes blank output).
    #[error("location detection produced no usable result")]
    Unavailable,
    #[error("location service error: {0}")]
    Service(String),
}

/// Weather provider errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum WeatherError {
    /// No data could be produced for the given location. Covers both
    /// unknown locations and transient fetch problems; the contract does
    /// not distinguish them.
    #[error("no weather data available for {0}")]
    Unavailable(String),
    #[error("weather service error: {0}")]
    Service(String),
}
