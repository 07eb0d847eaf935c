//! Weather provider contract and built-in implementations.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::types::{ForecastDay, WeatherError, WeatherSnapshot};

/// Source of weather snapshots for a named location.
///
/// Implementations may block on network I/O and must therefore be invoked
/// off the rendering thread. Callers must validate that `location` is
/// non-empty after trimming before calling; empty input is a caller
/// error, not a provider failure.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_weather(&self, location: &str) -> Result<WeatherSnapshot, WeatherError>;
}

/// Built-in provider returning static data.
///
/// Stands in for a network-backed weather API: the snapshot echoes the
/// requested location and carries fixed current conditions plus a
/// generated forecast of `forecast_days` entries.
#[derive(Debug, Clone)]
pub struct StaticWeatherProvider {
    forecast_days: u32,
}

impl StaticWeatherProvider {
    pub fn new(forecast_days: u32) -> Self {
        Self { forecast_days }
    }
}

impl Default for StaticWeatherProvider {
    fn default() -> Self {
        Self::new(5)
    }
}

#[async_trait]
impl WeatherProvider for StaticWeatherProvider {
    async fn fetch_weather(&self, location: &str) -> Result<WeatherSnapshot, WeatherError> {
        tracing::debug!("Producing static weather data for {}", location);

        let forecast = (1..=self.forecast_days as i32)
            .map(|i| ForecastDay {
                date: format!("Day {}", i),
                condition: if i % 2 == 0 { "Sunny" } else { "Cloudy" }.to_string(),
                max_temp_c: 20 + i,
                min_temp_c: 10 + i,
                humidity_pct: (60 + i) as u8,
                wind_speed_kmh: 5 + i,
            })
            .collect();

        Ok(WeatherSnapshot {
            location_name: location.to_string(),
            condition: "Sunny".to_string(),
            temperature_c: 25,
            humidity_pct: 65,
            wind_speed_kmh: 12,
            wind_direction: "NW".to_string(),
            pressure_hpa: 1013,
            visibility_km: 10,
            forecast,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_provider_echoes_location() {
        let provider = StaticWeatherProvider::default();
        let snapshot = provider.fetch_weather("Paris").await.expect("fetch");
        assert_eq!(snapshot.location_name, "Paris");
    }

    #[tokio::test]
    async fn static_provider_current_conditions() {
        let provider = StaticWeatherProvider::default();
        let snapshot = provider.fetch_weather("Berlin").await.expect("fetch");
        assert_eq!(snapshot.condition, "Sunny");
        assert_eq!(snapshot.temperature_c, 25);
        assert_eq!(snapshot.humidity_pct, 65);
        assert_eq!(snapshot.wind_speed_kmh, 12);
        assert_eq!(snapshot.wind_direction, "NW");
        assert_eq!(snapshot.pressure_hpa, 1013);
        assert_eq!(snapshot.visibility_km, 10);
    }

    #[tokio::test]
    async fn static_provider_forecast_length_follows_config() {
        let provider = StaticWeatherProvider::new(7);
        let snapshot = provider.fetch_weather("Oslo").await.expect("fetch");
        assert_eq!(snapshot.forecast.len(), 7);
    }

    #[tokio::test]
    async fn static_provider_forecast_values() {
        let provider = StaticWeatherProvider::default();
        let snapshot = provider.fetch_weather("Rome").await.expect("fetch");
        assert_eq!(snapshot.forecast.len(), 5);

        let first = &snapshot.forecast[0];
        assert_eq!(first.date, "Day 1");
        assert_eq!(first.condition, "Cloudy");
        assert_eq!(first.max_temp_c, 21);
        assert_eq!(first.min_temp_c, 11);
        assert_eq!(first.humidity_pct, 61);
        assert_eq!(first.wind_speed_kmh, 6);

        let second = &snapshot.forecast[1];
        assert_eq!(second.condition, "Sunny");
    }

    #[tokio::test]
    async fn snapshots_are_fresh_per_fetch() {
        let provider = StaticWeatherProvider::default();
        let a = provider.fetch_weather("Lyon").await.expect("fetch");
        let b = provider.fetch_weather("Lyon").await.expect("fetch");
        // Equal by value but independently owned
        assert_eq!(a, b);
    }
}
