//! Weather backend: async location detection and weather fetching.
//! All provider work runs off the UI thread; results sent via mpsc.

use std::sync::Arc;

use skycast_weather::{LocationProvider, WeatherProvider, WeatherSnapshot};

use crate::bridge;

/// Error type for weather operations
#[derive(Debug, Clone)]
pub enum WeatherServiceError {
    Location(String),
    Weather(String),
    NotInitialized,
}

impl std::fmt::Display for WeatherServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeatherServiceError::Location(s) => write!(f, "Location error: {}", s),
            WeatherServiceError::Weather(s) => write!(f, "Weather error: {}", s),
            WeatherServiceError::NotInitialized => write!(f, "Weather service not initialized"),
        }
    }
}

impl std::error::Error for WeatherServiceError {}

/// Messages sent from async operations back to the UI thread.
///
/// Each message carries the generation of the workflow that produced it
/// so the model can discard completions of superseded workflows.
#[derive(Debug)]
pub enum WeatherServiceMessage {
    /// Result of resolving the current location
    LocateDone {
        generation: u64,
        result: Result<String, WeatherServiceError>,
    },
    /// Result of fetching weather data for a location
    FetchDone {
        generation: u64,
        location: String,
        result: Result<WeatherSnapshot, WeatherServiceError>,
    },
}

/// Request asynchronous location detection.
/// Sends `LocateDone` on the channel when complete.
pub fn request_locate(
    tx: &std::sync::mpsc::Sender<WeatherServiceMessage>,
    provider: Arc<dyn LocationProvider>,
    generation: u64,
) {
    let tx = tx.clone();
    let runtime = match bridge::get_runtime() {
        Some(r) => r,
        None => {
            let _ = tx.send(WeatherServiceMessage::LocateDone {
                generation,
                result: Err(WeatherServiceError::NotInitialized),
            });
            return;
        }
    };

    runtime.spawn(async move {
        let result = provider
            .resolve_current_location()
            .await
            .map_err(|e| WeatherServiceError::Location(e.to_string()));
        let _ = tx.send(WeatherServiceMessage::LocateDone { generation, result });
    });
}

/// Request an asynchronous weather fetch for `location`.
/// Sends `FetchDone` on the channel when complete.
///
/// `location` must already be trimmed and non-empty; validating input is
/// the model's job and no provider call is made for empty input there.
pub fn request_fetch(
    tx: &std::sync::mpsc::Sender<WeatherServiceMessage>,
    provider: Arc<dyn WeatherProvider>,
    location: String,
    generation: u64,
) {
    let tx = tx.clone();
    let runtime = match bridge::get_runtime() {
        Some(r) => r,
        None => {
            let _ = tx.send(WeatherServiceMessage::FetchDone {
                generation,
                location,
                result: Err(WeatherServiceError::NotInitialized),
            });
            return;
        }
    };

    runtime.spawn(async move {
        let result = provider
            .fetch_weather(&location)
            .await
            .map_err(|e| WeatherServiceError::Weather(e.to_string()));
        let _ = tx.send(WeatherServiceMessage::FetchDone {
            generation,
            location,
            result,
        });
    });
}
