//! Global services for the Qt host application.
//!
//! The host calls `initialize_weather_services()` once before the QML
//! engine instantiates any model; models pull providers, the runtime and
//! the service channel from here.

use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

use skycast_core::Config;
use skycast_weather::{
    IpLocationProvider, LocationProvider, StaticLocationProvider, StaticWeatherProvider,
    WeatherProvider,
};

use crate::services::WeatherServiceMessage;

// Static tokio runtime that lives for the duration of the application
static RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();

// Injected provider instances
static LOCATION_PROVIDER: OnceLock<Arc<dyn LocationProvider>> = OnceLock::new();
static WEATHER_PROVIDER: OnceLock<Arc<dyn WeatherProvider>> = OnceLock::new();

// Weather service channel
static WEATHER_SERVICE_TX: OnceLock<std::sync::mpsc::Sender<WeatherServiceMessage>> =
    OnceLock::new();
static WEATHER_SERVICE_RX: OnceLock<Mutex<std::sync::mpsc::Receiver<WeatherServiceMessage>>> =
    OnceLock::new();

/// Initialize the tokio runtime (call once at application startup).
/// Returns false if the runtime could not be built.
fn init_runtime() -> bool {
    if RUNTIME.get().is_some() {
        return true;
    }

    match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("skycast-tokio")
        .build()
    {
        Ok(runtime) => {
            if RUNTIME.set(runtime).is_err() {
                tracing::warn!("Runtime already initialized");
            }
            true
        }
        Err(e) => {
            tracing::error!("Failed to create tokio runtime: {}", e);
            false
        }
    }
}

/// Initialize weather services.
/// Must be called by the host before QML tries to access WeatherModel.
#[no_mangle]
pub extern "C" fn initialize_weather_services() -> bool {
    // Initialize tracing if not already done
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();

    if !init_runtime() {
        return false;
    }

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to load config: {}. Using defaults.", e);
            Config::default()
        }
    };

    let location_provider: Arc<dyn LocationProvider> = if config.location.use_static_provider {
        Arc::new(StaticLocationProvider)
    } else {
        match IpLocationProvider::new(config.location.geolocation_endpoint.as_str()) {
            Ok(p) => Arc::new(p),
            Err(e) => {
                tracing::warn!("Falling back to static location provider: {}", e);
                Arc::new(StaticLocationProvider)
            }
        }
    };

    let weather_provider: Arc<dyn WeatherProvider> =
        Arc::new(StaticWeatherProvider::new(config.weather.forecast_days));

    if LOCATION_PROVIDER.set(location_provider).is_err() {
        tracing::warn!("Location provider already initialized");
    }

    if WEATHER_PROVIDER.set(weather_provider).is_err() {
        tracing::warn!("Weather provider already initialized");
    }

    init_weather_service_channel();

    tracing::info!("Weather services initialized successfully");
    true
}

/// Get the injected location provider.
pub fn get_location_provider() -> Option<Arc<dyn LocationProvider>> {
    LOCATION_PROVIDER.get().cloned()
}

/// Get the injected weather provider.
pub fn get_weather_provider() -> Option<Arc<dyn WeatherProvider>> {
    WEATHER_PROVIDER.get().cloned()
}

/// Get the runtime handle (available after initialization).
pub fn get_runtime() -> Option<tokio::runtime::Handle> {
    RUNTIME.get().map(|r| r.handle().clone())
}

/// Initialize the weather service channel. Called once when the services
/// come up; safe to call again from a model.
/// Returns true if initialized (or already initialized).
pub fn init_weather_service_channel() -> bool {
    if WEATHER_SERVICE_TX.get().is_some() {
        return true;
    }
    let (tx, rx) = std::sync::mpsc::channel();
    WEATHER_SERVICE_TX.set(tx).ok();
    WEATHER_SERVICE_RX.set(Mutex::new(rx)).ok();
    true
}

/// Get the weather service sender for request_* calls.
/// None if the channel has not been initialized yet.
pub fn get_weather_service_tx() -> Option<std::sync::mpsc::Sender<WeatherServiceMessage>> {
    WEATHER_SERVICE_TX.get().cloned()
}

/// Non-blocking recv from the weather service channel.
/// Called by WeatherModel::poll_channel on the Qt thread.
pub fn try_recv_weather_message() -> Option<WeatherServiceMessage> {
    let rx = WEATHER_SERVICE_RX.get()?;
    rx.lock().try_recv().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_init_is_idempotent() {
        assert!(init_weather_service_channel());
        assert!(init_weather_service_channel());
        assert!(get_weather_service_tx().is_some());
    }

    #[test]
    fn try_recv_on_empty_channel_is_none() {
        init_weather_service_channel();
        // Drain anything a sibling test may have queued, then verify empty.
        while try_recv_weather_message().is_some() {}
        assert!(try_recv_weather_message().is_none());
    }
}
