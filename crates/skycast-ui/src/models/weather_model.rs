//! WeatherModel: the QML-facing presentation controller.
//!
//! Sequences the locate-then-fetch and explicit-fetch workflows, keeps
//! the display state, and mirrors it into the properties QML renders.
//! Provider results arrive over the weather service channel and are
//! applied on the Qt thread by `poll_channel`, driven by a timer in the
//! host QML. The host triggers `use_my_location` once after startup.

use core::pin::Pin;
use std::sync::Arc;

use cxx_qt::CxxQtType;
use cxx_qt_lib::QString;

use chrono::Local;
use skycast_core::AppError;
use skycast_weather::{icon_for, LocationProvider, WeatherProvider, WeatherSnapshot};

use crate::bridge;
use crate::display::{normalized_location, DisplayState, GenerationCounter};
use crate::services::{request_location_detect, request_weather_fetch, WeatherServiceMessage};

#[cxx_qt::bridge]
pub mod qobject {
    unsafe extern "C++" {
        include!("cxx-qt-lib/qstring.h");
        type QString = cxx_qt_lib::QString;
    }

    extern "RustQt" {
        #[qobject]
        #[qml_element]
        #[qproperty(bool, loading)]
        #[qproperty(bool, has_data)]
        #[qproperty(QString, status)]
        #[qproperty(QString, location_input)]
        // Current weather properties
        #[qproperty(QString, location_name)]
        #[qproperty(QString, condition)]
        #[qproperty(QString, condition_icon)]
        #[qproperty(i32, temperature)]
        #[qproperty(i32, humidity)]
        #[qproperty(QString, wind)]
        #[qproperty(i32, pressure)]
        #[qproperty(i32, visibility)]
        #[qproperty(QString, last_updated)]
        type WeatherModel = super::WeatherModelRust;

        #[qinvokable]
        fn search(self: Pin<&mut WeatherModel>, location: &QString);

        #[qinvokable]
        fn use_my_location(self: Pin<&mut WeatherModel>);

        #[qinvokable]
        fn refresh(self: Pin<&mut WeatherModel>);

        #[qinvokable]
        fn poll_channel(self: Pin<&mut WeatherModel>);

        #[qinvokable]
        fn forecast_count(self: &WeatherModel) -> i32;

        #[qinvokable]
        fn get_forecast_date(self: &WeatherModel, index: i32) -> QString;

        #[qinvokable]
        fn get_forecast_condition(self: &WeatherModel, index: i32) -> QString;

        #[qinvokable]
        fn get_forecast_icon(self: &WeatherModel, index: i32) -> QString;

        #[qinvokable]
        fn get_forecast_high(self: &WeatherModel, index: i32) -> i32;

        #[qinvokable]
        fn get_forecast_low(self: &WeatherModel, index: i32) -> i32;

        #[qinvokable]
        fn get_forecast_humidity(self: &WeatherModel, index: i32) -> i32;

        #[qinvokable]
        fn get_forecast_wind(self: &WeatherModel, index: i32) -> i32;

        #[qsignal]
        fn weather_changed(self: Pin<&mut WeatherModel>);

        /// Modal notification request; severity is "Warning" or "Error".
        #[qsignal]
        fn notify(self: Pin<&mut WeatherModel>, severity: QString, message: QString);
    }
}

pub struct WeatherModelRust {
    loading: bool,
    has_data: bool,
    status: QString,
    location_input: QString,
    // Current weather
    location_name: QString,
    condition: QString,
    condition_icon: QString,
    temperature: i32,
    humidity: i32,
    wind: QString,
    pressure: i32,
    visibility: i32,
    last_updated: QString,
    // Internal state
    display: DisplayState,
    generations: GenerationCounter,
    location_provider: Option<Arc<dyn LocationProvider>>,
    weather_provider: Option<Arc<dyn WeatherProvider>>,
}

impl Default for WeatherModelRust {
    fn default() -> Self {
        let display = DisplayState::default();
        Self {
            loading: false,
            has_data: false,
            status: QString::from(display.status()),
            location_input: QString::from(""),
            location_name: QString::from("No location selected"),
            condition: QString::from("--"),
            condition_icon: QString::from(""),
            temperature: 0,
            humidity: 0,
            wind: QString::from("--"),
            pressure: 0,
            visibility: 0,
            last_updated: QString::from(display.last_updated_label().as_str()),
            display,
            generations: GenerationCounter::default(),
            location_provider: None,
            weather_provider: None,
        }
    }
}

impl WeatherModelRust {
    fn ensure_initialized(&mut self) {
        if self.location_provider.is_some() && self.weather_provider.is_some() {
            return;
        }

        match (bridge::get_location_provider(), bridge::get_weather_provider()) {
            (Some(location), Some(weather)) => {
                self.location_provider = Some(location);
                self.weather_provider = Some(weather);
                tracing::info!("WeatherModel auto-initialized from global services");
            }
            _ => {
                tracing::error!("Cannot auto-initialize WeatherModel - global services not ready");
            }
        }
    }

    /// Mirror the display state into the properties QML reads. The
    /// snapshot fields are copied in one pass so the rendered values
    /// always come from a single completed fetch.
    fn sync_from_display(&mut self) {
        self.status = QString::from(self.display.status());
        self.last_updated = QString::from(self.display.last_updated_label().as_str());
        self.has_data = self.display.has_data();

        if let Some(snapshot) = self.display.snapshot() {
            self.location_name = QString::from(snapshot.location_name.as_str());
            self.condition = QString::from(snapshot.condition.as_str());
            self.condition_icon = QString::from(icon_for(&snapshot.condition));
            self.temperature = snapshot.temperature_c;
            self.humidity = i32::from(snapshot.humidity_pct);
            self.wind = QString::from(
                format!("{} km/h {}", snapshot.wind_speed_kmh, snapshot.wind_direction).as_str(),
            );
            self.pressure = snapshot.pressure_hpa;
            self.visibility = snapshot.visibility_km;
        }
    }

    fn forecast_day(&self, index: i32) -> Option<&skycast_weather::ForecastDay> {
        if index < 0 {
            return None;
        }
        self.display
            .snapshot()
            .and_then(|s| s.forecast.get(index as usize))
    }
}

impl qobject::WeatherModel {
    /// Workflow entry: fetch weather for the typed location.
    pub fn search(mut self: Pin<&mut Self>, location: &QString) {
        self.as_mut().set_location_input(location.clone());
        self.fetch_weather();
    }

    /// Workflow entry: re-fetch for the currently populated location.
    pub fn refresh(mut self: Pin<&mut Self>) {
        let raw = self.as_ref().rust().location_input.to_string();
        if normalized_location(&raw).is_none() {
            self.show_warning("No location to refresh");
            return;
        }
        self.fetch_weather();
    }

    /// Workflow entry: detect the location, then fetch for it.
    pub fn use_my_location(mut self: Pin<&mut Self>) {
        self.as_mut().rust_mut().ensure_initialized();

        let provider = match &self.as_ref().rust().location_provider {
            Some(p) => p.clone(),
            None => {
                self.show_error("Location service not initialized");
                return;
            }
        };

        bridge::init_weather_service_channel();
        let tx = match bridge::get_weather_service_tx() {
            Some(t) => t,
            None => {
                self.show_error("Weather service channel not ready");
                return;
            }
        };

        let generation = self.as_mut().rust_mut().generations.begin();
        self.as_mut().set_loading(true);
        self.as_mut().set_display_status("Detecting location...");
        request_location_detect(&tx, provider, generation);
    }

    /// Drain one pending completion from the service channel.
    /// Results of superseded workflows are discarded here, so only the
    /// most recently started workflow ever updates the display.
    pub fn poll_channel(mut self: Pin<&mut Self>) {
        let msg = match bridge::try_recv_weather_message() {
            Some(m) => m,
            None => return,
        };

        match msg {
            WeatherServiceMessage::LocateDone { generation, result } => {
                if !self.as_ref().rust().generations.is_current(generation) {
                    tracing::debug!("Discarding stale location result");
                    return;
                }
                self.as_mut().set_loading(false);

                match result {
                    Ok(location) if normalized_location(&location).is_some() => {
                        self.as_mut()
                            .set_location_input(QString::from(location.as_str()));
                        self.fetch_weather();
                    }
                    Ok(_) => {
                        self.show_warning("Could not detect location. Please enter manually.");
                    }
                    Err(e) => {
                        let app_err: AppError = e.into();
                        tracing::warn!("Location detection failed: {}", app_err);
                        self.show_warning("Could not detect location. Please enter manually.");
                    }
                }
            }
            WeatherServiceMessage::FetchDone {
                generation,
                location,
                result,
            } => {
                if !self.as_ref().rust().generations.is_current(generation) {
                    tracing::debug!("Discarding stale weather result for {}", location);
                    return;
                }
                self.as_mut().set_loading(false);

                match result {
                    Ok(snapshot) => {
                        self.as_mut().apply_snapshot(snapshot);
                    }
                    Err(e) => {
                        let app_err: AppError = e.into();
                        tracing::error!("Failed to load weather for {}: {}", location, app_err);
                        self.show_error(&format!(
                            "Error loading weather data for {}: {}",
                            location,
                            app_err.user_message()
                        ));
                    }
                }
            }
        }
    }

    pub fn forecast_count(&self) -> i32 {
        self.rust()
            .display
            .snapshot()
            .map(|s| s.forecast.len() as i32)
            .unwrap_or(0)
    }

    pub fn get_forecast_date(&self, index: i32) -> QString {
        self.rust()
            .forecast_day(index)
            .map(|d| QString::from(d.date.as_str()))
            .unwrap_or_default()
    }

    pub fn get_forecast_condition(&self, index: i32) -> QString {
        self.rust()
            .forecast_day(index)
            .map(|d| QString::from(d.condition.as_str()))
            .unwrap_or_default()
    }

    pub fn get_forecast_icon(&self, index: i32) -> QString {
        self.rust()
            .forecast_day(index)
            .map(|d| QString::from(icon_for(&d.condition)))
            .unwrap_or_default()
    }

    pub fn get_forecast_high(&self, index: i32) -> i32 {
        self.rust()
            .forecast_day(index)
            .map(|d| d.max_temp_c)
            .unwrap_or(0)
    }

    pub fn get_forecast_low(&self, index: i32) -> i32 {
        self.rust()
            .forecast_day(index)
            .map(|d| d.min_temp_c)
            .unwrap_or(0)
    }

    pub fn get_forecast_humidity(&self, index: i32) -> i32 {
        self.rust()
            .forecast_day(index)
            .map(|d| i32::from(d.humidity_pct))
            .unwrap_or(0)
    }

    pub fn get_forecast_wind(&self, index: i32) -> i32 {
        self.rust()
            .forecast_day(index)
            .map(|d| d.wind_speed_kmh)
            .unwrap_or(0)
    }

    /// Start a fetch for the trimmed location input. Empty input warns
    /// and dispatches nothing.
    fn fetch_weather(mut self: Pin<&mut Self>) {
        self.as_mut().rust_mut().ensure_initialized();

        let raw = self.as_ref().rust().location_input.to_string();
        let location = match normalized_location(&raw) {
            Some(l) => l,
            None => {
                self.show_warning("Please enter a location");
                return;
            }
        };

        let provider = match &self.as_ref().rust().weather_provider {
            Some(p) => p.clone(),
            None => {
                self.show_error("Weather service not initialized");
                return;
            }
        };

        bridge::init_weather_service_channel();
        let tx = match bridge::get_weather_service_tx() {
            Some(t) => t,
            None => {
                self.show_error("Weather service channel not ready");
                return;
            }
        };

        let generation = self.as_mut().rust_mut().generations.begin();
        self.as_mut().set_loading(true);
        self.as_mut()
            .set_display_status(&format!("Loading weather data for {}...", location));
        request_weather_fetch(&tx, provider, location, generation);
    }

    /// Apply a successful fetch to the display state and properties.
    fn apply_snapshot(mut self: Pin<&mut Self>, snapshot: WeatherSnapshot) {
        self.as_mut()
            .rust_mut()
            .display
            .apply_snapshot(snapshot, Local::now());
        self.as_mut().rust_mut().sync_from_display();
        self.weather_changed();
    }

    /// Set a plain lifecycle status message.
    fn set_display_status(mut self: Pin<&mut Self>, message: &str) {
        self.as_mut().rust_mut().display.set_status(message);
        self.as_mut().set_status(QString::from(message));
    }

    fn show_warning(mut self: Pin<&mut Self>, message: &str) {
        self.as_mut().rust_mut().display.apply_warning(message);
        let status = QString::from(self.as_ref().rust().display.status());
        self.as_mut().set_status(status);
        self.notify(QString::from("Warning"), QString::from(message));
    }

    fn show_error(mut self: Pin<&mut Self>, message: &str) {
        self.as_mut().rust_mut().display.apply_error(message);
        let status = QString::from(self.as_ref().rust().display.status());
        self.as_mut().set_status(status);
        self.notify(QString::from("Error"), QString::from(message));
    }
}
