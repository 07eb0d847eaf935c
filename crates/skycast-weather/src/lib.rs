//! Weather domain for Skycast
//!
//! Defines the snapshot data model, the location/weather provider
//! contracts, their built-in implementations, and the condition-to-icon
//! mapping used by the UI.

pub mod icon;
pub mod location;
pub mod provider;
pub mod types;

pub use icon::icon_for;
pub use location::{IpLocationProvider, LocationProvider, StaticLocationProvider};
pub use provider::{StaticWeatherProvider, WeatherProvider};
pub use types::*;
