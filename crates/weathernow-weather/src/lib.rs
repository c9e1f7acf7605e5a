//! Weather service for WeatherNow
//!
//! Provides current conditions, forecast and history from WeatherAPI.com,
//! the condition icon table and geolocation providers.

pub mod client;
pub mod icons;
pub mod location;
pub mod types;

pub use client::WeatherClient;
pub use icons::{icon_for, UNKNOWN_ICON};
pub use location::{locate_with_timeout, FixedLocation, LocationProvider, Unavailable};
pub use types::*;
