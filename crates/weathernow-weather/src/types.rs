//! Typed records for the WeatherAPI.com payloads.
//!
//! Field names follow the wire format so the same structs serve for the HTTP
//! responses and for the persisted snapshot. Nested sections are optional:
//! a payload missing one of them only blanks that part of the page.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Resolved place returned with every response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    /// Label shown on the page and stored as a favorite, e.g. "London, United Kingdom"
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}

/// Provider condition (text + numeric code)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub icon: String,
    pub code: u32,
}

/// Air quality block (present when requested with `aqi=yes`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AirQuality {
    #[serde(default)]
    pub co: Option<f64>,
    #[serde(default)]
    pub no2: Option<f64>,
    #[serde(default)]
    pub o3: Option<f64>,
    #[serde(default)]
    pub so2: Option<f64>,
    #[serde(default)]
    pub pm2_5: Option<f64>,
    #[serde(default)]
    pub pm10: Option<f64>,
    #[serde(default, rename = "us-epa-index")]
    pub us_epa_index: Option<u8>,
}

impl AirQuality {
    /// US-EPA index category, 1 (good) to 6 (hazardous)
    pub fn epa_category(&self) -> Option<&'static str> {
        match self.us_epa_index? {
            1 => Some("Good"),
            2 => Some("Moderate"),
            3 => Some("Unhealthy for sensitive groups"),
            4 => Some("Unhealthy"),
            5 => Some("Very unhealthy"),
            6 => Some("Hazardous"),
            _ => None,
        }
    }
}

/// Current conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temp_c: f64,
    pub temp_f: f64,
    /// 1 during daylight, 0 at night
    #[serde(default = "default_is_day")]
    pub is_day: u8,
    pub condition: Condition,
    pub wind_kph: f64,
    pub wind_mph: f64,
    pub humidity: f64,
    pub vis_km: f64,
    pub vis_miles: f64,
    pub feelslike_c: f64,
    pub feelslike_f: f64,
    #[serde(default)]
    pub air_quality: Option<AirQuality>,
}

fn default_is_day() -> u8 {
    1
}

impl CurrentConditions {
    pub fn is_daytime(&self) -> bool {
        self.is_day != 0
    }
}

/// A single weather alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default, rename = "desc")]
    pub description: String,
}

/// Alerts envelope: `{"alert": [...]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AlertList {
    #[serde(default)]
    pub alert: Vec<Alert>,
}

impl AlertList {
    pub fn is_empty(&self) -> bool {
        self.alert.is_empty()
    }
}

/// Daily aggregate inside a forecast or history day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub maxtemp_c: f64,
    pub maxtemp_f: f64,
    pub mintemp_c: f64,
    pub mintemp_f: f64,
    #[serde(default)]
    pub totalprecip_mm: Option<f64>,
    pub condition: Condition,
}

/// One day of a forecast or history response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub day: DaySummary,
}

/// `{"forecastday": [...]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Forecast {
    #[serde(default)]
    pub forecastday: Vec<ForecastDay>,
}

/// Response of `current.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentReport {
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub current: Option<CurrentConditions>,
    #[serde(default)]
    pub alerts: Option<AlertList>,
}

/// Response of `forecast.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub forecast: Option<Forecast>,
    #[serde(default)]
    pub alerts: Option<AlertList>,
}

impl ForecastReport {
    /// Forecast days in response order (the first one is today)
    pub fn days(&self) -> &[ForecastDay] {
        self.forecast
            .as_ref()
            .map(|f| f.forecastday.as_slice())
            .unwrap_or_default()
    }
}

/// Response of `history.json` for a single date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalDay {
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub forecast: Option<Forecast>,
}

impl HistoricalDay {
    /// The observed day, if the payload carries one
    pub fn observed(&self) -> Option<&ForecastDay> {
        self.forecast.as_ref()?.forecastday.first()
    }
}

/// One combined fetch: current + forecast + history, plus capture time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub current: CurrentReport,
    pub forecast: ForecastReport,
    #[serde(default)]
    pub history: Vec<HistoricalDay>,
    pub captured_at: DateTime<Utc>,
}

impl WeatherSnapshot {
    /// Alerts to display: the current-conditions alerts object wins whenever
    /// it is present, even if empty; forecast alerts are only a fallback.
    pub fn alerts(&self) -> &[Alert] {
        self.current
            .alerts
            .as_ref()
            .or(self.forecast.alerts.as_ref())
            .map(|list| list.alert.as_slice())
            .unwrap_or_default()
    }

    /// Location resolved by the current-conditions call
    pub fn location(&self) -> Option<&Location> {
        self.current.location.as_ref()
    }

    /// Age relative to `now`
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        now.signed_duration_since(self.captured_at)
    }
}

/// Coordinates from a geolocation provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Location query string understood by the weather service: `"<lat>,<lon>"`
    pub fn to_query(self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

/// Location service errors
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location service unavailable")]
    ServiceUnavailable,
    #[error("Location request timed out")]
    Timeout,
}

/// Weather client errors
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: &'static str, status: u16 },
    #[error("Parse error from {endpoint}: {message}")]
    Parse {
        endpoint: &'static str,
        message: String,
    },
}
