//! WeatherAPI.com client.
//!
//! A snapshot is built from two mandatory calls (current conditions and
//! forecast) and a best-effort fan-out over the previous days' history.

use chrono::{DateTime, Days, NaiveDate, Utc};
use futures::future::join_all;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::types::{CurrentReport, FetchError, ForecastReport, HistoricalDay, WeatherSnapshot};

const USER_AGENT: &str = concat!("WeatherNow/", env!("CARGO_PKG_VERSION"));

const DEFAULT_FORECAST_DAYS: u32 = 3;
const DEFAULT_HISTORY_DAYS: u32 = 7;

#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
    forecast_days: u32,
    history_days: u32,
}

impl WeatherClient {
    /// Client against `base_url` (the configured service, or a mock server in tests).
    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self, FetchError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            forecast_days: DEFAULT_FORECAST_DAYS,
            history_days: DEFAULT_HISTORY_DAYS,
        })
    }

    pub fn with_forecast_days(mut self, days: u32) -> Self {
        self.forecast_days = days;
        self
    }

    pub fn with_history_days(mut self, days: u32) -> Self {
        self.history_days = days;
        self
    }

    /// Fetch current conditions, forecast and history for `query`.
    ///
    /// Fails if either mandatory call fails; history failures only shorten
    /// the history list.
    pub async fn fetch_snapshot(&self, query: &str) -> Result<WeatherSnapshot, FetchError> {
        self.fetch_snapshot_at(query, Utc::now()).await
    }

    /// Same as [`fetch_snapshot`](Self::fetch_snapshot) with an explicit clock.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_snapshot_at(
        &self,
        query: &str,
        now: DateTime<Utc>,
    ) -> Result<WeatherSnapshot, FetchError> {
        let current = self.fetch_current(query).await?;
        let forecast = self.fetch_forecast(query).await?;
        let history = self.fetch_history(query, now.date_naive()).await;

        tracing::info!(
            forecast_days = forecast.days().len(),
            history_days = history.len(),
            "Fetched weather snapshot"
        );

        Ok(WeatherSnapshot {
            current,
            forecast,
            history,
            captured_at: now,
        })
    }

    /// Current conditions with air quality and alerts.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_current(&self, query: &str) -> Result<CurrentReport, FetchError> {
        let url = format!(
            "{}/current.json?key={}&q={}&aqi=yes&alerts=yes",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(query),
        );
        self.get_json("current.json", &url).await
    }

    /// Multi-day forecast with alerts.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_forecast(&self, query: &str) -> Result<ForecastReport, FetchError> {
        let url = format!(
            "{}/forecast.json?key={}&q={}&days={}&aqi=no&alerts=yes",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(query),
            self.forecast_days,
        );
        self.get_json("forecast.json", &url).await
    }

    /// Observations for one past date.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_history_day(
        &self,
        query: &str,
        date: NaiveDate,
    ) -> Result<HistoricalDay, FetchError> {
        let url = format!(
            "{}/history.json?key={}&q={}&dt={}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(query),
            date.format("%Y-%m-%d"),
        );
        self.get_json("history.json", &url).await
    }

    /// Best-effort history for the days before `today`, most recent first.
    ///
    /// All requests run concurrently. A failed day is dropped; the remaining
    /// days keep their day-offset order.
    pub async fn fetch_history(&self, query: &str, today: NaiveDate) -> Vec<HistoricalDay> {
        let dates: Vec<NaiveDate> = (1..=u64::from(self.history_days))
            .filter_map(|k| today.checked_sub_days(Days::new(k)))
            .collect();

        let results = join_all(dates.iter().map(|date| async move {
            match self.fetch_history_day(query, *date).await {
                Ok(day) => Some(day),
                Err(e) => {
                    tracing::warn!("History for {} unavailable: {}", date, e);
                    None
                }
            }
        }))
        .await;

        results.into_iter().flatten().collect()
    }

    /// GET `url` and decode the body, mapping non-success statuses to errors.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: &str,
    ) -> Result<T, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            tracing::debug!("{} returned status {}", endpoint, status);
            return Err(FetchError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Parse {
            endpoint,
            message: e.to_string(),
        })
    }
}
