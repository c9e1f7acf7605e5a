//! Centralized error types for WeatherNow.
//!
//! This module provides a typed error hierarchy that:
//! - Enables precise error handling throughout the codebase
//! - Reduces every user-visible failure to a fixed, non-technical message
//! - Preserves full error context for logging

use thiserror::Error;

/// Top-level application error type.
///
/// Use `user_message()` to get the text shown on the page.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Weather error: {0}")]
    Weather(#[from] WeatherError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AppError {
    /// Returns a user-friendly message suitable for display on the page.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Weather(e) => e.user_message(),
            AppError::Storage(e) => e.user_message(),
        }
    }
}

/// Weather lookup errors as seen by the page.
///
/// The detailed transport error is logged where it happens; the page only
/// ever learns which of these buckets the failure fell into.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Empty location query")]
    EmptyQuery,

    #[error("Weather fetch failed: {0}")]
    FetchFailed(String),

    #[error("API key not configured")]
    MissingApiKey,
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::EmptyQuery => "Please enter a location to search",
            WeatherError::FetchFailed(_) => {
                "Unable to fetch weather data. Please check your location and try again."
            }
            WeatherError::MissingApiKey => {
                "Please set your WeatherAPI key in the config file or the WEATHERAPI_KEY environment variable."
            }
        }
    }
}

/// Local storage errors (SQLite key-value table).
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Data corruption detected: {0}")]
    Corruption(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl StorageError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StorageError::Unavailable(_) => {
                "Unable to access saved preferences. Try restarting the app."
            }
            StorageError::QueryFailed(_) => "Saving your preferences failed. Please try again.",
            StorageError::Corruption(_) => {
                "Saved data may be corrupted. Consider deleting the preference database."
            }
            StorageError::Serialization(_) => "Saving your preferences failed. Please try again.",
        }
    }
}

/// Extension trait for converting rusqlite errors to our error types.
pub trait RusqliteErrorExt {
    fn into_storage_error(self) -> StorageError;
}

impl RusqliteErrorExt for rusqlite::Error {
    fn into_storage_error(self) -> StorageError {
        match &self {
            rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.contains("corrupt") => {
                StorageError::Corruption(self.to_string())
            }
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::CannotOpen =>
            {
                StorageError::Unavailable(self.to_string())
            }
            _ => StorageError::QueryFailed(self.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_non_empty() {
        let messages = [
            WeatherError::EmptyQuery.user_message(),
            WeatherError::FetchFailed("x".into()).user_message(),
            WeatherError::MissingApiKey.user_message(),
            StorageError::QueryFailed("x".into()).user_message(),
            StorageError::Corruption("x".into()).user_message(),
        ];

        for message in messages {
            assert!(!message.is_empty());
        }
    }

    #[test]
    fn test_app_error_conversion() {
        let err: AppError = WeatherError::EmptyQuery.into();
        assert!(matches!(err, AppError::Weather(WeatherError::EmptyQuery)));
    }

    #[test]
    fn test_fetch_failure_hides_detail() {
        let app_err = AppError::Weather(WeatherError::FetchFailed(
            "HTTP 400 from current.json".into(),
        ));
        assert_eq!(
            app_err.user_message(),
            "Unable to fetch weather data. Please check your location and try again."
        );
    }

    #[test]
    fn test_empty_query_message() {
        assert_eq!(
            WeatherError::EmptyQuery.user_message(),
            "Please enter a location to search"
        );
    }

    #[test]
    fn test_rusqlite_error_mapping() {
        let err = rusqlite::Error::QueryReturnedNoRows.into_storage_error();
        assert!(matches!(err, StorageError::QueryFailed(_)));
    }
}
