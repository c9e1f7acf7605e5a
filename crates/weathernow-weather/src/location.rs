//! Geolocation providers.
//!
//! The controller asks a provider for coordinates when the user picks
//! "use my location"; any error (including a timeout) makes it fall back to
//! the configured default query.

use std::time::Duration;

use async_trait::async_trait;

use crate::types::{Coordinates, LocationError};

#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_location(&self) -> Result<Coordinates, LocationError>;
}

/// Provider that always reports the same coordinates (from configuration).
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation {
    coordinates: Coordinates,
}

impl FixedLocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            coordinates: Coordinates {
                latitude,
                longitude,
            },
        }
    }
}

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_location(&self) -> Result<Coordinates, LocationError> {
        Ok(self.coordinates)
    }
}

/// Provider for platforms without a location service.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

#[async_trait]
impl LocationProvider for Unavailable {
    async fn current_location(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::ServiceUnavailable)
    }
}

/// Ask `provider` for a fix, giving up after `timeout`.
pub async fn locate_with_timeout(
    provider: &dyn LocationProvider,
    timeout: Duration,
) -> Result<Coordinates, LocationError> {
    match tokio::time::timeout(timeout, provider.current_location()).await {
        Ok(result) => result,
        Err(_) => Err(LocationError::Timeout),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    struct Stalled;

    #[async_trait]
    impl LocationProvider for Stalled {
        async fn current_location(&self) -> Result<Coordinates, LocationError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Err(LocationError::ServiceUnavailable)
        }
    }

    #[tokio::test]
    async fn test_fixed_location() {
        let provider = FixedLocation::new(48.85, 2.35);
        let coords = locate_with_timeout(&provider, Duration::from_secs(10))
            .await
            .unwrap();
        assert_eq!(coords.to_query(), "48.85,2.35");
    }

    #[tokio::test]
    async fn test_unavailable() {
        let result = locate_with_timeout(&Unavailable, Duration::from_secs(10)).await;
        assert!(matches!(result, Err(LocationError::ServiceUnavailable)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout() {
        let result = locate_with_timeout(&Stalled, Duration::from_secs(10)).await;
        assert!(matches!(result, Err(LocationError::Timeout)));
    }
}
