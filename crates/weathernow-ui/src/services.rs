//! Weather backend: async lookups.
//! All network work runs on spawned tasks; results come back via mpsc.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use weathernow_weather::{
    locate_with_timeout, FetchError, LocationProvider, WeatherClient, WeatherSnapshot,
};

/// Messages sent from async operations back to the controller
#[derive(Debug)]
pub enum ControllerMessage {
    /// Result of fetching a snapshot for `query`
    FetchDone {
        request: u64,
        query: String,
        result: Result<WeatherSnapshot, FetchError>,
    },
    /// Geolocation finished (or fell back); `query` is what to look up next
    LocationResolved { request: u64, query: String },
}

/// Fetch a snapshot for `query` on a background task.
/// Sends `FetchDone` on the channel when complete.
pub fn request_fetch(
    tx: &UnboundedSender<ControllerMessage>,
    client: Arc<WeatherClient>,
    query: String,
    request: u64,
) {
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = client.fetch_snapshot(&query).await;
        let _ = tx.send(ControllerMessage::FetchDone {
            request,
            query,
            result,
        });
    });
}

/// Resolve the device location on a background task.
/// Any failure resolves to `fallback` instead of an error.
pub fn request_locate(
    tx: &UnboundedSender<ControllerMessage>,
    locator: Arc<dyn LocationProvider>,
    timeout: Duration,
    fallback: String,
    request: u64,
) {
    let tx = tx.clone();
    tokio::spawn(async move {
        let query = match locate_with_timeout(locator.as_ref(), timeout).await {
            Ok(coords) => {
                tracing::info!("Got location: {}, {}", coords.latitude, coords.longitude);
                coords.to_query()
            }
            Err(e) => {
                tracing::warn!("Geolocation failed ({}), falling back to {}", e, fallback);
                fallback
            }
        };
        let _ = tx.send(ControllerMessage::LocationResolved { request, query });
    });
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use weathernow_weather::{FixedLocation, Unavailable};

    #[tokio::test]
    async fn test_locate_reports_coordinates() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        request_locate(
            &tx,
            Arc::new(FixedLocation::new(48.86, 2.35)),
            Duration::from_secs(1),
            "London".into(),
            3,
        );

        match rx.recv().await.unwrap() {
            ControllerMessage::LocationResolved { request, query } => {
                assert_eq!(request, 3);
                assert_eq!(query, "48.86,2.35");
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_locate_falls_back() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        request_locate(
            &tx,
            Arc::new(Unavailable),
            Duration::from_secs(1),
            "London".into(),
            1,
        );

        match rx.recv().await.unwrap() {
            ControllerMessage::LocationResolved { query, .. } => assert_eq!(query, "London"),
            other => panic!("unexpected message: {:?}", other),
        }
    }
}
