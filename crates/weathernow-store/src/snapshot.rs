//! Last successful snapshot, used to repaint instantly on startup and to
//! re-render after a unit change without refetching.

use chrono::{DateTime, Duration, Utc};
use weathernow_core::StorageError;
use weathernow_weather::WeatherSnapshot;

use crate::kv::{keys, KvStore, StoreResult};

/// Default freshness window
pub const FRESHNESS_WINDOW_MINUTES: i64 = 30;

pub struct SnapshotCache {
    kv: KvStore,
    freshness: Duration,
}

impl SnapshotCache {
    pub fn new(kv: KvStore) -> Self {
        Self {
            kv,
            freshness: Duration::minutes(FRESHNESS_WINDOW_MINUTES),
        }
    }

    pub fn with_freshness(mut self, freshness: Duration) -> Self {
        self.freshness = freshness;
        self
    }

    /// Replace the stored snapshot.
    pub fn store(&self, snapshot: &WeatherSnapshot) -> StoreResult<()> {
        let json = serde_json::to_string(snapshot)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.kv.set(keys::SNAPSHOT, &json)
    }

    /// The stored snapshot regardless of age. Malformed data yields `None`.
    pub fn load(&self) -> Option<WeatherSnapshot> {
        let raw = match self.kv.get(keys::SNAPSHOT) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!("Failed to read cached snapshot: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!("Ignoring malformed cached snapshot: {}", e);
                None
            }
        }
    }

    /// The stored snapshot if it is younger than the freshness window.
    pub fn load_fresh(&self, now: DateTime<Utc>) -> Option<WeatherSnapshot> {
        let snapshot = self.load()?;
        if self.is_fresh(&snapshot, now) {
            Some(snapshot)
        } else {
            tracing::debug!(
                "Cached snapshot from {} is stale",
                snapshot.captured_at.to_rfc3339()
            );
            None
        }
    }

    pub fn is_fresh(&self, snapshot: &WeatherSnapshot, now: DateTime<Utc>) -> bool {
        snapshot.age(now) < self.freshness
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use weathernow_weather::{CurrentReport, ForecastReport, Location};

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-10-16T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn snapshot(captured_at: DateTime<Utc>) -> WeatherSnapshot {
        WeatherSnapshot {
            current: CurrentReport {
                location: Some(Location {
                    name: "Oslo".into(),
                    region: String::new(),
                    country: "Norway".into(),
                    lat: 59.91,
                    lon: 10.75,
                }),
                current: None,
                alerts: None,
            },
            forecast: ForecastReport {
                location: None,
                forecast: None,
                alerts: None,
            },
            history: vec![],
            captured_at,
        }
    }

    #[test]
    fn test_empty_cache() {
        let cache = SnapshotCache::new(KvStore::in_memory().unwrap());
        assert!(cache.load().is_none());
        assert!(cache.load_fresh(now()).is_none());
    }

    #[test]
    fn test_store_and_load() {
        let cache = SnapshotCache::new(KvStore::in_memory().unwrap());
        let s = snapshot(now());
        cache.store(&s).unwrap();
        assert_eq!(cache.load(), Some(s));
    }

    #[test]
    fn test_store_replaces_previous() {
        let cache = SnapshotCache::new(KvStore::in_memory().unwrap());
        cache.store(&snapshot(now() - Duration::hours(2))).unwrap();
        cache.store(&snapshot(now())).unwrap();
        assert_eq!(cache.load().unwrap().captured_at, now());
    }

    #[test]
    fn test_fresh_snapshot_is_used() {
        let cache = SnapshotCache::new(KvStore::in_memory().unwrap());
        cache.store(&snapshot(now() - Duration::minutes(29))).unwrap();
        assert!(cache.load_fresh(now()).is_some());
    }

    #[test]
    fn test_stale_snapshot_is_skipped() {
        let cache = SnapshotCache::new(KvStore::in_memory().unwrap());
        cache.store(&snapshot(now() - Duration::minutes(31))).unwrap();
        assert!(cache.load_fresh(now()).is_none());
        // Still available for repaint purposes
        assert!(cache.load().is_some());
    }

    #[test]
    fn test_exactly_thirty_minutes_is_stale() {
        let cache = SnapshotCache::new(KvStore::in_memory().unwrap());
        let s = snapshot(now() - Duration::minutes(30));
        assert!(!cache.is_fresh(&s, now()));
    }

    #[test]
    fn test_custom_freshness() {
        let cache =
            SnapshotCache::new(KvStore::in_memory().unwrap()).with_freshness(Duration::minutes(5));
        assert!(!cache.is_fresh(&snapshot(now() - Duration::minutes(6)), now()));
    }

    #[test]
    fn test_malformed_snapshot_is_ignored() {
        let kv = KvStore::in_memory().unwrap();
        kv.set(keys::SNAPSHOT, "{\"current\": 42").unwrap();
        let cache = SnapshotCache::new(kv);
        assert!(cache.load().is_none());
        assert!(cache.load_fresh(now()).is_none());
    }
}
