//! Durable client-side state for WeatherNow.
//!
//! Preferences, favorites and the last snapshot all live in one SQLite
//! key-value table, mirroring the string-keyed storage a browser would offer.

pub mod favorites;
pub mod kv;
pub mod preferences;
pub mod snapshot;

pub use favorites::FavoritesStore;
pub use kv::{keys, KvStore, StoreResult};
pub use preferences::PreferenceStore;
pub use snapshot::{SnapshotCache, FRESHNESS_WINDOW_MINUTES};
