//! Favorite location labels.
//!
//! Insertion-ordered, exact (case-sensitive) uniqueness, no length cap.
//! Stored as a JSON array of strings.

use weathernow_core::StorageError;

use crate::kv::{keys, KvStore, StoreResult};

pub struct FavoritesStore {
    kv: KvStore,
    labels: Vec<String>,
}

impl FavoritesStore {
    /// Load favorites from the store. A missing or malformed list loads as empty.
    pub fn load(kv: KvStore) -> Self {
        let labels = match kv.get(keys::FAVORITES) {
            Ok(Some(raw)) => serde_json::from_str::<Vec<String>>(&raw).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed favorites list: {}", e);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read favorites: {}", e);
                Vec::new()
            }
        };

        Self { kv, labels }
    }

    pub fn list(&self) -> &[String] {
        &self.labels
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Append `label` unless an identical one is already present.
    ///
    /// Returns whether the list changed.
    pub fn add(&mut self, label: &str) -> StoreResult<bool> {
        if self.labels.iter().any(|l| l == label) {
            return Ok(false);
        }
        self.labels.push(label.to_string());
        self.persist()?;
        Ok(true)
    }

    /// Remove the label at `index`; out-of-bounds indexes are ignored.
    ///
    /// Returns the removed label, if any.
    pub fn remove(&mut self, index: usize) -> StoreResult<Option<String>> {
        if index >= self.labels.len() {
            return Ok(None);
        }
        let removed = self.labels.remove(index);
        self.persist()?;
        Ok(Some(removed))
    }

    fn persist(&self) -> StoreResult<()> {
        let json = serde_json::to_string(&self.labels)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.kv.set(keys::FAVORITES, &json)
    }
}
