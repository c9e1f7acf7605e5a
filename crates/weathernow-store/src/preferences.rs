//! Unit system and theme preferences.

use weathernow_core::{Theme, UnitSystem};

use crate::kv::{keys, KvStore, StoreResult};

pub struct PreferenceStore {
    kv: KvStore,
}

impl PreferenceStore {
    pub fn new(kv: KvStore) -> Self {
        Self { kv }
    }

    /// Stored unit system, metric on first run or when the value is unreadable
    pub fn unit(&self) -> UnitSystem {
        self.read(keys::UNIT, UnitSystem::parse).unwrap_or_default()
    }

    pub fn set_unit(&self, unit: UnitSystem) -> StoreResult<()> {
        self.kv.set(keys::UNIT, unit.as_str())
    }

    /// Stored theme, light on first run or when the value is unreadable
    pub fn theme(&self) -> Theme {
        self.read(keys::THEME, Theme::parse).unwrap_or_default()
    }

    pub fn set_theme(&self, theme: Theme) -> StoreResult<()> {
        self.kv.set(keys::THEME, theme.as_str())
    }

    fn read<T>(&self, key: &str, parse: fn(&str) -> Option<T>) -> Option<T> {
        let raw = match self.kv.get(key) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!("Failed to read preference {}: {}", key, e);
                return None;
            }
        };

        let parsed = parse(&raw);
        if parsed.is_none() {
            tracing::warn!("Ignoring unrecognized value {:?} for {}", raw, key);
        }
        parsed
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn test_first_run_defaults() {
        let prefs = PreferenceStore::new(KvStore::in_memory().unwrap());
        assert_eq!(prefs.unit(), UnitSystem::Metric);
        assert_eq!(prefs.theme(), Theme::Light);
    }

    #[test]
    fn test_set_is_persisted() {
        let kv = KvStore::in_memory().unwrap();
        let prefs = PreferenceStore::new(kv.clone());

        prefs.set_unit(UnitSystem::Imperial).unwrap();
        prefs.set_theme(Theme::Dark).unwrap();

        assert_eq!(kv.get(keys::UNIT).unwrap().as_deref(), Some("imperial"));
        assert_eq!(kv.get(keys::THEME).unwrap().as_deref(), Some("dark"));

        // A fresh store over the same table sees the same values
        let reloaded = PreferenceStore::new(kv);
        assert_eq!(reloaded.unit(), UnitSystem::Imperial);
        assert_eq!(reloaded.theme(), Theme::Dark);
    }

    #[test]
    fn test_garbage_falls_back_to_default() {
        let kv = KvStore::in_memory().unwrap();
        kv.set(keys::UNIT, "kelvin").unwrap();
        kv.set(keys::THEME, "").unwrap();

        let prefs = PreferenceStore::new(kv);
        assert_eq!(prefs.unit(), UnitSystem::Metric);
        assert_eq!(prefs.theme(), Theme::Light);
    }
}
