//! Display preferences: unit system and theme.
//!
//! Both only affect presentation. The weather service always returns metric
//! and imperial fields side by side, so switching units never needs a refetch.

use serde::{Deserialize, Serialize};

/// Unit system used when formatting measurements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    /// Stored representation
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }

    /// Parse a stored value; unknown strings yield `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "metric" => Some(Self::Metric),
            "imperial" => Some(Self::Imperial),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Metric => Self::Imperial,
            Self::Imperial => Self::Metric,
        }
    }

    /// Temperature suffix, e.g. `°C`
    pub fn temperature_suffix(self) -> &'static str {
        match self {
            Self::Metric => "°C",
            Self::Imperial => "°F",
        }
    }

    pub fn speed_suffix(self) -> &'static str {
        match self {
            Self::Metric => "km/h",
            Self::Imperial => "mph",
        }
    }

    pub fn distance_suffix(self) -> &'static str {
        match self {
            Self::Metric => "km",
            Self::Imperial => "mi",
        }
    }

    /// Pick the field matching this unit system
    pub fn select(self, metric: f64, imperial: f64) -> f64 {
        match self {
            Self::Metric => metric,
            Self::Imperial => imperial,
        }
    }
}

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(UnitSystem::default(), UnitSystem::Metric);
        assert_eq!(Theme::default(), Theme::Light);
    }

    #[test]
    fn test_unit_parse_and_as_str() {
        for unit in [UnitSystem::Metric, UnitSystem::Imperial] {
            assert_eq!(UnitSystem::parse(unit.as_str()), Some(unit));
        }
        assert_eq!(UnitSystem::parse("kelvin"), None);
        assert_eq!(UnitSystem::parse("Metric"), None);
    }

    #[test]
    fn test_theme_parse_and_as_str() {
        for theme in [Theme::Light, Theme::Dark] {
            assert_eq!(Theme::parse(theme.as_str()), Some(theme));
        }
        assert_eq!(Theme::parse("solarized"), None);
    }

    #[test]
    fn test_toggle_is_involution() {
        assert_eq!(UnitSystem::Metric.toggled(), UnitSystem::Imperial);
        assert_eq!(UnitSystem::Metric.toggled().toggled(), UnitSystem::Metric);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn test_select_and_suffixes() {
        assert_eq!(UnitSystem::Metric.select(20.0, 68.0), 20.0);
        assert_eq!(UnitSystem::Imperial.select(20.0, 68.0), 68.0);
        assert_eq!(UnitSystem::Imperial.temperature_suffix(), "°F");
        assert_eq!(UnitSystem::Metric.speed_suffix(), "km/h");
        assert_eq!(UnitSystem::Imperial.distance_suffix(), "mi");
    }
}
