//! Presentation surface.
//!
//! The controller never formats output itself; it hands view models to a
//! [`Surface`]. [`TerminalSurface`] paints them as plain text.

use std::io::Write;

use weathernow_core::{Theme, UnitSystem};

use crate::map::MapSummary;
use crate::render::{AlertSeverity, HistorySection, PageView, HISTORY_UNAVAILABLE};

pub trait Surface {
    fn show_loading(&mut self);
    fn show_error(&mut self, message: &str);
    fn show_content(&mut self, page: &PageView);
    fn show_favorites(&mut self, favorites: &[String]);
    fn show_map(&mut self, map: &MapSummary);
    fn apply_theme(&mut self, theme: Theme);
    fn apply_unit(&mut self, unit: UnitSystem);
    fn show_notice(&mut self, message: &str);
}

pub const HELP: &str = "\
Type a location to look it up, or one of:
  :locate           use my location
  :unit             switch between °C and °F
  :theme            switch between light and dark
  :fav add          save the shown location
  :fav rm N         remove favorite N
  :fav N            look up favorite N
  :click LAT LON    look up a point on the map
  :map              show the map
  :help             show this help
  :quit             exit";

/// Terminal glyph for an icon class.
pub fn glyph(icon: &str) -> &'static str {
    match icon {
        "fas fa-sun" => "☀",
        "fas fa-moon" => "☾",
        "fas fa-cloud-sun" => "⛅",
        "fas fa-cloud-moon" | "fas fa-cloud" => "☁",
        "fas fa-smog" => "≡",
        "fas fa-cloud-sun-rain" | "fas fa-cloud-drizzle" => "🌦",
        "fas fa-cloud-rain" | "fas fa-cloud-showers-heavy" => "🌧",
        "fas fa-snowflake" => "❄",
        "fas fa-cloud-meatball" => "🌨",
        "fas fa-bolt" => "⚡",
        "fas fa-wind" => "🌬",
        _ => "?",
    }
}

pub struct TerminalSurface<W: Write> {
    out: W,
    theme: Theme,
    unit: UnitSystem,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            theme: Theme::default(),
            unit: UnitSystem::default(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn unit(&self) -> UnitSystem {
        self.unit
    }

    fn heading(&self, title: &str) -> String {
        match self.theme {
            Theme::Light => format!("== {} ==", title),
            Theme::Dark => format!("\x1b[1;97m== {} ==\x1b[0m", title),
        }
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            tracing::warn!("Failed to write to terminal: {}", e);
        }
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn show_loading(&mut self) {
        self.emit("Loading...");
    }

    fn show_error(&mut self, message: &str) {
        self.emit(&format!("Error: {}", message));
    }

    fn show_content(&mut self, page: &PageView) {
        let mut lines = Vec::new();

        if let Some(current) = &page.current {
            lines.push(self.heading(current.location.as_deref().unwrap_or("Current")));
            lines.push(format!(
                "{} {}  {}",
                glyph(current.icon),
                current.temperature,
                current.description
            ));
            lines.push(format!(
                "Feels like {}  Humidity {}  Wind {}  Visibility {}",
                current.feels_like, current.humidity, current.wind, current.visibility
            ));
            if let Some(aq) = &current.air_quality {
                lines.push(format!("Air quality: {}", aq));
            }
        }

        if page.alerts_visible() {
            lines.push(self.heading("Alerts"));
            for alert in &page.alerts {
                let tag = match alert.severity {
                    AlertSeverity::Danger => "[!!]",
                    AlertSeverity::Warning => "[!]",
                };
                lines.push(format!("{} {}", tag, alert.headline));
                if !alert.description.is_empty() {
                    lines.push(format!("    {}", alert.description));
                }
            }
        }

        lines.push(self.heading("Forecast"));
        for card in &page.forecast {
            lines.push(format!(
                "{}  {} {:<24} {} / {}",
                card.day_name,
                glyph(card.icon),
                card.description,
                card.high,
                card.low
            ));
        }

        lines.push(self.heading("Past week"));
        match &page.history {
            HistorySection::Unavailable => lines.push(HISTORY_UNAVAILABLE.to_string()),
            HistorySection::Days(cards) => {
                for card in cards {
                    lines.push(format!(
                        "{:<10}  {:<12} {:<24} {}",
                        card.date, card.temperatures, card.condition, card.precipitation
                    ));
                }
            }
        }

        self.emit(&lines.join("\n"));
    }

    fn show_favorites(&mut self, favorites: &[String]) {
        if favorites.is_empty() {
            self.emit("No favorites yet");
            return;
        }
        let list = favorites
            .iter()
            .enumerate()
            .map(|(i, label)| format!("  {}. {}", i + 1, label))
            .collect::<Vec<_>>()
            .join("\n");
        self.emit(&format!("Favorites:\n{}", list));
    }

    fn show_map(&mut self, map: &MapSummary) {
        let line = match &map.marker {
            Some(marker) => format!(
                "Map: {} at {:.4}, {:.4} (zoom {})",
                marker.label, marker.at.lat, marker.at.lon, map.zoom
            ),
            None => format!(
                "Map: centered on {:.4}, {:.4} (zoom {})",
                map.center.lat, map.center.lon, map.zoom
            ),
        };
        self.emit(&line);
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    fn apply_unit(&mut self, unit: UnitSystem) {
        self.unit = unit;
        self.emit(&format!("Units: {}", unit.temperature_suffix()));
    }

    fn show_notice(&mut self, message: &str) {
        self.emit(message);
    }
}
