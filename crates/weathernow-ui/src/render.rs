//! Snapshot → page view.
//!
//! Rendering is pure: it turns a snapshot and the active unit system into a
//! [`PageView`] that a [`Surface`](crate::surface::Surface) then paints. Each
//! section degrades on its own when its part of the payload is missing.

use weathernow_core::UnitSystem;
use weathernow_weather::{icon_for, CurrentReport, DaySummary, ForecastDay, WeatherSnapshot};

/// Shown in place of history cards when no past day could be fetched.
pub const HISTORY_UNAVAILABLE: &str = "Historical data not available";

/// Round half up to the nearest integer (`2.5 → 3`, `-2.5 → -2`).
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub current: Option<CurrentSection>,
    pub forecast: Vec<ForecastCard>,
    pub history: HistorySection,
    /// Empty means the alerts panel is hidden
    pub alerts: Vec<AlertCard>,
}

impl PageView {
    pub fn alerts_visible(&self) -> bool {
        !self.alerts.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentSection {
    pub location: Option<String>,
    pub temperature: String,
    pub description: String,
    pub humidity: String,
    pub wind: String,
    pub visibility: String,
    pub feels_like: String,
    pub icon: &'static str,
    pub air_quality: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastCard {
    pub day_name: String,
    pub icon: &'static str,
    pub description: String,
    pub high: String,
    pub low: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HistorySection {
    Unavailable,
    Days(Vec<HistoryCard>),
}

impl HistorySection {
    pub fn cards(&self) -> &[HistoryCard] {
        match self {
            HistorySection::Unavailable => &[],
            HistorySection::Days(cards) => cards,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryCard {
    pub date: String,
    pub temperatures: String,
    pub condition: String,
    pub precipitation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertSeverity {
    Danger,
    Warning,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlertCard {
    pub headline: String,
    pub description: String,
    pub severity: AlertSeverity,
}

/// Build the page for `snapshot` in `unit`.
pub fn render(snapshot: &WeatherSnapshot, unit: UnitSystem) -> PageView {
    PageView {
        current: render_current(&snapshot.current, unit),
        forecast: render_forecast(snapshot.forecast.days(), unit),
        history: render_history(snapshot, unit),
        alerts: render_alerts(snapshot),
    }
}

fn render_current(report: &CurrentReport, unit: UnitSystem) -> Option<CurrentSection> {
    let current = report.current.as_ref()?;
    let degrees = unit.temperature_suffix();

    Some(CurrentSection {
        location: report.location.as_ref().map(|l| l.label()),
        temperature: format!(
            "{}{}",
            round_half_up(unit.select(current.temp_c, current.temp_f)),
            degrees
        ),
        description: current.condition.text.clone(),
        humidity: format!("{}%", current.humidity),
        wind: format!(
            "{} {}",
            round_half_up(unit.select(current.wind_kph, current.wind_mph)),
            unit.speed_suffix()
        ),
        visibility: format!(
            "{} {}",
            round_half_up(unit.select(current.vis_km, current.vis_miles)),
            unit.distance_suffix()
        ),
        feels_like: format!(
            "{}{}",
            round_half_up(unit.select(current.feelslike_c, current.feelslike_f)),
            degrees
        ),
        icon: icon_for(current.condition.code, current.is_daytime()),
        air_quality: current.air_quality.as_ref().and_then(|aq| {
            let index = aq.us_epa_index?;
            Some(format!("{} (US-EPA {})", aq.epa_category()?, index))
        }),
    })
}

fn high_low(day: &DaySummary, unit: UnitSystem) -> (i64, i64) {
    (
        round_half_up(unit.select(day.maxtemp_c, day.maxtemp_f)),
        round_half_up(unit.select(day.mintemp_c, day.mintemp_f)),
    )
}

/// Every day but the first, which is today and already in the current section.
fn render_forecast(days: &[ForecastDay], unit: UnitSystem) -> Vec<ForecastCard> {
    days.iter()
        .skip(1)
        .map(|day| {
            let (high, low) = high_low(&day.day, unit);
            ForecastCard {
                day_name: day.date.format("%a").to_string(),
                icon: icon_for(day.day.condition.code, true),
                description: day.day.condition.text.clone(),
                high: format!("{}°", high),
                low: format!("{}°", low),
            }
        })
        .collect()
}

fn render_history(snapshot: &WeatherSnapshot, unit: UnitSystem) -> HistorySection {
    if snapshot.history.is_empty() {
        return HistorySection::Unavailable;
    }

    let cards = snapshot
        .history
        .iter()
        .filter_map(|entry| entry.observed())
        .map(|observed| {
            let (high, low) = high_low(&observed.day, unit);
            HistoryCard {
                date: observed.date.format("%-m/%-d/%Y").to_string(),
                temperatures: format!("{}° / {}°", high, low),
                condition: observed.day.condition.text.clone(),
                precipitation: format!("{}mm", observed.day.totalprecip_mm.unwrap_or(0.0)),
            }
        })
        .collect();

    HistorySection::Days(cards)
}

fn render_alerts(snapshot: &WeatherSnapshot) -> Vec<AlertCard> {
    snapshot
        .alerts()
        .iter()
        .map(|alert| AlertCard {
            headline: alert.headline.clone(),
            description: alert.description.clone(),
            severity: if alert.severity == "severe" {
                AlertSeverity::Danger
            } else {
                AlertSeverity::Warning
            },
        })
        .collect()
}
