//! App controller.
//!
//! Owns the page state and wires user intents to the weather client, the
//! local stores, the map and the surface. Lookups run on spawned tasks and
//! report back through [`ControllerMessage`]s; every lookup gets a request
//! number and only the result of the latest one is painted.

use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use weathernow_core::{AppError, Config, StorageError, Theme, UnitSystem, ViewState, WeatherError};
use weathernow_store::{FavoritesStore, KvStore, PreferenceStore, SnapshotCache};
use weathernow_weather::{LocationProvider, WeatherClient, WeatherSnapshot};

use crate::commands::Command;
use crate::error_mapping::fetch_error_to_app_error;
use crate::map::{MapView, MapWidget};
use crate::render::render;
use crate::services::{self, ControllerMessage};
use crate::surface::{Surface, HELP};

/// Controller settings derived from [`Config`].
#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub default_location: String,
    pub location_timeout: Duration,
    pub freshness: chrono::Duration,
    pub api_key_configured: bool,
}

impl ControllerSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            default_location: config.weather.default_location.clone(),
            location_timeout: Duration::from_secs(config.location.timeout_secs),
            freshness: chrono::Duration::minutes(i64::from(config.weather.freshness_minutes)),
            api_key_configured: config.weather.is_configured(),
        }
    }
}

/// Page state shared by every intent.
#[derive(Debug, Default)]
pub struct AppState {
    pub unit: UnitSystem,
    pub theme: Theme,
    pub view: ViewState,
    /// Last snapshot painted, kept for unit repaints and favorites
    pub snapshot: Option<WeatherSnapshot>,
    /// Number of the most recent lookup; older results are dropped
    pub latest_request: u64,
}

pub struct AppController<S: Surface, W: MapWidget> {
    state: AppState,
    prefs: PreferenceStore,
    favorites: FavoritesStore,
    cache: SnapshotCache,
    client: Arc<WeatherClient>,
    locator: Arc<dyn LocationProvider>,
    surface: S,
    map: MapView<W>,
    settings: ControllerSettings,
    tx: UnboundedSender<ControllerMessage>,
}

impl<S: Surface, W: MapWidget> AppController<S, W> {
    /// Build a controller over `kv`. The receiver must be drained into
    /// [`handle_message`](Self::handle_message).
    pub fn new(
        kv: KvStore,
        client: Arc<WeatherClient>,
        locator: Arc<dyn LocationProvider>,
        surface: S,
        map: MapView<W>,
        settings: ControllerSettings,
    ) -> (Self, UnboundedReceiver<ControllerMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let prefs = PreferenceStore::new(kv.clone());
        let state = AppState {
            unit: prefs.unit(),
            theme: prefs.theme(),
            ..AppState::default()
        };

        let controller = Self {
            state,
            prefs,
            favorites: FavoritesStore::load(kv.clone()),
            cache: SnapshotCache::new(kv).with_freshness(settings.freshness),
            client,
            locator,
            surface,
            map,
            settings,
            tx,
        };
        (controller, rx)
    }

    pub fn startup(&mut self, initial_query: Option<&str>) {
        self.startup_at(Utc::now(), initial_query);
    }

    /// Apply stored preferences, then show something: `initial_query` if
    /// given, else a fresh cached snapshot, else the device location.
    pub fn startup_at(&mut self, now: DateTime<Utc>, initial_query: Option<&str>) {
        self.surface.apply_theme(self.state.theme);
        self.surface.apply_unit(self.state.unit);
        self.surface.show_favorites(self.favorites.list());

        if !self.settings.api_key_configured {
            tracing::error!("No WeatherAPI key configured");
            self.fail(WeatherError::MissingApiKey.into());
            return;
        }

        if let Some(query) = initial_query {
            self.search(query);
            return;
        }

        match self.cache.load_fresh(now) {
            Some(snapshot) => {
                tracing::info!(
                    "Painting cached snapshot from {}",
                    snapshot.captured_at.to_rfc3339()
                );
                let label = snapshot.location().map(|l| l.label());
                self.paint(snapshot, label.as_deref());
            }
            None => self.locate(),
        }
    }

    /// Look up `query`. Blank input is rejected without a request.
    pub fn search(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            // Supersedes any lookup still in flight
            self.state.latest_request += 1;
            self.fail(WeatherError::EmptyQuery.into());
            return;
        }

        let request = self.begin_lookup();
        tracing::info!("Looking up {:?} (request {})", query, request);
        services::request_fetch(&self.tx, self.client.clone(), query.to_string(), request);
    }

    /// Look up the device location, falling back to the default location.
    pub fn locate(&mut self) {
        let request = self.begin_lookup();
        services::request_locate(
            &self.tx,
            self.locator.clone(),
            self.settings.location_timeout,
            self.settings.default_location.clone(),
            request,
        );
    }

    pub fn map_click(&mut self, lat: f64, lon: f64) {
        let query = self.map.click(lat, lon);
        self.search(&query);
    }

    pub fn handle_message(&mut self, msg: ControllerMessage) {
        match msg {
            ControllerMessage::FetchDone {
                request,
                query,
                result,
            } => {
                if self.is_stale(request) {
                    return;
                }
                match result {
                    Ok(snapshot) => {
                        if let Err(e) = self.cache.store(&snapshot) {
                            self.persist_failed("snapshot", e);
                        }
                        self.paint(snapshot, Some(query.as_str()));
                    }
                    Err(e) => {
                        tracing::error!("Weather lookup for {:?} failed: {}", query, e);
                        self.fail(fetch_error_to_app_error(e));
                    }
                }
            }
            ControllerMessage::LocationResolved { request, query } => {
                if self.is_stale(request) {
                    return;
                }
                self.search(&query);
            }
        }
    }

    /// Switch °C/°F, persist it, and repaint the shown snapshot without refetching.
    pub fn toggle_unit(&mut self) {
        self.state.unit = self.state.unit.toggled();
        if let Err(e) = self.prefs.set_unit(self.state.unit) {
            self.persist_failed("unit", e);
        }
        self.surface.apply_unit(self.state.unit);

        if self.state.view.can_repaint() {
            if let Some(snapshot) = &self.state.snapshot {
                let page = render(snapshot, self.state.unit);
                self.surface.show_content(&page);
            }
        }
    }

    pub fn toggle_theme(&mut self) {
        self.state.theme = self.state.theme.toggled();
        if let Err(e) = self.prefs.set_theme(self.state.theme) {
            self.persist_failed("theme", e);
        }
        self.surface.apply_theme(self.state.theme);
    }

    /// Save the shown location's label. No-op without one or if already saved.
    pub fn add_favorite(&mut self) {
        let Some(label) = self
            .state
            .snapshot
            .as_ref()
            .and_then(|s| s.location())
            .map(|l| l.label())
        else {
            tracing::debug!("No location shown, nothing to add");
            return;
        };

        match self.favorites.add(&label) {
            Ok(true) => self.surface.show_favorites(self.favorites.list()),
            Ok(false) => tracing::debug!("{} is already a favorite", label),
            Err(e) => self.persist_failed("favorites", e),
        }
    }

    pub fn remove_favorite(&mut self, index: usize) {
        match self.favorites.remove(index) {
            Ok(Some(_)) => self.surface.show_favorites(self.favorites.list()),
            Ok(None) => tracing::debug!("No favorite at index {}", index),
            Err(e) => self.persist_failed("favorites", e),
        }
    }

    pub fn open_favorite(&mut self, index: usize) {
        match self.favorites.get(index).map(str::to_string) {
            Some(label) => self.search(&label),
            None => tracing::debug!("No favorite at index {}", index),
        }
    }

    /// Run a parsed terminal command. `Break` means quit.
    pub fn execute(&mut self, command: Command) -> ControlFlow<()> {
        match command {
            Command::Search(query) => self.search(&query),
            Command::Locate => self.locate(),
            Command::ToggleUnit => self.toggle_unit(),
            Command::ToggleTheme => self.toggle_theme(),
            Command::AddFavorite => self.add_favorite(),
            Command::RemoveFavorite(index) => self.remove_favorite(index),
            Command::OpenFavorite(index) => self.open_favorite(index),
            Command::MapClick { lat, lon } => self.map_click(lat, lon),
            Command::ShowMap => {
                let summary = self.map.summary();
                self.surface.show_map(&summary);
            }
            Command::Help => self.surface.show_notice(HELP),
            Command::Quit => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn map(&self) -> &MapView<W> {
        &self.map
    }

    pub fn favorites(&self) -> &[String] {
        self.favorites.list()
    }

    fn begin_lookup(&mut self) -> u64 {
        self.state.latest_request += 1;
        self.state.view = self.state.view.on_lookup_started();
        self.surface.show_loading();
        self.state.latest_request
    }

    fn is_stale(&self, request: u64) -> bool {
        let stale = request != self.state.latest_request;
        if stale {
            tracing::debug!(
                "Dropping result of request {} (latest is {})",
                request,
                self.state.latest_request
            );
        }
        stale
    }

    /// Show `snapshot` and center the map on it with `label` as marker text.
    fn paint(&mut self, snapshot: WeatherSnapshot, label: Option<&str>) {
        let page = render(&snapshot, self.state.unit);
        self.surface.show_content(&page);

        if let Some(location) = snapshot.location() {
            let label = label.map(str::to_string).unwrap_or_else(|| location.label());
            self.map.recenter(location.lat, location.lon, &label);
        }

        self.state.view = self.state.view.on_fetch_succeeded();
        self.state.snapshot = Some(snapshot);
    }

    /// The session keeps going; the change just won't survive a restart.
    fn persist_failed(&mut self, what: &str, e: StorageError) {
        tracing::warn!("Failed to persist {}: {}", what, e);
        self.surface.show_notice(AppError::from(e).user_message());
    }

    fn fail(&mut self, error: AppError) {
        self.state.view = self.state.view.on_failure();
        self.surface.show_error(error.user_message());
    }
}
