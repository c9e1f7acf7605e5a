//! Map view: one marker for the location being shown, recentered on every
//! successful lookup. Clicking the map turns the point into a lookup query.

use weathernow_core::MapConfig;
use weathernow_weather::Coordinates;

pub type MarkerId = u64;

/// Zoom used when recentering on a looked-up location.
pub const LOCATION_ZOOM: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

/// Rendering backend for the map (a tile widget, or text in a terminal).
pub trait MapWidget {
    fn set_view(&mut self, center: LatLon, zoom: u8);
    fn add_marker(&mut self, at: LatLon, popup: &str) -> MarkerId;
    fn open_popup(&mut self, id: MarkerId);
    fn remove_marker(&mut self, id: MarkerId);
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedMarker {
    pub id: MarkerId,
    pub at: LatLon,
    pub label: String,
}

/// What the map currently shows.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSummary {
    pub center: LatLon,
    pub zoom: u8,
    pub marker: Option<PlacedMarker>,
}

pub struct MapView<W: MapWidget> {
    widget: W,
    center: LatLon,
    zoom: u8,
    marker: Option<PlacedMarker>,
}

impl<W: MapWidget> MapView<W> {
    pub fn new(mut widget: W, config: &MapConfig) -> Self {
        let center = LatLon {
            lat: config.initial_latitude,
            lon: config.initial_longitude,
        };
        widget.set_view(center, config.zoom);

        Self {
            widget,
            center,
            zoom: config.zoom,
            marker: None,
        }
    }

    /// Center on `(lat, lon)` and replace the marker with one labelled `label`.
    pub fn recenter(&mut self, lat: f64, lon: f64, label: &str) {
        let at = LatLon { lat, lon };
        self.center = at;
        self.zoom = LOCATION_ZOOM;
        self.widget.set_view(at, LOCATION_ZOOM);

        if let Some(previous) = self.marker.take() {
            self.widget.remove_marker(previous.id);
        }

        let id = self.widget.add_marker(at, label);
        self.widget.open_popup(id);
        self.marker = Some(PlacedMarker {
            id,
            at,
            label: label.to_string(),
        });
    }

    /// Query string for a click at `(lat, lon)`.
    pub fn click(&self, lat: f64, lon: f64) -> String {
        Coordinates {
            latitude: lat,
            longitude: lon,
        }
        .to_query()
    }

    pub fn summary(&self) -> MapSummary {
        MapSummary {
            center: self.center,
            zoom: self.zoom,
            marker: self.marker.clone(),
        }
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextMarker {
    pub id: MarkerId,
    pub at: LatLon,
    pub popup: String,
    pub popup_open: bool,
}

/// Widget that only records what it was asked to draw.
#[derive(Debug, Default)]
pub struct TextMap {
    view: Option<(LatLon, u8)>,
    markers: Vec<TextMarker>,
    next_id: MarkerId,
}

impl TextMap {
    pub fn markers(&self) -> &[TextMarker] {
        &self.markers
    }

    pub fn view(&self) -> Option<(LatLon, u8)> {
        self.view
    }
}

impl MapWidget for TextMap {
    fn set_view(&mut self, center: LatLon, zoom: u8) {
        self.view = Some((center, zoom));
    }

    fn add_marker(&mut self, at: LatLon, popup: &str) -> MarkerId {
        self.next_id += 1;
        self.markers.push(TextMarker {
            id: self.next_id,
            at,
            popup: popup.to_string(),
            popup_open: false,
        });
        self.next_id
    }

    fn open_popup(&mut self, id: MarkerId) {
        for marker in &mut self.markers {
            marker.popup_open = marker.id == id;
        }
    }

    fn remove_marker(&mut self, id: MarkerId) {
        self.markers.retain(|m| m.id != id);
    }
}
