//! WeatherNow page: rendering, map, surfaces and the app controller.

pub mod commands;
pub mod controller;
pub mod error_mapping;
pub mod map;
pub mod render;
pub mod services;
pub mod surface;

pub use commands::{parse as parse_command, Command, CommandError};
pub use controller::{AppController, AppState, ControllerSettings};
pub use map::{LatLon, MapSummary, MapView, MapWidget, TextMap};
pub use render::{render, PageView};
pub use services::ControllerMessage;
pub use surface::{Surface, TerminalSurface};
