pub mod config;
pub mod error;
pub mod units;
pub mod view_state;

pub use config::{Config, LocationConfig, MapConfig, ValidationResult, WeatherConfig};
pub use error::{AppError, RusqliteErrorExt, StorageError, WeatherError};
pub use units::{Theme, UnitSystem};
pub use view_state::ViewState;

use anyhow::Result;

/// Initialize logging for the application.
///
/// Log lines go to stderr so they never interleave with the terminal surface.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    tracing::info!("WeatherNow core initialized");
    Ok(())
}
