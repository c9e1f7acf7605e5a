use std::ops::ControlFlow;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use weathernow_core::Config;
use weathernow_store::KvStore;
use weathernow_ui::{
    parse_command, AppController, ControllerSettings, MapView, Surface, TerminalSurface, TextMap,
};
use weathernow_weather::{FixedLocation, LocationProvider, Unavailable, WeatherClient};

/// Current conditions, forecast and the past week for any place.
#[derive(Parser, Debug)]
#[command(name = "weathernow", version, about)]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Location to look up instead of the cached or device location
    query: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    weathernow_core::init()?;
    let cli = Cli::parse();

    let (config, _) = Config::load_validated(cli.config.as_deref())?;

    let kv = match KvStore::open(config.database_path()) {
        Ok(kv) => kv,
        Err(e) => {
            tracing::warn!("Local storage unavailable ({}), settings will not persist", e);
            KvStore::in_memory().context("Failed to create in-memory store")?
        }
    };

    let client = WeatherClient::with_base_url(&config.weather.api_key, &config.weather.base_url)
        .context("Failed to build HTTP client")?
        .with_forecast_days(config.weather.forecast_days)
        .with_history_days(config.weather.history_days);

    let locator: Arc<dyn LocationProvider> = match config.location.coordinates() {
        Some((lat, lon)) => Arc::new(FixedLocation::new(lat, lon)),
        None => Arc::new(Unavailable),
    };

    let (mut controller, mut rx) = AppController::new(
        kv,
        Arc::new(client),
        locator,
        TerminalSurface::new(std::io::stdout()),
        MapView::new(TextMap::default(), &config.map),
        ControllerSettings::from_config(&config),
    );

    tracing::info!("WeatherNow started");
    controller.startup(cli.query.as_deref());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    break;
                };
                match parse_command(&line) {
                    Ok(command) => {
                        if let ControlFlow::Break(()) = controller.execute(command) {
                            break;
                        }
                    }
                    Err(e) => controller.surface_mut().show_notice(&e.to_string()),
                }
            }
            Some(msg) = rx.recv() => controller.handle_message(msg),
        }
    }

    tracing::info!("WeatherNow shutting down");
    Ok(())
}
