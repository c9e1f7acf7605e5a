//! Terminal input.
//!
//! A line starting with `:` is a command; anything else is a location search.
//! Favorites are numbered from 1 on screen.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search(String),
    Locate,
    ToggleUnit,
    ToggleTheme,
    AddFavorite,
    RemoveFavorite(usize),
    OpenFavorite(usize),
    MapClick { lat: f64, lon: f64 },
    ShowMap,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("Unknown command: {0} (try :help)")]
    Unknown(String),

    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("Not a valid {what}: {value}")]
    Invalid { what: &'static str, value: String },
}

pub fn parse(line: &str) -> Result<Command, CommandError> {
    let Some(rest) = line.trim_start().strip_prefix(':') else {
        return Ok(Command::Search(line.to_string()));
    };

    let mut words = rest.split_whitespace();
    let name = words.next().unwrap_or_default();

    match name {
        "locate" => Ok(Command::Locate),
        "unit" => Ok(Command::ToggleUnit),
        "theme" => Ok(Command::ToggleTheme),
        "map" => Ok(Command::ShowMap),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        "fav" => match words.next() {
            Some("add") => Ok(Command::AddFavorite),
            Some("rm") => {
                let n = words.next().ok_or(CommandError::MissingArgument("favorite number"))?;
                Ok(Command::RemoveFavorite(favorite_index(n)?))
            }
            Some(n) => Ok(Command::OpenFavorite(favorite_index(n)?)),
            None => Err(CommandError::MissingArgument("add, rm N or N")),
        },
        "click" => {
            let lat = coordinate(words.next(), "latitude")?;
            let lon = coordinate(words.next(), "longitude")?;
            Ok(Command::MapClick { lat, lon })
        }
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

/// 1-based on screen, 0-based in the store.
fn favorite_index(value: &str) -> Result<usize, CommandError> {
    match value.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(CommandError::Invalid {
            what: "favorite number",
            value: value.to_string(),
        }),
    }
}

fn coordinate(value: Option<&str>, what: &'static str) -> Result<f64, CommandError> {
    let value = value.ok_or(CommandError::MissingArgument(what))?;
    value
        .trim_end_matches(',')
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CommandError::Invalid {
            what,
            value: value.to_string(),
        })
}
