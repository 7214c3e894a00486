use std::env;
use std::fs;
use std::io;
use std::path::Path;

use knockout_core::options::TournamentOptionValues;
use knockout_core::EliminationType;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::output::Format;

macro_rules! from_environment {
    ($config:expr, $($key:expr, $name:tt),*$(,)?) => {{
        $(
            {
                if let Ok(value) = env::var($key) {
                    match value.parse() {
                        Ok(value) => $config.$name = value,
                        Err(_) => log::warn!("Ignoring invalid value for {}: {:?}", $key, value),
                    }
                }
            }
        )*
    }};
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub loglevel: LevelFilter,
    pub kind: EliminationType,
    pub format: Format,
    pub options: Options,
}

impl Config {
    pub fn from_file<P>(path: P) -> Result<Self, ConfigError>
    where
        P: AsRef<Path>,
    {
        let buf = fs::read_to_string(path)?;

        Ok(toml::from_str(&buf)?)
    }

    /// Overwrites all values that are set in the environment.
    pub fn with_environment(mut self) -> Self {
        from_environment!(
            self,
            "KNOCKOUT_LOGLEVEL",
            loglevel,
            "KNOCKOUT_KIND",
            kind,
            "KNOCKOUT_FORMAT",
            format,
        );
        self.options = self.options.with_environment();

        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            loglevel: LevelFilter::Warn,
            kind: EliminationType::Single,
            format: Format::Table,
            options: Options::default(),
        }
    }
}

/// Bracket options. Only the options accepted by the configured elimination type are passed on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub third_place_match: bool,
    pub grand_finals_reset: bool,
}

impl Options {
    pub fn with_environment(mut self) -> Self {
        from_environment!(
            self,
            "KNOCKOUT_THIRD_PLACE_MATCH",
            third_place_match,
            "KNOCKOUT_GRAND_FINALS_RESET",
            grand_finals_reset,
        );

        self
    }

    pub fn values(&self, kind: EliminationType) -> TournamentOptionValues {
        let mut values = TournamentOptionValues::new();

        match kind {
            EliminationType::Single => values.set("third_place_match", self.third_place_match),
            EliminationType::Double => values.set("grand_finals_reset", self.grand_finals_reset),
        }

        values
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            third_place_match: false,
            grand_finals_reset: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}
