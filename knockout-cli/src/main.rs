mod config;
mod output;
mod teams;
mod utils;

use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use knockout_core::{Bracket, EliminationType, Teams};
use thiserror::Error;

use config::{Config, ConfigError};
use output::Format;

#[derive(Debug, Parser)]
#[clap(version, about)]
pub struct Args {
    /// Path to a toml config file.
    #[clap(short, long)]
    config: Option<PathBuf>,
    /// The elimination type: "single" or "double".
    #[clap(short, long)]
    kind: Option<EliminationType>,
    /// Add a match for the third place (single elimination).
    #[clap(long)]
    third_place: bool,
    /// Don't add a reset match to the grand finals (double elimination).
    #[clap(long)]
    no_reset: bool,
    /// The output format: "table" or "json".
    #[clap(short, long)]
    format: Option<Format>,
    /// Print the options accepted by the elimination type and exit.
    #[clap(long)]
    list_options: bool,
    /// A file with one team name per line, in seed order. Prompts for the names if missing.
    teams: Option<PathBuf>,
}

impl Args {
    /// Overwrites all config values that were given on the command line.
    fn apply(&self, config: &mut Config) {
        if let Some(kind) = self.kind {
            config.kind = kind;
        }

        if let Some(format) = self.format {
            config.format = format;
        }

        if self.third_place {
            config.options.third_place_match = true;
        }

        if self.no_reset {
            config.options.grand_finals_reset = false;
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to load config: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Bracket(#[from] knockout_core::Error),
}

fn main() {
    let args = Args::parse();

    if let Err(err) = run(args) {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Error> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    }
    .with_environment();
    args.apply(&mut config);

    pretty_env_logger::formatted_builder()
        .filter_level(config.loglevel)
        .init();

    log::debug!("Using config: {:?}", config);

    if args.list_options {
        let options = Bracket::options(config.kind);
        return output::write_options(io::stdout().lock(), &options, config.format);
    }

    let names = match &args.teams {
        Some(path) => teams::read_file(path)?,
        None => teams::prompt()?,
    };

    let teams = Teams::from_names(names)?;
    let options = config.options.values(config.kind);
    let bracket = Bracket::new_with_options(teams, config.kind, options)?;

    log::info!(
        "Generated {} elimination bracket with {} matches",
        bracket.kind(),
        bracket.matches().len()
    );

    output::write(io::stdout().lock(), &bracket, config.format)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::Parser;
    use knockout_core::EliminationType;

    use super::Args;
    use crate::config::Config;
    use crate::output::Format;

    #[test]
    fn test_args_apply() {
        let args = Args::try_parse_from([
            "knockout",
            "-k",
            "double",
            "--no-reset",
            "-f",
            "json",
            "teams.txt",
        ])
        .unwrap();

        let mut config = Config::default();
        args.apply(&mut config);

        assert_eq!(config.kind, EliminationType::Double);
        assert_eq!(config.format, Format::Json);
        assert!(!config.options.grand_finals_reset);
        assert!(!config.options.third_place_match);
        assert_eq!(args.teams.as_deref(), Some(Path::new("teams.txt")));
    }

    #[test]
    fn test_args_list_options() {
        let args = Args::try_parse_from(["knockout", "--list-options", "-k", "single"]).unwrap();
        assert!(args.list_options);
        assert_eq!(args.teams, None);

        let args = Args::try_parse_from(["knockout", "teams.txt"]).unwrap();
        assert!(!args.list_options);
    }

    #[test]
    fn test_args_invalid_kind() {
        assert!(Args::try_parse_from(["knockout", "-k", "swiss"]).is_err());
    }
}
