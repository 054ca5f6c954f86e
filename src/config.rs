use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::data::model::CityCatalog;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "bikeshare-explorer",
    version,
    about = "Explore US bikeshare trip data interactively"
)]
pub struct Args {
    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, default_value = ".")]
    pub data_dir: PathBuf,

    /// Raise log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Default `env_logger` filter for the chosen verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

/// Immutable runtime settings derived from [`Args`].
#[derive(Debug, Clone)]
pub struct Config {
    pub catalog: CityCatalog,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config {
            catalog: CityCatalog::new(args.data_dir),
        }
    }
}
