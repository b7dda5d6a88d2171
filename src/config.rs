//! Runtime settings resolved from the command line and environment.

use std::{path::PathBuf, time::Duration};

use crate::{client::JmaClient, cli::Cli, error::Result, store::Store};

const DB_FILE_NAME: &str = "jma-forecast.sqlite";

/// `~/jma-forecast.sqlite`, or the working directory when there is no home.
pub fn default_db_path() -> PathBuf {
    dirs::home_dir().unwrap_or_default().join(DB_FILE_NAME)
}

/// Log filter for the number of `-v` flags.
pub fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub db_path: PathBuf,
    pub base_url: String,
    pub timeout: Duration,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            db_path: cli.db.clone().unwrap_or_else(default_db_path),
            base_url: cli.base_url.clone(),
            timeout: Duration::from_secs(cli.timeout),
        }
    }

    pub fn client(&self) -> Result<JmaClient> {
        JmaClient::new(&self.base_url, self.timeout)
    }

    pub fn open_store(&self) -> Result<Store> {
        Store::open(&self.db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn should_map_verbosity_to_level() {
        assert_eq!(log_level(0), "warn");
        assert_eq!(log_level(1), "info");
        assert_eq!(log_level(2), "debug");
        assert_eq!(log_level(7), "trace");
    }

    #[test]
    fn should_place_default_database_in_home() {
        assert!(default_db_path().ends_with("jma-forecast.sqlite"));
    }

    #[test]
    fn should_resolve_settings_from_flags() {
        let cli = Cli::try_parse_from([
            "jma",
            "--db",
            "/tmp/forecast.sqlite",
            "--base-url",
            "http://localhost:8080",
            "--timeout",
            "3",
            "areas",
        ])
        .unwrap();

        let settings = Settings::from_cli(&cli);

        assert_eq!(settings.db_path, PathBuf::from("/tmp/forecast.sqlite"));
        assert_eq!(settings.base_url, "http://localhost:8080");
        assert_eq!(settings.timeout, Duration::from_secs(3));
    }

    #[test]
    fn should_open_store_at_configured_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let settings = Settings {
            db_path: dir.path().join("forecast.sqlite"),
            base_url: "http://localhost".to_string(),
            timeout: Duration::from_secs(1),
        };

        settings.open_store().unwrap();
        assert!(settings.db_path.exists());
    }
}
