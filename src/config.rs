use crate::error::QueryError;
use crate::provider::{FileProvider, HttpProvider, Source};

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_SOURCE_URL: &str = "https://s3.amazonaws.com/roxiler.com/product_transaction.json";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} has invalid value '{value}'")]
    InvalidValue { name: &'static str, value: String },

    #[error("File '{}' does not exist", .0.display())]
    MissingFile(PathBuf),

    #[error("File '{}' is not a JSON or CSV file", .0.display())]
    UnsupportedFile(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SourceConfig {
    Url(String),
    File(PathBuf),
}

/// Process settings. Read from the environment, with a positional file
/// argument taking precedence over `TALLY_SOURCE_FILE`.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub source: SourceConfig,
    pub fetch_timeout: Duration,
    pub host: IpAddr,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let source = match var("TALLY_SOURCE_FILE") {
            Some(path) => SourceConfig::File(PathBuf::from(path)),
            None => SourceConfig::Url(
                var("TALLY_SOURCE_URL").unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string()),
            ),
        };

        let fetch_timeout = match var("TALLY_FETCH_TIMEOUT_MS") {
            Some(value) => Duration::from_millis(parse_value("TALLY_FETCH_TIMEOUT_MS", &value)?),
            None => Duration::from_millis(DEFAULT_FETCH_TIMEOUT_MS),
        };

        let host = match var("HOST") {
            Some(value) => parse_value("HOST", &value)?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let port = match var("PORT") {
            Some(value) => parse_value("PORT", &value)?,
            None => DEFAULT_PORT,
        };

        Ok(Config {
            source,
            fetch_timeout,
            host,
            port,
        })
    }

    /// Applies the optional positional `[data_file]` argument.
    pub fn with_args<I: IntoIterator<Item = String>>(mut self, args: I) -> Self {
        if let Some(path) = args.into_iter().nth(1) {
            self.source = SourceConfig::File(PathBuf::from(path));
        }
        self
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.source {
            SourceConfig::File(path) => validate_data_file(path),
            SourceConfig::Url(_) => Ok(()),
        }
    }

    pub fn build_source(&self) -> Result<Source, QueryError> {
        match &self.source {
            SourceConfig::Url(url) => Ok(Source::Http(HttpProvider::new(
                url.clone(),
                self.fetch_timeout,
            )?)),
            SourceConfig::File(path) => Ok(Source::File(FileProvider::new(path.clone()))),
        }
    }
}

fn parse_value<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
    })
}

fn validate_data_file(path: &Path) -> Result<(), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()));
    }

    let supported = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json") || ext.eq_ignore_ascii_case("csv"));

    if !supported {
        return Err(ConfigError::UnsupportedFile(path.to_path_buf()));
    }

    Ok(())
}
