//! Persisted config (endpoint URLs, request timeout) in the app data directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::app_data;
use crate::http::{HttpClient, HttpError};

const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_NOTES_URL: &str = "http://localhost:3005/notes";
pub const DEFAULT_PERSONS_URL: &str = "http://localhost:3005/persons";

/// Which of the two resource endpoints a setting refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Notes,
    Persons,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Notes endpoint; `DEFAULT_NOTES_URL` when unset.
    pub notes_url: Option<String>,
    /// Persons endpoint; `DEFAULT_PERSONS_URL` when unset.
    pub persons_url: Option<String>,
    /// Per-request timeout. No timeout when unset.
    pub request_timeout_secs: Option<u64>,
}

/// Parsed endpoint URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub notes: Url,
    pub persons: Url,
}

impl Config {
    /// Resolve both endpoints, falling back to the localhost defaults.
    pub fn endpoints(&self) -> Result<Endpoints, ConfigError> {
        Ok(Endpoints {
            notes: parse_url(non_empty(&self.notes_url).unwrap_or(DEFAULT_NOTES_URL))?,
            persons: parse_url(non_empty(&self.persons_url).unwrap_or(DEFAULT_PERSONS_URL))?,
        })
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|&s| s > 0)
            .map(Duration::from_secs)
    }

    /// HTTP client honoring the configured timeout.
    pub fn http_client(&self) -> Result<HttpClient, HttpError> {
        match self.request_timeout() {
            Some(timeout) => HttpClient::with_timeout(timeout),
            None => Ok(HttpClient::new()),
        }
    }

    pub fn set_url(&mut self, kind: ResourceKind, url: &Url) {
        let slot = match kind {
            ResourceKind::Notes => &mut self.notes_url,
            ResourceKind::Persons => &mut self.persons_url,
        };
        *slot = Some(url.to_string());
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Parse an endpoint URL; only http and https are accepted.
pub fn parse_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|source| ConfigError::InvalidUrl {
        value: value.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ConfigError::UnsupportedScheme(scheme.to_string())),
    }
}

/// Path of the config file, if the app data directory is available.
pub fn config_path() -> Option<PathBuf> {
    app_data::app_data_dir().map(|dir| dir.join(CONFIG_FILENAME))
}

/// Load config from the app data directory. Returns default config if missing or invalid.
pub fn load_config() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    load_config_from(&path).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "using default config");
        Config::default()
    })
}

/// Load config from an explicit file.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let s = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
    toml::from_str(&s).map_err(ConfigError::Parse)
}

/// Save config to the app data directory.
pub fn save_config(config: &Config) -> Result<(), ConfigError> {
    let path = config_path().ok_or(ConfigError::NoDataDir)?;
    save_config_to(&path, config)
}

/// Save config to an explicit file.
pub fn save_config_to(path: &Path, config: &Config) -> Result<(), ConfigError> {
    let s = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;
    std::fs::write(path, s).map_err(ConfigError::Write)
}

/// Validate and persist one endpoint URL.
pub fn set_endpoint(kind: ResourceKind, url: &str) -> Result<Url, ConfigError> {
    let url = parse_url(url)?;
    let mut config = load_config();
    config.set_url(kind, &url);
    save_config(&config)?;
    Ok(url)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine app data directory")]
    NoDataDir,
    #[error("failed to read config: {0}")]
    Read(std::io::Error),
    #[error("invalid config: {0}")]
    Parse(toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(toml::ser::Error),
    #[error("failed to write config: {0}")]
    Write(std::io::Error),
    #[error("invalid URL {value:?}: {source}")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_localhost_endpoints() {
        let e = Config::default().endpoints().unwrap();
        assert_eq!(e.notes.as_str(), DEFAULT_NOTES_URL);
        assert_eq!(e.persons.as_str(), DEFAULT_PERSONS_URL);
        assert_eq!(Config::default().request_timeout(), None);
    }

    #[test]
    fn blank_url_falls_back_to_default() {
        let c = Config {
            notes_url: Some("  ".into()),
            ..Config::default()
        };
        assert_eq!(c.endpoints().unwrap().notes.as_str(), DEFAULT_NOTES_URL);
    }

    #[test]
    fn rejects_bad_urls() {
        assert!(matches!(
            parse_url("not a url"),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            parse_url("ftp://example.com/notes"),
            Err(ConfigError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        let mut config = Config {
            request_timeout_secs: Some(5),
            ..Config::default()
        };
        config.set_url(
            ResourceKind::Persons,
            &parse_url("http://example.com:8080/people").unwrap(),
        );
        save_config_to(&path, &config).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(
            loaded.endpoints().unwrap().persons.as_str(),
            "http://example.com:8080/people"
        );
        assert_eq!(loaded.request_timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "notes_url = [").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
    }
}
