use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracker_engine::ApiSettings;
use url::Url;

use super::logging::LogDestination;

/// Overrides the location of the configuration file.
pub const CONFIG_ENV: &str = "JOB_TRACKER_CONFIG";
const CONFIG_FILENAME: &str = "tracker.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid base_url {value:?}: {source}")]
    InvalidBaseUrl {
        value: String,
        source: url::ParseError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Server the pages and API endpoints live on.
    pub base_url: String,
    /// Page opened at startup, relative to `base_url`.
    pub start_path: String,
    /// Ask before each delete. When off every delete is confirmed.
    pub confirm_deletes: bool,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: Option<u64>,
    pub log_destination: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            start_path: "/jobs".to_string(),
            confirm_deletes: true,
            connect_timeout_secs: 10,
            request_timeout_secs: None,
            log_destination: LogDestination::File,
        }
    }
}

impl AppConfig {
    pub fn api_settings(&self) -> Result<ApiSettings, ConfigError> {
        let base_url =
            Url::parse(self.base_url.trim()).map_err(|source| ConfigError::InvalidBaseUrl {
                value: self.base_url.clone(),
                source,
            })?;
        let mut settings = ApiSettings::new(base_url);
        settings.connect_timeout = Duration::from_secs(self.connect_timeout_secs);
        settings.request_timeout = self.request_timeout_secs.map(Duration::from_secs);
        Ok(settings)
    }
}

/// `$JOB_TRACKER_CONFIG` when set, else `tracker.ron` in the working directory.
pub fn config_path() -> PathBuf {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from(CONFIG_FILENAME),
    }
}

/// Reads the configuration; a missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.ron")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"(base_url: "http://jobs.internal:9000", confirm_deletes: false, request_timeout_secs: Some(30))"#,
        );
        let config = load_config(&path).unwrap();
        assert_eq!(config.base_url, "http://jobs.internal:9000");
        assert!(!config.confirm_deletes);
        assert_eq!(config.start_path, "/jobs");
        assert_eq!(config.log_destination, LogDestination::File);

        let settings = config.api_settings().unwrap();
        assert_eq!(settings.base_url.as_str(), "http://jobs.internal:9000/");
        assert_eq!(settings.request_timeout, Some(Duration::from_secs(30)));
        assert_eq!(settings.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn log_destination_is_read_by_variant_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "(log_destination: Both)");
        assert_eq!(load_config(&path).unwrap().log_destination, LogDestination::Both);
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "base_url = nope");
        assert!(matches!(load_config(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn relative_base_url_is_rejected() {
        let config = AppConfig {
            base_url: "localhost/jobs".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(
            config.api_settings(),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }
}
