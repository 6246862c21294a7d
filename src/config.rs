//! # Configuration Module
//!
//! Tunables for request population and response rendering. Every field has a
//! default, so an empty YAML document or an empty environment yields the
//! standard behaviour.
//!
//! ## Environment Variables
//!
//! | Variable                    | Default                    |
//! |-----------------------------|----------------------------|
//! | `USECASE_IDENTITY_FIELD`    | `userId`                   |
//! | `USECASE_FILES_GROUP`       | `file`                     |
//! | `USECASE_FILES_KEY`         | `files`                    |
//! | `USECASE_DEFAULT_PER_PAGE`  | `20`                       |
//! | `USECASE_CSV_DELIMITER`     | `;`                        |
//! | `USECASE_BASE64`            | `true`                     |
//! | `USECASE_BLOB_MIME`         | `application/octet-stream` |
//! | `USECASE_LOG_LEVEL`         | `info`                     |
//! | `USECASE_LOG_FORMAT`        | `json` (or `pretty`)       |
//! | `USECASE_LOG_TARGETS`       | none                       |
//! | `USECASE_LOG_LOCATION`      | `false`                    |
//! | `USECASE_LOG_NON_BLOCKING`  | `false`                    |
//!
//! ## YAML
//!
//! ```yaml
//! request:
//!   identity_field: ownerId
//!   default_per_page: 50
//! response:
//!   csv_delimiter: ","
//! logging:
//!   format: pretty
//! ```

use crate::logging::LogConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Population settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    /// Field overwritten with the authenticated principal's id
    pub identity_field: String,
    /// Upload group copied into the request data
    pub files_group: String,
    /// Key the uploaded files are stored under
    pub files_key: String,
    /// Page size when the request omits `perPage`
    pub default_per_page: i64,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            identity_field: "userId".to_string(),
            files_group: "file".to_string(),
            files_key: "files".to_string(),
            default_per_page: 20,
        }
    }
}

/// Response factory defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseConfig {
    pub csv_delimiter: char,
    /// Base64-encode CSV and blob bodies
    pub base64: bool,
    pub blob_mime: String,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            csv_delimiter: ';',
            base64: true,
            blob_mime: "application/octet-stream".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub request: RequestConfig,
    pub response: ResponseConfig,
    pub logging: LogConfig,
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse usecase-http configuration")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&raw)
    }

    /// Defaults overridden by whichever `USECASE_*` variables are set.
    /// Unparseable values fall back to the default.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Config::default();
        let request = &mut config.request;
        let response = &mut config.response;
        let logging = &mut config.logging;

        if let Ok(v) = env::var("USECASE_IDENTITY_FIELD") {
            request.identity_field = v;
        }
        if let Ok(v) = env::var("USECASE_FILES_GROUP") {
            request.files_group = v;
        }
        if let Ok(v) = env::var("USECASE_FILES_KEY") {
            request.files_key = v;
        }
        if let Some(v) = parse_env("USECASE_DEFAULT_PER_PAGE") {
            request.default_per_page = v;
        }
        if let Some(v) = parse_env("USECASE_CSV_DELIMITER") {
            response.csv_delimiter = v;
        }
        if let Some(v) = parse_env("USECASE_BASE64") {
            response.base64 = v;
        }
        if let Ok(v) = env::var("USECASE_BLOB_MIME") {
            response.blob_mime = v;
        }
        if let Ok(v) = env::var("USECASE_LOG_LEVEL") {
            logging.level = v;
        }
        if let Some(v) = parse_env("USECASE_LOG_FORMAT") {
            logging.format = v;
        }
        if let Ok(v) = env::var("USECASE_LOG_TARGETS") {
            logging.targets = Some(v);
        }
        if let Some(v) = parse_env("USECASE_LOG_LOCATION") {
            logging.location = v;
        }
        if let Some(v) = parse_env("USECASE_LOG_NON_BLOCKING") {
            logging.non_blocking = v;
        }
        config
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
