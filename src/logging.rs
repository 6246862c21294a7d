//! # Logging Module
//!
//! The library only emits `tracing` events: population, identity injection,
//! security denials and validation failures. Installing a subscriber is left
//! to the application; [`init`] does it from the `logging` section of
//! [`Config`](crate::config::Config).
//!
//! `RUST_LOG`, when set, takes precedence over `logging.level`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            other => Err(format!("unknown log format `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default directive, e.g. `info` or `usecase_http=debug`
    pub level: String,
    pub format: LogFormat,
    /// Extra comma-separated directives, e.g. `usecase_http::request=trace`
    pub targets: Option<String>,
    /// Include file:line
    pub location: bool,
    /// Write through a background thread
    pub non_blocking: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Json,
            targets: None,
            location: false,
            non_blocking: false,
        }
    }
}

impl LogConfig {
    /// `RUST_LOG` if set, else `level`, plus every valid `targets` directive.
    /// Invalid directives are reported and skipped.
    #[must_use]
    pub fn filter(&self) -> EnvFilter {
        let mut filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));
        let directives = self.targets.iter().flat_map(|t| t.split(','));
        for directive in directives.map(str::trim).filter(|d| !d.is_empty()) {
            match directive.parse() {
                Ok(parsed) => filter = filter.add_directive(parsed),
                Err(_) => eprintln!("Warning: Invalid log filter directive: {directive}"),
            }
        }
        filter
    }
}

/// Install the global subscriber. Fails when one is already installed.
///
/// With `non_blocking` the returned guard owns the writer thread; keep it
/// alive for the lifetime of the application.
///
/// ```no_run
/// use usecase_http::config::Config;
///
/// let _guard = usecase_http::logging::init(&Config::from_env().logging)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let (writer, guard) = if config.non_blocking {
        let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
        (BoxMakeWriter::new(writer), Some(guard))
    } else {
        (BoxMakeWriter::new(std::io::stdout), None)
    };

    let layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(config.location)
        .with_line_number(config.location)
        .with_writer(writer);
    let layer = match config.format {
        LogFormat::Json => layer.json().with_span_list(true).boxed(),
        LogFormat::Pretty => layer.pretty().boxed(),
    };

    tracing_subscriber::registry()
        .with(config.filter())
        .with(layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!(" PRETTY ".parse::<LogFormat>(), Ok(LogFormat::Pretty));
        assert_eq!("json".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_yaml_section() {
        let config: LogConfig =
            serde_yaml::from_str("format: pretty\ntargets: usecase_http=debug\n").unwrap();
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.level, "info");
        assert!(!config.non_blocking);
    }

    #[test]
    fn test_filter_skips_invalid_directives() {
        let config = LogConfig {
            targets: Some("usecase_http::request=debug, ,usecase_http=loud".to_string()),
            ..LogConfig::default()
        };
        let rendered = config.filter().to_string();
        assert!(rendered.contains("usecase_http::request=debug"));
        assert!(!rendered.contains("loud"));
    }
}
