use std::env;
use std::time::Duration;

use serde::Serialize;
use tracing::level_filters::LevelFilter;

pub const SUPPORTED_DRIVERS: [&str; 2] = ["sqlite", "sqlite3"];
const MAX_LOG_LEVEL: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,

    // Database
    pub db_driver: String,
    pub db_path: String,

    // Observability
    pub debug_mode: bool,
    /// 0..=6: panic, fatal, error, warn, info, debug, trace.
    pub log_level: u8,
    pub log_format: LogFormat,

    pub shutdown_grace_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 9080,
            db_driver: "sqlite".into(),
            db_path: String::new(),
            debug_mode: false,
            log_level: 4,
            log_format: LogFormat::Text,
            shutdown_grace_secs: 5,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let config = Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: match env::var("PORT") {
                Ok(raw) => raw.parse()?,
                Err(_) => defaults.port,
            },
            db_driver: env::var("DB_DRIVER").unwrap_or(defaults.db_driver),
            db_path: env::var("DB_PATH").unwrap_or_default(),
            debug_mode: env::var("DEBUG")
                .map(|v| parse_bool(&v))
                .unwrap_or(defaults.debug_mode),
            log_level: match env::var("LOG_LEVEL") {
                Ok(raw) => raw
                    .parse()
                    .map_err(|_| anyhow::anyhow!("LOG_LEVEL must be a number, got '{raw}'"))?,
                Err(_) => defaults.log_level,
            },
            log_format: match env::var("LOG_FORMAT") {
                Ok(raw) if raw.eq_ignore_ascii_case("json") => LogFormat::Json,
                _ => LogFormat::Text,
            },
            shutdown_grace_secs: env::var("SHUTDOWN_GRACE_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.shutdown_grace_secs),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.log_level > MAX_LOG_LEVEL {
            anyhow::bail!("Log level MUST be one of [0..{MAX_LOG_LEVEL}]");
        }
        if self.db_path.trim().is_empty() {
            anyhow::bail!("Database path MUST be specified");
        }
        if !SUPPORTED_DRIVERS.contains(&self.db_driver.as_str()) {
            anyhow::bail!("Database driver MUST be one of {SUPPORTED_DRIVERS:?}");
        }
        Ok(())
    }

    /// Map the numeric verbosity onto tracing levels. Panic and fatal have no
    /// tracing counterpart and collapse into error.
    pub fn level_filter(&self) -> LevelFilter {
        match self.log_level {
            0..=2 => LevelFilter::ERROR,
            3 => LevelFilter::WARN,
            4 => LevelFilter::INFO,
            5 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_bool(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
