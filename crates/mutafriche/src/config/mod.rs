use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use crate::evaluation::config::MAX_CACHE_SCAN_LIMIT;
use crate::evaluation::{CacheFailurePolicy, EvaluationSettings};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub evaluation: EvaluationSettings,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let ansi = parse_var("APP_LOG_ANSI", false)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level, ansi },
            evaluation: load_evaluation_settings()?,
        })
    }
}

fn load_evaluation_settings() -> Result<EvaluationSettings, ConfigError> {
    let defaults = EvaluationSettings::default();

    let cache_failure_policy = match env::var("APP_CACHE_FAILURE_POLICY") {
        Ok(raw) => CacheFailurePolicy::parse(&raw).ok_or(ConfigError::InvalidValue {
            key: "APP_CACHE_FAILURE_POLICY",
        })?,
        Err(_) => defaults.cache_failure_policy,
    };

    let cache_scan_limit = parse_var("APP_CACHE_SCAN_LIMIT", defaults.cache_scan_limit)?;
    if !(1..=MAX_CACHE_SCAN_LIMIT).contains(&cache_scan_limit) {
        return Err(ConfigError::InvalidValue {
            key: "APP_CACHE_SCAN_LIMIT",
        });
    }

    let source_timeout_ms = parse_var("APP_SOURCE_TIMEOUT_MS", defaults.source_timeout_ms)?;
    if source_timeout_ms == 0 {
        return Err(ConfigError::InvalidValue {
            key: "APP_SOURCE_TIMEOUT_MS",
        });
    }

    let settings = EvaluationSettings {
        cache_ttl_hours: parse_var("APP_CACHE_TTL_HOURS", defaults.cache_ttl_hours)?,
        cache_scan_limit,
        cavity_strong_within_m: parse_distance(
            "APP_CAVITY_STRONG_WITHIN_M",
            defaults.cavity_strong_within_m,
        )?,
        cavity_medium_within_m: parse_distance(
            "APP_CAVITY_MEDIUM_WITHIN_M",
            defaults.cavity_medium_within_m,
        )?,
        pollution_radius_m: parse_distance("APP_POLLUTION_RADIUS_M", defaults.pollution_radius_m)?,
        source_timeout_ms,
        cache_failure_policy,
    };

    if settings.cavity_medium_within_m < settings.cavity_strong_within_m {
        return Err(ConfigError::InvalidHazardThresholds);
    }

    Ok(settings)
}

fn parse_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue { key }),
        Err(_) => Ok(default),
    }
}

/// Distances in metres must be finite and non-negative.
fn parse_distance(key: &'static str, default: f64) -> Result<f64, ConfigError> {
    let value = parse_var(key, default)?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidValue { key })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Log filter and formatting controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub ansi: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidValue { key: &'static str },
    InvalidHazardThresholds,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidValue { key } => write!(f, "{key} has an invalid value"),
            ConfigError::InvalidHazardThresholds => write!(
                f,
                "APP_CAVITY_MEDIUM_WITHIN_M must not be below APP_CAVITY_STRONG_WITHIN_M"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidValue { .. }
            | ConfigError::InvalidHazardThresholds => None,
        }
    }
}
