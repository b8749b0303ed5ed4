//! Process configuration read from `.env` and environment variables.
//!
//! | Variable                 | Default       |
//! |--------------------------|---------------|
//! | `APP_ENV`                | `development` |
//! | `APP_HOST`               | `127.0.0.1`   |
//! | `APP_PORT`               | `3000`        |
//! | `APP_LOG_LEVEL`          | `info`        |
//! | `WELLNESS_TREND_EPSILON` | `0.0`         |

use std::env;
use std::net::{AddrParseError, IpAddr, Ipv4Addr, SocketAddr};

const ENV_STAGE: &str = "APP_ENV";
const ENV_HOST: &str = "APP_HOST";
const ENV_PORT: &str = "APP_PORT";
const ENV_LOG_LEVEL: &str = "APP_LOG_LEVEL";
const ENV_TREND_EPSILON: &str = "WELLNESS_TREND_EPSILON";

/// Deployment stage. Controls log formatting only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppEnvironment {
    #[default]
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    /// Unrecognized stages fall back to development.
    fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub wellness: WellnessConfig,
}

impl AppConfig {
    /// Reads `.env` if present, then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            environment: read_var(ENV_STAGE)
                .map(|stage| AppEnvironment::from_label(&stage))
                .unwrap_or_default(),
            server: ServerConfig::from_env()?,
            telemetry: TelemetryConfig::from_env(),
            wellness: WellnessConfig::from_env()?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let port = match read_var(ENV_PORT) {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => 3000,
        };

        Ok(Self {
            host: read_var(ENV_HOST).unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
        })
    }

    /// `localhost` is accepted as an alias for the IPv4 loopback.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        } else {
            self.host
                .parse()
                .map_err(|source| ConfigError::InvalidHost {
                    host: self.host.clone(),
                    source,
                })?
        };
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// `EnvFilter` directives, e.g. `info` or `rugby_hub=debug,info`.
    pub log_level: String,
}

impl TelemetryConfig {
    fn from_env() -> Self {
        Self {
            log_level: read_var(ENV_LOG_LEVEL).unwrap_or_else(|| "info".to_string()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct WellnessConfig {
    /// Largest absolute change still reported as `stable`. Zero keeps exact comparison.
    pub trend_epsilon: f64,
}

impl WellnessConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let Some(raw) = read_var(ENV_TREND_EPSILON) else {
            return Ok(Self::default());
        };

        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => Ok(Self {
                trend_epsilon: value,
            }),
            _ => Err(ConfigError::InvalidTrendEpsilon(raw)),
        }
    }
}

/// Trimmed value of `name`; unset and blank are treated alike.
fn read_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("APP_PORT must be a port number between 0 and 65535 (found '{0}')")]
    InvalidPort(String),
    #[error("APP_HOST '{host}' is not an IPv4 or IPv6 address")]
    InvalidHost {
        host: String,
        #[source]
        source: AddrParseError,
    },
    #[error("WELLNESS_TREND_EPSILON must be a non-negative number (found '{0}')")]
    InvalidTrendEpsilon(String),
}
