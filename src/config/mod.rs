//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `TENDER_*` environment variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    CATEGORY_BONUS, DEFAULT_APPROVAL_THRESHOLD, DEFAULT_MAX_FEATURES, DEFAULT_MIN_SCORE,
    DEFAULT_TOP_N, is_unit_interval,
};
use crate::matching::MatchOptions;
use crate::session::SessionSettings;
use crate::vectorizer::VectorizerConfig;

/// Server and engine configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `TENDER_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// JSON service catalog loaded at startup. Default: `./catalog.json`.
    pub catalog_path: PathBuf,

    /// Matches kept per requirement. Default: `3`.
    pub top_n: usize,

    /// Minimum final score for a match to be returned. Default: `0.0`.
    pub min_score: f32,

    /// Cutoff used by bulk approval when the caller gives none. Default: `0.80`.
    pub approval_threshold: f32,

    /// Score added when categories agree. Default: `0.15`.
    pub category_bonus: f32,

    /// Vectorizer vocabulary cap. Default: `500`.
    pub max_features: usize,

    /// Overall per-request timeout for the HTTP gateway. Default: 10s.
    pub request_timeout: Duration,
}

pub const DEFAULT_CATALOG_PATH: &str = "./catalog.json";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            top_n: DEFAULT_TOP_N,
            min_score: DEFAULT_MIN_SCORE,
            approval_threshold: DEFAULT_APPROVAL_THRESHOLD,
            category_bonus: CATEGORY_BONUS,
            max_features: DEFAULT_MAX_FEATURES,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub const ENV_PORT: &'static str = "TENDER_PORT";
    pub const ENV_BIND_ADDR: &'static str = "TENDER_BIND_ADDR";
    pub const ENV_CATALOG_PATH: &'static str = "TENDER_CATALOG_PATH";
    pub const ENV_TOP_N: &'static str = "TENDER_TOP_N";
    pub const ENV_MIN_SCORE: &'static str = "TENDER_MIN_SCORE";
    pub const ENV_APPROVAL_THRESHOLD: &'static str = "TENDER_APPROVAL_THRESHOLD";
    pub const ENV_CATEGORY_BONUS: &'static str = "TENDER_CATEGORY_BONUS";
    pub const ENV_MAX_FEATURES: &'static str = "TENDER_MAX_FEATURES";
    pub const ENV_REQUEST_TIMEOUT_SECS: &'static str = "TENDER_REQUEST_TIMEOUT_SECS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let catalog_path = Self::parse_path_from_env(Self::ENV_CATALOG_PATH, defaults.catalog_path);
        let top_n = Self::parse_usize_from_env(Self::ENV_TOP_N, defaults.top_n);
        let min_score = Self::parse_score_from_env(Self::ENV_MIN_SCORE, defaults.min_score)?;
        let approval_threshold =
            Self::parse_score_from_env(Self::ENV_APPROVAL_THRESHOLD, defaults.approval_threshold)?;
        let category_bonus =
            Self::parse_score_from_env(Self::ENV_CATEGORY_BONUS, defaults.category_bonus)?;
        let max_features = Self::parse_usize_from_env(Self::ENV_MAX_FEATURES, defaults.max_features);
        let request_timeout = Duration::from_secs(Self::parse_u64_from_env(
            Self::ENV_REQUEST_TIMEOUT_SECS,
            defaults.request_timeout.as_secs(),
        ));

        Ok(Self {
            port,
            bind_addr,
            catalog_path,
            top_n,
            min_score,
            approval_threshold,
            category_bonus,
            max_features,
            request_timeout,
        })
    }

    /// Validates ranges and the catalog path (does not read the catalog).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.catalog_path.exists() {
            return Err(ConfigError::PathNotFound {
                path: self.catalog_path.clone(),
            });
        }
        if !self.catalog_path.is_file() {
            return Err(ConfigError::NotAFile {
                path: self.catalog_path.clone(),
            });
        }

        for (name, value) in [
            (Self::ENV_MIN_SCORE, self.min_score),
            (Self::ENV_APPROVAL_THRESHOLD, self.approval_threshold),
            (Self::ENV_CATEGORY_BONUS, self.category_bonus),
        ] {
            if !is_unit_interval(value) {
                return Err(ConfigError::ScoreOutOfRange { name, value });
            }
        }

        if self.top_n == 0 {
            return Err(ConfigError::ZeroValue {
                name: Self::ENV_TOP_N,
            });
        }
        if self.max_features == 0 {
            return Err(ConfigError::ZeroValue {
                name: Self::ENV_MAX_FEATURES,
            });
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::ZeroValue {
                name: Self::ENV_REQUEST_TIMEOUT_SECS,
            });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Engine settings derived from this configuration.
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            vectorizer: VectorizerConfig::default().max_features(self.max_features),
            category_bonus: self.category_bonus,
            options: MatchOptions::new(self.top_n, self.min_score),
            approval_threshold: self.approval_threshold,
        }
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_score_from_env(var_name: &'static str, default: f32) -> Result<f32, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::ScoreParseError {
                    name: var_name,
                    value,
                    source: e,
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or(default)
    }

    fn parse_usize_from_env(var_name: &str, default: usize) -> usize {
        env::var(var_name)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }
}
