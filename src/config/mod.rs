//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `SCORECARD_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

use crate::constants::{ColumnNames, DEFAULT_BENCHMARK_FILENAME, DEFAULT_MAX_UPLOAD_BYTES};

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `SCORECARD_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Ground-truth benchmark CSV. Default: `./target_data.csv`.
    pub benchmark_path: PathBuf,

    /// Largest accepted submission body in bytes. Default: 10 MiB.
    pub max_upload_bytes: usize,

    /// Identifier, truth and prediction column names.
    pub columns: ColumnNames,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            benchmark_path: PathBuf::from(".").join(DEFAULT_BENCHMARK_FILENAME),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            columns: ColumnNames::default(),
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "SCORECARD_PORT";
    const ENV_BIND_ADDR: &'static str = "SCORECARD_BIND_ADDR";
    const ENV_BENCHMARK_PATH: &'static str = "SCORECARD_BENCHMARK_PATH";
    const ENV_MAX_UPLOAD_BYTES: &'static str = "SCORECARD_MAX_UPLOAD_BYTES";
    const ENV_ID_COLUMN: &'static str = "SCORECARD_ID_COLUMN";
    const ENV_TRUTH_COLUMN: &'static str = "SCORECARD_TRUTH_COLUMN";
    const ENV_PREDICTION_COLUMN: &'static str = "SCORECARD_PREDICTION_COLUMN";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let benchmark_path =
            Self::parse_path_from_env(Self::ENV_BENCHMARK_PATH, defaults.benchmark_path);
        let max_upload_bytes = Self::parse_upload_limit_from_env(defaults.max_upload_bytes)?;
        let columns = ColumnNames {
            identifier: Self::parse_column_from_env(
                Self::ENV_ID_COLUMN,
                defaults.columns.identifier,
            )?,
            truth: Self::parse_column_from_env(Self::ENV_TRUTH_COLUMN, defaults.columns.truth)?,
            prediction: Self::parse_column_from_env(
                Self::ENV_PREDICTION_COLUMN,
                defaults.columns.prediction,
            )?,
        };

        let config = Self {
            port,
            bind_addr,
            benchmark_path,
            max_upload_bytes,
            columns,
        };
        config.validate_columns()?;
        Ok(config)
    }

    /// Validates paths and basic invariants.
    ///
    /// A missing benchmark file is reported here so the server can refuse to start.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_columns()?;

        if self.max_upload_bytes == 0 {
            return Err(ConfigError::InvalidUploadLimit {
                value: self.max_upload_bytes.to_string(),
            });
        }

        if !self.benchmark_path.exists() {
            return Err(ConfigError::PathNotFound {
                path: self.benchmark_path.clone(),
            });
        }
        if !self.benchmark_path.is_file() {
            return Err(ConfigError::NotAFile {
                path: self.benchmark_path.clone(),
            });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        match self.bind_addr {
            IpAddr::V4(addr) => format!("{}:{}", addr, self.port),
            IpAddr::V6(addr) => format!("[{}]:{}", addr, self.port),
        }
    }

    fn validate_columns(&self) -> Result<(), ConfigError> {
        let ColumnNames {
            identifier,
            truth,
            prediction,
        } = &self.columns;

        if identifier == truth || identifier == prediction {
            return Err(ConfigError::DuplicateColumnName {
                name: identifier.clone(),
            });
        }

        Ok(())
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

    fn parse_upload_limit_from_env(default: usize) -> Result<usize, ConfigError> {
        match env::var(Self::ENV_MAX_UPLOAD_BYTES) {
            Ok(value) => match value.trim().parse::<usize>() {
                Ok(limit) if limit > 0 => Ok(limit),
                _ => Err(ConfigError::InvalidUploadLimit { value }),
            },
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

    fn parse_column_from_env(
        var_name: &'static str,
        default: String,
    ) -> Result<String, ConfigError> {
        match env::var(var_name) {
            Ok(value) => {
                let value = value.trim();
                if value.is_empty() {
                    return Err(ConfigError::EmptyColumnName { name: var_name });
                }
                Ok(value.to_string())
            }
            Err(_) => Ok(default),
        }
    }
}
