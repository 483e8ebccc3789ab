//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use axum::http::HeaderValue;
use card_room::{
    constants::{
        DEFAULT_BIG_BLIND, DEFAULT_SMALL_BLIND, DEFAULT_START_COUNTDOWN_SECS,
        DEFAULT_STARTING_STACK, MAX_SEATS,
    },
    table::{TableConfig, TableError},
};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

const DEFAULT_BIND: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 6969);

/// Shortest accepted JWT secret, in bytes
const MIN_JWT_SECRET_LEN: usize = 32;

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Shared secret connection tokens are signed with
    pub jwt_secret: String,
    /// Allowed CORS origin. Any origin is allowed when unset.
    pub cors_origin: Option<HeaderValue>,
    /// Settings every table created at startup uses
    pub table_defaults: TableConfig,
    /// Number of tables to create on startup
    pub initial_tables: usize,
    /// Maximum number of open tables
    pub max_tables: usize,
}

/// Values given on the command line, which win over the environment
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub bind: Option<SocketAddr>,
    pub tables: Option<usize>,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns error if required variables are missing or unparseable
    pub fn from_env(overrides: CliOverrides) -> Result<Self, ConfigError> {
        Self::from_vars(overrides, |key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_vars<F>(overrides: CliOverrides, var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind = match overrides.bind {
            Some(bind) => bind,
            None => match var("SERVER_BIND") {
                Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                    var: "SERVER_BIND".to_string(),
                    reason: format!("'{raw}' is not an IP:PORT address"),
                })?,
                None => DEFAULT_BIND,
            },
        };

        let jwt_secret = var("JWT_SECRET").ok_or_else(|| ConfigError::MissingRequired {
            var: "JWT_SECRET".to_string(),
            hint: "Generate with: openssl rand -hex 32".to_string(),
        })?;

        let cors_origin = var("CORS_ORIGIN")
            .map(|raw| {
                HeaderValue::from_str(&raw).map_err(|_| ConfigError::Invalid {
                    var: "CORS_ORIGIN".to_string(),
                    reason: format!("'{raw}' is not a valid origin"),
                })
            })
            .transpose()?;

        let table_defaults = TableConfig {
            name: "Table".to_string(),
            max_seats: parse_var_or(&var, "TABLE_MAX_SEATS", MAX_SEATS),
            small_blind: parse_var_or(&var, "TABLE_SMALL_BLIND", DEFAULT_SMALL_BLIND),
            big_blind: parse_var_or(&var, "TABLE_BIG_BLIND", DEFAULT_BIG_BLIND),
            starting_stack: parse_var_or(&var, "TABLE_STARTING_STACK", DEFAULT_STARTING_STACK),
            start_countdown_secs: parse_var_or(
                &var,
                "START_COUNTDOWN_SECS",
                DEFAULT_START_COUNTDOWN_SECS,
            ),
        };

        let initial_tables = overrides
            .tables
            .unwrap_or_else(|| parse_var_or(&var, "INITIAL_TABLES", 1));

        Ok(ServerConfig {
            bind,
            jwt_secret,
            cors_origin,
            table_defaults,
            initial_tables,
            max_tables: parse_var_or(&var, "MAX_TABLES", 16),
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ConfigError::Invalid {
                var: "JWT_SECRET".to_string(),
                reason: format!("Must be at least {MIN_JWT_SECRET_LEN} characters"),
            });
        }

        if self.max_tables == 0 {
            return Err(ConfigError::Invalid {
                var: "MAX_TABLES".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.initial_tables > self.max_tables {
            return Err(ConfigError::Invalid {
                var: "INITIAL_TABLES".to_string(),
                reason: format!("Cannot exceed max tables ({})", self.max_tables),
            });
        }

        self.table_defaults.validate()?;
        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },

    #[error("Invalid table defaults: {0}")]
    TableDefaults(#[from] TableError),
}

/// Parse a variable, falling back to `default` when unset or unparseable
fn parse_var_or<F, T>(var: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    var(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}
