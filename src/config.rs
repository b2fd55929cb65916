//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgSslMode};

/// Which `AccountStore` implementation backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection target, from DATABASE_URL or the `*_DB` parts
    pub database: Option<PgConnectOptions>,

    /// Maximum database connections in pool
    pub database_max_connections: u32,

    /// Idle connections the pool keeps open
    pub database_min_connections: u32,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Upper bound for a single store call
    pub store_timeout: Duration,

    pub store_backend: StoreBackend,

    /// Apply embedded migrations on startup
    pub run_migrations: bool,

    pub log_format: LogFormat,

    /// Directory served as a fallback for unmatched paths
    pub static_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// `from_env` delegates here; tests pass a map instead of mutating the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_backend = match lookup("STORE_BACKEND").as_deref() {
            None | Some("postgres") => StoreBackend::Postgres,
            Some("memory") => StoreBackend::Memory,
            Some(_) => return Err(ConfigError::InvalidValue("STORE_BACKEND")),
        };

        let database = match lookup("DATABASE_URL") {
            Some(url) => Some(
                url.parse::<PgConnectOptions>()
                    .map_err(|_| ConfigError::InvalidValue("DATABASE_URL"))?,
            ),
            None => compose_database_options(&lookup)?,
        };
        if store_backend == StoreBackend::Postgres && database.is_none() {
            return Err(ConfigError::MissingEnv("DATABASE_URL"));
        }

        let database_max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 25)?;
        let database_min_connections: u32 = parse_or(&lookup, "DATABASE_MIN_CONNECTIONS", 5)?;
        if database_min_connections > database_max_connections {
            return Err(ConfigError::InvalidValue("DATABASE_MIN_CONNECTIONS"));
        }

        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        // Older deployments set SERVER_PORT
        let port = match lookup("PORT").or_else(|| lookup("SERVER_PORT")) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue("PORT"))?,
            None => 3000,
        };

        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string());

        let store_timeout_ms: u64 = parse_or(&lookup, "STORE_TIMEOUT_MS", 5000)?;
        if store_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue("STORE_TIMEOUT_MS"));
        }

        let run_migrations = parse_or(&lookup, "RUN_MIGRATIONS", false)?;

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(_) => return Err(ConfigError::InvalidValue("LOG_FORMAT")),
        };

        let static_dir = lookup("STATIC_DIR").map(PathBuf::from);

        Ok(Self {
            database,
            database_max_connections,
            database_min_connections,
            host,
            port,
            environment,
            store_timeout: Duration::from_millis(store_timeout_ms),
            store_backend,
            run_migrations,
            log_format,
            static_dir,
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue(key)),
        None => Ok(default),
    }
}

/// Build connection options from the discrete `*_DB` variables.
///
/// `None` unless host, name, and user are all present. Each part is set
/// individually, so passwords may contain URL metacharacters.
fn compose_database_options<F>(lookup: &F) -> Result<Option<PgConnectOptions>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let (Some(host), Some(name), Some(user)) =
        (lookup("HOST_DB"), lookup("NAME_DB"), lookup("USER_DB"))
    else {
        return Ok(None);
    };

    let port: u16 = parse_or(lookup, "PORT_DB", 5432)?;
    let ssl_mode: PgSslMode = parse_or(lookup, "SSLMODE_DB", PgSslMode::Prefer)?;

    let mut options = PgConnectOptions::new()
        .host(&host)
        .port(port)
        .username(&user)
        .database(&name)
        .ssl_mode(ssl_mode);
    if let Some(password) = lookup("PASSWORD_DB") {
        options = options.password(&password);
    }

    Ok(Some(options))
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
