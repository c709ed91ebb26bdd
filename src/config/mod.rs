use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing database location: set DATABASE_URL or DB_HOST")]
    MissingDatabaseUrl,

    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),

    #[error("Invalid table name: {0}")]
    InvalidTableName(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Full connection URL. When unset it is assembled from the `DB_*` variables.
    #[serde(skip_serializing)]
    pub url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub table: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub max_request_size_bytes: usize,
    /// Include the raw store error message under `details` in 500 responses.
    pub expose_error_details: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    /// Empty means any origin is allowed.
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Database overrides
        self.database.url = match env::var("DATABASE_URL") {
            Ok(v) if !v.is_empty() => Some(v),
            _ => database_url_from_parts().unwrap_or_else(|e| {
                tracing::warn!("Ignoring DB_* settings: {}", e);
                None
            }),
        };
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_ACQUIRE_TIMEOUT") {
            self.database.acquire_timeout_secs = v.parse().unwrap_or(self.database.acquire_timeout_secs);
        }
        if let Ok(v) = env::var("DATABASE_TABLE") {
            self.database.table = v;
        }

        // API overrides
        if let Ok(v) = env::var("PORT") {
            self.api.port = v.parse().unwrap_or(self.api.port);
        }
        if let Ok(v) = env::var("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = v.parse().unwrap_or(self.api.max_request_size_bytes);
        }
        if let Ok(v) = env::var("API_EXPOSE_ERROR_DETAILS") {
            self.api.expose_error_details = v.parse().unwrap_or(self.api.expose_error_details);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        self
    }

    /// Checks settings that cannot be fixed by falling back to a default.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.is_none() {
            return Err(ConfigError::MissingDatabaseUrl);
        }
        if !is_valid_table_name(&self.database.table) {
            return Err(ConfigError::InvalidTableName(self.database.table.clone()));
        }
        Ok(())
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                acquire_timeout_secs: 30,
                table: "employees".to_string(),
            },
            api: ApiConfig {
                port: 3001,
                max_request_size_bytes: 1024 * 1024, // 1MB
                expose_error_details: true,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: Vec::new(),
            },
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                acquire_timeout_secs: 10,
                table: "employees".to_string(),
            },
            api: ApiConfig {
                port: 3001,
                max_request_size_bytes: 256 * 1024,
                expose_error_details: true,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: Vec::new(),
            },
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                acquire_timeout_secs: 5,
                table: "employees".to_string(),
            },
            api: ApiConfig {
                port: 3001,
                max_request_size_bytes: 64 * 1024,
                expose_error_details: false,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: Vec::new(),
            },
        }
    }
}

/// Builds a connection URL from `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`
/// and `DB_NAME`. Returns `Ok(None)` when `DB_HOST` is not set.
fn database_url_from_parts() -> Result<Option<String>, ConfigError> {
    let host = match env::var("DB_HOST") {
        Ok(h) if !h.is_empty() => h,
        _ => return Ok(None),
    };

    build_database_url(
        &host,
        env::var("DB_PORT").ok().and_then(|p| p.parse().ok()),
        env::var("DB_USER").ok().as_deref(),
        env::var("DB_PASSWORD").ok().as_deref(),
        env::var("DB_NAME").ok().as_deref(),
    )
    .map(Some)
}

pub fn build_database_url(
    host: &str,
    port: Option<u16>,
    user: Option<&str>,
    password: Option<&str>,
    database: Option<&str>,
) -> Result<String, ConfigError> {
    let mut url = url::Url::parse("postgres://localhost")
        .map_err(|e| ConfigError::InvalidDatabaseUrl(e.to_string()))?;

    url.set_host(Some(host))
        .map_err(|e| ConfigError::InvalidDatabaseUrl(format!("{}: {}", host, e)))?;
    let bad = |what: &str| ConfigError::InvalidDatabaseUrl(format!("cannot set {}", what));
    url.set_port(port).map_err(|_| bad("port"))?;
    if let Some(user) = user.filter(|u| !u.is_empty()) {
        url.set_username(user).map_err(|_| bad("user"))?;
    }
    if let Some(password) = password.filter(|p| !p.is_empty()) {
        url.set_password(Some(password)).map_err(|_| bad("password"))?;
    }
    if let Some(database) = database.filter(|d| !d.is_empty()) {
        url.set_path(&format!("/{}", database));
    }

    Ok(url.into())
}

/// Table names are interpolated into SQL, so only `[A-Za-z0-9_]` is accepted.
pub fn is_valid_table_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}
