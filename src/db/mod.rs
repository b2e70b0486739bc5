use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::Connection;
use std::env;
use std::fmt;
use crate::errors::{AppError, ConfigError};

const DEFAULT_PORT: u16 = 3306;

/// Connection parameters for the employees database, read once at startup.
#[derive(Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

impl DbConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));

        let port = match lookup("DB_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|err| ConfigError::Invalid("DB_PORT", err.to_string()))?,
            None => DEFAULT_PORT,
        };

        let host = required("DB_HOST")?;
        if host.trim().is_empty() {
            return Err(ConfigError::Invalid("DB_HOST", "cannot be empty".to_string()));
        }

        Ok(DbConfig {
            host,
            port,
            username: required("DB_USERNAME")?,
            // An empty password is a legitimate MySQL account setting.
            password: required("DB_PASSWORD")?,
            database: required("DB_NAME")?,
        })
    }

    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(&self.password)
            .database(&self.database)
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}

/// Opens a fresh connection for a single request.
pub async fn connect(config: &DbConfig) -> Result<MySqlConnection, AppError> {
    MySqlConnection::connect_with(&config.connect_options())
        .await
        .map_err(|err| {
            log::error!("Database connection to {}:{} failed: {}", config.host, config.port, err);
            AppError::ConnectionFailed(err.to_string())
        })
}

/// Closes a request-scoped connection. Close failures are logged, not surfaced.
pub async fn release(conn: MySqlConnection) {
    if let Err(err) = conn.close().await {
        log::warn!("Failed to close database connection: {}", err);
    }
}

/// The message the server reported, falling back to the driver's description.
pub fn driver_message(err: &sqlx::Error) -> String {
    match err.as_database_error() {
        Some(db_err) => db_err.message().to_string(),
        None => err.to_string(),
    }
}
