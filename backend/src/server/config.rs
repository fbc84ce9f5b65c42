//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `JOBBOX_*` environment variables and config
//! files, in that order of precedence.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_CONNECTION_TIMEOUT_SECS: u64 = 30;

/// Raised when the settings cannot describe a usable store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("JOBBOX_DATABASE_URL is required unless JOBBOX_IN_MEMORY=true")]
    MissingDatabaseUrl,
}

/// Where documents are kept.
#[derive(Debug, Clone)]
pub enum StoreBackend {
    InMemory,
    Postgres(PoolConfig),
}

/// Configuration for the HTTP server and its document store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "JOBBOX")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Keep documents in process memory instead of PostgreSQL.
    #[ortho_config(default = false)]
    pub in_memory: bool,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub pool_connection_timeout_secs: Option<u64>,
}

impl ServerSettings {
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// `(host, port)` pair accepted by `HttpServer::bind`.
    pub fn bind_addr(&self) -> (String, u16) {
        (self.host().to_owned(), self.port())
    }

    /// Resolve the store the server should use.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingDatabaseUrl`] when neither a database URL nor
    /// the in-memory store is configured.
    pub fn store_backend(&self) -> Result<StoreBackend, ConfigError> {
        if self.in_memory {
            return Ok(StoreBackend::InMemory);
        }
        let url = self
            .database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)?;
        let timeout = Duration::from_secs(
            self.pool_connection_timeout_secs
                .unwrap_or(DEFAULT_POOL_CONNECTION_TIMEOUT_SECS),
        );
        Ok(StoreBackend::Postgres(
            PoolConfig::new(url)
                .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE))
                .with_connection_timeout(timeout),
        ))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const KEYS: [&str; 6] = [
        "JOBBOX_HOST",
        "JOBBOX_PORT",
        "JOBBOX_DATABASE_URL",
        "JOBBOX_IN_MEMORY",
        "JOBBOX_POOL_MAX_SIZE",
        "JOBBOX_POOL_CONNECTION_TIMEOUT_SECS",
    ];

    fn load_with(overrides: &[(&str, &str)]) -> ServerSettings {
        let vars = KEYS.map(|key| {
            let value = overrides
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value).to_owned());
            (key, value)
        });
        let _guard = lock_env(vars);
        ServerSettings::load_from_iter([OsString::from("jobbox")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let settings = load_with(&[]);
        assert_eq!(settings.bind_addr(), ("0.0.0.0".to_owned(), 5000));
        assert!(!settings.in_memory);
        assert_eq!(
            settings.store_backend().expect_err("no url"),
            ConfigError::MissingDatabaseUrl
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let settings = load_with(&[
            ("JOBBOX_HOST", "127.0.0.1"),
            ("JOBBOX_PORT", "8080"),
            ("JOBBOX_DATABASE_URL", "postgres://localhost/jobbox"),
            ("JOBBOX_POOL_MAX_SIZE", "4"),
        ]);
        assert_eq!(settings.bind_addr(), ("127.0.0.1".to_owned(), 8080));
        match settings.store_backend().expect("postgres backend") {
            StoreBackend::Postgres(config) => {
                assert_eq!(config.database_url(), "postgres://localhost/jobbox");
            }
            StoreBackend::InMemory => panic!("expected postgres backend"),
        }
    }

    #[rstest]
    fn in_memory_needs_no_database_url() {
        let settings = load_with(&[("JOBBOX_IN_MEMORY", "true")]);
        assert!(matches!(
            settings.store_backend(),
            Ok(StoreBackend::InMemory)
        ));
    }

    #[rstest]
    fn blank_database_url_is_treated_as_missing() {
        let settings = load_with(&[("JOBBOX_DATABASE_URL", "  ")]);
        assert!(settings.store_backend().is_err());
    }
}
