//! Server settings loaded via OrthoConfig and the resolved server configuration.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use pvz_backend::outbound::persistence::{DbPool, PoolConfig};
use serde::Deserialize;
use zeroize::Zeroizing;

const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_GRPC_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_DB_CONNECTION_LIFETIME_SECS: u64 = 60;
const DEFAULT_DB_IDLE_TIMEOUT_SECS: u64 = 60;
const DEFAULT_DB_CHECKOUT_TIMEOUT_SECS: u64 = 5;

/// Problems found while resolving [`ServerSettings`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("missing required setting {key}")]
    Missing { key: &'static str },
    #[error("invalid socket address for {key}: {value} ({message})")]
    InvalidAddress {
        key: &'static str,
        value: String,
        message: String,
    },
}

/// Startup settings read from `PVZ_*` environment variables, CLI flags and
/// an optional config file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PVZ")]
pub struct ServerSettings {
    /// HTTP listen address.
    pub http_addr: Option<String>,
    /// gRPC listen address.
    pub grpc_addr: Option<String>,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// HMAC secret used to sign bearer tokens.
    pub jwt_secret: Option<String>,
    /// Maximum pooled connections.
    pub db_max_connections: Option<u32>,
    /// Seconds before a pooled connection is recycled.
    pub db_connection_lifetime_secs: Option<u64>,
    /// Seconds an idle pooled connection is kept.
    pub db_idle_timeout_secs: Option<u64>,
    /// Seconds to wait for a free pooled connection.
    pub db_checkout_timeout_secs: Option<u64>,
    /// Apply embedded migrations at startup.
    pub run_migrations: Option<bool>,
}

fn parse_addr(key: &'static str, value: Option<&str>, fallback: &str) -> Result<SocketAddr, SettingsError> {
    let raw = value.unwrap_or(fallback);
    raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::InvalidAddress {
        key,
        value: raw.to_owned(),
        message: err.to_string(),
    })
}

fn required<'a>(key: &'static str, value: Option<&'a str>) -> Result<&'a str, SettingsError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(SettingsError::Missing { key })
}

impl ServerSettings {
    pub fn http_addr(&self) -> Result<SocketAddr, SettingsError> {
        parse_addr("PVZ_HTTP_ADDR", self.http_addr.as_deref(), DEFAULT_HTTP_ADDR)
    }

    pub fn grpc_addr(&self) -> Result<SocketAddr, SettingsError> {
        parse_addr("PVZ_GRPC_ADDR", self.grpc_addr.as_deref(), DEFAULT_GRPC_ADDR)
    }

    pub fn database_url(&self) -> Result<&str, SettingsError> {
        required("PVZ_DATABASE_URL", self.database_url.as_deref())
    }

    /// Token signing secret, wiped from memory when dropped.
    pub fn jwt_secret(&self) -> Result<Zeroizing<Vec<u8>>, SettingsError> {
        required("PVZ_JWT_SECRET", self.jwt_secret.as_deref())
            .map(|secret| Zeroizing::new(secret.as_bytes().to_vec()))
    }

    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    /// Pool settings derived from the database keys.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        let lifetime = self
            .db_connection_lifetime_secs
            .unwrap_or(DEFAULT_DB_CONNECTION_LIFETIME_SECS);
        let idle = self
            .db_idle_timeout_secs
            .unwrap_or(DEFAULT_DB_IDLE_TIMEOUT_SECS);
        let checkout = self
            .db_checkout_timeout_secs
            .unwrap_or(DEFAULT_DB_CHECKOUT_TIMEOUT_SECS);
        Ok(PoolConfig::new(self.database_url()?)
            .with_max_size(self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS))
            .with_checkout_timeout(Duration::from_secs(checkout))
            .with_max_lifetime(Some(Duration::from_secs(lifetime)))
            .with_idle_timeout(Some(Duration::from_secs(idle))))
    }
}

/// Resolved configuration for creating the HTTP and gRPC servers.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) grpc_addr: SocketAddr,
    pub(crate) jwt_secret: Zeroizing<Vec<u8>>,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, grpc_addr: SocketAddr, jwt_secret: Zeroizing<Vec<u8>>) -> Self {
        Self {
            bind_addr,
            grpc_addr,
            jwt_secret,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// Without a pool the server falls back to fixture repositories.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
