//! bb8 pool of `diesel-async` PostgreSQL connections shared by the
//! repositories.
//!
//! Connections are recycled after their lifetime or idle timeout elapses and
//! checkout waits at most the configured timeout, so an unreachable database
//! surfaces as [`PoolError::Checkout`] instead of a hung request.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection, RunError};
use tracing::{info, warn};

const DEFAULT_MAX_SIZE: u32 = 10;
const DEFAULT_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_MAX_LIFETIME: Duration = Duration::from_secs(60);
const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(60);

/// Failures building the pool or borrowing a connection from it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Pool sizing and connection recycling settings.
///
/// ```ignore
/// let config = PoolConfig::new("postgres://pvz:secret@db/pvz")
///     .with_max_size(20)
///     .with_checkout_timeout(Duration::from_secs(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    checkout_timeout: Duration,
    max_lifetime: Option<Duration>,
    idle_timeout: Option<Duration>,
}

impl PoolConfig {
    /// Configuration for `database_url` with ten connections, a five second
    /// checkout timeout and one minute lifetime and idle limits.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: DEFAULT_MAX_SIZE,
            checkout_timeout: DEFAULT_CHECKOUT_TIMEOUT,
            max_lifetime: Some(DEFAULT_MAX_LIFETIME),
            idle_timeout: Some(DEFAULT_IDLE_TIMEOUT),
        }
    }

    /// Zero is raised to one connection.
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size.max(1);
        self
    }

    pub fn with_checkout_timeout(mut self, timeout: Duration) -> Self {
        self.checkout_timeout = timeout;
        self
    }

    /// `None` keeps connections until they fail.
    pub fn with_max_lifetime(mut self, lifetime: Option<Duration>) -> Self {
        self.max_lifetime = lifetime;
        self
    }

    /// `None` keeps idle connections open.
    pub fn with_idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.idle_timeout = timeout;
        self
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn max_size(&self) -> u32 {
        self.max_size
    }

    /// Database URL with any password replaced, safe for logs.
    pub fn redacted_url(&self) -> String {
        redact_password(&self.database_url)
    }
}

fn redact_password(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_owned();
    };
    let Some((credentials, host)) = rest.rsplit_once('@') else {
        return url.to_owned();
    };
    match credentials.split_once(':') {
        Some((user, _)) => format!("{scheme}://{user}:***@{host}"),
        None => url.to_owned(),
    }
}

/// Cloneable handle to the shared connection pool.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
    checkout_timeout: Duration,
}

impl DbPool {
    /// Build the pool. Connections are opened lazily, so an unreachable
    /// server is reported on first checkout rather than here.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Build`] when bb8 rejects the configuration.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_size)
            .min_idle(None)
            .connection_timeout(config.checkout_timeout)
            .max_lifetime(config.max_lifetime)
            .idle_timeout(config.idle_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;

        info!(
            database = %config.redacted_url(),
            max_size = config.max_size,
            "database pool ready"
        );
        Ok(Self {
            inner: pool,
            checkout_timeout: config.checkout_timeout,
        })
    }

    /// Borrow a connection for the duration of one repository call.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Checkout`] on timeout or when a new connection
    /// cannot be established.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner.get().await.map_err(|err| match err {
            RunError::TimedOut => {
                warn!(timeout = ?self.checkout_timeout, "database pool checkout timed out");
                PoolError::checkout(format!("timed out after {:?}", self.checkout_timeout))
            }
            RunError::User(inner) => PoolError::checkout(inner.to_string()),
        })
    }
}
