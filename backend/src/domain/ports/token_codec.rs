//! Driven port for signing and decoding bearer tokens.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{AccessToken, Principal};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token codec adapters.
    pub enum TokenCodecError {
        /// Signing failed.
        Encoding { message: String } => "token encoding failed: {message}",
        /// The token signature, expiry or format is invalid.
        Invalid { message: String } => "token rejected: {message}",
        /// The token verified but its claims have an unexpected shape.
        Claims { message: String } => "token claims malformed: {message}",
    }
}

/// Signs principals into tokens and decodes them back.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenCodec: Send + Sync {
    /// Sign `principal` into a token that expires at `expires_at`.
    async fn issue(
        &self,
        principal: &Principal,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<AccessToken, TokenCodecError>;

    /// Verify a token and recover the principal it carries.
    async fn decode(&self, token: &str) -> Result<Principal, TokenCodecError>;
}
