//! Authentication primitives: credentials, the password policy, issued
//! tokens and the request principal.

use std::fmt;

use uuid::Uuid;
use zeroize::Zeroizing;

use super::{AuthError, Email, Role};

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Check a candidate password against the registration policy.
///
/// The password must be at least [`MIN_PASSWORD_LENGTH`] Unicode scalar
/// values long and contain an ASCII uppercase letter, an ASCII lowercase
/// letter, a digit and a symbol (any character outside `[A-Za-z0-9]`,
/// underscore included). Length counts characters, not UTF-8 bytes, so
/// `"Aa1!жжж"` is seven characters and is rejected even though it is ten
/// bytes long.
///
/// # Examples
/// ```
/// use pvz_backend::domain::password_meets_policy;
///
/// assert!(password_meets_policy("Secr3t!pass"));
/// assert!(!password_meets_policy("secret"));
/// ```
pub fn password_meets_policy(password: &str) -> bool {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return false;
    }
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| !c.is_ascii_alphanumeric());
    has_upper && has_lower && has_digit && has_symbol
}

/// Plain-text password held only for the duration of a request.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Wrap a raw password.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(Zeroizing::new(raw.into()))
    }

    /// Borrow the plain-text value.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Credentials submitted to `login`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    pub email: Email,
    pub password: Password,
}

/// Input for account registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub email: Email,
    pub password: Password,
    pub role: Role,
}

/// Signed bearer token handed to clients.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap an encoded token.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the encoded token.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Consume the wrapper.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Authenticated identity attached to a request.
///
/// Derived from a validated token and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
}

impl Principal {
    /// Fail with [`AuthError::ForbiddenRole`] unless the principal holds
    /// `role`.
    ///
    /// # Examples
    /// ```
    /// use pvz_backend::domain::{AuthError, Principal, Role};
    /// use uuid::Uuid;
    ///
    /// let principal = Principal {
    ///     user_id: Uuid::new_v4(),
    ///     email: "clerk@pvz.example".to_owned(),
    ///     role: Role::Employee,
    /// };
    /// assert!(principal.require_role(Role::Employee).is_ok());
    /// assert_eq!(
    ///     principal.require_role(Role::Moderator),
    ///     Err(AuthError::ForbiddenRole)
    /// );
    /// ```
    pub fn require_role(&self, role: Role) -> Result<(), AuthError> {
        if self.role == role {
            Ok(())
        } else {
            Err(AuthError::ForbiddenRole)
        }
    }
}
