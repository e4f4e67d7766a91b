//! Registered users and their roles.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

/// Role granted to a user; decides which intake operations they may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Pickup point staff: opens and closes receptions, adds and removes
    /// products.
    Employee,
    /// Registers new pickup points.
    Moderator,
}

impl Role {
    /// Stored and rendered value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Moderator => "moderator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a role value is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {value}")]
pub struct UnknownRoleError {
    pub value: String,
}

impl FromStr for Role {
    type Err = UnknownRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "employee" => Ok(Self::Employee),
            "moderator" => Ok(Self::Moderator),
            other => Err(UnknownRoleError {
                value: other.to_owned(),
            }),
        }
    }
}

/// Validation errors returned by [`Email::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmailValidationError {
    #[error("email must not be empty")]
    Empty,
    #[error("email must contain a single @ between a local part and a domain")]
    Malformed,
}

/// Normalised e-mail address used as the login identifier.
///
/// ## Invariants
/// - Trimmed and non-empty.
/// - Exactly one `@` with non-empty text on both sides.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`].
    ///
    /// # Examples
    /// ```
    /// use pvz_backend::domain::Email;
    ///
    /// let email = Email::new("  clerk@pvz.example ").expect("valid email");
    /// assert_eq!(email.as_str(), "clerk@pvz.example");
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, EmailValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(EmailValidationError::Empty);
        }
        match trimmed.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(Self(trimmed.to_owned()))
            }
            _ => Err(EmailValidationError::Malformed),
        }
    }

    /// Borrow the address.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered user, never carrying the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: Email,
    pub role: Role,
}
