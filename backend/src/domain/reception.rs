//! Receptions: bounded sessions during which goods are accepted at a
//! pickup point.
//!
//! A reception is created `InProgress` and may only move to `Closed`.
//! `Closed` is terminal.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Lifecycle status of a reception.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReceptionStatus {
    InProgress,
    Closed,
}

impl ReceptionStatus {
    /// Stored and rendered value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Closed => "close",
        }
    }

    /// Whether products may still be added or removed.
    pub fn is_open(self) -> bool {
        matches!(self, Self::InProgress)
    }
}

impl fmt::Display for ReceptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored status value is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown reception status: {value}")]
pub struct UnknownReceptionStatusError {
    pub value: String,
}

impl FromStr for ReceptionStatus {
    type Err = UnknownReceptionStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_progress" => Ok(Self::InProgress),
            "close" => Ok(Self::Closed),
            other => Err(UnknownReceptionStatusError {
                value: other.to_owned(),
            }),
        }
    }
}

/// A reception belonging to one pickup point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reception {
    pub id: Uuid,
    pub pickup_point_id: Uuid,
    pub status: ReceptionStatus,
    pub created_at: DateTime<Utc>,
}

impl Reception {
    /// Return the reception after the `InProgress -> Closed` transition.
    pub fn closed(self) -> Self {
        Self {
            status: ReceptionStatus::Closed,
            ..self
        }
    }
}
