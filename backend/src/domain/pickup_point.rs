//! Pickup points and the cities they may be registered in.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// City a pickup point may be opened in.
///
/// The canonical value is the Russian city name stored in the database and
/// returned by the API; English aliases are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Moscow,
    SaintPetersburg,
    Kazan,
}

impl City {
    /// Canonical stored and rendered value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Moscow => "Москва",
            Self::SaintPetersburg => "Санкт-Петербург",
            Self::Kazan => "Казань",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a city value is not one of the supported cities.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported city: {value}")]
pub struct UnknownCityError {
    pub value: String,
}

impl FromStr for City {
    type Err = UnknownCityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Москва" | "Moscow" => Ok(Self::Moscow),
            "Санкт-Петербург" | "Saint Petersburg" | "Saint-Petersburg" => {
                Ok(Self::SaintPetersburg)
            }
            "Казань" | "Kazan" => Ok(Self::Kazan),
            other => Err(UnknownCityError {
                value: other.to_owned(),
            }),
        }
    }
}

/// A registered pickup point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickupPoint {
    pub id: Uuid,
    pub city: City,
    pub registration_date: DateTime<Utc>,
}
