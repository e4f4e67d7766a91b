//! Products accepted during a reception.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Category of an accepted product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductType {
    Electronics,
    Clothes,
    Shoes,
}

impl ProductType {
    /// Canonical stored and rendered value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Electronics => "электроника",
            Self::Clothes => "одежда",
            Self::Shoes => "обувь",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a product type is not one of the supported categories.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported product type: {value}")]
pub struct UnknownProductTypeError {
    pub value: String,
}

impl FromStr for ProductType {
    type Err = UnknownProductTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "электроника" | "electronics" => Ok(Self::Electronics),
            "одежда" | "clothes" => Ok(Self::Clothes),
            "обувь" | "shoes" => Ok(Self::Shoes),
            other => Err(UnknownProductTypeError {
                value: other.to_owned(),
            }),
        }
    }
}

/// A product owned by a reception.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: Uuid,
    pub reception_id: Uuid,
    pub product_type: ProductType,
    pub created_at: DateTime<Utc>,
}
