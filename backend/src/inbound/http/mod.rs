//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod bearer;
pub mod error;
pub mod health;
pub mod intake_dto;
pub mod pickup_points;
pub mod products;
pub mod receptions;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;
