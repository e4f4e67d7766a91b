//! Driving port for the pickup point intake lifecycle.
//!
//! Inbound adapters call it after authorising the principal; it owns the
//! reception state machine and never sees transport details.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{City, IntakeError, PickupPoint, Product, ProductType, Reception};

/// Input for registering a pickup point.
///
/// Absent fields default to a fresh UUID and the current time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePickupPointRequest {
    pub id: Option<Uuid>,
    pub city: City,
    pub registration_date: Option<DateTime<Utc>>,
}

/// Domain use-case port for reception and product mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReceptionLifecycle: Send + Sync {
    /// Register a pickup point.
    async fn create_pickup_point(
        &self,
        request: CreatePickupPointRequest,
    ) -> Result<PickupPoint, IntakeError>;

    /// Open a reception for a pickup point.
    async fn create_reception(&self, pickup_point_id: Uuid) -> Result<Reception, IntakeError>;

    /// Close the in-progress reception of a pickup point.
    async fn close_reception(&self, pickup_point_id: Uuid) -> Result<Reception, IntakeError>;

    /// Add a product to the in-progress reception of a pickup point.
    async fn create_product(
        &self,
        pickup_point_id: Uuid,
        product_type: ProductType,
    ) -> Result<Product, IntakeError>;

    /// Remove the last product added to the in-progress reception.
    async fn delete_last_product(&self, pickup_point_id: Uuid) -> Result<(), IntakeError>;
}
