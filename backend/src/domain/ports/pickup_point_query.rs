//! Driving port for reading pickup points with their intake history.

use async_trait::async_trait;

use crate::domain::{IntakeError, PageRequest, PickupPoint, PickupPointDetail, ReceptionWindow};

/// Request for one page of pickup points with nested receptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListPickupPointsRequest {
    pub page: PageRequest,
    pub window: ReceptionWindow,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PickupPointQuery: Send + Sync {
    /// List a page of pickup points, each with receptions created inside
    /// the window and the products of those receptions.
    async fn list_pickup_points(
        &self,
        request: ListPickupPointsRequest,
    ) -> Result<Vec<PickupPointDetail>, IntakeError>;

    /// List every pickup point without pagination.
    async fn list_all_pickup_points(&self) -> Result<Vec<PickupPoint>, IntakeError>;
}
