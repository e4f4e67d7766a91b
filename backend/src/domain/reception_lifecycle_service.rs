//! Reception lifecycle domain services.
//!
//! [`ReceptionLifecycleService`] implements the intake mutations on top of
//! an [`IntakeRepository`]; [`PickupPointQueryService`] assembles the nested
//! listing. Every mutation scoped to a pickup point resolves its active
//! reception through one lookup so the failure order is always pickup point
//! existence, then reception presence, then reception status.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::ports::{
    CreatePickupPointRequest, IntakeRepository, IntakeRepositoryError, ListPickupPointsRequest,
    PickupPointQuery, ReceptionLifecycle,
};
use crate::domain::{
    IntakeError, PickupPoint, PickupPointDetail, Product, ProductType, Reception,
    assemble_details,
};

fn map_repository_error(error: IntakeRepositoryError) -> IntakeError {
    match error {
        IntakeRepositoryError::Connection { message } => IntakeError::storage_unavailable(message),
        IntakeRepositoryError::Query { message } => IntakeError::storage(message),
        IntakeRepositoryError::PickupPointConflict => IntakeError::PickupPointAlreadyExists,
        IntakeRepositoryError::PickupPointMissing => IntakeError::PickupPointNotFound,
        IntakeRepositoryError::ReceptionConflict => IntakeError::ReceptionAlreadyOpen,
        IntakeRepositoryError::ReceptionClosed => IntakeError::ReceptionNotOpen,
    }
}

/// Intake service implementing the [`ReceptionLifecycle`] driving port.
#[derive(Clone)]
pub struct ReceptionLifecycleService<R> {
    intake_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ReceptionLifecycleService<R> {
    /// Create a lifecycle service over the intake repository.
    pub fn new(intake_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { intake_repo, clock }
    }
}

impl<R> ReceptionLifecycleService<R>
where
    R: IntakeRepository,
{
    async fn ensure_pickup_point_exists(&self, pickup_point_id: &Uuid) -> Result<(), IntakeError> {
        let exists = self
            .intake_repo
            .pickup_point_exists(pickup_point_id)
            .await
            .map_err(map_repository_error)?;
        if exists {
            Ok(())
        } else {
            Err(IntakeError::PickupPointNotFound)
        }
    }

    /// Resolve the in-progress reception of a pickup point.
    async fn resolve_active_reception(
        &self,
        pickup_point_id: &Uuid,
    ) -> Result<Reception, IntakeError> {
        self.ensure_pickup_point_exists(pickup_point_id).await?;
        let latest = self
            .intake_repo
            .latest_reception(pickup_point_id)
            .await
            .map_err(map_repository_error)?
            .ok_or(IntakeError::ReceptionNotFound)?;
        if latest.status.is_open() {
            Ok(latest)
        } else {
            Err(IntakeError::ReceptionNotOpen)
        }
    }
}

#[async_trait]
impl<R> ReceptionLifecycle for ReceptionLifecycleService<R>
where
    R: IntakeRepository,
{
    async fn create_pickup_point(
        &self,
        request: CreatePickupPointRequest,
    ) -> Result<PickupPoint, IntakeError> {
        let now = self.clock.utc();
        let registration_date = request.registration_date.unwrap_or(now);
        if registration_date > now {
            return Err(IntakeError::InvalidRegistrationDate);
        }

        let candidate = PickupPoint {
            id: request.id.unwrap_or_else(Uuid::new_v4),
            city: request.city,
            registration_date,
        };
        let stored = self
            .intake_repo
            .insert_pickup_point(&candidate)
            .await
            .map_err(map_repository_error)?;
        info!(pickup_point_id = %stored.id, city = stored.city.as_str(), "pickup point created");
        Ok(stored)
    }

    async fn create_reception(&self, pickup_point_id: Uuid) -> Result<Reception, IntakeError> {
        self.ensure_pickup_point_exists(&pickup_point_id).await?;
        let latest = self
            .intake_repo
            .latest_reception(&pickup_point_id)
            .await
            .map_err(map_repository_error)?;
        if latest.is_some_and(|reception| reception.status.is_open()) {
            return Err(IntakeError::ReceptionAlreadyOpen);
        }

        let reception = self
            .intake_repo
            .open_reception(&pickup_point_id)
            .await
            .map_err(map_repository_error)?;
        info!(%pickup_point_id, reception_id = %reception.id, "reception opened");
        Ok(reception)
    }

    async fn close_reception(&self, pickup_point_id: Uuid) -> Result<Reception, IntakeError> {
        let active = self.resolve_active_reception(&pickup_point_id).await?;
        let closed = self
            .intake_repo
            .close_reception(&active.id)
            .await
            .map_err(map_repository_error)?;
        info!(%pickup_point_id, reception_id = %closed.id, "reception closed");
        Ok(closed)
    }

    async fn create_product(
        &self,
        pickup_point_id: Uuid,
        product_type: ProductType,
    ) -> Result<Product, IntakeError> {
        let active = self.resolve_active_reception(&pickup_point_id).await?;
        let product = self
            .intake_repo
            .add_product(&active.id, product_type)
            .await
            .map_err(map_repository_error)?;
        debug!(
            reception_id = %active.id,
            product_id = %product.id,
            product_type = product_type.as_str(),
            "product added"
        );
        Ok(product)
    }

    async fn delete_last_product(&self, pickup_point_id: Uuid) -> Result<(), IntakeError> {
        let active = self.resolve_active_reception(&pickup_point_id).await?;
        let removed = self
            .intake_repo
            .delete_last_product(&active.id)
            .await
            .map_err(map_repository_error)?
            .ok_or(IntakeError::NoProductsToDelete)?;
        debug!(reception_id = %active.id, product_id = %removed.id, "product removed");
        Ok(())
    }
}

/// Listing service implementing the [`PickupPointQuery`] driving port.
#[derive(Clone)]
pub struct PickupPointQueryService<R> {
    intake_repo: Arc<R>,
}

impl<R> PickupPointQueryService<R> {
    /// Create a query service over the intake repository.
    pub fn new(intake_repo: Arc<R>) -> Self {
        Self { intake_repo }
    }
}

#[async_trait]
impl<R> PickupPointQuery for PickupPointQueryService<R>
where
    R: IntakeRepository,
{
    async fn list_pickup_points(
        &self,
        request: ListPickupPointsRequest,
    ) -> Result<Vec<PickupPointDetail>, IntakeError> {
        let pickup_points = self
            .intake_repo
            .list_pickup_points(&request.page)
            .await
            .map_err(map_repository_error)?;
        if pickup_points.is_empty() {
            return Ok(Vec::new());
        }

        let point_ids: Vec<Uuid> = pickup_points.iter().map(|point| point.id).collect();
        let receptions = self
            .intake_repo
            .list_receptions(&point_ids, &request.window)
            .await
            .map_err(map_repository_error)?;

        let products = if receptions.is_empty() {
            Vec::new()
        } else {
            let reception_ids: Vec<Uuid> =
                receptions.iter().map(|reception| reception.id).collect();
            self.intake_repo
                .list_products(&reception_ids)
                .await
                .map_err(map_repository_error)?
        };

        Ok(assemble_details(pickup_points, receptions, products))
    }

    async fn list_all_pickup_points(&self) -> Result<Vec<PickupPoint>, IntakeError> {
        self.intake_repo
            .list_all_pickup_points()
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "reception_lifecycle_service_tests.rs"]
mod tests;
