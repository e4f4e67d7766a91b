//! Driven port for pickup point, reception and product storage.
//!
//! Adapters own atomicity: `open_reception`, `close_reception`,
//! `add_product` and `delete_last_product` must each be a single
//! conditional write (or one transaction) so concurrent callers cannot both
//! pass a status check.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{PageRequest, PickupPoint, Product, ProductType, Reception, ReceptionWindow};

use super::define_port_error;

define_port_error! {
    /// Errors raised by intake repository adapters.
    pub enum IntakeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "intake repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "intake repository query failed: {message}",
        /// A pickup point with the same id is already stored.
        PickupPointConflict => "pickup point id already stored",
        /// The referenced pickup point row is missing.
        PickupPointMissing => "pickup point row missing",
        /// Another reception is already in progress for the pickup point.
        ReceptionConflict => "reception already in progress",
        /// The reception is no longer in progress.
        ReceptionClosed => "reception is not in progress",
    }
}

/// Storage contract for the intake lifecycle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IntakeRepository: Send + Sync {
    /// Insert a pickup point and return the stored row.
    ///
    /// Fails with [`IntakeRepositoryError::PickupPointConflict`] when the id
    /// is taken.
    async fn insert_pickup_point(
        &self,
        pickup_point: &PickupPoint,
    ) -> Result<PickupPoint, IntakeRepositoryError>;

    /// Report whether a pickup point exists.
    async fn pickup_point_exists(&self, id: &Uuid) -> Result<bool, IntakeRepositoryError>;

    /// Fetch the most recently created reception of a pickup point.
    async fn latest_reception(
        &self,
        pickup_point_id: &Uuid,
    ) -> Result<Option<Reception>, IntakeRepositoryError>;

    /// Open a new in-progress reception.
    ///
    /// Fails with [`IntakeRepositoryError::ReceptionConflict`] when another
    /// reception is in progress and with
    /// [`IntakeRepositoryError::PickupPointMissing`] when the pickup point
    /// vanished.
    async fn open_reception(&self, pickup_point_id: &Uuid)
    -> Result<Reception, IntakeRepositoryError>;

    /// Close an in-progress reception and return the updated row.
    ///
    /// Fails with [`IntakeRepositoryError::ReceptionClosed`] when the
    /// reception is already closed.
    async fn close_reception(&self, reception_id: &Uuid)
    -> Result<Reception, IntakeRepositoryError>;

    /// Add a product to an in-progress reception.
    async fn add_product(
        &self,
        reception_id: &Uuid,
        product_type: ProductType,
    ) -> Result<Product, IntakeRepositoryError>;

    /// Remove the most recently created product of an in-progress
    /// reception, returning it, or `None` when the reception is empty.
    async fn delete_last_product(
        &self,
        reception_id: &Uuid,
    ) -> Result<Option<Product>, IntakeRepositoryError>;

    /// Read one page of pickup points ordered by registration date.
    async fn list_pickup_points(
        &self,
        page: &PageRequest,
    ) -> Result<Vec<PickupPoint>, IntakeRepositoryError>;

    /// Read every pickup point ordered by registration date.
    async fn list_all_pickup_points(&self) -> Result<Vec<PickupPoint>, IntakeRepositoryError>;

    /// Read receptions of the given pickup points created inside `window`.
    async fn list_receptions(
        &self,
        pickup_point_ids: &[Uuid],
        window: &ReceptionWindow,
    ) -> Result<Vec<Reception>, IntakeRepositoryError>;

    /// Read products of the given receptions ordered by creation time.
    async fn list_products(
        &self,
        reception_ids: &[Uuid],
    ) -> Result<Vec<Product>, IntakeRepositoryError>;
}

/// Fixture implementation for tests that never reach storage.
///
/// Reads return empty results, writes echo their input and every pickup
/// point lookup reports a miss.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIntakeRepository;

#[async_trait]
impl IntakeRepository for FixtureIntakeRepository {
    async fn insert_pickup_point(
        &self,
        pickup_point: &PickupPoint,
    ) -> Result<PickupPoint, IntakeRepositoryError> {
        Ok(pickup_point.clone())
    }

    async fn pickup_point_exists(&self, _id: &Uuid) -> Result<bool, IntakeRepositoryError> {
        Ok(false)
    }

    async fn latest_reception(
        &self,
        _pickup_point_id: &Uuid,
    ) -> Result<Option<Reception>, IntakeRepositoryError> {
        Ok(None)
    }

    async fn open_reception(
        &self,
        _pickup_point_id: &Uuid,
    ) -> Result<Reception, IntakeRepositoryError> {
        Err(IntakeRepositoryError::PickupPointMissing)
    }

    async fn close_reception(
        &self,
        _reception_id: &Uuid,
    ) -> Result<Reception, IntakeRepositoryError> {
        Err(IntakeRepositoryError::ReceptionClosed)
    }

    async fn add_product(
        &self,
        _reception_id: &Uuid,
        _product_type: ProductType,
    ) -> Result<Product, IntakeRepositoryError> {
        Err(IntakeRepositoryError::ReceptionClosed)
    }

    async fn delete_last_product(
        &self,
        _reception_id: &Uuid,
    ) -> Result<Option<Product>, IntakeRepositoryError> {
        Ok(None)
    }

    async fn list_pickup_points(
        &self,
        _page: &PageRequest,
    ) -> Result<Vec<PickupPoint>, IntakeRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_all_pickup_points(&self) -> Result<Vec<PickupPoint>, IntakeRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_receptions(
        &self,
        _pickup_point_ids: &[Uuid],
        _window: &ReceptionWindow,
    ) -> Result<Vec<Reception>, IntakeRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_products(
        &self,
        _reception_ids: &[Uuid],
    ) -> Result<Vec<Product>, IntakeRepositoryError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use chrono::Utc;
    use rstest::rstest;

    use super::*;
    use crate::domain::City;

    #[rstest]
    #[tokio::test]
    async fn fixture_echoes_inserted_pickup_point() {
        let repo = FixtureIntakeRepository;
        let point = PickupPoint {
            id: Uuid::new_v4(),
            city: City::Kazan,
            registration_date: Utc::now(),
        };
        let stored = repo
            .insert_pickup_point(&point)
            .await
            .expect("fixture insert succeeds");
        assert_eq!(stored, point);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_reports_missing_pickup_points() {
        let repo = FixtureIntakeRepository;
        let id = Uuid::new_v4();
        assert!(!repo.pickup_point_exists(&id).await.expect("lookup succeeds"));
        assert_eq!(
            repo.open_reception(&id).await,
            Err(IntakeRepositoryError::PickupPointMissing)
        );
    }

    #[rstest]
    fn errors_format_messages() {
        let err = IntakeRepositoryError::connection("refused");
        assert_eq!(
            err.to_string(),
            "intake repository connection failed: refused"
        );
    }
}
