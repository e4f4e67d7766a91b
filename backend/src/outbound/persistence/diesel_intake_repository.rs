//! PostgreSQL-backed `IntakeRepository` implementation using Diesel ORM.
//!
//! Status-dependent writes are atomic:
//!
//! - opening a reception locks the pickup point row, re-reads the latest
//!   reception and inserts inside one transaction; the partial unique index
//!   `receptions_one_open_per_pvz` backs this up;
//! - closing is a single `UPDATE ... WHERE status = 'in_progress'`;
//! - adding and removing products lock the reception row and re-check its
//!   status in the same transaction, so they serialise with closing.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{IntakeRepository, IntakeRepositoryError};
use crate::domain::{
    City, PageRequest, PickupPoint, Product, ProductType, Reception, ReceptionStatus,
    ReceptionWindow,
};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, violated_unique_constraint,
};
use super::models::{
    NewProductRow, NewReceptionRow, PickupPointRow, ProductRow, ReceptionRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{products, pvz, receptions};

const PVZ_PRIMARY_KEY: &str = "pvz_pkey";
const OPEN_RECEPTION_INDEX: &str = "receptions_one_open_per_pvz";

/// Diesel-backed implementation of the `IntakeRepository` port.
#[derive(Clone)]
pub struct DieselIntakeRepository {
    pool: DbPool,
}

impl DieselIntakeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Failure inside a transaction: either SQL failed or a re-check rejected
/// the write. Both roll back.
#[derive(Debug)]
enum TransactionError {
    Diesel(DieselError),
    Rejected(IntakeRepositoryError),
}

impl From<DieselError> for TransactionError {
    fn from(error: DieselError) -> Self {
        Self::Diesel(error)
    }
}

fn map_pool_error(error: PoolError) -> IntakeRepositoryError {
    map_basic_pool_error(error, IntakeRepositoryError::connection)
}

fn map_diesel_error(error: DieselError) -> IntakeRepositoryError {
    map_basic_diesel_error(
        error,
        IntakeRepositoryError::query,
        IntakeRepositoryError::connection,
    )
}

/// Map a diesel error, translating a violation of `constraint` into
/// `conflict`.
fn map_diesel_error_with_conflict(
    error: DieselError,
    constraint: &str,
    conflict: IntakeRepositoryError,
) -> IntakeRepositoryError {
    if violated_unique_constraint(&error) == Some(constraint) {
        conflict
    } else {
        map_diesel_error(error)
    }
}

fn map_transaction_error(error: TransactionError) -> IntakeRepositoryError {
    match error {
        TransactionError::Diesel(error) => map_diesel_error(error),
        TransactionError::Rejected(error) => error,
    }
}

fn corrupt_row(error: impl std::fmt::Display) -> IntakeRepositoryError {
    IntakeRepositoryError::query(format!("stored row is invalid: {error}"))
}

fn pickup_point_from_row(row: PickupPointRow) -> Result<PickupPoint, IntakeRepositoryError> {
    let city = row.city.parse::<City>().map_err(corrupt_row)?;
    Ok(PickupPoint {
        id: row.id,
        city,
        registration_date: row.registration_date,
    })
}

fn reception_from_row(row: ReceptionRow) -> Result<Reception, IntakeRepositoryError> {
    let status = row.status.parse::<ReceptionStatus>().map_err(corrupt_row)?;
    Ok(Reception {
        id: row.id,
        pickup_point_id: row.pvz_id,
        status,
        created_at: row.created_at,
    })
}

fn product_from_row(row: ProductRow) -> Result<Product, IntakeRepositoryError> {
    let product_type = row.product_type.parse::<ProductType>().map_err(corrupt_row)?;
    Ok(Product {
        id: row.id,
        reception_id: row.reception_id,
        product_type,
        created_at: row.created_at,
    })
}

/// Receptions of one pickup point, newest first. `id` breaks ties between
/// receptions created in the same instant.
fn receptions_newest_first(pickup_point_id: Uuid) -> receptions::BoxedQuery<'static, Pg> {
    receptions::table
        .filter(receptions::pvz_id.eq(pickup_point_id))
        .order((receptions::created_at.desc(), receptions::id.desc()))
        .into_boxed()
}

/// Lock a reception row and reject the write unless it is in progress.
async fn lock_open_reception(
    conn: &mut diesel_async::AsyncPgConnection,
    reception_id: Uuid,
) -> Result<(), TransactionError> {
    let status: Option<String> = receptions::table
        .filter(receptions::id.eq(reception_id))
        .select(receptions::status)
        .for_update()
        .first(conn)
        .await
        .optional()?;
    if status.as_deref() == Some(ReceptionStatus::InProgress.as_str()) {
        Ok(())
    } else {
        Err(TransactionError::Rejected(
            IntakeRepositoryError::ReceptionClosed,
        ))
    }
}

#[async_trait]
impl IntakeRepository for DieselIntakeRepository {
    async fn insert_pickup_point(
        &self,
        pickup_point: &PickupPoint,
    ) -> Result<PickupPoint, IntakeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = PickupPointRow {
            id: pickup_point.id,
            city: pickup_point.city.as_str().to_owned(),
            registration_date: pickup_point.registration_date,
        };

        let stored = diesel::insert_into(pvz::table)
            .values(&row)
            .returning(PickupPointRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|error| {
                map_diesel_error_with_conflict(
                    error,
                    PVZ_PRIMARY_KEY,
                    IntakeRepositoryError::PickupPointConflict,
                )
            })?;
        pickup_point_from_row(stored)
    }

    async fn pickup_point_exists(&self, id: &Uuid) -> Result<bool, IntakeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(pvz::table.filter(pvz::id.eq(id))))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn latest_reception(
        &self,
        pickup_point_id: &Uuid,
    ) -> Result<Option<Reception>, IntakeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = receptions_newest_first(*pickup_point_id)
            .select(ReceptionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(reception_from_row).transpose()
    }

    async fn open_reception(
        &self,
        pickup_point_id: &Uuid,
    ) -> Result<Reception, IntakeRepositoryError> {
        let pickup_point_id = *pickup_point_id;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = conn
            .transaction::<_, TransactionError, _>(|conn| {
                async move {
                    let locked: Option<Uuid> = pvz::table
                        .filter(pvz::id.eq(pickup_point_id))
                        .select(pvz::id)
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?;
                    if locked.is_none() {
                        return Err(TransactionError::Rejected(
                            IntakeRepositoryError::PickupPointMissing,
                        ));
                    }

                    let latest_status: Option<String> = receptions_newest_first(pickup_point_id)
                        .select(receptions::status)
                        .first(conn)
                        .await
                        .optional()?;
                    if latest_status.as_deref() == Some(ReceptionStatus::InProgress.as_str()) {
                        return Err(TransactionError::Rejected(
                            IntakeRepositoryError::ReceptionConflict,
                        ));
                    }

                    let inserted = diesel::insert_into(receptions::table)
                        .values(NewReceptionRow {
                            pvz_id: pickup_point_id,
                            status: ReceptionStatus::InProgress.as_str(),
                        })
                        .returning(ReceptionRow::as_returning())
                        .get_result(conn)
                        .await?;
                    Ok(inserted)
                }
                .scope_boxed()
            })
            .await
            .map_err(|error| match error {
                TransactionError::Diesel(error) => map_diesel_error_with_conflict(
                    error,
                    OPEN_RECEPTION_INDEX,
                    IntakeRepositoryError::ReceptionConflict,
                ),
                TransactionError::Rejected(error) => error,
            })?;
        reception_from_row(row)
    }

    async fn close_reception(
        &self,
        reception_id: &Uuid,
    ) -> Result<Reception, IntakeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(
            receptions::table
                .filter(receptions::id.eq(reception_id))
                .filter(receptions::status.eq(ReceptionStatus::InProgress.as_str())),
        )
        .set(receptions::status.eq(ReceptionStatus::Closed.as_str()))
        .returning(ReceptionRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?
        .ok_or(IntakeRepositoryError::ReceptionClosed)?;
        reception_from_row(row)
    }

    async fn add_product(
        &self,
        reception_id: &Uuid,
        product_type: ProductType,
    ) -> Result<Product, IntakeRepositoryError> {
        let reception_id = *reception_id;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = conn
            .transaction::<_, TransactionError, _>(|conn| {
                async move {
                    lock_open_reception(conn, reception_id).await?;
                    let inserted = diesel::insert_into(products::table)
                        .values(NewProductRow {
                            reception_id,
                            product_type: product_type.as_str(),
                        })
                        .returning(ProductRow::as_returning())
                        .get_result(conn)
                        .await?;
                    Ok(inserted)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_transaction_error)?;
        product_from_row(row)
    }

    async fn delete_last_product(
        &self,
        reception_id: &Uuid,
    ) -> Result<Option<Product>, IntakeRepositoryError> {
        let reception_id = *reception_id;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = conn
            .transaction::<_, TransactionError, _>(|conn| {
                async move {
                    lock_open_reception(conn, reception_id).await?;
                    let last_id: Option<Uuid> = products::table
                        .filter(products::reception_id.eq(reception_id))
                        .order((products::created_at.desc(), products::id.desc()))
                        .select(products::id)
                        .first(conn)
                        .await
                        .optional()?;
                    let Some(last_id) = last_id else {
                        return Ok(None);
                    };
                    let deleted = diesel::delete(products::table.filter(products::id.eq(last_id)))
                        .returning(ProductRow::as_returning())
                        .get_result(conn)
                        .await?;
                    Ok(Some(deleted))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_transaction_error)?;
        row.map(product_from_row).transpose()
    }

    async fn list_pickup_points(
        &self,
        page: &PageRequest,
    ) -> Result<Vec<PickupPoint>, IntakeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PickupPointRow> = pvz::table
            .order((pvz::registration_date.asc(), pvz::id.asc()))
            .offset(page.offset())
            .limit(i64::from(page.limit()))
            .select(PickupPointRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(pickup_point_from_row).collect()
    }

    async fn list_all_pickup_points(&self) -> Result<Vec<PickupPoint>, IntakeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PickupPointRow> = pvz::table
            .order((pvz::registration_date.asc(), pvz::id.asc()))
            .select(PickupPointRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(pickup_point_from_row).collect()
    }

    async fn list_receptions(
        &self,
        pickup_point_ids: &[Uuid],
        window: &ReceptionWindow,
    ) -> Result<Vec<Reception>, IntakeRepositoryError> {
        if pickup_point_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = receptions::table
            .filter(receptions::pvz_id.eq_any(pickup_point_ids.to_vec()))
            .order((receptions::created_at.asc(), receptions::id.asc()))
            .select(ReceptionRow::as_select())
            .into_boxed();
        if let Some(start) = window.start {
            query = query.filter(receptions::created_at.ge(start));
        }
        if let Some(end) = window.end {
            query = query.filter(receptions::created_at.le(end));
        }

        let rows: Vec<ReceptionRow> = query
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(reception_from_row).collect()
    }

    async fn list_products(
        &self,
        reception_ids: &[Uuid],
    ) -> Result<Vec<Product>, IntakeRepositoryError> {
        if reception_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ProductRow> = products::table
            .filter(products::reception_id.eq_any(reception_ids.to_vec()))
            .order((products::created_at.asc(), products::id.asc()))
            .select(ProductRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(product_from_row).collect()
    }
}
