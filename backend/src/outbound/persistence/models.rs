//! Diesel rows for the `shop` schema.
//!
//! Enum-like columns (`city`, `status`, `role`, `type`) stay as strings here;
//! the repositories parse them into domain types and report bad values as
//! query errors.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{products, pvz, receptions, users};

/// Account as stored, including the Argon2 PHC hash.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    #[expect(dead_code, reason = "audit column read alongside the account")]
    pub created_at: DateTime<Utc>,
}

/// New account; `id` and `created_at` default in SQL.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
}

/// Pickup point, read and written as a whole.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = pvz)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PickupPointRow {
    pub id: Uuid,
    pub city: String,
    pub registration_date: DateTime<Utc>,
}

/// Reception with its lifecycle status (`in_progress` or `close`).
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = receptions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReceptionRow {
    pub id: Uuid,
    pub pvz_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// New reception; id and timestamp default in SQL.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = receptions)]
pub(crate) struct NewReceptionRow<'a> {
    pub pvz_id: Uuid,
    pub status: &'a str,
}


#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProductRow {
    pub id: Uuid,
    pub reception_id: Uuid,
    pub product_type: String,
    pub created_at: DateTime<Utc>,
}

/// New product, stamped by `now()` in SQL.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = products)]
pub(crate) struct NewProductRow<'a> {
    pub reception_id: Uuid,
    pub product_type: &'a str,
}
