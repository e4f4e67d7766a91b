//! Diesel table definitions for the `shop` PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Registered accounts.
    shop.users (id) {
        id -> Uuid,
        /// Unique login identifier.
        email -> Text,
        /// Argon2 PHC string.
        password_hash -> Text,
        /// `employee` or `moderator`.
        role -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Pickup points; ids are supplied by the caller.
    shop.pvz (id) {
        id -> Uuid,
        city -> Text,
        registration_date -> Timestamptz,
    }
}

diesel::table! {
    /// Receiving sessions. A partial unique index allows one `in_progress`
    /// row per pickup point.
    shop.receptions (id) {
        id -> Uuid,
        pvz_id -> Uuid,
        /// `in_progress` or `close`.
        status -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Goods accepted during a reception.
    shop.products (id) {
        id -> Uuid,
        reception_id -> Uuid,
        #[sql_name = "type"]
        product_type -> Text,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(receptions -> pvz (pvz_id));
diesel::joinable!(products -> receptions (reception_id));

diesel::allow_tables_to_appear_in_same_query!(pvz, receptions, products);
