//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of domain repository ports
//! backed by PostgreSQL via the Diesel ORM with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations translate between Diesel
//!   models and domain types. Lifecycle rules live in the domain services;
//!   adapters only guarantee that status-dependent writes are atomic.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **Strongly typed errors**: All database errors are mapped to domain
//!   port error types; unique violations on known constraints become
//!   conflict variants.
//!
//! # Example
//!
//! ```ignore
//! use pvz_backend::outbound::persistence::{DbPool, PoolConfig, DieselIntakeRepository};
//!
//! let config = PoolConfig::new("postgres://localhost/pvz");
//! let pool = DbPool::new(config).await?;
//! let repo = DieselIntakeRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_intake_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_intake_repository::DieselIntakeRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
