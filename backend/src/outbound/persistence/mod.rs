//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Adapters translate between Diesel rows and domain records and hold no
//! business rules. Row structs (`models.rs`) and the table definitions
//! (`schema.rs`) stay private to this module.
//!
//! ```ignore
//! use carbon_backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/carbon")).await?;
//! let users = DieselUserRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_footprint_repository;
mod diesel_submission_ledger;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_footprint_repository::{DieselFootprintRepository, DieselLeaderboardRepository};
pub use diesel_submission_ledger::DieselSubmissionLedger;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_CHECKOUT_TIMEOUT, DEFAULT_POOL_SIZE, DbPool, PoolConfig, PoolError};
