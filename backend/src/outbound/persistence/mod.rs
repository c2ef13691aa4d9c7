//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories translate between Diesel rows and domain records and nothing
//! else. Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! private to this module. Connections come from a `bb8` pool of
//! `diesel-async` connections.
//!
//! # Example
//!
//! ```ignore
//! use concessionnaire_api::outbound::persistence::{
//!     DbPool, DieselDealershipRepository, PoolConfig,
//! };
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/concessionnaire")).await?;
//! let repo = DieselDealershipRepository::new(pool);
//! ```

mod diesel_account_repository;
mod diesel_basic_error_mapping;
mod diesel_dealership_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_account_repository::DieselAccountRepository;
pub use diesel_dealership_repository::DieselDealershipRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
