//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories here implement the domain's storage ports over a `bb8` pool
//! of `diesel-async` connections.
//!
//! - **Thin adapters**: repositories translate between Diesel rows and domain
//!   types and hold no business rules.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Typed errors**: pool and Diesel failures surface as the port's own
//!   `connection` or `query` error.
//!
//! # Example
//!
//! ```no_run
//! use office_listings::outbound::persistence::{
//!     DbPool, DieselOfficeRepository, PoolConfig, run_migrations,
//! };
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let url = "postgres://offices@localhost/offices";
//! run_migrations(url).await?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let offices = DieselOfficeRepository::new(pool);
//! # let _ = offices;
//! # Ok(())
//! # }
//! ```

mod diesel_access_token_repository;
mod diesel_error_mapping;
mod diesel_office_repository;
mod diesel_tag_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_access_token_repository::DieselAccessTokenRepository;
pub use diesel_office_repository::DieselOfficeRepository;
pub use diesel_tag_repository::DieselTagRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
