//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL adapters for the expense system,
//! implementing the domain port traits on top of SQLx repositories.
//!
//! # Concurrency contract
//!
//! The review write is a single conditional `UPDATE` guarded by the status
//! the reviewer observed. Two reviewers racing on the same claim cannot both
//! win: the second update matches zero rows and surfaces as a conflict.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, DatabaseConfig, ClaimRepository};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/expense")).await?;
//! let claims = ClaimRepository::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;

pub use pool::{create_pool, create_pool_from_url, DatabaseConfig, DatabasePool};
pub use error::DatabaseError;
pub use repositories::{ClaimRepository, RoleRepository};
