//! PostgreSQL document store built on Diesel.
//!
//! Documents live in a single `documents` table keyed by UUID with the body
//! held as JSONB. Filters compile to `@>` containment, which gives the same
//! field-equality and array element-match semantics the in-memory store
//! evaluates directly.
//!
//! # Example
//!
//! ```no_run
//! # async fn connect() -> Result<(), jobbox::outbound::persistence::PoolError> {
//! use jobbox::outbound::persistence::{
//!     DbPool, DieselDocumentStore, PoolConfig, run_migrations,
//! };
//!
//! let url = "postgres://localhost/jobbox";
//! run_migrations(url).await?;
//! let pool = DbPool::connect(PoolConfig::new(url)).await?;
//! let store = DieselDocumentStore::new(pool);
//! # let _ = store;
//! # Ok(())
//! # }
//! ```

mod diesel_document_store;
mod diesel_helpers;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_document_store::DieselDocumentStore;
pub use migrations::{MIGRATIONS, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
