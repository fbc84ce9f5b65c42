//! Outbound adapters implementing the `DocumentStore` port.
//!
//! - **persistence**: PostgreSQL JSONB store using Diesel.
//! - **memory**: in-process store for local runs and tests.
//!
//! Both evaluate the same filter, projection and update semantics; they
//! contain no job-board knowledge.

pub mod memory;
pub mod persistence;
