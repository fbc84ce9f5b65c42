//! JOBBOX document gateway.
//!
//! A thin REST façade over a document store for a job board: users, job
//! postings with applications and question threads, and employer/candidate
//! chats. Handlers live in [`inbound`], the job-board rules in [`domain`],
//! and the store adapters in [`outbound`].

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
