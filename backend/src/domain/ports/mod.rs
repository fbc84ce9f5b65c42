//! Domain ports for the hexagonal boundary.
//!
//! `DocumentStore` is the single driven port; `UserDirectory`, `JobBoard`
//! and `ChatStore` are the driving ports the HTTP adapter calls.

mod macros;
pub(crate) use macros::define_port_error;

mod chat_store;
mod document_store;
mod job_board;
mod user_directory;

pub use chat_store::{ChatStore, Participants};
#[cfg(test)]
pub use document_store::MockDocumentStore;
pub use document_store::{DocumentStore, DocumentStoreError};
pub use job_board::{JobApplication, JobBoard, JobQuestion, QuestionReply};
pub use user_directory::UserDirectory;
