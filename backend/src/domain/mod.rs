//! Domain model and services of the document gateway.
//!
//! Public surface:
//! - [`Document`], [`DocumentId`], [`Filter`], [`Update`], [`Projection`]:
//!   the store-facing vocabulary.
//! - [`UserDirectoryService`], [`JobBoardService`], [`ChatService`]: the
//!   three driving-port implementations, each holding the injected store.
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failures.

pub mod chat_service;
pub mod document;
pub mod error;
pub mod job_board_service;
pub mod ports;
pub mod trace_id;
pub mod user_directory_service;

pub use self::chat_service::ChatService;
pub use self::document::{
    Collection, Document, DocumentId, Filter, ID_FIELD, InsertOutcome, Projection, Update,
    WriteOutcome,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::job_board_service::JobBoardService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user_directory_service::UserDirectoryService;

fn require_insert_acknowledged(
    outcome: InsertOutcome,
    collection: Collection,
) -> Result<InsertOutcome, Error> {
    if outcome.acknowledged {
        Ok(outcome)
    } else {
        Err(Error::write_unacknowledged(format!(
            "insert into {collection} was not acknowledged"
        )))
    }
}

fn require_write_acknowledged(
    outcome: WriteOutcome,
    collection: Collection,
) -> Result<WriteOutcome, Error> {
    if outcome.acknowledged {
        Ok(outcome)
    } else {
        Err(Error::write_unacknowledged(format!(
            "update of {collection} was not acknowledged"
        )))
    }
}
