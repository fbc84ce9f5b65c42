//! Driven port for the document store.
//!
//! Every gateway operation maps to exactly one call on this trait. Adapters
//! must agree on the matching and update semantics documented on
//! [`Filter`] and [`Update`]; the Diesel adapter expresses them in SQL, the
//! in-memory adapter evaluates them directly.

use async_trait::async_trait;

use crate::domain::{
    Collection, Document, Error, Filter, InsertOutcome, Projection, Update, WriteOutcome,
};

use super::define_port_error;

define_port_error! {
    /// Failures raised by document store adapters.
    pub enum DocumentStoreError {
        /// The store could not be reached or a connection could not be checked out.
        Connection { message: String } => "document store connection failed: {message}",
        /// A query or mutation failed while executing.
        Query { message: String } => "document store query failed: {message}",
        /// A stored body could not be decoded as a JSON object.
        Serialization { message: String } => "document store payload invalid: {message}",
    }
}

impl From<DocumentStoreError> for Error {
    fn from(error: DocumentStoreError) -> Self {
        match error {
            DocumentStoreError::Connection { message } => Self::store_unavailable(message),
            DocumentStoreError::Query { message } => Self::internal(message),
            DocumentStoreError::Serialization { message } => Self::internal(message),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Return every document matching `filter`, in insertion order, with the
    /// projection applied and the identifier rendered under `_id`.
    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        projection: &Projection,
    ) -> Result<Vec<Document>, DocumentStoreError>;

    /// Return the first document matching `filter`.
    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, DocumentStoreError>;

    /// Store `document` under a freshly generated identifier.
    ///
    /// A caller-supplied `_id` is discarded.
    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<InsertOutcome, DocumentStoreError>;

    /// Apply `update` to the first document matching `filter`.
    ///
    /// Matching nothing is not an error: the outcome is acknowledged with a
    /// zero matched count.
    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        update: &Update,
    ) -> Result<WriteOutcome, DocumentStoreError>;
}
