//! Driving port for employer/candidate conversations.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{Document, DocumentId, Error, InsertOutcome, WriteOutcome};

/// The two participants identifying a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participants {
    pub employer: String,
    pub candidate: String,
}

#[async_trait]
pub trait ChatStore: Send + Sync {
    async fn get_chat(&self, id: DocumentId) -> Result<Option<Document>, Error>;

    /// Chats matching every field of `filter` by equality. An empty filter
    /// returns all chats.
    async fn list_chats(&self, filter: Document) -> Result<Vec<Document>, Error>;

    /// The conversation between `participants`.
    ///
    /// # Errors
    /// [`ErrorCode::NotFound`](crate::domain::ErrorCode::NotFound) when no
    /// such chat exists.
    async fn get_conversation(&self, participants: &Participants) -> Result<Document, Error>;

    /// Unconditional insert; an existing chat for the same pair is not
    /// consulted.
    async fn create_chat(&self, chat: Document) -> Result<InsertOutcome, Error>;

    async fn append_message(
        &self,
        chat_id: DocumentId,
        message: Value,
    ) -> Result<WriteOutcome, Error>;
}
