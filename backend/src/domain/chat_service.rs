//! Chat service backed by the `chat` collection.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::ports::{ChatStore, DocumentStore, Participants};
use crate::domain::{
    Collection, Document, DocumentId, Error, Filter, InsertOutcome, Projection, Update,
    WriteOutcome,
};

use super::{require_insert_acknowledged, require_write_acknowledged};

const MESSAGES: &str = "messages";

/// [`ChatStore`] implementation over an injected [`DocumentStore`].
pub struct ChatService<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> ChatService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S: ?Sized> Clone for ChatService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

#[async_trait]
impl<S> ChatStore for ChatService<S>
where
    S: DocumentStore + ?Sized,
{
    async fn get_chat(&self, id: DocumentId) -> Result<Option<Document>, Error> {
        Ok(self
            .store
            .find_one(Collection::Chats, &Filter::by_id(id))
            .await?)
    }

    async fn list_chats(&self, filter: Document) -> Result<Vec<Document>, Error> {
        Ok(self
            .store
            .find(
                Collection::Chats,
                &Filter::matching(filter),
                &Projection::Full,
            )
            .await?)
    }

    async fn get_conversation(&self, participants: &Participants) -> Result<Document, Error> {
        let filter = Filter::matching(Document::from_iter([
            (
                "employer".to_owned(),
                Value::String(participants.employer.clone()),
            ),
            (
                "candidate".to_owned(),
                Value::String(participants.candidate.clone()),
            ),
        ]));
        self.store
            .find_one(Collection::Chats, &filter)
            .await?
            .ok_or_else(|| {
                Error::not_found(format!(
                    "no conversation between {} and {}",
                    participants.employer, participants.candidate
                ))
            })
    }

    async fn create_chat(&self, chat: Document) -> Result<InsertOutcome, Error> {
        let outcome = self.store.insert_one(Collection::Chats, chat).await?;
        require_insert_acknowledged(outcome, Collection::Chats)
    }

    async fn append_message(
        &self,
        chat_id: DocumentId,
        message: Value,
    ) -> Result<WriteOutcome, Error> {
        let update = Update::Push {
            field: MESSAGES.to_owned(),
            value: message,
        };
        let outcome = self
            .store
            .update_one(Collection::Chats, &Filter::by_id(chat_id), &update)
            .await?;
        require_write_acknowledged(outcome, Collection::Chats)
    }
}
