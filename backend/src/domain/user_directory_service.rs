//! User directory service backed by the `user` collection.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::ports::{DocumentStore, UserDirectory};
use crate::domain::{Collection, Document, Error, Filter, InsertOutcome, Projection};

use super::require_insert_acknowledged;

const EMAIL: &str = "email";

/// [`UserDirectory`] implementation over an injected [`DocumentStore`].
pub struct UserDirectoryService<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> UserDirectoryService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S: ?Sized> Clone for UserDirectoryService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

#[async_trait]
impl<S> UserDirectory for UserDirectoryService<S>
where
    S: DocumentStore + ?Sized,
{
    async fn list_users(&self) -> Result<Vec<Document>, Error> {
        Ok(self
            .store
            .find(Collection::Users, &Filter::all(), &Projection::Full)
            .await?)
    }

    async fn create_user(&self, user: Document) -> Result<InsertOutcome, Error> {
        let outcome = self.store.insert_one(Collection::Users, user).await?;
        require_insert_acknowledged(outcome, Collection::Users)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<Document>, Error> {
        let filter = Filter::matching(Document::from_iter([(
            EMAIL.to_owned(),
            Value::String(email.to_owned()),
        )]));
        Ok(self.store.find_one(Collection::Users, &filter).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{DocumentStoreError, MockDocumentStore};
    use crate::domain::{DocumentId, ErrorCode};
    use serde_json::json;

    fn service(store: MockDocumentStore) -> UserDirectoryService<MockDocumentStore> {
        UserDirectoryService::new(Arc::new(store))
    }

    #[tokio::test]
    async fn find_by_email_uses_exact_email_filter() {
        let mut store = MockDocumentStore::new();
        store
            .expect_find_one()
            .withf(|collection, filter| {
                *collection == Collection::Users
                    && filter.id().is_none()
                    && Value::Object(filter.pattern().clone()) == json!({"email": "a@x.com"})
            })
            .returning(|_, _| Ok(None));

        let found = service(store)
            .find_user_by_email("a@x.com")
            .await
            .expect("lookup succeeds");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn create_user_rejects_unacknowledged_insert() {
        let mut store = MockDocumentStore::new();
        store.expect_insert_one().returning(|_, _| {
            Ok(InsertOutcome {
                acknowledged: false,
                inserted_id: DocumentId::generate(),
            })
        });

        let err = service(store)
            .create_user(Document::new())
            .await
            .expect_err("unacknowledged insert");
        assert_eq!(err.code(), ErrorCode::WriteUnacknowledged);
    }

    #[tokio::test]
    async fn list_users_surfaces_store_outage() {
        let mut store = MockDocumentStore::new();
        store
            .expect_find()
            .returning(|_, _, _| Err(DocumentStoreError::connection("refused")));

        let err = service(store).list_users().await.expect_err("outage");
        assert_eq!(err.code(), ErrorCode::StoreUnavailable);
    }
}
