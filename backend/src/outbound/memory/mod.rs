//! In-process document store.
//!
//! Collections are insertion-ordered vectors behind one `RwLock`, so every
//! operation is atomic with respect to the others. Selected with
//! `JOBBOX_IN_MEMORY=true` and used by the integration tests.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{DocumentStore, DocumentStoreError};
use crate::domain::{
    Collection, Document, DocumentId, Filter, ID_FIELD, InsertOutcome, Projection, Update,
    WriteOutcome, document::with_id,
};

#[derive(Debug, Clone)]
struct StoredDocument {
    id: DocumentId,
    body: Document,
}

impl StoredDocument {
    fn render(&self, projection: &Projection) -> Document {
        let mut body = self.body.clone();
        projection.apply(&mut body);
        with_id(self.id, body)
    }
}

/// Insertion-ordered, lock-guarded document store.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<Collection, Vec<StoredDocument>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: PoisonError<T>) -> DocumentStoreError {
    DocumentStoreError::connection("in-memory store lock poisoned")
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        projection: &Projection,
    ) -> Result<Vec<Document>, DocumentStoreError> {
        let collections = self.collections.read().map_err(poisoned)?;
        Ok(collections
            .get(&collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|stored| filter.matches(stored.id, &stored.body))
                    .map(|stored| stored.render(projection))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, DocumentStoreError> {
        let collections = self.collections.read().map_err(poisoned)?;
        Ok(collections.get(&collection).and_then(|documents| {
            documents
                .iter()
                .find(|stored| filter.matches(stored.id, &stored.body))
                .map(|stored| stored.render(&Projection::Full))
        }))
    }

    async fn insert_one(
        &self,
        collection: Collection,
        mut document: Document,
    ) -> Result<InsertOutcome, DocumentStoreError> {
        document.remove(ID_FIELD);
        let id = DocumentId::generate();
        let mut collections = self.collections.write().map_err(poisoned)?;
        collections
            .entry(collection)
            .or_default()
            .push(StoredDocument { id, body: document });
        debug!(%collection, %id, "document inserted");
        Ok(InsertOutcome {
            acknowledged: true,
            inserted_id: id,
        })
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        update: &Update,
    ) -> Result<WriteOutcome, DocumentStoreError> {
        let mut collections = self.collections.write().map_err(poisoned)?;
        let target = collections.get_mut(&collection).and_then(|documents| {
            documents.iter_mut().find(|stored| {
                filter.matches(stored.id, &stored.body) && update.applies_to(&stored.body)
            })
        });
        let count = match target {
            Some(stored) => u64::from(update.apply(&mut stored.body)),
            None => 0,
        };
        Ok(WriteOutcome::acknowledged(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    #[fixture]
    fn store() -> InMemoryDocumentStore {
        InMemoryDocumentStore::new()
    }

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn insert_discards_caller_id_and_renders_generated_one(store: InMemoryDocumentStore) {
        let outcome = store
            .insert_one(
                Collection::Users,
                doc(json!({"_id": "mine", "email": "a@x.com"})),
            )
            .await
            .expect("insert");

        let found = store
            .find_one(Collection::Users, &Filter::by_id(outcome.inserted_id))
            .await
            .expect("find")
            .expect("document present");
        assert_eq!(found[ID_FIELD], json!(outcome.inserted_id.to_string()));
        assert_eq!(found["email"], json!("a@x.com"));
    }

    #[rstest]
    #[tokio::test]
    async fn collections_are_isolated(store: InMemoryDocumentStore) {
        store
            .insert_one(Collection::Jobs, doc(json!({"title": "t"})))
            .await
            .expect("insert");

        let chats = store
            .find(Collection::Chats, &Filter::all(), &Projection::Full)
            .await
            .expect("find");
        assert!(chats.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn update_one_touches_only_the_first_match(store: InMemoryDocumentStore) {
        for _ in 0..2 {
            store
                .insert_one(
                    Collection::Chats,
                    doc(json!({"employer": "e", "messages": []})),
                )
                .await
                .expect("insert");
        }
        let update = Update::Push {
            field: "messages".into(),
            value: json!("hi"),
        };

        let outcome = store
            .update_one(
                Collection::Chats,
                &Filter::matching(doc(json!({"employer": "e"}))),
                &update,
            )
            .await
            .expect("update");
        assert_eq!(outcome, WriteOutcome::acknowledged(1));

        let chats = store
            .find(Collection::Chats, &Filter::all(), &Projection::Full)
            .await
            .expect("find");
        assert_eq!(chats[0]["messages"], json!(["hi"]));
        assert_eq!(chats[1]["messages"], json!([]));
    }

    #[rstest]
    #[tokio::test]
    async fn update_without_match_is_acknowledged_with_zero_count(store: InMemoryDocumentStore) {
        let outcome = store
            .update_one(
                Collection::Jobs,
                &Filter::by_id(DocumentId::generate()),
                &Update::Push {
                    field: "applicants".into(),
                    value: json!({}),
                },
            )
            .await
            .expect("update");
        assert!(outcome.acknowledged);
        assert_eq!(outcome.matched_count, 0);
    }

    #[rstest]
    #[tokio::test]
    async fn find_preserves_insertion_order(store: InMemoryDocumentStore) {
        for title in ["first", "second", "third"] {
            store
                .insert_one(Collection::Jobs, doc(json!({"title": title})))
                .await
                .expect("insert");
        }
        let titles: Vec<Value> = store
            .find(Collection::Jobs, &Filter::all(), &Projection::Full)
            .await
            .expect("find")
            .into_iter()
            .map(|job| job["title"].clone())
            .collect();
        assert_eq!(
            titles,
            vec![json!("first"), json!("second"), json!("third")]
        );
    }
}
