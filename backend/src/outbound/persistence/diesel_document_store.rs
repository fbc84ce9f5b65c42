//! PostgreSQL-backed document store.
//!
//! Reads go through the query builder; the two array updates are raw SQL
//! because they rebuild JSONB arrays in place. Each update selects its target
//! with `ORDER BY seq LIMIT 1 FOR UPDATE`, so at most one document changes and
//! concurrent pushes onto the same array serialise on the row lock.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{Jsonb, Nullable, Text, Uuid as SqlUuid};
use diesel_async::RunQueryDsl;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::domain::document::with_id;
use crate::domain::ports::{DocumentStore, DocumentStoreError};
use crate::domain::{
    Collection, Document, DocumentId, Filter, ID_FIELD, InsertOutcome, Projection, Update,
    WriteOutcome,
};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::{DocumentRow, NewDocumentRow};
use super::pool::DbPool;
use super::schema::documents;

/// Binds: `$1` field, `$2` value, `$3` collection, `$4` id, `$5` pattern.
const PUSH_SQL: &str = r#"
UPDATE documents
SET body = jsonb_set(
    body,
    ARRAY[$1::text],
    COALESCE(NULLIF(body -> $1::text, 'null'::jsonb), '[]'::jsonb) || jsonb_build_array($2::jsonb),
    true
)
WHERE id = (
    SELECT id FROM documents
    WHERE collection = $3
      AND ($4::uuid IS NULL OR id = $4::uuid)
      AND body @> $5::jsonb
      AND COALESCE(jsonb_typeof(body -> $1::text), 'null') IN ('array', 'null')
    ORDER BY seq
    LIMIT 1
    FOR UPDATE
)
"#;

/// Binds: `$1` array, `$2` element pattern, `$3` field, `$4` value,
/// `$5` collection, `$6` id, `$7` pattern.
const PUSH_TO_MATCHING_ELEMENTS_SQL: &str = r#"
UPDATE documents AS d
SET body = jsonb_set(
    d.body,
    ARRAY[$1::text],
    (
        SELECT COALESCE(
            jsonb_agg(
                CASE
                    WHEN jsonb_typeof(t.elem) = 'object' AND t.elem @> $2::jsonb THEN jsonb_set(
                        t.elem,
                        ARRAY[$3::text],
                        COALESCE(NULLIF(t.elem -> $3::text, 'null'::jsonb), '[]'::jsonb)
                            || jsonb_build_array($4::jsonb),
                        true
                    )
                    ELSE t.elem
                END
                ORDER BY t.ord
            ),
            '[]'::jsonb
        )
        FROM jsonb_array_elements(d.body -> $1::text) WITH ORDINALITY AS t(elem, ord)
    ),
    true
)
WHERE d.id = (
    SELECT id FROM documents
    WHERE collection = $5
      AND ($6::uuid IS NULL OR id = $6::uuid)
      AND body @> $7::jsonb
      AND jsonb_typeof(body -> $1::text) = 'array'
    ORDER BY seq
    LIMIT 1
    FOR UPDATE
)
"#;

/// Diesel implementation of [`DocumentStore`].
#[derive(Clone)]
pub struct DieselDocumentStore {
    pool: DbPool,
}

impl DieselDocumentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn load(
        &self,
        collection: Collection,
        filter: &Filter,
        limit: Option<i64>,
    ) -> Result<Vec<DocumentRow>, DocumentStoreError> {
        let mut query = documents::table
            .filter(documents::collection.eq(collection.name()))
            .order(documents::seq.asc())
            .select(DocumentRow::as_select())
            .into_boxed();
        if let Some(id) = filter.id() {
            query = query.filter(documents::id.eq(*id.as_uuid()));
        }
        if !filter.pattern().is_empty() {
            query = query.filter(documents::body.contains(Value::Object(filter.pattern().clone())));
        }
        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        query
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "find documents"))
    }
}

fn into_document(
    row: DocumentRow,
    projection: &Projection,
) -> Result<Document, DocumentStoreError> {
    let DocumentRow { id, body } = row;
    match body {
        Value::Object(mut body) => {
            projection.apply(&mut body);
            Ok(with_id(DocumentId::from_uuid(id), body))
        }
        other => Err(DocumentStoreError::serialization(format!(
            "document {id} is not an object: {other}"
        ))),
    }
}

fn affected(rows: usize) -> WriteOutcome {
    WriteOutcome::acknowledged(u64::try_from(rows).unwrap_or(u64::MAX))
}

#[async_trait]
impl DocumentStore for DieselDocumentStore {
    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        projection: &Projection,
    ) -> Result<Vec<Document>, DocumentStoreError> {
        self.load(collection, filter, None)
            .await?
            .into_iter()
            .map(|row| into_document(row, projection))
            .collect()
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, DocumentStoreError> {
        self.load(collection, filter, Some(1))
            .await?
            .into_iter()
            .next()
            .map(|row| into_document(row, &Projection::Full))
            .transpose()
    }

    async fn insert_one(
        &self,
        collection: Collection,
        mut document: Document,
    ) -> Result<InsertOutcome, DocumentStoreError> {
        document.remove(ID_FIELD);
        let id = DocumentId::generate();
        let row = NewDocumentRow {
            id: *id.as_uuid(),
            collection: collection.name(),
            body: Value::Object(document),
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let inserted = diesel::insert_into(documents::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "insert document"))?;
        debug!(%collection, %id, "document inserted");

        Ok(InsertOutcome {
            acknowledged: inserted == 1,
            inserted_id: id,
        })
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        update: &Update,
    ) -> Result<WriteOutcome, DocumentStoreError> {
        let id: Option<Uuid> = filter.id().map(|id| *id.as_uuid());
        let pattern = Value::Object(filter.pattern().clone());
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = match update {
            Update::Push { field, value } => {
                sql_query(PUSH_SQL)
                    .bind::<Text, _>(field)
                    .bind::<Jsonb, _>(value)
                    .bind::<Text, _>(collection.name())
                    .bind::<Nullable<SqlUuid>, _>(id)
                    .bind::<Jsonb, _>(&pattern)
                    .execute(&mut conn)
                    .await
            }
            Update::PushToMatchingElements {
                array,
                element,
                field,
                value,
            } => {
                sql_query(PUSH_TO_MATCHING_ELEMENTS_SQL)
                    .bind::<Text, _>(array)
                    .bind::<Jsonb, _>(Value::Object(element.clone()))
                    .bind::<Text, _>(field)
                    .bind::<Jsonb, _>(value)
                    .bind::<Text, _>(collection.name())
                    .bind::<Nullable<SqlUuid>, _>(id)
                    .bind::<Jsonb, _>(&pattern)
                    .execute(&mut conn)
                    .await
            }
        }
        .map_err(|err| map_diesel_error(err, "update document"))?;

        debug!(%collection, field = update.target_field(), rows, "document update applied");
        Ok(affected(rows))
    }
}
