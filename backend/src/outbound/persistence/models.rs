//! Diesel row structs. Never exposed past the adapter.

use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

use super::schema::documents;

/// Columns a read needs; `collection` and `seq` stay in SQL.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DocumentRow {
    pub id: Uuid,
    pub body: Value,
}

/// Insertable document; `seq` is assigned by the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = documents)]
pub(crate) struct NewDocumentRow<'a> {
    pub id: Uuid,
    pub collection: &'a str,
    pub body: Value,
}
