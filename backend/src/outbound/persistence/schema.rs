//! Diesel table definitions. Must match `backend/migrations` exactly.

diesel::table! {
    /// Every stored document, partitioned by `collection`.
    documents (id) {
        /// Identifier rendered as `_id` on reads.
        id -> Uuid,
        /// Logical collection name (`user`, `job`, `chat`).
        collection -> Text,
        /// The document itself; always a JSON object.
        body -> Jsonb,
        /// Insertion order within the table.
        seq -> Int8,
    }
}
