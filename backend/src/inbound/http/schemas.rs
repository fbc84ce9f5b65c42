//! OpenAPI schema definitions for the response envelopes.
//!
//! Domain types stay free of `ToSchema`; these wrappers mirror what the
//! handlers serialise so the generated document matches the wire format.

use utoipa::ToSchema;

/// Free-form JSON object stored as-is.
#[derive(ToSchema)]
#[schema(value_type = Object)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct DocumentSchema(serde_json::Value);

/// Body returned for every failure.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct FailureEnvelopeSchema {
    /// Always `false`.
    #[schema(example = false)]
    status: bool,
}

/// Envelope carrying one document, or `null` when a lookup by id misses.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct DocumentEnvelopeSchema {
    #[schema(example = true)]
    status: bool,
    data: Option<serde_json::Value>,
}

/// Envelope carrying a list of documents.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct DocumentListEnvelopeSchema {
    #[schema(example = true)]
    status: bool,
    data: Vec<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::InsertOutcome`].
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct InsertOutcomeSchema {
    acknowledged: bool,
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    inserted_id: String,
}

/// OpenAPI schema for [`crate::domain::WriteOutcome`].
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct WriteOutcomeSchema {
    acknowledged: bool,
    /// Documents the filter selected (zero or one).
    matched_count: u64,
    /// Documents changed (zero or one).
    modified_count: u64,
}

/// Envelope carrying an insert outcome.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct InsertEnvelopeSchema {
    #[schema(example = true)]
    status: bool,
    data: InsertOutcomeSchema,
}

/// Envelope carrying a write outcome.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct WriteEnvelopeSchema {
    #[schema(example = true)]
    status: bool,
    data: WriteOutcomeSchema,
}
