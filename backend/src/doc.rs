//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every handler's path annotation and the envelope
//! schemas from [`crate::inbound::http::schemas`]. Swagger UI serves it at
//! `/docs` in debug builds; `cargo run --bin openapi-dump` prints it.

use utoipa::OpenApi;

use crate::inbound::http::chats::AppendMessageRequest;
use crate::inbound::http::jobs::{ApplyRequest, QuestionRequest, ReplyRequest};
use crate::inbound::http::schemas::{
    DocumentEnvelopeSchema, DocumentListEnvelopeSchema, DocumentSchema, FailureEnvelopeSchema,
    InsertEnvelopeSchema, InsertOutcomeSchema, WriteEnvelopeSchema, WriteOutcomeSchema,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "JOBBOX API",
        description = "Job board document gateway. Every response is a `{status, data}` envelope; failures answer HTTP 200 with `{\"status\": false}`."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::find_user,
        crate::inbound::http::jobs::list_jobs,
        crate::inbound::http::jobs::create_job,
        crate::inbound::http::jobs::get_job,
        crate::inbound::http::jobs::posted_jobs,
        crate::inbound::http::jobs::applied_jobs,
        crate::inbound::http::jobs::apply,
        crate::inbound::http::jobs::ask,
        crate::inbound::http::jobs::reply,
        crate::inbound::http::chats::get_chat,
        crate::inbound::http::chats::list_chats,
        crate::inbound::http::chats::get_conversation,
        crate::inbound::http::chats::create_chat,
        crate::inbound::http::chats::append_message,
        crate::inbound::http::health::welcome,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        DocumentSchema,
        FailureEnvelopeSchema,
        DocumentEnvelopeSchema,
        DocumentListEnvelopeSchema,
        InsertOutcomeSchema,
        InsertEnvelopeSchema,
        WriteOutcomeSchema,
        WriteEnvelopeSchema,
        ApplyRequest,
        QuestionRequest,
        ReplyRequest,
        AppendMessageRequest,
    )),
    tags(
        (name = "users", description = "User directory"),
        (name = "jobs", description = "Job postings, applications and question threads"),
        (name = "chats", description = "Employer and candidate conversations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
