//! Chat handlers.
//!
//! ```text
//! GET   /chat?id=…
//! GET   /chats?candidate=dev@example.com
//! GET   /chatConversation?employerEmail=…&candidateEmail=…
//! POST  /chat
//! PATCH /chat   {"id":"…","message":{"from":"dev@example.com","text":"Hi"}}
//! ```

use std::collections::BTreeMap;

use actix_web::{get, patch, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::ports::Participants;
use crate::domain::{Document, DocumentId, InsertOutcome, WriteOutcome};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::schemas::{
    DocumentEnvelopeSchema, DocumentListEnvelopeSchema, DocumentSchema, InsertEnvelopeSchema,
    WriteEnvelopeSchema,
};
use crate::inbound::http::state::HttpState;

/// Query string for `GET /chat`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ChatIdQuery {
    /// Chat identifier.
    pub id: String,
}

/// Query string for `GET /chatConversation`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ConversationQuery {
    pub employer_email: String,
    pub candidate_email: String,
}

impl From<ConversationQuery> for Participants {
    fn from(value: ConversationQuery) -> Self {
        Self {
            employer: value.employer_email,
            candidate: value.candidate_email,
        }
    }
}

/// Request body for `PATCH /chat`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct AppendMessageRequest {
    /// Chat identifier.
    pub id: String,
    /// Stored verbatim at the end of `messages`.
    pub message: Value,
}

/// Every query parameter becomes a string equality condition.
fn query_filter(params: BTreeMap<String, String>) -> Document {
    params
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect()
}

/// Fetch one chat; `data` is `null` when the id is unknown.
#[utoipa::path(
    get,
    path = "/chat",
    params(ChatIdQuery),
    responses(
        (status = 200, description = "The chat or null; status false for a malformed id", body = DocumentEnvelopeSchema)
    ),
    tags = ["chats"],
    operation_id = "getChat"
)]
#[get("/chat")]
pub async fn get_chat(
    state: web::Data<HttpState>,
    query: web::Query<ChatIdQuery>,
) -> ApiResult<web::Json<Envelope<Option<Document>>>> {
    let id = DocumentId::parse(&query.id)?;
    Ok(Envelope::json(state.chats.get_chat(id).await?))
}

/// Chats matching every query parameter, typically `candidate` or
/// `employer`.
#[utoipa::path(
    get,
    path = "/chats",
    params(
        ("candidate" = Option<String>, Query, description = "Candidate email"),
        ("employer" = Option<String>, Query, description = "Employer email")
    ),
    responses((status = 200, description = "Matching chats", body = DocumentListEnvelopeSchema)),
    tags = ["chats"],
    operation_id = "listChats"
)]
#[get("/chats")]
pub async fn list_chats(
    state: web::Data<HttpState>,
    query: web::Query<BTreeMap<String, String>>,
) -> ApiResult<web::Json<Envelope<Vec<Document>>>> {
    let filter = query_filter(query.into_inner());
    Ok(Envelope::json(state.chats.list_chats(filter).await?))
}

/// The chat between one employer and one candidate. A miss answers
/// `status: false`.
#[utoipa::path(
    get,
    path = "/chatConversation",
    params(ConversationQuery),
    responses(
        (status = 200, description = "The conversation, or status false when absent", body = DocumentEnvelopeSchema)
    ),
    tags = ["chats"],
    operation_id = "getConversation"
)]
#[get("/chatConversation")]
pub async fn get_conversation(
    state: web::Data<HttpState>,
    query: web::Query<ConversationQuery>,
) -> ApiResult<web::Json<Envelope<Document>>> {
    let participants = Participants::from(query.into_inner());
    Ok(Envelope::json(
        state.chats.get_conversation(&participants).await?,
    ))
}

/// Store a chat as supplied.
#[utoipa::path(
    post,
    path = "/chat",
    request_body = DocumentSchema,
    responses((status = 200, description = "Insert outcome", body = InsertEnvelopeSchema)),
    tags = ["chats"],
    operation_id = "createChat"
)]
#[post("/chat")]
pub async fn create_chat(
    state: web::Data<HttpState>,
    payload: web::Json<Document>,
) -> ApiResult<web::Json<Envelope<InsertOutcome>>> {
    Ok(Envelope::json(
        state.chats.create_chat(payload.into_inner()).await?,
    ))
}

/// Append a message to a chat.
#[utoipa::path(
    patch,
    path = "/chat",
    request_body = AppendMessageRequest,
    responses((status = 200, description = "Write outcome", body = WriteEnvelopeSchema)),
    tags = ["chats"],
    operation_id = "appendMessage"
)]
#[patch("/chat")]
pub async fn append_message(
    state: web::Data<HttpState>,
    payload: web::Json<AppendMessageRequest>,
) -> ApiResult<web::Json<Envelope<WriteOutcome>>> {
    let AppendMessageRequest { id, message } = payload.into_inner();
    let id = DocumentId::parse(&id)?;
    Ok(Envelope::json(
        state.chats.append_message(id, message).await?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{call_json, init_app, insert, memory_state};
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn query_parameters_become_string_conditions() {
        let params = BTreeMap::from([
            ("candidate".to_owned(), "dev@example.com".to_owned()),
            ("employer".to_owned(), "boss@example.com".to_owned()),
        ]);
        assert_eq!(
            Value::Object(query_filter(params)),
            json!({"candidate": "dev@example.com", "employer": "boss@example.com"})
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn conversation_appears_once_created() {
        let app = init_app(memory_state()).await;
        let uri = "/chatConversation?employerEmail=boss@example.com&candidateEmail=dev@example.com";

        let before = call_json(&app, actix_test::TestRequest::get().uri(uri)).await;
        assert_eq!(before, json!({"status": false}));

        let chat_id = insert(
            &app,
            "/chat",
            json!({"employer": "boss@example.com", "candidate": "dev@example.com", "messages": []}),
        )
        .await;

        let after = call_json(&app, actix_test::TestRequest::get().uri(uri)).await;
        assert_eq!(after["status"], json!(true));
        assert_eq!(after["data"]["_id"], json!(chat_id));
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_conversation_parameter_is_status_false() {
        let app = init_app(memory_state()).await;
        let body = call_json(
            &app,
            actix_test::TestRequest::get().uri("/chatConversation?employerEmail=boss@example.com"),
        )
        .await;
        assert_eq!(body, json!({"status": false}));
    }

    #[rstest]
    #[actix_web::test]
    async fn appended_messages_keep_their_order() {
        let app = init_app(memory_state()).await;
        let chat_id = insert(
            &app,
            "/chat",
            json!({"candidate": "dev@example.com", "messages": []}),
        )
        .await;

        for text in ["hello", "still there?"] {
            let body = call_json(
                &app,
                actix_test::TestRequest::patch()
                    .uri("/chat")
                    .set_json(json!({"id": chat_id, "message": {"text": text}})),
            )
            .await;
            assert_eq!(body["data"]["matchedCount"], json!(1));
        }

        let chat = call_json(
            &app,
            actix_test::TestRequest::get().uri(&format!("/chat?id={chat_id}")),
        )
        .await;
        assert_eq!(
            chat["data"]["messages"],
            json!([{"text": "hello"}, {"text": "still there?"}])
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn list_chats_filters_on_query_parameters() {
        let app = init_app(memory_state()).await;
        insert(
            &app,
            "/chat",
            json!({"candidate": "dev@example.com", "employer": "a@example.com"}),
        )
        .await;
        insert(
            &app,
            "/chat",
            json!({"candidate": "other@example.com", "employer": "a@example.com"}),
        )
        .await;

        let mine = call_json(
            &app,
            actix_test::TestRequest::get().uri("/chats?candidate=dev@example.com"),
        )
        .await;
        assert_eq!(mine["data"].as_array().map(Vec::len), Some(1));

        let all = call_json(
            &app,
            actix_test::TestRequest::get().uri("/chats?employer=a@example.com"),
        )
        .await;
        assert_eq!(all["data"].as_array().map(Vec::len), Some(2));
    }

    #[rstest]
    #[actix_web::test]
    async fn malformed_chat_id_is_status_false() {
        let app = init_app(memory_state()).await;
        let body = call_json(&app, actix_test::TestRequest::get().uri("/chat?id=xyz")).await;
        assert_eq!(body, json!({"status": false}));
    }
}
