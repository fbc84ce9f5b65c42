//! User directory handlers.
//!
//! ```text
//! GET  /users
//! POST /user          {"name":"Ada","email":"ada@example.com","role":"candidate"}
//! GET  /user/{email}
//! ```

use actix_web::{get, post, web};

use crate::domain::{Document, Error, InsertOutcome};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::schemas::{
    DocumentEnvelopeSchema, DocumentListEnvelopeSchema, DocumentSchema, InsertEnvelopeSchema,
};
use crate::inbound::http::state::HttpState;

/// List every user.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users, or status false on failure", body = DocumentListEnvelopeSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Envelope<Vec<Document>>>> {
    let users = state.users.list_users().await?;
    Ok(Envelope::json(users))
}

/// Store a user record as supplied.
#[utoipa::path(
    post,
    path = "/user",
    request_body = DocumentSchema,
    responses(
        (status = 200, description = "Insert outcome, or status false on failure", body = InsertEnvelopeSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/user")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<Document>,
) -> ApiResult<web::Json<Envelope<InsertOutcome>>> {
    let outcome = state.users.create_user(payload.into_inner()).await?;
    Ok(Envelope::json(outcome))
}

/// Look a user up by exact email. A miss answers `status: false`.
#[utoipa::path(
    get,
    path = "/user/{email}",
    params(("email" = String, Path, description = "Exact email address")),
    responses(
        (status = 200, description = "The user, or status false when absent", body = DocumentEnvelopeSchema)
    ),
    tags = ["users"],
    operation_id = "findUserByEmail"
)]
#[get("/user/{email}")]
pub async fn find_user(
    state: web::Data<HttpState>,
    email: web::Path<String>,
) -> ApiResult<web::Json<Envelope<Document>>> {
    let email = email.into_inner();
    let user = state
        .users
        .find_user_by_email(&email)
        .await?
        .ok_or_else(|| Error::not_found(format!("no user with email {email}")))?;
    Ok(Envelope::json(user))
}
