//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web};
use serde_json::Value;

use crate::inbound::http::health::HealthState;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryDocumentStore;
use crate::server::build_app;

/// Handler state over a fresh in-memory store.
pub fn memory_state() -> web::Data<HttpState> {
    web::Data::new(HttpState::from_store(
        Arc::new(InMemoryDocumentStore::new()),
    ))
}

/// Initialise the full application around `state`.
pub async fn init_app(
    state: web::Data<HttpState>,
) -> impl Service<Request, Response = ServiceResponse<EitherBody<BoxBody>>, Error = actix_web::Error>
{
    test::init_service(build_app(web::Data::new(HealthState::new()), state)).await
}

/// Send `request` and decode the JSON body.
pub async fn call_json<S>(app: &S, request: test::TestRequest) -> Value
where
    S: Service<Request, Response = ServiceResponse<EitherBody<BoxBody>>, Error = actix_web::Error>,
{
    test::call_and_read_body_json(app, request.to_request()).await
}

/// `POST` `body` to `uri` and return the generated identifier.
pub async fn insert<S>(app: &S, uri: &str, body: Value) -> String
where
    S: Service<Request, Response = ServiceResponse<EitherBody<BoxBody>>, Error = actix_web::Error>,
{
    let created = call_json(app, test::TestRequest::post().uri(uri).set_json(body)).await;
    created["data"]["insertedId"]
        .as_str()
        .expect("insert returns an id")
        .to_owned()
}
