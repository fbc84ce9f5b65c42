//! Shared helpers for the HTTP integration suites.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web};
use jobbox::domain::ports::DocumentStore;
use jobbox::inbound::http::health::HealthState;
use jobbox::inbound::http::state::HttpState;
use jobbox::outbound::memory::InMemoryDocumentStore;
use jobbox::server::build_app;
use serde_json::Value;

/// Start the full application over `store`.
pub async fn app_over(
    store: Arc<dyn DocumentStore>,
) -> impl Service<Request, Response = ServiceResponse<EitherBody<BoxBody>>, Error = actix_web::Error>
{
    let http_state = web::Data::new(HttpState::from_store(store));
    test::init_service(build_app(web::Data::new(HealthState::new()), http_state)).await
}

/// Start the full application over a fresh in-memory store.
pub async fn memory_app()
-> impl Service<Request, Response = ServiceResponse<EitherBody<BoxBody>>, Error = actix_web::Error>
{
    app_over(Arc::new(InMemoryDocumentStore::new())).await
}

/// Send `request` and decode the JSON body, asserting the transport status
/// is 200.
pub async fn call_json<S>(app: &S, request: test::TestRequest) -> Value
where
    S: Service<Request, Response = ServiceResponse<EitherBody<BoxBody>>, Error = actix_web::Error>,
{
    let response = test::call_service(app, request.to_request()).await;
    assert_eq!(response.status(), actix_web::http::StatusCode::OK);
    test::read_body_json(response).await
}

/// `POST` `body` to `uri` and return the generated identifier.
pub async fn insert<S>(app: &S, uri: &str, body: Value) -> String
where
    S: Service<Request, Response = ServiceResponse<EitherBody<BoxBody>>, Error = actix_web::Error>,
{
    let created = call_json(app, test::TestRequest::post().uri(uri).set_json(body)).await;
    assert_eq!(
        created["status"],
        Value::Bool(true),
        "insert failed: {created}"
    );
    created["data"]["insertedId"]
        .as_str()
        .expect("insert returns an id")
        .to_owned()
}

/// `PATCH` `body` to `uri` and return the decoded envelope.
pub async fn patch<S>(app: &S, uri: &str, body: Value) -> Value
where
    S: Service<Request, Response = ServiceResponse<EitherBody<BoxBody>>, Error = actix_web::Error>,
{
    call_json(app, test::TestRequest::patch().uri(uri).set_json(body)).await
}

/// `GET` `uri` and return the decoded envelope.
pub async fn get<S>(app: &S, uri: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse<EitherBody<BoxBody>>, Error = actix_web::Error>,
{
    call_json(app, test::TestRequest::get().uri(uri)).await
}
