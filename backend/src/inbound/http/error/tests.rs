//! Tests for HTTP error mapping.

use super::*;
use crate::domain::{ErrorCode, TraceId};
use actix_web::App;
use actix_web::body::to_bytes;
use actix_web::test::{self};
use rstest::rstest;
use serde::Deserialize;
use serde_json::Value;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

async fn body_of(response: HttpResponse) -> Value {
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("failure body is JSON")
}

#[rstest]
#[case(Error::invalid_request("bad body"))]
#[case(Error::invalid_identifier("not a uuid"))]
#[case(Error::not_found("missing"))]
#[case(Error::store_unavailable("down"))]
#[case(Error::write_unacknowledged("dropped"))]
#[case(Error::internal("boom"))]
#[actix_web::test]
async fn every_failure_is_status_false_with_http_ok(#[case] error: Error) {
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_of(response).await, json!({"status": false}));
}

#[rstest]
#[actix_web::test]
async fn failure_echoes_trace_header() {
    let trace_id: TraceId = TRACE_ID.parse().expect("valid trace id");
    let error = TraceId::scope(trace_id, async { Error::store_unavailable("down") }).await;
    let response = ResponseError::error_response(&error);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .expect("trace header present")
        .to_str()
        .expect("ascii header");
    assert_eq!(header, TRACE_ID);
}

#[rstest]
#[actix_web::test]
async fn failure_without_trace_id_has_no_header() {
    let response = ResponseError::error_response(&Error::not_found("missing"));
    assert!(response.headers().get(TRACE_ID_HEADER).is_none());
}

#[derive(Debug, Deserialize)]
struct Greeting {
    #[expect(dead_code, reason = "deserialisation target only")]
    name: String,
}

async fn greet(_body: web::Json<Greeting>) -> HttpResponse {
    HttpResponse::Ok().finish()
}

#[rstest]
#[case::malformed("{not json")]
#[case::wrong_shape(r#"{"other": 1}"#)]
#[actix_web::test]
async fn body_extraction_failures_become_status_false(#[case] payload: &'static str) {
    let app = test::init_service(
        App::new()
            .configure(extractor_config)
            .route("/", web::post().to(greet)),
    )
    .await;
    let request = test::TestRequest::post()
        .uri("/")
        .insert_header(("content-type", "application/json"))
        .set_payload(payload)
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body, json!({"status": false}));
}

#[rstest]
#[actix_web::test]
async fn unmatched_paths_are_not_found_with_status_false() {
    let app = test::init_service(App::new().default_service(web::to(unknown_route))).await;
    for method in [actix_web::http::Method::GET, actix_web::http::Method::PATCH] {
        let request = test::TestRequest::default()
            .method(method)
            .uri("/nowhere")
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body, json!({"status": false}));
    }
}

#[rstest]
fn client_errors_are_separated_from_server_errors() {
    assert!(Error::invalid_request("x").code().is_client_error());
    assert!(!Error::store_unavailable("x").code().is_client_error());
    assert_eq!(Error::internal("x").code(), ErrorCode::InternalError);
}
