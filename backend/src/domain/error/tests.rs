//! Tests for domain error construction and trace capture.

use super::*;
use rstest::rstest;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::invalid_identifier("bad id"), ErrorCode::InvalidIdentifier)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::store_unavailable("down"), ErrorCode::StoreUnavailable)]
#[case(
    Error::write_unacknowledged("unconfirmed"),
    ErrorCode::WriteUnacknowledged
)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::NotFound, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn new_has_no_trace_id_out_of_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[tokio::test]
async fn new_captures_scoped_trace_id() {
    let trace_id: TraceId = TRACE_ID.parse().expect("valid trace id");
    let error = TraceId::scope(trace_id, async { Error::not_found("missing") }).await;
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
#[case(ErrorCode::InvalidRequest, true)]
#[case(ErrorCode::InvalidIdentifier, true)]
#[case(ErrorCode::NotFound, true)]
#[case(ErrorCode::StoreUnavailable, false)]
#[case(ErrorCode::WriteUnacknowledged, false)]
#[case(ErrorCode::InternalError, false)]
fn client_error_classification(#[case] code: ErrorCode, #[case] expected: bool) {
    assert_eq!(code.is_client_error(), expected);
}

#[rstest]
fn displays_the_message() {
    let error = Error::invalid_identifier("invalid identifier \"xyz\"");
    assert_eq!(error.to_string(), "invalid identifier \"xyz\"");
    assert_eq!(error.message(), error.to_string());
}
