//! HTTP mapping for domain errors.
//!
//! Every failure is answered with HTTP 200 and `{"status": false}` so existing
//! clients that only inspect `status` keep working. The code, message and
//! trace id go to the log instead; the `Trace-Id` header ties the two
//! together.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use serde_json::json;
use tracing::{error, warn};

use crate::domain::{Error, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn log_failure(error: &Error) {
    let trace_id = error.trace_id().unwrap_or("-");
    if error.code().is_client_error() {
        warn!(code = ?error.code(), detail = error.message(), trace_id, "request rejected");
    } else {
        error!(code = ?error.code(), detail = error.message(), trace_id, "request failed");
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        StatusCode::OK
    }

    fn error_response(&self) -> HttpResponse {
        log_failure(self);
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(json!({ "status": false }))
    }
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid JSON body: {err}")).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid query string: {err}")).into()
}

fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid path parameter: {err}")).into()
}

/// Default service for paths no route matches: `404` with
/// `{"status": false}`.
pub async fn unknown_route() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "status": false }))
}

/// Extractor configuration routing body, query and path failures through
/// the domain error mapping.
pub fn extractor_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .app_data(web::PathConfig::default().error_handler(path_error));
}

#[cfg(test)]
mod tests;
