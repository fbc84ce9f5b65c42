//! Permissive cross-origin policy.
//!
//! Browsers may call the API from any origin with any method and headers.
//! Preflight requests are answered by the middleware itself, and the
//! `trace-id` response header is exposed to scripts.

use actix_cors::Cors;

use crate::domain::TRACE_ID_HEADER;

const PREFLIGHT_MAX_AGE_SECS: usize = 86_400;

/// CORS middleware allowing every origin, method and request header.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use jobbox::middleware::cors::cors;
///
/// let app = App::new().wrap(cors());
/// ```
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allow_any_method()
        .allow_any_header()
        .expose_headers([TRACE_ID_HEADER])
        .max_age(PREFLIGHT_MAX_AGE_SECS)
}
