//! The `{status, data}` wrapper every successful response uses.
//!
//! Failures never go through this type; see [`super::error`].

use actix_web::web;
use serde::Serialize;

/// Successful response body.
///
/// # Examples
/// ```
/// use jobbox::inbound::http::envelope::Envelope;
///
/// let body = serde_json::to_value(Envelope::ok(Option::<u8>::None)).expect("serialise");
/// assert_eq!(body, serde_json::json!({"status": true, "data": null}));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    status: bool,
    data: T,
}

impl<T: Serialize> Envelope<T> {
    pub const fn ok(data: T) -> Self {
        Self { status: true, data }
    }

    /// Wrap `data` as a JSON responder.
    pub fn json(data: T) -> web::Json<Self> {
        web::Json(Self::ok(data))
    }
}
