//! Request middleware.
//!
//! Purpose: request lifecycle concerns that sit outside the handlers, such as
//! trace correlation and the cross-origin policy.

pub mod cors;
pub mod trace;

pub use trace::Trace;
