//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. CORS
//!
//! Route guards are extractors rather than layers; see [`auth`].

pub mod auth;
pub mod request_id;

pub use auth::{AuthRejection, RequireAdmin};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
