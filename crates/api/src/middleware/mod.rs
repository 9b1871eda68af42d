//! HTTP middleware stack for the API.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (hub per request, HTTP context)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (recorded into the request span)
//! 4. Security headers
//!
//! Authentication is not a layer: protected handlers take [`RequireAuth`].

pub mod auth;
pub mod request_id;
pub mod security_headers;

pub use auth::{AuthRejection, RequireAuth};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use security_headers::security_headers_middleware;
