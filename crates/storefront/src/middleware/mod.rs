//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span with `request_id` and `user_id` fields)
//! 3. Request ID (record, tag, echo)
//! 4. Security headers
//! 5. Session layer (tower-sessions, in-memory store)
//! 6. Bearer auth gate (protected routes only, via `route_layer`)

pub mod auth;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::require_bearer_auth;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
