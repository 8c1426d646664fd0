//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Cart (JSON, session-backed)
//! GET  /cart                   - Cart lines, total, and item count
//! GET  /cart/count             - Cart count badge
//! POST /cart/add               - Add product (merges with an existing line)
//! POST /cart/update            - Replace a line's quantity
//! POST /cart/remove            - Remove a line
//! POST /cart/clear             - Empty the cart
//!
//! # Account (requires bearer token)
//! GET  /account/me             - Authenticated caller
//! ```

pub mod account;
pub mod cart;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::error::AppError;
use crate::middleware::require_bearer_auth;
use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/count", get(cart::count))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create the account routes router, guarded by the bearer auth gate.
pub fn account_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/me", get(account::me))
        .route_layer(middleware::from_fn_with_state(state, require_bearer_auth))
}

/// Create all routes for the storefront.
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/cart", cart_routes())
        .nest("/account", account_routes(state))
        .fallback(not_found)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn not_found(uri: axum::http::Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
