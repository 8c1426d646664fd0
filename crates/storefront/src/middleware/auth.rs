//! Bearer token auth gate and identity extractor.
//!
//! [`require_bearer_auth`] runs before protected handlers. It reads the
//! `Authorization` header, verifies the token, and places the decoded
//! [`AuthenticatedIdentity`] in the request extensions. Handlers receive it
//! by taking `AuthenticatedIdentity` as an argument.
//!
//! ```rust,ignore
//! Router::new()
//!     .route("/me", get(me))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer_auth))
//! ```

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::error::{AppError, set_sentry_user};
use crate::models::AuthenticatedIdentity;
use crate::services::auth::AuthError;
use crate::state::AppState;

/// Reject requests without a valid bearer token.
///
/// On success the identity is attached and `next` runs exactly once. On
/// failure the request is dropped untouched and a `401` is returned.
///
/// # Errors
///
/// Returns `AppError::Auth` with `MissingCredential` or
/// `InvalidOrExpiredCredential`.
pub async fn require_bearer_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = match request.headers().get(header::AUTHORIZATION) {
        None => None,
        Some(value) => Some(
            value
                .to_str()
                .map_err(|_| AuthError::InvalidOrExpiredCredential)?,
        ),
    };

    let identity = state.verifier().authenticate(header).inspect_err(|e| {
        tracing::warn!(path = %request.uri().path(), reason = %e, "bearer auth rejected");
    })?;

    tracing::Span::current().record("user_id", identity.sub.as_str());
    set_sentry_user(&identity.sub, identity.claim_str("email"));

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for AuthenticatedIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or(AppError::Auth(AuthError::MissingCredential))
    }
}
