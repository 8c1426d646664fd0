//! Authentication error types.

use thiserror::Error;

/// Reasons the auth gate rejects a request.
///
/// Both variants end the request with `401 Unauthorized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No `Authorization` header, or an empty token after prefix stripping.
    #[error("missing credential")]
    MissingCredential,

    /// Bad signature, malformed token or claims, or elapsed expiry.
    #[error("invalid or expired credential")]
    InvalidOrExpiredCredential,
}
