//! Bearer token authentication.
//!
//! Verifies HMAC-signed JWTs issued by the account service. Issuing and
//! refreshing tokens happen elsewhere; this module only checks them.

mod error;

pub use error::AuthError;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, errors::ErrorKind};
use secrecy::{ExposeSecret, SecretString};

use crate::models::AuthenticatedIdentity;

/// Prefix stripped from the `Authorization` header value.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Extract the token from an `Authorization` header value.
///
/// A leading `"Bearer "` is stripped. A value without the prefix is used
/// verbatim as the token.
///
/// # Errors
///
/// Returns `AuthError::MissingCredential` if the header is absent or the
/// resulting token is empty.
pub fn extract_bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let value = header.ok_or(AuthError::MissingCredential)?;
    let token = value.strip_prefix(BEARER_PREFIX).unwrap_or(value);
    if token.is_empty() {
        return Err(AuthError::MissingCredential);
    }
    Ok(token)
}

/// Verifies bearer tokens against the shared secret.
///
/// Holds only immutable key material, so one instance is shared by every
/// request without locking.
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("key", &"[REDACTED]")
            .field("algorithms", &self.validation.algorithms)
            .finish()
    }
}

impl TokenVerifier {
    /// Create a verifier for HS256 tokens signed with `secret`.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_aud = false;

        Self {
            key: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            validation,
        }
    }

    /// Check signature and expiry, then decode the identity.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidOrExpiredCredential` on any verification or
    /// decoding failure.
    pub fn verify(&self, token: &str) -> Result<AuthenticatedIdentity, AuthError> {
        decode::<AuthenticatedIdentity>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => tracing::debug!("bearer token expired"),
                    kind => tracing::debug!(reason = ?kind, "bearer token rejected"),
                }
                AuthError::InvalidOrExpiredCredential
            })
    }

    /// Run the full gate: extract the token from the header value and verify it.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredential` or
    /// `AuthError::InvalidOrExpiredCredential`.
    pub fn authenticate(&self, header: Option<&str>) -> Result<AuthenticatedIdentity, AuthError> {
        let token = extract_bearer_token(header)?;
        self.verify(token)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::json;

    use super::*;

    const SECRET: &str = "aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6%";

    fn verifier() -> TokenVerifier {
        TokenVerifier::new(&SecretString::from(SECRET))
    }

    fn sign(claims: &serde_json::Value, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn valid_token() -> String {
        let exp = Utc::now().timestamp() + 3600;
        sign(&json!({ "sub": "user-1", "exp": exp, "email": "a@pantry.test" }), SECRET)
    }

    #[test]
    fn test_extract_strips_bearer_prefix() {
        assert_eq!(extract_bearer_token(Some("Bearer abc.def")), Ok("abc.def"));
    }

    #[test]
    fn test_extract_accepts_bare_token() {
        assert_eq!(extract_bearer_token(Some("abc.def")), Ok("abc.def"));
    }

    #[test]
    fn test_extract_prefix_is_case_sensitive() {
        assert_eq!(
            extract_bearer_token(Some("bearer abc")),
            Ok("bearer abc")
        );
    }

    #[test]
    fn test_extract_missing_header() {
        assert_eq!(extract_bearer_token(None), Err(AuthError::MissingCredential));
    }

    #[test]
    fn test_extract_empty_token() {
        assert_eq!(extract_bearer_token(Some("")), Err(AuthError::MissingCredential));
        assert_eq!(
            extract_bearer_token(Some("Bearer ")),
            Err(AuthError::MissingCredential)
        );
    }

    #[test]
    fn test_verify_valid_token() {
        let identity = verifier().verify(&valid_token()).unwrap();
        assert_eq!(identity.sub, "user-1");
        assert_eq!(identity.claim_str("email"), Some("a@pantry.test"));
    }

    #[test]
    fn test_verify_expired_token() {
        let exp = Utc::now().timestamp() - 3600;
        let token = sign(&json!({ "sub": "user-1", "exp": exp }), SECRET);

        assert_eq!(
            verifier().verify(&token),
            Err(AuthError::InvalidOrExpiredCredential)
        );
    }

    #[test]
    fn test_verify_wrong_secret() {
        let exp = Utc::now().timestamp() + 3600;
        let token = sign(
            &json!({ "sub": "user-1", "exp": exp }),
            "Zz9#Yy8@Xx7!Ww6$Vv5%Uu4^Tt3&Ss2*",
        );

        assert_eq!(
            verifier().verify(&token),
            Err(AuthError::InvalidOrExpiredCredential)
        );
    }

    #[test]
    fn test_verify_malformed_token() {
        assert_eq!(
            verifier().verify("not_a_valid_jwt_at_all"),
            Err(AuthError::InvalidOrExpiredCredential)
        );
    }

    #[test]
    fn test_verify_missing_subject() {
        let exp = Utc::now().timestamp() + 3600;
        let token = sign(&json!({ "exp": exp }), SECRET);

        assert_eq!(
            verifier().verify(&token),
            Err(AuthError::InvalidOrExpiredCredential)
        );
    }

    #[test]
    fn test_verify_missing_expiry() {
        let token = sign(&json!({ "sub": "user-1" }), SECRET);

        assert_eq!(
            verifier().verify(&token),
            Err(AuthError::InvalidOrExpiredCredential)
        );
    }

    #[test]
    fn test_authenticate_full_gate() {
        let v = verifier();
        let header = format!("Bearer {}", valid_token());

        assert!(v.authenticate(Some(&header)).is_ok());
        assert!(v.authenticate(Some(&valid_token())).is_ok());
        assert_eq!(v.authenticate(None), Err(AuthError::MissingCredential));
        assert_eq!(
            v.authenticate(Some("Bearer garbage")),
            Err(AuthError::InvalidOrExpiredCredential)
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let output = format!("{:?}", verifier());
        assert!(output.contains("[REDACTED]"));
        assert!(!output.contains(SECRET));
    }
}
