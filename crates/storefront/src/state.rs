//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::{ConfigError, StorefrontConfig, validate_auth_secret};
use crate::services::auth::TokenVerifier;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and gives handlers access to
/// configuration and the token verifier.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    verifier: TokenVerifier,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The token verifier is built from `config.auth_secret` here, once, so
    /// every request reads the same immutable key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InsecureSecret` if the auth secret is too weak.
    /// The storefront refuses to start rather than verify tokens with it.
    pub fn new(config: StorefrontConfig) -> Result<Self, ConfigError> {
        validate_auth_secret(&config.auth_secret)?;
        let verifier = TokenVerifier::new(&config.auth_secret);

        Ok(Self {
            inner: Arc::new(AppStateInner { config, verifier }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the bearer token verifier.
    #[must_use]
    pub fn verifier(&self) -> &TokenVerifier {
        &self.inner.verifier
    }
}
