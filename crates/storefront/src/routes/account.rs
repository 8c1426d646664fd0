//! Account route handlers.
//!
//! These routes sit behind the bearer auth gate.

use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::instrument;

use crate::models::AuthenticatedIdentity;

/// The caller as seen by the storefront.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub user_id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<&AuthenticatedIdentity> for AccountView {
    fn from(identity: &AuthenticatedIdentity) -> Self {
        Self {
            user_id: identity.sub.clone(),
            email: identity.claim_str("email").map(String::from),
            name: identity.claim_str("name").map(String::from),
            expires_at: identity.expires_at(),
        }
    }
}

/// Return the authenticated caller.
#[instrument(skip(identity), fields(user_id = %identity.sub))]
pub async fn me(identity: AuthenticatedIdentity) -> Json<AccountView> {
    Json(AccountView::from(&identity))
}
