//! Integration tests for Pantry.
//!
//! Tests drive the fully assembled storefront router in-process with
//! `tower::ServiceExt::oneshot`, so no server, port, or network is needed.
//!
//! ```bash
//! cargo test -p pantry-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use rust_decimal::Decimal;
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;

use pantry_storefront::config::{SentryConfig, StorefrontConfig};
use pantry_storefront::state::AppState;

/// Verification secret shared by the test router and [`TestContext::sign`].
pub const TEST_AUTH_SECRET: &str = "aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6%";

/// Response captured from the router.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Parse the body as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not valid JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("response body is not JSON")
    }
}

/// One simulated browser: a router plus the session cookie it was handed.
pub struct TestContext {
    app: Router,
    cookie: Option<String>,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Build a storefront router with test configuration.
    ///
    /// # Panics
    ///
    /// Panics if the test configuration is rejected.
    #[must_use]
    pub fn new() -> Self {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().expect("valid host"),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            auth_secret: SecretString::from(TEST_AUTH_SECRET),
            sentry: SentryConfig::default(),
        };
        let state = AppState::new(config).expect("test config accepted");

        Self {
            app: pantry_storefront::app(state),
            cookie: None,
        }
    }

    /// Drop the session cookie, as a new visitor would arrive.
    pub fn forget_session(&mut self) {
        self.cookie = None;
    }

    /// Send a request, carrying and updating the session cookie.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the router fails.
    pub async fn request(
        &mut self,
        method: Method,
        uri: &str,
        body: Option<&Value>,
        authorization: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).expect("valid request"))
            .await
            .expect("router is infallible");

        if let Some(pair) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
        {
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// `GET` without credentials.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None, None).await
    }

    /// `POST` a JSON body without credentials.
    pub async fn post(&mut self, uri: &str, body: &Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body), None).await
    }

    /// Sign claims with the test secret.
    ///
    /// # Panics
    ///
    /// Panics if encoding fails.
    #[must_use]
    pub fn sign(claims: &Value) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(TEST_AUTH_SECRET.as_bytes()),
        )
        .expect("token encodes")
    }

    /// Token for `sub` expiring `exp_offset_secs` from now.
    #[must_use]
    pub fn token_for(sub: &str, exp_offset_secs: i64) -> String {
        Self::sign(&serde_json::json!({
            "sub": sub,
            "exp": Utc::now().timestamp() + exp_offset_secs,
            "email": format!("{sub}@pantry.test"),
        }))
    }
}

/// Read a decimal from a JSON value serialized as string or number.
#[must_use]
pub fn decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.to_string().parse().ok(),
        _ => None,
    }
}

/// Catalog product payload with the given id and price.
#[must_use]
pub fn product_json(id: &str, price: &str) -> Value {
    serde_json::json!({
        "id": id,
        "name": format!("Product {id}"),
        "description": "",
        "price": price,
        "category": "pantry",
        "image": format!("/images/{id}.jpg"),
        "stock": 10,
        "unit": "each",
        "rating": 4.5,
        "reviewCount": 3,
        "discount": "0",
        "featured": false,
        "sku": format!("SKU-{id}"),
    })
}
