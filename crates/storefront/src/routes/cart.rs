//! Cart route handlers.
//!
//! The visitor's cart is kept in their session. Each handler loads it into a
//! [`CartStore`], applies one mutation, writes the cart back, and responds
//! with the published snapshot.

use axum::{
    Json,
    extract::rejection::JsonRejection,
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use pantry_core::{Cart, CartSnapshot, CartStore, Product, ProductId};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::session_keys;

/// Add to cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product: Product,
    /// Defaults to 1 when omitted.
    pub quantity: Option<i64>,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuantityRequest {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Remove from cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromCartRequest {
    pub product_id: ProductId,
}

/// Cart count badge response.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: i64,
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the visitor's cart into a store. Missing carts start empty.
///
/// Load, mutate, and save are not serialized per session: concurrent
/// requests on one session race, and the last save wins.
async fn load_cart(session: &Session) -> Result<CartStore> {
    let cart = session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default();
    Ok(CartStore::new(cart))
}

/// Persist the store's cart and return its latest snapshot.
async fn save_cart(session: &Session, store: CartStore) -> Result<Json<CartSnapshot>> {
    let snapshot = store.snapshot();
    session.insert(session_keys::CART, store.into_cart()).await?;
    Ok(Json(snapshot))
}

fn body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

// =============================================================================
// Handlers
// =============================================================================

/// Current cart contents and total.
///
/// # Errors
///
/// Returns `AppError::Session` if the session store fails.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<CartSnapshot>> {
    Ok(Json(load_cart(&session).await?.snapshot()))
}

/// Cart item count for the header badge.
///
/// # Errors
///
/// Returns `AppError::Session` if the session store fails.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<Json<CartCount>> {
    let count = load_cart(&session).await?.snapshot().item_count;
    Ok(Json(CartCount { count }))
}

/// Add a product to the cart, merging with an existing line.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for a malformed body, `AppError::Cart`
/// if the change would overflow, and `AppError::Session` if the session
/// store fails.
#[instrument(skip(session, payload))]
pub async fn add(
    session: Session,
    payload: std::result::Result<Json<AddToCartRequest>, JsonRejection>,
) -> Result<Json<CartSnapshot>> {
    let request = body(payload)?;
    let quantity = request.quantity.unwrap_or(1);
    let price = request.product.price.to_string();
    add_breadcrumb(
        "cart",
        "Added product",
        Some(&[
            ("product_id", request.product.id.as_str()),
            ("price", price.as_str()),
        ]),
    );

    let mut store = load_cart(&session).await?;
    store.try_add_to_cart(request.product, quantity)?;
    save_cart(&session, store).await
}

/// Replace the quantity of an existing line.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for a malformed body, `AppError::Cart`
/// if the change would overflow, and `AppError::Session` if the session
/// store fails.
#[instrument(skip(session, payload))]
pub async fn update(
    session: Session,
    payload: std::result::Result<Json<UpdateQuantityRequest>, JsonRejection>,
) -> Result<Json<CartSnapshot>> {
    let request = body(payload)?;
    add_breadcrumb(
        "cart",
        "Updated quantity",
        Some(&[("product_id", request.product_id.as_str())]),
    );

    let mut store = load_cart(&session).await?;
    store.try_update_quantity(&request.product_id, request.quantity)?;
    save_cart(&session, store).await
}

/// Remove a product's line from the cart.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for a malformed body and
/// `AppError::Session` if the session store fails.
#[instrument(skip(session, payload))]
pub async fn remove(
    session: Session,
    payload: std::result::Result<Json<RemoveFromCartRequest>, JsonRejection>,
) -> Result<Json<CartSnapshot>> {
    let request = body(payload)?;
    add_breadcrumb(
        "cart",
        "Removed product",
        Some(&[("product_id", request.product_id.as_str())]),
    );

    let mut store = load_cart(&session).await?;
    store.remove_from_cart(&request.product_id);
    save_cart(&session, store).await
}

/// Empty the cart.
///
/// # Errors
///
/// Returns `AppError::Session` if the session store fails.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Json<CartSnapshot>> {
    add_breadcrumb("cart", "Cleared cart", None);

    let mut store = load_cart(&session).await?;
    store.clear_cart();
    save_cart(&session, store).await
}
