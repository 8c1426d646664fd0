//! Observable cart store.
//!
//! [`CartStore`] owns a [`Cart`] and publishes a fresh [`CartSnapshot`] after
//! every mutation. Observers hold a `tokio::sync::watch` receiver and always
//! see the latest `(lines, total)` pair.

use rust_decimal::Decimal;
use serde::Serialize;
use tokio::sync::watch;

use super::{Cart, CartError, CartLine};
use crate::types::{Product, ProductId};

/// Published view of a cart after a mutation settles.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub total: Decimal,
    pub item_count: i64,
}

impl From<&Cart> for CartSnapshot {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart.lines().to_vec(),
            total: cart.total(),
            item_count: cart.item_count(),
        }
    }
}

/// Single-writer cart container with snapshot publication.
///
/// Mutations take `&mut self`; sharing a store across tasks requires the
/// caller to serialize writes.
#[derive(Debug)]
pub struct CartStore {
    cart: Cart,
    snapshots: watch::Sender<CartSnapshot>,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new(Cart::new())
    }
}

impl CartStore {
    /// Wrap an existing cart, e.g. one restored from session storage.
    #[must_use]
    pub fn new(cart: Cart) -> Self {
        let (snapshots, _) = watch::channel(CartSnapshot::from(&cart));
        Self { cart, snapshots }
    }

    /// Subscribe to snapshots. The receiver starts at the current state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.snapshots.subscribe()
    }

    /// Latest published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        self.snapshots.borrow().clone()
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    #[must_use]
    pub fn total(&self) -> Decimal {
        self.snapshots.borrow().total
    }

    /// Consume the store, returning the cart for persistence.
    #[must_use]
    pub fn into_cart(self) -> Cart {
        self.cart
    }

    pub fn add_to_cart(&mut self, product: Product, quantity: i64) {
        self.cart.add(product, quantity);
        self.publish();
    }

    /// Add unless the merged quantity, item count, or total would
    /// overflow. Nothing is published on error.
    ///
    /// # Errors
    ///
    /// Returns the [`CartError`] that rejected the change.
    pub fn try_add_to_cart(&mut self, product: Product, quantity: i64) -> Result<(), CartError> {
        self.cart.try_add(product, quantity)?;
        self.publish();
        Ok(())
    }

    pub fn remove_from_cart(&mut self, product_id: &ProductId) {
        self.cart.remove(product_id);
        self.publish();
    }

    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        self.cart.set_quantity(product_id, quantity);
        self.publish();
    }

    /// Update unless the item count or total would overflow. Nothing is
    /// published on error.
    ///
    /// # Errors
    ///
    /// Returns the [`CartError`] that rejected the change.
    pub fn try_update_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<(), CartError> {
        self.cart.try_set_quantity(product_id, quantity)?;
        self.publish();
        Ok(())
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.publish();
    }

    fn publish(&self) {
        let snapshot = CartSnapshot::from(&self.cart);
        tracing::debug!(
            lines = snapshot.lines.len(),
            total = %snapshot.total,
            "cart snapshot published"
        );
        self.snapshots.send_replace(snapshot);
    }
}
