//! Per-session shopping cart.
//!
//! A [`Cart`] is an ordered list of [`CartLine`]s with at most one line per
//! product. The total is never stored; it is recomputed from the lines every
//! time it is read, so it cannot drift from them.
//!
//! Quantities are taken as given. Zero and negative quantities are stored
//! like any other value; rejecting them is the caller's decision.
//!
//! Arithmetic never panics. [`Cart::add`], [`Cart::total`] and
//! [`Cart::item_count`] saturate at their numeric bounds, while
//! [`Cart::try_add`] and [`Cart::try_set_quantity`] refuse a change whose
//! quantity, item count, or total would not be representable.

mod store;

pub use store::{CartSnapshot, CartStore};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Price, Product, ProductId};

/// A cart change whose result cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("quantity for {0} overflows")]
    QuantityOverflow(ProductId),

    #[error("cart item count overflows")]
    ItemCountOverflow,

    #[error("cart total overflows")]
    TotalOverflow,
}

/// One product-quantity pairing within a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: i64,
}

impl CartLine {
    /// Product identifier of this line.
    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// `price * quantity` for this line.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.product.price.times(self.quantity)
    }
}

/// Ordered collection of cart lines, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up the line for a product.
    #[must_use]
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id() == product_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of `price * quantity` over all lines, saturating at the
    /// `Decimal` bounds.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines
            .iter()
            .fold(Decimal::ZERO, |total, line| total.saturating_add(line.amount()))
    }

    /// Sum of quantities over all lines (the cart badge count), saturating
    /// at the `i64` bounds.
    #[must_use]
    pub fn item_count(&self) -> i64 {
        self.lines
            .iter()
            .fold(0_i64, |count, line| count.saturating_add(line.quantity))
    }

    /// Add `quantity` units of `product`.
    ///
    /// If the product already has a line, only its quantity changes: the
    /// stored product fields are kept and `product` is dropped. Otherwise a
    /// new line is appended. A merged quantity saturates at the `i64` bounds.
    pub fn add(&mut self, product: Product, quantity: i64) {
        if let Some(line) = self.line_mut(&product.id) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine { product, quantity });
        }
    }

    /// Like [`Cart::add`], but leaves the cart untouched and returns an
    /// error if the merged quantity, the item count, or the total would
    /// overflow.
    ///
    /// # Errors
    ///
    /// Returns the first [`CartError`] the change would cause.
    pub fn try_add(&mut self, product: Product, quantity: i64) -> Result<(), CartError> {
        let merged = match self.line(&product.id) {
            Some(line) => line
                .quantity
                .checked_add(quantity)
                .ok_or_else(|| CartError::QuantityOverflow(product.id.clone()))?,
            None => quantity,
        };
        self.check_settles(&product.id, merged, product.price)?;
        self.add(product, quantity);
        Ok(())
    }

    /// Like [`Cart::set_quantity`], but leaves the cart untouched and
    /// returns an error if the item count or the total would overflow.
    ///
    /// # Errors
    ///
    /// Returns the first [`CartError`] the change would cause.
    pub fn try_set_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<(), CartError> {
        if self.line(product_id).is_none() {
            return Ok(());
        }
        self.check_settles(product_id, quantity, Price::ZERO)?;
        self.set_quantity(product_id, quantity);
        Ok(())
    }

    /// Remove the line for `product_id`. Absent products are ignored.
    pub fn remove(&mut self, product_id: &ProductId) {
        self.lines.retain(|line| line.product_id() != product_id);
    }

    /// Replace the quantity of an existing line. Never creates a line.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        if let Some(line) = self.line_mut(product_id) {
            line.quantity = quantity;
        }
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Check that the cart's item count and total stay representable once
    /// `product_id` holds `quantity`. `price` applies only when the product
    /// has no line yet.
    fn check_settles(
        &self,
        product_id: &ProductId,
        quantity: i64,
        price: Price,
    ) -> Result<(), CartError> {
        let mut count = 0_i64;
        let mut total = Decimal::ZERO;
        let mut present = false;

        for line in &self.lines {
            let qty = if line.product_id() == product_id {
                present = true;
                quantity
            } else {
                line.quantity
            };
            count = count.checked_add(qty).ok_or(CartError::ItemCountOverflow)?;
            total = line
                .product
                .price
                .checked_times(qty)
                .and_then(|amount| total.checked_add(amount))
                .ok_or(CartError::TotalOverflow)?;
        }

        if !present {
            count.checked_add(quantity).ok_or(CartError::ItemCountOverflow)?;
            price
                .checked_times(quantity)
                .and_then(|amount| total.checked_add(amount))
                .ok_or(CartError::TotalOverflow)?;
        }
        Ok(())
    }

    fn line_mut(&mut self, product_id: &ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id() == product_id)
    }
}
