//! Session-related types.

/// Session keys for storefront data.
pub mod session_keys {
    /// Key for storing the visitor's cart.
    pub const CART: &str = "cart";
}
