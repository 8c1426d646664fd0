//! Pantry Core - Shared domain types and cart state.
//!
//! This crate provides the types used across the Pantry storefront:
//! - [`types`] - Newtype wrappers for product IDs and prices, plus the catalog `Product`
//! - [`cart`] - The per-session cart container and its observable store
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no HTTP,
//! no session storage, no network clients. The storefront crate owns all I/O.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{Cart, CartError, CartLine, CartSnapshot, CartStore};
pub use types::*;
